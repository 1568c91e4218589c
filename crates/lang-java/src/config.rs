//! User-facing inference settings.
//!
//! Everything compiler or framework specific lives here so that other
//! toolchains can be described without code changes. The defaults describe
//! Kotlin-compiled Jooby applications.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InferenceConfig {
    /// Request context type (dotted). Methods declared to return it are
    /// analysed, and `ctx.body(Foo.class)` style reads resolve to the class literal.
    pub context_type: String,
    /// Declared return types (dotted) that never answer the question on their own.
    pub opaque_return_types: Vec<String>,
    /// Dotted prefixes of generic container types whose element type is
    /// recovered from the stored value.
    pub container_prefixes: Vec<String>,
    /// Compiler-inserted helper calls skipped during a backward trace.
    pub intrinsics: Vec<IntrinsicSpec>,
    /// Synthetic accessor names that forward to another method.
    pub accessor_patterns: Vec<AccessorSpec>,
    /// Compiled closure classes whose generic signature names the result type.
    pub closures: Vec<ClosureSpec>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IntrinsicSpec {
    /// Internal name of the helper class.
    pub owner: String,
    /// Restrict to these method names; empty means every method.
    #[serde(default)]
    pub methods: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccessorSpec {
    pub name: String,
    /// Regex over the called method name. Capture group 1 is the target method name.
    pub pattern: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClosureSpec {
    /// Internal name of the base class every compiled closure extends.
    pub holder: String,
    /// Name of the local variable holding the closure instance.
    #[serde(default = "default_receiver")]
    pub receiver: String,
    /// Internal names that never carry the result type.
    #[serde(default)]
    pub ignored: Vec<String>,
}

fn default_receiver() -> String {
    "this".to_string()
}

pub const KOTLIN_INTRINSICS: &str = "kotlin/jvm/internal/Intrinsics";
pub const KOTLIN_TYPE_CAST_EXCEPTION: &str = "kotlin/TypeCastException";
pub const KOTLIN_LAMBDA: &str = "kotlin/jvm/internal/Lambda";

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            context_type: "io.jooby.Context".to_string(),
            opaque_return_types: vec!["io.jooby.Jooby".to_string()],
            container_prefixes: vec!["java.util.".to_string()],
            intrinsics: vec![
                IntrinsicSpec {
                    owner: KOTLIN_INTRINSICS.to_string(),
                    methods: Vec::new(),
                },
                IntrinsicSpec {
                    owner: KOTLIN_TYPE_CAST_EXCEPTION.to_string(),
                    methods: Vec::new(),
                },
            ],
            accessor_patterns: vec![AccessorSpec {
                name: "kotlin-invoke-accessor".to_string(),
                pattern: r"^access\$(invoke\$.*)$".to_string(),
            }],
            closures: vec![ClosureSpec {
                holder: KOTLIN_LAMBDA.to_string(),
                receiver: default_receiver(),
                ignored: vec![
                    KOTLIN_LAMBDA.to_string(),
                    "kotlin/jvm/functions/Function1".to_string(),
                    "io/jooby/HandlerContext".to_string(),
                ],
            }],
        }
    }
}

impl InferenceConfig {
    /// Configuration with every heuristic disabled; only signatures,
    /// descriptors and the backward trace are used.
    pub fn plain() -> Self {
        Self {
            context_type: String::new(),
            opaque_return_types: Vec::new(),
            container_prefixes: Vec::new(),
            intrinsics: Vec::new(),
            accessor_patterns: Vec::new(),
            closures: Vec::new(),
        }
    }
}
