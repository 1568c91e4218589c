//! Recognition of compiler-inserted helper calls.
//!
//! Helpers such as Kotlin's null checks are emitted between the value that is
//! returned and the return itself. A backward trace skips the whole helper
//! sequence: the call plus the pushes of its arguments, and the `new`/`dup`
//! pair for helper constructors.

use crate::bytecode::MethodCall;
use crate::config::IntrinsicSpec;
use crate::descriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrinsicPattern {
    owner: String,
    methods: Vec<String>,
}

impl IntrinsicPattern {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, name: impl Into<String>) -> Self {
        self.methods.push(name.into());
        self
    }

    pub fn matches(&self, call: &MethodCall) -> bool {
        call.owner == self.owner
            && (self.methods.is_empty() || self.methods.iter().any(|name| *name == call.name))
    }
}

impl From<&IntrinsicSpec> for IntrinsicPattern {
    fn from(spec: &IntrinsicSpec) -> Self {
        Self {
            owner: spec.owner.clone(),
            methods: spec.methods.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntrinsicFilter {
    patterns: Vec<IntrinsicPattern>,
}

impl IntrinsicFilter {
    pub fn new(patterns: Vec<IntrinsicPattern>) -> Self {
        Self { patterns }
    }

    pub fn from_specs(specs: &[IntrinsicSpec]) -> Self {
        Self::new(specs.iter().map(IntrinsicPattern::from).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `call` targets a registered helper.
    pub fn is_intrinsic(&self, call: &MethodCall) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(call))
    }

    /// Number of non-marker instructions, ending with `call`, that make up the
    /// helper sequence. `None` when `call` is not a skippable helper.
    ///
    /// Only helpers returning `void` are skipped; a helper that produces a
    /// value is itself the origin of that value.
    pub fn run_length(&self, call: &MethodCall) -> Option<usize> {
        if !self.is_intrinsic(call) || !descriptor::return_type(&call.descriptor).is_void() {
            return None;
        }
        let mut run = 1 + descriptor::argument_count(&call.descriptor);
        if call.is_constructor() {
            // new + dup
            run += 2;
        }
        Some(run)
    }
}
