//! Compiled form of [`InferenceConfig`].

use super::filter::IntrinsicFilter;
use crate::config::{AccessorSpec, ClosureSpec, InferenceConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use sigscope_api::TypeName;
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum ConventionError {
    #[error("Invalid accessor pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("Accessor pattern '{name}' has no capture group for the target method")]
    MissingCapture { name: String },
}

/// Synthetic accessor naming rule, e.g. `access$invoke$lambda` forwarding to
/// `invoke$lambda`.
#[derive(Debug, Clone)]
pub struct AccessorConvention {
    name: String,
    pattern: Regex,
}

impl AccessorConvention {
    pub fn compile(spec: &AccessorSpec) -> Result<Self, ConventionError> {
        let pattern = Regex::new(&spec.pattern).map_err(|source| ConventionError::InvalidPattern {
            name: spec.name.clone(),
            source,
        })?;
        if pattern.captures_len() < 2 {
            return Err(ConventionError::MissingCapture {
                name: spec.name.clone(),
            });
        }
        Ok(Self {
            name: spec.name.clone(),
            pattern,
        })
    }

    /// Name of the method the accessor forwards to.
    pub fn target<'n>(&self, method_name: &'n str) -> Option<&'n str> {
        let captures = self.pattern.captures(method_name)?;
        captures.get(1).map(|m| m.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureConvention {
    holder: String,
    receiver: String,
    ignored: Vec<String>,
}

impl ClosureConvention {
    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Whether a type named in the closure's class signature may be its result.
    pub fn is_candidate(&self, internal_name: &str) -> bool {
        internal_name != "java/lang/Object" && !self.ignored.iter().any(|i| i == internal_name)
    }
}

impl From<&ClosureSpec> for ClosureConvention {
    fn from(spec: &ClosureSpec) -> Self {
        Self {
            holder: spec.holder.clone(),
            receiver: spec.receiver.clone(),
            ignored: spec.ignored.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conventions {
    context_type: String,
    opaque_return_types: Vec<String>,
    container_prefixes: Vec<String>,
    intrinsics: IntrinsicFilter,
    accessors: Vec<AccessorConvention>,
    closures: Vec<ClosureConvention>,
}

static KOTLIN_JOOBY: Lazy<Conventions> = Lazy::new(|| {
    Conventions::from_config(&InferenceConfig::default())
        .expect("Default inference conventions failed to compile - this is a fatal error")
});

impl Conventions {
    pub fn from_config(config: &InferenceConfig) -> Result<Self, ConventionError> {
        let accessors = config
            .accessor_patterns
            .iter()
            .map(AccessorConvention::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            context_type: config.context_type.clone(),
            opaque_return_types: config.opaque_return_types.clone(),
            container_prefixes: config.container_prefixes.clone(),
            intrinsics: IntrinsicFilter::from_specs(&config.intrinsics),
            accessors,
            closures: config.closures.iter().map(ClosureConvention::from).collect(),
        })
    }

    /// The built-in Kotlin / Jooby convention set.
    pub fn kotlin() -> &'static Conventions {
        &KOTLIN_JOOBY
    }

    pub fn intrinsics(&self) -> &IntrinsicFilter {
        &self.intrinsics
    }

    pub fn closures(&self) -> &[ClosureConvention] {
        &self.closures
    }

    pub fn is_context_type(&self, ty: &TypeName) -> bool {
        !self.context_type.is_empty() && !ty.is_array() && ty.name == self.context_type
    }

    pub fn is_opaque_return(&self, ty: &TypeName) -> bool {
        !ty.is_array() && self.opaque_return_types.iter().any(|name| *name == ty.name)
    }

    pub fn is_container(&self, ty: &TypeName) -> bool {
        !ty.is_array()
            && self
                .container_prefixes
                .iter()
                .any(|prefix| ty.name.starts_with(prefix.as_str()))
    }

    /// Target of the first accessor convention matching `method_name`.
    pub fn accessor_target<'n>(&self, method_name: &'n str) -> Option<&'n str> {
        self.accessors.iter().find_map(|accessor| {
            let target = accessor.target(method_name)?;
            trace!("{} matches accessor convention {}", method_name, accessor.name);
            Some(target)
        })
    }
}

impl Default for Conventions {
    fn default() -> Self {
        Self::kotlin().clone()
    }
}
