//! Context for return-type inference.
//!
//! Holds the state passed through the strategy chain.

use super::conventions::Conventions;
use crate::bytecode::{ClassIndex, InsnList, MethodModel};
use sigscope_api::TypeName;

/// Bound on nested traces (variable stores, cast operands).
pub const MAX_TRACE_DEPTH: usize = 16;

/// Context for a single method's inference.
///
/// Immutable; [`InferContext::deeper`] produces the context of a nested trace.
#[derive(Clone, Copy)]
pub struct InferContext<'a> {
    /// Method being analysed
    pub method: &'a MethodModel,
    /// Class lookups for calls, fields and closures
    pub index: &'a dyn ClassIndex,
    pub conventions: &'a Conventions,
    depth: usize,
}

impl<'a> InferContext<'a> {
    pub fn new(
        method: &'a MethodModel,
        index: &'a dyn ClassIndex,
        conventions: &'a Conventions,
    ) -> Self {
        Self {
            method,
            index,
            conventions,
            depth: 0,
        }
    }

    pub fn instructions(&self) -> &'a InsnList {
        &self.method.instructions
    }

    /// Erased return type of the method, the fallback of every trace.
    pub fn declared_return(&self) -> TypeName {
        self.method.return_type()
    }

    pub fn deeper(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    pub fn exhausted(&self) -> bool {
        self.depth >= MAX_TRACE_DEPTH
    }
}
