//! Combinator implementations for InferStrategy.

use super::InferStrategy;
use crate::bytecode::{Insn, InsnId};
use crate::inference::InferContext;
use sigscope_api::TypeName;

/// Or-else combinator: try first, then second if first returns None.
pub struct OrElse<A, B> {
    first: A,
    second: B,
}

impl<A, B> OrElse<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: InferStrategy, B: InferStrategy> InferStrategy for OrElse<A, B> {
    fn infer(&self, at: InsnId, insn: &Insn, ctx: &InferContext) -> Option<TypeName> {
        self.first
            .infer(at, insn, ctx)
            .or_else(|| self.second.infer(at, insn, ctx))
    }
}
