//! Return-type resolution for a whole method.

use super::conventions::Conventions;
use super::context::InferContext;
use super::strategy::trace_before;
use crate::bytecode::{ClassIndex, Insn, InsnId, MethodModel, PushKind, ReturnKind};
use sigscope_api::models::type_name::{BOOLEAN, INTEGER};
use sigscope_api::{InferredTypes, TypeName};
use tracing::{debug, trace};

/// Infers what a method actually returns.
///
/// Methods whose declaration already says enough are answered from their
/// signature. Everything else (erased `Object`, `void`, synthetic or bridge
/// methods, framework types) is answered by tracing every return back to the
/// instruction that produced its value.
#[derive(Clone, Copy)]
pub struct ReturnTypeResolver<'c> {
    conventions: &'c Conventions,
}

impl ReturnTypeResolver<'static> {
    /// Resolver using the built-in Kotlin / Jooby conventions.
    pub fn new() -> Self {
        Self {
            conventions: Conventions::kotlin(),
        }
    }
}

impl Default for ReturnTypeResolver<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> ReturnTypeResolver<'c> {
    pub fn with_conventions(conventions: &'c Conventions) -> Self {
        Self { conventions }
    }

    pub fn conventions(&self) -> &'c Conventions {
        self.conventions
    }

    /// Inferred return types of `method`, never empty.
    pub fn infer(&self, method: &MethodModel, index: &dyn ClassIndex) -> InferredTypes {
        if self.is_self_describing(method) {
            return InferredTypes::single(method.declared_return_type());
        }
        self.infer_ignoring_signature(method, index)
    }

    /// Trace every return regardless of what the declaration says.
    pub fn infer_ignoring_signature(
        &self,
        method: &MethodModel,
        index: &dyn ClassIndex,
    ) -> InferredTypes {
        let ctx = InferContext::new(method, index, self.conventions);
        let mut types: InferredTypes = method
            .instructions
            .returns()
            .map(|(at, kind)| self.trace_return(at, kind, &ctx))
            .collect();

        if types.is_empty() {
            debug!("{}{} has no return, using declared type", method.name, method.descriptor);
            types.insert(ctx.declared_return());
        }
        types
    }

    fn is_self_describing(&self, method: &MethodModel) -> bool {
        let declared = method.return_type();
        !method.is_synthetic()
            && !declared.is_uninformative()
            && !self.conventions.is_context_type(&declared)
            && !self.conventions.is_opaque_return(&declared)
    }

    fn trace_return(&self, at: InsnId, kind: ReturnKind, ctx: &InferContext) -> TypeName {
        if kind == ReturnKind::Void {
            return ctx.declared_return();
        }

        let insns = ctx.instructions();
        match insns.prev(at).and_then(|prev| insns.get(prev)) {
            Some(Insn::Push {
                kind: PushKind::Bipush | PushKind::Sipush,
                ..
            }) => return TypeName::new(INTEGER),
            Some(Insn::Push {
                kind: PushKind::Iconst,
                value: 0 | 1,
            }) => return TypeName::new(BOOLEAN),
            _ => {}
        }

        let traced = trace_before(at, ctx);
        trace!("Return at {:?} traced to {:?}", at, traced);
        traced.unwrap_or_else(|| ctx.declared_return())
    }
}

/// Infer return types with the built-in conventions.
pub fn infer(method: &MethodModel, index: &dyn ClassIndex) -> InferredTypes {
    ReturnTypeResolver::new().infer(method, index)
}
