//! Local variable inference.
//!
//! Resolution order for a variable load:
//! 1. generic signature from the local variable table,
//! 2. compiled closure capture (the closure class signature names the result),
//! 3. generic containers: the value stored into the slot,
//! 4. request context: the value stored into the slot, traced in full,
//! 5. the declared (erased) type.

use super::{InferStrategy, trace_before};
use crate::bytecode::{Insn, InsnId, ValueKind};
use crate::inference::InferContext;
use crate::{descriptor, signature};
use sigscope_api::TypeName;
use tracing::debug;

/// Infer type from a variable load.
pub struct LocalVarInfer;

impl InferStrategy for LocalVarInfer {
    fn infer(&self, at: InsnId, insn: &Insn, ctx: &InferContext) -> Option<TypeName> {
        let Insn::Load { slot, .. } = insn else {
            return None;
        };
        resolve_local(at, *slot, ctx)
    }
}

/// Type of the variable in `slot` as loaded at `at`; `None` when the method
/// has no table entry for the slot.
pub fn resolve_local(at: InsnId, slot: u16, ctx: &InferContext) -> Option<TypeName> {
    let method = ctx.method;
    let var = method
        .local_variable_at(slot, at)
        .or_else(|| method.local_variable(slot))?;

    if let Some(sig) = &var.signature {
        return Some(signature::parse(sig));
    }

    if let Some(captured) = closure_capture(at, ctx) {
        debug!("Closure capture in {} resolved to {}", method.name, captured);
        return Some(captured);
    }

    let declared = descriptor::field_type(&var.descriptor);

    if ctx.conventions.is_container(&declared) {
        if let Some(stored) = stored_container(at, slot, ctx) {
            debug!("Container {} in slot {} resolved to {}", declared, slot, stored);
            return Some(stored);
        }
    }

    if ctx.conventions.is_context_type(&declared) {
        if let Some(store) = last_store(at, slot, ctx, |_| true) {
            return Some(trace_before(store, &ctx.deeper()).unwrap_or(declared));
        }
    }

    Some(declared)
}

/// Result type named by the class signature of the enclosing compiled closure.
fn closure_capture(at: InsnId, ctx: &InferContext) -> Option<TypeName> {
    let intrinsics = ctx.conventions.intrinsics();
    let after_helper = ctx
        .instructions()
        .backward_before(at)
        .any(|(_, insn)| insn.as_call().is_some_and(|call| intrinsics.is_intrinsic(call)));
    if !after_helper {
        return None;
    }

    ctx.conventions.closures().iter().find_map(|closure| {
        let receiver = ctx.method.local_variable_named(closure.receiver())?;
        let class = ctx.index.lookup(descriptor::internal_name(&receiver.descriptor)?)?;
        let sig = class.signature.as_deref()?;
        if !signature::references(sig, closure.holder()) {
            return None;
        }
        signature::first_type_where(sig, |name| closure.is_candidate(name))
            .filter(|ty| !ty.is_uninformative())
    })
}

/// Parameterized type of the value last stored into a container slot.
fn stored_container(at: InsnId, slot: u16, ctx: &InferContext) -> Option<TypeName> {
    let store = last_store(at, slot, ctx, |kind| kind == ValueKind::Reference)?;
    let stored = trace_before(store, &ctx.deeper())?;
    // a raw type adds nothing over the declared one
    stored.parameter.is_some().then_some(stored)
}

fn last_store<F>(at: InsnId, slot: u16, ctx: &InferContext, accept: F) -> Option<InsnId>
where
    F: Fn(ValueKind) -> bool,
{
    ctx.instructions()
        .backward_before(at)
        .find(|(_, insn)| {
            matches!(insn, Insn::Store { kind, slot: stored } if *stored == slot && accept(*kind))
        })
        .map(|(id, _)| id)
}
