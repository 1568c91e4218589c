//! Value-origin strategies using combinator pattern.
//!
//! Each strategy implements [`InferStrategy`] for the instruction kinds it
//! understands and can be combined using `or_else()`.

mod array;
mod cast;
mod combinator;
mod constant;
mod dynamic;
mod field;
pub mod local;
mod method;
mod new_expr;

pub use array::{ArrayInfer, ElementLoadInfer};
pub use cast::CheckCastInfer;
pub use combinator::OrElse;
pub use constant::ConstantInfer;
pub use dynamic::DynamicCallInfer;
pub use field::FieldAccessInfer;
pub use local::LocalVarInfer;
pub use method::MethodCallInfer;
pub use new_expr::ConstructorInfer;

use crate::bytecode::{Insn, InsnId};
use crate::inference::InferContext;
use sigscope_api::TypeName;
use tracing::{debug, trace};

/// A value-origin strategy.
///
/// Given the instruction that produced the traced value, determine its type.
pub trait InferStrategy: Sync + Send {
    /// Attempt to type the value produced by `insn` at `at`.
    ///
    /// Returns `None` if this strategy doesn't apply or can't determine the type.
    fn infer(&self, at: InsnId, insn: &Insn, ctx: &InferContext) -> Option<TypeName>;

    /// Combine with another strategy using "or" logic.
    ///
    /// If `self` returns `None`, try `other`.
    fn or_else<S: InferStrategy>(self, other: S) -> OrElse<Self, S>
    where
        Self: Sized,
    {
        OrElse::new(self, other)
    }
}

/// Build the default producer inferrer.
///
/// This combines all strategies in priority order.
pub fn build_producer_inferrer() -> impl InferStrategy {
    ConstantInfer
        .or_else(ConstructorInfer)
        .or_else(MethodCallInfer)
        .or_else(LocalVarInfer)
        .or_else(DynamicCallInfer)
        .or_else(ArrayInfer)
        .or_else(ElementLoadInfer)
        .or_else(CheckCastInfer)
        .or_else(FieldAccessInfer)
}

/// Type of the value on top of the stack just before `at`.
///
/// Walks backward over markers, non-producing instructions and compiler
/// helper sequences; the first producer decides. `None` means the caller
/// should fall back to the declared type.
pub fn trace_before(at: InsnId, ctx: &InferContext) -> Option<TypeName> {
    if ctx.exhausted() {
        debug!(
            "Trace depth exhausted in {}{} at {:?}",
            ctx.method.name, ctx.method.descriptor, at
        );
        return None;
    }

    let inferrer = build_producer_inferrer();
    let mut walk = ctx.instructions().backward_before(at);
    while let Some((id, insn)) = walk.next() {
        let helper_run = insn
            .as_call()
            .and_then(|call| ctx.conventions.intrinsics().run_length(call));
        if let Some(run) = helper_run {
            trace!("Skipping helper sequence of {} at {:?}", run, id);
            if run > 1 {
                walk.nth(run - 2);
            }
            continue;
        }
        if !insn.is_producer() {
            trace!("Skipping {:?} at {:?}", insn, id);
            continue;
        }
        let found = inferrer.infer(id, insn, ctx);
        if found.is_none() {
            debug!(
                "No type for producer {:?} in {}, using declared type",
                insn, ctx.method.name
            );
        }
        return found;
    }
    None
}
