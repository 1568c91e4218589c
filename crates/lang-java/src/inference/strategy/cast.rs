use super::{InferStrategy, trace_before};
use crate::bytecode::{Insn, InsnId, TypeOp};
use crate::descriptor;
use crate::inference::InferContext;
use sigscope_api::{TypeName, models::type_name::BOOLEAN};

/// Infer type from `checkcast` and `instanceof`.
///
/// A cast keeps its operand's type when that is the same class (it may carry a
/// generic parameter the cast erased); otherwise the cast target wins.
pub struct CheckCastInfer;

impl InferStrategy for CheckCastInfer {
    fn infer(&self, at: InsnId, insn: &Insn, ctx: &InferContext) -> Option<TypeName> {
        let Insn::Type { kind, descriptor } = insn else {
            return None;
        };
        match kind {
            TypeOp::CheckCast => {
                let target = descriptor::object_type(descriptor);
                match trace_before(at, &ctx.deeper()) {
                    Some(operand) if operand.same_raw_type(&target) => Some(operand),
                    _ => Some(target),
                }
            }
            TypeOp::InstanceOf => Some(TypeName::new(BOOLEAN)),
            TypeOp::New => None,
        }
    }
}
