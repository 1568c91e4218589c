use super::InferStrategy;
use crate::bytecode::{FieldOp, Insn, InsnId};
use crate::inference::InferContext;
use crate::{descriptor, signature};
use sigscope_api::TypeName;

/// Infer type from a field read, preferring the field's generic signature.
pub struct FieldAccessInfer;

impl InferStrategy for FieldAccessInfer {
    fn infer(&self, _at: InsnId, insn: &Insn, ctx: &InferContext) -> Option<TypeName> {
        let Insn::Field(access) = insn else {
            return None;
        };
        if !matches!(access.kind, FieldOp::Get | FieldOp::GetStatic) {
            return None;
        }

        let generic = ctx
            .index
            .lookup(&access.owner)
            .and_then(|class| class.find_field(&access.name))
            .and_then(|field| field.signature.as_deref())
            .and_then(signature::try_parse);
        Some(generic.unwrap_or_else(|| descriptor::field_type(&access.descriptor)))
    }
}
