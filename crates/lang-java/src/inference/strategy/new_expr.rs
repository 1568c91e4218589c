use super::InferStrategy;
use crate::bytecode::{Insn, InsnId};
use crate::inference::InferContext;
use sigscope_api::TypeName;

/// Infer type from a constructor call: the constructed class.
pub struct ConstructorInfer;

impl InferStrategy for ConstructorInfer {
    fn infer(&self, _at: InsnId, insn: &Insn, _ctx: &InferContext) -> Option<TypeName> {
        let call = insn.as_call()?;
        if !call.is_constructor() {
            return None;
        }
        Some(TypeName::from_internal(&call.owner))
    }
}
