use super::InferStrategy;
use crate::bytecode::{Constant, Insn, InsnId};
use crate::descriptor;
use crate::inference::InferContext;
use sigscope_api::{TypeName, models::type_name::INTEGER};

/// Infer type from `ldc` constants, reported with their boxed runtime type.
///
/// Bare int pushes are only meaningful right before a return and are
/// handled there.
pub struct ConstantInfer;

impl InferStrategy for ConstantInfer {
    fn infer(&self, _at: InsnId, insn: &Insn, _ctx: &InferContext) -> Option<TypeName> {
        match insn {
            Insn::Ldc { constant } => Some(constant_type(constant)),
            _ => None,
        }
    }
}

pub fn constant_type(constant: &Constant) -> TypeName {
    match constant {
        Constant::String(_) => TypeName::string(),
        Constant::Int(_) => TypeName::new(INTEGER),
        Constant::Long(_) => TypeName::new("java.lang.Long"),
        Constant::Float(_) => TypeName::new("java.lang.Float"),
        Constant::Double(_) => TypeName::new("java.lang.Double"),
        Constant::Type(name) => descriptor::object_type(name),
        Constant::MethodType(_) => TypeName::new("java.lang.invoke.MethodType"),
        Constant::MethodHandle(_) => TypeName::new("java.lang.invoke.MethodHandle"),
    }
}
