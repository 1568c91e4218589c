use super::{InferStrategy, trace_before};
use crate::bytecode::{ArrayElement, Insn, InsnId, PrimitiveType, ValueKind};
use crate::descriptor;
use crate::inference::InferContext;
use sigscope_api::TypeName;

/// Infer type from array construction: empty arrays from `newarray` /
/// `anewarray`, initialized arrays from the last element store.
pub struct ArrayInfer;

impl InferStrategy for ArrayInfer {
    fn infer(&self, at: InsnId, insn: &Insn, ctx: &InferContext) -> Option<TypeName> {
        match insn {
            Insn::NewArray { element } => Some(primitive_array(*element)),
            Insn::ANewArray { element } => Some(descriptor::object_type(element).into_array(1)),
            Insn::ArrayStore { element } => Some(stored_array(at, *element, ctx)),
            _ => None,
        }
    }
}

/// Infer type from `aaload`: the element type of the loaded-from array.
///
/// Only the plain `array[index]` shape is followed, where the index is a
/// constant or an int variable; anything else stays untyped.
pub struct ElementLoadInfer;

impl InferStrategy for ElementLoadInfer {
    fn infer(&self, at: InsnId, insn: &Insn, ctx: &InferContext) -> Option<TypeName> {
        let Insn::Other { mnemonic } = insn else {
            return None;
        };
        if mnemonic != "aaload" {
            return None;
        }
        let (index, index_insn) = ctx.instructions().backward_before(at).next()?;
        if !matches!(
            index_insn,
            Insn::Push { .. } | Insn::Load { kind: ValueKind::Int, .. }
        ) {
            return None;
        }
        trace_before(index, &ctx.deeper())?.element_type()
    }
}

fn primitive_array(element: PrimitiveType) -> TypeName {
    TypeName::new(element.keyword()).into_array(1)
}

fn stored_array(at: InsnId, element: ArrayElement, ctx: &InferContext) -> TypeName {
    let primitive = match element {
        ArrayElement::ByteOrBoolean => {
            // bastore serves both; the allocation tells them apart
            let allocated = ctx.instructions().backward_before(at).find_map(|(_, insn)| match insn {
                Insn::NewArray { element } => Some(*element),
                _ => None,
            });
            match allocated {
                Some(PrimitiveType::Byte) => PrimitiveType::Byte,
                _ => PrimitiveType::Boolean,
            }
        }
        ArrayElement::Char => PrimitiveType::Char,
        ArrayElement::Short => PrimitiveType::Short,
        ArrayElement::Int => PrimitiveType::Int,
        ArrayElement::Long => PrimitiveType::Long,
        ArrayElement::Float => PrimitiveType::Float,
        ArrayElement::Double => PrimitiveType::Double,
        ArrayElement::Reference => {
            let allocated = ctx.instructions().backward_before(at).find_map(|(_, insn)| match insn {
                Insn::ANewArray { element } => Some(element),
                _ => None,
            });
            return match allocated {
                Some(element) => descriptor::object_type(element).into_array(1),
                None => TypeName::object().into_array(1),
            };
        }
    };
    primitive_array(primitive)
}
