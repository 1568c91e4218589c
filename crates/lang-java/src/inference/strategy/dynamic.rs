use super::InferStrategy;
use crate::bytecode::{Insn, InsnId};
use crate::descriptor;
use crate::inference::InferContext;
use sigscope_api::TypeName;

/// Infer type from a dynamic call site (lambdas, method references).
///
/// The call site's nominal type, parameterized with the bound function's
/// return type when that one is informative.
pub struct DynamicCallInfer;

impl InferStrategy for DynamicCallInfer {
    fn infer(&self, _at: InsnId, insn: &Insn, _ctx: &InferContext) -> Option<TypeName> {
        let Insn::InvokeDynamic(call) = insn else {
            return None;
        };
        let nominal = descriptor::return_type(&call.descriptor);
        let bound = call
            .bound_handle()
            .map(|handle| descriptor::return_type(&handle.descriptor))
            .filter(|ty| !ty.is_uninformative());

        Some(match bound {
            Some(parameter) => nominal.with_parameter(parameter.boxed()),
            None => nominal,
        })
    }
}
