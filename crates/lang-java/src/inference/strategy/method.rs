//! Method invocation inference.

use super::InferStrategy;
use crate::bytecode::{ClassIndex, Constant, Insn, InsnId, MethodCall, MethodModel};
use crate::descriptor;
use crate::inference::InferContext;
use sigscope_api::{TypeName, models::type_name::CLASS};
use std::collections::HashSet;
use tracing::debug;

/// Infer type from a (non-constructor) method call.
///
/// The callee is looked up in its owner and the owner's interfaces; its
/// generic signature is preferred over the call's erased descriptor.
pub struct MethodCallInfer;

impl InferStrategy for MethodCallInfer {
    fn infer(&self, at: InsnId, insn: &Insn, ctx: &InferContext) -> Option<TypeName> {
        let call = insn.as_call()?;
        if call.is_constructor() {
            return None;
        }
        if let Some(ty) = context_read(at, call, ctx) {
            return Some(ty);
        }
        Some(resolve_call(call, ctx))
    }
}

/// `ctx.body(Foo.class)`: the class literal passed to a request context read.
fn context_read(at: InsnId, call: &MethodCall, ctx: &InferContext) -> Option<TypeName> {
    if !ctx
        .conventions
        .is_context_type(&TypeName::from_internal(&call.owner))
    {
        return None;
    }
    let args = descriptor::argument_types(&call.descriptor);
    let [arg] = args.as_slice() else {
        return None;
    };
    if arg.is_array() || arg.name != CLASS {
        return None;
    }

    let literal = ctx
        .instructions()
        .backward_before(at)
        .find_map(|(_, insn)| match insn {
            Insn::Ldc { constant } => Some(constant),
            _ => None,
        });
    let ty = match literal {
        Some(Constant::Type(name)) => descriptor::object_type(name),
        _ => TypeName::object(),
    };
    debug!("Context read {} resolved to {}", call.name, ty);
    Some(ty)
}

fn resolve_call(call: &MethodCall, ctx: &InferContext) -> TypeName {
    let methods = lineage_methods(ctx.index, &call.owner);
    let accessor_target = ctx.conventions.accessor_target(&call.name);
    let name = accessor_target.unwrap_or(call.name.as_str());

    if let Some(found) = methods
        .iter()
        .find(|m| m.name == name && m.descriptor == call.descriptor)
    {
        return found.declared_return_type();
    }

    if accessor_target.is_some() {
        // accessors take the receiver as an extra argument
        let mut named = methods.iter().filter(|m| m.name == name);
        if let (Some(only), None) = (named.next(), named.next()) {
            debug!("Accessor {} forwards to {}", call.name, name);
            return only.declared_return_type();
        }
    }

    descriptor::return_type(&call.descriptor)
}

/// Methods of `owner` followed by those of its interfaces, depth first.
/// Each class is visited once; absent classes contribute nothing.
pub(crate) fn lineage_methods<'i>(index: &'i dyn ClassIndex, owner: &str) -> Vec<&'i MethodModel> {
    let mut methods = Vec::new();
    let mut visited = HashSet::new();
    let mut pending = vec![owner.to_string()];

    while let Some(name) = pending.pop() {
        if !visited.insert(name.clone()) {
            continue;
        }
        let Some(class) = index.lookup(&name) else {
            continue;
        };
        methods.extend(class.methods.iter());
        pending.extend(class.interfaces.iter().rev().cloned());
    }
    methods
}
