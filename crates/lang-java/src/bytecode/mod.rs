//! Structured view of compiled methods, as handed over by the class loader.

pub mod class;
pub mod cursor;
pub mod insn;
pub mod method;

pub use class::{ClassIndex, ClassModel, FieldModel, InMemoryClassIndex};
pub use cursor::{Backward, Forward};
pub use insn::{
    ArrayElement, BootstrapArg, Constant, DynamicCall, FieldAccess, FieldOp, Handle, Insn, InsnId,
    InsnList, InvokeKind, MethodCall, PrimitiveType, PushKind, ReturnKind, TypeOp, ValueKind,
};
pub use method::{LocalVariable, MethodModel};
