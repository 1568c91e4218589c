//! Fluent builders for hand-assembled method bodies.

#![allow(dead_code)]

use ristretto_classfile::MethodAccessFlags;
use sigscope_java::bytecode::{
    ArrayElement, BootstrapArg, Constant, DynamicCall, FieldAccess, FieldOp, Handle, Insn,
    InsnId, InvokeKind, LocalVariable, MethodCall, MethodModel, PrimitiveType, PushKind,
    ReturnKind, TypeOp, ValueKind,
};

pub const INTRINSICS: &str = "kotlin/jvm/internal/Intrinsics";
pub const CONTEXT: &str = "io/jooby/Context";

/// Builds a [`MethodModel`] instruction by instruction.
///
/// Local variables added with [`MethodBuilder::var`] cover the whole body.
pub struct MethodBuilder {
    method: MethodModel,
    insns: Vec<Insn>,
    labels: u32,
}

impl MethodBuilder {
    pub fn new(name: &str, descriptor: &str) -> Self {
        Self {
            method: MethodModel::new(name, descriptor),
            insns: Vec::new(),
            labels: 0,
        }
    }

    pub fn synthetic(mut self) -> Self {
        self.method = self
            .method
            .with_access(MethodAccessFlags::PUBLIC | MethodAccessFlags::SYNTHETIC);
        self
    }

    pub fn bridge(mut self) -> Self {
        self.method = self
            .method
            .with_access(MethodAccessFlags::PUBLIC | MethodAccessFlags::BRIDGE);
        self
    }

    pub fn signature(mut self, signature: &str) -> Self {
        self.method = self.method.with_signature(signature);
        self
    }

    /// Position the next instruction will get.
    pub fn here(&self) -> usize {
        self.insns.len()
    }

    pub fn insn(mut self, insn: Insn) -> Self {
        self.insns.push(insn);
        self
    }

    pub fn label(mut self) -> Self {
        let label = self.labels;
        self.labels += 1;
        self.insn(Insn::Label { label })
    }

    pub fn line(self, line: u32) -> Self {
        self.insn(Insn::Line { line })
    }

    pub fn iconst(self, value: i32) -> Self {
        self.insn(Insn::Push {
            kind: PushKind::Iconst,
            value,
        })
    }

    pub fn bipush(self, value: i32) -> Self {
        self.insn(Insn::Push {
            kind: PushKind::Bipush,
            value,
        })
    }

    pub fn sipush(self, value: i32) -> Self {
        self.insn(Insn::Push {
            kind: PushKind::Sipush,
            value,
        })
    }

    pub fn aconst_null(self) -> Self {
        self.insn(Insn::Null)
    }

    pub fn ldc(self, constant: Constant) -> Self {
        self.insn(Insn::Ldc { constant })
    }

    pub fn ldc_string(self, value: &str) -> Self {
        self.ldc(Constant::String(value.to_string()))
    }

    /// Class literal, `Foo.class`.
    pub fn ldc_type(self, descriptor: &str) -> Self {
        self.ldc(Constant::Type(descriptor.to_string()))
    }

    pub fn invoke(self, kind: InvokeKind, owner: &str, name: &str, descriptor: &str) -> Self {
        self.insn(Insn::Invoke(MethodCall::new(kind, owner, name, descriptor)))
    }

    pub fn invoke_static(self, owner: &str, name: &str, descriptor: &str) -> Self {
        self.invoke(InvokeKind::Static, owner, name, descriptor)
    }

    pub fn invoke_virtual(self, owner: &str, name: &str, descriptor: &str) -> Self {
        self.invoke(InvokeKind::Virtual, owner, name, descriptor)
    }

    pub fn invoke_interface(self, owner: &str, name: &str, descriptor: &str) -> Self {
        self.invoke(InvokeKind::Interface, owner, name, descriptor)
    }

    pub fn new_object(self, owner: &str) -> Self {
        self.insn(Insn::Type {
            kind: TypeOp::New,
            descriptor: owner.to_string(),
        })
    }

    pub fn dup(self) -> Self {
        self.other("dup")
    }

    pub fn other(self, mnemonic: &str) -> Self {
        self.insn(Insn::Other {
            mnemonic: mnemonic.to_string(),
        })
    }

    /// `new owner(); dup; invokespecial <init>()V`
    pub fn construct(self, owner: &str) -> Self {
        self.new_object(owner)
            .dup()
            .invoke(InvokeKind::Special, owner, "<init>", "()V")
    }

    pub fn invokedynamic(
        self,
        name: &str,
        descriptor: &str,
        handle: Option<(&str, &str, &str)>,
    ) -> Self {
        let bootstrap_args = handle
            .map(|(owner, name, descriptor)| {
                vec![
                    BootstrapArg::Constant(Constant::MethodType("()Ljava/lang/Object;".into())),
                    BootstrapArg::Handle(Handle {
                        owner: owner.to_string(),
                        name: name.to_string(),
                        descriptor: descriptor.to_string(),
                    }),
                ]
            })
            .unwrap_or_default();
        self.insn(Insn::InvokeDynamic(DynamicCall {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            bootstrap_args,
        }))
    }

    pub fn aload(self, slot: u16) -> Self {
        self.insn(Insn::Load {
            kind: ValueKind::Reference,
            slot,
        })
    }

    pub fn iload(self, slot: u16) -> Self {
        self.insn(Insn::Load {
            kind: ValueKind::Int,
            slot,
        })
    }

    pub fn astore(self, slot: u16) -> Self {
        self.insn(Insn::Store {
            kind: ValueKind::Reference,
            slot,
        })
    }

    pub fn newarray(self, element: PrimitiveType) -> Self {
        self.insn(Insn::NewArray { element })
    }

    pub fn anewarray(self, element: &str) -> Self {
        self.insn(Insn::ANewArray {
            element: element.to_string(),
        })
    }

    pub fn array_store(self, element: ArrayElement) -> Self {
        self.insn(Insn::ArrayStore { element })
    }

    pub fn checkcast(self, descriptor: &str) -> Self {
        self.insn(Insn::Type {
            kind: TypeOp::CheckCast,
            descriptor: descriptor.to_string(),
        })
    }

    pub fn getfield(self, owner: &str, name: &str, descriptor: &str) -> Self {
        self.insn(Insn::Field(FieldAccess {
            kind: FieldOp::Get,
            owner: owner.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        }))
    }

    pub fn areturn(self) -> Self {
        self.insn(Insn::Return {
            kind: ReturnKind::Reference,
        })
    }

    pub fn ireturn(self) -> Self {
        self.insn(Insn::Return {
            kind: ReturnKind::Int,
        })
    }

    pub fn vreturn(self) -> Self {
        self.insn(Insn::Return {
            kind: ReturnKind::Void,
        })
    }

    /// Kotlin parameter null check: `aload slot; ldc name; invokestatic checkNotNullParameter`.
    pub fn null_check(self, slot: u16, name: &str) -> Self {
        self.aload(slot).ldc_string(name).invoke_static(
            INTRINSICS,
            "checkNotNullParameter",
            "(Ljava/lang/Object;Ljava/lang/String;)V",
        )
    }

    /// Local variable live for the whole body.
    pub fn var(self, slot: u16, name: &str, descriptor: &str) -> Self {
        self.var_in(slot, name, descriptor, None, 0, usize::MAX)
    }

    pub fn generic_var(self, slot: u16, name: &str, descriptor: &str, signature: &str) -> Self {
        self.var_in(slot, name, descriptor, Some(signature), 0, usize::MAX)
    }

    pub fn var_in(
        mut self,
        slot: u16,
        name: &str,
        descriptor: &str,
        signature: Option<&str>,
        start: usize,
        end: usize,
    ) -> Self {
        self.method = self.method.with_local_variable(LocalVariable {
            slot,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            signature: signature.map(str::to_string),
            start: InsnId(start),
            end: InsnId(end),
        });
        self
    }

    pub fn build(self) -> MethodModel {
        let Self { method, insns, .. } = self;
        method.with_instructions(insns)
    }
}

/// Canonical strings of an inference result.
pub fn strings(types: sigscope_api::InferredTypes) -> Vec<String> {
    types.to_strings()
}
