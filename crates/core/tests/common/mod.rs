#![allow(dead_code)]

use sigscope_java::bytecode::{
    ClassModel, Constant, Insn, InvokeKind, MethodCall, MethodModel, ReturnKind, TypeOp,
};
use sigscope_java::InMemoryClassIndex;

/// `return new <owner>()` declared as `Object`.
pub fn returns_new(name: &str, owner: &str) -> MethodModel {
    MethodModel::new(name, "()Ljava/lang/Object;").with_instructions(vec![
        Insn::Type {
            kind: TypeOp::New,
            descriptor: owner.to_string(),
        },
        Insn::Other {
            mnemonic: "dup".into(),
        },
        Insn::Invoke(MethodCall::new(InvokeKind::Special, owner, "<init>", "()V")),
        Insn::Return {
            kind: ReturnKind::Reference,
        },
    ])
}

pub fn returns_string(name: &str) -> MethodModel {
    MethodModel::new(name, "()Ljava/lang/Object;").with_instructions(vec![
        Insn::Ldc {
            constant: Constant::String("hello".into()),
        },
        Insn::Return {
            kind: ReturnKind::Reference,
        },
    ])
}

pub fn constructor() -> MethodModel {
    MethodModel::new("<init>", "()V").with_instructions(vec![Insn::Return {
        kind: ReturnKind::Void,
    }])
}

/// Two classes inserted out of name order, with a constructor and a
/// synthetic lambda body.
pub fn sample_index() -> InMemoryClassIndex {
    use ristretto_classfile::MethodAccessFlags;

    InMemoryClassIndex::new()
        .with_class(
            ClassModel::new("pkg/Zoo")
                .with_method(constructor())
                .with_method(returns_new("animal", "pkg/Cat")),
        )
        .with_class(
            ClassModel::new("pkg/App")
                .with_method(returns_string("hello"))
                .with_method(
                    returns_new("lambda$0", "pkg/Dog")
                        .with_access(MethodAccessFlags::PRIVATE | MethodAccessFlags::SYNTHETIC),
                ),
        )
}
