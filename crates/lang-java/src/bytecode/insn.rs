//! Instruction model.
//!
//! One variant per instruction category the return-type analysis cares about.
//! Everything else is kept as [`Insn::Other`] so that positions stay stable.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Position of an instruction inside its method's [`InsnList`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct InsnId(pub usize);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Insn {
    /// Jump target marker.
    Label { label: u32 },
    /// Source line marker.
    Line { line: u32 },
    /// `iconst_*`, `bipush`, `sipush`
    Push { kind: PushKind, value: i32 },
    /// `aconst_null`
    Null,
    /// `ldc`, `ldc_w`, `ldc2_w`
    Ldc { constant: Constant },
    /// `invokevirtual`, `invokespecial`, `invokestatic`, `invokeinterface`
    Invoke(MethodCall),
    /// `invokedynamic`
    InvokeDynamic(DynamicCall),
    /// `iload` .. `aload`
    Load { kind: ValueKind, slot: u16 },
    /// `istore` .. `astore`
    Store { kind: ValueKind, slot: u16 },
    /// `newarray`
    NewArray { element: PrimitiveType },
    /// `anewarray`; `element` is an internal name or an array descriptor.
    #[serde(rename = "anewarray")]
    ANewArray { element: String },
    /// `bastore` .. `aastore`
    ArrayStore { element: ArrayElement },
    /// `new`, `checkcast`, `instanceof`
    Type { kind: TypeOp, descriptor: String },
    /// `getfield`, `getstatic`, `putfield`, `putstatic`
    Field(FieldAccess),
    /// `ireturn` .. `areturn`, `return`
    Return { kind: ReturnKind },
    /// Any other opcode, by mnemonic.
    Other { mnemonic: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PushKind {
    Iconst,
    Bipush,
    Sipush,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Class literal, as a descriptor (`Lpkg/Foo;`) or internal name.
    Type(String),
    MethodType(String),
    MethodHandle(Handle),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InvokeKind {
    Virtual,
    Special,
    Static,
    Interface,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodCall {
    pub kind: InvokeKind,
    /// Internal name of the declaring class, e.g. `pkg/Foo`.
    pub owner: String,
    pub name: String,
    pub descriptor: String,
}

impl MethodCall {
    pub fn new(
        kind: InvokeKind,
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.name == "<init>"
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    pub owner: String,
    pub name: String,
    pub descriptor: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapArg {
    Handle(Handle),
    Constant(Constant),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DynamicCall {
    pub name: String,
    /// Call site descriptor; its return type is the nominal functional interface.
    pub descriptor: String,
    #[serde(default)]
    pub bootstrap_args: Vec<BootstrapArg>,
}

impl DynamicCall {
    /// First method handle among the bootstrap arguments, i.e. the captured function.
    pub fn bound_handle(&self) -> Option<&Handle> {
        self.bootstrap_args.iter().find_map(|arg| match arg {
            BootstrapArg::Handle(handle) => Some(handle),
            BootstrapArg::Constant(_) => None,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Int,
    Long,
    Float,
    Double,
    Reference,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Boolean,
    Char,
    Float,
    Double,
    Byte,
    Short,
    Int,
    Long,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
        }
    }
}

/// Element category of an array store opcode. `bastore` serves both `byte[]`
/// and `boolean[]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArrayElement {
    ByteOrBoolean,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Reference,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TypeOp {
    New,
    CheckCast,
    InstanceOf,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldOp {
    Get,
    GetStatic,
    Put,
    PutStatic,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldAccess {
    pub kind: FieldOp,
    pub owner: String,
    pub name: String,
    pub descriptor: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    Void,
    Int,
    Long,
    Float,
    Double,
    Reference,
}

impl Insn {
    /// Labels and line markers carry no data flow.
    pub fn is_structural(&self) -> bool {
        matches!(self, Insn::Label { .. } | Insn::Line { .. })
    }

    pub fn as_call(&self) -> Option<&MethodCall> {
        match self {
            Insn::Invoke(call) => Some(call),
            _ => None,
        }
    }

    /// Whether this instruction leaves a value whose origin determines a type.
    ///
    /// Non-producers (stores, jumps, stack shuffles, int and null pushes) are
    /// walked over during a backward trace. Opcodes that compute a new value
    /// from their operands stop the walk even when nothing can type them, so
    /// that an operand is never mistaken for the result.
    pub fn is_producer(&self) -> bool {
        match self {
            Insn::Ldc { .. }
            | Insn::Invoke(_)
            | Insn::InvokeDynamic(_)
            | Insn::Load { .. }
            | Insn::NewArray { .. }
            | Insn::ANewArray { .. }
            | Insn::ArrayStore { .. } => true,
            Insn::Type { kind, .. } => matches!(kind, TypeOp::CheckCast | TypeOp::InstanceOf),
            Insn::Field(access) => matches!(access.kind, FieldOp::Get | FieldOp::GetStatic),
            Insn::Other { mnemonic } => computes_value(mnemonic),
            Insn::Label { .. }
            | Insn::Line { .. }
            | Insn::Push { .. }
            | Insn::Null
            | Insn::Store { .. }
            | Insn::Return { .. } => false,
        }
    }
}

/// Array element loads, arithmetic, conversions, comparisons and
/// `arraylength`.
fn computes_value(mnemonic: &str) -> bool {
    let bytes = mnemonic.as_bytes();
    match bytes {
        [b'i' | b'l' | b'f' | b'd' | b'a' | b'b' | b'c' | b's', b'a', b'l', b'o', b'a', b'd'] => {
            true
        }
        [b'i' | b'l' | b'f' | b'd', b'2', b'i' | b'l' | b'f' | b'd' | b'b' | b'c' | b's'] => true,
        [b'i' | b'l' | b'f' | b'd', op @ ..] => matches!(
            op,
            b"add" | b"sub" | b"mul" | b"div" | b"rem" | b"neg" | b"shl" | b"shr" | b"ushr"
                | b"and" | b"or" | b"xor" | b"cmpl" | b"cmpg" | b"cmp"
        ),
        _ => matches!(mnemonic, "arraylength" | "multianewarray"),
    }
}

/// Index-addressed instruction arena of a single method body.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct InsnList {
    insns: Vec<Insn>,
}

impl InsnList {
    pub fn new(insns: Vec<Insn>) -> Self {
        Self { insns }
    }

    pub fn len(&self) -> usize {
        self.insns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insns.is_empty()
    }

    pub fn get(&self, id: InsnId) -> Option<&Insn> {
        self.insns.get(id.0)
    }

    pub fn prev(&self, id: InsnId) -> Option<InsnId> {
        if id.0 == 0 || id.0 > self.insns.len() {
            return None;
        }
        Some(InsnId(id.0 - 1))
    }

    pub fn next(&self, id: InsnId) -> Option<InsnId> {
        let next = id.0 + 1;
        (next < self.insns.len()).then_some(InsnId(next))
    }

    pub fn iter(&self) -> impl Iterator<Item = (InsnId, &Insn)> {
        self.insns
            .iter()
            .enumerate()
            .map(|(i, insn)| (InsnId(i), insn))
    }
}

impl Index<InsnId> for InsnList {
    type Output = Insn;

    fn index(&self, id: InsnId) -> &Insn {
        &self.insns[id.0]
    }
}

impl From<Vec<Insn>> for InsnList {
    fn from(insns: Vec<Insn>) -> Self {
        Self::new(insns)
    }
}

impl FromIterator<Insn> for InsnList {
    fn from_iter<I: IntoIterator<Item = Insn>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
