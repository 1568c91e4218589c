use super::insn::{Insn, InsnId, InsnList};
use crate::{descriptor, signature};
use ristretto_classfile::MethodAccessFlags;
use serde::{Deserialize, Serialize};
use sigscope_api::TypeName;

/// Entry of a method's local variable table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocalVariable {
    pub slot: u16,
    pub name: String,
    pub descriptor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// First instruction where the variable is live.
    pub start: InsnId,
    /// Instruction after the last one where the variable is live.
    pub end: InsnId,
}

impl LocalVariable {
    pub fn covers(&self, at: InsnId) -> bool {
        self.start <= at && at < self.end
    }
}

/// A method as produced by the class loader: flags, descriptor, optional
/// generic signature, body and local variable table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MethodModel {
    pub name: String,
    /// Raw access flag bits, see [`MethodAccessFlags`].
    #[serde(default)]
    pub access: u16,
    pub descriptor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default)]
    pub instructions: InsnList,
    #[serde(default)]
    pub local_variables: Vec<LocalVariable>,
}

impl MethodModel {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: MethodAccessFlags::PUBLIC.bits(),
            descriptor: descriptor.into(),
            signature: None,
            instructions: InsnList::default(),
            local_variables: Vec::new(),
        }
    }

    pub fn with_access(mut self, flags: MethodAccessFlags) -> Self {
        self.access = flags.bits();
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_instructions(mut self, instructions: Vec<Insn>) -> Self {
        self.instructions = InsnList::new(instructions);
        self
    }

    pub fn with_local_variable(mut self, variable: LocalVariable) -> Self {
        self.local_variables.push(variable);
        self
    }

    pub fn access_flags(&self) -> MethodAccessFlags {
        MethodAccessFlags::from_bits_truncate(self.access)
    }

    /// Compiler generated (synthetic or bridge) methods.
    pub fn is_synthetic(&self) -> bool {
        let flags = self.access_flags();
        flags.contains(MethodAccessFlags::SYNTHETIC) || flags.contains(MethodAccessFlags::BRIDGE)
    }

    /// Erased return type from the raw descriptor.
    pub fn return_type(&self) -> TypeName {
        descriptor::return_type(&self.descriptor)
    }

    /// Generic return type from the signature when it parses, else the
    /// erased one.
    pub fn declared_return_type(&self) -> TypeName {
        self.signature
            .as_deref()
            .and_then(|sig| signature::try_parse(signature::method_return_tail(sig)))
            .unwrap_or_else(|| self.return_type())
    }

    /// Local variable entry for `slot` live at `at`.
    pub fn local_variable_at(&self, slot: u16, at: InsnId) -> Option<&LocalVariable> {
        self.local_variables
            .iter()
            .find(|var| var.slot == slot && var.covers(at))
    }

    /// Any entry for `slot`, regardless of range.
    pub fn local_variable(&self, slot: u16) -> Option<&LocalVariable> {
        self.local_variables.iter().find(|var| var.slot == slot)
    }

    pub fn local_variable_named(&self, name: &str) -> Option<&LocalVariable> {
        self.local_variables.iter().find(|var| var.name == name)
    }
}
