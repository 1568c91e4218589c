//! Read-only navigation over an [`InsnList`].
//!
//! Both walks skip labels and line markers; use [`InsnList::prev`] directly
//! when the raw neighbour matters.

use super::insn::{Insn, InsnId, InsnList, ReturnKind};

/// Walks towards the start of the method.
pub struct Backward<'a> {
    list: &'a InsnList,
    next: Option<InsnId>,
}

impl<'a> Iterator for Backward<'a> {
    type Item = (InsnId, &'a Insn);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.next?;
            self.next = self.list.prev(id);
            let insn = self.list.get(id)?;
            if !insn.is_structural() {
                return Some((id, insn));
            }
        }
    }
}

/// Walks towards the end of the method.
pub struct Forward<'a> {
    list: &'a InsnList,
    next: Option<InsnId>,
}

impl<'a> Iterator for Forward<'a> {
    type Item = (InsnId, &'a Insn);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.next?;
            self.next = self.list.next(id);
            let insn = self.list.get(id)?;
            if !insn.is_structural() {
                return Some((id, insn));
            }
        }
    }
}

impl InsnList {
    /// Backward walk starting at the instruction before `id`.
    pub fn backward_before(&self, id: InsnId) -> Backward<'_> {
        Backward {
            list: self,
            next: self.prev(id),
        }
    }

    pub fn forward(&self) -> Forward<'_> {
        Forward {
            list: self,
            next: (!self.is_empty()).then_some(InsnId(0)),
        }
    }

    /// Termination points in program order.
    pub fn returns(&self) -> impl Iterator<Item = (InsnId, ReturnKind)> + '_ {
        self.forward().filter_map(|(id, insn)| match insn {
            Insn::Return { kind } => Some((id, *kind)),
            _ => None,
        })
    }
}
