//! Register Alias Table (RAT).
//!
//! Maps each architectural register to the ROB slot that will produce its
//! next value. A register with an entry here is *pending*: consumers issued
//! later must read the tagged producer, not the architectural value. This is
//! the register-renaming step.

use crate::core::pipeline::rob::RobIndex;

/// One pending rename: `register -> producing ROB slot`.
#[derive(Clone, Debug)]
struct AliasEntry {
    reg: String,
    producer: RobIndex,
}

/// The alias table. Only pending registers have entries.
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pending producer of a register, if any.
    pub fn producer(&self, reg: &str) -> Option<RobIndex> {
        self.entries
            .iter()
            .find(|e| e.reg == reg)
            .map(|e| e.producer)
    }

    /// Points a register at a new producer, replacing any previous rename.
    pub fn rename(&mut self, reg: &str, producer: RobIndex) {
        match self.entries.iter_mut().find(|e| e.reg == reg) {
            Some(entry) => entry.producer = producer,
            None => self.entries.push(AliasEntry {
                reg: reg.to_string(),
                producer,
            }),
        }
    }

    /// Clears a register's rename, but only if it still points at the given
    /// producer. A later in-flight instruction may have renamed the register
    /// again; its entry must survive.
    pub fn clear_if(&mut self, reg: &str, producer: RobIndex) {
        self.entries
            .retain(|e| !(e.reg == reg && e.producer == producer));
    }

    /// Iterates pending `(register, producer)` pairs in rename order.
    pub fn pending(&self) -> impl Iterator<Item = (&str, RobIndex)> {
        self.entries.iter().map(|e| (e.reg.as_str(), e.producer))
    }

    /// Returns true if no register is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
