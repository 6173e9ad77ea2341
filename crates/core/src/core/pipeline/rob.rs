//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from issue
//! through commit. It provides:
//! 1. **Allocation:** Assigns a slot (the rename tag) to each instruction at
//!    issue, at the tail.
//! 2. **Result capture:** Holds the computed value and, for memory ops, the
//!    effective address until commit.
//! 3. **In-order commit:** Retires instructions from the head in program
//!    order.
//! 4. **Forwarding:** A written-back entry's value can be captured directly
//!    by a younger instruction at issue.

use std::fmt;

use crate::common::Word;
use crate::isa::Op;

/// Index of a ROB slot. This is the rename tag: reservation stations wait on
/// and the CDB broadcasts against this index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct RobIndex(pub usize);

impl fmt::Display for RobIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ROB{}", self.0)
    }
}

/// Lifecycle state of a ROB entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RobState {
    /// Slot is free.
    #[default]
    Empty,
    /// Allocated; operands may still be pending in the reservation station.
    Issue,
    /// A functional unit is working on the instruction.
    Execute,
    /// Result (or, for STORE, at least the address) has been published.
    WriteResult,
}

impl fmt::Display for RobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RobState::Empty => "Empty",
            RobState::Issue => "Issue",
            RobState::Execute => "Execute",
            RobState::WriteResult => "WriteResult",
        };
        f.write_str(s)
    }
}

/// A single entry in the reorder buffer.
///
/// For register-writing operations `dest_reg` is the architectural target and
/// `value`/`value_ready` carry the result. For STORE `dest_reg` is empty,
/// `address` is the memory target, `value` is the datum, and `value_ready`
/// tracks *data* readiness, which is independent of the address having been
/// computed (`state == WriteResult`).
#[derive(Clone, Debug, Default)]
pub struct RobEntry {
    /// Whether this slot is occupied. Holds exactly when `state != Empty`.
    pub busy: bool,
    /// Program index of the instruction.
    pub inst_idx: usize,
    /// Operation kind.
    pub op: Op,
    /// Current lifecycle state.
    pub state: RobState,
    /// Destination architectural register; empty for STORE.
    pub dest_reg: String,
    /// Computed result, or the STORE datum.
    pub value: Word,
    /// Effective address for LOAD/STORE.
    pub address: Word,
    /// Whether `value` is valid. For STORE this may still be false after the
    /// address is published.
    pub value_ready: bool,
}

/// Reorder buffer — circular buffer for in-order commit.
pub struct Rob {
    entries: Vec<RobEntry>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of free slots.
    available: usize,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, RobEntry::default);
        Self {
            entries,
            head: 0,
            tail: 0,
            available: capacity,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn available(&self) -> usize {
        self.available
    }

    /// Returns true if no entry is in flight.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.available == self.entries.len()
    }

    /// Returns true if at least one slot is free.
    #[inline]
    pub fn has_space(&self) -> bool {
        self.available > 0
    }

    /// Returns the slot index of the current head.
    #[inline]
    pub fn head_index(&self) -> RobIndex {
        RobIndex(self.head)
    }

    /// Allocates the tail slot for an instruction. Returns `None` if the ROB
    /// is full.
    pub fn allocate(&mut self, inst_idx: usize, op: Op, dest_reg: String) -> Option<RobIndex> {
        if !self.has_space() {
            return None;
        }

        let index = RobIndex(self.tail);
        self.entries[self.tail] = RobEntry {
            busy: true,
            inst_idx,
            op,
            state: RobState::Issue,
            dest_reg,
            value: 0,
            address: 0,
            value_ready: false,
        };

        self.tail = (self.tail + 1) % self.entries.len();
        self.available -= 1;
        Some(index)
    }

    /// Returns the head entry if the ROB is non-empty.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        if self.is_empty() {
            None
        } else {
            Some(&self.entries[self.head])
        }
    }

    /// Retires the head entry: clears the slot, advances the head, and
    /// returns the retired entry. Returns `None` if the ROB is empty.
    ///
    /// Eligibility (state, STORE data readiness) is the caller's check; the
    /// ROB itself only maintains queue discipline.
    pub fn retire_head(&mut self) -> Option<RobEntry> {
        if self.is_empty() {
            return None;
        }

        let entry = std::mem::take(&mut self.entries[self.head]);
        self.head = (self.head + 1) % self.entries.len();
        self.available += 1;
        Some(entry)
    }

    /// Returns the entry at a slot index.
    #[inline]
    pub fn get(&self, index: RobIndex) -> &RobEntry {
        &self.entries[index.0]
    }

    /// Returns the mutable entry at a slot index.
    #[inline]
    pub fn get_mut(&mut self, index: RobIndex) -> &mut RobEntry {
        &mut self.entries[index.0]
    }

    /// Iterates all slots in index order (occupied or not), for status
    /// display and invariant checks.
    pub fn slots(&self) -> impl Iterator<Item = &RobEntry> {
        self.entries.iter()
    }
}
