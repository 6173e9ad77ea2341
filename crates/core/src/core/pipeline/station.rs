//! Reservation stations.
//!
//! Four pools share one slot structure: ADD/SUB, MUL/DIV, LOAD, and STORE.
//! A station captures operand values (`vj`/`vk`) or the ROB tags that will
//! produce them (`qj`/`qk`), and remembers which ROB slot it broadcasts to
//! (`owner`). A `q` field being `None` means the corresponding `v` field
//! holds the operand.

use std::fmt;

use crate::common::Word;
use crate::config::PipelineConfig;
use crate::core::pipeline::rob::RobIndex;
use crate::isa::Op;

/// Which pool a station belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolKind {
    /// ADD and SUB stations.
    AddSub,
    /// MUL and DIV stations.
    MulDiv,
    /// LOAD stations.
    Load,
    /// STORE stations.
    Store,
}

impl PoolKind {
    /// All pools, in the fixed iteration order used everywhere (dispatch,
    /// broadcast, status display). The order is part of determinism.
    pub const ALL: [PoolKind; 4] = [
        PoolKind::AddSub,
        PoolKind::MulDiv,
        PoolKind::Load,
        PoolKind::Store,
    ];

    /// Returns the pool an operation dispatches to.
    pub fn for_op(op: Op) -> PoolKind {
        match op {
            Op::Add | Op::Sub => PoolKind::AddSub,
            Op::Mul | Op::Div => PoolKind::MulDiv,
            Op::Load => PoolKind::Load,
            Op::Store => PoolKind::Store,
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PoolKind::AddSub => "ADD/SUB",
            PoolKind::MulDiv => "MUL/DIV",
            PoolKind::Load => "LOAD",
            PoolKind::Store => "STORE",
        };
        f.write_str(s)
    }
}

/// One reservation station slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct Station {
    /// Whether the slot is occupied.
    pub busy: bool,
    /// Operation held by the slot.
    pub op: Op,
    /// First operand value (valid when `qj` is `None`).
    pub vj: Word,
    /// Second operand value (valid when `qk` is `None`).
    pub vk: Word,
    /// Pending producer of the first operand.
    pub qj: Option<RobIndex>,
    /// Pending producer of the second operand.
    pub qk: Option<RobIndex>,
    /// Immediate offset for LOAD/STORE.
    pub a: Word,
    /// ROB slot this station broadcasts to.
    pub owner: RobIndex,
    /// Program index of the instruction.
    pub inst_idx: usize,
}

impl Station {
    /// Releases the slot.
    pub fn clear(&mut self) {
        *self = Station::default();
    }
}

/// The four reservation station pools.
pub struct StationFile {
    add_sub: Vec<Station>,
    mul_div: Vec<Station>,
    load: Vec<Station>,
    store: Vec<Station>,
}

impl StationFile {
    /// Creates the pools at the configured sizes.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            add_sub: vec![Station::default(); config.add_sub_stations],
            mul_div: vec![Station::default(); config.mul_div_stations],
            load: vec![Station::default(); config.load_stations],
            store: vec![Station::default(); config.store_stations],
        }
    }

    /// Returns a pool's slots.
    pub fn pool(&self, kind: PoolKind) -> &[Station] {
        match kind {
            PoolKind::AddSub => &self.add_sub,
            PoolKind::MulDiv => &self.mul_div,
            PoolKind::Load => &self.load,
            PoolKind::Store => &self.store,
        }
    }

    /// Returns a pool's slots mutably.
    pub fn pool_mut(&mut self, kind: PoolKind) -> &mut [Station] {
        match kind {
            PoolKind::AddSub => &mut self.add_sub,
            PoolKind::MulDiv => &mut self.mul_div,
            PoolKind::Load => &mut self.load,
            PoolKind::Store => &mut self.store,
        }
    }

    /// Finds the lowest-numbered free slot in a pool.
    pub fn find_free(&self, kind: PoolKind) -> Option<usize> {
        self.pool(kind).iter().position(|s| !s.busy)
    }

    /// Finds the busy station holding a given instruction.
    pub fn find_by_inst(&self, inst_idx: usize) -> Option<(PoolKind, usize)> {
        for kind in PoolKind::ALL {
            if let Some(i) = self
                .pool(kind)
                .iter()
                .position(|s| s.busy && s.inst_idx == inst_idx)
            {
                return Some((kind, i));
            }
        }
        None
    }

    /// Iterates every slot in the fixed pool order.
    pub fn iter(&self) -> impl Iterator<Item = (PoolKind, usize, &Station)> {
        PoolKind::ALL.into_iter().flat_map(move |kind| {
            self.pool(kind)
                .iter()
                .enumerate()
                .map(move |(i, s)| (kind, i, s))
        })
    }

    /// Iterates every slot mutably in the fixed pool order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PoolKind, usize, &mut Station)> {
        let add_sub = self
            .add_sub
            .iter_mut()
            .enumerate()
            .map(|(i, s)| (PoolKind::AddSub, i, s));
        let mul_div = self
            .mul_div
            .iter_mut()
            .enumerate()
            .map(|(i, s)| (PoolKind::MulDiv, i, s));
        let load = self
            .load
            .iter_mut()
            .enumerate()
            .map(|(i, s)| (PoolKind::Load, i, s));
        let store = self
            .store
            .iter_mut()
            .enumerate()
            .map(|(i, s)| (PoolKind::Store, i, s));
        add_sub.chain(mul_div).chain(load).chain(store)
    }
}
