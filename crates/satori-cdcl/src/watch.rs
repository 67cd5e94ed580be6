//! Watched-literal index.

use crate::clause::ClauseHandle;
use satori_base::VarId;

/// Map from (polarity, variable) to the clauses watching that literal.
///
/// A clause registered under `(value, var)` asks to be revisited once `value`
/// is removed from the domain of `var`. Registration is eager; entries
/// invalidated by a watch move are swept lazily by the propagation pass that
/// walks the list. Order within a list carries no meaning.
#[derive(Debug, Default)]
pub(crate) struct WatchIndex {
    lists: [Vec<Vec<ClauseHandle>>; 2],
}

impl WatchIndex {
    /// Clears all lists and makes room for `num_slots` variable handles.
    pub fn reset(&mut self, num_slots: usize) {
        for side in &mut self.lists {
            side.clear();
            side.resize(num_slots, Vec::new());
        }
    }

    pub fn add(&mut self, value: bool, var: VarId, clause: ClauseHandle) {
        self.lists[usize::from(value)][var as usize].push(clause);
    }

    /// Detaches the list for `(value, var)` so the caller can walk it while
    /// other lists are being mutated.
    pub fn take(&mut self, value: bool, var: VarId) -> Vec<ClauseHandle> {
        std::mem::take(&mut self.lists[usize::from(value)][var as usize])
    }

    /// Re-attaches a list detached with [`WatchIndex::take`], keeping any
    /// entries registered in the meantime.
    pub fn restore(&mut self, value: bool, var: VarId, mut list: Vec<ClauseHandle>) {
        let slot = &mut self.lists[usize::from(value)][var as usize];
        list.append(slot);
        *slot = list;
    }
}
