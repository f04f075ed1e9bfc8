use std::collections::HashMap;

use crate::model::{CompletionEvent, MachineState, Snapshot};

/// Machines that went from busy to free between `prev` and `curr`.
///
/// Events follow `curr.machines` order. A machine with no record in `prev` never
/// fires, so diffing the first poll against [`Snapshot::empty`] is silent.
/// Machines that vanished are ignored. Pure: same inputs, same output.
pub fn diff(prev: &Snapshot, curr: &Snapshot) -> Vec<CompletionEvent> {
    let mut prev_by_id: HashMap<u64, &MachineState> = HashMap::with_capacity(prev.machines.len());
    for m in &prev.machines {
        // First record wins if the server ever repeats an id.
        prev_by_id.entry(m.id).or_insert(m);
    }

    curr.machines
        .iter()
        .filter_map(|m| {
            let p = prev_by_id.get(&m.id)?;
            (p.busy && !m.busy).then(|| CompletionEvent {
                machine_id: m.id,
                user: p.user.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/diff_tests.rs"]
mod tests;
