//! Keyed list diffing for display updates.
//!
//! `diff_ids` turns two orderings of unique ids into removals, moves and
//! insertions. Changes are emitted in application order: removals by
//! descending old index, then moves and insertions by ascending new index.
//! Applying them means deleting every removed or moved id from the old list,
//! then inserting moved and inserted ids at their `to` index in turn.
//! Items kept in place form a longest increasing run of new positions, so
//! the number of moves is minimal.

use std::collections::{HashMap, HashSet};

use crate::{UserId, UserListItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    Remove { id: UserId, from: usize },
    Move { id: UserId, from: usize, to: usize },
    Insert { id: UserId, to: usize },
}

impl ListChange {
    pub fn id(&self) -> &UserId {
        match self {
            ListChange::Remove { id, .. }
            | ListChange::Move { id, .. }
            | ListChange::Insert { id, .. } => id,
        }
    }
}

pub fn diff_items(previous: &[UserListItem], next: &[UserListItem]) -> Vec<ListChange> {
    let previous: Vec<UserId> = previous.iter().map(|item| item.id.clone()).collect();
    let next: Vec<UserId> = next.iter().map(|item| item.id.clone()).collect();
    diff_ids(&previous, &next)
}

/// Both slices must hold unique ids.
pub fn diff_ids(previous: &[UserId], next: &[UserId]) -> Vec<ListChange> {
    let next_index: HashMap<&UserId, usize> =
        next.iter().enumerate().map(|(idx, id)| (id, idx)).collect();
    let previous_ids: HashSet<&UserId> = previous.iter().collect();

    let mut removals = Vec::new();
    // (old index, new index) of survivors, in old order.
    let mut survivors = Vec::new();
    for (from, id) in previous.iter().enumerate() {
        match next_index.get(id) {
            Some(&to) => survivors.push((from, to)),
            None => removals.push(ListChange::Remove {
                id: id.clone(),
                from,
            }),
        }
    }
    removals.reverse();

    let targets: Vec<usize> = survivors.iter().map(|&(_, to)| to).collect();
    let stable = longest_increasing_run(&targets);

    let mut placements = Vec::new();
    for (pos, &(from, to)) in survivors.iter().enumerate() {
        if !stable.contains(&pos) {
            placements.push(ListChange::Move {
                id: next[to].clone(),
                from,
                to,
            });
        }
    }
    for (to, id) in next.iter().enumerate() {
        if !previous_ids.contains(id) {
            placements.push(ListChange::Insert { id: id.clone(), to });
        }
    }
    placements.sort_by_key(|change| match change {
        ListChange::Move { to, .. } | ListChange::Insert { to, .. } => *to,
        ListChange::Remove { .. } => 0,
    });

    removals.extend(placements);
    removals
}

/// Replays `changes` onto `previous`, producing the list they describe.
pub fn apply_changes(previous: &[UserId], changes: &[ListChange]) -> Vec<UserId> {
    let detached: HashSet<&UserId> = changes
        .iter()
        .filter(|change| !matches!(change, ListChange::Insert { .. }))
        .map(ListChange::id)
        .collect();
    let mut list: Vec<UserId> = previous
        .iter()
        .filter(|id| !detached.contains(id))
        .cloned()
        .collect();

    for change in changes {
        match change {
            ListChange::Move { id, to, .. } | ListChange::Insert { id, to } => {
                let at = (*to).min(list.len());
                list.insert(at, id.clone());
            }
            ListChange::Remove { .. } => {}
        }
    }
    list
}

/// Positions (into `values`) of one longest strictly increasing subsequence.
fn longest_increasing_run(values: &[usize]) -> HashSet<usize> {
    // tails[k] = position of the smallest tail of an increasing run of length k + 1.
    let mut tails: Vec<usize> = Vec::new();
    let mut parent: Vec<Option<usize>> = vec![None; values.len()];

    for (pos, &value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&tail| values[tail] < value);
        if slot > 0 {
            parent[pos] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(pos);
        } else {
            tails[slot] = pos;
        }
    }

    let mut run = HashSet::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(pos) = cursor {
        run.insert(pos);
        cursor = parent[pos];
    }
    run
}
