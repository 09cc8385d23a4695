use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use tracing::debug;

use crate::{
    graph::{KeyGraph, KeySet},
    COLLECTOR_N,
};

/// Bounds on the work a search may do before giving up.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    pub max_expanded_states: Option<usize>,
}

impl SearchLimits {
    pub fn with_max_expanded_states(max_expanded_states: usize) -> Self {
        Self {
            max_expanded_states: Some(max_expanded_states),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    AllCollected(usize),
    Unreachable,
    BudgetExhausted { expanded_n: usize },
}

impl CollectOutcome {
    pub fn steps_n(&self) -> Option<usize> {
        if let Self::AllCollected(steps_n) = self {
            Some(*steps_n)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CollectorsState {
    node_inds: [usize; COLLECTOR_N],
    keys: KeySet,
}

impl CollectorsState {
    pub fn new() -> Self {
        // Every collector starts from its own entrance node.
        Self {
            node_inds: std::array::from_fn(|ind| ind),
            keys: KeySet::new(),
        }
    }

    pub fn move_collector(&self, collector_ind: usize, to: usize, key: Option<char>) -> Self {
        let mut next_state = *self;
        next_state.node_inds[collector_ind] = to;
        if let Some(key) = key {
            next_state.keys.insert(key);
        }

        next_state
    }
}

#[derive(Debug, Clone)]
struct SearchEntry {
    state: CollectorsState,
    steps_n: usize,
}

impl Ord for SearchEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.steps_n.cmp(&other.steps_n)
    }
}

impl PartialOrd for SearchEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchEntry {
    fn eq(&self, other: &Self) -> bool {
        self.steps_n == other.steps_n
    }
}

impl Eq for SearchEntry {}

pub fn find_min_collect_steps(graph: &KeyGraph) -> CollectOutcome {
    find_min_collect_steps_with(graph, &SearchLimits::default())
}

/// Dijkstra's search over the states of all collectors(where they are, which keys are collected).
///
/// Entries in the frontier are never updated in place: a better way to some state is recorded and
/// pushed as a new entry, and the outdated ones are skipped when popped.
pub fn find_min_collect_steps_with(graph: &KeyGraph, limits: &SearchLimits) -> CollectOutcome {
    let init_state = CollectorsState::new();
    let mut min_steps_of_states = HashMap::from([(init_state, 0)]);
    let mut search_entries = BinaryHeap::from([Reverse(SearchEntry {
        state: init_state,
        steps_n: 0,
    })]);
    let mut expanded_n = 0;
    while let Some(Reverse(cur_entry)) = search_entries.pop() {
        if min_steps_of_states
            .get(&cur_entry.state)
            .is_some_and(|min_steps_n| cur_entry.steps_n > *min_steps_n)
        {
            continue;
        }

        if cur_entry.state.keys.len() == graph.key_n() {
            debug!(
                expanded_n,
                state_n = min_steps_of_states.len(),
                "Collected all {} key(s) in {} steps.",
                graph.key_n(),
                cur_entry.steps_n
            );
            return CollectOutcome::AllCollected(cur_entry.steps_n);
        }

        if limits
            .max_expanded_states
            .is_some_and(|max_n| expanded_n >= max_n)
        {
            debug!(expanded_n, "Search budget exhausted.");
            return CollectOutcome::BudgetExhausted { expanded_n };
        }
        expanded_n += 1;

        for (collector_ind, node_ind) in cur_entry.state.node_inds.iter().enumerate() {
            for edge in graph
                .edges(*node_ind)
                .iter()
                .filter(|edge| graph.is_passable(edge, &cur_entry.state.keys))
            {
                // Moving onto a collected key is still allowed, it's the only way to pass it.
                let next_state = cur_entry.state.move_collector(
                    collector_ind,
                    edge.to(),
                    graph.nodes()[edge.to()].key(),
                );
                let next_steps_n = cur_entry.steps_n + edge.steps_n();
                if min_steps_of_states
                    .get(&next_state)
                    .map_or(true, |min_steps_n| next_steps_n < *min_steps_n)
                {
                    min_steps_of_states.insert(next_state, next_steps_n);
                    search_entries.push(Reverse(SearchEntry {
                        state: next_state,
                        steps_n: next_steps_n,
                    }));
                }
            }
        }
    }

    debug!(
        expanded_n,
        state_n = min_steps_of_states.len(),
        "No way to collect all keys."
    );
    CollectOutcome::Unreachable
}
