use std::{
    collections::{HashMap, VecDeque},
    fmt::Display,
};

use tracing::{debug, trace};

use crate::{
    vault::{Direction, Position, Tile, VaultMap},
    COLLECTOR_N,
};

/// Set of key letters('a' to 'z') packed into one word, bit i for letter 'a' + i.
///
/// Doors are recorded with the bit of their key, so gating is a subset test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeySet(u32);

impl Display for KeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().collect::<String>())
    }
}

impl FromIterator<char> for KeySet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let mut set = KeySet::new();
        for key in iter {
            set.insert(key);
        }

        set
    }
}

impl KeySet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, key: char) {
        self.0 |= Self::bit(key);
    }

    pub fn with(mut self, key: char) -> Self {
        self.insert(key);
        self
    }

    pub fn contains(&self, key: char) -> bool {
        self.0 & Self::bit(key) != 0
    }

    pub fn is_subset(&self, other: &KeySet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn intersection(&self, other: &KeySet) -> KeySet {
        KeySet(self.0 & other.0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = char> {
        let bits = self.0;
        (0..26u8)
            .filter(move |i| bits & (1u32 << *i) != 0)
            .map(|i| char::from(b'a' + i))
    }

    fn bit(key: char) -> u32 {
        debug_assert!(key.is_ascii_lowercase(), "Invalid key({}).", key);
        1 << (key as u32 - 'a' as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Entrance(usize),
    Key(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    pos: Position,
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NodeKind::Entrance(ind) => write!(f, "@{} at {}", ind, self.pos),
            NodeKind::Key(k) => write!(f, "{} at {}", k, self.pos),
        }
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    pub fn key(&self) -> Option<char> {
        if let NodeKind::Key(k) = self.kind {
            Some(k)
        } else {
            None
        }
    }

    fn kind_char(&self) -> char {
        match self.kind {
            NodeKind::Entrance(_) => '@',
            NodeKind::Key(k) => k,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    to: usize,
    steps_n: usize,
    doors: KeySet,
}

impl Edge {
    pub fn to(&self) -> usize {
        self.to
    }

    pub fn steps_n(&self) -> usize {
        self.steps_n
    }

    /// Keys of the doors on this edge.
    pub fn doors(&self) -> KeySet {
        self.doors
    }
}

/// Vault compressed to its entrances and keys.
///
/// Nodes 0 to 3 are the collectors' entrances(a lone entrance is shared by all of them), followed by
/// the keys in letter order. Each node only has edges to the first keys met on the ways out of it,
/// keys further away are reached by chaining edges in search.
#[derive(Debug, Clone)]
pub struct KeyGraph {
    nodes: Vec<Node>,
    edges: Vec<Vec<Edge>>,
    all_keys: KeySet,
}

impl Display for KeyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (ind, (node, edges)) in self.nodes.iter().zip(self.edges.iter()).enumerate() {
            write!(f, "{}: {} ->", ind, node)?;
            for edge in edges {
                write!(f, " {}", self.nodes[edge.to].kind_char())?;
                write!(f, "({}", edge.steps_n)?;
                if !edge.doors.is_empty() {
                    write!(f, ", doors {}", edge.doors)?;
                }
                write!(f, ")")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl KeyGraph {
    pub fn new(map: &VaultMap) -> Self {
        let entrances = map.entrances();
        let mut nodes = (0..COLLECTOR_N)
            .map(|ind| Node {
                kind: NodeKind::Entrance(ind),
                pos: entrances[ind % entrances.len()],
            })
            .collect::<Vec<_>>();
        let mut key_node_inds = HashMap::new();
        for (key, pos) in map.keys() {
            key_node_inds.insert(*key, nodes.len());
            nodes.push(Node {
                kind: NodeKind::Key(*key),
                pos: *pos,
            });
        }

        let edges = (0..nodes.len())
            .map(|ind| {
                let edges = bfs_for_keys(map, &nodes[ind].pos, &key_node_inds);
                trace!("Found {} edge(s) from node {}.", edges.len(), nodes[ind]);
                edges
            })
            .collect::<Vec<_>>();
        let all_keys = map.keys().keys().copied().collect();
        debug!(
            node_n = nodes.len(),
            edge_n = edges.iter().map(|e| e.len()).sum::<usize>(),
            "Compressed vault({}x{}) into key graph.",
            map.row_n(),
            map.col_n()
        );

        Self {
            nodes,
            edges,
            all_keys,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self, node_ind: usize) -> &[Edge] {
        &self.edges[node_ind]
    }

    pub fn all_keys(&self) -> KeySet {
        self.all_keys
    }

    pub fn key_n(&self) -> usize {
        self.all_keys.len()
    }

    /// Whether given keys open every door on the edge. Doors without a key in vault never close.
    pub fn is_passable(&self, edge: &Edge, keys: &KeySet) -> bool {
        edge.doors.intersection(&self.all_keys).is_subset(keys)
    }
}

fn bfs_for_keys(
    map: &VaultMap,
    from: &Position,
    key_node_inds: &HashMap<char, usize>,
) -> Vec<Edge> {
    let mut visited = vec![false; map.row_n() * map.col_n()];
    let mut search_positions = VecDeque::from([(*from, 0, KeySet::new())]);
    let mut edges = Vec::new();
    if let Some(ind) = map.pos_to_ind(from) {
        visited[ind] = true;
    }

    while let Some((cur_pos, cur_steps_n, mut doors)) = search_positions.pop_front() {
        match map.tile(&cur_pos) {
            Some(Tile::Key(k)) if cur_pos != *from => {
                // Stop at the first key, the ones behind it are its own edges.
                edges.push(Edge {
                    to: key_node_inds[k],
                    steps_n: cur_steps_n,
                    doors,
                });
                continue;
            }
            Some(tile @ Tile::Door(_)) => {
                if let Some(key) = tile.key_of_door() {
                    doors.insert(key);
                }
            }
            _ => (),
        }

        for next_pos in Direction::all_dirs()
            .iter()
            .flat_map(|dir| cur_pos.neighbor(*dir))
        {
            let Some(ind) = map.pos_to_ind(&next_pos) else {
                continue;
            };
            if !visited[ind] && map.can_pass(&next_pos) {
                visited[ind] = true;
                search_positions.push_back((next_pos, cur_steps_n + 1, doors));
            }
        }
    }

    edges
}
