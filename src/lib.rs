use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

pub mod graph;
pub mod search;
pub mod vault;

pub use graph::{Edge, KeyGraph, KeySet, Node, NodeKind};
pub use search::{
    find_min_collect_steps, find_min_collect_steps_with, CollectOutcome, SearchLimits,
};
pub use vault::{Direction, Position, Tile, VaultMap, VaultMapBuilder};

/// Number of collectors working together in a vault.
pub const COLLECTOR_N: usize = 4;

#[derive(Debug)]
pub enum Error {
    EmptyMap,
    InconsistentRow(usize, usize, usize), // (row index, expected column count, given column count)
    InvalidCharForMap(char, Position),
    DuplicateKey(char, Position, Position),
    WrongEntranceCount(usize),
    CannotSplitEntrance(Position),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyMap => write!(f, "No tile in given map."),
            Error::InconsistentRow(row_ind, expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {} in row {}.",
                expect_col_n, this_col_n, row_ind
            ),
            Error::InvalidCharForMap(c, pos) => {
                write!(f, "Invalid character({}) at {} for map.", c, pos)
            }
            Error::DuplicateKey(key, last_pos, pos) => write!(
                f,
                "Expect only one key {} in map, given two({}, {}).",
                key, last_pos, pos
            ),
            Error::WrongEntranceCount(n) => write!(
                f,
                "Expect 1 or {} entrance(s) in map, given {}.",
                COLLECTOR_N, n
            ),
            Error::CannotSplitEntrance(pos) => write!(
                f,
                "Can't split entrance at {}, it needs open floor all around.",
                pos
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    /// Vault map file, read from stdin if not given.
    pub input_path: Option<PathBuf>,
    /// Wall off the only entrance into four before collecting.
    #[arg(long)]
    pub split_entrance: bool,
    /// Give up after expanding this many search states.
    #[arg(long)]
    pub max_states: Option<usize>,
}

/// Build the key graph of given vault and search it for the fewest steps to collect every key.
pub fn collect_all_keys(map: &VaultMap, limits: &SearchLimits) -> CollectOutcome {
    let graph = KeyGraph::new(map);
    find_min_collect_steps_with(&graph, limits)
}

pub fn read_vault_map<P: AsRef<Path>>(path: P) -> Result<VaultMap> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    read_vault_map_from(BufReader::new(file)).with_context(|| {
        format!(
            "Failed to read vault map from given file({}).",
            path.as_ref().display()
        )
    })
}

/// Read map rows until an empty line or the end of input.
pub fn read_vault_map_from<R: BufRead>(reader: R) -> Result<VaultMap> {
    let mut builder = VaultMapBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}.", ind + 1))?;
        if line.is_empty() {
            break;
        }

        builder.add_row(line.as_str())?;
    }

    Ok(builder.build()?)
}
