use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vault_keys::{CLIArgs, CollectOutcome, KeyGraph, SearchLimits, COLLECTOR_N};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = CLIArgs::parse();
    let mut vault_map = if let Some(input_path) = args.input_path.as_ref() {
        vault_keys::read_vault_map(input_path)?
    } else {
        vault_keys::read_vault_map_from(io::stdin().lock())
            .context("Failed to read vault map from stdin.")?
    };

    if args.split_entrance {
        vault_map
            .split_entrance()
            .context("Failed to split the entrance of given vault.")?;
    }
    debug!("Given vault looks like:\n{}", vault_map);

    let graph = KeyGraph::new(&vault_map);
    debug!("Key graph of given vault:\n{}", graph);
    let limits = SearchLimits {
        max_expanded_states: args.max_states,
    };
    match vault_keys::find_min_collect_steps_with(&graph, &limits) {
        CollectOutcome::AllCollected(steps_n) => println!(
            "It takes at least {} steps for {} collectors to collect all {} key(s).",
            steps_n,
            COLLECTOR_N,
            graph.key_n()
        ),
        CollectOutcome::Unreachable => eprintln!(
            "There's no way for {} collectors to collect all keys in given vault.",
            COLLECTOR_N
        ),
        CollectOutcome::BudgetExhausted { expanded_n } => eprintln!(
            "Gave up after expanding {} search states without collecting all keys.",
            expanded_n
        ),
    }

    Ok(())
}
