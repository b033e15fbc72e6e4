//! `spamsieve links`: show how the automaton's failure links were resolved.

use std::io::{self, Write};

use anyhow::{Context, Result};
use log::warn;
use spamsieve_core::{Automaton, NodeReport, SubstitutionTable};

use crate::cli::LinksCommand;
use crate::commands::load_config;
use crate::ui::output;

/// Builds the automaton the command describes.
///
/// Keywords come from `--keywords` when given, otherwise from the
/// configuration. Substitutions are only applied with `--with-substitutions`.
pub fn build_automaton(cmd: &LinksCommand) -> Result<Automaton> {
    let config = load_config(&cmd.config)?;
    let keywords = if cmd.keywords.is_empty() {
        config.canonical_keywords()
    } else {
        cmd.keywords.clone()
    };
    let table = if cmd.with_substitutions {
        config.substitution_table()?
    } else {
        SubstitutionTable::empty()
    };
    Automaton::build(keywords, &table, &config.limits).context("Failed to build keyword automaton")
}

fn print_summary<W: Write>(out: &mut W, automaton: &Automaton, non_trivial: &[NodeReport]) -> io::Result<()> {
    writeln!(out, "Found {} non-trivial failure links:", non_trivial.len())?;
    for row in non_trivial {
        writeln!(out, "Node '{}' -> fails to '{}'", row.path, row.failure_path)?;
        if !row.outputs.is_empty() {
            writeln!(out, "  Outputs: {}", row.outputs.join(", "))?;
        }
    }
    let to_root = automaton.node_count().saturating_sub(1 + non_trivial.len());
    writeln!(out, "{} nodes connect directly to ROOT via failure links.", to_root)
}

pub fn run_links(cmd: &LinksCommand) -> Result<()> {
    let automaton = build_automaton(cmd)?;
    if automaton.node_count() > 5_000 {
        warn!("The automaton has {} nodes; the table will be long.", automaton.node_count());
    }

    let rows = if cmd.non_trivial {
        automaton.non_trivial_links()
    } else {
        automaton.describe()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut out, &rows).context("Failed to serialize failure links")?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "Processing {} unique keywords, {} variant(s), {} node(s).",
            automaton.keywords().len(),
            automaton.variant_count(),
            automaton.node_count()
        )?;
        output::print_links(&mut out, &rows)?;
        let non_trivial = if cmd.non_trivial { rows } else { automaton.non_trivial_links() };
        print_summary(&mut out, &automaton, &non_trivial)?;
    }
    out.flush()?;
    Ok(())
}
