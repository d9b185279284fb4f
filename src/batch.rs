//! Turning a file of SMILES strings into molecular graphs, one row at a time

use std::{fmt, path::Path};

use tracing::debug;

use crate::{
    error::Result,
    graph::{mol_to_graph, MolGraph},
    rdkit::{mol_from_smiles, standardize_outcome, Standardized},
    Dataset,
};

/// Why a row produced no graph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// RDKit could not parse the input string
    Unparseable,
    /// Standardization hit a `TypeError`
    TypeFault,
    /// Standardization produced an empty string, e.g. for an empty cell
    Empty,
    /// The canonical SMILES did not parse a second time
    Reparse,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DropReason::Unparseable => "unparseable SMILES",
            DropReason::TypeFault => "type error during standardization",
            DropReason::Empty => "empty standardized SMILES",
            DropReason::Reparse => "canonical SMILES failed to re-parse",
        };
        f.write_str(s)
    }
}

/// What happened to a single input row. `row` is the zero-based index of
/// the data row in the input.
#[derive(Debug)]
pub enum RowOutcome {
    Graph {
        row: usize,
        smiles: String,
        canonical: String,
        graph: MolGraph,
    },
    Dropped {
        row: usize,
        smiles: String,
        reason: DropReason,
    },
}

impl RowOutcome {
    pub fn row(&self) -> usize {
        match self {
            RowOutcome::Graph { row, .. } | RowOutcome::Dropped { row, .. } => {
                *row
            }
        }
    }

    pub fn graph(&self) -> Option<&MolGraph> {
        match self {
            RowOutcome::Graph { graph, .. } => Some(graph),
            RowOutcome::Dropped { .. } => None,
        }
    }

    pub fn into_graph(self) -> Option<MolGraph> {
        match self {
            RowOutcome::Graph { graph, .. } => Some(graph),
            RowOutcome::Dropped { .. } => None,
        }
    }
}

/// Standardize `smiles`, parse the canonical form again and convert it to a
/// graph. Chemistry failures are reported in the outcome; only interpreter
/// faults come back as `Err`.
pub fn process_smiles(row: usize, smiles: &str) -> Result<RowOutcome> {
    let dropped = |reason: DropReason| {
        debug!(row, smiles, %reason, "dropping row");
        Ok(RowOutcome::Dropped {
            row,
            smiles: smiles.to_owned(),
            reason,
        })
    };
    let canonical = match standardize_outcome(smiles)? {
        Standardized::Canonical(s) if s.is_empty() => {
            return dropped(DropReason::Empty)
        }
        Standardized::Canonical(s) => s,
        Standardized::Unparseable => return dropped(DropReason::Unparseable),
        Standardized::TypeFault => return dropped(DropReason::TypeFault),
    };
    let Some(mol) = mol_from_smiles(&canonical)? else {
        return dropped(DropReason::Reparse);
    };
    let graph = mol_to_graph(&mol)?;
    Ok(RowOutcome::Graph {
        row,
        smiles: smiles.to_owned(),
        canonical,
        graph,
    })
}

/// Run [process_smiles] over every string in order
pub fn process_all<I, S>(smiles: I) -> Result<Vec<RowOutcome>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    smiles
        .into_iter()
        .enumerate()
        .map(|(row, s)| process_smiles(row, s.as_ref()))
        .collect()
}

/// Keep only the graphs, in their original order
pub fn successes(outcomes: Vec<RowOutcome>) -> Vec<MolGraph> {
    outcomes
        .into_iter()
        .filter_map(RowOutcome::into_graph)
        .collect()
}

/// Load the `smiles` column of the CSV file at `path` and report what
/// happened to every row
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<RowOutcome>> {
    Dataset::load(path)?.process()
}

/// Read the CSV file at `path`, standardize each entry of its `smiles`
/// column and return the graphs of the rows that made it through. Rows
/// that fail are skipped silently, so the result may be shorter than the
/// file.
pub fn smiles_to_molecular_graphs(
    path: impl AsRef<Path>,
) -> Result<Vec<MolGraph>> {
    let outcomes = load_rows(path)?;
    Ok(successes(outcomes))
}
