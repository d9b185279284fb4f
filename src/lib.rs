use std::{fs::File, path::Path};

use csv::ReaderBuilder;

pub mod batch;
mod error;
pub mod graph;
pub mod rdkit;

pub use batch::{
    smiles_to_molecular_graphs, successes, DropReason, RowOutcome,
};
pub use error::{Error, Result};
pub use graph::{mol_to_graph, AtomNode, MolGraph};
pub use rdkit::{mol_from_smiles, standardize_smiles, Mol};

/// Column read by [Dataset::load]
pub const DEFAULT_COLUMN: &str = "smiles";

/// The SMILES strings of one column of a CSV file, in file order
#[derive(Debug, Default)]
pub struct Dataset {
    smiles: Vec<String>,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
        Self::load_column(path, DEFAULT_COLUMN)
    }

    /// Read `column` out of the CSV file at `path`. The file must start with
    /// a header row; empty cells come through as empty strings.
    pub fn load_column(
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Dataset> {
        let path = path.as_ref();
        let f = File::open(path)?;
        let mut r = ReaderBuilder::new().has_headers(true).from_reader(f);
        let Some(idx) = r.headers()?.iter().position(|h| h == column) else {
            return Err(Error::MissingColumn {
                column: column.to_owned(),
                path: path.to_owned(),
            });
        };
        let mut smiles = Vec::new();
        for record in r.records() {
            let record = record?;
            smiles.push(record.get(idx).unwrap_or_default().to_owned());
        }
        Ok(Self { smiles })
    }

    pub fn len(&self) -> usize {
        self.smiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.smiles.is_empty()
    }

    pub fn smiles(&self) -> &[String] {
        &self.smiles
    }

    /// consume `self` and return the contained vector of SMILES strings
    pub fn into_smiles(self) -> Vec<String> {
        self.smiles
    }

    /// Standardize and convert every entry, keeping a [RowOutcome] for each
    pub fn process(&self) -> Result<Vec<RowOutcome>> {
        batch::process_all(&self.smiles)
    }
}
