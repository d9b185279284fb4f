//! Thin wrappers around `rdkit.Chem`, reached through the embedded Python
//! interpreter. Every call takes the GIL for its own duration, so none of
//! these functions need a `Python` token from the caller.

use pyo3::{
    exceptions::PyTypeError, prelude::PyAnyMethods, types::PyModule, Bound,
    Py, PyAny, PyResult, Python,
};

use crate::error::Result;

#[cfg(test)]
pub(crate) mod stub;

#[cfg(not(test))]
fn module_name() -> &'static str {
    "rdkit.Chem"
}

#[cfg(test)]
use stub::module_name;

fn chem(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    PyModule::import_bound(py, module_name())
}

/// Reports whether `rdkit.Chem` can be imported by the embedded
/// interpreter.
pub fn available() -> bool {
    Python::with_gil(|py| chem(py).is_ok())
}

/// A parsed RDKit molecule.
pub struct Mol(Py<PyAny>);

impl Mol {
    pub fn num_atoms(&self) -> Result<usize> {
        Python::with_gil(|py| {
            let n = self.0.bind(py).call_method0("GetNumAtoms")?.extract()?;
            Ok(n)
        })
    }

    /// Atomic numbers of the atoms, in atom order
    pub fn atomic_nums(&self) -> Result<Vec<u8>> {
        Python::with_gil(|py| {
            let atoms = self.0.bind(py).call_method0("GetAtoms")?;
            let mut ret = Vec::new();
            for atom in atoms.iter()? {
                ret.push(atom?.call_method0("GetAtomicNum")?.extract()?);
            }
            Ok(ret)
        })
    }

    /// The square atom adjacency matrix: entry `[i][j]` is 1 when atoms `i`
    /// and `j` share a bond and 0 otherwise.
    pub fn adjacency_matrix(&self) -> Result<Vec<Vec<u8>>> {
        Python::with_gil(|py| {
            // GetAdjacencyMatrix hands back a numpy array; tolist turns it
            // into nested python ints that pyo3 can extract directly
            let m = chem(py)?
                .call_method1("GetAdjacencyMatrix", (self.0.bind(py),))?
                .call_method0("tolist")?
                .extract()?;
            Ok(m)
        })
    }

    /// Canonical SMILES for this molecule
    pub fn to_smiles(&self) -> Result<String> {
        Python::with_gil(|py| {
            let s = chem(py)?
                .call_method1("MolToSmiles", (self.0.bind(py),))?
                .extract()?;
            Ok(s)
        })
    }
}

impl std::fmt::Debug for Mol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let smiles = self.to_smiles().unwrap_or_else(|_| "?".to_owned());
        f.debug_tuple("Mol").field(&smiles).finish()
    }
}

/// Parse `smiles` with `Chem.MolFromSmiles`. A string RDKit rejects gives
/// `Ok(None)`; `Err` only signals a problem with the interpreter itself.
pub fn mol_from_smiles(smiles: &str) -> Result<Option<Mol>> {
    Python::with_gil(|py| {
        let mol = chem(py)?.call_method1("MolFromSmiles", (smiles,))?;
        if mol.is_none() {
            return Ok(None);
        }
        Ok(Some(Mol(mol.unbind())))
    })
}

/// The result of running a single SMILES string through
/// [`standardize_outcome`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Standardized {
    Canonical(String),
    /// RDKit could not parse the input at all
    Unparseable,
    /// Hydrogen removal or sanitization raised a `TypeError`
    TypeFault,
}

impl Standardized {
    pub fn into_option(self) -> Option<String> {
        match self {
            Standardized::Canonical(s) => Some(s),
            Standardized::Unparseable | Standardized::TypeFault => None,
        }
    }
}

/// Parse `smiles`, strip explicit hydrogens, re-sanitize and write the
/// canonical SMILES back out.
///
/// Only a `TypeError` raised while cleaning the molecule is absorbed, after
/// printing a diagnostic line to stdout. Any other exception from
/// `RemoveHs`, `SanitizeMol` or `MolToSmiles` is returned as
/// [`crate::Error::Python`].
pub fn standardize_outcome(smiles: &str) -> Result<Standardized> {
    Python::with_gil(|py| {
        let chem = chem(py)?;
        let mol = chem.call_method1("MolFromSmiles", (smiles,))?;
        if mol.is_none() {
            return Ok(Standardized::Unparseable);
        }
        let cleaned = (|| -> PyResult<String> {
            let mol = chem.call_method1("RemoveHs", (mol,))?;
            chem.call_method1("SanitizeMol", (&mol,))?;
            chem.call_method1("MolToSmiles", (&mol,))?.extract()
        })();
        match cleaned {
            Ok(s) => Ok(Standardized::Canonical(s)),
            Err(e) if e.is_instance_of::<PyTypeError>(py) => {
                println!("{}", type_fault_message(smiles));
                Ok(Standardized::TypeFault)
            }
            Err(e) => Err(e.into()),
        }
    })
}

fn type_fault_message(smiles: &str) -> String {
    format!("Failed to standardize SMILES: {smiles}")
}

/// [`standardize_outcome`] collapsed to the canonical string or `None`.
pub fn standardize_smiles(smiles: &str) -> Result<Option<String>> {
    Ok(standardize_outcome(smiles)?.into_option())
}
