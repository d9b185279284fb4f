//! A tiny stand-in for `rdkit.Chem` so the standardization and batch logic
//! can be exercised on machines without RDKit.
//!
//! It understands linear chains of `C`, `N`, `O` and `S` with optional
//! `[H]` atoms. Three marker tokens force failures further down the line:
//! `[TypeError]` and `[ValueError]` make `RemoveHs` raise, and
//! `[Unwritable]` makes `MolToSmiles` emit something that does not parse
//! again. The module is only visible to the thread that holds a
//! [StubGuard], so tests against the real RDKit are unaffected.

use std::{cell::Cell, sync::Once};

use pyo3::{prelude::PyAnyMethods, types::PyModule, Python};

const NAME: &str = "tg2m_stub_chem";

const CODE: &str = r#"
import re

_TOKEN = re.compile(r"\[H\]|\[TypeError\]|\[ValueError\]|\[Unwritable\]|[CNOS]")
_NUMS = {"H": 1, "C": 6, "N": 7, "O": 8, "S": 16}


class Atom:
    def __init__(self, symbol):
        self.symbol = symbol

    def GetAtomicNum(self):
        return _NUMS[self.symbol]


class Mol:
    def __init__(self, symbols, fault=None):
        self.atoms = [Atom(s) for s in symbols]
        self.fault = fault

    def GetNumAtoms(self):
        return len(self.atoms)

    def GetAtoms(self):
        return list(self.atoms)


class Matrix:
    def __init__(self, rows):
        self.rows = rows

    def tolist(self):
        return [list(r) for r in self.rows]


def MolFromSmiles(smiles):
    pos = 0
    symbols = []
    fault = None
    for m in _TOKEN.finditer(smiles):
        if m.start() != pos:
            return None
        pos = m.end()
        tok = m.group()
        if tok == "[H]":
            symbols.append("H")
        elif tok.startswith("["):
            fault = tok[1:-1]
        else:
            symbols.append(tok)
    if pos != len(smiles):
        return None
    return Mol(symbols, fault)


def RemoveHs(mol):
    if mol.fault == "TypeError":
        raise TypeError("cannot clean molecule")
    if mol.fault == "ValueError":
        raise ValueError("boom")
    return Mol([a.symbol for a in mol.atoms if a.symbol != "H"], mol.fault)


def SanitizeMol(mol):
    return 0


def MolToSmiles(mol):
    s = "".join(a.symbol for a in mol.atoms)
    if mol.fault == "Unwritable":
        return "!" + s
    return s


def GetAdjacencyMatrix(mol):
    n = len(mol.atoms)
    return Matrix(
        [[1 if abs(i - j) == 1 else 0 for j in range(n)] for i in range(n)]
    )
"#;

static INSTALL: Once = Once::new();

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Name of the module [super::chem] should import on this thread
pub(super) fn module_name() -> &'static str {
    if ACTIVE.with(Cell::get) {
        NAME
    } else {
        "rdkit.Chem"
    }
}

/// Routes this thread's RDKit calls to the stand-in module until dropped
pub(crate) struct StubGuard(());

impl Drop for StubGuard {
    fn drop(&mut self) {
        ACTIVE.with(|a| a.set(false));
    }
}

pub(crate) fn install() -> StubGuard {
    INSTALL.call_once(|| {
        Python::with_gil(|py| {
            let module = PyModule::from_code_bound(
                py,
                CODE,
                "tg2m_stub_chem.py",
                NAME,
            )
            .unwrap();
            py.import_bound("sys")
                .unwrap()
                .getattr("modules")
                .unwrap()
                .set_item(NAME, module)
                .unwrap();
        })
    });
    ACTIVE.with(|a| a.set(true));
    StubGuard(())
}
