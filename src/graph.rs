//! Undirected molecular graphs labeled with atomic numbers

use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};
use serde::Serialize;

use crate::{error::Result, rdkit::Mol};

/// Per-node label: the element of the atom the node stands for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AtomNode {
    pub atomic_num: u8,
}

/// A molecule's bond topology. Node `i` is atom `i` of the source molecule,
/// and each edge carries the adjacency-matrix entry it was built from.
#[derive(Clone, Debug)]
pub struct MolGraph {
    graph: UnGraph<AtomNode, u8>,
}

impl MolGraph {
    /// Build a graph from a square adjacency matrix and one atomic number
    /// per row. Every nonzero off-diagonal entry becomes an edge, added once
    /// per unordered pair.
    ///
    /// # Panics
    ///
    /// If `adjacency` is not square or its side differs from
    /// `atomic_nums.len()`.
    pub fn from_adjacency<R: AsRef<[u8]>>(
        adjacency: &[R],
        atomic_nums: &[u8],
    ) -> Self {
        let n = atomic_nums.len();
        assert_eq!(adjacency.len(), n, "one adjacency row per atom");
        let mut graph = UnGraph::with_capacity(n, n);
        for &atomic_num in atomic_nums {
            graph.add_node(AtomNode { atomic_num });
        }
        for (i, row) in adjacency.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(row.len(), n, "adjacency matrix must be square");
            for j in i + 1..n {
                let w = row[j].max(adjacency[j].as_ref()[i]);
                if w != 0 {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), w);
                }
            }
        }
        Self { graph }
    }

    pub fn graph(&self) -> &UnGraph<AtomNode, u8> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn atomic_num(&self, i: usize) -> Option<u8> {
        self.graph
            .node_weight(NodeIndex::new(i))
            .map(|a| a.atomic_num)
    }

    pub fn atomic_nums(&self) -> Vec<u8> {
        self.graph
            .node_indices()
            .map(|i| self.graph[i].atomic_num)
            .collect()
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        let n = self.node_count();
        i < n
            && j < n
            && self
                .graph
                .find_edge(NodeIndex::new(i), NodeIndex::new(j))
                .is_some()
    }

    /// Edges as `(low, high)` node index pairs, sorted
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut ret: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| {
                let (a, b) = (e.source().index(), e.target().index());
                (a.min(b), a.max(b))
            })
            .collect();
        ret.sort_unstable();
        ret
    }

    /// A node-link description of the graph, suitable for handing to
    /// `serde_json` and reading back with generic graph tooling.
    pub fn to_node_link(&self) -> NodeLink {
        let nodes = self
            .graph
            .node_indices()
            .map(|i| NodeEntry {
                id: i.index(),
                atomic_num: self.graph[i].atomic_num,
            })
            .collect();
        let links = self
            .graph
            .edge_references()
            .map(|e| LinkEntry {
                source: e.source().index(),
                target: e.target().index(),
                weight: *e.weight(),
            })
            .collect();
        NodeLink {
            directed: false,
            multigraph: false,
            graph: serde_json::Map::new(),
            nodes,
            links,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NodeLink {
    pub directed: bool,
    pub multigraph: bool,
    pub graph: serde_json::Map<String, serde_json::Value>,
    pub nodes: Vec<NodeEntry>,
    pub links: Vec<LinkEntry>,
}

#[derive(Debug, Serialize)]
pub struct NodeEntry {
    pub id: usize,
    pub atomic_num: u8,
}

#[derive(Debug, Serialize)]
pub struct LinkEntry {
    pub source: usize,
    pub target: usize,
    pub weight: u8,
}

/// Convert a parsed molecule into its [MolGraph]. The conversion cannot
/// fail on its own; an `Err` here comes from the interpreter.
pub fn mol_to_graph(mol: &Mol) -> Result<MolGraph> {
    let adjacency = mol.adjacency_matrix()?;
    let atomic_nums = mol.atomic_nums()?;
    Ok(MolGraph::from_adjacency(&adjacency, &atomic_nums))
}
