//! # Tanner graph representation
//!
//! This module implements the bipartite Tanner graph of a binary LDPC code.
//! The graph is built once from a *checks* description: an ordered list of
//! supports, one per row of the parity check matrix, each giving the
//! variables that participate in that parity constraint. Variable nodes
//! occupy the ids `0..n` and check nodes the ids `n..n + m`, where `n` is
//! the code length and `m` the number of checks.
//!
//! Every edge receives a stable [`EdgeId`] at construction, so that message
//! stores can be flat arrays indexed by edge instead of hash maps keyed by
//! node pairs.

use std::collections::BTreeSet;
use std::ops::Range;
use thiserror::Error;

/// Identifier of a node of the Tanner graph.
///
/// Variable nodes are numbered `0..n` and check nodes `n..n + m`.
pub type NodeId = usize;

/// Identifier of an edge of the Tanner graph.
///
/// Edge ids are assigned at construction, in check order and support order
/// within each check, and are dense in `0..num_edges`.
pub type EdgeId = usize;

/// Tanner graph construction error.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// A check constrains no variables.
    #[error("check {check} has an empty support")]
    EmptyCheck {
        /// Index of the offending check.
        check: usize,
    },
    /// A check references a variable outside the inferred code length.
    #[error("check {check} references variable {variable}, outside [0, {num_variables})")]
    VariableOutOfRange {
        /// Index of the offending check.
        check: usize,
        /// The out-of-range variable index.
        variable: usize,
        /// Code length inferred from the union of referenced variables.
        num_variables: usize,
    },
    /// A check references the same variable more than once.
    #[error("check {check} references variable {variable} more than once")]
    DuplicateVariable {
        /// Index of the offending check.
        check: usize,
        /// The repeated variable index.
        variable: usize,
    },
}

/// A [`Result`] type using the Tanner graph [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// An adjacency entry pairing a neighbor with the edge that reaches it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Link {
    /// Node at the other end of the edge.
    pub node: NodeId,
    /// Identifier of the edge.
    pub edge: EdgeId,
}

/// Bipartite Tanner graph of a binary LDPC code.
///
/// The graph is immutable once built and serves as a read-only adjacency
/// view for the decoder.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TannerGraph {
    num_variables: usize,
    supports: Vec<Vec<usize>>,
    adjacency: Vec<Vec<Link>>,
    num_edges: usize,
}

impl TannerGraph {
    /// Builds a Tanner graph from the supports of the parity checks.
    ///
    /// The code length is inferred as the number of distinct variable
    /// indices referenced by the checks. Under this convention the
    /// referenced indices must cover `0..n` without gaps; a gap leaves the
    /// largest indices outside the inferred range and fails construction.
    ///
    /// # Examples
    /// ```
    /// # use ldpc_bp::graph::TannerGraph;
    /// let graph = TannerGraph::new(&[[0, 1, 3], [1, 2, 4], [0, 4, 5], [2, 3, 5]]).unwrap();
    /// assert_eq!(graph.num_variables(), 6);
    /// assert_eq!(graph.num_checks(), 4);
    /// assert_eq!(graph.degree(0), 2);
    /// assert!(graph.is_check(6));
    /// ```
    ///
    /// # Errors
    /// Fails if any support is empty, references a variable outside the
    /// inferred range, or references the same variable twice.
    pub fn new<C: AsRef<[usize]>>(checks: &[C]) -> Result<TannerGraph> {
        let supports: Vec<Vec<usize>> = checks.iter().map(|c| c.as_ref().to_vec()).collect();
        let mut referenced = BTreeSet::new();
        for (check, support) in supports.iter().enumerate() {
            if support.is_empty() {
                return Err(Error::EmptyCheck { check });
            }
            referenced.extend(support.iter().copied());
        }
        let num_variables = referenced.len();
        for (check, support) in supports.iter().enumerate() {
            if let Some(&variable) = support.iter().find(|&&v| v >= num_variables) {
                return Err(Error::VariableOutOfRange {
                    check,
                    variable,
                    num_variables,
                });
            }
        }
        let num_checks = supports.len();
        let mut adjacency = vec![Vec::new(); num_variables + num_checks];
        let mut num_edges = 0;
        for (check, support) in supports.iter().enumerate() {
            let check_node = num_variables + check;
            for &variable in support {
                if adjacency[variable].iter().any(|l: &Link| l.node == check_node) {
                    return Err(Error::DuplicateVariable { check, variable });
                }
                let edge = num_edges;
                num_edges += 1;
                adjacency[variable].push(Link {
                    node: check_node,
                    edge,
                });
                adjacency[check_node].push(Link {
                    node: variable,
                    edge,
                });
            }
        }
        Ok(TannerGraph {
            num_variables,
            supports,
            adjacency,
            num_edges,
        })
    }

    /// Returns the code length `n` (number of variable nodes).
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Returns the number of parity checks `m` (number of check nodes).
    pub fn num_checks(&self) -> usize {
        self.supports.len()
    }

    /// Returns the number of edges of the graph.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns the variable node ids, in order.
    pub fn variable_nodes(&self) -> Range<NodeId> {
        0..self.num_variables
    }

    /// Returns the check node ids, in order.
    pub fn check_nodes(&self) -> Range<NodeId> {
        self.num_variables..self.adjacency.len()
    }

    /// Returns `true` if `node` is a variable node.
    pub fn is_variable(&self, node: NodeId) -> bool {
        node < self.num_variables
    }

    /// Returns `true` if `node` is a check node.
    pub fn is_check(&self, node: NodeId) -> bool {
        node >= self.num_variables && node < self.adjacency.len()
    }

    /// Returns the adjacency of a node as neighbor/edge pairs.
    pub fn links(&self, node: NodeId) -> &[Link] {
        &self.adjacency[node]
    }

    /// Returns an [`Iterator`] over the neighbors of a node.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency[node].iter().map(|l| l.node)
    }

    /// Returns the number of edges incident to a node.
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node].len()
    }

    /// Returns the variables constrained by check `check` (row index, not node id).
    pub fn check_support(&self, check: usize) -> &[usize] {
        &self.supports[check]
    }

    /// Returns the edge joining two nodes, or `None` if they are not adjacent.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.adjacency[a].iter().find(|l| l.node == b).map(|l| l.edge)
    }

    /// Evaluates every parity check against a word.
    ///
    /// Entry `c` is `true` iff the bits in the support of check `c` sum to
    /// zero mod 2.
    ///
    /// # Panics
    /// Panics if `bits.len()` differs from the code length.
    pub fn check_results(&self, bits: &[u8]) -> Vec<bool> {
        assert_eq!(bits.len(), self.num_variables);
        self.supports
            .iter()
            .map(|support| {
                support.iter().map(|&v| usize::from(bits[v])).sum::<usize>() % 2 == 0
            })
            .collect()
    }

    /// Returns `true` if `bits` has the code length and satisfies every check.
    pub fn is_codeword(&self, bits: &[u8]) -> bool {
        bits.len() == self.num_variables
            && self.supports.iter().all(|support| {
                support.iter().map(|&v| usize::from(bits[v])).sum::<usize>() % 2 == 0
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn johnson_graph() -> TannerGraph {
        // Example 2.5 in Sarah J. Johnson - Iterative Error Correction
        TannerGraph::new(&[[0, 1, 3], [1, 2, 4], [0, 4, 5], [2, 3, 5]]).unwrap()
    }

    #[test]
    fn node_layout() {
        let graph = johnson_graph();
        assert_eq!(graph.num_variables(), 6);
        assert_eq!(graph.num_checks(), 4);
        assert_eq!(graph.variable_nodes(), 0..6);
        assert_eq!(graph.check_nodes(), 6..10);
        assert!(graph.is_variable(5));
        assert!(!graph.is_variable(6));
        assert!(graph.is_check(6));
        assert!(!graph.is_check(10));
    }

    #[test]
    fn adjacency() {
        let graph = johnson_graph();
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![6, 8]);
        assert_eq!(graph.neighbors(6).collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(graph.degree(5), 2);
        assert_eq!(graph.degree(9), 3);
        assert_eq!(graph.check_support(1), &[1, 2, 4]);
    }

    #[test]
    fn edge_ids_are_dense_and_distinct() {
        let graph = johnson_graph();
        assert_eq!(graph.num_edges(), 12);
        let mut seen = vec![false; graph.num_edges()];
        for node in graph.variable_nodes() {
            for link in graph.links(node) {
                assert!(!seen[link.edge]);
                seen[link.edge] = true;
                // Both endpoints agree on the edge id.
                assert_eq!(graph.edge_between(link.node, node), Some(link.edge));
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn edge_between_non_adjacent() {
        let graph = johnson_graph();
        assert_eq!(graph.edge_between(0, 7), None);
        assert_eq!(graph.edge_between(0, 1), None);
    }

    #[test]
    fn empty_check_rejected() {
        let checks = vec![vec![0, 1], vec![]];
        assert_eq!(
            TannerGraph::new(&checks),
            Err(Error::EmptyCheck { check: 1 })
        );
    }

    #[test]
    fn gap_in_variables_rejected() {
        // Indices {0, 1, 5} infer n = 3, leaving 5 out of range.
        let checks = vec![vec![0, 1], vec![1, 5]];
        assert_eq!(
            TannerGraph::new(&checks),
            Err(Error::VariableOutOfRange {
                check: 1,
                variable: 5,
                num_variables: 3,
            })
        );
    }

    #[test]
    fn duplicate_variable_rejected() {
        assert_eq!(
            TannerGraph::new(&[[0, 1, 1]]),
            Err(Error::DuplicateVariable {
                check: 0,
                variable: 1,
            })
        );
    }

    #[test]
    fn syndrome() {
        let graph = johnson_graph();
        assert!(graph.is_codeword(&[0, 0, 0, 0, 0, 0]));
        assert!(graph.is_codeword(&[0, 0, 1, 0, 1, 1]));
        assert!(!graph.is_codeword(&[1, 0, 1, 0, 1, 1]));
        assert!(!graph.is_codeword(&[0, 0, 1]));
        assert_eq!(
            graph.check_results(&[1, 0, 1, 0, 1, 1]),
            vec![false, true, false, true]
        );
    }
}
