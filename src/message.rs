//! # Message storage for belief propagation
//!
//! This module stores the most recent message sent over each directed edge
//! of a Tanner graph. A [`MessageStore`] covers one direction (variable to
//! check, or check to variable) and is a flat arena indexed by the edge ids
//! assigned at graph construction, so per-round updates are allocation free
//! and cache friendly.

use crate::graph::{EdgeId, NodeId, TannerGraph};

/// Sign and magnitude decomposition of a variable node message.
///
/// `negative` carries `value < 0`: a negative message leans toward bit
/// value 1, following the usual LLR sign convention.
///
/// # Examples
/// ```
/// # use ldpc_bp::message::SignMagnitude;
/// let msg = SignMagnitude::from_value(-2.5);
/// assert!(msg.negative);
/// assert_eq!(msg.magnitude, 2.5);
/// assert_eq!(msg.value(), -2.5);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SignMagnitude {
    /// Whether the message leans toward bit value 1.
    pub negative: bool,
    /// Absolute value of the message.
    pub magnitude: f64,
}

impl SignMagnitude {
    /// Splits a real value into sign and magnitude.
    pub fn from_value(value: f64) -> SignMagnitude {
        SignMagnitude {
            negative: value < 0.0,
            magnitude: value.abs(),
        }
    }

    /// Recombines the sign and magnitude into a signed real.
    pub fn value(&self) -> f64 {
        if self.negative {
            -self.magnitude
        } else {
            self.magnitude
        }
    }
}

/// A message received at a node, tagged with its sender.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Message<T> {
    /// Node that sent the message.
    pub source: NodeId,
    /// Value of the message.
    pub value: T,
}

/// Most recent message per Tanner graph edge, for one message direction.
///
/// Two snapshots compare equal iff every stored value is exactly equal;
/// there is no floating point tolerance. The stagnation guard of the
/// decoder relies on this.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageStore<T> {
    values: Box<[T]>,
}

impl<T: Copy + Default + PartialEq> MessageStore<T> {
    /// Creates a store with one default-valued slot per edge of the graph.
    pub fn for_graph(graph: &TannerGraph) -> MessageStore<T> {
        MessageStore {
            values: vec![T::default(); graph.num_edges()].into_boxed_slice(),
        }
    }

    /// Overwrites the message on an edge.
    pub fn send(&mut self, edge: EdgeId, value: T) {
        self.values[edge] = value;
    }

    /// Reads the message on an edge.
    pub fn get(&self, edge: EdgeId) -> T {
        self.values[edge]
    }

    /// Overwrites the message between two adjacent nodes.
    ///
    /// # Panics
    /// Panics if `(src, dst)` is not an edge of `graph`.
    pub fn send_between(&mut self, graph: &TannerGraph, src: NodeId, dst: NodeId, value: T) {
        let edge = graph
            .edge_between(src, dst)
            .expect("message endpoints are not adjacent");
        self.send(edge, value);
    }

    /// Iterates over the messages arriving at a node.
    ///
    /// The store covers a single direction, so the inbox of a check node is
    /// only meaningful on the variable-to-check store, and conversely. If
    /// `exclude` is given, the message from that sender is skipped.
    pub fn inbox<'a>(
        &'a self,
        graph: &'a TannerGraph,
        node: NodeId,
        exclude: Option<NodeId>,
    ) -> impl Iterator<Item = Message<T>> + 'a {
        graph
            .links(node)
            .iter()
            .filter(move |link| Some(link.node) != exclude)
            .map(move |link| Message {
                source: link.node,
                value: self.values[link.edge],
            })
    }

    /// Returns a copy of the store for later comparison.
    pub fn snapshot(&self) -> MessageStore<T> {
        self.clone()
    }
}
