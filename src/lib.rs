//! # ldpc-bp
//!
//! `ldpc_bp` implements iterative belief propagation decoding of binary LDPC
//! (low-density parity-check) codes. The decoder passes messages over the
//! bipartite Tanner graph of the code, using the min-sum approximation for
//! the check node update, and stops when every parity check is satisfied,
//! when the messages reach a steady state, or when an iteration cap is hit.
//!
//! The Tanner graph is built from the supports of the rows of the parity
//! check matrix; how those supports are produced (random constructions,
//! quasi-cyclic codes, product codes) is left to external producers.
//!
//! # Examples
//!
//! Decoding example 2.5 of Sarah J. Johnson, *Iterative Error Correction*:
//!
//! ```
//! use ldpc_bp::channel::{ChannelModel, Observation};
//! use ldpc_bp::decoder::Decoder;
//! use ldpc_bp::graph::TannerGraph;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = TannerGraph::new(&[[0, 1, 3], [1, 2, 4], [0, 4, 5], [2, 3, 5]])?;
//! let channel = ChannelModel::bsc(0.2)?;
//! let decoder = Decoder::new(graph, channel);
//! let received = Observation::Bits(vec![1, 0, 1, 0, 1, 1]);
//! let output = decoder.fit(&received, Decoder::DEFAULT_MAX_ITERATIONS)?;
//! assert!(output.converged);
//! assert_eq!(output.codeword, [0, 0, 1, 0, 1, 1]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod channel;
pub mod decoder;
pub mod graph;
pub mod message;
pub mod rand;
