//! # Belief propagation LDPC decoder
//!
//! This module drives the decoding of a received word: it validates the
//! observation against the code, obtains the channel LLRs, runs the
//! min-sum message passing engine over the Tanner graph, and assembles the
//! final result.
//!
//! Failing to converge is not an error: the decoder always returns its
//! best-effort hard decision together with the convergence flag and the
//! per-check pass/fail list, and the caller decides what to do with a word
//! that still fails some checks. Hard errors (wrong observation length,
//! observation/channel mismatches) are detected before any message
//! passing begins.

mod engine;

use crate::channel::{self, ChannelModel, Observation};
use crate::graph::TannerGraph;
use engine::BeliefPropagation;
use thiserror::Error;

/// Decoder error.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum Error {
    /// The observation length differs from the code length.
    #[error("observation has {actual} entries, but the code length is {expected}")]
    DimensionMismatch {
        /// The code length.
        expected: usize,
        /// Length of the observation that was given.
        actual: usize,
    },
    /// The channel model rejected its configuration or the observation.
    #[error(transparent)]
    Channel(#[from] channel::Error),
}

/// A [`Result`] type using the decoder [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Reason the decoding loop stopped.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Termination {
    /// Every parity check is satisfied by the hard decision.
    Converged,
    /// The messages repeated a previous round's exactly; the iteration
    /// reached a steady state without satisfying every check.
    Stalled,
    /// The iteration cap was reached without satisfying every check.
    MaxIterationsExceeded,
}

/// Result of a decode run.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DecodeOutput {
    /// Hard decision on every code bit.
    pub codeword: Vec<u8>,
    /// Whether `codeword` satisfies every parity check.
    pub converged: bool,
    /// Number of message passing rounds used.
    pub iterations: usize,
    /// Pass/fail status of each parity check against `codeword`.
    pub check_results: Vec<bool>,
    /// Reason the round loop stopped.
    pub termination: Termination,
}

/// Iterative min-sum belief propagation decoder.
///
/// A decoder owns the Tanner graph of the code and the channel model used
/// to turn observations into LLRs. Each call to [`Decoder::fit`] is an
/// independent decode: no state is carried across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoder {
    graph: TannerGraph,
    channel: ChannelModel,
}

impl Decoder {
    /// Iteration cap used by callers that have no better policy.
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    /// Creates a decoder from a Tanner graph and a channel model.
    pub fn new(graph: TannerGraph, channel: ChannelModel) -> Decoder {
        Decoder { graph, channel }
    }

    /// Returns the Tanner graph of the code.
    pub fn graph(&self) -> &TannerGraph {
        &self.graph
    }

    /// Returns the channel model.
    pub fn channel(&self) -> &ChannelModel {
        &self.channel
    }

    /// Decodes an observed word.
    ///
    /// The observation must match the channel model (bits for the BSC,
    /// real samples for AWGN) and have one entry per code bit. At most
    /// `max_iterations` message passing rounds are run.
    ///
    /// If the hard decision on the channel LLRs alone already satisfies
    /// every parity check, the word is returned as converged with zero
    /// iterations.
    ///
    /// # Errors
    /// Fails on an observation of the wrong length or kind, or containing
    /// non-bits for a BSC model. Non-convergence is reported through
    /// [`DecodeOutput::converged`], not as an error.
    pub fn fit(&self, observation: &Observation, max_iterations: usize) -> Result<DecodeOutput> {
        let n = self.graph.num_variables();
        if observation.len() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: observation.len(),
            });
        }
        let llrs = self.channel.llrs(observation)?;
        let guess = hard_decisions(&llrs);
        let check_results = self.graph.check_results(&guess);
        if check_results.iter().all(|&ok| ok) {
            // No bit errors case
            return Ok(DecodeOutput {
                codeword: guess,
                converged: true,
                iterations: 0,
                check_results,
                termination: Termination::Converged,
            });
        }
        let mut engine = BeliefPropagation::new(&self.graph, &llrs);
        let (termination, iterations) = engine.run(max_iterations);
        let codeword = engine.into_hard_decisions();
        let check_results = self.graph.check_results(&codeword);
        Ok(DecodeOutput {
            converged: termination == Termination::Converged,
            codeword,
            iterations,
            check_results,
            termination,
        })
    }
}

fn hard_decisions(llrs: &[f64]) -> Vec<u8> {
    llrs.iter().map(|&llr| u8::from(llr < 0.0)).collect()
}
