//! # Channel models
//!
//! This module converts a received word into the initial log-likelihood
//! ratios consumed by the decoder, for either a binary symmetric channel
//! (BSC) or an AWGN channel, and simulates transmission of a codeword
//! through those channels.
//!
//! The LLR sign convention is the usual one: a positive LLR means bit 0 is
//! the more likely value, a negative LLR means bit 1, and the magnitude
//! carries the confidence.

use crate::graph::TannerGraph;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

/// Channel model error.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum Error {
    /// The BSC crossover probability is outside the open interval (0, 1).
    #[error("crossover probability must be in the open interval (0, 1), got {0}")]
    CrossoverProbability(f64),
    /// The AWGN signal-to-noise ratio is not a positive finite number.
    #[error("SNR must be a positive finite number, got {0}")]
    SignalToNoiseRatio(f64),
    /// The observation kind does not match the channel model.
    #[error("observation kind does not match the channel model")]
    ObservationMismatch,
    /// A BSC observation contains a value that is not a bit.
    #[error("BSC observation contains {0}, which is not a bit")]
    InvalidObservation(u8),
    /// A word to transmit does not have the code length.
    #[error("expected a word of {expected} bits, got {actual}")]
    WrongLength {
        /// The code length.
        expected: usize,
        /// Length of the word that was given.
        actual: usize,
    },
    /// A word to transmit does not satisfy every parity check.
    #[error("the word to transmit does not satisfy every parity check")]
    NotACodeword,
}

/// A [`Result`] type using the channel [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Received word, matching the sample type of the channel it came through.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// Hard bits received over a binary symmetric channel.
    Bits(Vec<u8>),
    /// Real-valued samples received over an AWGN channel.
    Samples(Vec<f64>),
}

impl Observation {
    /// Returns the number of channel uses in the observation.
    pub fn len(&self) -> usize {
        match self {
            Observation::Bits(bits) => bits.len(),
            Observation::Samples(samples) => samples.len(),
        }
    }

    /// Returns `true` if the observation contains no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Noise model of the channel the codeword went through.
///
/// Constructed through [`ChannelModel::bsc`] or [`ChannelModel::awgn`], so
/// that an invalid parameter is rejected before any decoding starts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChannelModel {
    kind: Kind,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Kind {
    Bsc { crossover: f64 },
    Awgn { snr: f64 },
}

impl ChannelModel {
    /// Creates a binary symmetric channel model.
    ///
    /// `crossover` is the probability that a transmitted bit is flipped.
    ///
    /// # Errors
    /// Fails unless `0 < crossover < 1`.
    pub fn bsc(crossover: f64) -> Result<ChannelModel> {
        if !(crossover > 0.0 && crossover < 1.0) {
            return Err(Error::CrossoverProbability(crossover));
        }
        Ok(ChannelModel {
            kind: Kind::Bsc { crossover },
        })
    }

    /// Creates an AWGN channel model with a fixed signal-to-noise ratio.
    ///
    /// # Errors
    /// Fails unless `snr` is positive and finite.
    pub fn awgn(snr: f64) -> Result<ChannelModel> {
        if !(snr > 0.0 && snr.is_finite()) {
            return Err(Error::SignalToNoiseRatio(snr));
        }
        Ok(ChannelModel {
            kind: Kind::Awgn { snr },
        })
    }

    /// Computes the initial LLR for every code bit, given an observation.
    ///
    /// For the BSC the LLR is a two-valued lookup on the observed bit:
    /// `-ln(p/(1-p))` for an observed 0 and `-ln((1-p)/p)` for an observed
    /// 1. For the AWGN channel it is `4 * sample * snr`. This is a pure
    /// function of the model and the observation.
    ///
    /// # Examples
    /// ```
    /// # use ldpc_bp::channel::{ChannelModel, Observation};
    /// let channel = ChannelModel::awgn(1.25).unwrap();
    /// let llrs = channel.llrs(&Observation::Samples(vec![-0.1, 0.5])).unwrap();
    /// assert_eq!(llrs, [4.0 * -0.1 * 1.25, 4.0 * 0.5 * 1.25]);
    /// ```
    ///
    /// # Errors
    /// Fails if the observation kind does not match the model, or if a BSC
    /// observation contains a value other than 0 or 1.
    pub fn llrs(&self, observation: &Observation) -> Result<Vec<f64>> {
        match (self.kind, observation) {
            (Kind::Bsc { crossover }, Observation::Bits(bits)) => {
                // LLR of an observed 1; an observed 0 has the opposite sign.
                let one_llr = (crossover / (1.0 - crossover)).ln();
                bits.iter()
                    .map(|&b| match b {
                        0 => Ok(-one_llr),
                        1 => Ok(one_llr),
                        other => Err(Error::InvalidObservation(other)),
                    })
                    .collect()
            }
            (Kind::Awgn { snr }, Observation::Samples(samples)) => {
                Ok(samples.iter().map(|&y| 4.0 * y * snr).collect())
            }
            _ => Err(Error::ObservationMismatch),
        }
    }

    /// Simulates transmission of a codeword through the BSC.
    ///
    /// Each bit is flipped independently with the crossover probability.
    ///
    /// # Errors
    /// Fails if the model is not a BSC, if the word does not have the code
    /// length or contains non-bits, or if it does not satisfy every parity
    /// check of `graph`.
    pub fn simulate_bsc<R: Rng>(
        &self,
        graph: &TannerGraph,
        codeword: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let Kind::Bsc { crossover } = self.kind else {
            return Err(Error::ObservationMismatch);
        };
        validate_codeword(graph, codeword)?;
        Ok(codeword
            .iter()
            .map(|&b| if rng.gen::<f64>() < crossover { b ^ 1 } else { b })
            .collect())
    }

    /// Simulates transmission of a codeword through the AWGN channel.
    ///
    /// Bits are BPSK mapped (0 to +1.0, 1 to -1.0) and real Gaussian noise
    /// is added, with the variance for which the `4 * sample * snr` LLR
    /// formula of [`ChannelModel::llrs`] is exact.
    ///
    /// # Errors
    /// Fails if the model is not AWGN, or under the same word preconditions
    /// as [`ChannelModel::simulate_bsc`].
    pub fn simulate_awgn<R: Rng>(
        &self,
        graph: &TannerGraph,
        codeword: &[u8],
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        let Kind::Awgn { snr } = self.kind else {
            return Err(Error::ObservationMismatch);
        };
        validate_codeword(graph, codeword)?;
        // With y = x + n and n ~ N(0, sigma^2), the exact LLR is
        // 2*y/sigma^2, which equals 4*y*snr when sigma^2 = 1/(2*snr).
        let sigma = (0.5 / snr).sqrt();
        let noise = Normal::new(0.0, sigma).unwrap();
        Ok(codeword
            .iter()
            .map(|&b| {
                let symbol = if b == 0 { 1.0 } else { -1.0 };
                symbol + noise.sample(rng)
            })
            .collect())
    }
}

fn validate_codeword(graph: &TannerGraph, codeword: &[u8]) -> Result<()> {
    if codeword.len() != graph.num_variables() {
        return Err(Error::WrongLength {
            expected: graph.num_variables(),
            actual: codeword.len(),
        });
    }
    if let Some(&bad) = codeword.iter().find(|&&b| b > 1) {
        return Err(Error::InvalidObservation(bad));
    }
    if !graph.is_codeword(codeword) {
        return Err(Error::NotACodeword);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rand::SeedableRng;

    fn graph() -> TannerGraph {
        TannerGraph::new(&[[0, 1, 3], [1, 2, 4], [0, 4, 5], [2, 3, 5]]).unwrap()
    }

    #[test]
    fn bsc_llrs() {
        let channel = ChannelModel::bsc(0.1).unwrap();
        let llrs = channel
            .llrs(&Observation::Bits(vec![0, 1, 0]))
            .unwrap();
        // p = 0.1 gives |llr| = ln 9 for every bit.
        let magnitude = 9.0f64.ln();
        assert!((llrs[0] - magnitude).abs() < 1e-12);
        assert!((llrs[1] + magnitude).abs() < 1e-12);
        assert_eq!(llrs[0], llrs[2]);
        assert_eq!(llrs[0], -llrs[1]);
    }

    #[test]
    fn awgn_llrs() {
        let channel = ChannelModel::awgn(1.25).unwrap();
        let samples = vec![-0.1, 0.5, -0.8, 1.0, -0.7, 0.5];
        let llrs = channel.llrs(&Observation::Samples(samples.clone())).unwrap();
        for (llr, y) in llrs.iter().zip(samples.iter()) {
            assert_eq!(*llr, 4.0 * y * 1.25);
        }
    }

    #[test]
    fn invalid_crossover_probability() {
        for p in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            assert!(matches!(
                ChannelModel::bsc(p),
                Err(Error::CrossoverProbability(_))
            ));
        }
    }

    #[test]
    fn invalid_snr() {
        for snr in [0.0, -1.25, f64::INFINITY, f64::NAN] {
            assert!(matches!(
                ChannelModel::awgn(snr),
                Err(Error::SignalToNoiseRatio(_))
            ));
        }
    }

    #[test]
    fn observation_kind_must_match() {
        let bsc = ChannelModel::bsc(0.2).unwrap();
        let awgn = ChannelModel::awgn(1.25).unwrap();
        assert_eq!(
            bsc.llrs(&Observation::Samples(vec![0.5])),
            Err(Error::ObservationMismatch)
        );
        assert_eq!(
            awgn.llrs(&Observation::Bits(vec![0])),
            Err(Error::ObservationMismatch)
        );
    }

    #[test]
    fn non_bit_observation() {
        let channel = ChannelModel::bsc(0.2).unwrap();
        assert_eq!(
            channel.llrs(&Observation::Bits(vec![0, 2, 1])),
            Err(Error::InvalidObservation(2))
        );
    }

    #[test]
    fn simulate_bsc_preconditions() {
        let graph = graph();
        let channel = ChannelModel::bsc(0.2).unwrap();
        let mut rng = crate::rand::Rng::seed_from_u64(0);
        assert_eq!(
            channel.simulate_bsc(&graph, &[1, 0, 1, 0, 1, 1], &mut rng),
            Err(Error::NotACodeword)
        );
        assert_eq!(
            channel.simulate_bsc(&graph, &[0, 0, 1], &mut rng),
            Err(Error::WrongLength {
                expected: 6,
                actual: 3,
            })
        );
        let awgn = ChannelModel::awgn(1.25).unwrap();
        assert_eq!(
            awgn.simulate_bsc(&graph, &[0; 6], &mut rng),
            Err(Error::ObservationMismatch)
        );
    }

    #[test]
    fn simulate_bsc_produces_bits() {
        let graph = graph();
        let channel = ChannelModel::bsc(0.5).unwrap();
        let mut rng = crate::rand::Rng::seed_from_u64(42);
        let word = channel
            .simulate_bsc(&graph, &[0, 0, 1, 0, 1, 1], &mut rng)
            .unwrap();
        assert_eq!(word.len(), 6);
        assert!(word.iter().all(|&b| b <= 1));
    }

    #[test]
    fn simulate_awgn_high_snr_keeps_signs() {
        let graph = graph();
        let channel = ChannelModel::awgn(1e6).unwrap();
        let mut rng = crate::rand::Rng::seed_from_u64(7);
        let codeword = [0, 0, 1, 0, 1, 1];
        let samples = channel.simulate_awgn(&graph, &codeword, &mut rng).unwrap();
        assert_eq!(samples.len(), 6);
        for (y, &b) in samples.iter().zip(codeword.iter()) {
            let hard = u8::from(*y < 0.0);
            assert_eq!(hard, b);
        }
    }
}
