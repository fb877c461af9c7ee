//! # Reproducible random functions
//!
//! The channel simulations in [`crate::channel`] are generic over any
//! [`rand::Rng`]. This module pins a concrete RNG, [`ChaCha8Rng`] from the
//! [rand_chacha] crate, so that simulated transmissions can be seeded and
//! reproduced exactly.
//!
//! # Examples
//! ```
//! # use ldpc_bp::rand::Rng;
//! # use ldpc_bp::rand::*;
//! let seed = 42;
//! let mut rng = Rng::seed_from_u64(seed);
//! assert_eq!(rng.next_u64(), 12578764544318200737);
//! ```
use rand_chacha::ChaCha8Rng;
pub use rand_chacha::rand_core::SeedableRng;
pub use rand_core::RngCore;

/// The RNG used throughout this crate when reproducible pseudorandom
/// generation is needed.
pub type Rng = ChaCha8Rng;
