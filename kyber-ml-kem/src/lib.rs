//! The Kyber/ML-KEM IND-CPA public-key encryption scheme, built from the
//! ring-arithmetic primitives in `lattice-core`.
//!
//! KeyGen, Encrypt, and Decrypt live in [`cpa`]. There is no CCA-secure KEM
//! wrapper, transport encoding, or CLI here — this crate's public interface
//! stops at the IND-CPA primitive.

pub mod cpa;
pub mod params;
