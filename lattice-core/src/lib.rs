//! Ring arithmetic primitives for a Kyber-style module-lattice cryptosystem:
//! field operations mod q=3329, the negacyclic NTT, polynomial and
//! polynomial-vector layers, XOF-backed sampling, and public-matrix
//! generation. This crate has no notion of keys, ciphertexts, or the IND-CPA
//! operations built from these pieces — see the `kyber-ml-kem` crate.

pub mod hashing;
pub mod ntt;
pub mod params;
pub mod polynomial;
pub mod sampling;
pub mod vector_matrix;
pub mod zq;
