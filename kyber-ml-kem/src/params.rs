//! Re-exports the shared parameter-set type. `kyber-ml-kem` adds nothing to
//! it: the module rank, noise widths, compression widths, and byte sizes
//! are entirely defined by [`lattice_core::params::SecurityLevel`].

pub use lattice_core::params::SecurityLevel;
