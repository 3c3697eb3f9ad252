//! Thin wrappers over the `sha3` crate's hash and XOF primitives. Per the
//! scope of this core, SHA3-256, SHA3-512, SHAKE-128, and SHAKE-256 are
//! treated as external byte-in/byte-out collaborators — nothing here
//! reimplements Keccak.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_512, Shake128, Shake256};

/// SHAKE-128 block rate in bytes, used by matrix generation to squeeze one
/// rate's worth of output per read.
pub const SHAKE128_RATE: usize = 168;

/// SHA3-512(data), split by the caller into the public seed and noise seed.
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();
    Digest::update(&mut hasher, data);
    hasher.finalize().into()
}

/// An incremental SHAKE-128 squeezer absorbing `seed || x || y`, read one
/// rate block (168 bytes) at a time as matrix generation needs more
/// candidate coefficients.
pub struct MatrixXof {
    reader: <Shake128 as ExtendableOutput>::Reader,
}

impl MatrixXof {
    /// Absorbs `seed || x || y` and prepares to squeeze.
    pub fn new(seed: &[u8; 32], x: u8, y: u8) -> Self {
        let mut hasher = Shake128::default();
        Update::update(&mut hasher, seed);
        Update::update(&mut hasher, &[x, y]);
        MatrixXof {
            reader: hasher.finalize_xof(),
        }
    }

    /// Squeezes the next rate block.
    pub fn squeeze_block(&mut self) -> [u8; SHAKE128_RATE] {
        let mut out = [0u8; SHAKE128_RATE];
        self.reader.read(&mut out);
        out
    }
}

/// PRF(seed, nonce) = SHAKE-256(seed || nonce), producing `out_len` bytes.
/// `nonce` is a single byte, matching the 33-byte XOF input the noise
/// sampler feeds in.
pub fn prf(seed: &[u8; 32], nonce: u8, out_len: usize) -> Vec<u8> {
    let mut hasher = Shake256::default();
    Update::update(&mut hasher, seed);
    Update::update(&mut hasher, &[nonce]);
    let mut reader = hasher.finalize_xof();
    let mut out = vec![0u8; out_len];
    reader.read(&mut out);
    out
}
