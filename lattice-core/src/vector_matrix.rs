//! Vectors of k polynomials, and deterministic generation of the k×k
//! public matrix A from a 32-byte seed.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::hashing::{MatrixXof, SHAKE128_RATE};
use crate::params::N;
use crate::polynomial::Poly;
use crate::sampling::rej_uniform;

/// A vector of k ring elements, e.g. the secret vector s or the public
/// vector t.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PolyVec {
    pub polys: Vec<Poly>,
}

impl PolyVec {
    /// A vector of k zero polynomials.
    pub fn zero(k: usize) -> Self {
        PolyVec {
            polys: (0..k).map(|_| Poly::zero()).collect(),
        }
    }

    /// Module rank of this vector.
    pub fn k(&self) -> usize {
        self.polys.len()
    }

    /// Forward NTT on every entry, in place.
    pub fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    /// Inverse NTT on every entry, in place.
    pub fn inv_ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.inv_ntt();
        }
    }

    /// Barrett-reduces every entry, in place.
    pub fn reduce(&mut self) {
        for p in self.polys.iter_mut() {
            p.reduce();
        }
    }

    /// Entrywise addition.
    pub fn add(&self, other: &PolyVec) -> PolyVec {
        assert_eq!(self.k(), other.k(), "vector ranks must match");
        PolyVec {
            polys: self
                .polys
                .iter()
                .zip(&other.polys)
                .map(|(a, b)| a + b)
                .collect(),
        }
    }

    /// NTT-domain dot product: sum_i self[i] ∘ other[i], where ∘ is the
    /// pointwise product. Result is in Montgomery form.
    pub fn pointwise_acc_montgomery(&self, other: &PolyVec) -> Poly {
        assert_eq!(self.k(), other.k(), "vector ranks must match");
        let mut acc = self.polys[0].pointwise_mul(&other.polys[0]);
        for i in 1..self.k() {
            let term = self.polys[i].pointwise_mul(&other.polys[i]);
            acc = &acc + &term;
        }
        acc
    }

    /// Concatenated 12-bit-per-coefficient encoding of every entry.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.k() * crate::params::POLY_BYTES);
        for p in &self.polys {
            out.extend_from_slice(&p.to_bytes());
        }
        out
    }

    /// Inverse of [`PolyVec::to_bytes`].
    pub fn from_bytes(bytes: &[u8], k: usize) -> Self {
        let poly_bytes = crate::params::POLY_BYTES;
        assert_eq!(bytes.len(), k * poly_bytes, "polyvec encoding has the wrong length");
        let polys = (0..k)
            .map(|i| Poly::from_bytes(&bytes[i * poly_bytes..(i + 1) * poly_bytes]))
            .collect();
        PolyVec { polys }
    }

    /// Compresses every entry to `d` bits per coefficient and concatenates.
    pub fn compress(&self, d: usize) -> Vec<u8> {
        let mut out = Vec::new();
        for p in &self.polys {
            out.extend_from_slice(&p.compress(d));
        }
        out
    }

    /// Inverse of [`PolyVec::compress`].
    pub fn decompress(bytes: &[u8], d: usize, k: usize) -> Self {
        let chunk = (N * d + 7) / 8;
        assert_eq!(bytes.len(), k * chunk, "compressed polyvec has the wrong length");
        let polys = (0..k)
            .map(|i| Poly::decompress(&bytes[i * chunk..(i + 1) * chunk], d))
            .collect();
        PolyVec { polys }
    }
}

/// Generates the deterministic k×k public matrix A from a 32-byte seed.
/// `A[i][j]` is produced in NTT form directly from rejection-sampled XOF
/// output (it is never run through `ntt` afterward — the samples are the
/// NTT-domain representation by construction).
///
/// `transposed` selects the suffix order fed to SHAKE-128: non-transposed
/// uses `(j, i)`, transposed uses `(i, j)`, so that
/// `generate_matrix(seed, true)[i][j] == generate_matrix(seed, false)[j][i]`.
pub fn generate_matrix(seed: &[u8; 32], k: usize, transposed: bool) -> Vec<Vec<Poly>> {
    log::trace!("expanding {k}x{k} public matrix from seed (transposed={transposed})");
    (0..k)
        .map(|i| {
            (0..k)
                .map(|j| {
                    let (x, y) = if transposed { (i, j) } else { (j, i) };
                    generate_uniform_poly(seed, x as u8, y as u8)
                })
                .collect()
        })
        .collect()
}

fn generate_uniform_poly(seed: &[u8; 32], x: u8, y: u8) -> Poly {
    let mut xof = MatrixXof::new(seed, x, y);
    let mut coeffs = [0i16; N];
    let mut filled = 0usize;

    // Three rate blocks up front covers the common case; acceptance
    // probability is q/4096, so 504 bytes yields ~409 candidates for 256 slots.
    let mut buf = Vec::with_capacity(3 * SHAKE128_RATE);
    for _ in 0..3 {
        buf.extend_from_slice(&xof.squeeze_block());
    }
    rej_uniform(&buf, &mut coeffs, &mut filled);

    while filled < N {
        let block = xof.squeeze_block();
        rej_uniform(&block, &mut coeffs, &mut filled);
    }

    Poly::from_coeffs(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_matrix_transpose_matches_entrywise() {
        let seed = [0u8; 32];
        let k = 3;
        let a = generate_matrix(&seed, k, false);
        let a_t = generate_matrix(&seed, k, true);
        for i in 0..k {
            for j in 0..k {
                assert_eq!(
                    a_t[i][j].coeffs, a[j][i].coeffs,
                    "A^T[{i}][{j}] should equal A[{j}][{i}]"
                );
            }
        }
    }

    #[test]
    fn generate_matrix_is_deterministic_in_seed() {
        let seed = [9u8; 32];
        let a1 = generate_matrix(&seed, 2, false);
        let a2 = generate_matrix(&seed, 2, false);
        assert_eq!(a1[0][0].coeffs, a2[0][0].coeffs);
        assert_eq!(a1[1][0].coeffs, a2[1][0].coeffs);
    }

    #[test]
    fn polyvec_to_bytes_from_bytes_roundtrips() {
        let mut v = PolyVec::zero(2);
        for (i, c) in v.polys[0].coeffs.iter_mut().enumerate() {
            *c = (i as i16) % 3329;
        }
        for (i, c) in v.polys[1].coeffs.iter_mut().enumerate() {
            *c = ((i as i16) * 3) % 3329;
        }
        let bytes = v.to_bytes();
        let back = PolyVec::from_bytes(&bytes, 2);
        assert_eq!(back.polys[0].coeffs, v.polys[0].coeffs);
        assert_eq!(back.polys[1].coeffs, v.polys[1].coeffs);
    }
}
