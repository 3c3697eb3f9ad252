//! Degree-255 polynomials over R_q and the operations Kyber needs on them:
//! NTT transforms, Montgomery/Barrett reduction, compression, and the
//! message <-> polynomial encoding.

use std::ops::{Add, Sub};

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ntt;
use crate::params::{MONT_R2, N, POLY_BYTES, Q};
use crate::zq::{canonicalize, fqmul};

/// One element of R_q: 256 signed 16-bit coefficients. Not `Copy` so that
/// dropping an owned `Poly` reliably zeroizes secret coefficients (noise,
/// the secret vector, message polynomials) rather than leaving a stale copy.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Poly {
    pub coeffs: [i16; N],
}

impl Poly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Poly { coeffs: [0; N] }
    }

    /// Wraps a coefficient array directly (used by deserialization).
    pub fn from_coeffs(coeffs: [i16; N]) -> Self {
        Poly { coeffs }
    }

    /// Forward NTT, in place.
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
    }

    /// Inverse NTT, in place.
    pub fn inv_ntt(&mut self) {
        ntt::inv_ntt(&mut self.coeffs);
    }

    /// NTT-domain pointwise product; result is in Montgomery form.
    pub fn pointwise_mul(&self, other: &Poly) -> Poly {
        Poly::from_coeffs(ntt::pointwise_mul(&self.coeffs, &other.coeffs))
    }

    /// Barrett-reduces every coefficient to (-q/2, q/2].
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = crate::zq::barrett_reduce(*c);
        }
    }

    /// Canonicalizes every coefficient into [0, q). Applied defensively
    /// before any byte serialization, since `reduce` alone only guarantees
    /// the centered range.
    pub fn canonicalize(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = canonicalize(*c);
        }
    }

    /// Multiplies every coefficient by R^2 mod q, entering Montgomery form.
    pub fn to_mont(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = fqmul(*c, MONT_R2);
        }
    }

    /// Packs 256 canonical (`[0, q)`) coefficients into 384 bytes, 12 bits
    /// per coefficient, two coefficients to three bytes.
    pub fn to_bytes(&self) -> [u8; POLY_BYTES] {
        let mut canon = self.clone();
        canon.canonicalize();
        let vals: Vec<u16> = canon.coeffs.iter().map(|&c| c as u16).collect();
        let packed = pack_bits(&vals, 12);
        let mut out = [0u8; POLY_BYTES];
        out.copy_from_slice(&packed);
        out
    }

    /// Inverse of [`Poly::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert_eq!(bytes.len(), POLY_BYTES, "polynomial encoding must be 384 bytes");
        let vals = unpack_bits(bytes, 12, N);
        let mut coeffs = [0i16; N];
        for (i, v) in vals.into_iter().enumerate() {
            coeffs[i] = v as i16;
        }
        Poly { coeffs }
    }

    /// Lossy compression to `d` bits per coefficient:
    /// c' = floor((c * 2^d + q/2) / q) mod 2^d.
    pub fn compress(&self, d: usize) -> Vec<u8> {
        let scale = 1i32 << d;
        let q = Q as i32;
        let vals: Vec<u16> = self
            .coeffs
            .iter()
            .map(|&c| {
                let cc = canonicalize(c) as i32;
                (((cc * scale + q / 2) / q) % scale) as u16
            })
            .collect();
        pack_bits(&vals, d)
    }

    /// Inverse of [`Poly::compress`]: c = floor((c' * q + 2^(d-1)) / 2^d).
    pub fn decompress(bytes: &[u8], d: usize) -> Self {
        let scale = 1i32 << d;
        let q = Q as i32;
        let vals = unpack_bits(bytes, d, N);
        let mut coeffs = [0i16; N];
        for (i, v) in vals.into_iter().enumerate() {
            coeffs[i] = ((v as i32 * q + scale / 2) / scale) as i16;
        }
        Poly { coeffs }
    }

    /// Encodes a 32-byte message: bit 1 becomes floor((q+1)/2) = 1665,
    /// bit 0 becomes 0.
    pub fn from_msg(msg: &[u8; 32]) -> Self {
        const Q_HALF: i16 = (Q + 1) / 2;
        let mut coeffs = [0i16; N];
        for i in 0..N {
            let bit = (msg[i / 8] >> (i % 8)) & 1;
            coeffs[i] = if bit == 1 { Q_HALF } else { 0 };
        }
        Poly { coeffs }
    }

    /// Decodes a polynomial back to a 32-byte message: each coefficient is
    /// canonicalized, then mapped to the nearer of {0, q/2}.
    pub fn to_msg(&self) -> [u8; 32] {
        let mut msg = [0u8; 32];
        let q = Q as i32;
        for i in 0..N {
            let c = canonicalize(self.coeffs[i]) as i32;
            let bit = (((c << 1) + q / 2) / q) & 1;
            msg[i / 8] |= (bit as u8) << (i % 8);
        }
        msg
    }
}

impl Add<&Poly> for &Poly {
    type Output = Poly;

    fn add(self, rhs: &Poly) -> Poly {
        let mut coeffs = [0i16; N];
        for i in 0..N {
            coeffs[i] = self.coeffs[i].wrapping_add(rhs.coeffs[i]);
        }
        Poly { coeffs }
    }
}

impl Sub<&Poly> for &Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        let mut coeffs = [0i16; N];
        for i in 0..N {
            coeffs[i] = self.coeffs[i].wrapping_sub(rhs.coeffs[i]);
        }
        Poly { coeffs }
    }
}

/// Packs little-endian `bits`-wide lanes into a byte stream, LSB first.
/// Used uniformly for the 12-bit polynomial encoding and the du/dv
/// ciphertext compression, since both are the same bitstream scheme at
/// different widths.
pub fn pack_bits(vals: &[u16], bits: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity((vals.len() * bits + 7) / 8);
    let mut acc: u32 = 0;
    let mut acc_bits = 0usize;
    for &v in vals {
        acc |= (v as u32) << acc_bits;
        acc_bits += bits;
        while acc_bits >= 8 {
            out.push((acc & 0xFF) as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out.push((acc & 0xFF) as u8);
    }
    out
}

/// Inverse of [`pack_bits`]: reads `count` lanes of `bits` width.
pub fn unpack_bits(bytes: &[u8], bits: usize, count: usize) -> Vec<u16> {
    let mask = (1u32 << bits) - 1;
    let mut out = Vec::with_capacity(count);
    let mut acc: u32 = 0;
    let mut acc_bits = 0usize;
    let mut iter = bytes.iter();
    for _ in 0..count {
        while acc_bits < bits {
            let byte = *iter.next().expect("not enough bytes to unpack") as u32;
            acc |= byte << acc_bits;
            acc_bits += 8;
        }
        out.push((acc & mask) as u16);
        acc >>= bits;
        acc_bits -= bits;
    }
    out
}
