//! Modular arithmetic mod q = 3329 on signed 16-bit coefficients.
//!
//! This is the leaf of the whole stack: every other module reduces to calls
//! into `montgomery_reduce`, `barrett_reduce`, and `fqmul`. All three are
//! written against fixed-width integers and the exact constants from the
//! parameter tables — no floating point, no runtime-computed reciprocal.

use crate::params::{BARRETT_V, Q, QINV};

/// Montgomery reduction: given a in [-q*R/2, q*R/2) with R = 2^16, returns
/// t with t ≡ a * R^-1 (mod q) and |t| < q.
///
/// `montgomery_reduce(x * R) mod q == x mod q` for all signed 16-bit x.
pub fn montgomery_reduce(a: i32) -> i16 {
    let u = (a as u32).wrapping_mul(QINV) as u16 as i16;
    let t = a.wrapping_sub((u as i32) * (Q as i32));
    (t >> 16) as i16
}

/// Barrett reduction: maps any signed 16-bit a to a representative in
/// (-q/2, q/2] congruent to a mod q, using the precomputed reciprocal
/// instead of a division.
pub fn barrett_reduce(a: i16) -> i16 {
    let t = (((BARRETT_V * a as i32) >> 26) as i16) as i32 * Q as i32;
    a.wrapping_sub(t as i16)
}

/// Conditionally adds q to a centered representative in (-q, q) so the
/// result lands in [0, q). Written as a branch-free arithmetic shift rather
/// than an `if`, since callers may apply it to secret coefficients.
pub fn canonicalize(a: i16) -> i16 {
    let mut r = a;
    r += (r >> 15) & Q;
    r
}

/// Montgomery multiply: `montgomery_reduce(a * b)`.
pub fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce(a as i32 * b as i32)
}
