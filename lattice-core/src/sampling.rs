//! Rejection sampling of uniform ring elements from a SHAKE-128 stream, and
//! centered-binomial noise sampling from a SHAKE-256 PRF stream.

use crate::params::{N, Q};
use crate::polynomial::Poly;

/// Scans `buf` in 3-byte groups, each yielding two 12-bit candidates,
/// appending every candidate `< q` to `coeffs` starting at `*filled` and
/// stopping once `coeffs` is full. Since acceptance probability is
/// q/4096 ≈ 0.813, callers squeeze more input and call this again until
/// `*filled == N`.
pub fn rej_uniform(buf: &[u8], coeffs: &mut [i16; N], filled: &mut usize) {
    let mut i = 0;
    while i + 3 <= buf.len() && *filled < N {
        let d1 = (buf[i] as u16 | ((buf[i + 1] as u16 & 0x0F) << 8)) as i16;
        let d2 = ((buf[i + 1] as u16 >> 4) | ((buf[i + 2] as u16) << 4)) as i16;

        if (d1 as i32) < Q as i32 && *filled < N {
            coeffs[*filled] = d1;
            *filled += 1;
        }
        if (d2 as i32) < Q as i32 && *filled < N {
            coeffs[*filled] = d2;
            *filled += 1;
        }
        i += 3;
    }
}

/// Centered binomial sample with width eta=2 from a `2*N/4`-byte buffer.
fn cbd2(buf: &[u8]) -> Poly {
    let mut coeffs = [0i16; N];
    for i in 0..N / 8 {
        let t = u32::from_le_bytes(buf[4 * i..4 * i + 4].try_into().unwrap());
        let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
        for j in 0..8 {
            let a = ((d >> (4 * j)) & 0x3) as i16;
            let b = ((d >> (4 * j + 2)) & 0x3) as i16;
            coeffs[8 * i + j] = a - b;
        }
    }
    Poly::from_coeffs(coeffs)
}

/// Centered binomial sample with width eta=3 from a `3*N/4`-byte buffer.
fn cbd3(buf: &[u8]) -> Poly {
    let mut coeffs = [0i16; N];
    for i in 0..N / 4 {
        let b0 = buf[3 * i] as u32;
        let b1 = buf[3 * i + 1] as u32;
        let b2 = buf[3 * i + 2] as u32;
        let t = b0 | (b1 << 8) | (b2 << 16);
        let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as i16;
            let b = ((d >> (6 * j + 3)) & 0x7) as i16;
            coeffs[4 * i + j] = a - b;
        }
    }
    Poly::from_coeffs(coeffs)
}

/// Samples a noise polynomial from PRF(seed, nonce) via the centered
/// binomial distribution of width `eta` (2 or 3).
pub fn poly_from_noise(buf: &[u8], eta: usize) -> Poly {
    match eta {
        2 => {
            assert_eq!(buf.len(), 2 * N / 4, "cbd2 input must be 2*n/4 bytes");
            cbd2(buf)
        }
        3 => {
            assert_eq!(buf.len(), 3 * N / 4, "cbd3 input must be 3*n/4 bytes");
            cbd3(buf)
        }
        other => panic!("unsupported noise width eta={other}, expected 2 or 3"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rej_uniform_accepts_below_q_and_stops_when_full() {
        // bytes chosen so every 12-bit lane is well below q=3329.
        let buf = vec![0x01u8, 0x00, 0x02, 0x03, 0x00, 0x04];
        let mut coeffs = [0i16; N];
        let mut filled = 0usize;
        rej_uniform(&buf, &mut coeffs, &mut filled);
        assert_eq!(filled, 4);
        assert!(coeffs[..4].iter().all(|&c| (c as i32) < Q as i32));
    }

    #[test]
    fn rej_uniform_never_overfills_the_output() {
        let buf = vec![0xFFu8; 3000];
        let mut coeffs = [0i16; N];
        let mut filled = 0usize;
        rej_uniform(&buf, &mut coeffs, &mut filled);
        assert!(filled <= N);
    }

    #[test]
    fn cbd_eta2_stays_within_minus_two_to_two() {
        let buf = vec![0xA5u8; 2 * N / 4];
        let poly = poly_from_noise(&buf, 2);
        assert!(poly.coeffs.iter().all(|&c| (-2..=2).contains(&c)));
    }

    #[test]
    fn cbd_eta3_stays_within_minus_three_to_three() {
        let buf = vec![0x3Cu8; 3 * N / 4];
        let poly = poly_from_noise(&buf, 3);
        assert!(poly.coeffs.iter().all(|&c| (-3..=3).contains(&c)));
    }

    #[test]
    fn cbd_of_zero_bytes_is_the_zero_polynomial() {
        let buf = vec![0u8; 2 * N / 4];
        let poly = poly_from_noise(&buf, 2);
        assert!(poly.coeffs.iter().all(|&c| c == 0));
    }
}
