//! Property-based tests for the universally-quantified invariants called
//! out in the component design: Barrett/Montgomery reduction bounds, the
//! polynomial byte encoding, and the NTT round trip.

use lattice_core::ntt::{inv_ntt, ntt};
use lattice_core::params::Q;
use lattice_core::polynomial::Poly;
use lattice_core::zq::{barrett_reduce, canonicalize, montgomery_reduce};
use proptest::prelude::*;

proptest! {
    #[test]
    fn barrett_reduce_is_congruent_and_bounded(a in any::<i16>()) {
        let r = barrett_reduce(a);
        prop_assert!(r.unsigned_abs() as i32 <= Q as i32);
        prop_assert_eq!(
            (r as i32).rem_euclid(Q as i32),
            (a as i32).rem_euclid(Q as i32)
        );
    }

    #[test]
    fn montgomery_reduce_undoes_r_scaling(x in -3328i32..3328) {
        const R_MOD_Q: i32 = 2285; // 2^16 mod q
        let scaled = x * R_MOD_Q;
        let y = montgomery_reduce(scaled) as i32;
        prop_assert_eq!(y.rem_euclid(Q as i32), x.rem_euclid(Q as i32));
    }

    #[test]
    fn canonicalize_lands_in_zero_q(a in -(Q as i32 - 1)..(Q as i32)) {
        let c = canonicalize(a as i16);
        prop_assert!((0..Q).contains(&c));
    }

    #[test]
    fn poly_to_bytes_from_bytes_is_the_identity(seed in any::<u64>()) {
        let mut coeffs = [0i16; 256];
        let mut state = seed;
        for c in coeffs.iter_mut() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            *c = ((state >> 33) % Q as u64) as i16;
        }
        let poly = Poly::from_coeffs(coeffs);
        let back = Poly::from_bytes(&poly.to_bytes());
        prop_assert_eq!(back.coeffs, coeffs);
    }

    #[test]
    fn inv_ntt_after_ntt_is_identity_up_to_reduction(seed in any::<u64>()) {
        let mut coeffs = [0i16; 256];
        let mut state = seed;
        for c in coeffs.iter_mut() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            *c = ((state >> 33) % Q as u64) as i16;
        }
        let original = coeffs;

        ntt(&mut coeffs);
        inv_ntt(&mut coeffs);

        for i in 0..256 {
            let got = canonicalize(barrett_reduce(coeffs[i]));
            let want = canonicalize(original[i]);
            prop_assert_eq!(got, want);
        }
    }

    #[test]
    fn compress_decompress_error_is_bounded(d in prop_oneof![Just(4usize), Just(5), Just(10), Just(11)], seed in any::<u64>()) {
        let mut coeffs = [0i16; 256];
        let mut state = seed;
        for c in coeffs.iter_mut() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            *c = ((state >> 33) % Q as u64) as i16;
        }
        let poly = Poly::from_coeffs(coeffs);
        let back = Poly::decompress(&poly.compress(d), d);

        let max_err = (Q as i32) / (1i32 << (d + 1)) + 1;
        for i in 0..256 {
            let orig = canonicalize(coeffs[i]) as i32;
            let got = back.coeffs[i] as i32;
            let raw_diff = (orig - got).abs();
            let diff = raw_diff.min(Q as i32 - raw_diff);
            prop_assert!(diff <= max_err, "d={} coeff {} diff {} > {}", d, i, diff, max_err);
        }
    }
}
