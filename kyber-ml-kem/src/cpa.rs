//! IND-CPA-secure public-key encryption: KeyGen, Encrypt, Decrypt.
//!
//! This is the module-LWE core only. A CCA-secure KEM wrapper around these
//! three operations (the usual Fujisaki-Okamoto transform), transport
//! encodings, and a CLI are all out of scope here — they belong one layer up,
//! on top of this crate's public interface.

use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use lattice_core::hashing::{prf, sha3_512};
use lattice_core::params::{N, SYM_BYTES};
use lattice_core::polynomial::Poly;
use lattice_core::sampling::poly_from_noise;
use lattice_core::vector_matrix::{generate_matrix, PolyVec};

use crate::params::SecurityLevel;

/// A public key: the NTT-domain vector t-hat and the 32-byte seed rho that
/// generates the public matrix A.
#[derive(Clone)]
pub struct PublicKey {
    pub t_hat: PolyVec,
    pub rho: [u8; SYM_BYTES],
    pub security_level: SecurityLevel,
}

/// A secret key: the NTT-domain secret vector s-hat. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    pub s_hat: PolyVec,
    #[zeroize(skip)]
    pub security_level: SecurityLevel,
}

/// An encrypted message: compress(u) followed by compress(v), concatenated.
#[derive(Clone)]
pub struct Ciphertext {
    pub bytes: Vec<u8>,
    pub security_level: SecurityLevel,
}

/// Draws fresh system randomness and derives a keypair from it.
pub fn keygen(security_level: SecurityLevel) -> (PublicKey, SecretKey) {
    let mut d = [0u8; SYM_BYTES];
    OsRng.fill_bytes(&mut d);
    let keys = keygen_from_seed(security_level, &d);
    d.zeroize();
    keys
}

/// KeyGen from an explicit 32-byte seed `d`, for deterministic callers.
///
/// G(d) = SHA3-512(d) splits into the public matrix seed rho and the noise
/// seed sigma; s and e are CBD(eta1) samples from PRF(sigma, ·); the public
/// key is `t_hat = polyToMont(A . s_hat) + e_hat`, reduced.
pub fn keygen_from_seed(security_level: SecurityLevel, d: &[u8; SYM_BYTES]) -> (PublicKey, SecretKey) {
    let k = security_level.k();
    let eta1 = security_level.eta1();
    log::debug!("cpa keygen: security_level={security_level:?} k={k} eta1={eta1}");

    let g_out = sha3_512(d);
    let mut rho = [0u8; SYM_BYTES];
    let mut sigma = [0u8; SYM_BYTES];
    rho.copy_from_slice(&g_out[..SYM_BYTES]);
    sigma.copy_from_slice(&g_out[SYM_BYTES..]);

    let a_hat = generate_matrix(&rho, k, false);

    let noise_bytes = eta1 * N / 4;
    let mut s_hat = PolyVec::zero(k);
    for i in 0..k {
        let buf = prf(&sigma, i as u8, noise_bytes);
        s_hat.polys[i] = poly_from_noise(&buf, eta1);
    }
    let mut e_hat = PolyVec::zero(k);
    for i in 0..k {
        let buf = prf(&sigma, (k + i) as u8, noise_bytes);
        e_hat.polys[i] = poly_from_noise(&buf, eta1);
    }
    sigma.zeroize();

    s_hat.ntt();
    e_hat.ntt();
    s_hat.reduce();

    let mut t_hat = PolyVec::zero(k);
    for i in 0..k {
        let row = PolyVec {
            polys: a_hat[i].clone(),
        };
        let mut t_i = row.pointwise_acc_montgomery(&s_hat);
        t_i.to_mont();
        t_i = &t_i + &e_hat.polys[i];
        t_i.reduce();
        t_hat.polys[i] = t_i;
    }

    (
        PublicKey {
            t_hat,
            rho,
            security_level,
        },
        SecretKey {
            s_hat,
            security_level,
        },
    )
}

/// Encrypts a 32-byte message under `pk` using the supplied 32 bytes of
/// encryption randomness (the coins `r`).
///
/// `sp`/`ep` are CBD(eta1) samples, `epp` is CBD(eta2) — all drawn from
/// PRF(r, ·) with sequential nonces `0..=2k`; u = compress(invNTT(A^T . sp) +
/// ep, du); v = compress(invNTT(t_hat . sp) + epp + encode(msg), dv).
pub fn encrypt(pk: &PublicKey, msg: &[u8; 32], coins: &[u8; SYM_BYTES]) -> Ciphertext {
    let level = pk.security_level;
    let k = level.k();
    let eta1 = level.eta1();
    let eta2 = level.eta2();
    let du = level.du();
    let dv = level.dv();
    log::debug!("cpa encrypt: security_level={level:?} k={k}");

    let at_hat = generate_matrix(&pk.rho, k, true);

    let eta1_bytes = eta1 * N / 4;
    let eta2_bytes = eta2 * N / 4;

    let mut sp_hat = PolyVec::zero(k);
    for i in 0..k {
        let buf = prf(coins, i as u8, eta1_bytes);
        sp_hat.polys[i] = poly_from_noise(&buf, eta1);
    }
    let mut ep = PolyVec::zero(k);
    for i in 0..k {
        let buf = prf(coins, (k + i) as u8, eta2_bytes);
        ep.polys[i] = poly_from_noise(&buf, eta2);
    }
    let epp_buf = prf(coins, (2 * k) as u8, eta2_bytes);
    let epp = poly_from_noise(&epp_buf, eta2);

    sp_hat.ntt();
    sp_hat.reduce();

    let mut bp = PolyVec::zero(k);
    for i in 0..k {
        let row = PolyVec {
            polys: at_hat[i].clone(),
        };
        let mut b_i = row.pointwise_acc_montgomery(&sp_hat);
        b_i.inv_ntt();
        bp.polys[i] = b_i;
    }
    bp = bp.add(&ep);
    bp.reduce();

    let mut v = pk.t_hat.pointwise_acc_montgomery(&sp_hat);
    v.inv_ntt();
    v = &v + &epp;
    let encoded_msg = Poly::from_msg(msg);
    v = &v + &encoded_msg;
    v.reduce();

    let mut bytes = bp.compress(du);
    bytes.extend_from_slice(&v.compress(dv));

    Ciphertext {
        bytes,
        security_level: level,
    }
}

/// Decrypts `ct` with `sk`, returning the recovered 32-byte message.
///
/// mp = v - invNTT(s_hat . NTT(decompress(u))); the recovered message is
/// `decode(mp)`. Malformed-length ciphertexts are a caller contract
/// violation, not a failure this function reports: the length assertion
/// below panics rather than returning an error. A ciphertext of the right
/// length that was tampered with elsewhere decrypts to 32 bytes of noise,
/// never an error — indistinguishability from a valid decryption is the
/// whole point of not rejecting here.
pub fn decrypt(sk: &SecretKey, ct: &Ciphertext) -> [u8; 32] {
    let level = sk.security_level;
    assert_eq!(
        level, ct.security_level,
        "ciphertext was produced for a different security level than this secret key"
    );
    let k = level.k();
    let du = level.du();
    let dv = level.dv();
    log::debug!("cpa decrypt: security_level={level:?} k={k}");

    assert_eq!(
        ct.bytes.len(),
        level.ciphertext_bytes(),
        "ciphertext has the wrong length for this security level"
    );
    let split = level.polyvec_compressed_bytes();
    let (u_bytes, v_bytes) = ct.bytes.split_at(split);

    let mut u = PolyVec::decompress(u_bytes, du, k);
    let v = Poly::decompress(v_bytes, dv);

    u.ntt();
    let mut mp = sk.s_hat.pointwise_acc_montgomery(&u);
    mp.inv_ntt();
    mp = &v - &mp;
    mp.reduce();

    mp.to_msg()
}

/// Serializes a public key: `polyvec_bytes(t_hat) || rho`.
pub fn pk_to_bytes(pk: &PublicKey) -> Vec<u8> {
    let mut out = pk.t_hat.to_bytes();
    out.extend_from_slice(&pk.rho);
    out
}

/// Inverse of [`pk_to_bytes`].
pub fn pk_from_bytes(bytes: &[u8], security_level: SecurityLevel) -> PublicKey {
    assert_eq!(
        bytes.len(),
        security_level.public_key_bytes(),
        "public key has the wrong length for this security level"
    );
    let split = security_level.polyvec_bytes();
    let (t_bytes, rho_bytes) = bytes.split_at(split);
    let t_hat = PolyVec::from_bytes(t_bytes, security_level.k());
    let mut rho = [0u8; SYM_BYTES];
    rho.copy_from_slice(rho_bytes);
    PublicKey {
        t_hat,
        rho,
        security_level,
    }
}

/// Serializes a secret key: `polyvec_bytes(s_hat)`.
pub fn sk_to_bytes(sk: &SecretKey) -> Vec<u8> {
    sk.s_hat.to_bytes()
}

/// Inverse of [`sk_to_bytes`].
pub fn sk_from_bytes(bytes: &[u8], security_level: SecurityLevel) -> SecretKey {
    assert_eq!(
        bytes.len(),
        security_level.secret_key_bytes(),
        "secret key has the wrong length for this security level"
    );
    SecretKey {
        s_hat: PolyVec::from_bytes(bytes, security_level.k()),
        security_level,
    }
}

/// Serializes a ciphertext to its wire bytes.
pub fn ciphertext_to_bytes(ct: &Ciphertext) -> Vec<u8> {
    ct.bytes.clone()
}

/// Inverse of [`ciphertext_to_bytes`].
pub fn ciphertext_from_bytes(bytes: &[u8], security_level: SecurityLevel) -> Ciphertext {
    assert_eq!(
        bytes.len(),
        security_level.ciphertext_bytes(),
        "ciphertext has the wrong length for this security level"
    );
    Ciphertext {
        bytes: bytes.to_vec(),
        security_level,
    }
}
