use kyber_ml_kem::{cpa, params::SecurityLevel};
use rand::{rngs::OsRng, Rng};

fn main() {
    println!("CRYSTALS-Kyber (ML-KEM) IND-CPA core");
    println!("=====================================");

    let security_level = SecurityLevel::Kyber512;
    println!("Security level: Kyber512 (ML-KEM-512)");

    let (pk, sk) = cpa::keygen(security_level);
    println!("Generated keypair");

    let mut rng = OsRng;
    let mut message = [0u8; 32];
    rng.fill(&mut message);
    println!("Random message: {}", hex::encode(&message[0..8]));

    let mut coins = [0u8; 32];
    rng.fill(&mut coins);

    let ciphertext = cpa::encrypt(&pk, &message, &coins);
    println!("Message encrypted with public key");

    let decrypted = cpa::decrypt(&sk, &ciphertext);
    println!("Decrypted message: {}", hex::encode(&decrypted[0..8]));

    if message == decrypted {
        println!("Decryption successful: recovered message matches exactly.");
    } else {
        println!("Decryption mismatch - this indicates a bug, not expected noise.");
    }

    println!("\nTampering with the ciphertext:");
    println!("-------------------------------");
    let ct_bytes = cpa::ciphertext_to_bytes(&ciphertext);
    let mut tampered_bytes = ct_bytes.clone();
    tampered_bytes[0] ^= 1;
    println!("Flipped the first bit of the ciphertext");

    let tampered_ct = cpa::ciphertext_from_bytes(&tampered_bytes, security_level);
    let tampered_decrypted = cpa::decrypt(&sk, &tampered_ct);
    println!("Tampered decryption: {}", hex::encode(&tampered_decrypted[0..8]));

    if tampered_decrypted == message {
        println!("Tampered ciphertext still decrypted to the original message.");
    } else {
        println!("Tampered ciphertext decrypted to a different message, as expected:");
        println!("the IND-CPA core makes no integrity guarantee on its own.");
    }
}
