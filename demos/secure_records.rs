//! Holding sensitive records in a sequence that zeroes its storage

use secvec::prelude::*;
use zeroize::Zeroize;

/// A fixed-size credential record
#[derive(Clone, Default)]
struct Credential {
    user: [u8; 16],
    secret: [u8; 32],
}

impl Zeroize for Credential {
    fn zeroize(&mut self) {
        self.user.zeroize();
        self.secret.zeroize();
    }
}

fn credential(user: &str, secret: &[u8]) -> Credential {
    let mut record = Credential::default();
    let user = user.as_bytes();
    record.user[..user.len()].copy_from_slice(user);
    record.secret[..secret.len()].copy_from_slice(secret);
    record
}

fn main() -> Result<()> {
    println!("=== Burn-on-drop Sequence ===\n");

    let config = SequenceConfig::new()
        .with_initial_capacity(2)
        .with_burn_on_drop(true);
    let mut vault: Sequence<Credential> = Sequence::with_config(config)?;

    // Outgrowing the initial capacity zeroes the discarded buffer too
    vault.push_back(credential("alice", b"correct horse"))?;
    vault.push_back(credential("bob", b"battery staple"))?;
    vault.push_back(credential("carol", b"hunter2"))?;
    println!(
        "Stored {} records (capacity {})",
        vault.len(),
        vault.capacity()
    );

    let mut removed = vault.remove(1)?;
    println!(
        "Removed record for {:?}",
        String::from_utf8_lossy(&removed.user).trim_end_matches('\0')
    );
    removed.zeroize();

    println!("\n=== Explicit Burn ===\n");

    vault.zeroize();
    println!(
        "After zeroize: len {}, capacity {} (kept for reuse)",
        vault.len(),
        vault.capacity()
    );

    vault.push_back(credential("dave", b"swordfish"))?;
    println!("Reused storage, len {}", vault.len());

    // Remaining storage is zeroed when `vault` goes out of scope
    Ok(())
}
