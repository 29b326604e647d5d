//! Basic usage example of the sequence module

use secvec::prelude::*;

fn main() -> Result<()> {
    println!("=== Basic Sequence Usage ===\n");

    // 1. Append and inspect
    let mut seq = Sequence::new();
    seq.push_back(1)?;
    seq.push_back(2)?;
    seq.push_back(3)?;

    println!("Contents: {:?}", seq);
    println!("Length: {}, capacity: {}", seq.len(), seq.capacity());

    // 2. Positional edits
    seq.erase(1)?;
    println!("After erase(1): {:?}", seq);

    seq.insert(1, 5)?;
    println!("After insert(1, 5): {:?}", seq);

    // 3. Size and capacity management
    seq.resize(1)?;
    println!("After resize(1): {:?} (capacity {})", seq, seq.capacity());

    seq.reserve(10)?;
    println!("After reserve(10): {:?} (capacity {})", seq, seq.capacity());

    println!("\n=== Growth Policy ===\n");

    let mut growing: Sequence<u64> = Sequence::new();
    let mut last_capacity = growing.capacity();
    for i in 0..100 {
        growing.push_back(i)?;
        if growing.capacity() != last_capacity {
            println!(
                "len {:>3} -> capacity {:>3}",
                growing.len(),
                growing.capacity()
            );
            last_capacity = growing.capacity();
        }
    }

    println!("\n=== Error Handling ===\n");

    match seq.insert(42, 0) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("insert(42) rejected: {}", err),
    }

    match Sequence::<u64>::with_capacity(usize::MAX) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("huge allocation rejected: {}", err),
    }

    println!("\n=== Copy and Move ===\n");

    let words: Sequence<String> = ["alpha", "beta", "gamma"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut copy = words.clone();
    copy.emplace_back_with(|| "delta".to_string())?;
    println!("Original: {:?}", words);
    println!("Copy:     {:?}", copy);

    let mut source = copy;
    let moved = source.take();
    println!(
        "Moved {} elements, source left with len {} and capacity {}",
        moved.len(),
        source.len(),
        source.capacity()
    );

    Ok(())
}
