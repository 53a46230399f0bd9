//! Fill both stores from the wall clock and compare how many samples each keeps.
//!
//! The grid quantizes arrivals into 2µs slots, so readings that land in the
//! same slot overwrite each other while the ordered list keeps every one.
//!
//! Run with: cargo run --example wall_clock --release

use timestore::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = SystemTime::now();
    let granularity = Duration::from_micros(2);
    let retention = Duration::from_secs(2);

    let mut fixed = GridBuilder::new()
        .since(start)
        .granularity(granularity)
        .retention(retention)
        .build()?;
    let mut flexible = OrderedSamples::new();

    let mut added = 0usize;
    loop {
        let now = SystemTime::now();
        if now >= start + retention {
            break;
        }
        let reading = format!("{:?}", now);
        // The clock is not monotonic; a step backwards lands before `since`
        if let Err(e) = fixed.insert(now, reading.clone()) {
            log::warn!("Skipping reading: {}", e);
        }
        flexible.insert(now, reading);
        added += 1;
    }

    println!("Times added: {}", added);
    println!("Fixed: {} slots, {} written", fixed.len(), fixed.stats().sample_count);
    println!("Flexible: {} samples", flexible.len());

    if let Some(sample) = fixed.latest().sample() {
        println!("Latest grid slot: {:?} -> {}", sample.timestamp, sample.value);
    }
    if let Some(sample) = flexible.last() {
        println!("Latest reading:   {:?} -> {}", sample.timestamp, sample.value);
    }

    Ok(())
}
