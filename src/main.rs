//! Horario - Schedule Codec Demo
//!
//! Membangun bundle contoh dari subject bank, lalu mengukur:
//! - Binary encode/decode (`.hbin`)
//! - JSON serialize/parse
//! - Perbandingan ukuran kedua format

use std::time::Instant;

use tracing_subscriber::EnvFilter;

use horario::core::subjects::{custom_entry, BUILTIN_SUBJECTS, CUSTOM_COLOR};
use horario::core::{Day, Period, ScheduleBundle};
use horario::protocol::{compare_formats, decode, from_json, to_json, Encoder};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    println!("📅 Horario Schedule Codec - Demo");
    println!("================================\n");

    let bundle = sample_bundle();

    benchmark_binary(&bundle);
    benchmark_json(&bundle);

    match compare_formats(&bundle) {
        Ok(cmp) => println!("📊 {}", cmp),
        Err(e) => eprintln!("❌ Comparison failed: {}", e),
    }

    println!("\n✅ All benchmarks complete!");
    println!("\nTo convert files: cargo run --release --bin hbin -- convert horario.json");
}

/// Bundle realistis: subject bank tersebar di grid + satu subject custom
fn sample_bundle() -> ScheduleBundle {
    let mut bundle = ScheduleBundle::new().stamped();
    bundle.metadata.teacher = "Ana Pereira".to_string();
    bundle.metadata.school = "Liceo N°1".to_string();
    bundle.metadata.shift = "Matutino".to_string();
    bundle.metadata.city = "Montevideo".to_string();

    for (i, subject) in BUILTIN_SUBJECTS.iter().cycle().take(30).enumerate() {
        let day = Day::ALL[i % Day::ALL.len()];
        if let Some(period) = Period::new((i / Day::ALL.len()) as u8) {
            bundle.current.set(day, period, subject.to_entry());
        }
    }
    if let Some(entry) = custom_entry("Coordinación", CUSTOM_COLOR) {
        bundle.current.set(Day::Friday, Period::LAST, entry);
    }

    bundle.original = bundle.current.clone();
    bundle
}

fn benchmark_binary(bundle: &ScheduleBundle) {
    println!("📊 Binary Codec Benchmark (.hbin)");
    println!("---------------------------------");

    const ITERATIONS: usize = 100_000;

    let mut encoder = Encoder::new();

    // Benchmark encode
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        encoder.encode(bundle);
    }
    let encode_duration = start.elapsed();

    let encoded = encoder.encode(bundle).to_vec();

    // Benchmark decode
    let start = Instant::now();
    let mut failures = 0usize;
    for _ in 0..ITERATIONS {
        if decode(&encoded).is_err() {
            failures += 1;
        }
    }
    let decode_duration = start.elapsed();

    let encode_ns = encode_duration.as_nanos() as f64 / ITERATIONS as f64;
    let decode_ns = decode_duration.as_nanos() as f64 / ITERATIONS as f64;

    println!("  Encoded size: {} bytes", encoded.len());
    println!("  Operations: {}", ITERATIONS);
    println!(
        "  Encode latency: {:.2} ns/op ({:.3} μs/op)",
        encode_ns,
        encode_ns / 1000.0
    );
    println!(
        "  Decode latency: {:.2} ns/op ({:.3} μs/op)",
        decode_ns,
        decode_ns / 1000.0
    );
    if failures > 0 {
        println!("  Decode failures: {} ⚠️", failures);
    }
    println!();
}

fn benchmark_json(bundle: &ScheduleBundle) {
    println!("📊 JSON Benchmark (companion format)");
    println!("------------------------------------");

    const ITERATIONS: usize = 10_000;

    let json = match to_json(bundle) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("❌ JSON serialization failed: {}", e);
            return;
        }
    };

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let _ = to_json(bundle);
    }
    let write_duration = start.elapsed();

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let _ = from_json(&json);
    }
    let read_duration = start.elapsed();

    let write_us = write_duration.as_secs_f64() * 1e6 / ITERATIONS as f64;
    let read_us = read_duration.as_secs_f64() * 1e6 / ITERATIONS as f64;

    println!("  Document size: {} bytes", json.len());
    println!("  Operations: {}", ITERATIONS);
    println!("  Serialize latency: {:.3} μs/op", write_us);
    println!("  Parse latency:     {:.3} μs/op\n", read_us);
}
