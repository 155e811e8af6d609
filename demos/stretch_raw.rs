//! # Stretch Raw
//!
//! Stretch a raw file of native-endian mono `f32` samples.
//!
//! **Concepts:** `StretchBuilder`, `stretch_pipe`, window sizing in seconds
//!
//! ```bash
//! INPUT=in.raw OUTPUT=out.raw STRETCH=10 cargo run --example stretch_raw
//! ```
//!
//! Without `INPUT`, a generated two-second chord is stretched instead.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};

use paulstretch::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let output_path =
        std::env::var("OUTPUT").unwrap_or_else(|_| "/tmp/paulstretch_out.raw".to_string());
    let stretch: f64 = match std::env::var("STRETCH") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_STRETCH_FACTOR,
    };

    let stream = StretchBuilder::new()
        .stretch_factor(stretch)
        .window_seconds(DEFAULT_WINDOW_SECONDS)
        .sample_rate(DEFAULT_SAMPLE_RATE)
        .build()?;
    let output = BufWriter::new(File::create(&output_path)?);

    let summary = match std::env::var("INPUT") {
        Ok(input_path) => {
            println!("Stretching {} by {}x", input_path, stretch);
            let input = BufReader::new(File::open(&input_path)?);
            stretch_pipe(&stream, input, output)?
        }
        Err(_) => {
            println!(
                "INPUT not set, stretching a generated chord by {}x",
                stretch
            );
            stretch_pipe(&stream, Cursor::new(chord(2.0)), output)?
        }
    };

    println!(
        "Wrote {} ({} bytes in, {} bytes out, {:.1}s of audio at 44.1kHz)",
        output_path,
        summary.bytes_in,
        summary.bytes_out,
        summary.bytes_out as f64 / 4.0 / DEFAULT_SAMPLE_RATE
    );
    Ok(())
}

/// C major triad as native-endian f32 bytes.
fn chord(seconds: f64) -> Vec<u8> {
    let len = (seconds * DEFAULT_SAMPLE_RATE) as usize;
    (0..len)
        .map(|i| {
            let t = i as f64 / DEFAULT_SAMPLE_RATE;
            let s: f64 = [261.63, 329.63, 392.00]
                .iter()
                .map(|f| (2.0 * std::f64::consts::PI * f * t).sin() * 0.2)
                .sum();
            s as f32
        })
        .flat_map(f32::to_ne_bytes)
        .collect()
}
