//! # Stretch WAV
//!
//! Stretch a WAV file into a mono 32-bit float WAV.
//!
//! **Concepts:** `write_samples` / `read_samples` on two threads, `close`,
//! `optimal_buffer_size`
//!
//! ```bash
//! AUDIO_FILE=in.wav OUTPUT=out.wav STRETCH=8 cargo run --example stretch_wav
//! ```

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use paulstretch::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let Ok(input_path) = std::env::var("AUDIO_FILE") else {
        println!("Set AUDIO_FILE=/path/to/your.wav");
        return Ok(());
    };
    let output_path =
        std::env::var("OUTPUT").unwrap_or_else(|_| "/tmp/paulstretch_out.wav".to_string());
    let stretch: f64 = match std::env::var("STRETCH") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_STRETCH_FACTOR,
    };

    let (samples, sample_rate) = read_mono(&input_path)?;
    println!(
        "Stretching {} ({:.1}s at {}Hz) by {}x",
        input_path,
        samples.len() as f64 / sample_rate as f64,
        sample_rate,
        stretch
    );

    let stream = StretchBuilder::new()
        .stretch_factor(stretch)
        .sample_rate(sample_rate as f64)
        .window_seconds(DEFAULT_WINDOW_SECONDS)
        .build()?;

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&output_path, spec)?;

    let written = std::thread::scope(
        |s| -> std::result::Result<usize, Box<dyn std::error::Error>> {
            s.spawn(|| {
                for chunk in samples.chunks(stream.optimal_buffer_size()) {
                    if stream.write_samples(chunk).is_err() {
                        break;
                    }
                }
                stream.close();
            });

            let mut buffer = vec![0.0f32; stream.optimal_buffer_size()];
            let mut written = 0;
            loop {
                let n = match stream.read_samples(&mut buffer) {
                    Ok(n) => n,
                    Err(e) if e.is_end_of_stream() => break,
                    Err(e) => {
                        stream.close();
                        return Err(e.into());
                    }
                };
                for &sample in &buffer[..n] {
                    if let Err(e) = writer.write_sample(sample) {
                        stream.close();
                        return Err(e.into());
                    }
                }
                written += n;
            }
            Ok(written)
        },
    )?;
    writer.finalize()?;

    println!(
        "Wrote {} ({:.1}s)",
        output_path,
        written as f64 / sample_rate as f64
    );
    Ok(())
}

/// Read any PCM or float WAV, averaging channels down to mono.
fn read_mono(path: &str) -> std::result::Result<(Vec<f32>, u32), hound::Error> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 * scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let mono = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();
    Ok((mono, spec.sample_rate))
}
