use std::time::Instant;

use clap::{Parser, Subcommand};
use hound::WavReader;
use nanofft::{FftSize, forward, verify};

#[derive(Parser, Debug)]
#[command(name = "spectrum")]
#[command(about = "Verify, benchmark and analyze WAV files with nanofft", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the synthetic signal checks.
    Selftest,
    /// Repeat the harmonics check to measure throughput.
    Bench {
        #[arg(long, value_name = "SAMPLES", default_value_t = 256)]
        size: usize,
        #[arg(long, value_name = "COUNT", default_value_t = 10_000)]
        runs: usize,
    },
    /// Print the strongest frequency bins of the start of a WAV file.
    Analyze {
        input: String,
        #[arg(long, value_name = "SAMPLES", default_value_t = 1024)]
        size: usize,
        #[arg(long, value_name = "COUNT", default_value_t = 8)]
        peaks: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Selftest => selftest(),
        Command::Bench { size, runs } => bench(size, runs),
        Command::Analyze { input, size, peaks } => analyze(&input, size, peaks),
    }
}

fn selftest() {
    let report = verify::verify_all();

    for outcome in report.outcomes() {
        let status = if outcome.passed { "OK" } else { "FAIL" };
        match outcome.case {
            verify::Case::Impulse if outcome.position > 0 => println!(
                "{}[{},{}]: {status}",
                outcome.case, outcome.size, outcome.position
            ),
            _ => println!("{}[{}]: {status}", outcome.case, outcome.size),
        }
    }

    if !report.passed() {
        std::process::exit(1);
    }
}

fn parse_bench_size(value: usize) -> Result<fn(usize) -> bool, String> {
    match value {
        256 => Ok(verify::throughput_256 as fn(usize) -> bool),
        4096 => Ok(verify::throughput_4096 as fn(usize) -> bool),
        _ => Err(format!("Invalid bench size: {value}. Must be 256 or 4096")),
    }
}

fn bench(size: usize, runs: usize) {
    let run = match parse_bench_size(size) {
        Ok(run) => run,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };

    if runs == 0 {
        eprintln!("Error: --runs must be at least 1");
        std::process::exit(1);
    }

    let start = Instant::now();
    let passed = run(runs);
    let elapsed = start.elapsed();

    let elapsed_secs = elapsed.as_secs_f64();
    println!(
        "{runs} forward transforms of {size} samples took {:.3} ms ({:.0} transforms/s)",
        elapsed_secs * 1000.0,
        runs as f64 / elapsed_secs
    );

    if !passed {
        eprintln!("Spectrum check failed");
        std::process::exit(1);
    }
}

fn analyze(input_path: &str, size: usize, peaks: usize) {
    let size = match FftSize::try_from(size) {
        Ok(size) => size,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };
    let len: usize = size.into();

    let mut reader = match WavReader::open(input_path) {
        Ok(reader) => reader,
        Err(error) => {
            eprintln!("Could not open {input_path}: {error}");
            std::process::exit(1);
        }
    };
    let spec = reader.spec();

    println!(
        "Input: {} Hz, {} channels, {} bits",
        spec.sample_rate, spec.channels, spec.bits_per_sample
    );

    // Only the first channel of the first `len` frames is analyzed.
    let needed_samples = len * spec.channels as usize;
    let samples: Result<Vec<f32>, hound::Error> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().take(needed_samples).collect(),
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .take(needed_samples)
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect()
        }
    };

    let samples = match samples {
        Ok(samples) => samples,
        Err(error) => {
            eprintln!("Could not read samples: {error}");
            std::process::exit(1);
        }
    };

    let mut real = vec![0.0f32; len];
    let mut imag = vec![0.0f32; len];
    let frames = samples.iter().step_by(spec.channels.max(1) as usize);
    for (sample, frame) in real.iter_mut().zip(frames) {
        *sample = *frame;
    }

    if let Err(error) = forward(&mut real, &mut imag) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }

    // Single-sided amplitude of every bin up to Nyquist.
    let mut bins: Vec<(usize, f32)> = (0..=len / 2)
        .map(|bin| {
            let magnitude = (real[bin] * real[bin] + imag[bin] * imag[bin]).sqrt();
            let scale = if bin == 0 || bin == len / 2 { 1.0 } else { 2.0 };
            (bin, magnitude * scale / len as f32)
        })
        .collect();
    bins.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!("Strongest bins of the first {len} samples:");
    for &(bin, amplitude) in bins.iter().take(peaks) {
        let frequency = bin as f64 * spec.sample_rate as f64 / len as f64;
        println!("  bin {bin:>5}  {frequency:>10.1} Hz  amplitude {amplitude:.6}");
    }
}
