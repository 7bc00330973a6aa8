//! Times every quicksort variant against `slice::sort_unstable` on the same dense random input,
//! and flags any variant whose output differs from it.
//!
//! Environment:
//! - `QS_LENGTHS`: comma separated input lengths, default `10000,...,100000000`.
//! - `QS_THREADS`: worker count of the parallel variants, default all cores.
//! - `QS_DISPLAY_LIMIT`: inputs and outputs up to this length are printed, default `30`.
//! - `OVERRIDE_SEED`: generator seed, default `5`.

use std::env;
use std::fmt::Display;
use std::mem;
use std::str::FromStr;
use std::time::Instant;

use qs_simd::unstable::{
    rust_qs_scalar, rust_qs_scalar_parallel, rust_qs_simd, rust_qs_simd_parallel, rust_std,
};
use qs_simd::{sort_with, SortConfig};
use sort_test_tools::patterns;

const DEFAULT_LENGTHS: [usize; 5] = [10_000, 100_000, 1_000_000, 10_000_000, 100_000_000];
const DEFAULT_SEED: u64 = 5;
const DEFAULT_DISPLAY_LIMIT: usize = 30;

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(val) => T::from_str(&val)
            .unwrap_or_else(|err| panic!("Invalid value '{val}' for {key}: {err}")),
        Err(_) => default,
    }
}

fn lengths() -> Vec<usize> {
    match env::var("QS_LENGTHS") {
        Ok(val) => val
            .split(',')
            .map(|len| {
                usize::from_str(len.trim())
                    .unwrap_or_else(|err| panic!("Invalid length '{len}' in QS_LENGTHS: {err}"))
            })
            .collect(),
        Err(_) => DEFAULT_LENGTHS.to_vec(),
    }
}

struct Settings {
    seed: u64,
    threads: usize,
    display_limit: usize,
}

fn print_array(v: &[u32], settings: &Settings) {
    if v.len() > settings.display_limit {
        return;
    }

    let line = v.iter().map(|x| x.to_string()).collect::<Vec<_>>();
    println!("{}\n", line.join(" "));
}

fn time_sort(
    v: &mut [u32],
    sort_func: impl FnOnce(&mut [u32]) -> qs_simd::Result<()>,
) -> qs_simd::Result<f64> {
    let start = Instant::now();
    sort_func(v)?;
    Ok(start.elapsed().as_secs_f64())
}

fn single_test(len: usize, settings: &Settings) -> qs_simd::Result<()> {
    let input = patterns::seeded_dense(len, settings.seed);

    println!("Length:          {:.0E}", len as f64);
    println!(
        "Memory:          {} MBytes\n",
        (3 * len * mem::size_of::<u32>()) / (1024 * 1024)
    );

    print_array(&input, settings);

    let mut expected = input.clone();
    let baseline_time = time_sort(&mut expected, |v| {
        rust_std::sort(v);
        Ok(())
    })?;
    print_array(&expected, settings);
    println!("{:<17}{baseline_time:.6} s", "rust_std:");

    let threads = settings.threads;
    let variants: [(&str, &str, SortConfig); 4] = [
        ("Serial", "rust_qs_scalar", rust_qs_scalar::config()),
        (
            "Parallel",
            "rust_qs_scalar_parallel",
            rust_qs_scalar_parallel::config().with_threads(threads),
        ),
        ("SIMD", "rust_qs_simd", rust_qs_simd::config()),
        (
            "Parallel & SIMD",
            "rust_qs_simd_parallel",
            rust_qs_simd_parallel::config().with_threads(threads),
        ),
    ];

    for (label, name, config) in variants {
        let mut v = input.clone();
        let time = time_sort(&mut v, |v| sort_with(v, &config))?;
        print_array(&v, settings);

        if v != expected {
            println!("The result with '{name}' is !!INCORRECT!!");
        }

        println!(
            "{:<17}{time:.6} s\t{:.6}",
            format!("{label}:"),
            baseline_time / time
        );
    }

    println!("\n---------------------------------------------\n");

    Ok(())
}

fn main() -> qs_simd::Result<()> {
    let settings = Settings {
        seed: env_or("OVERRIDE_SEED", DEFAULT_SEED),
        threads: env_or("QS_THREADS", SortConfig::default().threads),
        display_limit: env_or("QS_DISPLAY_LIMIT", DEFAULT_DISPLAY_LIMIT),
    };

    println!(
        "Seed: {}  Threads: {}  Backend: {:?}\n",
        settings.seed,
        settings.threads,
        qs_simd::VectorBackend::detect()
    );

    for len in lengths() {
        single_test(len, &settings)?;
    }

    Ok(())
}
