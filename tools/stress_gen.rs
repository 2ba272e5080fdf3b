//! Stress rule-set generator for ACLScan
//!
//! Emits large normalized rule sets in the loader's CSV format, drawing
//! addresses and ports from small clustered pools so the O(n²) anomaly scan
//! actually finds overlapping, shadowed, and redundant pairs instead of
//! pairwise-disjoint noise.
//!
//! # Usage
//!
//! ```bash
//! # 2000 rules to stdout
//! cargo run --bin stress_gen --features stress_gen -- --count 2000
//!
//! # Reproducible set written to a file
//! cargo run --bin stress_gen --features stress_gen -- --count 500 --seed 12345 -o stress.csv
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(name = "stress_gen")]
#[command(about = "Generate large ACL rule sets for stress testing", long_about = None)]
struct Cli {
    /// Number of rules to generate
    #[arg(short, long, default_value_t = 1000)]
    count: usize,

    /// Random seed for reproducible generation (useful for bug reports)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the CSV header line
    #[arg(long)]
    header: bool,
}

const PROTOCOLS: &[&str] = &["tcp", "tcp", "tcp", "udp", "udp", "icmp", "ip"];

const ACTIONS: &[&str] = &["permit", "permit", "deny"];

/// A handful of clustered subnets; nearby prefixes guarantee containment
/// and overlap between generated rules.
const SUBNETS: &[&str] = &[
    "140.192.37.0/24",
    "140.192.37.0/25",
    "140.192.37.20",
    "140.192.37.30",
    "140.192.38.0/24",
    "161.120.33.40",
    "161.120.35.0/24",
    "10.0.0.0/8",
    "10.0.0.0/24",
    "0.0.0.0/0",
    "any",
];

const PORTS: &[&str] = &[
    "80", "443", "21", "22", "23", "25", "53", "www", "https", "gt 1023", "0-1023", "any", "any",
];

fn gen_rule(rng: &mut StdRng) -> String {
    format!(
        "{},{},{},{},{},{}",
        PROTOCOLS.choose(rng).unwrap(),
        SUBNETS.choose(rng).unwrap(),
        // Source ports are almost always wildcards in real ACLs
        if rng.random_range(0..10) == 0 {
            PORTS.choose(rng).unwrap()
        } else {
            &"any"
        },
        SUBNETS.choose(rng).unwrap(),
        PORTS.choose(rng).unwrap(),
        ACTIONS.choose(rng).unwrap(),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    eprintln!("seed: {seed}");

    let mut out = String::new();
    if cli.header {
        out.push_str("protocol,src,s_port,dest,d_port,action\n");
    }
    for _ in 0..cli.count {
        let _ = writeln!(out, "{}", gen_rule(&mut rng));
    }

    match cli.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, out) {
                eprintln!("{}: {e}", path.display());
                return ExitCode::FAILURE;
            }
            eprintln!("wrote {} rules to {}", cli.count, path.display());
        }
        None => print!("{out}"),
    }
    ExitCode::SUCCESS
}
