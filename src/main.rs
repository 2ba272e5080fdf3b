//! ACLScan - order-aware firewall ACL conflict analyzer
//!
//! Audits ordered firewall rule sets for order-dependent conflicts
//! (shadowing, redundancy, correlation, generalization) and simulates
//! first-match packet evaluation.
//!
//! # Usage
//!
//! ```bash
//! # Analyze one or more normalized rule-set files (CSV or JSON)
//! aclscan analyze policies.csv
//! aclscan analyze --relations policies.csv dmz.json
//!
//! # Simulate a packet against a rule set
//! aclscan match policies.csv --protocol tcp --src 140.192.37.40 \
//!     --dst 161.120.33.40 --dport 80
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use aclscan::core::analyzer::PolicyAnalyzer;
use aclscan::core::policy::Packet;
use aclscan::loader;

#[derive(Parser)]
#[command(name = "aclscan")]
#[command(about = "Order-aware firewall ACL conflict analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze rule sets for order-dependent anomalies
    Analyze {
        /// Normalized rule-set files (CSV or JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Also print the pairwise relation map
        #[arg(long)]
        relations: bool,
    },
    /// Find the first rule matching a packet
    Match {
        /// Normalized rule-set file (CSV or JSON)
        file: PathBuf,
        /// Packet protocol (e.g. tcp, udp, or any)
        #[arg(long)]
        protocol: String,
        /// Source address (host, CIDR, or any)
        #[arg(long)]
        src: String,
        /// Source port (number, service name, range, or any)
        #[arg(long, default_value = "any")]
        sport: String,
        /// Destination address
        #[arg(long)]
        dst: String,
        /// Destination port
        #[arg(long, default_value = "any")]
        dport: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { files, relations } => analyze(&files, relations),
        Commands::Match {
            file,
            protocol,
            src,
            sport,
            dst,
            dport,
        } => first_match(&file, &protocol, &src, &sport, &dst, &dport),
    }
}

/// Prints the numbered rule list and anomaly report for each file.
///
/// A file that fails to load is reported and skipped; the remaining files
/// are still processed. The exit code is a failure if any file failed.
fn analyze(files: &[PathBuf], with_relations: bool) -> ExitCode {
    let mut failed = false;
    for path in files {
        let policies = match loader::load_path(path) {
            Ok(policies) => policies,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load rule set");
                eprintln!("{}: {e}", path.display());
                failed = true;
                continue;
            }
        };

        println!("{}", path.display());
        println!("Policies:");
        for policy in &policies {
            println!("  {:3}: {policy}", policy.index);
        }

        let analyzer = PolicyAnalyzer::new(policies);

        if with_relations {
            println!("Relations:");
            for ((i, j), relation) in analyzer.get_relations() {
                println!("  ({i:3}, {j:3}): {relation}");
            }
        }

        let anomalies = analyzer.get_anomalies();
        println!("Anomalies:");
        if anomalies.is_empty() {
            println!("  none");
        }
        for (index, anomaly) in &anomalies {
            println!("  {index:3}: {anomaly}");
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Prints the first rule matching the packet; exit code conveys no-match.
fn first_match(
    file: &Path,
    protocol: &str,
    src: &str,
    sport: &str,
    dst: &str,
    dport: &str,
) -> ExitCode {
    let policies = match loader::load_path(file) {
        Ok(policies) => policies,
        Err(e) => {
            eprintln!("{}: {e}", file.display());
            return ExitCode::FAILURE;
        }
    };
    let packet = match Packet::parse(protocol, src, sport, dst, dport) {
        Ok(packet) => packet,
        Err(e) => {
            eprintln!("invalid packet: {e}");
            return ExitCode::FAILURE;
        }
    };

    let analyzer = PolicyAnalyzer::new(policies);
    match analyzer.get_first_match(&packet) {
        Some(policy) => {
            println!("{:3}: {policy}", policy.index);
            ExitCode::SUCCESS
        }
        None => {
            println!("no match");
            ExitCode::FAILURE
        }
    }
}
