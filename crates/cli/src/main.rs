//! Cache coherence simulator CLI.
//!
//! Reads one memory-access trace per core (`<prefix>_proc<k>.trace`), runs
//! the MESI simulation to completion, and writes the statistics report to
//! the output file.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use l1sim_core::sim::{report, trace};
use l1sim_core::{SimConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "l1sim",
    version,
    about = "Multi-core L1 cache simulator with a MESI snooping bus",
    long_about = "Simulates four private L1 caches kept coherent over a central snooping bus.\n\
        Each core replays <prefix>_proc<k>.trace (one 'R <hex>' or 'W <hex>' access per line)\n\
        and the per-core and bus statistics are written to the output file.\n\n\
        Example:\n  l1sim -t traces/app1 -s 5 -E 2 -b 5 -o app1.out"
)]
struct Cli {
    /// Trace file prefix; core k reads <prefix>_proc<k>.trace.
    #[arg(short = 't', long = "trace-prefix")]
    trace_prefix: Option<String>,

    /// Number of set index bits.
    #[arg(short = 's', long = "set-bits")]
    set_index_bits: Option<u32>,

    /// Associativity (ways per set).
    #[arg(short = 'E', long = "assoc")]
    associativity: Option<u32>,

    /// Number of block offset bits.
    #[arg(short = 'b', long = "block-bits")]
    block_bits: Option<u32>,

    /// Output file for the statistics report.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let Some(prefix) = cli.trace_prefix else {
        eprintln!("Error: trace prefix not specified");
        usage_hint();
        process::exit(1);
    };
    let Some(out_path) = cli.output else {
        eprintln!("Error: output file not specified");
        usage_hint();
        process::exit(1);
    };

    let mut config = SimConfig::default();
    if let Some(s) = cli.set_index_bits {
        config.set_index_bits = s;
    }
    if let Some(ways) = cli.associativity {
        config.associativity = ways;
    }
    if let Some(b) = cli.block_bits {
        config.block_bits = b;
    }

    let traces = trace::load_core_traces(&prefix, config.num_cores).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let mut sim = Simulator::new(config, traces).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    sim.run();
    log::info!("simulation finished in {} cycles", sim.cycle());

    if let Err(e) = report::write_report_to_file(&out_path, &sim, &prefix) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn usage_hint() {
    eprintln!();
    eprintln!("  l1sim -t <prefix> [-s <bits>] [-E <ways>] [-b <bits>] -o <file>");
    eprintln!();
    eprintln!("  l1sim --help  for full options");
}
