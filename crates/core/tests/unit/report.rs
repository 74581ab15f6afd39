//! Report formatting tests.

use l1sim_core::sim::report::render_report;

use crate::common::{r, run, tiny_config, w};

#[test]
fn report_carries_the_simulation_parameters() {
    let sim = run(tiny_config(2), vec![vec![r(0x0)], vec![]]);
    let report = render_report(&sim, "traces/app1");

    assert!(report.starts_with("Simulation Parameters:\n"));
    assert!(report.contains("Trace Prefix: traces/app1\n"));
    assert!(report.contains("Set Index Bits: 1\n"));
    assert!(report.contains("Associativity: 2\n"));
    assert!(report.contains("Block Bits: 2\n"));
    assert!(report.contains("Block Size (Bytes): 4\n"));
    assert!(report.contains("Number of Sets: 2\n"));
    assert!(report.contains("MESI Protocol: Enabled\n"));
    assert!(report.contains("Write Policy: Write-back, Write-allocate\n"));
    assert!(report.contains("Replacement Policy: LRU\n"));
    assert!(report.contains("Bus: Central snooping bus\n"));
}

#[test]
fn report_has_one_block_per_core_and_the_bus_totals() {
    let sim = run(tiny_config(2), vec![vec![r(0x0), w(0x0)]; 2]);
    let report = render_report(&sim, "app");

    assert!(report.contains("Core 0 Statistics:\n"));
    assert!(report.contains("Core 1 Statistics:\n"));
    assert!(report.contains("Maximum Execution Cycles: "));
    assert!(report.contains("Bus Statistics:\n"));
    assert!(report.contains("Total Transactions: "));
    assert!(report.contains("Total Bus Traffic (Bytes): "));
}

#[test]
fn miss_rate_is_percent_with_two_decimals() {
    let sim = run(tiny_config(1), vec![vec![r(0x0), r(0x0), r(0x0), r(0x4)]]);
    // 2 misses out of 4 accesses.
    let report = render_report(&sim, "app");
    assert!(report.contains("Cache Miss Rate: 50.00%\n"));
}

#[test]
fn idle_core_reports_zero_miss_rate() {
    let sim = run(tiny_config(2), vec![vec![r(0x0)], vec![]]);
    let report = render_report(&sim, "app");

    // Core 1 made no accesses; its rate must render, not divide by zero.
    assert!(report.contains("Cache Miss Rate: 0.00%\n"));
}

#[test]
fn maximum_execution_cycles_is_the_per_core_max() {
    let sim = run(tiny_config(2), vec![vec![r(0x0)], vec![]]);
    let expected = format!("Maximum Execution Cycles: {}\n", sim.core_stats(0).exec_cycles);
    assert!(render_report(&sim, "app").contains(&expected));
}
