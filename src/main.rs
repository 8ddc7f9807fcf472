use bullwhip_chain::io::reporting;
use bullwhip_chain::io::statistics::SupplyChainStatistics;
use bullwhip_chain::{AgentRole, ChainSimulation, SimulationConfig};
use log::info;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    println!("=== Multi-Tier Bullwhip Simulation ===");

    // 1. SETUP CONFIGURATION
    // Demand steps from 5 to 9 after week 5; every tier aims for 12 on hand.
    let config = SimulationConfig::default();
    info!(
        "Running {} weeks with a {}-week delay on every link",
        config.weeks, config.queue_delay
    );

    // 2. INITIALIZE AND RUN
    let mut sim = ChainSimulation::new(config)?;
    let mut stats = SupplyChainStatistics::new();
    let summary = sim.run(&mut stats);

    // 3. EXPORT RESULTS
    let output_file = "simulation_results.csv";
    match reporting::write_simulation_log(output_file, stats.history()) {
        Ok(()) => println!("Success! Data written to ./{}", output_file),
        Err(e) => eprintln!("Error writing CSV: {}", e),
    }

    // 4. PRINT COST ANALYSIS
    println!("\n=== Cost Analysis ===");
    for (role, cost) in stats.cost_breakdown() {
        println!("{:?}: ${:.2}", role, cost);
    }
    println!(
        "Total Supply Chain Cost: ${:.2}",
        stats.total_supply_chain_cost()
    );

    println!("\n=== Order Amplification (order variance / demand variance) ===");
    if let Some(ratios) = stats.order_amplification() {
        for (role, ratio) in ratios {
            println!("{:?}: {:.2}", role, ratio);
        }
    }

    for role in AgentRole::ALL {
        if let Some(week) = stats.first_shortage_week(role) {
            println!("{:?} first went short in week {}", role, week);
        }
    }

    println!(
        "\nUnits received by customer: {}",
        summary.customer_received
    );
    println!("Simulation Complete.");
    Ok(())
}
