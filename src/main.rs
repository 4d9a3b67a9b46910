use anyhow::{Context, Result};
use sched_model::sim::{
    Policy, Report, SimConfig, bounded_normal_population, initial_arrivals, process_table, reduce,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SimConfig::from_env();
    config.validate().context("invalid simulation settings")?;
    let base_seed = config.seed.unwrap_or_else(rand::random);
    info!(
        population = config.population,
        trials = config.trials,
        base_seed,
        "starting scheduling comparison"
    );

    let arrivals = initial_arrivals(config.population);
    let mut report = Report::new();

    for trial in 0..config.trials {
        let seed = base_seed.wrapping_add(trial as u64);
        info!(trial, seed, "running trial");

        let service_times = bounded_normal_population(config.population, &config.service, seed)
            .with_context(|| format!("generating population for trial {trial}"))?;

        for policy in Policy::ALL {
            let outcome = policy
                .run(&service_times, &arrivals)
                .with_context(|| format!("{} failed in trial {trial}", policy.name()))?;
            let stats = reduce(&outcome.turnaround_times, &outcome.service_times)?;
            debug!(
                trial,
                policy = policy.name(),
                total_ticks = outcome.total_ticks,
                idle_ticks = outcome.idle_ticks,
                mean_turnaround = stats.mean_turnaround,
                mean_ratio = stats.mean_ratio,
                "trial finished"
            );

            if config.show_tables {
                println!("{} (trial {trial})", policy.name());
                print!("{}", process_table(&outcome));
            }
            report.record(policy, stats);
        }
    }

    println!();
    print!("{report}");
    Ok(())
}
