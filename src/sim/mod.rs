pub mod config;
pub mod driver;
pub mod metrics;
pub mod population;
pub mod report;

pub use config::{ServiceDistribution, SimConfig};
pub use driver::{
    Policy, RunOutcome, Sim, initial_arrivals, run_fb, run_fcfs, run_hrrn, run_policy, run_rr,
};
pub use metrics::{TurnaroundStats, reduce};
pub use population::bounded_normal_population;
pub use report::{ProcessTable, Report, process_table};
