use std::fmt;

use average::{Estimate, Mean};

use super::{
    driver::{Policy, RunOutcome},
    metrics::TurnaroundStats,
};

#[derive(Debug, Default)]
struct PolicyTotals {
    turnaround: Mean,
    ratio: Mean,
}

/// Per-policy means of the per-trial statistics.
#[derive(Debug, Default)]
pub struct Report {
    totals: [PolicyTotals; Policy::ALL.len()],
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(policy: Policy) -> usize {
        Policy::ALL
            .iter()
            .position(|&p| p == policy)
            .expect("Policy missing from Policy::ALL")
    }

    pub fn record(&mut self, policy: Policy, stats: TurnaroundStats) {
        let totals = &mut self.totals[Self::slot(policy)];
        totals.turnaround.add(stats.mean_turnaround);
        totals.ratio.add(stats.mean_ratio);
    }

    pub fn trials(&self, policy: Policy) -> u64 {
        self.totals[Self::slot(policy)].turnaround.len()
    }

    pub fn summary(&self, policy: Policy) -> Option<TurnaroundStats> {
        let totals = &self.totals[Self::slot(policy)];
        if totals.turnaround.is_empty() {
            return None;
        }
        Some(TurnaroundStats {
            mean_turnaround: totals.turnaround.estimate(),
            mean_ratio: totals.ratio.estimate(),
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for policy in Policy::ALL {
            let Some(stats) = self.summary(policy) else {
                continue;
            };
            writeln!(f, "{}", policy.name())?;
            writeln!(f, "Turnaround time Mean:                  {:.4}", stats.mean_turnaround)?;
            writeln!(f, "(Turnaround time / Service Time) Mean: {:.4}", stats.mean_ratio)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-process timing table for one run, rendered through `Display`.
pub struct ProcessTable<'a>(pub &'a RunOutcome);

pub fn process_table(outcome: &RunOutcome) -> ProcessTable<'_> {
    ProcessTable(outcome)
}

impl fmt::Display for ProcessTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        writeln!(
            f,
            "{:<12}{:>14}{:>14}{:>14}{:>17}",
            "Process", "Service Time", "Arrival Time", "Finish Time", "Turnaround Time"
        )?;
        for (i, service) in outcome.service_times.iter().enumerate() {
            writeln!(
                f,
                "{:<12}{:>14}{:>14}{:>14}{:>17}",
                format!("Process {i}:"),
                service,
                outcome.arrival_times[i],
                outcome.finish_times[i],
                outcome.turnaround_times[i],
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_across_trials() {
        let mut report = Report::new();
        report.record(
            Policy::Rr,
            TurnaroundStats {
                mean_turnaround: 10.0,
                mean_ratio: 2.0,
            },
        );
        report.record(
            Policy::Rr,
            TurnaroundStats {
                mean_turnaround: 20.0,
                mean_ratio: 4.0,
            },
        );

        let rr = report.summary(Policy::Rr).unwrap();
        assert_eq!(report.trials(Policy::Rr), 2);
        assert!((rr.mean_turnaround - 15.0).abs() < 1e-12);
        assert!((rr.mean_ratio - 3.0).abs() < 1e-12);
        assert_eq!(report.summary(Policy::Fb), None);

        let text = report.to_string();
        assert!(text.starts_with("RR\n"));
        assert!(!text.contains("FB"));
    }

    #[test]
    fn table_lists_every_process() {
        let outcome = RunOutcome {
            policy: "FCFS",
            service_times: vec![3, 5, 2],
            arrival_times: vec![0, 1, 2],
            finish_times: vec![3, 8, 10],
            turnaround_times: vec![3, 7, 8],
            total_ticks: 10,
            idle_ticks: 0,
        };
        let table = process_table(&outcome).to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Turnaround Time"));
        assert!(lines[2].starts_with("Process 1:"));
        assert!(lines[2].trim_end().ends_with('7'));
    }

    // Accepts a fixed number of bytes, then refuses further writes
    struct ShortSink {
        room: usize,
    }

    impl fmt::Write for ShortSink {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.room = self.room.checked_sub(s.len()).ok_or(fmt::Error)?;
            Ok(())
        }
    }

    #[test]
    fn table_stops_at_first_write_error() {
        use std::fmt::Write;

        let outcome = RunOutcome {
            policy: "RR",
            service_times: vec![3, 5, 2],
            arrival_times: vec![0, 1, 2],
            finish_times: vec![7, 10, 6],
            turnaround_times: vec![7, 9, 4],
            total_ticks: 10,
            idle_ticks: 0,
        };
        let full = process_table(&outcome).to_string();

        let mut sink = ShortSink { room: full.len() };
        assert!(write!(sink, "{}", process_table(&outcome)).is_ok());

        let mut sink = ShortSink { room: full.len() / 2 };
        assert!(write!(sink, "{}", process_table(&outcome)).is_err());
    }
}
