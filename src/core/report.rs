/// Calculation report — the numbers one invocation produces, their console
/// rendering, and RON persistence.

use super::distribution::{
    average, build_sum_distribution, combination_count, cumulative_chance, describe_count,
    percent_of, standard_deviation,
};
use crate::schema::die::DicePool;
use crate::schema::notation::canonical_string;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON serialization error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Minimum widths of the sum and count table columns (their header lengths).
const SUM_COLUMN: usize = 3;
const COUNT_COLUMN: usize = 5;

/// One row of the sum table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SumRow {
    pub sum: i64,
    pub count: u64,
    pub percent: f64,
}

/// Chance of rolling `target` or higher, as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chance {
    pub target: i64,
    pub percent: f64,
}

/// Everything reported for one dice pool and modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Canonical notation of the pool, e.g. `2d6 1d4`.
    pub dice: String,
    pub modifier: i64,
    /// `None` when the count does not fit in a `u64`.
    pub combinations: Option<u64>,
    pub average: f64,
    pub standard_deviation: f64,
    /// `(average - sd, average + sd)`.
    pub range: (f64, f64),
    /// Quick reports skip enumeration, leaving `rows` and `chances` empty.
    pub quick: bool,
    pub rows: Vec<SumRow>,
    pub chances: Vec<Chance>,
}

impl Report {
    /// Compute a report for `pool`.
    ///
    /// `targets` are answered in ascending order. In quick mode the pool is
    /// never enumerated and `targets` are ignored. Percentages are taken over
    /// the enumerated total, which equals the combination count.
    pub fn calculate(pool: &DicePool, modifier: i64, targets: &[i64], quick: bool) -> Report {
        let combinations = combination_count(pool);
        let mean = average(pool, modifier);
        let sd = standard_deviation(pool);

        let mut report = Report {
            dice: canonical_string(pool),
            modifier,
            combinations,
            average: mean,
            standard_deviation: sd,
            range: (mean - sd, mean + sd),
            quick,
            rows: Vec::new(),
            chances: Vec::new(),
        };

        if quick {
            return report;
        }

        let distribution = build_sum_distribution(pool, modifier);
        let total = distribution.total();
        report.rows = distribution
            .sorted()
            .into_iter()
            .map(|(sum, count)| SumRow {
                sum,
                count,
                percent: percent_of(count, total),
            })
            .collect();

        let mut targets = targets.to_vec();
        targets.sort_unstable();
        report.chances = targets
            .into_iter()
            .map(|target| Chance {
                target,
                percent: cumulative_chance(&distribution, total, target),
            })
            .collect();

        report
    }

    /// Render the report as console text.
    ///
    /// Quick reports show only the combination count, average, standard
    /// deviation and its range.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        if !self.quick {
            let _ = writeln!(out, "Dice Rolled: {}", self.dice);
            let _ = writeln!(out, "Modifier: {:+}", self.modifier);
        }
        let _ = writeln!(out, "Combinations: {}", describe_count(self.combinations));
        let _ = writeln!(out, "Average Sum: {:.2}", self.average);
        let _ = writeln!(out, "Standard Deviation: {:.2}", self.standard_deviation);
        let _ = writeln!(
            out,
            "Standard Deviation Range: {:.2} to {:.2}",
            self.range.0, self.range.1
        );

        if self.quick {
            return out;
        }

        out.push('\n');
        out.push_str(&self.render_table());

        if !self.chances.is_empty() {
            out.push('\n');
            for chance in &self.chances {
                let _ = writeln!(
                    out,
                    "Chance of rolling sum of {} or higher: {:.2}%",
                    chance.target, chance.percent
                );
            }
        }

        out
    }

    /// Render the sum/count/percent table, one row per sum in ascending order.
    pub fn render_table(&self) -> String {
        let sum_width = self
            .rows
            .iter()
            .map(|r| r.sum.to_string().len())
            .max()
            .unwrap_or(0)
            .max(SUM_COLUMN);
        let count_width = self
            .rows
            .iter()
            .map(|r| r.count.to_string().len())
            .max()
            .unwrap_or(0)
            .max(COUNT_COLUMN);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "| {:>sw$} | {:>cw$} |  Percent |",
            "Sum",
            "Count",
            sw = sum_width,
            cw = count_width
        );
        let _ = writeln!(
            out,
            "+-{}-+-{}-+----------+",
            "-".repeat(sum_width),
            "-".repeat(count_width)
        );
        for row in &self.rows {
            let _ = writeln!(
                out,
                "| {:>sw$} | {:>cw$} |  {:>6.2}% |",
                row.sum,
                row.count,
                row.percent,
                sw = sum_width,
                cw = count_width
            );
        }
        out
    }
}

/// Save a report to a RON file.
pub fn save_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let serialized = ron::ser::to_string_pretty(report, ron::ser::PrettyConfig::default())?;
    std::fs::write(path, serialized)?;
    Ok(())
}

/// Load a report from a RON file.
pub fn load_report(path: &Path) -> Result<Report, ReportError> {
    let contents = std::fs::read_to_string(path)?;
    let report: Report = ron::from_str(&contents)?;
    Ok(report)
}
