/// Distribution engine — closed-form statistics and exhaustive sum enumeration.

use crate::schema::die::DicePool;
use log::debug;
use rustc_hash::FxHashMap;

/// Occurrence count of every reachable sum of a dice pool.
///
/// Built once by [`build_sum_distribution`] and read-only afterwards.
/// Shifting by a modifier produces a new distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SumDistribution {
    counts: FxHashMap<i64, u64>,
}

impl SumDistribution {
    /// Occurrences of `sum`, or 0 if it cannot be rolled.
    pub fn get(&self, sum: i64) -> u64 {
        self.counts.get(&sum).copied().unwrap_or(0)
    }

    /// Number of distinct sums.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total occurrences across all sums.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn min_sum(&self) -> Option<i64> {
        self.counts.keys().min().copied()
    }

    pub fn max_sum(&self) -> Option<i64> {
        self.counts.keys().max().copied()
    }

    /// Iterate `(sum, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.counts.iter().map(|(&sum, &count)| (sum, count))
    }

    /// `(sum, count)` pairs sorted by ascending sum.
    pub fn sorted(&self) -> Vec<(i64, u64)> {
        let mut rows: Vec<(i64, u64)> = self.iter().collect();
        rows.sort_unstable_by_key(|&(sum, _)| sum);
        rows
    }

    /// A copy with every sum moved by `modifier`; counts are unchanged.
    pub fn shifted(&self, modifier: i64) -> SumDistribution {
        SumDistribution {
            counts: self
                .counts
                .iter()
                .map(|(&sum, &count)| (sum + modifier, count))
                .collect(),
        }
    }

    /// Occurrence-weighted mean of the sums, or `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .iter()
            .map(|(sum, count)| sum as f64 * count as f64)
            .sum();
        Some(weighted / total as f64)
    }

    fn record(&mut self, sum: i64) {
        *self.counts.entry(sum).or_insert(0) += 1;
    }
}

/// Number of face combinations the pool can show: the product of all face
/// counts, or `None` when that product does not fit in a `u64`.
pub fn combination_count(pool: &DicePool) -> Option<u64> {
    pool.iter()
        .try_fold(1u64, |acc, die| acc.checked_mul(u64::from(die.faces())))
}

/// Render a combination count, spelling out counts too large for a `u64`.
pub fn describe_count(combinations: Option<u64>) -> String {
    match combinations {
        Some(n) => n.to_string(),
        None => format!("more than {}", u64::MAX),
    }
}

/// Expected sum: each die averages `(faces + 1) / 2`.
pub fn average(pool: &DicePool, modifier: i64) -> f64 {
    let halves: u64 = pool.iter().map(|d| u64::from(d.faces()) + 1).sum();
    halves as f64 / 2.0 + modifier as f64
}

/// Standard deviation of the sum: each die contributes a variance of
/// `(faces² - 1) / 12`. Modifiers never change it.
pub fn standard_deviation(pool: &DicePool) -> f64 {
    let variance_x12: f64 = pool
        .iter()
        .map(|d| {
            let faces = f64::from(d.faces());
            faces * faces - 1.0
        })
        .sum();
    (variance_x12 / 12.0).sqrt()
}

/// Enumerate every face combination of `pool` and count each sum.
///
/// Works on a copy of the pool reset to all ones, so the caller's pool is
/// untouched. The all-maximum state is counted as the final combination.
pub fn build_sum_distribution(pool: &DicePool, modifier: i64) -> SumDistribution {
    debug!(
        "enumerating {} dice ({} combinations)",
        pool.len(),
        describe_count(combination_count(pool))
    );

    let mut cursor = pool.clone();
    cursor.reset();

    let mut distribution = SumDistribution::default();
    loop {
        distribution.record(cursor.current_sum());
        if !cursor.advance() {
            break;
        }
    }

    debug!("enumeration produced {} distinct sums", distribution.len());

    if modifier != 0 {
        distribution.shifted(modifier)
    } else {
        distribution
    }
}

/// Percentage chance of rolling `target` or higher.
///
/// Returns 0 when no sum qualifies or `combinations` is 0.
pub fn cumulative_chance(distribution: &SumDistribution, combinations: u64, target: i64) -> f64 {
    if combinations == 0 {
        return 0.0;
    }
    let hits: u64 = distribution
        .iter()
        .filter(|&(sum, _)| sum >= target)
        .map(|(_, count)| count)
        .sum();
    hits as f64 / combinations as f64 * 100.0
}

/// Percentage of all combinations that land on one sum with `count` occurrences.
pub fn percent_of(count: u64, combinations: u64) -> f64 {
    if combinations == 0 {
        return 0.0;
    }
    count as f64 / combinations as f64 * 100.0
}
