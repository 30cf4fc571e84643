//! Per-run accumulators: the daily infection history and the cumulative totals.

use crate::context::{Context, DataPlugin};

/// Daily new-infection counts indexed by day. Append-only; the death latency looks back into it
/// by a fixed offset, so it stays materialized for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfectionHistory {
    counts: Vec<i64>,
    sum: i64,
}

impl DataPlugin for InfectionHistory {
    const new: &'static dyn Fn() -> Self = &InfectionHistory::default;
}

impl InfectionHistory {
    pub fn push(&mut self, new_infections: i64) {
        self.counts.push(new_infections);
        self.sum = self.sum.saturating_add(new_infections);
    }

    /// New infections recorded on `day`, if that day has been recorded.
    #[must_use]
    pub fn get(&self, day: usize) -> Option<i64> {
        self.counts.get(day).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of every recorded count.
    #[must_use]
    pub fn sum(&self) -> i64 {
        self.sum
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.counts
    }
}

impl From<Vec<i64>> for InfectionHistory {
    fn from(counts: Vec<i64>) -> Self {
        let sum = counts.iter().fold(0i64, |acc, &count| acc.saturating_add(count));
        InfectionHistory { counts, sum }
    }
}

/// Cumulative infections and deaths, updated once per day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningTotals {
    pub infections: i64,
    pub deaths: i64,
}

impl DataPlugin for RunningTotals {
    const new: &'static dyn Fn() -> Self = &RunningTotals::default;
}

impl RunningTotals {
    pub fn add(&mut self, new_infections: i64, new_deaths: i64) {
        self.infections = self.infections.saturating_add(new_infections);
        self.deaths = self.deaths.saturating_add(new_deaths);
    }
}

pub trait ContextHistoryExt {
    /// The infection history of the run so far; empty before the first day is recorded.
    fn infection_history(&self) -> &[i64];

    fn running_totals(&self) -> RunningTotals;

    /// Folds one day's outcome into the history and the totals and returns the updated totals.
    fn record_day(&mut self, new_infections: i64, new_deaths: i64) -> RunningTotals;
}

impl ContextHistoryExt for Context {
    fn infection_history(&self) -> &[i64] {
        match self.get_data_container::<InfectionHistory>() {
            Some(history) => history.as_slice(),
            None => &[],
        }
    }

    fn running_totals(&self) -> RunningTotals {
        self.get_data_container::<RunningTotals>()
            .copied()
            .unwrap_or_default()
    }

    fn record_day(&mut self, new_infections: i64, new_deaths: i64) -> RunningTotals {
        self.get_data_container_mut::<InfectionHistory>()
            .push(new_infections);
        let totals = self.get_data_container_mut::<RunningTotals>();
        totals.add(new_infections, new_deaths);
        *totals
    }
}
