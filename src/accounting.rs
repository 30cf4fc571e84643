/*!

Daily accounting: turns the day's growth rate into new infections and new deaths.

Infections grow exponentially from the seed count using the absolute day index, so a regime
change on day `t` makes the curve jump to where it would be had the new rate applied since day 0.
Deaths on day `t` are a fixed fraction of the infections recorded `infectivity_time` days
earlier.

When a day would push the cumulative infections to or past the population, the day's count is
cut to exactly the remaining capacity. If the history already exceeds the population that
remaining capacity is negative, and the negative count is returned as is.

*/

use crate::history::InfectionHistory;
use crate::parameters::Parameters;

/// New infections and deaths for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyOutcome {
    pub new_infections: i64,
    pub new_deaths: i64,
}

/// Computes the outcome of `day` given the `rate` in effect and the infections recorded so far.
#[must_use]
pub fn compute_day(
    parameters: &Parameters,
    rate: f64,
    day: usize,
    history: &InfectionHistory,
) -> DailyOutcome {
    // Float to integer casts truncate toward zero and saturate at the bounds of `i64`.
    let mut new_infections =
        (parameters.n_infected_pop as f64 * (rate * day as f64).exp()) as i64;
    let mut new_deaths = deaths_on(parameters, day, history);

    let population = parameters.population_cap();
    let remaining = population.saturating_sub(history.sum());
    if new_infections >= remaining {
        new_infections = remaining;
        if new_deaths >= population {
            new_deaths = 0;
        }
    }

    DailyOutcome {
        new_infections,
        new_deaths,
    }
}

/// Deaths on `day` from infections `infectivity_time` days earlier. Zero until the history is
/// longer than the latency.
fn deaths_on(parameters: &Parameters, day: usize, history: &InfectionHistory) -> i64 {
    if history.len() <= parameters.infectivity_time {
        return 0;
    }
    day.checked_sub(parameters.infectivity_time)
        .and_then(|infection_day| history.get(infection_day))
        .map_or(0, |infections| {
            (parameters.mortality_rate * infections as f64) as i64
        })
}
