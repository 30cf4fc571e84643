/*!

The infection-rate model.

R0 follows a piecewise-linear schedule. Each intervention starts a [`Transition`] that moves R0
from one value toward another by a fixed amount per day, and the instantaneous rate of
exponential growth is `ln(R0) / infectivity_time`. Which transition applies on a given day is the
day's [`Regime`].

The R0 clamp uses `max(final_r0, ...)`. That is a floor, so it is only meaningful when R0 falls
over the transition. A rising transition is allowed but reaches its final value immediately;
`Parameters::validate` logs a warning for it.

*/

use std::fmt::{self, Display};

use crate::parameters::Parameters;

/// The instantaneous growth rate on `day` for a transition that starts on `event_start_day`.
#[must_use]
pub fn instantaneous_rate(
    initial_r0: f64,
    final_r0: f64,
    delta_per_day: f64,
    event_start_day: usize,
    day: usize,
    infectivity_time: usize,
) -> f64 {
    Transition {
        initial_r0,
        final_r0,
        delta_per_day,
        start_day: event_start_day,
    }
    .rate_on(day, infectivity_time)
}

/// A linear move of R0 toward `final_r0` beginning on `start_day`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub initial_r0: f64,
    pub final_r0: f64,
    pub delta_per_day: f64,
    pub start_day: usize,
}

impl Transition {
    /// R0 on `day`, never below `final_r0`.
    #[must_use]
    pub fn r0_on(&self, day: usize) -> f64 {
        // Signed so that days before the start extrapolate backwards instead of wrapping.
        let elapsed = day as f64 - self.start_day as f64;
        self.final_r0
            .max(self.initial_r0 + self.delta_per_day * elapsed)
    }

    #[must_use]
    pub fn rate_on(&self, day: usize, infectivity_time: usize) -> f64 {
        self.r0_on(day).ln() / infectivity_time as f64
    }
}

/// The intervention phase governing the rate on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    PreIntervention,
    Masks,
    Vaccine,
}

impl Regime {
    /// Selects the regime for `day`. The mask window includes the vaccine start day itself, so
    /// the vaccine regime takes over the day after.
    #[must_use]
    pub fn on_day(parameters: &Parameters, day: usize) -> Regime {
        if parameters.day_for_masks <= day && day <= parameters.day_for_vaccine {
            Regime::Masks
        } else if day >= parameters.day_for_vaccine {
            Regime::Vaccine
        } else {
            Regime::PreIntervention
        }
    }

    /// The transition driving this regime, or `None` before any intervention, where the rate
    /// stays at its initial value.
    #[must_use]
    pub fn transition(self, parameters: &Parameters) -> Option<Transition> {
        match self {
            Regime::PreIntervention => None,
            Regime::Masks => Some(Transition {
                initial_r0: parameters.initial_r0,
                final_r0: parameters.final_r0_mask,
                delta_per_day: parameters.delta_r0_mask(),
                start_day: parameters.day_for_masks,
            }),
            Regime::Vaccine => Some(Transition {
                initial_r0: parameters.final_r0_mask,
                final_r0: parameters.final_r0_vaccine,
                delta_per_day: parameters.delta_r0_vaccine(),
                start_day: parameters.day_for_vaccine,
            }),
        }
    }
}

impl Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Regime::PreIntervention => "pre-intervention",
            Regime::Masks => "masks",
            Regime::Vaccine => "vaccine",
        };
        f.write_str(name)
    }
}
