/*!

The day-stepping loop.

A run walks days `0..total_days` in order. Each day it picks the regime, updates the rate if an
intervention is active, asks [`compute_day`] for the day's outcome, folds the outcome into the
history and totals, and appends a [`DailyRecord`]. Every day depends on the history of the days
before it, so the loop is a plain sequential reduction with no early exit.

*/

use log::{debug, info, trace};

use crate::accounting::compute_day;
use crate::context::Context;
use crate::error::OutbreakError;
use crate::history::{ContextHistoryExt, InfectionHistory};
use crate::parameters::Parameters;
use crate::rate::Regime;
use crate::report::{ContextReportExt, DailyRecord};

pub trait ContextSimulationExt {
    /// Runs every day of the simulation, leaving the records in the context's report.
    /// Fails without simulating anything if the parameters are invalid or the context has
    /// already been run.
    fn run_simulation(&mut self) -> Result<(), OutbreakError>;
}

impl ContextSimulationExt for Context {
    fn run_simulation(&mut self) -> Result<(), OutbreakError> {
        let parameters = self.parameters().clone();
        parameters.validate()?;
        if !self.daily_records().is_empty() || !self.infection_history().is_empty() {
            return Err(OutbreakError::OutbreakError(
                "simulation has already been run in this context".to_string(),
            ));
        }

        info!(
            "simulating {} days for a population of {} with {} initially infected",
            parameters.total_days, parameters.total_pop, parameters.n_infected_pop
        );

        let mut rate = parameters.initial_rate();
        let mut regime = None;

        for day in 0..parameters.total_days {
            let todays_regime = Regime::on_day(&parameters, day);
            if regime != Some(todays_regime) {
                info!("day {day}: entering {todays_regime} regime");
                regime = Some(todays_regime);
            }
            if let Some(transition) = todays_regime.transition(&parameters) {
                rate = transition.rate_on(day, parameters.infectivity_time);
            }

            let outcome = {
                let history = self.get_data_container_mut::<InfectionHistory>();
                compute_day(&parameters, rate, day, history)
            };
            let totals = self.record_day(outcome.new_infections, outcome.new_deaths);

            trace!(
                "day {day}: rate {rate:.5}, {} new infections ({} total), {} new deaths ({} total)",
                outcome.new_infections, totals.infections, outcome.new_deaths, totals.deaths
            );

            self.add_record(DailyRecord {
                day,
                new_infections: outcome.new_infections,
                total_infections: totals.infections,
                new_deaths: outcome.new_deaths,
                total_deaths: totals.deaths,
            });
        }

        let totals = self.running_totals();
        debug!(
            "simulation finished: {} infections, {} deaths",
            totals.infections, totals.deaths
        );
        Ok(())
    }
}

/// Runs a full simulation with `parameters` and returns one record per day, in day order.
pub fn simulate(parameters: &Parameters) -> Result<Vec<DailyRecord>, OutbreakError> {
    let mut context = Context::new(parameters.clone());
    context.run_simulation()?;
    Ok(context.take_daily_records())
}
