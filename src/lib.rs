/*!

A deterministic, day-stepping model of an outbreak in a closed population.

The reproduction number falls in two linear steps, first when masks are introduced and again when
vaccination starts. Each day the model turns the current R0 into an exponential growth rate,
computes the day's new infections from the seed count (never more than the population can still
absorb) and the day's deaths from the infections one infectivity period earlier.

```rust
use outbreak_sim::{simulate, Parameters};

let parameters = Parameters { total_days: 30, ..Parameters::default() };
let records = simulate(&parameters).unwrap();
assert_eq!(records.len(), 30);
```

*/

pub mod accounting;
mod context;
pub mod error;
pub mod history;
pub mod logging;
pub mod parameters;
pub mod rate;
pub mod report;
pub mod simulation;

pub use accounting::{compute_day, DailyOutcome};
pub use context::{Context, DataPlugin};
pub use error::OutbreakError;
pub use history::{ContextHistoryExt, InfectionHistory, RunningTotals};
pub use parameters::Parameters;
pub use rate::{instantaneous_rate, Regime, Transition};
pub use report::{ContextReportExt, DailyRecord, Measure, Summary};
pub use simulation::{simulate, ContextSimulationExt};
