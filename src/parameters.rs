/*!

The immutable configuration of a single run.

`Parameters` carries every scalar the model reads. It is built once, validated once, and then
only ever borrowed. Field names serialize in upper case so a JSON parameter file reads exactly
like the table of constants it replaces:

```json
{
  "TOTAL_DAYS": 200,
  "DAY_FOR_MASKS": 30
}
```

Every field has a default (the baseline scenario), so a file only needs to name what it
changes. The two daily R0 deltas are derived from the other fields and cannot be set directly.

*/

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::OutbreakError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Parameters {
    /// Number of days to simulate.
    pub total_days: usize,
    /// Total population size; cumulative infections never exceed it.
    pub total_pop: u64,
    /// Initial number of infected people, the anchor of the growth curve.
    pub n_infected_pop: u64,
    /// Infectivity period in days. Both the rate divisor and the death latency.
    pub infectivity_time: usize,
    /// Fraction of infections that end in death.
    pub mortality_rate: f64,
    /// Day mask wearing starts.
    pub day_for_masks: usize,
    /// Day vaccination starts.
    pub day_for_vaccine: usize,
    pub initial_r0: f64,
    /// R0 once masks are fully adopted.
    pub final_r0_mask: f64,
    /// R0 once vaccination is complete.
    pub final_r0_vaccine: f64,
    /// Days over which masks move R0 from `initial_r0` to `final_r0_mask`.
    pub transition_days_mask: usize,
    /// Days over which vaccination moves R0 from `final_r0_mask` to `final_r0_vaccine`.
    pub transition_days_vaccine: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            total_days: 365,
            total_pop: 3_000_000,
            n_infected_pop: 4,
            infectivity_time: 2,
            mortality_rate: 0.07,
            day_for_masks: 14,
            day_for_vaccine: 170,
            initial_r0: 3.0,
            final_r0_mask: 1.1,
            final_r0_vaccine: 0.8,
            transition_days_mask: 20,
            transition_days_vaccine: 250,
        }
    }
}

impl Parameters {
    /// Reads parameters from a JSON file. Fields missing from the file keep their defaults.
    /// The result is validated before it is returned.
    pub fn from_json_file(path: &Path) -> Result<Parameters, OutbreakError> {
        debug!("loading parameters from {}", path.display());
        let file = File::open(path)?;
        Parameters::from_json_reader(BufReader::new(file))
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Parameters, OutbreakError> {
        let parameters: Parameters = serde_json::from_reader(reader)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Daily change in R0 while masks are being adopted.
    #[must_use]
    pub fn delta_r0_mask(&self) -> f64 {
        (self.final_r0_mask - self.initial_r0) / self.transition_days_mask as f64
    }

    /// Daily change in R0 while vaccination is rolling out.
    #[must_use]
    pub fn delta_r0_vaccine(&self) -> f64 {
        (self.final_r0_vaccine - self.final_r0_mask) / self.transition_days_vaccine as f64
    }

    /// The constant rate in effect before any intervention.
    #[must_use]
    pub fn initial_rate(&self) -> f64 {
        self.initial_r0.ln() / self.infectivity_time as f64
    }

    /// `total_pop` as the signed type used for daily accounting.
    #[must_use]
    pub(crate) fn population_cap(&self) -> i64 {
        // `validate` guarantees the value fits.
        i64::try_from(self.total_pop).unwrap_or(i64::MAX)
    }

    /// Checks every invariant the model relies on. A run never starts with parameters that fail
    /// this check.
    pub fn validate(&self) -> Result<(), OutbreakError> {
        if self.total_days == 0 {
            return Err(OutbreakError::invalid("TOTAL_DAYS", "must be at least 1"));
        }
        if self.total_pop == 0 {
            return Err(OutbreakError::invalid("TOTAL_POP", "must be at least 1"));
        }
        if i64::try_from(self.total_pop).is_err() {
            return Err(OutbreakError::invalid(
                "TOTAL_POP",
                format!("must not exceed {}, got {}", i64::MAX, self.total_pop),
            ));
        }
        if self.n_infected_pop > self.total_pop {
            return Err(OutbreakError::invalid(
                "N_INFECTED_POP",
                format!(
                    "must not exceed TOTAL_POP ({}), got {}",
                    self.total_pop, self.n_infected_pop
                ),
            ));
        }
        if self.infectivity_time == 0 {
            return Err(OutbreakError::invalid("INFECTIVITY_TIME", "must be at least 1 day"));
        }
        if !(0.0..=1.0).contains(&self.mortality_rate) {
            return Err(OutbreakError::invalid(
                "MORTALITY_RATE",
                format!("must lie in [0, 1], got {}", self.mortality_rate),
            ));
        }
        if self.day_for_vaccine < self.day_for_masks {
            return Err(OutbreakError::invalid(
                "DAY_FOR_VACCINE",
                format!(
                    "must not precede DAY_FOR_MASKS ({}), got {}",
                    self.day_for_masks, self.day_for_vaccine
                ),
            ));
        }
        for (name, r0) in [
            ("INITIAL_R0", self.initial_r0),
            ("FINAL_R0_MASK", self.final_r0_mask),
            ("FINAL_R0_VACCINE", self.final_r0_vaccine),
        ] {
            if !r0.is_finite() || r0 <= 0.0 {
                return Err(OutbreakError::invalid(
                    name,
                    format!("must be a positive finite number, got {r0}"),
                ));
            }
        }
        if self.transition_days_mask == 0 {
            return Err(OutbreakError::invalid("TRANSITION_DAYS_MASK", "must be at least 1 day"));
        }
        if self.transition_days_vaccine == 0 {
            return Err(OutbreakError::invalid(
                "TRANSITION_DAYS_VACCINE",
                "must be at least 1 day",
            ));
        }

        // The rate model clamps R0 from below with `max`, which only holds for a falling R0.
        if self.final_r0_mask > self.initial_r0 {
            warn!(
                "FINAL_R0_MASK ({}) exceeds INITIAL_R0 ({}); R0 jumps straight to the final value",
                self.final_r0_mask, self.initial_r0
            );
        }
        if self.final_r0_vaccine > self.final_r0_mask {
            warn!(
                "FINAL_R0_VACCINE ({}) exceeds FINAL_R0_MASK ({}); R0 jumps straight to the final value",
                self.final_r0_vaccine, self.final_r0_mask
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn assert_invalid(parameters: &Parameters, field: &str) {
        match parameters.validate() {
            Err(OutbreakError::InvalidParameter { name, .. }) => assert_eq!(name, field),
            other => panic!("expected {field} to be rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let parameters = Parameters::default();
        assert!(parameters.validate().is_ok());
        assert_eq!(parameters.total_days, 365);
        assert_eq!(parameters.total_pop, 3_000_000);
    }

    #[test]
    fn test_derived_deltas() {
        let parameters = Parameters::default();
        assert!((parameters.delta_r0_mask() - (1.1 - 3.0) / 20.0).abs() < 1e-12);
        assert!((parameters.delta_r0_vaccine() - (0.8 - 1.1) / 250.0).abs() < 1e-12);
        assert!((parameters.initial_rate() - 3.0_f64.ln() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_each_invariant() {
        let base = Parameters::default();
        assert_invalid(&Parameters { total_days: 0, ..base.clone() }, "TOTAL_DAYS");
        assert_invalid(&Parameters { total_pop: 0, ..base.clone() }, "TOTAL_POP");
        assert_invalid(&Parameters { total_pop: u64::MAX, ..base.clone() }, "TOTAL_POP");
        assert_invalid(
            &Parameters { n_infected_pop: 3_000_001, ..base.clone() },
            "N_INFECTED_POP",
        );
        assert_invalid(&Parameters { infectivity_time: 0, ..base.clone() }, "INFECTIVITY_TIME");
        assert_invalid(&Parameters { mortality_rate: 1.5, ..base.clone() }, "MORTALITY_RATE");
        assert_invalid(&Parameters { mortality_rate: -0.1, ..base.clone() }, "MORTALITY_RATE");
        assert_invalid(&Parameters { mortality_rate: f64::NAN, ..base.clone() }, "MORTALITY_RATE");
        assert_invalid(
            &Parameters { day_for_masks: 200, day_for_vaccine: 100, ..base.clone() },
            "DAY_FOR_VACCINE",
        );
        assert_invalid(&Parameters { initial_r0: 0.0, ..base.clone() }, "INITIAL_R0");
        assert_invalid(&Parameters { final_r0_mask: -1.0, ..base.clone() }, "FINAL_R0_MASK");
        assert_invalid(
            &Parameters { final_r0_vaccine: f64::INFINITY, ..base.clone() },
            "FINAL_R0_VACCINE",
        );
        assert_invalid(
            &Parameters { transition_days_mask: 0, ..base.clone() },
            "TRANSITION_DAYS_MASK",
        );
        assert_invalid(
            &Parameters { transition_days_vaccine: 0, ..base },
            "TRANSITION_DAYS_VACCINE",
        );
    }

    #[test]
    fn test_rising_r0_is_accepted() {
        let parameters = Parameters { final_r0_mask: 4.0, ..Parameters::default() };
        assert!(parameters.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "TOTAL_DAYS": 120, "DAY_FOR_MASKS": 30, "MORTALITY_RATE": 0.01 }"#;
        let parameters = Parameters::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(parameters.total_days, 120);
        assert_eq!(parameters.day_for_masks, 30);
        assert!((parameters.mortality_rate - 0.01).abs() < f64::EPSILON);
        assert_eq!(parameters.total_pop, 3_000_000);
        assert_eq!(parameters.day_for_vaccine, 170);
    }

    #[test]
    fn test_json_rejects_unknown_and_derived_fields() {
        let json = r#"{ "DELTA_R0": -0.095 }"#;
        let result = Parameters::from_json_reader(json.as_bytes());
        assert!(matches!(result, Err(OutbreakError::JsonError(_))));
    }

    #[test]
    fn test_json_is_validated() {
        let json = r#"{ "INFECTIVITY_TIME": 0 }"#;
        let result = Parameters::from_json_reader(json.as_bytes());
        assert!(matches!(result, Err(OutbreakError::InvalidParameter { name: "INFECTIVITY_TIME", .. })));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "TOTAL_POP": 1000, "N_INFECTED_POP": 10 }}"#).unwrap();

        let parameters = Parameters::from_json_file(file.path()).unwrap();
        assert_eq!(parameters.total_pop, 1000);
        assert_eq!(parameters.n_infected_pop, 10);
    }

    #[test]
    fn test_serialized_names_are_upper_case() {
        let value = serde_json::to_value(Parameters::default()).unwrap();
        assert_eq!(value["TOTAL_DAYS"], 365);
        assert_eq!(value["INITIAL_R0"], 3.0);
        assert_eq!(value["TRANSITION_DAYS_VACCINE"], 250);
    }
}
