/*!

Daily records and what can be done with them once a run is over: CSV export and import, the
four plotted time series, and a short summary of the run.

The CSV layout is fixed:

```text
Time,Infected_per_day,Total_infections,Deads_per_day,Total_Deads
0,4,4,0,0
1,7,11,0,0
```

*/

use std::fmt::{self, Display};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::context::{Context, DataPlugin};
use crate::error::OutbreakError;

/// The outcome of one simulated day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRecord {
    #[serde(rename = "Time")]
    pub day: usize,
    #[serde(rename = "Infected_per_day")]
    pub new_infections: i64,
    #[serde(rename = "Total_infections")]
    pub total_infections: i64,
    #[serde(rename = "Deads_per_day")]
    pub new_deaths: i64,
    #[serde(rename = "Total_Deads")]
    pub total_deaths: i64,
}

/// The records produced so far by a run, in day order.
#[derive(Default)]
pub(crate) struct DailyReport {
    pub(crate) records: Vec<DailyRecord>,
}

impl DataPlugin for DailyReport {
    const new: &'static dyn Fn() -> Self = &DailyReport::default;
}

pub trait ContextReportExt {
    fn add_record(&mut self, record: DailyRecord);

    fn daily_records(&self) -> &[DailyRecord];

    /// Moves the records out of the context, leaving it without a report.
    fn take_daily_records(&mut self) -> Vec<DailyRecord>;
}

impl ContextReportExt for Context {
    fn add_record(&mut self, record: DailyRecord) {
        let report = self.get_data_container_mut::<DailyReport>();
        debug_assert!(
            report.records.last().is_none_or(|last| last.day < record.day),
            "records must be added in increasing day order"
        );
        report.records.push(record);
    }

    fn daily_records(&self) -> &[DailyRecord] {
        match self.get_data_container::<DailyReport>() {
            Some(report) => &report.records,
            None => &[],
        }
    }

    fn take_daily_records(&mut self) -> Vec<DailyRecord> {
        self.take_data_container::<DailyReport>()
            .map(|report| report.records)
            .unwrap_or_default()
    }
}

/// Writes `records` as CSV, header first.
pub fn write_csv<W: Write>(writer: W, records: &[DailyRecord]) -> Result<(), OutbreakError> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, records: &[DailyRecord]) -> Result<(), OutbreakError> {
    debug!("writing {} records to {}", records.len(), path.display());
    let file = File::create(path)?;
    write_csv(file, records)
}

/// Reads back a results table written by [`write_csv_file`].
pub fn read_csv_file(path: &Path) -> Result<Vec<DailyRecord>, OutbreakError> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<DailyRecord>, csv::Error>>()?;
    Ok(records)
}

/// One of the four plotted quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    NewInfections,
    TotalInfections,
    NewDeaths,
    TotalDeaths,
}

impl Measure {
    pub const ALL: [Measure; 4] = [
        Measure::NewInfections,
        Measure::TotalInfections,
        Measure::NewDeaths,
        Measure::TotalDeaths,
    ];

    #[must_use]
    pub fn value(self, record: &DailyRecord) -> i64 {
        match self {
            Measure::NewInfections => record.new_infections,
            Measure::TotalInfections => record.total_infections,
            Measure::NewDeaths => record.new_deaths,
            Measure::TotalDeaths => record.total_deaths,
        }
    }
}

/// `(day, value)` pairs of one measure, ready for plotting.
#[must_use]
pub fn series(records: &[DailyRecord], measure: Measure) -> Vec<(usize, i64)> {
    records
        .iter()
        .map(|record| (record.day, measure.value(record)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peak {
    pub day: usize,
    pub value: i64,
}

/// Headline numbers of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub days: usize,
    pub peak_infections: Peak,
    pub peak_deaths: Peak,
    pub total_infections: i64,
    pub total_deaths: i64,
}

impl Summary {
    /// Returns `None` for an empty run. Ties for a peak go to the earliest day.
    #[must_use]
    pub fn from_records(records: &[DailyRecord]) -> Option<Summary> {
        let last = records.last()?;
        Some(Summary {
            days: records.len(),
            peak_infections: peak(records, Measure::NewInfections)?,
            peak_deaths: peak(records, Measure::NewDeaths)?,
            total_infections: last.total_infections,
            total_deaths: last.total_deaths,
        })
    }
}

fn peak(records: &[DailyRecord], measure: Measure) -> Option<Peak> {
    records.iter().fold(None, |best: Option<Peak>, record| {
        let value = measure.value(record);
        match best {
            Some(peak) if peak.value >= value => Some(peak),
            _ => Some(Peak { day: record.day, value }),
        }
    })
}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days; infections peaked at {} on day {}, deaths peaked at {} on day {}; \
             {} total infections, {} total deaths",
            self.days,
            self.peak_infections.value,
            self.peak_infections.day,
            self.peak_deaths.value,
            self.peak_deaths.day,
            self.total_infections,
            self.total_deaths
        )
    }
}
