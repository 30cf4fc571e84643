/*!

Logging setup. The crate only ever logs through the `log` facade; this module installs a
`log4rs` console appender behind it the first time a level is set, and reconfigures that same
logger on later calls. Messages go to standard error so they never mix with tabular output.

```rust,no_run
use outbreak_sim::logging::{set_log_level, LevelFilter};

set_log_level(LevelFilter::Debug).unwrap();
```

*/

use std::sync::Mutex;

pub use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

use crate::error::OutbreakError;

const DEFAULT_LOG_PATTERN: &str = "{h({l})} {d(%H:%M:%S%.3f)} {M} - {m}{n}";

// Holds the handle of the installed logger so the level can be changed after installation.
static LOG_HANDLE: Mutex<Option<Handle>> = Mutex::new(None);

fn build_config(level: LevelFilter) -> Result<Config, OutbreakError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|errors| OutbreakError::LoggingError(errors.to_string()))
}

/// Sets the maximum level that is emitted, installing the logger on first use.
pub fn set_log_level(level: LevelFilter) -> Result<(), OutbreakError> {
    let config = build_config(level)?;
    let mut handle = LOG_HANDLE
        .lock()
        .map_err(|_| OutbreakError::LoggingError("logger state lock poisoned".to_string()))?;

    match handle.as_ref() {
        Some(existing) => existing.set_config(config),
        None => {
            let installed = log4rs::init_config(config)
                .map_err(|error| OutbreakError::LoggingError(error.to_string()))?;
            *handle = Some(installed);
        }
    }
    Ok(())
}

/// Turns on logging at `info` level.
pub fn enable_logging() -> Result<(), OutbreakError> {
    set_log_level(LevelFilter::Info)
}

pub fn disable_logging() -> Result<(), OutbreakError> {
    set_log_level(LevelFilter::Off)
}
