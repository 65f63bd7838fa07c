use std::time::Duration;

use chrono::NaiveTime;
use log::debug;

use crate::embedded::configuration::LayoutConfig;
use crate::error::Error;

/// Raw daily window configuration. Times are `HH:MM` strings so the config
/// file stays hand-editable; they are parsed once into a [`Schedule`].
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScheduleConfig {
    on_time: String,
    off_time: String,
    check_interval_seconds: u64,
}

impl ScheduleConfig {
    #[cfg(test)]
    pub fn with_window(on_time: &str, off_time: &str, check_interval_seconds: u64) -> Self {
        ScheduleConfig {
            on_time: on_time.to_string(),
            off_time: off_time.to_string(),
            check_interval_seconds,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            on_time: "16:00".to_string(),
            off_time: "23:00".to_string(),
            check_interval_seconds: 60,
        }
    }
}

/// Validated daily on/off window. Immutable after construction.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    on_time: NaiveTime,
    off_time: NaiveTime,
    check_interval: Duration,
}

impl Schedule {
    pub fn from_config(config: &ScheduleConfig) -> Result<Schedule, Error> {
        if config.check_interval_seconds == 0 {
            return Err(Error::InvalidScheduleConfiguration(
                "check_interval_seconds must be positive".to_string(),
            ));
        }
        Ok(Schedule {
            on_time: parse_time(&config.on_time)?,
            off_time: parse_time(&config.off_time)?,
            check_interval: Duration::from_secs(config.check_interval_seconds),
        })
    }

    pub fn on_time(&self) -> NaiveTime {
        self.on_time
    }

    pub fn off_time(&self) -> NaiveTime {
        self.off_time
    }

    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, Error> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| {
        Error::InvalidScheduleConfiguration(format!("bad time of day '{}': {}", value, e))
    })
}

/// Full daemon configuration: `relay-timer.json` in the working directory,
/// overridable through `RELAY_TIMER`-prefixed environment variables. Both
/// sources are optional; absent sections fall back to the board defaults.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TimerConfig {
    #[serde(default)]
    layout: LayoutConfig,
    #[serde(default)]
    schedule: ScheduleConfig,
}

impl TimerConfig {
    pub fn load() -> Result<TimerConfig, Error> {
        let settings = config::Config::builder()
            .add_source(config::File::new("relay-timer", config::FileFormat::Json).required(false))
            .add_source(config::Environment::with_prefix("RELAY_TIMER").separator("__"))
            .build()?;
        let timer_config: TimerConfig = settings.try_deserialize()?;
        debug!("{:?}", timer_config);
        timer_config.layout.validate()?;
        Ok(timer_config)
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }
}
