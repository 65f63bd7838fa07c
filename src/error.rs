use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Fatal at startup, never raised once the timer loop is running.
    #[error("invalid schedule configuration: {0}")]
    InvalidScheduleConfiguration(String),

    /// A pin-level write failed. Surfaced to the caller, never retried;
    /// the relay keeps its last successfully commanded state.
    #[error("hardware write fault on pin {pin}: {cause}")]
    HardwareWriteFault { pin: u8, cause: String },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
