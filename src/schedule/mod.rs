pub use self::configuration::{Schedule, ScheduleConfig, TimerConfig};
pub use self::timer::{forced_state_from_arg, is_time_between, RelayTimer};

mod configuration;
mod timer;
