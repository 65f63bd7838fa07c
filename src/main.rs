#[macro_use]
extern crate serde_derive;

use std::env;
use std::sync::Arc;

use log::{error, info};
use tokio::sync::watch;

use crate::app::App;
#[cfg(not(feature = "gpio"))]
use crate::embedded::fake::FakeOutputDevice;
#[cfg(feature = "gpio")]
use crate::embedded::gpio::SysfsOutputDevice;
use crate::embedded::{PinNumber, RelayLayout};
use crate::error::Error;
use crate::schedule::{forced_state_from_arg, RelayTimer, Schedule, TimerConfig};

mod app;
mod embedded;
mod error;
mod schedule;

#[cfg(feature = "gpio")]
type Device = SysfsOutputDevice;
#[cfg(not(feature = "gpio"))]
type Device = FakeOutputDevice;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("relay timer starting ...");

    let forced_state = forced_state_from_arg(env::args().nth(1).as_deref());

    if let Err(e) = run(forced_state).await {
        error!("{}", e);
    }

    info!("exiting relay timer ...");
    // the loop only ever ends on an interrupt or a startup failure
    std::process::exit(1);
}

async fn run(forced_state: Option<bool>) -> Result<(), Error> {
    let config = TimerConfig::load()?;
    let schedule = Schedule::from_config(config.schedule())?;

    let device = Arc::new(Device::new());
    let layout = RelayLayout::new(config.layout(), device)?;
    let managed = config
        .layout()
        .managed()
        .iter()
        .map(|pin| PinNumber(*pin))
        .collect();

    let (shutdown_sender, shutdown_receiver) = watch::channel(String::new());
    tokio::spawn(App::start(shutdown_sender));

    info!("relay timer started ...");
    let mut timer = RelayTimer::new(layout, managed, schedule, forced_state);
    timer.run(shutdown_receiver).await;
    Ok(())
}
