use chrono::{Local, NaiveTime};
use log::{info, warn};
use tokio::sync::watch;

use crate::embedded::{OutputDevice, PinNumber, RelayLayout};
use crate::schedule::configuration::Schedule;

/// Inclusive membership test for a daily time window. `begin >= end` means
/// the window crosses midnight; `begin == end` makes every instant a member.
pub fn is_time_between(begin: NaiveTime, end: NaiveTime, now: NaiveTime) -> bool {
    if begin < end {
        now >= begin && now <= end
    } else {
        now >= begin || now <= end
    }
}

/// Resolves the optional CLI token into an override. `true`/`on` and
/// `false`/`off` (case-insensitive) force that state for the whole run;
/// anything else, or no token, selects schedule mode.
pub fn forced_state_from_arg(arg: Option<&str>) -> Option<bool> {
    match arg.map(|a| a.to_lowercase()) {
        Some(ref a) if a == "true" || a == "on" => Some(true),
        Some(ref a) if a == "false" || a == "off" => Some(false),
        _ => None,
    }
}

/// Keeps the managed relays in sync with the daily window or an operator
/// override, one tick per check interval.
pub struct RelayTimer<D: OutputDevice> {
    layout: RelayLayout<D>,
    managed: Vec<PinNumber>,
    schedule: Schedule,
    forced_state: Option<bool>,
}

impl<D: OutputDevice> RelayTimer<D> {
    pub fn new(
        layout: RelayLayout<D>,
        managed: Vec<PinNumber>,
        schedule: Schedule,
        forced_state: Option<bool>,
    ) -> RelayTimer<D> {
        RelayTimer {
            layout,
            managed,
            schedule,
            forced_state,
        }
    }

    pub fn desired_state(&self, now: NaiveTime) -> bool {
        match self.forced_state {
            Some(state) => state,
            None => is_time_between(self.schedule.on_time(), self.schedule.off_time(), now),
        }
    }

    /// One reconciliation pass over the managed relays.
    pub fn tick(&mut self, now: NaiveTime) {
        let desired = self.desired_state(now);
        match self.forced_state {
            Some(state) => info!("forced state mode: {}", state),
            None => info!(
                "schedule mode: {} - {}",
                self.schedule.on_time(),
                self.schedule.off_time()
            ),
        }
        info!("relays should be on: {}", desired);

        for pin in &self.managed {
            if let Some(relay) = self.layout.find_relay(*pin) {
                if relay.enabled() != desired {
                    if let Err(e) = relay.set_enabled(desired) {
                        warn!("{}", e);
                    }
                }
                info!("relay pin {} is on: {}", relay.pin(), relay.enabled());
            }
        }
    }

    /// Shutdown safety operation: every known relay goes off, managed or not.
    pub fn reset_all_relays(&mut self) {
        for relay in self.layout.relays_mut() {
            if let Err(e) = relay.off() {
                warn!("{}", e);
            }
        }
    }

    /// Ticks until a shutdown notification arrives, then resets all relays
    /// and returns. The notification is also honored mid-sleep.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<String>) {
        loop {
            self.tick(Local::now().time());
            tokio::select! {
                _ = tokio::time::sleep(self.schedule.check_interval()) => {}
                _ = shutdown.changed() => {
                    info!("shutdown requested, forcing all relays off");
                    self.reset_all_relays();
                    return;
                }
            }
        }
    }

    #[cfg(test)]
    pub fn layout(&self) -> &RelayLayout<D> {
        &self.layout
    }
}
