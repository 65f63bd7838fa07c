use std::fmt;
use std::sync::Arc;

use crate::embedded::configuration::LayoutConfig;
use crate::error::Error;

pub mod configuration;
pub mod fake;
#[cfg(feature = "gpio")]
pub mod gpio;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PinNumber(pub u8);

impl fmt::Display for PinNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimal capability a physical digital-output driver has to provide.
pub trait OutputDevice {
    fn bind(&self, pin: PinNumber) -> Result<(), Error>;
    fn write_high(&self, pin: PinNumber) -> Result<(), Error>;
    fn write_low(&self, pin: PinNumber) -> Result<(), Error>;
}

/// One addressable binary output line. The `enabled` flag caches the last
/// successfully commanded level and is never mutated on a failed write.
pub struct Relay<D: OutputDevice> {
    pin: PinNumber,
    enabled: bool,
    device: Arc<D>,
}

impl<D: OutputDevice> Relay<D> {
    /// Binds the pin for output use and immediately commands it off, so no
    /// line floats in an undefined state after creation.
    pub fn new(pin: PinNumber, device: Arc<D>) -> Result<Relay<D>, Error> {
        device.bind(pin)?;
        let mut relay = Relay {
            pin,
            enabled: false,
            device,
        };
        relay.off()?;
        Ok(relay)
    }

    pub fn pin(&self) -> PinNumber {
        self.pin
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn on(&mut self) -> Result<(), Error> {
        self.device.write_high(self.pin)?;
        self.enabled = true;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), Error> {
        self.device.write_low(self.pin)?;
        self.enabled = false;
        Ok(())
    }

    /// Dispatches to `on` or `off`. Safe to call redundantly: the hardware
    /// command is reissued even when the relay is already in the desired
    /// state, so callers that care about write counts skip the call instead.
    pub fn set_enabled(&mut self, desired: bool) -> Result<(), Error> {
        if desired {
            self.on()
        } else {
            self.off()
        }
    }

    pub fn toggle(&mut self) -> Result<(), Error> {
        let next = !self.enabled;
        self.set_enabled(next)
    }
}

/// All known relays, created once at startup and alive for the whole
/// process. The managed subset the timer reconciles is chosen separately.
pub struct RelayLayout<D: OutputDevice> {
    relays: Vec<Relay<D>>,
}

impl<D: OutputDevice> RelayLayout<D> {
    pub fn new(config: &LayoutConfig, device: Arc<D>) -> Result<RelayLayout<D>, Error> {
        let mut relays = Vec::with_capacity(config.pins().len());
        for pin in config.pins() {
            relays.push(Relay::new(PinNumber(*pin), Arc::clone(&device))?);
        }
        Ok(RelayLayout { relays })
    }

    pub fn find_relay(&mut self, pin: PinNumber) -> Option<&mut Relay<D>> {
        self.relays.iter_mut().find(|relay| relay.pin() == pin)
    }

    pub fn relays(&self) -> &[Relay<D>] {
        &self.relays
    }

    pub fn relays_mut(&mut self) -> impl Iterator<Item = &mut Relay<D>> {
        self.relays.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::embedded::configuration::LayoutConfig;
    use crate::embedded::fake::FakeOutputDevice;
    use crate::embedded::{PinNumber, Relay, RelayLayout};

    #[test]
    fn new_relay_is_bound_and_commanded_off_once() {
        let device = Arc::new(FakeOutputDevice::new());
        let relay = Relay::new(PinNumber(31), Arc::clone(&device)).unwrap();

        assert!(!relay.enabled());
        assert_eq!(device.bound_pins(), vec![PinNumber(31)]);
        assert_eq!(device.writes_for(PinNumber(31)), vec![false]);
    }

    #[test]
    fn set_enabled_reissues_the_hardware_command() {
        let device = Arc::new(FakeOutputDevice::new());
        let mut relay = Relay::new(PinNumber(33), Arc::clone(&device)).unwrap();

        relay.set_enabled(true).unwrap();
        relay.set_enabled(true).unwrap();

        assert!(relay.enabled());
        assert_eq!(device.writes_for(PinNumber(33)), vec![false, true, true]);
    }

    #[test]
    fn failed_write_keeps_the_last_commanded_state() {
        let device = Arc::new(FakeOutputDevice::new());
        let mut relay = Relay::new(PinNumber(31), Arc::clone(&device)).unwrap();
        relay.on().unwrap();

        device.set_fail_writes(true);
        assert!(relay.off().is_err());
        assert!(relay.enabled());

        device.set_fail_writes(false);
        relay.off().unwrap();
        assert!(!relay.enabled());
    }

    #[test]
    fn toggle_flips_the_relay_state() {
        let device = Arc::new(FakeOutputDevice::new());
        let mut relay = Relay::new(PinNumber(35), Arc::clone(&device)).unwrap();

        relay.toggle().unwrap();
        assert!(relay.enabled());
        relay.toggle().unwrap();
        assert!(!relay.enabled());
    }

    #[test]
    fn layout_creates_one_relay_per_configured_pin() {
        let device = Arc::new(FakeOutputDevice::new());
        let config = LayoutConfig::with_pins(vec![31, 33, 35, 37], vec![37]);
        let mut layout = RelayLayout::new(&config, Arc::clone(&device)).unwrap();

        assert_eq!(layout.relays().len(), 4);
        assert!(layout.relays().iter().all(|relay| !relay.enabled()));
        assert!(layout.find_relay(PinNumber(37)).is_some());
        assert!(layout.find_relay(PinNumber(12)).is_none());
        // one low-command per pin at construction
        assert_eq!(device.write_count(), 4);
    }
}
