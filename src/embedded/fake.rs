use std::sync::Mutex;

use log::debug;

use crate::embedded::{OutputDevice, PinNumber};
use crate::error::Error;

/// Records every bind and level write instead of touching hardware. Stands
/// in for the GPIO driver when the `gpio` feature is off and backs all tests.
#[derive(Debug, Default)]
pub struct FakeOutputDevice {
    bound: Mutex<Vec<PinNumber>>,
    writes: Mutex<Vec<(PinNumber, bool)>>,
    fail_writes: Mutex<bool>,
}

impl FakeOutputDevice {
    pub fn new() -> FakeOutputDevice {
        FakeOutputDevice::default()
    }

    /// While set, every level write fails and records nothing, as if the
    /// hardware never took the command.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    fn check_writable(&self, pin: PinNumber) -> Result<(), Error> {
        if *self.fail_writes.lock().unwrap() {
            return Err(Error::HardwareWriteFault {
                pin: pin.0,
                cause: "simulated write failure".to_string(),
            });
        }
        Ok(())
    }

    pub fn bound_pins(&self) -> Vec<PinNumber> {
        self.bound.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    /// Levels written to one pin, in order. `true` is high.
    pub fn writes_for(&self, pin: PinNumber) -> Vec<bool> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
            .collect()
    }
}

impl OutputDevice for FakeOutputDevice {
    fn bind(&self, pin: PinNumber) -> Result<(), Error> {
        debug!("binding fake pin {}", pin);
        self.bound.lock().unwrap().push(pin);
        Ok(())
    }

    fn write_high(&self, pin: PinNumber) -> Result<(), Error> {
        self.check_writable(pin)?;
        debug!("fake pin {} set high", pin);
        self.writes.lock().unwrap().push((pin, true));
        Ok(())
    }

    fn write_low(&self, pin: PinNumber) -> Result<(), Error> {
        self.check_writable(pin)?;
        debug!("fake pin {} set low", pin);
        self.writes.lock().unwrap().push((pin, false));
        Ok(())
    }
}
