use sysfs_gpio::{Direction, Pin};

use crate::embedded::{OutputDevice, PinNumber};
use crate::error::Error;

/// Drives relays through the sysfs GPIO interface.
pub struct SysfsOutputDevice;

impl SysfsOutputDevice {
    pub fn new() -> SysfsOutputDevice {
        SysfsOutputDevice
    }
}

impl OutputDevice for SysfsOutputDevice {
    fn bind(&self, pin: PinNumber) -> Result<(), Error> {
        let gpio_pin = Pin::new(u64::from(pin.0));
        gpio_pin.export().map_err(|e| write_fault(pin, e))?;
        gpio_pin
            .set_direction(Direction::Out)
            .map_err(|e| write_fault(pin, e))?;
        Ok(())
    }

    fn write_high(&self, pin: PinNumber) -> Result<(), Error> {
        Pin::new(u64::from(pin.0))
            .set_value(1)
            .map_err(|e| write_fault(pin, e))
    }

    fn write_low(&self, pin: PinNumber) -> Result<(), Error> {
        Pin::new(u64::from(pin.0))
            .set_value(0)
            .map_err(|e| write_fault(pin, e))
    }
}

fn write_fault(pin: PinNumber, cause: sysfs_gpio::Error) -> Error {
    Error::HardwareWriteFault {
        pin: pin.0,
        cause: cause.to_string(),
    }
}
