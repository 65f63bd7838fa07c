use crate::error::Error;

/// Pin numbers of all known relays plus the ordered subset the timer keeps
/// in sync with the schedule. Relays outside the subset are still created
/// and still forced off on shutdown.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LayoutConfig {
    pins: Vec<u8>,
    managed: Vec<u8>,
}

impl LayoutConfig {
    pub fn pins(&self) -> &[u8] {
        &self.pins
    }

    pub fn managed(&self) -> &[u8] {
        &self.managed
    }

    pub fn validate(&self) -> Result<(), Error> {
        for pin in &self.managed {
            if !self.pins.contains(pin) {
                return Err(Error::InvalidScheduleConfiguration(format!(
                    "managed pin {} is not a configured relay pin",
                    pin
                )));
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn with_pins(pins: Vec<u8>, managed: Vec<u8>) -> LayoutConfig {
        LayoutConfig { pins, managed }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        // board wiring of the original relay hat: four relays, one in use
        LayoutConfig {
            pins: vec![31, 33, 35, 37],
            managed: vec![37],
        }
    }
}
