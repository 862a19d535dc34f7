use crate::register::control::Oversampling;
use crate::transport::DEFAULT_TIMEOUT_US;
use embedded_hal::i2c::SevenBitAddress;

/// The fixed I2C address of the BMP085/BMP180.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x77;

/// Driver settings applied when constructing a [`crate::Bmp085`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub(crate) address: SevenBitAddress,
    pub(crate) oversampling: Oversampling,
    pub(crate) transaction_timeout_us: u32,
    pub(crate) probe_attempts: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            oversampling: Oversampling::Standard,
            transaction_timeout_us: DEFAULT_TIMEOUT_US,
            probe_attempts: 5,
        }
    }
}

impl Configuration {
    pub fn address(mut self, address: SevenBitAddress) -> Self {
        self.address = address;

        self
    }

    /// Oversampling used by [`crate::Bmp085::read_sensor_data`].
    pub fn oversampling(mut self, oversampling: Oversampling) -> Self {
        self.oversampling = oversampling;

        self
    }

    /// Upper bound for every single bus transaction.
    pub fn transaction_timeout_us(mut self, timeout_us: u32) -> Self {
        self.transaction_timeout_us = timeout_us;

        self
    }

    /// How many times the chip id is polled, 1 ms apart, before giving up with
    /// [`crate::Bmp085Error::NotConnected`].
    pub fn probe_attempts(mut self, attempts: u32) -> Self {
        self.probe_attempts = attempts;

        self
    }
}
