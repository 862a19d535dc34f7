//! Errors that can occur when using the BMP085 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with the BMP085.
//! It is generic over the underlying I2C error type.

use crate::transport::TransportError;
use embedded_hal::i2c::{Error, ErrorKind};

/// This represents all possible errors that can occur when using the BMP085 device.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp085Error<BusError> {
    /// An error has occurred in the I2C driver
    Bus(BusError),

    /// A bus transaction did not complete within the transport timeout.
    ///
    /// The bus has been released again, retrying is safe.
    Timeout,

    /// Unable to communicate with the BMP085
    ///
    /// Could possibly indicate an error with pin configuration and/or wiring.
    NotConnected,

    /// The compensation formula would divide by zero for this calibration and sample.
    ///
    /// No value was produced and the stored correction term was not touched.
    ArithmeticHazard(ArithmeticHazard),
}

/// The division in the compensation formula whose divisor came out as zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArithmeticHazard {
    /// `x1 + MD == 0` in the temperature path.
    TemperatureDivisor,
    /// `B4 == 0` in the pressure path.
    PressureDivisor,
}

impl<E> From<TransportError<E>> for Bmp085Error<E> {
    fn from(error: TransportError<E>) -> Self {
        match error {
            TransportError::Timeout => Bmp085Error::Timeout,
            TransportError::Bus(e) => Bmp085Error::Bus(e),
        }
    }
}

impl<E> From<ArithmeticHazard> for Bmp085Error<E> {
    fn from(hazard: ArithmeticHazard) -> Self {
        Bmp085Error::ArithmeticHazard(hazard)
    }
}

impl<E: Error> Bmp085Error<E> {
    /// Returns `true` if the sensor did not acknowledge a transfer.
    pub fn is_nack(&self) -> bool {
        match self {
            Bmp085Error::Bus(e) => matches!(e.kind(), ErrorKind::NoAcknowledge(_)),
            _ => false,
        }
    }
}
