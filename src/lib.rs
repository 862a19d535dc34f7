//! Async driver for the Bosch BMP085 (and pin compatible BMP180) barometric
//! pressure and temperature sensor.
//!
//! The sensor is expected to share its I2C peripheral with other devices. The
//! peripheral is kept in an [`embassy_sync::mutex::Mutex`] and the driver only
//! holds it for the duration of a single transfer, see [`transport`].
//!
//! Temperature has to be read before pressure: the temperature compensation
//! produces the correction term the pressure compensation depends on.
//! [`Bmp085::read_sensor_data`] does both in order.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod bmp085;
pub mod bus;
pub mod calibration;
pub mod config;
pub mod error;
pub mod register;
pub mod transport;

#[cfg(test)]
mod testing;

pub use bmp085::{Bmp085, Bmp085I2c, Bmp085Result, Measurement, Pressure, Temperature};
pub use error::{ArithmeticHazard, Bmp085Error};
pub use transport::{Transport, TransportError};
