//! Register transport over a shared I2C bus.
//!
//! Several device drivers (the BMP085, an RTC, ...) usually hang off the same I2C
//! peripheral. The peripheral lives in an [`embassy_sync::mutex::Mutex`] and every
//! driver gets its own [`Transport`] borrowing that mutex. Each transport call is one
//! bus transaction:
//!
//! 1. acquire the bus,
//! 2. run the transfer, bounded by the transport timeout,
//! 3. release the bus.
//!
//! The bus is released on every path out of a call, including timeouts and bus
//! errors, because the mutex guard is dropped when the call returns.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal::i2c::{Error, ErrorKind, SevenBitAddress};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Default upper bound for a single bus transaction, in microseconds.
pub const DEFAULT_TIMEOUT_US: u32 = 4_000;

/// Errors produced by a single bus transaction.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// The transfer did not complete within the transport timeout.
    ///
    /// The bus has been released, so the caller may retry.
    Timeout,

    /// The I2C peripheral reported an error, passed through unchanged.
    Bus(E),
}

impl<E: Error> TransportError<E> {
    /// Returns `true` if the device (or its address) did not acknowledge.
    ///
    /// This usually points at wiring or a wrong device address.
    pub fn is_nack(&self) -> bool {
        match self {
            TransportError::Bus(e) => matches!(e.kind(), ErrorKind::NoAcknowledge(_)),
            TransportError::Timeout => false,
        }
    }
}

/// A handle onto a shared I2C bus that performs bounded, mutually exclusive
/// register transactions.
///
/// `T` is the timer used to bound each transfer; it is independent of any delay a
/// driver uses between transactions.
pub struct Transport<'a, M: RawMutex, I2C, T> {
    bus: &'a Mutex<M, I2C>,
    timer: T,
    timeout_us: u32,
}

impl<'a, M, I2C, T> Transport<'a, M, I2C, T>
where
    M: RawMutex,
    I2C: I2c,
    T: DelayNs,
{
    /// Creates a transport on `bus` using [`DEFAULT_TIMEOUT_US`].
    pub fn new(bus: &'a Mutex<M, I2C>, timer: T) -> Self {
        Self {
            bus,
            timer,
            timeout_us: DEFAULT_TIMEOUT_US,
        }
    }

    /// Sets the per-transaction timeout.
    pub fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;

        self
    }

    /// Returns the per-transaction timeout in microseconds.
    pub fn timeout_us(&self) -> u32 {
        self.timeout_us
    }

    /// Reads `buf.len()` contiguous registers starting at `start_register`.
    pub async fn read_registers(
        &mut self,
        address: SevenBitAddress,
        start_register: u8,
        buf: &mut [u8],
    ) -> Result<(), TransportError<I2C::Error>> {
        self.transmit(address, &[start_register], buf).await
    }

    /// Reads a single register.
    pub async fn read_register(
        &mut self,
        address: SevenBitAddress,
        register: u8,
    ) -> Result<u8, TransportError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.transmit(address, &[register], &mut buf).await?;

        Ok(buf[0])
    }

    /// Writes `bytes[1..]` to consecutive registers starting at register `bytes[0]`.
    pub async fn write_registers(
        &mut self,
        address: SevenBitAddress,
        bytes: &[u8],
    ) -> Result<(), TransportError<I2C::Error>> {
        self.transmit(address, bytes, &mut []).await
    }

    /// One write, optionally followed by a read, under the bus lock.
    async fn transmit(
        &mut self,
        address: SevenBitAddress,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), TransportError<I2C::Error>> {
        let mut i2c = self.bus.lock().await;

        let transfer = async {
            if read.is_empty() {
                i2c.write(address, write).await
            } else {
                i2c.write_read(address, write, read).await
            }
        };

        match select(transfer, self.timer.delay_us(self.timeout_us)).await {
            Either::First(result) => result.map_err(TransportError::Bus),
            Either::Second(()) => {
                warn!("i2c transaction with {=u8:#x} timed out", address);
                Err(TransportError::Timeout)
            }
        }
    }
}
