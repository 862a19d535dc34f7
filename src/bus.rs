use crate::error::Bmp085Error;
use crate::register::{Readable, Writable};
use crate::transport::Transport;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::i2c::SevenBitAddress;
use embedded_hal_async::delay::DelayNs;

/// Largest register block moved in a single transfer (the calibration block).
pub const MAX_REG_BYTES: usize = 22;

/// Typed register access for one device.
///
/// Every call maps to exactly one bus transaction, so the bus is never held
/// between a `write` and a following `read`.
#[allow(async_fn_in_trait)]
pub trait Bus {
    type Error;

    async fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp085Error<Self::Error>>;

    async fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp085Error<Self::Error>>;
}

/// A BMP085 at `address` on a shared I2C bus.
pub struct I2c<'a, M: RawMutex, I2C, T> {
    transport: Transport<'a, M, I2C, T>,
    address: SevenBitAddress,
}

impl<'a, M, I2C, T> I2c<'a, M, I2C, T>
where
    M: RawMutex,
    I2C: embedded_hal_async::i2c::I2c,
    T: DelayNs,
{
    pub fn new(transport: Transport<'a, M, I2C, T>, address: SevenBitAddress) -> Self {
        Self { transport, address }
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Gives back the transport, e.g. to hand the bus slot to another device.
    pub fn release(self) -> Transport<'a, M, I2C, T> {
        self.transport
    }
}

impl<M, I2C, T> Bus for I2c<'_, M, I2C, T>
where
    M: RawMutex,
    I2C: embedded_hal_async::i2c::I2c,
    T: DelayNs,
{
    type Error = I2C::Error;

    async fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp085Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES];
        let data = &mut buf[..R::N];
        self.transport.read_registers(self.address, R::ADDR, data).await?;

        Ok(R::decode(data))
    }

    async fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp085Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES + 1];
        buf[0] = W::ADDR;
        W::encode(v, &mut buf[1..=W::N]);
        self.transport.write_registers(self.address, &buf[..=W::N]).await?;

        Ok(())
    }
}
