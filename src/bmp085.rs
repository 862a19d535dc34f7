use crate::bus::{Bus, I2c};
use crate::calibration::CalibrationData;
use crate::config::Configuration;
use crate::error::Bmp085Error;
use crate::register::chip_id::{ChipId, BMP085_CHIP_ID};
use crate::register::control::{Control, ControlCommand, Oversampling};
use crate::register::data::{PressureData, TemperatureData};
use crate::transport::Transport;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::delay::DelayNs;

/// Type alias for a Bmp085 on a shared I2C bus
pub type Bmp085I2c<'a, M, I2C, T, D> = Bmp085<I2c<'a, M, I2C, T>, D>;

/// Type alias used to simplify return types throughout the driver
pub type Bmp085Result<T, BusError> = Result<T, Bmp085Error<BusError>>;

/// Main Bmp085 driver struct
///
/// `D` is used for the conversion waits between starting a conversion and
/// reading its result. The bus is not held during these waits.
pub struct Bmp085<B, D> {
    bus: B,
    delay: D,
    calibration_data: CalibrationData,
    oversampling: Oversampling,
}

impl<'a, M, I2C, T, D> Bmp085I2c<'a, M, I2C, T, D>
where
    M: RawMutex,
    I2C: embedded_hal_async::i2c::I2c,
    T: DelayNs,
    D: DelayNs,
{
    /// Constructs a new Bmp085 driver on a shared I2C bus.
    ///
    /// `timer` bounds each bus transaction, `delay` paces the conversions. Both can be
    /// the same kind of delay provider.
    ///
    /// This function will:
    /// - Probe for a connected BMP085 device.
    /// - Load calibration coefficients from the E2PROM
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    /// # use embassy_sync::mutex::Mutex;
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use embedded_hal_async::i2c::I2c;
    /// # use bmp085_rs::Bmp085Result;
    ///  use bmp085_rs::Bmp085;
    ///  use bmp085_rs::config::Configuration;
    ///  use bmp085_rs::register::control::Oversampling;
    /// # async fn demo<I: I2c, D: DelayNs + Clone>(bus: &Mutex<NoopRawMutex, I>, delay: D) -> Bmp085Result<(), I::Error> {
    ///
    ///  let mut device = Bmp085::new_i2c(bus, delay.clone(), Configuration::default(), delay).await?;
    ///
    ///  let temperature = device.read_temperature().await?;
    ///  let pressure = device.read_pressure(Oversampling::HighResolution).await?;
    ///  let _ = (temperature.celsius(), pressure.hectopascals());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new_i2c(
        bus: &'a Mutex<M, I2C>,
        timer: T,
        config: Configuration,
        delay: D,
    ) -> Bmp085Result<Self, I2C::Error> {
        let transport = Transport::new(bus, timer).with_timeout_us(config.transaction_timeout_us);

        Self::new(I2c::new(transport, config.address), config, delay).await
    }
}

impl<B, D> Bmp085<B, D>
where
    B: Bus,
    D: DelayNs,
{
    /// Probes if the device is ready by attempting to read ChipId `attempts` times with a 1 ms delay.
    ///
    /// Returns [`Bmp085Error::NotConnected`] if no response is received.
    async fn probe_ready(bus: &mut B, delay: &mut D, attempts: u32) -> Bmp085Result<(), B::Error> {
        for _ in 0..attempts {
            if let Ok(id) = bus.read::<ChipId>().await {
                if id == BMP085_CHIP_ID {
                    return Ok(());
                }
            }

            delay.delay_ms(1).await;
        }

        warn!("no BMP085 answered after {=u32} attempts", attempts);
        Err(Bmp085Error::NotConnected)
    }

    /// Creates a new instance of the Bmp085 driver struct with the given configuration.
    pub(crate) async fn new(mut bus: B, config: Configuration, mut delay: D) -> Bmp085Result<Self, B::Error> {
        // Start-up time after power on is 10 ms, the probe rides it out.
        Self::probe_ready(&mut bus, &mut delay, config.probe_attempts).await?;

        let calibration_data = CalibrationData::new(&mut bus).await?;

        Ok(Bmp085 {
            bus,
            delay,
            calibration_data,
            oversampling: config.oversampling,
        })
    }

    /// Determines if the BMP085 device is connected by attempting to read the [`ChipId`] (0xD0) register.
    pub async fn is_connected(&mut self) -> Bmp085Result<bool, B::Error> {
        let id = self.bus.read::<ChipId>().await?;

        Ok(id == BMP085_CHIP_ID)
    }

    /// Reads the calibration coefficients from the device again.
    ///
    /// The stored calibration is only replaced once the whole block has been read,
    /// a failed read leaves the previous calibration in place. The correction term
    /// starts over at zero, so run [`read_temperature`](Self::read_temperature)
    /// before the next pressure read.
    pub async fn load_calibration(&mut self) -> Bmp085Result<&CalibrationData, B::Error> {
        self.calibration_data = CalibrationData::new(&mut self.bus).await?;

        Ok(&self.calibration_data)
    }

    /// The calibration in use, including the current correction term.
    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration_data
    }

    /// Starts a conversion and waits for it to finish.
    ///
    /// The command write is its own bus transaction, so other devices can use the
    /// bus while the sensor converts.
    async fn convert(&mut self, command: ControlCommand) -> Bmp085Result<(), B::Error> {
        trace!("starting conversion {}", command);
        self.bus.write::<Control>(&command).await?;
        self.delay.delay_us(command.conversion_time_us()).await;

        Ok(())
    }

    /// Runs a temperature conversion and returns the uncompensated sample.
    pub async fn read_raw_temperature(&mut self) -> Bmp085Result<u16, B::Error> {
        self.convert(ControlCommand::Temperature).await?;

        self.bus.read::<TemperatureData>().await
    }

    /// Runs a pressure conversion and returns the uncompensated sample, already
    /// shifted right by `8 - oss`.
    pub async fn read_raw_pressure(&mut self, oversampling: Oversampling) -> Bmp085Result<u32, B::Error> {
        self.convert(ControlCommand::Pressure(oversampling)).await?;
        let raw = self.bus.read::<PressureData>().await?;

        Ok(raw >> (8 - oversampling.oss()))
    }

    /// Measures the temperature.
    ///
    /// Also updates the correction term that [`read_pressure`](Self::read_pressure)
    /// depends on. If anything fails the correction term keeps its previous value.
    pub async fn read_temperature(&mut self) -> Bmp085Result<Temperature, B::Error> {
        let raw = self.read_raw_temperature().await?;

        Ok(self.calibration_data.compensate_temperature(raw)?)
    }

    /// Measures the pressure with the given oversampling setting.
    ///
    /// Compensation uses the correction term of the last successful
    /// [`read_temperature`](Self::read_temperature). Calling this before any
    /// temperature read gives wrong values, and the driver does not detect it.
    /// Use [`read_sensor_data`](Self::read_sensor_data) to get both in the right order.
    pub async fn read_pressure(&mut self, oversampling: Oversampling) -> Bmp085Result<Pressure, B::Error> {
        let raw = self.read_raw_pressure(oversampling).await?;

        Ok(self.calibration_data.compensate_pressure(raw, oversampling)?)
    }

    /// Reads temperature, then pressure at the configured oversampling setting.
    pub async fn read_sensor_data(&mut self) -> Bmp085Result<Measurement, B::Error> {
        let temperature = self.read_temperature().await?;
        let pressure = self.read_pressure(self.oversampling).await?;

        Ok(Measurement { temperature, pressure })
    }

    /// The oversampling setting used by [`read_sensor_data`](Self::read_sensor_data).
    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }

    pub fn set_oversampling(&mut self, oversampling: Oversampling) {
        self.oversampling = oversampling;
    }

    /// Destroys the driver and hands back the bus and delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

/// A compensated temperature.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    /// Temperature in 0.1 °C steps.
    pub tenths_celsius: i32,
    /// The `B5` term this conversion produced, needed to compensate pressure.
    pub correction_term: i32,
}

impl Temperature {
    pub fn celsius(&self) -> f32 {
        self.tenths_celsius as f32 * 0.1
    }
}

/// A compensated pressure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pressure {
    pub pascals: i32,
}

impl Pressure {
    pub fn hectopascals(&self) -> f32 {
        self.pascals as f32 * 0.01
    }
}

/// Holds a temperature and the pressure compensated with it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub temperature: Temperature,
    pub pressure: Pressure,
}
