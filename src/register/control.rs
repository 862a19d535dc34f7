//! ### CTRL_MEAS - Measurement control (`0xF4`, 1 byte, W)
//!
//! Writing a command byte starts a conversion:
//! - `0x2E` starts a temperature conversion (4.5 ms max).
//! - `0x34 + (oss << 6)` starts a pressure conversion with oversampling setting
//!   `oss`, see [`Oversampling`].
//!
//! The result appears in the data registers, see [`crate::register::data`].
#![doc(alias = "CTRL_MEAS")]
use crate::register::{Reg, Writable};

pub(crate) const CONTROL_ADDR: u8 = 0xF4;
pub(crate) const TEMPERATURE_COMMAND: u8 = 0x2E;
const PRESSURE_COMMAND: u8 = 0x34;

/// Time to wait after starting a temperature conversion.
pub const TEMPERATURE_CONVERSION_TIME_US: u32 = 5_000;

/// Marker type for the CTRL_MEAS (0xF4) register
pub struct Control;
impl Reg for Control { const ADDR: u8 = CONTROL_ADDR; }

/// The conversion to start.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlCommand {
    Temperature,
    Pressure(Oversampling),
}

impl ControlCommand {
    /// How long the conversion started by this command takes at most, in microseconds.
    pub fn conversion_time_us(self) -> u32 {
        match self {
            ControlCommand::Temperature => TEMPERATURE_CONVERSION_TIME_US,
            ControlCommand::Pressure(oversampling) => oversampling.conversion_time_us(),
        }
    }
}

impl From<ControlCommand> for u8 {
    fn from(command: ControlCommand) -> u8 {
        match command {
            ControlCommand::Temperature => TEMPERATURE_COMMAND,
            ControlCommand::Pressure(oversampling) => oversampling.command(),
        }
    }
}

impl Writable for Control {
    type In = ControlCommand;
    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = (*v).into();
    }
}

/// Pressure oversampling setting (`oss`).
///
/// The device averages 1, 2, 4 or 8 internal samples per pressure conversion.
/// Higher settings lower the noise at the cost of conversion time and current.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// oss = 0, 1 sample, 4.5 ms
    UltraLowPower,
    /// oss = 1, 2 samples, 7.5 ms
    #[default]
    Standard,
    /// oss = 2, 4 samples, 13.5 ms
    HighResolution,
    /// oss = 3, 8 samples, 25.5 ms
    UltraHighResolution,
}

impl Oversampling {
    /// The `oss` ordinal used in the compensation formula.
    pub fn oss(self) -> u8 {
        match self {
            Oversampling::UltraLowPower => 0,
            Oversampling::Standard => 1,
            Oversampling::HighResolution => 2,
            Oversampling::UltraHighResolution => 3,
        }
    }

    /// The CTRL_MEAS command byte that starts a pressure conversion at this setting.
    pub fn command(self) -> u8 {
        PRESSURE_COMMAND + (self.oss() << 6)
    }

    /// Time to wait for a pressure conversion at this setting, in microseconds.
    ///
    /// Rounded up from the datasheet maximum to whole milliseconds.
    pub fn conversion_time_us(self) -> u32 {
        match self {
            Oversampling::UltraLowPower => 5_000,
            Oversampling::Standard => 8_000,
            Oversampling::HighResolution => 14_000,
            Oversampling::UltraHighResolution => 26_000,
        }
    }
}

/// Out-of-range values select [`Oversampling::UltraHighResolution`], the setting
/// with the longest wait.
impl From<u8> for Oversampling {
    fn from(oss: u8) -> Self {
        match oss {
            0 => Oversampling::UltraLowPower,
            1 => Oversampling::Standard,
            2 => Oversampling::HighResolution,
            _ => Oversampling::UltraHighResolution,
        }
    }
}
