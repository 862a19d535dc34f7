//! ### OUT_MSB, OUT_LSB, OUT_XLSB - Conversion result (`0xF6` - `0xF8`, R)
//!
//! Holds the result of the last conversion, MSB first. A temperature result is
//! 16 bits wide. A pressure result spans all three registers; only the top
//! `16 + oss` bits are significant.
use crate::register::{Readable, Reg};

pub(crate) const DATA_ADDR: u8 = 0xF6;

/// Marker struct for an uncompensated temperature read (0xF6 - 0xF7)
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
pub struct TemperatureData;
impl Reg for TemperatureData { const ADDR: u8 = DATA_ADDR; }

impl Readable for TemperatureData {
    type Out = u16;

    const N: usize = 2;
    fn decode(b: &[u8]) -> Self::Out {
        u16::from_be_bytes([b[0], b[1]])
    }
}

/// Marker struct for an uncompensated pressure read (0xF6 - 0xF8)
///
/// Decodes to the full 24-bit value. Shift it right by `8 - oss` to get the
/// sample the compensation formula expects.
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
pub struct PressureData;
impl Reg for PressureData { const ADDR: u8 = DATA_ADDR; }

impl Readable for PressureData {
    type Out = u32;

    const N: usize = 3;
    fn decode(b: &[u8]) -> Self::Out {
        u32::from_be_bytes([0, b[0], b[1], b[2]])
    }
}
