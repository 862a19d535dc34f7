//! ### AC1 .. MD - Calibration coefficients (`0xAA` - `0xBF`, 22 bytes, R)
//!
//! Eleven 16-bit words burned into the E2PROM at manufacture, stored MSB first.
//! AC4, AC5 and AC6 are unsigned, all others are two's complement.
#![doc(alias = "E2PROM")]
use crate::register::{Readable, Reg};

/// Marker struct for the calibration block (0xAA - 0xBF)
///
/// - **Length:** 22 bytes
/// - **Access:** Read-only
pub struct Calibration;
impl Reg for Calibration { const ADDR: u8 = 0xAA; }

/// The raw calibration words in register order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationCoefficients {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl Readable for Calibration {
    type Out = CalibrationCoefficients;

    const N: usize = 22;
    fn decode(b: &[u8]) -> Self::Out {
        CalibrationCoefficients {
            ac1: i16::from_be_bytes([b[0], b[1]]),
            ac2: i16::from_be_bytes([b[2], b[3]]),
            ac3: i16::from_be_bytes([b[4], b[5]]),
            ac4: u16::from_be_bytes([b[6], b[7]]),
            ac5: u16::from_be_bytes([b[8], b[9]]),
            ac6: u16::from_be_bytes([b[10], b[11]]),
            b1: i16::from_be_bytes([b[12], b[13]]),
            b2: i16::from_be_bytes([b[14], b[15]]),
            mb: i16::from_be_bytes([b[16], b[17]]),
            mc: i16::from_be_bytes([b[18], b[19]]),
            md: i16::from_be_bytes([b[20], b[21]]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_decode_datasheet_example() {
        let coeffs = Calibration::decode(&[
            0x01, 0x98, 0xFF, 0xB8, 0xC7, 0xD1, 0x7F, 0xE5, 0x7F, 0xF5, 0x5A, 0x71, 0x18, 0x2E,
            0x00, 0x04, 0x80, 0x00, 0xDD, 0xF9, 0x0B, 0x34,
        ]);

        assert_eq!(408, coeffs.ac1);
        assert_eq!(-72, coeffs.ac2);
        assert_eq!(-14383, coeffs.ac3);
        assert_eq!(32741, coeffs.ac4);
        assert_eq!(32757, coeffs.ac5);
        assert_eq!(23153, coeffs.ac6);
        assert_eq!(6190, coeffs.b1);
        assert_eq!(4, coeffs.b2);
        assert_eq!(-32768, coeffs.mb);
        assert_eq!(-8711, coeffs.mc);
        assert_eq!(2868, coeffs.md);
    }

    #[test]
    fn calibration_decode_sign_depends_on_word() {
        // Same bit pattern in every word: only AC4..AC6 read it as unsigned.
        let mut bytes = [0u8; 22];
        for word in bytes.chunks_mut(2) {
            word.copy_from_slice(&[0xFF, 0xFE]);
        }
        let coeffs = Calibration::decode(&bytes);

        assert_eq!(-2, coeffs.ac1);
        assert_eq!(-2, coeffs.ac3);
        assert_eq!(0xFFFE, coeffs.ac4);
        assert_eq!(0xFFFE, coeffs.ac5);
        assert_eq!(0xFFFE, coeffs.ac6);
        assert_eq!(-2, coeffs.b1);
        assert_eq!(-2, coeffs.md);
    }
}
