//! ### ID - Chip identification number (`0xD0`, 1 byte, R)
//!
//! Fixed to `0x55`. Used to check that a BMP085 answers on the configured address.
#![doc(alias = "ID")]
use crate::register::{Readable, Reg};

/// Value of the ID register on every BMP085/BMP180.
pub const BMP085_CHIP_ID: u8 = 0x55;

/// Marker struct for the ID (0xD0) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct ChipId;
impl Reg for ChipId { const ADDR: u8 = 0xD0; }

impl Readable for ChipId {
    type Out = u8;
    fn decode(b: &[u8]) -> Self::Out {
        b[0]
    }
}
