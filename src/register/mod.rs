//! Register catalog of the BMP085.
//!
//! Every register (or fixed-size block of registers) is a zero-sized marker type
//! carrying its address and length, together with how its bytes decode into a
//! value ([`Readable`]) and how a value encodes into bytes ([`Writable`]).
//! The markers are used with [`crate::bus::Bus`].
pub mod calibration;
pub mod chip_id;
pub mod control;
pub mod data;

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Self::Out;
}

pub trait Writable: Reg {
    type In;
    const N: usize = 1;
    fn encode(v: &Self::In, out: &mut [u8]);
}
