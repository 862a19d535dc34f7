use crate::bmp085::{Bmp085Result, Pressure, Temperature};
use crate::bus::Bus;
use crate::error::ArithmeticHazard;
use crate::register::calibration::{Calibration, CalibrationCoefficients};
use crate::register::control::Oversampling;

/// Calibration coefficients of one sensor together with the temperature correction
/// term (`B5`) of the most recent temperature compensation.
///
/// The integer arithmetic follows the datasheet formula step by step, including
/// its truncating shifts and divisions. Intermediate results wrap like the 32-bit
/// arithmetic the formula was written for.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationData {
    coefficients: CalibrationCoefficients,
    b5: i32,
}

impl CalibrationData {
    /// Reads the calibration block from the device.
    ///
    /// The correction term starts out as zero.
    pub async fn new<B: Bus>(bus: &mut B) -> Bmp085Result<Self, B::Error> {
        let coefficients = bus.read::<Calibration>().await?;
        debug!("calibration coefficients: {}", coefficients);

        Ok(Self::from_coefficients(coefficients))
    }

    pub fn from_coefficients(coefficients: CalibrationCoefficients) -> Self {
        Self { coefficients, b5: 0 }
    }

    pub fn coefficients(&self) -> &CalibrationCoefficients {
        &self.coefficients
    }

    /// `B5` from the last successful temperature compensation, 0 if there was none.
    pub fn correction_term(&self) -> i32 {
        self.b5
    }

    /// Converts an uncompensated temperature sample and stores the resulting
    /// correction term for [`compensate_pressure`](Self::compensate_pressure).
    ///
    /// On error the stored correction term is left as it was.
    pub fn compensate_temperature(&mut self, raw: u16) -> Result<Temperature, ArithmeticHazard> {
        let c = &self.coefficients;

        let x1 = (raw as i32 - c.ac6 as i32).wrapping_mul(c.ac5 as i32) >> 15;
        let divisor = x1.wrapping_add(c.md as i32);
        if divisor == 0 {
            warn!("temperature compensation divides by zero (x1 = {=i32})", x1);
            return Err(ArithmeticHazard::TemperatureDivisor);
        }
        let x2 = ((c.mc as i32) << 11).wrapping_div(divisor);
        let b5 = x1.wrapping_add(x2);

        self.b5 = b5;

        Ok(Temperature {
            tenths_celsius: b5.wrapping_add(8) >> 4,
            correction_term: b5,
        })
    }

    /// Converts an uncompensated pressure sample, already shifted right by
    /// `8 - oss`, using the stored correction term.
    ///
    /// The correction term must come from a temperature compensation that ran
    /// shortly before; this is not checked.
    pub fn compensate_pressure(
        &self,
        raw: u32,
        oversampling: Oversampling,
    ) -> Result<Pressure, ArithmeticHazard> {
        let c = &self.coefficients;
        let oss = oversampling.oss() as u32;

        let b6 = self.b5.wrapping_sub(4000);
        let b6_squared = b6.wrapping_mul(b6) >> 12;

        let x1 = (c.b2 as i32).wrapping_mul(b6_squared) >> 11;
        let x2 = (c.ac2 as i32).wrapping_mul(b6) >> 11;
        let x3 = x1.wrapping_add(x2);
        let b3 = ((c.ac1 as i32 * 4).wrapping_add(x3) << oss).wrapping_add(2) >> 2;

        let x1 = (c.ac3 as i32).wrapping_mul(b6) >> 13;
        let x2 = (c.b1 as i32).wrapping_mul(b6_squared) >> 16;
        let x3 = x1.wrapping_add(x2).wrapping_add(2) >> 2;
        let b4 = (c.ac4 as u32).wrapping_mul(x3.wrapping_add(32768) as u32) >> 15;
        if b4 == 0 {
            warn!("pressure compensation divides by zero (x3 = {=i32})", x3);
            return Err(ArithmeticHazard::PressureDivisor);
        }

        let b7 = raw.wrapping_sub(b3 as u32).wrapping_mul(50000 >> oss);
        // Keeps b7 * 2 inside u32; above 2^31 divide first and lose the last bit.
        let p = if b7 < 0x8000_0000 {
            (b7 * 2) / b4
        } else {
            (b7 / b4).wrapping_mul(2)
        };
        let p = p as i32;

        let x1 = (p >> 8).wrapping_mul(p >> 8);
        let x1 = x1.wrapping_mul(3038) >> 16;
        let x2 = (-7357i32).wrapping_mul(p) >> 16;

        Ok(Pressure {
            pascals: p.wrapping_add(x1.wrapping_add(x2).wrapping_add(3791) >> 4),
        })
    }
}
