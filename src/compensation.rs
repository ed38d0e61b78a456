//! Fixed-point compensation, following the BMP180 datasheet (BST-BMP180-DS000,
//! section 3.5 "Calculating pressure and temperature").
//!
//! All intermediate values are 32 bit. Multiplications and additions wrap like
//! the C reference, `/` truncates toward zero and `>> n` is an arithmetic shift,
//! so results match the datasheet bit for bit. A zero divisor can only come
//! from corrupt coefficients and is reported as `None`.

use crate::calibration::{Calibration, Oversampling};
use crate::units::round_to;

/// One uncompensated temperature/pressure pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// UT
    pub ut: u16,
    /// UP, already shifted by `8 - oss`
    pub up: i32,
}

/// Calibrated temperature and pressure in datasheet units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedReading {
    /// Temperature in 0.1 °C
    pub deci_celsius: i32,
    /// Pressure in Pa
    pub pascal: i32,
}

impl CompensatedReading {
    /// Temperature in °C, rounded to one decimal.
    pub fn celsius(&self) -> f32 {
        round_to(self.deci_celsius as f32 / 10.0, 1)
    }

    /// Pressure in hPa, rounded to two decimals.
    pub fn hpa(&self) -> f32 {
        round_to(self.pascal as f32 / 100.0, 2)
    }
}

/// B5, the intermediate temperature term shared with the pressure formula.
pub fn b5(cal: &Calibration, ut: u16) -> Option<i32> {
    let x1 = (i32::from(ut) - i32::from(cal.ac6)).wrapping_mul(i32::from(cal.ac5)) >> 15;
    let x2 = (i32::from(cal.mc) << 11).checked_div(x1.wrapping_add(i32::from(cal.md)))?;
    Some(x1.wrapping_add(x2))
}

/// Temperature in 0.1 °C from B5.
pub fn temperature(b5: i32) -> i32 {
    b5.wrapping_add(8) >> 4
}

/// Pressure in Pa from UP and the B5 of a temperature conversion taken just before.
pub fn pressure(cal: &Calibration, b5: i32, up: i32, oversampling: Oversampling) -> Option<i32> {
    let oss = oversampling.value();

    let b6 = b5.wrapping_sub(4000);
    let b6_sq = b6.wrapping_mul(b6) >> 12;
    let x1 = i32::from(cal.b2).wrapping_mul(b6_sq) >> 11;
    let x2 = i32::from(cal.ac2).wrapping_mul(b6) >> 11;
    let x3 = x1.wrapping_add(x2);
    let b3 = ((i32::from(cal.ac1).wrapping_mul(4).wrapping_add(x3) << oss).wrapping_add(2)) / 4;

    let x1 = i32::from(cal.ac3).wrapping_mul(b6) >> 13;
    let x2 = i32::from(cal.b1).wrapping_mul(b6_sq) >> 16;
    let x3 = x1.wrapping_add(x2).wrapping_add(2) >> 2;
    let b4 = u32::from(cal.ac4).wrapping_mul(x3.wrapping_add(32768) as u32) >> 15;
    let b7 = (up as u32)
        .wrapping_sub(b3 as u32)
        .wrapping_mul(50000 >> oss);

    let p = if b7 < 0x8000_0000 {
        (b7 << 1).checked_div(b4)?
    } else {
        b7.checked_div(b4)?.wrapping_mul(2)
    };
    let p = p as i32;

    let x1 = (p >> 8).wrapping_mul(p >> 8);
    let x1 = x1.wrapping_mul(3038) >> 16;
    let x2 = (-7357i32).wrapping_mul(p) >> 16;
    Some(p.wrapping_add(x1.wrapping_add(x2).wrapping_add(3791) >> 4))
}

/// Compensates a full raw sample.
pub fn compensate(
    cal: &Calibration,
    raw: RawSample,
    oversampling: Oversampling,
) -> Option<CompensatedReading> {
    let b5 = b5(cal, raw.ut)?;
    Some(CompensatedReading {
        deci_celsius: temperature(b5),
        pascal: pressure(cal, b5, raw.up, oversampling)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datasheet() -> Calibration {
        Calibration {
            ac1: 408,
            ac2: -72,
            ac3: -14383,
            ac4: 32741,
            ac5: 32757,
            ac6: 23153,
            b1: 6190,
            b2: 4,
            mb: -32768,
            mc: -8711,
            md: 2868,
        }
    }

    #[test]
    fn check_temp_compensation() {
        let b5 = b5(&datasheet(), 27898).unwrap();
        assert_eq!(temperature(b5), 150);
    }

    #[test]
    fn check_pressure_compensation() {
        let cal = datasheet();
        let b5 = b5(&cal, 27898).unwrap();
        assert_eq!(
            pressure(&cal, b5, 23843, Oversampling::UltraLowPower),
            Some(69964)
        );
    }

    #[test]
    fn check_compensated_reading() {
        let raw = RawSample { ut: 27898, up: 23843 };
        let reading = compensate(&datasheet(), raw, Oversampling::UltraLowPower).unwrap();
        assert_eq!(
            reading,
            CompensatedReading {
                deci_celsius: 150,
                pascal: 69964
            }
        );
        assert_eq!(reading.celsius(), 15.0);
        assert_eq!(reading.hpa(), 699.64);
    }

    #[test]
    fn check_oversampling_leaves_temperature_alone() {
        let cal = datasheet();
        for oss in 0..4u8 {
            let mode = Oversampling::try_from(oss).unwrap();
            let reading = compensate(&cal, RawSample { ut: 27898, up: 23843 << oss }, mode).unwrap();
            assert_eq!(reading.deci_celsius, 150);
        }
    }

    #[test]
    fn check_oversampling_scales_pressure() {
        // The same physical pressure sampled at a higher oss carries extra low bits
        let cal = datasheet();
        let b5 = b5(&cal, 27898).unwrap();
        let base = pressure(&cal, b5, 23843, Oversampling::UltraLowPower).unwrap();
        for oss in 1..4u8 {
            let mode = Oversampling::try_from(oss).unwrap();
            let p = pressure(&cal, b5, 23843 << oss, mode).unwrap();
            assert!((p - base).abs() <= 2, "oss {oss}: {p} vs {base}");
        }
    }

    #[test]
    fn check_pressure_increases_with_raw() {
        let cal = datasheet();
        let b5 = b5(&cal, 27898).unwrap();
        let low = pressure(&cal, b5, 23000, Oversampling::UltraLowPower).unwrap();
        let high = pressure(&cal, b5, 25000, Oversampling::UltraLowPower).unwrap();
        assert!(high > low);
    }

    #[test]
    fn check_zero_divisor_is_rejected() {
        let mut cal = datasheet();
        // X1 + MD == 0 when UT == AC6 and MD == 0
        cal.md = 0;
        assert_eq!(b5(&cal, cal.ac6), None);

        let mut cal = datasheet();
        cal.ac4 = 0;
        let b5 = b5(&cal, 27898).unwrap();
        assert_eq!(pressure(&cal, b5, 23843, Oversampling::UltraLowPower), None);
    }

    #[test]
    fn check_extreme_raw_values_do_not_panic() {
        let cal = datasheet();
        for ut in [0u16, u16::MAX] {
            if let Some(b5) = b5(&cal, ut) {
                let _ = temperature(b5);
                let _ = pressure(&cal, b5, 0, Oversampling::UltraHighResolution);
                let _ = pressure(&cal, b5, (1 << 19) - 1, Oversampling::UltraHighResolution);
            }
        }
    }
}
