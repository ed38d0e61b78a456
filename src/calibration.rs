use embedded_hal::i2c::I2c;

use crate::bus::Bus;
use crate::command::{Register, CALIBRATION_LEN};
use crate::error::ConfigError;

/// Oversampling setting (oss) for pressure conversions.
///
/// Higher settings average more internal samples: lower noise, longer
/// conversion time. The temperature conversion is unaffected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    UltraLowPower,
    #[default]
    Standard,
    HighResolution,
    UltraHighResolution,
}

impl Oversampling {
    pub fn value(&self) -> u8 {
        match *self {
            Oversampling::UltraLowPower => 0,
            Oversampling::Standard => 1,
            Oversampling::HighResolution => 2,
            Oversampling::UltraHighResolution => 3,
        }
    }

    /// Gets the maximum pressure conversion time in MICROSECONDS.
    pub fn delay_us(&self) -> u32 {
        // 4.5 / 7.5 / 13.5 / 25.5 ms
        match *self {
            Oversampling::UltraLowPower => 4_500,
            Oversampling::Standard => 7_500,
            Oversampling::HighResolution => 13_500,
            Oversampling::UltraHighResolution => 25_500,
        }
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = ConfigError;

    fn try_from(oss: u8) -> Result<Self, Self::Error> {
        match oss {
            0 => Ok(Oversampling::UltraLowPower),
            1 => Ok(Oversampling::Standard),
            2 => Ok(Oversampling::HighResolution),
            3 => Ok(Oversampling::UltraHighResolution),
            other => Err(ConfigError::InvalidOversampling(other)),
        }
    }
}

/// Factory calibration data read from the on-chip EEPROM (0xAA..=0xBF)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    /// Not used by the compensation formula
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl Calibration {
    /// Parses the 22-byte EEPROM block. Every word is big-endian.
    pub fn from_bytes(buf: &[u8; CALIBRATION_LEN]) -> Calibration {
        let word = |i: usize| [buf[2 * i], buf[2 * i + 1]];
        Calibration {
            ac1: i16::from_be_bytes(word(0)),
            ac2: i16::from_be_bytes(word(1)),
            ac3: i16::from_be_bytes(word(2)),
            ac4: u16::from_be_bytes(word(3)),
            ac5: u16::from_be_bytes(word(4)),
            ac6: u16::from_be_bytes(word(5)),
            b1: i16::from_be_bytes(word(6)),
            b2: i16::from_be_bytes(word(7)),
            mb: i16::from_be_bytes(word(8)),
            mc: i16::from_be_bytes(word(9)),
            md: i16::from_be_bytes(word(10)),
        }
    }

    /// Reads the whole calibration block in one transfer.
    ///
    /// Only needs to be called once per session; the coefficients never change.
    pub fn load<I2C: I2c>(bus: &mut Bus<I2C>) -> Result<Calibration, I2C::Error> {
        let buf = bus.read_block::<CALIBRATION_LEN>(Register::CalibStart)?;
        Ok(Calibration::from_bytes(&buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from the BMP180 datasheet, big-endian on the wire
    const DATASHEET_BYTES: [u8; CALIBRATION_LEN] = [
        0x01, 0x98, 0xFF, 0xB8, 0xC7, 0xD1, 0x7F, 0xE5, 0x7F, 0xF5, 0x5A, 0x71, 0x18, 0x2E, 0x00,
        0x04, 0x80, 0x00, 0xDD, 0xF9, 0x0B, 0x34,
    ];

    #[test]
    fn check_parse_datasheet_block() {
        let cal = Calibration::from_bytes(&DATASHEET_BYTES);
        assert_eq!(cal.ac1, 408);
        assert_eq!(cal.ac2, -72);
        assert_eq!(cal.ac3, -14383);
        assert_eq!(cal.ac4, 32741);
        assert_eq!(cal.ac5, 32757);
        assert_eq!(cal.ac6, 23153);
        assert_eq!(cal.b1, 6190);
        assert_eq!(cal.b2, 4);
        assert_eq!(cal.mb, -32768);
        assert_eq!(cal.mc, -8711);
        assert_eq!(cal.md, 2868);
    }

    #[test]
    fn check_unsigned_coefficients_keep_high_bit() {
        let mut buf = [0u8; CALIBRATION_LEN];
        buf[6] = 0x80; // AC4 MSB
        buf[10] = 0xFF; // AC6 MSB
        buf[11] = 0xFF;
        let cal = Calibration::from_bytes(&buf);
        assert_eq!(cal.ac4, 0x8000);
        assert_eq!(cal.ac6, u16::MAX);
    }

    #[test]
    fn check_oversampling_values() {
        assert_eq!(Oversampling::default(), Oversampling::Standard);
        for oss in 0..4u8 {
            assert_eq!(Oversampling::try_from(oss).map(|o| o.value()), Ok(oss));
        }
        assert_eq!(
            Oversampling::try_from(4),
            Err(ConfigError::InvalidOversampling(4))
        );
    }

    #[test]
    fn check_oversampling_delay() {
        assert_eq!(Oversampling::UltraLowPower.delay_us(), 4_500);
        assert_eq!(Oversampling::Standard.delay_us(), 7_500);
        assert_eq!(Oversampling::HighResolution.delay_us(), 13_500);
        assert_eq!(Oversampling::UltraHighResolution.delay_us(), 25_500);
    }
}
