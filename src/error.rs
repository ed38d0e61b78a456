use core::fmt;

/// Invalid construction parameters. Detected before any bus traffic.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Not a 7-bit, non-reserved I²C address (0x08..=0x77)
    InvalidAddress(u8),
    /// Oversampling setting outside 0..=3
    InvalidOversampling(u8),
    /// Sea-level reference pressure must be finite and positive
    InvalidSeaLevelPressure,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError<E> {
    /// Underlying bus failure. Never retried by the driver.
    Io(E),
    Configuration(ConfigError),
    /// No calibration coefficients are loaded.
    Uncalibrated,
    /// The id register did not hold the BMP180 chip id.
    InvalidChipId(u8),
    /// The coefficients lead to a zero divisor in the compensation formula.
    InvalidCalibration,
    /// The bus was released by `close()`.
    Closed,
}

impl<E> From<ConfigError> for DeviceError<E> {
    fn from(err: ConfigError) -> Self {
        DeviceError::Configuration(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAddress(addr) => write!(f, "invalid i2c address {addr:#04x}"),
            ConfigError::InvalidOversampling(oss) => {
                write!(f, "invalid oversampling setting {oss}")
            }
            ConfigError::InvalidSeaLevelPressure => f.write_str("invalid sea-level pressure"),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for DeviceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Io(err) => write!(f, "bus error: {err:?}"),
            DeviceError::Configuration(err) => write!(f, "configuration error: {err}"),
            DeviceError::Uncalibrated => f.write_str("calibration coefficients not loaded"),
            DeviceError::InvalidChipId(id) => write!(f, "unexpected chip id {id:#04x}"),
            DeviceError::InvalidCalibration => f.write_str("calibration coefficients are invalid"),
            DeviceError::Closed => f.write_str("device session is closed"),
        }
    }
}
