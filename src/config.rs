use crate::calibration::Oversampling;
use crate::command::DEFAULT_ADDRESS;
use crate::error::ConfigError;
use crate::units::SEA_LEVEL_PRESSURE_HPA;

/// Session parameters, fixed once the driver is constructed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I²C address
    pub address: u8,
    pub oversampling: Oversampling,
    /// Reference for [`crate::Bmp180::altitude`], in hPa
    pub sea_level_hpa: f32,
}

impl Default for Config {
    /// Address 0x77, standard oversampling, 1013.89 hPa reference.
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            oversampling: Oversampling::default(),
            sea_level_hpa: SEA_LEVEL_PRESSURE_HPA,
        }
    }
}

impl Config {
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_oversampling(mut self, oversampling: Oversampling) -> Self {
        self.oversampling = oversampling;
        self
    }

    pub fn with_sea_level_hpa(mut self, sea_level_hpa: f32) -> Self {
        self.sea_level_hpa = sea_level_hpa;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_address(self.address)?;
        validate_sea_level(self.sea_level_hpa)
    }
}

/// 0x00..=0x07 and 0x78..=0x7F are reserved by the I²C specification.
pub(crate) fn validate_address(address: u8) -> Result<(), ConfigError> {
    match address {
        0x08..=0x77 => Ok(()),
        other => Err(ConfigError::InvalidAddress(other)),
    }
}

pub(crate) fn validate_sea_level(sea_level_hpa: f32) -> Result<(), ConfigError> {
    if sea_level_hpa.is_finite() && sea_level_hpa > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSeaLevelPressure)
    }
}
