//! Platform-agnostic driver for the Bosch BMP180 barometric pressure and
//! temperature sensor, built on the [`embedded-hal`] 1.0 blocking I²C and delay
//! traits.
//!
//! The driver reads the factory calibration once when it is constructed, starts
//! a fresh conversion for every read, waits the datasheet conversion time and
//! applies the datasheet fixed-point compensation.
//!
//! ```ignore
//! use bmp180::{Bmp180, Config, Oversampling};
//!
//! let config = Config::default().with_oversampling(Oversampling::UltraHighResolution);
//! let mut bmp = Bmp180::with_config(i2c, delay, config)?;
//! let celsius = bmp.read_temperature()?;
//! let fahrenheit = bmp.convert_to_fahrenheit(celsius);
//! let hpa = bmp.read_pressure()?;
//! let meters = bmp.altitude()?;
//! let i2c = bmp.close();
//! ```
//!
//! ## Features
//!
//! - `defmt`: log through the `defmt` framework.
//! - `log`: log through the `log` facade.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod bus;
pub mod calibration;
pub mod command;
pub mod compensation;
pub mod config;
pub mod error;
pub mod sampling;
pub mod units;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use bus::Bus;
pub use calibration::{Calibration, Oversampling};
use command::{Register, CHIP_ID};
pub use compensation::{CompensatedReading, RawSample};
pub use config::Config;
pub use error::{ConfigError, DeviceError};

/// A BMP180 session.
///
/// Owns the bus handle from construction until [`Bmp180::close`] or until the
/// driver is dropped, whichever comes first.
pub struct Bmp180<I2C, D> {
    bus: Option<Bus<I2C>>,
    delay: D,
    calibration: Option<Calibration>,
    config: Config,
}

impl<I2C, D> Bmp180<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a session at address 0x77 in standard mode.
    pub fn new(i2c: I2C, delay: D) -> Result<Self, DeviceError<I2C::Error>> {
        Self::with_config(i2c, delay, Config::default())
    }

    /// Validates `config`, checks the chip id and reads the calibration
    /// coefficients. On any failure the bus handle is dropped with the error.
    pub fn with_config(i2c: I2C, delay: D, config: Config) -> Result<Self, DeviceError<I2C::Error>> {
        config.validate()?;

        let mut dev = Self {
            bus: Some(Bus::new(i2c, config.address)),
            delay,
            calibration: None,
            config,
        };
        dev.check_chip_id()?;
        dev.calibrate()?;
        Ok(dev)
    }

    fn check_chip_id(&mut self) -> Result<(), DeviceError<I2C::Error>> {
        let bus = self.bus.as_mut().ok_or(DeviceError::Closed)?;
        let id = bus.read_byte(Register::ChipId).map_err(DeviceError::Io)?;
        if id != CHIP_ID {
            warn!("unexpected chip id {} at address {}", id, bus.address());
            return Err(DeviceError::InvalidChipId(id));
        }
        Ok(())
    }

    /// Every module is individually factory calibrated. The eleven coefficients
    /// live in EEPROM and are read exactly once per session. No retry: a failed
    /// read leaves the session uncalibrated.
    fn calibrate(&mut self) -> Result<(), DeviceError<I2C::Error>> {
        let bus = self.bus.as_mut().ok_or(DeviceError::Closed)?;
        let calibration = Calibration::load(bus).map_err(DeviceError::Io)?;
        debug!("calibration loaded from address {}", bus.address());
        self.calibration = Some(calibration);
        Ok(())
    }

    /// Splits the session into the pieces a conversion needs.
    fn parts(&mut self) -> Result<(&mut Bus<I2C>, &mut D, Calibration), DeviceError<I2C::Error>> {
        let bus = self.bus.as_mut().ok_or(DeviceError::Closed)?;
        let calibration = self.calibration.ok_or(DeviceError::Uncalibrated)?;
        Ok((bus, &mut self.delay, calibration))
    }

    pub fn calibration(&self) -> Result<&Calibration, DeviceError<I2C::Error>> {
        self.calibration.as_ref().ok_or(DeviceError::Uncalibrated)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn oversampling(&self) -> Oversampling {
        self.config.oversampling
    }

    pub fn address(&self) -> u8 {
        self.config.address
    }

    pub fn read_raw_temperature(&mut self) -> Result<u16, DeviceError<I2C::Error>> {
        let (bus, delay, _) = self.parts()?;
        sampling::read_raw_temperature(bus, delay).map_err(DeviceError::Io)
    }

    pub fn read_raw_pressure(&mut self) -> Result<i32, DeviceError<I2C::Error>> {
        let oversampling = self.config.oversampling;
        let (bus, delay, _) = self.parts()?;
        sampling::read_raw_pressure(bus, delay, oversampling).map_err(DeviceError::Io)
    }

    /// One temperature conversion followed by one pressure conversion.
    pub fn read_raw(&mut self) -> Result<RawSample, DeviceError<I2C::Error>> {
        let ut = self.read_raw_temperature()?;
        let up = self.read_raw_pressure()?;
        Ok(RawSample { ut, up })
    }

    /// Temperature in 0.1 °C and pressure in Pa from fresh conversions.
    pub fn read_measurement(&mut self) -> Result<CompensatedReading, DeviceError<I2C::Error>> {
        let raw = self.read_raw()?;
        let calibration = self.calibration()?;
        compensation::compensate(calibration, raw, self.config.oversampling)
            .ok_or(DeviceError::InvalidCalibration)
    }

    /// Temperature in °C, rounded to one decimal.
    pub fn read_temperature(&mut self) -> Result<f32, DeviceError<I2C::Error>> {
        let ut = self.read_raw_temperature()?;
        let b5 = compensation::b5(self.calibration()?, ut).ok_or(DeviceError::InvalidCalibration)?;
        let deci_celsius = compensation::temperature(b5);
        Ok(units::round_to(deci_celsius as f32 / 10.0, 1))
    }

    /// Pressure in hPa, rounded to two decimals.
    ///
    /// Runs a temperature conversion first since the pressure formula depends on it.
    pub fn read_pressure(&mut self) -> Result<f32, DeviceError<I2C::Error>> {
        Ok(self.read_measurement()?.hpa())
    }

    /// Altitude in meters relative to `sealevel_hpa`, rounded to one decimal.
    pub fn get_altitude(&mut self, sealevel_hpa: f32) -> Result<f32, DeviceError<I2C::Error>> {
        config::validate_sea_level(sealevel_hpa)?;
        let pressure = self.read_pressure()?;
        Ok(units::altitude(pressure, sealevel_hpa))
    }

    /// Altitude in meters relative to the configured sea-level pressure.
    pub fn altitude(&mut self) -> Result<f32, DeviceError<I2C::Error>> {
        self.get_altitude(self.config.sea_level_hpa)
    }

    pub fn convert_to_fahrenheit(&self, celsius: f32) -> f32 {
        units::celsius_to_fahrenheit(celsius)
    }

    /// Releases the bus handle. Returns `None` if the session was already
    /// closed; every read after the first close fails with
    /// [`DeviceError::Closed`].
    pub fn close(&mut self) -> Option<I2C> {
        let bus = self.bus.take()?;
        debug!("closing session at address {}", bus.address());
        Some(bus.release())
    }

    pub fn is_closed(&self) -> bool {
        self.bus.is_none()
    }
}
