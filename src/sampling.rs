//! Raw conversions. Each read starts a conversion, waits the worst-case
//! conversion time and then reads the output registers. The device gives no
//! signal for an unfinished conversion, so the wait is never shortened.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::bus::Bus;
use crate::calibration::Oversampling;
use crate::command::{Command, Register};

/// Temperature conversion time in microseconds, independent of oversampling.
pub const TEMPERATURE_DELAY_US: u32 = 4_500;

/// Uncompensated temperature (UT).
pub fn read_raw_temperature<I2C, D>(bus: &mut Bus<I2C>, delay: &mut D) -> Result<u16, I2C::Error>
where
    I2C: I2c,
    D: DelayNs,
{
    let command = Command::Temperature;
    trace!("start temperature conversion, cmd {}", command.value());
    bus.write_byte(Register::CtrlMeas, command.value())?;
    delay.delay_us(TEMPERATURE_DELAY_US);

    let buf = bus.read_block::<2>(Register::OutMsb)?;
    Ok(u16::from_be_bytes(buf))
}

/// Uncompensated pressure (UP), already shifted down to `16 + oss` bits.
pub fn read_raw_pressure<I2C, D>(
    bus: &mut Bus<I2C>,
    delay: &mut D,
    oversampling: Oversampling,
) -> Result<i32, I2C::Error>
where
    I2C: I2c,
    D: DelayNs,
{
    let command = Command::Pressure(oversampling);
    trace!("start pressure conversion, cmd {}", command.value());
    bus.write_byte(Register::CtrlMeas, command.value())?;
    delay.delay_us(oversampling.delay_us());

    let [msb, lsb, xlsb] = bus.read_block::<3>(Register::OutMsb)?;
    let raw = (i32::from(msb) << 16) | (i32::from(lsb) << 8) | i32::from(xlsb);
    Ok(raw >> (8 - oversampling.value()))
}
