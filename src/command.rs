use crate::calibration::Oversampling;

/// Chip id held by register 0xD0 on every BMP180.
pub const CHIP_ID: u8 = 0x55;

/// Default 7-bit I²C address. The BMP180 address is fixed in silicon.
pub const DEFAULT_ADDRESS: u8 = 0x77;

/// Length of the calibration EEPROM block starting at [`Register::CalibStart`].
pub const CALIBRATION_LEN: usize = 22;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    // AC1 MSB, eleven big-endian words follow
    CalibStart = 0xAA,
    ChipId = 0xD0,
    // measurement control
    CtrlMeas = 0xF4,
    OutMsb = 0xF6,
    OutLsb = 0xF7,
    // only meaningful for pressure
    OutXlsb = 0xF8,
}

impl Register {
    pub fn addr(self) -> u8 {
        self as u8
    }
}

/// Values written to [`Register::CtrlMeas`] to start a conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Temperature,
    Pressure(Oversampling),
}

impl Command {
    pub fn value(&self) -> u8 {
        match self {
            Command::Temperature => 0x2E,
            Command::Pressure(oss) => 0x34 + (oss.value() << 6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_command_temperature() {
        assert_eq!(Command::Temperature.value(), 0x2E);
    }

    #[test]
    fn check_command_pressure() {
        let mut command = Command::Pressure(Oversampling::UltraLowPower);
        assert_eq!(command.value(), 0x34);
        command = Command::Pressure(Oversampling::Standard);
        assert_eq!(command.value(), 0x74);
        command = Command::Pressure(Oversampling::HighResolution);
        assert_eq!(command.value(), 0xB4);
        command = Command::Pressure(Oversampling::UltraHighResolution);
        assert_eq!(command.value(), 0xF4);
    }

    #[test]
    fn check_output_registers_are_contiguous() {
        assert_eq!(Register::OutLsb.addr(), Register::OutMsb.addr() + 1);
        assert_eq!(Register::OutXlsb.addr(), Register::OutMsb.addr() + 2);
    }
}
