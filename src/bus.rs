use embedded_hal::i2c::I2c;

use crate::command::Register;

/// An I²C bus handle bound to one device address.
#[derive(Debug)]
pub struct Bus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Bus<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn write_byte(&mut self, register: Register, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[register.addr(), value])
    }

    pub fn read_byte(&mut self, register: Register) -> Result<u8, I2C::Error> {
        let [byte] = self.read_block::<1>(register)?;
        Ok(byte)
    }

    /// Reads `N` consecutive registers starting at `register`.
    pub fn read_block<const N: usize>(&mut self, register: Register) -> Result<[u8; N], I2C::Error> {
        let mut buf = [0u8; N];
        self.i2c.write_read(self.address, &[register.addr()], &mut buf)?;
        Ok(buf)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}
