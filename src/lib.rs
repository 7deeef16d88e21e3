//! Platform-agnostic LIS3DH accelerometer driver which uses I2C via
//! [embedded-hal] and implements the [`RawAccelerometer` trait][trait]
//! from the `accelerometer` crate.
//!
//! The chip registers are the only state: every setter is a
//! read-modify-write against the device and every getter reads it back.
//!
//! [embedded-hal]: https://docs.rs/embedded-hal
//! [trait]: https://docs.rs/accelerometer/latest/accelerometer/trait.RawAccelerometer.html
//!

#![deny(missing_docs)]
#![deny(warnings)]
#![no_std]
#![forbid(unsafe_code)]

mod reg;

use core::fmt::Debug;

#[cfg(feature = "out_f32")]
pub use accelerometer::vector::F32x3;
pub use accelerometer::vector::I16x3;
#[cfg(feature = "out_f32")]
pub use accelerometer::Accelerometer;
pub use accelerometer::{Error, ErrorKind, RawAccelerometer};
use cast::u16;
use embedded_hal as hal;
use hal::delay::DelayNs;
use hal::i2c::{ErrorType, I2c};

use crate::reg::*;
pub use crate::reg::{divisor_for_code, DataRate, Range};

// CTRL_REG5 reboot settle time (milliseconds)
const BOOT_SETTLE_MS: u32 = 5;

/// Possible slave addresses
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlaveAddr {
    /// Default slave address, `SA0` low (0x18)
    Default,
    /// Alternative slave address providing bit value for `SA0`
    Alternative(bool),
}

impl SlaveAddr {
    fn addr(self) -> u8 {
        match self {
            SlaveAddr::Default => I2C_SAD,
            SlaveAddr::Alternative(sa0) => I2C_SAD | sa0 as u8,
        }
    }
}

/// `LIS3DH` driver
pub struct Lis3dh<I2C> {
    /// The concrete I²C device implementation
    i2c: I2C,
    /// The I²C device slave address
    addr: u8,
}

impl<I2C, E> Lis3dh<I2C>
where
    I2C: I2c + ErrorType<Error = E>,
    E: Debug,
{
    /// Create a new `LIS3DH` driver from the given `I2C` peripheral.
    ///
    /// No bus traffic happens here, the bus must already be set up.
    pub fn new(i2c: I2C, addr: SlaveAddr) -> Self {
        Self {
            i2c,
            addr: addr.addr(),
        }
    }

    /// Destroy driver instance, return `I2C` bus instance
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// `WHO_AM_I` register
    pub fn get_device_id(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(Register::WHO_AM_I).map_err(Into::into)
    }

    /// Check the `WHO_AM_I` register,
    /// `ErrorKind::Device` if another chip answered
    pub fn check_identity(&mut self) -> Result<(), Error<E>> {
        if self.get_device_id()? != DEVICE_ID {
            ErrorKind::Device.err()?;
        }
        Ok(())
    }

    /// `true` only if a `LIS3DH` answered on the slave address
    pub fn is_connected(&mut self) -> bool {
        self.check_identity().is_ok()
    }

    /// Reboot and bring the sensor up for sampling:
    /// all axes at 400 Hz, high resolution with block data update,
    /// auxiliary ADC enabled.
    ///
    /// `CTRL_REG4` is written as a whole, so the range is back to ±2 g afterwards.
    pub fn configure<D>(&mut self, delay: &mut D) -> Result<(), Error<E>>
    where
        D: DelayNs,
    {
        #[cfg(feature = "defmt")]
        defmt::debug!("lis3dh {=u8:#x}: reboot", self.addr);
        self.write_reg(Register::CTRL_REG5, BOOT)?;
        delay.delay_ms(BOOT_SETTLE_MS);

        self.write_reg(Register::CTRL_REG1, Xen | Yen | Zen)?;
        self.set_data_rate(DataRate::Hz400)?;
        self.write_reg(Register::CTRL_REG4, BDU | HR)?;
        self.write_reg(Register::TEMP_CFG_REG, ADC_EN)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("lis3dh {=u8:#x}: configured", self.addr);
        Ok(())
    }

    /// Data rate selection,
    /// `CTRL_REG1`: `ODR`
    pub fn set_data_rate(&mut self, rate: DataRate) -> Result<(), Error<E>> {
        self.modify_reg(Register::CTRL_REG1, |v| {
            (v & !ODR_MASK) | ((rate as u8) << 4)
        })?;
        Ok(())
    }

    /// Data rate,
    /// `CTRL_REG1`: `ODR`, `None` for a code outside [`DataRate`]
    pub fn get_data_rate(&mut self) -> Result<Option<DataRate>, Error<E>> {
        let reg = self.read_reg(Register::CTRL_REG1)?;
        Ok(DataRate::from_code(reg >> 4))
    }

    /// Full-scale selection,
    /// `CTRL_REG4`: `FS`
    pub fn set_range(&mut self, range: Range) -> Result<(), Error<E>> {
        self.modify_reg(Register::CTRL_REG4, |v| {
            (v & !FS_MASK) | ((range as u8) << 4)
        })?;
        Ok(())
    }

    /// Full-scale,
    /// `CTRL_REG4`: `FS`
    pub fn get_range(&mut self) -> Result<Range, Error<E>> {
        let code = self.read_range_code()?;
        // two bits always decode
        Range::from_code(code).ok_or_else(|| Error::new(ErrorKind::Device))
    }

    /// Acceleration as raw sensor output,
    /// `OUT_X_L` .. `OUT_Z_H` in one burst
    pub fn read_raw_acceleration(&mut self) -> Result<(i16, i16, i16), Error<E>> {
        let mut buf = [0u8; 6];
        self.read_regs(Register::OUT_X_L, &mut buf)?;

        Ok((
            (u16(buf[0]) | (u16(buf[1]) << 8)) as i16,
            (u16(buf[2]) | (u16(buf[3]) << 8)) as i16,
            (u16(buf[4]) | (u16(buf[5]) << 8)) as i16,
        ))
    }

    /// Acceleration in milli-g, scaled by the current full-scale
    pub fn read_acceleration(&mut self) -> Result<(i16, i16, i16), Error<E>> {
        let (x, y, z) = self.read_raw_acceleration()?;
        let divisor = divisor_for_code(self.read_range_code()?);

        Ok((
            to_milli_g(x, divisor),
            to_milli_g(y, divisor),
            to_milli_g(z, divisor),
        ))
    }

    #[inline]
    fn read_range_code(&mut self) -> Result<u8, E> {
        let reg = self.read_reg(Register::CTRL_REG4)?;
        Ok((reg >> 4) & 0b11)
    }

    #[inline]
    fn read_reg(&mut self, reg: Register) -> Result<u8, E> {
        let mut buf = [0u8];
        self.i2c.write_read(self.addr, &[reg.addr()], &mut buf)?;
        Ok(buf[0])
    }

    #[inline]
    fn read_regs(&mut self, reg: Register, buffer: &mut [u8]) -> Result<(), E> {
        self.i2c
            .write_read(self.addr, &[reg.addr() | I2C_SUB_MULTI], buffer)
    }

    #[inline]
    fn write_reg(&mut self, reg: Register, val: u8) -> Result<(), E> {
        self.i2c.write(self.addr, &[reg.addr(), val])
    }

    #[inline]
    fn modify_reg<F>(&mut self, reg: Register, f: F) -> Result<(), E>
    where
        F: FnOnce(u8) -> u8,
    {
        let r = self.read_reg(reg)?;
        self.write_reg(reg, f(r))?;
        Ok(())
    }
}

impl<I2C, E> RawAccelerometer<I16x3> for Lis3dh<I2C>
where
    I2C: I2c + ErrorType<Error = E>,
    E: Debug,
{
    type Error = E;

    /// Get acceleration reading from the accelerometer
    fn accel_raw(&mut self) -> Result<I16x3, Error<E>> {
        let (x, y, z) = self.read_raw_acceleration()?;
        Ok(I16x3::new(x, y, z))
    }
}

#[cfg(feature = "out_f32")]
impl<I2C, E> Accelerometer for Lis3dh<I2C>
where
    I2C: I2c + ErrorType<Error = E>,
    E: Debug,
{
    type Error = E;

    /// Get normalized ±g reading from the accelerometer
    fn accel_norm(&mut self) -> Result<F32x3, Error<E>> {
        let (x, y, z) = self.read_acceleration()?;

        Ok(F32x3::new(
            cast::f32(x) / 1000.0,
            cast::f32(y) / 1000.0,
            cast::f32(z) / 1000.0,
        ))
    }

    /// Get sample rate of accelerometer in Hz
    fn sample_rate(&mut self) -> Result<f32, Error<Self::Error>> {
        Ok(self.get_data_rate()?.map_or(0.0, DataRate::hz))
    }
}
