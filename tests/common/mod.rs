#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

pub use lis3dh::{DataRate, Lis3dh, Range, SlaveAddr};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorType, I2c, Operation};
use embedded_hal_mock as hal;
pub use hal::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

pub const DEV_ADDR: u8 = 0b001_1000;

pub fn trans_who_am_i() -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![0x0F], vec![0x33])
}

/// Bus writes and delays in the order they happened
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Register write `[reg, value]`
    Write(Vec<u8>),
    /// Delay in nanoseconds
    Delay(u64),
}

pub type Timeline = Rc<RefCell<Vec<Event>>>;

/// I2C mock which also logs its writes to a shared timeline
pub struct LoggingI2c {
    pub inner: I2cMock,
    pub log: Timeline,
}

impl ErrorType for LoggingI2c {
    type Error = embedded_hal::i2c::ErrorKind;
}

impl I2c for LoggingI2c {
    fn read(&mut self, address: u8, read: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read(address, read)
    }

    fn write(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Write(write.to_vec()));
        self.inner.write(address, write)
    }

    fn write_read(
        &mut self,
        address: u8,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner.write_read(address, write, read)
    }

    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.inner.transaction(address, operations)
    }
}

/// Delay which only logs the requested time
pub struct LoggingDelay {
    pub log: Timeline,
}

impl DelayNs for LoggingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Delay(u64::from(ns)));
    }
}

/// Delay which does nothing
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
