#![allow(non_upper_case_globals)]

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// I2C slave address, `SA0` low
pub const I2C_SAD: u8 = 0b001_1000;

/// Sub-address auto-increment bit
pub const I2C_SUB_MULTI: u8 = 0b1000_0000;

/// Register mapping
#[allow(dead_code)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone)]
pub enum Register {
    STATUS_REG_AUX = 0x07,
    WHO_AM_I = 0x0F,
    TEMP_CFG_REG = 0x1F,
    CTRL_REG1 = 0x20,
    CTRL_REG2 = 0x21,
    CTRL_REG3 = 0x22,
    CTRL_REG4 = 0x23,
    CTRL_REG5 = 0x24,
    CTRL_REG6 = 0x25,
    STATUS_REG = 0x27,
    OUT_X_L = 0x28,
    OUT_X_H = 0x29,
    OUT_Y_L = 0x2A,
    OUT_Y_H = 0x2B,
    OUT_Z_L = 0x2C,
    OUT_Z_H = 0x2D,
}

impl Register {
    /// Get register address
    pub fn addr(self) -> u8 {
        self as u8
    }
}

// === WHO_AM_I (0Fh) ===

/// WHO_AM_I device identification register
pub const DEVICE_ID: u8 = 0x33;

// === TEMP_CFG_REG (1Fh) ===

pub const ADC_EN: u8 = 0b1000_0000;

// === CTRL_REG1 (20h) ===

pub const ODR_MASK: u8 = 0b1111_0000;

/// Output data rate
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    /// 800 Hz, 1.25 ms interval
    Hz800 = 0,
    /// 400 Hz, 2.5 ms interval
    Hz400 = 1,
    /// 200 Hz, 5 ms interval
    Hz200 = 2,
    /// 100 Hz, 10 ms interval
    Hz100 = 3,
    /// 50 Hz, 20 ms interval
    Hz50 = 4,
    /// 12.5 Hz, 80 ms interval
    Hz12_5 = 5,
    /// 6.25 Hz, 160 ms interval
    Hz6_25 = 6,
    /// 1.56 Hz, 640 ms interval
    Hz1_56 = 7,
}

impl DataRate {
    /// Decode the 4-bit `ODR` field
    pub fn from_code(code: u8) -> Option<Self> {
        FromPrimitive::from_u8(code)
    }

    /// Sampling frequency in Hz
    pub fn hz(self) -> f32 {
        match self {
            Self::Hz800 => 800.0,
            Self::Hz400 => 400.0,
            Self::Hz200 => 200.0,
            Self::Hz100 => 100.0,
            Self::Hz50 => 50.0,
            Self::Hz12_5 => 12.5,
            Self::Hz6_25 => 6.25,
            Self::Hz1_56 => 1.56,
        }
    }

    /// Sample interval in microseconds
    pub fn interval_us(self) -> u32 {
        match self {
            Self::Hz800 => 1_250,
            Self::Hz400 => 2_500,
            Self::Hz200 => 5_000,
            Self::Hz100 => 10_000,
            Self::Hz50 => 20_000,
            Self::Hz12_5 => 80_000,
            Self::Hz6_25 => 160_000,
            Self::Hz1_56 => 640_000,
        }
    }
}

pub const Zen: u8 = 0b0000_0100;
pub const Yen: u8 = 0b0000_0010;
pub const Xen: u8 = 0b0000_0001;

// === CTRL_REG4 (23h) ===

pub const BDU: u8 = 0b1000_0000;
pub const HR: u8 = 0b0000_1000;

pub const FS_MASK: u8 = 0b0011_0000;

/// Full-scale selection
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Range {
    /// ±2 g
    G2 = 0b00,
    /// ±4 g
    G4 = 0b01,
    /// ±8 g
    G8 = 0b10,
    /// ±16 g
    G16 = 0b11,
}

impl Range {
    /// Decode the 2-bit `FS` field
    pub fn from_code(code: u8) -> Option<Self> {
        FromPrimitive::from_u8(code)
    }

    /// LSB per g of the left-justified output
    pub fn divisor(self) -> f32 {
        match self {
            Self::G2 => 16380.0,
            Self::G4 => 8190.0,
            Self::G8 => 4096.0,
            Self::G16 => 1365.0,
        }
    }
}

/// Divisor for a raw `FS` code, no scaling for codes outside the table
pub fn divisor_for_code(code: u8) -> f32 {
    Range::from_code(code).map_or(1.0, Range::divisor)
}

/// Convert a raw output to milli-g, truncating toward zero
pub(crate) fn to_milli_g(raw: i16, divisor: f32) -> i16 {
    (cast::f32(raw) / divisor * 1000.0) as i16
}

// === CTRL_REG5 (24h) ===

pub const BOOT: u8 = 0b1000_0000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisor_table() {
        assert_eq!(divisor_for_code(0b00), 16380.0);
        assert_eq!(divisor_for_code(0b01), 8190.0);
        assert_eq!(divisor_for_code(0b10), 4096.0);
        assert_eq!(divisor_for_code(0b11), 1365.0);
        assert_eq!(divisor_for_code(0b100), 1.0);
        assert_eq!(divisor_for_code(0xFF), 1.0);
    }

    #[test]
    fn milli_g_truncates() {
        assert_eq!(to_milli_g(16380, Range::G2.divisor()), 1000);
        assert_eq!(to_milli_g(-16380, Range::G2.divisor()), -1000);
        // 1 / 16380 * 1000 = 0.061..
        assert_eq!(to_milli_g(1, Range::G2.divisor()), 0);
        assert_eq!(to_milli_g(-1, Range::G2.divisor()), 0);
        // 100 / 1365 * 1000 = 73.26..
        assert_eq!(to_milli_g(100, Range::G16.divisor()), 73);
        assert_eq!(to_milli_g(-100, Range::G16.divisor()), -73);
        assert_eq!(to_milli_g(7, 1.0), 7000);
    }

    #[test]
    fn data_rate_codes() {
        assert_eq!(DataRate::from_code(0), Some(DataRate::Hz800));
        assert_eq!(DataRate::from_code(1), Some(DataRate::Hz400));
        assert_eq!(DataRate::from_code(7), Some(DataRate::Hz1_56));
        assert_eq!(DataRate::from_code(8), None);
        assert_eq!(DataRate::Hz12_5.interval_us(), 80_000);
    }

    #[test]
    fn range_codes() {
        assert_eq!(Range::from_code(0b10), Some(Range::G8));
        assert_eq!(Range::from_code(4), None);
    }
}
