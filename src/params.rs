//! Strongly typed parameter enumerations for the LIS3DHTR driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the register bitfields. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use lis3dhtr::params::{DataRate, FullScale, PowerMode};
//!
//! let odr = DataRate::Hz1344OrLowPower5376;
//! let fs = FullScale::G2;
//! let mode = PowerMode::LowPower;
//! assert_eq!(odr.hz(mode), 5_376);
//! let _ = fs;
//! ```

use modular_bitfield::prelude::Specifier;

/// Output data rate selection (`CTRL_REG1.ODR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum DataRate {
    /// Power-down mode.
    PowerDown = 0b0000,
    /// 1 Hz.
    Hz1 = 0b0001,
    /// 10 Hz.
    Hz10 = 0b0010,
    /// 25 Hz.
    Hz25 = 0b0011,
    /// 50 Hz.
    Hz50 = 0b0100,
    /// 100 Hz.
    Hz100 = 0b0101,
    /// 200 Hz.
    Hz200 = 0b0110,
    /// 400 Hz.
    Hz400 = 0b0111,
    /// 1.620 kHz, low-power mode only.
    LowPower1620 = 0b1000,
    /// 1.344 kHz in normal/high-resolution mode, 5.376 kHz in low-power mode.
    Hz1344OrLowPower5376 = 0b1001,
}

impl DataRate {
    /// Returns the output data rate in hertz for the given power mode.
    pub const fn hz(self, mode: PowerMode) -> u32 {
        match (self, mode) {
            (Self::PowerDown, _) => 0,
            (Self::Hz1, _) => 1,
            (Self::Hz10, _) => 10,
            (Self::Hz25, _) => 25,
            (Self::Hz50, _) => 50,
            (Self::Hz100, _) => 100,
            (Self::Hz200, _) => 200,
            (Self::Hz400, _) => 400,
            (Self::LowPower1620, _) => 1_620,
            (Self::Hz1344OrLowPower5376, PowerMode::Normal) => 1_344,
            (Self::Hz1344OrLowPower5376, PowerMode::LowPower) => 5_376,
        }
    }
}

/// Low-power enable bit (`CTRL_REG1.LPen`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum PowerMode {
    /// Normal or high-resolution operation.
    Normal = 0,
    /// 8-bit low-power operation.
    LowPower = 1,
}

/// Full-scale range selection (`CTRL_REG4.FS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FullScale {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

/// Block data update bit (`CTRL_REG4.BDU`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum BlockDataUpdate {
    /// Output registers update continuously.
    Continuous = 0,
    /// Output registers hold until both MSB and LSB have been read.
    WaitForRead = 1,
}

/// Output byte order (`CTRL_REG4.BLE`), only honoured in high-resolution mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Endianness {
    /// Low byte at the lower address.
    Little = 0,
    /// High byte at the lower address.
    Big = 1,
}
