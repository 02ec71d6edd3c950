//! Register map definitions for the LIS3DHTR accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{BlockDataUpdate, DataRate, Endianness, FullScale, PowerMode};

/// Slave address with SA0 tied low.
pub const ADDRESS_SA0_LOW: u8 = 0x18;
/// Slave address with SA0 tied high.
pub const ADDRESS_SA0_HIGH: u8 = 0x19;

/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x0F;
/// Register address of `CTRL_REG1`.
pub const REG_CTRL_REG1: u8 = 0x20;
/// Register address of `CTRL_REG4`.
pub const REG_CTRL_REG4: u8 = 0x23;
/// Register address of `STATUS_REG`.
pub const REG_STATUS: u8 = 0x27;
/// Register address of `OUT_X_H`.
pub const REG_OUT_X_H: u8 = 0x29;
/// Register address of `OUT_Y_H`.
pub const REG_OUT_Y_H: u8 = 0x2B;
/// Register address of `OUT_Z_H`.
pub const REG_OUT_Z_H: u8 = 0x2D;

/// Distance between consecutive axis MSB registers, and between their bytes
/// in an auto-increment burst.
pub const AXIS_STRIDE: u8 = 2;

/// Value reported by `WHO_AM_I` on this part family.
pub const EXPECTED_WHO_AM_I: u8 = 0x33;

/// Sub-address bit requesting register auto-increment on multi-byte reads.
pub const AUTO_INCREMENT: u8 = 0x80;

/// Bitfield types that map onto one device register.
pub trait Register {
    /// Register address.
    const ADDRESS: u8;
}

/// Bitfield representation of the `CTRL_REG1` register (address `0x20`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg1 {
    // X-axis enable (bit 0).
    pub x_enable: bool,
    // Y-axis enable (bit 1).
    pub y_enable: bool,
    // Z-axis enable (bit 2).
    pub z_enable: bool,
    // Low-power mode enable (bit 3).
    pub power_mode: PowerMode,
    // Output data rate selection (bits 7:4).
    pub data_rate: DataRate,
}

impl From<u8> for CtrlReg1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<CtrlReg1> for u8 {
    fn from(value: CtrlReg1) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CTRL_REG4` register (address `0x23`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlReg4 {
    // SPI serial interface mode (bit 0), unused on I2C.
    pub spi_3wire: bool,
    // Self-test selection (bits 2:1).
    pub self_test: B2,
    // High-resolution output enable (bit 3).
    pub high_resolution: bool,
    // Full-scale selection (bits 5:4).
    pub full_scale: FullScale,
    // Big/little endian data selection (bit 6).
    pub endianness: Endianness,
    // Block data update (bit 7).
    pub block_data_update: BlockDataUpdate,
}

impl From<u8> for CtrlReg4 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<CtrlReg4> for u8 {
    fn from(value: CtrlReg4) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `STATUS_REG` register (address `0x27`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    // X-axis new data available (bit 0).
    pub x_available: bool,
    // Y-axis new data available (bit 1).
    pub y_available: bool,
    // Z-axis new data available (bit 2).
    pub z_available: bool,
    // New X, Y and Z data available (bit 3).
    pub xyz_available: bool,
    // X-axis data overrun (bit 4).
    pub x_overrun: bool,
    // Y-axis data overrun (bit 5).
    pub y_overrun: bool,
    // Z-axis data overrun (bit 6).
    pub z_overrun: bool,
    // X, Y and Z data overrun (bit 7).
    pub xyz_overrun: bool,
}

impl From<u8> for Status {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Status> for u8 {
    fn from(value: Status) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for CtrlReg1 {
    const ADDRESS: u8 = REG_CTRL_REG1;
}

impl Register for CtrlReg4 {
    const ADDRESS: u8 = REG_CTRL_REG4;
}

impl Register for Status {
    const ADDRESS: u8 = REG_STATUS;
}
