//! Configuration primitives for the LIS3DHTR driver.

use crate::params::{BlockDataUpdate, DataRate, Endianness, FullScale, PowerMode};
use crate::registers::{CtrlReg1, CtrlReg4};

/// Control-register settings written during bring-up.
///
/// Each field maps to a bit or field of `CTRL_REG1` or `CTRL_REG4`; the bytes
/// produced by [`Config::ctrl_reg1`] and [`Config::ctrl_reg4`] are also the
/// values expected on read-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output data rate selection.
    pub data_rate: DataRate,
    /// Low-power or normal operation.
    pub power_mode: PowerMode,
    /// X-axis enable.
    pub x_enable: bool,
    /// Y-axis enable.
    pub y_enable: bool,
    /// Z-axis enable.
    pub z_enable: bool,
    /// Full-scale range selection.
    pub full_scale: FullScale,
    /// High-resolution output enable.
    pub high_resolution: bool,
    /// Block data update selection.
    pub block_data_update: BlockDataUpdate,
    /// Output byte order selection.
    pub endianness: Endianness,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration can be decoded by the driver.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.data_rate == DataRate::PowerDown {
            return Err(ConfigError::PoweredDown);
        }

        if !(self.x_enable || self.y_enable || self.z_enable) {
            return Err(ConfigError::NoAxisEnabled);
        }

        if self.power_mode == PowerMode::LowPower && self.high_resolution {
            return Err(ConfigError::LowPowerHighResolution);
        }

        // Samples are decoded from the high byte at 64 counts per g.
        if self.full_scale != FullScale::G2 {
            return Err(ConfigError::UnsupportedFullScale(self.full_scale));
        }

        Ok(())
    }

    /// Encodes the `CTRL_REG1` byte.
    pub fn ctrl_reg1(&self) -> u8 {
        CtrlReg1::new()
            .with_x_enable(self.x_enable)
            .with_y_enable(self.y_enable)
            .with_z_enable(self.z_enable)
            .with_power_mode(self.power_mode)
            .with_data_rate(self.data_rate)
            .into()
    }

    /// Encodes the `CTRL_REG4` byte.
    pub fn ctrl_reg4(&self) -> u8 {
        CtrlReg4::new()
            .with_high_resolution(self.high_resolution)
            .with_full_scale(self.full_scale)
            .with_endianness(self.endianness)
            .with_block_data_update(self.block_data_update)
            .into()
    }

    /// Decodes a configuration from raw `CTRL_REG1` and `CTRL_REG4` bytes.
    ///
    /// Fails when a field holds an encoding the datasheet leaves undefined.
    pub fn from_registers(ctrl_reg1: u8, ctrl_reg4: u8) -> core::result::Result<Self, ConfigError> {
        let reg1 = CtrlReg1::from(ctrl_reg1);
        let reg4 = CtrlReg4::from(ctrl_reg4);

        Ok(Self {
            data_rate: reg1
                .data_rate_or_err()
                .map_err(|_| ConfigError::UndefinedEncoding(ctrl_reg1))?,
            power_mode: reg1
                .power_mode_or_err()
                .map_err(|_| ConfigError::UndefinedEncoding(ctrl_reg1))?,
            x_enable: reg1.x_enable(),
            y_enable: reg1.y_enable(),
            z_enable: reg1.z_enable(),
            full_scale: reg4
                .full_scale_or_err()
                .map_err(|_| ConfigError::UndefinedEncoding(ctrl_reg4))?,
            high_resolution: reg4.high_resolution(),
            block_data_update: reg4
                .block_data_update_or_err()
                .map_err(|_| ConfigError::UndefinedEncoding(ctrl_reg4))?,
            endianness: reg4
                .endianness_or_err()
                .map_err(|_| ConfigError::UndefinedEncoding(ctrl_reg4))?,
        })
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the output data rate.
    pub fn data_rate(mut self, data_rate: DataRate) -> Self {
        self.config.data_rate = data_rate;
        self
    }

    /// Selects low-power or normal operation.
    pub fn power_mode(mut self, power_mode: PowerMode) -> Self {
        self.config.power_mode = power_mode;
        self
    }

    /// Enables or disables individual axes.
    pub fn axes(mut self, x: bool, y: bool, z: bool) -> Self {
        self.config.x_enable = x;
        self.config.y_enable = y;
        self.config.z_enable = z;
        self
    }

    /// Overrides the full-scale range.
    pub fn full_scale(mut self, full_scale: FullScale) -> Self {
        self.config.full_scale = full_scale;
        self
    }

    /// Enables high-resolution output.
    pub fn high_resolution(mut self, enabled: bool) -> Self {
        self.config.high_resolution = enabled;
        self
    }

    /// Sets the block data update behaviour.
    pub fn block_data_update(mut self, bdu: BlockDataUpdate) -> Self {
        self.config.block_data_update = bdu;
        self
    }

    /// Sets the output byte order.
    pub fn endianness(mut self, endianness: Endianness) -> Self {
        self.config.endianness = endianness;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    /// 5.376 kHz low-power, all axes, ±2 g.
    fn default() -> Self {
        Self {
            data_rate: DataRate::Hz1344OrLowPower5376,
            power_mode: PowerMode::LowPower,
            x_enable: true,
            y_enable: true,
            z_enable: true,
            full_scale: FullScale::G2,
            high_resolution: false,
            block_data_update: BlockDataUpdate::Continuous,
            endianness: Endianness::Little,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The data rate selects power-down, so no samples would be produced.
    PoweredDown,
    /// Every axis is disabled.
    NoAxisEnabled,
    /// Low-power and high-resolution modes cannot be combined.
    LowPowerHighResolution,
    /// Only ±2 g is supported by the high-byte decode.
    UnsupportedFullScale(FullScale),
    /// A register byte holds an encoding the datasheet leaves undefined.
    UndefinedEncoding(u8),
}
