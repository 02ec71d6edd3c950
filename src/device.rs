//! High-level LIS3DHTR device driver implementation.

use crate::bus::BusHandle;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::log::{debug, warning};
use crate::registers::{
    CtrlReg1,
    CtrlReg4,
    Register,
    Status,
    EXPECTED_WHO_AM_I,
    REG_OUT_X_H,
    REG_WHO_AM_I,
};
use crate::sample::{AccelerationVector, RawSample, RAW_SAMPLE_BYTES};
use crate::transport::Transport;

/// Configured LIS3DHTR accelerometer.
///
/// A value of this type exists only after [`Lis3dhtr::initialize`] succeeded,
/// so sampling an unconfigured device does not compile. The driver does not
/// own the bus: every call borrows a [`BusHandle`], letting several drivers
/// take turns on one handle. No configuration is cached; the device is
/// assumed to keep what was written during bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Lis3dhtr;

impl Lis3dhtr {
    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Brings the device up with [`Config::default()`].
    pub fn initialize<T: Transport>(bus: &mut BusHandle<T>) -> Result<Self, T::Error> {
        Self::initialize_with(bus, &Config::default())
    }

    /// Verifies the device identity and programs the control registers.
    ///
    /// 1. `WHO_AM_I` must read `0x33`.
    /// 2. `CTRL_REG1` is written and read back.
    /// 3. `CTRL_REG4` is written and read back.
    ///
    /// The first failure aborts bring-up; nothing is retried.
    pub fn initialize_with<T: Transport>(
        bus: &mut BusHandle<T>,
        config: &Config,
    ) -> Result<Self, T::Error> {
        config
            .validate()
            .map_err(|_| Error::<T::Error>::InvalidConfig)?;

        let id = Self::device_id(bus)?;
        if id != EXPECTED_WHO_AM_I {
            warning!("unknown device id {:#x}", id);
            return Err(Error::UnknownDevice(id));
        }
        debug!("LIS3DHTR detected");

        write_verified(bus, CtrlReg1::ADDRESS, config.ctrl_reg1())?;
        write_verified(bus, CtrlReg4::ADDRESS, config.ctrl_reg4())?;

        debug!(
            "configured: ctrl_reg1={:#x} ctrl_reg4={:#x}",
            config.ctrl_reg1(),
            config.ctrl_reg4()
        );
        Ok(Self)
    }

    // ==================================================================
    // == Identification & Status =======================================
    // ==================================================================
    /// Reads the raw `WHO_AM_I` register.
    pub fn device_id<T: Transport>(bus: &mut BusHandle<T>) -> Result<u8, T::Error> {
        bus.read_register(REG_WHO_AM_I)
    }

    /// Returns `true` when a new X/Y/Z triplet is available.
    pub fn data_ready<T: Transport>(&self, bus: &mut BusHandle<T>) -> Result<bool, T::Error> {
        let status = Status::from(bus.read_register(Status::ADDRESS)?);
        Ok(status.xyz_available())
    }

    /// Reads the control registers back into a [`Config`].
    pub fn read_config<T: Transport>(&self, bus: &mut BusHandle<T>) -> Result<Config, T::Error> {
        let ctrl_reg1 = bus.read_register(CtrlReg1::ADDRESS)?;
        let ctrl_reg4 = bus.read_register(CtrlReg4::ADDRESS)?;
        Config::from_registers(ctrl_reg1, ctrl_reg4).map_err(|_| Error::InvalidConfig)
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads the six output bytes starting at `OUT_X_H` in one burst.
    pub fn read_raw<T: Transport>(&self, bus: &mut BusHandle<T>) -> Result<RawSample, T::Error> {
        let bytes = bus.read_burst_array::<RAW_SAMPLE_BYTES>(REG_OUT_X_H)?;
        Ok(RawSample::from(bytes))
    }

    /// Reads one sample and decodes it to g.
    pub fn read_sample<T: Transport>(
        &self,
        bus: &mut BusHandle<T>,
    ) -> Result<AccelerationVector, T::Error> {
        Ok(self.read_raw(bus)?.decode())
    }
}

fn write_verified<T: Transport>(
    bus: &mut BusHandle<T>,
    register: u8,
    value: u8,
) -> Result<(), T::Error> {
    bus.write_register(register, value)?;

    let actual = bus.read_register(register)?;
    if actual != value {
        warning!(
            "register {:#x} read back {:#x}, expected {:#x}",
            register, actual, value
        );
        return Err(Error::ConfigurationVerificationFailed {
            register,
            expected: value,
            actual,
        });
    }
    Ok(())
}
