//! Register-level I2C access and a driver for the ST LIS3DHTR accelerometer.
//!
//! [`BusHandle`] owns one [`Transport`](transport::Transport) bound to one
//! slave address and exposes single and burst register reads and writes.
//! [`Lis3dhtr`] validates the device identity, programs the control registers
//! with read-back verification and decodes samples to g.
//!
//! ```rust
//! use lis3dhtr::registers::{ADDRESS_SA0_HIGH, REG_OUT_X_H, REG_WHO_AM_I};
//! use lis3dhtr::transport::SimTransport;
//! use lis3dhtr::{BusHandle, Lis3dhtr};
//!
//! let mut sim = SimTransport::new();
//! sim.set_register(REG_WHO_AM_I, 0x33)
//!     .set_registers(REG_OUT_X_H, &[0x40, 0x00, 0xC0, 0x00, 0x00, 0x00]);
//!
//! let mut bus = BusHandle::bind(sim, ADDRESS_SA0_HIGH).unwrap();
//! let sensor = Lis3dhtr::initialize(&mut bus).unwrap();
//! let accel = sensor.read_sample(&mut bus).unwrap();
//! assert_eq!((accel.x, accel.y, accel.z), (1.0, -1.0, 0.0));
//! ```
//!
//! On Linux, enable the `linux` feature and open the adapter node instead:
//!
//! ```rust,ignore
//! let mut bus = BusHandle::<LinuxTransport>::open("/dev/i2c-1", ADDRESS_SA0_HIGH)?;
//! ```
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod error;
mod log;

pub mod bus;
pub mod config;
pub mod device;
pub mod params;
pub mod registers;
pub mod sample;
pub mod transport;

pub use crate::bus::BusHandle;
pub use crate::device::Lis3dhtr;
pub use crate::error::{Error, Result};
pub use crate::sample::{AccelerationVector, RawSample};
