//! Byte-level transport abstraction underneath [`BusHandle`](crate::bus::BusHandle).
//!
//! A transport is a duplex byte channel that talks to one slave address at a
//! time. It reports how many bytes each transfer actually moved; the bus layer
//! decides whether that count is acceptable. Closing a transport is dropping it.

pub mod hal;
#[cfg(feature = "linux")]
pub mod linux;
pub mod sim;

pub use self::hal::{HalError, HalTransport};
#[cfg(feature = "linux")]
pub use self::linux::LinuxTransport;
pub use self::sim::{SimError, SimTransport};

/// Abstraction over the low-level channel required by the bus layer.
pub trait Transport {
    /// Error type produced by the concrete transport implementation.
    type Error;

    /// Binds the 7-bit slave address that subsequent transfers target.
    fn bind_address(&mut self, address: u8) -> core::result::Result<(), Self::Error>;

    /// Writes `bytes` in a single transfer, returning the number written.
    fn write(&mut self, bytes: &[u8]) -> core::result::Result<usize, Self::Error>;

    /// Reads into `buf` in a single transfer, returning the number read.
    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error>;
}

/// Transports that can be acquired from a device path.
pub trait Open: Transport + Sized {
    /// Opens the transport at `path`, unbound.
    fn open(path: &str) -> core::result::Result<Self, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn bind_address(&mut self, address: u8) -> core::result::Result<(), Self::Error> {
        (**self).bind_address(address)
    }

    fn write(&mut self, bytes: &[u8]) -> core::result::Result<usize, Self::Error> {
        (**self).write(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        (**self).read(buf)
    }
}
