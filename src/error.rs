//! Error handling primitives for the bus layer and the LIS3DHTR driver.

use core::fmt;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the bus layer and the driver.
///
/// `E` is the error type of the underlying [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport path could not be opened.
    TransportUnavailable(E),
    /// The slave address could not be bound to the transport.
    AddressBindFailed(E),
    /// The slave address does not fit in 7 bits.
    InvalidAddress(u8),
    /// The transport reported a fault during a transfer.
    Io(E),
    /// A transfer moved a different number of bytes than requested.
    ShortTransfer {
        /// Bytes the operation asked for.
        requested: usize,
        /// Bytes the transport actually moved.
        transferred: usize,
    },
    /// `WHO_AM_I` returned something other than the expected identity.
    UnknownDevice(u8),
    /// A control register did not read back the value just written to it.
    ConfigurationVerificationFailed {
        /// Register that was written.
        register: u8,
        /// Value written.
        expected: u8,
        /// Value read back.
        actual: u8,
    },
    /// Burst length outside `1..=255`.
    InvalidLength(usize),
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// The bus handle has been closed.
    Closed,
}

impl<E> Error<E> {
    /// Returns `true` for bus faults: transport errors and short transfers.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::ShortTransfer { .. })
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransportUnavailable(err) => write!(f, "transport unavailable: {err}"),
            Self::AddressBindFailed(err) => write!(f, "failed to bind slave address: {err}"),
            Self::InvalidAddress(addr) => write!(f, "slave address 0x{addr:02X} is not 7-bit"),
            Self::Io(err) => write!(f, "bus I/O error: {err}"),
            Self::ShortTransfer {
                requested,
                transferred,
            } => write!(
                f,
                "short transfer: {transferred} of {requested} bytes"
            ),
            Self::UnknownDevice(id) => write!(f, "unknown device id 0x{id:02X}"),
            Self::ConfigurationVerificationFailed {
                register,
                expected,
                actual,
            } => write!(
                f,
                "register 0x{register:02X} read back 0x{actual:02X}, expected 0x{expected:02X}"
            ),
            Self::InvalidLength(len) => write!(f, "burst length {len} outside 1..=255"),
            Self::InvalidConfig => f.write_str("invalid configuration"),
            Self::Closed => f.write_str("bus handle is closed"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for Error<E> {}
