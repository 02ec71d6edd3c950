//! Transport implementation built on top of `embedded-hal` `I2c`.

use core::fmt;

use embedded_hal::i2c::I2c;

use super::Transport;

/// Errors produced by [`HalTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError<E> {
    /// A transfer was attempted before a slave address was bound.
    Unbound,
    /// Error reported by the wrapped I2C bus.
    Bus(E),
}

impl<E: fmt::Debug> fmt::Display for HalError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbound => f.write_str("no slave address bound"),
            Self::Bus(err) => write!(f, "i2c bus error: {err:?}"),
        }
    }
}

/// I2C-based transport for any `embedded-hal` 1.0 bus.
///
/// Each `write` and `read` is one I2C transaction with its own START/STOP,
/// which matches the framing of the Linux `i2c-dev` read/write calls.
pub struct HalTransport<I2C> {
    i2c: I2C,
    address: Option<u8>,
}

impl<I2C> HalTransport<I2C> {
    /// Creates a new, unbound transport from the provided I2C bus.
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c, address: None }
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the transport and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Transport for HalTransport<I2C>
where
    I2C: I2c,
{
    type Error = HalError<I2C::Error>;

    fn bind_address(&mut self, address: u8) -> core::result::Result<(), Self::Error> {
        self.address = Some(address);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> core::result::Result<usize, Self::Error> {
        let Some(address) = self.address else {
            return Err(HalError::Unbound);
        };
        self.i2c.write(address, bytes).map_err(HalError::Bus)?;
        Ok(bytes.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        let Some(address) = self.address else {
            return Err(HalError::Unbound);
        };
        self.i2c.read(address, buf).map_err(HalError::Bus)?;
        Ok(buf.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{HalError, HalTransport};
    use crate::transport::Transport;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    const ADDR: u8 = 0x19;

    #[test]
    fn write_targets_bound_address_and_reports_full_length() {
        let expectations = [I2cTrans::write(ADDR, vec![0x20, 0x9F])];
        let mut transport = HalTransport::new(I2cMock::new(&expectations));

        transport.bind_address(ADDR).unwrap();
        assert_eq!(transport.write(&[0x20, 0x9F]).unwrap(), 2);

        transport.release().done();
    }

    #[test]
    fn read_fills_buffer_from_bus() {
        let expectations = [I2cTrans::read(ADDR, vec![0xAA, 0x55])];
        let mut transport = HalTransport::new(I2cMock::new(&expectations));

        transport.bind_address(ADDR).unwrap();
        let mut buffer = [0u8; 2];
        assert_eq!(transport.read(&mut buffer).unwrap(), 2);
        assert_eq!(buffer, [0xAA, 0x55]);

        transport.release().done();
    }

    #[test]
    fn transfers_before_bind_are_rejected() {
        let expectations: [I2cTrans; 0] = [];
        let mut transport = HalTransport::new(I2cMock::new(&expectations));

        assert_eq!(transport.write(&[0x0F]), Err(HalError::Unbound));
        assert_eq!(transport.read(&mut [0u8; 1]), Err(HalError::Unbound));

        transport.release().done();
    }

    #[test]
    fn bus_errors_are_wrapped() {
        let expectations = [I2cTrans::write(ADDR, vec![0x0F]).with_error(ErrorKind::Other)];
        let mut transport = HalTransport::new(I2cMock::new(&expectations));

        transport.bind_address(ADDR).unwrap();
        assert_eq!(
            transport.write(&[0x0F]),
            Err(HalError::Bus(ErrorKind::Other))
        );

        transport.release().done();
    }
}
