//! Register-oriented I2C bus handle.
//!
//! A [`BusHandle`] owns one transport bound to one slave address and turns
//! register accesses into address-then-data transfers. Every operation is
//! one or two transport transfers, each of which must move exactly the number
//! of bytes requested; anything else is reported as a bus fault and never
//! retried.
//!
//! The handle is not `Clone`. Callers that need several sensors on one
//! adapter share it sequentially by `&mut` borrow or serialize access through
//! a single owner.

use crate::error::{Error, Result};
use crate::log::{debug, trace, warning};
use crate::registers::AUTO_INCREMENT;
use crate::transport::{Open, Transport};

/// Largest payload a single burst may carry.
pub const MAX_BURST: usize = 255;

/// Highest valid 7-bit slave address.
pub const MAX_SLAVE_ADDRESS: u8 = 0x7F;

struct Bound<T> {
    transport: T,
    address: u8,
}

/// Exclusive handle to one slave device on one transport.
///
/// Either bound (transport and address present) or closed. Dropping the
/// handle closes it.
pub struct BusHandle<T: Transport> {
    bound: Option<Bound<T>>,
}

impl<T: Transport> BusHandle<T> {
    // ==================================================================
    // == Construction & Lifecycle ======================================
    // ==================================================================
    /// Opens the transport at `path` and binds `slave_address`.
    ///
    /// The address is range-checked before the path is touched. If binding
    /// fails the freshly opened transport is released before returning.
    pub fn open(path: &str, slave_address: u8) -> Result<Self, T::Error>
    where
        T: Open,
    {
        check_address::<T::Error>(slave_address)?;

        let transport = T::open(path).map_err(|err| {
            warning!("cannot open i2c transport");
            Error::TransportUnavailable(err)
        })?;

        Self::bind(transport, slave_address)
    }

    /// Binds `slave_address` on an already opened transport.
    ///
    /// On failure the transport is dropped.
    pub fn bind(mut transport: T, slave_address: u8) -> Result<Self, T::Error> {
        check_address::<T::Error>(slave_address)?;

        transport.bind_address(slave_address).map_err(|err| {
            warning!("cannot bind slave address {:#x}", slave_address);
            Error::AddressBindFailed(err)
        })?;

        debug!("bound slave address {:#x}", slave_address);
        Ok(Self {
            bound: Some(Bound {
                transport,
                address: slave_address,
            }),
        })
    }

    /// Releases the transport. Safe to call any number of times.
    pub fn close(&mut self) {
        if let Some(bound) = self.bound.take() {
            debug!("closing slave address {:#x}", bound.address);
        }
    }

    /// Returns `true` while a transport is bound.
    pub fn is_open(&self) -> bool {
        self.bound.is_some()
    }

    /// Bound slave address, `None` once closed.
    pub fn address(&self) -> Option<u8> {
        self.bound.as_ref().map(|bound| bound.address)
    }

    /// Provides mutable access to the bound transport.
    pub fn transport_mut(&mut self) -> Option<&mut T> {
        self.bound.as_mut().map(|bound| &mut bound.transport)
    }

    /// Consumes the handle and returns the transport, if still bound.
    pub fn release(self) -> Option<T> {
        self.bound.map(|bound| bound.transport)
    }

    // ==================================================================
    // == Register Access ===============================================
    // ==================================================================
    /// Reads one register: a 1-byte address write, then a 1-byte read.
    pub fn read_register(&mut self, register: u8) -> Result<u8, T::Error> {
        let transport = self.transport()?;
        send(transport, &[register])?;

        let mut value = [0u8; 1];
        receive(transport, &mut value)?;

        trace!("read {:#x} = {:#x}", register, value[0]);
        Ok(value[0])
    }

    /// Reads `buf.len()` consecutive registers starting at `start_register`.
    ///
    /// The auto-increment bit is set on the address byte. `buf` is written
    /// only when the full burst arrived; an empty `buf` causes no traffic.
    pub fn read_burst(&mut self, start_register: u8, buf: &mut [u8]) -> Result<(), T::Error> {
        let transport = self.transport()?;
        if buf.len() > MAX_BURST {
            return Err(Error::InvalidLength(buf.len()));
        }
        if buf.is_empty() {
            return Ok(());
        }

        send(transport, &[start_register | AUTO_INCREMENT])?;

        let mut scratch = [0u8; MAX_BURST];
        let scratch = &mut scratch[..buf.len()];
        receive(transport, scratch)?;
        buf.copy_from_slice(scratch);

        trace!("burst read {} bytes from {:#x}", buf.len(), start_register);
        Ok(())
    }

    /// Reads `N` consecutive registers into an owned array.
    pub fn read_burst_array<const N: usize>(
        &mut self,
        start_register: u8,
    ) -> Result<[u8; N], T::Error> {
        let mut values = [0u8; N];
        self.read_burst(start_register, &mut values)?;
        Ok(values)
    }

    /// Writes one register as a single `[register, value]` transfer.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), T::Error> {
        let transport = self.transport()?;
        send(transport, &[register, value])?;

        trace!("wrote {:#x} = {:#x}", register, value);
        Ok(())
    }

    /// Writes `[start_register] + values` as one transfer.
    ///
    /// `values` may hold up to [`MAX_BURST`] bytes; an empty slice sends the
    /// bare `[start_register]` frame. Longer payloads are refused untransmitted.
    pub fn write_burst(&mut self, start_register: u8, values: &[u8]) -> Result<(), T::Error> {
        let transport = self.transport()?;
        if values.len() > MAX_BURST {
            return Err(Error::InvalidLength(values.len()));
        }

        let mut frame = [0u8; MAX_BURST + 1];
        frame[0] = start_register;
        frame[1..=values.len()].copy_from_slice(values);
        send(transport, &frame[..=values.len()])?;

        trace!("burst wrote {} bytes to {:#x}", values.len(), start_register);
        Ok(())
    }

    fn transport(&mut self) -> Result<&mut T, T::Error> {
        match self.bound.as_mut() {
            Some(bound) => Ok(&mut bound.transport),
            None => Err(Error::Closed),
        }
    }
}

fn check_address<E>(address: u8) -> Result<(), E> {
    if address > MAX_SLAVE_ADDRESS {
        warning!("slave address {:#x} exceeds 7 bits", address);
        return Err(Error::InvalidAddress(address));
    }
    Ok(())
}

fn send<T: Transport>(transport: &mut T, frame: &[u8]) -> Result<(), T::Error> {
    let written = transport.write(frame).map_err(|err| {
        warning!("i2c write failed");
        Error::Io(err)
    })?;
    expect_count(frame.len(), written)
}

fn receive<T: Transport>(transport: &mut T, buf: &mut [u8]) -> Result<(), T::Error> {
    let read = transport.read(buf).map_err(|err| {
        warning!("i2c read failed");
        Error::Io(err)
    })?;
    expect_count(buf.len(), read)
}

fn expect_count<E>(requested: usize, transferred: usize) -> Result<(), E> {
    if requested != transferred {
        warning!("short transfer: {} of {} bytes", transferred, requested);
        return Err(Error::ShortTransfer {
            requested,
            transferred,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::BusHandle;
    use crate::error::Error;
    use crate::transport::sim::{SimError, SimTransport};
    use crate::transport::{HalTransport, Open, Transport};
    use core::cell::Cell;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
    use std::rc::Rc;

    const ADDR: u8 = 0x19;

    /// Transport that records when it is dropped.
    struct Tracked {
        dropped: Rc<Cell<bool>>,
        accept_bind: bool,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    impl Transport for Tracked {
        type Error = &'static str;

        fn bind_address(&mut self, _address: u8) -> Result<(), Self::Error> {
            if self.accept_bind { Ok(()) } else { Err("ebusy") }
        }

        fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
            Ok(bytes.len())
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            Ok(buf.len())
        }
    }

    /// Transport whose path never exists.
    struct Missing;

    impl Transport for Missing {
        type Error = &'static str;

        fn bind_address(&mut self, _address: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, _bytes: &[u8]) -> Result<usize, Self::Error> {
            Ok(0)
        }

        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
            Ok(0)
        }
    }

    impl Open for Missing {
        fn open(_path: &str) -> Result<Self, Self::Error> {
            Err("enoent")
        }
    }

    #[test]
    fn open_binds_address() {
        let bus = BusHandle::<SimTransport>::open("/dev/i2c-1", ADDR).unwrap();
        assert!(bus.is_open());
        assert_eq!(bus.address(), Some(ADDR));
        assert_eq!(bus.release().unwrap().address(), Some(ADDR));
    }

    #[test]
    fn open_reports_unavailable_transport() {
        let result = BusHandle::<Missing>::open("/dev/i2c-9", ADDR);
        assert!(matches!(result, Err(Error::TransportUnavailable("enoent"))));
    }

    #[test]
    fn rejected_bind_releases_transport() {
        let dropped = Rc::new(Cell::new(false));
        let transport = Tracked {
            dropped: dropped.clone(),
            accept_bind: false,
        };

        let result = BusHandle::bind(transport, ADDR);
        assert!(matches!(result, Err(Error::AddressBindFailed("ebusy"))));
        assert!(dropped.get());
    }

    #[test]
    fn sim_bind_rejection_maps_to_address_bind_failed() {
        let mut sim = SimTransport::new();
        sim.reject_bind();
        let result = BusHandle::bind(sim, ADDR);
        assert!(matches!(
            result,
            Err(Error::AddressBindFailed(SimError::AddressRejected(ADDR)))
        ));
    }

    #[test]
    fn eight_bit_address_is_rejected_before_opening() {
        let result = BusHandle::<Missing>::open("/dev/i2c-9", 0x80);
        assert!(matches!(result, Err(Error::InvalidAddress(0x80))));
    }

    #[test]
    fn close_is_idempotent_and_releases_transport() {
        let dropped = Rc::new(Cell::new(false));
        let transport = Tracked {
            dropped: dropped.clone(),
            accept_bind: true,
        };
        let mut bus = BusHandle::bind(transport, ADDR).unwrap();

        bus.close();
        assert!(dropped.get());
        assert!(!bus.is_open());
        assert_eq!(bus.address(), None);

        bus.close();
        bus.close();
        assert!(bus.release().is_none());
    }

    #[test]
    fn scope_exit_closes_handle() {
        let dropped = Rc::new(Cell::new(false));
        {
            let transport = Tracked {
                dropped: dropped.clone(),
                accept_bind: true,
            };
            let _bus = BusHandle::bind(transport, ADDR).unwrap();
        }
        assert!(dropped.get());
    }

    #[test]
    fn closed_handle_refuses_every_operation() {
        let mut bus = BusHandle::bind(SimTransport::new(), ADDR).unwrap();
        bus.close();

        assert_eq!(bus.read_register(0x0F), Err(Error::Closed));
        assert_eq!(bus.write_register(0x20, 0x9F), Err(Error::Closed));
        assert_eq!(bus.read_burst(0x29, &mut [0u8; 6]), Err(Error::Closed));
        assert_eq!(bus.write_burst(0x20, &[0x9F]), Err(Error::Closed));
    }

    #[test]
    fn write_then_read_register_round_trips() {
        let mut bus = BusHandle::bind(SimTransport::new(), ADDR).unwrap();
        for value in [0x00, 0x5A, 0x9F, 0xFF] {
            bus.write_register(0x20, value).unwrap();
            assert_eq!(bus.read_register(0x20).unwrap(), value);
        }
    }

    #[test]
    fn register_frames_on_the_wire() {
        let expectations = [
            I2cTrans::write(ADDR, vec![0x0F]),
            I2cTrans::read(ADDR, vec![0x33]),
            I2cTrans::write(ADDR, vec![0x20, 0x9F]),
            I2cTrans::write(ADDR, vec![0x29 | 0x80]),
            I2cTrans::read(ADDR, vec![1, 2, 3, 4, 5, 6]),
            I2cTrans::write(ADDR, vec![0x20, 0x9F, 0x00, 0x00, 0x00]),
        ];
        let mut bus = BusHandle::bind(HalTransport::new(I2cMock::new(&expectations)), ADDR).unwrap();

        assert_eq!(bus.read_register(0x0F).unwrap(), 0x33);
        bus.write_register(0x20, 0x9F).unwrap();
        assert_eq!(bus.read_burst_array::<6>(0x29).unwrap(), [1, 2, 3, 4, 5, 6]);
        bus.write_burst(0x20, &[0x9F, 0x00, 0x00, 0x00]).unwrap();

        bus.release().unwrap().release().done();
    }

    #[test]
    fn short_burst_read_leaves_output_untouched() {
        let mut sim = SimTransport::new();
        sim.set_registers(0x29, &[1, 2, 3, 4, 5, 6]).limit_reads(5);
        let mut bus = BusHandle::bind(sim, ADDR).unwrap();

        let mut values = [0xEE; 6];
        let result = bus.read_burst(0x29, &mut values);

        assert_eq!(
            result,
            Err(Error::ShortTransfer {
                requested: 6,
                transferred: 5
            })
        );
        assert!(result.unwrap_err().is_io());
        assert_eq!(values, [0xEE; 6]);
    }

    #[test]
    fn short_address_write_aborts_read() {
        let mut sim = SimTransport::new();
        sim.limit_writes(0);
        let mut bus = BusHandle::bind(&mut sim, ADDR).unwrap();

        assert_eq!(
            bus.read_register(0x0F),
            Err(Error::ShortTransfer {
                requested: 1,
                transferred: 0
            })
        );
        drop(bus);
        assert_eq!(sim.read_count(), 0);
    }

    #[test]
    fn short_burst_write_is_an_io_error() {
        let mut sim = SimTransport::new();
        sim.limit_writes(3);
        let mut bus = BusHandle::bind(&mut sim, ADDR).unwrap();

        let result = bus.write_burst(0x20, &[1, 2, 3, 4]);
        assert_eq!(
            result,
            Err(Error::ShortTransfer {
                requested: 5,
                transferred: 3
            })
        );
        drop(bus);
        assert_eq!(sim.write_count(), 1);
        // Only [0x20, 1, 2] got through; without auto-increment both land on 0x20.
        assert_eq!(sim.register(0x20), 2);
        assert_eq!(sim.register(0x21), 0);
        assert_eq!(sim.register(0x22), 0);
        assert_eq!(sim.register(0x23), 0);
    }

    #[test]
    fn transport_fault_is_an_io_error() {
        let expectations = [I2cTrans::write(ADDR, vec![0x20, 0x01])
            .with_error(embedded_hal::i2c::ErrorKind::ArbitrationLoss)];
        let mut bus = BusHandle::bind(HalTransport::new(I2cMock::new(&expectations)), ADDR).unwrap();

        let err = bus.write_register(0x20, 0x01).unwrap_err();
        assert!(err.is_io());
        assert!(matches!(err, Error::Io(_)));

        bus.release().unwrap().release().done();
    }

    #[test]
    fn burst_lengths_are_bounded() {
        let mut sim = SimTransport::new();
        let mut bus = BusHandle::bind(&mut sim, ADDR).unwrap();

        assert_eq!(
            bus.write_burst(0x20, &[0u8; 256]),
            Err(Error::InvalidLength(256))
        );
        assert_eq!(
            bus.read_burst(0x28, &mut [0u8; 256]),
            Err(Error::InvalidLength(256))
        );
        assert_eq!(bus.read_burst(0x28, &mut []), Ok(()));
        bus.write_burst(0x00, &[0xAB; 255]).unwrap();

        drop(bus);
        assert_eq!(sim.write_count(), 1);
        assert_eq!(sim.read_count(), 0);
    }

    #[test]
    fn empty_burst_write_sends_bare_register_frame() {
        let expectations = [I2cTrans::write(ADDR, vec![0x20])];
        let mut bus = BusHandle::bind(HalTransport::new(I2cMock::new(&expectations)), ADDR).unwrap();

        assert_eq!(bus.write_burst(0x20, &[]), Ok(()));

        bus.release().unwrap().release().done();

        let mut sim = SimTransport::new();
        sim.set_register(0x20, 0x07);
        let mut bus = BusHandle::bind(&mut sim, ADDR).unwrap();
        assert_eq!(bus.write_burst(0x20, &[]), Ok(()));
        drop(bus);
        assert_eq!(sim.write_count(), 1);
        assert_eq!(sim.register(0x20), 0x07);
    }
}
