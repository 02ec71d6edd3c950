//! In-memory register-file transport.
//!
//! Behaves like a register-oriented I2C slave: the first byte of every write
//! sets the register pointer and any following bytes are stored from there.
//! Reads return bytes starting at the pointer. The pointer advances only when
//! the addressing byte carried the auto-increment bit, as on ST parts.

use core::fmt;

use super::{Open, Transport};
use crate::registers::AUTO_INCREMENT;

const REGISTER_COUNT: usize = 256;

/// Faults the simulator can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// The simulated path does not exist.
    NoSuchDevice,
    /// The simulated adapter refused the slave address.
    AddressRejected(u8),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchDevice => f.write_str("no such simulated device"),
            Self::AddressRejected(addr) => write!(f, "address 0x{addr:02X} rejected"),
        }
    }
}

/// Simulated slave device backed by a 256-byte register file.
#[derive(Debug, Clone)]
pub struct SimTransport {
    registers: [u8; REGISTER_COUNT],
    locked: [bool; REGISTER_COUNT],
    pointer: u8,
    auto_increment: bool,
    address: Option<u8>,
    reject_bind: bool,
    read_limit: Option<usize>,
    write_limit: Option<usize>,
    writes: usize,
    reads: usize,
}

impl Default for SimTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SimTransport {
    /// Creates a simulator with every register cleared.
    pub const fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            locked: [false; REGISTER_COUNT],
            pointer: 0,
            auto_increment: false,
            address: None,
            reject_bind: false,
            read_limit: None,
            write_limit: None,
            writes: 0,
            reads: 0,
        }
    }

    /// Presets a register value, bypassing any lock.
    pub fn set_register(&mut self, register: u8, value: u8) -> &mut Self {
        self.registers[usize::from(register)] = value;
        self
    }

    /// Presets consecutive registers starting at `start`.
    pub fn set_registers(&mut self, start: u8, values: &[u8]) -> &mut Self {
        for (offset, value) in values.iter().enumerate() {
            let index = (usize::from(start) + offset) % REGISTER_COUNT;
            self.registers[index] = *value;
        }
        self
    }

    /// Returns the current value of a register.
    pub fn register(&self, register: u8) -> u8 {
        self.registers[usize::from(register)]
    }

    /// Makes a register ignore bus writes, as a read-only or stuck register would.
    pub fn lock_register(&mut self, register: u8) -> &mut Self {
        self.locked[usize::from(register)] = true;
        self
    }

    /// Makes `bind_address` fail.
    pub fn reject_bind(&mut self) -> &mut Self {
        self.reject_bind = true;
        self
    }

    /// Caps every read at `limit` bytes, producing short transfers.
    pub fn limit_reads(&mut self, limit: usize) -> &mut Self {
        self.read_limit = Some(limit);
        self
    }

    /// Caps every write at `limit` bytes, producing short transfers.
    pub fn limit_writes(&mut self, limit: usize) -> &mut Self {
        self.write_limit = Some(limit);
        self
    }

    /// Currently bound slave address.
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Number of write transfers seen.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Number of read transfers seen.
    pub fn read_count(&self) -> usize {
        self.reads
    }

    fn store(&mut self, value: u8) {
        let index = usize::from(self.pointer);
        if !self.locked[index] {
            self.registers[index] = value;
        }
        self.advance();
    }

    fn advance(&mut self) {
        if self.auto_increment {
            self.pointer = self.pointer.wrapping_add(1);
        }
    }
}

impl Transport for SimTransport {
    type Error = SimError;

    fn bind_address(&mut self, address: u8) -> core::result::Result<(), Self::Error> {
        if self.reject_bind {
            return Err(SimError::AddressRejected(address));
        }
        self.address = Some(address);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> core::result::Result<usize, Self::Error> {
        self.writes += 1;
        let accepted = self.write_limit.map_or(bytes.len(), |limit| bytes.len().min(limit));
        let Some((command, data)) = bytes[..accepted].split_first() else {
            return Ok(0);
        };

        self.auto_increment = command & AUTO_INCREMENT != 0;
        self.pointer = command & !AUTO_INCREMENT;
        for value in data {
            self.store(*value);
        }
        Ok(accepted)
    }

    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        self.reads += 1;
        let delivered = self.read_limit.map_or(buf.len(), |limit| buf.len().min(limit));
        for slot in &mut buf[..delivered] {
            *slot = self.registers[usize::from(self.pointer)];
            self.advance();
        }
        Ok(delivered)
    }
}

impl Open for SimTransport {
    /// Any path other than the empty string opens a fresh simulator.
    fn open(path: &str) -> core::result::Result<Self, Self::Error> {
        if path.is_empty() {
            return Err(SimError::NoSuchDevice);
        }
        Ok(Self::new())
    }
}

#[cfg(test)]
mod tests {
    use super::{SimError, SimTransport};
    use crate::transport::{Open, Transport};

    #[test]
    fn write_then_read_echoes_register() {
        let mut sim = SimTransport::new();
        sim.write(&[0x20, 0x9F]).unwrap();
        sim.write(&[0x20]).unwrap();

        let mut value = [0u8; 1];
        assert_eq!(sim.read(&mut value).unwrap(), 1);
        assert_eq!(value, [0x9F]);
        assert_eq!(sim.register(0x20), 0x9F);
    }

    #[test]
    fn auto_increment_bit_walks_consecutive_registers() {
        let mut sim = SimTransport::new();
        sim.set_registers(0x29, &[1, 2, 3]);
        sim.write(&[0x29 | 0x80]).unwrap();

        let mut values = [0u8; 3];
        sim.read(&mut values).unwrap();
        assert_eq!(values, [1, 2, 3]);
    }

    #[test]
    fn plain_address_rereads_the_same_register() {
        let mut sim = SimTransport::new();
        sim.set_registers(0x29, &[1, 2, 3]);
        sim.write(&[0x29]).unwrap();

        let mut values = [0u8; 3];
        sim.read(&mut values).unwrap();
        assert_eq!(values, [1, 1, 1]);
    }

    #[test]
    fn locked_register_ignores_writes() {
        let mut sim = SimTransport::new();
        sim.set_register(0x23, 0x30).lock_register(0x23);
        sim.write(&[0x23, 0x00]).unwrap();
        assert_eq!(sim.register(0x23), 0x30);
    }

    #[test]
    fn limits_produce_short_transfers() {
        let mut sim = SimTransport::new();
        sim.limit_reads(5).limit_writes(1);

        assert_eq!(sim.write(&[0x20, 0x01]).unwrap(), 1);
        assert_eq!(sim.register(0x20), 0x00);

        let mut values = [0u8; 6];
        assert_eq!(sim.read(&mut values).unwrap(), 5);
    }

    #[test]
    fn open_and_bind_failures() {
        assert_eq!(SimTransport::open("").unwrap_err(), SimError::NoSuchDevice);

        let mut sim = SimTransport::open("/dev/i2c-sim").unwrap();
        sim.reject_bind();
        assert_eq!(
            sim.bind_address(0x19),
            Err(SimError::AddressRejected(0x19))
        );
        assert_eq!(sim.address(), None);
    }
}
