//! Linux `i2c-dev` character-device transport.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::AsRawFd;

use super::{Open, Transport};

// <linux/i2c-dev.h>
const I2C_SLAVE: u16 = 0x0703;

nix::ioctl_write_int_bad!(i2c_set_slave, I2C_SLAVE);

/// Transport over a `/dev/i2c-N` device node.
///
/// The file descriptor is closed when the transport is dropped.
#[derive(Debug)]
pub struct LinuxTransport {
    file: File,
}

impl LinuxTransport {
    /// Wraps an already opened device node.
    pub fn from_file(file: File) -> Self {
        Self { file }
    }
}

impl Open for LinuxTransport {
    fn open(path: &str) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { file })
    }
}

impl Transport for LinuxTransport {
    type Error = io::Error;

    fn bind_address(&mut self, address: u8) -> io::Result<()> {
        // SAFETY: the descriptor is owned by `self.file` and stays open for the
        // duration of the call; I2C_SLAVE takes its argument by value.
        unsafe { i2c_set_slave(self.file.as_raw_fd(), i32::from(address)) }?;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.file.write(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}
