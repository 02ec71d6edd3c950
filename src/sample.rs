//! Sample decoding: raw axis bytes to acceleration in g.

use crate::registers::AXIS_STRIDE;

/// Number of consecutive bytes spanning the X, Y and Z output registers.
pub const RAW_SAMPLE_BYTES: usize = 6;

/// Sensitivity of the high output byte at ±2 g.
pub const COUNTS_PER_G: f32 = 64.0;

/// Decimal precision applied to decoded values (4 digits).
pub const PRECISION_FACTOR: u32 = 10_000;

/// Measurement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// All axes in burst order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Six output bytes from one burst read starting at `OUT_X_H`.
///
/// Byte `2·i` carries the high byte of axis `i`; byte `2·i + 1` is the
/// neighbouring low byte and is not used for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample(pub [u8; RAW_SAMPLE_BYTES]);

impl RawSample {
    /// Returns the high byte carried for `axis`.
    pub const fn axis_msb(&self, axis: Axis) -> u8 {
        self.0[AXIS_STRIDE as usize * axis.index()]
    }

    /// Decodes every axis to g.
    pub fn decode(&self) -> AccelerationVector {
        let [x, y, z] = Axis::ALL.map(|axis| {
            round_to_precision(decode_axis_byte(self.axis_msb(axis)), PRECISION_FACTOR)
        });
        AccelerationVector { x, y, z }
    }
}

impl From<[u8; RAW_SAMPLE_BYTES]> for RawSample {
    fn from(bytes: [u8; RAW_SAMPLE_BYTES]) -> Self {
        Self(bytes)
    }
}

/// Acceleration along each axis in g, rounded to four decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelerationVector {
    /// X-axis acceleration.
    pub x: f32,
    /// Y-axis acceleration.
    pub y: f32,
    /// Z-axis acceleration.
    pub z: f32,
}

impl AccelerationVector {
    /// Returns the component along `axis`.
    pub const fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Decodes one high output byte to g.
///
/// Bit 7 selects the sign. Negative codes take their magnitude from the low
/// seven bits negated in two's complement, so `0xFF` is `-1/64` and `0x80`
/// is `-128/64`.
pub fn decode_axis_byte(byte: u8) -> f32 {
    if byte & 0x80 == 0 {
        f32::from(byte) / COUNTS_PER_G
    } else {
        let magnitude = u16::from(!byte & 0x7F) + 1;
        -f32::from(magnitude) / COUNTS_PER_G
    }
}

/// Rounds `value` to `1 / factor`, halves away from zero.
///
/// Scaling runs in `f64`, which keeps the result idempotent for every finite
/// `f32` input.
pub fn round_to_precision(value: f32, factor: u32) -> f32 {
    let factor = f64::from(factor);
    (libm::round(f64::from(value) * factor) / factor) as f32
}
