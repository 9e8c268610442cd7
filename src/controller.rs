//! # Controller profiles
//!
//! Everything that differs between controller models lives in a type
//! implementing [`Controller`]: the command ids used for window addressing,
//! the initialization sequence and the width of the pixel/coordinate wire
//! formats. The [`Display`](crate::Display) engine only ever talks to the
//! controller through these.
//!
//! A profile for a concrete panel usually only fills in the commands and its
//! init table:
//!
//! ```
//! use udisplay::{Controller, InitStep};
//!
//! pub struct St7735;
//!
//! impl Controller for St7735 {
//!     const COLUMN_SET: Option<u8> = Some(0x2a);
//!     const PAGE_SET: Option<u8> = Some(0x2b);
//!     const RAM_WRITE: Option<u8> = Some(0x2c);
//!     const RAM_READ: Option<u8> = Some(0x2e);
//!     const INIT: &'static [InitStep] = &[
//!         (Some(0x01), None),        // software reset
//!         (Some(0x11), None),        // sleep out
//!         (Some(0x3a), Some(&[0x05])), // 16 bit pixels
//!         (Some(0x29), None),        // display on
//!     ];
//! }
//! ```

use crate::codec;
use crate::DEFAULT_FILL_CHUNK_PIXELS;

/// One bus transaction of an initialization sequence.
///
/// A missing command sends the data on its own, missing data sends a bare
/// command.
pub type InitStep = (Option<u8>, Option<&'static [u8]>);

/// Description of one controller model.
///
/// Command ids default to `None`. A profile that leaves one unset can still be
/// used to construct a display, but every operation that needs the command
/// fails with [`Error::Unconfigured`](crate::Error::Unconfigured) before
/// touching the bus.
///
/// The wire widths default to a 2 byte pixel write, 4 byte coordinate pair and
/// 3 byte pixel read. A profile changing a width must override the matching
/// `encode_*`/`decode_*` function as well. Widths are limited by
/// [`MAX_PIXEL_BYTES`](crate::MAX_PIXEL_BYTES) and
/// [`MAX_POSITION_BYTES`](crate::MAX_POSITION_BYTES).
pub trait Controller {
    /// Column address set
    const COLUMN_SET: Option<u8> = None;
    /// Page (row) address set
    const PAGE_SET: Option<u8> = None;
    /// Memory write
    const RAM_WRITE: Option<u8> = None;
    /// Memory read
    const RAM_READ: Option<u8> = None;

    /// Sent in order, once, when the display is constructed.
    const INIT: &'static [InitStep] = &[];

    /// Bytes per pixel written to the controller.
    const PIXEL_BYTES: usize = 2;
    /// Bytes per start/end coordinate pair.
    const POSITION_BYTES: usize = 4;
    /// Bytes per pixel read back from the controller.
    const READ_PIXEL_BYTES: usize = 3;

    /// Pixels per transfer while streaming fills.
    const FILL_CHUNK_PIXELS: usize = DEFAULT_FILL_CHUNK_PIXELS;

    /// Writes `color` in the write format into `out` (`PIXEL_BYTES` long).
    fn encode_pixel(color: u16, out: &mut [u8]) {
        out.copy_from_slice(&codec::encode_pixel(color));
    }

    /// Writes the coordinate pair into `out` (`POSITION_BYTES` long).
    fn encode_position(a: u16, b: u16, out: &mut [u8]) {
        out.copy_from_slice(&codec::encode_position(a, b));
    }

    /// Decodes one pixel in the read format (`READ_PIXEL_BYTES` long).
    fn decode_pixel(data: &[u8]) -> u16 {
        codec::color565(data[0], data[1], data[2])
    }
}

/// Profile with the standard MIPI DCS addressing commands and no
/// initialization sequence.
///
/// Useful for panels that were already brought up by a bootloader, or together
/// with [`Display::write_command`](crate::Display::write_command) for a
/// hand written bring-up.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dcs;

impl Controller for Dcs {
    const COLUMN_SET: Option<u8> = Some(0x2a);
    const PAGE_SET: Option<u8> = Some(0x2b);
    const RAM_WRITE: Option<u8> = Some(0x2c);
    const RAM_READ: Option<u8> = Some(0x2e);
}
