//! Errors returned by the [`Display`](crate::Display) engine.

use core::fmt;

/// Controller commands the display engine relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Column (x) address window
    ColumnSet,
    /// Page (y) address window
    PageSet,
    /// Memory write, followed by pixel data
    RamWrite,
    /// Memory read, followed by pixel data from the controller
    RamRead,
}

/// Error type of all display operations.
///
/// `E` is the error of the underlying [`Bus`](crate::Bus), which is passed
/// through unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The target rectangle does not fit on the display.
    ///
    /// Only strict operations ([`blit_buffer`](crate::Display::blit_buffer) and
    /// pixel reads) report this, drawing operations clamp instead.
    OutOfBounds,
    /// A caller supplied buffer does not match the size of its rectangle.
    BufferSize,
    /// The [`Controller`](crate::Controller) profile does not define a command
    /// the operation needs.
    Unconfigured(Command),
    /// The [`Controller`](crate::Controller) profile uses a pixel or position
    /// width of zero or beyond [`MAX_PIXEL_BYTES`](crate::MAX_PIXEL_BYTES) /
    /// [`MAX_POSITION_BYTES`](crate::MAX_POSITION_BYTES).
    InvalidProfile,
    /// The bus failed.
    Bus(E),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ColumnSet => f.write_str("column set"),
            Command::PageSet => f.write_str("page set"),
            Command::RamWrite => f.write_str("RAM write"),
            Command::RamRead => f.write_str("RAM read"),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfBounds => f.write_str("out of bounds"),
            Error::BufferSize => f.write_str("buffer size does not match the target rectangle"),
            Error::Unconfigured(command) => {
                write!(f, "controller profile has no {} command", command)
            }
            Error::InvalidProfile => f.write_str("controller profile has unsupported wire widths"),
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
        }
    }
}
