//! # Display engine
//!
//! [`Display`] implements every drawing operation on top of two primitives:
//! programming the controller's address window and streaming pixel data into
//! (or out of) it. Nothing is buffered on the MCU side, large fills are sent
//! in fixed size chunks so the memory use does not depend on the area drawn.
//!
//! Two bounds policies are used on purpose:
//!  - drawing operations ([`set_pixel`](Display::set_pixel),
//!    [`fill_rectangle`](Display::fill_rectangle) and the lines) clamp to the
//!    canvas and never fail because of coordinates,
//!  - [`blit_buffer`](Display::blit_buffer) is strict, because the caller's
//!    buffer has to match the window exactly.
//!
//! The window programming and the data transfer are separate bus
//! transactions. A `Display` must not be shared between execution contexts
//! without serializing whole operations.
use core::cmp::{max, min};
use core::marker::PhantomData;

use crate::{
    backend::Bus,
    controller::Controller,
    error::{Command, Error},
    FILL_BUFFER_BYTES, MAX_PIXEL_BYTES, MAX_POSITION_BYTES,
};

/// Inclusive pixel rectangle `(x0, y0)..=(x1, y1)`.
///
/// The corners are always ordered, `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
}

impl Rect {
    /// Rectangle spanning the two corners, given in any order.
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Rect { x0, y0, x1, y1 }
    }

    /// Top left corner.
    pub const fn start(&self) -> (u16, u16) {
        (self.x0, self.y0)
    }

    /// Bottom right corner, inclusive.
    pub const fn end(&self) -> (u16, u16) {
        (self.x1, self.y1)
    }

    pub const fn width(&self) -> usize {
        (self.x1 - self.x0) as usize + 1
    }

    pub const fn height(&self) -> usize {
        (self.y1 - self.y0) as usize + 1
    }

    /// Number of pixels covered.
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }
}

/// Driver for one display, generic over the bus and the controller profile.
#[derive(Debug)]
pub struct Display<BUS, C> {
    bus: BUS,
    width: u16,
    height: u16,
    _controller: PhantomData<C>,
}

impl<BUS, C> Display<BUS, C>
where
    BUS: Bus,
    C: Controller,
{
    /// Creates the driver and runs the controller's initialization sequence.
    ///
    /// `width` and `height` are the logical pixel dimensions and must not be
    /// zero. A controller with a reset line has to come out of reset first,
    /// see [`SpiBus::with_reset`](crate::SpiBus::with_reset).
    ///
    /// Fails with [`Error::InvalidProfile`] before touching the bus if the
    /// profile's wire widths do not fit the driver's buffers.
    pub fn new(bus: BUS, _controller: C, width: u16, height: u16) -> Result<Self, Error<BUS::Error>> {
        if !Self::valid_profile() {
            return Err(Error::InvalidProfile);
        }
        if width == 0 || height == 0 {
            return Err(Error::OutOfBounds);
        }

        let mut display = Display {
            bus,
            width,
            height,
            _controller: PhantomData,
        };
        display.init()?;

        log::debug!("display ready, {}x{} pixels", width, height);
        Ok(display)
    }

    /// Sends the controller's initialization sequence.
    ///
    /// [`new`](Self::new) already does this, calling it again is only useful
    /// after a hardware reset.
    pub fn init(&mut self) -> Result<(), Error<BUS::Error>> {
        log::debug!("sending {} init steps", C::INIT.len());
        for (command, data) in C::INIT.iter() {
            self.bus.write(*command, *data).map_err(Error::Bus)?;
        }
        Ok(())
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Raw access to the bus, for controller specific commands (rotation,
    /// sleep, inversion, ...).
    ///
    /// The address window is reprogrammed by every drawing operation, so
    /// touching it here does not confuse the driver.
    pub fn bus_mut(&mut self) -> &mut BUS {
        &mut self.bus
    }

    /// Sends one command/data pair as is.
    pub fn write_command(
        &mut self,
        command: u8,
        data: Option<&[u8]>,
    ) -> Result<(), Error<BUS::Error>> {
        self.bus.write(Some(command), data).map_err(Error::Bus)
    }

    /// Destroys the driver and gives back the bus.
    pub fn release(self) -> BUS {
        self.bus
    }

    /// Programs the address window and starts a memory write.
    ///
    /// With a `payload` it is sent along with the RAM write command, without
    /// one the controller is left in write mode and the caller streams the
    /// pixels with data-only writes on the bus.
    ///
    /// `rect` must already lie on the display, it is not clamped here.
    pub fn set_window_and_write(
        &mut self,
        rect: Rect,
        payload: Option<&[u8]>,
    ) -> Result<(), Error<BUS::Error>> {
        let ram_write = Self::command(C::RAM_WRITE, Command::RamWrite)?;
        self.set_window(rect)?;
        self.bus.write(Some(ram_write), payload).map_err(Error::Bus)
    }

    /// Programs the address window and reads its pixels back in the read
    /// format into the front of `buffer`.
    ///
    /// Exactly `rect.area() * READ_PIXEL_BYTES` bytes are read. `rect` is not
    /// clamped.
    pub fn set_window_and_read(
        &mut self,
        rect: Rect,
        buffer: &mut [u8],
    ) -> Result<(), Error<BUS::Error>> {
        let ram_read = Self::command(C::RAM_READ, Command::RamRead)?;
        let len = rect.area() * C::READ_PIXEL_BYTES;
        if buffer.len() < len {
            return Err(Error::BufferSize);
        }
        self.set_window(rect)?;
        self.bus
            .read(Some(ram_read), &mut buffer[..len])
            .map_err(Error::Bus)
    }

    fn set_window(&mut self, rect: Rect) -> Result<(), Error<BUS::Error>> {
        let column_set = Self::command(C::COLUMN_SET, Command::ColumnSet)?;
        let page_set = Self::command(C::PAGE_SET, Command::PageSet)?;
        log::trace!(
            "window ({}, {})..=({}, {})",
            rect.x0,
            rect.y0,
            rect.x1,
            rect.y1
        );

        let mut position = [0u8; MAX_POSITION_BYTES];
        let position = &mut position[..C::POSITION_BYTES];

        C::encode_position(rect.x0, rect.x1, position);
        self.bus.write(Some(column_set), Some(&*position)).map_err(Error::Bus)?;

        C::encode_position(rect.y0, rect.y1, position);
        self.bus.write(Some(page_set), Some(&*position)).map_err(Error::Bus)
    }

    fn valid_profile() -> bool {
        (1..=MAX_PIXEL_BYTES).contains(&C::PIXEL_BYTES)
            && (1..=MAX_PIXEL_BYTES).contains(&C::READ_PIXEL_BYTES)
            && (1..=MAX_POSITION_BYTES).contains(&C::POSITION_BYTES)
    }

    fn command(id: Option<u8>, command: Command) -> Result<u8, Error<BUS::Error>> {
        id.ok_or(Error::Unconfigured(command))
    }

    /// Reads back the color of one pixel.
    ///
    /// Coordinates outside the display cannot be addressed and yield
    /// [`Error::OutOfBounds`].
    pub fn pixel(&mut self, x: i32, y: i32) -> Result<u16, Error<BUS::Error>> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds);
        }
        let (x, y) = (x as u16, y as u16);

        let mut buffer = [0u8; MAX_PIXEL_BYTES];
        let buffer = &mut buffer[..C::READ_PIXEL_BYTES];
        self.set_window_and_read(Rect::new(x, y, x, y), buffer)?;
        Ok(C::decode_pixel(buffer))
    }

    /// Sets one pixel. Pixels outside of the display are silently ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u16) -> Result<(), Error<BUS::Error>> {
        if !self.contains(x, y) {
            return Ok(());
        }
        let (x, y) = (x as u16, y as u16);

        let mut pixel = [0u8; MAX_PIXEL_BYTES];
        let pixel = &mut pixel[..C::PIXEL_BYTES];
        C::encode_pixel(color, pixel);
        self.set_window_and_write(Rect::new(x, y, x, y), Some(&*pixel))
    }

    /// Draws a filled rectangle with its top left corner at `(x, y)`.
    ///
    /// The corner is clamped onto the display and the size to `1..` what is
    /// left of the display from there, so something is always drawn: a zero or
    /// negative size draws a single pixel, an oversized one is cut off.
    pub fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: u16,
    ) -> Result<(), Error<BUS::Error>> {
        let display_width = i32::from(self.width);
        let display_height = i32::from(self.height);

        let x = min(display_width - 1, max(0, x));
        let y = min(display_height - 1, max(0, y));
        let w = min(display_width - x, max(1, width));
        let h = min(display_height - y, max(1, height));

        let rect = Rect::new(x as u16, y as u16, (x + w - 1) as u16, (y + h - 1) as u16);
        self.set_window_and_write(rect, None)?;
        self.stream_pixels(rect.area(), color)
    }

    // Repeats `color` `count` times as data-only writes, one chunk per write
    // and a final write with the remainder. The final write is issued even if
    // the remainder is empty.
    fn stream_pixels(&mut self, count: usize, color: u16) -> Result<(), Error<BUS::Error>> {
        let pixel_bytes = C::PIXEL_BYTES;
        let chunk = max(1, min(C::FILL_CHUNK_PIXELS, FILL_BUFFER_BYTES / pixel_bytes));

        let mut buffer = [0u8; FILL_BUFFER_BYTES];
        for pixel in buffer[..chunk * pixel_bytes].chunks_exact_mut(pixel_bytes) {
            C::encode_pixel(color, pixel);
        }
        let buffer = &buffer[..chunk * pixel_bytes];

        let (chunks, rest) = (count / chunk, count % chunk);
        log::trace!("streaming {} chunks of {} pixels, {} left", chunks, chunk, rest);
        for _ in 0..chunks {
            self.bus.write(None, Some(buffer)).map_err(Error::Bus)?;
        }
        self.bus
            .write(None, Some(&buffer[..rest * pixel_bytes]))
            .map_err(Error::Bus)
    }

    /// Fills the whole display.
    pub fn fill(&mut self, color: u16) -> Result<(), Error<BUS::Error>> {
        self.fill_rectangle(0, 0, i32::from(self.width), i32::from(self.height), color)
    }

    /// Draws a horizontal line, clamped like [`fill_rectangle`](Self::fill_rectangle).
    pub fn hline(&mut self, x: i32, y: i32, width: i32, color: u16) -> Result<(), Error<BUS::Error>> {
        self.fill_rectangle(x, y, width, 1, color)
    }

    /// Draws a vertical line, clamped like [`fill_rectangle`](Self::fill_rectangle).
    pub fn vline(&mut self, x: i32, y: i32, height: i32, color: u16) -> Result<(), Error<BUS::Error>> {
        self.fill_rectangle(x, y, 1, height, color)
    }

    /// Copies pre-encoded pixels (in the controller's write format, row by
    /// row) into the rectangle at `(x, y)` of size `width` x `height`.
    ///
    /// Nothing is sent unless the rectangle lies completely on the display
    /// ([`Error::OutOfBounds`]) and `buffer` holds exactly its pixels
    /// ([`Error::BufferSize`]).
    pub fn blit_buffer(
        &mut self,
        buffer: &[u8],
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), Error<BUS::Error>> {
        if !self.contains(x, y)
            || width < 1
            || height < 1
            || width > i32::from(self.width) - x
            || height > i32::from(self.height) - y
        {
            return Err(Error::OutOfBounds);
        }

        let rect = Rect::new(x as u16, y as u16, (x + width - 1) as u16, (y + height - 1) as u16);
        if buffer.len() != rect.area() * C::PIXEL_BYTES {
            return Err(Error::BufferSize);
        }
        self.set_window_and_write(rect, Some(buffer))
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        (0..i32::from(self.width)).contains(&x) && (0..i32::from(self.height)).contains(&y)
    }
}
