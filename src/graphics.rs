//! embedded-graphics support
//!
//! This module is behind the "graphics" feature flag. It implements
//! `DrawTarget` for [`Display`] with [`Rgb565`] colors, so all the shapes,
//! images and fonts of the embedded_graphics ecosystem can be drawn directly
//! onto the controller. There is no frame buffer: every primitive goes out on
//! the bus as soon as it is drawn.
//!
//! Solid fills (rectangles, `clear`) are clipped to the display and sent as a
//! single chunked window fill, everything else is drawn pixel by pixel.
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::{
        raw::{RawData, RawU16},
        Rgb565,
    },
    primitives::Rectangle,
    Pixel,
};

use crate::{backend::Bus, controller::Controller, display::Display, error::Error};

#[inline]
fn raw(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}

impl<BUS, C> DrawTarget for Display<BUS, C>
where
    BUS: Bus,
    C: Controller,
{
    type Color = Rgb565;
    type Error = Error<BUS::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, raw(color))?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        // fill_rectangle clamps instead of clipping, so clip first
        let area = area.intersection(&self.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }
        self.fill_rectangle(
            area.top_left.x,
            area.top_left.y,
            area.size.width as i32,
            area.size.height as i32,
            raw(color),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(raw(color))
    }
}

impl<BUS, C> OriginDimensions for Display<BUS, C>
where
    BUS: Bus,
    C: Controller,
{
    fn size(&self) -> Size {
        Size::new(self.width().into(), self.height().into())
    }
}
