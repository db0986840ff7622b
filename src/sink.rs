//! Drawing sink - the destination for absolute-position draw commands.
//!
//! Pagination is an explicit capability queried through the trait, not
//! inferred from the concrete type: a printer sink paginates, a continuous
//! surface does not and simply keeps growing downward.

use image::GrayImage;

use crate::config::FontSpec;
use crate::error::SinkError;

/// Receives absolute-position draw commands from the layout engine.
pub trait DrawingSink {
    /// Whether [`DrawingSink::begin_page`] is available. Queried once per
    /// layout run.
    fn is_paginated(&self) -> bool;

    /// Finish the current page and start a new one. Only called when
    /// [`DrawingSink::is_paginated`] returns true.
    fn begin_page(&mut self) -> Result<(), SinkError>;

    fn draw_image(&mut self, x: i32, y: i32, image: &GrayImage) -> Result<(), SinkError>;

    /// Draw a single line of text; `y` is the baseline.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &FontSpec)
        -> Result<(), SinkError>;

    fn draw_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        corner_radius: u32,
        pen_width: u32,
    ) -> Result<(), SinkError>;

    /// Draw a filled ellipse inside the given bounding box.
    fn draw_ellipse(&mut self, x: i32, y: i32, width: i32, height: i32)
        -> Result<(), SinkError>;
}

/// One recorded draw command with absolute coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Image {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
    },
    RoundedRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        corner_radius: u32,
    },
    Ellipse {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    PageBreak,
}

/// A sink that records every command instead of drawing.
///
/// Doubles as the continuous on-screen surface (`paginated = false`) and as
/// the test probe for layout behaviour. `fail_after` injects a destination
/// failure to exercise mid-sequence aborts.
#[derive(Debug, Default)]
pub struct CaptureSink {
    paginated: bool,
    calls: Vec<DrawCall>,
    fail_after: Option<usize>,
}

impl CaptureSink {
    pub fn new(paginated: bool) -> Self {
        Self {
            paginated,
            calls: Vec::new(),
            fail_after: None,
        }
    }

    /// Record `limit` commands, then fail every subsequent one.
    pub fn failing_after(paginated: bool, limit: usize) -> Self {
        Self {
            paginated,
            calls: Vec::new(),
            fail_after: Some(limit),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn count(&self, matches: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }

    fn record(&mut self, call: DrawCall) -> Result<(), SinkError> {
        if let Some(limit) = self.fail_after {
            if self.calls.len() >= limit {
                return Err(SinkError::Device("injected failure".to_string()));
            }
        }
        self.calls.push(call);
        Ok(())
    }
}

impl DrawingSink for CaptureSink {
    fn is_paginated(&self) -> bool {
        self.paginated
    }

    fn begin_page(&mut self) -> Result<(), SinkError> {
        self.record(DrawCall::PageBreak)
    }

    fn draw_image(&mut self, x: i32, y: i32, image: &GrayImage) -> Result<(), SinkError> {
        self.record(DrawCall::Image {
            x,
            y,
            width: image.width(),
            height: image.height(),
        })
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        _font: &FontSpec,
    ) -> Result<(), SinkError> {
        self.record(DrawCall::Text {
            x,
            y,
            text: text.to_string(),
        })
    }

    fn draw_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        corner_radius: u32,
        _pen_width: u32,
    ) -> Result<(), SinkError> {
        self.record(DrawCall::RoundedRect {
            x,
            y,
            width,
            height,
            corner_radius,
        })
    }

    fn draw_ellipse(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), SinkError> {
        self.record(DrawCall::Ellipse {
            x,
            y,
            width,
            height,
        })
    }
}
