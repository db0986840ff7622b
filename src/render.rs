//! PDF print destination - a paginated [`DrawingSink`] that turns draw
//! commands into `printpdf` (v0.8 ops-based API) pages.
//!
//! Device pixels map to PDF points at the fixed [`DPI`]: `pt = px * 72 / DPI`.
//! The page is A4 and the PDF origin is bottom-left, so every y coordinate is
//! flipped against the page height.

use std::io::Cursor;

use ::image::{DynamicImage, GrayImage, ImageFormat};
use printpdf::*;

use crate::config::FontSpec;
use crate::error::SinkError;
use crate::sink::DrawingSink;
use crate::units::DPI;

/// A4 page size in PDF points.
const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;

/// Straight-segment count used to approximate one ellipse outline.
const ELLIPSE_SEGMENTS: usize = 24;
/// Straight-segment count per rounded-rect corner arc.
const CORNER_SEGMENTS: usize = 4;

/// Paginated drawing sink producing a PDF document.
pub struct PdfSink {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
    warnings: Vec<PdfWarnMsg>,
}

impl PdfSink {
    pub fn new(title: &str) -> Self {
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            ops: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Close the current page and serialize the document.
    pub fn finish(mut self) -> Vec<u8> {
        self.flush_page();
        let pages = std::mem::take(&mut self.pages);
        self.doc.with_pages(pages);
        self.doc.save(&PdfSaveOptions::default(), &mut Vec::new())
    }

    /// Pages emitted so far, counting the one still being drawn.
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    fn flush_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(PdfPage::new(
            Mm(PAGE_WIDTH_PT * 0.352778),
            Mm(PAGE_HEIGHT_PT * 0.352778),
            ops,
        ));
    }

    fn pt(&self, px: i32) -> f32 {
        px as f32 * 72.0 / DPI as f32
    }

    /// Flip a top-left-origin y coordinate into PDF space.
    fn pdf_y(&self, px: i32) -> f32 {
        PAGE_HEIGHT_PT - self.pt(px)
    }

    fn push_fill_black(&mut self) {
        self.ops.push(Op::SetFillColor {
            col: Color::Rgb(Rgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                icc_profile: None,
            }),
        });
    }

    fn push_outline_black(&mut self, thickness_pt: f32) {
        self.ops.push(Op::SetOutlineColor {
            col: Color::Rgb(Rgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                icc_profile: None,
            }),
        });
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(thickness_pt),
        });
    }
}

fn line_point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

/// Points along an arc around `(cx, cy)`, start/end angles in degrees.
fn arc_points(cx: f32, cy: f32, radius: f32, start_deg: f32, end_deg: f32) -> Vec<LinePoint> {
    (0..=CORNER_SEGMENTS)
        .map(|i| {
            let t = start_deg + (end_deg - start_deg) * i as f32 / CORNER_SEGMENTS as f32;
            let t = t.to_radians();
            line_point(cx + radius * t.cos(), cy + radius * t.sin())
        })
        .collect()
}

impl DrawingSink for PdfSink {
    fn is_paginated(&self) -> bool {
        true
    }

    fn begin_page(&mut self) -> Result<(), SinkError> {
        self.flush_page();
        Ok(())
    }

    fn draw_image(&mut self, x: i32, y: i32, image: &GrayImage) -> Result<(), SinkError> {
        // Round-trip through PNG: printpdf registers encoded bytes as a
        // reusable XObject.
        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image.clone())
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| SinkError::Image(e.to_string()))?;

        let raw = RawImage::decode_from_bytes(&png, &mut self.warnings)
            .map_err(|e| SinkError::Image(e.to_string()))?;
        let xobj_id = self.doc.add_image(&raw);

        let width_pt = self.pt(image.width() as i32);
        let height_pt = self.pt(image.height() as i32);
        // translate_y addresses the bottom edge of the placed image.
        let bottom_y = self.pdf_y(y) - height_pt;

        // At dpi=72 printpdf renders 1 px = 1 pt, so scale = desired_pt / px.
        let scale_x = width_pt / image.width() as f32;
        let scale_y = height_pt / image.height() as f32;

        self.ops.push(Op::UseXobject {
            id: xobj_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(self.pt(x))),
                translate_y: Some(Pt(bottom_y)),
                dpi: Some(72.0),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                rotate: None,
            },
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        font: &FontSpec,
    ) -> Result<(), SinkError> {
        let builtin = if font.weight >= 600 {
            BuiltinFont::HelveticaBold
        } else {
            BuiltinFont::Helvetica
        };
        let size_pt = self.pt(font.size as i32);

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(self.pt(x)),
                // The incoming y is already the baseline.
                y: Pt(self.pdf_y(y)),
            },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(size_pt),
            font: builtin,
        });
        self.push_fill_black();
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font: builtin,
        });
        self.ops.push(Op::EndTextSection);
        Ok(())
    }

    fn draw_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        corner_radius: u32,
        pen_width: u32,
    ) -> Result<(), SinkError> {
        let x1 = self.pt(x);
        let x2 = self.pt(x + width);
        let top = self.pdf_y(y);
        let bottom = self.pdf_y(y + height);
        let radius = self.pt(corner_radius as i32);

        // Pen width 0 is the cosmetic one-device-pixel pen.
        let pen_pt = self.pt(pen_width.max(1) as i32);
        self.push_outline_black(pen_pt);

        let mut points = Vec::new();
        points.extend(arc_points(x2 - radius, top - radius, radius, 90.0, 0.0));
        points.extend(arc_points(x2 - radius, bottom + radius, radius, 0.0, -90.0));
        points.extend(arc_points(x1 + radius, bottom + radius, radius, 270.0, 180.0));
        points.extend(arc_points(x1 + radius, top - radius, radius, 180.0, 90.0));

        self.ops.push(Op::DrawLine {
            line: Line {
                points,
                is_closed: true,
            },
        });
        Ok(())
    }

    fn draw_ellipse(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), SinkError> {
        let rx = self.pt(width) / 2.0;
        let ry = self.pt(height) / 2.0;
        let cx = self.pt(x) + rx;
        let cy = self.pdf_y(y) - ry;

        self.push_fill_black();

        let points: Vec<LinePoint> = (0..ELLIPSE_SEGMENTS)
            .map(|i| {
                let t = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
                line_point(cx + rx * t.cos(), cy + ry * t.sin())
            })
            .collect();

        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing { points }],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            },
        });
        Ok(())
    }
}
