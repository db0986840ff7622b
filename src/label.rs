//! Label artifact builder - renders one label into an immutable list of
//! drawing operations that can be replayed any number of times.

use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::config::{FontSpec, LayoutConfig};
use crate::error::{EncodeError, SinkError};
use crate::sink::DrawingSink;
use crate::symbol::SymbolEncoder;

/// One drawing operation of a label, in label-local coordinates.
#[derive(Debug, Clone)]
pub enum LabelOp {
    /// Rounded frame along the label edge.
    Frame {
        width: i32,
        height: i32,
        corner_radius: u32,
        pen_width: u32,
    },
    /// A text field; `y` is the baseline.
    Text { x: i32, y: i32, text: String },
    /// The scaled symbol bitmap, drawn last so nothing occludes it.
    Symbol { x: i32, y: i32, image: GrayImage },
}

/// One fully rendered label: a fixed-size drawable recorded once and
/// replayed at an absolute origin per grid cell.
#[derive(Debug, Clone)]
pub struct LabelArtifact {
    width: i32,
    height: i32,
    font: FontSpec,
    ops: Vec<LabelOp>,
}

impl LabelArtifact {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn ops(&self) -> &[LabelOp] {
        &self.ops
    }

    /// Emit the recorded operations through `sink`, translated to `origin`.
    pub fn replay(
        &self,
        sink: &mut dyn DrawingSink,
        origin: (i32, i32),
    ) -> Result<(), SinkError> {
        let (ox, oy) = origin;
        for op in &self.ops {
            match op {
                LabelOp::Frame {
                    width,
                    height,
                    corner_radius,
                    pen_width,
                } => {
                    sink.draw_rounded_rect(ox, oy, *width, *height, *corner_radius, *pen_width)?
                }
                LabelOp::Text { x, y, text } => {
                    sink.draw_text(ox + x, oy + y, text, &self.font)?
                }
                LabelOp::Symbol { x, y, image } => sink.draw_image(ox + x, oy + y, image)?,
            }
        }
        Ok(())
    }
}

/// Build one label artifact from its text fields.
///
/// The symbol payload is `"S/N {article}, Lot {lot}, Date {date}"`. The
/// symbol bitmap is scaled to `config.code_size` without preserving aspect
/// ratio, and item positions are not checked against the frame interior;
/// both match the sheets operators already have.
pub fn build_label(
    article: &str,
    date_code: &str,
    lot_code: &str,
    config: &LayoutConfig,
    encoder: &dyn SymbolEncoder,
) -> Result<LabelArtifact, EncodeError> {
    let payload = format!("S/N {article}, Lot {lot_code}, Date {date_code}");
    let symbol = encoder.encode(&payload)?;
    let symbol = imageops::resize(
        &symbol,
        config.code_size.0,
        config.code_size.1,
        FilterType::Nearest,
    );

    let (width, height) = config.label_size;
    let positions = &config.item_positions;
    let mut ops = Vec::new();

    if config.frame.visible {
        ops.push(LabelOp::Frame {
            width,
            height,
            corner_radius: config.frame.corner_radius,
            pen_width: config.frame.pen_width,
        });
    }
    ops.push(LabelOp::Text {
        x: positions.article.0,
        y: positions.article.1,
        text: format!("S/N {article}"),
    });
    ops.push(LabelOp::Text {
        x: positions.date.0,
        y: positions.date.1,
        text: format!("Date {date_code}"),
    });
    ops.push(LabelOp::Text {
        x: positions.lot.0,
        y: positions.lot.1,
        text: format!("Lot {lot_code}"),
    });
    ops.push(LabelOp::Symbol {
        x: positions.code.0,
        y: positions.code.1,
        image: symbol,
    });

    Ok(LabelArtifact {
        width,
        height,
        font: config.font.clone(),
        ops,
    })
}
