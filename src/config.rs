//! Layout and generation preferences - the single structure that drives both
//! label building and sheet layout, persisted between sessions as one unit.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::units::mm_to_pixels;

/// Geometry of the label grid and of the items drawn on each label.
///
/// All lengths are device pixels at [`crate::units::DPI`]. Replaced as a
/// whole when the user accepts new preferences, never mutated field by field
/// mid-render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Width and height of one label.
    pub label_size: (i32, i32),
    /// Horizontal and vertical gap between neighbouring labels.
    pub spacing: (i32, i32),
    /// Labels per row.
    pub columns: u32,
    /// Rows per page before a page break on paginated sinks.
    pub rows_per_page: u32,
    /// Position of the first label's top-left corner on each page.
    pub first_label_offset: (i32, i32),

    /// Whether to print the L-shaped registration pattern on each page.
    pub alignment_marks: bool,
    /// Top-left alignment mark position.
    pub first_mark_position: (i32, i32),
    /// Size of each alignment mark dot.
    pub mark_size: (i32, i32),
    /// Distance from the first mark to the horizontal and vertical marks.
    pub mark_pitch: (i32, i32),

    /// Size the symbol bitmap is scaled to on the label.
    pub code_size: (u32, u32),
    /// Where each item is drawn, in label-local coordinates.
    pub item_positions: ItemPositions,
    pub font: FontSpec,
    pub frame: FrameOptions,
}

/// Label-local positions of the drawn items. Text positions are baselines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPositions {
    pub article: (i32, i32),
    pub date: (i32, i32),
    pub lot: (i32, i32),
    pub code: (i32, i32),
}

/// Font used for the three text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: u32,
    pub weight: u32,
}

/// Rounded frame drawn around the label edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOptions {
    pub visible: bool,
    pub pen_width: u32,
    pub corner_radius: u32,
}

/// Inputs of one "generate" run: how many labels and what goes on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateSettings {
    pub count: u32,
    /// Serial counter for the first label; subsequent labels increment it.
    pub first_article_number: u32,
    /// Week/year date code, free-form (e.g. "40/20").
    pub date_code: String,
    pub lot_code: String,
}

/// Everything persisted between sessions, saved and loaded as one unit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub layout: LayoutConfig,
    pub generate: GenerateSettings,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            label_size: (129, 55),
            spacing: (5, 5),
            columns: 5,
            rows_per_page: 17,
            first_label_offset: (30, 35),
            alignment_marks: true,
            first_mark_position: (25, 15),
            mark_size: (7, 7),
            // The marks sit 185 mm apart horizontally and 270 mm vertically
            // so they frame the label area of an A4 sheet.
            mark_pitch: (mm_to_pixels(185.0), mm_to_pixels(270.0)),
            code_size: (37, 37),
            item_positions: ItemPositions {
                article: (45, 20),
                date: (45, 50),
                lot: (45, 35),
                code: (5, 10),
            },
            font: FontSpec {
                family: "Segoe UI".to_string(),
                size: 9,
                weight: 400,
            },
            frame: FrameOptions {
                visible: true,
                pen_width: 0,
                corner_radius: 5,
            },
        }
    }
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            count: 10,
            first_article_number: 0,
            date_code: "40/20".to_string(),
            lot_code: "X000".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Check the structural invariants the layout engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::OutOfRange {
                field: "columns",
                requirement: "at least 1",
            });
        }
        if self.rows_per_page == 0 {
            return Err(ConfigError::OutOfRange {
                field: "rows_per_page",
                requirement: "at least 1",
            });
        }
        if self.label_size.0 <= 0 || self.label_size.1 <= 0 {
            return Err(ConfigError::OutOfRange {
                field: "label_size",
                requirement: "positive in both dimensions",
            });
        }
        if self.code_size.0 == 0 || self.code_size.1 == 0 {
            return Err(ConfigError::OutOfRange {
                field: "code_size",
                requirement: "positive in both dimensions",
            });
        }
        Ok(())
    }

    /// Labels that fit on one page of a paginated sink.
    pub fn page_capacity(&self) -> usize {
        self.columns as usize * self.rows_per_page as usize
    }
}
