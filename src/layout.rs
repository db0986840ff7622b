//! Layout engine - places a sequence of label artifacts on the page grid and
//! drives page-break and alignment-mark emission.
//!
//! Fill order is row-major: left to right within a row, top to bottom across
//! rows, restarting at the top of each new page. There is no packing or
//! reordering; artifact `i` always lands in cell `i` of the grid.

use crate::config::LayoutConfig;
use crate::error::SinkError;
use crate::label::LabelArtifact;
use crate::sink::DrawingSink;

// ---------------------------------------------------------------------------
// Grid arithmetic
// ---------------------------------------------------------------------------

/// Logical grid cell of an artifact, derived from its sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub page: usize,
    pub row: u32,
    pub column: u32,
}

impl GridPosition {
    /// Cell for sequence index `i` on a paginated surface.
    pub fn from_index(index: usize, columns: u32, rows_per_page: u32) -> Self {
        let columns = columns as usize;
        let rows_per_page = rows_per_page as usize;
        Self {
            page: index / (columns * rows_per_page),
            row: ((index / columns) % rows_per_page) as u32,
            column: (index % columns) as u32,
        }
    }
}

/// Absolute page position of a grid cell's top-left corner. Identical on
/// every page: rows and columns restart at zero after each page break.
pub fn pixel_position(row: u32, column: u32, config: &LayoutConfig) -> (i32, i32) {
    let (width, height) = config.label_size;
    let (dx, dy) = config.spacing;
    let (ox, oy) = config.first_label_offset;
    (
        ox + column as i32 * (width + dx),
        oy + row as i32 * (height + dy),
    )
}

// ---------------------------------------------------------------------------
// Sheet layout
// ---------------------------------------------------------------------------

/// Emit the L-shaped registration pattern: one mark at the configured
/// position, one displaced horizontally by the pitch, one vertically.
fn emit_alignment_marks(
    config: &LayoutConfig,
    sink: &mut dyn DrawingSink,
) -> Result<(), SinkError> {
    if !config.alignment_marks {
        return Ok(());
    }
    let (x, y) = config.first_mark_position;
    let (width, height) = config.mark_size;
    let (pitch_x, pitch_y) = config.mark_pitch;

    sink.draw_ellipse(x, y, width, height)?;
    sink.draw_ellipse(x + pitch_x, y, width, height)?;
    sink.draw_ellipse(x, y + pitch_y, width, height)
}

/// Lay the artifact sequence out on the sink.
///
/// On a paginated sink, a filled page triggers `begin_page` and the marks
/// are re-emitted for the fresh page. On a continuous surface the row
/// counter never resets and labels keep stacking downward past the
/// configured rows per page.
///
/// The first sink failure aborts the run; commands already emitted stand.
pub fn layout_labels(
    labels: &[LabelArtifact],
    config: &LayoutConfig,
    sink: &mut dyn DrawingSink,
) -> Result<(), SinkError> {
    let paginated = sink.is_paginated();
    emit_alignment_marks(config, sink)?;

    let mut row: u32 = 0;
    let mut column: u32 = 0;

    for label in labels {
        label.replay(sink, pixel_position(row, column, config))?;

        column += 1;
        if column == config.columns {
            column = 0;
            row += 1;
            if paginated && row == config.rows_per_page {
                row = 0;
                log::debug!("page full, starting a new one");
                sink.begin_page()?;
                emit_alignment_marks(config, sink)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::build_label;
    use crate::sink::{CaptureSink, DrawCall};
    use crate::symbol::QrEncoder;

    fn test_config() -> LayoutConfig {
        let mut config = LayoutConfig::default();
        // Bare labels keep the capture trace small: one image call each.
        config.frame.visible = false;
        config
    }

    fn test_labels(n: usize, config: &LayoutConfig) -> Vec<LabelArtifact> {
        (0..n)
            .map(|i| {
                build_label(&format!("X000-{i}"), "40/20", "X000", config, &QrEncoder).unwrap()
            })
            .collect()
    }

    fn image_positions(sink: &CaptureSink) -> Vec<(i32, i32)> {
        sink.calls()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Image { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn from_index_walks_the_grid_row_major() {
        for i in 0..200 {
            let pos = GridPosition::from_index(i, 5, 17);
            assert_eq!(pos.page, i / 85);
            assert_eq!(pos.row as usize, (i / 5) % 17);
            assert_eq!(pos.column as usize, i % 5);
        }
    }

    #[test]
    fn single_column_and_row_degrade_cleanly() {
        let pos = GridPosition::from_index(3, 1, 1);
        assert_eq!(
            pos,
            GridPosition {
                page: 3,
                row: 0,
                column: 0
            }
        );
    }

    #[test]
    fn pixel_position_spaces_by_label_plus_gap() {
        let config = test_config();
        assert_eq!(pixel_position(0, 0, &config), (30, 35));
        assert_eq!(pixel_position(0, 1, &config), (30 + 134, 35));
        assert_eq!(pixel_position(2, 0, &config), (30, 35 + 2 * 60));
    }

    #[test]
    fn every_label_is_drawn_once() {
        let config = test_config();
        let labels = test_labels(12, &config);
        let mut sink = CaptureSink::new(true);
        layout_labels(&labels, &config, &mut sink).unwrap();

        assert_eq!(sink.count(|c| matches!(c, DrawCall::Image { .. })), 12);
    }

    #[test]
    fn twelve_labels_fill_rows_zero_to_two() {
        // 5 columns, 17 rows: all 12 labels stay on page 0, row 2 holds
        // only columns 0 and 1.
        let config = test_config();
        let labels = test_labels(12, &config);
        let mut sink = CaptureSink::new(true);
        layout_labels(&labels, &config, &mut sink).unwrap();

        assert_eq!(sink.count(|c| matches!(c, DrawCall::PageBreak)), 0);

        let code_offset = config.item_positions.code;
        let expected: Vec<(i32, i32)> = (0..12)
            .map(|i| {
                let pos = GridPosition::from_index(i, 5, 17);
                assert_eq!(pos.page, 0);
                assert_eq!(pos.row, (i / 5) as u32);
                let (x, y) = pixel_position(pos.row, pos.column, &config);
                (x + code_offset.0, y + code_offset.1)
            })
            .collect();
        assert_eq!(image_positions(&sink), expected);
    }

    #[test]
    fn third_label_breaks_onto_second_page() {
        let mut config = test_config();
        config.columns = 2;
        config.rows_per_page = 1;
        let labels = test_labels(3, &config);
        let mut sink = CaptureSink::new(true);
        layout_labels(&labels, &config, &mut sink).unwrap();

        assert_eq!(sink.count(|c| matches!(c, DrawCall::PageBreak)), 1);
        // Marks for page 0 and once more for page 1.
        assert_eq!(sink.count(|c| matches!(c, DrawCall::Ellipse { .. })), 6);

        // The page-relative position of label 2 equals label 0's.
        let positions = image_positions(&sink);
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[2], positions[0]);
        assert_eq!(
            GridPosition::from_index(2, 2, 1),
            GridPosition {
                page: 1,
                row: 0,
                column: 0
            }
        );
    }

    #[test]
    fn empty_sequence_emits_only_marks() {
        let config = test_config();
        let mut sink = CaptureSink::new(true);
        layout_labels(&[], &config, &mut sink).unwrap();

        assert_eq!(sink.calls().len(), 3);
        assert_eq!(sink.count(|c| matches!(c, DrawCall::Ellipse { .. })), 3);
    }

    #[test]
    fn marks_can_be_disabled() {
        let mut config = test_config();
        config.alignment_marks = false;
        let mut sink = CaptureSink::new(true);
        layout_labels(&[], &config, &mut sink).unwrap();
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn mark_pattern_is_l_shaped() {
        let config = test_config();
        let mut sink = CaptureSink::new(true);
        layout_labels(&[], &config, &mut sink).unwrap();

        let (x, y) = config.first_mark_position;
        let (px, py) = config.mark_pitch;
        let marks: Vec<(i32, i32)> = sink
            .calls()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Ellipse { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(marks, [(x, y), (x + px, y), (x, y + py)]);
    }

    #[test]
    fn generous_rows_per_page_never_break() {
        let mut config = test_config();
        config.columns = 3;
        config.rows_per_page = 50;
        let labels = test_labels(30, &config);
        let mut sink = CaptureSink::new(true);
        layout_labels(&labels, &config, &mut sink).unwrap();
        assert_eq!(sink.count(|c| matches!(c, DrawCall::PageBreak)), 0);
    }

    #[test]
    fn continuous_surface_stacks_past_page_height() {
        let mut config = test_config();
        config.columns = 2;
        config.rows_per_page = 1;
        let labels = test_labels(5, &config);
        let mut sink = CaptureSink::new(false);
        layout_labels(&labels, &config, &mut sink).unwrap();

        assert_eq!(sink.count(|c| matches!(c, DrawCall::PageBreak)), 0);
        // Rows keep incrementing: label 4 sits in row 2 of the same surface.
        let positions = image_positions(&sink);
        let row_height = config.label_size.1 + config.spacing.1;
        assert_eq!(positions[4].1, positions[0].1 + 2 * row_height);
    }

    #[test]
    fn layout_is_deterministic() {
        let config = test_config();
        let labels = test_labels(7, &config);

        let mut first = CaptureSink::new(true);
        layout_labels(&labels, &config, &mut first).unwrap();
        let mut second = CaptureSink::new(true);
        layout_labels(&labels, &config, &mut second).unwrap();

        assert_eq!(first.calls(), second.calls());
    }

    #[test]
    fn sink_failure_aborts_mid_sequence() {
        let config = test_config();
        let labels = test_labels(6, &config);

        // 3 marks + 4 ops per bare label; fail partway through the second.
        let mut sink = CaptureSink::failing_after(true, 3 + 4 + 2);
        let result = layout_labels(&labels, &config, &mut sink);
        assert!(result.is_err());
        assert_eq!(sink.calls().len(), 9);
    }
}
