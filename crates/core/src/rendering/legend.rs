use imageproc::drawing::draw_filled_circle_mut;

use crate::shared::color::{Color, FEATURE_COLORS};
use crate::shared::frame::{Frame, PixelOrder};

use super::text::draw_text;

pub const LEGEND_WIDTH: u32 = 200;
pub const LEGEND_BACKGROUND: Color = Color::new(30, 30, 30);

const FIRST_ROW_Y: i32 = 30;
const ROW_HEIGHT: i32 = 30;
const SWATCH_X: i32 = 20;
const SWATCH_RADIUS: i32 = 6;
/// Swatch centers sit this far above the label baseline.
const SWATCH_RISE: i32 = 5;
const LABEL_X: i32 = 40;

/// Geometry of one legend entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegendRow {
    pub label: &'static str,
    pub color: Color,
    pub swatch_center: (i32, i32),
    pub baseline: (i32, i32),
}

/// One row per feature color, in table order.
pub fn legend_rows() -> Vec<LegendRow> {
    FEATURE_COLORS
        .iter()
        .enumerate()
        .map(|(i, (label, color))| {
            let y = FIRST_ROW_Y + ROW_HEIGHT * i as i32;
            LegendRow {
                label,
                color: *color,
                swatch_center: (SWATCH_X, y - SWATCH_RISE),
                baseline: (LABEL_X, y),
            }
        })
        .collect()
}

/// Renders the legend panel for a frame of the given height and channel order.
///
/// Rows below the panel's bottom edge are clipped.
pub fn build_legend(frame_height: u32, order: PixelOrder) -> Frame {
    let mut panel = Frame::filled(LEGEND_WIDTH, frame_height, order, LEGEND_BACKGROUND);
    for row in legend_rows() {
        draw_filled_circle_mut(&mut panel, row.swatch_center, SWATCH_RADIUS, row.color.into());
        draw_text(&mut panel, row.label, row.baseline, row.color);
    }
    panel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_row_per_feature() {
        let rows = legend_rows();
        assert_eq!(rows.len(), FEATURE_COLORS.len());
        for (row, (name, color)) in rows.iter().zip(FEATURE_COLORS) {
            assert_eq!(row.label, name);
            assert_eq!(row.color, color);
        }
    }

    #[test]
    fn test_rows_are_thirty_pixels_apart() {
        let rows = legend_rows();
        assert_eq!(rows[0].baseline, (40, 30));
        assert_eq!(rows[0].swatch_center, (20, 25));
        for pair in rows.windows(2) {
            assert_eq!(pair[1].baseline.1 - pair[0].baseline.1, 30);
            assert_eq!(pair[1].swatch_center.1 - pair[0].swatch_center.1, 30);
        }
    }

    #[test]
    fn test_panel_size_and_background() {
        let panel = build_legend(480, PixelOrder::Bgr);
        assert_eq!(panel.width(), LEGEND_WIDTH);
        assert_eq!(panel.height(), 480);
        assert_eq!(panel.order(), PixelOrder::Bgr);
        assert_eq!(panel.pixel(199, 479), LEGEND_BACKGROUND);
        assert_eq!(panel.pixel(5, 5), LEGEND_BACKGROUND);
    }

    #[test]
    fn test_swatches_drawn_in_feature_colors() {
        for order in [PixelOrder::Bgr, PixelOrder::Rgb] {
            let panel = build_legend(480, order);
            for row in legend_rows() {
                let (x, y) = row.swatch_center;
                assert_eq!(panel.pixel(x as u32, y as u32), row.color, "{}", row.label);
            }
        }
    }

    #[test]
    fn test_labels_drawn_right_of_swatch() {
        let panel = build_legend(480, PixelOrder::Bgr);
        for row in legend_rows() {
            let (bx, by) = row.baseline;
            let mut found = false;
            for y in (by - 8)..by {
                for x in bx..(bx + 8 * row.label.len() as i32) {
                    if panel.pixel(x as u32, y as u32) == row.color {
                        found = true;
                    }
                }
            }
            assert!(found, "label {} not drawn", row.label);
        }
    }

    #[test]
    fn test_short_panel_clips_rows() {
        let panel = build_legend(40, PixelOrder::Rgb);
        assert_eq!(panel.height(), 40);
        assert_eq!(panel.pixel(20, 25), FEATURE_COLORS[0].1);
    }
}
