//! Plotters-powered close-price chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + tick-label rendering
//! - easy multi-series drawing with per-instrument colors
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use chrono::NaiveDate;
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::report::fmt_price;

/// Per-instrument line colors, shared with the legend so the two stay in sync.
pub const SERIES_PALETTE: [(u8, u8, u8); 6] = [
    (0, 255, 255),   // cyan
    (255, 215, 0),   // gold
    (0, 255, 0),     // green
    (255, 0, 255),   // magenta
    (255, 165, 0),   // orange
    (135, 206, 250), // sky blue
];

/// Color assigned to the series at `index`.
pub fn series_color(index: usize) -> (u8, u8, u8) {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// One drawable line: an instrument label plus (day-offset, close) points.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call. This keeps `render()` focused on drawing and makes
/// the data prep testable without a terminal.
pub struct CloseChart<'a> {
    pub series: &'a [ChartSeries],
    /// X bounds as day offsets from `base_date`.
    pub x_bounds: [f64; 2],
    /// Y bounds (close price).
    pub y_bounds: [f64; 2],
    /// Date corresponding to x = 0; x tick labels are rendered from it.
    pub base_date: NaiveDate,
}

impl<'a> Widget for CloseChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let base_date = self.base_date;

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 9)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels.
            //
            // Mesh lines are disabled to reduce visual clutter in
            // low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("date")
                .y_desc("close")
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| format_tick_date(base_date, *v))
                .y_label_formatter(&|v| fmt_price(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for (idx, series) in self.series.iter().enumerate() {
                let (r, g, b) = series_color(idx);
                chart.draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    &RGBColor(r, g, b),
                ))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn format_tick_date(base: NaiveDate, offset_days: f64) -> String {
    (base + chrono::Duration::days(offset_days.round() as i64))
        .format("%m-%d")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_dates_offset_from_the_base() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(format_tick_date(base, 0.0), "01-02");
        assert_eq!(format_tick_date(base, 30.0), "02-01");
        assert_eq!(format_tick_date(base, 29.6), "02-01");
    }

    #[test]
    fn palette_wraps_for_many_series() {
        assert_eq!(series_color(0), SERIES_PALETTE[0]);
        assert_eq!(series_color(SERIES_PALETTE.len()), SERIES_PALETTE[0]);
        assert_eq!(series_color(SERIES_PALETTE.len() + 2), SERIES_PALETTE[2]);
    }
}
