//! Ratatui-based terminal chart viewer.
//!
//! The viewer renders the finished, filtered dataset: one colored line per
//! instrument, a legend, and a status bar. It never touches the network; all
//! collection happens before the terminal is taken over.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::pipeline::RunOutput;
use crate::error::{AppError, ErrorCode};

mod chart;

use chart::{ChartSeries, CloseChart, series_color};

/// Show the chart until the user quits with `q` or Esc.
pub fn run(run: &RunOutput) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(ErrorCode::Io, format!("Failed to initialize terminal: {e}")))?;

    let view = ChartView::new(run);
    view.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(ErrorCode::Io, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                ErrorCode::Io,
                format!("Failed to enter alternate screen: {e}"),
            ));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Precomputed, render-ready view of one run.
struct ChartView {
    series: Vec<ChartSeries>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    base_date: chrono::NaiveDate,
    status: String,
}

impl ChartView {
    fn new(run: &RunOutput) -> Self {
        let base_date = run.range.start;

        let mut series: Vec<ChartSeries> = run
            .filtered
            .labels()
            .into_iter()
            .map(|label| ChartSeries {
                label: label.to_string(),
                points: Vec::new(),
            })
            .collect();
        for r in &run.filtered.records {
            let x = (r.date - base_date).num_days() as f64;
            if let Some(s) = series.iter_mut().find(|s| s.label == r.instrument) {
                s.points.push((x, r.close));
            }
        }

        let span_days = (run.range.end - run.range.start).num_days().max(1) as f64;

        let closes: Vec<f64> = run.filtered.records.iter().map(|r| r.close).collect();
        let y_min = closes.iter().copied().fold(f64::INFINITY, f64::min);
        let y_max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let y_bounds = pad_y_bounds(y_min, y_max);

        let status = format!(
            "q/Esc: quit | {} ~ {} | {} record(s)",
            run.range.start,
            run.range.end,
            run.filtered.len()
        );

        Self {
            series,
            x_bounds: [0.0, span_days],
            y_bounds,
            base_date,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(ErrorCode::Io, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            let has_event = event::poll(Duration::from_millis(250))
                .map_err(|e| AppError::new(ErrorCode::Io, format!("Event poll error: {e}")))?;
            if !has_event {
                continue;
            }

            match event::read()
                .map_err(|e| AppError::new(ErrorCode::Io, format!("Event read error: {e}")))?
            {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => {}
                },
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
    }

    fn draw(&self, f: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        let block = Block::default().borders(Borders::ALL).title("Daily close comparison");
        let chart_area = block.inner(layout[0]);
        f.render_widget(block, layout[0]);

        if self.series.iter().all(|s| s.points.is_empty()) {
            f.render_widget(
                Paragraph::new("No records in the requested window.")
                    .style(Style::default().fg(Color::Yellow)),
                chart_area,
            );
        } else {
            f.render_widget(
                CloseChart {
                    series: &self.series,
                    x_bounds: self.x_bounds,
                    y_bounds: self.y_bounds,
                    base_date: self.base_date,
                },
                chart_area,
            );
        }

        f.render_widget(Paragraph::new(self.legend_line()), layout[1]);
        f.render_widget(
            Paragraph::new(self.status.as_str()).style(Style::default().fg(Color::DarkGray)),
            layout[2],
        );
    }

    fn legend_line(&self) -> Line<'_> {
        let mut spans: Vec<Span> = Vec::new();
        for (idx, s) in self.series.iter().enumerate() {
            let (r, g, b) = series_color(idx);
            if idx > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))));
            spans.push(Span::raw(s.label.clone()));
        }
        Line::from(spans)
    }
}

/// Pad the observed close range so lines don't hug the frame; degenerate
/// ranges (single price) get a fixed margin instead.
fn pad_y_bounds(y_min: f64, y_max: f64) -> [f64; 2] {
    if !(y_min.is_finite() && y_max.is_finite()) {
        return [0.0, 1.0];
    }
    if (y_max - y_min).abs() < 1e-9 {
        return [y_min - 1.0, y_max + 1.0];
    }
    let pad = (y_max - y_min) * 0.05;
    [(y_min - pad).max(0.0), y_max + pad]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateRange, MergedDataset, PriceRecord};
    use chrono::NaiveDate;

    fn run_output() -> RunOutput {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let records = vec![
            PriceRecord { date: d1, close: 100.0, instrument: "A".to_string() },
            PriceRecord { date: d1, close: 200.0, instrument: "B".to_string() },
            PriceRecord { date: d2, close: 110.0, instrument: "A".to_string() },
        ];
        let dataset = MergedDataset { records };
        RunOutput {
            merged: dataset.clone(),
            filtered: dataset,
            range: DateRange { start: d1, end: d2 },
            stats: Vec::new(),
        }
    }

    #[test]
    fn view_builds_one_series_per_label_with_day_offsets() {
        let view = ChartView::new(&run_output());

        assert_eq!(view.series.len(), 2);
        assert_eq!(view.series[0].label, "A");
        assert_eq!(view.series[0].points, vec![(0.0, 100.0), (2.0, 110.0)]);
        assert_eq!(view.series[1].points, vec![(0.0, 200.0)]);
        assert_eq!(view.x_bounds, [0.0, 2.0]);
    }

    #[test]
    fn y_bounds_are_padded_and_degenerate_ranges_widen() {
        let [lo, hi] = pad_y_bounds(100.0, 200.0);
        assert!(lo < 100.0 && hi > 200.0);

        let [lo, hi] = pad_y_bounds(100.0, 100.0);
        assert_eq!([lo, hi], [99.0, 101.0]);
    }
}
