//! Statistical charts: histogram, regression scatter, box plot and scatter plot

use std::ops::Range;

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};

use super::{anchored_text, render_bitmap, text_style, Artifact, Canvas, Figure, RenderError};
use crate::pipeline::stats::{BoxStats, HistogramBins, LinearFit};

/// Figure size of the single-panel charts, in inches
pub const CHART_SIZE_IN: (f64, f64) = (6.4, 4.8);
/// Figure size of the cost histograms, in inches
pub const HISTOGRAM_SIZE_IN: (f64, f64) = (8.0, 5.0);
pub const HISTOGRAM_BINS: usize = 50;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const SERIES_BLUE: RGBColor = RGBColor(31, 119, 180);
const BOX_EDGE: RGBColor = RGBColor(63, 63, 63);

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Title and axis descriptions of a chart
#[derive(Debug, Clone, Copy)]
pub struct ChartLabels<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// A text callout with an arrow pointing at a data coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Callout text, one entry per line
    pub lines: Vec<String>,
    /// Point the arrow tip touches
    pub target: (f64, f64),
    /// Lower-left corner of the text block
    pub text_at: (f64, f64),
}

impl Annotation {
    pub fn new(lines: &[&str], target: (f64, f64), text_at: (f64, f64)) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            target,
            text_at,
        }
    }

    fn is_drawable(&self) -> bool {
        [self.target.0, self.target.1, self.text_at.0, self.text_at.1]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Histogram with equal-width bins over the finite values
pub fn render_histogram(
    file_name: &str,
    labels: ChartLabels<'_>,
    values: &[f64],
    bins: usize,
    dpi: u32,
) -> Result<Artifact, RenderError> {
    let figure = Figure::new(HISTOGRAM_SIZE_IN.0, HISTOGRAM_SIZE_IN.1, dpi);
    let histogram = HistogramBins::compute(values, bins);

    render_bitmap(file_name, figure, |root| {
        let (x_range, y_top) = match &histogram {
            Some(h) => (
                pad_range(h.edges[0], h.edges[h.edges.len() - 1]),
                (h.max_count() as f64 * 1.05).max(1.0),
            ),
            None => (0.0..1.0, 1.0),
        };

        let mut chart = build_chart(root, &figure, &labels, x_range, 0.0..y_top)?;
        draw_mesh(&mut chart, &figure, &labels, true)?;

        if let Some(h) = &histogram {
            let bars = || {
                h.edges
                    .windows(2)
                    .zip(&h.counts)
                    .map(|(e, &count)| [(e[0], 0.0), (e[1], count as f64)])
            };
            chart.draw_series(bars().map(|corners| Rectangle::new(corners, SKY_BLUE.filled())))?;
            chart.draw_series(
                bars().map(|corners| Rectangle::new(corners, BLACK.stroke_width(line_width(&figure)))),
            )?;
        }
        Ok(())
    })
}

/// Scatter of `points` with a least-squares trend line and its 95% band
pub fn render_regression(
    file_name: &str,
    labels: ChartLabels<'_>,
    points: &[(f64, f64)],
    annotation: &Annotation,
    dpi: u32,
) -> Result<Artifact, RenderError> {
    let figure = Figure::new(CHART_SIZE_IN.0, CHART_SIZE_IN.1, dpi);
    let fit = LinearFit::fit(points);

    render_bitmap(file_name, figure, |root| {
        let (x_lo, x_hi) = extent(points.iter().map(|p| p.0));
        let (y_lo, y_hi) = extent(points.iter().map(|p| p.1));
        let mut chart = build_chart(root, &figure, &labels, pad_range(x_lo, x_hi), pad_range(y_lo, y_hi))?;
        draw_mesh(&mut chart, &figure, &labels, true)?;

        let radius = figure.pt(3.0).round() as u32;
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, radius, SERIES_BLUE.mix(0.3).filled())),
        )?;

        if let Some(fit) = fit {
            const STEPS: usize = 100;
            let xs: Vec<f64> = (0..=STEPS)
                .map(|i| x_lo + (x_hi - x_lo) * i as f64 / STEPS as f64)
                .collect();

            let mut band: Vec<(f64, f64)> = xs
                .iter()
                .map(|&x| (x, fit.predict(x) + fit.confidence_half_width(x)))
                .collect();
            band.extend(
                xs.iter()
                    .rev()
                    .map(|&x| (x, fit.predict(x) - fit.confidence_half_width(x))),
            );
            chart.draw_series(std::iter::once(Polygon::new(
                band,
                SERIES_BLUE.mix(0.15).filled(),
            )))?;

            chart.draw_series(LineSeries::new(
                [(x_lo, fit.predict(x_lo)), (x_hi, fit.predict(x_hi))],
                SERIES_BLUE.stroke_width(line_width(&figure) * 2),
            ))?;
        }

        draw_annotation(root, &chart, &figure, annotation)
    })
}

/// Box-and-whisker plot, one box per named group in the given order
pub fn render_boxplot(
    file_name: &str,
    labels: ChartLabels<'_>,
    groups: &[(String, Vec<f64>)],
    annotation: &Annotation,
    dpi: u32,
) -> Result<Artifact, RenderError> {
    let figure = Figure::new(CHART_SIZE_IN.0, CHART_SIZE_IN.1, dpi);
    let boxes: Vec<(&str, Option<BoxStats>)> = groups
        .iter()
        .map(|(name, values)| (name.as_str(), BoxStats::compute(values)))
        .collect();

    render_bitmap(file_name, figure, |root| {
        let n = boxes.len().max(1) as f64;
        let (y_lo, y_hi) = extent(groups.iter().flat_map(|(_, v)| v.iter().copied()));
        let y_range = pad_range(y_lo, y_hi);
        let y_bottom = y_range.start;

        let mut chart = build_chart(root, &figure, &labels, -0.5..n - 0.5, y_range)?;
        draw_mesh(&mut chart, &figure, &labels, false)?;

        let edge = BOX_EDGE.stroke_width(line_width(&figure));
        let radius = figure.pt(2.5).round() as u32;
        let half = 0.4;

        for (i, (name, stats)) in boxes.iter().enumerate() {
            let x = i as f64;

            let (px, py) = chart.backend_coord(&(x, y_bottom));
            root.draw(&Text::new(
                name.to_string(),
                (px, py + figure.pt(4.0) as i32),
                anchored_text(figure.pt(9.0), HPos::Center, VPos::Top),
            ))?;

            let Some(b) = stats else { continue };
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - half, b.q1), (x + half, b.q3)],
                SERIES_BLUE.filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - half, b.q1), (x + half, b.q3)],
                edge,
            )))?;

            let segments = [
                [(x - half, b.median), (x + half, b.median)],
                [(x, b.q3), (x, b.whisker_high)],
                [(x, b.q1), (x, b.whisker_low)],
                [(x - half / 2.0, b.whisker_high), (x + half / 2.0, b.whisker_high)],
                [(x - half / 2.0, b.whisker_low), (x + half / 2.0, b.whisker_low)],
            ];
            chart.draw_series(segments.iter().map(|s| PathElement::new(s.to_vec(), edge)))?;

            chart.draw_series(
                b.outliers
                    .iter()
                    .map(|&y| Circle::new((x, y), radius, BOX_EDGE.stroke_width(1))),
            )?;
        }

        draw_annotation(root, &chart, &figure, annotation)
    })
}

/// Plain scatter of `points` at the given opacity
pub fn render_scatter(
    file_name: &str,
    labels: ChartLabels<'_>,
    points: &[(f64, f64)],
    opacity: f64,
    annotation: &Annotation,
    dpi: u32,
) -> Result<Artifact, RenderError> {
    let figure = Figure::new(CHART_SIZE_IN.0, CHART_SIZE_IN.1, dpi);

    render_bitmap(file_name, figure, |root| {
        let (x_lo, x_hi) = extent(points.iter().map(|p| p.0));
        let (y_lo, y_hi) = extent(points.iter().map(|p| p.1));
        let mut chart = build_chart(root, &figure, &labels, pad_range(x_lo, x_hi), pad_range(y_lo, y_hi))?;
        draw_mesh(&mut chart, &figure, &labels, true)?;

        let radius = figure.pt(3.0).round() as u32;
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, radius, SERIES_BLUE.mix(opacity).filled())),
        )?;

        draw_annotation(root, &chart, &figure, annotation)
    })
}

fn build_chart<'a, 'b>(
    root: &'a Canvas<'b>,
    figure: &Figure,
    labels: &ChartLabels<'_>,
    x_range: Range<f64>,
    y_range: Range<f64>,
) -> Result<Chart<'a, 'b>, RenderError> {
    let chart = ChartBuilder::on(root)
        .caption(labels.title, text_style(figure.pt(12.0)))
        .margin(figure.pt(10.0))
        .x_label_area_size(figure.pt(36.0))
        .y_label_area_size(figure.pt(48.0))
        .build_cartesian_2d(x_range, y_range)?;
    Ok(chart)
}

fn draw_mesh(
    chart: &mut Chart<'_, '_>,
    figure: &Figure,
    labels: &ChartLabels<'_>,
    x_tick_labels: bool,
) -> Result<(), RenderError> {
    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .x_desc(labels.x_label)
        .y_desc(labels.y_label)
        .label_style(text_style(figure.pt(9.0)))
        .axis_desc_style(text_style(figure.pt(10.0)))
        .axis_style(BLACK.stroke_width(line_width(figure)));
    if !x_tick_labels {
        mesh.x_labels(0);
    }
    mesh.draw()?;
    Ok(())
}

/// Draw a multi-line callout and an open arrow from the text to its target.
/// Callouts with non-finite coordinates (empty data) are skipped.
fn draw_annotation(
    root: &Canvas<'_>,
    chart: &Chart<'_, '_>,
    figure: &Figure,
    annotation: &Annotation,
) -> Result<(), RenderError> {
    if !annotation.is_drawable() || annotation.lines.is_empty() {
        return Ok(());
    }

    let font_px = figure.pt(10.0);
    let style = anchored_text(font_px, HPos::Left, VPos::Top);
    let line_h = font_px * 1.2;

    let mut block_w: f64 = 0.0;
    for line in &annotation.lines {
        block_w = block_w.max(root.estimate_text_size(line, &style)?.0 as f64);
    }
    let block_h = line_h * annotation.lines.len() as f64;

    let (tx, ty) = chart.backend_coord(&annotation.text_at);
    let top = ty as f64 - block_h;
    for (i, line) in annotation.lines.iter().enumerate() {
        root.draw(&Text::new(
            line.clone(),
            (tx, (top + line_h * i as f64) as i32),
            style.clone(),
        ))?;
    }

    let gap = figure.pt(3.0);
    let center = (tx as f64 + block_w / 2.0, top + block_h / 2.0);
    let (px, py) = chart.backend_coord(&annotation.target);
    let tip = (px as f64, py as f64);
    let tail = box_exit(center, (block_w / 2.0 + gap, block_h / 2.0 + gap), tip);
    if tail == tip {
        return Ok(());
    }

    let stroke = BLACK.stroke_width(line_width(figure));
    let to_i = |p: (f64, f64)| (p.0.round() as i32, p.1.round() as i32);
    root.draw(&PathElement::new(vec![to_i(tail), to_i(tip)], stroke))?;
    let (a, b) = arrow_head(tail, tip, figure.pt(6.0));
    root.draw(&PathElement::new(vec![to_i(a), to_i(tip), to_i(b)], stroke))?;

    Ok(())
}

/// Point where the ray from `center` toward `toward` leaves the box of the
/// given half extents. Returns `toward` when it lies inside the box.
pub fn box_exit(center: (f64, f64), half: (f64, f64), toward: (f64, f64)) -> (f64, f64) {
    let (dx, dy) = (toward.0 - center.0, toward.1 - center.1);
    let sx = if dx != 0.0 { half.0 / dx.abs() } else { f64::INFINITY };
    let sy = if dy != 0.0 { half.1 / dy.abs() } else { f64::INFINITY };
    let s = sx.min(sy);
    if s >= 1.0 {
        return toward;
    }
    (center.0 + dx * s, center.1 + dy * s)
}

/// The two barb ends of an open arrowhead at `tip`, `len` pixels long
pub fn arrow_head(tail: (f64, f64), tip: (f64, f64), len: f64) -> ((f64, f64), (f64, f64)) {
    const SPREAD: f64 = 0.45;
    let angle = (tail.1 - tip.1).atan2(tail.0 - tip.0);
    let barb = |a: f64| (tip.0 + len * a.cos(), tip.1 + len * a.sin());
    (barb(angle + SPREAD), barb(angle - SPREAD))
}

/// Minimum and maximum of the finite values, NaN when there are none
fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::NAN, f64::NAN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Axis range with a 5% margin on both sides
fn pad_range(lo: f64, hi: f64) -> Range<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    if lo == hi {
        return lo - 0.5..hi + 0.5;
    }
    let margin = (hi - lo) * 0.05;
    lo - margin..hi + margin
}

fn line_width(figure: &Figure) -> u32 {
    (figure.dpi / 150).max(1)
}
