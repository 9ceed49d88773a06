//! Statistic tables rendered as bordered grids

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};

use super::{anchored_text, render_bitmap, Artifact, Canvas, Figure, RenderError};
use crate::report::StatTable;

/// Figure geometry and typography of a rendered table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub width_in: f64,
    pub height_in: f64,
    pub font_pt: f64,
    pub title_pt: f64,
    /// Gap between title and grid
    pub title_pad_pt: f64,
    /// Horizontal and vertical stretch applied to every cell
    pub scale: (f64, f64),
}

impl TableStyle {
    /// Wide layout for the sixteen-row summary table
    pub const SUMMARY: TableStyle = TableStyle {
        width_in: 16.0,
        height_in: 7.0,
        font_pt: 12.0,
        title_pt: 14.0,
        title_pad_pt: 20.0,
        scale: (1.2, 1.6),
    };

    /// Compact layout for the grouped tables
    pub const GROUPED: TableStyle = TableStyle {
        width_in: 8.0,
        height_in: 3.5,
        font_pt: 10.0,
        title_pt: 13.0,
        title_pad_pt: 15.0,
        scale: (1.2, 1.6),
    };
}

/// Render `table` as a titled grid with column headers and row labels
pub fn render_table(
    file_name: &str,
    table: &StatTable,
    style: &TableStyle,
    dpi: u32,
) -> Result<Artifact, RenderError> {
    let figure = Figure::new(style.width_in, style.height_in, dpi);
    render_bitmap(file_name, figure, |root| draw_table(root, table, style, &figure))
}

fn draw_table(
    root: &Canvas<'_>,
    table: &StatTable,
    style: &TableStyle,
    figure: &Figure,
) -> Result<(), RenderError> {
    let (canvas_w, canvas_h) = root.dim_in_pixel();
    let font_px = figure.pt(style.font_pt);
    let title_px = figure.pt(style.title_pt);
    let pad = font_px * 0.5;
    let border = BLACK.stroke_width((figure.dpi / 150).max(1));

    let centered = anchored_text(font_px, HPos::Center, VPos::Center);
    let left = anchored_text(font_px, HPos::Left, VPos::Center);

    let text_width = |s: &str| -> Result<f64, RenderError> {
        Ok(root.estimate_text_size(s, &centered)?.0 as f64)
    };

    let cells = table.cell_texts();

    let mut label_w: f64 = 0.0;
    for row in &table.rows {
        label_w = label_w.max(text_width(&row.label)?);
    }
    let mut col_w = Vec::with_capacity(table.columns.len());
    for (j, header) in table.columns.iter().enumerate() {
        let mut w = text_width(header)?;
        for row in &cells {
            w = w.max(text_width(&row[j])?);
        }
        col_w.push(w);
    }

    let stretch = |w: f64| (w + 2.0 * pad) * style.scale.0;
    let mut label_w = stretch(label_w);
    let mut col_w: Vec<f64> = col_w.into_iter().map(stretch).collect();

    // Shrink uniformly when the grid would overflow the canvas
    let available = canvas_w as f64 * 0.98;
    let total_w = label_w + col_w.iter().sum::<f64>();
    if total_w > available {
        let factor = available / total_w;
        label_w *= factor;
        col_w.iter_mut().for_each(|w| *w *= factor);
    }
    let total_w = label_w + col_w.iter().sum::<f64>();

    let row_h = font_px * 1.3 * style.scale.1;
    let grid_h = row_h * (table.rows.len() + 1) as f64;
    let title_pad = figure.pt(style.title_pad_pt);
    let block_h = title_px + title_pad + grid_h;

    let x0 = (canvas_w as f64 - total_w) / 2.0;
    let title_y = ((canvas_h as f64 - block_h) / 2.0).max(0.0);
    let y0 = title_y + title_px + title_pad;

    root.draw(&Text::new(
        table.title.clone(),
        ((canvas_w / 2) as i32, title_y as i32),
        anchored_text(title_px, HPos::Center, VPos::Top),
    ))?;

    let cell = |x: f64, y: f64, w: f64, label: &str, text: &TextStyle| -> Result<(), RenderError> {
        let (x1, y1) = (x as i32, y as i32);
        let (x2, y2) = ((x + w) as i32, (y + row_h) as i32);
        root.draw(&Rectangle::new([(x1, y1), (x2, y2)], WHITE.filled()))?;
        root.draw(&Rectangle::new([(x1, y1), (x2, y2)], border))?;
        let anchor_x = if matches!(text.pos.h_pos, HPos::Left) {
            x + pad
        } else {
            x + w / 2.0
        };
        root.draw(&Text::new(
            label.to_string(),
            (anchor_x as i32, (y + row_h / 2.0) as i32),
            text.clone(),
        ))?;
        Ok(())
    };

    // Header row, no corner cell above the row labels
    let mut x = x0 + label_w;
    for (header, w) in table.columns.iter().zip(&col_w) {
        cell(x, y0, *w, header, &centered)?;
        x += w;
    }

    for (i, (row, texts)) in table.rows.iter().zip(&cells).enumerate() {
        let y = y0 + row_h * (i + 1) as f64;
        cell(x0, y, label_w, &row.label, &left)?;
        let mut x = x0 + label_w;
        for (text, w) in texts.iter().zip(&col_w) {
            cell(x, y, *w, text, &centered)?;
            x += w;
        }
    }

    Ok(())
}
