//! Legend band drawing for the static renderer.
//!
//! The band mirrors the interactive legend: entries come from the rebuilt
//! [`LegendView`], so empty-label series are already filtered out and hidden
//! entries carry their flag. Hidden entries draw with a strikethrough.

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::estimate_text_width_px;
use crate::chart::TEXT_COLOR;
use crate::legend::{LegendEntry, LegendLayout, LegendView};

const FONT_PX: u32 = 14;
const LINE_H: i32 = FONT_PX as i32 + 2;
const ROW_GAP: i32 = 4;
const PAD_BAND: i32 = 8;
const MARKER_W: i32 = 18;
const MARKER_H: i32 = 10;
const MARKER_GAP: i32 = 8;
const TRAILING_GAP: i32 = 16;
/// Column pitch of the narrow two-column grid.
const NARROW_COL_W: i32 = 170;

fn block_width(entry: &LegendEntry) -> i32 {
    MARKER_W + MARKER_GAP + estimate_text_width_px(&entry.text, FONT_PX) as i32 + TRAILING_GAP
}

/// Group entries into drawing rows: fixed pairs for the narrow grid, greedy
/// width packing for the wide row.
fn band_rows<'a>(view: &'a LegendView, band_w: i32, start_x: i32) -> Vec<Vec<&'a LegendEntry>> {
    match view.layout {
        LegendLayout::NarrowGrid => view
            .entries
            .chunks(2)
            .map(|pair| pair.iter().collect())
            .collect(),
        LegendLayout::WideRow => {
            let usable = band_w - PAD_BAND;
            let mut rows: Vec<Vec<&LegendEntry>> = Vec::new();
            let mut cur: Vec<&LegendEntry> = Vec::new();
            let mut x = start_x;
            for entry in &view.entries {
                let w = block_width(entry);
                if x + w > usable && !cur.is_empty() {
                    rows.push(cur);
                    cur = Vec::new();
                    x = start_x;
                }
                x += w;
                cur.push(entry);
            }
            if !cur.is_empty() {
                rows.push(cur);
            }
            rows
        }
    }
}

/// Pixel height the band needs for this view at this width.
pub fn band_height(view: &LegendView, band_w: i32, start_x: i32) -> i32 {
    let rows = band_rows(view, band_w, start_x);
    if rows.is_empty() {
        return 2 * PAD_BAND;
    }
    let rows_h = rows.len() as i32 * LINE_H + (rows.len() as i32 - 1) * ROW_GAP;
    2 * PAD_BAND + rows_h
}

pub fn draw_band<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    view: &LegendView,
    start_x: i32,
) -> Result<()> {
    let (w_u32, _) = area.dim_in_pixel();
    let w = w_u32 as i32;
    let rows = band_rows(view, w, start_x);
    let narrow = matches!(view.layout, LegendLayout::NarrowGrid);

    let label_style = TextStyle::from((FontFamily::SansSerif, FONT_PX))
        .color(&TEXT_COLOR)
        .pos(Pos::new(HPos::Left, VPos::Center));

    let mut y = PAD_BAND;
    for row in rows {
        let y_center = y + LINE_H / 2;
        let mut x = start_x;
        for (ci, entry) in row.iter().enumerate() {
            let x0 = if narrow {
                start_x + ci as i32 * NARROW_COL_W
            } else {
                x
            };
            let marker = [
                (x0, y_center - MARKER_H / 2),
                (x0 + MARKER_W, y_center + MARKER_H / 2),
            ];
            area.draw(&Rectangle::new(marker, entry.fill_color.filled()))
                .map_err(|e| anyhow!("{:?}", e))?;
            area.draw(&Rectangle::new(marker, entry.stroke_color.stroke_width(1)))
                .map_err(|e| anyhow!("{:?}", e))?;

            let text_x = x0 + MARKER_W + MARKER_GAP;
            area.draw(&Text::new(
                entry.text.as_str(),
                (text_x, y_center),
                label_style.clone(),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;

            if entry.hidden {
                let text_w = estimate_text_width_px(&entry.text, FONT_PX) as i32;
                area.draw(&PathElement::new(
                    vec![(text_x - 2, y_center), (text_x + text_w + 2, y_center)],
                    TEXT_COLOR.stroke_width(1),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
            }

            x += block_width(entry);
        }
        y += LINE_H + ROW_GAP;
    }
    Ok(())
}
