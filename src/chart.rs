/*!
 * Bar chart of MSMEs digitalized per internship.
 *
 * The chart is drawn straight into an RGB buffer and encoded as PNG so the
 * dashboard can inline it as a data URI. One bar per internship, in the
 * order given, coloured by company.
 */

use base64::{engine::general_purpose, Engine as _};
use image::{ImageFormat, Rgb, RgbImage};
use serde::Serialize;
use std::io::Cursor;

use crate::database::InternshipRecord;
use crate::errors::ChartError;

pub const CHART_TITLE: &str = "MSMEs Digitalized per Internship";
pub const X_LABEL: &str = "Internship";
pub const Y_LABEL: &str = "MSMEs Digitalized";

pub const CHART_WIDTH: u32 = 600;
pub const CHART_HEIGHT: u32 = 400;

const MARGIN_LEFT: u32 = 50;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 40;

/// Height drawn for a zero-valued bar so it stays visible
const STUB_HEIGHT: u32 = 2;
const GRID_LINES: u32 = 5;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);

/// Seaborn "deep" palette
const PALETTE: [[u8; 3]; 10] = [
    [76, 114, 176],
    [221, 132, 82],
    [85, 168, 104],
    [196, 78, 82],
    [129, 114, 179],
    [147, 120, 96],
    [218, 139, 195],
    [140, 140, 140],
    [204, 185, 116],
    [100, 181, 205],
];

/// Company to colour mapping shown next to the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub company: String,
    pub color: [u8; 3],
}

impl LegendEntry {
    /// CSS hex form of the colour
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.color[0], self.color[1], self.color[2])
    }
}

/// Encoded chart plus what is needed to caption it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub png: Vec<u8>,
    pub title: String,
    pub legend: Vec<LegendEntry>,
}

impl ChartImage {
    /// `data:image/png;base64,...` for inline embedding
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Pixel rectangle of one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Render the progress chart, or `None` when there is nothing to plot
pub fn render_progress_chart(
    internships: &[InternshipRecord],
) -> Result<Option<ChartImage>, ChartError> {
    if internships.is_empty() {
        return Ok(None);
    }

    let legend = build_legend(internships);
    let values: Vec<u32> = internships.iter().map(|i| i.msme_digitalized).collect();
    let bars = bar_rects(&values);

    let mut img = RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);
    draw_grid(&mut img);

    for (internship, bar) in internships.iter().zip(&bars) {
        let color = legend
            .iter()
            .find(|entry| entry.company == internship.company_name)
            .map(|entry| Rgb(entry.color))
            .unwrap_or(Rgb(PALETTE[0]));
        fill_rect(&mut img, bar.x, bar.y, bar.width, bar.height, color);
    }

    draw_axes(&mut img);

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(Some(ChartImage {
        png,
        title: CHART_TITLE.to_string(),
        legend,
    }))
}

/// One legend entry per distinct company, in order of first appearance
fn build_legend(internships: &[InternshipRecord]) -> Vec<LegendEntry> {
    let mut legend: Vec<LegendEntry> = Vec::new();
    for internship in internships {
        if legend.iter().any(|e| e.company == internship.company_name) {
            continue;
        }
        let color = PALETTE[legend.len() % PALETTE.len()];
        legend.push(LegendEntry {
            company: internship.company_name.clone(),
            color,
        });
    }
    legend
}

/// Bar geometry for the given values, scaled to the tallest one
pub fn bar_rects(values: &[u32]) -> Vec<BarRect> {
    if values.is_empty() {
        return Vec::new();
    }

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = CHART_HEIGHT - MARGIN_BOTTOM;
    let count = values.len() as u64;
    let max = values.iter().copied().max().unwrap_or(0);

    // Slots split the plot width proportionally; with more bars than pixels
    // a slot may be empty and bars overlap at one pixel wide.
    let slot_edge = |i: u64| MARGIN_LEFT + (u64::from(plot_width) * i / count) as u32;

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let height = if max == 0 {
                STUB_HEIGHT
            } else {
                let scaled = u64::from(value) * u64::from(plot_height) / u64::from(max);
                (scaled as u32).max(STUB_HEIGHT)
            };
            let slot_start = slot_edge(i as u64);
            let slot = slot_edge(i as u64 + 1) - slot_start;
            let width = (slot * 7 / 10).max(1);
            BarRect {
                x: (slot_start + slot.saturating_sub(width) / 2)
                    .min(MARGIN_LEFT + plot_width - width),
                y: baseline - height,
                width,
                height,
            }
        })
        .collect()
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = (x + width).min(img.width());
    let y_end = (y + height).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

fn draw_grid(img: &mut RgbImage) {
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    for step in 1..=GRID_LINES {
        let y = CHART_HEIGHT - MARGIN_BOTTOM - plot_height * step / GRID_LINES;
        fill_rect(img, MARGIN_LEFT, y, plot_width, 1, GRID);
    }
}

fn draw_axes(img: &mut RgbImage) {
    let baseline = CHART_HEIGHT - MARGIN_BOTTOM;
    fill_rect(img, MARGIN_LEFT, MARGIN_TOP, 1, baseline - MARGIN_TOP + 1, AXIS);
    fill_rect(img, MARGIN_LEFT, baseline, CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT, 1, AXIS);
}
