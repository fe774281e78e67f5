//! Impact Chart Rendering
//!
//! Renders the top attribution magnitudes as a horizontal bar PNG on the
//! dashboard's dark theme and hands it back base64-encoded. The front-end
//! draws its own captions over the image, so the render is glyph-free and
//! needs no font stack. Rendering is best-effort; callers substitute an
//! empty string when it fails.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use plotters::prelude::*;

use crate::logic::explain::FeatureImpact;

pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 600;

const BACKDROP: RGBColor = RGBColor(0x1e, 0x1e, 0x2f);
const ACCENT: RGBColor = RGBColor(0x00, 0xf2, 0xc3);
const GRID: RGBColor = RGBColor(0x44, 0x44, 0x44);

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("nothing to draw")]
    Empty,
    #[error("chart drawing failed: {0}")]
    Draw(String),
    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// Render impact magnitudes to a base64 PNG, largest bar on top.
pub fn impact_chart_png(impacts: &[FeatureImpact]) -> Result<String, RenderError> {
    if impacts.is_empty() {
        return Err(RenderError::Empty);
    }

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&BACKDROP).map_err(draw_err)?;

        let bars = impacts.len();
        let max_magnitude = impacts
            .iter()
            .map(|i| i.impact.abs())
            .fold(0.0_f64, f64::max)
            .max(1e-6);

        let mut chart = ChartBuilder::on(&root)
            .margin(48)
            .build_cartesian_2d(0.0..max_magnitude * 1.05, 0.0..bars as f64)
            .map_err(draw_err)?;

        // Quarter gridlines and the baseline; no mesh, no labels.
        for step in 1..=4 {
            let x = max_magnitude * step as f64 / 4.0;
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x, 0.0), (x, bars as f64)],
                    GRID.mix(0.4),
                )))
                .map_err(draw_err)?;
        }
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, 0.0), (0.0, bars as f64)],
                &GRID,
            )))
            .map_err(draw_err)?;

        chart
            .draw_series(impacts.iter().enumerate().map(|(i, impact)| {
                let lane = (bars - 1 - i) as f64;
                Rectangle::new(
                    [(0.0, lane + 0.18), (impact.impact.abs(), lane + 0.82)],
                    ACCENT.filled(),
                )
            }))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    let image = image::RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buffer)
        .ok_or_else(|| RenderError::Encode("pixel buffer size mismatch".into()))?;
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;

    Ok(BASE64.encode(&png))
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}
