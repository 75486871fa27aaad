// Off-screen chart rendering for the summary image.
//
// The charts are drawn into an RGB buffer and encoded to PNG bytes in
// memory; nothing touches the filesystem here. The charts carry no text:
// the descriptive part of the summary lives in the JSON/terminal report.

use std::io::Cursor;

use log::debug;
use plotters::prelude::*;
use snafu::prelude::*;

use quiz_scoring::*;

use crate::app::*;

const CHART_WIDTH: u32 = 640;
const CHART_HEIGHT: u32 = 480;

fn chart_err<E: std::fmt::Display>(e: E) -> QuizError {
    RenderSnafu {
        message: e.to_string(),
    }
    .build()
}

/// Renders the paired-model tally as one horizontal bar pair per dimension
/// and returns the encoded PNG bytes.
pub fn render_type_chart(result: &TypeResult) -> AppResult<Vec<u8>> {
    let mut raw = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut raw, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let max_count = result
            .tally
            .counts()
            .iter()
            .map(|(_, n)| *n)
            .max()
            .unwrap_or(0)
            .max(1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .margin(24)
            .build_cartesian_2d(0f64..max_count * 1.05, 0f64..4f64)
            .map_err(chart_err)?;

        let mut bars: Vec<Rectangle<(f64, f64)>> = Vec::new();
        for (row, pair) in DimensionPair::ALL.iter().enumerate() {
            let (first, second) = pair.letters();
            let base = row as f64;
            let front = result.tally.count(first) as f64;
            let back = result.tally.count(second) as f64;
            // Upper bar: the first-listed letter. Lower bar: its complement.
            bars.push(Rectangle::new(
                [(0.0, base + 0.52), (front.max(0.02), base + 0.88)],
                BLUE.mix(0.75).filled(),
            ));
            bars.push(Rectangle::new(
                [(0.0, base + 0.12), (back.max(0.02), base + 0.48)],
                RED.mix(0.55).filled(),
            ));
        }
        debug!("render_type_chart: {} bars, max {}", bars.len(), max_count);
        chart.draw_series(bars).map_err(chart_err)?;

        // Baselines between the four dimension rows.
        let rules: Vec<PathElement<(f64, f64)>> = (0..=4)
            .map(|row| {
                PathElement::new(
                    vec![(0.0, row as f64), (max_count * 1.05, row as f64)],
                    BLACK.mix(0.2),
                )
            })
            .collect();
        chart.draw_series(rules).map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    encode_png(raw)
}

/// Renders the interest ranking as a radar polygon over the six categories
/// and returns the encoded PNG bytes.
pub fn render_interest_chart(result: &InterestResult) -> AppResult<Vec<u8>> {
    let side = CHART_WIDTH.min(CHART_HEIGHT);
    let mut raw = vec![0u8; (side * side * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (side, side)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(16)
            .build_cartesian_2d(-1.3f64..1.3f64, -1.3f64..1.3f64)
            .map_err(chart_err)?;

        let max_score = result
            .tally
            .counts()
            .iter()
            .map(|(_, n)| *n)
            .max()
            .unwrap_or(0)
            .max(1) as f64;

        // One spoke per category, starting at twelve o'clock.
        let angle_of = |idx: usize| -> (f64, f64) {
            let angle = -std::f64::consts::FRAC_PI_2
                + (idx as f64) * std::f64::consts::PI * 2.0 / 6.0;
            (angle.cos(), angle.sin())
        };

        let spokes: Vec<PathElement<(f64, f64)>> = (0..6)
            .map(|idx| {
                let (x, y) = angle_of(idx);
                PathElement::new(vec![(0.0, 0.0), (x, y)], BLACK.mix(0.25))
            })
            .collect();
        chart.draw_series(spokes).map_err(chart_err)?;

        let ring: Vec<(f64, f64)> = (0..=6).map(|idx| angle_of(idx % 6)).collect();
        chart
            .draw_series(std::iter::once(PathElement::new(ring, BLACK.mix(0.4))))
            .map_err(chart_err)?;

        // The score polygon, in fixed category order.
        let points: Vec<(f64, f64)> = InterestCategory::ALL
            .iter()
            .enumerate()
            .map(|(idx, cat)| {
                let r = result.tally.count(cat.letter()) as f64 / max_score;
                let (x, y) = angle_of(idx);
                (x * r, y * r)
            })
            .collect();
        debug!("render_interest_chart: points: {:?}", points);
        chart
            .draw_series(std::iter::once(Polygon::new(
                points.clone(),
                BLUE.mix(0.35).filled(),
            )))
            .map_err(chart_err)?;
        let mut outline = points;
        if let Some(first) = outline.first().cloned() {
            outline.push(first);
        }
        chart
            .draw_series(std::iter::once(PathElement::new(outline, &BLUE)))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    encode_png_square(raw, side)
}

fn encode_png(raw: Vec<u8>) -> AppResult<Vec<u8>> {
    encode_rgb(raw, CHART_WIDTH, CHART_HEIGHT)
}

fn encode_png_square(raw: Vec<u8>, side: u32) -> AppResult<Vec<u8>> {
    encode_rgb(raw, side, side)
}

fn encode_rgb(raw: Vec<u8>, width: u32, height: u32) -> AppResult<Vec<u8>> {
    let img = image::RgbImage::from_raw(width, height, raw).context(RenderSnafu {
        message: "pixel buffer does not match the chart dimensions".to_string(),
    })?;
    let mut bytes: Vec<u8> = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .map_err(chart_err)?;
    Ok(bytes)
}
