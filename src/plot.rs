//! SVG histogram of a sample with its outlier bounds

use std::path::Path;

use plotters::data::float::pretty_print_float;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::stats::univariate::outliers::Bounds;
use crate::stats::univariate::Sample;

static DEFAULT_FONT: FontFamily = FontFamily::SansSerif;
static SIZE: (u32, u32) = (960, 540);
static BINS: usize = 50;

const DARK_BLUE: RGBColor = RGBColor(31, 120, 180);
const DARK_ORANGE: RGBColor = RGBColor(255, 127, 0);
const DARK_RED: RGBColor = RGBColor(227, 26, 28);

/// Counts of `data` in `bins` equally wide bins spanning `[start, end]`
fn histogram_counts(data: &[f64], start: f64, end: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0; bins];
    let width = (end - start) / bins as f64;

    for &x in data {
        let bin = ((x - start) / width).floor();
        // NB the last bin is closed on the right
        let bin = if bin < 0. { 0 } else { (bin as usize).min(bins - 1) };
        counts[bin] += 1;
    }

    counts
}

/// Draws the histogram of `data`, shading the inlier region and marking both bounds
///
/// The x axis always covers the bounds, even when no data point gets close to them.
pub fn histogram(
    path: &Path,
    title: Option<&str>,
    data: &[f64],
    bounds: Bounds<f64>,
) -> Result<()> {
    let sample = Sample::new(data)?;
    let plot_error = |e: &dyn std::fmt::Display| Error::PlotError {
        path: path.to_owned(),
        message: e.to_string(),
    };

    let mut start = sample.min().min(bounds.lower);
    let mut end = sample.max().max(bounds.upper);
    if start == end {
        start -= 0.5;
        end += 0.5;
    }

    let counts = histogram_counts(sample, start, end, BINS);
    let width = (end - start) / BINS as f64;
    let y_max = counts.iter().copied().max().unwrap_or(0) as f64 * 1.1 + 1.;

    let root_area = SVGBackend::new(path, SIZE).into_drawing_area();
    root_area.fill(&WHITE).map_err(|e| plot_error(&e))?;

    let mut cb = ChartBuilder::on(&root_area);

    if let Some(title) = title {
        cb.caption(title, (DEFAULT_FONT, 20));
    }

    let mut chart = cb
        .margin((5).percent())
        .set_label_area_size(LabelAreaPosition::Left, (5).percent_width().min(60))
        .set_label_area_size(LabelAreaPosition::Bottom, (5).percent_height().min(40))
        .build_cartesian_2d(start..end, 0.0..y_max)
        .map_err(|e| plot_error(&e))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .y_desc("Observations")
        .x_desc("Value")
        .x_label_formatter(&|&x| pretty_print_float(x, true))
        .y_label_formatter(&|&y| pretty_print_float(y, false))
        .x_labels(5)
        .draw()
        .map_err(|e| plot_error(&e))?;

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(bounds.lower, 0.0), (bounds.upper, y_max)],
            DARK_ORANGE.mix(0.1).filled(),
        )))
        .map_err(|e| plot_error(&e))?
        .label("Inliers")
        .legend(|(x, y)| {
            Rectangle::new([(x, y - 5), (x + 20, y + 5)], DARK_ORANGE.mix(0.1).filled())
        });

    chart
        .draw_series(counts.iter().enumerate().map(|(i, &count)| {
            let x0 = start + i as f64 * width;

            Rectangle::new(
                [(x0, 0.0), (x0 + width, count as f64)],
                DARK_BLUE.mix(0.5).filled(),
            )
        }))
        .map_err(|e| plot_error(&e))?
        .label("Sample")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], DARK_BLUE.mix(0.5).filled()));

    chart
        .draw_series(
            [bounds.lower, bounds.upper]
                .iter()
                .map(|&x| PathElement::new(vec![(x, 0.0), (x, y_max)], DARK_RED.stroke_width(2))),
        )
        .map_err(|e| plot_error(&e))?
        .label("Bounds")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DARK_RED));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| plot_error(&e))?;

    root_area.present().map_err(|e| plot_error(&e))?;

    tracing::info!("Wrote histogram to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::histogram_counts;

    #[test]
    fn counts_cover_every_point() {
        let data = [0., 0.5, 1., 1.5, 2., 2., 9.99, 10.];
        let counts = histogram_counts(&data, 0., 10., 10);

        assert_eq!(counts.iter().sum::<usize>(), data.len());
        assert_eq!(counts[0], 2);
        assert_eq!(counts[1], 2);
        assert_eq!(counts[2], 2);
        assert_eq!(counts[9], 2);
    }
}
