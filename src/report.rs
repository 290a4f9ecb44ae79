use std::io::Write;
use std::path::Path;

use anes::{Attribute, Color, ResetAttributes, SetAttribute, SetForegroundColor};
use serde_derive::Serialize;

use crate::error::{Error, Result};
use crate::format;
use crate::stats::univariate::outliers::Bounds;
use crate::Analysis;

/// Human readable report, printed to stdout
pub struct CliReport {
    pub enable_text_coloring: bool,
}

impl CliReport {
    pub fn new(enable_text_coloring: bool) -> CliReport {
        CliReport {
            enable_text_coloring,
        }
    }

    fn with_color(&self, color: Color, s: &str) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetForegroundColor(color), s, ResetAttributes)
        } else {
            String::from(s)
        }
    }

    fn green(&self, s: &str) -> String {
        self.with_color(Color::DarkGreen, s)
    }

    fn yellow(&self, s: &str) -> String {
        self.with_color(Color::DarkYellow, s)
    }

    fn bold(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Bold), s, ResetAttributes)
        } else {
            s
        }
    }

    fn faint(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Faint), s, ResetAttributes)
        } else {
            s
        }
    }

    pub fn analysis(&self, analysis: &Analysis) {
        for line in self.render(analysis) {
            println!("{}", line);
        }
    }

    /// The lines `analysis` prints, without trailing newlines
    pub fn render(&self, analysis: &Analysis) -> Vec<String> {
        let mut lines = vec![
            self.bold(format!(
                "{:<12}{} (k = {})",
                "Method:", analysis.method, analysis.cut_off
            )),
            format!(
                "{:<12}{} observations, mean {}, std. dev. {}",
                "Sample:",
                format::integer(analysis.size),
                format::value(analysis.mean),
                format::value(analysis.std_dev),
            ),
            self.faint(format!(
                "{:<12}min {}, q25 {}, median {}, q75 {}, max {}",
                "",
                format::value(analysis.min),
                format::value(analysis.q25),
                format::value(analysis.median),
                format::value(analysis.q75),
                format::value(analysis.max),
            )),
            format!(
                "{:<12}[{}, {}]",
                "Bounds:",
                format::value(analysis.bounds.lower),
                format::value(analysis.bounds.upper),
            ),
        ];

        lines.extend(self.outliers(analysis));
        lines
    }

    fn outliers(&self, analysis: &Analysis) -> Vec<String> {
        let noutliers = analysis.outliers();
        let sample_size = analysis.size;

        if noutliers == 0 {
            return vec![self.green(&format!(
                "No outliers found among {} observations",
                format::integer(sample_size)
            ))];
        }

        let mut lines = vec![self.yellow(&format!(
            "Found {} outliers among {} observations ({})",
            format::integer(noutliers),
            format::integer(sample_size),
            format::percent(noutliers, sample_size)
        ))];

        let mut push = |n, label| {
            if n != 0 {
                lines.push(format!(
                    "  {} ({}) {}",
                    format::integer(n),
                    format::percent(n, sample_size),
                    label
                ));
            }
        };

        push(analysis.low, "low");
        push(analysis.high, "high");

        lines.push(format!(
            "Non-outlier observations: {}",
            format::integer(analysis.inliers)
        ));
        lines
    }
}

/// Writes `analysis` as pretty printed JSON followed by a newline
pub fn write_json<W: Write>(mut writer: W, analysis: &Analysis) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, analysis)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)?;

    Ok(())
}

#[derive(Serialize)]
struct CsvRow {
    index: usize,
    value: f64,
    label: &'static str,
}

/// Writes one `index,value,label` row per data point
pub fn export_csv(path: &Path, data: &[f64], bounds: Bounds<f64>) -> Result<()> {
    let csv_error = |inner| Error::CsvError {
        path: path.to_owned(),
        inner,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for (index, &value) in data.iter().enumerate() {
        let row = CsvRow {
            index,
            value,
            label: bounds.label(value).as_str(),
        };
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|inner| Error::AccessError {
        path: path.to_owned(),
        inner,
    })?;

    tracing::info!("Wrote {} labeled values to {:?}", data.len(), path);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Method, OutlierDetector};

    const EXAMPLE: [f64; 12] = [
        10., 12., 12., 13., 12., 11., 14., 13., 15., 10., 10., 100.,
    ];

    #[test]
    fn plain_text() {
        let analysis = OutlierDetector::default().analyze(&EXAMPLE).unwrap();
        let lines = CliReport::new(false).render(&analysis);

        assert_eq!(lines[0], "Method:     iqr (k = 1.5)");
        assert_eq!(lines[3], "Bounds:     [7.0000, 17.000]");
        assert_eq!(lines[4], "Found 1 outliers among 12 observations (8.33%)");
        assert_eq!(lines[5], "  1 (8.33%) high");
        assert_eq!(lines[6], "Non-outlier observations: 11");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn no_outliers() {
        let analysis = OutlierDetector::default()
            .method(Method::StdDev)
            .analyze(&[1., 2., 3.])
            .unwrap();
        let lines = CliReport::new(false).render(&analysis);

        assert_eq!(
            lines.last().unwrap(),
            "No outliers found among 3 observations"
        );
    }

    #[test]
    fn colored_text_is_escaped() {
        let analysis = OutlierDetector::default().analyze(&EXAMPLE).unwrap();
        let lines = CliReport::new(true).render(&analysis);

        assert!(lines[0].contains('\u{1b}'));
        assert!(lines[0].contains("Method:"));
    }

    #[test]
    fn json() {
        let analysis = OutlierDetector::default().analyze(&EXAMPLE).unwrap();
        let mut buffer = Vec::new();
        write_json(&mut buffer, &analysis).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["method"], "iqr");
        assert_eq!(value["size"], 12);
        assert_eq!(value["high"], 1);
        assert_eq!(value["bounds"]["lower"], 7.0);
        assert_eq!(value["bounds"]["upper"], 17.0);
    }
}
