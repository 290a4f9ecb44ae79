//! Where samples come from: CSV files and a seeded Gaussian generator

use std::f64::consts::PI;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use oorandom::Rand64;

use crate::error::{Error, Result};

/// Selects the CSV column that holds the sample
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    /// Header name; requires a header row
    Name(String),
    /// Zero-based position
    Index(usize),
}

impl Default for Column {
    fn default() -> Column {
        Column::Index(0)
    }
}

impl From<&str> for Column {
    /// Numbers select by position, anything else by header name
    fn from(s: &str) -> Column {
        match s.parse() {
            Ok(index) => Column::Index(index),
            Err(_) => Column::Name(s.to_owned()),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Name(name) => write!(f, "{:?}", name),
            Column::Index(index) => write!(f, "#{}", index),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CsvOptions {
    pub column: Column,
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> CsvOptions {
        CsvOptions {
            column: Column::default(),
            has_headers: true,
        }
    }
}

/// Loads one numeric column of the CSV file at `path`
pub fn load_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|inner| Error::AccessError {
        path: path.to_owned(),
        inner,
    })?;

    let values = read_csv(file, options).map_err(|e| match e {
        Error::CsvError { inner, .. } => Error::CsvError {
            path: path.to_owned(),
            inner,
        },
        e => e,
    })?;

    tracing::info!(
        "Loaded {} values from column {} of {:?}",
        values.len(),
        options.column,
        path
    );

    Ok(values)
}

/// Reads one numeric column from CSV data
///
/// Blank fields are skipped; anything else that doesn't parse as a number is an error.
pub fn read_csv<R: Read>(reader: R, options: &CsvOptions) -> Result<Vec<f64>> {
    let csv_error = |inner| Error::CsvError {
        path: "<reader>".into(),
        inner,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let index = match &options.column {
        Column::Index(index) => *index,
        Column::Name(name) => {
            if !options.has_headers {
                return Err(Error::MissingColumn(name.clone()));
            }

            reader
                .headers()
                .map_err(csv_error)?
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| Error::MissingColumn(name.clone()))?
        }
    };

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let field = match record.get(index) {
            Some(field) if !field.is_empty() => field,
            _ => continue,
        };

        match field.parse::<f64>() {
            Ok(value) => values.push(value),
            Err(_) => {
                return Err(Error::ParseError {
                    line: record.position().map_or(0, |p| p.line()),
                    value: field.to_owned(),
                })
            }
        }
    }

    Ok(values)
}

/// Largest sample the command line will generate
pub const MAX_GENERATED: usize = 100_000_000;

/// Parameters of the synthetic normal sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianOptions {
    pub mean: f64,
    pub std_dev: f64,
    pub size: usize,
    pub seed: u64,
}

impl Default for GaussianOptions {
    fn default() -> GaussianOptions {
        GaussianOptions {
            mean: 50.,
            std_dev: 5.,
            size: 10_000,
            seed: 1,
        }
    }
}

/// Draws `size` normally distributed values (Box-Muller over a seeded PCG stream)
///
/// The same options always produce the same sample.
pub fn gaussian(options: &GaussianOptions) -> Vec<f64> {
    let mut rng = Rand64::new(u128::from(options.seed));
    let mut values = Vec::with_capacity(options.size.min(MAX_GENERATED));

    while values.len() < options.size {
        // `rand_float` is in [0, 1), `ln` needs (0, 1]
        let u1 = 1. - rng.rand_float();
        let u2 = rng.rand_float();
        let radius = (-2. * u1.ln()).sqrt();
        let theta = 2. * PI * u2;

        values.push(options.mean + options.std_dev * radius * theta.cos());
        if values.len() < options.size {
            values.push(options.mean + options.std_dev * radius * theta.sin());
        }
    }

    tracing::info!(
        "Generated {} values (mean {}, std dev {}, seed {})",
        options.size,
        options.mean,
        options.std_dev,
        options.seed
    );

    values
}
