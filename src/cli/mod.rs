//! The `fences` command line

mod error;
#[cfg(test)]
mod tests;
mod types;

pub use error::Error;
pub use types::{Color, Input, OutputFormat};

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{App, Arg, ArgGroup, ArgMatches, ErrorKind};

use crate::report::{self, CliReport};
use crate::source::{self, Column, CsvOptions, GaussianOptions};
use crate::{Method, OutlierDetector};

#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub input: Input,
    pub method: Option<Method>,
    pub cut_off: Option<f64>,
    pub csv: CsvOptions,
    pub gaussian: GaussianOptions,
    pub format: OutputFormat,
    pub export: Option<PathBuf>,
    pub plot: Option<PathBuf>,
    pub color: Color,
    pub verbose: bool,
}

/// Parses the process arguments, exiting on `--help`, `--version` and invalid input
pub fn parse_args() -> Args {
    match try_parse_args(std::env::args_os().collect()) {
        Ok(args) => args,
        Err(Error::DisplayHelp(help)) => {
            println!("{}", help);
            std::process::exit(0);
        }
        Err(Error::DisplayVersion(version)) => {
            println!("{}", version);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error parsing CLI args: {}", e);
            std::process::exit(2);
        }
    }
}

fn app() -> App<'static, 'static> {
    App::new("fences")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds outliers in a numeric sample using standard-deviation or IQR cut-offs")
        .arg(
            Arg::with_name("FILE")
                .help("CSV file holding the sample")
                .index(1),
        )
        .arg(
            Arg::with_name("generate")
                .long("generate")
                .help("Use a seeded normally distributed sample instead of FILE"),
        )
        .group(
            ArgGroup::with_name("input")
                .args(&["FILE", "generate"])
                .required(true),
        )
        .arg(
            Arg::with_name("method")
                .short("m")
                .long("method")
                .takes_value(true)
                .value_name("METHOD")
                .possible_values(&["stddev", "iqr"])
                .help("How to compute the bounds [default: iqr]"),
        )
        .arg(
            Arg::with_name("cut-off")
                .short("k")
                .long("cut-off")
                .takes_value(true)
                .value_name("K")
                .allow_hyphen_values(true)
                .help("Cut-off factor [default: 3 for stddev, 1.5 for iqr]"),
        )
        .arg(
            Arg::with_name("column")
                .short("c")
                .long("column")
                .takes_value(true)
                .value_name("NAME|INDEX")
                .help("CSV column holding the sample [default: 0]"),
        )
        .arg(
            Arg::with_name("no-header")
                .long("no-header")
                .help("The CSV file has no header row"),
        )
        .arg(
            Arg::with_name("mean")
                .long("mean")
                .takes_value(true)
                .allow_hyphen_values(true)
                .requires("generate")
                .help("Mean of the generated sample [default: 50]"),
        )
        .arg(
            Arg::with_name("std-dev")
                .long("std-dev")
                .takes_value(true)
                .requires("generate")
                .help("Standard deviation of the generated sample [default: 5]"),
        )
        .arg(
            Arg::with_name("size")
                .long("size")
                .takes_value(true)
                .requires("generate")
                .help("Number of generated values, at most 100000000 [default: 10000]"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .requires("generate")
                .help("Seed of the generator [default: 1]"),
        )
        .arg(
            Arg::with_name("format")
                .long("format")
                .takes_value(true)
                .possible_values(&["text", "json"])
                .help("Report format [default: text]"),
        )
        .arg(
            Arg::with_name("export")
                .long("export")
                .takes_value(true)
                .value_name("PATH")
                .help("Write every value and its label to a CSV file"),
        )
        .arg(
            Arg::with_name("plot")
                .long("plot")
                .takes_value(true)
                .value_name("PATH")
                .help("Draw an SVG histogram with the bounds"),
        )
        .arg(
            Arg::with_name("color")
                .long("color")
                .takes_value(true)
                .possible_values(&["auto", "always", "never"])
                .help("Color the text report [default: auto]"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Print debug information"),
        )
}

fn parse_value<T>(matches: &ArgMatches<'_>, arg: &'static str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    matches
        .value_of(arg)
        .map(|value| {
            value.parse().map_err(|e: T::Err| Error::InvalidValue {
                arg,
                value: value.to_owned(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn non_negative(arg: &'static str, value: Option<f64>) -> Result<Option<f64>, Error> {
    match value {
        Some(x) if !x.is_finite() || x < 0.0 => Err(Error::InvalidValue {
            arg,
            value: x.to_string(),
            reason: "must be a non-negative number".to_owned(),
        }),
        _ => Ok(value),
    }
}

fn at_most(
    arg: &'static str,
    value: Option<usize>,
    max: usize,
) -> Result<Option<usize>, Error> {
    match value {
        Some(n) if n > max => Err(Error::InvalidValue {
            arg,
            value: n.to_string(),
            reason: format!("must be at most {}", max),
        }),
        _ => Ok(value),
    }
}

fn try_parse_args(args: Vec<OsString>) -> Result<Args, Error> {
    let matches = app().get_matches_from_safe(args).map_err(|e| match e.kind {
        ErrorKind::HelpDisplayed => Error::DisplayHelp(e.message),
        ErrorKind::VersionDisplayed => Error::DisplayVersion(e.message),
        _ => Error::Usage(e.message),
    })?;

    let input = match matches.value_of_os("FILE") {
        Some(path) => Input::File(PathBuf::from(path)),
        None => Input::Generate,
    };

    let mut csv = CsvOptions::default();
    if let Some(column) = matches.value_of("column") {
        csv.column = Column::from(column);
    }
    csv.has_headers = !matches.is_present("no-header");

    let defaults = GaussianOptions::default();
    let gaussian = GaussianOptions {
        mean: parse_value(&matches, "mean")?.unwrap_or(defaults.mean),
        std_dev: non_negative("std-dev", parse_value(&matches, "std-dev")?)?
            .unwrap_or(defaults.std_dev),
        size: at_most("size", parse_value(&matches, "size")?, source::MAX_GENERATED)?
            .unwrap_or(defaults.size),
        seed: parse_value(&matches, "seed")?.unwrap_or(defaults.seed),
    };

    Ok(Args {
        input,
        method: parse_value(&matches, "method")?,
        cut_off: non_negative("cut-off", parse_value(&matches, "cut-off")?)?,
        csv,
        gaussian,
        format: parse_value(&matches, "format")?.unwrap_or_default(),
        export: matches.value_of_os("export").map(PathBuf::from),
        plot: matches.value_of_os("plot").map(PathBuf::from),
        color: parse_value(&matches, "color")?.unwrap_or_default(),
        verbose: matches.is_present("verbose"),
    })
}

/// Loads the sample, classifies it and writes every requested report
pub fn run(args: &Args) -> crate::Result<()> {
    let data = match &args.input {
        Input::File(path) => source::load_csv(path, &args.csv)?,
        Input::Generate => source::gaussian(&args.gaussian),
    };

    let detector = OutlierDetector::default().configure_from_args(args);
    let analysis = detector.analyze(&data)?;

    match args.format {
        OutputFormat::Text => CliReport::new(args.color.enabled()).analysis(&analysis),
        OutputFormat::Json => {
            let stdout = io::stdout();
            report::write_json(stdout.lock(), &analysis)?;
        }
    }

    if let Some(path) = &args.export {
        report::export_csv(path, &data, analysis.bounds)?;
    }

    if let Some(path) = &args.plot {
        draw(path, &data, &analysis)?;
    }

    Ok(())
}

#[cfg(feature = "plotters")]
fn draw(path: &Path, data: &[f64], analysis: &crate::Analysis) -> crate::Result<()> {
    let title = format!("{} bounds, k = {}", analysis.method, analysis.cut_off);

    crate::plot::histogram(path, Some(&title), data, analysis.bounds)
}

#[cfg(not(feature = "plotters"))]
fn draw(path: &Path, _: &[f64], _: &crate::Analysis) -> crate::Result<()> {
    tracing::warn!(
        "Built without the `plotters` feature, not drawing {:?}",
        path
    );

    Ok(())
}

/// Logs `e` with its causes and prints it to stderr
pub fn report_error(e: &crate::Error) {
    crate::error::log_error(e);
    eprintln!("Error: {}", e);
}
