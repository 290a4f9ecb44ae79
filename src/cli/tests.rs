use std::{ffi::OsString, iter, path::PathBuf};

use super::{try_parse_args, Args, Color, Error, Input, OutputFormat};
use crate::source::{Column, CsvOptions, GaussianOptions};
use crate::Method;

fn gen_args(args: &[&str]) -> Vec<OsString> {
    iter::once("<EXE>")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

#[test]
fn generate() {
    let args = try_parse_args(gen_args(&["--generate"])).unwrap();
    assert_eq!(args, Args::default());
}

#[test]
fn file() {
    let args = try_parse_args(gen_args(&["data.csv"])).unwrap();
    assert_eq!(
        args,
        Args {
            input: Input::File(PathBuf::from("data.csv")),
            ..Args::default()
        }
    );
}

#[test]
fn input_is_required() {
    let err = try_parse_args(gen_args(&[])).unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
}

#[test]
fn file_and_generate_conflict() {
    let err = try_parse_args(gen_args(&["data.csv", "--generate"])).unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
}

#[test]
fn help() {
    let err = try_parse_args(gen_args(&["--help"])).unwrap_err();
    assert!(matches!(err, Error::DisplayHelp(_)));
}

#[test]
fn version() {
    let err = try_parse_args(gen_args(&["--version"])).unwrap_err();
    assert!(matches!(err, Error::DisplayVersion(_)));
}

#[test]
fn method_and_cut_off() {
    let args = try_parse_args(gen_args(&["data.csv", "-m", "stddev", "-k", "2.5"])).unwrap();
    assert_eq!(args.method, Some(Method::StdDev));
    assert_eq!(args.cut_off, Some(2.5));
}

#[test]
fn unknown_method() {
    let err = try_parse_args(gen_args(&["data.csv", "--method", "median"])).unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
}

#[test]
fn negative_cut_off() {
    let err = try_parse_args(gen_args(&["data.csv", "--cut-off", "-1"])).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { arg: "cut-off", .. }));
}

#[test]
fn malformed_cut_off() {
    let err = try_parse_args(gen_args(&["data.csv", "--cut-off", "wide"])).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { arg: "cut-off", .. }));
}

#[test]
fn csv_options() {
    let args = try_parse_args(gen_args(&["data.csv", "--column", "price", "--no-header"])).unwrap();
    assert_eq!(
        args.csv,
        CsvOptions {
            column: Column::Name("price".into()),
            has_headers: false,
        }
    );

    let args = try_parse_args(gen_args(&["data.csv", "-c", "3"])).unwrap();
    assert_eq!(args.csv.column, Column::Index(3));
}

#[test]
fn generator_options() {
    let args = try_parse_args(gen_args(&[
        "--generate",
        "--mean",
        "-10",
        "--std-dev",
        "2",
        "--size",
        "500",
        "--seed",
        "42",
    ]))
    .unwrap();

    assert_eq!(
        args.gaussian,
        GaussianOptions {
            mean: -10.,
            std_dev: 2.,
            size: 500,
            seed: 42,
        }
    );
}

#[test]
fn oversized_sample() {
    let err = try_parse_args(gen_args(&["--generate", "--size", "18446744073709551615"]))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue { arg: "size", .. }));

    let err = try_parse_args(gen_args(&["--generate", "--size", "100000001"])).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { arg: "size", .. }));

    let args = try_parse_args(gen_args(&["--generate", "--size", "100000000"])).unwrap();
    assert_eq!(args.gaussian.size, crate::source::MAX_GENERATED);
}

#[test]
fn generator_options_require_generate() {
    let err = try_parse_args(gen_args(&["data.csv", "--seed", "42"])).unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
}

#[test]
fn outputs() {
    let args = try_parse_args(gen_args(&[
        "--generate",
        "--format",
        "json",
        "--export",
        "labels.csv",
        "--plot",
        "hist.svg",
        "--color",
        "never",
        "-v",
    ]))
    .unwrap();

    assert_eq!(
        args,
        Args {
            format: OutputFormat::Json,
            export: Some("labels.csv".into()),
            plot: Some("hist.svg".into()),
            color: Color::Never,
            verbose: true,
            ..Args::default()
        }
    );
}
