use outlier_fences::cli;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = cli::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = cli::run(&args) {
        cli::report_error(&e);
        std::process::exit(1);
    }
}
