//! MSI keyboard backlight CLI tool
//!
//! Configures the SteelSeries keyboard found in MSI GT60/GT70 laptops through vendor specific
//! HID feature reports.

use std::ffi::OsString;
use std::process::ExitCode;
use std::str::FromStr;

use clap::builder::EnumValueParser;
use clap::error::ErrorKind;
use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::controller::{FeatureReportSink, MsiKeyboard};
use crate::error::Error;
use crate::request::{ModeName, UnvalidatedRequest};

mod color;
mod controller;
mod error;
mod frame;
mod program;
mod ramp;
mod request;

/// Usage examples for every mode.
const MODE_USAGE: &str = "\
Usage [DISABLE MODE]:
  msiled -mode disable
Usage [NORMAL MODE]:
  msiled -mode normal -color1 <color> [-color2 <color>] [-color3 <color>] -level <level>
Usage [GAMING MODE]:
  msiled -mode gaming -color1 <color> -level <level>
Usage [BREATHING MODE]:
  msiled -mode breathing -color1 <color> -color2 <color> -color3 <color> [-idle 1]
Usage [WAVE MODE]:
  msiled -mode wave -color1 <color> -color2 <color> -color3 <color> [-idle 1]
Usage [DUAL_COLOR MODE]:
  msiled -mode dualcolor -color1 <color> -color2 <color>

Valid intensity levels: [0,1,2,3] (0 is the most intense)
Valid colors: [black|red|orange|yellow|green|sky|blue|purple|white]
Valid idle value: [1]
Example usage: msiled -mode normal -color1 blue -color2 green -color3 yellow -level 0";

/// Options which may be passed with a single dash.
const LEGACY_OPTIONS: [&str; 6] = ["mode", "color1", "color2", "color3", "level", "idle"];

/// Backlight configuration.
#[derive(Default, Debug)]
struct Config {
    request: UnvalidatedRequest,
    dry_run: bool,
}

impl Config {
    fn from_cli(matches: &ArgMatches) -> Result<Self, Error> {
        let mut config = Config::default();

        config.request.mode = matches.get_one::<ModeName>("mode").copied();
        config.request.color1 = cli_from_str(matches, "color1").transpose()?;
        config.request.color2 = cli_from_str(matches, "color2").transpose()?;
        config.request.color3 = cli_from_str(matches, "color3").transpose()?;
        config.request.level = cli_from_str(matches, "level").transpose()?;

        if let Some(idle) = matches.get_one::<String>("idle") {
            config.request.idle = idle == "1";
            if !config.request.idle {
                warn!("Unknown idle value '{}', using standard timing", idle);
            }
        }

        if config.request.idle
            && !matches!(config.request.mode, Some(ModeName::Breathing | ModeName::Wave))
        {
            warn!("Idle timing only applies to breathing and wave mode");
        }

        config.dry_run = matches.get_flag("dry-run");

        Ok(config)
    }
}

/// Process exit status for successful runs.
const EXIT_SUCCESS: u8 = 0;

/// Process exit status for usage, help, version and all failures.
const EXIT_FAILURE: u8 = 1;

fn main() -> ExitCode {
    ExitCode::from(run_cli(std::env::args_os(), MsiKeyboard::open))
}

/// Parse the command line and apply it, returning the exit status.
fn run_cli<I, S, F>(args: I, open: F) -> u8
where
    I: IntoIterator<Item = OsString>,
    S: FeatureReportSink,
    F: FnOnce() -> Result<S, Error>,
{
    let matches = match cli().try_get_matches_from(normalize_args(args)) {
        Ok(matches) => matches,
        Err(err) => {
            // Help and version output also terminate with a failure code.
            println!("{}", err.render());
            if !matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                println!("Invalid parameter(s). Use --help for more information");
            }
            return EXIT_FAILURE;
        },
    };

    init_logging(matches.get_count("verbose"));

    // Require at least one option with its value.
    if !LEGACY_OPTIONS.iter().any(|name| matches.contains_id(name)) {
        println!("{}", cli().render_help());
        return EXIT_FAILURE;
    }

    let result = Config::from_cli(&matches).and_then(|config| run(&config, open));

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            println!("\x1b[31mError:\x1b[0m {err}");
            EXIT_FAILURE
        },
    }
}

/// Validate the configuration and write it to the keyboard.
///
/// The keyboard is only opened once the request is known to be complete.
fn run<S, F>(config: &Config, open: F) -> Result<(), Error>
where
    S: FeatureReportSink,
    F: FnOnce() -> Result<S, Error>,
{
    let request = config.request.validate()?;
    let frames = program::build(&request);

    if config.dry_run {
        for frame in &frames {
            println!("{frame}");
        }
        return Ok(());
    }

    let mut keyboard = open()?;
    controller::transmit(&mut keyboard, &frames)?;

    println!("\x1b[32mSuccessfully applied changes.\x1b[0m");
    info!("To reapply this config, you can run the following command: {}", request);

    Ok(())
}

/// Setup log output on STDERR.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Only the first subscriber is installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// Rewrite single dash long options like `-mode` to `--mode`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let long = arg
                .to_str()
                .and_then(|arg| arg.strip_prefix('-'))
                .filter(|name| LEGACY_OPTIONS.contains(name))
                .map(|name| OsString::from(format!("--{name}")));

            long.unwrap_or(arg)
        })
        .collect()
}

/// Get clap CLI parameters.
fn cli() -> Command {
    let color = |name: &'static str| {
        Arg::new(name)
            .help("Key color [black|red|orange|yellow|green|sky|blue|purple|white]")
            .long(name)
            .value_name("COLOR")
    };

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .disable_version_flag(true)
        .after_help(MODE_USAGE)
        .arg(
            Arg::new("version")
                .help("Print version")
                .long("version")
                .short('v')
                .action(ArgAction::Version),
        )
        .arg(
            Arg::new("mode")
                .help("Lighting mode")
                .long("mode")
                .value_parser(EnumValueParser::<ModeName>::new()),
        )
        .arg(color("color1"))
        .arg(color("color2"))
        .arg(color("color3"))
        .arg(
            Arg::new("level")
                .help("Intensity level, 0 is the most intense [possible values: 0..=3]")
                .long("level"),
        )
        .arg(
            Arg::new("idle")
                .help("Use the slower idle timing for breathing and wave [possible values: 1]")
                .long("idle"),
        )
        .arg(
            Arg::new("dry-run")
                .help("Print the feature reports instead of sending them")
                .long("dry-run")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .help("Increase log verbosity")
                .long("verbose")
                .action(ArgAction::Count),
        )
}

/// Convert a CLI option from the parameter string.
#[inline]
fn cli_from_str<T>(matches: &ArgMatches, name: &str) -> Option<Result<T, <T as FromStr>::Err>>
where
    T: FromStr,
{
    matches.get_one::<String>(name).map(|value| T::from_str(value))
}
