use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kalendar_config::YEAR_RANGE;
use kalendar_feasts::Delimiter;
use kalendar_moon::{PhaseAlgorithm, TransitionMode};

/// Bulgarian Orthodox calendar tools.
#[derive(Parser)]
#[command(
    name = "kalendar",
    version,
    about = "Parse the Bulgarian Orthodox calendar, apply fasting rules and moon phases"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file (default: ./kalendar.toml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert raw calendar text into a record file.
    Parse(ParseArgs),
    /// Recompute fasting flags in a record file.
    Fasts(FastsArgs),
    /// Add moon phase codes to a record file.
    Moon(MoonArgs),
    /// Rewrite a record file with a different delimiter or quoting.
    Convert(ConvertArgs),
    /// Print one month of records as JSON.
    Month(MonthArgs),
    /// Print the moon phase of one date with every algorithm.
    Phase(PhaseArgs),
}

/// Output options shared by the file-writing subcommands.
#[derive(Args)]
pub struct OutputArgs {
    /// Output delimiter; overrides `io.delimiter`.
    #[arg(long)]
    pub delimiter: Option<Delimiter>,

    /// Quote every output field.
    #[arg(long)]
    pub quote_all: bool,
}

/// Arguments for the `parse` subcommand.
#[derive(Args)]
pub struct ParseArgs {
    /// Raw UTF-8 calendar text.
    pub input: PathBuf,

    /// Record file to write.
    pub output: PathBuf,

    /// Calendar year; overrides `parser.year`.
    #[arg(
        long,
        value_parser = clap::value_parser!(i32).range(YEAR_RANGE.0 as i64..=YEAR_RANGE.1 as i64)
    )]
    pub year: Option<i32>,

    /// Strip liturgical annotations from feast names.
    #[arg(long)]
    pub clean: bool,

    /// Leave all fasting flags false.
    #[arg(long)]
    pub no_fasts: bool,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

/// Arguments for the `fasts` subcommand.
#[derive(Args)]
pub struct FastsArgs {
    /// Record file to read.
    pub input: PathBuf,

    /// Record file to write.
    pub output: PathBuf,

    /// Layer the rules on top of the existing flags instead of resetting them.
    #[arg(long)]
    pub keep_flags: bool,

    /// Input delimiter (default: from the file extension).
    #[arg(long, default_value = "auto")]
    pub input_delimiter: Delimiter,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

/// Arguments for the `moon` subcommand.
#[derive(Args)]
pub struct MoonArgs {
    /// Record file to read.
    pub input: PathBuf,

    /// Record file to write.
    pub output: PathBuf,

    /// Phase algorithm; overrides `moon.algorithm`.
    #[arg(short, long)]
    pub algorithm: Option<PhaseAlgorithm>,

    /// Ephemeris window half-width in fraction units; overrides `moon.tolerance`.
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Transition marking; overrides `moon.transitions`.
    #[arg(long)]
    pub transitions: Option<TransitionMode>,

    /// Input delimiter (default: from the file extension).
    #[arg(long, default_value = "auto")]
    pub input_delimiter: Delimiter,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

/// Arguments for the `convert` subcommand.
#[derive(Args)]
pub struct ConvertArgs {
    /// Record file to read.
    pub input: PathBuf,

    /// Record file to write.
    pub output: PathBuf,

    /// Input delimiter (default: from the file extension).
    #[arg(long, default_value = "auto")]
    pub input_delimiter: Delimiter,

    #[command(flatten)]
    pub output_args: OutputArgs,
}

/// Arguments for the `month` subcommand.
#[derive(Args)]
pub struct MonthArgs {
    /// Record file to read.
    pub input: PathBuf,

    /// Month number, 1-12.
    #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    /// Input delimiter (default: from the file extension).
    #[arg(long, default_value = "auto")]
    pub input_delimiter: Delimiter,
}

/// Arguments for the `phase` subcommand.
#[derive(Args)]
pub struct PhaseArgs {
    /// Date as YYYY-MM-DD.
    pub date: String,

    /// Ephemeris window half-width; overrides `moon.tolerance`.
    #[arg(short, long)]
    pub tolerance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_moon_overrides() {
        let cli = Cli::try_parse_from([
            "kalendar",
            "-vv",
            "moon",
            "in.tsv",
            "out.tsv",
            "--algorithm",
            "lunation",
            "--transitions",
            "first-of-run",
            "--delimiter",
            "comma",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Moon(args) = cli.command else {
            panic!("expected moon subcommand");
        };
        assert_eq!(args.algorithm, Some(PhaseAlgorithm::Lunation));
        assert_eq!(args.transitions, Some(TransitionMode::FirstOfRun));
        assert_eq!(args.output_args.delimiter, Some(Delimiter::Comma));
        assert_eq!(args.input_delimiter, Delimiter::Auto);
    }

    #[test]
    fn rejects_month_out_of_range() {
        assert!(Cli::try_parse_from(["kalendar", "month", "in.tsv", "13"]).is_err());
        assert!(Cli::try_parse_from(["kalendar", "month", "in.tsv", "12"]).is_ok());
    }

    #[test]
    fn rejects_unknown_algorithm() {
        assert!(Cli::try_parse_from(["kalendar", "moon", "a", "b", "-a", "astropy"]).is_err());
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["kalendar", "phase", "2025-03-14", "--config", "k.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("k.toml")));
    }
}
