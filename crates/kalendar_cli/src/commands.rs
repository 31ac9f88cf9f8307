//! Subcommand bodies: merge CLI overrides with the config, run the
//! library pipeline, write the result.

use std::path::Path;

use anyhow::{Context, Result, bail};
use kalendar_config::{KalendarConfig, MAX_TOLERANCE};
use kalendar_feasts::{
    Delimiter, FeastRecord, FeastTable, Summary, TextParser, WriteOptions, annotate_moon,
    apply_fasts, month_json, read_records, write_records,
};
use kalendar_moon::ALL_ALGORITHMS;
use kalendar_time::parse_iso_date;
use tracing::{info, warn};

use crate::cli::{
    ConvertArgs, FastsArgs, MonthArgs, MoonArgs, OutputArgs, ParseArgs, PhaseArgs,
};

pub fn parse(config: &KalendarConfig, args: ParseArgs) -> Result<()> {
    let parser = TextParser::new(args.year.unwrap_or(config.parser.year))
        .with_clean(args.clean || config.parser.clean)
        .with_fasts(config.parser.apply_fasts && !args.no_fasts);

    let records = parser
        .parse_file(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    Summary::of(&records).log();

    let options = write_options(config, &args.output_args, false);
    save(&args.output, &records, &options)
}

pub fn fasts(config: &KalendarConfig, args: FastsArgs) -> Result<()> {
    let mut table = load(&args.input, args.input_delimiter)?;
    let report = apply_fasts(&mut table.records, args.keep_flags);
    if report.skipped > 0 {
        warn!(skipped = report.skipped, "records with unreadable dates kept their flags");
    }

    let options = write_options(config, &args.output_args, table.has_moon_column);
    save(&args.output, &table.records, &options)
}

pub fn moon(config: &KalendarConfig, args: MoonArgs) -> Result<()> {
    let algorithm = args.algorithm.unwrap_or(config.moon.algorithm);
    let tolerance = checked_tolerance(args.tolerance, config)?;
    let transitions = args.transitions.unwrap_or(config.moon.transitions);

    let mut table = load(&args.input, args.input_delimiter)?;
    let strategy = algorithm.strategy(tolerance);
    let report = annotate_moon(&mut table.records, strategy.as_ref(), transitions);
    if report.computed == 0 && !table.records.is_empty() {
        warn!("no moon phase could be computed");
    }

    let options = write_options(config, &args.output_args, true);
    save(&args.output, &table.records, &options)
}

pub fn convert(config: &KalendarConfig, args: ConvertArgs) -> Result<()> {
    let table = load(&args.input, args.input_delimiter)?;
    let options = write_options(config, &args.output_args, table.has_moon_column);
    save(&args.output, &table.records, &options)
}

pub fn month(args: MonthArgs) -> Result<()> {
    let table = load(&args.input, args.input_delimiter)?;
    let json = month_json(&table.records, args.month)?;
    println!("{json}");
    Ok(())
}

pub fn phase(config: &KalendarConfig, args: PhaseArgs) -> Result<()> {
    let date = parse_iso_date(&args.date)?;
    let tolerance = checked_tolerance(args.tolerance, config)?;

    println!("{date}");
    for algorithm in ALL_ALGORITHMS {
        let strategy = algorithm.strategy(tolerance);
        let code = strategy
            .phase_code(date)
            .with_context(|| format!("{algorithm} phase failed for {date}"))?;
        println!(
            "  {:<14} {:>2}  {}",
            algorithm.name(),
            code,
            strategy.domain().describe(code)
        );
    }
    Ok(())
}

fn checked_tolerance(flag: Option<f64>, config: &KalendarConfig) -> Result<f64> {
    let tolerance = flag.unwrap_or(config.moon.tolerance);
    if !(tolerance > 0.0 && tolerance <= MAX_TOLERANCE) {
        bail!("tolerance must be in (0, {MAX_TOLERANCE}], got {tolerance}");
    }
    Ok(tolerance)
}

fn write_options(config: &KalendarConfig, args: &OutputArgs, moon_column: bool) -> WriteOptions {
    WriteOptions {
        delimiter: args.delimiter.unwrap_or(config.io.delimiter),
        quote_all: args.quote_all || config.io.quote_all,
        moon_column,
    }
}

fn load(path: &Path, delimiter: Delimiter) -> Result<FeastTable> {
    let table = read_records(path, delimiter)
        .with_context(|| format!("failed to read {}", path.display()))?;
    info!(path = %path.display(), rows = table.records.len(), "loaded records");
    Ok(table)
}

fn save(path: &Path, records: &[FeastRecord], options: &WriteOptions) -> Result<()> {
    write_records(path, records, options)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), rows = records.len(), "wrote records");
    Ok(())
}
