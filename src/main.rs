use anyhow::Result;
use clap::Parser;
use demora::cli::{Cli, OutputFormat};
use demora::collector::MIN_CUMULATIVE_MS;
use demora::controller::{ScanController, ScanOptions};
use demora::csv_output::CsvReport;
use demora::json_output::JsonReport;
use demora::measure::CompileMeasure;
use demora::workspace::{DerivedDataLocator, LogFile, LogSource};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the log source from an explicit path or DerivedData discovery
fn resolve_source(args: &Cli) -> Result<Box<dyn LogSource>> {
    match (&args.log, &args.product) {
        (Some(path), None) => Ok(Box::new(LogFile::new(path))),
        (None, Some(product)) => {
            let locator = match &args.derived_data {
                Some(root) => DerivedDataLocator::with_root(root, product),
                None => DerivedDataLocator::new(product).ok_or_else(|| {
                    anyhow::anyhow!("Cannot resolve home directory; pass --derived-data DIR")
                })?,
            };
            Ok(Box::new(locator))
        }
        (Some(_), Some(_)) => {
            anyhow::bail!("Cannot specify both a log path and --product. Choose one.")
        }
        (None, None) => {
            anyhow::bail!(
                "Must specify a log path or a product. Usage: demora LOG or demora -p NAME"
            )
        }
    }
}

/// Print the ranked timing table to stdout
fn print_summary(results: &[CompileMeasure], limit: Option<usize>) {
    if results.is_empty() {
        println!("No compile timings above {}ms found.", MIN_CUMULATIVE_MS);
        return;
    }

    let shown = limit.unwrap_or(results.len()).min(results.len());
    let total: f64 = results.iter().map(|m| m.time).sum();

    println!("╔════════════════════════════════════════════════════════════════════════════════╗");
    println!("║  Compile Timing Summary (sorted by total time)                                ║");
    println!("╚════════════════════════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "{:>4} {:>10} {:<28} {:<9} {}",
        "#", "Time", "File", "Line", "Declaration"
    );
    println!("{}", "─".repeat(88));

    for (index, measure) in results.iter().take(shown).enumerate() {
        println!(
            "{:>4} {:>8.1}ms {:<28} {:<9} {}",
            index + 1,
            measure.time,
            measure.file_name(),
            measure.location(),
            measure.code
        );
    }

    println!("{}", "─".repeat(88));
    println!("{} entries, {:.1}ms total", results.len(), total);
    if shown < results.len() {
        println!("(showing slowest {}, use --limit to adjust)", shown);
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Validate interval range (a zero cadence would spin the coordinator)
    if args.interval == 0 {
        anyhow::bail!("Invalid value for --interval: 0 (must be >= 1)");
    }

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let source = resolve_source(&args)?;
    let mut controller = ScanController::with_options(ScanOptions {
        snapshot_interval: Duration::from_secs(args.interval),
    });

    // Ctrl-C requests cooperative cancellation; whatever has accumulated
    // still ranks and prints.
    let token = controller.cancel_token();
    if let Err(err) = ctrlc::set_handler(move || token.cancel()) {
        tracing::debug!(%err, "ctrl-c handler unavailable");
    }

    let mut final_results = Vec::new();
    controller.scan(&*source, |update| {
        if update.did_complete {
            final_results = update.results;
        } else {
            eprintln!("[demora: {} entries so far]", update.results.len());
        }
    })?;

    match args.format {
        OutputFormat::Text => print_summary(&final_results, args.limit),
        OutputFormat::Json => println!(
            "{}",
            JsonReport::from_measures(&final_results).to_json_string()?
        ),
        OutputFormat::Csv => print!("{}", CsvReport::from_measures(&final_results).to_csv()),
    }

    Ok(())
}
