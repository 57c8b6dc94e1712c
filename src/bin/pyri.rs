use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use pyri_rs::engine::Chart;
use pyri_rs::ingest::DataSource;
use pyri_rs::{chart, render, series, stats, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pyri",
    version,
    about = "Load, chart & summarize Pyricularia blast-risk weather data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a table (and optionally save, plot, and print stats).
    Chart(ChartArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Table path or http(s) URL.
    #[arg(short, long)]
    input: String,
    /// Save normalized records to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Create a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Print per-field statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Start these series hidden; display labels or field names separated by
    /// comma or semicolon (e.g. "Temperatura,humidity").
    #[arg(long)]
    hide: Option<String>,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Match a `--hide` name against the catalog: display label first, then
/// source column name.
fn dataset_index_for(chart: &Chart, name: &str) -> Option<usize> {
    chart
        .datasets()
        .iter()
        .position(|d| d.descriptor.label == name || d.descriptor.field.column() == name)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Chart(args) => cmd_chart(args),
    }
}

fn cmd_chart(args: ChartArgs) -> Result<()> {
    let source = DataSource::default();
    let records = source.load(&args.input)?;
    eprintln!("Loaded {} records from {}", records.len(), args.input);

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&records, path)?,
            "json" => storage::save_json(&records, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} records to {}", records.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let bundle = series::extract(&records);
        let config = chart::build_config(bundle);
        let mut host = Chart::new(config);
        host.set_viewport_width(args.width);
        if let Some(hide) = args.hide.as_ref() {
            for name in parse_list(hide) {
                match dataset_index_for(&host, &name) {
                    Some(index) => host.set_dataset_visibility(index, false),
                    None => anyhow::bail!("unknown series: {}", name),
                }
            }
        }
        host.update();
        render::render_to_path(&host, plot_path, args.width, args.height)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    if args.stats {
        let summaries = stats::field_summary(&records);
        for s in summaries {
            println!(
                "{:<10}  count={} missing={}  min={} max={} mean={} median={}",
                s.field,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
