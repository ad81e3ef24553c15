mod analysis;
mod charts;
mod engine;
mod export;
mod models;
mod storage;
mod types;

use std::fs;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::analysis::KpiSet;
use crate::charts::{ChartError, ChartRenderer, ChartSpec};
use crate::engine::ReportEngine;

const WORKBOOK_FILENAME: &str = "Extracted Data.xlsx";
const DERIVED_FILENAME: &str = "Derived Data.xlsx";
const REPORT_FILENAME: &str = "Sales Report.pdf";
const CHARTS_DIRNAME: &str = "charts";

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Arguments stay positional on purpose; a richer surface would move to the clap crate.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: sales-report-engine [input].csv [output_dir] [log_level:optional]");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];
    let output_dir = PathBuf::from(&args[2]);
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    let engine = ReportEngine::new();

    let timer = Instant::now();
    let records = engine.load_records(path).await?;
    let analysis = engine.analyze(&records).await;
    let duration = timer.elapsed();

    info!("Derived the report dataset in: {duration:?}");

    let charts_dir = output_dir.join(CHARTS_DIRNAME);
    fs::create_dir_all(&charts_dir)?;

    let workbook = ReportEngine::export_workbook(&records)?;
    fs::write(output_dir.join(WORKBOOK_FILENAME), workbook)?;

    let derived = ReportEngine::export_derived_workbook(&analysis)?;
    fs::write(output_dir.join(DERIVED_FILENAME), derived)?;

    let specs = ReportEngine::chart_specs(&analysis);
    for spec in &specs {
        let spec_path = charts_dir.join(format!("{}.json", spec.slug));
        fs::write(spec_path, serde_json::to_vec_pretty(spec)?)?;
    }

    write_kpis_to_stdout(&analysis.kpis)?;

    // The rendering collaborator is out of process: it picks up the spec
    // JSON files and drops one PNG per slug next to them. The report is
    // assembled once every chart has been rendered.
    let renderer = DiskChartRenderer::new(&charts_dir);
    let rendered = specs.iter().filter(|spec| renderer.has_image(spec)).count();

    if rendered == 0 {
        info!("No rendered charts found under {:?}; skipping the PDF report", charts_dir);
        return Ok(());
    }

    let report = ReportEngine::assemble_report(&analysis, &renderer)?;
    fs::write(output_dir.join(REPORT_FILENAME), report)?;

    info!("Report written to {:?}", output_dir.join(REPORT_FILENAME));

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: KPI output goes to stdout, so logging stays on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_kpis_to_stdout(kpis: &KpiSet) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "total_sales,total_taxes,total_net_profit,net_profit_rate")?;
    writeln!(
        output,
        "{},{},{},{}",
        kpis.total_sales,
        kpis.total_taxes,
        kpis.total_net_profit,
        kpis.net_profit_rate
    )?;

    output.flush()?;

    Ok(())
}

/// Realizes the rendering collaborator as a file handoff: the renderer is
/// expected to have written `<slug>.png` for each spec into the charts
/// directory.
struct DiskChartRenderer {
    dir: PathBuf
}

impl DiskChartRenderer {
    fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf()
        }
    }

    fn image_path(&self, spec: &ChartSpec) -> PathBuf {
        self.dir.join(format!("{}.png", spec.slug))
    }

    fn has_image(&self, spec: &ChartSpec) -> bool {
        self.image_path(spec).is_file()
    }
}

impl ChartRenderer for DiskChartRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<Vec<u8>, ChartError> {
        let path = self.image_path(spec);

        if !path.is_file() {
            return Err(ChartError::missing_image(spec));
        }

        fs::read(&path).map_err(|error| ChartError::renderer_failure(spec, error.to_string()))
    }
}
