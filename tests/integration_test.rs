use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::Result;

const CHART_SLUGS: [&str; 3] = ["monthly_sales", "product_sales", "customer_sales"];

fn run_engine(output_dir: &Path) -> Result<std::process::Output> {
    let binary_path = env!("CARGO_BIN_EXE_sales-report-engine");
    let sample_path = Path::new("samples").join("sample.csv");

    Ok(Command::new(binary_path)
        .arg(sample_path)
        .arg(output_dir)
        .output()?)
}

#[test]
fn test_cli_exports_workbook_specs_and_kpis() -> Result<()> {
    let output_dir = tempfile::tempdir()?;

    let output = run_engine(output_dir.path())?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("total_sales,total_taxes,total_net_profit,net_profit_rate"));
    assert_eq!(lines.next(), Some("130.0,6.5,51.5,39.6"));

    let workbook = fs::read(output_dir.path().join("Extracted Data.xlsx"))?;
    assert!(workbook.starts_with(b"PK"));

    let derived = fs::read(output_dir.path().join("Derived Data.xlsx"))?;
    assert!(derived.starts_with(b"PK"));

    for slug in CHART_SLUGS {
        let spec_path = output_dir.path().join("charts").join(format!("{slug}.json"));
        let spec: serde_json::Value = serde_json::from_slice(&fs::read(&spec_path)?)?;

        assert_eq!(spec.get("slug").and_then(|value| value.as_str()), Some(slug));
        assert!(spec.get("series").and_then(|value| value.as_array()).is_some_and(|series| series.len() == 2));
    }

    // Without rendered charts the report request is never made.
    assert!(!output_dir.path().join("Sales Report.pdf").exists());

    Ok(())
}

#[test]
fn test_cli_assembles_the_report_once_charts_are_rendered() -> Result<()> {
    let output_dir = tempfile::tempdir()?;
    let charts_dir = output_dir.path().join("charts");
    fs::create_dir_all(&charts_dir)?;

    // Stand in for the rendering collaborator: one PNG per chart slug.
    let stub_png = fs::read(Path::new("samples").join("chart_stub.png"))?;
    for slug in CHART_SLUGS {
        fs::write(charts_dir.join(format!("{slug}.png")), &stub_png)?;
    }

    let output = run_engine(output_dir.path())?;

    assert!(output.status.success());

    let report = fs::read(output_dir.path().join("Sales Report.pdf"))?;

    assert!(report.starts_with(b"%PDF"));

    Ok(())
}

#[test]
fn test_cli_fails_when_the_rendered_chart_set_is_incomplete() -> Result<()> {
    let output_dir = tempfile::tempdir()?;
    let charts_dir = output_dir.path().join("charts");
    fs::create_dir_all(&charts_dir)?;

    let stub_png = fs::read(Path::new("samples").join("chart_stub.png"))?;
    fs::write(charts_dir.join("monthly_sales.png"), &stub_png)?;

    let output = run_engine(output_dir.path())?;

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("No rendered image"), "unexpected stderr: {stderr}");

    // A partial chart set must never produce a partial report.
    assert!(!output_dir.path().join("Sales Report.pdf").exists());

    Ok(())
}

#[test]
fn test_cli_rejects_a_malformed_snapshot() -> Result<()> {
    let input = tempfile::NamedTempFile::new()?;
    fs::write(
        input.path(),
        "sale_date,customer_name,product_name,product_quantity,product_unit_buy_price,product_unit_sale_price\n\
         2024-01-05,Alice,Widget,two,3.00,5.00\n"
    )?;

    let output_dir = tempfile::tempdir()?;
    let binary_path = env!("CARGO_BIN_EXE_sales-report-engine");

    let output = Command::new(binary_path)
        .arg(input.path())
        .arg(output_dir.path())
        .output()?;

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("line [2]"), "unexpected stderr: {stderr}");

    // A schema failure aborts the run before any artifact is written.
    assert!(!output_dir.path().join("Extracted Data.xlsx").exists());

    Ok(())
}
