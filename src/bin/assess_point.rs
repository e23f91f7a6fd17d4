// Assess a single set of susceptibility levels from the command line
//
// Usage: assess_point <flood> <landslide> <liquefaction> [--format json|markdown|html]
// Levels: LS, MS, HS, VHS, DF or NONE. RISK_TABLES overrides the scoring tables.

use anyhow::{bail, Context};
use hazard_risk_engine::formatters::{HtmlFormatter, JsonFormatter, MarkdownFormatter, OutputFormat};
use hazard_risk_engine::{RiskAggregator, RiskTables, SusceptibilityLevel};
use std::path::Path;

fn parse_level(arg: &str) -> anyhow::Result<SusceptibilityLevel> {
    if arg.eq_ignore_ascii_case("none") {
        return Ok(SusceptibilityLevel::NoData);
    }
    SusceptibilityLevel::from_code(arg)
        .with_context(|| format!("Unknown susceptibility level '{}'", arg))
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut levels = Vec::with_capacity(3);
    let mut format = OutputFormat::Json;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--format" {
            let value = iter.next().context("--format requires a value")?;
            format = value.parse().map_err(anyhow::Error::msg)?;
        } else {
            levels.push(parse_level(arg)?);
        }
    }

    if levels.len() != 3 {
        bail!("Usage: assess_point <flood> <landslide> <liquefaction> [--format json|markdown|html]");
    }

    let tables = match std::env::var("RISK_TABLES") {
        Ok(path) => RiskTables::load(Path::new(&path))?,
        Err(_) => RiskTables::default(),
    };

    let assessment = RiskAggregator::new(tables).assess(levels[0], levels[1], levels[2]);

    let output = match format {
        OutputFormat::Json => JsonFormatter::format(&assessment)?,
        OutputFormat::Markdown => MarkdownFormatter::format(&assessment),
        OutputFormat::Html => HtmlFormatter::format(&assessment),
    };
    println!("{}", output);

    Ok(())
}
