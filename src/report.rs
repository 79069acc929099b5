//! Console report of a backstripping run.

use colored::Colorize;
use std::fmt::Write;

use crate::subsidence::SubsidenceResult;

const HEADER: &str = "📊 === BACKSTRIPPING REPORT ===";
const FOOTER: &str = "📊 === END REPORT ===";

fn table_row(age: f64, layers: usize, column: f64, subsidence: f64) -> String {
    format!(
        "  {:>8.1} | {:>6} | {:>10.2} | {:>10.2}",
        age, layers, column, subsidence
    )
}

/// Plain-text table of the result, most recent event first.
pub fn format_report(result: &SubsidenceResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", HEADER);
    let _ = writeln!(out, "🔄 Deposition events: {}", result.len());
    let _ = writeln!(
        out,
        "  {:>8} | {:>6} | {:>10} | {:>10}",
        "age", "layers", "column m", "subsid. m"
    );
    for (i, (age, subsidence)) in result.ages.iter().zip(&result.subsidence).enumerate() {
        let layers = result.thickness_evolution.get(i).map_or(0, |t| t.len());
        let column = result.total_thickness(i).unwrap_or(0.0);
        let _ = writeln!(out, "{}", table_row(*age, layers, column, *subsidence));
    }
    if let Some(deepest) = result.subsidence.iter().copied().reduce(f64::max) {
        let _ = writeln!(out, "⬇️  Maximum tectonic subsidence: {:.2} m", deepest);
    }
    let _ = write!(out, "{}", FOOTER);
    out
}

/// Print the report to stdout with highlighted headings.
pub fn print_report(result: &SubsidenceResult) {
    for line in format_report(result).lines() {
        if line == HEADER || line == FOOTER {
            println!("{}", line.bold().cyan());
        } else if line.starts_with("⬇️") {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}
