/// Backstrip the sample ten-layer column (or a column read from a JSON file
/// given as the first argument) and print the subsidence history.
///
///     cargo run --example backstrip_sample [column.json]

use backstrip_rust::column_input::ColumnInput;
use backstrip_rust::horizons::horizon_depths;
use backstrip_rust::report::print_report;
use backstrip_rust::subsidence::{SolverSettings, SubsidenceSolver};
use colored::Colorize;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = match std::env::args().nth(1) {
        Some(path) => {
            println!("📂 Loading column from {}", path);
            ColumnInput::from_json_file(path)?
        }
        None => ColumnInput::sample(),
    };

    let sequence = input.prepare_sequence()?;
    let solver = SubsidenceSolver::with_settings(SolverSettings {
        constants: input.constants,
        debug: true,
        ..SolverSettings::default()
    });
    let result = solver.compute_subsidence(&sequence)?;

    println!();
    print_report(&result);

    println!("\n{}", "🧭 Horizon depths (oldest first)".bold());
    for slice in horizon_depths(&input, &result)? {
        let depths: Vec<String> = slice.depths.iter().map(|d| format!("{:.0}", d)).collect();
        println!("  {:>6.1} Ma | {}", slice.age, depths.join(" "));
    }

    Ok(())
}
