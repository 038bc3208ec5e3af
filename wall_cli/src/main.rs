//! # Buttress CLI
//!
//! Terminal front end for the wall design engine.
//!
//! ```text
//! wall_cli [rankine|coulomb|compare] [input.json] [-i] [--bar <#3..#8>]
//! ```
//!
//! Without an input file the built-in example wall is used, with the Coulomb
//! geometry block added for `coulomb` and `compare`. `-i` prompts for the
//! main dimensions first. `--bar` overrides the flexural bar size. Results print as a table followed by JSON.
//! Logging goes to stderr and honours `RUST_LOG`.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use chrono::Local;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wall_core::calculations::{analyze, compare_theories, Theory, TheoryComparison, WallDesign};
use wall_core::materials::rebar::RebarSize;
use wall_core::report::{summary_rows, RowStatus};
use wall_core::wall::{CoulombGeometry, WallInput};
use wall_core::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Design(Theory),
    Compare,
}

struct Args {
    mode: Mode,
    input_path: Option<String>,
    interactive: bool,
    flexural_bar: Option<RebarSize>,
}

fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> CalcResult<Args> {
    let mut args = Args {
        mode: Mode::Design(Theory::Rankine),
        input_path: None,
        interactive: false,
        flexural_bar: None,
    };

    let mut argv = argv.into_iter();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-i" | "--interactive" => args.interactive = true,
            "--bar" => {
                let size = argv
                    .next()
                    .ok_or_else(|| CalcError::missing_field("--bar"))?;
                args.flexural_bar = Some(RebarSize::from_str_flexible(&size)?);
            }
            "compare" => args.mode = Mode::Compare,
            "rankine" | "coulomb" => args.mode = Mode::Design(arg.parse()?),
            path if path.ends_with(".json") => args.input_path = Some(path.to_string()),
            other => {
                return Err(CalcError::invalid_input(
                    "argument",
                    other,
                    "Expected rankine, coulomb, compare, -i, --bar <size> or a .json input file",
                ))
            }
        }
    }
    Ok(args)
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

/// Built-in example wall; the Coulomb block is only attached when a Coulomb run reads it
fn default_input(mode: Mode) -> WallInput {
    let mut input = WallInput::default();
    if matches!(mode, Mode::Design(Theory::Coulomb) | Mode::Compare) {
        input.geometry.coulomb = Some(CoulombGeometry::default());
    }
    input
}

fn load_input(args: &Args) -> CalcResult<WallInput> {
    let mut input = match &args.input_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CalcError::serialization(format!("Cannot read {}: {}", path, e)))?;
            serde_json::from_str::<WallInput>(&text)?
        }
        None => default_input(args.mode),
    };

    if let Some(bar) = args.flexural_bar {
        input.criteria.flexural_bar = bar;
    }

    if args.interactive {
        let g = &mut input.geometry;
        g.stem_height_m = prompt_f64(&format!("Stem height h (m) [{}]: ", g.stem_height_m), g.stem_height_m);
        g.embedment_depth_m = prompt_f64(
            &format!("Embedment depth D (m) [{}]: ", g.embedment_depth_m),
            g.embedment_depth_m,
        );
        let q = input.surcharge.pressure_kg_m2;
        input.surcharge.pressure_kg_m2 = prompt_f64(&format!("Surcharge q (kg/m²) [{}]: ", q), q);
        let phi = input.soil.backfill_friction_deg;
        input.soil.backfill_friction_deg = prompt_f64(&format!("Backfill friction φ (°) [{}]: ", phi), phi);
        println!();
    }

    Ok(input)
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════════════════════");
}

fn status_icon(status: RowStatus) -> String {
    match status.label() {
        "" => String::new(),
        label => format!("[{}]", label),
    }
}

fn print_design(design: &WallDesign) {
    banner(&format!("RETAINING WALL {} - {}", design.label, design.theory));
    println!();
    for row in summary_rows(design) {
        println!(
            "  {:<24} {:>28} {:<7} {}",
            row.label,
            row.value,
            row.unit,
            status_icon(row.status)
        );
    }
    println!();
    if !design.non_conformances.is_empty() {
        println!("Non-conformances:");
        for nc in &design.non_conformances {
            println!("  - {}", nc);
        }
        println!();
    }
    banner(&format!(
        "RESULT: {} (governs: {})",
        if design.passes() { "PASS" } else { "FAIL" },
        design.stability.governing_condition()
    ));
}

fn print_comparison(cmp: &TheoryComparison) {
    banner("RANKINE vs COULOMB");
    println!();
    println!("  Ka:       {:.4} vs {:.4} ({:+.1}%)", cmp.ka_rankine, cmp.ka_coulomb, cmp.ka_diff_pct);
    println!(
        "  Thrust:   {:.2} vs {:.2} t/m ({:+.1}%)",
        cmp.thrust_rankine_t_m, cmp.thrust_coulomb_t_m, cmp.thrust_diff_pct
    );
    if let Some(diff) = cmp.footing_width_diff_pct {
        println!("  Footing:  {:+.1}%", diff);
    }
    println!("  More conservative: {}", cmp.more_conservative);
    println!();
    for note in &cmp.notes {
        println!("  • {}", note);
    }
    println!();
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!();
    println!("JSON Output:");
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

fn run(args: &Args) -> CalcResult<()> {
    let input = load_input(args)?;

    match args.mode {
        Mode::Design(theory) => {
            let design = analyze(&input, theory)?;
            info!(label = %design.label, %theory, passes = design.passes(), "design complete");
            print_design(&design);
            print_json(&design);
        }
        Mode::Compare => {
            let cmp = compare_theories(&input)?;
            info!(label = %input.label, more_conservative = %cmp.more_conservative, "comparison complete");
            print_comparison(&cmp);
            print_json(&cmp);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wall_cli=info,wall_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    println!("Buttress - Cantilever Retaining Wall Design");
    println!("{}", Local::now().format("%Y-%m-%d %H:%M"));
    println!();

    let result = parse_args(std::env::args().skip(1)).and_then(|args| run(&args));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> CalcResult<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_bar_option_sets_flexural_bar() {
        let parsed = args(&["rankine", "--bar", "6"]).unwrap();
        assert_eq!(parsed.flexural_bar, Some(RebarSize::No6));
        let input = load_input(&parsed).unwrap();
        assert_eq!(input.criteria.flexural_bar, RebarSize::No6);
    }

    #[test]
    fn test_bar_option_requires_value() {
        assert!(args(&["--bar"]).is_err());
        assert!(args(&["--bar", "#11"]).is_err());
    }

    #[test]
    fn test_rankine_default_runs_for_tall_stem() {
        let parsed = args(&["rankine"]).unwrap();
        let mut input = load_input(&parsed).unwrap();
        assert!(input.geometry.coulomb.is_none());
        input.geometry.stem_height_m = 5.0;
        assert!(analyze(&input, Theory::Rankine).is_ok());
    }

    #[test]
    fn test_coulomb_modes_attach_geometry() {
        assert!(default_input(Mode::Compare).geometry.coulomb.is_some());
        assert!(default_input(Mode::Design(Theory::Coulomb)).geometry.coulomb.is_some());
    }

    #[test]
    fn test_status_icon_wraps_label() {
        assert_eq!(status_icon(RowStatus::Pass), "[OK]");
        assert_eq!(status_icon(RowStatus::Fail), "[FAIL]");
        assert_eq!(status_icon(RowStatus::Info), "");
    }
}
