pub mod grid;
pub mod tables;

pub use self::grid::{print_cost_grid, print_layout};

use keyanneal::corpus::{CharFrequencies, Quartad};
use keyanneal::scorer::{Hotspot, PenaltyResult, PenaltyRule};
use keyanneal::KaResult;
use std::path::Path;

/// Fixed-width bar, `fraction` clamped to `0..=1`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn print_breakdown(result: &PenaltyResult) {
    println!("\n{}", tables::breakdown(result));
}

pub fn print_hotspots(rule: PenaltyRule, spots: &[Hotspot]) {
    println!("\n{}", tables::hotspots(rule, spots));
}

pub fn print_quartads(top: &[(Quartad, u64)]) {
    println!("\nTop {} quartads:", top.len());
    println!("{}", tables::quartads(top));
}

pub fn print_frequencies(freqs: &CharFrequencies) {
    println!("\nCharacter frequencies:");
    println!("{}", tables::frequencies(freqs));
}

pub fn write_breakdown_csv<P: AsRef<Path>>(path: P, result: &PenaltyResult) -> KaResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["rule", "weight", "total"])?;
    for r in &result.rules {
        writer.write_record([
            r.rule.to_string(),
            format!("{}", r.weight),
            format!("{}", r.total),
        ])?;
    }
    writer.write_record(["TOTAL".to_string(), String::new(), format!("{}", result.total)])?;
    writer
        .flush()
        .map_err(|e| keyanneal::KeyAnnealError::io(path.as_ref(), e))?;
    Ok(())
}
