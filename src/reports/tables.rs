use super::progress_bar;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyanneal::corpus::{CharFrequencies, Quartad};
use keyanneal::geometry::Symbol;
use keyanneal::scorer::{Hotspot, PenaltyResult, PenaltyRule};

pub fn breakdown(result: &PenaltyResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Rule").add_attribute(Attribute::Bold),
        Cell::new("Weight"),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Share"),
        Cell::new(""),
    ]);
    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let magnitude: f64 = result.rules.iter().map(|r| r.total.abs()).sum();
    for r in &result.rules {
        let share = if magnitude > 0.0 {
            r.total.abs() / magnitude
        } else {
            0.0
        };
        let color = if r.total < 0.0 {
            Color::Green
        } else if r.weight == 0.0 {
            Color::DarkGrey
        } else {
            Color::Reset
        };
        table.add_row(vec![
            Cell::new(r.rule.to_string()).fg(color),
            Cell::new(format!("{:.2}", r.weight)),
            Cell::new(format!("{:.2}", r.total)),
            Cell::new(format!("{:.1}%", share * 100.0)),
            Cell::new(progress_bar(share, 20)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(format!("{:.2}", result.total)).add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
    ]);
    table
}

pub fn hotspots(rule: PenaltyRule, spots: &[Hotspot]) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new(rule.to_string()).add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Cost"),
    ]);
    for s in spots {
        table.add_row(vec![
            Cell::new(s.quartad.to_string()),
            Cell::new(s.count),
            Cell::new(format!("{:.2}", s.cost)),
        ]);
    }
    table
}

pub fn quartads(top: &[(Quartad, u64)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Quartad", "Shifted", "Count"]);
    for (rank, (q, count)) in top.iter().enumerate() {
        let shifted = q.modifiers().iter().filter(|m| m.is_some()).count();
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(q.to_string()),
            Cell::new(shifted),
            Cell::new(count),
        ]);
    }
    table
}

pub fn frequencies(freqs: &CharFrequencies) -> Table {
    let mut ranked: Vec<(char, u64)> = freqs.iter().map(|(c, n)| (*c, *n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Char", "Count"]);
    for (c, n) in ranked {
        table.add_row(vec![
            Cell::new(Symbol::Char(c).display_char()),
            Cell::new(n),
        ]);
    }
    table
}
