use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use keyanneal::geometry::{slot_glyph, Hand, KeyInfo, Layout};

fn key_label(info: &KeyInfo) -> String {
    let lower = slot_glyph(info.key.unshifted);
    let upper = slot_glyph(info.key.shifted);
    if info.key.unshifted == info.key.shifted {
        lower.to_string()
    } else {
        format!("{} {}", lower, upper)
    }
}

/// Both hands side by side, one table row per key row.
pub fn render(layout: &Layout, cell: impl Fn(&KeyInfo) -> String) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let left = layout.hand_rows(Hand::Left);
    let right = layout.hand_rows(Hand::Right);
    let left_width = left.iter().map(Vec::len).max().unwrap_or(0);
    let rows = left.len().max(right.len());

    for r in 0..rows {
        let mut cells: Vec<Cell> = Vec::new();
        let left_row = left.get(r).map(Vec::as_slice).unwrap_or(&[]);
        for c in 0..left_width {
            let text = left_row.get(c).map(|k| cell(*k)).unwrap_or_default();
            cells.push(Cell::new(text).set_alignment(CellAlignment::Center));
        }
        cells.push(Cell::new("|").set_alignment(CellAlignment::Center));
        if let Some(right_row) = right.get(r) {
            for k in right_row {
                cells.push(Cell::new(cell(*k)).set_alignment(CellAlignment::Center));
            }
        }
        table.add_row(cells);
    }
    table
}

pub fn print_layout(name: &str, layout: &Layout) {
    println!("\nLayout: {}", name);
    println!("{}", render(layout, key_label));
}

pub fn print_cost_grid(layout: &Layout) {
    println!("\nKey costs:");
    println!("{}", render(layout, |k| format!("{:.2}", k.cost)));
}
