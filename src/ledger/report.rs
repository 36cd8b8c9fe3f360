//! Plain-text brick requirements for one image

use crate::ledger::histogram::ColorCounts;

/// Report listing the bricks needed per color, skipping unused colors
pub fn brick_report(counts: &ColorCounts) -> String {
    let mut report = String::from("Here is what you need:\n\n");
    for (code, count) in counts.present() {
        report.push_str(&format!("Color {code}: {count} bricks\n"));
    }
    report
}
