//! Tests for the console summary

use super::*;
use crate::report::render_summary;

#[test]
fn test_summary_lists_both_days() {
    let text = render_summary("Overath", "25.06.2025", &june_25(), &june_24());

    assert!(text.contains("Statistik für Overath 25.06.2025"));
    assert!(text.contains("29.2 °C"));
    assert!(text.contains("(22.4 °C)"));
    assert!(text.contains("(10.7 °C)"));
    assert!(text.contains("14 h"));
    assert!(text.contains("(15 h)"));
    assert_eq!(text.lines().count(), 5);
}
