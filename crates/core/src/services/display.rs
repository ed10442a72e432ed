/// Dashboard colour for a sub-score, banded on its integer part.
///
/// Anything whose integer part falls outside `0..=10`, NaN included, is grey.
pub fn score_color(score: f64) -> &'static str {
    let band = score.floor();
    if !(0.0..=10.0).contains(&band) {
        return "#cccccc";
    }
    match band as u8 {
        0..=2 => "#ff6b6b",
        3..=4 => "#ff8c00",
        5..=6 => "#ffd700",
        7..=8 => "#a8dd00",
        _ => "#00AF4D",
    }
}

/// Compact dollar amount: `$950`, `$12.5K`, `$1.2M`.
pub fn format_amount(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        format!("${amount}")
    }
}
