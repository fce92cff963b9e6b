use rust_decimal::Decimal;

/// Format an amount with thousand separators and 2 decimal places, no
/// currency symbol. e.g. `1234567.89` → `"1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let formatted = format!("{:.2}", val.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if val < Decimal::ZERO {
        format!("-{grouped}.{dec_part}")
    } else {
        format!("{grouped}.{dec_part}")
    }
}

/// Truncate to `max` visible characters, ending with "…" when cut.
/// Counts chars, not bytes, so multi-byte text stays intact.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Text meter for a 0.0-1.0 ratio, e.g. `[████░░░░░░]`.
pub(crate) fn meter(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(width - filled)
    )
}

/// Move a list cursor down one row, keeping it inside the visible page.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page.max(1) {
            *scroll = index.saturating_sub(page.max(1) - 1);
        }
    }
}

/// Move a list cursor up one row, keeping it inside the visible page.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}
