//! Small UI helpers.

pub fn human(b: u64) -> String {
    const K: f64 = 1024.0;
    let b = b as f64;
    if b < K { return format!("{b:.0}B"); }
    let kb = b / K;
    if kb < K { return format!("{kb:.1}KB"); }
    let mb = kb / K;
    if mb < K { return format!("{mb:.1}MB"); }
    let gb = mb / K;
    if gb < K { return format!("{gb:.1}GB"); }
    let tb = gb / K;
    format!("{tb:.2}TB")
}

/// Drop the label prefix when a bar is too narrow for the full text.
pub fn fit_label(label: &str, width: usize) -> &str {
    if label.chars().count() <= width {
        label
    } else {
        label.rsplit(' ').next().unwrap_or(label)
    }
}
