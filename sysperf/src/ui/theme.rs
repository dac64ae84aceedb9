//! Shared UI theme constants.

use ratatui::style::{Color, Modifier, Style};

pub const RAM_LINE: Color = Color::Rgb(255, 165, 0);
pub const UPLOAD: Color = Color::Red;
pub const DOWNLOAD: Color = Color::Blue;
pub const AXIS: Color = Color::Gray;

pub fn title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Continuous purple-to-red scale over a percentage, normalized on [0,100].
/// Out-of-range inputs saturate at the ends.
pub fn rainbow(pct: f64) -> Color {
    let x = if pct.is_nan() { 0.0 } else { (pct / 100.0).clamp(0.0, 1.0) };
    let r = (2.0 * x - 0.5).abs().min(1.0);
    let g = (std::f64::consts::PI * x).sin();
    let b = (std::f64::consts::FRAC_PI_2 * x).cos();
    let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(to_u8(r), to_u8(g), to_u8(b))
}
