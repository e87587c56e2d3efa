use crossterm::style::Color;
use crossterm::terminal;

pub fn hex_to_rgb(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        Color::Rgb { r, g, b }
    } else {
        Color::White
    }
}

/// Configured width, else the terminal's, never below 40 columns.
pub fn wrap_width(configured: Option<usize>) -> usize {
    configured
        .unwrap_or_else(|| terminal::size().map(|(w, _)| w as usize).unwrap_or(80))
        .max(40)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_to_rgb("#ff0000"), Color::Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hex_to_rgb("d3d3d3"), Color::Rgb { r: 211, g: 211, b: 211 });
        assert_eq!(hex_to_rgb("#fff"), Color::White);
    }

    #[test]
    fn configured_width_wins() {
        assert_eq!(wrap_width(Some(100)), 100);
        assert_eq!(wrap_width(Some(10)), 40);
    }
}
