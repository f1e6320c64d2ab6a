use crossterm::style::Color;

/// Helper function to extract ANSI color code from crossterm Color enum.
/// Provides a fallback value for non-ANSI colors.
pub fn get_ansi_code(color: Color, fallback: u8) -> u8 {
    match color {
        Color::AnsiValue(val) => val,
        _ => fallback,
    }
}

/// Counts visible characters, skipping ANSI color sequences.
pub fn count_visible_chars(text: &str) -> usize {
    let mut visible_len = 0;
    let mut in_ansi = false;
    for c in text.chars() {
        if c == '\x1b' {
            in_ansi = true;
        } else if in_ansi && c == 'm' {
            in_ansi = false;
        } else if !in_ansi {
            visible_len += 1;
        }
    }
    visible_len
}

/// Truncates a name to `max_length` characters, cutting at the last space when one is close.
pub fn truncate_name(name: &str, max_length: usize) -> String {
    if name.chars().count() <= max_length {
        return name.to_string();
    }

    let cut: String = name.chars().take(max_length).collect();
    match cut.rfind(' ') {
        Some(pos) if pos >= max_length / 2 => cut[..pos].to_string(),
        _ => cut,
    }
}
