use crossterm::style::Color;

// Teletext palette
pub fn header_bg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn header_fg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn title_bg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn subheader_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn text_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn price_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
pub fn price_label_fg() -> Color {
    Color::AnsiValue(226)
} // Bright yellow
pub fn live_fg() -> Color {
    Color::AnsiValue(196)
} // Bright red
pub fn error_fg() -> Color {
    Color::AnsiValue(196)
} // Bright red
pub fn hint_fg() -> Color {
    Color::AnsiValue(250)
} // Light grey
