//! Welcome and connected banners.

use rand::RngExt;
use unicode_width::UnicodeWidthStr;

/// Fallback when the terminal size is unknown or implausibly narrow.
pub const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 40;

const ART: &[&str] = &[
    "  /\\_/\\  \n ( o.o ) \n  > ^ <  ",
    "  /\\_/\\  \n ( -.- ) \n  ( >< ) ",
    "  /\\_/\\  \n ( ^.^ ) \n  (\") (\") ",
    "  /\\_/\\  \n ( ='.'=)\n  (\")_(\") ",
    "(^_^)",
    "(>^_^)>",
    "(^o^)/",
    "(^_~)",
    "(^o^)b",
    "(^_^)v",
];

/// Center every line of `text` within `width` display columns.
pub fn center(text: &str, width: usize) -> String {
    let mut out = String::new();
    for line in text.lines() {
        let pad = width.saturating_sub(line.width()) / 2;
        out.push_str(&" ".repeat(pad));
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Current terminal width in columns, or [`DEFAULT_WIDTH`].
pub fn terminal_width() -> usize {
    usable_width(crossterm::terminal::size().ok().map(|(cols, _)| cols as usize))
}

fn usable_width(columns: Option<usize>) -> usize {
    match columns {
        Some(cols) if cols >= MIN_WIDTH => cols,
        _ => DEFAULT_WIDTH,
    }
}

/// `message` framed with stars, followed by one piece of art picked with
/// `rng`, all centered within `width` columns.
pub fn render<R: RngExt>(rng: &mut R, message: &str, width: usize) -> String {
    let art = ART[rng.random_range(0..ART.len())];
    let mut out = center(&format!("⋆⋅☆⋅⋆ {} ⋆⋅☆⋅⋆", message), width);
    out.push_str(&center(art, width));
    out
}
