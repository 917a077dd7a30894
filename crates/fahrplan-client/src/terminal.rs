//! Terminal detection.

use std::io::IsTerminal;

/// Width used when stdout is not a terminal.
pub const FALLBACK_WIDTH: usize = 80;

/// Output width for the current stdout.
///
/// One column less than the terminal so a full-width line does not wrap.
pub fn terminal_width() -> usize {
    if !std::io::stdout().is_terminal() {
        return FALLBACK_WIDTH;
    }
    crossterm::terminal::size()
        .map(|(columns, _)| usize::from(columns).saturating_sub(1).max(1))
        .unwrap_or(FALLBACK_WIDTH)
}

/// Whether stdout is an interactive terminal.
pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// The explicit width if one was given, otherwise the terminal's.
pub fn resolve_width(flag: Option<usize>, configured: Option<usize>) -> usize {
    flag.or(configured).unwrap_or_else(terminal_width)
}
