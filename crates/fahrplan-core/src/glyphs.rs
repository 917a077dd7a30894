//! Border glyph tables.
//!
//! Rendering code asks for a glyph by role; the concrete character set is
//! chosen once per render call from [`Charset`].

use serde::{Deserialize, Serialize};

/// The drawing character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    /// Plain ASCII approximations (`|`, `-`, `+`).
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Glyphs for every drawing role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub horizontal: char,
    pub vertical: char,
    pub cross: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    /// Fill for cells and separators an event continues through.
    pub continuation: char,
    /// Truncation marker appended to cut text.
    pub ellipsis: &'static str,
    /// Prefix for events in the user's selection.
    pub selected: &'static str,
}

static ASCII: Glyphs = Glyphs {
    horizontal: '-',
    vertical: '|',
    cross: '+',
    top_left: '+',
    top_right: '+',
    bottom_left: '+',
    bottom_right: '+',
    continuation: '~',
    ellipsis: "...",
    selected: "*",
};

static UNICODE: Glyphs = Glyphs {
    horizontal: '\u{2500}',
    vertical: '\u{2502}',
    cross: '\u{253C}',
    top_left: '\u{250C}',
    top_right: '\u{2510}',
    bottom_left: '\u{2514}',
    bottom_right: '\u{2518}',
    continuation: '\u{254C}',
    ellipsis: "\u{2026}",
    selected: "\u{2022}",
};

impl Glyphs {
    /// Returns the glyph table for a character set.
    pub fn for_charset(charset: Charset) -> &'static Glyphs {
        match charset {
            Charset::Ascii => &ASCII,
            Charset::Unicode => &UNICODE,
        }
    }

    /// A run of horizontal glyphs.
    pub fn rule(&self, width: usize) -> String {
        self.horizontal.to_string().repeat(width)
    }

    /// A run of continuation glyphs.
    pub fn continued(&self, width: usize) -> String {
        self.continuation.to_string().repeat(width)
    }

    /// Returns true if `c` is any border glyph of this set.
    pub fn is_border(&self, c: char) -> bool {
        [
            self.horizontal,
            self.vertical,
            self.cross,
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
            self.continuation,
        ]
        .contains(&c)
    }
}
