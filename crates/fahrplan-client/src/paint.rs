//! Terminal styling applied to finished output lines.
//!
//! Layout is done on plain text so widths stay exact; styling only wraps
//! runs of characters in escape codes afterwards. Borders are dimmed, time
//! labels in the gutter are bold and selection markers are highlighted.

use crossterm::style::Stylize;
use fahrplan_core::Glyphs;
use fahrplan_core::timetable::GUTTER_WIDTH;

/// Which renderer produced the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Rows with a time-label gutter.
    Timetable,
    /// Bordered event boxes; there is no gutter.
    Boxes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Plain,
    Border,
    Label,
    Marker,
}

/// Classifies every char of a rendered line.
fn classify(chars: &[char], view: View, glyphs: &Glyphs) -> Vec<Class> {
    let has_gutter =
        view == View::Timetable && chars.get(GUTTER_WIDTH) == Some(&glyphs.vertical);
    let gutter = if has_gutter {
        GUTTER_WIDTH
    } else {
        0
    };
    // separators, box edges and continuation rows
    let rule = chars[gutter..]
        .iter()
        .all(|&c| c == ' ' || glyphs.is_border(c));
    let marker = glyphs.selected.chars().next();

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if i < gutter {
                if c == ' ' { Class::Plain } else { Class::Label }
            } else if (rule && glyphs.is_border(c)) || c == glyphs.vertical {
                Class::Border
            } else if Some(c) == marker
                && i > 0
                && chars[i - 1] == glyphs.vertical
                && chars.get(i + 1) == Some(&' ')
            {
                Class::Marker
            } else {
                Class::Plain
            }
        })
        .collect()
}

fn paint_line(line: &str, view: View, glyphs: &Glyphs) -> String {
    let chars: Vec<char> = line.chars().collect();
    let classes = classify(&chars, view, glyphs);

    let mut out = String::with_capacity(line.len() * 2);
    let mut start = 0;
    while start < chars.len() {
        let class = classes[start];
        let end = classes[start..]
            .iter()
            .position(|&c| c != class)
            .map_or(chars.len(), |n| start + n);
        let run: String = chars[start..end].iter().collect();
        match class {
            Class::Plain => out.push_str(&run),
            Class::Border => out.push_str(&run.dim().to_string()),
            Class::Label => out.push_str(&run.bold().to_string()),
            Class::Marker => out.push_str(&run.yellow().reverse().to_string()),
        }
        start = end;
    }
    out
}

/// Styles output lines, or returns them untouched when color is off.
pub fn paint(lines: Vec<String>, view: View, glyphs: &Glyphs, color: bool) -> Vec<String> {
    if !color {
        return lines;
    }
    lines.iter().map(|line| paint_line(line, view, glyphs)).collect()
}
