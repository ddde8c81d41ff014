//! Text heuristics and normalization.

/// Token written in place of every line break.
pub const LINE_BREAK_TOKEN: &str = "\\n";

/// Separators that count as line breaks besides `\r` and `\n`.
const LINE_SEPARATORS: [char; 5] = ['\u{2028}', '\u{2029}', '\u{1e}', '\u{1f}', '\u{85}'];

/// Returns true if `ch` is in the printable set: ASCII digits, letters,
/// punctuation and the whitespace characters ` \t\n\r\x0b\x0c`.
#[must_use]
pub fn is_printable(ch: char) -> bool {
    ch.is_ascii_graphic() || matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Returns the fraction of printable characters in `text`.
///
/// An empty text has a ratio of `1.0`.
#[must_use]
pub fn printable_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut printable = 0usize;
    for ch in text.chars() {
        total += 1;
        if is_printable(ch) {
            printable += 1;
        }
    }
    if total == 0 {
        return 1.0;
    }
    printable as f64 / total as f64
}

/// Returns true if `sample` looks like binary data.
#[must_use]
pub fn is_binary(sample: &str, min_printable_ratio: f64) -> bool {
    !sample.is_empty() && printable_ratio(sample) < min_printable_ratio
}

/// Normalizes a text field for output.
///
/// Line breaks of every flavor become [`LINE_BREAK_TOKEN`], characters
/// outside the printable set are dropped, lone quotes are doubled, tabs
/// become four spaces and the result is trimmed. Applying it twice gives
/// the same result as applying it once.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let printable: String = text
        .chars()
        .filter_map(|ch| {
            if LINE_SEPARATORS.contains(&ch) {
                Some('\n')
            } else {
                is_printable(ch).then_some(ch)
            }
        })
        .collect();

    let mut out = String::with_capacity(printable.len());
    let mut chars = printable.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str(LINE_BREAK_TOKEN);
            }
            '\n' => out.push_str(LINE_BREAK_TOKEN),
            '\t' => out.push_str("    "),
            _ => out.push(ch),
        }
    }

    escape_quotes(&out).trim().to_string()
}

/// Doubles every odd-length run of `"` so that each run has even length.
fn escape_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '"' {
            run += 1;
            out.push(ch);
            continue;
        }
        if run % 2 == 1 {
            out.push('"');
        }
        run = 0;
        out.push(ch);
    }
    if run % 2 == 1 {
        out.push('"');
    }
    out
}
