//! Greedy single-pass line wrapping.
//!
//! Words are packed onto a line until the measured candidate would exceed the max
//! width; the line is then committed and the word starts the next one. A word that
//! is wider than the max width on its own is placed alone, unsplit. No attempt is
//! made to balance line lengths.

/// Wraps `text` into lines no wider than `max_width` as measured by `measure`.
///
/// Whitespace runs (including newlines) collapse to single spaces. Empty or
/// whitespace-only text yields no lines.
pub fn wrap_lines<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Baseline of the last line of a block whose first baseline is `first_baseline`.
pub fn last_baseline(first_baseline: f32, line_count: usize, line_height: f32) -> f32 {
    first_baseline + line_count.saturating_sub(1) as f32 * line_height
}
