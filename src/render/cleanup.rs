//! Line-level cleanup for rendered markup.
//!
//! The deduplication heuristic corrects a known artifact where mirrored
//! text-box representations duplicate a paragraph's visible content. It is
//! a pure function over one rendered line, deliberately decoupled from the
//! document traversal.

/// Collapse duplicated content within a single rendered line.
///
/// The line is split into whitespace-separated tokens; runs of immediately
/// repeated identical tokens collapse to one occurrence, and a line whose
/// token sequence is two identical halves keeps only the first half.
/// Idempotent: applying it twice yields the same text.
pub fn dedup_repeat_line(line: &str) -> String {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return line.to_string();
    }

    let mut collapsed: Vec<&str> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if collapsed.last() != Some(&token) {
            collapsed.push(token);
        }
    }

    let half = collapsed.len() / 2;
    if collapsed.len() % 2 == 0 && collapsed[..half] == collapsed[half..] {
        collapsed.truncate(half);
    }

    collapsed.join(" ")
}

/// Final normalization over the assembled line sequence.
///
/// Trailing whitespace is stripped from every line, runs of three or more
/// consecutive blank lines collapse to two, trailing blank lines are
/// dropped, and the result ends with exactly one newline.
pub fn normalize_lines(lines: &[String]) -> String {
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut blank_run = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            blank_run += 1;
        } else {
            blank_run = 0;
        }
        if blank_run <= 2 {
            kept.push(line.trim_end());
        }
    }

    let mut out = kept.join("\n").trim_end().to_string();
    out.push('\n');
    out
}
