use once_cell::sync::Lazy;
use regex::Regex;

use crate::preprocess::split_sentences;

const BULLET: &str = "\u{2022}";
const MAX_BULLETS: usize = 8;
const MIN_MODEL_BULLETS: usize = 3;

static BULLET_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\u{2022}\-*\u{00B7}]\s*").expect("static regex compile"));

/// Reshapes a model reply into `•`-prefixed lines.
///
/// Replies that already carry at least three bulleted lines keep their split;
/// anything else is broken into sentences, pairing them up when there are more
/// than eight so the list stays short.
#[must_use]
pub fn format_as_bullets(summary: &str) -> String {
    let lines: Vec<&str> = summary
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.iter().any(|l| BULLET_MARKER_RE.is_match(l)) {
        let bullets: Vec<String> = lines
            .iter()
            .map(|l| BULLET_MARKER_RE.replace(l, "").trim().to_string())
            .filter(|l| !l.is_empty())
            .map(|l| format!("{BULLET} {l}"))
            .collect();
        if bullets.len() >= MIN_MODEL_BULLETS {
            return bullets.join("\n");
        }
    }

    bullets_from_sentences(summary)
}

fn bullets_from_sentences(text: &str) -> String {
    let flattened = text
        .lines()
        .map(|l| BULLET_MARKER_RE.replace(l.trim(), "").into_owned())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let sentences = split_sentences(&flattened);

    let mut bullets = Vec::new();
    if sentences.len() > MAX_BULLETS {
        let mut i = 0;
        while i < sentences.len() && bullets.len() < MAX_BULLETS {
            if i + 1 < sentences.len() && bullets.len() < MAX_BULLETS - 1 {
                bullets.push(format!("{BULLET} {} {}", sentences[i], sentences[i + 1]));
                i += 2;
            } else {
                // last slot takes whatever is left
                bullets.push(format!("{BULLET} {}", sentences[i..].join(" ")));
                break;
            }
        }
    } else {
        bullets.extend(sentences.iter().map(|s| format!("{BULLET} {s}")));
    }

    bullets.join("\n")
}
