//! Sentence boundary detection.
//!
//! A terminator (`.`, `!`, `?`) closes a sentence only when it is followed by
//! whitespace or the end of the text, optionally after closing quotes or
//! brackets. Periods get extra scrutiny: titles such as `Dr.` and name initials
//! never close a sentence, short forms such as `No.` do not when a number
//! follows, and a period followed by a lowercase word never does. Decimals (`3.14`) and the inner dots of
//! initialisms (`U.S.A.`) are never followed by whitespace, so they never split.

/// Titles and short forms whose trailing period is never a sentence end.
const TITLE_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "ft", "rev", "hon", "gen", "col",
    "lt", "sgt", "capt", "cmdr", "gov", "sen", "pres", "supt", "vs", "e.g", "i.e", "cf", "viz",
    "approx", "dept",
];

/// Short forms that are also everyday words. Their period only stays inside the
/// sentence when a number follows (`No. 5`, `Mar. 3`, `Fig. 2`).
const NUMBERED_ABBREVIATIONS: &[&str] = &[
    "no", "nos", "vol", "vols", "fig", "figs", "pp", "p", "ed", "eds", "est", "rep", "apt", "v",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

const TERMINATORS: &[char] = &['.', '!', '?'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}', '\u{00BB}'];
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '\u{201C}', '\u{2018}', '\u{00AB}'];

/// Splits `text` into trimmed, non-empty sentences.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (_, c) = chars[i];
        if !TERMINATORS.contains(&c) {
            i += 1;
            continue;
        }

        let run_start = i;
        let mut j = i;
        while j < chars.len() && TERMINATORS.contains(&chars[j].1) {
            j += 1;
        }
        let run_is_single_period = j - run_start == 1 && c == '.';

        while j < chars.len() && CLOSERS.contains(&chars[j].1) {
            j += 1;
        }

        let at_end = j == chars.len();
        let followed_by_space = !at_end && chars[j].1.is_whitespace();
        if !(at_end || followed_by_space) {
            i = j;
            continue;
        }

        let end = if at_end { text.len() } else { chars[j].0 };
        let is_boundary = at_end
            || !run_is_single_period
            || period_ends_sentence(&text[start..chars[run_start].0], &text[end..]);

        if is_boundary {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
        i = j;
    }

    if start < text.len() {
        push_trimmed(&mut sentences, &text[start..]);
    }

    sentences
}

/// Number of sentences in `text`.
#[must_use]
pub fn count_sentences(text: &str) -> usize {
    split_sentences(text).len()
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, segment: &'a str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

/// Decides whether a lone period closes the sentence. `before` is the text of the
/// current sentence up to the period, `after` everything following it.
fn period_ends_sentence(before: &str, after: &str) -> bool {
    let mut tokens = before.split_whitespace().rev();
    let token = tokens.next().unwrap_or("").trim_start_matches(OPENERS);
    let previous = tokens.next().map(|t| t.trim_start_matches(OPENERS));
    let next_word = after.trim_start().trim_start_matches(OPENERS);
    let next = next_word.chars().next();

    let lowered = token.to_lowercase();
    if TITLE_ABBREVIATIONS.contains(&lowered.as_str()) {
        return false;
    }
    if NUMBERED_ABBREVIATIONS.contains(&lowered.as_str())
        && next.is_some_and(|c| c.is_ascii_digit())
    {
        return false;
    }
    if is_initial(token, previous, next_word) {
        return false;
    }

    match next {
        Some(next) => !next.is_lowercase(),
        None => true,
    }
}

/// A single capital letter is a name initial when it opens the sentence, follows a
/// capitalized word (`John F. Kennedy`) or precedes another initial (`J. R. Smith`).
/// The pronoun `I` is never an initial.
fn is_initial(token: &str, previous: Option<&str>, next_word: &str) -> bool {
    if !is_single_capital(token) || token == "I" {
        return false;
    }

    let after_name = previous.is_none_or(|p| p.chars().next().is_some_and(char::is_uppercase));
    let before_initial = next_word
        .split_whitespace()
        .next()
        .and_then(|w| w.strip_suffix('.'))
        .is_some_and(is_single_capital);
    after_name || before_initial
}

fn is_single_capital(token: &str) -> bool {
    let mut letters = token.chars();
    matches!(
        (letters.next(), letters.next()),
        (Some(first), None) if first.is_alphabetic() && first.is_uppercase()
    )
}
