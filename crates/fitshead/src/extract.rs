//! Keyword and value extraction from a single card's text.
//!
//! These are pure functions over one transcript line; no state is retained
//! between calls.

use crate::card::CARD_SIZE;

/// The keyword portion of a card: everything before the first `=`, trailing
/// blanks trimmed.
///
/// A card with no value indicator (`END`, commentary cards) yields the whole
/// line, trimmed, so it can still be compared against requested keywords.
pub fn card_keyword(line: &str) -> &str {
    let end = line.find('=').unwrap_or(line.len());
    line[..end].trim_end_matches(' ')
}

/// The raw value token of a card.
///
/// Scans forward from the character after `=`, flipping an in-quote flag on
/// every `'`. Collection stops at the first unquoted `/` (the inline-comment
/// delimiter, which is never part of the value) or once the card's 80
/// columns are exhausted. The collected text is then classified: if it
/// contains a quote it is a string value — the exact span between the first
/// and last quote, interior blanks preserved — otherwise it is a scalar and
/// the first whitespace-delimited token is returned.
///
/// A card with no `=` has no value; the empty string is returned.
pub fn card_value(line: &str) -> String {
    let Some(eq) = line.find('=') else {
        return String::new();
    };

    let bytes = line.as_bytes();
    let end = bytes.len().min(CARD_SIZE);
    let start = (eq + 1).min(end);

    let mut stop = end;
    let mut in_quote = false;
    for (i, &b) in bytes[start..end].iter().enumerate() {
        if b == b'/' && !in_quote {
            stop = start + i;
            break;
        }
        if b == b'\'' {
            in_quote = !in_quote;
        }
    }

    select_token(&bytes[start..stop])
}

/// Classify a collected value region into its literal token.
fn select_token(raw: &[u8]) -> String {
    if let Some(first) = raw.iter().position(|&b| b == b'\'') {
        // String value: the exact substring between the first and the last
        // quote. A lone quote delimits nothing.
        let last = raw.iter().rposition(|&b| b == b'\'').unwrap_or(first);
        if first < last {
            String::from_utf8_lossy(&raw[first + 1..last]).into_owned()
        } else {
            String::new()
        }
    } else {
        // Scalar value: the first whitespace-delimited token.
        let text = String::from_utf8_lossy(raw);
        text.split_whitespace().next().unwrap_or("").to_owned()
    }
}
