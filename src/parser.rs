//! Quote-aware line tokenizer and payload row assembly.
//!
//! A line is split into fields by a single-character delimiter. A quote
//! opens a segment in which the delimiter is literal; a doubled quote inside
//! such a segment stands for one literal quote. Every field is trimmed when
//! it is finalized, quoted content included, and an unterminated quote at the
//! end of a line is accepted as-is. Trimming strips Unicode whitespace and
//! the byte order mark, so a payload saved with a BOM parses cleanly.

use crate::constants::QUOTE_CHAR;
use crate::models::Row;
use tracing::debug;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Trim whitespace and byte order marks from both ends
pub(crate) fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

/// Tokenizer state while walking a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    Quoted,
}

/// What the tokenizer does with the current character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Append the character to the field accumulator
    Append(char),
    /// Close the current field
    EndField,
    /// Consume a quote without appending it
    Discard,
    /// Append one quote and consume the following quote too
    AppendEscapedQuote,
}

/// Transition table for one character with one character of lookahead
fn transition(
    state: QuoteState,
    ch: char,
    next: Option<char>,
    delimiter: char,
) -> (QuoteState, Action) {
    match (state, ch) {
        (QuoteState::Unquoted, QUOTE_CHAR) => (QuoteState::Quoted, Action::Discard),
        (QuoteState::Quoted, QUOTE_CHAR) if next == Some(QUOTE_CHAR) => {
            (QuoteState::Quoted, Action::AppendEscapedQuote)
        }
        (QuoteState::Quoted, QUOTE_CHAR) => (QuoteState::Unquoted, Action::Discard),
        (QuoteState::Unquoted, c) if c == delimiter => (QuoteState::Unquoted, Action::EndField),
        (state, c) => (state, Action::Append(c)),
    }
}

/// Split one line into trimmed fields
///
/// The result always holds at least one field: the number of fields is the
/// number of delimiters seen outside quotes plus one.
pub fn parse_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut state = QuoteState::Unquoted;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        let (next_state, action) = transition(state, ch, chars.peek().copied(), delimiter);
        state = next_state;

        match action {
            Action::Append(c) => current.push(c),
            Action::EndField => {
                fields.push(trim_text(&current).to_string());
                current.clear();
            }
            Action::Discard => {}
            Action::AppendEscapedQuote => {
                current.push(QUOTE_CHAR);
                chars.next();
            }
        }
    }

    if state == QuoteState::Quoted {
        debug!("Unterminated quote accepted at end of line");
    }

    fields.push(trim_text(&current).to_string());
    fields
}

/// Split a payload into rows, skipping lines that are blank after trimming
///
/// An empty or whitespace-only payload yields no rows.
pub fn assemble_rows(payload: &str, delimiter: char) -> Vec<Row> {
    let rows: Vec<Row> = payload
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = trim_text(line);
            if line.is_empty() {
                None
            } else {
                Some(Row::new(index + 1, parse_line(line, delimiter)))
            }
        })
        .collect();

    debug!("Assembled {} rows from payload", rows.len());
    rows
}
