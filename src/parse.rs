//! Parser for the user input
//!
//! Splits an input line into a verb and its arguments. Object keys often contain spaces
//! and quotes, so the usual shell quoting rules apply:
//!
//! - Enclosing characters in single quotes preserves the literal value of each character within the quotes.
//!   [Single Quotes](https://www.gnu.org/software/bash/manual/bash.html#Single-Quotes)
//! - Enclosing characters in double quotes preserves the literal value of each character within the quotes except `\`.
//!   The backslash retains its special meaning when followed by `\`, `$`, `"` or newline.
//!   [Double Quotes](https://www.gnu.org/software/bash/manual/bash.html#Double-Quotes)
//! - A non-quoted backslash `\` is treated as an escape character.
//!   It preserves the literal value of the next character.
//!   [Escape Character](https://www.gnu.org/software/bash/manual/bash.html#Escape-Character)

use crate::errors::InvalidInputError;
use tracing::trace;

/// Finite state machine that changes state depending on quoting
#[derive(Debug, Clone, Copy, PartialEq)]
enum Fsm {
    /// No quotes are active
    Unquoted,
    /// Single quote is active
    Single,
    /// Double quote is active
    Double,
    /// No quotes are active, escape is active
    UnquotedEscape,
    /// Double quote is active, escape is active
    DoubleEscape,
}

impl Fsm {
    /// Why input that ends in this state is incomplete
    fn unfinished_reason(self) -> Option<&'static str> {
        match self {
            Fsm::Unquoted => None,
            Fsm::Single => Some("unmatched single quotes"),
            Fsm::Double => Some("unmatched double quotes"),
            Fsm::UnquotedEscape | Fsm::DoubleEscape => Some("unmatched escape character"),
        }
    }
}

/// Parses user input and returns parsed items
///
/// An item can be more than a single word if it was quoted in the input,
/// and a pair of quotes with nothing between them is an empty item.
///
/// # Examples
///
/// ```
/// use bucketsh::parse::parse_input;
///
/// let items = parse_input(r#"cd "holiday photos/2024"/'Q1 "draft"'"#).unwrap();
/// assert_eq!(items, vec!["cd", r#"holiday photos/2024/Q1 "draft""#]);
/// ```
pub fn parse_input(input: &str) -> Result<Vec<String>, InvalidInputError> {
    let mut items: Vec<String> = Vec::new();
    let mut item = String::new();
    // Set once a quote opens, so that `''` still yields an (empty) item
    let mut in_item = false;

    let mut state = Fsm::Unquoted;

    for ch in input.chars() {
        state = match (state, ch) {
            (Fsm::Unquoted, ' ' | '\t' | '\n') => {
                if in_item {
                    items.push(std::mem::take(&mut item));
                    in_item = false;
                }
                Fsm::Unquoted
            }
            (Fsm::Unquoted, '\'') => {
                in_item = true;
                Fsm::Single
            }
            (Fsm::Unquoted, '"') => {
                in_item = true;
                Fsm::Double
            }
            (Fsm::Unquoted, '\\') => {
                in_item = true;
                Fsm::UnquotedEscape
            }
            (Fsm::Unquoted, _) => {
                in_item = true;
                item.push(ch);
                Fsm::Unquoted
            }
            (Fsm::Single, '\'') => Fsm::Unquoted,
            (Fsm::Single, _) => {
                item.push(ch);
                Fsm::Single
            }
            (Fsm::Double, '"') => Fsm::Unquoted,
            (Fsm::Double, '\\') => Fsm::DoubleEscape,
            (Fsm::Double, _) => {
                item.push(ch);
                Fsm::Double
            }
            (Fsm::UnquotedEscape, _) => {
                item.push(ch);
                Fsm::Unquoted
            }
            (Fsm::DoubleEscape, '\\' | '"' | '$' | '`' | '\n') => {
                item.push(ch);
                Fsm::Double
            }
            (Fsm::DoubleEscape, _) => {
                item.push('\\');
                item.push(ch);
                Fsm::Double
            }
        };
        trace!(?ch, ?state, %item, "tokenize");
    }

    if let Some(reason) = state.unfinished_reason() {
        return Err(InvalidInputError {
            reason: reason.to_string(),
        });
    }
    if in_item {
        items.push(item);
    }

    Ok(items)
}
