use regex::Regex;
use lazy_static::lazy_static;
use crate::utils::{quote, parse_error};
use crate::error::StubError;

lazy_static! {
    pub static ref TOKEN_REGEX: Regex = Regex::new(
        r#"(/\*(?s:.*?)\*/|//[^\n]*|\s+|"(?:[^"\\]|\\.)*"|\.?[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*|-?\d+(?:\.\d+)?|[=;{}()\[\],<>:])"#
    ).unwrap();
    pub static ref SKIP_RX: Regex = Regex::new(r"(?s)^(//[^\n]*|/\*.*\*/|\s+)$").unwrap();
}

#[derive(Debug, PartialEq)]
pub struct Token {
    pub text:   String,
    pub line:   usize,
    pub column: usize,
}

/// Scans `.proto` text into tokens, dropping whitespace and comments.
/// The returned sequence always ends with an empty EOF token.
pub fn tokenize_proto(text: &str) -> Result<Vec<Token>, StubError> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;
    let mut last_end = 0;

    for mat in TOKEN_REGEX.find_iter(text) {
        let start = mat.start();
        let end   = mat.end();
        let part  = mat.as_str();

        if start > last_end {
            // Unexpected text between last_end and start
            let unexpected = &text[last_end..start];
            return Err(parse_error(
                &format!("Syntax error: {}", quote(unexpected)),
                line,
                column,
            ));
        }

        if !SKIP_RX.is_match(part) {
            tokens.push(Token {
                text:   part.to_string(),
                line,
                column,
            });
        }

        // Update line/column
        let newline_count = part.matches('\n').count();
        if newline_count > 0 {
            line += newline_count;
            if let Some(last_line_part) = part.split('\n').last() {
                column = last_line_part.len() + 1;
            }
        } else {
            column += part.len();
        }

        last_end = end;
    }

    if last_end != text.len() {
        let unexpected = &text[last_end..];
        return Err(parse_error(
            &format!("Syntax error: {}", quote(unexpected)),
            line,
            column,
        ));
    }

    // Append EOF token
    tokens.push(Token {
        text:   "".to_string(),
        line,
        column,
    });
    Ok(tokens)
}
