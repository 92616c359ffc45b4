use crate::error::StubError;

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap()
}

pub fn parse_error(msg: &str, line: usize, column: usize) -> StubError {
    StubError::ParseError {
        msg: msg.to_string(),
        line,
        column,
    }
}
