use crate::{
    tokenizer::Token,
    types::{Declaration, RpcEntry},
    utils::{parse_error, quote},
    error::StubError,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER:      Regex = Regex::new(r"^\.?[A-Za-z_][A-Za-z0-9_.]*$").unwrap();
    static ref SIMPLE_IDENT:    Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    static ref SEMICOLON:       Regex = Regex::new(r"^;$").unwrap();
    static ref LEFT_BRACE:      Regex = Regex::new(r"^\{$").unwrap();
    static ref RIGHT_BRACE:     Regex = Regex::new(r"^\}$").unwrap();
    static ref LEFT_PAREN:      Regex = Regex::new(r"^\($").unwrap();
    static ref RIGHT_PAREN:     Regex = Regex::new(r"^\)$").unwrap();
    static ref SYNTAX_KEYWORD:  Regex = Regex::new(r"^syntax$").unwrap();
    static ref IMPORT_KEYWORD:  Regex = Regex::new(r"^import$").unwrap();
    static ref PACKAGE_KEYWORD: Regex = Regex::new(r"^package$").unwrap();
    static ref OPTION_KEYWORD:  Regex = Regex::new(r"^option$").unwrap();
    static ref SERVICE_KEYWORD: Regex = Regex::new(r"^service$").unwrap();
    static ref RPC_KEYWORD:     Regex = Regex::new(r"^rpc$").unwrap();
    static ref RETURNS_KEYWORD: Regex = Regex::new(r"^returns$").unwrap();
    static ref STREAM_KEYWORD:  Regex = Regex::new(r"^stream$").unwrap();
    static ref MESSAGE_KEYWORD: Regex = Regex::new(r"^message$").unwrap();
    static ref ENUM_KEYWORD:    Regex = Regex::new(r"^enum$").unwrap();
    static ref EOF:             Regex = Regex::new(r"^$").unwrap();
}

fn current_token<'a>(tokens: &'a [Token], index: usize) -> &'a Token {
    // tokenize_proto appends an EOF sentinel, so the slice cannot be
    // exhausted before the parser sees it.
    tokens.get(index).expect("Unexpected end of tokens")
}

fn eat(tokens: &[Token], index: &mut usize, test: &Regex) -> bool {
    if test.is_match(&current_token(tokens, *index).text) {
        *index += 1;
        true
    } else {
        false
    }
}

fn expect(tokens: &[Token], index: &mut usize, test: &Regex, expected: &str) -> Result<(), StubError> {
    if !eat(tokens, index, test) {
        let tok = current_token(tokens, *index);
        return Err(parse_error(
            &format!("Expected {} but found {}", expected, quote(&tok.text)),
            tok.line,
            tok.column,
        ));
    }
    Ok(())
}

fn unexpected_token(tokens: &[Token], index: usize) -> StubError {
    let tok = current_token(tokens, index);
    parse_error(
        &format!("Unexpected token {}", quote(&tok.text)),
        tok.line,
        tok.column,
    )
}

/// Consumes tokens through the next top-level `;`, stepping over any
/// brace-balanced aggregate value. Used for `syntax`, `import` and `option`
/// statements, which carry nothing the model needs.
fn skip_statement(tokens: &[Token], index: &mut usize) -> Result<(), StubError> {
    let mut depth = 0usize;
    loop {
        if eat(tokens, index, &EOF) {
            let tok = current_token(tokens, *index - 1);
            return Err(parse_error("Unexpected end of input in statement", tok.line, tok.column));
        }
        if depth == 0 && eat(tokens, index, &SEMICOLON) {
            return Ok(());
        }
        if eat(tokens, index, &LEFT_BRACE) {
            depth += 1;
        } else if eat(tokens, index, &RIGHT_BRACE) {
            if depth == 0 {
                return Err(unexpected_token(tokens, *index - 1));
            }
            depth -= 1;
            // An aggregate option body may close the statement without `;`
            if depth == 0 && eat(tokens, index, &SEMICOLON) {
                return Ok(());
            }
            if depth == 0 {
                return Ok(());
            }
        } else {
            *index += 1;
        }
    }
}

/// Consumes a brace-balanced body; the opening `{` has already been eaten.
fn skip_block(tokens: &[Token], index: &mut usize) -> Result<(), StubError> {
    let mut depth = 1usize;
    while depth > 0 {
        if eat(tokens, index, &EOF) {
            let tok = current_token(tokens, *index - 1);
            return Err(parse_error("Unexpected end of input in block", tok.line, tok.column));
        }
        if eat(tokens, index, &LEFT_BRACE) {
            depth += 1;
        } else if eat(tokens, index, &RIGHT_BRACE) {
            depth -= 1;
        } else {
            *index += 1;
        }
    }
    Ok(())
}

fn parse_rpc(tokens: &[Token], index: &mut usize) -> Result<RpcEntry, StubError> {
    let name_tok = current_token(tokens, *index);
    let method_name = name_tok.text.clone();
    expect(tokens, index, &SIMPLE_IDENT, "rpc name")?;

    expect(tokens, index, &LEFT_PAREN, "\"(\"")?;
    let request_streamed = eat(tokens, index, &STREAM_KEYWORD);
    let request_tok = current_token(tokens, *index);
    let request_type = request_tok.text.trim_start_matches('.').to_string();
    expect(tokens, index, &IDENTIFIER, "request type")?;
    expect(tokens, index, &RIGHT_PAREN, "\")\"")?;

    expect(tokens, index, &RETURNS_KEYWORD, "\"returns\"")?;
    expect(tokens, index, &LEFT_PAREN, "\"(\"")?;
    let response_streamed = eat(tokens, index, &STREAM_KEYWORD);
    let response_tok = current_token(tokens, *index);
    let response_type = response_tok.text.trim_start_matches('.').to_string();
    expect(tokens, index, &IDENTIFIER, "response type")?;
    expect(tokens, index, &RIGHT_PAREN, "\")\"")?;

    // An rpc ends with `;` or with an options body
    if !eat(tokens, index, &SEMICOLON) {
        expect(tokens, index, &LEFT_BRACE, "\";\" or \"{\"")?;
        skip_block(tokens, index)?;
    }

    Ok(RpcEntry {
        method_name,
        request_type,
        response_type,
        request_streamed,
        response_streamed,
    })
}

fn parse_service(tokens: &[Token], index: &mut usize) -> Result<Declaration, StubError> {
    let name_tok = current_token(tokens, *index);
    let name = name_tok.text.clone();
    expect(tokens, index, &SIMPLE_IDENT, "service name")?;
    expect(tokens, index, &LEFT_BRACE, "\"{\"")?;

    let mut rpcs = Vec::new();
    while !eat(tokens, index, &RIGHT_BRACE) {
        if eat(tokens, index, &OPTION_KEYWORD) {
            skip_statement(tokens, index)?;
        } else if eat(tokens, index, &RPC_KEYWORD) {
            rpcs.push(parse_rpc(tokens, index)?);
        } else if eat(tokens, index, &SEMICOLON) {
            // Stray empty statement, tolerated
        } else {
            return Err(unexpected_token(tokens, *index));
        }
    }

    Ok(Declaration::Service { name, rpcs })
}

/// Parses a token slice into the ordered declaration sequence. `syntax`,
/// `import` and top-level `option` statements are consumed and dropped;
/// message and enum bodies are skipped without member introspection.
pub fn parse_declarations(tokens: &[Token]) -> Result<Vec<Declaration>, StubError> {
    let mut declarations = Vec::new();
    let mut index = 0;

    while !eat(tokens, &mut index, &EOF) {
        if eat(tokens, &mut index, &SYNTAX_KEYWORD) || eat(tokens, &mut index, &IMPORT_KEYWORD)
            || eat(tokens, &mut index, &OPTION_KEYWORD)
        {
            skip_statement(tokens, &mut index)?;
        } else if eat(tokens, &mut index, &PACKAGE_KEYWORD) {
            let pkg_tok = current_token(tokens, index);
            let package = pkg_tok.text.clone();
            expect(tokens, &mut index, &IDENTIFIER, "package name")?;
            expect(tokens, &mut index, &SEMICOLON, "\";\"")?;
            declarations.push(Declaration::Package(package));
        } else if eat(tokens, &mut index, &SERVICE_KEYWORD) {
            declarations.push(parse_service(tokens, &mut index)?);
        } else if eat(tokens, &mut index, &MESSAGE_KEYWORD) {
            let name_tok = current_token(tokens, index);
            let name = name_tok.text.clone();
            expect(tokens, &mut index, &SIMPLE_IDENT, "message name")?;
            expect(tokens, &mut index, &LEFT_BRACE, "\"{\"")?;
            skip_block(tokens, &mut index)?;
            declarations.push(Declaration::Message(name));
        } else if eat(tokens, &mut index, &ENUM_KEYWORD) {
            let name_tok = current_token(tokens, index);
            let name = name_tok.text.clone();
            expect(tokens, &mut index, &SIMPLE_IDENT, "enum name")?;
            expect(tokens, &mut index, &LEFT_BRACE, "\"{\"")?;
            skip_block(tokens, &mut index)?;
            declarations.push(Declaration::Enum(name));
        } else {
            return Err(unexpected_token(tokens, index));
        }
    }

    Ok(declarations)
}
