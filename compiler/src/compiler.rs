use crate::{
    error::StubError,
    model::build_model,
    parser::parse_declarations,
    tokenizer::tokenize_proto,
    types::{Declaration, ProtoModel},
};

/// Tokenizes and parses one `.proto` text into its declaration sequence.
pub fn parse_proto(text: &str) -> Result<Vec<Declaration>, StubError> {
    let tokens = tokenize_proto(text)?;
    parse_declarations(&tokens)
}

/// Full front end: `.proto` text in, `ProtoModel` out.
pub fn compile_proto(text: &str) -> Result<ProtoModel, StubError> {
    let declarations = parse_proto(text)?;
    Ok(build_model(&declarations))
}
