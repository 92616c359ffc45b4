//! exstub-compiler
//!
//! This crate implements:
//!  1) A tokenizer + parser for `.proto` service definitions,
//!  2) Model construction (`build_model` → `ProtoModel`),
//!  3) Name canonicalization and top-module resolution,
//!  4) RPC signature composition and import path resolution,
//!  5) Elixir stub generation (`generate_stub` → `String`),
//!  6) Error types (`StubError`).

pub mod error;
pub mod types;
pub mod utils;
pub mod tokenizer;
pub mod parser;
pub mod model;
pub mod names;
pub mod signature;
pub mod imports;
pub mod compiler;
pub mod gen_elixir;

pub use compiler::compile_proto;
pub use compiler::parse_proto;
pub use gen_elixir::{generate_stub, GenOptions, SourceRepr};
pub use imports::resolve_import_paths;
pub use model::build_model;
