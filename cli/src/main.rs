use clap::{Parser, Subcommand};
use std::env;
use std::fs;
use std::path::PathBuf;

use exstub_compiler::error::StubError;
use exstub_compiler::{
    build_model, compile_proto, generate_stub, parse_proto, resolve_import_paths, GenOptions,
    SourceRepr,
};

#[derive(Parser)]
#[command(name = "exstub")]
#[command(about = "Generate Elixir gRPC client stubs from .proto files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an Elixir stub file from one or more `.proto` files
    Gen {
        /// Input `.proto` files, in merge order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (created if absent)
        #[arg(short, long)]
        out: PathBuf,

        /// Module namespace overriding the declared package and the file name
        #[arg(short, long)]
        namespace: Option<String>,

        /// Qualify type references with declared package names
        #[arg(long)]
        use_package_names: bool,

        /// Reference the original `.proto` files by relative path instead of
        /// embedding their text
        #[arg(long)]
        reference_source: bool,
    },

    /// Parse a `.proto` file and print its service model as JSON
    Inspect {
        /// Input `.proto` file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), StubError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Gen {
            inputs,
            out,
            namespace,
            use_package_names,
            reference_source,
        } => {
            // Parse every input first so a bad file aborts before any output
            let mut declarations = Vec::new();
            let mut texts = Vec::new();
            for input in inputs {
                let text = fs::read_to_string(input).map_err(StubError::Io)?;
                declarations.extend(parse_proto(&text)?);
                texts.push(text);
            }
            let model = build_model(&declarations);

            // The generated file is named after the first input
            let base_name = inputs[0]
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("proto")
                .to_string();

            let source = if *reference_source {
                let cwd = env::current_dir().map_err(StubError::Io)?;
                SourceRepr::Referenced(resolve_import_paths(inputs, out, &cwd))
            } else {
                SourceRepr::Embedded(texts.join("\n"))
            };

            let options = GenOptions {
                namespace: namespace.clone(),
                use_package_names: *use_package_names,
            };
            let stub = generate_stub(&model, &options, &source, &base_name);

            fs::create_dir_all(out).map_err(StubError::Io)?;
            let out_path = out.join(format!("{}.generated.ex", base_name));
            fs::write(&out_path, &stub).map_err(StubError::Io)?;
            println!("Generated {}", out_path.display());
            println!("Next: add it to your Mix project and run `mix compile`");
            Ok(())
        }

        Commands::Inspect { input } => {
            let text = fs::read_to_string(input).map_err(StubError::Io)?;
            let model = compile_proto(&text)?;
            println!("{}", serde_json::to_string_pretty(&model).unwrap());
            Ok(())
        }
    }
}
