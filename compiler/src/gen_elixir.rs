use crate::names::{canonicalize, resolve_top_module, service_prefix};
use crate::signature::compose_signature;
use crate::types::{ProtoModel, Service};
use std::path::PathBuf;

/// Generation settings carried from the CLI into the renderer.
#[derive(Debug, Clone, Default)]
pub struct GenOptions {
    /// Explicit module namespace, overriding the declared package and the
    /// source file name.
    pub namespace: Option<String>,
    /// Qualify generated type references with the canonicalized declared
    /// package instead of the resolved top module.
    pub use_package_names: bool,
}

/// How the original `.proto` source appears in the generated file: embedded
/// verbatim, or referenced by resolved relative paths.
pub enum SourceRepr {
    Embedded(String),
    Referenced(Vec<PathBuf>),
}

/// Renders the complete generated stub file for one model.
pub fn generate_stub(
    model: &ProtoModel,
    options: &GenOptions,
    source: &SourceRepr,
    base_name: &str,
) -> String {
    let top_module = resolve_top_module(
        options.namespace.as_deref(),
        model.package.as_deref(),
        base_name,
    );
    let type_module = if options.use_package_names {
        match model.package.as_deref() {
            Some(package) => canonicalize(package),
            None => top_module.clone(),
        }
    } else {
        top_module.clone()
    };
    let route_prefix = service_prefix(model.package.as_deref().unwrap_or(""));

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "# Generated by exstub from {}.proto. Do not edit.",
        base_name
    ));

    match source {
        SourceRepr::Referenced(paths) => {
            for path in paths {
                lines.push(format!("# source: {}", path.display()));
            }
            lines.push(String::new());
        }
        SourceRepr::Embedded(text) => {
            lines.push(String::new());
            lines.push(generate_source_module(&top_module, text));
        }
    }

    for service in &model.services {
        lines.push(generate_service(service, &top_module, &type_module, &route_prefix));
    }

    lines.join("\n")
}

/// A module keeping the embedded proto text available at runtime.
fn generate_source_module(top_module: &str, text: &str) -> String {
    let mut lines = Vec::new();
    lines.push(format!("defmodule {}.Proto do", top_module));
    lines.push("  @moduledoc false".to_string());
    lines.push("".to_string());
    lines.push("  @source \"\"\"".to_string());
    for source_line in text.lines() {
        lines.push(format!("  {}", source_line));
    }
    lines.push("  \"\"\"".to_string());
    lines.push("".to_string());
    lines.push("  def source, do: @source".to_string());
    lines.push("end".to_string());
    lines.push("".to_string());
    lines.join("\n")
}

fn generate_service(
    service: &Service,
    top_module: &str,
    type_module: &str,
    route_prefix: &str,
) -> String {
    let module = format!("{}.{}", top_module, service.display_name);
    let mut lines = Vec::new();

    lines.push(format!("defmodule {}.Service do", module));
    lines.push("  @moduledoc false".to_string());
    // The route name keeps the untransformed wire name; canonicalizing it
    // would break dispatch against peers built from the same proto.
    lines.push(format!(
        "  use GRPC.Service, name: \"{}{}\"",
        route_prefix, service.wire_name
    ));
    lines.push("".to_string());
    for rpc in &service.rpcs {
        lines.push(format!("  {}", compose_signature(rpc, type_module)));
    }
    lines.push("end".to_string());
    lines.push("".to_string());

    lines.push(format!("defmodule {}.Stub do", module));
    lines.push("  @moduledoc false".to_string());
    lines.push(format!("  use GRPC.Stub, service: {}.Service", module));
    lines.push("end".to_string());
    lines.push("".to_string());

    lines.join("\n")
}
