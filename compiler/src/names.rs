/// Converts a dotted path to its canonical dotted PascalCase form.
///
/// Each `.`-separated segment is camelized independently: underscores are
/// dropped, the first letter of the segment and of each underscore-separated
/// word is upper-cased, and the remaining characters are left as-is. The
/// transform is idempotent.
pub fn canonicalize(dotted: &str) -> String {
    dotted
        .split('.')
        .map(camelize)
        .collect::<Vec<_>>()
        .join(".")
}

fn camelize(segment: &str) -> String {
    segment
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect()
}

/// Resolves the top-level output module name: an explicit namespace override
/// wins, then the declared package, then the source file's base name. The
/// alternatives are tried lazily in order and exactly one is used; there is
/// no merging.
pub fn resolve_top_module(
    override_namespace: Option<&str>,
    declared_package: Option<&str>,
    source_base_name: &str,
) -> String {
    let picked = non_empty(override_namespace)
        .or_else(|| non_empty(declared_package))
        .unwrap_or(source_base_name);
    canonicalize(picked)
}

fn non_empty(candidate: Option<&str>) -> Option<&str> {
    candidate.filter(|text| !text.is_empty())
}

/// Prefix qualifying a service's wire-level route identifier with its
/// package. Applies to routing metadata only, never to display names.
pub fn service_prefix(declared_package: &str) -> String {
    if declared_package.is_empty() {
        String::new()
    } else {
        format!("{}.", declared_package)
    }
}
