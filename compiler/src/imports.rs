use std::path::{Component, Path, PathBuf};

/// Computes, for each source file, the relative path that locates it from
/// inside the output directory. Both the sources and the output directory
/// are first normalized against the working directory; the result climbs one
/// `..` hop per output-directory segment before descending to the source.
///
/// Only used when the generator references original sources instead of
/// embedding their text.
pub fn resolve_import_paths(sources: &[PathBuf], output_dir: &Path, cwd: &Path) -> Vec<PathBuf> {
    let level = normalize(output_dir, cwd).components().count();

    sources
        .iter()
        .map(|source| {
            let mut resolved = PathBuf::new();
            for _ in 0..level {
                resolved.push("..");
            }
            resolved.push(normalize(source, cwd));
            resolved
        })
        .collect()
}

/// Strips a working-directory prefix and any `.` components.
fn normalize(path: &Path, cwd: &Path) -> PathBuf {
    let relative = path.strip_prefix(cwd).unwrap_or(path);
    relative
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
