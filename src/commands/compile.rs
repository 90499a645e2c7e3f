use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

use summon::{ArtifactDirectory, ArtifactReader, QualifiedName, SourceUnit};

use super::session::{self, Session};

pub fn cmd_compile(
    config: Option<&Path>,
    files: &[PathBuf],
    root: &Path,
    out_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    let loaded = session::load_config(config)?;
    session::report_warnings(&loaded.warnings, json);
    let separator = loaded.config.backend.separator;

    let mut units = Vec::with_capacity(files.len());
    for file in files {
        let name = unit_name(file, root, separator)?;
        let text = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        units.push(SourceUnit::local(name, text));
    }

    let session = Session::open(&loaded, json)?;
    let outcome = session.orchestrator.compile(units);
    let persisted = session.persist()?;
    let report = outcome?;

    if let Some(dir) = out_dir {
        let store = session.orchestrator.store();
        let produced: Vec<_> = report.produced.iter().filter_map(|n| store.read(n)).collect();
        ArtifactDirectory::new(dir, loaded.config.backend.artifact_extension.as_str())
            .with_separator(separator)
            .save(&produced)
            .with_context(|| format!("failed to write artifacts to {}", dir.display()))?;
    }

    if json {
        super::emit(serde_json::json!({
            "event": "compiled",
            "requested": report.requested.len(),
            "skipped": names(&report.skipped),
            "joined": names(&report.joined),
            "submitted": names(&report.submitted),
            "produced": names(&report.produced),
            "persisted": persisted,
        }))?;
        return Ok(());
    }

    if report.is_noop() && report.joined.is_empty() {
        println!("✓ Nothing to compile ({} already compiled)", report.skipped.len());
        return Ok(());
    }
    println!(
        "✓ Compiled {} unit(s), {} artifact(s) stored",
        report.submitted.len(),
        report.produced.len()
    );
    if !report.skipped.is_empty() {
        println!("  skipped (already compiled): {}", report.skipped.len());
    }
    for name in &report.produced {
        println!("    - {name}");
    }
    Ok(())
}

fn names(names: &[QualifiedName]) -> Vec<&str> {
    names.iter().map(QualifiedName::as_str).collect()
}

/// `root/remote/algo/Sort.src` becomes `remote/algo/Sort`
fn unit_name(file: &Path, root: &Path, separator: char) -> Result<QualifiedName> {
    let relative = if root == Path::new(".") {
        file.strip_prefix(".").unwrap_or(file)
    } else {
        file.strip_prefix(root)
            .with_context(|| format!("{} is not under {}", file.display(), root.display()))?
    };

    let mut segments = Vec::new();
    for component in relative.with_extension("").components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => bail!("{} cannot be mapped to a unit name", file.display()),
        }
    }
    session::parse_name(&segments.join(&separator.to_string()))
}
