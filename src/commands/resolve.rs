use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use summon::Resolution;

use super::session::{self, Session};

pub fn cmd_resolve(
    config: Option<&Path>,
    raw_name: &str,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let name = session::parse_name(raw_name)?;
    let loaded = session::load_config(config)?;
    session::report_warnings(&loaded.warnings, json);
    let session = Session::open(&loaded, json)?;

    let resolution = session.orchestrator.resolve_detailed(&name);
    // Persist whatever was compiled, even if the requested name was not produced
    let persisted = session.persist()?;

    match resolution {
        Resolution::Found(artifact) => {
            if let Some(path) = output {
                fs::write(path, artifact.payload())
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }

            if json {
                super::emit(serde_json::json!({
                    "event": "resolved",
                    "name": artifact.name().as_str(),
                    "digest": artifact.digest().as_str(),
                    "bytes": artifact.payload().len(),
                    "processor": artifact.is_processor(),
                    "persisted": persisted,
                }))?;
            } else {
                println!(
                    "✓ {} ({} bytes, {})",
                    artifact.name(),
                    artifact.payload().len(),
                    artifact.digest().short()
                );
                if let Some(path) = output {
                    println!("  written to {}", path.display());
                }
            }
            Ok(())
        }
        Resolution::Absent => {
            if json {
                super::emit(serde_json::json!({
                    "event": "absent",
                    "name": name.as_str(),
                }))?;
            }
            bail!("{name} is not compiled and could not be fetched")
        }
        Resolution::Failed(err) => Err(err).with_context(|| format!("failed to resolve {name}")),
    }
}
