use std::path::Path;

use anyhow::{Context, Result};

use super::session;

pub fn cmd_check_config(config: Option<&Path>, json: bool) -> Result<()> {
    let loaded = session::load_config(config)?;
    session::report_warnings(&loaded.warnings, json);
    loaded.config.validate()?;

    let source = loaded
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    if json {
        super::emit(serde_json::json!({
            "event": "config",
            "source": source,
            "warnings": loaded.warnings.len(),
            "config": serde_json::to_value(&loaded.config)?,
        }))?;
        return Ok(());
    }

    println!("# effective configuration from {source}");
    if loaded.config.command_spec().is_none() {
        println!("# note: no [backend].program set; resolve and compile will fail");
    }
    let rendered =
        toml::to_string_pretty(&loaded.config).context("failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
