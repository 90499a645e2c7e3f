use std::path::Path;

use anyhow::Result;

use super::session;

/// Exit status is the answer: success when stored, failure otherwise
pub fn cmd_exists(config: Option<&Path>, raw_name: &str, json: bool) -> Result<bool> {
    let name = session::parse_name(raw_name)?;
    let loaded = session::load_config(config)?;
    session::report_warnings(&loaded.warnings, json);
    loaded.config.validate()?;

    let exists = session::stored(&loaded, &name)?;
    if json {
        super::emit(serde_json::json!({
            "event": "exists",
            "name": name.as_str(),
            "exists": exists,
        }))?;
    } else if exists {
        println!("{name}: compiled");
    } else {
        println!("{name}: not compiled");
    }
    Ok(exists)
}
