use anyhow::Result;
use chores_core::configs::ProjectConfig;

pub fn execute() -> Result<()> {
    let schema = schemars::schema_for!(ProjectConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
