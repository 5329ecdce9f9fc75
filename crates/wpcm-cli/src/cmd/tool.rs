//! `wpcm tools` and `wpcm call`: the MCP tool registry without the protocol.

use crate::output::{print_json, print_table};
use crate::tools;
use anyhow::Context;
use serde_json::Value;
use wpcm_core::service::PostService;

pub fn list(json: bool) -> anyhow::Result<()> {
    let tools = tools::all_tools();
    if json {
        let entries: Vec<Value> = tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name(),
                    "description": t.description(),
                    "inputSchema": t.schema()
                })
            })
            .collect();
        return print_json(&entries);
    }

    let rows = tools
        .iter()
        .map(|t| vec![t.name().to_string(), t.description().to_string()])
        .collect();
    print_table(&["TOOL", "DESCRIPTION"], rows);
    Ok(())
}

/// Run one tool. A failing tool prints its error envelope and exits non-zero.
pub fn call(service: &PostService, name: &str, args: &str) -> anyhow::Result<()> {
    let tools = tools::all_tools();
    let tool = tools::find(&tools, name)
        .with_context(|| format!("unknown tool '{name}' (see `wpcm tools`)"))?;
    let args: Value =
        serde_json::from_str(args).with_context(|| format!("--args is not valid JSON: {args}"))?;
    if !args.is_object() {
        anyhow::bail!("--args must be a JSON object, got: {args}");
    }

    match tool.call(args, service) {
        Ok(result) => print_json(&result),
        Err(e) => {
            print_json(&tools::error_envelope(&e))?;
            Err(anyhow::Error::new(e).context(format!("tool '{name}' failed")))
        }
    }
}
