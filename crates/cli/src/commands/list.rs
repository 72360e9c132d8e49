//! `workview list` — List context files in the workspace.

use std::sync::Arc;

use workview_config::ConfigWorkspaceResolver;
use workview_context::ContextService;

pub async fn run(path: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let service = ContextService::new(Arc::new(ConfigWorkspaceResolver::new()));
    let requested = path.unwrap_or_default();
    let listing = service.list(&requested).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.path.is_empty() {
        println!("No workspace configured.");
        return Ok(());
    }

    let shown = if requested.is_empty() {
        listing.path.clone()
    } else {
        format!("{}/{requested}", listing.path)
    };
    println!("📂 {shown}");

    if listing.entries.is_empty() {
        println!("   (empty)");
        return Ok(());
    }

    for entry in &listing.entries {
        if entry.is_directory {
            println!("   {}/", entry.name);
        } else {
            println!("   {}  ({})", entry.name, human_size(entry.size));
        }
    }

    Ok(())
}

fn human_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
