//! `workview read` — Print one context file.

use std::sync::Arc;

use workview_config::ConfigWorkspaceResolver;
use workview_context::ContextService;

pub async fn run(path: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let service = ContextService::new(Arc::new(ConfigWorkspaceResolver::new()));
    let file = service.read(&path).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&file)?);
    } else {
        print!("{}", file.content);
    }

    Ok(())
}
