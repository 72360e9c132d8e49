//! `workview gateway` — Start the RPC/WebSocket gateway server.

use workview_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    let agent_id = config.resolve_default_agent_id();
    println!("🔭 Workview Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Agent:     {agent_id}");
    match config.resolve_agent_workspace_dir(&agent_id) {
        Some(dir) => println!("   Workspace: {}", dir.display()),
        None => println!("   Workspace: (not configured)"),
    }

    workview_gateway::start(config).await?;

    Ok(())
}
