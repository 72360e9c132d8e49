//! `workview status` — Show configuration and workspace status.

use workview_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let agent_id = config.resolve_default_agent_id();
    let workspace = config.resolve_agent_workspace_dir(&agent_id);

    println!("🔭 Workview Status");
    println!("==================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Agent:        {agent_id}");
    match &workspace {
        Some(dir) => println!("  Workspace:    {}", dir.display()),
        None => println!("  Workspace:    (not configured)"),
    }
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — defaults in effect");
    }

    match &workspace {
        Some(dir) if dir.exists() => println!("  ✅ Workspace exists"),
        Some(_) => println!("  ⚠️  Workspace directory not created yet"),
        None => {}
    }

    Ok(())
}
