//! The `doctor` command — show resolved configuration and flag gaps.

use concierge_config::AppConfig;

pub fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    println!("Concierge configuration");
    println!("  model:          {}", config.model.name);
    println!("  base URL:       {}", config.model.base_url);
    println!(
        "  API key:        {}",
        if config.has_api_key() { "present" } else { "MISSING (set CONCIERGE_API_KEY)" }
    );
    println!(
        "  pricing:        ${}/M in, ${}/M out",
        config.pricing.input_per_million, config.pricing.output_per_million
    );
    println!("  max iterations: {}", config.agent.max_iterations);
    println!(
        "  system prompt:  {}",
        if config.agent.system_prompt.is_some() { "custom" } else { "built-in" }
    );
    println!("  calendar:       {}", config.calendar.base_url);
    println!(
        "  calendar auth:  {}",
        if config.calendar.client_id.is_some() && config.calendar.refresh_token.is_some() {
            "present"
        } else {
            "MISSING (calendar tools will report errors)"
        }
    );

    Ok(())
}
