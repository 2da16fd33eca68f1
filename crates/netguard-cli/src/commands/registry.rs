use std::path::Path;

use netguard_effects::EffectRegistry;
use netguard_source::NetguardConfig;

use crate::commands::load_config;
use crate::error::CliError;

/// The configuration with the registry fully spelled out, as TOML.
pub fn effective_config(config: &NetguardConfig) -> Result<String, CliError> {
    let registry = EffectRegistry::from_config(&config.effects);
    let effective = NetguardConfig {
        effects: registry.to_config(),
        scan: config.scan.clone(),
    };
    Ok(effective.to_toml_string()?)
}

pub fn handle_registry(config: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config, Path::new("."))?;
    print!("{}", effective_config(&config)?);
    Ok(())
}
