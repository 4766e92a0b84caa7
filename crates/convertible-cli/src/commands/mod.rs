//! CLI command implementations

pub mod call;
pub mod plan;
pub mod validate;

use anyhow::{Context, Result};
use convertible_core::{BindingConfig, ConvertHandler};

/// Load the binding file and build its executor
fn load(config_path: &str) -> Result<(BindingConfig, ConvertHandler)> {
    tracing::debug!("Loading binding from {}", config_path);

    let binding = BindingConfig::load(config_path).context("Failed to load binding")?;
    let convert = binding.to_convert().context("Failed to build converters")?;
    let handler = if binding.method {
        convert.method_handler(&binding.signature)
    } else {
        convert.handler(&binding.signature)
    };
    Ok((binding, handler))
}
