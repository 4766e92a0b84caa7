//! Validate binding command

use anyhow::Result;

/// Run the validate command
pub fn run(config_path: &str) -> Result<()> {
    tracing::info!("Validating binding: {}", config_path);

    let (binding, handler) = super::load(config_path)?;
    let plan = handler.plan();

    tracing::info!(
        "✓ Signature: {} positional, {} keyword-only",
        binding.signature.positional().len(),
        binding.signature.keyword_only().len()
    );
    tracing::info!(
        "✓ Converters: {} positional, {} keyword",
        binding.converters.args.len(),
        binding.converters.kwargs.len()
    );

    if !plan.unreachable_converters().is_empty() {
        anyhow::bail!(
            "{} positional converter(s) have no parameter to apply to",
            plan.unreachable_converters().len()
        );
    }

    tracing::info!("✓ Binding is valid");
    Ok(())
}
