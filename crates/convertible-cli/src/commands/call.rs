//! Convert one call's arguments

use anyhow::{Context, Result};
use convertible_core::{Arguments, BindingConfig};
use serde_json::{Map, Value};

/// Run the call command
///
/// Prints `{"args": [...], "kwargs": {...}}`, or `null` when a failure was
/// handled. For method bindings the first positional argument is the receiver
/// and is printed back unchanged as `receiver`.
pub fn run(config_path: &str, args: &str, kwargs: &str) -> Result<()> {
    let args: Vec<Value> = serde_json::from_str(args).context("--args must be a JSON array")?;
    let kwargs: Map<String, Value> =
        serde_json::from_str(kwargs).context("--kwargs must be a JSON object")?;

    let binding = BindingConfig::load(config_path).context("Failed to load binding")?;
    let convert = binding.to_convert().context("Failed to build converters")?;

    let output = if binding.method {
        let mut args = args.into_iter();
        let receiver = args
            .next()
            .context("a method binding needs the receiver as the first argument")?;
        let method = convert.method(&binding.signature, |receiver: &Value, arguments: Arguments| {
            serde_json::json!({
                "receiver": receiver,
                "args": arguments.args,
                "kwargs": arguments.kwargs,
            })
        });
        method.bind(&receiver).call(args, kwargs)?
    } else {
        let function = convert.function(&binding.signature, |arguments: Arguments| {
            serde_json::to_value(arguments)
        });
        function.call(args, kwargs)?.transpose()?
    };

    match &output {
        Some(_) => tracing::debug!("Conversion succeeded"),
        None => tracing::info!("Conversion failed and was handled; call skipped"),
    }
    println!("{}", output.unwrap_or(Value::Null));
    Ok(())
}
