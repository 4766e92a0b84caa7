//! Show the binding plan

use anyhow::Result;
use convertible_core::ExtraPositional;

/// Run the plan command
pub fn run(config_path: &str) -> Result<()> {
    let (binding, handler) = super::load(config_path)?;
    let plan = handler.plan();

    if binding.method
        && let Some(receiver) = binding.signature.positional().first()
    {
        println!("{receiver}: receiver");
    }
    for (name, converter) in plan.positional() {
        println!("{name}: {converter:?}");
    }

    let varargs = binding.signature.varargs().unwrap_or("<extra>");
    match plan.extra_positional() {
        ExtraPositional::None => {}
        ExtraPositional::Sequence(converters) => {
            for (index, converter) in converters.iter().enumerate() {
                println!("{varargs}[{index}]: {converter:?}");
            }
        }
        ExtraPositional::Uniform(converter) => println!("{varargs}[*]: {converter:?}"),
    }

    for (name, converter) in plan.keyword_only() {
        println!("{name}=: {converter:?}");
    }
    if let Some(varkw) = binding.signature.varkw() {
        for name in plan.keyword_names() {
            if let Some(converter) = plan.keyword(name) {
                println!("{varkw}[{name}]: {converter:?}");
            }
        }
    }

    for converter in plan.unreachable_converters() {
        println!("unreachable: {converter:?}");
    }
    Ok(())
}
