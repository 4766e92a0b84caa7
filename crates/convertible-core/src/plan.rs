//! Binding plan
//!
//! The static mapping from parameters to converters, derived once per wrapped
//! callable from its [`Signature`] and the supplied converters:
//!
//! - declared positional names are zipped against the ordered converters
//! - leftover ordered converters feed extra positional arguments when the
//!   callable has a variadic-positional parameter; otherwise a keyword
//!   converter named after that parameter is applied to each of them
//! - keyword converters bind keyword-only parameters by name
//! - the remaining keyword converters bind entries of the variadic-keyword
//!   parameter, when there is one

use std::collections::HashMap;

use crate::converter::ConverterRef;
use crate::signature::Signature;

/// Converter source for positional arguments beyond the declared ones
#[derive(Debug, Clone, Default)]
pub enum ExtraPositional {
    /// Extra positional arguments pass through unchanged
    #[default]
    None,
    /// One converter per extra argument, in order; later arguments pass through
    Sequence(Vec<ConverterRef>),
    /// The same converter for every extra argument
    Uniform(ConverterRef),
}

impl ExtraPositional {
    /// Converter for the `index`-th extra positional argument of a call
    pub fn get(&self, index: usize) -> Option<&ConverterRef> {
        match self {
            Self::None => None,
            Self::Sequence(converters) => converters.get(index),
            Self::Uniform(converter) => Some(converter),
        }
    }
}

/// Parameter to converter mapping for one wrapped callable
#[derive(Debug, Clone, Default)]
pub struct BindingPlan {
    positional: Vec<(String, ConverterRef)>,
    extra_positional: ExtraPositional,
    keyword_only: Vec<(String, ConverterRef)>,
    keyword: HashMap<String, ConverterRef>,
    unreachable: Vec<ConverterRef>,
}

impl BindingPlan {
    /// Build the plan for a free function
    pub fn new(
        signature: &Signature,
        positional: &[ConverterRef],
        keywords: &[(String, ConverterRef)],
    ) -> Self {
        let positional_pairs: Vec<(String, ConverterRef)> = signature
            .positional()
            .iter()
            .cloned()
            .zip(positional.iter().cloned())
            .collect();
        let leftover = &positional[positional_pairs.len()..];

        let keyword_converter = |name: &str| {
            keywords
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, converter)| converter.clone())
        };

        let mut unreachable = Vec::new();
        let extra_positional = match signature.varargs() {
            Some(_) if !leftover.is_empty() => ExtraPositional::Sequence(leftover.to_vec()),
            Some(varargs) => keyword_converter(varargs)
                .map(ExtraPositional::Uniform)
                .unwrap_or_default(),
            None => {
                if !leftover.is_empty() {
                    tracing::warn!(
                        "{} positional converter(s) exceed the {} declared parameter(s) and will never be applied",
                        leftover.len(),
                        positional_pairs.len()
                    );
                    unreachable.extend(leftover.iter().cloned());
                }
                ExtraPositional::None
            }
        };

        let keyword_only = signature
            .keyword_only()
            .iter()
            .filter_map(|name| keyword_converter(name).map(|c| (name.clone(), c)))
            .collect();

        let keyword = if signature.varkw().is_some() {
            keywords
                .iter()
                .filter(|(name, _)| !signature.is_keyword_only(name))
                .cloned()
                .collect()
        } else {
            HashMap::new()
        };

        let plan = Self {
            positional: positional_pairs,
            extra_positional,
            keyword_only,
            keyword,
            unreachable,
        };
        tracing::debug!(
            "Built binding plan: {} positional, {} keyword-only, {} variadic keyword",
            plan.positional.len(),
            plan.keyword_only.len(),
            plan.keyword.len()
        );
        plan
    }

    /// Build the plan for a method: the receiver is removed before pairing
    pub fn for_method(
        signature: &Signature,
        positional: &[ConverterRef],
        keywords: &[(String, ConverterRef)],
    ) -> Self {
        Self::new(&signature.without_receiver(), positional, keywords)
    }

    /// Declared positional parameters with their converters, in order
    pub fn positional(&self) -> &[(String, ConverterRef)] {
        &self.positional
    }

    /// Converter source for extra positional arguments
    pub fn extra_positional(&self) -> &ExtraPositional {
        &self.extra_positional
    }

    /// Keyword-only parameters with converters, in declared order
    pub fn keyword_only(&self) -> &[(String, ConverterRef)] {
        &self.keyword_only
    }

    /// Converter for an entry of the variadic-keyword parameter
    pub fn keyword(&self, name: &str) -> Option<&ConverterRef> {
        self.keyword.get(name)
    }

    /// Names bound for the variadic-keyword parameter, sorted
    pub fn keyword_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.keyword.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Positional converters with no parameter to apply to
    pub fn unreachable_converters(&self) -> &[ConverterRef] {
        &self.unreachable
    }
}
