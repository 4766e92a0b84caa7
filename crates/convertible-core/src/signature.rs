//! Callable signature descriptor
//!
//! Describes the parameters of a wrapped callable: ordered positional names,
//! the variadic-positional catch-all, keyword-only names, and the
//! variadic-keyword catch-all. Computed once at registration time.
//!
//! # Example
//!
//! ```yaml
//! signature:
//!   positional: [self, a, b]
//!   varargs: rest
//!   keyword_only: [verbose]
//!   varkw: options
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parameter layout of a wrapped callable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSignature", into = "RawSignature")]
pub struct Signature {
    positional: Vec<String>,
    varargs: Option<String>,
    keyword_only: Vec<String>,
    varkw: Option<String>,
}

impl Signature {
    /// Start building a signature
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// Declared positional parameter names, in order
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Name of the variadic-positional parameter
    pub fn varargs(&self) -> Option<&str> {
        self.varargs.as_deref()
    }

    /// Keyword-only parameter names, in declared order
    pub fn keyword_only(&self) -> &[String] {
        &self.keyword_only
    }

    /// Name of the variadic-keyword parameter
    pub fn varkw(&self) -> Option<&str> {
        self.varkw.as_deref()
    }

    /// Whether `name` is a keyword-only parameter
    pub fn is_keyword_only(&self, name: &str) -> bool {
        self.keyword_only.iter().any(|k| k == name)
    }

    /// The same signature with the leading receiver parameter removed
    pub fn without_receiver(&self) -> Self {
        Self {
            positional: self.positional.iter().skip(1).cloned().collect(),
            ..self.clone()
        }
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let names = self
            .positional
            .iter()
            .chain(self.varargs.iter())
            .chain(self.keyword_only.iter())
            .chain(self.varkw.iter());
        for name in names {
            if name.is_empty() {
                return Err(Error::ConfigInvalid {
                    message: "parameter names must not be empty".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::ConfigInvalid {
                    message: format!("duplicate parameter '{}' in signature", name),
                });
            }
        }
        Ok(())
    }
}

/// Builder for [`Signature`]
#[derive(Debug, Clone, Default)]
pub struct SignatureBuilder {
    signature: Signature,
}

impl SignatureBuilder {
    /// Append declared positional parameters
    pub fn positional<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signature
            .positional
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the variadic-positional parameter
    pub fn varargs(mut self, name: impl Into<String>) -> Self {
        self.signature.varargs = Some(name.into());
        self
    }

    /// Append keyword-only parameters
    pub fn keyword_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signature
            .keyword_only
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the variadic-keyword parameter
    pub fn varkw(mut self, name: impl Into<String>) -> Self {
        self.signature.varkw = Some(name.into());
        self
    }

    /// Validate and build; parameter names must be unique and non-empty
    pub fn build(self) -> Result<Signature> {
        self.signature.validate()?;
        Ok(self.signature)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawSignature {
    #[serde(default)]
    positional: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    varargs: Option<String>,
    #[serde(default)]
    keyword_only: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    varkw: Option<String>,
}

impl TryFrom<RawSignature> for Signature {
    type Error = Error;

    fn try_from(raw: RawSignature) -> Result<Self> {
        let signature = Self {
            positional: raw.positional,
            varargs: raw.varargs,
            keyword_only: raw.keyword_only,
            varkw: raw.varkw,
        };
        signature.validate()?;
        Ok(signature)
    }
}

impl From<Signature> for RawSignature {
    fn from(signature: Signature) -> Self {
        Self {
            positional: signature.positional,
            varargs: signature.varargs,
            keyword_only: signature.keyword_only,
            varkw: signature.varkw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let signature = Signature::builder()
            .positional(["a", "b"])
            .varargs("args")
            .keyword_only(["verbose"])
            .varkw("kwargs")
            .build()
            .unwrap();

        assert_eq!(signature.positional(), ["a", "b"]);
        assert_eq!(signature.varargs(), Some("args"));
        assert!(signature.is_keyword_only("verbose"));
        assert!(!signature.is_keyword_only("a"));
        assert_eq!(signature.varkw(), Some("kwargs"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Signature::builder()
            .positional(["a"])
            .keyword_only(["a"])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate parameter 'a'"));
    }

    #[test]
    fn test_without_receiver() {
        let signature = Signature::builder()
            .positional(["self", "a"])
            .build()
            .unwrap();
        assert_eq!(signature.without_receiver().positional(), ["a"]);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
positional: [a, b]
varargs: rest
keyword_only: [verbose]
"#;
        let signature: Signature = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(signature.positional(), ["a", "b"]);
        assert_eq!(signature.varargs(), Some("rest"));
        assert_eq!(signature.varkw(), None);
    }

    #[test]
    fn test_parse_yaml_validates() {
        let yaml = r#"
positional: [a]
varargs: a
"#;
        let result: std::result::Result<Signature, _> = serde_yaml::from_str(yaml);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate parameter 'a'"));
    }
}
