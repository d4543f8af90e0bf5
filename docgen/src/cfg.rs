//! Runtime configuration loaded from environment variables.

use std::str::FromStr;

use crate::error::DocgenError;

/// What to do when one method's retrieval or generation fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first failure aborts the whole report.
    #[default]
    Abort,
    /// The failing method gets a section stating the failure; the rest continue.
    Placeholder,
}

impl FromStr for FailurePolicy {
    type Err = DocgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "placeholder" => Ok(FailurePolicy::Placeholder),
            other => Err(DocgenError::Config(format!(
                "DOCS_FAILURE_POLICY must be `abort` or `placeholder`, got `{other}`"
            ))),
        }
    }
}

/// Config bag for report generation. All fields have defaults.
#[derive(Clone, Debug)]
pub struct DocgenConfig {
    /// File name of the generated report.
    pub output_file: String,
    /// Embed each method's source in its section.
    pub include_source: bool,
    /// Ground documentation prompts with retrieved project context.
    pub grounded_docs: bool,
    pub failure_policy: FailurePolicy,
    /// Overrides the generator's default model when set.
    pub model: Option<String>,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            output_file: "documentation.md".into(),
            include_source: false,
            grounded_docs: false,
            failure_policy: FailurePolicy::Abort,
            model: None,
        }
    }
}

impl DocgenConfig {
    /// Build from environment variables with defaults.
    pub fn from_env() -> Result<Self, DocgenError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, DocgenError> {
        let value = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let d = Self::default();

        let output_file = value("DOCS_OUTPUT_FILE").unwrap_or(d.output_file);
        if output_file.contains(['/', '\\']) {
            return Err(DocgenError::Config(
                "DOCS_OUTPUT_FILE must be a file name, not a path".into(),
            ));
        }

        Ok(Self {
            output_file,
            include_source: value("DOCS_INCLUDE_SOURCE").map_or(Ok(d.include_source), |v| flag("DOCS_INCLUDE_SOURCE", &v))?,
            grounded_docs: value("DOCS_GROUNDED").map_or(Ok(d.grounded_docs), |v| flag("DOCS_GROUNDED", &v))?,
            failure_policy: match value("DOCS_FAILURE_POLICY") {
                Some(v) => v.parse()?,
                None => d.failure_policy,
            },
            model: value("DOCS_MODEL"),
        })
    }
}

fn flag(var: &str, v: &str) -> Result<bool, DocgenError> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DocgenError::Config(format!("{var} must be a boolean, got `{v}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let cfg = DocgenConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.output_file, "documentation.md");
        assert_eq!(cfg.failure_policy, FailurePolicy::Abort);
        assert!(!cfg.include_source && !cfg.grounded_docs);
    }

    #[test]
    fn parses_flags_and_policy() {
        let cfg = DocgenConfig::from_lookup(|k| match k {
            "DOCS_INCLUDE_SOURCE" => Some("yes".into()),
            "DOCS_FAILURE_POLICY" => Some("Placeholder".into()),
            _ => None,
        })
        .unwrap();
        assert!(cfg.include_source);
        assert_eq!(cfg.failure_policy, FailurePolicy::Placeholder);

        assert!(DocgenConfig::from_lookup(|k| (k == "DOCS_GROUNDED").then(|| "maybe".into())).is_err());
        assert!(DocgenConfig::from_lookup(|k| (k == "DOCS_OUTPUT_FILE").then(|| "../x.md".into())).is_err());
    }
}
