//! Configuration error types.
//!
//! Validation never stops at the first problem: every invariant violation is
//! collected into [`ConfigDiagnostics`] so a single `folio check` run reports
//! all of them. Non-fatal findings are kept alongside as [`ConfigWarning`]s.

use crate::social::SocialMediaType;
use console::style;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    // no #[from]: source() would print the diagnostics twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// A single violated invariant, anchored to a config field path such as
/// `site.site_url` or `socials[2].title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    pub field: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}{}{}",
            style("[").dim(),
            style(&self.field).cyan(),
            style("]").dim()
        )?;
        write!(f, "{} {}", style("→").red(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", style("hint:").yellow(), hint)?;
        }
        Ok(())
    }
}

/// Non-fatal findings. The site still builds; the consumer degrades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No usable icon for a social link. `requested` is the explicit icon
    /// reference that could not be resolved, if there was one.
    MissingIcon {
        field: String,
        platform: SocialMediaType,
        requested: Option<String>,
    },
    EmptyDescription,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MissingIcon {
                field,
                platform,
                requested: Some(id),
            } => write!(
                f,
                "[{field}] icon `{id}` is not registered, using the default {platform} icon"
            ),
            ConfigWarning::MissingIcon {
                field,
                platform,
                requested: None,
            } => write!(
                f,
                "[{field}] no icon registered for {platform}, using the placeholder glyph"
            ),
            ConfigWarning::EmptyDescription => {
                write!(f, "[site.desc] is empty, pages will carry no description")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    warnings: Vec<ConfigWarning>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigDiagnostic::new(field, message));
    }

    pub fn error_with_hint(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(ConfigDiagnostic::new(field, message).with_hint(hint));
    }

    pub fn warn(&mut self, warning: ConfigWarning) {
        self.warnings.push(warning);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Err if any invariant was violated, otherwise the collected warnings.
    pub fn into_result(self) -> Result<Vec<ConfigWarning>, Self> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", style("config validation failed:").red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                style("found").dim(),
                style(self.errors.len()).red().bold(),
                style("errors").dim()
            )?;
        }
        Ok(())
    }
}
