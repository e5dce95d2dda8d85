//! Parameters for the embedded code sandbox.
//!
//! The editor itself is a third-party script that hydrates any element
//! carrying a `data-sandbox` attribute. All we own is the parameter set:
//! which starter template, which theme, which panes are visible, and
//! optionally the virtual files to load.

use crate::partials;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Starter environment the widget boots into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SandboxTemplate {
    Static,
    Vanilla,
    VanillaTs,
    React,
    ReactTs,
    Vue,
    VueTs,
    Svelte,
    Solid,
    Angular,
    Node,
    Nextjs,
    Vite,
    ViteReact,
    ViteReactTs,
    TestTs,
    Astro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SandboxTheme {
    Light,
    #[default]
    Dark,
    Auto,
}

/// Display toggles and editor layout.
///
/// Read from `folio.toml` in snake_case, written to the widget in the
/// camelCase it expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxOptions {
    #[serde(default = "default_true", rename(serialize = "showConsoleButton"))]
    pub show_console: bool,

    #[serde(default = "default_true", rename(serialize = "showLineNumbers"))]
    pub show_line_numbers: bool,

    #[serde(default = "default_true", rename(serialize = "showNavigator"))]
    pub show_navigator: bool,

    #[serde(default = "default_true", rename(serialize = "showTabs"))]
    pub show_tabs: bool,

    #[serde(default = "default_true", rename(serialize = "showInlineErrors"))]
    pub show_inline_errors: bool,

    /// Any CSS length, e.g. `400px` or `60vh`.
    #[serde(default = "default_editor_height", rename(serialize = "editorHeight"))]
    pub editor_height: String,

    #[serde(
        default,
        rename(serialize = "activeFile"),
        skip_serializing_if = "Option::is_none"
    )]
    pub active_file: Option<String>,

    #[serde(
        default,
        rename(serialize = "visibleFiles"),
        skip_serializing_if = "Vec::is_empty"
    )]
    pub visible_files: Vec<String>,
}

impl Default for SandboxOptions {
    fn default() -> Self {
        Self {
            show_console: true,
            show_line_numbers: true,
            show_navigator: true,
            show_tabs: true,
            show_inline_errors: true,
            editor_height: default_editor_height(),
            active_file: None,
            visible_files: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_editor_height() -> String {
    "400px".to_string()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SandboxError {
    #[error("sandbox id must not be empty")]
    EmptyId,

    #[error("editor height must not be empty")]
    EmptyHeight,

    #[error("file path `{0}` must start with `/`")]
    RelativePath(String),

    #[error("`{0}` is not one of the sandbox files")]
    MissingFile(String),
}

/// One embedded sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxEmbed {
    /// Element id suffix; templates look sandboxes up by it.
    pub id: String,
    pub template: SandboxTemplate,
    #[serde(default)]
    pub theme: SandboxTheme,
    #[serde(default)]
    pub options: SandboxOptions,
    /// Virtual file path to contents. Empty means the template's starter files.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, String>,
}

impl SandboxEmbed {
    /// Plain HTML + TypeScript playground opened on `/index.html`.
    pub fn html_typescript(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template: SandboxTemplate::VanillaTs,
            theme: SandboxTheme::Dark,
            options: SandboxOptions {
                active_file: Some("/index.html".to_string()),
                visible_files: vec!["/index.html".to_string(), "/index.ts".to_string()],
                ..SandboxOptions::default()
            },
            files: BTreeMap::new(),
        }
    }

    /// A full framework starter with the template's own files.
    pub fn framework(id: impl Into<String>, template: SandboxTemplate) -> Self {
        Self {
            id: id.into(),
            template,
            theme: SandboxTheme::Dark,
            options: SandboxOptions::default(),
            files: BTreeMap::new(),
        }
    }

    /// Explicit files, every one visible, opened on `active`.
    pub fn with_files(
        id: impl Into<String>,
        template: SandboxTemplate,
        files: BTreeMap<String, String>,
        active: impl Into<String>,
    ) -> Self {
        let visible_files = files.keys().cloned().collect();
        Self {
            id: id.into(),
            template,
            theme: SandboxTheme::Dark,
            options: SandboxOptions {
                active_file: Some(active.into()),
                visible_files,
                ..SandboxOptions::default()
            },
            files,
        }
    }

    pub fn validate(&self) -> Result<(), SandboxError> {
        if self.id.trim().is_empty() {
            return Err(SandboxError::EmptyId);
        }
        if self.options.editor_height.trim().is_empty() {
            return Err(SandboxError::EmptyHeight);
        }

        let referenced = self
            .files
            .keys()
            .chain(self.options.active_file.iter())
            .chain(self.options.visible_files.iter());
        for path in referenced {
            if !path.starts_with('/') {
                return Err(SandboxError::RelativePath(path.clone()));
            }
        }

        // without explicit files the template decides what exists
        if !self.files.is_empty() {
            let opened = self
                .options
                .active_file
                .iter()
                .chain(self.options.visible_files.iter());
            for path in opened {
                if !self.files.contains_key(path) {
                    return Err(SandboxError::MissingFile(path.clone()));
                }
            }
        }
        Ok(())
    }

    /// The mount element the widget script hydrates. The full parameter
    /// set travels as JSON in `data-sandbox`.
    pub fn render_mount(&self) -> tera::Result<String> {
        let mut ctx = tera::Context::new();
        ctx.insert("sandbox", self);
        partials::render(partials::SANDBOX, &ctx)
    }
}
