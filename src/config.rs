//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/texdocs/texdocs.toml`
//! 3. Local config: `<project_dir>/.texdocs.toml`
//! 4. Environment variables: `TEXDOCS_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{DocumentClass, LayoutOptions};

/// Raw layout for intermediate parsing (fields are Option to detect "not specified").
///
/// Used by layered config merging and by document manifests:
/// - `None` → field not specified, inherit from base
/// - `Some(..)` → explicit value to merge or replace
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RawLayoutOptions {
    pub document_class: Option<DocumentClass>,
    pub geometry: Option<IndexMap<String, String>>,
    pub packages: Option<Vec<String>>,
    pub maketitle: Option<bool>,
}

impl RawLayoutOptions {
    /// Overlay onto `base`: packages UNION (with `!name` removal), geometry
    /// keys override one by one, scalars win if set.
    pub fn merge_onto(&self, base: &LayoutOptions) -> LayoutOptions {
        let mut geometry = base.geometry.clone();
        if let Some(overlay) = &self.geometry {
            geometry.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        LayoutOptions {
            document_class: self.document_class.unwrap_or(base.document_class),
            geometry,
            packages: self
                .packages
                .as_ref()
                .map(|o| merge_packages(&base.packages, o))
                .unwrap_or_else(|| base.packages.clone()),
            maketitle: self.maketitle.unwrap_or(base.maketitle),
        }
    }

    /// Overlay onto `base` with REPLACE semantics for the package list and geometry.
    pub fn replace_onto(&self, base: &LayoutOptions) -> LayoutOptions {
        LayoutOptions {
            document_class: self.document_class.unwrap_or(base.document_class),
            geometry: self
                .geometry
                .clone()
                .unwrap_or_else(|| base.geometry.clone()),
            packages: self
                .packages
                .clone()
                .unwrap_or_else(|| base.packages.clone()),
            maketitle: self.maketitle.unwrap_or(base.maketitle),
        }
    }
}

/// Merge package lists with union semantics and negation support.
///
/// - Items from overlay are appended to base (load order is kept)
/// - Items prefixed with `!` remove the corresponding package
/// - Duplicates are dropped
///
/// # Examples
/// ```ignore
/// merge_packages(&["a", "b"], &["c"])       // → ["a", "b", "c"]
/// merge_packages(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
/// ```
pub fn merge_packages(base: &[String], overlay: &[String]) -> Vec<String> {
    let mut result: Vec<String> = base.to_vec();

    for pattern in overlay {
        if let Some(negated) = pattern.strip_prefix('!') {
            result.retain(|p| p != negated);
        } else if !result.contains(pattern) {
            result.push(pattern.clone());
        }
    }

    result
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub compiler: Option<String>,
    pub keep_intermediate: Option<bool>,
    pub keep_tex: Option<bool>,
    pub output_dir: Option<PathBuf>,
    pub layout: RawLayoutOptions,
}

/// Unified configuration for texdocs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// LaTeX compiler binary (default: pdflatex)
    pub compiler: String,
    /// Keep `.aux`, `.log` etc. after compiling
    pub keep_intermediate: bool,
    /// Keep the generated `.tex` source after compiling
    pub keep_tex: bool,
    /// Directory for generated files
    pub output_dir: PathBuf,
    /// Default layout for every document
    pub layout: LayoutOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compiler: "pdflatex".into(),
            keep_intermediate: false,
            keep_tex: true,
            output_dir: PathBuf::from("."),
            layout: LayoutOptions::default(),
        }
    }
}

/// Get the XDG config directory for texdocs.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "texdocs").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("texdocs.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".texdocs.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.output_dir.to_string_lossy().as_ref());
        self.output_dir = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self (base): scalars win if set, packages UNION.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            compiler: overlay
                .compiler
                .clone()
                .unwrap_or_else(|| self.compiler.clone()),
            keep_intermediate: overlay.keep_intermediate.unwrap_or(self.keep_intermediate),
            keep_tex: overlay.keep_tex.unwrap_or(self.keep_tex),
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            layout: overlay.layout.merge_onto(&self.layout),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for lists.
    ///
    /// Defaults are a starting point; the global config defines the real
    /// baseline for the user.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            compiler: global
                .compiler
                .clone()
                .unwrap_or_else(|| self.compiler.clone()),
            keep_intermediate: global.keep_intermediate.unwrap_or(self.keep_intermediate),
            keep_tex: global.keep_tex.unwrap_or(self.keep_tex),
            output_dir: global
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            layout: global.layout.replace_onto(&self.layout),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.texdocs.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config (lists REPLACE defaults)
    /// 3. Local config (package list UNION with global, `!pkg` removes)
    /// 4. Environment variables: `TEXDOCS_*` prefix (REPLACE)
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), project_dir, None)
    }

    /// Layered loading with every source given explicitly.
    ///
    /// `env` replaces the process environment when set; keys are full
    /// variable names such as `TEXDOCS_COMPILER`.
    pub fn load_layers(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, env)?;
        current.expand_paths();

        Ok(current)
    }

    /// Load only defaults plus one explicit config file (union semantics).
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        let mut settings = Self::default().merge_with(&raw);
        settings.expand_paths();
        Ok(settings)
    }

    /// Apply TEXDOCS_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`, e.g. `TEXDOCS_LAYOUT__MAKETITLE`.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TEXDOCS")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("compiler") {
            settings.compiler = val;
        }
        if let Ok(val) = config.get_bool("keep_intermediate") {
            settings.keep_intermediate = val;
        }
        if let Ok(val) = config.get_bool("keep_tex") {
            settings.keep_tex = val;
        }
        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("layout.maketitle") {
            settings.layout.maketitle = val;
        }

        Ok(settings)
    }

    /// Render as TOML, e.g. for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_overlay_when_merging_packages_then_appends_in_order() {
        let merged = merge_packages(&strings(&["b", "a"]), &strings(&["c", "a"]));
        assert_eq!(merged, strings(&["b", "a", "c"]));
    }

    #[test]
    fn given_negation_when_merging_packages_then_removes() {
        let merged = merge_packages(&strings(&["a", "b"]), &strings(&["!a", "c"]));
        assert_eq!(merged, strings(&["b", "c"]));
    }

    #[test]
    fn given_raw_layout_when_replacing_then_lists_are_replaced() {
        let raw = RawLayoutOptions {
            packages: Some(strings(&["siunitx"])),
            ..Default::default()
        };
        let layout = raw.replace_onto(&LayoutOptions::default());
        assert_eq!(layout.packages, strings(&["siunitx"]));
        assert_eq!(layout.geometry, LayoutOptions::default().geometry);
    }

    #[test]
    fn given_raw_geometry_when_merging_then_overrides_keys() {
        let raw = RawLayoutOptions {
            geometry: Some(IndexMap::from([("tmargin".to_string(), "2cm".to_string())])),
            document_class: Some(DocumentClass::Book),
            ..Default::default()
        };
        let layout = raw.merge_onto(&LayoutOptions::default());
        assert_eq!(layout.geometry.get("tmargin").map(String::as_str), Some("2cm"));
        assert_eq!(layout.geometry.get("lmargin").map(String::as_str), Some("1.5cm"));
        assert_eq!(layout.document_class, DocumentClass::Book);
    }

    #[test]
    fn given_default_settings_then_roundtrips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
