//! Tests for layered settings

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use texdocs::config::{local_config_path, merge_packages, Settings};
use texdocs::domain::{default_packages, DocumentClass};

/// Local config plus the given variables; no global file, no process environment.
fn load_isolated(project_dir: &Path, env: &[(&str, &str)]) -> Settings {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::load_layers(None, Some(project_dir), Some(env)).unwrap()
}

#[test]
fn given_no_config_files_when_loading_file_defaults_then_pdflatex() {
    let settings = Settings::default();

    assert_eq!(settings.compiler, "pdflatex");
    assert!(!settings.keep_intermediate);
    assert!(settings.keep_tex);
    assert_eq!(settings.layout.packages, default_packages());
    assert!(settings.layout.maketitle);
}

#[test]
fn given_local_config_when_loading_then_packages_union_with_negation() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        r#"
compiler = "lualatex"

[layout]
document_class = "report"
packages = ["siunitx", "!pdfpages"]

[layout.geometry]
tmargin = "2cm"
"#,
    )
    .unwrap();

    // Act
    let settings = load_isolated(temp.path(), &[]);

    // Assert
    assert_eq!(settings.layout.document_class, DocumentClass::Report);
    assert!(settings.layout.packages.contains(&"siunitx".to_string()));
    assert!(!settings.layout.packages.contains(&"pdfpages".to_string()));
    assert_eq!(settings.layout.packages.last().map(String::as_str), Some("siunitx"));
    assert_eq!(
        settings.layout.geometry.get("tmargin").map(String::as_str),
        Some("2cm")
    );
    assert_eq!(
        settings.layout.geometry.get("lmargin").map(String::as_str),
        Some("1.5cm")
    );
}

#[test]
fn given_explicit_file_when_loading_then_output_dir_expanded() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");
    fs::write(&path, "output_dir = \"~/build\"\ncompiler = \"latexmk\"\n").unwrap();

    // Act
    let settings = Settings::load_file(&path).unwrap();

    // Assert
    assert_eq!(settings.compiler, "latexmk");
    assert!(!settings.output_dir.to_string_lossy().starts_with('~'));
    assert!(settings.output_dir.ends_with("build"));
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "compiler = [").unwrap();

    let result = Settings::load_file(&path);

    assert!(matches!(
        result,
        Err(texdocs::application::ApplicationError::Config { .. })
    ));
}

#[test]
fn given_env_override_when_loading_then_env_wins() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        "keep_intermediate = false\ncompiler = \"pdflatex\"\n",
    )
    .unwrap();

    // Act
    let settings = load_isolated(
        temp.path(),
        &[
            ("TEXDOCS_KEEP_INTERMEDIATE", "true"),
            ("TEXDOCS_COMPILER", "lualatex"),
            ("TEXDOCS_LAYOUT__MAKETITLE", "false"),
        ],
    );

    // Assert
    assert!(settings.keep_intermediate);
    assert_eq!(settings.compiler, "lualatex");
    assert!(!settings.layout.maketitle);
}

#[test]
fn given_double_underscore_prefix_when_loading_then_ignored() {
    let temp = TempDir::new().unwrap();

    let settings = load_isolated(temp.path(), &[("TEXDOCS__COMPILER", "lualatex")]);

    assert_eq!(settings.compiler, "pdflatex");
}

#[test]
fn given_global_then_local_when_loading_then_global_replaces_and_local_unions() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("global.toml");
    fs::write(&global, "[layout]\npackages = [\"amsmath\", \"graphicx\"]\n").unwrap();
    fs::write(
        local_config_path(temp.path()),
        "keep_tex = false\n[layout]\npackages = [\"siunitx\", \"!graphicx\"]\n",
    )
    .unwrap();

    // Act
    let settings =
        Settings::load_layers(Some(&global), Some(temp.path()), Some(HashMap::new())).unwrap();

    // Assert
    assert_eq!(settings.layout.packages, vec!["amsmath", "siunitx"]);
    assert!(!settings.keep_tex);
}

#[test]
fn given_duplicate_and_negated_packages_when_merging_then_order_kept() {
    let base: Vec<String> = ["amsmath", "graphicx"].map(String::from).to_vec();
    let overlay: Vec<String> = ["graphicx", "!amsmath", "siunitx"].map(String::from).to_vec();

    assert_eq!(merge_packages(&base, &overlay), vec!["graphicx", "siunitx"]);
}
