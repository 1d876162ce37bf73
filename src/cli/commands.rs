//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::{outline_summary, TreeNodeConvert};

/// Run the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;

    match &cli.command {
        Some(Commands::Build { manifest, output }) => {
            let container = ServiceContainer::new(Settings::load(Some(project_dir.as_path()))?);
            cmd_build(&container, manifest, output.as_deref())
        }
        Some(Commands::Compile {
            manifest,
            output,
            compiler,
            keep_intermediate,
            clean_tex,
        }) => {
            let mut settings = Settings::load(Some(project_dir.as_path()))?;
            if let Some(compiler) = compiler {
                settings.compiler = compiler.clone();
            }
            settings.keep_intermediate |= *keep_intermediate;
            settings.keep_tex &= !*clean_tex;
            cmd_compile(&ServiceContainer::new(settings), manifest, output.as_deref())
        }
        Some(Commands::Outline { manifest }) => {
            let container = ServiceContainer::new(Settings::load(Some(project_dir.as_path()))?);
            cmd_outline(&container, manifest)
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(&project_dir),
            ConfigCommands::Path => cmd_config_path(&project_dir),
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::Infra(InfraError::io("print help", e))),
    }
}

fn resolve_project_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(dir) if !dir.is_dir() => Err(CliError::InvalidArgs(format!(
            "not a directory: {}",
            dir.display()
        ))),
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("get current directory", e))),
    }
}

#[instrument(level = "debug", skip(container))]
fn cmd_build(container: &ServiceContainer, manifest: &Path, out: Option<&Path>) -> CliResult<()> {
    let service = container.document_service();
    let doc = service.build(manifest)?;
    match out {
        Some(path) => {
            service.write_source(&doc, path)?;
            output::action("Wrote", &path.display());
        }
        None => output::info(doc.dumps().trim_end()),
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_compile(container: &ServiceContainer, manifest: &Path, stem: Option<&str>) -> CliResult<()> {
    let stem = match stem {
        Some(stem) => stem.to_string(),
        None => manifest
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| {
                CliError::Usage(format!(
                    "cannot derive output name from {}, pass --output",
                    manifest.display()
                ))
            })?,
    };
    debug!("cmd_compile: stem={}", stem);

    let doc = container.document_service().build(manifest)?;
    let pdf = container
        .compile_service()
        .compile(&doc, &container.settings.output_dir, &stem)
        .inspect_err(print_compiler_log)?;
    output::success(&pdf.display());
    Ok(())
}

/// Compiler output is shown as-is on failure.
fn print_compiler_log(err: &ApplicationError) {
    if let ApplicationError::OperationFailed { source, .. } = err {
        if let Some(InfraError::Compile { log, .. }) = source.downcast_ref::<InfraError>() {
            eprintln!("{}", log.trim_end());
        }
    }
}

fn cmd_outline(container: &ServiceContainer, manifest: &Path) -> CliResult<()> {
    let tree = container.document_service().load(manifest)?;
    output::info(&tree.to_tree_string());
    output::detail(&outline_summary(&tree));
    Ok(())
}

fn cmd_config_show(project_dir: &Path) -> CliResult<()> {
    let settings = Settings::load(Some(project_dir))?;
    output::info(settings.to_toml()?.trim_end());
    Ok(())
}

fn cmd_config_path(project_dir: &Path) -> CliResult<()> {
    output::header("Config files (lowest to highest precedence)");
    match global_config_path() {
        Some(path) => output::detail(&format_config_path(&path)),
        None => output::detail("global: <no config directory>"),
    }
    output::detail(&format_config_path(&local_config_path(project_dir)));
    Ok(())
}

fn format_config_path(path: &Path) -> String {
    let state = if path.exists() { "exists" } else { "missing" };
    format!("{} ({})", path.display(), state)
}
