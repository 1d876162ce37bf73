//! Compilation of LaTeX sources into PDF
//!
//! The compiler is an external process; its output is passed through
//! untouched when it fails.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::infrastructure::latex::LatexDocument;
use crate::infrastructure::traits::{CommandRunner, FileSystem};
use crate::infrastructure::InfraError;

/// Files removed after a successful compile unless intermediates are kept.
pub const INTERMEDIATE_EXTENSIONS: &[&str] = &["aux", "log", "out", "fls", "fdb_latexmk"];

/// Log lines asking for another pass.
const RERUN_MARKERS: &[&str] = &[
    "Rerun to get",
    "Rerun LaTeX",
    "Please rerun LaTeX",
];

/// Compiles LaTeX documents with the configured compiler.
pub struct CompileService {
    fs: Arc<dyn FileSystem>,
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl CompileService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        settings: Arc<Settings>,
    ) -> Self {
        Self { fs, cmd, settings }
    }

    fn is_latexmk(&self) -> bool {
        Path::new(&self.settings.compiler)
            .file_stem()
            .is_some_and(|s| s == "latexmk")
    }

    fn compiler_args(&self, output_dir: &Path, tex: &Path) -> Vec<String> {
        let mut args = Vec::new();
        if self.is_latexmk() {
            args.push("-pdf".to_string());
        }
        args.push("-interaction=nonstopmode".to_string());
        args.push(format!("-output-directory={}", output_dir.display()));
        args.push(tex.display().to_string());
        args
    }

    fn run_compiler(&self, args: &[String]) -> ApplicationResult<Output> {
        let compiler = &self.settings.compiler;
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        debug!("run_compiler: {} {:?}", compiler, args);

        let output = self.cmd.run(compiler, &args).map_err(|e| {
            let source = if e.kind() == io::ErrorKind::NotFound {
                InfraError::CompilerNotFound {
                    compiler: compiler.clone(),
                }
            } else {
                InfraError::io(format!("run {}", compiler), e)
            };
            ApplicationError::OperationFailed {
                context: format!("run {}", compiler),
                source: Box::new(source),
            }
        })?;

        if !output.status.success() {
            let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
            log.push_str(&String::from_utf8_lossy(&output.stderr));
            warn!("run_compiler: {} exited with {:?}", compiler, output.status.code());
            return Err(ApplicationError::OperationFailed {
                context: format!("compile with {}", compiler),
                source: Box::new(InfraError::Compile {
                    compiler: compiler.clone(),
                    exit_code: output.status.code(),
                    log,
                }),
            });
        }
        Ok(output)
    }

    fn needs_rerun(output: &Output) -> bool {
        let stdout = String::from_utf8_lossy(&output.stdout);
        RERUN_MARKERS.iter().any(|m| stdout.contains(m))
    }

    /// Write `<stem>.tex` into `output_dir`, compile it and return the PDF path.
    ///
    /// Other compilers than latexmk are run a second time when the first
    /// pass asks for it. Intermediate files are removed afterwards unless
    /// `keep_intermediate` is set; the source goes only when `keep_tex` is off.
    #[instrument(level = "debug", skip(self, doc))]
    pub fn compile(
        &self,
        doc: &LatexDocument,
        output_dir: &Path,
        stem: &str,
    ) -> ApplicationResult<PathBuf> {
        self.fs
            .create_dir_all(output_dir)
            .with_path_context("create output directory", output_dir)?;

        let tex = output_dir.join(format!("{}.tex", stem));
        self.fs
            .write(&tex, &doc.dumps())
            .with_path_context("write LaTeX source", &tex)?;

        let args = self.compiler_args(output_dir, &tex);
        let output = self.run_compiler(&args)?;
        if !self.is_latexmk() && Self::needs_rerun(&output) {
            debug!("compile: rerun requested");
            self.run_compiler(&args)?;
        }

        if !self.settings.keep_intermediate {
            self.clean(output_dir, stem)?;
        }
        if !self.settings.keep_tex {
            self.remove_if_exists(&tex)?;
        }

        let pdf = output_dir.join(format!("{}.pdf", stem));
        info!("compiled {}", pdf.display());
        Ok(pdf)
    }

    /// Remove intermediate files of `stem` that exist. The `.tex` source is left alone.
    pub fn clean(&self, output_dir: &Path, stem: &str) -> ApplicationResult<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for ext in INTERMEDIATE_EXTENSIONS {
            let path = output_dir.join(format!("{}.{}", stem, ext));
            if self.remove_if_exists(&path)? {
                removed.push(path);
            }
        }
        debug!("clean: removed {} files", removed.len());
        Ok(removed)
    }

    fn remove_if_exists(&self, path: &Path) -> ApplicationResult<bool> {
        if !self.fs.exists(path) {
            return Ok(false);
        }
        self.fs
            .remove_file(path)
            .with_path_context("remove generated file", path)?;
        Ok(true)
    }
}
