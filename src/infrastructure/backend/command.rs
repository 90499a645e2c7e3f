//! Command Backend
//!
//! Drives an external compiler program. Each invocation gets a fresh
//! staging directory:
//!
//! - `src/` holds one file per submitted unit
//! - `lib/` holds the already-compiled artifacts (only with a link flag)
//! - `out/` receives whatever the program emits
//!
//! Every file under `out/` with the artifact extension becomes an artifact
//! named after its relative path; a path matching a submitted unit keeps
//! that unit's exact name. Names listed one per line in `out/PROCESSORS` are
//! marked as extension processors.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::entities::{CompiledArtifact, SourceUnit};
use crate::domain::ports::{BackendError, BackendOutput, CompileRequest, CompilerBackend};
use crate::domain::value_objects::QualifiedName;
use crate::infrastructure::store::ArtifactDirectory;

/// Settings for a [`CommandBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Flag preceding the comma-joined processor list; omitted when no processors
    pub processor_flag: String,
    /// Flag preceding the output directory
    pub output_flag: String,
    /// Flag preceding the directory of already-compiled artifacts
    pub link_flag: Option<String>,
    pub source_extension: String,
    pub artifact_extension: String,
    /// Separator used to rebuild names from output paths
    pub separator: char,
    pub concurrent: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            processor_flag: "--processors".to_string(),
            output_flag: "--out".to_string(),
            link_flag: None,
            source_extension: "src".to_string(),
            artifact_extension: "bin".to_string(),
            separator: '/',
            concurrent: false,
        }
    }
}

/// Compiler backend that shells out to an external program
pub struct CommandBackend {
    spec: CommandSpec,
}

impl CommandBackend {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn relative_path(name: &QualifiedName, extension: &str) -> PathBuf {
        let mut path: PathBuf = name.segments().collect();
        path.set_extension(extension);
        path
    }

    fn stage_sources(&self, units: &[SourceUnit], dir: &Path) -> Result<Vec<PathBuf>, BackendError> {
        let mut paths = Vec::with_capacity(units.len());
        for unit in units {
            let path = dir.join(Self::relative_path(unit.name(), &self.spec.source_extension));
            write_file(&path, unit.text().as_bytes())?;
            paths.push(path);
        }
        Ok(paths)
    }

    fn stage_library(&self, artifacts: &[CompiledArtifact], dir: &Path) -> Result<(), BackendError> {
        self.artifact_dir(dir)
            .save(artifacts)
            .map_err(|e| BackendError::new(e.to_string()))
    }

    fn artifact_dir(&self, root: &Path) -> ArtifactDirectory {
        ArtifactDirectory::new(root, self.spec.artifact_extension.as_str())
            .with_separator(self.spec.separator)
    }

    fn build_command(
        &self,
        request: &CompileRequest<'_>,
        sources: &[PathBuf],
        out_dir: &Path,
        lib_dir: &Path,
    ) -> Command {
        let mut cmd = Command::new(&self.spec.program);
        cmd.args(&self.spec.args);

        if let Some(value) = request.processors.option_value() {
            cmd.arg(&self.spec.processor_flag).arg(value);
        }
        if let Some(flag) = &self.spec.link_flag {
            cmd.arg(flag).arg(lib_dir);
        }
        cmd.arg(&self.spec.output_flag)
            .arg(out_dir)
            .args(sources)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Collect every artifact under `out_dir`
    fn collect(
        &self,
        out_dir: &Path,
        units: &[SourceUnit],
    ) -> Result<Vec<CompiledArtifact>, BackendError> {
        self.artifact_dir(out_dir)
            .with_known_names(units.iter().map(|u| u.name().clone()))
            .load()
            .map_err(|e| BackendError::new(format!("unusable backend output: {e}")))
    }
}

impl CompilerBackend for CommandBackend {
    fn name(&self) -> &'static str {
        "command"
    }

    fn compile(&self, request: &CompileRequest<'_>) -> Result<BackendOutput, BackendError> {
        let staging = tempfile::tempdir()
            .map_err(|e| BackendError::new(format!("failed to create staging dir: {e}")))?;
        let src_dir = staging.path().join("src");
        let lib_dir = staging.path().join("lib");
        let out_dir = staging.path().join("out");
        fs::create_dir_all(&out_dir).map_err(|e| io_error("create output dir", &out_dir, e))?;

        let sources = self.stage_sources(request.units, &src_dir)?;
        if self.spec.link_flag.is_some() {
            self.stage_library(&request.store.snapshot(), &lib_dir)?;
        }

        let output = self
            .build_command(request, &sources, &out_dir, &lib_dir)
            .output()
            .map_err(|e| BackendError::new(format!("failed to run {}: {e}", self.spec.program)))?;

        let diagnostics: Vec<String> = String::from_utf8_lossy(&output.stderr)
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();

        if !output.status.success() {
            let partial = self.collect(&out_dir, request.units).unwrap_or_default();
            return Err(BackendError::new(format!(
                "{} exited with {}",
                self.spec.program, output.status
            ))
            .with_diagnostics(diagnostics)
            .with_partial(partial));
        }

        Ok(BackendOutput {
            artifacts: self.collect(&out_dir, request.units)?,
            diagnostics,
        })
    }

    fn supports_concurrent_invocation(&self) -> bool {
        self.spec.concurrent
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), BackendError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create dir", parent, e))?;
    }
    fs::write(path, contents).map_err(|e| io_error("write", path, e))
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> BackendError {
    BackendError::new(format!("failed to {action} {}: {err}", path.display()))
}
