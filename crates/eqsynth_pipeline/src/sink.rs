//! Delivering generated units to a build.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use eqsynth_cache::GeneratedUnit;
use eqsynth_codegen::GENERATED_HEADER;

/// Errors raised while writing generated units.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// A filesystem operation failed.
    #[error("failed to write generated output {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}

/// What a sink did with one unit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SinkOutcome {
    /// The unit's text was stored.
    Written,
    /// The sink already held identical text under the same key.
    Unchanged,
}

/// Accepts generated units and makes them part of a build.
pub trait OutputSink {
    /// Stores `unit` under its output key, replacing any previous text.
    fn emit(&mut self, unit: &GeneratedUnit) -> Result<SinkOutcome, SinkError>;
}

/// Counts of what [`emit_all`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Units whose text was stored.
    pub written: usize,
    /// Units the sink already held.
    pub unchanged: usize,
}

/// Emits every unit into `sink`, stopping at the first error.
pub fn emit_all<'a, S, I>(sink: &mut S, units: I) -> Result<EmitSummary, SinkError>
where
    S: OutputSink + ?Sized,
    I: IntoIterator<Item = &'a GeneratedUnit>,
{
    let mut summary = EmitSummary::default();
    for unit in units {
        match sink.emit(unit)? {
            SinkOutcome::Written => summary.written += 1,
            SinkOutcome::Unchanged => summary.unchanged += 1,
        }
    }
    Ok(summary)
}

/// Keeps emitted units in memory, keyed by output key.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    units: BTreeMap<String, String>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text stored under `output_key`.
    pub fn get(&self, output_key: &str) -> Option<&str> {
        self.units.get(output_key).map(String::as_str)
    }

    /// Stored output keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Number of stored units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn emit(&mut self, unit: &GeneratedUnit) -> Result<SinkOutcome, SinkError> {
        if self.get(&unit.output_key) == Some(unit.text.as_str()) {
            return Ok(SinkOutcome::Unchanged);
        }
        self.units.insert(unit.output_key.clone(), unit.text.clone());
        Ok(SinkOutcome::Written)
    }
}

/// Writes each unit to `<dir>/<output_key>.<extension>`.
///
/// Files whose content already matches are left untouched so their
/// modification times do not trigger downstream rebuilds.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    extension: String,
}

impl DirectorySink {
    /// Creates a sink writing into `dir` with the given file extension.
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a unit with `output_key` is written to.
    pub fn path_for(&self, output_key: &str) -> PathBuf {
        self.dir.join(format!("{output_key}.{}", self.extension))
    }

    /// Removes generated files in the output directory whose key is not in
    /// `keep`, returning how many were removed.
    ///
    /// Only files with this sink's extension that start with the generated
    /// header are considered; anything else in the directory is left alone.
    pub fn prune<'a, I>(&self, keep: I) -> Result<usize, SinkError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keep: BTreeSet<PathBuf> = keep.into_iter().map(|key| self.path_for(key)).collect();
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(&self.dir, e)),
        };

        let suffix = format!(".{}", self.extension);
        let mut removed = 0;
        for entry in entries {
            let path = entry.map_err(|e| self.io_error(&self.dir, e))?.path();
            let is_candidate = path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(&suffix));
            if !is_candidate || keep.contains(&path) || !is_generated(&path) {
                continue;
            }
            std::fs::remove_file(&path).map_err(|e| self.io_error(&path, e))?;
            tracing::debug!(path = %path.display(), "removed stale generated file");
            removed += 1;
        }
        Ok(removed)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> SinkError {
        SinkError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl OutputSink for DirectorySink {
    fn emit(&mut self, unit: &GeneratedUnit) -> Result<SinkOutcome, SinkError> {
        let path = self.path_for(&unit.output_key);
        if std::fs::read_to_string(&path).is_ok_and(|existing| existing == unit.text) {
            tracing::trace!(path = %path.display(), "generated file unchanged");
            return Ok(SinkOutcome::Unchanged);
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| self.io_error(&self.dir, e))?;
        std::fs::write(&path, &unit.text).map_err(|e| self.io_error(&path, e))?;
        tracing::trace!(path = %path.display(), "wrote generated file");
        Ok(SinkOutcome::Written)
    }
}

fn is_generated(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .map(|text| text.lines().next() == Some(GENERATED_HEADER))
        .unwrap_or(false)
}
