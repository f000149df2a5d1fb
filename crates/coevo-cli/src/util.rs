use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use coevo_selection::config::SelectionConfig;

use crate::model::snapshot::GenerationSnapshot;

/// Destination of a JSON document: stdout or a file.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File { writer: BufWriter<File>, path: PathBuf },
}

impl Output {
    /// Writes `value` as pretty JSON to `path`, or to stdout when no path is given.
    pub fn save_json<T>(value: &T, path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::create(path)?;
        output.write_json(value)?;
        eprintln!("Saved to {}", output.display_path());
        Ok(())
    }

    pub fn create(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Output::Stdout(io::stdout().lock()));
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to finish writing {}", self.display_path()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read an evaluated generation (teams and points) from a JSON file
///
/// # Errors
///
/// Returns error if file cannot be opened or parsed
pub fn read_snapshot_file<P>(path: P) -> anyhow::Result<GenerationSnapshot>
where
    P: AsRef<Path>,
{
    read_json_file("snapshot", path)
}

/// Read selection parameters from a JSON file
///
/// Fields missing from the file keep their default values; unknown fields are
/// rejected.
///
/// # Errors
///
/// Returns error if file cannot be opened or parsed
pub fn read_config_file<P>(path: P) -> anyhow::Result<SelectionConfig>
where
    P: AsRef<Path>,
{
    read_json_file("selection config", path)
}
