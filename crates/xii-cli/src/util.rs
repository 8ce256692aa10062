use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::info;
use xii_core::Dataset;
use xii_search::config::SearchConfig;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
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

/// Read batting and bowling records from a JSON dataset file
///
/// # Errors
///
/// Returns error if the file cannot be opened, or if any record is missing a
/// required field
pub fn read_dataset_file<P>(path: P) -> anyhow::Result<Dataset>
where
    P: AsRef<Path>,
{
    let dataset: Dataset = read_json_file("dataset", &path)?;
    info!(
        "loaded {} batting and {} bowling records from {}",
        dataset.batting.len(),
        dataset.bowling.len(),
        path.as_ref().display()
    );
    Ok(dataset)
}

pub fn read_search_config_file<P>(path: P) -> anyhow::Result<SearchConfig>
where
    P: AsRef<Path>,
{
    read_json_file("search config", path)
}

/// Splits a comma- or newline-separated squad list into trimmed, non-empty names.
pub fn parse_squad(list: &str) -> Vec<String> {
    list.split([',', '\n'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn read_squad_file<P>(path: P) -> anyhow::Result<Vec<String>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read squad file: {}", path.display()))?;
    let squad = parse_squad(&text);
    anyhow::ensure!(!squad.is_empty(), "Squad file is empty: {}", path.display());
    Ok(squad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_squad() {
        assert_eq!(
            parse_squad(" V. Kohli,R. Sharma ,\n\nJ. Bumrah\r\n"),
            ["V. Kohli", "R. Sharma", "J. Bumrah"]
        );
        assert!(parse_squad(" , ").is_empty());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_dataset_file("no/such/venue_stats.json").unwrap_err();
        assert!(err.to_string().contains("Failed to open dataset file"));
        assert!(err.to_string().contains("venue_stats.json"));
    }
}
