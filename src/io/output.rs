use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::DocumentFormat;

/// Where the final project list is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }

    /// `-` means stdout, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            OutputDestination::Stdout
        } else {
            OutputDestination::file(raw)
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::default())
    }
}

/// Serialize `value` once and write it to every configured destination.
pub fn emit<T: Serialize + ?Sized>(value: &T, options: &OutputOptions) -> Result<()> {
    if options.destinations.is_empty() {
        return Ok(());
    }
    let payload = serialize_value(value, options)?;
    for destination in &options.destinations {
        write_payload(destination, &payload).with_context(|| match destination {
            OutputDestination::Stdout => "failed to write to stdout".to_string(),
            OutputDestination::File(path) => {
                format!("failed to write to file {}", path.display())
            }
        })?;
    }
    Ok(())
}

fn serialize_value<T: Serialize + ?Sized>(value: &T, options: &OutputOptions) -> Result<String> {
    match options.format {
        DocumentFormat::Json => {
            if options.pretty {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            } else {
                serde_json::to_string(value).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if options.pretty {
                toml::to_string_pretty(value).context("failed to serialize TOML")
            } else {
                toml::to_string(value).context("failed to serialize TOML")
            }
        }
    }
}

fn write_payload(destination: &OutputDestination, payload: &str) -> Result<()> {
    match destination {
        OutputDestination::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(payload.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
            Ok(())
        }
        OutputDestination::File(path) => {
            let mut file = File::create(path)?;
            file.write_all(payload.as_bytes())?;
            file.write_all(b"\n")?;
            file.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use serde_json::json;

    use super::*;
    use crate::board::{Project, ProjectRecord, ProjectsDocument};

    fn temp_path(name: &str, extension: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("projectboard-{name}-{nanos}.{extension}"))
    }

    fn unknown_effort_project() -> Project {
        Project::from_record("project-1", ProjectRecord::new("API", "Design the API", f64::NAN))
    }

    #[test]
    fn no_destinations_is_a_noop() {
        let options = OutputOptions::default().with_destinations(Vec::new());
        emit(&json!({"projects": []}), &options).unwrap();
    }

    #[test]
    fn dash_means_stdout() {
        assert_eq!(OutputDestination::parse("-"), OutputDestination::Stdout);
        assert_eq!(
            OutputDestination::parse("out.json"),
            OutputDestination::file("out.json")
        );
    }

    #[test]
    fn compact_json_lands_in_file() {
        let path = temp_path("compact", "json");
        let options = OutputOptions::default()
            .with_pretty(false)
            .with_destinations(vec![OutputDestination::file(&path)]);

        emit(&json!({"projects": [{"id": "project-1"}]}), &options).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"projects\":[{\"id\":\"project-1\"}]}\n");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn nan_effort_still_exports_as_json() {
        let path = temp_path("nan", "json");
        let options = OutputOptions::default()
            .with_pretty(false)
            .with_destinations(vec![OutputDestination::file(&path)]);
        let projects = [unknown_effort_project()];

        emit(&ProjectsDocument { projects: &projects }, &options).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(path);
        assert!(contents.contains(r#""id":"project-1""#), "{contents}");
        assert!(contents.contains(r#""manday":null"#), "{contents}");
    }

    #[cfg(feature = "toml")]
    #[test]
    fn nan_effort_exports_as_toml() {
        let path = temp_path("nan", "toml");
        let options = OutputOptions::new(DocumentFormat::Toml)
            .with_destinations(vec![OutputDestination::file(&path)]);
        let projects = [unknown_effort_project()];

        emit(&ProjectsDocument { projects: &projects }, &options).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(path);
        assert!(contents.contains("[[projects]]"), "{contents}");
        assert!(contents.contains("manday = nan"), "{contents}");
    }
}
