//! Builds a persisted catalog from a CSV source.
//!
//! Sources may be a local `.csv` file, an `http(s)://` URL, or a `.zip` archive (local or
//! remote) whose first `.csv` entry holds the table.

use crate::catalog::Catalog;
use crate::error::Error;
use crate::source::parse_csv;
use std::io::Read;
use std::path::Path;

/// Error type for catalog building.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The table was fetched but is not a valid catalog.
    #[error(transparent)]
    Catalog(#[from] Error),
    /// The source is not UTF-8 text.
    #[error("{0} is not valid UTF-8")]
    Encoding(String),
    /// A zip source holds no `.csv` entry.
    #[error("archive holds no .csv entry")]
    EmptyArchive,
    /// IO error reading the source or writing the output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A remote source could not be fetched.
    #[error("failed to fetch source: {0}")]
    Http(#[from] reqwest::Error),
    /// A zipped source could not be read.
    #[error("failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

type Result<T> = std::result::Result<T, BuildError>;

/// Fetches, parses and encodes a neighborhood table.
#[derive(Debug, Default)]
pub struct Builder {
    client: Option<reqwest::blocking::Client>,
}

impl Builder {
    /// Creates a builder. The HTTP client is created on first remote fetch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `source` into a validated catalog.
    pub fn load(&mut self, source: &str) -> Result<Catalog> {
        tracing::info!(source, "Fetching neighborhood table");
        let bytes = self.fetch(source)?;

        let bytes = if is_zip(source) {
            extract_csv(bytes)?
        } else {
            bytes
        };

        let text = String::from_utf8(bytes).map_err(|_| BuildError::Encoding(source.to_string()))?;
        let catalog = parse_csv(&text)?;
        tracing::info!(count = catalog.len(), "Parsed neighborhood table");
        Ok(catalog)
    }

    /// Loads `source` and writes the encoded catalog to `output_path`.
    pub fn build(&mut self, source: &str, output_path: impl AsRef<Path>) -> Result<Catalog> {
        let catalog = self.load(source)?;
        let encoded = catalog.to_bytes()?;
        std::fs::write(output_path.as_ref(), &encoded)?;
        tracing::info!(
            path = %output_path.as_ref().display(),
            bytes = encoded.len(),
            "Wrote catalog"
        );
        Ok(catalog)
    }

    fn fetch(&mut self, source: &str) -> Result<Vec<u8>> {
        if !is_remote(source) {
            return Ok(std::fs::read(source)?);
        }
        let client = self.client.get_or_insert_with(reqwest::blocking::Client::new);
        let response = client.get(source).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn is_zip(source: &str) -> bool {
    source.to_ascii_lowercase().ends_with(".zip")
}

fn extract_csv(bytes: Vec<u8>) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if !file.name().to_ascii_lowercase().ends_with(".csv") {
            continue;
        }
        tracing::debug!(entry = %file.name(), "Extracting table from archive");
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        return Ok(content);
    }
    Err(BuildError::EmptyArchive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = "dnid,dnname,dnlatitude,dnlongitude,dnradius\n\
                         1111010100,Cheongun-dong,37.5871,126.9695,0.6\n";

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("dongnae-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_source_kind() {
        assert!(is_remote("https://example.org/dongnae.csv"));
        assert!(!is_remote("data/dongnae.csv"));
        assert!(is_zip("data/DONGNAE.ZIP"));
        assert!(!is_zip("data/dongnae.csv"));
    }

    #[test]
    fn test_build_from_local_csv() {
        let input = temp_path("input.csv");
        let output = temp_path("output.bin");
        std::fs::write(&input, TABLE).unwrap();

        let catalog = Builder::new()
            .build(input.to_str().unwrap(), &output)
            .unwrap();
        let decoded = Catalog::from_bytes(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(decoded.columns(), catalog.columns());

        let _ = std::fs::remove_file(input);
        let _ = std::fs::remove_file(output);
    }

    #[test]
    fn test_load_from_zip() {
        let input = temp_path("input.zip");
        let mut writer = zip::ZipWriter::new(std::fs::File::create(&input).unwrap());
        writer
            .start_file("dongnae.csv", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(TABLE.as_bytes()).unwrap();
        writer.finish().unwrap();

        let catalog = Builder::new().load(input.to_str().unwrap()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.index_of("1111010100"), Some(0));

        let _ = std::fs::remove_file(input);
    }

    #[test]
    fn test_zip_uses_first_csv_entry() {
        let input = temp_path("ordered.zip");
        let mut writer = zip::ZipWriter::new(std::fs::File::create(&input).unwrap());
        let options = zip::write::SimpleFileOptions::default;
        writer.start_file("README.txt", options()).unwrap();
        writer.write_all(b"not a table").unwrap();
        writer.start_file("z-current.csv", options()).unwrap();
        writer.write_all(TABLE.as_bytes()).unwrap();
        writer.start_file("a-legacy.csv", options()).unwrap();
        writer
            .write_all(b"dnid,dnname,dnlatitude,dnlongitude,dnradius\n9,Old-dong,37.0,127.0,1.0\n")
            .unwrap();
        writer.finish().unwrap();

        let catalog = Builder::new().load(input.to_str().unwrap()).unwrap();
        assert_eq!(catalog.columns().ids, vec!["1111010100"]);

        let _ = std::fs::remove_file(input);
    }

    #[test]
    fn test_zip_without_csv() {
        let input = temp_path("empty.zip");
        let mut writer = zip::ZipWriter::new(std::fs::File::create(&input).unwrap());
        writer
            .start_file("README.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"not a table").unwrap();
        writer.finish().unwrap();

        let result = Builder::new().load(input.to_str().unwrap());
        assert!(matches!(result, Err(BuildError::EmptyArchive)));

        let _ = std::fs::remove_file(input);
    }

    #[test]
    fn test_missing_file() {
        let result = Builder::new().load("/nonexistent/dongnae.csv");
        assert!(matches!(result, Err(BuildError::Io(_))));
    }
}
