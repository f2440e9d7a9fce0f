use std::io::Read;
use std::path::Path;

use crate::error::EtlError;
use crate::models::RawRow;

/// Read a CSV file into raw rows keyed by trimmed, lower-cased header.
///
/// A missing file is not an error: it is logged and yields no rows.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, EtlError> {
    if !path.exists() {
        log::warn!("[ETL] File not found: {}", path.display());
        return Ok(Vec::new());
    }

    let to_err = |source: csv::Error| EtlError::Read {
        path: path.to_path_buf(),
        source,
    };

    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(to_err)?;

    let rows = rows_from_reader(reader).map_err(to_err)?;
    log::info!("[ETL] Read {} rows from {}", rows.len(), path.display());

    Ok(rows)
}

fn rows_from_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawRow>, csv::Error> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn headers_are_lowercased_and_short_rows_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        std::fs::write(
            &path,
            "ID, Title ,Category\n1, Read ,Study\n2,Write\n",
        )
        .unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id").map(String::as_str), Some("1"));
        assert_eq!(rows[0].get("title").map(String::as_str), Some("Read"));
        assert_eq!(rows[0].get("category").map(String::as_str), Some("Study"));
        assert_eq!(rows[1].get("category"), None);
    }

    #[test]
    fn missing_file_yields_no_rows() {
        let dir = tempdir().unwrap();
        let rows = read_rows(&dir.path().join("absent.csv")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finance.csv");
        std::fs::write(&path, b"date,amount\n2025-01-01,\xff\xfe\n").unwrap();

        match read_rows(&path) {
            Err(EtlError::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected read error, got {:?}", other),
        }
    }
}
