//! Reading and writing JSON element documents.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use dalton_core::StyledElement;

/// Load a JSON array of elements.
pub fn load(path: &Path) -> anyhow::Result<Vec<StyledElement>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading document {}", path.display()))?;
    let elements: Vec<StyledElement> = serde_json::from_str(&json)
        .with_context(|| format!("parsing document {}", path.display()))?;
    tracing::debug!(count = elements.len(), path = %path.display(), "document loaded");
    Ok(elements)
}

/// Write elements as pretty JSON to `path`, or stdout when `None`.
pub fn write(elements: &[StyledElement], path: Option<&Path>) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(elements)?;
    json.push('\n');
    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing document {}", path.display())),
        None => {
            std::io::stdout().write_all(json.as_bytes())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.json");
        std::fs::write(
            &input,
            r##"[{"id": "h1", "color": "#336699"}, {"id": "nav", "read_only": true}]"##,
        )
        .unwrap();

        let elements = load(&input).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0], StyledElement::new("h1", "#336699"));

        let output = dir.path().join("out.json");
        write(&elements, Some(&output)).unwrap();
        assert_eq!(load(&output).unwrap(), elements);
    }

    #[test]
    fn test_malformed_document_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        std::fs::write(&input, "{not json").unwrap();
        let err = load(&input).unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }
}
