//! JSON catalog files.
//!
//! A catalog file has the same shape as a serialized [`Document`]; `id`,
//! `title`, `selected` and `unlocked` may be omitted.

use crate::validate::{validate, CatalogReport};
use crate::{CatalogError, Result};
use aurelia_core::Document;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Parse a catalog from JSON text.
pub fn from_json(json: &str) -> Result<Document> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a catalog to pretty JSON.
pub fn to_json(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Load a catalog file.
pub async fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    debug!("Reading catalog {}", path.display());

    let json = fs::read_to_string(path).await?;
    let document = from_json(&json)?;

    info!(
        "Loaded catalog '{}' ({} elements, {} phases) from {}",
        document.title,
        document.elements.len(),
        document.phases.len(),
        path.display()
    );
    Ok(document)
}

/// Load a catalog file and refuse it if validation finds errors.
pub async fn load_validated(path: impl AsRef<Path>) -> Result<(Document, CatalogReport)> {
    let document = load_document(path).await?;
    let report = validate(&document);
    if !report.is_valid() {
        return Err(CatalogError::Invalid(report));
    }
    Ok((document, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[tokio::test]
    async fn test_load_seed_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let seed = seed::document();
        fs::write(&path, to_json(&seed).unwrap()).await.unwrap();

        let loaded = load_document(&path).await.unwrap();
        assert_eq!(loaded, seed);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").await.unwrap();

        let err = load_document(&path).await.unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[tokio::test]
    async fn test_load_validated_rejects_cycles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyclic.json");
        let json = r#"{
            "phases": [
                { "hierarchy": "wellness", "layer": 2, "name": "Techniques", "description": "" }
            ],
            "elements": [
                { "id": "a", "name": "A", "description": "", "hierarchy": "wellness",
                  "layer": 2, "category": "Techniques", "dependencies": ["b"] },
                { "id": "b", "name": "B", "description": "", "hierarchy": "wellness",
                  "layer": 2, "category": "Techniques", "dependencies": ["a"] }
            ]
        }"#;
        fs::write(&path, json).await.unwrap();

        match load_validated(&path).await {
            Err(CatalogError::Invalid(report)) => assert_eq!(report.cycles().len(), 1),
            other => panic!("expected invalid catalog, got {:?}", other.map(|(d, _)| d.title)),
        }
    }

    #[test]
    fn test_minimal_catalog_defaults() {
        let json = r#"{
            "phases": [
                { "hierarchy": "aesthetic", "layer": 3, "name": "Settings", "description": "Places" }
            ],
            "elements": [
                { "id": "se1", "name": "Forest", "description": "", "hierarchy": "aesthetic",
                  "layer": 3, "category": "Settings" }
            ]
        }"#;
        let doc = from_json(json).unwrap();
        assert!(doc.title.is_empty());
        assert!(doc.phases[0].requirements.is_empty());
        assert!(!doc.elements[0].unlocked);
    }
}
