use std::path::Path;

use crate::error::GardenError;
use crate::models::plant::PlantCatalog;

const BUILTIN_CATALOG_JSON: &str = include_str!("catalog.json");

/// The catalog shipped with the binary.
pub fn builtin_catalog() -> Result<PlantCatalog, GardenError> {
    PlantCatalog::from_json(BUILTIN_CATALOG_JSON)
}

/// Reads and validates a catalog file in the `{ "categories": [...] }` format.
pub fn load_catalog_file(path: &Path) -> Result<PlantCatalog, GardenError> {
    let json = std::fs::read_to_string(path)?;
    PlantCatalog::from_json(&json)
}

/// Loads the catalog at `path` when one is configured, the built-in one otherwise.
pub fn load_catalog(path: Option<&Path>) -> Result<PlantCatalog, GardenError> {
    let catalog = match path {
        Some(path) => {
            log::info!("Loading plant catalog from {}", path.display());
            load_catalog_file(path)?
        }
        None => builtin_catalog()?,
    };
    log::info!(
        "Plant catalog ready: {} categories, {} variants",
        catalog.categories().len(),
        catalog.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::plant::{Footprint, Season};

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = builtin_catalog().unwrap();
        assert!(catalog.len() >= 10);
        assert!(catalog.variants().any(|v| v.footprint == Footprint::UNIT));
    }

    #[test]
    fn test_builtin_catalog_known_variants() {
        let catalog = builtin_catalog().unwrap();
        let rose = catalog.get("rose").unwrap();
        assert!(rose.blooms_in(Season::Spring));
        assert_eq!(rose.footprint, Footprint::UNIT);
        assert_eq!(
            catalog.get("hydrangea").unwrap().footprint,
            Footprint::new(2, 2)
        );
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "categories": [ {{ "id": "herbs", "name": "Herbs",
                "variants": [ {{ "id": "thyme", "name": "Thyme", "footprint": [1, 2] }} ] }} ] }}"#
        )
        .unwrap();
        let catalog = load_catalog(Some(file.path())).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.footprint_of("thyme"), Footprint::new(1, 2));
    }

    #[test]
    fn test_load_catalog_missing_file_is_io_error() {
        let result = load_catalog(Some(Path::new("/definitely/not/here.json")));
        assert!(matches!(result, Err(GardenError::Io(_))));
    }

    #[test]
    fn test_load_catalog_defaults_to_builtin() {
        let catalog = load_catalog(None).unwrap();
        assert!(catalog.get("lavender").is_some());
    }
}
