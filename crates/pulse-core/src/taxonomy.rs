use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::post::{Category, OTHER_CATEGORY};
use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TaxonomyFile {
    pub categories: Vec<CategoryConfig>,
}

impl TaxonomyFile {
    /// Whether `name` is one of the configured categories (exact match).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Configured categories in file order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.categories
            .iter()
            .map(|c| Category::new(c.name.clone()))
            .collect()
    }
}

/// Load and validate the category taxonomy from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_taxonomy(path: &Path) -> Result<TaxonomyFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let taxonomy: TaxonomyFile = serde_yaml::from_str(&content)?;

    validate_taxonomy(&taxonomy)?;

    Ok(taxonomy)
}

fn validate_taxonomy(taxonomy: &TaxonomyFile) -> Result<(), ConfigError> {
    if taxonomy.categories.is_empty() {
        return Err(ConfigError::Validation(
            "taxonomy must list at least one category".to_string(),
        ));
    }

    let mut seen = HashSet::new();

    for category in &taxonomy.categories {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if name != category.name {
            return Err(ConfigError::Validation(format!(
                "category '{}' has leading or trailing whitespace",
                category.name
            )));
        }

        if name.eq_ignore_ascii_case(OTHER_CATEGORY) {
            return Err(ConfigError::Validation(format!(
                "'{OTHER_CATEGORY}' is reserved for the fallback category"
            )));
        }

        if !seen.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{name}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> CategoryConfig {
        CategoryConfig {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn validate_rejects_empty_taxonomy() {
        let taxonomy = TaxonomyFile { categories: vec![] };
        let err = validate_taxonomy(&taxonomy).unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let taxonomy = TaxonomyFile {
            categories: vec![category("  ")],
        };
        let err = validate_taxonomy(&taxonomy).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_padded_name() {
        let taxonomy = TaxonomyFile {
            categories: vec![category("Sports ")],
        };
        let err = validate_taxonomy(&taxonomy).unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn validate_rejects_reserved_other() {
        let taxonomy = TaxonomyFile {
            categories: vec![category("Sports"), category("other")],
        };
        let err = validate_taxonomy(&taxonomy).unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let taxonomy = TaxonomyFile {
            categories: vec![category("Sports"), category("sports")],
        };
        let err = validate_taxonomy(&taxonomy).unwrap_err();
        assert!(err.to_string().contains("duplicate category name"));
    }

    #[test]
    fn validate_accepts_valid_taxonomy() {
        let taxonomy = TaxonomyFile {
            categories: vec![category("Sports"), category("Crime & Safety")],
        };
        assert!(validate_taxonomy(&taxonomy).is_ok());
        assert!(taxonomy.contains("Sports"));
        assert!(!taxonomy.contains("sports"));
        assert_eq!(
            taxonomy.categories(),
            vec![Category::new("Sports"), Category::new("Crime & Safety")]
        );
    }

    #[test]
    fn load_taxonomy_reports_missing_file() {
        let err = load_taxonomy(Path::new("/nonexistent/categories.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::TaxonomyFileIo { .. }));
    }

    #[test]
    fn load_taxonomy_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.yaml");
        std::fs::write(&path, "categories: [unclosed").unwrap();
        let err = load_taxonomy(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TaxonomyFileParse(_)));
    }

    #[test]
    fn load_taxonomy_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("categories.yaml");
        assert!(
            path.exists(),
            "categories.yaml missing at {path:?}"
        );
        let taxonomy = load_taxonomy(&path).unwrap();
        assert_eq!(taxonomy.categories.len(), 6);
        assert!(taxonomy.contains("Economy & Cost of Living"));
    }
}
