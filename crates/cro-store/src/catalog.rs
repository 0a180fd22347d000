//! Checklist catalog: inspection categories and their ordered item labels.
//!
//! The catalog is fixed at process start. Tasks reference categories by name
//! and the store clones item labels out of here when a task is created.

use std::collections::HashSet;
use std::path::Path;

use cro_core::entities::ChecklistCategory;
use cro_core::errors::CoreError;
use serde::Deserialize;

use crate::error::StoreError;

/// Seed categories carried by every field agent install.
const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Physical Site Inspections",
        &[
            "Temperature logs reviewed",
            "Storage conditions verified",
            "Equipment calibration checked",
            "Emergency protocols posted",
        ],
    ),
    (
        "Staff Training",
        &[
            "Protocol review completed",
            "GCP training verified",
            "Documentation procedures demonstrated",
            "Q&A session completed",
        ],
    ),
    (
        "Protocol Deviations",
        &[
            "Deviation type categorized",
            "Root cause analysis",
            "CAPA plan documented",
            "Regulatory reporting needed",
        ],
    ),
    (
        "Site Relationships",
        &[
            "Key staff contacts updated",
            "Communication preferences noted",
            "Upcoming milestones reviewed",
            "Site feedback collected",
        ],
    ),
    (
        "Trial Procedures",
        &[
            "Subject screening process",
            "Sample collection observed",
            "Data entry verified",
            "Protocol compliance confirmed",
        ],
    ),
    (
        "Staff Competency",
        &[
            "Role-specific assessments",
            "Required certifications verified",
            "Performance metrics reviewed",
            "Training needs identified",
        ],
    ),
];

/// On-disk layout: a list of `[[category]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "category")]
    categories: Vec<ChecklistCategory>,
}

/// Read-only registry of checklist categories, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistCatalog {
    categories: Vec<ChecklistCategory>,
}

impl ChecklistCatalog {
    /// Build a catalog, rejecting duplicate names, duplicate labels within a
    /// category, blank entries, and empty categories.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` describing the first violation.
    pub fn new(categories: Vec<ChecklistCategory>) -> Result<Self, CoreError> {
        let mut names = HashSet::new();
        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(CoreError::InvalidArgument(
                    "category name must not be blank".into(),
                ));
            }
            if !names.insert(category.name.as_str()) {
                return Err(CoreError::InvalidArgument(format!(
                    "duplicate category '{}'",
                    category.name
                )));
            }
            if category.items.is_empty() {
                return Err(CoreError::InvalidArgument(format!(
                    "category '{}' has no items",
                    category.name
                )));
            }
            let mut labels = HashSet::new();
            for label in &category.items {
                if label.trim().is_empty() {
                    return Err(CoreError::InvalidArgument(format!(
                        "category '{}' has a blank item label",
                        category.name
                    )));
                }
                if !labels.insert(label.as_str()) {
                    return Err(CoreError::InvalidArgument(format!(
                        "duplicate item '{label}' in category '{}'",
                        category.name
                    )));
                }
            }
        }
        Ok(Self { categories })
    }

    /// The six seed categories, four items each.
    #[must_use]
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, items)| ChecklistCategory {
                name: (*name).to_string(),
                items: items.iter().map(|label| (*label).to_string()).collect(),
            })
            .collect();
        Self { categories }
    }

    /// Parse a TOML catalog:
    ///
    /// ```toml
    /// [[category]]
    /// name = "Physical Site Inspections"
    /// items = ["Temperature logs reviewed", "Storage conditions verified"]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Catalog` on malformed TOML and `StoreError::Core`
    /// if the categories violate catalog invariants.
    pub fn from_toml_str(raw: &str) -> Result<Self, StoreError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Ok(Self::new(file.categories)?)
    }

    /// Load a TOML catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let catalog = Self::from_toml_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            categories = catalog.categories.len(),
            "loaded checklist catalog"
        );
        Ok(catalog)
    }

    /// Category names in registration order.
    #[must_use]
    pub fn list_categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Ordered item labels of a category.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the category is not registered.
    pub fn items_for(&self, category: &str) -> Result<&[String], CoreError> {
        self.category(category)
            .map(|c| c.items.as_slice())
            .ok_or_else(|| CoreError::category_not_found(category))
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&ChecklistCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    #[must_use]
    pub fn categories(&self) -> &[ChecklistCategory] {
        &self.categories
    }
}

impl Default for ChecklistCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cro_core::enums::EntityKind;
    use pretty_assertions::assert_eq;

    fn category(name: &str, items: &[&str]) -> ChecklistCategory {
        ChecklistCategory {
            name: name.into(),
            items: items.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn builtin_lists_categories_in_order() {
        let catalog = ChecklistCatalog::builtin();
        assert_eq!(
            catalog.list_categories(),
            vec![
                "Physical Site Inspections",
                "Staff Training",
                "Protocol Deviations",
                "Site Relationships",
                "Trial Procedures",
                "Staff Competency",
            ]
        );
    }

    #[test]
    fn builtin_satisfies_invariants() {
        let builtin = ChecklistCatalog::builtin();
        let rebuilt = ChecklistCatalog::new(builtin.categories().to_vec()).unwrap();
        assert_eq!(rebuilt, builtin);
    }

    #[test]
    fn items_for_preserves_order() {
        let catalog = ChecklistCatalog::builtin();
        let items = catalog.items_for("Physical Site Inspections").unwrap();
        assert_eq!(items[0], "Temperature logs reviewed");
        assert_eq!(items[3], "Emergency protocols posted");
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn items_for_unknown_category_is_not_found() {
        let catalog = ChecklistCatalog::builtin();
        let err = catalog.items_for("Pharmacy Audit").unwrap_err();
        assert_eq!(
            err,
            CoreError::NotFound {
                entity: EntityKind::Category,
                id: "Pharmacy Audit".into()
            }
        );
    }

    #[test]
    fn duplicate_labels_rejected() {
        let result = ChecklistCatalog::new(vec![category(
            "Trial Procedures",
            &["Data entry verified", "Data entry verified"],
        )]);
        assert!(matches!(result, Err(CoreError::InvalidArgument(msg)) if msg.contains("duplicate item")));
    }

    #[test]
    fn duplicate_categories_rejected() {
        let result = ChecklistCatalog::new(vec![
            category("Staff Training", &["GCP training verified"]),
            category("Staff Training", &["Q&A session completed"]),
        ]);
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn empty_category_rejected() {
        let result = ChecklistCatalog::new(vec![category("Site Relationships", &[])]);
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn parses_toml_catalog() {
        let catalog = ChecklistCatalog::from_toml_str(
            r#"
[[category]]
name = "Pharmacy"
items = ["Drug accountability log", "Temperature excursions"]

[[category]]
name = "Informed Consent"
items = ["Current ICF version on file"]
"#,
        )
        .unwrap();
        assert_eq!(catalog.list_categories(), vec!["Pharmacy", "Informed Consent"]);
        assert_eq!(
            catalog.items_for("Pharmacy").unwrap(),
            &["Drug accountability log", "Temperature excursions"]
        );
    }

    #[test]
    fn malformed_toml_is_catalog_error() {
        let err = ChecklistCatalog::from_toml_str("[[category]]\nname = 3").unwrap_err();
        assert!(matches!(err, StoreError::Catalog(_)));
    }

    #[test]
    fn invalid_toml_catalog_is_core_error() {
        let err = ChecklistCatalog::from_toml_str(
            "[[category]]\nname = \"X\"\nitems = [\"a\", \"a\"]",
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::InvalidArgument(_))));
    }
}
