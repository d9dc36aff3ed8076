//! Categories and the color → category mapping.
//!
//! Users label palette colors once (e.g. Lavender → "Study"). The mapping is
//! stored as a flat JSON object keyed by color name:
//!
//! ```json
//! { "Lavender": "Study", "Tomato": "Exercise" }
//! ```
//!
//! At report time the event source's own color identifiers are resolved
//! through their background hex code: id → hex → palette color → label.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::DEFAULT_CATEGORY;
use crate::error::{InsightsError, InsightsResult};
use crate::palette::PaletteColor;

/// A user-defined activity label that time is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Category(label.into())
    }

    /// The fallback category ("Work").
    pub fn fallback() -> Self {
        Category(DEFAULT_CATEGORY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Labels assigned to palette colors. Colors without a label fall back to
/// the default category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryMapping {
    labels: BTreeMap<PaletteColor, Category>,
}

impl CategoryMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a label to a color. A blank label leaves the color unassigned.
    pub fn assign(&mut self, color: PaletteColor, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            self.labels.remove(&color);
        } else {
            self.labels.insert(color, Category::new(label));
        }
    }

    /// The label for a color, ignoring blank labels from hand-edited files.
    pub fn label_for(&self, color: PaletteColor) -> Option<&Category> {
        self.labels
            .get(&color)
            .filter(|category| !category.as_str().trim().is_empty())
    }

    fn len(&self) -> usize {
        self.labels.len()
    }

    /// Load the mapping from `path`. Returns `None` if the file doesn't exist yet.
    pub fn load(path: &Path) -> InsightsResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)?;
        let mapping: CategoryMapping = serde_json::from_str(&contents).map_err(|e| {
            InsightsError::CategoryMapping(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(Some(mapping))
    }

    /// Write the mapping to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> InsightsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| InsightsError::Serialization(e.to_string()))?;
        std::fs::write(path, contents)?;

        tracing::debug!(path = %path.display(), colors = self.len(), "saved category mapping");
        Ok(())
    }

    /// Category for a background hex code: hex → palette color → label,
    /// falling back to the default category at either step.
    pub fn category_for_hex(&self, hex: &str) -> Category {
        PaletteColor::from_hex(hex)
            .and_then(|color| self.label_for(color))
            .cloned()
            .unwrap_or_else(Category::fallback)
    }

    /// Resolve the event source's color identifiers (id → background hex) to
    /// categories.
    pub fn resolve_color_ids(&self, id_to_hex: &HashMap<String, String>) -> HashMap<String, Category> {
        id_to_hex
            .iter()
            .map(|(id, hex)| (id.clone(), self.category_for_hex(hex)))
            .collect()
    }
}

/// Keys are matched to palette colors by name, ignoring case. Keys that name
/// no palette color are skipped with a warning.
impl<'de> Deserialize<'de> for CategoryMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Category>::deserialize(deserializer)?;

        let mut labels = BTreeMap::new();
        for (key, category) in raw {
            match PaletteColor::from_name(&key) {
                Some(color) => {
                    labels.insert(color, category);
                }
                None => tracing::warn!(key = %key, "ignoring unknown color in category mapping"),
            }
        }

        Ok(CategoryMapping { labels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mapping() -> CategoryMapping {
        let mut mapping = CategoryMapping::new();
        mapping.assign(PaletteColor::Lavender, "Study");
        mapping.assign(PaletteColor::Tomato, "Exercise");
        mapping
    }

    #[test]
    fn test_category_for_known_hex() {
        let mapping = sample_mapping();
        assert_eq!(mapping.category_for_hex("#a4bdfc"), Category::new("Study"));
        assert_eq!(mapping.category_for_hex("#DC2127"), Category::new("Exercise"));
    }

    #[test]
    fn test_category_for_unlabelled_color_falls_back() {
        let mapping = sample_mapping();
        // Sage is a palette color the user never labelled
        assert_eq!(mapping.category_for_hex("#7ae7bf"), Category::fallback());
    }

    #[test]
    fn test_category_for_unknown_hex_falls_back() {
        let mapping = sample_mapping();
        assert_eq!(mapping.category_for_hex("#000000"), Category::new("Work"));
    }

    #[test]
    fn test_resolve_color_ids() {
        let mapping = sample_mapping();
        let id_to_hex: HashMap<String, String> = [
            ("1".to_string(), "#a4bdfc".to_string()),
            ("2".to_string(), "#7ae7bf".to_string()),
            ("11".to_string(), "#dc2127".to_string()),
            ("99".to_string(), "#abcdef".to_string()),
        ]
        .into_iter()
        .collect();

        let resolved = mapping.resolve_color_ids(&id_to_hex);
        assert_eq!(resolved.len(), 4);
        assert_eq!(resolved["1"], Category::new("Study"));
        assert_eq!(resolved["2"], Category::fallback());
        assert_eq!(resolved["11"], Category::new("Exercise"));
        assert_eq!(resolved["99"], Category::fallback());
    }

    #[test]
    fn test_blank_label_leaves_color_unassigned() {
        let mut mapping = sample_mapping();
        mapping.assign(PaletteColor::Lavender, "   ");
        assert_eq!(mapping.label_for(PaletteColor::Lavender), None);
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_blank_label_in_file_is_ignored() {
        let mapping: CategoryMapping =
            serde_json::from_str(r#"{"Lavender": "", "Basil": "Reading"}"#).unwrap();
        assert_eq!(mapping.category_for_hex("#a4bdfc"), Category::fallback());
        assert_eq!(mapping.category_for_hex("#51b749"), Category::new("Reading"));
    }

    #[test]
    fn test_unknown_color_keys_are_skipped() {
        let mapping: CategoryMapping = serde_json::from_str(
            r#"{"lavender": "Study", "Turquoise": "Chores", "TOMATO": "Exercise"}"#,
        )
        .unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.category_for_hex("#a4bdfc"), Category::new("Study"));
        assert_eq!(mapping.category_for_hex("#dc2127"), Category::new("Exercise"));
    }

    #[test]
    fn test_load_tolerates_hand_edited_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(&path, r#"{"Basil": "Reading", "Mauve": "Nap"}"#).unwrap();

        let loaded = CategoryMapping::load(&path).unwrap().unwrap();
        assert_eq!(loaded.label_for(PaletteColor::Basil), Some(&Category::new("Reading")));
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("categories.json");

        assert!(CategoryMapping::load(&path).unwrap().is_none());

        let mapping = sample_mapping();
        mapping.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Lavender\": \"Study\""));

        let loaded = CategoryMapping::load(&path).unwrap().unwrap();
        assert_eq!(loaded, mapping);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            CategoryMapping::load(&path),
            Err(InsightsError::CategoryMapping(_))
        ));
    }
}
