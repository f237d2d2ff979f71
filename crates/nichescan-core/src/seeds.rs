use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, KeywordTask};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedsFile {
    pub categories: Vec<SeedCategory>,
}

impl SeedsFile {
    /// Flatten the category map into the ordered task list fed to the scanner.
    #[must_use]
    pub fn tasks(&self) -> Vec<KeywordTask> {
        self.categories
            .iter()
            .flat_map(|cat| {
                cat.keywords.iter().map(|kw| KeywordTask {
                    keyword: kw.clone(),
                    category: cat.name.clone(),
                })
            })
            .collect()
    }
}

/// Load and validate the seed keyword configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seeds(path: &Path) -> Result<SeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let seeds_file: SeedsFile = serde_yaml::from_str(&content)?;

    validate_seeds(&seeds_file)?;

    Ok(seeds_file)
}

fn validate_seeds(seeds_file: &SeedsFile) -> Result<(), ConfigError> {
    if seeds_file.categories.is_empty() {
        return Err(ConfigError::Validation(
            "seeds file must contain at least one category".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for category in &seeds_file.categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(category.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category name: '{}'",
                category.name
            )));
        }

        if category.keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no keywords",
                category.name
            )));
        }

        for keyword in &category.keywords {
            if keyword.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{}' contains an empty keyword",
                    category.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds_from_yaml(yaml: &str) -> Result<SeedsFile, ConfigError> {
        let seeds: SeedsFile = serde_yaml::from_str(yaml)?;
        validate_seeds(&seeds)?;
        Ok(seeds)
    }

    #[test]
    fn parses_valid_seeds() {
        let seeds = seeds_from_yaml(
            r"
categories:
  - name: supplements
    keywords:
      - magnesium glycinate
      - ashwagandha
  - name: gut_health
    keywords:
      - bone broth
",
        )
        .unwrap();

        assert_eq!(seeds.categories.len(), 2);
        let tasks = seeds.tasks();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].keyword, "magnesium glycinate");
        assert_eq!(tasks[0].category, "supplements");
        assert_eq!(tasks[2].category, "gut_health");
    }

    #[test]
    fn rejects_empty_categories() {
        let result = seeds_from_yaml("categories: []");
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn rejects_duplicate_category_names() {
        let result = seeds_from_yaml(
            r"
categories:
  - name: supplements
    keywords: [zinc]
  - name: Supplements
    keywords: [creatine]
",
        );
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
            "expected duplicate-category error, got: {result:?}"
        );
    }

    #[test]
    fn rejects_category_without_keywords() {
        let result = seeds_from_yaml(
            r"
categories:
  - name: supplements
    keywords: []
",
        );
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("no keywords")),
            "expected empty-keywords error, got: {result:?}"
        );
    }

    #[test]
    fn rejects_blank_keyword() {
        let result = seeds_from_yaml(
            r#"
categories:
  - name: supplements
    keywords: ["  "]
"#,
        );
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn task_identity_is_lowercased() {
        let task = KeywordTask {
            keyword: "PCOS".to_string(),
            category: "womens_health".to_string(),
        };
        assert_eq!(task.identity(), "pcos");
    }
}
