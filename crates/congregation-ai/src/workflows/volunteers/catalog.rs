use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::domain::normalize_tag;

/// A role a category needs filled, with the tags that suggest a volunteer for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Keyword and role tables for one ministry category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub adjacent_keywords: Vec<String>,
    pub roles: Vec<RoleSpec>,
}

/// Category label -> keyword/role tables, loaded from configuration instead of inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    categories: BTreeMap<String, CategoryProfile>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read category catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("category catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("category catalog must define at least one category")]
    Empty,
    #[error("category '{0}' must list at least one role")]
    MissingRoles(String),
}

const SERVICE_GIFTS: [&str; 4] = ["servicio", "ayuda", "administración", "liderazgo"];

fn role(label: &str, keywords: &[&str]) -> RoleSpec {
    RoleSpec {
        label: label.to_string(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
    }
}

fn category(keywords: &[&str], specific_roles: Vec<RoleSpec>) -> CategoryProfile {
    let mut roles = specific_roles;
    roles.push(role("Recepción", &["recepción", "hospitalidad", "bienvenida"]));
    roles.push(role("Apoyo General", &[]));

    CategoryProfile {
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        adjacent_keywords: SERVICE_GIFTS.iter().map(|gift| gift.to_string()).collect(),
        roles,
    }
}

impl CategoryCatalog {
    /// Tables used by the church platform out of the box.
    pub fn standard() -> Self {
        let mut categories = BTreeMap::new();

        categories.insert(
            "CULTO".to_string(),
            category(
                &["música", "alabanza", "ujier", "audio", "sonido", "adoración"],
                vec![
                    role("Ujier", &["ujier", "hospitalidad"]),
                    role("Técnico Audio", &["audio", "sonido", "técnico"]),
                    role("Músico", &["música", "alabanza", "músico", "adoración"]),
                ],
            ),
        );
        categories.insert(
            "CONFERENCIA".to_string(),
            category(
                &["audio", "logística", "tecnología", "recepción", "organización"],
                vec![
                    role("Técnico Audio", &["audio", "sonido", "tecnología"]),
                    role("Apoyo Logístico", &["logística", "organización"]),
                ],
            ),
        );
        categories.insert(
            "SOCIAL".to_string(),
            category(
                &["cocina", "coordinador", "limpieza", "hospitalidad", "misericordia"],
                vec![
                    role("Coordinador", &["coordinador", "liderazgo", "organización"]),
                    role("Cocina", &["cocina"]),
                    role("Limpieza", &["limpieza"]),
                ],
            ),
        );
        categories.insert(
            "CAPACITACION".to_string(),
            category(
                &["enseñanza", "instructor", "material", "docencia"],
                vec![
                    role("Asistente Instructor", &["enseñanza", "instructor", "docencia"]),
                    role("Material", &["material", "diseño"]),
                ],
            ),
        );

        Self { categories }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let parsed: BTreeMap<String, CategoryProfile> = serde_json::from_str(raw)?;
        Self::from_categories(parsed)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    fn from_categories(raw: BTreeMap<String, CategoryProfile>) -> Result<Self, CatalogError> {
        if raw.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut categories = BTreeMap::new();
        for (label, profile) in raw {
            let key = category_key(&label);
            if profile.roles.is_empty() {
                return Err(CatalogError::MissingRoles(key));
            }
            categories.insert(key, profile);
        }

        Ok(Self { categories })
    }

    /// Case-insensitive lookup.
    pub fn get(&self, category: &str) -> Option<&CategoryProfile> {
        self.categories.get(&category_key(category))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn category_key(label: &str) -> String {
    normalize_tag(label).to_uppercase()
}

/// True when any tag contains any of the keywords after normalization.
pub(crate) fn tags_match(tags: &[String], keywords: &[String]) -> bool {
    first_match(tags, keywords).is_some()
}

/// The first `(tag, keyword)` pair where the tag contains the keyword.
pub(crate) fn first_match<'a>(
    tags: &'a [String],
    keywords: &'a [String],
) -> Option<(&'a str, &'a str)> {
    tags.iter().find_map(|tag| {
        keywords
            .iter()
            .find(|keyword| !keyword.is_empty() && tag.contains(keyword.as_str()))
            .map(|keyword| (tag.as_str(), keyword.as_str()))
    })
}

pub(crate) fn normalize_all(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|value| normalize_tag(value))
        .filter(|value| !value.is_empty())
        .collect()
}
