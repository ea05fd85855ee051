//! Target registry.
//!
//! A [`Registry`] is the ordered list of targets of one [`Category`]. Every
//! target gets a stable index equal to its position at load time; the
//! registry is read-only afterwards.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RegistryError;

/// Kind of monitored entity, which also decides how it is probed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Reached with ping, identified by IP or hostname
    Server,
    /// Reached with HTTP GET, identified by URL
    Website,
}

impl Category {
    /// Key holding the identifier in JSON target files
    pub fn identifier_tag(&self) -> &'static str {
        match self {
            Category::Server => "ip",
            Category::Website => "url",
        }
    }

    /// Plural label used for section titles
    pub fn plural(&self) -> &'static str {
        match self {
            Category::Server => "Servers",
            Category::Website => "Websites",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Server => write!(f, "server"),
            Category::Website => write!(f, "website"),
        }
    }
}

/// One monitored entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Position in the registry, assigned at load
    pub index: usize,
    pub name: String,
    /// IP address, hostname or URL handed to the probe
    pub identifier: String,
}

/// Unindexed target description as supplied by a target source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub name: String,
    pub identifier: String,
}

impl TargetEntry {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self { name: name.into(), identifier: identifier.into() }
    }
}

/// Ordered, read-only collection of targets of a single category
#[derive(Debug, Clone)]
pub struct Registry {
    category: Category,
    targets: Vec<Target>,
}

impl Registry {
    /// Build a registry, indexing entries by their position
    pub fn new(category: Category, entries: impl IntoIterator<Item = TargetEntry>) -> Self {
        let targets = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Target { index, name: entry.name, identifier: entry.identifier })
            .collect();

        Self { category, targets }
    }

    /// Parse a JSON array of objects such as `[{"name": "db", "ip": "10.0.0.4"}]`
    ///
    /// The identifier is read from the category's tag (`ip` for servers,
    /// `url` for websites). Extra keys are ignored.
    pub fn from_json_str(category: Category, json: &str) -> Result<Self, RegistryError> {
        let raw: Vec<Map<String, Value>> = serde_json::from_str(json)?;
        let tag = category.identifier_tag();

        let entries = raw
            .iter()
            .enumerate()
            .map(|(index, object)| {
                let name = string_field(object, "name")
                    .ok_or(RegistryError::MissingField { index, field: "name" })?;
                let identifier = string_field(object, tag)
                    .ok_or(RegistryError::MissingField { index, field: tag })?;
                Ok(TargetEntry::new(name, identifier))
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;

        Ok(Self::new(category, entries))
    }

    /// Read and parse a JSON target file, see [`Registry::from_json_str`]
    pub fn from_json_file(category: Category, path: &Path) -> Result<Self, RegistryError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| RegistryError::Read { path: path.to_path_buf(), source })?;
        Self::from_json_str(category, &raw)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Number of targets
    pub fn size(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn by_index(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_owned)
}
