//! JSON/YAML catalog files and directory loading.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

use super::Catalog;
use crate::error::CatalogError;

/// On-disk catalog layout, shared by the JSON and YAML formats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// Qualified name for top-level containers, simple name for nested ones.
    pub name: String,
    /// Overrides the simple name derived from `name`. Top-level containers
    /// only; a nested container's simple name is its `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_name: Option<String>,
    #[serde(default)]
    pub executables: Vec<ExecutableSpec>,
    #[serde(default)]
    pub nested: Vec<ContainerSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutableSpec {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

fn detect_format(path: &Path) -> Option<Format> {
    path.extension()?.to_str().and_then(|ext| match ext {
        "json" => Some(Format::Json),
        "yaml" | "yml" => Some(Format::Yaml),
        _ => None,
    })
}

pub fn load_file(path: &Path) -> Result<CatalogFile, CatalogError> {
    trace!(path = %path.display(), "loading catalog file");
    let format = detect_format(path).ok_or_else(|| CatalogError::unsupported_format(path))?;

    let content = fs::read_to_string(path).map_err(|e| CatalogError::read_error(path, e))?;

    let file: CatalogFile = match format {
        Format::Json => serde_json::from_str(&content)
            .map_err(|e| CatalogError::parse_error(path, e.to_string()))?,
        Format::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| CatalogError::parse_error(path, e.to_string()))?,
    };
    if let Some(name) = nested_with_simple_name(&file.containers) {
        return Err(CatalogError::parse_error(
            path,
            format!("nested container '{name}' may not set simple_name"),
        ));
    }

    debug!(
        path = %path.display(),
        containers = file.containers.len(),
        "loaded catalog file"
    );
    Ok(file)
}

fn nested_with_simple_name(containers: &[ContainerSpec]) -> Option<&str> {
    let mut pending: Vec<&ContainerSpec> = containers.iter().flat_map(|c| &c.nested).collect();
    while let Some(spec) = pending.pop() {
        if spec.simple_name.is_some() {
            return Some(&spec.name);
        }
        pending.extend(&spec.nested);
    }
    None
}

impl Catalog {
    /// Loads a single catalog file, or every `.json`/`.yaml`/`.yml` file
    /// under a directory in file-name order.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CatalogError::file_not_found(path));
        }

        let mut catalog = Catalog::new();
        if path.is_file() {
            catalog.extend_from(&load_file(path)?);
            return Ok(catalog);
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| CatalogError::directory_scan_error(path, e))?;
            if entry.file_type().is_file() && detect_format(entry.path()).is_some() {
                catalog.extend_from(&load_file(entry.path())?);
            }
        }

        debug!(
            containers = catalog.container_count(),
            executables = catalog.executable_count(),
            "catalog ready"
        );
        Ok(catalog)
    }
}
