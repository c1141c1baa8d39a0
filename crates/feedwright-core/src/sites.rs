use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::items::EnrichmentFailures;
use crate::ConfigError;

/// Per-route settings that replace the built-in route table values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOverride {
    /// Route id as `namespace/path`, e.g. `aihot/today`.
    pub route: String,
    #[serde(default)]
    pub enrichment_failures: Option<EnrichmentFailures>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SitesFile {
    #[serde(default)]
    pub sites: Vec<SiteOverride>,
}

/// Load and validate the site overrides from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sites(&content)
}

fn parse_sites(content: &str) -> Result<SitesFile, ConfigError> {
    let sites_file: SitesFile = serde_yaml::from_str(content)?;
    validate_sites(&sites_file)?;
    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for site in &sites_file.sites {
        let route = site.route.trim();
        if route.is_empty() {
            return Err(ConfigError::Validation(
                "site route must be non-empty".to_string(),
            ));
        }
        if !seen.insert(route.trim_matches('/').to_string()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site route '{route}'"
            )));
        }
    }

    Ok(())
}
