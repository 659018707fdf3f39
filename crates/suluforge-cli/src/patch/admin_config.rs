//! Registers a generated resource in `config/packages/sulu_admin.yaml`.
//!
//! The file is patched textually rather than through a YAML round-trip so
//! that untouched sections keep their formatting and comments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use suluforge_core::config::EntityConfig;

/// Result of an admin-configuration patch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPatchOutcome {
    /// The configuration file does not exist; nothing to do.
    MissingConfig,
    /// The resource key is already registered; file untouched.
    AlreadyRegistered,
    /// The resource block was inserted and the file rewritten.
    Updated(PathBuf),
}

/// Patch the Sulu admin configuration under `project_dir`, registering the
/// entity's resource key with its list/detail routes and security context.
pub fn patch_admin_config(
    project_dir: &Path,
    config: &EntityConfig,
) -> Result<ConfigPatchOutcome> {
    let config_path = project_dir.join("config/packages/sulu_admin.yaml");
    if !config_path.exists() {
        return Ok(ConfigPatchOutcome::MissingConfig);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;

    match apply(&contents, config) {
        None => Ok(ConfigPatchOutcome::AlreadyRegistered),
        Some(patched) => {
            fs::write(&config_path, patched)
                .with_context(|| format!("failed to write {}", config_path.display()))?;
            Ok(ConfigPatchOutcome::Updated(config_path))
        }
    }
}

/// Apply the patch to the raw file contents. Returns `None` when the
/// resource key is already registered.
pub fn apply(contents: &str, config: &EntityConfig) -> Option<String> {
    let resource_key = config.resource_key();
    if is_registered(contents, &resource_key) {
        return None;
    }

    let block = resource_block(config);

    // Insert the block just before the top-level `templates:` section when
    // the file has one, otherwise append it.
    let marker = "\n    templates:";
    let patched = match contents.find(marker) {
        Some(position) => format!(
            "{}\n{}{}",
            &contents[..position],
            block,
            &contents[position..]
        ),
        None => format!("{}\n\n{}", contents.trim_end(), block),
    };

    Some(format!("{}\n", patched.trim_end()))
}

/// A resource key counts as registered when a line contains exactly
/// `<resource-key>:` at the resources indent level (eight spaces).
fn is_registered(contents: &str, resource_key: &str) -> bool {
    let needle = format!("        {resource_key}:");
    contents.lines().any(|line| line.trim_end() == needle)
}

fn resource_block(config: &EntityConfig) -> String {
    let resource_key = config.resource_key();
    let security_context = format!(
        "App\\\\Admin\\\\{}Admin::SECURITY_CONTEXT",
        config.entity_name
    );

    format!(
        "        {resource_key}:\n            routes:\n                list: sulu_admin.{resource_key}_list\n                detail: sulu_admin.{resource_key}_get\n            security_context: '{security_context}'\n\n"
    )
}
