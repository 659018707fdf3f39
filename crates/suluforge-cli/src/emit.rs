//! Emission orchestrator: renders every artifact for an entity and writes
//! it into the host project, then runs the incremental patchers.
//!
//! Generated files are never overwritten; an existing file is reported and
//! skipped. The patchers are the exception, they edit files in place and
//! are idempotent. Any failure aborts the remaining sequence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use suluforge_core::config::EntityConfig;
use suluforge_core::naming::to_snake_case;

use crate::codegen::{admin, controller, entity, form_xml, list_xml, repository, translation};
use crate::patch::admin_config::{self, ConfigPatchOutcome};
use crate::patch::catalog;

// ============================================================================
// Orchestrator
// ============================================================================

/// Generate all artifacts for `config` under `project_dir`, in dependency
/// order: entity, translation, repository, controller, then the admin
/// surface (form XML, list XML, admin class, config patch, catalog patch).
pub fn generate(project_dir: &Path, config: &EntityConfig) -> Result<()> {
    write_php_file(
        project_dir,
        &class_to_path(project_dir, config, &config.entity_fqcn()),
        entity::render_entity(config)?,
    )?;

    if config.has_translations() {
        write_php_file(
            project_dir,
            &class_to_path(project_dir, config, &config.translation_fqcn()?),
            translation::render_translation(config)?,
        )?;
    }

    write_php_file(
        project_dir,
        &class_to_path(project_dir, config, &config.repository_fqcn()),
        repository::render_repository(config)?,
    )?;

    if config.generate_controller {
        write_php_file(
            project_dir,
            &class_to_path(project_dir, config, &config.controller_fqcn()?),
            controller::render_controller(config)?,
        )?;
    }

    if config.generate_admin {
        let form_path = project_dir.join(format!(
            "config/forms/{}/details.xml",
            to_snake_case(&config.entity_name)
        ));
        write_php_file(project_dir, &form_path, form_xml::render_form_xml(config)?)?;

        let list_path =
            project_dir.join(format!("config/lists/{}.xml", config.resource_key()));
        write_php_file(project_dir, &list_path, list_xml::render_list_xml(config)?)?;

        write_php_file(
            project_dir,
            &class_to_path(project_dir, config, &config.admin_fqcn()?),
            admin::render_admin(config)?,
        )?;

        match admin_config::patch_admin_config(project_dir, config)? {
            ConfigPatchOutcome::MissingConfig | ConfigPatchOutcome::AlreadyRegistered => {}
            ConfigPatchOutcome::Updated(path) => {
                println!(
                    "updated {} (resource \"{}\")",
                    relative_path(project_dir, &path),
                    config.resource_key()
                );
            }
        }

        for path in catalog::patch_catalogs(project_dir, config)? {
            println!(
                "updated {} (translations for \"{}\")",
                relative_path(project_dir, &path),
                config.resource_key()
            );
        }
    }

    Ok(())
}

/// PSR-4 mapping: strip the base namespace prefix and place the class under
/// `src/` in the project directory.
pub fn class_to_path(project_dir: &Path, config: &EntityConfig, fqcn: &str) -> PathBuf {
    let prefix = format!("{}\\", config.base_namespace);
    let relative = fqcn.strip_prefix(&prefix).unwrap_or(fqcn);
    project_dir.join(format!("src/{}.php", relative.replace('\\', "/")))
}

/// Write a rendered file, creating parent directories and skipping any
/// pre-existing file with a warning.
fn write_php_file(project_dir: &Path, path: &Path, contents: String) -> Result<()> {
    if contents.trim().is_empty() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    if path.exists() {
        println!("skipped existing file: {}", relative_path(project_dir, path));
        return Ok(());
    }

    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    println!("created {}", relative_path(project_dir, path));

    Ok(())
}

fn relative_path(project_dir: &Path, path: &Path) -> String {
    path.strip_prefix(project_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
