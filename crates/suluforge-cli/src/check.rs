//! The `check` command: resolve an entity description without writing
//! anything, printing every derived name so the result can be inspected
//! before a real run.

use anyhow::Result;

use crate::make::{self, MakeOptions};

pub fn run(options: &MakeOptions) -> Result<()> {
    let config = make::build_config(options)?;
    let resource_key = config.resource_key();

    println!("entity:          {}", config.entity_fqcn());
    println!("repository:      {}", config.repository_fqcn());
    if config.generate_controller {
        println!("controller:      {}", config.controller_fqcn()?);
    }
    if config.generate_admin {
        println!("admin:           {}", config.admin_fqcn()?);
    }
    if config.has_translations() {
        println!("translation:     {}", config.translation_fqcn()?);
    }
    println!("resource key:    {resource_key}");
    println!("table:           {}", config.table_name());
    if config.generate_controller {
        println!("route base:      {}", config.controller_route_base());
        println!("route prefix:    {}", config.controller_route_name_prefix());
    }
    println!("properties:      {}", config.properties.len());
    if let Ok(translation) = config.translation() {
        println!("translated:      {}", translation.properties.len());
    }

    Ok(())
}
