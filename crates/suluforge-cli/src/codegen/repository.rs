//! Repository class renderer.

use suluforge_core::naming::short_class;
use suluforge_core::{EntityConfig, GeneratorResult};

use super::php::PhpFile;

pub fn render_repository(config: &EntityConfig) -> GeneratorResult<String> {
    let fqcn = config.repository_fqcn();
    let class_name = short_class(&fqcn).to_string();
    let namespace = format!("{}\\Repository", config.base_namespace);
    let entity_fqcn = config.entity_fqcn();
    let entity_short = short_class(&entity_fqcn).to_string();

    let mut file = PhpFile::new(
        namespace,
        format!("final class {} extends ServiceEntityRepository", class_name),
    );
    file.import("Doctrine\\Bundle\\DoctrineBundle\\Repository\\ServiceEntityRepository");
    file.import("Doctrine\\Persistence\\ManagerRegistry");
    file.import(entity_fqcn);
    file.attribute("/**");
    file.attribute(format!(" * @extends ServiceEntityRepository<{}>", entity_short));
    file.attribute(" */");

    file.line("    public function __construct(ManagerRegistry $registry)");
    file.line("    {");
    file.line(format!(
        "        parent::__construct($registry, {}::class);",
        entity_short
    ));
    file.line("    }");
    file.blank();
    file.line(format!(
        "    public function save({} $entity, bool $flush = true): void",
        entity_short
    ));
    file.line("    {");
    file.line("        $this->_em->persist($entity);");
    file.blank();
    file.line("        if ($flush) {");
    file.line("            $this->_em->flush();");
    file.line("        }");
    file.line("    }");
    file.blank();
    file.line(format!(
        "    public function remove({} $entity, bool $flush = true): void",
        entity_short
    ));
    file.line("    {");
    file.line("        $this->_em->remove($entity);");
    file.blank();
    file.line("        if ($flush) {");
    file.line("            $this->_em->flush();");
    file.line("        }");
    file.line("    }");

    Ok(file.render())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn render_repository___extends_service_entity_repository() {
        let code = render_repository(&EntityConfig::new("BlogPost")).unwrap();

        assert!(code.contains("namespace App\\Repository;"));
        assert!(code.contains("/**\n * @extends ServiceEntityRepository<BlogPost>\n */"));
        assert!(code.contains("final class BlogPostRepository extends ServiceEntityRepository"));
        assert!(code.contains("parent::__construct($registry, BlogPost::class);"));
    }

    #[test]
    fn render_repository___save_and_remove_control_flushing() {
        let code = render_repository(&EntityConfig::new("BlogPost")).unwrap();

        assert!(code.contains("public function save(BlogPost $entity, bool $flush = true): void"));
        assert!(code.contains("public function remove(BlogPost $entity, bool $flush = true): void"));
        assert!(code.contains("$this->_em->persist($entity);"));
        assert!(code.contains("$this->_em->remove($entity);"));
    }
}
