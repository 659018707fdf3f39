//! End-to-end tests for the `make` pipeline.
//!
//! Each test builds a configuration the way the CLI would, runs the
//! emitter against a temporary host project, and asserts on the written
//! artifacts.

#![allow(non_snake_case)]

use std::fs;
use std::path::PathBuf;

use suluforge_cli::emit;
use suluforge_cli::make::{self, MakeOptions};
use tempfile::TempDir;

fn options(entity: &str, project_dir: &TempDir) -> MakeOptions {
    MakeOptions {
        entity: entity.to_string(),
        namespace: "App".to_string(),
        identifier: None,
        properties: Vec::new(),
        no_controller: false,
        route_base: None,
        route_prefix: None,
        translation: false,
        translation_class: None,
        translation_locale_length: None,
        translation_properties: Vec::new(),
        admin: false,
        no_admin: false,
        project_dir: project_dir.path().to_path_buf(),
    }
}

fn read(project: &TempDir, relative: &str) -> String {
    let path: PathBuf = project.path().join(relative);
    fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("failed to read {relative}: {error}"))
}

// =============================================================================
// BlogPost: uuid id, scalar properties, controller on, admin off
// =============================================================================

#[test]
fn make___blog_post___generates_entity_repository_and_controller() {
    let project = TempDir::new().unwrap();
    let mut opts = options("BlogPost", &project);
    opts.identifier = Some("uuid".to_string());
    opts.properties = vec![
        "title:string".to_string(),
        "publishedAt:datetime:nullable".to_string(),
    ];
    opts.no_admin = true;

    let config = make::build_config(&opts).unwrap();
    assert_eq!(config.resource_key(), "blog-posts");
    assert_eq!(config.table_name(), "blog_posts");

    emit::generate(project.path(), &config).unwrap();

    let entity = read(&project, "src/Entity/BlogPost.php");
    assert!(entity.contains("namespace App\\Entity;"));
    assert!(entity.contains("#[ORM\\Table(name: 'blog_posts')]"));
    assert!(entity.contains("public const RESOURCE_KEY = 'blog-posts';"));

    // uuid identifier: string id assigned in the constructor
    assert!(entity.contains("#[ORM\\Column(type: 'uuid', unique: true)]"));
    assert!(entity.contains("private string $id;"));
    assert!(entity.contains("$this->id = Uuid::v4()->toRfc4122();"));
    assert!(entity.contains("public function getId(): string"));

    // non-nullable string gets an empty-string default
    assert!(entity.contains("private string $title = '';"));

    // nullable datetime stays nullable with no forced default
    assert!(entity.contains("private ?\\DateTimeImmutable $publishedAt = null;"));
    assert!(entity.contains("use \\DateTimeImmutable;"));

    let repository = read(&project, "src/Repository/BlogPostRepository.php");
    assert!(repository.contains("final class BlogPostRepository extends ServiceEntityRepository"));
    assert!(repository.contains("public function save(BlogPost $entity, bool $flush = true): void"));
    assert!(repository.contains("public function remove(BlogPost $entity, bool $flush = true): void"));

    let controller = read(&project, "src/Controller/Admin/BlogPostController.php");
    assert!(controller.contains("#[Route(path: '/admin/api/blog-posts')]"));
    assert!(controller.contains("name: 'sulu_admin.blog-posts_list'"));

    // admin disabled: no admin surface, no config files
    assert!(!project.path().join("src/Admin/BlogPostAdmin.php").exists());
    assert!(!project.path().join("config/lists/blog-posts.xml").exists());
    assert!(!project
        .path()
        .join("config/forms/blog_post/details.xml")
        .exists());
}

#[test]
fn make___blog_post___rerun_skips_existing_files() {
    let project = TempDir::new().unwrap();
    let mut opts = options("BlogPost", &project);
    opts.properties = vec!["title:string".to_string()];
    opts.no_admin = true;

    let config = make::build_config(&opts).unwrap();
    emit::generate(project.path(), &config).unwrap();

    let entity_path = project.path().join("src/Entity/BlogPost.php");
    let first = fs::read_to_string(&entity_path).unwrap();

    emit::generate(project.path(), &config).unwrap();
    assert_eq!(fs::read_to_string(&entity_path).unwrap(), first);
}

// =============================================================================
// Accommodation: translated entity with full admin surface
// =============================================================================

#[test]
fn make___accommodation___generates_translation_entity_and_wiring() {
    let project = TempDir::new().unwrap();
    let mut opts = options("Accommodation", &project);
    opts.translation = true;
    opts.translation_properties = vec!["name:string".to_string()];
    opts.no_admin = true;

    let config = make::build_config(&opts).unwrap();
    emit::generate(project.path(), &config).unwrap();

    let translation = read(&project, "src/Entity/AccommodationTranslation.php");
    assert!(translation.contains(
        "uniqueConstraints: [new ORM\\UniqueConstraint(name: 'uniq_accommodation_locale', columns: ['translatable_id', 'locale'])]"
    ));
    assert!(translation.contains("#[ORM\\JoinColumn(nullable: false, onDelete: 'CASCADE')]"));
    assert!(translation.contains("public function getName(): string"));

    let entity = read(&project, "src/Entity/Accommodation.php");
    assert!(entity.contains("private string $defaultLocale = 'en';"));
    assert!(entity.contains(
        "#[ORM\\OneToMany(mappedBy: 'translatable', targetEntity: AccommodationTranslation::class, cascade: ['persist', 'remove'], orphanRemoval: true, indexBy: 'locale')]"
    ));

    // delegating accessors route through the get-or-create translate()
    assert!(entity
        .contains("public function translate(?string $locale = null): AccommodationTranslation"));
    assert!(entity.contains("return $this->translate($locale)->getName();"));
    assert!(entity.contains("$this->translate($locale)->setName($value);"));
}

#[test]
fn make___accommodation___admin_surface_and_patchers() {
    let project = TempDir::new().unwrap();
    let config_dir = project.path().join("config/packages");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("sulu_admin.yaml"),
        "sulu_admin:\n    resources:\n        pages: ~\n\n    templates:\n        paths: []\n",
    )
    .unwrap();
    let translations_dir = project.path().join("translations");
    fs::create_dir_all(&translations_dir).unwrap();
    fs::write(translations_dir.join("admin.en.json"), "{}").unwrap();

    let mut opts = options("Accommodation", &project);
    opts.properties = vec!["rating:int".to_string()];
    opts.translation = true;
    opts.translation_properties = vec!["name:string".to_string()];

    let config = make::build_config(&opts).unwrap();
    emit::generate(project.path(), &config).unwrap();

    let form = read(&project, "config/forms/accommodation/details.xml");
    assert!(form.contains("<key>accommodation_details</key>"));
    assert!(form.contains("name=\"name\""));

    let list = read(&project, "config/lists/accommodations.xml");
    assert!(list.contains("<key>accommodations</key>"));

    let admin = read(&project, "src/Admin/AccommodationAdmin.php");
    assert!(admin.contains("public const SECURITY_CONTEXT = 'app.accommodations';"));

    let yaml = read(&project, "config/packages/sulu_admin.yaml");
    assert!(yaml.contains("        accommodations:"));
    assert!(yaml.contains("                list: sulu_admin.accommodations_list"));
    let templates_pos = yaml.find("    templates:").unwrap();
    let resource_pos = yaml.find("        accommodations:").unwrap();
    assert!(resource_pos < templates_pos);

    let catalog = read(&project, "translations/admin.en.json");
    assert!(catalog.contains("\"main_navigation\": \"Accommodations\""));
    assert!(catalog.contains("\"rating\": \"Rating\""));
    assert!(catalog.contains("\"name\": \"Name\""));

    // a second run leaves the patched files byte-identical
    let yaml_before = yaml.clone();
    let catalog_before = catalog.clone();
    emit::generate(project.path(), &config).unwrap();
    assert_eq!(read(&project, "config/packages/sulu_admin.yaml"), yaml_before);
    assert_eq!(read(&project, "translations/admin.en.json"), catalog_before);
}
