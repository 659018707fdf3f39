//! Naming convention utilities for code generation.
//!
//! Every derived identifier in the generated output (table names, resource
//! keys, route names, accessor suffixes) comes through this module, so the
//! conversions here define the naming contract of the whole generator.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `PascalCase` | [`to_snake_case`] | `pascal_case` |
//! | `PascalCase` | [`to_kebab_case`] | `pascal-case` |
//! | `any_input` | [`to_studly_case`] | `AnyInput` |
//! | `any_input` | [`to_camel_case`] | `anyInput` |
//! | `camelCase` | [`humanize`] | `Camel Case` |
//!
//! Inflection ([`pluralize`], [`singularize`]) delegates to the `pluralizer`
//! crate, including irregular English forms. All functions expect non-empty
//! identifier-like ASCII input; the CLI front end validates that before any
//! derivation runs.

/// Convert PascalCase or camelCase to snake_case.
///
/// Inserts an underscore before each interior uppercase letter, then
/// lowercases the result.
///
/// # Examples
///
/// ```
/// use suluforge_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("UserProfile"), "user_profile");
/// assert_eq!(to_snake_case("mainImageUrl"), "main_image_url");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);

    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Convert PascalCase or camelCase to kebab-case.
///
/// # Examples
///
/// ```
/// use suluforge_core::naming::to_kebab_case;
///
/// assert_eq!(to_kebab_case("BlogPost"), "blog-post");
/// assert_eq!(to_kebab_case("blog_post"), "blog-post");
/// ```
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

/// Convert a string to StudlyCase (PascalCase).
///
/// Splits on non-alphanumeric boundaries and interior uppercase transitions,
/// title-cases each segment, and concatenates. Idempotent:
/// `to_studly_case(to_studly_case(s)) == to_studly_case(s)`.
///
/// # Examples
///
/// ```
/// use suluforge_core::naming::to_studly_case;
///
/// assert_eq!(to_studly_case("hello_world"), "HelloWorld");
/// assert_eq!(to_studly_case("hello-world"), "HelloWorld");
/// assert_eq!(to_studly_case("helloWorld"), "HelloWorld");
/// assert_eq!(to_studly_case("HelloWorld"), "HelloWorld");
/// ```
pub fn to_studly_case(s: &str) -> String {
    let mut spaced = String::with_capacity(s.len() + 4);

    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            spaced.push(' ');
        }
        if c.is_ascii_alphanumeric() {
            spaced.push(c);
        } else {
            spaced.push(' ');
        }
    }

    spaced.split_whitespace().map(capitalize_word).collect()
}

/// Convert a string to camelCase.
///
/// # Examples
///
/// ```
/// use suluforge_core::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("published_at"), "publishedAt");
/// assert_eq!(to_camel_case("PublishedAt"), "publishedAt");
/// ```
pub fn to_camel_case(s: &str) -> String {
    lower_first(&to_studly_case(s))
}

/// Turn an identifier into a human-readable label.
///
/// Trims, inserts a space before each interior uppercase letter, replaces
/// `_` and `-` with spaces, lowercases, then title-cases each word.
///
/// # Examples
///
/// ```
/// use suluforge_core::naming::humanize;
///
/// assert_eq!(humanize("mainImageUrl"), "Main Image Url");
/// assert_eq!(humanize("blog_posts"), "Blog Posts");
/// ```
pub fn humanize(s: &str) -> String {
    let mut spaced = String::with_capacity(s.len() + 4);

    for (i, c) in s.trim().chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            spaced.push(' ');
        }
        if c == '_' || c == '-' {
            spaced.push(' ');
        } else {
            spaced.push(c);
        }
    }

    spaced
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plural form of a word, irregular English forms included.
///
/// # Examples
///
/// ```
/// use suluforge_core::naming::pluralize;
///
/// assert_eq!(pluralize("BlogPost"), "BlogPosts");
/// assert_eq!(pluralize("Category"), "Categories");
/// ```
pub fn pluralize(s: &str) -> String {
    pluralizer::pluralize(s, 2, false)
}

/// Singular form of a word.
///
/// # Examples
///
/// ```
/// use suluforge_core::naming::singularize;
///
/// assert_eq!(singularize("reviews"), "review");
/// assert_eq!(singularize("categories"), "category");
/// ```
pub fn singularize(s: &str) -> String {
    pluralizer::pluralize(s, 1, false)
}

/// Short class name of a PHP fully-qualified class name.
///
/// # Examples
///
/// ```
/// use suluforge_core::naming::short_class;
///
/// assert_eq!(short_class("App\\Entity\\BlogPost"), "BlogPost");
/// assert_eq!(short_class("BlogPost"), "BlogPost");
/// ```
pub fn short_class(fqcn: &str) -> &str {
    fqcn.rsplit('\\').next().unwrap_or(fqcn)
}

/// Lowercase the first letter of a string.
fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Title-case a single word: first letter uppercase, rest lowercase.
fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}
