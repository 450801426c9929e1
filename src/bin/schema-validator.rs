//! # SCIM Schema Validator
//!
//! A command-line utility that runs the library's schema shape check over
//! SCIM schema documents.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schema-validator schemas/User.json
//! cargo run --bin schema-validator ./schemas/
//! ```
//!
//! For a directory every `*.json` file is checked on its own, then the whole
//! directory is loaded into a registry to confirm the set loads together.
//!
//! ## Output Examples
//!
//! ```text
//! Validating schema file: schemas/User.json
//! ✓ Schema is valid!
//!
//! Schema Summary:
//!   ID: urn:ietf:params:scim:schemas:core:2.0:User
//!   Name: User
//!   Description: User Account
//!   Attributes: 24
//!   Required attributes: 1
//!   Multi-valued attributes: 9
//!   Attribute types:
//!     - boolean: 1
//!     - complex: 11
//!     - reference: 1
//!     - string: 11
//!   Required attribute names: userName
//! ```
//!
//! A document that fails prints the aggregated error, one violation per line:
//!
//! ```text
//! Validating schema file: invalid-schema.json
//! ❌ Schema validation failed: Schema error: Invalid SCIM schema urn:example:Widget: 1 aggregated exceptions found:
//!     Invalid SCIM schema urn:example:Widget/_size: 2 aggregated exceptions found:
//!     ...
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: All schemas are valid
//! - `1`: One or more schemas are invalid or could not be read

use scim_schema::schema::{AttributeDefinition, Schema, SchemaRegistry};
use scim_schema::ScimResult;
use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <schema-file-or-directory>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schemas/User.json", args[0]);
        eprintln!("  {} ./schemas/", args[0]);
        process::exit(1);
    }

    let path = Path::new(&args[1]);

    if path.is_file() {
        validate_single_file(path);
    } else if path.is_dir() {
        validate_directory(path);
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        process::exit(1);
    }
}

fn validate_single_file(file_path: &Path) {
    println!("Validating schema file: {}", file_path.display());

    match load_schema(file_path) {
        Ok(schema) => {
            println!("✓ Schema is valid!");
            print_schema_summary(&schema);
        }
        Err(e) => {
            eprintln!("❌ Schema validation failed: {}", e);
            process::exit(1);
        }
    }
}

fn validate_directory(dir_path: &Path) {
    println!("Validating schemas in directory: {}", dir_path.display());

    let mut paths: Vec<_> = match fs::read_dir(dir_path) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect(),
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };
    paths.sort();

    let mut valid_count = 0;
    let mut error_count = 0;
    for path in &paths {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("\nValidating: {}", file_name);

        match load_schema(path) {
            Ok(schema) => {
                println!("  ✓ Valid - {} ({})", schema.name().unwrap_or("-"), schema.id());
                valid_count += 1;
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid schemas: {}", valid_count);
    println!("  Invalid schemas: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }

    println!("\nTesting schema registry loading...");
    match SchemaRegistry::from_schema_dir(dir_path) {
        Ok(registry) => {
            println!("✓ Schema registry loaded successfully");
            println!("  Total schemas loaded: {}", registry.len());
            for schema in registry.get_schemas() {
                println!("    - {} ({})", schema.name().unwrap_or("-"), schema.id());
            }
        }
        Err(e) => {
            eprintln!("❌ Failed to load schema registry: {}", e);
            process::exit(1);
        }
    }
}

fn load_schema(file_path: &Path) -> ScimResult<Schema> {
    let file = File::open(file_path)?;
    Schema::load(BufReader::new(file))
}

fn print_schema_summary(schema: &Schema) {
    println!();
    println!("Schema Summary:");
    println!("  ID: {}", schema.id());
    println!("  Name: {}", schema.name().unwrap_or("-"));
    println!("  Description: {}", schema.description().unwrap_or("-"));
    println!("  Attributes: {}", schema.attributes().len());

    let attributes = schema.attributes();
    let mut type_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for attr in attributes {
        *type_counts.entry(attr.kind().as_str()).or_insert(0) += 1;
    }
    let required: Vec<&AttributeDefinition> =
        attributes.iter().filter(|attr| attr.is_required()).collect();
    let multi_valued_count = attributes.iter().filter(|attr| attr.is_multi_valued()).count();

    println!("  Required attributes: {}", required.len());
    println!("  Multi-valued attributes: {}", multi_valued_count);
    println!("  Attribute types:");
    for (attr_type, count) in type_counts {
        println!("    - {}: {}", attr_type, count);
    }

    let required_names: Vec<&str> = required.iter().filter_map(|attr| attr.name()).collect();
    if !required_names.is_empty() {
        println!("  Required attribute names: {}", required_names.join(", "));
    }
}
