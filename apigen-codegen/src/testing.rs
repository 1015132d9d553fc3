//! Test utilities for module emitters.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use apigen_core::{GeneratedFile, Overwrite};
use eyre::Result;

/// A small document exercising path parameters, headers, bodies, refs and
/// multi-tag operations.
pub const PETSTORE_YAML: &str = r##"openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
tags:
  - name: pets
    description: Pet operations
  - name: store
paths:
  /pets:
    get:
      tags: [pets]
      summary: List pets
      parameters:
        - name: limit
          in: query
          schema: { type: integer }
        - name: X-Trace-Id
          in: header
          required: true
          schema: { type: string }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: array
                items: { $ref: "#/components/schemas/Pet" }
    post:
      tags: [pets, store]
      summary: Create a pet
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [name]
              properties:
                name: { type: string, title: Pet name }
                tag: { type: string }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { $ref: "#/components/schemas/Pet" }
  /pets/{id}:
    get:
      tags: [pets]
      description: Fetch one pet
      parameters:
        - name: id
          in: path
          required: true
          schema: { type: string }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                properties:
                  name: { type: string }
  /store/orders:
    delete:
      tags: [store]
      responses:
        "204": { description: gone }
components:
  schemas:
    Pet:
      type: object
      description: A pet
      required: [id, name]
      properties:
        id: { type: integer }
        name: { type: string, title: Pet Name, description: "The pet's given name" }
        status:
          type: string
          enum: [available, sold]
        owner: { $ref: "#/components/schemas/Owner" }
    Owner:
      type: object
      properties:
        pets:
          type: array
          items: { $ref: "#/components/schemas/Pet" }
"##;

/// A document whose only tag is written in Chinese, plus an untagged operation.
pub const CJK_YAML: &str = r##"openapi: 3.1.0
info:
  title: 宠物商店
  version: "1"
paths:
  /pets:
    get:
      tags: [宠物]
      summary: 列出宠物
      responses:
        "200":
          description: ok
  /health:
    get:
      responses:
        "200":
          description: ok
"##;

/// Assert that two strings are equal, with a nice diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {}\n", exp));
                diff.push_str(&format!("  actual:   {}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Find a generated file by path, panicking with the available paths if absent.
pub fn file<'a>(files: &'a [GeneratedFile], path: &str) -> &'a GeneratedFile {
    match files.iter().find(|f| f.path == path) {
        Some(file) => file,
        None => {
            let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
            panic!("no generated file `{}` in {:?}", path, paths)
        }
    }
}

/// Write generated files into a temporary directory and return it.
///
/// The directory will be cleaned up when the returned `TempDir` is dropped.
pub fn generate_to_temp(files: &[GeneratedFile]) -> Result<tempfile::TempDir> {
    let temp_dir = tempfile::TempDir::new()?;
    for file in files {
        file.write(temp_dir.path(), Overwrite::Always)?;
    }
    Ok(temp_dir)
}
