//! Snapshot tests for small, stable generated files.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use apigen_codegen::testing::{CJK_YAML, PETSTORE_YAML, file};
use apigen_codegen_typescript::generate_from_str;
use apigen_spec::{Dialect, ExportStyle, GeneratorConfig};

fn content(yaml: &str, config: &GeneratorConfig, path: &str) -> String {
    let result = generate_from_str(yaml, config).expect("Failed to generate");
    file(&result.files, path).content.clone()
}

#[test]
fn test_module_without_params() {
    let store = content(PETSTORE_YAML, &GeneratorConfig::default(), "store.ts");
    insta::assert_snapshot!(store, @r#"
import { request } from '../utils/request';
import type { DeleteStoreOrdersResponse } from './types';

/** deleteStoreOrders */
export const deleteStoreOrders = async (): Promise<DeleteStoreOrdersResponse> => {
  const response = await request<DeleteStoreOrdersResponse>({
    url: '/store/orders',
    method: 'DELETE',
  });
  return response;
};
"#);
}

#[test]
fn test_index() {
    let index = content(PETSTORE_YAML, &GeneratorConfig::default(), "index.ts");
    insta::assert_snapshot!(index, @r#"
// This file is generated by apigen. Do not edit it by hand.

export * from "./types";
export * from "./utils/request";
export * from "./pets";
export * from "./store";
"#);
}

#[test]
fn test_nested_module() {
    let module = content(CJK_YAML, &GeneratorConfig::default(), "宠物/index.ts");
    insta::assert_snapshot!(module, @r#"
import { request } from '../utils/request';
import type { GetPetsResponse } from '../types';

/** 列出宠物 */
export const getPets = async (): Promise<GetPetsResponse> => {
  const response = await request<GetPetsResponse>({
    url: '/pets',
    method: 'GET',
  });
  return response;
};
"#);
}

#[test]
fn test_javascript_index() {
    let config = GeneratorConfig {
        code_language: Dialect::JavaScript,
        include_comments: false,
        ..GeneratorConfig::default()
    };
    let index = content(CJK_YAML, &config, "index.js");
    insta::assert_snapshot!(index, @r#"
export * from "./utils/request.js";
export * from "./宠物/index.js";
export * from "./default.js";
"#);
}

#[test]
fn test_sync_default_export_module() {
    let config = GeneratorConfig {
        use_async: false,
        include_comments: false,
        export_style: ExportStyle::Default,
        ..GeneratorConfig::default()
    };
    let store = content(PETSTORE_YAML, &config, "store.ts");
    insta::assert_snapshot!(store, @r#"
import { request } from '../utils/request';
import type { DeleteStoreOrdersResponse } from './types';

function deleteStoreOrders(): Promise<DeleteStoreOrdersResponse> {
  return request<DeleteStoreOrdersResponse>({
    url: '/store/orders',
    method: 'DELETE',
  });
}

export default {
  deleteStoreOrders,
};
"#);
}
