//! Integration test for OpenAPI endpoint extraction

use endpoint_extractor_common::HttpMethod;
use endpoint_extractor_parser::{extract_from_file, OpenApiParser};
use std::fs;
use tempfile::TempDir;

const DROPLETS_SPEC: &str = r##"
openapi: '3.0.0'
info:
  title: DigitalOcean API
  version: '2.0'
paths:
  /v2/droplets:
    get:
      operationId: droplets_list
      summary: List All Droplets
      description: |
        To list all Droplets in your account, send a GET request.
      tags:
        - Droplets
      parameters:
        - $ref: '#/components/parameters/per_page'
        - $ref: '#/components/parameters/page'
        - name: tag_name
          in: query
          required: false
          description: Used to filter Droplets by a specific tag.
          schema:
            type: string
    post:
      operationId: droplets_create
      summary: Create a New Droplet
      tags:
        - Droplets
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/droplet_create'
  /v2/droplets/{droplet_id}:
    parameters:
      - $ref: '#/components/parameters/droplet_id'
    get:
      operationId: droplets_get
      summary: Retrieve an Existing Droplet
      tags: [Droplets]
      parameters:
        - name: droplet_id
          in: path
          required: true
          schema:
            type: integer
    delete:
      operationId: droplets_destroy
      summary: Delete an Existing Droplet
      tags: [Droplets]
components:
  parameters:
    per_page:
      name: per_page
      in: query
      schema:
        type: integer
"##;

#[test]
fn test_extract_digitalocean_style_spec() {
    let parser = OpenApiParser::from_yaml(DROPLETS_SPEC).unwrap();
    let extraction = parser.extract();

    assert_eq!(extraction.endpoints.len(), 4);
    assert_eq!(extraction.skipped_refs, 2);
    assert_eq!(extraction.skipped_operations, 0);
    assert!(!extraction.paths_missing);

    let list = &extraction.endpoints[0];
    assert_eq!(list.path, "/v2/droplets");
    assert_eq!(list.method, HttpMethod::Get);
    assert_eq!(list.operation_id, "droplets_list");
    assert_eq!(list.summary, "List All Droplets");
    assert_eq!(
        list.description,
        "To list all Droplets in your account, send a GET request."
    );
    assert_eq!(list.tags, vec!["Droplets".to_string()]);
    assert_eq!(list.parameters.len(), 1);

    let tag_name = &list.parameters[0];
    assert_eq!(tag_name.name, "tag_name");
    assert_eq!(tag_name.location, "query");
    assert!(!tag_name.required);
    assert_eq!(tag_name.param_type, "string");

    let create = &extraction.endpoints[1];
    assert_eq!(create.method, HttpMethod::Post);
    assert_eq!(create.description, "");
    assert!(create.parameters.is_empty());

    // Path-level parameters are not merged into operations
    let get = &extraction.endpoints[2];
    assert_eq!(get.operation_id, "droplets_get");
    assert_eq!(get.parameters.len(), 1);
    assert!(get.parameters[0].required);
    assert_eq!(get.parameters[0].param_type, "integer");

    let destroy = &extraction.endpoints[3];
    assert_eq!(destroy.method, HttpMethod::Delete);
    assert!(destroy.parameters.is_empty());
}

#[test]
fn test_extract_swagger2_parameters() {
    let spec = r#"
swagger: "2.0"
info:
  title: Legacy
  version: "1"
paths:
  /pets:
    post:
      operationId: addPet
      parameters:
        - name: body
          in: body
          required: true
          schema:
            $ref: '#/definitions/Pet'
        - name: limit
          in: query
          type: integer
        - in: header
"#;
    let extraction = OpenApiParser::from_yaml(spec).unwrap().extract();
    let params = &extraction.endpoints[0].parameters;

    assert_eq!(params.len(), 3);
    assert_eq!(params[0].location, "body");
    assert_eq!(params[0].param_type, "");
    assert_eq!(params[1].param_type, "integer");
    assert_eq!(params[2].name, "");
    assert_eq!(params[2].location, "header");
    assert!(!params[2].required);
}

#[test]
fn test_extract_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let spec_path = temp_dir.path().join("openapi.yaml");
    fs::write(&spec_path, DROPLETS_SPEC).unwrap();

    let extraction = extract_from_file(&spec_path).unwrap();
    assert_eq!(extraction.endpoints.len(), 4);
}

#[test]
fn test_document_without_paths() {
    let extraction = OpenApiParser::from_yaml("openapi: 3.1.0\ninfo:\n  title: Empty\n")
        .unwrap()
        .extract();
    assert!(extraction.paths_missing);
    assert!(extraction.endpoints.is_empty());
}

#[test]
fn test_endpoints_serialize_like_extracted_file() {
    let extraction = OpenApiParser::from_yaml(DROPLETS_SPEC).unwrap().extract();
    let value = serde_json::to_value(&extraction.endpoints).unwrap();

    assert_eq!(value[0]["method"], "GET");
    assert_eq!(value[0]["operationId"], "droplets_list");
    assert_eq!(value[0]["parameters"][0]["in"], "query");
    assert_eq!(value[0]["parameters"][0]["type"], "string");
    assert_eq!(value[1]["parameters"], serde_json::json!([]));
}
