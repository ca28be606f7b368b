//! Golden tests for rendered values documents.

use chartgen::domain::{RawResource, ResourceKind};
use chartgen::fetch::{FileSource, ResourceSource};
use insta::assert_snapshot;
use serde_json::json;
use similar_asserts::assert_eq;
use std::path::Path;

fn fixture_resources() -> Vec<RawResource> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cluster.json");
    FileSource::new(path).fetch().expect("fixture resources")
}

fn parse(block: &str) -> serde_yaml::Value {
    serde_yaml::from_str(block).expect("block parses")
}

#[test]
fn minimal_deployment_block() {
    let rendered = chartgen::convert(vec![RawResource::new(
        ResourceKind::Deployment,
        json!({"name": "web"}),
        json!({"replicas": 2, "template": {"spec": {"containers": [{"image": "nginx"}]}}}),
    )])
    .expect("convert");

    assert_snapshot!(rendered.trim_end(), @r"
    web:
      replicas: 2
      image:
        repository: nginx
        tag: latest
        pullPolicy: IfNotPresent
      resources:
        limits: {}
        requests: {}
      volumes: []
      volumeMounts: []
    ");
}

#[test]
fn fixture_renders_one_block_per_named_service() {
    let rendered = chartgen::convert(fixture_resources()).expect("convert");
    let blocks: Vec<&str> = rendered.split("\n---\n").collect();
    assert_eq!(blocks.len(), 2);

    let expected_api = parse(
        r#"
api:
  replicas: 1
  image:
    repository: registry
    tag: 5000/api
    pullPolicy: IfNotPresent
  resources:
    limits: {}
    requests: {}
  volumes: []
  volumeMounts: []
"#,
    );
    assert_eq!(parse(blocks[0]), expected_api);

    let expected_web = parse(
        r#"
web:
  replicas: 3
  image:
    repository: nginx
    tag: "1.21"
    pullPolicy: Always
  service:
    type: ClusterIP
    ports: [80, 443]
  environment:
    MODE: prod
  ingress:
    enabled: true
    host: www.example.com
    hosts: [shop.example.com, www.example.com]
    targetPort: 80
  resources:
    limits:
      cpu: 500m
      memory: 256Mi
    requests:
      cpu: 100m
  volumes:
    - name: config
      type: configMap
    - name: cache
      type: emptyDir
  volumeMounts:
    - name: config
      mountPath: /etc/nginx/conf.d
"#,
    );
    assert_eq!(parse(blocks[1]), expected_web);
}

#[test]
fn output_is_independent_of_input_order() {
    let resources = fixture_resources();
    let mut reversed = resources.clone();
    reversed.reverse();

    let forward = chartgen::convert(resources).expect("convert");
    let backward = chartgen::convert(reversed).expect("convert");
    assert_eq!(forward, backward);
}
