use std::collections::HashMap;
use std::io::Write;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |k| map.get(k).cloned()
}

#[test]
fn defaults() {
    let cfg = InspectorConfig::default();
    assert_eq!(cfg.document_node_type, "Neos.Neos:Document");
    assert_eq!(cfg.content_collection_node_type, "Neos.Neos:ContentCollection");
    assert_eq!(cfg.node_tree_loading_depth, 0);
    assert_eq!(cfg.content_tree_loading_depth, 4);
    assert_eq!(cfg.acl_anchor, AclAnchor::Parent);
    assert!(cfg.create_subject_includes_node_type);
    assert_eq!(cfg.max_tree_depth, None);
}

#[test]
fn precedence_defaults_file_env() {
    let file = InspectorConfig::from_json_str(r#"{ "node_tree_loading_depth": 3, "acl_anchor": "node", "max_tree_depth": 10 }"#).unwrap();
    // untouched keys keep their defaults
    assert_eq!(file.content_tree_loading_depth, 4);

    let env = EnvOverrides::from_lookup(lookup(&[
        ("ACL_INSPECTOR_TREE_DEPTH", "5"),
        ("ACL_INSPECTOR_DOCUMENT_TYPE", "Acme:Document"),
        ("ACL_INSPECTOR_CREATE_OWN_TYPE", "false"),
        ("ACL_INSPECTOR_COLLECTION_TYPE", "  "),
    ]))
    .unwrap();
    let eff = InspectorConfig::from_layers(Some(&file), &env);
    assert_eq!(eff.node_tree_loading_depth, 5);
    assert_eq!(eff.document_node_type, "Acme:Document");
    assert_eq!(eff.content_collection_node_type, "Neos.Neos:ContentCollection");
    assert_eq!(eff.acl_anchor, AclAnchor::Node);
    assert!(!eff.create_subject_includes_node_type);
    assert_eq!(eff.max_tree_depth, Some(10));
}

#[test]
fn invalid_env_values_are_config_errors() {
    let err = EnvOverrides::from_lookup(lookup(&[("ACL_INSPECTOR_TREE_DEPTH", "deep")])).unwrap_err();
    assert_eq!(err.code_str(), "config_error");
    assert!(EnvOverrides::from_lookup(lookup(&[("ACL_INSPECTOR_ACL_ANCHOR", "grandparent")])).is_err());
}

#[test]
fn reads_config_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, r#"{{ "content_tree_loading_depth": 2 }}"#).unwrap();
    let cfg = InspectorConfig::from_file(f.path()).unwrap();
    assert_eq!(cfg.content_tree_loading_depth, 2);

    let missing = InspectorConfig::from_file(std::path::Path::new("/definitely/not/here.json"));
    assert!(missing.is_err());
}

#[test]
fn clamp_depth_only_with_ceiling() {
    let mut cfg = InspectorConfig::default();
    assert_eq!(cfg.clamp_depth(0), 0);
    assert_eq!(cfg.clamp_depth(7), 7);
    cfg.max_tree_depth = Some(3);
    assert_eq!(cfg.clamp_depth(0), 3);
    assert_eq!(cfg.clamp_depth(7), 3);
    assert_eq!(cfg.clamp_depth(2), 2);
    // a zero ceiling would mean unlimited, so it never widens a bounded request
    cfg.max_tree_depth = Some(0);
    assert_eq!(cfg.clamp_depth(1), 1);
    assert_eq!(cfg.clamp_depth(0), 0);
}
