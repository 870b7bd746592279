use tdmk_core::{Parameters, TdmkError};
use tdmk_tree::{
    canonical_tree_hash, tree_from_bytes, tree_from_json, tree_to_bytes, tree_to_json, CliqueTree,
};

#[test]
fn bytes_roundtrip_preserves_the_tree() {
    let tree = CliqueTree::build(Parameters::new(6, 4, 2, 2).unwrap()).unwrap();
    let bytes = tree_to_bytes(&tree).unwrap();
    let restored = tree_from_bytes(&bytes).unwrap();
    assert_eq!(tree, restored);
    assert_eq!(canonical_tree_hash(&tree), canonical_tree_hash(&restored));
}

#[test]
fn json_roundtrip_preserves_the_tree() {
    let tree = CliqueTree::build(Parameters::new(5, 3, 1, 3).unwrap()).unwrap();
    let json = tree_to_json(&tree).unwrap();
    let restored = tree_from_json(&json).unwrap();
    assert_eq!(tree, restored);
}

#[test]
fn truncated_bytes_are_rejected() {
    let tree = CliqueTree::build(Parameters::new(4, 3, 1, 2).unwrap()).unwrap();
    let bytes = tree_to_bytes(&tree).unwrap();
    let err = tree_from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    match err {
        TdmkError::Serde(info) => assert_eq!(info.code, "deserialize-bytes"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tampered_parent_link_fails_verification() {
    let tree = CliqueTree::build(Parameters::new(3, 3, 1, 1).unwrap()).unwrap();
    let json = tree_to_json(&tree).unwrap();
    // Detach clique 1 from the root; only the root may lack a parent.
    let tampered = json.replacen("\"parent\": 0", "\"parent\": null", 1);
    assert_ne!(json, tampered);
    let err = tree_from_json(&tampered).unwrap_err();
    match err {
        TdmkError::Serde(info) => assert_eq!(info.code, "deserialize-verify"),
        other => panic!("unexpected error: {other:?}"),
    }
}
