use tdmk_core::{CodomainFamily, Parameters, TdmkError};
use tdmk_land::{
    canonical_landscape_hash, landscape_from_bytes, landscape_from_json, landscape_to_bytes,
    landscape_to_json, Landscape,
};

#[test]
fn bytes_roundtrip_preserves_the_landscape() {
    let parameters = Parameters::new(5, 3, 1, 2).unwrap();
    let landscape =
        Landscape::construct(parameters, CodomainFamily::NKq { q: 4 }, 61).unwrap();

    let bytes = landscape_to_bytes(&landscape).unwrap();
    let restored = landscape_from_bytes(&bytes).unwrap();

    assert_eq!(
        canonical_landscape_hash(&landscape),
        canonical_landscape_hash(&restored)
    );
    assert_eq!(
        landscape.optimum_score().to_bits(),
        restored.optimum_score().to_bits()
    );
    assert_eq!(landscape.optima(), restored.optima());
    assert_eq!(landscape.provenance(), restored.provenance());
}

#[test]
fn json_roundtrip_preserves_the_landscape() {
    let parameters = Parameters::new(4, 3, 2, 2).unwrap();
    let landscape =
        Landscape::construct(parameters, CodomainFamily::DeceptiveTrap, 5).unwrap();

    let json = landscape_to_json(&landscape).unwrap();
    let restored = landscape_from_json(&json).unwrap();

    assert_eq!(
        canonical_landscape_hash(&landscape),
        canonical_landscape_hash(&restored)
    );
}

#[test]
fn truncated_bytes_are_rejected() {
    let parameters = Parameters::new(3, 3, 1, 1).unwrap();
    let landscape =
        Landscape::construct(parameters, CodomainFamily::Random, 9).unwrap();
    let bytes = landscape_to_bytes(&landscape).unwrap();

    match landscape_from_bytes(&bytes[..bytes.len() / 2]).unwrap_err() {
        TdmkError::Serde(info) => assert_eq!(info.code, "deserialize-bytes"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tampered_ground_truth_fails_verification() {
    let parameters = Parameters::new(3, 3, 1, 1).unwrap();
    let landscape =
        Landscape::construct(parameters, CodomainFamily::Trap, 9).unwrap();
    let json = landscape_to_json(&landscape).unwrap();

    // The trap optimum score is exactly 9 for three cliques of size three.
    let tampered = json.replacen("\"optimum_score\": 9.0", "\"optimum_score\": 8.0", 1);
    assert_ne!(json, tampered);
    match landscape_from_json(&tampered).unwrap_err() {
        TdmkError::Serde(info) => assert_eq!(info.code, "deserialize-verify"),
        other => panic!("unexpected error: {other:?}"),
    }
}
