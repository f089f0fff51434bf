use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ContrastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ContrastError::media("x").to_string().contains("media error:"));
    assert!(
        ContrastError::resolution("x")
            .to_string()
            .contains("resolution error:")
    );
    assert!(
        ContrastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ContrastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: ContrastError = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
    assert!(matches!(err, ContrastError::Serde(_)));
}
