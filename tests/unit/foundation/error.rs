use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        IntroError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        IntroError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(IntroError::audio("x").to_string().contains("audio error:"));
    assert!(IntroError::render("x").to_string().contains("render error:"));
    assert!(
        IntroError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = IntroError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
