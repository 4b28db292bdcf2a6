use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RenderError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        RenderError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(RenderError::raster("x").to_string().contains("raster error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RenderError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
