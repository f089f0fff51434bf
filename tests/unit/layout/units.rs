use super::*;

#[test]
fn data_space_is_identity_at_reference_size() {
    assert_eq!(data_to_editor_x(100.0, PAGE_WIDTH), 100.0);
    assert_eq!(data_to_editor_y(100.0, PAGE_HEIGHT), 100.0);
}

#[test]
fn data_space_scales_to_page_pixels() {
    assert_eq!(data_to_editor_x(206.0, 824.0), 412.0);
    assert_eq!(data_to_editor_y(309.0, 309.0), 154.5);
    assert_eq!(editor_pixels(1.0 / 3.0), 0.33333);
}

#[test]
fn full_bleed_offset_matches_ratio_gap() {
    // 412 / (9/16) = 732.444..., 412 / (412/618) = 618.
    let off = full_bleed_offset(PAGE_WIDTH);
    assert!((off - (732.444_444 - 618.0) / 2.0).abs() < 1e-3);
}

#[test]
fn font_size_converts_pixels_to_points() {
    assert!((font_size_pt(24.0, 1.333333) - 18.0).abs() < 1e-4);
    assert!((font_size_pt(16.0, 1.333333) - 12.0).abs() < 1e-4);
}
