use super::*;
use serde_json::json;

fn sample_page() -> serde_json::Value {
    json!({
        "id": "page-1",
        "backgroundColor": {"color": {"r": 255, "g": 255, "b": 255}},
        "elements": [
            {
                "id": "bg",
                "type": "shape",
                "isBackground": true,
                "x": 1, "y": 1, "width": 1, "height": 1,
                "backgroundColor": {"color": {"r": 196, "g": 196, "b": 196}}
            },
            {
                "id": "img",
                "type": "image",
                "x": 10, "y": 20, "width": 200, "height": 100,
                "rotationAngle": 15,
                "flip": {"horizontal": true},
                "scale": 120,
                "focalX": 40,
                "resource": {"src": "photos/sky.png", "width": 800, "height": 400}
            },
            {
                "id": "txt",
                "type": "text",
                "x": 20, "y": 30, "width": 150, "height": 40,
                "content": "<span style=\"color: #fff\">Hello</span>",
                "fontSize": 24,
                "backgroundTextMode": "FILL"
            },
            {
                "id": "sticker",
                "type": "sticker",
                "x": 0, "y": 0, "width": 10, "height": 10
            }
        ]
    })
}

#[test]
fn deserializes_editor_page_json() {
    let page: Page = serde_json::from_value(sample_page()).unwrap();
    assert_eq!(page.id, "page-1");
    assert_eq!(page.elements.len(), 4);
    assert_eq!(
        page.background_color.as_ref().and_then(Pattern::solid_color),
        Some(Rgba8::WHITE)
    );

    let bg = &page.elements[0];
    assert!(bg.is_page_background());
    assert!(matches!(bg.kind, ElementKind::Shape(_)));

    let img = &page.elements[1];
    assert_eq!(img.rotation_angle, 15.0);
    assert!(img.flip.horizontal && !img.flip.vertical);
    let ElementKind::Image(media) = &img.kind else {
        panic!("expected image element");
    };
    assert_eq!(media.resource.src, "photos/sky.png");
    assert_eq!(media.scale, Some(120.0));
    assert_eq!(media.focal_y, None);

    let text = page.elements[2].as_text().unwrap();
    assert_eq!(text.font_size, Some(24.0));
    assert_eq!(text.background_text_mode, Some(BackgroundTextMode::Fill));

    assert!(matches!(page.elements[3].kind, ElementKind::Other));
}

#[test]
fn text_mode_stays_unset_when_missing() {
    let el: Element = serde_json::from_value(json!({
        "id": "t", "type": "text", "content": "hi"
    }))
    .unwrap();
    assert_eq!(el.as_text().unwrap().background_text_mode, None);

    let el: Element = serde_json::from_value(json!({
        "id": "t", "type": "text", "content": "hi", "backgroundTextMode": "NONE"
    }))
    .unwrap();
    assert_eq!(
        el.as_text().unwrap().background_text_mode,
        Some(BackgroundTextMode::None)
    );
}

#[test]
fn gradient_patterns_have_no_solid_color() {
    let p: Pattern = serde_json::from_value(json!({
        "type": "linear",
        "stops": [
            {"color": {"r": 0, "g": 0, "b": 0}, "position": 0},
            {"color": {"r": 255, "g": 255, "b": 255}, "position": 1}
        ]
    }))
    .unwrap();
    assert_eq!(p.solid_color(), None);
}

#[test]
fn page_size_defaults_to_data_space() {
    let page = Page::default();
    assert_eq!(page.size().width, 412.0);
    assert_eq!(page.size().height, 618.0);
}

#[test]
fn validate_rejects_bad_geometry() {
    let mut page: Page = serde_json::from_value(sample_page()).unwrap();
    assert!(page.validate().is_ok());
    page.elements[1].width = -5.0;
    assert!(page.validate().is_err());
    page.elements[1].width = f64::INFINITY;
    assert!(page.validate().is_err());
}

#[test]
fn story_json_accepts_story_or_single_page() {
    let story = Story::from_json(r#"{"pages": [{"id": "a"}, {"id": "b"}]}"#).unwrap();
    assert_eq!(story.pages.len(), 2);

    let single = Story::from_json(&sample_page().to_string()).unwrap();
    assert_eq!(single.pages.len(), 1);
    assert_eq!(single.pages[0].id, "page-1");

    assert!(matches!(
        Story::from_json("[1, 2]").unwrap_err(),
        ContrastError::Serde(_)
    ));
    assert!(matches!(
        Story::from_json("{not json").unwrap_err(),
        ContrastError::Serde(_)
    ));
}
