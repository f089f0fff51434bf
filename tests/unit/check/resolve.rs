use super::*;
use crate::assets::decode::PreparedImage;
use crate::assets::store::{InMemoryMediaLoader, NoMediaLoader};
use crate::story::model::{Flip, Pattern, Resource, ShapeProps};

fn element(id: &str, kind: ElementKind) -> Element {
    Element {
        id: id.to_string(),
        x: 0.0,
        y: 0.0,
        width: 200.0,
        height: 100.0,
        rotation_angle: 0.0,
        flip: Flip::default(),
        is_background: false,
        is_default_background: false,
        kind,
    }
}

fn image_kind(src: &str, w: f64, h: f64) -> ElementKind {
    ElementKind::Image(MediaProps {
        resource: Resource {
            src: src.to_string(),
            width: w,
            height: h,
        },
        ..MediaProps::default()
    })
}

fn red_blue_loader() -> InMemoryMediaLoader {
    let mut img = image::RgbaImage::new(2, 1);
    img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, image::Rgba([0, 0, 255, 255]));
    InMemoryMediaLoader::new().with_image("rb.png", PreparedImage::from_rgba(img))
}

fn page_with(background: Option<Pattern>) -> Page {
    Page {
        id: "p".to_string(),
        elements: vec![],
        background_color: background,
        page_size: None,
    }
}

const RIGHT_HALF_TEXT: Rect = Rect {
    x0: 120.0,
    y0: 20.0,
    x1: 180.0,
    y1: 80.0,
};

#[test]
fn shape_uses_its_own_fill() {
    let page = page_with(Some(Pattern::solid(Rgba8::WHITE)));
    let el = element(
        "s",
        ElementKind::Shape(ShapeProps {
            background_color: Some(Pattern::solid(Rgba8::opaque(9, 9, 9))),
        }),
    );
    let got = BackgroundResolver::for_element(&el, &page)
        .resolve(RIGHT_HALF_TEXT, &page, &NoMediaLoader, &CheckOpts::default())
        .unwrap();
    assert_eq!(got, Some(Rgba8::opaque(9, 9, 9)));
}

#[test]
fn page_background_shape_uses_page_fill() {
    let page = page_with(Some(Pattern::solid(Rgba8::opaque(1, 2, 3))));
    let mut el = element("bg", ElementKind::Shape(ShapeProps::default()));
    el.is_default_background = true;
    let got = BackgroundResolver::for_element(&el, &page)
        .resolve(RIGHT_HALF_TEXT, &page, &NoMediaLoader, &CheckOpts::default())
        .unwrap();
    assert_eq!(got, Some(Rgba8::opaque(1, 2, 3)));
}

#[test]
fn gradients_and_videos_give_no_color() {
    let page = page_with(None);
    let gradient = element(
        "g",
        ElementKind::Shape(ShapeProps {
            background_color: Some(Pattern::Gradient {
                kind: "linear".to_string(),
                stops: vec![],
            }),
        }),
    );
    let video = element(
        "v",
        ElementKind::Video(MediaProps {
            resource: Resource {
                src: "rb.png".to_string(),
                width: 2.0,
                height: 1.0,
            },
            ..MediaProps::default()
        }),
    );
    for el in [&gradient, &video] {
        let got = BackgroundResolver::for_element(el, &page)
            .resolve(RIGHT_HALF_TEXT, &page, &red_blue_loader(), &CheckOpts::default())
            .unwrap();
        assert_eq!(got, None);
    }
}

#[test]
fn image_samples_region_under_text() {
    let page = page_with(None);
    let el = element("img", image_kind("rb.png", 2.0, 1.0));
    let got = BackgroundResolver::for_element(&el, &page)
        .resolve(RIGHT_HALF_TEXT, &page, &red_blue_loader(), &CheckOpts::default())
        .unwrap();
    assert_eq!(got, Some(Rgba8::opaque(0, 0, 255)));

    let left = Rect::new(20.0, 20.0, 80.0, 80.0);
    let got = BackgroundResolver::for_element(&el, &page)
        .resolve(left, &page, &red_blue_loader(), &CheckOpts::default())
        .unwrap();
    assert_eq!(got, Some(Rgba8::opaque(255, 0, 0)));
}

#[test]
fn flipped_image_samples_mirrored_region() {
    let page = page_with(None);
    let mut el = element("img", image_kind("rb.png", 2.0, 1.0));
    el.flip.horizontal = true;
    let got = BackgroundResolver::for_element(&el, &page)
        .resolve(RIGHT_HALF_TEXT, &page, &red_blue_loader(), &CheckOpts::default())
        .unwrap();
    assert_eq!(got, Some(Rgba8::opaque(255, 0, 0)));
}

#[test]
fn page_background_image_spans_full_bleed() {
    let page = page_with(None);
    let green = image::RgbaImage::from_pixel(9, 16, image::Rgba([0, 160, 0, 255]));
    let loader = InMemoryMediaLoader::new().with_image("g.png", PreparedImage::from_rgba(green));
    let mut el = element("bg", image_kind("g.png", 9.0, 16.0));
    el.is_background = true;
    el.rotation_angle = 45.0;
    let got = BackgroundResolver::for_element(&el, &page)
        .resolve(
            Rect::new(0.0, 0.0, 412.0, 40.0),
            &page,
            &loader,
            &CheckOpts::default(),
        )
        .unwrap();
    assert_eq!(got, Some(Rgba8::opaque(0, 160, 0)));
}

#[test]
fn missing_media_is_an_error_for_the_caller_to_swallow() {
    let page = page_with(None);
    let el = element("img", image_kind("nope.png", 2.0, 1.0));
    let res = BackgroundResolver::for_element(&el, &page).resolve(
        RIGHT_HALF_TEXT,
        &page,
        &red_blue_loader(),
        &CheckOpts::default(),
    );
    assert!(res.is_err());
}
