use std::io::Cursor;

use super::*;

fn solid_png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn media_rel_path_strips_url_origin_and_query() {
    assert_eq!(
        media_rel_path("https://example.com/wp-content/uploads/sky.jpg?w=300").unwrap(),
        "wp-content/uploads/sky.jpg"
    );
    assert_eq!(media_rel_path("photos/a.png#frag").unwrap(), "photos/a.png");
    assert!(media_rel_path("https://example.com").is_err());
}

#[test]
fn fs_loader_reads_and_decodes() {
    let tmp = std::env::temp_dir().join(format!(
        "story_contrast_store_test_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(tmp.join("uploads")).unwrap();
    std::fs::write(tmp.join("uploads/dark.png"), solid_png(3, 2, [10, 20, 30, 255])).unwrap();

    let loader = FsMediaLoader::new(&tmp);
    let img = loader
        .load("https://cdn.example.org/uploads/dark.png")
        .unwrap();
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(&img.rgba8()[20..24], &[10, 20, 30, 255]);

    let missing = loader.load("uploads/missing.png").unwrap_err();
    assert!(matches!(missing, ContrastError::Media(_)));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn in_memory_loader_resolves_registered_sources_only() {
    let img = PreparedImage::from_rgba(image::RgbaImage::from_pixel(1, 1, image::Rgba([0; 4])));
    let loader = InMemoryMediaLoader::new().with_image("a.png", img);
    assert!(loader.load("a.png").is_ok());
    assert!(matches!(
        loader.load("b.png").unwrap_err(),
        ContrastError::Media(_)
    ));
    assert!(NoMediaLoader.load("a.png").is_err());
}
