use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn red_blue() -> PreparedImage {
    let mut img = image::RgbaImage::new(2, 1);
    img.put_pixel(0, 0, image::Rgba(RED));
    img.put_pixel(1, 0, image::Rgba(BLUE));
    PreparedImage::from_rgba(img)
}

fn paint(width: f64, height: f64, rotation_deg: Option<f64>, flip: Flip) -> CanvasPaint {
    CanvasPaint {
        placement: MediaPlacement {
            width,
            height,
            offset_x: 0.0,
            offset_y: 0.0,
        },
        frame_size: (width, height),
        rotation_deg,
        flip,
    }
}

#[test]
fn plain_paint_scales_media_to_canvas() {
    let out = paint(20.0, 10.0, None, Flip::default())
        .render_window(&red_blue(), Rect::new(0.0, 0.0, 20.0, 10.0))
        .unwrap();
    assert_eq!(out.dimensions(), (20, 10));
    assert_eq!(out.get_pixel(0, 0).0, RED);
    assert_eq!(out.get_pixel(9, 9).0, RED);
    assert_eq!(out.get_pixel(10, 0).0, BLUE);
    assert_eq!(out.get_pixel(19, 5).0, BLUE);
}

#[test]
fn horizontal_flip_mirrors_media() {
    let flip = Flip {
        horizontal: true,
        vertical: false,
    };
    let out = paint(2.0, 1.0, None, flip)
        .render_window(&red_blue(), Rect::new(0.0, 0.0, 2.0, 1.0))
        .unwrap();
    assert_eq!(out.get_pixel(0, 0).0, BLUE);
    assert_eq!(out.get_pixel(1, 0).0, RED);
}

#[test]
fn half_turn_rotates_about_frame_center() {
    let out = paint(2.0, 1.0, Some(180.0), Flip::default())
        .render_window(&red_blue(), Rect::new(0.0, 0.0, 2.0, 1.0))
        .unwrap();
    assert_eq!(out.get_pixel(0, 0).0, BLUE);
    assert_eq!(out.get_pixel(1, 0).0, RED);
}

#[test]
fn rotation_is_ignored_when_absent() {
    let out = paint(2.0, 1.0, None, Flip::default())
        .render_window(&red_blue(), Rect::new(1.0, 0.0, 2.0, 1.0))
        .unwrap();
    assert_eq!(out.dimensions(), (1, 1));
    assert_eq!(out.get_pixel(0, 0).0, BLUE);
}

#[test]
fn pixels_outside_canvas_are_transparent() {
    let out = paint(2.0, 1.0, None, Flip::default())
        .render_window(&red_blue(), Rect::new(1.0, 0.0, 4.0, 2.0))
        .unwrap();
    assert_eq!(out.dimensions(), (3, 2));
    assert_eq!(out.get_pixel(0, 0).0, BLUE);
    assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0, 0]);
    assert_eq!(out.get_pixel(0, 1).0, [0, 0, 0, 0]);
}

#[test]
fn quarter_turn_uncovers_transparent_corners() {
    // A 4x2 canvas rotated 90 degrees about its centre only covers a 2x4 band around x=2.
    let out = paint(4.0, 2.0, Some(90.0), Flip::default())
        .render_window(&red_blue(), Rect::new(0.0, 0.0, 4.0, 2.0))
        .unwrap();
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
    assert_eq!(out.get_pixel(3, 1).0[3], 0);
    assert_eq!(out.get_pixel(1, 0).0[3], 255);
    assert_eq!(out.get_pixel(2, 1).0[3], 255);
}

#[test]
fn empty_window_is_a_resolution_error() {
    let err = paint(2.0, 1.0, None, Flip::default())
        .render_window(&red_blue(), Rect::new(0.0, 0.0, 0.2, 1.0))
        .unwrap_err();
    assert!(matches!(err, ContrastError::Resolution(_)));
}

#[test]
fn oversized_window_is_a_resolution_error() {
    let huge = paint(1e12, 1e12, None, Flip::default());
    let err = huge
        .render_window(&red_blue(), Rect::new(0.0, 0.0, 1e9, 1e9))
        .unwrap_err();
    assert!(matches!(err, ContrastError::Resolution(_)));

    let too_wide = paint(100_000.0, 10.0, None, Flip::default())
        .render_window(&red_blue(), Rect::new(0.0, 0.0, 70_000.0, 1.0))
        .unwrap_err();
    assert!(matches!(too_wide, ContrastError::Resolution(_)));
}
