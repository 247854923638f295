use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
    assert_eq!(Fps::new(24, 1).unwrap().ffmpeg_rate(), "24/1");
}

#[test]
fn frames_for_secs_is_exact_for_integer_rates() {
    let fps = Fps::new(24, 1).unwrap();
    assert_eq!(fps.frames_for_secs(15), 360);
    assert_eq!(fps.frames_for_secs(0), 0);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(ntsc.frames_for_secs(10), 299);
    assert_eq!(ntsc.ffmpeg_rate(), "30000/1001");
}

#[test]
fn canvas_from_image_size_rounds_to_even() {
    assert_eq!(
        Canvas::from_image_size(1024, 1024),
        Canvas {
            width: 1024,
            height: 1024
        }
    );
    assert_eq!(
        Canvas::from_image_size(801, 599),
        Canvas {
            width: 800,
            height: 598
        }
    );
    assert_eq!(
        Canvas::from_image_size(1, 1),
        Canvas {
            width: 2,
            height: 2
        }
    );
}

#[test]
fn canvas_validate_catches_odd_and_zero() {
    assert!(Canvas { width: 0, height: 2 }.validate().is_err());
    assert!(Canvas { width: 3, height: 2 }.validate().is_err());
    assert!(Canvas { width: 4, height: 2 }.validate().is_ok());
}
