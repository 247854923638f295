use super::*;

fn secs(d: f64) -> u32 {
    resolve_display_secs(&AudioInfo::new(d).unwrap())
}

#[test]
fn zero_length_audio_still_gets_one_second() {
    assert_eq!(secs(0.0), 1);
}

#[test]
fn floor_plus_one_for_known_values() {
    assert_eq!(secs(4.2), 5);
    assert_eq!(secs(1.0), 2);
    assert_eq!(secs(7.9), 8);
    assert_eq!(secs(0.999), 1);
    assert_eq!(secs(59.0), 60);
}

#[test]
fn floor_plus_one_holds_across_a_sweep() {
    for step in 0..20_000u32 {
        let d = f64::from(step) * 0.0137;
        let got = secs(d);
        assert!(got >= 1);
        assert_eq!(f64::from(got), d.floor() + 1.0, "duration {d}");
        // Never shorter than the narration.
        assert!(f64::from(got) > d);
    }
}

#[test]
fn huge_durations_saturate() {
    assert_eq!(secs(1e12), u32::MAX);
}
