use crate::assets::media::AudioInfo;

/// Display duration, in whole seconds, for a still paired with `audio`.
///
/// Always `floor(duration) + 1`, so the still outlasts its narration. Saturates at `u32::MAX`.
pub fn resolve_display_secs(audio: &AudioInfo) -> u32 {
    let whole = audio.duration_secs().floor();
    if whole >= f64::from(u32::MAX - 1) {
        return u32::MAX;
    }
    whole as u32 + 1
}

#[cfg(test)]
#[path = "../../tests/unit/clip/duration.rs"]
mod tests;
