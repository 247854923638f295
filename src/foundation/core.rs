use crate::foundation::error::{ReelError, ReelResult};

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Number of frames covering `secs` whole seconds.
    ///
    /// Exact for integer rates; rational rates round down.
    pub fn frames_for_secs(self, secs: u64) -> u64 {
        secs.saturating_mul(u64::from(self.num)) / u64::from(self.den)
    }

    /// `num/den` form accepted by ffmpeg's `-r` and `fps=` options.
    pub fn ffmpeg_rate(self) -> String {
        format!("{}/{}", self.num, self.den)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Derive an encodable canvas from a source image size.
    ///
    /// yuv420p output needs even dimensions, so odd sizes are rounded down (minimum 2).
    pub fn from_image_size(width: u32, height: u32) -> Self {
        fn even(v: u32) -> u32 {
            (v - v % 2).max(2)
        }
        Self {
            width: even(width),
            height: even(height),
        }
    }

    /// Validate a caller-provided canvas.
    pub fn validate(self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation("canvas width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
