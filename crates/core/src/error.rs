//! Error types for the glint core.

use thiserror::Error;

/// Errors produced by effect operations.
#[derive(Debug, Error)]
pub enum EffectError {
    /// Width or height was zero when creating a Surface or mask.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// An (x, y) coordinate was outside the surface bounds.
    #[error("pixel ({x}, {y}) out of bounds for surface of size ({width}, {height})")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A requested effect name is not registered.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// An image layer could not be decoded or loaded.
    #[error("image load failed: {0}")]
    ImageLoad(String),

    /// Text could not be shaped or rasterized.
    #[error("text rasterization failed: {0}")]
    TextRaster(String),

    /// An I/O failure (snapshot write, layer read).
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = EffectError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn out_of_bounds_includes_coordinates_and_dimensions() {
        let err = EffectError::OutOfBounds {
            x: 10,
            y: 20,
            width: 8,
            height: 8,
        };
        let msg = format!("{err}");
        assert!(msg.contains("10"), "missing x in: {msg}");
        assert!(msg.contains("20"), "missing y in: {msg}");
        assert!(msg.contains("8"), "missing dimension in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = EffectError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn unknown_effect_includes_name() {
        let err = EffectError::UnknownEffect("sparkle".into());
        let msg = format!("{err}");
        assert!(msg.contains("sparkle"), "missing name in: {msg}");
    }

    #[test]
    fn image_load_includes_message() {
        let err = EffectError::ImageLoad("truncated png".into());
        assert!(format!("{err}").contains("truncated png"));
    }

    #[test]
    fn text_raster_includes_message() {
        let err = EffectError::TextRaster("no fonts".into());
        assert!(format!("{err}").contains("no fonts"));
    }

    #[test]
    fn effect_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EffectError>();
    }

    #[test]
    fn effect_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EffectError>();
    }
}
