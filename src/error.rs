use std::fmt;

/// Everything that can go wrong while loading configuration, assets or
/// assembling a wall.  Per-frame synchronisation never fails.
#[derive(Debug)]
pub enum WallError {
    /// Configuration that would produce degenerate geometry (zero resolution,
    /// non-positive sizes, non-positive mass, ...).
    InvalidConfiguration(String),
    /// A named asset the wall depends on is not known to the asset provider.
    MissingAsset(String),
    Io(std::io::Error),
    Parse(serde_json::Error),
    Image(image::ImageError),
}

impl From<std::io::Error> for WallError {
    fn from(e: std::io::Error) -> Self {
        WallError::Io(e)
    }
}

impl From<serde_json::Error> for WallError {
    fn from(e: serde_json::Error) -> Self {
        WallError::Parse(e)
    }
}

impl From<image::ImageError> for WallError {
    fn from(e: image::ImageError) -> Self {
        WallError::Image(e)
    }
}

impl fmt::Display for WallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WallError::InvalidConfiguration(msg) => write!(f, "invalid wall configuration: {msg}"),
            WallError::MissingAsset(name) => write!(f, "missing asset '{name}'"),
            WallError::Io(e) => write!(f, "IO error: {e}"),
            WallError::Parse(e) => write!(f, "config parse error: {e}"),
            WallError::Image(e) => write!(f, "image error: {e}"),
        }
    }
}

impl std::error::Error for WallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WallError::Io(e) => Some(e),
            WallError::Parse(e) => Some(e),
            WallError::Image(e) => Some(e),
            _ => None,
        }
    }
}
