//! MIME type lookup

/// Maps a file extension (without the dot) to a MIME type
pub trait MimeTypeLookup: Send + Sync {
    fn mime_for_extension(&self, extension: &str) -> Option<String>;
}

/// Lookup backed by the `mime_guess` extension table
#[derive(Debug, Default, Clone, Copy)]
pub struct GuessMimeTypes;

impl MimeTypeLookup for GuessMimeTypes {
    fn mime_for_extension(&self, extension: &str) -> Option<String> {
        if extension.is_empty() {
            return None;
        }
        mime_guess::from_ext(extension)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }
}
