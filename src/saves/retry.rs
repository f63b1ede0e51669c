//! Bounded retry for save file access

use log::warn;

use crate::error::SaveError;

/// Run `operation` up to `attempts` times, retrying immediately on I/O errors.
///
/// Non-I/O errors are returned without retrying. At least one attempt is
/// always made.
pub fn with_retries<T, F>(attempts: usize, operation: &str, mut f: F) -> Result<T, SaveError>
where
    F: FnMut() -> Result<T, SaveError>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match f() {
            Ok(value) => return Ok(value),
            Err(SaveError::Io(e)) if attempt < attempts => {
                warn!(
                    "{} failed (attempt {}/{}): {}. Retrying...",
                    operation, attempt, attempts, e
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
