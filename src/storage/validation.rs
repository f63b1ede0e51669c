//! Document id validation
//!
//! Translates between document ids and real paths under the tree root. Both
//! directions are pure: no filesystem access, no symlink resolution.

use crate::error::DocumentError;
use std::path::{Component, Path, PathBuf};

/// Check that a single name is safe to join onto a directory
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains('/')
        && !segment.contains('\\')
        && !segment.contains('\0')
}

/// Build the document id for a path under `root`.
///
/// `root` itself maps to the bare root token.
pub fn to_document_id(root_id: &str, root: &Path, path: &Path) -> Result<String, DocumentError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| DocumentError::InvalidId(path.display().to_string()))?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                // names resolve_document_id would refuse get no id at all
                let name = name
                    .to_str()
                    .filter(|name| is_valid_segment(name))
                    .ok_or_else(|| DocumentError::InvalidId(path.display().to_string()))?;
                segments.push(name);
            }
            Component::CurDir => continue,
            _ => return Err(DocumentError::InvalidId(path.display().to_string())),
        }
    }

    if segments.is_empty() {
        Ok(root_id.to_string())
    } else {
        Ok(format!("{}/{}", root_id, segments.join("/")))
    }
}

/// Resolve a document id to a path under `root`.
///
/// Ids must carry the root token prefix and every segment must be a plain
/// name, so the result is always `root` or one of its descendants.
pub fn resolve_document_id(root_id: &str, root: &Path, id: &str) -> Result<PathBuf, DocumentError> {
    if id == root_id {
        return Ok(root.to_path_buf());
    }

    let relative = id
        .strip_prefix(root_id)
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or_else(|| DocumentError::InvalidId(id.to_string()))?;

    let mut path = root.to_path_buf();
    for segment in relative.split('/') {
        if !is_valid_segment(segment) {
            return Err(DocumentError::InvalidId(id.to_string()));
        }
        path.push(segment);
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_ID: &str = "internal_data";

    #[test]
    fn root_maps_to_token() {
        let root = Path::new("/data/emu");
        assert_eq!(to_document_id(ROOT_ID, root, root).unwrap(), ROOT_ID);
        assert_eq!(resolve_document_id(ROOT_ID, root, ROOT_ID).unwrap(), root);
    }

    #[test]
    fn round_trip_paths() {
        let root = Path::new("/data/emu");
        for rel in ["saves", "saves/nes", "saves/nes/zelda.srm", "states/snes/a b.state"] {
            let path = root.join(rel);
            let id = to_document_id(ROOT_ID, root, &path).unwrap();
            assert_eq!(id, format!("{ROOT_ID}/{rel}"));
            assert_eq!(resolve_document_id(ROOT_ID, root, &id).unwrap(), path);
            let again = to_document_id(ROOT_ID, root, &resolve_document_id(ROOT_ID, root, &id).unwrap());
            assert_eq!(again.unwrap(), id);
        }
    }

    #[test]
    fn rejects_traversal() {
        let root = Path::new("/data/emu");
        for id in [
            "internal_data/..",
            "internal_data/../etc/passwd",
            "internal_data/saves/../../x",
            "internal_data/./saves",
            "internal_data//etc",
            "internal_data/",
            "internal_data/saves/",
            "internal_data/a\\..\\b",
        ] {
            assert!(
                matches!(resolve_document_id(ROOT_ID, root, id), Err(DocumentError::InvalidId(_))),
                "{id} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_foreign_prefix() {
        let root = Path::new("/data/emu");
        assert!(resolve_document_id(ROOT_ID, root, "other_root/saves").is_err());
        assert!(resolve_document_id(ROOT_ID, root, "internal_datasaves").is_err());
        assert!(resolve_document_id(ROOT_ID, root, "/etc/passwd").is_err());
    }

    #[test]
    fn path_outside_root_has_no_id() {
        let root = Path::new("/data/emu");
        assert!(to_document_id(ROOT_ID, root, Path::new("/data/other/file")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn unresolvable_names_have_no_id() {
        let root = Path::new("/data/emu");
        let path = root.join("saves").join("a\\b.srm");
        assert!(matches!(
            to_document_id(ROOT_ID, root, &path),
            Err(DocumentError::InvalidId(_))
        ));
    }

    #[test]
    fn segment_rules() {
        assert!(is_valid_segment("zelda.srm"));
        assert!(is_valid_segment("..hidden"));
        assert!(!is_valid_segment(""));
        assert!(!is_valid_segment(".."));
        assert!(!is_valid_segment("a/b"));
    }
}
