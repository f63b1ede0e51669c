//! Virtual document tree
//!
//! Exposes the base directory as a tree of opaque document ids. Every
//! operation resolves ids through `storage::validation`, so callers never see
//! or supply raw paths.

use log::{debug, info, warn};
use std::collections::VecDeque;
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::documents::mime::{GuessMimeTypes, MimeTypeLookup};
use crate::documents::results::{
    DocumentEntry, DocumentFlags, DocumentKind, MIME_TYPE_DIR, MIME_TYPE_FALLBACK, OpenMode,
    RootDescriptor, RootFlags,
};
use crate::error::DocumentError;
use crate::storage::filesystem::modified_millis;
use crate::storage::locator::DirectoryLocator;
use crate::storage::permissions::is_writable;
use crate::storage::validation::{is_valid_segment, resolve_document_id, to_document_id};

/// Well-known directories that get a fixed display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryRole {
    Saves,
    States,
    StatesPreview,
    InternalRoms,
}

impl DirectoryRole {
    pub fn label(self) -> &'static str {
        match self {
            DirectoryRole::Saves => "Saves",
            DirectoryRole::States => "States",
            DirectoryRole::StatesPreview => "Previews",
            DirectoryRole::InternalRoms => "ROMs",
        }
    }
}

pub struct VirtualDocumentTree {
    locator: Arc<dyn DirectoryLocator>,
    mime: Box<dyn MimeTypeLookup>,
    root_id: String,
    root_title: String,
    root_icon: String,
    search_limit: usize,
    internal_roms: PathBuf,
    special_directories: Vec<(PathBuf, DirectoryRole)>,
}

impl VirtualDocumentTree {
    pub fn new(config: &StorageConfig, locator: Arc<dyn DirectoryLocator>) -> Self {
        Self::with_mime_lookup(config, locator, Box::new(GuessMimeTypes))
    }

    pub fn with_mime_lookup(
        config: &StorageConfig,
        locator: Arc<dyn DirectoryLocator>,
        mime: Box<dyn MimeTypeLookup>,
    ) -> Self {
        let special_directories = vec![
            (locator.saves_directory(), DirectoryRole::Saves),
            (locator.states_directory(), DirectoryRole::States),
            (locator.states_preview_directory(), DirectoryRole::StatesPreview),
            (locator.internal_roms_directory(), DirectoryRole::InternalRoms),
        ];

        Self {
            internal_roms: locator.internal_roms_directory(),
            locator,
            mime,
            root_id: config.root_id.clone(),
            root_title: config.root_title.clone(),
            root_icon: config.root_icon.clone(),
            search_limit: config.search_limit,
            special_directories,
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    /// The single root of the tree
    pub fn list_roots(&self) -> Vec<RootDescriptor> {
        vec![RootDescriptor {
            root_id: self.root_id.clone(),
            document_id: self.root_id.clone(),
            title: self.root_title.clone(),
            icon: self.root_icon.clone(),
            flags: RootFlags::SUPPORTS_CREATE | RootFlags::SUPPORTS_SEARCH,
        }]
    }

    /// Describe a single document
    pub fn describe(&self, id: &str) -> Result<DocumentEntry, DocumentError> {
        let path = self.resolve(id)?;
        self.entry_for(&path).map_err(|e| not_found_as(e, id))
    }

    /// MIME type of a single document
    pub fn document_type(&self, id: &str) -> Result<String, DocumentError> {
        self.describe(id).map(|entry| entry.mime_type)
    }

    /// List the immediate children of a directory.
    ///
    /// A missing or non-directory parent yields an empty list.
    pub fn list_children(&self, parent_id: &str) -> Result<Vec<DocumentEntry>, DocumentError> {
        let parent = self.resolve(parent_id)?;
        let children = self.read_children(&parent);

        let mut entries = Vec::with_capacity(children.len());
        for child in children {
            if self.is_suppressed(&child) {
                continue;
            }
            if let Some(entry) = self.entry_if_present(&child) {
                entries.push(entry);
            }
        }

        debug!("Listed {} ({} entries)", parent_id, entries.len());
        Ok(entries)
    }

    /// Open a document. Never creates the file.
    pub fn open(&self, id: &str, mode: OpenMode) -> Result<File, DocumentError> {
        let path = self.resolve(id)?;
        let metadata = metadata_for(&path, id)?;

        if mode.writes() && !is_writable(&metadata) {
            return Err(DocumentError::PermissionDenied(id.to_string()));
        }

        let mut options = OpenOptions::new();
        match mode {
            OpenMode::Read => options.read(true),
            OpenMode::Write => options.write(true),
            OpenMode::ReadWrite => options.read(true).write(true),
            OpenMode::Append => options.append(true),
            OpenMode::Truncate => options.write(true).truncate(true),
        };

        options.open(&path).map_err(|e| not_found_as(e.into(), id))
    }

    /// Thumbnails are not generated: the full document is returned and the
    /// size hint is ignored.
    pub fn open_thumbnail(&self, id: &str, _size_hint: (u32, u32)) -> Result<File, DocumentError> {
        self.open(id, OpenMode::Read)
    }

    /// Create a directory (recursively) or an empty file under `parent_id`.
    ///
    /// An existing file keeps its content.
    pub fn create_document(
        &self,
        parent_id: &str,
        kind: DocumentKind,
        display_name: &str,
    ) -> Result<String, DocumentError> {
        if !is_valid_segment(display_name) {
            return Err(DocumentError::InvalidId(format!("{parent_id}/{display_name}")));
        }

        let parent = self.resolve(parent_id)?;
        let parent_metadata = metadata_for(&parent, parent_id)?;
        if !parent_metadata.is_dir() {
            return Err(DocumentError::InvalidId(parent_id.to_string()));
        }

        let path = parent.join(display_name);
        match kind {
            DocumentKind::Directory => fs::create_dir_all(&path)?,
            DocumentKind::File => {
                OpenOptions::new().write(true).create(true).open(&path)?;
            }
        }

        let id = format!("{parent_id}/{display_name}");
        info!("Created {:?} {} (real: {})", kind, id, path.display());
        Ok(id)
    }

    /// Delete a file or an empty directory
    pub fn delete_document(&self, id: &str) -> Result<(), DocumentError> {
        if id == self.root_id {
            return Err(DocumentError::InvalidId(id.to_string()));
        }

        let path = self.resolve(id)?;
        let metadata = fs::symlink_metadata(&path).map_err(|e| not_found_as(e.into(), id))?;

        if metadata.is_dir() {
            if fs::read_dir(&path)?.next().is_some() {
                return Err(DocumentError::NotEmpty(id.to_string()));
            }
            fs::remove_dir(&path)?;
        } else {
            fs::remove_file(&path)?;
        }

        info!("Deleted {} (real: {})", id, path.display());
        Ok(())
    }

    /// Rename a document within its parent directory.
    ///
    /// Always returns `None`: ids are derived from paths, so the caller
    /// re-derives the new id from the parent listing.
    pub fn rename_document(
        &self,
        id: &str,
        new_display_name: &str,
    ) -> Result<Option<String>, DocumentError> {
        if id == self.root_id || !is_valid_segment(new_display_name) {
            return Err(DocumentError::InvalidId(id.to_string()));
        }

        let path = self.resolve(id)?;
        fs::symlink_metadata(&path).map_err(|e| not_found_as(e.into(), id))?;

        let parent = path
            .parent()
            .ok_or_else(|| DocumentError::InvalidId(id.to_string()))?;
        let target = parent.join(new_display_name);

        if target == path {
            return Ok(None);
        }
        if fs::symlink_metadata(&target).is_ok() {
            return Err(DocumentError::AlreadyExists(new_display_name.to_string()));
        }

        fs::rename(&path, &target)?;
        info!(
            "Renamed {} to {} (real: {})",
            id,
            new_display_name,
            target.display()
        );
        Ok(None)
    }

    /// Case-insensitive file name search across the whole tree, breadth first
    pub fn search_documents(
        &self,
        root_id: &str,
        query: &str,
    ) -> Result<Vec<DocumentEntry>, DocumentError> {
        if root_id != self.root_id {
            return Err(DocumentError::NotFound(root_id.to_string()));
        }

        let needle = query.trim().to_lowercase();
        let mut results = Vec::new();
        if needle.is_empty() {
            return Ok(results);
        }

        let mut pending = VecDeque::from([self.locator.base_directory()]);
        while let Some(dir) = pending.pop_front() {
            for child in self.read_children(&dir) {
                // symlinked directories are not followed
                let is_real_dir = fs::symlink_metadata(&child)
                    .map(|m| m.is_dir())
                    .unwrap_or(false);
                if is_real_dir {
                    pending.push_back(child.clone());
                }
                if self.is_suppressed(&child) {
                    continue;
                }

                let matches = child
                    .file_name()
                    .map(|name| name.to_string_lossy().to_lowercase().contains(&needle))
                    .unwrap_or(false);
                if !matches {
                    continue;
                }

                if let Some(entry) = self.entry_if_present(&child) {
                    results.push(entry);
                    if results.len() >= self.search_limit {
                        debug!("Search {:?} hit limit of {}", query, self.search_limit);
                        return Ok(results);
                    }
                }
            }
        }

        debug!("Search {:?} found {} entries", query, results.len());
        Ok(results)
    }

    /// Check whether `document_id` lies strictly below `parent_id`
    pub fn is_child_document(
        &self,
        parent_id: &str,
        document_id: &str,
    ) -> Result<bool, DocumentError> {
        let parent = self.resolve(parent_id)?;
        let document = self.resolve(document_id)?;
        Ok(document != parent && document.starts_with(&parent))
    }

    fn resolve(&self, id: &str) -> Result<PathBuf, DocumentError> {
        resolve_document_id(&self.root_id, &self.locator.base_directory(), id)
    }

    fn is_suppressed(&self, path: &Path) -> bool {
        path == self.internal_roms
    }

    /// Child paths sorted by name; unreadable directories have no children
    fn read_children(&self, dir: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound && dir.is_dir() {
                    warn!("Failed to list directory {}: {}", dir.display(), e);
                }
                return Vec::new();
            }
        };

        let mut children: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        children
    }

    /// Describe an entry found by a listing, skipping it if it is gone
    fn entry_if_present(&self, path: &Path) -> Option<DocumentEntry> {
        match self.entry_for(path) {
            Ok(entry) => Some(entry),
            Err(DocumentError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("Skipping vanished entry {}", path.display());
                None
            }
            Err(e) => {
                warn!("Skipping entry {}: {}", path.display(), e);
                None
            }
        }
    }

    fn entry_for(&self, path: &Path) -> Result<DocumentEntry, DocumentError> {
        let metadata = fs::metadata(path)?;
        let document_id = to_document_id(&self.root_id, &self.locator.base_directory(), path)?;

        Ok(DocumentEntry {
            document_id,
            mime_type: self.mime_type_for(path, &metadata),
            display_name: self.display_name_for(path),
            last_modified: modified_millis(metadata.modified().ok()),
            flags: flags_for(&metadata),
            size: metadata.len(),
        })
    }

    fn mime_type_for(&self, path: &Path, metadata: &Metadata) -> String {
        if metadata.is_dir() {
            return MIME_TYPE_DIR.to_string();
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.mime.mime_for_extension(ext))
            .unwrap_or_else(|| MIME_TYPE_FALLBACK.to_string())
    }

    fn display_name_for(&self, path: &Path) -> String {
        self.special_directories
            .iter()
            .find(|(dir, _)| dir == path)
            .map(|(_, role)| role.label().to_string())
            .unwrap_or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default()
            })
    }
}

fn flags_for(metadata: &Metadata) -> DocumentFlags {
    let mut flags = DocumentFlags::NONE;

    if is_writable(metadata) {
        flags = flags
            | DocumentFlags::SUPPORTS_WRITE
            | DocumentFlags::SUPPORTS_RENAME
            | DocumentFlags::SUPPORTS_DELETE;
    }

    if metadata.is_dir() {
        flags = flags | DocumentFlags::DIR_SUPPORTS_CREATE;
    }

    flags
}

fn metadata_for(path: &Path, id: &str) -> Result<Metadata, DocumentError> {
    fs::metadata(path).map_err(|e| not_found_as(e.into(), id))
}

/// Turn an `io::ErrorKind::NotFound` into `DocumentError::NotFound(id)`
fn not_found_as(error: DocumentError, id: &str) -> DocumentError {
    match error {
        DocumentError::Io(e) if e.kind() == ErrorKind::NotFound => {
            DocumentError::NotFound(id.to_string())
        }
        other => other,
    }
}
