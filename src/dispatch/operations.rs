//! Async facades over the document tree and the save store

use std::fs::File;
use std::sync::Arc;

use crate::dispatch::{CancellationToken, DispatchError, run_blocking};
use crate::documents::{DocumentEntry, DocumentKind, OpenMode, VirtualDocumentTree};
use crate::error::{DocumentError, SaveError};
use crate::saves::{Game, ReadOutcome, SaveDataStore, SaveInfo, WriteOutcome};

impl From<DispatchError> for DocumentError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::Cancelled => DocumentError::Cancelled,
            DispatchError::Panicked(msg) => {
                DocumentError::Io(std::io::Error::new(std::io::ErrorKind::Other, msg))
            }
        }
    }
}

impl From<DispatchError> for SaveError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::Cancelled => SaveError::Cancelled,
            DispatchError::Panicked(msg) => {
                SaveError::Io(std::io::Error::new(std::io::ErrorKind::Other, msg))
            }
        }
    }
}

/// Document tree whose operations run on the blocking pool
#[derive(Clone)]
pub struct AsyncDocumentTree {
    tree: Arc<VirtualDocumentTree>,
}

impl AsyncDocumentTree {
    pub fn new(tree: Arc<VirtualDocumentTree>) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &VirtualDocumentTree {
        &self.tree
    }

    /// Run any tree operation on the blocking pool
    pub async fn call<T, F>(&self, token: &CancellationToken, op: F) -> Result<T, DocumentError>
    where
        T: Send + 'static,
        F: FnOnce(&VirtualDocumentTree) -> Result<T, DocumentError> + Send + 'static,
    {
        let tree = Arc::clone(&self.tree);
        run_blocking(token, move || op(&tree)).await?
    }

    pub async fn describe(
        &self,
        token: &CancellationToken,
        id: String,
    ) -> Result<DocumentEntry, DocumentError> {
        self.call(token, move |tree| tree.describe(&id)).await
    }

    pub async fn list_children(
        &self,
        token: &CancellationToken,
        parent_id: String,
    ) -> Result<Vec<DocumentEntry>, DocumentError> {
        self.call(token, move |tree| tree.list_children(&parent_id)).await
    }

    pub async fn open(
        &self,
        token: &CancellationToken,
        id: String,
        mode: OpenMode,
    ) -> Result<File, DocumentError> {
        self.call(token, move |tree| tree.open(&id, mode)).await
    }

    pub async fn open_thumbnail(
        &self,
        token: &CancellationToken,
        id: String,
        size_hint: (u32, u32),
    ) -> Result<File, DocumentError> {
        self.call(token, move |tree| tree.open_thumbnail(&id, size_hint))
            .await
    }

    pub async fn document_type(
        &self,
        token: &CancellationToken,
        id: String,
    ) -> Result<String, DocumentError> {
        self.call(token, move |tree| tree.document_type(&id)).await
    }

    pub async fn is_child_document(
        &self,
        token: &CancellationToken,
        parent_id: String,
        document_id: String,
    ) -> Result<bool, DocumentError> {
        self.call(token, move |tree| {
            tree.is_child_document(&parent_id, &document_id)
        })
        .await
    }

    pub async fn create_document(
        &self,
        token: &CancellationToken,
        parent_id: String,
        kind: DocumentKind,
        display_name: String,
    ) -> Result<String, DocumentError> {
        self.call(token, move |tree| {
            tree.create_document(&parent_id, kind, &display_name)
        })
        .await
    }

    pub async fn delete_document(
        &self,
        token: &CancellationToken,
        id: String,
    ) -> Result<(), DocumentError> {
        self.call(token, move |tree| tree.delete_document(&id)).await
    }

    pub async fn rename_document(
        &self,
        token: &CancellationToken,
        id: String,
        new_display_name: String,
    ) -> Result<Option<String>, DocumentError> {
        self.call(token, move |tree| tree.rename_document(&id, &new_display_name))
            .await
    }

    pub async fn search_documents(
        &self,
        token: &CancellationToken,
        root_id: String,
        query: String,
    ) -> Result<Vec<DocumentEntry>, DocumentError> {
        self.call(token, move |tree| tree.search_documents(&root_id, &query))
            .await
    }
}

/// Save store whose operations run on the blocking pool
#[derive(Clone)]
pub struct AsyncSaveStore {
    store: Arc<SaveDataStore>,
}

impl AsyncSaveStore {
    pub fn new(store: Arc<SaveDataStore>) -> Self {
        Self { store }
    }

    pub async fn read_save_ram(&self, token: &CancellationToken, game: Game) -> ReadOutcome {
        let store = Arc::clone(&self.store);
        run_blocking(token, move || store.read_save_ram(&game))
            .await
            .unwrap_or_else(|e| ReadOutcome::Failed(e.into()))
    }

    pub async fn write_save_ram(
        &self,
        token: &CancellationToken,
        game: Game,
        data: Vec<u8>,
    ) -> WriteOutcome {
        let store = Arc::clone(&self.store);
        run_blocking(token, move || store.write_save_ram(&game, &data))
            .await
            .unwrap_or_else(|e| WriteOutcome::Failed(e.into()))
    }

    /// Stat the save file; cancellation reports the save as invalid
    pub async fn save_info(&self, token: &CancellationToken, game: Game) -> SaveInfo {
        let store = Arc::clone(&self.store);
        run_blocking(token, move || store.save_info(&game))
            .await
            .unwrap_or_default()
    }
}
