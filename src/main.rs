//! Retro Save Provider - Entry Point
//!
//! Prepares the data directory and prints the top of the document tree.

use log::{error, info};
use std::sync::Arc;

use retro_save_provider::dispatch::{AsyncDocumentTree, CancellationToken};
use retro_save_provider::storage::{DirectoriesManager, DirectoryLocator};
use retro_save_provider::{StorageConfig, VirtualDocumentTree};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match StorageConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let directories = DirectoriesManager::new(&config);
    if let Err(e) = directories.ensure_created() {
        error!(
            "Failed to create data directories under {}: {}",
            directories.base_directory().display(),
            e
        );
        std::process::exit(1);
    }

    let tree = AsyncDocumentTree::new(Arc::new(VirtualDocumentTree::new(
        &config,
        Arc::new(directories),
    )));
    let token = CancellationToken::none();

    for root in tree.tree().list_roots() {
        info!("Root {} ({}) flags={:#x}", root.title, root.root_id, root.flags.bits());

        match tree.list_children(&token, root.document_id.clone()).await {
            Ok(children) => {
                for child in children {
                    println!(
                        "{}\t{}\t{}\t{}",
                        child.document_id, child.display_name, child.mime_type, child.size
                    );
                }
            }
            Err(e) => error!("Failed to list {}: {}", root.document_id, e),
        }
    }
}
