use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use retro_save_provider::dispatch::{AsyncSaveStore, CancellationSource, CancellationToken};
use retro_save_provider::saves::{Game, ReadOutcome, WriteOutcome};
use retro_save_provider::storage::{
    DirectoriesManager, DirectoryLocator, FileStat, SaveFileSystem, StdFileSystem,
};
use retro_save_provider::{SaveDataStore, SaveError, StorageConfig};
use tempfile::TempDir;

fn setup() -> (TempDir, Arc<DirectoriesManager>, SaveDataStore) {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        base_directory: dir.path().to_string_lossy().to_string(),
        ..StorageConfig::default()
    };
    let directories = Arc::new(DirectoriesManager::new(&config));
    directories.ensure_created().unwrap();
    let store = SaveDataStore::new(&config, directories.clone());
    (dir, directories, store)
}

/// Backend that fails the first `failures` reads and writes
struct FlakyFileSystem {
    inner: StdFileSystem,
    failures: usize,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl FlakyFileSystem {
    fn new(failures: usize) -> Self {
        Self {
            inner: StdFileSystem,
            failures,
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    fn busy() -> io::Error {
        io::Error::new(io::ErrorKind::Other, "device busy")
    }
}

impl SaveFileSystem for FlakyFileSystem {
    fn create_directory(&self, path: &Path) -> io::Result<()> {
        self.inner.create_directory(path)
    }

    fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        self.inner.stat(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if self.reads.fetch_add(1, Ordering::SeqCst) < self.failures {
            return Err(Self::busy());
        }
        self.inner.read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        if self.writes.fetch_add(1, Ordering::SeqCst) < self.failures {
            return Err(Self::busy());
        }
        self.inner.write(path, data)
    }
}

fn flaky_store(
    directories: Arc<DirectoriesManager>,
    failures: usize,
) -> (Arc<FlakyFileSystem>, SaveDataStore) {
    let fs = Arc::new(FlakyFileSystem::new(failures));
    let store = SaveDataStore::with_file_system(directories, fs.clone(), 3);
    (fs, store)
}

#[test]
fn save_path_follows_retroarch_layout() {
    let (_dir, dirs, store) = setup();
    let saves = dirs.saves_directory();

    let path = store.save_file_path(&Game::new("nes", "zelda.nes")).unwrap();
    assert_eq!(path, saves.join("nes").join("zelda.srm"));
    assert!(saves.join("nes").is_dir());

    let path = store.save_file_path(&Game::new("nes", "game.final.nes")).unwrap();
    assert_eq!(path, saves.join("nes").join("game.final.srm"));
}

#[test]
fn invalid_game_has_no_save_path() {
    let (_dir, _dirs, store) = setup();
    let game = Game::new("../escape", "zelda.nes");

    assert!(matches!(store.save_file_path(&game), Err(SaveError::InvalidGame(_))));
    assert!(matches!(store.read_save_ram(&game), ReadOutcome::Failed(SaveError::InvalidGame(_))));
    assert!(!store.save_info(&game).is_valid);
}

#[test]
fn write_then_read() {
    let (_dir, _dirs, store) = setup();
    let game = Game::new("snes", "chrono.sfc");
    let data: Vec<u8> = (0..=255u8).cycle().take(8192).collect();

    assert!(matches!(store.write_save_ram(&game, &data), WriteOutcome::Written));
    match store.read_save_ram(&game) {
        ReadOutcome::Loaded(loaded) => assert_eq!(loaded, data),
        other => panic!("expected loaded save, got {other:?}"),
    }

    let info = store.save_info(&game);
    assert!(info.is_valid);
    assert!(info.last_modified > 0);
}

#[test]
fn write_replaces_previous_save() {
    let (_dir, _dirs, store) = setup();
    let game = Game::new("gb", "tetris.gb");

    store.write_save_ram(&game, b"a much longer first save");
    store.write_save_ram(&game, b"short");
    assert_eq!(store.read_save_ram(&game).into_option().unwrap(), b"short");
}

#[test]
fn empty_write_leaves_save_untouched() {
    let (_dir, _dirs, store) = setup();
    let game = Game::new("gba", "metroid.gba");

    store.write_save_ram(&game, b"progress");
    let before = store.save_info(&game);

    assert!(matches!(store.write_save_ram(&game, &[]), WriteOutcome::Skipped));

    assert_eq!(store.save_info(&game), before);
    assert_eq!(store.read_save_ram(&game).into_option().unwrap(), b"progress");
}

#[test]
fn absent_and_empty_saves_are_invalid() {
    let (_dir, _dirs, store) = setup();
    let game = Game::new("nes", "zelda.nes");

    let info = store.save_info(&game);
    assert!(!info.is_valid);
    assert_eq!(info.last_modified, 0);
    assert!(matches!(store.read_save_ram(&game), ReadOutcome::Absent));

    std::fs::write(store.save_file_path(&game).unwrap(), b"").unwrap();
    assert!(!store.save_info(&game).is_valid);
    assert!(matches!(store.read_save_ram(&game), ReadOutcome::Absent));
}

#[test]
fn read_recovers_after_two_failures() {
    let (_dir, dirs, store) = setup();
    let game = Game::new("nes", "zelda.nes");
    store.write_save_ram(&game, b"triforce");

    let (fs, flaky) = flaky_store(dirs, 2);
    assert_eq!(flaky.read_save_ram(&game).into_option().unwrap(), b"triforce");
    assert_eq!(fs.reads.load(Ordering::SeqCst), 3);
}

#[test]
fn write_recovers_after_two_failures() {
    let (_dir, dirs, store) = setup();
    let game = Game::new("nes", "zelda.nes");

    let (fs, flaky) = flaky_store(dirs, 2);
    assert!(matches!(flaky.write_save_ram(&game, b"heart"), WriteOutcome::Written));
    assert_eq!(fs.writes.load(Ordering::SeqCst), 3);
    assert_eq!(store.read_save_ram(&game).into_option().unwrap(), b"heart");
}

#[test]
fn persistent_failure_gives_up_after_three_attempts() {
    let (_dir, dirs, store) = setup();
    let game = Game::new("nes", "zelda.nes");
    store.write_save_ram(&game, b"original");

    let (fs, flaky) = flaky_store(dirs, usize::MAX);

    let read = flaky.read_save_ram(&game);
    assert!(read.is_failure());
    assert_eq!(read.into_option(), None);
    assert_eq!(fs.reads.load(Ordering::SeqCst), 3);

    let write = flaky.write_save_ram(&game, b"replacement");
    assert!(write.is_failure());
    assert_eq!(fs.writes.load(Ordering::SeqCst), 3);

    assert_eq!(store.read_save_ram(&game).into_option().unwrap(), b"original");
}

#[tokio::test]
async fn async_store_round_trip() {
    let (_dir, _dirs, store) = setup();
    let store = AsyncSaveStore::new(Arc::new(store));
    let token = CancellationToken::none();
    let game = Game::new("psx", "ff7.cue");

    let written = store.write_save_ram(&token, game.clone(), b"materia".to_vec()).await;
    assert!(matches!(written, WriteOutcome::Written));

    let info = store.save_info(&token, game.clone()).await;
    assert!(info.is_valid);

    let read = store.read_save_ram(&token, game).await;
    assert_eq!(read.into_option().unwrap(), b"materia");
}

#[tokio::test]
async fn cancelled_save_write_is_not_performed() {
    let (_dir, dirs, store) = setup();
    let store = AsyncSaveStore::new(Arc::new(store));
    let source = CancellationSource::new();
    source.cancel();
    let game = Game::new("n64", "mario.z64");

    let written = store
        .write_save_ram(&source.token(), game.clone(), b"stars".to_vec())
        .await;
    assert!(matches!(written, WriteOutcome::Failed(SaveError::Cancelled)));
    assert!(!dirs.saves_directory().join("n64").join("mario.srm").exists());
}
