//! Loading and persisting the ledger file, and the event journal.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use eyre::Context as _;
use fs2::FileExt as _;
use mair_core::schema::state::LedgerFile;
use mair_ledger::{
    ClaimLedger, DistributorConfig, DistributorEvent, EventSink as _, InMemoryTokenLedger,
    RecordingSink, TracingSink,
};
use mair_merkle::MerkleRoot;
use tokio::io::AsyncWriteExt as _;
use tracing::debug;

use super::files::{read_json, write_json};

/// Exclusive advisory lock on a ledger, released on drop.
///
/// The lock lives on a `<ledger>.lock` file next to the ledger, because the ledger file
/// itself is replaced on every write.
pub(super) struct LedgerLock {
    _file: File,
}

/// Block until this process holds the lock of the ledger at `path`.
///
/// # Errors
/// Returns an error if the lock file cannot be opened or locked.
pub(super) async fn lock_ledger(path: &Path) -> eyre::Result<LedgerLock> {
    let lock_path = lock_path(path);
    tokio::task::spawn_blocking(move || {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {}", lock_path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;
        debug!(file = ?lock_path, "Acquired ledger lock");
        Ok(LedgerLock { _file: file })
    })
    .await?
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, ToOwned::to_owned);
    name.push(".lock");
    path.with_file_name(name)
}

/// A ledger restored from disk together with the events it emits while loaded.
///
/// The ledger lock is held for as long as this value lives, so a load followed by
/// [`persist_ledger`] is one step with respect to every other command on the same file.
pub(super) struct LoadedLedger {
    pub(super) ledger: ClaimLedger<InMemoryTokenLedger>,
    events: RecordingSink,
    _lock: LedgerLock,
}

/// Lock the ledger at `path` and restore it from its state file.
///
/// # Errors
/// Returns an error if the ledger cannot be locked, the file cannot be read, or it holds an
/// invalid state.
pub(super) async fn load_ledger(path: &Path) -> eyre::Result<LoadedLedger> {
    let lock = lock_ledger(path).await?;
    let file: LedgerFile = read_json(path).await?;
    let config = DistributorConfig {
        admin: file.admin,
        vault: file.vault,
        merkle_root: MerkleRoot::new(file.state.merkle_root),
    };

    let events = RecordingSink::new();
    let recorder = events.clone();
    let ledger = ClaimLedger::restore(
        config,
        file.state,
        InMemoryTokenLedger::from_balances(file.balances),
        move |event: &DistributorEvent| {
            TracingSink.emit(event);
            recorder.emit(event);
        },
    )
    .with_context(|| format!("Invalid ledger state in {}", path.display()))?;

    Ok(LoadedLedger {
        ledger,
        events,
        _lock: lock,
    })
}

/// Write the ledger back to its state file and append its events to the journal, then
/// release the ledger lock.
///
/// # Errors
/// Returns an error if the ledger state is poisoned or a file operation fails.
pub(super) async fn persist_ledger(
    path: &Path,
    journal: &Path,
    loaded: LoadedLedger,
) -> eyre::Result<()> {
    let LoadedLedger {
        ledger,
        events,
        _lock,
    } = loaded;
    let admin = ledger.admin();
    let vault = ledger.vault();
    let (state, token) = ledger.into_parts()?;

    write_json(
        path,
        &LedgerFile {
            admin,
            vault,
            state,
            balances: token.into_balances(),
        },
    )
    .await?;
    append_journal(journal, &events.take()).await
}

async fn append_journal(journal: &Path, events: &[DistributorEvent]) -> eyre::Result<()> {
    if events.is_empty() {
        return Ok(());
    }

    let mut lines = String::new();
    for event in events {
        lines.push_str(&serde_json::to_string(event)?);
        lines.push('\n');
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(journal)
        .await
        .with_context(|| format!("Failed to open journal {}", journal.display()))?;
    file.write_all(lines.as_bytes()).await?;
    file.flush().await?;

    debug!(file = ?journal, count = events.len(), "Appended events to journal");
    Ok(())
}

/// Read every event recorded in a journal, oldest first. A missing journal is empty.
///
/// # Errors
/// Returns an error if the journal cannot be read or a line does not parse.
pub async fn read_journal(journal: &Path) -> eyre::Result<Vec<DistributorEvent>> {
    if !tokio::fs::try_exists(journal).await? {
        return Ok(Vec::new());
    }
    let contents = tokio::fs::read_to_string(journal)
        .await
        .with_context(|| format!("Failed to read journal {}", journal.display()))?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| {
            serde_json::from_str(line).with_context(|| {
                format!(
                    "Invalid event on line {} of {}",
                    index.saturating_add(1),
                    journal.display()
                )
            })
        })
        .collect()
}
