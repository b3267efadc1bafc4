use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Name of the lock file inside the data directory
pub const LOCK_FILE: &str = ".lock";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive advisory lock on a data directory.
///
/// Only one `tk` process at a time may write the store: the TUI holds the lock
/// for its whole run, CLI write commands for one command. The lock lives on
/// the open handle of `<data-dir>/.lock` and is released when that handle is
/// closed. The file itself is never removed, so every contender locks the
/// same inode.
pub struct DirLock {
    _handle: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError { path: PathBuf, source: io::Error },
    #[error("could not acquire lock on {path}: another tk process is using this data directory")]
    Timeout { path: PathBuf },
    #[error("lock error: {0}")]
    IoError(#[from] io::Error),
}

impl DirLock {
    /// Lock `data_dir`, retrying until `timeout` has passed.
    pub fn acquire(data_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = data_dir.join(LOCK_FILE);
        let handle = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| LockError::CreateError {
                path: path.clone(),
                source,
            })?;

        let deadline = Instant::now() + timeout;
        while !try_lock_exclusive(&handle)? {
            if Instant::now() >= deadline {
                return Err(LockError::Timeout { path });
            }
            thread::sleep(RETRY_INTERVAL);
        }
        Ok(DirLock {
            _handle: handle,
            path,
        })
    }

    /// Lock `data_dir`, waiting up to five seconds.
    pub fn acquire_default(data_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(data_dir, DEFAULT_TIMEOUT)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Non-blocking exclusive flock. `Ok(false)` when someone else holds it.
#[cfg(unix)]
fn try_lock_exclusive(handle: &File) -> io::Result<bool> {
    use std::os::unix::io::AsRawFd;
    let rc = unsafe { libc::flock(handle.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    match err.kind() {
        io::ErrorKind::WouldBlock => Ok(false),
        // Interrupted by a signal: try again on the next round
        io::ErrorKind::Interrupted => Ok(false),
        _ => Err(err),
    }
}

#[cfg(not(unix))]
fn try_lock_exclusive(_handle: &File) -> io::Result<bool> {
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use tempfile::TempDir;

    #[test]
    fn release_keeps_the_lock_file() {
        let tmp = TempDir::new().unwrap();
        let lock = DirLock::acquire_default(tmp.path()).unwrap();
        assert_eq!(lock.path(), tmp.path().join(LOCK_FILE).as_path());
        drop(lock);
        assert!(tmp.path().join(LOCK_FILE).exists());
        assert!(DirLock::acquire_default(tmp.path()).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn second_lock_times_out() {
        let tmp = TempDir::new().unwrap();
        let _held = DirLock::acquire_default(tmp.path()).unwrap();
        let second = DirLock::acquire(tmp.path(), Duration::from_millis(50));
        assert!(matches!(second, Err(LockError::Timeout { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn handoff_to_a_waiter_still_excludes_newcomers() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().to_path_buf();
        let first = DirLock::acquire_default(&dir).unwrap();

        // Second contender opens the file and starts waiting
        let (acquired_tx, acquired_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let waiter_dir = dir.clone();
        let waiter = thread::spawn(move || {
            let second = DirLock::acquire(&waiter_dir, Duration::from_secs(5)).unwrap();
            acquired_tx.send(()).unwrap();
            release_rx.recv().unwrap();
            drop(second);
        });

        thread::sleep(Duration::from_millis(50));
        drop(first);
        acquired_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // Second holds it now; a third must not get in
        let third = DirLock::acquire(&dir, Duration::from_millis(200));
        assert!(matches!(third, Err(LockError::Timeout { .. })));

        release_tx.send(()).unwrap();
        waiter.join().unwrap();
        assert!(DirLock::acquire(&dir, Duration::from_millis(200)).is_ok());
    }
}
