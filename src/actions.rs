use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::NaiveDate;

/// windows explorer droppings; never keeps a source directory alive
const JUNK_FILE: &str = "thumbs.db";

/// Serializes destination-folder creation across workers and counts how
/// many folders the run actually created. The mutex closes the
/// exists-check/create race; the counter is read once at the end.
pub struct DirGuard {
    lock: Mutex<()>,
    created: AtomicUsize,
}

impl DirGuard {
    pub fn new() -> DirGuard {
        DirGuard {
            lock: Mutex::new(()),
            created: AtomicUsize::new(0),
        }
    }

    /// create `dir` (and parents) if it isn't there yet; only one worker
    /// at a time gets to look
    fn ensure(&self, dir: &Path) -> std::io::Result<()> {
        let _held = self.lock.lock().expect("dir guard poisoned");
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            self.created.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}

/// per-file result of a relocation attempt
pub enum Outcome {
    /// landed at the destination
    Moved { dest: PathBuf },
    /// destination already had this name; source removed as a duplicate
    DuplicateDeleted { dest: PathBuf },
    /// move failed, source left in place
    Failed { dest: PathBuf, err: String },
}

/// Move `src` into `<dest_root>/<yyyy-MM>/<dd>/`, keeping the original
/// file name, then prune the source directory if the move emptied it.
pub fn relocate(src: &Path, date: NaiveDate, dest_root: &Path, guard: &DirGuard) -> Outcome
{
    let folder = dest_root
        .join(date.format("%Y-%m").to_string())
        .join(date.format("%d").to_string());

    let outcome = move_into(src, &folder, guard);
    prune_source_dir(src);
    outcome
}

fn move_into(src: &Path, folder: &Path, guard: &DirGuard) -> Outcome
{
    let dest = match src.file_name() {
        Some(name) => folder.join(name),
        None => {
            return Outcome::Failed {
                dest: folder.to_path_buf(),
                err: String::from("source has no file name"),
            }
        }
    };

    if let Err(e) = guard.ensure(folder) {
        return Outcome::Failed { dest, err: e.to_string() };
    }

    // explicit check instead of sniffing the error text of a failed move
    if dest.exists() {
        return delete_duplicate(src, dest);
    }

    match move_file(src, &dest) {
        Ok(_) => Outcome::Moved { dest },
        // a same-named file slipped in between the check and the move;
        // same duplicate policy as the check catching it
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => delete_duplicate(src, dest),
        Err(e) => Outcome::Failed { dest, err: e.to_string() },
    }
}

/// collision policy: the destination copy stays, the source goes
fn delete_duplicate(src: &Path, dest: PathBuf) -> Outcome
{
    match fs::remove_file(src) {
        Ok(_) => Outcome::DuplicateDeleted { dest },
        Err(e) => Outcome::Failed {
            dest,
            err: format!("duplicate, and removing source failed: {}", e),
        },
    }
}

/// Link-then-unlink on the same filesystem, copy + delete across
/// filesystems. Neither path ever replaces an existing destination; a
/// same-name file landing first surfaces as AlreadyExists.
fn move_file(src: &Path, dest: &Path) -> io::Result<()>
{
    match fs::hard_link(src, dest) {
        Ok(_) => fs::remove_file(src),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            let mut reader = fs::File::open(src)?;
            let mut writer = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(dest)?;
            io::copy(&mut reader, &mut writer)?;
            fs::remove_file(src)
        }
        Err(e) => Err(e),
    }
}

/// Delete the parent directory of a just-processed file when nothing but
/// junk is left in it. A directory that is already gone, still holds real
/// files, or refuses to be removed is a no-op, never an error.
pub fn prune_source_dir(src: &Path)
{
    let parent = match src.parent() {
        Some(p) => p,
        None => return,
    };
    let entries = match fs::read_dir(parent) {
        Ok(it) => it,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        if !entry.file_name().to_string_lossy().eq_ignore_ascii_case(JUNK_FILE) {
            return;
        }
    }

    // empty, or down to junk only; junk goes with the directory
    if let Err(e) = fs::remove_dir_all(parent) {
        eprintln!("couldn't prune {}: {}", parent.display(), e);
    }
}
