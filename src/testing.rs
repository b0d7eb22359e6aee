//! In-memory port implementations shared by unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use crate::context::ServiceContext;
use crate::ports::{Clock, FileSystem};

#[derive(Default)]
struct MemState {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl MemState {
    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

/// In-memory filesystem for exercising the planner without touching disk.
#[derive(Default)]
pub struct MemFs {
    state: Mutex<MemState>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        let state = self.state.get_mut().unwrap();
        let path = PathBuf::from(path);
        state.add_ancestors(&path);
        state.files.insert(path, contents.to_string());
        self
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        let state = self.state.get_mut().unwrap();
        let path = PathBuf::from(path);
        state.add_ancestors(&path);
        state.dirs.insert(path);
        self
    }
}

impl FileSystem for MemFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.state.lock().unwrap();
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<OsString>, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.state.lock().unwrap();
        if !state.dirs.contains(path) {
            return Err(format!("Not a directory: {}", path.display()).into());
        }
        let names: BTreeSet<OsString> = state
            .files
            .keys()
            .chain(state.dirs.iter())
            .filter(|k| k.parent() == Some(path))
            .filter_map(|k| k.file_name().map(OsStr::to_os_string))
            .collect();
        Ok(names.into_iter().collect())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        if state.files.contains_key(path) {
            return Err(format!("File exists: {}", path.display()).into());
        }
        state.add_ancestors(path);
        state.dirs.insert(path.to_path_buf());
        Ok(())
    }
}

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2024-06-15T10:30:00Z, the instant every test context reports.
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
}

/// Context backed by `fs` and a [`FixedClock`].
pub fn test_context(fs: MemFs) -> ServiceContext {
    ServiceContext {
        fs: Box::new(fs),
        clock: Box::new(FixedClock(fixed_instant())),
    }
}
