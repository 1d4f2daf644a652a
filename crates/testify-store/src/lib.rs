pub mod lessons;
pub mod progress;
pub mod testimonies;
pub mod users;

use std::sync::{Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use tracing::info;

use testify_types::models::{Testimony, User};

use crate::lessons::LessonCatalog;
use crate::progress::ProgressTrackers;

/// Process-local state shared by every handler.
///
/// Nothing here survives a restart. Each collection sits behind its own lock
/// and no lock is held across an await point.
pub struct Store {
    testimonies: Mutex<Vec<Testimony>>,
    users: Mutex<Vec<User>>,
    progress: ProgressTrackers,
    lessons: LessonCatalog,
}

impl Store {
    pub fn new() -> Self {
        let lessons = LessonCatalog::builtin();
        info!("Store initialized with {} lessons", lessons.len());
        Self {
            testimonies: Mutex::new(Vec::new()),
            users: Mutex::new(Vec::new()),
            progress: ProgressTrackers::default(),
            lessons,
        }
    }

    pub fn lessons(&self) -> &LessonCatalog {
        &self.lessons
    }

    fn with_testimonies<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Testimony>) -> Result<T>,
    {
        let mut guard = lock(&self.testimonies, "testimonies")?;
        f(&mut guard)
    }

    fn with_users<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<User>) -> Result<T>,
    {
        let mut guard = lock(&self.users, "users")?;
        f(&mut guard)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>> {
    mutex
        .lock()
        .map_err(|e| anyhow!("{} lock poisoned: {}", what, e))
}
