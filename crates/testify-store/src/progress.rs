use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use testify_types::models::{ProgressRecord, StudyDomain};

use crate::{Store, lock};

type ProgressMap = HashMap<String, ProgressRecord>;

/// One isolated map per study domain, keyed by lower-cased address.
#[derive(Default)]
pub struct ProgressTrackers {
    bible: Mutex<ProgressMap>,
    jesus: Mutex<ProgressMap>,
    kings: Mutex<ProgressMap>,
    mythology: Mutex<ProgressMap>,
}

impl ProgressTrackers {
    fn tracker(&self, domain: StudyDomain) -> &Mutex<ProgressMap> {
        match domain {
            StudyDomain::Bible => &self.bible,
            StudyDomain::Jesus => &self.jesus,
            StudyDomain::Kings => &self.kings,
            StudyDomain::Mythology => &self.mythology,
        }
    }
}

impl Store {
    pub fn get_or_create_progress(
        &self,
        domain: StudyDomain,
        address: &str,
    ) -> Result<ProgressRecord> {
        let mut map = lock(self.progress.tracker(domain), domain.as_str())?;
        let record = map
            .entry(address.to_lowercase())
            .or_insert_with(|| ProgressRecord::empty(address));
        Ok(record.clone())
    }

    pub fn progress_count(&self, domain: StudyDomain) -> Result<usize> {
        let map = lock(self.progress.tracker(domain), domain.as_str())?;
        Ok(map.len())
    }
}
