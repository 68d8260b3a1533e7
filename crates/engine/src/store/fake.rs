//! In-memory backend for store tests

use async_trait::async_trait;
use rewards_admin_core::{Error, Result, StreakBonusConfig};
use rewards_admin_networking::{Resource, ResourceApi, StreakBonusApi};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub(crate) struct FakeApi<R> {
    records: Mutex<Vec<R>>,
    failure: Mutex<Option<(u16, String)>>,
    calls: AtomicUsize,
    assign_id: fn(&mut R, String),
}

impl<R: Resource> FakeApi<R> {
    pub fn new(records: Vec<R>, assign_id: fn(&mut R, String)) -> Self {
        Self {
            records: Mutex::new(records),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
            assign_id,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every following call fail with this status and message
    pub fn fail_with(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    fn begin(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(Error::Api { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for FakeApi<R> {
    async fn list(&self) -> Result<Vec<R>> {
        self.begin()?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, record: &R) -> Result<R> {
        self.begin()?;
        let mut records = self.records.lock().unwrap();
        let mut created = record.clone();
        (self.assign_id)(&mut created, format!("fake-{}", records.len() + 1));
        records.push(created.clone());
        Ok(created)
    }

    async fn update(&self, record: &R) -> Result<R> {
        self.begin()?;
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record.clone())
            }
            None => Err(Error::NotFound(record.id().to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.begin()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }
}

pub(crate) struct FakeStreakApi {
    config: Mutex<StreakBonusConfig>,
    failure: Mutex<Option<String>>,
    pub saves: AtomicUsize,
}

impl FakeStreakApi {
    pub fn new(config: StreakBonusConfig) -> Self {
        Self {
            config: Mutex::new(config),
            failure: Mutex::new(None),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn stored(&self) -> StreakBonusConfig {
        self.config.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(Error::Api { status: 400, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StreakBonusApi for FakeStreakApi {
    async fn fetch_streak_bonus(&self) -> Result<StreakBonusConfig> {
        self.check()?;
        Ok(self.stored())
    }

    async fn store_streak_bonus(&self, config: &StreakBonusConfig) -> Result<StreakBonusConfig> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        *self.config.lock().unwrap() = config.clone();
        Ok(config.clone())
    }
}
