//! Mock gateway and store for controller tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::gateway::{ProviderOutcome, SmsGateway};
use crate::store::{CacheError, CaptchaStore};

/// One recorded dispatch call
#[derive(Debug, Clone)]
pub struct DispatchCall {
    pub recipients: Vec<String>,
    pub variables: Vec<String>,
    pub template_id: String,
}

/// Mock gateway recording every dispatch
pub struct MockGateway {
    pub calls: Mutex<Vec<DispatchCall>>,
    outcome: Mutex<ProviderOutcome>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Mutex::new(ProviderOutcome::Success),
        }
    }

    /// Make subsequent dispatches return the given outcome
    pub fn set_outcome(&self, outcome: ProviderOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<DispatchCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SmsGateway for MockGateway {
    async fn dispatch(
        &self,
        recipients: &[String],
        variables: &[String],
        template_id: &str,
        _request_id: Option<&str>,
        _sub_append: Option<&str>,
    ) -> ProviderOutcome {
        self.calls.lock().unwrap().push(DispatchCall {
            recipients: recipients.to_vec(),
            variables: variables.to_vec(),
            template_id: template_id.to_string(),
        });
        self.outcome.lock().unwrap().clone()
    }
}

/// In-memory store mock
///
/// TTLs are recorded, not enforced; tests simulate expiry by removing
/// keys explicitly via `remove`.
pub struct MockStore {
    entries: Mutex<HashMap<String, (String, i64)>>, // key -> (value, ttl)
    fail_writes: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent writes fail (persistence-failure tests)
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn value_of(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
    }

    pub fn ttl_of(&self, key: &str) -> Option<i64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    /// Simulate natural expiry of a key
    pub fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    pub fn key_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn check_writable(&self) -> Result<(), CacheError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(CacheError::new("simulated store failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CaptchaStore for MockStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.value_of(key))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: i64,
    ) -> Result<(), CacheError> {
        self.check_writable()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, CacheError> {
        Ok(self.ttl_of(key))
    }

    async fn increment(&self, key: &str) -> Result<i64, CacheError> {
        self.check_writable()?;
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| ("0".to_string(), -1));
        let next = entry.0.parse::<i64>().unwrap_or(0) + 1;
        entry.0 = next.to_string();
        Ok(next)
    }

    async fn expire(&self, key: &str, ttl_seconds: i64) -> Result<bool, CacheError> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(key) {
            Some(entry) => {
                entry.1 = ttl_seconds;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, CacheError> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((value, _)) if value == expected => {
                entries.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
