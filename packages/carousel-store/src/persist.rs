use crate::error::Result;
use crate::storage::Storage;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Version written into every blob
pub(crate) const STATE_VERSION: u32 = 0;

/// On-disk shape of a store: `{"state": ..., "version": 0}`
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    version: u32,
}

fn read<T: DeserializeOwned, S: Storage>(storage: &S, key: &str) -> Result<Option<T>> {
    let Some(json) = storage.load(key)? else {
        return Ok(None);
    };
    let envelope: Envelope<T> = serde_json::from_str(&json)?;
    if envelope.version != STATE_VERSION {
        log::warn!(
            "Store {key} has version {}, expected {STATE_VERSION}",
            envelope.version
        );
    }
    Ok(Some(envelope.state))
}

fn write<T: Serialize, S: Storage>(storage: &mut S, key: &str, state: &T) -> Result<()> {
    let json = serde_json::to_string(&Envelope {
        state,
        version: STATE_VERSION,
    })?;
    storage.save(key, &json)
}

/// Stored state under `key`, or `None` when missing or unreadable
pub(crate) fn load_state<T: DeserializeOwned, S: Storage>(storage: &S, key: &str) -> Option<T> {
    match read(storage, key) {
        Ok(Some(state)) => {
            log::info!("Loaded {key}");
            Some(state)
        }
        Ok(None) => {
            log::info!("No saved {key}, starting fresh");
            None
        }
        Err(e) => {
            log::warn!("Could not load {key}, starting fresh: {e}");
            None
        }
    }
}

pub(crate) fn save_state<T: Serialize, S: Storage>(storage: &mut S, key: &str, state: &T) {
    if let Err(e) = write(storage, key, state) {
        log::warn!("Could not save {key}: {e}");
    }
}
