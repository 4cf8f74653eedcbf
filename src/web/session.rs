use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tower_sessions::{
    ExpiredDeletion, SessionStore,
    cookie::time::OffsetDateTime,
    session::{Id, Record},
    session_store,
};

/// Session records live in process memory only; a restart logs everyone out.
#[derive(Default, Clone, Debug)]
pub struct InMemSessionStore {
    records: Arc<RwLock<HashMap<Id, Record>>>,
}

fn expired(record: &Record) -> bool {
    record.expiry_date <= OffsetDateTime::now_utc()
}

#[async_trait()]
impl SessionStore for InMemSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.records.write().await;
        // Id collisions are improbable but cheap to rule out
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.write().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(records
            .get(session_id)
            .filter(|record| !expired(record))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.write().await.remove(session_id);
        Ok(())
    }
}

#[async_trait()]
impl ExpiredDeletion for InMemSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        tracing::debug!("deleting expired sessions");
        self.records
            .write()
            .await
            .retain(|_key, record| !expired(record));
        Ok(())
    }
}
