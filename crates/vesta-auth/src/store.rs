//! Ticket store.

use crate::{AuthenticationTicket, SessionPolicy, TicketKeys, TicketSerializer};
use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;
use vesta_cache::{CacheEntryOptions, DistributedCache, DistributedCacheExt, RedisDistributedCache};
use vesta_core::VestaResult;

/// Property-bag item holding the ticket's own storage key.
pub const KEY_ITEM: &str = "key";

/// Server-side storage for authentication tickets.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Stores a new ticket and returns its storage key.
    async fn store(&self, ticket: AuthenticationTicket) -> VestaResult<String>;

    /// Overwrites the ticket stored under `key`.
    async fn renew(&self, key: &str, ticket: AuthenticationTicket) -> VestaResult<()>;

    /// Reads a ticket. Missing or unreadable tickets are `None`.
    async fn retrieve(&self, key: &str) -> VestaResult<Option<AuthenticationTicket>>;

    /// Deletes a ticket.
    async fn remove(&self, key: &str) -> VestaResult<()>;
}

/// [`TicketStore`] on a [`DistributedCache`].
///
/// When a ticket's claims disallow repeat logins, the account keeps one
/// active session: `Ticket-{account}` points at the current ticket and
/// storing a new one removes the ticket it pointed at.
///
/// Reading the index, evicting and writing are separate cache calls. Two
/// concurrent logins for the same account can both survive; the index then
/// names whichever wrote last.
#[derive(Debug, Clone)]
pub struct RedisTicketStore<C = RedisDistributedCache> {
    cache: C,
    keys: TicketKeys,
    serializer: TicketSerializer,
}

impl<C: DistributedCache> RedisTicketStore<C> {
    pub fn new(cache: C) -> Self {
        Self {
            cache,
            keys: TicketKeys::default(),
            serializer: TicketSerializer,
        }
    }

    /// Uses `keys` instead of the default `Ticket-` prefix.
    #[must_use]
    pub fn with_keys(mut self, keys: TicketKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Evicts the account's previous session and points the index at `key`.
    async fn replace_session(&self, account_id: &str, key: &str) -> VestaResult<()> {
        let index_key = self.keys.session_index(account_id);

        if let Some(previous) = self.cache.get_string(&index_key).await? {
            self.remove(&previous).await?;
            warn!(account_id = %account_id, evicted = %previous, "Evicted previous session");
        }

        self.cache
            .set_string(&index_key, key, &CacheEntryOptions::new())
            .await
    }
}

#[async_trait]
impl<C: DistributedCache> TicketStore for RedisTicketStore<C> {
    async fn store(&self, ticket: AuthenticationTicket) -> VestaResult<String> {
        let unique_id = Uuid::new_v4();

        let key = match SessionPolicy::from_ticket(&ticket) {
            Some(policy) if policy.is_single_session() => {
                let key = self.keys.session(&policy.account_id, &unique_id);
                self.replace_session(&policy.account_id, &key).await?;
                key
            }
            _ => self.keys.anonymous(&unique_id),
        };

        self.renew(&key, ticket).await?;
        Ok(key)
    }

    async fn renew(&self, key: &str, mut ticket: AuthenticationTicket) -> VestaResult<()> {
        ticket
            .properties
            .items
            .entry(KEY_ITEM.to_string())
            .or_insert_with(|| key.to_string());

        let mut options = CacheEntryOptions::new();
        if let Some(expires_utc) = ticket.properties.expires_utc {
            options = options.set_absolute_expiration(expires_utc);
        }

        let bytes = self.serializer.serialize(&ticket)?;
        self.cache.set(key, &bytes, &options).await?;

        debug!(key = %key, "Stored ticket");
        Ok(())
    }

    async fn retrieve(&self, key: &str) -> VestaResult<Option<AuthenticationTicket>> {
        let Some(bytes) = self.cache.get(key).await? else {
            debug!(key = %key, "Ticket not found");
            return Ok(None);
        };
        Ok(self.serializer.deserialize(&bytes))
    }

    async fn remove(&self, key: &str) -> VestaResult<()> {
        self.cache.remove(key).await?;
        debug!(key = %key, "Removed ticket");
        Ok(())
    }
}
