use uuid::Uuid;

/// Storage key builder for tickets.
#[derive(Debug, Clone)]
pub struct TicketKeys {
    prefix: String,
}

impl TicketKeys {
    pub const DEFAULT_PREFIX: &'static str = "Ticket-";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Key of a ticket that belongs to no tracked session.
    pub fn anonymous(&self, unique_id: &Uuid) -> String {
        format!("{}{}", self.prefix, unique_id)
    }

    /// Key of a ticket in the account's single active session.
    pub fn session(&self, account_id: &str, unique_id: &Uuid) -> String {
        format!("{}{}:Cookies:{}", self.prefix, account_id, unique_id)
    }

    /// Key pointing at the account's active session ticket.
    pub fn session_index(&self, account_id: &str) -> String {
        format!("{}{}", self.prefix, account_id)
    }
}

impl Default for TicketKeys {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_keys() {
        let keys = TicketKeys::default();
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();

        assert_eq!(keys.anonymous(&id), "Ticket-67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(
            keys.session("A", &id),
            "Ticket-A:Cookies:67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert_eq!(keys.session_index("A"), "Ticket-A");
    }
}
