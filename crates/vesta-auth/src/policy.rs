use crate::claims::{ACCOUNT_ID, REPEAT_LOGIN};
use crate::AuthenticationTicket;

/// Session rules read from a ticket's claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPolicy {
    pub account_id: String,
    pub repeat_login_allowed: bool,
}

impl SessionPolicy {
    /// Reads the policy from the account-id and repeat-login claims.
    ///
    /// Returns `None` unless both claims are present. The repeat-login value
    /// counts as allowed only when it reads `true`, ignoring case and
    /// surrounding whitespace.
    pub fn from_ticket(ticket: &AuthenticationTicket) -> Option<Self> {
        let account_id = ticket.principal.find_first(ACCOUNT_ID)?;
        let repeat_login = ticket.principal.find_first(REPEAT_LOGIN)?;

        Some(Self {
            account_id: account_id.value.clone(),
            repeat_login_allowed: repeat_login.value.trim().eq_ignore_ascii_case("true"),
        })
    }

    /// Whether storing a ticket must evict the account's previous session.
    #[must_use]
    pub fn is_single_session(&self) -> bool {
        !self.repeat_login_allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuthenticationProperties, ClaimsIdentity, ClaimsPrincipal};

    fn ticket(claims: &[(&str, &str)]) -> AuthenticationTicket {
        let identity = claims
            .iter()
            .fold(ClaimsIdentity::new("Cookies"), |identity, (t, v)| identity.with_claim(*t, *v));
        AuthenticationTicket::new(
            ClaimsPrincipal::new(identity),
            AuthenticationProperties::default(),
            "Cookies",
        )
    }

    #[test]
    fn test_both_claims_required() {
        assert!(SessionPolicy::from_ticket(&ticket(&[])).is_none());
        assert!(SessionPolicy::from_ticket(&ticket(&[(ACCOUNT_ID, "A")])).is_none());
        assert!(SessionPolicy::from_ticket(&ticket(&[(REPEAT_LOGIN, "false")])).is_none());
    }

    #[test]
    fn test_repeat_login_parsing() {
        for (raw, expected) in [
            ("true", true),
            ("True", true),
            (" TRUE ", true),
            ("false", false),
            ("yes", false),
            ("1", false),
            ("", false),
        ] {
            let policy = SessionPolicy::from_ticket(&ticket(&[(ACCOUNT_ID, "A"), (REPEAT_LOGIN, raw)]))
                .unwrap();
            assert_eq!(policy.repeat_login_allowed, expected, "value {:?}", raw);
        }
    }

    #[test]
    fn test_single_session() {
        let policy = SessionPolicy::from_ticket(&ticket(&[(ACCOUNT_ID, "A"), (REPEAT_LOGIN, "false")]))
            .unwrap();
        assert_eq!(policy.account_id, "A");
        assert!(policy.is_single_session());
    }
}
