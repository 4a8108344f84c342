//! Ticket wire format.
//!
//! Tickets are stored as a versioned JSON document:
//! `{"v":1,"scheme":...,"principal":...,"properties":...}`.

use crate::{AuthenticationProperties, AuthenticationTicket, ClaimsPrincipal};
use serde::{Deserialize, Serialize};
use tracing::warn;
use vesta_core::VestaResult;

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    v: u32,
    scheme: &'a str,
    principal: &'a ClaimsPrincipal,
    properties: &'a AuthenticationProperties,
}

#[derive(Deserialize)]
struct Envelope {
    scheme: String,
    principal: ClaimsPrincipal,
    properties: AuthenticationProperties,
}

#[derive(Deserialize)]
struct VersionProbe {
    v: u32,
}

/// Converts tickets to and from bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketSerializer;

impl TicketSerializer {
    pub fn serialize(&self, ticket: &AuthenticationTicket) -> VestaResult<Vec<u8>> {
        let envelope = EnvelopeRef {
            v: FORMAT_VERSION,
            scheme: &ticket.authentication_scheme,
            principal: &ticket.principal,
            properties: &ticket.properties,
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    /// Reads a ticket. Returns `None` for malformed data or an unknown version.
    pub fn deserialize(&self, bytes: &[u8]) -> Option<AuthenticationTicket> {
        let probe: VersionProbe = match serde_json::from_slice(bytes) {
            Ok(probe) => probe,
            Err(e) => {
                warn!("Discarding unreadable ticket: {}", e);
                return None;
            }
        };

        if probe.v != FORMAT_VERSION {
            warn!(version = probe.v, "Discarding ticket with unsupported format version");
            return None;
        }

        match serde_json::from_slice::<Envelope>(bytes) {
            Ok(envelope) => Some(AuthenticationTicket {
                principal: envelope.principal,
                properties: envelope.properties,
                authentication_scheme: envelope.scheme,
            }),
            Err(e) => {
                warn!("Discarding malformed ticket: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::{ACCOUNT_ID, REPEAT_LOGIN};
    use crate::ClaimsIdentity;
    use chrono::{TimeZone, Utc};

    fn sample() -> AuthenticationTicket {
        let mut properties = AuthenticationProperties::default()
            .with_expires_utc(Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap());
        properties.is_persistent = true;
        properties.items.insert(".redirect".to_string(), "/home".to_string());

        AuthenticationTicket::new(
            ClaimsPrincipal::new(
                ClaimsIdentity::new("Cookies")
                    .with_claim(ACCOUNT_ID, "A")
                    .with_claim(REPEAT_LOGIN, "false"),
            ),
            properties,
            "Cookies",
        )
    }

    #[test]
    fn test_round_trip() {
        let serializer = TicketSerializer;
        let ticket = sample();

        let bytes = serializer.serialize(&ticket).unwrap();

        assert_eq!(serializer.deserialize(&bytes), Some(ticket));
    }

    #[test]
    fn test_envelope_carries_version() {
        let bytes = TicketSerializer.serialize(&sample()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["v"], 1);
        assert_eq!(json["scheme"], "Cookies");
    }

    #[test]
    fn test_unknown_version_is_none() {
        let bytes = br#"{"v":2,"scheme":"Cookies","principal":{},"properties":{}}"#;
        assert!(TicketSerializer.deserialize(bytes).is_none());
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(TicketSerializer.deserialize(b"not a ticket").is_none());
        assert!(TicketSerializer.deserialize(br#"{"v":1}"#).is_none());
    }
}
