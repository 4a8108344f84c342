//! # Vesta Auth
//!
//! Server-side storage for authentication tickets.
//!
//! The cookie carries only the storage key; the ticket itself lives in a
//! [`DistributedCache`](vesta_cache::DistributedCache). Accounts whose
//! principal disallows repeat logins keep a single active session: storing
//! a new ticket evicts the previous one.

pub mod claims;
mod keys;
mod policy;
mod serializer;
mod store;
mod ticket;

pub use claims::{Claim, ClaimsIdentity, ClaimsPrincipal};
pub use keys::TicketKeys;
pub use policy::SessionPolicy;
pub use serializer::TicketSerializer;
pub use store::{RedisTicketStore, TicketStore};
pub use ticket::{AuthenticationProperties, AuthenticationTicket};
