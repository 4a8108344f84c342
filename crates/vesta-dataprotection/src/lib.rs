//! # Vesta Data Protection
//!
//! Storage for data-protection key descriptors. Keys are XML documents kept
//! in an append-only list so that every instance of an application reads
//! the same key ring.

mod options;
mod repository;
mod xml;

pub use options::KeyManagementOptions;
pub use repository::{MemoryXmlRepository, RedisXmlRepository, XmlRepository, KEY_LIST};
pub use xml::XmlElement;
