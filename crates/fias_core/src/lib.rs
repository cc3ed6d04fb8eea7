//! Address composition core for GAR/FIAS registry hierarchies.
//! This crate is the single source of truth for resolution invariants.

pub mod dict;
pub mod logging;
pub mod model;
pub mod resolve;
pub mod service;

pub use dict::synonym_dict::{InMemorySynonymDictionary, SynonymDictionary};
pub use dict::type_dict::{InMemoryTypeDictionary, TypeDictionary, TypeLabel};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::address::{BlockQualifier, ComposedAddress, LevelSlot};
pub use model::levels::{AddressLevel, FiasLevel, RelationKind};
pub use model::payload::AddressPayload;
pub use resolve::{ComposeError, ComposeResult};
pub use service::address_service::AddressService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
