//! Core logic for the QuickChat message simulator: field validation, the
//! message record with its derived hash, the in-memory per-category ledger,
//! and the line-oriented JSON message store.

mod error;
pub use error::*;

mod validation;
pub use validation::*;

mod message;
pub use message::*;

mod ledger;
pub use ledger::*;

mod store;
pub use store::*;

mod user;
pub use user::*;
