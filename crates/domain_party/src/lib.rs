//! Party Domain
//!
//! Contacts attached to a policy: the named insured who normally pays and
//! the agent who services the account. Only the contact's role matters to
//! billing; it decides who may pay while a policy is pending cancellation.

pub mod contact;
pub mod error;

pub use contact::{Contact, ContactRole};
pub use error::PartyError;
