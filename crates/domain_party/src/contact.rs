//! Policy contacts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ContactId;

use crate::error::PartyError;

/// Role a contact plays on a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactRole {
    /// Servicing agent
    #[serde(rename = "Agent")]
    Agent,
    /// Policyholder named on the declarations
    #[serde(rename = "Named Insured")]
    NamedInsured,
}

impl ContactRole {
    /// Returns the display label
    pub fn label(&self) -> &'static str {
        match self {
            ContactRole::Agent => "Agent",
            ContactRole::NamedInsured => "Named Insured",
        }
    }
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContactRole {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Agent" => Ok(ContactRole::Agent),
            "Named Insured" => Ok(ContactRole::NamedInsured),
            other => Err(PartyError::UnknownRole(other.to_string())),
        }
    }
}

/// A person or firm attached to a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier
    pub id: ContactId,
    /// Display name
    pub name: String,
    /// Role on the policy
    pub role: ContactRole,
}

impl Contact {
    /// Creates a new contact
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if the name is blank
    pub fn new(name: impl Into<String>, role: ContactRole) -> Result<Self, PartyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PartyError::invalid("contact name must not be blank"));
        }

        Ok(Self {
            id: ContactId::new_v7(),
            name,
            role,
        })
    }

    /// Creates an agent contact
    pub fn agent(name: impl Into<String>) -> Result<Self, PartyError> {
        Self::new(name, ContactRole::Agent)
    }

    /// Creates a named insured contact
    pub fn named_insured(name: impl Into<String>) -> Result<Self, PartyError> {
        Self::new(name, ContactRole::NamedInsured)
    }

    /// Returns true if the contact may act for the policy as its agent
    pub fn is_agent(&self) -> bool {
        self.role == ContactRole::Agent
    }
}
