//! Addressed commands
//!
//! An [`ArbCmd`] is an [`ArbData`] payload tagged with an interface and an
//! operation identifier. Receivers dispatch on the interface first and the
//! operation second.

use serde::{Deserialize, Serialize};

use crate::{ArbData, BridgeResult, Identifier};

/// Interface and operation identifiers plus a payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArbCmd {
    interface_identifier: Identifier,
    operation_identifier: Identifier,
    data: ArbData,
}

impl ArbCmd {
    /// Create a command with an empty payload
    ///
    /// The interface identifier is validated before the operation identifier.
    pub fn new(interface: impl Into<String>, operation: impl Into<String>) -> BridgeResult<Self> {
        let interface_identifier = Identifier::new(interface)?;
        let operation_identifier = Identifier::new(operation)?;
        Ok(ArbCmd {
            interface_identifier,
            operation_identifier,
            data: ArbData::new(),
        })
    }

    /// Create a command from pre-validated parts
    pub fn from_parts(interface: Identifier, operation: Identifier, data: ArbData) -> Self {
        ArbCmd {
            interface_identifier: interface,
            operation_identifier: operation,
            data,
        }
    }

    #[inline]
    pub fn interface_identifier(&self) -> &Identifier {
        &self.interface_identifier
    }

    #[inline]
    pub fn operation_identifier(&self) -> &Identifier {
        &self.operation_identifier
    }

    /// Case-sensitive comparison of the interface identifier
    #[inline]
    pub fn interface_is(&self, interface: &str) -> bool {
        self.interface_identifier == interface
    }

    /// Case-sensitive comparison of the operation identifier
    #[inline]
    pub fn operation_is(&self, operation: &str) -> bool {
        self.operation_identifier == operation
    }

    #[inline]
    pub fn data(&self) -> &ArbData {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut ArbData {
        &mut self.data
    }

    pub fn into_data(self) -> ArbData {
        self.data
    }
}
