//! Handle registry
//!
//! The registry owns every resource created through the C API. Resources
//! are addressed by monotonically issued, non-zero handles; a handle is live
//! exactly as long as its entry is present in the table, and deleted handle
//! values are never reissued.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use parking_lot::RwLock;
use simbridge_core::{ArbCmd, ArbData, BridgeError, BridgeResult};

use crate::types::{SimbridgeHandle, SimbridgeHandleType};

/// A resource owned by the registry
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    ArbData(ArbData),
    ArbCmd(ArbCmd),
}

impl Resource {
    pub fn handle_type(&self) -> SimbridgeHandleType {
        match self {
            Resource::ArbData(_) => SimbridgeHandleType::ARB_DATA,
            Resource::ArbCmd(_) => SimbridgeHandleType::ARB_CMD,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Resource::ArbData(_) => "ArbData",
            Resource::ArbCmd(_) => "ArbCmd",
        }
    }

    /// The ArbData payload, for any resource that carries one
    pub fn as_arb(&self) -> Option<&ArbData> {
        match self {
            Resource::ArbData(data) => Some(data),
            Resource::ArbCmd(cmd) => Some(cmd.data()),
        }
    }

    pub fn as_arb_mut(&mut self) -> Option<&mut ArbData> {
        match self {
            Resource::ArbData(data) => Some(data),
            Resource::ArbCmd(cmd) => Some(cmd.data_mut()),
        }
    }

    pub fn as_cmd(&self) -> Option<&ArbCmd> {
        match self {
            Resource::ArbCmd(cmd) => Some(cmd),
            _ => None,
        }
    }
}

impl From<ArbData> for Resource {
    fn from(data: ArbData) -> Self {
        Resource::ArbData(data)
    }
}

impl From<ArbCmd> for Resource {
    fn from(cmd: ArbCmd) -> Self {
        Resource::ArbCmd(cmd)
    }
}

/// Table of live resources
#[derive(Debug)]
pub struct Registry {
    objects: BTreeMap<SimbridgeHandle, Resource>,
    next_handle: SimbridgeHandle,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            objects: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Take ownership of a resource and issue a fresh handle for it
    pub fn insert(&mut self, resource: impl Into<Resource>) -> SimbridgeHandle {
        let resource = resource.into();
        let handle = self.next_handle;
        self.next_handle += 1;
        tracing::trace!(handle, kind = resource.type_name(), "created handle");
        self.objects.insert(handle, resource);
        handle
    }

    pub fn get(&self, handle: SimbridgeHandle) -> BridgeResult<&Resource> {
        self.objects
            .get(&handle)
            .ok_or(BridgeError::InvalidHandle(handle))
    }

    pub fn get_mut(&mut self, handle: SimbridgeHandle) -> BridgeResult<&mut Resource> {
        self.objects
            .get_mut(&handle)
            .ok_or(BridgeError::InvalidHandle(handle))
    }

    /// Resolve a handle to its ArbData payload
    pub fn arb(&self, handle: SimbridgeHandle) -> BridgeResult<&ArbData> {
        let resource = self.get(handle)?;
        resource.as_arb().ok_or(BridgeError::TypeMismatch {
            handle,
            expected: "arb",
            actual: resource.type_name(),
        })
    }

    pub fn arb_mut(&mut self, handle: SimbridgeHandle) -> BridgeResult<&mut ArbData> {
        let resource = self.get_mut(handle)?;
        let actual = resource.type_name();
        resource.as_arb_mut().ok_or(BridgeError::TypeMismatch {
            handle,
            expected: "arb",
            actual,
        })
    }

    /// Resolve a handle to an ArbCmd
    pub fn cmd(&self, handle: SimbridgeHandle) -> BridgeResult<&ArbCmd> {
        let resource = self.get(handle)?;
        resource.as_cmd().ok_or(BridgeError::TypeMismatch {
            handle,
            expected: "cmd",
            actual: resource.type_name(),
        })
    }

    /// Kind of the resource, or `INVALID` for a dead handle
    pub fn handle_type(&self, handle: SimbridgeHandle) -> SimbridgeHandleType {
        self.objects
            .get(&handle)
            .map(Resource::handle_type)
            .unwrap_or(SimbridgeHandleType::INVALID)
    }

    /// Structural rendering of a resource for diagnostics
    pub fn dump(&self, handle: SimbridgeHandle) -> BridgeResult<String> {
        Ok(format!("{:#?}", self.get(handle)?))
    }

    /// Delete a resource; its handle is retired for good
    pub fn remove(&mut self, handle: SimbridgeHandle) -> BridgeResult<Resource> {
        let resource = self
            .objects
            .remove(&handle)
            .ok_or(BridgeError::InvalidHandle(handle))?;
        tracing::trace!(handle, kind = resource.type_name(), "deleted handle");
        Ok(resource)
    }

    /// Delete every live resource, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.objects.len();
        self.objects.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Fails if any handle is still live
    pub fn leak_check(&self) -> BridgeResult<()> {
        if self.objects.is_empty() {
            Ok(())
        } else {
            Err(BridgeError::inv_arg(format!(
                "{} handle(s) still live",
                self.objects.len()
            )))
        }
    }
}

static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

fn registry() -> &'static RwLock<Registry> {
    REGISTRY.get_or_init(|| RwLock::new(Registry::new()))
}

/// Run `f` with shared access to the process-wide registry
pub fn with_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    f(&registry().read())
}

/// Run `f` with exclusive access to the process-wide registry
pub fn with_registry_mut<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    f(&mut registry().write())
}

/// Move a resource into the process-wide registry
pub fn insert(resource: impl Into<Resource>) -> SimbridgeHandle {
    with_registry_mut(|r| r.insert(resource))
}
