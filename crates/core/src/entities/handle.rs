//! Entity handles
//!
//! An [`EntityHandle`] pairs an entity index with the edict found for it,
//! the native instances bound to it, and the descriptor table resolved for
//! its capability set. The edict is checked once, at construction.

use std::fmt;
use std::iter;
use std::sync::Arc;

use sprust_engine::{Edict, EngineGlobals, NativeInstance};
use sprust_sdk::Address;
use tracing::debug;

use super::basehandle::BaseHandle;
use super::kind::{EntityKind, BASE, PLAYER};
use crate::error::{EntityError, EntityResult};
use crate::registry::{
    self, AttributeRegistry, CapabilitySet, DescriptorTable, FunctionDescriptor,
    KeyValueDescriptor, OffsetDescriptor, PropertyDescriptor,
};

/// A live entity and everything needed to resolve its attributes
pub struct EntityHandle {
    index: u32,
    edict: Arc<dyn Edict>,
    kind: &'static EntityKind,
    capabilities: CapabilitySet,
    /// Secondary instances, after the edict in binding order
    instances: Vec<Arc<dyn NativeInstance>>,
    descriptors: Arc<DescriptorTable>,
    pub(crate) engine: Arc<EngineGlobals>,
}

impl EntityHandle {
    /// Create a base entity handle using the global engine and registry
    ///
    /// # Errors
    /// Returns [`EntityError::InvalidIndex`] if the slot is free or invalid.
    pub fn create(index: u32, extras: &[&str]) -> EntityResult<Self> {
        Self::create_kind(&BASE, index, extras)
    }

    /// Create a player handle using the global engine and registry
    pub fn create_player(index: u32) -> EntityResult<Self> {
        Self::create_kind(&PLAYER, index, &[])
    }

    /// Create a handle of the given kind using the global engine and registry
    pub fn create_kind(
        kind: &'static EntityKind,
        index: u32,
        extras: &[&str],
    ) -> EntityResult<Self> {
        let engine = sprust_engine::engine()?;
        let registry = registry::try_registry().ok_or(EntityError::RegistryNotInitialized)?;
        Self::create_with(Arc::clone(engine), registry, kind, index, extras)
    }

    /// Create a handle against explicit collaborators
    pub fn create_with(
        engine: Arc<EngineGlobals>,
        registry: &AttributeRegistry,
        kind: &'static EntityKind,
        index: u32,
        extras: &[&str],
    ) -> EntityResult<Self> {
        let edict = engine
            .edicts
            .edict(index)
            .filter(|edict| !edict.is_free() && edict.is_valid())
            .ok_or(EntityError::InvalidIndex(index))?;

        let capabilities =
            CapabilitySet::new(kind.tags.iter().copied().chain(extras.iter().copied()));
        let descriptors = registry.resolve(&capabilities);
        let instances = kind
            .bind_instances
            .map(|bind| bind(&engine, edict.as_ref()))
            .unwrap_or_default();

        debug!(
            "Created {} handle for index {} ({:?}, {} secondary instances)",
            kind.name,
            index,
            capabilities.as_slice(),
            instances.len()
        );

        Ok(Self {
            index,
            edict,
            kind,
            capabilities,
            instances,
            descriptors,
            engine,
        })
    }

    /// Entity index
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The edict backing this handle
    pub fn edict(&self) -> &dyn Edict {
        self.edict.as_ref()
    }

    /// Runtime kind
    pub fn kind(&self) -> &'static EntityKind {
        self.kind
    }

    /// Capability tags, base tag first
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Native instances in binding order, the edict first
    pub fn instances(&self) -> impl Iterator<Item = &dyn NativeInstance> {
        iter::once(self.edict.as_instance()).chain(self.instances.iter().map(|i| i.as_ref()))
    }

    /// Entity classname
    pub fn classname(&self) -> String {
        self.edict.class_name()
    }

    /// Base pointer of the server entity
    pub fn pointer(&self) -> Address {
        self.edict.base_entity()
    }

    /// Serial-qualified entity handle
    pub fn basehandle(&self) -> BaseHandle {
        BaseHandle::from_raw(self.edict.ref_ehandle())
    }

    /// Entity handle as its raw integer
    pub fn inthandle(&self) -> u32 {
        self.basehandle().raw()
    }

    /// Merged descriptor table for this handle's capability set
    pub fn descriptors(&self) -> &DescriptorTable {
        &self.descriptors
    }

    /// Networked property rows available to this handle
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyDescriptor)> {
        self.descriptors.properties()
    }

    /// Key value rows available to this handle
    pub fn keyvalues(&self) -> impl Iterator<Item = (&str, &KeyValueDescriptor)> {
        self.descriptors.keyvalues()
    }

    /// Offset rows available to this handle
    pub fn offsets(&self) -> impl Iterator<Item = (&str, &OffsetDescriptor)> {
        self.descriptors.offsets()
    }

    /// Function rows available to this handle
    pub fn functions(&self) -> impl Iterator<Item = (&str, &FunctionDescriptor)> {
        self.descriptors.functions()
    }
}

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityHandle")
            .field("index", &self.index)
            .field("kind", &self.kind.name)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
