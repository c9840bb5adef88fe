//! Attribute resolution
//!
//! `get` and `set` walk a fixed precedence chain. The first branch that
//! matches wins, even when several descriptor kinds share a name.
//!
//! ```text
//! get (base):     computed ─▶ instances ─▶ property ─▶ keyvalue ─▶ offset ─▶ function
//! get (non-base): instances ─▶ kind computed ─▶ property ─▶ keyvalue ─▶ offset ─▶ function
//! set:            kind computed ─▶ instances ─▶ property ─▶ keyvalue ─▶ offset
//! ```
//!
//! Computed attributes of the base kind always win, so a registry row or
//! an edict attribute named `classname` cannot shadow the real classname.

use std::sync::Arc;

use sprust_engine::Value;
use tracing::trace;

use super::dispatch;
use super::function::BoundFunction;
use super::handle::EntityHandle;
use crate::error::{EntityError, EntityResult};
use crate::registry::Descriptor;

/// Result of resolving an attribute
#[derive(Debug, Clone)]
pub enum Resolved {
    /// A plain value
    Value(Value),
    /// A native function bound to the entity, not yet called
    Function(BoundFunction),
}

impl Resolved {
    /// Unwrap a plain value
    ///
    /// # Errors
    /// Returns [`EntityError::NotAValue`] if a function was resolved.
    pub fn into_value(self) -> EntityResult<Value> {
        match self {
            Resolved::Value(value) => Ok(value),
            Resolved::Function(function) => {
                Err(EntityError::NotAValue(function.name().to_string()))
            }
        }
    }

    /// Unwrap a bound function
    pub fn into_function(self) -> Option<BoundFunction> {
        match self {
            Resolved::Function(function) => Some(function),
            Resolved::Value(_) => None,
        }
    }

    /// Check if a function was resolved
    pub fn is_function(&self) -> bool {
        matches!(self, Resolved::Function(_))
    }
}

impl EntityHandle {
    /// Resolve an attribute by name
    ///
    /// Function attributes are returned bound to this entity but not called.
    ///
    /// # Errors
    /// Returns [`EntityError::AttributeNotFound`] if nothing provides the name.
    pub fn get(&self, name: &str) -> EntityResult<Resolved> {
        if self.kind().is_base() {
            if let Some(computed) = self.kind().computed(name) {
                trace!("{}: {} computed by {}", self.index(), name, self.kind().name);
                return (computed.get)(self).map(Resolved::Value);
            }
        }

        if let Some(instance) = self.instances().find(|i| i.has_attr(name)) {
            trace!("{}: {} from instance {}", self.index(), name, instance.instance_name());
            return Ok(Resolved::Value(instance.get_attr(name)?));
        }

        if !self.kind().is_base() {
            if let Some(computed) = self.kind().computed(name) {
                trace!("{}: {} computed by {}", self.index(), name, self.kind().name);
                return (computed.get)(self).map(Resolved::Value);
            }
        }

        match self.descriptors().find(name) {
            Some(Descriptor::Property(desc)) => {
                trace!("{}: {} from property {}", self.index(), name, desc.path);
                dispatch::read_property(self.edict(), desc).map(Resolved::Value)
            }
            Some(Descriptor::KeyValue(_)) => {
                trace!("{}: {} from keyvalue", self.index(), name);
                Ok(Resolved::Value(self.edict().get_key_value(name)?))
            }
            Some(Descriptor::Offset(desc)) => {
                trace!("{}: {} from offset", self.index(), name);
                dispatch::read_offset(self.engine.memory.as_ref(), self.pointer(), name, desc)
                    .map(Resolved::Value)
            }
            Some(Descriptor::Function(desc)) => {
                trace!("{}: {} bound to {}", self.index(), name, desc.symbol);
                Ok(Resolved::Function(BoundFunction::bind(
                    name,
                    desc.clone(),
                    self.pointer(),
                    Arc::clone(&self.engine.caller),
                )))
            }
            None => Err(EntityError::AttributeNotFound(name.to_string())),
        }
    }

    /// Resolve an attribute that must be a plain value
    pub fn get_value(&self, name: &str) -> EntityResult<Value> {
        self.get(name)?.into_value()
    }

    /// Write an attribute by name
    ///
    /// # Errors
    /// Returns [`EntityError::ReadOnlyAttribute`] for computed attributes
    /// without a setter, and [`EntityError::AttributeNotFound`] if nothing
    /// accepts the name. Functions are never written.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> EntityResult<()> {
        let value = value.into();

        if let Some(computed) = self.kind().computed(name) {
            trace!("{}: {} set by {}", self.index(), name, self.kind().name);
            return match computed.set {
                Some(set) => set(self, value),
                None => Err(EntityError::ReadOnlyAttribute(name.to_string())),
            };
        }

        if let Some(instance) = self.instances().find(|i| i.has_attr(name)) {
            trace!("{}: {} set on instance {}", self.index(), name, instance.instance_name());
            instance.set_attr(name, value)?;
            return Ok(());
        }

        let descriptors = self.descriptors();
        if let Some(desc) = descriptors.property(name) {
            trace!("{}: {} set on property {}", self.index(), name, desc.path);
            return dispatch::write_property(self.edict(), name, desc, value);
        }
        if let Some(desc) = descriptors.keyvalue(name) {
            trace!("{}: {} set on keyvalue", self.index(), name);
            return dispatch::write_keyvalue(self.edict(), name, desc, value);
        }
        if let Some(desc) = descriptors.offset(name) {
            trace!("{}: {} set on offset", self.index(), name);
            return dispatch::write_offset(
                self.engine.memory.as_ref(),
                self.pointer(),
                name,
                desc,
                value,
            );
        }

        Err(EntityError::AttributeNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::kind::{BASE, PLAYER};
    use crate::registry::{
        AttributeRegistry, DescriptorTable, FunctionDescriptor, KeyValueDescriptor,
        OffsetDescriptor, PropertyDescriptor,
    };
    use crate::testing::{FakeEdict, FakeEdicts, FakeProperty, TestEngine};

    fn edict_with_armor() -> FakeEdict {
        FakeEdict::new(1)
            .with_prop("CBaseEntity.m_ArmorValue", FakeProperty::new("Int", 11))
            .with_keyvalue("armor", "kv")
    }

    fn armor_property() -> PropertyDescriptor {
        PropertyDescriptor::new("CBaseEntity.m_ArmorValue", "Int")
    }

    fn armor_function() -> FunctionDescriptor {
        FunctionDescriptor::new("CBaseEntity::GetArmor", vec!["Pointer".into()])
            .with_pointer_index(0)
    }

    fn entity_with(table: DescriptorTable) -> (TestEngine, EntityHandle) {
        let engine = TestEngine::new(FakeEdicts::new().with_edict(edict_with_armor()));
        let registry = AttributeRegistry::new().with_table("entity", table);
        let entity = engine.create(&registry, &BASE, 1, &[]).unwrap();
        (engine, entity)
    }

    #[test]
    fn test_player_health_scenario() {
        let health = FakeProperty::new("Int", 100);
        let engine = TestEngine::new(
            FakeEdicts::new()
                .with_edict(FakeEdict::new(5).with_prop("CBasePlayer.m_iHealth", health.clone())),
        );
        let registry = AttributeRegistry::new().with_table(
            "player",
            DescriptorTable::new()
                .with_property("health", PropertyDescriptor::new("CBasePlayer.m_iHealth", "Int")),
        );

        let player = engine.create(&registry, &PLAYER, 5, &[]).unwrap();
        assert_eq!(player.capabilities().as_slice(), ["entity", "player"]);
        assert_eq!(player.get_value("health").unwrap(), Value::Int(100));

        player.set("health", 50).unwrap();
        assert_eq!(health.value(), Value::Int(50));
        assert_eq!(player.get_value("health").unwrap(), Value::Int(50));
    }

    #[test]
    fn test_get_precedence_is_total() {
        let offset = OffsetDescriptor::new("Int", 0x20);

        let (_, entity) = entity_with(
            DescriptorTable::new()
                .with_function("armor", armor_function())
                .with_offset("armor", offset.clone())
                .with_keyvalue("armor", KeyValueDescriptor::new("String"))
                .with_property("armor", armor_property()),
        );
        assert_eq!(entity.get_value("armor").unwrap(), Value::Int(11));

        let (_, entity) = entity_with(
            DescriptorTable::new()
                .with_function("armor", armor_function())
                .with_offset("armor", offset.clone())
                .with_keyvalue("armor", KeyValueDescriptor::new("String")),
        );
        assert_eq!(entity.get_value("armor").unwrap(), Value::from("kv"));

        let (_, entity) = entity_with(
            DescriptorTable::new()
                .with_function("armor", armor_function())
                .with_offset("armor", offset),
        );
        assert_eq!(entity.get_value("armor").unwrap(), Value::Int(0));

        let (_, entity) =
            entity_with(DescriptorTable::new().with_function("armor", armor_function()));
        assert!(entity.get("armor").unwrap().is_function());
    }

    #[test]
    fn test_set_precedence_is_total() {
        let (_, entity) = entity_with(
            DescriptorTable::new()
                .with_offset("armor", OffsetDescriptor::new("Int", 0x20))
                .with_keyvalue("armor", KeyValueDescriptor::new("String"))
                .with_property("armor", armor_property()),
        );
        entity.set("armor", 42).unwrap();
        assert_eq!(entity.get_value("armor").unwrap(), Value::Int(42));
        assert_eq!(entity.edict().get_key_value("armor").unwrap(), Value::from("kv"));

        let (_, entity) = entity_with(
            DescriptorTable::new()
                .with_offset("armor", OffsetDescriptor::new("Int", 0x20))
                .with_keyvalue("armor", KeyValueDescriptor::new("String")),
        );
        entity.set("armor", "heavy").unwrap();
        assert_eq!(entity.get_value("armor").unwrap(), Value::from("heavy"));

        let (_, entity) =
            entity_with(DescriptorTable::new().with_offset("armor", OffsetDescriptor::new("Int", 0x20)));
        entity.set("armor", 42).unwrap();
        assert_eq!(entity.get_value("armor").unwrap(), Value::Int(42));
    }

    #[test]
    fn test_instance_pass_through_comes_first() {
        let engine = TestEngine::new(
            FakeEdicts::new().with_edict(edict_with_armor().with_attr("armor", 7)),
        );
        let registry = AttributeRegistry::new()
            .with_table("entity", DescriptorTable::new().with_property("armor", armor_property()));
        let entity = engine.create(&registry, &BASE, 1, &[]).unwrap();

        assert_eq!(entity.get_value("armor").unwrap(), Value::Int(7));
        entity.set("armor", 8).unwrap();
        assert_eq!(entity.get_value("armor").unwrap(), Value::Int(8));
        assert_eq!(entity.descriptors().property("armor"), Some(&armor_property()));
    }

    #[test]
    fn test_kind_computed_shadows_descriptors() {
        let engine = TestEngine::new(
            FakeEdicts::new()
                .with_edict(FakeEdict::new(4).with_prop("m_slot", FakeProperty::new("Int", 99))),
        );
        let registry = AttributeRegistry::new().with_table(
            "entity",
            DescriptorTable::new().with_property("slot", PropertyDescriptor::new("m_slot", "Int")),
        );

        let player = engine.create(&registry, &PLAYER, 4, &[]).unwrap();
        assert_eq!(player.get_value("slot").unwrap(), Value::Int(3));

        // Base entities read the descriptor instead
        let entity = engine.create(&registry, &BASE, 4, &[]).unwrap();
        assert_eq!(entity.get_value("slot").unwrap(), Value::Int(99));
    }

    #[test]
    fn test_base_computed_attributes() {
        let (_, entity) = entity_with(DescriptorTable::new());

        assert_eq!(entity.get_value("index").unwrap(), Value::Int(1));
        assert_eq!(entity.get_value("classname").unwrap(), Value::from("prop_physics"));
        assert_eq!(
            entity.get_value("pointer").unwrap(),
            Value::Pointer(entity.pointer())
        );
        assert_eq!(entity.get_value("inthandle").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_base_computed_attributes_win_over_colliding_rows() {
        let engine = TestEngine::new(
            FakeEdicts::new().with_edict(
                FakeEdict::new(1)
                    .with_classname("func_door")
                    .with_attr("classname", "edict_attr")
                    .with_keyvalue("classname", "kv_name"),
            ),
        );
        let registry = AttributeRegistry::new().with_table(
            "entity",
            DescriptorTable::new().with_keyvalue("classname", KeyValueDescriptor::new("String")),
        );
        let entity = engine.create(&registry, &BASE, 1, &[]).unwrap();

        assert_eq!(entity.get_value("classname").unwrap(), Value::from("func_door"));
        assert_eq!(entity.get_value("classname").unwrap(), Value::String(entity.classname()));

        // Reads and writes agree on which source owns the name
        let err = entity.set("classname", "other").unwrap_err();
        assert!(matches!(err, EntityError::ReadOnlyAttribute(ref n) if n == "classname"));
        assert_eq!(entity.edict().get_key_value("classname").unwrap(), Value::from("kv_name"));
    }

    #[test]
    fn test_read_only_computed_attribute() {
        let engine = TestEngine::new(
            FakeEdicts::new().with_edict(FakeEdict::new(1).with_attr("index", 1)),
        );
        let entity = engine
            .create(&AttributeRegistry::new(), &BASE, 1, &[])
            .unwrap();

        let err = entity.set("index", 3).unwrap_err();
        assert!(matches!(err, EntityError::ReadOnlyAttribute(ref n) if n == "index"));
        assert_eq!(entity.index(), 1);
    }

    #[test]
    fn test_unknown_attribute() {
        let (_, entity) = entity_with(DescriptorTable::new().with_property("armor", armor_property()));

        let err = entity.get("nonexistent").unwrap_err();
        assert!(matches!(err, EntityError::AttributeNotFound(ref n) if n == "nonexistent"));
        assert_eq!(err.to_string(), "Attribute \"nonexistent\" not found");

        let err = entity.set("nonexistent", 1).unwrap_err();
        assert!(matches!(err, EntityError::AttributeNotFound(_)));
    }

    #[test]
    fn test_functions_are_not_write_targets() {
        let (engine, entity) =
            entity_with(DescriptorTable::new().with_function("armor", armor_function()));

        let err = entity.set("armor", 1).unwrap_err();
        assert!(matches!(err, EntityError::AttributeNotFound(_)));
        assert!(engine.caller.calls().is_empty());
    }

    #[test]
    fn test_function_is_bound_not_called() {
        let (engine, entity) =
            entity_with(DescriptorTable::new().with_function("armor", armor_function()));

        let function = entity.get("armor").unwrap().into_function().unwrap();
        assert!(engine.caller.calls().is_empty());
        assert_eq!(function.bound_pointer(), Some(entity.pointer()));

        function.call(Vec::<Value>::new()).unwrap();
        let calls = engine.caller.calls();
        assert_eq!(calls[0].args(), [Value::Pointer(entity.pointer())]);

        let err = entity.get_value("armor").unwrap_err();
        assert!(matches!(err, EntityError::NotAValue(ref n) if n == "armor"));
    }

    #[test]
    fn test_function_on_two_entities_injects_each_pointer() {
        let engine = TestEngine::new(
            FakeEdicts::new()
                .with_edict(FakeEdict::new(1))
                .with_edict(FakeEdict::new(2)),
        );
        let registry = AttributeRegistry::new().with_table(
            "entity",
            DescriptorTable::new().with_function("armor", armor_function()),
        );
        let first = engine.create(&registry, &BASE, 1, &[]).unwrap();
        let second = engine.create(&registry, &BASE, 2, &[]).unwrap();

        let call = |entity: &EntityHandle| {
            entity
                .get("armor")
                .unwrap()
                .into_function()
                .unwrap()
                .call(Vec::<Value>::new())
                .unwrap()
        };
        call(&first);
        call(&second);

        let pointers: Vec<_> = engine
            .caller
            .calls()
            .iter()
            .map(|call| call.args()[0].clone())
            .collect();
        assert_eq!(
            pointers,
            [Value::Pointer(first.pointer()), Value::Pointer(second.pointer())]
        );
        assert_ne!(first.pointer(), second.pointer());
    }

    #[test]
    fn test_extra_capability_rows() {
        let engine = TestEngine::new(FakeEdicts::new().with_edict(edict_with_armor()));
        let registry = AttributeRegistry::new()
            .with_table("entity", DescriptorTable::new())
            .with_table(
                "armored",
                DescriptorTable::new().with_property("armor", armor_property()),
            );

        let plain = engine.create(&registry, &BASE, 1, &[]).unwrap();
        assert!(plain.get("armor").is_err());

        let armored = engine.create(&registry, &BASE, 1, &["armored"]).unwrap();
        assert_eq!(armored.get_value("armor").unwrap(), Value::Int(11));
        assert_eq!(armored.properties().count(), 1);
    }
}
