//! Typed accessor dispatch
//!
//! A descriptor's semantic type is turned into a native operation name by
//! convention and looked up on the native object. Unknown types fail
//! closed: nothing is read or written when the operation is missing.
//!
//! | Descriptor | Reader             | Writer                 |
//! |------------|--------------------|------------------------|
//! | property   | `get_<Type>`       | `set_<Type>`           |
//! | offset     | `GetLoc<Type>`     | `SetLoc<Type>`         |
//! | keyvalue   | `GetKeyValue`      | `SetKeyValue<Type>`    |

use sprust_engine::{Edict, MemoryAccess, Value, GET_LOC_PREFIX, SET_LOC_PREFIX};
use sprust_sdk::Address;
use tracing::warn;

use crate::error::{EntityError, EntityResult};
use crate::registry::{KeyValueDescriptor, OffsetDescriptor, PropertyDescriptor, SemanticType};

/// Property reader name (`get_Int`)
pub fn property_reader(ty: &SemanticType) -> String {
    format!("get_{}", ty)
}

/// Property writer name (`set_Int`)
pub fn property_writer(ty: &SemanticType) -> String {
    format!("set_{}", ty)
}

/// Offset reader name (`GetLocInt`)
pub fn offset_reader(ty: &SemanticType) -> String {
    format!("{}{}", GET_LOC_PREFIX, ty)
}

/// Offset writer name (`SetLocInt`)
pub fn offset_writer(ty: &SemanticType) -> String {
    format!("{}{}", SET_LOC_PREFIX, ty)
}

/// Key value writer name (`SetKeyValueString`)
pub fn keyvalue_writer(ty: &SemanticType) -> String {
    format!("SetKeyValue{}", ty)
}

/// Read a networked property
///
/// Boolean properties compare the raw value against their "true" sentinel.
pub fn read_property(edict: &dyn Edict, desc: &PropertyDescriptor) -> EntityResult<Value> {
    let prop = edict.get_prop(&desc.path)?;
    let operation = property_reader(&desc.semantic_type);

    if !prop.has_operation(&operation) {
        warn!("Property {} has no {} operation", desc.path, operation);
        return Err(EntityError::UnsupportedPropertyType(
            desc.semantic_type.to_string(),
        ));
    }

    let raw = prop.read(&operation)?;

    Ok(match &desc.boolean {
        Some(values) => Value::Bool(values.decode(&raw)),
        None => raw,
    })
}

/// Write a networked property
///
/// Boolean properties store the sentinel matching the given flag.
pub fn write_property(
    edict: &dyn Edict,
    name: &str,
    desc: &PropertyDescriptor,
    value: Value,
) -> EntityResult<()> {
    let prop = edict.get_prop(&desc.path)?;
    let operation = property_writer(&desc.semantic_type);

    if !prop.has_operation(&operation) {
        warn!("Property {} has no {} operation", desc.path, operation);
        return Err(EntityError::UnsupportedPropertyType(
            desc.semantic_type.to_string(),
        ));
    }

    let value = match &desc.boolean {
        Some(values) => {
            let flag = value.as_bool().ok_or_else(|| EntityError::InvalidValue {
                attribute: name.to_string(),
                expected: "bool",
                found: value.type_name(),
            })?;
            values.encode(flag)
        }
        None => value,
    };

    prop.write(&operation, value)?;
    Ok(())
}

/// Write a key value through its typed writer
pub fn write_keyvalue(
    edict: &dyn Edict,
    name: &str,
    desc: &KeyValueDescriptor,
    value: Value,
) -> EntityResult<()> {
    let operation = keyvalue_writer(&desc.semantic_type);

    if !edict.has_key_value_writer(&operation) {
        warn!("Edict has no {} writer for {}", operation, name);
        return Err(EntityError::UnsupportedKeyValueType(
            desc.semantic_type.to_string(),
        ));
    }

    edict.set_key_value(&operation, name, value)?;
    Ok(())
}

/// Compute `base + offset` for the running platform
fn offset_address(base: Address, name: &str, desc: &OffsetDescriptor) -> EntityResult<Address> {
    desc.offset
        .current()
        .and_then(|offset| base.offset(offset))
        .ok_or_else(|| EntityError::OffsetUnavailable(name.to_string()))
}

/// Read a raw value at the entity's base pointer plus the offset
pub fn read_offset(
    memory: &dyn MemoryAccess,
    base: Address,
    name: &str,
    desc: &OffsetDescriptor,
) -> EntityResult<Value> {
    let operation = offset_reader(&desc.semantic_type);

    if !memory.has_accessor(&operation) {
        warn!("Memory layer has no {} accessor for {}", operation, name);
        return Err(EntityError::UnsupportedOffsetType(
            desc.semantic_type.to_string(),
        ));
    }

    let address = offset_address(base, name, desc)?;
    Ok(memory.read(&operation, address)?)
}

/// Write a raw value at the entity's base pointer plus the offset
pub fn write_offset(
    memory: &dyn MemoryAccess,
    base: Address,
    name: &str,
    desc: &OffsetDescriptor,
    value: Value,
) -> EntityResult<()> {
    let operation = offset_writer(&desc.semantic_type);

    if !memory.has_accessor(&operation) {
        warn!("Memory layer has no {} accessor for {}", operation, name);
        return Err(EntityError::UnsupportedOffsetType(
            desc.semantic_type.to_string(),
        ));
    }

    let address = offset_address(base, name, desc)?;
    memory.write(&operation, address, value)?;
    Ok(())
}
