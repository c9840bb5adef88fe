//! In-memory engine collaborators for tests

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use sprust_engine::{
    BoundCall, Edict, EdictSource, EngineError, EngineGlobals, NativeCaller, NativeInstance,
    PropertyAccess, RawMemory, Value,
};
use sprust_sdk::Address;

use crate::entities::{EntityHandle, EntityKind};
use crate::error::EntityResult;
use crate::registry::AttributeRegistry;

/// Size of the zeroed block backing every fake entity
pub(crate) const ENTITY_SIZE: usize = 0x100;

/// A networked property exposing `get_<Type>` / `set_<Type>`
///
/// Clones share the stored value.
#[derive(Clone)]
pub(crate) struct FakeProperty {
    ty: String,
    value: Arc<Mutex<Value>>,
}

impl FakeProperty {
    pub(crate) fn new(ty: &str, value: impl Into<Value>) -> Self {
        Self {
            ty: ty.to_string(),
            value: Arc::new(Mutex::new(value.into())),
        }
    }

    pub(crate) fn value(&self) -> Value {
        self.value.lock().clone()
    }
}

impl PropertyAccess for FakeProperty {
    fn has_operation(&self, operation: &str) -> bool {
        operation == format!("get_{}", self.ty) || operation == format!("set_{}", self.ty)
    }

    fn read(&self, operation: &str) -> Result<Value, EngineError> {
        if !self.has_operation(operation) {
            return Err(EngineError::UnsupportedOperation(operation.to_string()));
        }
        Ok(self.value())
    }

    fn write(&self, operation: &str, value: Value) -> Result<(), EngineError> {
        if !self.has_operation(operation) {
            return Err(EngineError::UnsupportedOperation(operation.to_string()));
        }
        *self.value.lock() = value;
        Ok(())
    }
}

/// A native object with a fixed set of attributes
pub(crate) struct FakeInstance {
    name: &'static str,
    attrs: Mutex<HashMap<String, Value>>,
}

impl FakeInstance {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn with_attr(self, name: &str, value: impl Into<Value>) -> Self {
        self.attrs.lock().insert(name.to_string(), value.into());
        self
    }
}

impl NativeInstance for FakeInstance {
    fn instance_name(&self) -> &'static str {
        self.name
    }

    fn has_attr(&self, name: &str) -> bool {
        self.attrs.lock().contains_key(name)
    }

    fn get_attr(&self, name: &str) -> Result<Value, EngineError> {
        self.attrs
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::AttributeNotFound {
                instance: self.name,
                name: name.to_string(),
            })
    }

    fn set_attr(&self, name: &str, value: Value) -> Result<(), EngineError> {
        let mut attrs = self.attrs.lock();
        match attrs.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EngineError::AttributeNotFound {
                instance: self.name,
                name: name.to_string(),
            }),
        }
    }
}

/// An edict backed by a leaked, zeroed block of [`ENTITY_SIZE`] bytes
pub(crate) struct FakeEdict {
    index: u32,
    free: bool,
    valid: bool,
    classname: String,
    ehandle: u32,
    base: Address,
    native: FakeInstance,
    props: HashMap<String, FakeProperty>,
    keyvalues: Mutex<HashMap<String, Value>>,
}

impl FakeEdict {
    pub(crate) fn new(index: u32) -> Self {
        let block: &'static mut [u8] = Box::leak(vec![0u8; ENTITY_SIZE].into_boxed_slice());
        Self {
            index,
            free: false,
            valid: true,
            classname: "prop_physics".to_string(),
            ehandle: index,
            base: Address::from_ptr(block.as_mut_ptr()),
            native: FakeInstance::new("edict_t"),
            props: HashMap::new(),
            keyvalues: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn free(mut self) -> Self {
        self.free = true;
        self
    }

    pub(crate) fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }

    pub(crate) fn with_classname(mut self, classname: &str) -> Self {
        self.classname = classname.to_string();
        self
    }

    pub(crate) fn with_ehandle(mut self, ehandle: u32) -> Self {
        self.ehandle = ehandle;
        self
    }

    /// Expose an attribute on the edict itself
    pub(crate) fn with_attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.native = self.native.with_attr(name, value);
        self
    }

    pub(crate) fn with_prop(mut self, path: &str, prop: FakeProperty) -> Self {
        self.props.insert(path.to_string(), prop);
        self
    }

    pub(crate) fn with_keyvalue(self, name: &str, value: impl Into<Value>) -> Self {
        self.keyvalues.lock().insert(name.to_string(), value.into());
        self
    }
}

impl NativeInstance for FakeEdict {
    fn instance_name(&self) -> &'static str {
        self.native.instance_name()
    }

    fn has_attr(&self, name: &str) -> bool {
        self.native.has_attr(name)
    }

    fn get_attr(&self, name: &str) -> Result<Value, EngineError> {
        self.native.get_attr(name)
    }

    fn set_attr(&self, name: &str, value: Value) -> Result<(), EngineError> {
        self.native.set_attr(name, value)
    }
}

impl Edict for FakeEdict {
    fn index(&self) -> u32 {
        self.index
    }

    fn is_free(&self) -> bool {
        self.free
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn class_name(&self) -> String {
        self.classname.clone()
    }

    fn base_entity(&self) -> Address {
        self.base
    }

    fn ref_ehandle(&self) -> u32 {
        self.ehandle
    }

    fn get_prop(&self, path: &str) -> Result<Arc<dyn PropertyAccess>, EngineError> {
        self.props
            .get(path)
            .map(|prop| Arc::new(prop.clone()) as Arc<dyn PropertyAccess>)
            .ok_or_else(|| EngineError::PropertyNotFound(path.to_string()))
    }

    fn get_key_value(&self, name: &str) -> Result<Value, EngineError> {
        Ok(self
            .keyvalues
            .lock()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn has_key_value_writer(&self, operation: &str) -> bool {
        matches!(
            operation,
            "SetKeyValueString" | "SetKeyValueInt" | "SetKeyValueFloat" | "SetKeyValueVector"
        )
    }

    fn set_key_value(&self, operation: &str, name: &str, value: Value) -> Result<(), EngineError> {
        if !self.has_key_value_writer(operation) {
            return Err(EngineError::UnsupportedOperation(operation.to_string()));
        }
        self.keyvalues.lock().insert(name.to_string(), value);
        Ok(())
    }

    fn as_instance(&self) -> &dyn NativeInstance {
        self
    }
}

/// Edict table keyed by index
#[derive(Default)]
pub(crate) struct FakeEdicts {
    edicts: HashMap<u32, Arc<FakeEdict>>,
    player_info: HashMap<u32, Arc<FakeInstance>>,
    userids: HashMap<u32, i32>,
}

impl FakeEdicts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_edict(mut self, edict: FakeEdict) -> Self {
        self.edicts.insert(edict.index, Arc::new(edict));
        self
    }

    pub(crate) fn with_player_info(mut self, index: u32, info: FakeInstance) -> Self {
        self.player_info.insert(index, Arc::new(info));
        self
    }

    pub(crate) fn with_userid(mut self, index: u32, userid: i32) -> Self {
        self.userids.insert(index, userid);
        self
    }
}

impl EdictSource for FakeEdicts {
    fn edict(&self, index: u32) -> Option<Arc<dyn Edict>> {
        self.edicts
            .get(&index)
            .map(|edict| Arc::clone(edict) as Arc<dyn Edict>)
    }

    fn player_info(&self, edict: &dyn Edict) -> Option<Arc<dyn NativeInstance>> {
        self.player_info
            .get(&edict.index())
            .map(|info| Arc::clone(info) as Arc<dyn NativeInstance>)
    }

    fn userid(&self, edict: &dyn Edict) -> Option<i32> {
        self.userids.get(&edict.index()).copied()
    }
}

/// Records every call and answers with a fixed result
pub(crate) struct RecordingCaller {
    calls: Mutex<Vec<BoundCall>>,
    result: Result<Value, String>,
}

impl RecordingCaller {
    pub(crate) fn new() -> Self {
        Self::returning(Value::None)
    }

    pub(crate) fn returning(value: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result: Ok(value),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result: Err(message.to_string()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<BoundCall> {
        self.calls.lock().clone()
    }
}

impl NativeCaller for RecordingCaller {
    fn call(&self, call: &BoundCall) -> Result<Value, EngineError> {
        self.calls.lock().push(call.clone());
        self.result.clone().map_err(EngineError::CallFailed)
    }
}

/// Engine collaborators built from fakes, with [`RawMemory`] for offsets
pub(crate) struct TestEngine {
    pub(crate) globals: Arc<EngineGlobals>,
    pub(crate) caller: Arc<RecordingCaller>,
}

impl TestEngine {
    pub(crate) fn new(edicts: FakeEdicts) -> Self {
        Self::with_caller(edicts, RecordingCaller::new())
    }

    pub(crate) fn with_caller(edicts: FakeEdicts, caller: RecordingCaller) -> Self {
        let caller = Arc::new(caller);
        // SAFETY: offsets in tests stay inside the ENTITY_SIZE block of each FakeEdict
        let memory = unsafe { RawMemory::new() };
        let globals = EngineGlobals::new(Arc::new(edicts), Arc::new(memory), caller.clone());

        Self {
            globals: Arc::new(globals),
            caller,
        }
    }

    pub(crate) fn create(
        &self,
        registry: &AttributeRegistry,
        kind: &'static EntityKind,
        index: u32,
        extras: &[&str],
    ) -> EntityResult<EntityHandle> {
        EntityHandle::create_with(Arc::clone(&self.globals), registry, kind, index, extras)
    }
}
