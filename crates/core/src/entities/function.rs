//! Bound native functions
//!
//! Resolving a function attribute yields a [`BoundFunction`]: the
//! descriptor plus the entity pointer it was resolved on. Every call builds
//! its own [`BoundCall`] with the pointer spliced into the argument list,
//! so calls on different entities never see each other's pointer.

use std::fmt;
use std::sync::Arc;

use sprust_engine::{BoundCall, NativeCaller, Value};
use sprust_sdk::Address;
use tracing::trace;

use crate::error::{EntityError, EntityResult};
use crate::registry::FunctionDescriptor;

/// A native function bound to one entity
#[derive(Clone)]
pub struct BoundFunction {
    name: String,
    descriptor: FunctionDescriptor,
    /// Injection slot and the pointer to inject there
    pointer: Option<(usize, Address)>,
    caller: Arc<dyn NativeCaller>,
}

impl BoundFunction {
    /// Bind a function descriptor to an entity pointer
    pub fn bind(
        name: impl Into<String>,
        descriptor: FunctionDescriptor,
        pointer: Address,
        caller: Arc<dyn NativeCaller>,
    ) -> Self {
        let pointer = descriptor.pointer_slot().map(|slot| (slot, pointer));
        Self {
            name: name.into(),
            descriptor,
            pointer,
            caller,
        }
    }

    /// Attribute name this function was resolved from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native symbol
    pub fn symbol(&self) -> &str {
        &self.descriptor.symbol
    }

    /// The descriptor this function was bound from
    pub fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    /// Pointer injected into every call, if any
    pub fn bound_pointer(&self) -> Option<Address> {
        self.pointer.map(|(_, pointer)| pointer)
    }

    /// Number of arguments the caller must supply
    pub fn arity(&self) -> usize {
        self.descriptor.caller_arity()
    }

    /// Build the native call for the given caller arguments
    pub fn prepare(&self, args: Vec<Value>) -> EntityResult<BoundCall> {
        if args.len() != self.arity() {
            return Err(EntityError::InvalidArgumentCount {
                expected: self.arity().to_string(),
                given: args.len(),
            });
        }

        let mut args = args;
        if let Some((slot, pointer)) = self.pointer {
            if slot > args.len() {
                return Err(EntityError::InvalidArgumentCount {
                    expected: format!("at least {}", slot),
                    given: args.len(),
                });
            }
            args.insert(slot, Value::Pointer(pointer));
        }

        Ok(BoundCall::new(self.descriptor.symbol.clone(), args))
    }

    /// Call the native function and return its result unchanged
    pub fn call<I>(&self, args: I) -> EntityResult<Value>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let call = self.prepare(args.into_iter().map(Into::into).collect())?;
        trace!("Calling {} ({} args)", call.symbol(), call.args().len());

        self.caller
            .call(&call)
            .map_err(|source| EntityError::NativeCall {
                symbol: self.descriptor.symbol.clone(),
                source,
            })
    }
}

impl fmt::Debug for BoundFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundFunction")
            .field("name", &self.name)
            .field("symbol", &self.descriptor.symbol)
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}
