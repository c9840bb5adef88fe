//! Descriptor tables and capability sets

use std::collections::HashMap;

use super::descriptor::{
    Descriptor, FunctionDescriptor, KeyValueDescriptor, OffsetDescriptor, PropertyDescriptor,
};

/// Capability tag every entity carries
pub const BASE_CAPABILITY: &str = "entity";

/// Ordered set of capability tags
///
/// [`BASE_CAPABILITY`] is always first; the remaining tags keep their
/// declaration order with duplicates removed. Order decides which table
/// row wins when two tags describe the same attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilitySet(Vec<String>);

impl CapabilitySet {
    /// Build a capability set from extra tags
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = vec![BASE_CAPABILITY.to_string()];
        for tag in tags {
            let tag = tag.as_ref();
            if !set.iter().any(|t| t == tag) {
                set.push(tag.to_string());
            }
        }
        Self(set)
    }

    /// Check if the set contains a tag
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Iterate tags in precedence order (lowest first)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Tags as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: the base tag is always present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

/// The four descriptor lookup tables for one capability tag, or the merged
/// result for a whole capability set
#[derive(Debug, Clone, Default)]
pub struct DescriptorTable {
    properties: HashMap<String, PropertyDescriptor>,
    keyvalues: HashMap<String, KeyValueDescriptor>,
    offsets: HashMap<String, OffsetDescriptor>,
    functions: HashMap<String, FunctionDescriptor>,
}

impl DescriptorTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property row
    pub fn with_property(mut self, name: impl Into<String>, desc: PropertyDescriptor) -> Self {
        self.properties.insert(name.into(), desc);
        self
    }

    /// Add a key value row
    pub fn with_keyvalue(mut self, name: impl Into<String>, desc: KeyValueDescriptor) -> Self {
        self.keyvalues.insert(name.into(), desc);
        self
    }

    /// Add an offset row
    pub fn with_offset(mut self, name: impl Into<String>, desc: OffsetDescriptor) -> Self {
        self.offsets.insert(name.into(), desc);
        self
    }

    /// Add a function row
    pub fn with_function(mut self, name: impl Into<String>, desc: FunctionDescriptor) -> Self {
        self.functions.insert(name.into(), desc);
        self
    }

    /// Copy every row of `other` into this table, replacing rows of the same
    /// name and kind
    pub fn merge(&mut self, other: &DescriptorTable) {
        self.properties
            .extend(other.properties.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.keyvalues
            .extend(other.keyvalues.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.offsets
            .extend(other.offsets.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.functions
            .extend(other.functions.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Get a property row
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    /// Get a key value row
    pub fn keyvalue(&self, name: &str) -> Option<&KeyValueDescriptor> {
        self.keyvalues.get(name)
    }

    /// Get an offset row
    pub fn offset(&self, name: &str) -> Option<&OffsetDescriptor> {
        self.offsets.get(name)
    }

    /// Get a function row
    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.get(name)
    }

    /// Find the descriptor for a name
    ///
    /// When a name appears in several tables the first of property,
    /// keyvalue, offset, function wins.
    pub fn find(&self, name: &str) -> Option<Descriptor<'_>> {
        self.property(name)
            .map(Descriptor::Property)
            .or_else(|| self.keyvalue(name).map(Descriptor::KeyValue))
            .or_else(|| self.offset(name).map(Descriptor::Offset))
            .or_else(|| self.function(name).map(Descriptor::Function))
    }

    /// Iterate property rows
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyDescriptor)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate key value rows
    pub fn keyvalues(&self) -> impl Iterator<Item = (&str, &KeyValueDescriptor)> {
        self.keyvalues.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate offset rows
    pub fn offsets(&self) -> impl Iterator<Item = (&str, &OffsetDescriptor)> {
        self.offsets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate function rows
    pub fn functions(&self) -> impl Iterator<Item = (&str, &FunctionDescriptor)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of rows
    pub fn len(&self) -> usize {
        self.properties.len() + self.keyvalues.len() + self.offsets.len() + self.functions.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
