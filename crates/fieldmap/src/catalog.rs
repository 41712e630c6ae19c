// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concurrent read-through cache of per-type field indexes.
//!
//! Descriptors are `'static` data emitted by the derive, but the transformer
//! wants name-keyed lookup rather than a linear scan per map entry. The
//! catalog builds that index once per type and serves it to any number of
//! concurrent callers afterwards.

use crate::descriptor::{FieldDescriptor, TypeDescriptor};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Name-keyed field index for one type.
#[derive(Debug)]
pub struct CatalogEntry {
    descriptor: &'static TypeDescriptor,
    fields: HashMap<&'static str, &'static FieldDescriptor>,
}

impl CatalogEntry {
    fn build(descriptor: &'static TypeDescriptor) -> Self {
        let mut fields = HashMap::with_capacity(descriptor.fields.len());
        for field in descriptor.fields {
            fields.insert(field.name, field);
        }
        Self { descriptor, fields }
    }

    /// The descriptor this entry was built from.
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Look up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.get(name).copied()
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
        self.descriptor.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Lazily populated `type -> field index` cache.
///
/// Keys are exactly the fields declared directly on the type, minus
/// `#[fieldmap(skip)]`. There is no supertype traversal: Rust structs have
/// no inheritance, and embedded structs are not flattened (flat maps only).
///
/// Entries live for the process duration; concurrent first use of the same
/// type may race to build the index, in which case one entry wins and the
/// others are discarded (building is cheap and side-effect free).
#[derive(Debug, Default)]
pub struct FieldCatalog {
    entries: DashMap<&'static str, Arc<CatalogEntry>>,
}

impl FieldCatalog {
    /// Create an empty catalog (tests; production code uses [`global`](Self::global)).
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide catalog instance.
    pub fn global() -> &'static FieldCatalog {
        static CATALOG: OnceLock<FieldCatalog> = OnceLock::new();
        CATALOG.get_or_init(FieldCatalog::new)
    }

    /// Field index for `descriptor`, built on first use.
    ///
    /// A type with no qualifying fields yields an entry with an empty map,
    /// never an absent value.
    pub fn fields_of(&self, descriptor: &'static TypeDescriptor) -> Arc<CatalogEntry> {
        if let Some(entry) = self.entries.get(descriptor.type_name) {
            return entry.clone();
        }
        let entry = Arc::new(CatalogEntry::build(descriptor));
        self.entries
            .entry(descriptor.type_name)
            .or_insert(entry)
            .clone()
    }

    /// Number of cached types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldKind;

    static SAMPLE: TypeDescriptor = TypeDescriptor {
        type_name: "tests::Sample",
        fields: &[
            FieldDescriptor {
                name: "id",
                kind: FieldKind::U64,
                optional: false,
            },
            FieldDescriptor {
                name: "label",
                kind: FieldKind::String,
                optional: false,
            },
        ],
    };

    static EMPTY: TypeDescriptor = TypeDescriptor {
        type_name: "tests::Empty",
        fields: &[],
    };

    #[test]
    fn read_through_cache() {
        let catalog = FieldCatalog::new();
        assert!(catalog.is_empty());

        let entry = catalog.fields_of(&SAMPLE);
        assert_eq!(entry.len(), 2);
        assert_eq!(entry.field("id").map(|f| f.kind), Some(FieldKind::U64));
        assert!(entry.field("missing").is_none());

        // Second lookup hits the cache, same entry.
        let again = catalog.fields_of(&SAMPLE);
        assert!(Arc::ptr_eq(&entry, &again));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn empty_type_yields_empty_entry() {
        let catalog = FieldCatalog::new();
        let entry = catalog.fields_of(&EMPTY);
        assert!(entry.is_empty());
        assert_eq!(entry.iter().count(), 0);
    }

    #[test]
    fn concurrent_first_use() {
        let catalog = Arc::new(FieldCatalog::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = catalog.clone();
                std::thread::spawn(move || catalog.fields_of(&SAMPLE).len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("join"), 2);
        }
        assert_eq!(catalog.len(), 1);
    }
}
