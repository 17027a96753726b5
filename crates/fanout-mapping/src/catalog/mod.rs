//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Schema catalog
//!
//! The catalog is the single authority on field classification: which
//! fields of an entity are gauges, counters, text, booleans, or tags,
//! which fields hold nested collections, and how instance keys are parsed.
//! It is built once at process start and never mutated; lookups of unknown
//! categories fall back to a generic pass-through schema so new appliance
//! versions never abort the pipeline.

pub mod entries;

use std::collections::HashMap;

use tracing::debug;

/// Declared kind of one entity field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Point-in-time numeric metric
    Gauge,

    /// Cumulative numeric metric
    Counter,

    /// Free-text metric, carried only by text-capable backends
    Text,

    /// Boolean, always emitted as a lowercase string tag
    Bool,

    /// String label emitted as a tag
    Tag,
}

impl FieldKind {
    /// Kind name as used in warnings and logs
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Gauge => "gauge",
            FieldKind::Counter => "counter",
            FieldKind::Text => "text",
            FieldKind::Bool => "boolean",
            FieldKind::Tag => "tag",
        }
    }

    /// Whether the kind classifies a metric field (vs a tag field)
    pub fn is_metric(&self) -> bool {
        matches!(self, FieldKind::Gauge | FieldKind::Counter | FieldKind::Text)
    }
}

/// Rule for a field holding a nested keyed collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRule {
    /// Field name inside the parent entity (e.g. `members`)
    pub field: String,

    /// Catalog id of the sub-entity schema (e.g. `pools.members`)
    pub schema: String,

    /// Tag name under which children inherit the parent's identifier,
    /// if the parent identifier flows down at all
    pub inherit_key_as: Option<String>,
}

/// Expected shape of one entity category
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    /// Catalog id; doubles as the metric name prefix for this entity
    pub id: String,

    /// Whether the category is a keyed collection of instances
    pub keyed: bool,

    /// Whether instance keys follow the `/Tenant/Application/Name` convention
    pub parse_key_names: bool,

    fields: HashMap<String, FieldKind>,
    collections: Vec<CollectionRule>,
}

impl EntitySchema {
    /// Create a singleton entity schema
    pub fn singleton(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            keyed: false,
            parse_key_names: false,
            fields: HashMap::new(),
            collections: Vec::new(),
        }
    }

    /// Create a keyed-collection entity schema
    pub fn collection(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            keyed: true,
            parse_key_names: false,
            fields: HashMap::new(),
            collections: Vec::new(),
        }
    }

    /// Enable tenant/application derivation from instance keys
    pub fn with_path_names(mut self) -> Self {
        self.parse_key_names = true;
        self
    }

    /// Declare a single field
    pub fn with_field(mut self, path: &str, kind: FieldKind) -> Self {
        self.fields.insert(path.to_string(), kind);
        self
    }

    /// Declare a batch of gauge fields
    pub fn with_gauges(mut self, paths: &[&str]) -> Self {
        for path in paths {
            self.fields.insert((*path).to_string(), FieldKind::Gauge);
        }
        self
    }

    /// Declare a batch of counter fields
    pub fn with_counters(mut self, paths: &[&str]) -> Self {
        for path in paths {
            self.fields.insert((*path).to_string(), FieldKind::Counter);
        }
        self
    }

    /// Declare a batch of free-text fields
    pub fn with_texts(mut self, paths: &[&str]) -> Self {
        for path in paths {
            self.fields.insert((*path).to_string(), FieldKind::Text);
        }
        self
    }

    /// Declare a batch of boolean fields
    pub fn with_bools(mut self, paths: &[&str]) -> Self {
        for path in paths {
            self.fields.insert((*path).to_string(), FieldKind::Bool);
        }
        self
    }

    /// Declare a batch of tag fields
    pub fn with_tags(mut self, paths: &[&str]) -> Self {
        for path in paths {
            self.fields.insert((*path).to_string(), FieldKind::Tag);
        }
        self
    }

    /// Declare a nested keyed collection
    pub fn with_collection(
        mut self,
        field: &str,
        schema: &str,
        inherit_key_as: Option<&str>,
    ) -> Self {
        self.collections.push(CollectionRule {
            field: field.to_string(),
            schema: schema.to_string(),
            inherit_key_as: inherit_key_as.map(str::to_string),
        });
        self
    }

    /// Declared kind of a dotted field path, if any
    pub fn field_kind(&self, path: &str) -> Option<FieldKind> {
        self.fields.get(path).copied()
    }

    /// Collection rule for a field path, if declared
    pub fn collection_rule(&self, path: &str) -> Option<&CollectionRule> {
        self.collections.iter().find(|rule| rule.field == path)
    }

    /// Number of declared fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Immutable registry of entity schemas, shared across cycles
#[derive(Debug)]
pub struct SchemaCatalog {
    schemas: HashMap<String, EntitySchema>,
    passthrough: EntitySchema,
}

impl SchemaCatalog {
    /// Build a catalog from a schema list
    pub fn from_schemas(schemas: Vec<EntitySchema>) -> Self {
        let schemas = schemas
            .into_iter()
            .map(|schema| (schema.id.clone(), schema))
            .collect();
        Self {
            schemas,
            passthrough: EntitySchema::singleton("passthrough"),
        }
    }

    /// The full appliance catalog
    pub fn appliance() -> Self {
        Self::from_schemas(entries::appliance_schemas())
    }

    /// Resolve a top-level category; unknown categories get the
    /// pass-through schema (every field a tag, no metrics)
    pub fn lookup(&self, entity_type: &str) -> &EntitySchema {
        match self.schemas.get(entity_type) {
            Some(schema) => schema,
            None => {
                debug!("unknown category {}, using pass-through schema", entity_type);
                &self.passthrough
            }
        }
    }

    /// Resolve a sub-entity schema by catalog id
    pub fn resolve(&self, id: &str) -> Option<&EntitySchema> {
        self.schemas.get(id)
    }

    /// The generic pass-through schema
    pub fn passthrough(&self) -> &EntitySchema {
        &self.passthrough
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
