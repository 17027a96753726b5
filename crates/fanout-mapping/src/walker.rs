//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Tree walker
//!
//! Walks one raw snapshot guided by the schema catalog and produces the
//! normalized record sequence. The walk is a pure function of its inputs:
//! re-invoking it on the same frozen document yields an identical sequence,
//! including tag ordering. Recoverable problems (a declared-numeric field
//! holding text) skip the offending record and accumulate as warnings; the
//! cycle always continues.

use std::collections::VecDeque;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use fanout_core::error::CycleWarning;
use fanout_core::types::raw::json_type_name;
use fanout_core::types::{GlobalContext, NormalizedRecord, RawTelemetryDocument, RecordValue, TagSet};

use crate::catalog::{CollectionRule, EntitySchema, FieldKind, SchemaCatalog};
use crate::tags;

/// Start a walk over one snapshot
pub fn walk<'a>(
    doc: &'a RawTelemetryDocument,
    catalog: &'a SchemaCatalog,
    context: &'a GlobalContext,
) -> RecordWalk<'a> {
    RecordWalk {
        catalog,
        context,
        categories: doc.categories().map(|(k, v)| (k.as_str(), v)).collect(),
        next_category: 0,
        pending: VecDeque::new(),
        warnings: Vec::new(),
    }
}

/// Lazy, finite, restartable record sequence over one snapshot
pub struct RecordWalk<'a> {
    catalog: &'a SchemaCatalog,
    context: &'a GlobalContext,
    categories: Vec<(&'a str, &'a Value)>,
    next_category: usize,
    pending: VecDeque<NormalizedRecord>,
    warnings: Vec<CycleWarning>,
}

impl<'a> RecordWalk<'a> {
    /// Warnings accumulated so far; complete once the walk is exhausted
    pub fn warnings(&self) -> &[CycleWarning] {
        &self.warnings
    }

    /// Drain the walk into a record list plus its warning list
    pub fn collect_cycle(mut self) -> (Vec<NormalizedRecord>, Vec<CycleWarning>) {
        let mut records = Vec::new();
        while let Some(record) = self.next() {
            records.push(record);
        }
        (records, self.warnings)
    }

    fn expand_category(&mut self, name: &'a str, value: &'a Value) {
        let schema = self.catalog.lookup(name);
        match value {
            Value::Object(map) if schema.keyed => {
                for (key, instance) in map {
                    match instance {
                        Value::Object(obj) => {
                            self.expand_entity(
                                name,
                                name,
                                schema,
                                obj,
                                &TagSet::new(),
                                Some(key.as_str()),
                            );
                        }
                        other => debug!(
                            "skipping non-object instance {} in {}: {}",
                            key,
                            name,
                            json_type_name(other)
                        ),
                    }
                }
            }
            Value::Object(obj) => {
                self.expand_entity(name, name, schema, obj, &TagSet::new(), None);
            }
            other => {
                // A bare scalar category carries no metrics; keep it as a tag
                debug!("category {} is a bare {}", name, json_type_name(other));
                let extra = vec![(name.to_string(), render_scalar(other))];
                let tags = tags::compose(&TagSet::new(), None, false, &[], &extra, self.context);
                self.pending
                    .push_back(NormalizedRecord::annotation(name, tags, self.context.epoch()));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn expand_entity(
        &mut self,
        entity_type: &str,
        prefix: &str,
        schema: &'a EntitySchema,
        obj: &'a Map<String, Value>,
        parent_tags: &TagSet,
        key: Option<&str>,
    ) {
        let mut scan = FieldScan::default();
        scan_fields(schema, obj, "", &mut scan);

        let tags = tags::compose(
            parent_tags,
            key,
            schema.parse_key_names,
            &scan.schema_tags,
            &scan.extra_tags,
            self.context,
        );

        let mut emitted = 0usize;
        for (path, kind, value) in &scan.metrics {
            let metric_name = format!("{}.{}", prefix, path);
            match coerce_value(*kind, value) {
                Some(record_value) => {
                    self.pending.push_back(NormalizedRecord::metric(
                        entity_type,
                        metric_name,
                        record_value,
                        tags.clone(),
                        self.context.epoch(),
                    ));
                    emitted += 1;
                }
                None => {
                    warn!(
                        "type mismatch in {}: {} declared {} holds {}",
                        entity_type,
                        metric_name,
                        kind.name(),
                        json_type_name(value)
                    );
                    self.warnings.push(CycleWarning::TypeMismatch {
                        entity_type: entity_type.to_string(),
                        metric_name,
                        expected: kind.name().to_string(),
                        found: value.to_string(),
                    });
                }
            }
        }

        // An entity with neither metrics nor sub-collections still surfaces
        // its tags once, so nothing is silently lost
        if emitted == 0 && scan.children.is_empty() {
            self.pending.push_back(NormalizedRecord::annotation(
                entity_type,
                tags,
                self.context.epoch(),
            ));
        }

        for (rule, map) in scan.children {
            let child_schema = self
                .catalog
                .resolve(&rule.schema)
                .unwrap_or_else(|| self.catalog.passthrough());
            let child_prefix = format!("{}.{}", prefix, rule.field);

            let mut inherited = TagSet::new();
            if let (Some(tag_name), Some(parent_key)) = (&rule.inherit_key_as, key) {
                inherited.set(tag_name.as_str(), parent_key);
            }

            for (child_key, child_value) in map {
                match child_value {
                    Value::Object(child_obj) => {
                        self.expand_entity(
                            entity_type,
                            &child_prefix,
                            child_schema,
                            child_obj,
                            &inherited,
                            Some(child_key.as_str()),
                        );
                    }
                    other => debug!(
                        "skipping non-object member {} in {}: {}",
                        child_key,
                        child_prefix,
                        json_type_name(other)
                    ),
                }
            }
        }
    }
}

impl Iterator for RecordWalk<'_> {
    type Item = NormalizedRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(record);
            }
            if self.next_category >= self.categories.len() {
                return None;
            }
            let (name, value) = self.categories[self.next_category];
            self.next_category += 1;
            self.expand_category(name, value);
        }
    }
}

/// Everything one scan pass gathers from an entity's raw fields
#[derive(Default)]
struct FieldScan<'a> {
    metrics: Vec<(String, FieldKind, &'a Value)>,
    schema_tags: Vec<(String, String)>,
    extra_tags: Vec<(String, String)>,
    children: Vec<(&'a CollectionRule, &'a Map<String, Value>)>,
}

fn scan_fields<'a>(
    schema: &'a EntitySchema,
    obj: &'a Map<String, Value>,
    prefix: &str,
    scan: &mut FieldScan<'a>,
) {
    for (field, value) in obj {
        let path = if prefix.is_empty() {
            field.clone()
        } else {
            format!("{}.{}", prefix, field)
        };

        if let Some(rule) = schema.collection_rule(&path) {
            match value {
                Value::Object(map) => scan.children.push((rule, map)),
                other => debug!(
                    "collection field {} is not an object: {}",
                    path,
                    json_type_name(other)
                ),
            }
            continue;
        }

        match value {
            Value::Null => {}
            Value::Object(map) => scan_fields(schema, map, &path, scan),
            Value::Array(_) => match schema.field_kind(&path) {
                Some(FieldKind::Tag) => scan.schema_tags.push((path, render_scalar(value))),
                _ => scan.extra_tags.push((path, render_scalar(value))),
            },
            scalar => match schema.field_kind(&path) {
                Some(kind) if kind.is_metric() => scan.metrics.push((path, kind, value)),
                Some(FieldKind::Bool) | Some(FieldKind::Tag) => {
                    scan.schema_tags.push((path, render_scalar(scalar)));
                }
                _ => scan.extra_tags.push((path, render_scalar(scalar))),
            },
        }
    }
}

/// Coerce a raw scalar into its declared kind; `None` is a type mismatch
fn coerce_value(kind: FieldKind, value: &Value) -> Option<RecordValue> {
    match kind {
        FieldKind::Gauge => numeric(value).map(RecordValue::Gauge),
        FieldKind::Counter => numeric(value).map(RecordValue::Counter),
        FieldKind::Text => match value {
            Value::String(s) => Some(RecordValue::Text(s.clone())),
            Value::Number(n) => Some(RecordValue::Text(n.to_string())),
            Value::Bool(b) => Some(RecordValue::Text(b.to_string())),
            _ => None,
        },
        FieldKind::Bool | FieldKind::Tag => None,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        // Some appliance endpoints render numbers as strings
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn context() -> GlobalContext {
        GlobalContext::new(
            "telemetry.bigip.com",
            "cd5e51b8-74ef-44c8-985c-7965512c2e87",
            "14.0.0",
            Utc.timestamp_opt(1_546_304_400, 0).unwrap(),
        )
    }

    fn doc(value: serde_json::Value) -> RawTelemetryDocument {
        RawTelemetryDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_singleton_scalar_metric() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({"system": {"cpu": 0}}));

        let (records, warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert!(warnings.is_empty());
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.entity_type, "system");
        assert_eq!(record.metric_name, "system.cpu");
        assert_eq!(record.value, Some(RecordValue::Gauge(0.0)));
        assert_eq!(record.timestamp, 1_546_304_400);
        assert!(record
            .tags
            .to_strings()
            .contains(&"host:telemetry.bigip.com".to_string()));
    }

    #[test]
    fn test_keyed_collection_injects_name_and_path_tags() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({
            "virtualServers": {
                "/Common/foofoo.app/foofoo_vs": {
                    "clientside.curConns": 3,
                    "availabilityState": "offline"
                }
            }
        }));

        let (records, warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert!(warnings.is_empty());
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.metric_name, "virtualServers.clientside.curConns");
        assert_eq!(record.tags.get("tenant"), Some("Common"));
        assert_eq!(record.tags.get("application"), Some("foofoo.app"));
        assert_eq!(record.tags.get("name"), Some("/Common/foofoo.app/foofoo_vs"));
        assert_eq!(record.tags.get("availabilityState"), Some("offline"));
    }

    #[test]
    fn test_dotted_group_fields_match_schema() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        // Nested object form of the same dotted path
        let snapshot = doc(json!({
            "virtualServers": {
                "/Common/vs1": {
                    "clientside": {"bitsIn": 100, "bitsOut": 200}
                }
            }
        }));

        let (records, warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert!(warnings.is_empty());
        let names: Vec<&str> = records.iter().map(|r| r.metric_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "virtualServers.clientside.bitsIn",
                "virtualServers.clientside.bitsOut"
            ]
        );
        assert_eq!(records[0].value, Some(RecordValue::Counter(100.0)));
    }

    #[test]
    fn test_member_inheritance() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({
            "pools": {
                "/Common/app.app/app_pool": {
                    "activeMemberCnt": 2,
                    "availabilityState": "available",
                    "members": {
                        "/Common/10.0.3.5:80": {
                            "serverside.curConns": 1,
                            "monitorStatus": "up"
                        }
                    }
                }
            }
        }));

        let (records, warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert!(warnings.is_empty());

        let member = records
            .iter()
            .find(|r| r.metric_name == "pools.members.serverside.curConns")
            .unwrap();
        assert_eq!(member.entity_type, "pools");
        assert_eq!(member.tags.get("poolName"), Some("/Common/app.app/app_pool"));
        assert_eq!(member.tags.get("name"), Some("/Common/10.0.3.5:80"));
        assert_eq!(member.tags.get("monitorStatus"), Some("up"));
        // The pool's own tags do not flow down
        assert!(member.tags.get("availabilityState").is_none());

        let pool = records
            .iter()
            .find(|r| r.metric_name == "pools.activeMemberCnt")
            .unwrap();
        assert_eq!(pool.tags.get("availabilityState"), Some("available"));
        assert!(pool.tags.get("poolName").is_none());
    }

    #[test]
    fn test_boolean_fields_become_tags_not_metrics() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({
            "system": {"cpu": 2, "configSyncSucceeded": true}
        }));

        let (records, warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert!(warnings.is_empty());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tags.get("configSyncSucceeded"), Some("true"));
    }

    #[test]
    fn test_unknown_category_passes_through() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({"newFeatureXYZ": {"foo": "bar"}}));

        let (records, warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert!(warnings.is_empty());
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.entity_type, "newFeatureXYZ");
        assert!(record.value.is_none());
        assert_eq!(record.tags.get("foo"), Some("bar"));
    }

    #[test]
    fn test_unknown_scalar_field_passes_through_as_tag() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({
            "system": {"cpu": 2, "brandNewCounterweight": 17}
        }));

        let (records, warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert!(warnings.is_empty());
        assert_eq!(records.len(), 1, "unknown field must not become a metric");
        assert_eq!(records[0].tags.get("brandNewCounterweight"), Some("17"));
    }

    #[test]
    fn test_type_mismatch_skips_record_and_warns() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({
            "system": {"cpu": "plenty", "memory": 41}
        }));

        let (records, warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metric_name, "system.memory");
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            CycleWarning::TypeMismatch { metric_name, .. } if metric_name == "system.cpu"
        ));
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({
            "system": {"diskStorage": {"/": {"1024-blocks": "436342", "Capacity": "55%"}}}
        }));

        let (records, warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert!(warnings.is_empty());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metric_name, "system.diskStorage.1024-blocks");
        assert_eq!(records[0].value, Some(RecordValue::Gauge(436_342.0)));
        assert_eq!(records[0].tags.get("Capacity"), Some("55%"));
        assert_eq!(records[0].tags.get("name"), Some("/"));
    }

    #[test]
    fn test_walk_is_deterministic_and_restartable() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({
            "virtualServers": {
                "/Common/b_vs": {"clientside.bitsIn": 1, "extra": "x"},
                "/Common/a_vs": {"clientside.bitsIn": 2}
            },
            "system": {"cpu": 5, "configSyncSucceeded": false}
        }));

        let (first, first_warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        let (second, second_warnings) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert_eq!(first, second);
        assert_eq!(first_warnings, second_warnings);

        // Tag rendering is part of the determinism contract
        let first_tags: Vec<Vec<String>> = first.iter().map(|r| r.tags.to_strings()).collect();
        let second_tags: Vec<Vec<String>> = second.iter().map(|r| r.tags.to_strings()).collect();
        assert_eq!(first_tags, second_tags);
    }

    #[test]
    fn test_partial_consumption_needs_no_cleanup() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({
            "system": {"cpu": 1, "memory": 2, "swap": 3}
        }));

        let mut iter = walk(&snapshot, &catalog, &ctx);
        assert!(iter.next().is_some());
        drop(iter);

        let (records, _) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_tag_uniqueness() {
        let catalog = SchemaCatalog::appliance();
        let ctx = context();
        let snapshot = doc(json!({
            "system": {
                "cpu": 1,
                "hostname": "raw.example.com",
                "host": "also-raw"
            }
        }));

        let (records, _) = walk(&snapshot, &catalog, &ctx).collect_cycle();
        for record in &records {
            let mut keys: Vec<&str> = record.tags.iter().map(|(k, _)| k).collect();
            let total = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), total);
        }
        // Context wins over the raw field that collides with its key
        assert_eq!(records[0].tags.get("host"), Some("telemetry.bigip.com"));
        assert_eq!(records[0].tags.get("hostname"), Some("raw.example.com"));
    }
}
