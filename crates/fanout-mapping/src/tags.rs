//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Tag composition
//!
//! Tags are assembled in five steps, later steps overwriting same-named
//! keys from earlier ones: parent-inherited tags, naming-convention-derived
//! tags, schema-declared tag fields, pass-through unknowns, and finally the
//! global context block. The ordering rule makes `host` always the device
//! hostname even when a raw field happens to carry that name.

use fanout_core::types::{GlobalContext, TagSet};

/// Tenant/application derived from a path-style entity name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathName {
    /// First path folder
    pub tenant: String,

    /// Second path folder, present only for `/Tenant/Application/Name` shapes
    pub application: Option<String>,
}

/// Parse a `/Tenant/Application.app/resourceName` style identifier.
///
/// A name that does not follow the convention yields `None`; callers fall
/// back to partial tagging rather than failing.
pub fn parse_path_name(name: &str) -> Option<PathName> {
    let rest = name.strip_prefix('/')?;
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] | [_] => None,
        [tenant, _name] => Some(PathName {
            tenant: (*tenant).to_string(),
            application: None,
        }),
        [tenant, application, ..] => Some(PathName {
            tenant: (*tenant).to_string(),
            application: Some((*application).to_string()),
        }),
    }
}

/// Compose the full tag set for one entity instance
pub fn compose(
    parent: &TagSet,
    key: Option<&str>,
    parse_key_names: bool,
    schema_tags: &[(String, String)],
    extra_tags: &[(String, String)],
    context: &GlobalContext,
) -> TagSet {
    let mut tags = parent.clone();

    if let Some(key) = key {
        if parse_key_names {
            if let Some(parsed) = parse_path_name(key) {
                tags.set("tenant", parsed.tenant);
                if let Some(application) = parsed.application {
                    tags.set("application", application);
                }
            }
        }
        tags.set("name", key);
    }

    for (field, value) in schema_tags {
        tags.set(field, value);
    }

    for (field, value) in extra_tags {
        tags.set(field, value);
    }

    // Global context last, always wins
    tags.apply(&context.context_tags());

    tags
}
