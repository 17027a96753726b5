//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Appliance schema tables
//!
//! Field-to-kind assignments for every known entity category, versioned
//! with the appliance's data model. The boundary between metric and tag is
//! owned here, field by field; the walker never guesses. Fields not listed
//! pass through as tags at runtime.

use super::EntitySchema;

/// All schemas of the appliance data model
pub fn appliance_schemas() -> Vec<EntitySchema> {
    let mut schemas = vec![
        system_schema(),
        disk_storage_schema(),
        disk_latency_schema(),
        network_interfaces_schema(),
        virtual_servers_schema(),
        pools_schema(),
        pool_members_schema(),
        http_profiles_schema(),
        ssl_profile_schema("clientSslProfiles"),
        ssl_profile_schema("serverSslProfiles"),
        ssl_certs_schema(),
        network_tunnels_schema(),
        device_groups_schema(),
        irules_schema(),
        irule_events_schema(),
        ltm_policies_schema(),
        ltm_policy_actions_schema(),
        telemetry_service_info_schema(),
    ];

    for record_type in ["a", "aaaa", "cname", "mx", "naptr", "srv"] {
        schemas.push(wide_ip_schema(&format!("{}WideIps", record_type)));
        let pool_id = format!("{}Pools", record_type);
        schemas.push(gslb_pool_schema(&pool_id));
        schemas.push(gslb_pool_members_schema(&format!("{}.members", pool_id)));
    }

    schemas
}

fn system_schema() -> EntitySchema {
    EntitySchema::singleton("system")
        .with_gauges(&[
            "cpu",
            "cpuCount",
            "memory",
            "swap",
            "tmmCpu",
            "tmmMemory",
        ])
        .with_counters(&[
            "tmmTraffic.clientSideTraffic.bitsIn",
            "tmmTraffic.clientSideTraffic.bitsOut",
            "tmmTraffic.serverSideTraffic.bitsIn",
            "tmmTraffic.serverSideTraffic.bitsOut",
        ])
        .with_tags(&[
            "hostname",
            "machineId",
            "version",
            "versionBuild",
            "location",
            "description",
            "marketingName",
            "platformId",
            "chassisId",
            "baseMac",
            "callBackUrl",
            "configReady",
            "licenseReady",
            "provisionReady",
            "syncColor",
            "syncMode",
            "syncStatus",
            "syncSummary",
            "failoverColor",
            "failoverStatus",
            "systemTimestamp",
            "ltmConfigTime",
            "gtmConfigTime",
            "asmState",
            "lastAsmChange",
            "apmState",
            "afmState",
            "lastAfmDeploy",
        ])
        .with_bools(&["configSyncSucceeded"])
        .with_collection("diskStorage", "system.diskStorage", None)
        .with_collection("diskLatency", "system.diskLatency", None)
        .with_collection("networkInterfaces", "system.networkInterfaces", None)
}

fn disk_storage_schema() -> EntitySchema {
    EntitySchema::collection("system.diskStorage")
        .with_gauges(&["1024-blocks", "Capacity_Float"])
        .with_tags(&["Capacity", "name"])
}

fn disk_latency_schema() -> EntitySchema {
    EntitySchema::collection("system.diskLatency")
        .with_gauges(&["r/s", "w/s", "%util"])
        .with_tags(&["name"])
}

fn network_interfaces_schema() -> EntitySchema {
    EntitySchema::collection("system.networkInterfaces")
        .with_counters(&["counters.bitsIn", "counters.bitsOut"])
        .with_tags(&["status"])
}

fn virtual_servers_schema() -> EntitySchema {
    EntitySchema::collection("virtualServers")
        .with_path_names()
        .with_counters(&[
            "clientside.bitsIn",
            "clientside.bitsOut",
            "clientside.pktsIn",
            "clientside.pktsOut",
            "clientside.totConns",
        ])
        .with_gauges(&["clientside.curConns", "clientside.maxConns"])
        .with_tags(&[
            "destination",
            "availabilityState",
            "enabledState",
            "name",
            "ipProtocol",
            "mask",
            "pool",
            "appService",
            "status.statusReason",
        ])
        .with_bools(&["isAvailable", "isEnabled"])
}

fn pools_schema() -> EntitySchema {
    EntitySchema::collection("pools")
        .with_path_names()
        .with_gauges(&["activeMemberCnt", "curPriogrp", "serverside.curConns", "serverside.maxConns"])
        .with_counters(&[
            "serverside.bitsIn",
            "serverside.bitsOut",
            "serverside.pktsIn",
            "serverside.pktsOut",
            "serverside.totConns",
        ])
        .with_tags(&[
            "availabilityState",
            "enabledState",
            "name",
            "status.statusReason",
        ])
        .with_collection("members", "pools.members", Some("poolName"))
}

fn pool_members_schema() -> EntitySchema {
    EntitySchema::collection("pools.members")
        .with_gauges(&["port", "serverside.curConns", "serverside.maxConns"])
        .with_counters(&[
            "serverside.bitsIn",
            "serverside.bitsOut",
            "serverside.pktsIn",
            "serverside.pktsOut",
            "serverside.totConns",
        ])
        .with_tags(&[
            "addr",
            "availabilityState",
            "enabledState",
            "monitorStatus",
            "poolName",
            "status.statusReason",
        ])
}

fn http_profiles_schema() -> EntitySchema {
    EntitySchema::collection("httpProfiles")
        .with_path_names()
        .with_counters(&[
            "cookiePersistInserts",
            "getReqs",
            "numberReqs",
            "postReqs",
            "2xxResp",
            "3xxResp",
            "4xxResp",
            "5xxResp",
            "respLessThan2m",
            "respGreaterThan2m",
            "v10Reqs",
            "v10Resp",
            "v11Reqs",
            "v11Resp",
            "v9Reqs",
            "v9Resp",
        ])
        .with_gauges(&["maxKeepaliveReq"])
        .with_tags(&["name"])
}

fn ssl_profile_schema(id: &str) -> EntitySchema {
    EntitySchema::collection(id)
        .with_path_names()
        .with_counters(&[
            "activeHandshakeRejected",
            "cipherUses.adhKeyxchg",
            "cipherUses.aesBulk",
            "cipherUses.aesGcmBulk",
            "cipherUses.camelliaBulk",
            "cipherUses.chacha20Poly1305Bulk",
            "cipherUses.desBulk",
            "cipherUses.dhRsaKeyxchg",
            "cipherUses.dheDssKeyxchg",
            "cipherUses.ecdhEcdsaKeyxchg",
            "cipherUses.ecdhRsaKeyxchg",
            "cipherUses.ecdheEcdsaKeyxchg",
            "cipherUses.ecdheRsaKeyxchg",
            "cipherUses.edhRsaKeyxchg",
            "cipherUses.ideaBulk",
            "cipherUses.md5Digest",
            "cipherUses.nullBulk",
            "cipherUses.nullDigest",
            "cipherUses.rc2Bulk",
            "cipherUses.rc4Bulk",
            "cipherUses.rsaKeyxchg",
            "cipherUses.shaDigest",
            "decryptedBytesIn",
            "decryptedBytesOut",
            "encryptedBytesIn",
            "encryptedBytesOut",
            "fatalAlerts",
            "handshakeFailures",
            "peercertInvalid",
            "peercertNone",
            "peercertValid",
            "protocolUses.dtlsv1",
            "protocolUses.sslv2",
            "protocolUses.sslv3",
            "protocolUses.tlsv1",
            "protocolUses.tlsv1_1",
            "protocolUses.tlsv1_2",
            "protocolUses.tlsv1_3",
            "recordsIn",
            "recordsOut",
            "sniRejects",
            "totCompatConns",
            "totNativeConns",
        ])
        .with_gauges(&[
            "currentActiveHandshakes",
            "currentCompatibleConnections",
            "currentConnections",
            "currentNativeConnections",
        ])
        .with_tags(&["name"])
}

fn ssl_certs_schema() -> EntitySchema {
    EntitySchema::collection("sslCerts")
        .with_gauges(&["expirationDate"])
        .with_tags(&["expirationString", "issuer", "subject", "name"])
}

fn network_tunnels_schema() -> EntitySchema {
    EntitySchema::collection("networkTunnels")
        .with_path_names()
        .with_counters(&[
            "hcInBroadcastPkts",
            "hcInMulticastPkts",
            "hcInOctets",
            "hcInUcastPkts",
            "hcOutBroadcastPkts",
            "hcOutMulticastPkts",
            "hcOutOctets",
            "hcOutUcastPkts",
            "inDiscards",
            "inErrors",
            "inUnknownProtos",
            "outDiscards",
            "outErrors",
        ])
}

fn device_groups_schema() -> EntitySchema {
    EntitySchema::collection("deviceGroups")
        .with_path_names()
        .with_tags(&["commitIdTime", "lssTime", "timeSinceLastSync", "type"])
}

fn irules_schema() -> EntitySchema {
    EntitySchema::collection("iRules")
        .with_path_names()
        .with_collection("events", "iRules.events", Some("ruleName"))
}

fn irule_events_schema() -> EntitySchema {
    EntitySchema::collection("iRules.events")
        .with_counters(&["aborts", "failures", "totalExecutions"])
        .with_gauges(&["avgCycles", "maxCycles", "minCycles", "priority"])
}

fn ltm_policies_schema() -> EntitySchema {
    EntitySchema::collection("ltmPolicies")
        .with_path_names()
        .with_counters(&["invoked", "succeeded"])
        .with_tags(&["status.statusReason"])
        .with_collection("actions", "ltmPolicies.actions", Some("policyName"))
}

fn ltm_policy_actions_schema() -> EntitySchema {
    EntitySchema::collection("ltmPolicies.actions").with_counters(&["invoked", "succeeded"])
}

fn wide_ip_schema(id: &str) -> EntitySchema {
    EntitySchema::collection(id)
        .with_path_names()
        .with_counters(&[
            "alternate",
            "cnameResolutions",
            "dropped",
            "fallback",
            "persisted",
            "preferred",
            "rcode",
            "requests",
            "resolutions",
            "returnFromDns",
            "returnToDns",
        ])
        .with_gauges(&[
            "failureRcodeTtl",
            "persistCidrIpv4",
            "persistCidrIpv6",
            "ttlPersistence",
        ])
        .with_tags(&[
            "availabilityState",
            "enabledState",
            "status.statusReason",
            "wipType",
            "lastResortPool",
            "persistence",
            "poolLbMode",
            "failureRcode",
            "failureRcodeResponse",
            "minimalResponse",
            "name",
        ])
        .with_bools(&["enabled"])
}

fn gslb_pool_schema(id: &str) -> EntitySchema {
    EntitySchema::collection(id)
        .with_path_names()
        .with_counters(&[
            "alternate",
            "dropped",
            "fallback",
            "preferred",
            "returnFromDns",
            "returnToDns",
        ])
        .with_gauges(&[
            "limitMaxBps",
            "limitMaxConnections",
            "limitMaxPps",
            "maxAnswersReturned",
            "qosHitRatio",
            "qosHops",
            "qosKilobytesSecond",
            "qosLcs",
            "qosPacketRate",
            "qosRtt",
            "qosTopology",
            "qosVsCapacity",
            "qosVsScore",
            "ttl",
        ])
        .with_tags(&[
            "availabilityState",
            "enabledState",
            "status.statusReason",
            "alternateMode",
            "dynamicRatio",
            "fallbackIp",
            "fallbackMode",
            "loadBalancingMode",
            "manualResume",
            "monitor",
            "verifyMemberAvailability",
            "name",
        ])
        .with_bools(&["enabled"])
        .with_collection("members", &format!("{}.members", id), Some("poolName"))
}

fn gslb_pool_members_schema(id: &str) -> EntitySchema {
    EntitySchema::collection(id)
        .with_counters(&["alternate", "fallback", "preferred"])
        .with_gauges(&["memberOrder", "ratio"])
        .with_tags(&[
            "availabilityState",
            "enabledState",
            "monitorStatus",
            "poolName",
            "serverName",
            "vsName",
            "name",
            "status.statusReason",
        ])
        .with_bools(&["enabled"])
}

fn telemetry_service_info_schema() -> EntitySchema {
    EntitySchema::singleton("telemetryServiceInfo")
        .with_gauges(&["pollingInterval"])
        .with_texts(&["cycleStart", "cycleEnd"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldKind;

    #[test]
    fn test_schema_ids_are_unique() {
        let schemas = appliance_schemas();
        let mut ids: Vec<&str> = schemas.iter().map(|s| s.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_boolean_fields_never_metrics() {
        let system = system_schema();
        let kind = system.field_kind("configSyncSucceeded").unwrap();
        assert_eq!(kind, FieldKind::Bool);
        assert!(!kind.is_metric());
    }

    #[test]
    fn test_ssl_profiles_share_one_shape() {
        let client = ssl_profile_schema("clientSslProfiles");
        let server = ssl_profile_schema("serverSslProfiles");
        assert_eq!(client.field_count(), server.field_count());
        assert_eq!(
            client.field_kind("cipherUses.aesGcmBulk"),
            Some(FieldKind::Counter)
        );
        assert_eq!(
            server.field_kind("currentConnections"),
            Some(FieldKind::Gauge)
        );
    }

    #[test]
    fn test_gslb_members_linked_per_record_type() {
        let schemas = appliance_schemas();
        let naptr = schemas.iter().find(|s| s.id == "naptrPools").unwrap();
        let rule = naptr.collection_rule("members").unwrap();
        assert_eq!(rule.schema, "naptrPools.members");
        assert_eq!(rule.inherit_key_as.as_deref(), Some("poolName"));
        assert!(schemas.iter().any(|s| s.id == "naptrPools.members"));
    }

    #[test]
    fn test_service_info_text_fields() {
        let info = telemetry_service_info_schema();
        assert_eq!(info.field_kind("cycleStart"), Some(FieldKind::Text));
        assert!(info.field_kind("cycleStart").unwrap().is_metric());
        assert_eq!(info.field_kind("pollingInterval"), Some(FieldKind::Gauge));
    }
}
