//! Normalizer: raw node record → canonical record.
//!
//! Pure function of its input. Every field it reads has a default, so a
//! malformed or sparse record still normalizes.

use crate::model::keys;
use crate::model::{
    is_truthy, BaseFields, CanonicalRecord, HttpFields, Hysteria2Fields, NodeRecord,
    ProtocolFields, ProtocolType, SsFields, SsrFields, TrojanFields, VlessFields, VlessSni,
    VmessFields,
};
use serde_json::{Map, Value};

/// Field value or the given default when absent. A present `null` is kept.
fn field_or(record: &NodeRecord, key: &str, default: Value) -> Value {
    record.get(key).cloned().unwrap_or(default)
}

fn text(record: &NodeRecord, key: &str) -> Value {
    field_or(record, key, Value::String(String::new()))
}

fn flag(record: &NodeRecord, key: &str) -> Value {
    field_or(record, key, Value::Bool(false))
}

fn number(record: &NodeRecord, key: &str) -> Value {
    field_or(record, key, Value::from(0))
}

/// Tri-state field: absent means "unspecified" (`null`)
fn tri_state(record: &NodeRecord, key: &str) -> Value {
    field_or(record, key, Value::Null)
}

fn field_is_truthy(record: &NodeRecord, key: &str) -> bool {
    record.get(key).map(is_truthy).unwrap_or(false)
}

/// `ws-opts` is only meaningful on the WebSocket transport
fn ws_opts(record: &NodeRecord) -> Option<Value> {
    match record.get(keys::NETWORK) {
        Some(Value::String(network)) if network == keys::NETWORK_WS => {
            Some(field_or(record, keys::WS_OPTS, Value::Object(Map::new())))
        }
        _ => None,
    }
}

fn alpn(record: &NodeRecord) -> Option<Value> {
    record.get(keys::ALPN).cloned()
}

/// Reality nodes keep SNI inside `reality-opts`; a top-level `servername`
/// migrates in only when `reality-opts` has none of its own.
fn vless_sni(record: &NodeRecord) -> VlessSni {
    match record.get(keys::REALITY_OPTS) {
        Some(Value::Object(opts)) => {
            let mut opts = opts.clone();
            if !opts.contains_key(keys::SERVERNAME) && field_is_truthy(record, keys::SERVERNAME) {
                opts.insert(
                    keys::SERVERNAME.to_string(),
                    tri_state(record, keys::SERVERNAME),
                );
            }
            VlessSni::Reality(Value::Object(opts))
        }
        // Present but not a mapping: carried through untouched
        Some(other) => VlessSni::Reality(other.clone()),
        None => VlessSni::ServerName(text(record, keys::SERVERNAME)),
    }
}

fn normalize_vless(record: &NodeRecord) -> VlessFields {
    let tls_enabled = field_is_truthy(record, keys::TLS);
    VlessFields {
        uuid: text(record, "uuid"),
        tls: flag(record, keys::TLS),
        network: text(record, keys::NETWORK),
        flow: text(record, keys::FLOW),
        client_fingerprint: text(record, keys::CLIENT_FINGERPRINT),
        skip_cert_verify: tri_state(record, "skip-cert-verify"),
        ws_opts: ws_opts(record),
        sni: tls_enabled.then(|| vless_sni(record)),
        alpn: if tls_enabled { alpn(record) } else { None },
    }
}

fn normalize_vmess(record: &NodeRecord) -> VmessFields {
    VmessFields {
        uuid: text(record, "uuid"),
        alter_id: number(record, "alterId"),
        cipher: text(record, "cipher"),
        tls: flag(record, keys::TLS),
        network: text(record, keys::NETWORK),
        skip_cert_verify: tri_state(record, "skip-cert-verify"),
        ws_opts: ws_opts(record),
        servername: field_is_truthy(record, keys::TLS).then(|| text(record, keys::SERVERNAME)),
    }
}

fn normalize_trojan(record: &NodeRecord) -> TrojanFields {
    TrojanFields {
        password: text(record, "password"),
        sni: text(record, "sni"),
        skip_cert_verify: tri_state(record, "skip-cert-verify"),
        network: text(record, keys::NETWORK),
        udp: tri_state(record, "udp"),
        ws_opts: ws_opts(record),
        alpn: alpn(record),
    }
}

/// Reduce a raw node record to its canonical form.
///
/// Always emits `name`, `type`, `server`, `port`; the remaining fields depend
/// on the protocol. Unrecognized types get the base fields only.
pub fn normalize(record: &NodeRecord) -> CanonicalRecord {
    let base = BaseFields {
        name: text(record, keys::NAME),
        node_type: text(record, keys::TYPE),
        server: text(record, keys::SERVER),
        port: number(record, keys::PORT),
    };

    let protocol = match record.protocol() {
        ProtocolType::Vless => ProtocolFields::Vless(normalize_vless(record)),
        ProtocolType::Vmess => ProtocolFields::Vmess(normalize_vmess(record)),
        ProtocolType::Trojan => ProtocolFields::Trojan(normalize_trojan(record)),
        ProtocolType::Ss => ProtocolFields::Ss(SsFields {
            cipher: text(record, "cipher"),
            password: text(record, "password"),
        }),
        ProtocolType::Ssr => ProtocolFields::Ssr(SsrFields {
            cipher: text(record, "cipher"),
            password: text(record, "password"),
            protocol: text(record, "protocol"),
            obfs: text(record, "obfs"),
            protocol_param: text(record, "protocol-param"),
            obfs_param: text(record, "obfs-param"),
        }),
        ProtocolType::Hysteria2 => ProtocolFields::Hysteria2(Hysteria2Fields {
            password: text(record, "password"),
            auth: text(record, "auth"),
            sni: text(record, "sni"),
            skip_cert_verify: tri_state(record, "skip-cert-verify"),
        }),
        ProtocolType::Http => ProtocolFields::Http(HttpFields {
            username: text(record, "username"),
            password: text(record, "password"),
            tls: flag(record, keys::TLS),
            skip_cert_verify: tri_state(record, "skip-cert-verify"),
            dialer_proxy: text(record, "dialer-proxy"),
        }),
        ProtocolType::Unknown(_) => ProtocolFields::Unknown,
    };

    CanonicalRecord { base, protocol }
}
