//! Canonical (normalized) node records.
//!
//! Field values stay as raw [`Value`]s so that representation drift such as
//! `port: "443"` versus `port: 443` survives normalization and shows up in
//! the diff. `Option` fields are emitted only when `Some`.

use super::keys;
use super::node::{value_label, ProtocolType};
use serde_json::Value;
use std::collections::BTreeMap;

/// Flattened canonical record, ordered by field name
pub type FieldMap = BTreeMap<String, Value>;

/// Fields every canonical record carries
#[derive(Debug, Clone, PartialEq)]
pub struct BaseFields {
    pub name: Value,
    pub node_type: Value,
    pub server: Value,
    pub port: Value,
}

/// Where a TLS-enabled VLESS node keeps its SNI
#[derive(Debug, Clone, PartialEq)]
pub enum VlessSni {
    /// Reality node: SNI lives inside `reality-opts`
    Reality(Value),
    /// Plain TLS node: top-level `servername`
    ServerName(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VlessFields {
    pub uuid: Value,
    pub tls: Value,
    pub network: Value,
    pub flow: Value,
    pub client_fingerprint: Value,
    pub skip_cert_verify: Value,
    pub ws_opts: Option<Value>,
    pub sni: Option<VlessSni>,
    pub alpn: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VmessFields {
    pub uuid: Value,
    pub alter_id: Value,
    pub cipher: Value,
    pub tls: Value,
    pub network: Value,
    pub skip_cert_verify: Value,
    pub ws_opts: Option<Value>,
    pub servername: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrojanFields {
    pub password: Value,
    pub sni: Value,
    pub skip_cert_verify: Value,
    pub network: Value,
    pub udp: Value,
    pub ws_opts: Option<Value>,
    pub alpn: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SsFields {
    pub cipher: Value,
    pub password: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SsrFields {
    pub cipher: Value,
    pub password: Value,
    pub protocol: Value,
    pub obfs: Value,
    pub protocol_param: Value,
    pub obfs_param: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hysteria2Fields {
    pub password: Value,
    pub auth: Value,
    pub sni: Value,
    pub skip_cert_verify: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpFields {
    pub username: Value,
    pub password: Value,
    pub tls: Value,
    pub skip_cert_verify: Value,
    pub dialer_proxy: Value,
}

/// Protocol-specific part of a canonical record
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolFields {
    Vless(VlessFields),
    Vmess(VmessFields),
    Trojan(TrojanFields),
    Ss(SsFields),
    Ssr(SsrFields),
    Hysteria2(Hysteria2Fields),
    Http(HttpFields),
    /// Unrecognized type: compared on the base fields only
    Unknown,
}

/// A node reduced to the fields meaningful for its protocol
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub base: BaseFields,
    pub protocol: ProtocolFields,
}

fn put(out: &mut FieldMap, key: &str, value: &Value) {
    out.insert(key.to_string(), value.clone());
}

fn put_opt(out: &mut FieldMap, key: &str, value: &Option<Value>) {
    if let Some(value) = value {
        put(out, key, value);
    }
}

impl CanonicalRecord {
    /// Protocol of this record
    pub fn protocol_type(&self) -> ProtocolType {
        match &self.protocol {
            ProtocolFields::Vless(_) => ProtocolType::Vless,
            ProtocolFields::Vmess(_) => ProtocolType::Vmess,
            ProtocolFields::Trojan(_) => ProtocolType::Trojan,
            ProtocolFields::Ss(_) => ProtocolType::Ss,
            ProtocolFields::Ssr(_) => ProtocolType::Ssr,
            ProtocolFields::Hysteria2(_) => ProtocolType::Hysteria2,
            ProtocolFields::Http(_) => ProtocolType::Http,
            ProtocolFields::Unknown => ProtocolType::Unknown(self.type_label()),
        }
    }

    /// The `type` value as a grouping label (empty when the source had none)
    pub fn type_label(&self) -> String {
        value_label(&self.base.node_type)
    }

    /// Flatten into a field-name → value map for key-by-key comparison
    pub fn to_field_map(&self) -> FieldMap {
        let mut out = FieldMap::new();
        put(&mut out, keys::NAME, &self.base.name);
        put(&mut out, keys::TYPE, &self.base.node_type);
        put(&mut out, keys::SERVER, &self.base.server);
        put(&mut out, keys::PORT, &self.base.port);

        match &self.protocol {
            ProtocolFields::Vless(f) => {
                put(&mut out, "uuid", &f.uuid);
                put(&mut out, keys::TLS, &f.tls);
                put(&mut out, keys::NETWORK, &f.network);
                put(&mut out, keys::FLOW, &f.flow);
                put(&mut out, keys::CLIENT_FINGERPRINT, &f.client_fingerprint);
                put(&mut out, "skip-cert-verify", &f.skip_cert_verify);
                put_opt(&mut out, keys::WS_OPTS, &f.ws_opts);
                match &f.sni {
                    Some(VlessSni::Reality(opts)) => put(&mut out, keys::REALITY_OPTS, opts),
                    Some(VlessSni::ServerName(sni)) => put(&mut out, keys::SERVERNAME, sni),
                    None => {}
                }
                put_opt(&mut out, keys::ALPN, &f.alpn);
            }
            ProtocolFields::Vmess(f) => {
                put(&mut out, "uuid", &f.uuid);
                put(&mut out, "alterId", &f.alter_id);
                put(&mut out, "cipher", &f.cipher);
                put(&mut out, keys::TLS, &f.tls);
                put(&mut out, keys::NETWORK, &f.network);
                put(&mut out, "skip-cert-verify", &f.skip_cert_verify);
                put_opt(&mut out, keys::WS_OPTS, &f.ws_opts);
                put_opt(&mut out, keys::SERVERNAME, &f.servername);
            }
            ProtocolFields::Trojan(f) => {
                put(&mut out, "password", &f.password);
                put(&mut out, "sni", &f.sni);
                put(&mut out, "skip-cert-verify", &f.skip_cert_verify);
                put(&mut out, keys::NETWORK, &f.network);
                put(&mut out, "udp", &f.udp);
                put_opt(&mut out, keys::WS_OPTS, &f.ws_opts);
                put_opt(&mut out, keys::ALPN, &f.alpn);
            }
            ProtocolFields::Ss(f) => {
                put(&mut out, "cipher", &f.cipher);
                put(&mut out, "password", &f.password);
            }
            ProtocolFields::Ssr(f) => {
                put(&mut out, "cipher", &f.cipher);
                put(&mut out, "password", &f.password);
                put(&mut out, "protocol", &f.protocol);
                put(&mut out, "obfs", &f.obfs);
                put(&mut out, "protocol-param", &f.protocol_param);
                put(&mut out, "obfs-param", &f.obfs_param);
            }
            ProtocolFields::Hysteria2(f) => {
                put(&mut out, "password", &f.password);
                put(&mut out, "auth", &f.auth);
                put(&mut out, "sni", &f.sni);
                put(&mut out, "skip-cert-verify", &f.skip_cert_verify);
            }
            ProtocolFields::Http(f) => {
                put(&mut out, "username", &f.username);
                put(&mut out, "password", &f.password);
                put(&mut out, keys::TLS, &f.tls);
                put(&mut out, "skip-cert-verify", &f.skip_cert_verify);
                put(&mut out, "dialer-proxy", &f.dialer_proxy);
            }
            ProtocolFields::Unknown => {}
        }

        out
    }
}
