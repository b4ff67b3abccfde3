//! The built-in legitimacy rules, in the order [`super::DEFAULT_RULES`]
//! evaluates them.

use super::{FieldChange, LegitimacyRule};
use crate::model::keys;
use crate::model::{is_truthy, value_label, ProtocolType};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const UDP443_SUFFIX: &str = "-udp443";

/// VMess `ws-opts`: `headers: {}` on the before side and no `headers` on the
/// after side, with everything else identical.
///
/// Scoped strictly: if any other `ws-opts` key differs the rule does not
/// apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWsHeaders;

fn without_headers(opts: &Map<String, Value>) -> Map<String, Value> {
    let mut stripped = opts.clone();
    stripped.remove(keys::HEADERS);
    stripped
}

impl LegitimacyRule for EmptyWsHeaders {
    fn name(&self) -> &'static str {
        "empty_ws_headers"
    }

    fn judge(&self, change: &FieldChange<'_>) -> Option<String> {
        if change.field != keys::WS_OPTS || *change.protocol != ProtocolType::Vmess {
            return None;
        }
        let (Value::Object(before), Value::Object(after)) = (change.before, change.after) else {
            return None;
        };

        let before_empty = matches!(before.get(keys::HEADERS), Some(Value::Object(h)) if h.is_empty());
        let after_omitted = matches!(after.get(keys::HEADERS), None | Some(Value::Null));

        (before_empty && after_omitted && without_headers(before) == without_headers(after))
            .then(|| "ws-opts.headers: an empty map is equivalent to omitting the field".to_string())
    }
}

/// VLESS `flow`: xray's `xtls-rprx-vision-udp443` becomes mihomo's bare
/// `xtls-rprx-vision`, which already covers UDP 443.
#[derive(Debug, Clone, Copy, Default)]
pub struct VlessFlowSuffix;

impl LegitimacyRule for VlessFlowSuffix {
    fn name(&self) -> &'static str {
        "vless_flow_suffix"
    }

    fn judge(&self, change: &FieldChange<'_>) -> Option<String> {
        if change.field != keys::FLOW || *change.protocol != ProtocolType::Vless {
            return None;
        }
        let (Value::String(before), Value::String(after)) = (change.before, change.after) else {
            return None;
        };

        let stripped = before.strip_suffix(UDP443_SUFFIX)?;
        (stripped == after).then(|| {
            format!(
                "mihomo flow `{}` is equivalent to xray flow `{}`",
                after, before
            )
        })
    }
}

/// A field that was empty before conversion and filled in after it
///
/// Covers TLS fingerprints, VLESS SNI, and WebSocket `Host` header or
/// early-data additions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnhancementAddition;

impl LegitimacyRule for EnhancementAddition {
    fn name(&self) -> &'static str {
        "enhancement_addition"
    }

    fn judge(&self, change: &FieldChange<'_>) -> Option<String> {
        if is_truthy(change.before) || !is_truthy(change.after) {
            return None;
        }

        match change.field {
            keys::CLIENT_FINGERPRINT
                if matches!(
                    change.protocol,
                    ProtocolType::Vless | ProtocolType::Vmess | ProtocolType::Trojan
                ) =>
            {
                Some(format!(
                    "TLS fingerprint added after conversion: {}",
                    value_label(change.after)
                ))
            }
            keys::SERVERNAME if *change.protocol == ProtocolType::Vless => Some(format!(
                "SNI added after conversion: {}",
                value_label(change.after)
            )),
            keys::WS_OPTS => {
                let Value::Object(after) = change.after else {
                    return None;
                };
                let adds_host = matches!(
                    after.get(keys::HEADERS),
                    Some(Value::Object(headers)) if headers.contains_key(keys::HOST)
                );
                if adds_host {
                    Some("WebSocket Host header added after conversion".to_string())
                } else if after.contains_key(keys::MAX_EARLY_DATA) {
                    Some("early-data configuration added after conversion".to_string())
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// `ws-opts.path` carrying the legacy `?ed=N` query parameter, promoted to an
/// explicit `max-early-data: N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarlyDataFromPath;

static ED_PARAM: OnceLock<Regex> = OnceLock::new();

fn ed_param() -> &'static Regex {
    ED_PARAM.get_or_init(|| Regex::new(r"[?&]ed=([0-9]+)").expect("ed= pattern is valid"))
}

/// The `ed=` value of a path in canonical decimal form (no leading zeros).
///
/// Kept as text so values of any length compare exactly.
fn early_data_in_path(path: &str) -> Option<&str> {
    let digits = ed_param().captures(path)?.get(1)?.as_str();
    let trimmed = digits.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed })
}

/// Decimal form of a non-negative integral number, `None` for anything else
fn integral_decimal(value: &Value) -> Option<String> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64()?;
    if !f.is_finite() || f < 0.0 || f.fract() != 0.0 {
        return None;
    }
    Some(if f == 0.0 {
        "0".to_string()
    } else {
        format!("{:.0}", f)
    })
}

impl LegitimacyRule for EarlyDataFromPath {
    fn name(&self) -> &'static str {
        "early_data_from_path"
    }

    fn judge(&self, change: &FieldChange<'_>) -> Option<String> {
        if change.field != keys::WS_OPTS {
            return None;
        }
        let (Value::Object(before), Value::Object(after)) = (change.before, change.after) else {
            return None;
        };

        let path = match before.get(keys::PATH) {
            Some(Value::String(path)) => path.as_str(),
            _ => "",
        };
        let expected = early_data_in_path(path)?;
        let max_early_data = after.get(keys::MAX_EARLY_DATA)?;

        let matches = integral_decimal(max_early_data).is_some_and(|actual| actual == expected);
        matches.then(|| "path query ?ed=N promoted to an explicit max-early-data option".to_string())
    }
}
