//! Node data model
//!
//! - [`NodeRecord`] / [`NodeSet`]: raw proxy entries as loaded from a config
//! - [`ProtocolType`]: the closed set of recognized protocols
//! - [`CanonicalRecord`]: the per-protocol comparable form produced by the
//!   normalizer

pub mod canonical;
pub mod keys;
pub mod node;

pub use canonical::{
    BaseFields, CanonicalRecord, FieldMap, HttpFields, Hysteria2Fields, ProtocolFields, SsFields,
    SsrFields, TrojanFields, VlessFields, VlessSni, VmessFields,
};
pub use node::{is_truthy, value_label, NodeRecord, NodeSet, ProtocolType};
