//! Node field names referenced by more than one module.

pub const NAME: &str = "name";
pub const TYPE: &str = "type";
pub const SERVER: &str = "server";
pub const PORT: &str = "port";
pub const NETWORK: &str = "network";
pub const TLS: &str = "tls";
pub const FLOW: &str = "flow";
pub const SERVERNAME: &str = "servername";
pub const CLIENT_FINGERPRINT: &str = "client-fingerprint";
pub const REALITY_OPTS: &str = "reality-opts";
pub const ALPN: &str = "alpn";
pub const WS_OPTS: &str = "ws-opts";

// ws-opts sub-keys
pub const HEADERS: &str = "headers";
pub const HOST: &str = "Host";
pub const PATH: &str = "path";
pub const MAX_EARLY_DATA: &str = "max-early-data";

/// `network` value selecting the WebSocket transport
pub const NETWORK_WS: &str = "ws";
