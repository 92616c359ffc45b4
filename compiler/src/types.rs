use serde::Serialize;

/// One top-level item from a `.proto` file, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Declaration {
    Package(String),
    Service { name: String, rpcs: Vec<RpcEntry> },
    Message(String),
    Enum(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcEntry {
    pub method_name:       String,
    pub request_type:      String,
    pub response_type:     String,
    pub request_streamed:  bool,
    pub response_streamed: bool,
}

/// `wire_name` is the raw declared identifier used for call routing and is
/// never transformed; `display_name` is the canonicalized form used for
/// generated module naming only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub display_name: String,
    pub wire_name:    String,
    pub rpcs:         Vec<RpcEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtoModel {
    pub package:  Option<String>,
    pub services: Vec<Service>,
}
