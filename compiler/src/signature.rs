use crate::names::canonicalize;
use crate::types::RpcEntry;

/// Composes one rpc declaration line for the generated service module.
///
/// Both type references are qualified with the resolved top module and
/// canonicalized; each side is wrapped in `stream(...)` independently, so
/// unary, client-streaming, server-streaming and bidirectional methods all
/// compose correctly.
pub fn compose_signature(rpc: &RpcEntry, top_module: &str) -> String {
    let request = qualify(&rpc.request_type, rpc.request_streamed, top_module);
    let response = qualify(&rpc.response_type, rpc.response_streamed, top_module);
    format!("rpc :{}, {}, {}", rpc.method_name, request, response)
}

fn qualify(type_name: &str, streamed: bool, top_module: &str) -> String {
    let qualified = format!("{}.{}", top_module, canonicalize(type_name));
    if streamed {
        format!("stream({})", qualified)
    } else {
        qualified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc(request_streamed: bool, response_streamed: bool) -> RpcEntry {
        RpcEntry {
            method_name: "RecordRoute".into(),
            request_type: "point".into(),
            response_type: "route_summary".into(),
            request_streamed,
            response_streamed,
        }
    }

    #[test]
    fn test_unary() {
        assert_eq!(
            compose_signature(&rpc(false, false), "Routeguide"),
            "rpc :RecordRoute, Routeguide.Point, Routeguide.RouteSummary"
        );
    }

    #[test]
    fn test_request_streaming_only() {
        assert_eq!(
            compose_signature(&rpc(true, false), "Routeguide"),
            "rpc :RecordRoute, stream(Routeguide.Point), Routeguide.RouteSummary"
        );
    }

    #[test]
    fn test_response_streaming_only() {
        assert_eq!(
            compose_signature(&rpc(false, true), "Routeguide"),
            "rpc :RecordRoute, Routeguide.Point, stream(Routeguide.RouteSummary)"
        );
    }

    #[test]
    fn test_bidirectional_streaming() {
        assert_eq!(
            compose_signature(&rpc(true, true), "Routeguide"),
            "rpc :RecordRoute, stream(Routeguide.Point), stream(Routeguide.RouteSummary)"
        );
    }
}
