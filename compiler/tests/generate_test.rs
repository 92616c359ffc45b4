#![cfg(test)]

use exstub_compiler::{
    compile_proto, generate_stub, signature::compose_signature, GenOptions, SourceRepr,
};

const ROUTE_GUIDE: &str = r#"
syntax = "proto3";

package route_guide;

import "google/protobuf/timestamp.proto";
option java_package = "io.grpc.examples.routeguide";

service RouteGuide {
  // Unary
  rpc GetFeature (Point) returns (Feature);
  // Server streaming
  rpc ListFeatures (Rectangle) returns (stream Feature);
  // Client streaming
  rpc RecordRoute (stream Point) returns (RouteSummary);
  // Bidirectional
  rpc RouteChat (stream RouteNote) returns (stream RouteNote);
}

service Health {
  rpc Check (HealthCheckRequest) returns (HealthCheckResponse);
}

message Point {
  int32 latitude = 1;
  int32 longitude = 2;
}

message Rectangle {
  Point lo = 1;
  Point hi = 2;
}

message Feature {
  string name = 1;
  Point location = 2;
}

message RouteNote {
  Point location = 1;
  string message = 2;
}

message RouteSummary {
  int32 point_count = 1;
  int32 feature_count = 2;
}

message HealthCheckRequest { string service = 1; }
message HealthCheckResponse { string status = 1; }
"#;

#[test]
fn test_compile_route_guide() {
    let model = compile_proto(ROUTE_GUIDE).expect("compile_proto failed");

    assert_eq!(model.package.as_deref(), Some("route_guide"));

    // One service per declaration, in order of first appearance
    assert_eq!(model.services.len(), 2);

    let guide = &model.services[0];
    assert_eq!(guide.wire_name, "RouteGuide");
    assert_eq!(guide.display_name, "RouteGuide");
    assert_eq!(guide.rpcs.len(), 4);

    assert_eq!(guide.rpcs[0].method_name, "GetFeature");
    assert!(!guide.rpcs[0].request_streamed);
    assert!(!guide.rpcs[0].response_streamed);

    assert_eq!(guide.rpcs[1].method_name, "ListFeatures");
    assert!(!guide.rpcs[1].request_streamed);
    assert!(guide.rpcs[1].response_streamed);

    assert_eq!(guide.rpcs[2].method_name, "RecordRoute");
    assert!(guide.rpcs[2].request_streamed);
    assert!(!guide.rpcs[2].response_streamed);

    assert_eq!(guide.rpcs[3].method_name, "RouteChat");
    assert!(guide.rpcs[3].request_streamed);
    assert!(guide.rpcs[3].response_streamed);

    let health = &model.services[1];
    assert_eq!(health.wire_name, "Health");
    assert_eq!(health.rpcs.len(), 1);
    assert_eq!(health.rpcs[0].request_type, "HealthCheckRequest");
    assert_eq!(health.rpcs[0].response_type, "HealthCheckResponse");
}

#[test]
fn test_generate_route_guide_stub() {
    let model = compile_proto(ROUTE_GUIDE).expect("compile_proto failed");
    let out = generate_stub(
        &model,
        &GenOptions::default(),
        &SourceRepr::Embedded(ROUTE_GUIDE.to_string()),
        "route_guide",
    );

    // The declared package wins over the file base name, canonicalized
    assert!(out.contains("defmodule RouteGuide.RouteGuide.Service do"));
    assert!(out.contains("defmodule RouteGuide.Health.Service do"));

    // Route names carry the raw package-qualified wire name
    assert!(out.contains("use GRPC.Service, name: \"route_guide.RouteGuide\""));
    assert!(out.contains("use GRPC.Service, name: \"route_guide.Health\""));

    // The full streaming matrix, rendered through the composer
    assert!(out.contains("rpc :GetFeature, RouteGuide.Point, RouteGuide.Feature"));
    assert!(out.contains("rpc :ListFeatures, RouteGuide.Rectangle, stream(RouteGuide.Feature)"));
    assert!(out.contains("rpc :RecordRoute, stream(RouteGuide.Point), RouteGuide.RouteSummary"));
    assert!(out.contains("rpc :RouteChat, stream(RouteGuide.RouteNote), stream(RouteGuide.RouteNote)"));

    // One stub module per service
    assert!(out.contains("use GRPC.Stub, service: RouteGuide.RouteGuide.Service"));
    assert!(out.contains("use GRPC.Stub, service: RouteGuide.Health.Service"));

    // Embedded mode carries the proto text
    assert!(out.contains("defmodule RouteGuide.Proto do"));
    assert!(out.contains("  package route_guide;"));
}

#[test]
fn test_compose_signature_matches_rendered_line() {
    let model = compile_proto(ROUTE_GUIDE).expect("compile_proto failed");
    let rendered = generate_stub(
        &model,
        &GenOptions::default(),
        &SourceRepr::Embedded(String::new()),
        "route_guide",
    );
    for service in &model.services {
        for rpc in &service.rpcs {
            let line = compose_signature(rpc, "RouteGuide");
            assert!(
                rendered.contains(&line),
                "rendered output is missing {:?}",
                line
            );
        }
    }
}

#[test]
fn test_merged_inputs_first_package_wins() {
    let first = "package alpha; service A { rpc Go (Req) returns (Resp); }";
    let second = "package beta; service B { rpc Go (Req) returns (Resp); }";

    let mut declarations = exstub_compiler::parse_proto(first).unwrap();
    declarations.extend(exstub_compiler::parse_proto(second).unwrap());
    let model = exstub_compiler::build_model(&declarations);

    assert_eq!(model.package.as_deref(), Some("alpha"));
    assert_eq!(model.services.len(), 2);
    assert_eq!(model.services[0].wire_name, "A");
    assert_eq!(model.services[1].wire_name, "B");
}

#[test]
fn test_empty_proto_generates_header_only() {
    let model = compile_proto("syntax = \"proto3\";").expect("compile_proto failed");
    assert!(model.services.is_empty());

    let out = generate_stub(
        &model,
        &GenOptions::default(),
        &SourceRepr::Referenced(vec![]),
        "empty",
    );
    assert!(out.starts_with("# Generated by exstub from empty.proto."));
    assert!(!out.contains("defmodule"));
}
