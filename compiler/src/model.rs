use crate::names::canonicalize;
use crate::types::{Declaration, ProtoModel, Service};

/// Folds the ordered declaration sequence into a `ProtoModel`.
///
/// The first package declaration wins; later ones are ignored. Services are
/// appended in declaration order, carrying the raw identifier as `wire_name`
/// and its canonicalized form as `display_name`. Message and enum
/// declarations pass through without altering the model. Total over any
/// declaration sequence; construction cannot fail.
pub fn build_model(declarations: &[Declaration]) -> ProtoModel {
    let mut model = ProtoModel {
        package:  None,
        services: Vec::new(),
    };

    for declaration in declarations {
        match declaration {
            Declaration::Package(name) => {
                if model.package.is_none() {
                    model.package = Some(name.clone());
                }
            }
            Declaration::Service { name, rpcs } => {
                model.services.push(Service {
                    display_name: canonicalize(name),
                    wire_name:    name.clone(),
                    rpcs:         rpcs.clone(),
                });
            }
            Declaration::Message(_) | Declaration::Enum(_) => {}
        }
    }

    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RpcEntry;

    fn service(name: &str) -> Declaration {
        Declaration::Service {
            name: name.to_string(),
            rpcs: vec![RpcEntry {
                method_name:       "Call".into(),
                request_type:      "Req".into(),
                response_type:     "Resp".into(),
                request_streamed:  false,
                response_streamed: false,
            }],
        }
    }

    #[test]
    fn test_service_order_preserved() {
        let decls = vec![
            service("zeta"),
            Declaration::Message("Req".into()),
            service("alpha"),
            service("mid_point"),
        ];
        let model = build_model(&decls);
        assert_eq!(model.services.len(), 3);
        assert_eq!(model.services[0].wire_name, "zeta");
        assert_eq!(model.services[1].wire_name, "alpha");
        assert_eq!(model.services[2].wire_name, "mid_point");
        assert_eq!(model.services[2].display_name, "MidPoint");
    }

    #[test]
    fn test_empty_sequence_builds_empty_model() {
        let model = build_model(&[]);
        assert!(model.package.is_none());
        assert!(model.services.is_empty());
    }

    #[test]
    fn test_first_package_wins() {
        let decls = vec![
            Declaration::Package("first.pkg".into()),
            Declaration::Package("second.pkg".into()),
        ];
        let model = build_model(&decls);
        assert_eq!(model.package.as_deref(), Some("first.pkg"));
    }

    #[test]
    fn test_messages_do_not_alter_model() {
        let decls = vec![
            Declaration::Message("Point".into()),
            Declaration::Enum("Kind".into()),
        ];
        let model = build_model(&decls);
        assert!(model.package.is_none());
        assert!(model.services.is_empty());
    }

    #[test]
    fn test_wire_name_is_untransformed() {
        let model = build_model(&[service("route_guide")]);
        assert_eq!(model.services[0].wire_name, "route_guide");
        assert_eq!(model.services[0].display_name, "RouteGuide");
    }
}
