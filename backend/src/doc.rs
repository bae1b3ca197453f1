//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every marketplace endpoint under `/api/v1`, the
//! health probes, and schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//! [`RequestStatusSchema`]) that document domain types without coupling them
//! to utoipa.
//!
//! The document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, RequestStatusSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SkillX marketplace API",
        description = "Gigs, skill exchanges, request lifecycles, profiles and dashboard totals.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::gigs::create_gig,
        crate::inbound::http::gigs::list_gigs,
        crate::inbound::http::gigs::get_gig,
        crate::inbound::http::gigs::delete_gig,
        crate::inbound::http::skill_exchange::create_skill_exchange,
        crate::inbound::http::skill_exchange::list_skill_exchanges,
        crate::inbound::http::exchange_requests::create_exchange_request,
        crate::inbound::http::exchange_requests::list_exchange_requests,
        crate::inbound::http::exchange_requests::update_exchange_request,
        crate::inbound::http::gig_applications::create_gig_application,
        crate::inbound::http::gig_applications::list_gig_applications,
        crate::inbound::http::gig_applications::update_gig_application,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::upsert_profile,
        crate::inbound::http::dashboard::get_dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema, RequestStatusSchema)),
    tags(
        (name = "gigs", description = "Posted gigs"),
        (name = "skill-exchange", description = "Skill swap listings"),
        (name = "exchange-requests", description = "Requests to swap skills and their decisions"),
        (name = "gig-applications", description = "Applications to gigs and their decisions"),
        (name = "profiles", description = "User profiles and counters"),
        (name = "dashboard", description = "Marketplace totals"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("code")]
    #[case("message")]
    #[case("traceId")]
    #[case("details")]
    fn error_schema_uses_camel_case_fields(#[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");
        assert!(object_has_field(error_schema, field), "missing {field}");
    }

    #[rstest]
    #[case("/api/v1/gigs")]
    #[case("/api/v1/gigs/{id}")]
    #[case("/api/v1/skill-exchange")]
    #[case("/api/v1/exchange-requests")]
    #[case("/api/v1/exchange-requests/{id}")]
    #[case("/api/v1/gig-applications")]
    #[case("/api/v1/gig-applications/{id}")]
    #[case("/api/v1/profile")]
    #[case("/api/v1/profile/{email}")]
    #[case("/api/v1/dashboard")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn gig_payload_documents_type_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let gig = schemas.get("CreateGigRequest").expect("CreateGigRequest schema");
        assert!(object_has_field(gig, "type"));
        assert!(object_has_field(gig, "postedBy"));
    }
}
