//! SkillX marketplace service library.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, services and
//! port traits; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the driven ports for PostgreSQL, memory and stats delivery.

pub mod doc;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
