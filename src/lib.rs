// Module layout (Clean Architecture style)
// - bootstrap: configuration and wiring of store adapters
// - infrastructure: REST (PostgREST), Postgres and in-memory store adapters
// - presentation: HTTP handlers and routing
// - application: ports, use cases, tag reconciliation and list-view state
// - domain: client model, sorting, paging

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
