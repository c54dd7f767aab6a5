//! Observability - request IDs on responses, spans and error pages.

mod request_id;

pub use request_id::RequestIdMiddleware;
