//! HTTP handler modules, grouped by API surface.

pub mod appearance;
pub mod events;
pub mod host;
pub mod session;
