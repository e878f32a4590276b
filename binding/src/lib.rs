//! SDK-independent core of the declarative MapKit JS bindings.
//!
//! Components in the `client` crate describe a map and its annotations and
//! overlays as plain props. This crate turns those props into calls against a
//! [`sdk::MapSdk`]: it decides when an SDK object must exist, which of its
//! properties need writing, which listeners must be attached, and which
//! callout containers the SDK may ask for. It never touches the DOM or the
//! SDK itself, so all of it runs under plain `cargo test`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`sdk`] | The [`sdk::MapSdk`] capability trait and the values it carries |
//! | [`binder`] | One live handle per context and identity |
//! | [`sync`] | Props → property writes, diffed per entry |
//! | [`events`] | Native listener → typed user callback |
//! | [`project`] | Callout slots and the callout delegate |
//! | [`loader`] | Memoized, never-regressing SDK load |
//! | [`map`] | Map props, callbacks and controller |
//! | [`annotation`] | Annotation and marker props, callbacks and controller |
//! | [`overlay`] | Polyline and polygon props and controller |
//! | [`convert`] | Finite enum ↔ SDK constant tables |
//! | [`geo`] | Coordinates, regions, padding and other plain values |
//! | [`error`] | Configuration, SDK and load errors |
//! | [`consts`] | Defaults and status codes |

pub mod annotation;
pub mod binder;
pub mod consts;
pub mod convert;
pub mod error;
pub mod events;
pub mod geo;
pub mod loader;
pub mod map;
pub mod overlay;
pub mod project;
pub mod sdk;
pub mod sync;

#[cfg(test)]
mod fake_sdk;
