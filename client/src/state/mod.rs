//! Client application state modules.
//!
//! DESIGN
//! ======
//! Each module is a plain struct provided as `RwSignal<T>` context by `app`.
//! Domain rules stay in `wire`/`preview`; these structs hold what the views
//! need on top of them (busy flags, notices, errors).

pub mod catalog;
pub mod generation;
pub mod wizard;
pub mod workspace;
