//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, polling) and
//! delegates rendering details to `components`.

pub mod home;
pub mod workspace;
