//! Resource catalog as offered to the wizard.
//!
//! The backend catalog is loaded once per session. Until it arrives, and
//! whenever it fails, the built-in tables from `wire::catalog` are used so
//! the wizard is never blocked on the resource endpoints.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use wire::WizardResources;
use wire::catalog::Catalog;

const FALLBACK_NOTICE: &str = "Some resources are unavailable; using built-in defaults";

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogState {
    pub catalog: Catalog,
    pub loading: bool,
    pub loaded: bool,
    pub notice: Option<String>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self { catalog: Catalog::resolve(None), loading: false, loaded: false, notice: None }
    }
}

impl CatalogState {
    /// Mark a load as in flight. Returns `false` when one already ran or is
    /// running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading || self.loaded {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn loaded(&mut self, resources: &WizardResources) {
        self.catalog = Catalog::resolve(Some(resources));
        self.loading = false;
        self.loaded = true;
        self.notice = self.catalog.used_fallback.then(|| FALLBACK_NOTICE.to_owned());
    }

    pub fn load_failed(&mut self, error: &str) {
        self.catalog = Catalog::resolve(None);
        self.loading = false;
        self.loaded = true;
        self.notice = Some(format!("Resource catalog unavailable ({error}); using built-in defaults"));
    }
}
