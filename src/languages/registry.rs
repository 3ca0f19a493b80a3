//! Language dispatch
//!
//! Maps a normalized [`LanguageId`] to its backend. The supported set is
//! closed; callers that start from a raw tag go through
//! [`LanguageId::parse`] and surface unsupported tags as hard errors — there
//! is no sensible default toolchain to fall back to.

use super::{
    GoLanguage, JavaScriptLanguage, LanguageBackend, LanguageId, PythonLanguage, RustLanguage,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct LanguageRegistry {
    backends: Vec<Arc<dyn LanguageBackend>>,
}

impl LanguageRegistry {
    /// Registry with all four supported languages.
    pub fn with_defaults() -> Self {
        Self {
            backends: vec![
                Arc::new(PythonLanguage),
                Arc::new(JavaScriptLanguage),
                Arc::new(GoLanguage),
                Arc::new(RustLanguage),
            ],
        }
    }

    /// Backend for a language. Every `LanguageId` has one.
    pub fn backend(&self, id: LanguageId) -> &dyn LanguageBackend {
        self.backends
            .iter()
            .find(|b| b.id() == id)
            .map(|b| b.as_ref())
            .expect("registry covers every LanguageId")
    }

    /// Indicator-file union for the provider's listing filter, or `None` for
    /// an unrecognized tag (the provider then yields an empty snapshot).
    pub fn indicator_files_for_tag(&self, tag: &str) -> Option<Vec<&'static str>> {
        LanguageId::parse(tag).map(|id| self.backend(id).indicator_files())
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
