use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use mealcart_core::sync::{Canvas, PaintError};
use mealcart_dom::DomNode;

use crate::render_to_html;

/// Surfaces rendered to HTML, keyed by surface name. The browser swaps each
/// entry into the element carrying the matching `data-key`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SurfacePatch {
    pub surfaces: BTreeMap<String, String>,
}

/// Canvas that paints into HTML fragments.
///
/// With no mounted list every surface counts as mounted; otherwise only the
/// named ones do, mirroring a page that lacks some surfaces.
#[derive(Debug, Default)]
pub struct HtmlCanvas {
    mounted: Option<HashSet<String>>,
    patch: SurfacePatch,
}

impl HtmlCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mounted<I, S>(surfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mounted: Some(surfaces.into_iter().map(Into::into).collect()),
            patch: SurfacePatch::default(),
        }
    }

    pub fn into_patch(self) -> SurfacePatch {
        self.patch
    }
}

impl Canvas for HtmlCanvas {
    fn is_mounted(&self, surface: &str) -> bool {
        self.mounted.as_ref().map_or(true, |m| m.contains(surface))
    }

    fn paint(&mut self, surface: &str, node: &DomNode) -> Result<(), PaintError> {
        if node.key.as_deref() != Some(surface) {
            return Err(PaintError::Rejected {
                surface: surface.to_string(),
                reason: format!("node carries key {:?}", node.key),
            });
        }
        self.patch
            .surfaces
            .insert(surface.to_string(), render_to_html(node));
        Ok(())
    }
}
