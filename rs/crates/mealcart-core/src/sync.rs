//! Paint surfaces onto a UI layer.
//!
//! A [`Canvas`] is whatever the shell draws on: it reports which surfaces are
//! currently mounted and accepts a node tree per surface. Sync derives the
//! view once and paints every mounted surface from it. Unmounted surfaces are
//! skipped; a surface that rejects its update is logged and the rest are still
//! painted.

use mealcart_dom::DomNode;
use thiserror::Error;
use tracing::warn;

use crate::dom;
use crate::state::AppState;
use crate::view::store_view;

#[derive(Debug, Error)]
pub enum PaintError {
    #[error("surface '{surface}' rejected update: {reason}")]
    Rejected { surface: String, reason: String },
}

pub trait Canvas {
    fn is_mounted(&self, surface: &str) -> bool;

    fn paint(&mut self, surface: &str, node: &DomNode) -> Result<(), PaintError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub painted: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

/// Repaint every surface.
pub fn sync<C: Canvas + ?Sized>(canvas: &mut C, state: &AppState) -> SyncReport {
    paint_all(canvas, &dom::surfaces(&store_view(state)))
}

/// Repaint the named surfaces, all derived from the same view.
pub fn sync_surfaces<C: Canvas + ?Sized>(
    canvas: &mut C,
    state: &AppState,
    keys: &[&str],
) -> SyncReport {
    let nodes: Vec<DomNode> = dom::surfaces(&store_view(state))
        .into_iter()
        .filter(|node| keys.iter().any(|k| node.key.as_deref() == Some(*k)))
        .collect();
    paint_all(canvas, &nodes)
}

fn paint_all<C: Canvas + ?Sized>(canvas: &mut C, nodes: &[DomNode]) -> SyncReport {
    let mut report = SyncReport::default();
    for node in nodes {
        let Some(key) = node.key.as_deref() else {
            continue;
        };
        if !canvas.is_mounted(key) {
            report.skipped.push(key.to_string());
            continue;
        }
        match canvas.paint(key, node) {
            Ok(()) => report.painted.push(key.to_string()),
            Err(e) => {
                warn!(surface = key, error = %e, "surface paint failed");
                report.failed.push(key.to_string());
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{
        CART_COUNT, CART_LIST, CART_SUMMARY, CART_SURFACES, MENU_GRID, MOBILE_CART, SURFACES,
        TABLE_NUMBER,
    };
    use std::collections::HashMap;

    /// Records the text of every painted surface; can refuse one surface.
    #[derive(Default)]
    struct Recorder {
        mounted: Vec<&'static str>,
        broken: Option<&'static str>,
        painted: HashMap<String, String>,
    }

    impl Canvas for Recorder {
        fn is_mounted(&self, surface: &str) -> bool {
            self.mounted.iter().any(|m| *m == surface)
        }

        fn paint(&mut self, surface: &str, node: &DomNode) -> Result<(), PaintError> {
            if self.broken.is_some_and(|b| b == surface) {
                return Err(PaintError::Rejected {
                    surface: surface.to_string(),
                    reason: "detached".into(),
                });
            }
            self.painted.insert(surface.to_string(), node.text_content());
            Ok(())
        }
    }

    #[test]
    fn paints_only_mounted_surfaces() {
        let mut canvas = Recorder {
            mounted: vec![CART_COUNT, MENU_GRID],
            ..Default::default()
        };
        let report = sync(&mut canvas, &AppState::default());
        assert_eq!(report.painted, [MENU_GRID, CART_COUNT]);
        assert_eq!(report.skipped.len(), SURFACES.len() - 2);
        assert!(report.failed.is_empty());
        assert_eq!(canvas.painted[CART_COUNT], "0");
    }

    #[test]
    fn failing_surface_does_not_block_others() {
        let mut canvas = Recorder {
            mounted: vec![CART_LIST, CART_SUMMARY, CART_COUNT, MOBILE_CART],
            broken: Some(CART_SUMMARY),
            ..Default::default()
        };
        let report = sync_surfaces(&mut canvas, &AppState::default(), CART_SURFACES);
        assert_eq!(report.failed, [CART_SUMMARY]);
        assert_eq!(report.painted, [CART_LIST, CART_COUNT, MOBILE_CART]);
    }

    #[test]
    fn named_surfaces_only() {
        let mut canvas = Recorder {
            mounted: SURFACES.to_vec(),
            ..Default::default()
        };
        let report = sync_surfaces(&mut canvas, &AppState::default(), &[TABLE_NUMBER]);
        assert_eq!(report.painted, [TABLE_NUMBER]);
        assert!(report.skipped.is_empty());
        assert_eq!(canvas.painted[TABLE_NUMBER], "1");
        assert!(!canvas.painted.contains_key(MENU_GRID));
    }
}
