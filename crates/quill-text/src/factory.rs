//! Element-factory dispatch for widget-backed elements.

use quill_dom::{DomTree, ElementCategory};

use crate::component::FormattedText;
use crate::config::FormattedTextConfig;
use crate::link::LinkBridge;
use crate::surface::RenderingSurface;

/// Element name the document builder uses for formatted-text runs.
pub const TEXT_COMPONENT_NAME: &str = "text-component";

/// Create the participant for a widget-backed element named `name`.
///
/// Only [`TEXT_COMPONENT_NAME`] is handled here; it yields a new
/// formatted-text node and its bridge. Markup elements and other widget
/// names (form controls, generic containers) return `None` and are left to
/// other factories. `make_surface` is only called when a bridge is created.
pub fn create_component<S, F>(
    dom: &mut DomTree,
    category: ElementCategory,
    name: &str,
    make_surface: F,
    links: LinkBridge,
    config: FormattedTextConfig,
) -> Option<FormattedText<S>>
where
    S: RenderingSurface,
    F: FnOnce() -> S,
{
    match (category, name) {
        (ElementCategory::Component, TEXT_COMPONENT_NAME) => {
            Some(FormattedText::create(dom, make_surface(), links, config))
        }
        _ => None,
    }
}
