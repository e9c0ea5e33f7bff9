use thiserror::Error;
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, Window};

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const REDUCED_MOTION_CLASS: &str = "reduced-motion";

#[derive(Debug, Error)]
pub enum ViewportError {
    #[error("no window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("failed to {action}: {message}")]
    Dom { action: &'static str, message: String },
}

impl ViewportError {
    pub(crate) fn dom(action: &'static str, err: wasm_bindgen::JsValue) -> Self {
        ViewportError::Dom {
            action,
            message: format!("{:?}", err),
        }
    }
}

/// Document and viewport heights in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub document_height: f64,
    pub viewport_height: f64,
}

impl Geometry {
    pub fn scrollable_height(&self) -> f64 {
        self.document_height - self.viewport_height
    }
}

/// Bounding box of a section relative to the viewport top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub bottom: f64,
}

impl SectionRect {
    pub fn crosses(&self, line: f64) -> bool {
        self.top <= line && self.bottom >= line
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollMotion {
    Instant,
    Smooth,
}

/// What the tracker needs from the page.
pub trait Viewport {
    fn geometry(&self) -> Geometry;

    /// `None` when no element with that id is mounted.
    fn section_rect(&self, key: &str) -> Option<SectionRect>;

    fn prefers_reduced_motion(&self) -> bool;

    /// Returns false when the target element does not exist.
    fn scroll_into_view(&self, key: &str, motion: ScrollMotion) -> bool;
}

#[derive(Clone)]
pub struct WebViewport {
    window: Window,
    document: Document,
}

impl WebViewport {
    pub fn new() -> Result<Self, ViewportError> {
        let window = web_sys::window().ok_or(ViewportError::NoWindow)?;
        let document = window.document().ok_or(ViewportError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn scroll_y(&self) -> i32 {
        self.window.scroll_y().unwrap_or(0.0).round() as i32
    }
}

impl Viewport for WebViewport {
    fn geometry(&self) -> Geometry {
        let document_height = self
            .document
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0);
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        Geometry { document_height, viewport_height }
    }

    fn section_rect(&self, key: &str) -> Option<SectionRect> {
        let rect = self.document.get_element_by_id(key)?.get_bounding_client_rect();
        Some(SectionRect { top: rect.top(), bottom: rect.bottom() })
    }

    fn prefers_reduced_motion(&self) -> bool {
        let media = self
            .window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|list| list.matches())
            .unwrap_or(false);
        let body_class = self
            .document
            .body()
            .map(|body| body.class_list().contains(REDUCED_MOTION_CLASS))
            .unwrap_or(false);
        media || body_class
    }

    fn scroll_into_view(&self, key: &str, motion: ScrollMotion) -> bool {
        let Some(element) = self.document.get_element_by_id(key) else {
            return false;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(match motion {
            ScrollMotion::Instant => ScrollBehavior::Instant,
            ScrollMotion::Smooth => ScrollBehavior::Smooth,
        });
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}
