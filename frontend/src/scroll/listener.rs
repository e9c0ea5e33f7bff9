use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Date, Function};
use web_sys::{AddEventListenerOptions, Window};
use yew::Callback;

use crate::scroll::tracker::{ScrollSnapshot, ScrollTracker};
use crate::scroll::viewport::{ViewportError, WebViewport};

/// Keeps the window scroll listener attached while alive. Dropping it (or
/// calling [`ScrollSubscription::stop`]) detaches the listener and cancels a
/// pending animation frame.
pub struct ScrollSubscription {
    window: Window,
    scroll_callback: Closure<dyn FnMut()>,
    pending_frame: Rc<Cell<Option<i32>>>,
    _frame_callback: Closure<dyn FnMut()>,
}

fn request_frame(window: &Window, frame: &Function, pending: &Cell<Option<i32>>) -> Result<(), ViewportError> {
    if pending.get().is_some() {
        return Ok(());
    }
    let id = window
        .request_animation_frame(frame)
        .map_err(|e| ViewportError::dom("request animation frame", e))?;
    pending.set(Some(id));
    Ok(())
}

impl ScrollSubscription {
    pub fn start(
        tracker: Rc<RefCell<ScrollTracker>>,
        viewport: WebViewport,
        on_change: Callback<ScrollSnapshot>,
    ) -> Result<Self, ViewportError> {
        let window = viewport.window().clone();
        let pending_frame = Rc::new(Cell::new(None::<i32>));

        let frame_callback = {
            let tracker = tracker.clone();
            let viewport = viewport.clone();
            let pending_frame = pending_frame.clone();
            Closure::wrap(Box::new(move || {
                pending_frame.set(None);
                let update = tracker.borrow_mut().on_frame(&viewport);
                if let Some(snapshot) = update {
                    on_change.emit(snapshot);
                }
            }) as Box<dyn FnMut()>)
        };
        let frame_fn: Function = frame_callback.as_ref().unchecked_ref::<Function>().clone();

        let scroll_callback = {
            let tracker = tracker.clone();
            let viewport = viewport.clone();
            let pending_frame = pending_frame.clone();
            let frame_fn = frame_fn.clone();
            Closure::wrap(Box::new(move || {
                let needs_frame = {
                    let mut tracker = tracker.borrow_mut();
                    tracker.on_scroll(viewport.scroll_y(), Date::now() as u64);
                    tracker.needs_frame()
                };
                if needs_frame {
                    if let Err(e) = request_frame(viewport.window(), &frame_fn, &pending_frame) {
                        warn!("{}", e);
                    }
                }
            }) as Box<dyn FnMut()>)
        };

        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                scroll_callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| ViewportError::dom("attach scroll listener", e))?;

        let subscription = Self {
            window,
            scroll_callback,
            pending_frame,
            _frame_callback: frame_callback,
        };

        // Initial check so a reload mid-page shows the right position
        tracker.borrow_mut().request_refresh(viewport.scroll_y());
        request_frame(&subscription.window, &frame_fn, &subscription.pending_frame)?;

        debug!("Scroll subscription started");
        Ok(subscription)
    }

    pub fn stop(self) {}
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Err(e) = self.window.remove_event_listener_with_callback(
            "scroll",
            self.scroll_callback.as_ref().unchecked_ref(),
        ) {
            warn!("Failed to detach scroll listener: {:?}", e);
        }
        if let Some(id) = self.pending_frame.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        debug!("Scroll subscription stopped");
    }
}
