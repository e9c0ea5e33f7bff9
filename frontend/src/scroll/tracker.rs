//! Scroll progress and active-section tracking.
//!
//! The tracker owns all scroll state and never touches the DOM directly:
//! positions come in through [`ScrollTracker::on_scroll`], geometry and
//! section boxes are read through a [`Viewport`] when a frame runs.

use crate::config::{ScrollConfig, Section};
use crate::scroll::viewport::{Geometry, ScrollMotion, SectionRect, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// What `on_scroll` did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Inside the throttle window for its direction.
    Throttled,
    /// Sub-threshold movement while continuing upwards.
    Jitter,
    /// Accepted; a frame must be requested.
    Scheduled,
    /// Accepted; a recompute was already pending.
    Coalesced,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollSnapshot {
    pub progress: f64,
    pub active_section: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    pub progress: f64,
    pub active_section: Option<&'static str>,
    pub last_scroll_y: i32,
    pub last_scroll_at: Option<u64>,
    pub last_direction: ScrollDirection,
}

/// Percentage of the scrollable distance covered at `y`, clamped to 0..=100.
/// A document that fits the viewport reports 0.
pub fn progress_at(y: f64, geometry: Geometry) -> f64 {
    let scrollable = geometry.scrollable_height();
    if scrollable.is_nan() || scrollable <= 0.0 || !y.is_finite() {
        return 0.0;
    }
    (y / scrollable * 100.0).clamp(0.0, 100.0)
}

/// First section, in list order, whose box crosses the reference line.
pub fn section_at<F>(sections: &[Section], line: f64, mut rect_of: F) -> Option<&Section>
where
    F: FnMut(&str) -> Option<SectionRect>,
{
    sections
        .iter()
        .find(|section| rect_of(section.key).map_or(false, |rect| rect.crosses(line)))
}

/// Brings `key` into view, instantly when reduced motion is preferred.
pub fn scroll_to_section<V: Viewport + ?Sized>(viewport: &V, key: &str) -> bool {
    let motion = if viewport.prefers_reduced_motion() {
        ScrollMotion::Instant
    } else {
        ScrollMotion::Smooth
    };
    let scrolled = viewport.scroll_into_view(key, motion);
    if !scrolled {
        log::debug!("No section element for '{}', skipping scroll", key);
    }
    scrolled
}

pub struct ScrollTracker {
    sections: Vec<Section>,
    config: ScrollConfig,
    state: ScrollState,
    pending_y: Option<i32>,
}

impl ScrollTracker {
    /// Tracker whose direction detection starts from `initial_y`.
    pub fn starting_at(sections: &[Section], config: ScrollConfig, initial_y: i32) -> Self {
        let state = ScrollState {
            progress: 0.0,
            active_section: sections.first().map(|s| s.key),
            last_scroll_y: initial_y,
            last_scroll_at: None,
            last_direction: ScrollDirection::Down,
        };
        Self {
            sections: sections.to_vec(),
            config,
            state,
            pending_y: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        ScrollSnapshot {
            progress: self.state.progress,
            active_section: self.state.active_section,
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.pending_y.is_some()
    }

    fn throttle_ms(&self, direction: ScrollDirection) -> u64 {
        match direction {
            ScrollDirection::Down => self.config.down_throttle_ms,
            ScrollDirection::Up => self.config.up_throttle_ms,
        }
    }

    /// Feeds one scroll event. `now` is a millisecond timestamp.
    pub fn on_scroll(&mut self, current_y: i32, now: u64) -> ScrollOutcome {
        let previous_y = self.state.last_scroll_y;
        let direction = if current_y > previous_y {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        self.state.last_scroll_y = current_y;

        if let Some(last) = self.state.last_scroll_at {
            if now.saturating_sub(last) < self.throttle_ms(direction) {
                return ScrollOutcome::Throttled;
            }
        }

        if direction == ScrollDirection::Up
            && self.state.last_direction == ScrollDirection::Up
            && (current_y - previous_y).abs() < self.config.up_jitter_px
        {
            return ScrollOutcome::Jitter;
        }

        self.state.last_scroll_at = Some(now);
        self.state.last_direction = direction;

        match self.pending_y.replace(current_y) {
            None => ScrollOutcome::Scheduled,
            Some(_) => ScrollOutcome::Coalesced,
        }
    }

    /// Marks a recompute for `y` regardless of throttling, e.g. on mount.
    pub fn request_refresh(&mut self, y: i32) {
        self.state.last_scroll_y = y;
        self.pending_y = Some(y);
    }

    /// Runs the pending recompute, if any. Returns the new snapshot only when
    /// progress or the active section changed.
    pub fn on_frame<V: Viewport + ?Sized>(&mut self, viewport: &V) -> Option<ScrollSnapshot> {
        let y = self.pending_y.take()?;

        let progress = progress_at(y as f64, viewport.geometry());
        let active = section_at(&self.sections, self.config.reference_line_px, |key| {
            viewport.section_rect(key)
        })
        .map(|section| section.key)
        .or(self.state.active_section);

        if progress == self.state.progress && active == self.state.active_section {
            return None;
        }
        self.state.progress = progress;
        self.state.active_section = active;
        Some(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SECTIONS;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FakeViewport {
        geometry: Geometry,
        rects: HashMap<&'static str, SectionRect>,
        reduced_motion: bool,
        scrolls: RefCell<Vec<(String, ScrollMotion)>>,
    }

    impl FakeViewport {
        fn new(document_height: f64, viewport_height: f64) -> Self {
            Self {
                geometry: Geometry { document_height, viewport_height },
                rects: HashMap::new(),
                reduced_motion: false,
                scrolls: RefCell::new(Vec::new()),
            }
        }

        /// Five stacked 600px sections scrolled by `y`.
        fn stacked(y: f64) -> Self {
            let mut viewport = Self::new(3000.0, 800.0);
            for (i, section) in SECTIONS.iter().enumerate() {
                let top = i as f64 * 600.0 - y;
                viewport.rects.insert(section.key, SectionRect { top, bottom: top + 600.0 });
            }
            viewport
        }
    }

    impl Viewport for FakeViewport {
        fn geometry(&self) -> Geometry {
            self.geometry
        }

        fn section_rect(&self, key: &str) -> Option<SectionRect> {
            self.rects.get(key).copied()
        }

        fn prefers_reduced_motion(&self) -> bool {
            self.reduced_motion
        }

        fn scroll_into_view(&self, key: &str, motion: ScrollMotion) -> bool {
            if !self.rects.contains_key(key) {
                return false;
            }
            self.scrolls.borrow_mut().push((key.to_string(), motion));
            true
        }
    }

    fn tracker() -> ScrollTracker {
        ScrollTracker::starting_at(SECTIONS, ScrollConfig::default(), 0)
    }

    #[test]
    fn halfway_down_is_fifty_percent() {
        let geometry = Geometry { document_height: 3000.0, viewport_height: 800.0 };
        assert_eq!(progress_at(1100.0, geometry), 50.0);
    }

    #[test]
    fn content_fitting_viewport_reports_zero() {
        let fits = Geometry { document_height: 800.0, viewport_height: 800.0 };
        assert_eq!(progress_at(0.0, fits), 0.0);
        assert_eq!(progress_at(250.0, fits), 0.0);

        let shorter = Geometry { document_height: 500.0, viewport_height: 800.0 };
        assert_eq!(progress_at(10.0, shorter), 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        let geometry = Geometry { document_height: 3000.0, viewport_height: 800.0 };
        assert_eq!(progress_at(-40.0, geometry), 0.0);
        assert_eq!(progress_at(2500.0, geometry), 100.0);
    }

    #[test]
    fn hit_test_picks_first_match_in_order() {
        let mut rects = HashMap::new();
        rects.insert("home", SectionRect { top: -900.0, bottom: -300.0 });
        rects.insert("services", SectionRect { top: -300.0, bottom: 100.0 });
        rects.insert("coverage", SectionRect { top: 100.0, bottom: 700.0 });
        rects.insert("about", SectionRect { top: 700.0, bottom: 1300.0 });
        rects.insert("contact", SectionRect { top: 1300.0, bottom: 1900.0 });

        // services and coverage both touch the line; list order wins
        let hit = section_at(SECTIONS, 100.0, |key| rects.get(key).copied());
        assert_eq!(hit.map(|s| s.key), Some("services"));

        let miss = section_at(SECTIONS, 5000.0, |key| rects.get(key).copied());
        assert!(miss.is_none());
    }

    #[test]
    fn hit_test_skips_unmounted_sections() {
        let mut rects = HashMap::new();
        rects.insert("about", SectionRect { top: 0.0, bottom: 400.0 });
        let hit = section_at(SECTIONS, 100.0, |key| rects.get(key).copied());
        assert_eq!(hit.map(|s| s.key), Some("about"));
    }

    #[test]
    fn starts_on_first_section() {
        let tracker = tracker();
        assert_eq!(tracker.state().active_section, Some("home"));
        assert_eq!(tracker.state().progress, 0.0);
        assert!(!tracker.needs_frame());
    }

    #[test]
    fn events_ten_ms_apart_recompute_once() {
        let mut tracker = tracker();
        let viewport = FakeViewport::stacked(100.0);

        assert_eq!(tracker.on_scroll(100, 1_000), ScrollOutcome::Scheduled);
        assert!(tracker.on_frame(&viewport).is_some());

        assert_eq!(tracker.on_scroll(150, 1_010), ScrollOutcome::Throttled);
        assert!(!tracker.needs_frame());
        assert!(tracker.on_frame(&viewport).is_none());
    }

    #[test]
    fn events_eighty_ms_apart_recompute_twice() {
        let mut tracker = tracker();

        assert_eq!(tracker.on_scroll(100, 1_000), ScrollOutcome::Scheduled);
        assert!(tracker.on_frame(&FakeViewport::stacked(100.0)).is_some());

        assert_eq!(tracker.on_scroll(400, 1_080), ScrollOutcome::Scheduled);
        let update = tracker.on_frame(&FakeViewport::stacked(400.0)).unwrap();
        assert_eq!(update.progress, 400.0 / 2200.0 * 100.0);
    }

    #[test]
    fn upward_scroll_uses_longer_window() {
        let mut tracker = tracker();
        assert_eq!(tracker.on_scroll(1_000, 1_000), ScrollOutcome::Scheduled);
        // 60ms passes the 50ms down window but not the 66ms up window
        assert_eq!(tracker.on_scroll(900, 1_060), ScrollOutcome::Throttled);
        assert_eq!(tracker.on_scroll(800, 1_070), ScrollOutcome::Coalesced);
    }

    #[test]
    fn downward_scroll_passes_after_fifty_ms() {
        let mut tracker = tracker();
        assert_eq!(tracker.on_scroll(100, 1_000), ScrollOutcome::Scheduled);
        assert_eq!(tracker.on_scroll(200, 1_049), ScrollOutcome::Throttled);
        assert_eq!(tracker.on_scroll(300, 1_050), ScrollOutcome::Coalesced);
    }

    #[test]
    fn small_upward_steps_are_ignored_while_scrolling_up() {
        let mut tracker = tracker();
        tracker.on_scroll(1_000, 1_000);
        assert_eq!(tracker.on_scroll(900, 1_100), ScrollOutcome::Coalesced);
        assert_eq!(tracker.state().last_direction, ScrollDirection::Up);

        assert_eq!(tracker.on_scroll(897, 1_200), ScrollOutcome::Jitter);
        assert_eq!(tracker.on_scroll(880, 1_300), ScrollOutcome::Coalesced);
    }

    #[test]
    fn small_step_after_downward_scroll_is_processed() {
        let mut tracker = tracker();
        tracker.on_scroll(1_000, 1_000);
        assert_eq!(tracker.state().last_direction, ScrollDirection::Down);
        assert_eq!(tracker.on_scroll(998, 1_100), ScrollOutcome::Coalesced);
    }

    #[test]
    fn frame_uses_latest_accepted_position() {
        let mut tracker = tracker();
        tracker.on_scroll(200, 1_000);
        tracker.on_scroll(1_100, 1_060);
        let update = tracker.on_frame(&FakeViewport::stacked(1_100.0)).unwrap();
        assert_eq!(update.progress, 50.0);
        assert_eq!(update.active_section, Some("services"));
    }

    #[test]
    fn unchanged_frame_reports_nothing() {
        let mut tracker = tracker();
        tracker.on_scroll(0, 1_000);
        // progress 0 and home active: identical to the initial state
        assert!(tracker.on_frame(&FakeViewport::stacked(0.0)).is_none());

        tracker.on_scroll(600, 2_000);
        let first = tracker.on_frame(&FakeViewport::stacked(600.0));
        assert!(first.is_some());
        tracker.request_refresh(600);
        assert!(tracker.on_frame(&FakeViewport::stacked(600.0)).is_none());
    }

    #[test]
    fn active_section_kept_when_nothing_crosses_line() {
        let mut tracker = tracker();
        tracker.on_scroll(1_300, 1_000);
        tracker.on_frame(&FakeViewport::stacked(1_300.0));
        assert_eq!(tracker.state().active_section, Some("coverage"));

        let mut gap = FakeViewport::new(3000.0, 800.0);
        gap.rects.insert("about", SectionRect { top: 300.0, bottom: 900.0 });
        tracker.on_scroll(1_500, 2_000);
        let update = tracker.on_frame(&gap).unwrap();
        assert_eq!(update.active_section, Some("coverage"));
    }

    #[test]
    fn missing_dom_and_flat_document_are_harmless() {
        let mut tracker = tracker();
        let empty = FakeViewport::new(600.0, 800.0);
        tracker.on_scroll(300, 1_000);
        assert!(tracker.on_frame(&empty).is_none());
        assert_eq!(tracker.state().progress, 0.0);
        assert_eq!(tracker.state().active_section, Some("home"));
    }

    #[test]
    fn no_sections_means_no_active_section() {
        let mut tracker = ScrollTracker::starting_at(&[], ScrollConfig::default(), 0);
        tracker.on_scroll(1_100, 1_000);
        let update = tracker.on_frame(&FakeViewport::stacked(1_100.0)).unwrap();
        assert_eq!(update.active_section, None);
        assert_eq!(update.progress, 50.0);
    }

    #[test]
    fn custom_thresholds_apply() {
        let config = ScrollConfig {
            down_throttle_ms: 10,
            up_throttle_ms: 10,
            up_jitter_px: 0,
            reference_line_px: 100.0,
        };
        let mut tracker = ScrollTracker::starting_at(SECTIONS, config, 0);
        tracker.on_scroll(100, 1_000);
        assert_eq!(tracker.on_scroll(150, 1_010), ScrollOutcome::Coalesced);
    }

    #[test]
    fn reduced_motion_jumps_instantly() {
        let mut viewport = FakeViewport::stacked(0.0);
        viewport.reduced_motion = true;
        assert!(scroll_to_section(&viewport, "contact"));
        assert_eq!(
            viewport.scrolls.borrow().as_slice(),
            &[("contact".to_string(), ScrollMotion::Instant)]
        );
    }

    #[test]
    fn default_motion_scrolls_smoothly() {
        let viewport = FakeViewport::stacked(0.0);
        assert!(scroll_to_section(&viewport, "contact"));
        assert_eq!(
            viewport.scrolls.borrow().as_slice(),
            &[("contact".to_string(), ScrollMotion::Smooth)]
        );
    }

    #[test]
    fn scrolling_to_unknown_section_is_a_no_op() {
        let viewport = FakeViewport::stacked(0.0);
        assert!(!scroll_to_section(&viewport, "careers"));
        assert!(viewport.scrolls.borrow().is_empty());
    }

    proptest! {
        #[test]
        fn progress_stays_in_range(
            y in 0.0f64..=20_000.0,
            document_height in 0.0f64..=20_000.0,
            viewport_height in 0.0f64..=4_000.0,
        ) {
            let progress = progress_at(y, Geometry { document_height, viewport_height });
            prop_assert!((0.0..=100.0).contains(&progress));
        }

        #[test]
        fn progress_never_decreases_as_y_grows(
            a in 0.0f64..=2_200.0,
            b in 0.0f64..=2_200.0,
        ) {
            let geometry = Geometry { document_height: 3000.0, viewport_height: 800.0 };
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(progress_at(low, geometry) <= progress_at(high, geometry));
        }

        #[test]
        fn at_most_one_section_is_active(y in 0.0f64..=2_200.0) {
            let viewport = FakeViewport::stacked(y);
            let hits = SECTIONS
                .iter()
                .filter(|s| viewport.section_rect(s.key).map_or(false, |r| r.crosses(100.0)))
                .count();
            let first = section_at(SECTIONS, 100.0, |key| viewport.section_rect(key));
            prop_assert!(hits <= 2);
            prop_assert_eq!(first.is_some(), hits > 0);
        }
    }
}
