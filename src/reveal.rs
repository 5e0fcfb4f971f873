//! Reveal-once animation state. Every element starts `Hidden`, moves to
//! `Entering` on its first intersection and settles in `Visible`.

use crate::config::{
    REVEAL_DEFAULT_DURATION_MS, REVEAL_DEFAULT_ROOT_MARGIN, REVEAL_DEFAULT_THRESHOLD,
    REVEAL_OFFSET_PX,
};

#[derive(Clone, PartialEq, Debug)]
pub struct ObserverOptions {
    /// Element id of the scroll root; `None` observes against the viewport.
    pub root: Option<String>,
    pub root_margin: String,
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: REVEAL_DEFAULT_ROOT_MARGIN.to_string(),
            threshold: REVEAL_DEFAULT_THRESHOLD,
        }
    }
}

/// Latest intersection reading plus a latch that never clears.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Visibility {
    pub is_intersecting: bool,
    pub has_fired: bool,
}

impl Visibility {
    /// Returns `true` only for the first transition into view.
    pub fn record(&mut self, intersecting: bool) -> bool {
        self.is_intersecting = intersecting;
        if intersecting && !self.has_fired {
            self.has_fired = true;
            return true;
        }
        false
    }

    /// State used when the runtime cannot observe intersections.
    pub fn assumed_visible() -> Self {
        Self {
            is_intersecting: true,
            has_fired: true,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RevealKind {
    Fade,
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    ZoomIn,
}

impl RevealKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::FadeUp => "fade-up",
            Self::FadeDown => "fade-down",
            Self::FadeLeft => "fade-left",
            Self::FadeRight => "fade-right",
            Self::ZoomIn => "zoom-in",
        }
    }

    fn hidden_transform(self) -> String {
        let offset = REVEAL_OFFSET_PX;
        match self {
            Self::Fade => "none".to_string(),
            Self::FadeUp => format!("translate3d(0, {offset}px, 0)"),
            Self::FadeDown => format!("translate3d(0, -{offset}px, 0)"),
            Self::FadeLeft => format!("translate3d({offset}px, 0, 0)"),
            Self::FadeRight => format!("translate3d(-{offset}px, 0, 0)"),
            Self::ZoomIn => "scale(0.6)".to_string(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RevealPhase {
    Hidden,
    Entering,
    Visible,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RevealState {
    phase: RevealPhase,
}

impl Default for RevealState {
    fn default() -> Self {
        Self {
            phase: RevealPhase::Hidden,
        }
    }
}

impl RevealState {
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Feeds an observer reading. Returns `true` when the enter animation
    /// should start now.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        if intersecting && self.phase == RevealPhase::Hidden {
            self.phase = RevealPhase::Entering;
            return true;
        }
        false
    }

    pub fn finish_entering(&mut self) {
        if self.phase == RevealPhase::Entering {
            self.phase = RevealPhase::Visible;
        }
    }

    /// Skips the animation entirely; used when observation is unsupported.
    pub fn reveal_immediately(&mut self) {
        self.phase = RevealPhase::Visible;
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RevealTiming {
    pub delay_ms: u32,
    pub duration_ms: u32,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            duration_ms: REVEAL_DEFAULT_DURATION_MS,
        }
    }
}

impl RevealTiming {
    pub fn total_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.duration_ms)
    }
}

pub fn reveal_style(kind: RevealKind, phase: RevealPhase, timing: RevealTiming) -> String {
    match phase {
        RevealPhase::Hidden => format!("opacity: 0; transform: {};", kind.hidden_transform()),
        RevealPhase::Entering => format!(
            "opacity: 1; transform: none; transition: opacity {d}ms ease-out {delay}ms, transform {d}ms ease-out {delay}ms;",
            d = timing.duration_ms,
            delay = timing.delay_ms,
        ),
        RevealPhase::Visible => "opacity: 1; transform: none;".to_string(),
    }
}

pub type RevealId = u64;

/// Mounted reveal elements, so the shell can re-evaluate the ones that
/// were laid out before their observers delivered a first reading.
pub struct RevealRegistry<H> {
    next_id: RevealId,
    entries: Vec<(RevealId, H)>,
}

impl<H> Default for RevealRegistry<H> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<H> RevealRegistry<H> {
    pub fn register(&mut self, handle: H) -> RevealId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, handle));
        id
    }

    pub fn unregister(&mut self, id: RevealId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Applies `evaluate` to every registered element and returns how many
    /// reported themselves in view.
    pub fn refresh<F>(&self, mut evaluate: F) -> usize
    where
        F: FnMut(&H) -> bool,
    {
        self.entries.iter().filter(|(_, handle)| evaluate(handle)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_intersection_starts_animation_once() {
        let mut state = RevealState::default();
        assert!(!state.observe(false));
        assert!(state.observe(true));
        assert_eq!(state.phase(), RevealPhase::Entering);

        state.finish_entering();
        assert!(!state.observe(false));
        assert!(!state.observe(true));
        assert_eq!(state.phase(), RevealPhase::Visible);
    }

    #[test]
    fn element_in_view_at_mount_still_animates() {
        let mut state = RevealState::default();
        assert_eq!(state.phase(), RevealPhase::Hidden);
        assert!(state.observe(true));
    }

    #[test]
    fn unsupported_observer_goes_straight_to_visible() {
        let mut state = RevealState::default();
        state.reveal_immediately();
        assert_eq!(state.phase(), RevealPhase::Visible);
        assert!(!state.observe(true));
    }

    #[test]
    fn finishing_before_entering_is_ignored() {
        let mut state = RevealState::default();
        state.finish_entering();
        assert_eq!(state.phase(), RevealPhase::Hidden);
    }

    #[test]
    fn visibility_latch_never_clears() {
        let mut visibility = Visibility::default();
        assert!(visibility.record(true));
        assert!(!visibility.record(false));
        assert!(!visibility.record(true));
        assert!(visibility.has_fired);
        assert!(visibility.is_intersecting);
    }

    #[test]
    fn hidden_style_offsets_by_kind() {
        let timing = RevealTiming::default();
        let up = reveal_style(RevealKind::FadeUp, RevealPhase::Hidden, timing);
        let left = reveal_style(RevealKind::FadeLeft, RevealPhase::Hidden, timing);
        assert!(up.contains("opacity: 0"));
        assert!(up.contains("translate3d(0, 40px, 0)"));
        assert!(left.contains("translate3d(40px, 0, 0)"));
    }

    #[test]
    fn entering_style_carries_delay_and_duration() {
        let timing = RevealTiming {
            delay_ms: 200,
            duration_ms: 600,
        };
        let style = reveal_style(RevealKind::ZoomIn, RevealPhase::Entering, timing);
        assert!(style.contains("opacity 600ms ease-out 200ms"));
        assert_eq!(timing.total_ms(), 800);
    }

    #[test]
    fn registry_refresh_counts_elements_in_view() {
        let mut registry = RevealRegistry::default();
        let above_fold = registry.register(100.0);
        registry.register(2_400.0);
        registry.register(300.0);

        let viewport_height = 900.0;
        assert_eq!(registry.refresh(|top| *top < viewport_height), 2);

        registry.unregister(above_fold);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.refresh(|top| *top < viewport_height), 1);
    }
}
