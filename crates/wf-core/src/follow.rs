/// Scroll tracking for a live, append-only log view.
///
/// The view follows new output while the reader sits at the bottom, leaves the
/// scroll position alone once they scroll up to read history, and offers a
/// "jump to latest" control until they return. Units are whatever the host
/// measures scroll in (pixels, terminal rows); only the threshold cares.

/// Distance from the bottom, in host units, below which the view counts as
/// following. Pixel hosts use this value directly.
pub const DEFAULT_BOTTOM_THRESHOLD: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Move over several ticks
    Smooth,
    /// Move immediately
    Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFollow {
    threshold: usize,
    scroll_height: usize,
    scroll_top: usize,
    viewport_height: usize,
    at_bottom: bool,
    show_jump: bool,
    /// A smooth scroll towards the bottom is in flight
    animating: bool,
}

impl Default for LogFollow {
    fn default() -> Self {
        Self::new(DEFAULT_BOTTOM_THRESHOLD)
    }
}

impl LogFollow {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            scroll_height: 0,
            scroll_top: 0,
            viewport_height: 0,
            at_bottom: true,
            show_jump: false,
            animating: false,
        }
    }

    pub fn is_at_bottom(&self) -> bool {
        self.at_bottom
    }

    pub fn show_jump_button(&self) -> bool {
        self.show_jump
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_height(&self) -> usize {
        self.scroll_height
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn max_scroll_top(&self) -> usize {
        self.scroll_height.saturating_sub(self.viewport_height)
    }

    pub fn distance_from_bottom(&self) -> usize {
        self.scroll_height
            .saturating_sub(self.scroll_top)
            .saturating_sub(self.viewport_height)
    }

    /// Scroll event: recompute whether the view is following
    fn evaluate(&mut self) {
        let at_bottom = self.distance_from_bottom() < self.threshold;
        self.at_bottom = at_bottom;
        self.show_jump = !at_bottom;
    }

    /// The reader scrolled to `top`. Cancels any smooth scroll in flight.
    pub fn scroll_to(&mut self, top: usize) {
        self.animating = false;
        self.scroll_top = top.min(self.max_scroll_top());
        self.evaluate();
    }

    /// The reader scrolled by `delta` units (negative is up)
    pub fn scroll_by(&mut self, delta: isize) {
        let top = if delta.is_negative() {
            self.scroll_top.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_top.saturating_add(delta.unsigned_abs())
        };
        self.scroll_to(top);
    }

    /// The content height changed, usually because lines were appended.
    /// Follows the new bottom only if the view was following beforehand.
    pub fn content_changed(&mut self, scroll_height: usize) {
        let was_at_bottom = self.at_bottom;
        self.scroll_height = scroll_height;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
        if was_at_bottom {
            self.scroll_to_bottom(ScrollBehavior::Smooth);
        } else if !self.animating {
            // a shrink can clamp a reader onto the bottom
            self.evaluate();
        }
    }

    /// A different stream is now shown. Snap to its bottom without animating.
    pub fn reset_stream(&mut self, scroll_height: usize) {
        self.scroll_height = scroll_height;
        self.animating = false;
        self.scroll_top = self.max_scroll_top();
        self.at_bottom = true;
        self.show_jump = false;
    }

    /// Jump-to-latest control. Leaves the follow flag to the scroll evaluation
    /// that happens when the animation settles.
    pub fn jump_to_latest(&mut self) {
        self.scroll_to_bottom(ScrollBehavior::Smooth);
    }

    pub fn scroll_to_bottom(&mut self, behavior: ScrollBehavior) {
        let target = self.max_scroll_top();
        match behavior {
            ScrollBehavior::Instant => {
                self.animating = false;
                self.scroll_top = target;
                self.evaluate();
            }
            ScrollBehavior::Smooth => {
                self.animating = self.scroll_top < target;
            }
        }
    }

    /// The visible area was resized. A following view stays pinned to the bottom.
    pub fn set_viewport(&mut self, viewport_height: usize) {
        if viewport_height == self.viewport_height {
            return;
        }
        self.viewport_height = viewport_height;
        if self.at_bottom && !self.animating {
            self.scroll_top = self.max_scroll_top();
        } else {
            self.scroll_top = self.scroll_top.min(self.max_scroll_top());
            if !self.animating {
                self.evaluate();
            }
        }
    }

    /// Advance a smooth scroll by one frame. Returns true if the position moved
    /// or the animation settled, i.e. the view needs a redraw.
    pub fn tick(&mut self) -> bool {
        if !self.animating {
            return false;
        }
        let target = self.max_scroll_top();
        if self.scroll_top < target {
            let step = (target - self.scroll_top).div_ceil(2).max(1);
            self.scroll_top = (self.scroll_top + step).min(target);
        } else {
            self.scroll_top = target;
        }
        if self.scroll_top == target {
            self.animating = false;
            self.evaluate();
        }
        true
    }

    /// Run any in-flight animation to completion
    pub fn settle(&mut self) {
        while self.tick() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 20px lines in a 400px viewport
    const LINE: usize = 20;
    const VIEWPORT: usize = 400;

    fn viewer_with_lines(lines: usize) -> LogFollow {
        let mut follow = LogFollow::default();
        follow.set_viewport(VIEWPORT);
        follow.reset_stream(lines * LINE);
        follow
    }

    #[test]
    fn test_initial_state_follows() {
        let follow = LogFollow::default();
        assert!(follow.is_at_bottom());
        assert!(!follow.show_jump_button());
        assert_eq!(follow.scroll_top(), 0);
    }

    #[test]
    fn test_append_at_bottom_follows_smoothly() {
        let mut follow = viewer_with_lines(50);
        assert_eq!(follow.scroll_top(), 50 * LINE - VIEWPORT);

        follow.content_changed(60 * LINE);
        assert!(follow.is_animating());
        // first frame moves part of the way
        assert!(follow.tick());
        assert!(follow.scroll_top() < 60 * LINE - VIEWPORT);

        follow.settle();
        assert_eq!(follow.scroll_top() + VIEWPORT, 60 * LINE);
        assert!(follow.is_at_bottom());
        assert!(!follow.show_jump_button());
    }

    #[test]
    fn test_scrolled_away_is_left_alone() {
        let mut follow = viewer_with_lines(50);
        follow.scroll_to(100);
        assert!(follow.distance_from_bottom() >= DEFAULT_BOTTOM_THRESHOLD);
        assert!(!follow.is_at_bottom());
        assert!(follow.show_jump_button());

        follow.content_changed(70 * LINE);
        follow.settle();
        assert_eq!(follow.scroll_top(), 100);
        assert!(follow.show_jump_button());
    }

    #[test]
    fn test_near_bottom_counts_as_bottom() {
        let mut follow = viewer_with_lines(50);
        let max = follow.max_scroll_top();
        follow.scroll_to(max - (DEFAULT_BOTTOM_THRESHOLD - 1));
        assert!(follow.is_at_bottom());
        assert!(!follow.show_jump_button());

        follow.scroll_to(max - DEFAULT_BOTTOM_THRESHOLD);
        assert!(!follow.is_at_bottom());
        assert!(follow.show_jump_button());
    }

    #[test]
    fn test_stream_change_resets_without_animation() {
        let mut follow = viewer_with_lines(50);
        follow.scroll_to(0);
        assert!(follow.show_jump_button());

        follow.reset_stream(30 * LINE);
        assert!(!follow.is_animating());
        assert!(follow.is_at_bottom());
        assert!(!follow.show_jump_button());
        assert_eq!(follow.scroll_top(), 30 * LINE - VIEWPORT);
    }

    #[test]
    fn test_jump_to_latest_updates_flag_on_settle() {
        let mut follow = viewer_with_lines(50);
        follow.scroll_to(0);
        follow.jump_to_latest();

        // flag is untouched until the scroll lands
        assert!(follow.is_animating());
        assert!(follow.show_jump_button());
        assert!(!follow.is_at_bottom());

        follow.settle();
        assert!(follow.is_at_bottom());
        assert!(!follow.show_jump_button());
        assert_eq!(follow.distance_from_bottom(), 0);
    }

    #[test]
    fn test_user_scroll_cancels_animation() {
        let mut follow = viewer_with_lines(50);
        follow.content_changed(80 * LINE);
        follow.tick();
        follow.scroll_by(-200);
        assert!(!follow.is_animating());
        let top = follow.scroll_top();
        assert!(!follow.tick());
        assert_eq!(follow.scroll_top(), top);
    }

    #[test]
    fn test_growth_during_animation_retargets() {
        let mut follow = viewer_with_lines(50);
        follow.content_changed(60 * LINE);
        follow.tick();
        follow.content_changed(90 * LINE);
        follow.settle();
        assert_eq!(follow.scroll_top() + VIEWPORT, 90 * LINE);
    }

    #[test]
    fn test_content_shorter_than_viewport() {
        let mut follow = viewer_with_lines(3);
        assert_eq!(follow.scroll_top(), 0);
        follow.content_changed(4 * LINE);
        assert!(!follow.is_animating());
        assert!(follow.is_at_bottom());
    }

    #[test]
    fn test_resize_keeps_follower_pinned() {
        let mut follow = viewer_with_lines(50);
        follow.set_viewport(200);
        assert_eq!(follow.distance_from_bottom(), 0);

        follow.scroll_to(0);
        follow.set_viewport(300);
        assert_eq!(follow.scroll_top(), 0);
    }

    fn rows_scrolled_up() -> LogFollow {
        let mut follow = LogFollow::new(2);
        follow.set_viewport(10);
        follow.reset_stream(30);
        follow.scroll_to(15);
        assert!(follow.show_jump_button());
        follow
    }

    #[test]
    fn test_taller_viewport_reaching_bottom_resumes_following() {
        let mut follow = rows_scrolled_up();
        follow.set_viewport(15);
        assert_eq!(follow.distance_from_bottom(), 0);
        assert!(follow.is_at_bottom());
        assert!(!follow.show_jump_button());

        follow.content_changed(31);
        follow.settle();
        assert_eq!(follow.distance_from_bottom(), 0);
        assert_eq!(follow.scroll_top(), 16);
    }

    #[test]
    fn test_shrink_clamped_onto_bottom_resumes_following() {
        let mut follow = rows_scrolled_up();
        follow.content_changed(20);
        assert_eq!(follow.scroll_top(), 10);
        assert!(follow.is_at_bottom());
        assert!(!follow.show_jump_button());

        follow.content_changed(21);
        follow.settle();
        assert_eq!(follow.scroll_top(), 11);
    }

    #[test]
    fn test_jump_in_flight_survives_resize() {
        let mut follow = rows_scrolled_up();
        follow.jump_to_latest();
        follow.set_viewport(12);
        assert!(follow.is_animating());
        assert!(follow.show_jump_button());
        follow.settle();
        assert!(follow.is_at_bottom());
    }

    proptest! {
        #[test]
        fn prop_appends_at_bottom_always_land_at_bottom(
            start in 0usize..200,
            batches in proptest::collection::vec(1usize..40, 1..20),
        ) {
            let mut follow = viewer_with_lines(start);
            let mut lines = start;
            for batch in batches {
                lines += batch;
                follow.content_changed(lines * LINE);
                follow.settle();
                prop_assert_eq!(follow.scroll_top(), (lines * LINE).saturating_sub(VIEWPORT));
                prop_assert!(follow.is_at_bottom());
                prop_assert!(!follow.show_jump_button());
            }
        }

        #[test]
        fn prop_scrolled_away_offset_is_stable(
            start in 30usize..200,
            batches in proptest::collection::vec(1usize..40, 1..20),
        ) {
            let mut follow = viewer_with_lines(start);
            follow.scroll_to(0);
            let mut lines = start;
            for batch in batches {
                lines += batch;
                follow.content_changed(lines * LINE);
                follow.settle();
                prop_assert_eq!(follow.scroll_top(), 0);
                prop_assert!(follow.show_jump_button());
            }
        }
    }
}
