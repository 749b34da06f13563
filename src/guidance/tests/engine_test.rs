#[cfg(test)]
mod engine_test {
    use crate::guidance::state::GuidanceState;
    use crate::guidance::tests::fixture::{
        metrics, striped_frame, uniform_frame, Fixture, PICKS_LEFT, PICKS_RIGHT,
    };
    use std::time::Duration;

    #[test]
    fn test_starts_centered_with_no_progress() {
        let mut f = Fixture::new();
        let start = f.start;

        let result = f.engine.advance(&metrics(0.5, 0.5, true, 0.6), start);

        assert_eq!(result.state, GuidanceState::Center);
        assert_eq!(result.message, GuidanceState::Center.message());
        assert_eq!(result.progress_percent, 0);
        assert!(!result.ready_for_capture);
    }

    #[test]
    fn test_state_is_held_within_dwell() {
        let mut f = Fixture::new();

        for millis in (0..=3000).step_by(200) {
            let now = f.at(millis);
            let result = f.engine.advance(&metrics(0.1, 0.95, false, 0.0), now);
            assert_eq!(result.state, GuidanceState::Center);
        }
    }

    #[test]
    fn test_exact_dwell_does_not_transition() {
        let mut f = Fixture::new();
        let now = f.at(3000);

        let result = f.engine.advance(&metrics(0.1, 0.5, true, 0.6), now);

        assert_eq!(result.state, GuidanceState::Center);
    }

    #[test]
    fn test_progress_tracks_time_in_state() {
        let mut f = Fixture::new();
        let now = f.at(1500);

        let result = f.engine.advance(&metrics(0.5, 0.5, true, 0.6), now);

        assert_eq!(result.progress_percent, 50);
    }

    #[test]
    fn test_brightness_rule_wins_over_distance_rule() {
        let mut f = Fixture::new();
        let now = f.after_dwell();

        let result = f.engine.advance(&metrics(0.2, 0.9, true, 0.6), now);

        assert_eq!(result.state, GuidanceState::MoreLight);
        assert_eq!(result.progress_percent, 0);
    }

    #[test]
    fn test_overexposed_frame_asks_for_less_reflection() {
        let mut f = Fixture::new();
        let now = f.after_dwell();

        let result = f.engine.advance(&metrics(0.9, 0.5, true, 0.6), now);

        assert_eq!(result.state, GuidanceState::LessReflection);
    }

    #[test]
    fn test_distance_rules() {
        let mut f = Fixture::new();
        let now = f.after_dwell();
        assert_eq!(
            f.engine.advance(&metrics(0.5, 0.2, true, 0.6), now).state,
            GuidanceState::Further
        );

        let mut f = Fixture::new();
        let now = f.after_dwell();
        assert_eq!(
            f.engine.advance(&metrics(0.5, 0.8, true, 0.6), now).state,
            GuidanceState::Closer
        );
    }

    #[test]
    fn test_balanced_focused_frame_is_centered() {
        let mut f = Fixture::new();
        let now = f.after_dwell();

        let result = f.engine.advance(&metrics(0.5, 0.5, true, 0.6), now);

        assert_eq!(result.state, GuidanceState::Center);
    }

    #[test]
    fn test_unfocused_frame_picks_a_side() {
        let mut left = Fixture::with_rng(PICKS_LEFT);
        let now = left.after_dwell();
        assert_eq!(
            left.engine.advance(&metrics(0.5, 0.5, false, 0.1), now).state,
            GuidanceState::LeftSide
        );

        let mut right = Fixture::with_rng(PICKS_RIGHT);
        let now = right.after_dwell();
        assert_eq!(
            right.engine.advance(&metrics(0.5, 0.5, false, 0.1), now).state,
            GuidanceState::RightSide
        );
    }

    #[test]
    fn test_sustained_focus_reaches_hold_steady_then_ready() {
        let mut f = Fixture::new();

        let now = f.after_dwell();
        let holding = f.engine.advance(&metrics(0.2, 0.9, true, 0.75), now);
        assert_eq!(holding.state, GuidanceState::HoldSteady);
        assert!(!holding.ready_for_capture);
        assert_eq!(holding.progress_percent, 75);

        let later = now + Duration::from_millis(200);
        let ready = f.engine.advance(&metrics(0.5, 0.5, true, 0.85), later);
        assert_eq!(ready.state, GuidanceState::HoldSteady);
        assert!(ready.ready_for_capture);
        assert_eq!(ready.progress_percent, 85);
        assert!(f.engine.is_ready_for_capture());
    }

    #[test]
    fn test_high_focus_outside_hold_steady_is_not_ready() {
        let mut f = Fixture::new();
        let now = f.at(1000);

        let result = f.engine.advance(&metrics(0.5, 0.5, true, 1.2), now);

        assert_eq!(result.state, GuidanceState::Center);
        assert!(!result.ready_for_capture);
    }

    #[test]
    fn test_hold_steady_is_not_sticky() {
        let mut f = Fixture::new();
        let first = f.after_dwell();
        f.engine.advance(&metrics(0.5, 0.5, true, 0.9), first);

        let second = first + Duration::from_millis(3001);
        let result = f.engine.advance(&metrics(0.2, 0.5, false, 0.1), second);

        assert_eq!(result.state, GuidanceState::MoreLight);
        assert!(!result.ready_for_capture);
    }

    #[test]
    fn test_focus_score_is_remembered_between_ticks() {
        let mut f = Fixture::new();
        let now = f.at(100);

        f.engine.advance(&metrics(0.5, 0.5, true, 0.66), now);

        assert_eq!(f.engine.focus_score(), 0.66);
    }

    #[test]
    fn test_reset_returns_to_center() {
        let mut f = Fixture::new();
        let now = f.after_dwell();
        f.engine.advance(&metrics(0.2, 0.5, true, 0.1), now);
        assert_eq!(f.engine.state(), GuidanceState::MoreLight);

        f.engine.reset(now);

        assert_eq!(f.engine.state(), GuidanceState::Center);
        assert_eq!(f.engine.focus_score(), 0.0);
        assert_eq!(f.engine.time_in_state(now), Duration::ZERO);
    }

    #[test]
    fn test_guide_sharp_frame_becomes_ready() {
        let mut f = Fixture::new();
        let now = f.after_dwell();

        // 12 striped columns * 49 rows = 588 edges, focus 0.882
        let result = f.engine.guide(&striped_frame(24, 150), now);

        assert_eq!(result.state, GuidanceState::HoldSteady);
        assert!(result.ready_for_capture);
        assert_eq!(result.progress_percent, 88);
    }

    #[test]
    fn test_guide_flat_frame_asks_to_move_closer() {
        let mut f = Fixture::new();
        let now = f.after_dwell();

        let result = f.engine.guide(&uniform_frame(100, 100, [150, 150, 150]), now);

        assert_eq!(result.state, GuidanceState::Closer);
        assert_eq!(result.focus_score, 0.0);
    }

    #[test]
    fn test_guide_dark_frame_asks_for_light() {
        let mut f = Fixture::new();
        let now = f.after_dwell();

        let result = f.engine.guide(&uniform_frame(100, 100, [20, 20, 20]), now);

        assert_eq!(result.state, GuidanceState::MoreLight);
    }
}
