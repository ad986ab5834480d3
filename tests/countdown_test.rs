use countdown_dial::{
    format_mmss, CountdownClock, Phase, Scene, TickMode, TimerConfig, TimerView, ToggleGlyph,
};
use std::time::{Duration, Instant};

const PERIOD: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Draw(f64),
    Time(String),
    Controls(bool),
    Glyph(ToggleGlyph),
}

#[derive(Default)]
struct RecordingView {
    calls: Vec<Call>,
}

impl RecordingView {
    fn draws(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Draw(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn last_time(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Time(t) => Some(t.as_str()),
            _ => None,
        })
    }

    fn clear(&mut self) {
        self.calls.clear();
    }
}

impl TimerView for RecordingView {
    fn draw(&mut self, progress: f64) {
        self.calls.push(Call::Draw(progress));
    }

    fn show_time(&mut self, text: &str) {
        self.calls.push(Call::Time(text.to_string()));
    }

    fn set_controls_visible(&mut self, visible: bool) {
        self.calls.push(Call::Controls(visible));
    }

    fn set_toggle_glyph(&mut self, glyph: ToggleGlyph) {
        self.calls.push(Call::Glyph(glyph));
    }
}

fn clock() -> CountdownClock {
    CountdownClock::new(PERIOD, TickMode::FixedStep)
}

/// Ticks until remaining drops to `target` or below, returning the instant
/// after the last tick.
fn tick_until(
    clock: &mut CountdownClock,
    mut now: Instant,
    target: f64,
    view: &mut RecordingView,
) -> Instant {
    while clock.state().running && clock.state().remaining > target {
        now += PERIOD;
        clock.tick(now, view);
    }
    now
}

#[test]
fn startup_shows_zero() {
    let clock = clock();
    let mut view = RecordingView::default();
    clock.init(&mut view);
    assert_eq!(
        view.calls,
        vec![Call::Time("00:00".to_string()), Call::Draw(0.0)]
    );
    assert_eq!(clock.phase(), Phase::Idle);
}

#[test]
fn zero_duration_start_stays_idle() {
    let mut clock = clock();
    let mut view = RecordingView::default();
    assert!(!clock.start(0, 0, Instant::now(), &mut view));
    assert_eq!(clock.phase(), Phase::Idle);
    assert!(!clock.is_ticking());
    assert!(view.calls.is_empty());
}

#[test]
fn start_hides_controls_and_shows_pause() {
    let mut clock = clock();
    let mut view = RecordingView::default();
    assert!(clock.start(1, 30, Instant::now(), &mut view));
    assert_eq!(clock.phase(), Phase::Running);
    assert_eq!(clock.state().total, 90.0);
    assert_eq!(clock.state().remaining, 90.0);
    assert_eq!(
        view.calls,
        vec![Call::Glyph(ToggleGlyph::Pause), Call::Controls(false)]
    );
}

#[test]
fn pause_and_resume_keep_total_and_remaining() {
    let mut clock = clock();
    let mut view = RecordingView::default();
    let now = Instant::now();
    clock.start(1, 30, now, &mut view);
    let now = tick_until(&mut clock, now, 45.0, &mut view);

    clock.pause(now, &mut view);
    assert_eq!(clock.phase(), Phase::Paused);
    assert!(!clock.is_ticking());
    let paused_at = clock.state().remaining;
    assert!((paused_at - 45.0).abs() < 0.02);

    // The inputs now say something else; resuming must ignore them.
    assert!(clock.start(5, 0, now, &mut view));
    assert_eq!(clock.state().total, 90.0);
    assert_eq!(clock.state().remaining, paused_at);
    assert_eq!(clock.phase(), Phase::Running);
}

#[test]
fn double_start_keeps_a_single_ticker() {
    let mut clock = clock();
    let mut view = RecordingView::default();
    let now = Instant::now();
    clock.start(0, 10, now, &mut view);
    let deadline = clock.next_deadline();
    view.clear();

    assert!(clock.start(0, 10, now + Duration::from_millis(5), &mut view));
    assert_eq!(clock.next_deadline(), deadline);
    assert!(view.calls.is_empty());

    // One due deadline means exactly one decrement.
    assert!(clock.poll(now + PERIOD, &mut view));
    assert!(!clock.poll(now + PERIOD, &mut view));
    assert!((clock.state().remaining - (10.0 - PERIOD.as_secs_f64())).abs() < 1e-9);
}

#[test]
fn toggle_alternates_between_running_and_paused() {
    let mut clock = clock();
    let mut view = RecordingView::default();
    let now = Instant::now();
    clock.toggle(0, 3, now, &mut view);
    assert_eq!(clock.phase(), Phase::Running);
    clock.toggle(0, 3, now, &mut view);
    assert_eq!(clock.phase(), Phase::Paused);
    assert_eq!(
        &view.calls[2..],
        &[Call::Glyph(ToggleGlyph::Play), Call::Controls(true)]
    );
    clock.toggle(0, 3, now, &mut view);
    assert_eq!(clock.phase(), Phase::Running);
}

#[test]
fn reset_from_every_phase() {
    let now = Instant::now();
    let setups: [fn(&mut CountdownClock, Instant, &mut RecordingView); 3] = [
        |_, _, _| {},
        |c, now, v| {
            c.start(2, 0, now, v);
        },
        |c, now, v| {
            c.start(2, 0, now, v);
            c.tick(now + PERIOD, v);
            c.pause(now + PERIOD, v);
        },
    ];
    for setup in setups {
        let mut clock = clock();
        let mut view = RecordingView::default();
        setup(&mut clock, now, &mut view);
        view.clear();

        clock.reset(&mut view);
        assert_eq!(clock.state().remaining, 0.0);
        assert_eq!(clock.state().total, 0.0);
        assert_eq!(clock.phase(), Phase::Idle);
        assert!(!clock.is_ticking());
        assert_eq!(view.draws(), vec![0.0]);
        assert_eq!(view.last_time(), Some("00:00"));
        assert!(view.calls.contains(&Call::Controls(true)));
        assert!(view.calls.contains(&Call::Glyph(ToggleGlyph::Play)));
    }
}

#[test]
fn natural_completion_draws_final_frame_once() {
    let mut clock = clock();
    let mut view = RecordingView::default();
    let now = Instant::now();
    clock.start(0, 1, now, &mut view);
    view.clear();

    let mut t = now;
    let mut ticks = 0;
    while clock.is_ticking() {
        t += PERIOD;
        assert!(clock.poll(t, &mut view));
        ticks += 1;
        assert!(ticks < 1000, "countdown never completed");
    }
    // 1s / 16ms rounds up to 63 ticks.
    assert_eq!(ticks, 63);

    let draws = view.draws();
    assert_eq!(draws.iter().filter(|p| **p == 1.0).count(), 1);
    assert_eq!(draws.last(), Some(&1.0));
    assert!(draws.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(view.last_time(), Some("00:00"));
    assert_eq!(clock.phase(), Phase::Idle);
    assert_eq!(clock.state().remaining, 0.0);

    // Nothing keeps ticking afterwards.
    view.clear();
    assert!(!clock.poll(t + PERIOD * 10, &mut view));
    clock.tick(t + PERIOD * 11, &mut view);
    assert!(view.calls.is_empty());
}

#[test]
fn ticks_report_progress_and_text() {
    let mut clock = clock();
    let mut view = RecordingView::default();
    let now = Instant::now();
    clock.start(1, 5, now, &mut view);
    view.clear();
    clock.tick(now + PERIOD, &mut view);

    let expected = PERIOD.as_secs_f64() / 65.0;
    match view.calls.as_slice() {
        [Call::Draw(p), Call::Time(t)] => {
            assert!((p - expected).abs() < 1e-12);
            assert_eq!(t, "01:04");
        }
        other => panic!("unexpected calls {other:?}"),
    }
}

#[test]
fn anchored_mode_completes_on_wall_clock() {
    let mut clock = CountdownClock::new(PERIOD, TickMode::Anchored);
    let mut view = RecordingView::default();
    let now = Instant::now();
    clock.start(0, 2, now, &mut view);
    view.clear();

    // A stalled scheduler: one late tick still lands on the right time.
    clock.tick(now + Duration::from_millis(1500), &mut view);
    assert!((clock.state().remaining - 0.5).abs() < 1e-9);
    clock.tick(now + Duration::from_secs(3), &mut view);
    assert_eq!(clock.phase(), Phase::Idle);
    assert_eq!(view.draws().last(), Some(&1.0));
}

#[test]
fn anchored_pause_past_the_deadline_completes() {
    let mut clock = CountdownClock::new(PERIOD, TickMode::Anchored);
    let mut view = RecordingView::default();
    let now = Instant::now();
    clock.start(0, 2, now, &mut view);
    clock.tick(now + Duration::from_millis(1900), &mut view);
    view.clear();

    // The loop stalled past the end before the pause key was handled.
    clock.pause(now + Duration::from_secs(3), &mut view);
    assert_eq!(clock.phase(), Phase::Idle);
    assert!(!clock.is_ticking());
    assert_eq!(clock.state().remaining, 0.0);
    assert_eq!(clock.state().total, 0.0);
    assert_eq!(view.draws(), vec![1.0]);
    assert_eq!(view.last_time(), Some("00:00"));
    assert!(view.calls.contains(&Call::Glyph(ToggleGlyph::Play)));
    assert!(view.calls.contains(&Call::Controls(true)));
}

#[test]
fn rendered_frames_follow_the_clock() {
    let config = TimerConfig::default();
    let mut clock = clock();
    let mut view = RecordingView::default();
    let now = Instant::now();
    clock.start(0, 2, now, &mut view);
    tick_until(&mut clock, now, 0.0, &mut view);

    for p in view.draws() {
        let scene = Scene::for_progress(p, &config);
        let has_arc = scene
            .commands()
            .iter()
            .any(|c| matches!(c, countdown_dial::DrawCommand::Arc { .. }));
        assert_eq!(has_arc, p < 1.0, "progress {p}");
    }
}

#[test]
fn display_formatting() {
    assert_eq!(format_mmss(65.0), "01:05");
    assert_eq!(format_mmss(0.0), "00:00");
    assert_eq!(format_mmss(3599.0), "59:59");
}
