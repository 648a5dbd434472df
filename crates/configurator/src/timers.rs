use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum CountdownState {
    #[default]
    Idle,
    Running {
        deadline: Instant,
    },
    Fired,
    Cancelled,
}

/// One-shot timer driven by the caller's clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown {
    state: CountdownState,
}

impl Countdown {
    pub fn new() -> Self {
        Default::default()
    }

    /// Does nothing once the countdown has fired or was cancelled.
    pub fn start(&mut self, now: Instant, duration: Duration) {
        if let CountdownState::Idle | CountdownState::Running { .. } = self.state {
            self.state = CountdownState::Running {
                deadline: now + duration,
            };
        }
    }

    /// Returns true exactly once, on the first tick at or after the deadline.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            CountdownState::Running { deadline } if deadline <= now => {
                self.state = CountdownState::Fired;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        if let CountdownState::Idle | CountdownState::Running { .. } = self.state {
            self.state = CountdownState::Cancelled;
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            CountdownState::Running { deadline } => Some(deadline.saturating_duration_since(now)),
            _ => None,
        }
    }
}

/// A banner that is hidden either by the user or when its countdown runs out.
#[derive(Debug, Clone, Copy, Default)]
pub struct DismissibleBanner {
    visible: bool,
    countdown: Countdown,
}

impl DismissibleBanner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn show(&mut self, now: Instant, auto_dismiss_after: Option<Duration>) {
        self.visible = true;
        self.countdown = Countdown::new();

        if let Some(duration) = auto_dismiss_after {
            self.countdown.start(now, duration);
        }
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.countdown.cancel();
    }

    /// The banner goes away without firing its countdown.
    pub fn unmount(&mut self) {
        self.countdown.cancel();
    }

    /// Returns true when the banner was hidden by this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.countdown.tick(now) {
            self.visible = false;
            return true;
        }

        false
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn seconds_left(&self, now: Instant) -> Option<u64> {
        self.countdown
            .remaining(now)
            .map(|remaining| remaining.as_secs_f64().ceil() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    #[allow(non_snake_case)]
    fn tick__after_deadline__should_fire_only_once() {
        let start = Instant::now();
        let mut countdown = Countdown::new();

        countdown.start(start, SECOND * 5);

        assert!(!countdown.tick(start + SECOND * 4));
        assert!(countdown.tick(start + SECOND * 5));
        assert!(!countdown.tick(start + SECOND * 6));
        assert_eq!(countdown.state(), CountdownState::Fired);
    }

    #[test]
    #[allow(non_snake_case)]
    fn tick__cancelled_countdown__should_never_fire() {
        let start = Instant::now();
        let mut countdown = Countdown::new();

        countdown.start(start, SECOND);
        countdown.cancel();

        assert!(!countdown.tick(start + SECOND * 10));

        countdown.start(start, SECOND);
        assert!(!countdown.tick(start + SECOND * 10));
        assert_eq!(countdown.state(), CountdownState::Cancelled);
    }

    #[test]
    #[allow(non_snake_case)]
    fn remaining__running_countdown__should_count_down_to_zero() {
        let start = Instant::now();
        let mut countdown = Countdown::new();

        assert_eq!(countdown.remaining(start), None);

        countdown.start(start, SECOND * 3);

        assert_eq!(countdown.remaining(start + SECOND), Some(SECOND * 2));
        assert_eq!(countdown.remaining(start + SECOND * 5), Some(Duration::ZERO));
    }

    #[test]
    #[allow(non_snake_case)]
    fn tick__banner_with_auto_dismiss__should_hide_it() {
        let start = Instant::now();
        let mut banner = DismissibleBanner::new();

        banner.show(start, Some(SECOND * 10));

        assert!(banner.is_visible());
        assert_eq!(banner.seconds_left(start + SECOND * 3), Some(7));
        assert!(!banner.tick(start + SECOND * 9));
        assert!(banner.tick(start + SECOND * 10));
        assert!(!banner.is_visible());
    }

    #[test]
    #[allow(non_snake_case)]
    fn dismiss__visible_banner__should_hide_it_and_cancel_countdown() {
        let start = Instant::now();
        let mut banner = DismissibleBanner::new();

        banner.show(start, Some(SECOND * 10));
        banner.dismiss();

        assert!(!banner.is_visible());
        assert!(!banner.tick(start + SECOND * 10));
        assert_eq!(banner.seconds_left(start), None);
    }

    #[test]
    #[allow(non_snake_case)]
    fn unmount__banner_with_countdown__should_not_fire_later() {
        let start = Instant::now();
        let mut banner = DismissibleBanner::new();

        banner.show(start, Some(SECOND));
        banner.unmount();

        assert!(!banner.tick(start + SECOND * 2));
    }

    #[test]
    #[allow(non_snake_case)]
    fn show__without_auto_dismiss__should_stay_visible() {
        let start = Instant::now();
        let mut banner = DismissibleBanner::new();

        banner.show(start, None);

        assert!(!banner.tick(start + SECOND * 100));
        assert!(banner.is_visible());
    }
}
