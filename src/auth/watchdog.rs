//! Session watchdog: timed re-confirmation before assumed token expiry.
//!
//! The watchdog is a pure state machine over two deadlines. While
//! `Idle`, a long-period deadline counts down to the next confirmation
//! prompt. While `Prompting`, a one-second tick decrements the
//! remaining seconds; hitting zero means the session was abandoned and
//! the caller must force a logout.
//!
//! The machine holds no timers of its own. The owning `App` polls it
//! with the current `Instant` from the event loop and applies the
//! returned events; dropping the value cancels everything, so timer
//! lifetime is exactly the session lifetime. The schedule is purely
//! time-based - user activity does not push the prompt out.

use std::time::{Duration, Instant};

/// Period between confirmation prompts (assumed token lifetime minus
/// a safety margin).
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(14 * 60);

/// Seconds the user has to confirm before forced logout.
pub const COUNTDOWN_SECONDS: u32 = 60;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogPhase {
    Idle,
    Prompting,
}

/// Events surfaced by `poll`. `Expired` obliges the caller to log the
/// session out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogEvent {
    PromptOpened,
    CountdownTicked,
    Expired,
}

#[derive(Debug)]
pub struct SessionWatchdog {
    phase: WatchdogPhase,
    remaining_seconds: u32,
    prompt_deadline: Instant,
    tick_deadline: Instant,
}

impl SessionWatchdog {
    /// Start the watchdog for a session that began at `now`.
    pub fn start(now: Instant) -> Self {
        Self {
            phase: WatchdogPhase::Idle,
            remaining_seconds: 0,
            prompt_deadline: now + REFRESH_INTERVAL,
            tick_deadline: now,
        }
    }

    pub fn phase(&self) -> WatchdogPhase {
        self.phase
    }

    /// Seconds left to confirm. Only meaningful while `Prompting`.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Advance the machine to `now`, returning at most one event.
    pub fn poll(&mut self, now: Instant) -> Option<WatchdogEvent> {
        match self.phase {
            WatchdogPhase::Idle => {
                if now >= self.prompt_deadline {
                    self.phase = WatchdogPhase::Prompting;
                    self.remaining_seconds = COUNTDOWN_SECONDS;
                    self.tick_deadline = now + COUNTDOWN_TICK;
                    Some(WatchdogEvent::PromptOpened)
                } else {
                    None
                }
            }
            WatchdogPhase::Prompting => {
                let mut ticked = false;
                while now >= self.tick_deadline {
                    self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
                    self.tick_deadline += COUNTDOWN_TICK;
                    ticked = true;
                    if self.remaining_seconds == 0 {
                        // Abandoned: back to Idle, countdown disarmed.
                        self.phase = WatchdogPhase::Idle;
                        self.prompt_deadline = now + REFRESH_INTERVAL;
                        return Some(WatchdogEvent::Expired);
                    }
                }
                ticked.then_some(WatchdogEvent::CountdownTicked)
            }
        }
    }

    /// The user confirmed and the token refresh succeeded: leave the
    /// prompt and rearm the long-period deadline from `now`.
    pub fn confirm_succeeded(&mut self, now: Instant) {
        self.phase = WatchdogPhase::Idle;
        self.remaining_seconds = 0;
        self.prompt_deadline = now + REFRESH_INTERVAL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_interval_elapses() {
        let t0 = Instant::now();
        let mut wd = SessionWatchdog::start(t0);
        assert_eq!(wd.phase(), WatchdogPhase::Idle);
        assert_eq!(wd.poll(t0 + REFRESH_INTERVAL - Duration::from_secs(1)), None);
        assert_eq!(wd.phase(), WatchdogPhase::Idle);
    }

    #[test]
    fn test_prompt_opens_with_full_countdown() {
        let t0 = Instant::now();
        let mut wd = SessionWatchdog::start(t0);
        assert_eq!(
            wd.poll(t0 + REFRESH_INTERVAL),
            Some(WatchdogEvent::PromptOpened)
        );
        assert_eq!(wd.phase(), WatchdogPhase::Prompting);
        assert_eq!(wd.remaining_seconds(), COUNTDOWN_SECONDS);
    }

    #[test]
    fn test_countdown_ticks_then_expires() {
        let t0 = Instant::now();
        let mut wd = SessionWatchdog::start(t0);
        let prompt_at = t0 + REFRESH_INTERVAL;
        wd.poll(prompt_at);

        // 59 one-second ticks count down without expiring
        for i in 1..COUNTDOWN_SECONDS {
            let event = wd.poll(prompt_at + Duration::from_secs(u64::from(i)));
            assert_eq!(event, Some(WatchdogEvent::CountdownTicked));
            assert_eq!(wd.remaining_seconds(), COUNTDOWN_SECONDS - i);
            assert_eq!(wd.phase(), WatchdogPhase::Prompting);
        }

        // The 60th tick expires the prompt
        let event = wd.poll(prompt_at + Duration::from_secs(u64::from(COUNTDOWN_SECONDS)));
        assert_eq!(event, Some(WatchdogEvent::Expired));
        assert_eq!(wd.phase(), WatchdogPhase::Idle);
    }

    #[test]
    fn test_missed_ticks_are_caught_up() {
        let t0 = Instant::now();
        let mut wd = SessionWatchdog::start(t0);
        let prompt_at = t0 + REFRESH_INTERVAL;
        wd.poll(prompt_at);

        // A stalled loop that wakes 10 seconds late drains all the due
        // ticks in one poll.
        assert_eq!(
            wd.poll(prompt_at + Duration::from_secs(10)),
            Some(WatchdogEvent::CountdownTicked)
        );
        assert_eq!(wd.remaining_seconds(), COUNTDOWN_SECONDS - 10);
    }

    #[test]
    fn test_confirm_rearms_long_deadline() {
        let t0 = Instant::now();
        let mut wd = SessionWatchdog::start(t0);
        let prompt_at = t0 + REFRESH_INTERVAL;
        wd.poll(prompt_at);
        wd.poll(prompt_at + Duration::from_secs(5));

        let confirmed_at = prompt_at + Duration::from_secs(6);
        wd.confirm_succeeded(confirmed_at);
        assert_eq!(wd.phase(), WatchdogPhase::Idle);

        // No prompt until a full interval after confirmation
        assert_eq!(wd.poll(confirmed_at + REFRESH_INTERVAL - Duration::from_secs(1)), None);
        assert_eq!(
            wd.poll(confirmed_at + REFRESH_INTERVAL),
            Some(WatchdogEvent::PromptOpened)
        );
    }

    #[test]
    fn test_expiry_rearms_rather_than_wedges() {
        let t0 = Instant::now();
        let mut wd = SessionWatchdog::start(t0);
        let prompt_at = t0 + REFRESH_INTERVAL;
        wd.poll(prompt_at);

        let expired_at = prompt_at + Duration::from_secs(u64::from(COUNTDOWN_SECONDS) + 30);
        assert_eq!(wd.poll(expired_at), Some(WatchdogEvent::Expired));

        // If the owner keeps the machine around, it behaves like Idle
        assert_eq!(wd.poll(expired_at + Duration::from_secs(1)), None);
    }
}
