//! # Debounce Module
//!
//! Timed gating of button samples.
//!
//! A mechanical switch or touch module held down feeds the poll loop an
//! active level on every pass, which would flip an On/Off toggle at the
//! processor's clock rate. The gate accepts a sample only when the configured
//! interval has elapsed since the last accepted one; everything in between is
//! skipped. Elapsed time is the only signal: no hysteresis, no counting of
//! consecutive same-state reads.
//!
//! ## Usage
//!
//! ```
//! use panel_bridge::control::debounce::{DebounceGate, SampleDecision};
//! use panel_bridge::hal::PinLevel;
//!
//! let mut gate = DebounceGate::new(250, 0);
//!
//! assert_eq!(gate.poll(250, PinLevel::Active), SampleDecision::Accept(PinLevel::Active));
//! assert_eq!(gate.poll(300, PinLevel::Active), SampleDecision::Skip);
//! ```

use crate::hal::PinLevel;

/// Default minimum time between accepted samples, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// Outcome of a debounce poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDecision {
    /// Enough time elapsed; the sampled level may be acted on.
    Accept(PinLevel),
    /// The interval has not elapsed; the sample is dropped.
    Skip,
}

impl SampleDecision {
    /// Returns `true` when the decision accepted an [`PinLevel::Active`]
    /// sample.
    #[must_use]
    pub fn is_accepted_active(self) -> bool {
        matches!(self, SampleDecision::Accept(PinLevel::Active))
    }
}

/// Single-threshold timed debounce gate.
///
/// `last_sample` is refreshed on every accepted poll, including polls whose
/// level turned out to be inactive, so a held-down release still pays the
/// full interval before the next accept.
#[derive(Debug, Clone, Copy)]
pub struct DebounceGate {
    /// Minimum time between accepted samples, in milliseconds.
    interval_ms: u64,
    /// Timestamp of the last accepted sample.
    last_sample_ms: u64,
}

impl DebounceGate {
    /// Creates a gate with the given interval, stamped at `now_ms` so the
    /// first accept happens one full interval after construction.
    #[must_use]
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_sample_ms: now_ms,
        }
    }

    /// The configured minimum time between accepted samples.
    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Decides whether the sampled level may be acted on at `now_ms`.
    ///
    /// Wrapping subtraction keeps the elapsed computation correct across
    /// rollover of the millisecond counter.
    pub fn poll(&mut self, now_ms: u64, level: PinLevel) -> SampleDecision {
        if now_ms.wrapping_sub(self.last_sample_ms) < self.interval_ms {
            return SampleDecision::Skip;
        }
        self.last_sample_ms = now_ms;
        SampleDecision::Accept(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Gate Timing Tests ====================

    #[test]
    fn test_skip_before_interval() {
        let mut gate = DebounceGate::new(250, 0);
        assert_eq!(gate.poll(100, PinLevel::Active), SampleDecision::Skip);
        assert_eq!(gate.poll(249, PinLevel::Active), SampleDecision::Skip);
    }

    #[test]
    fn test_accept_at_exact_interval() {
        let mut gate = DebounceGate::new(250, 0);
        assert_eq!(
            gate.poll(250, PinLevel::Active),
            SampleDecision::Accept(PinLevel::Active)
        );
    }

    #[test]
    fn test_accept_restamps_even_when_inactive() {
        let mut gate = DebounceGate::new(250, 0);

        // Inactive sample is still an accept and still refreshes the stamp
        assert_eq!(
            gate.poll(250, PinLevel::Inactive),
            SampleDecision::Accept(PinLevel::Inactive)
        );

        // Next poll only 100ms after the inactive accept: skipped
        assert_eq!(gate.poll(350, PinLevel::Active), SampleDecision::Skip);
        assert_eq!(
            gate.poll(500, PinLevel::Active),
            SampleDecision::Accept(PinLevel::Active)
        );
    }

    #[test]
    fn test_skip_does_not_restamp() {
        let mut gate = DebounceGate::new(250, 0);
        assert_eq!(gate.poll(200, PinLevel::Active), SampleDecision::Skip);

        // A skipped poll at t=200 must not delay the accept at t=250
        assert_eq!(
            gate.poll(250, PinLevel::Active),
            SampleDecision::Accept(PinLevel::Active)
        );
    }

    #[test]
    fn test_zero_interval_accepts_every_poll() {
        let mut gate = DebounceGate::new(0, 0);
        assert_eq!(
            gate.poll(0, PinLevel::Active),
            SampleDecision::Accept(PinLevel::Active)
        );
        assert_eq!(
            gate.poll(0, PinLevel::Inactive),
            SampleDecision::Accept(PinLevel::Inactive)
        );
    }

    // ==================== Rollover Tests ====================

    #[test]
    fn test_elapsed_across_clock_rollover() {
        let mut gate = DebounceGate::new(250, u64::MAX - 100);

        // 100ms before rollover + 150ms after = 250ms elapsed
        assert_eq!(gate.poll(u64::MAX - 50, PinLevel::Active), SampleDecision::Skip);
        assert_eq!(
            gate.poll(149, PinLevel::Active),
            SampleDecision::Accept(PinLevel::Active)
        );
    }

    // ==================== Decision Helper Tests ====================

    #[test]
    fn test_is_accepted_active() {
        assert!(SampleDecision::Accept(PinLevel::Active).is_accepted_active());
        assert!(!SampleDecision::Accept(PinLevel::Inactive).is_accepted_active());
        assert!(!SampleDecision::Skip.is_accepted_active());
    }

    #[test]
    fn test_default_interval_constant() {
        assert_eq!(DEFAULT_DEBOUNCE_MS, 250);
    }
}
