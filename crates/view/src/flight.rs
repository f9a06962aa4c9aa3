use foundation::time::Timestamp;
use runtime::timers::{TimerId, TimerQueue};

use crate::state::TargetView;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Flight {
    target: TargetView,
    timer: TimerId,
}

/// Owns the at-most-one pending camera flight.
///
/// Contract:
/// - `begin` supersedes any pending flight: its completion timer is
///   cancelled before the new one is armed (last-write-wins, no queuing).
/// - Completion fires exactly once per surviving flight and never for a
///   superseded one.
#[derive(Debug, Default)]
pub struct FlightController {
    pending: Option<Flight>,
}

impl FlightController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&TargetView> {
        self.pending.as_ref().map(|f| &f.target)
    }

    /// Start a flight toward `target`, returning the target it superseded,
    /// if any.
    pub fn begin(
        &mut self,
        target: TargetView,
        now: Timestamp,
        timers: &mut TimerQueue,
    ) -> Option<TargetView> {
        let superseded = self.pending.take().map(|flight| {
            timers.cancel(flight.timer);
            flight.target
        });

        let timer = timers.schedule(now.after(target.duration));
        self.pending = Some(Flight { target, timer });
        superseded
    }

    /// Handle a fired timer; returns the completed target when the timer
    /// belongs to the pending flight.
    pub fn on_timer(&mut self, id: TimerId) -> Option<TargetView> {
        match self.pending {
            Some(flight) if flight.timer == id => {
                self.pending = None;
                Some(flight.target)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FlightController;
    use crate::state::TargetView;
    use foundation::geo::LatLng;
    use foundation::time::{Duration, Timestamp};
    use runtime::timers::TimerQueue;

    fn target(zoom: f64, duration_ms: u64) -> TargetView {
        TargetView::new(
            LatLng::new(64.0685, -152.2782),
            zoom,
            Duration::from_millis(duration_ms),
        )
    }

    #[test]
    fn completes_once_after_duration() {
        let mut timers = TimerQueue::new();
        let mut flights = FlightController::new();

        flights.begin(target(6.0, 2_500), Timestamp(0), &mut timers);
        assert!(timers.fire_due(Timestamp(2_499)).is_empty());

        let fired = timers.fire_due(Timestamp(2_500));
        assert_eq!(fired.len(), 1);
        assert_eq!(flights.on_timer(fired[0]), Some(target(6.0, 2_500)));
        assert!(flights.pending().is_none());

        // Nothing left to fire.
        assert!(timers.fire_due(Timestamp(10_000)).is_empty());
    }

    #[test]
    fn superseding_flight_cancels_prior_completion() {
        let mut timers = TimerQueue::new();
        let mut flights = FlightController::new();

        flights.begin(target(6.0, 2_500), Timestamp(0), &mut timers);
        let superseded = flights.begin(target(10.0, 1_500), Timestamp(1_000), &mut timers);
        assert_eq!(superseded, Some(target(6.0, 2_500)));

        // Only the second flight's timer survives; exactly one completion.
        let mut completions = Vec::new();
        for id in timers.fire_due(Timestamp(60_000)) {
            completions.extend(flights.on_timer(id));
        }
        assert_eq!(completions, vec![target(10.0, 1_500)]);
    }

    #[test]
    fn stale_timer_id_does_not_complete_anything() {
        let mut timers = TimerQueue::new();
        let mut flights = FlightController::new();

        flights.begin(target(6.0, 2_500), Timestamp(0), &mut timers);
        let stale = timers.fire_due(Timestamp(2_500));
        assert_eq!(stale.len(), 1);

        // A new flight begins before the host delivers the fired id.
        flights.begin(target(2.0, 2_500), Timestamp(2_500), &mut timers);
        assert_eq!(flights.on_timer(stale[0]), None);
        assert!(flights.pending().is_some());
    }
}
