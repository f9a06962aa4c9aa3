use foundation::geo::LatLng;
use foundation::time::{Duration, Timestamp};
use runtime::event_bus::EventBus;
use runtime::timers::TimerQueue;

use crate::flight::FlightController;
use crate::mode::OVERVIEW_MAX_ZOOM;
use crate::state::{TargetView, ViewState};
use crate::widget::MapWidget;

/// Geographic center used for every Alaska-level camera target.
pub const ALASKA_CENTER: LatLng = LatLng::new(64.0685, -152.2782);
/// Overview-tier zoom, the "reset to overview" target.
pub const ALASKA_OVERVIEW_ZOOM: f64 = 5.0;
/// Detail-tier zoom, the boundary-click zoom-in target.
pub const ALASKA_DETAIL_ZOOM: f64 = 6.0;
/// World reset target.
pub const WORLD_CENTER: LatLng = LatLng::new(20.0, 0.0);
pub const WORLD_ZOOM: f64 = 2.0;

/// Flight durations.
pub const BOUNDARY_ZOOM_IN_DURATION: Duration = Duration::from_millis(2_500);
pub const BOUNDARY_ZOOM_OUT_DURATION: Duration = Duration::from_millis(2_000);
pub const REGION_FLIGHT_DURATION: Duration = Duration::from_millis(1_500);
pub const OVERVIEW_RESET_DURATION: Duration = Duration::from_millis(2_000);
pub const WORLD_FLIGHT_DURATION: Duration = Duration::from_millis(2_500);

/// The view-state core: tracks zoom, derives display flags, and turns user
/// exploration into camera flights.
///
/// Single-writer: the host owns one `Explorer` and drives it from its
/// event loop, so nothing here needs locking.
#[derive(Debug)]
pub struct Explorer {
    state: ViewState,
    flights: FlightController,
    timers: TimerQueue,
    bus: EventBus,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Explorer {
    pub fn new() -> Self {
        Self {
            state: ViewState::new(ALASKA_OVERVIEW_ZOOM),
            flights: FlightController::new(),
            timers: TimerQueue::new(),
            bus: EventBus::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn pending_target(&self) -> Option<&TargetView> {
        self.flights.pending()
    }

    pub fn drain_events(&mut self) -> Vec<runtime::event_bus::Event> {
        self.bus.drain()
    }

    /// Feed a zoom value observed from the widget (zoom-end and move-end
    /// both land here). Pushes visibility commands only on actual change.
    pub fn report_zoom<W: MapWidget>(&mut self, zoom: f64, now: Timestamp, widget: &mut W) {
        let change = self.state.apply_zoom(zoom);
        if change.boundary_visibility_changed {
            widget.set_boundary_visible(self.state.flags.boundary_visible);
        }
        if change.mode_changed {
            self.bus
                .emit(now, "mode", format!("{:?}", self.state.flags.mode));
        }
    }

    /// Boundary polygon click: zoom into Alaska from the overview tier,
    /// back out to the overview otherwise.
    pub fn explore_boundary<W: MapWidget>(&mut self, now: Timestamp, widget: &mut W) {
        let target = if self.state.zoom <= OVERVIEW_MAX_ZOOM {
            TargetView::new(ALASKA_CENTER, ALASKA_DETAIL_ZOOM, BOUNDARY_ZOOM_IN_DURATION)
        } else {
            TargetView::new(
                ALASKA_CENTER,
                ALASKA_OVERVIEW_ZOOM,
                BOUNDARY_ZOOM_OUT_DURATION,
            )
        };
        self.fly(target, now, widget);
    }

    /// Region marker (or popup button) click: fly to the region's
    /// preconfigured camera at the fixed region-flight duration.
    pub fn explore_region<W: MapWidget>(
        &mut self,
        center: LatLng,
        zoom: f64,
        now: Timestamp,
        widget: &mut W,
    ) {
        self.fly(
            TargetView::new(center, zoom, REGION_FLIGHT_DURATION),
            now,
            widget,
        );
    }

    pub fn reset_to_overview<W: MapWidget>(&mut self, now: Timestamp, widget: &mut W) {
        self.fly(
            TargetView::new(ALASKA_CENTER, ALASKA_OVERVIEW_ZOOM, OVERVIEW_RESET_DURATION),
            now,
            widget,
        );
    }

    pub fn zoom_to_world<W: MapWidget>(&mut self, now: Timestamp, widget: &mut W) {
        self.fly(
            TargetView::new(WORLD_CENTER, WORLD_ZOOM, WORLD_FLIGHT_DURATION),
            now,
            widget,
        );
    }

    /// Advance timers; returns the flight that completed at `now`, if any.
    pub fn tick(&mut self, now: Timestamp) -> Option<TargetView> {
        let mut completed = None;
        for id in self.timers.fire_due(now) {
            if let Some(target) = self.flights.on_timer(id) {
                self.bus.emit(
                    now,
                    "flight",
                    format!("completed at zoom {:.1}", target.zoom),
                );
                completed = Some(target);
            }
        }
        completed
    }

    fn fly<W: MapWidget>(&mut self, target: TargetView, now: Timestamp, widget: &mut W) {
        if let Some(superseded) = self.flights.begin(target, now, &mut self.timers) {
            self.bus.emit(
                now,
                "flight",
                format!("superseded flight to zoom {:.1}", superseded.zoom),
            );
        }
        widget.fly_to(target);
        self.bus
            .emit(now, "flight", format!("begin to zoom {:.1}", target.zoom));
    }
}
