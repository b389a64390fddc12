use crate::dashboard::schedule_panel::SchedulePanel;
use crate::dashboard::status_panel::StatusUpdate;

#[cfg(test)]
pub mod recording_renderer;
pub mod schedule_panel;
pub mod status_panel;
pub mod terminal_renderer;

// Region names, matching the element ids of the controller's web page.
pub const STATUS_REGION: &str = "statusRega";
pub const DURATION_REGION: &str = "duracaoRega";
pub const TIMESTAMP_REGION: &str = "timestampStatus";
pub const SCHEDULE_REGION: &str = "proximosHorariosContainer";

/// Output sink for the two dashboard views.
///
/// Implementations must make each call atomic with respect to the region it
/// touches; calls for the status and schedule views may arrive from different
/// tasks concurrently.
pub trait Renderer: Send + Sync {
    fn render_status(&self, update: &StatusUpdate);
    fn render_schedule(&self, panel: &SchedulePanel);
}
