use crate::dashboard::Renderer;
use crate::dashboard::schedule_panel::SchedulePanel;
use crate::dashboard::status_panel::StatusUpdate;
use std::sync::Mutex;

/// Keeps every call in order so tests can inspect the history of each region.
#[derive(Default)]
pub struct RecordingRenderer {
    pub status: Mutex<Vec<StatusUpdate>>,
    pub schedule: Mutex<Vec<SchedulePanel>>,
}

impl RecordingRenderer {
    pub fn status_updates(&self) -> Vec<StatusUpdate> {
        self.status.lock().unwrap().clone()
    }

    pub fn schedule_panels(&self) -> Vec<SchedulePanel> {
        self.schedule.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render_status(&self, update: &StatusUpdate) {
        self.status.lock().unwrap().push(update.clone());
    }

    fn render_schedule(&self, panel: &SchedulePanel) {
        self.schedule.lock().unwrap().push(panel.clone());
    }
}
