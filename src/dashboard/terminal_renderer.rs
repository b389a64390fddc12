use crate::dashboard::schedule_panel::SchedulePanel;
use crate::dashboard::status_panel::{StatusIndicator, StatusUpdate};
use crate::dashboard::{
    DURATION_REGION, Renderer, SCHEDULE_REGION, STATUS_REGION, TIMESTAMP_REGION,
};
use std::io::Write;
use std::sync::Mutex;
use tracing::error;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const DIVIDER: &str = "  ----------------------------------------";

/// What is currently shown in each region.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub status: Option<StatusIndicator>,
    pub duration_line: String,
    pub timestamp_line: String,
    pub schedule: SchedulePanel,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            status: None,
            duration_line: String::new(),
            timestamp_line: String::new(),
            schedule: SchedulePanel::Loading,
        }
    }
}

struct Inner<W> {
    out: W,
    state: DashboardState,
}

/// Redraws the whole dashboard to `out` whenever a region changes.
pub struct TerminalRenderer<W: Write + Send> {
    inner: Mutex<Inner<W>>,
    clear_screen: bool,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out,
                state: DashboardState::default(),
            }),
            clear_screen,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> DashboardState {
        match self.inner.lock() {
            Ok(inner) => inner.state.clone(),
            Err(poisoned) => poisoned.into_inner().state.clone(),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut DashboardState)) {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        apply(&mut inner.state);
        let frame = draw(&inner.state, self.clear_screen);
        let out = &mut inner.out;
        if let Err(e) = out.write_all(frame.as_bytes()).and_then(|_| out.flush()) {
            error!("Failed to draw dashboard: {:?}", e);
        }
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render_status(&self, update: &StatusUpdate) {
        self.update(|state| {
            state.status = Some(update.indicator);
            if let Some(duration_line) = &update.duration_line {
                state.duration_line = duration_line.clone();
            }
            state.timestamp_line = update.timestamp_line.clone();
        });
    }

    fn render_schedule(&self, panel: &SchedulePanel) {
        self.update(|state| state.schedule = panel.clone());
    }
}

pub fn draw(state: &DashboardState, clear_screen: bool) -> String {
    let mut frame = String::new();
    if clear_screen {
        frame.push_str(CLEAR_SCREEN);
    }

    frame.push_str("Status da Irrigação\n");
    let status = state
        .status
        .map(|indicator| indicator.to_string())
        .unwrap_or_default();
    frame.push_str(&format!("  [{}] {}\n", STATUS_REGION, status));
    frame.push_str(&format!("  [{}] {}\n", DURATION_REGION, state.duration_line));
    frame.push_str(&format!(
        "  [{}] Última atualização: {}\n",
        TIMESTAMP_REGION, state.timestamp_line
    ));

    frame.push_str(&format!("\nPróximos horários [{}]\n", SCHEDULE_REGION));
    match state.schedule.message() {
        Some(message) => frame.push_str(&format!("  {}\n", message)),
        None => {
            for row in state.schedule.rows() {
                frame.push_str(&format!("  {}\n", row));
                if row.divider {
                    frame.push_str(DIVIDER);
                    frame.push('\n');
                }
            }
        }
    }
    frame.push('\n');
    frame
}
