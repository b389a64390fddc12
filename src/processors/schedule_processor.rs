use crate::dashboard::Renderer;
use crate::dashboard::schedule_panel::{SchedulePanel, ScheduleRow};
use crate::irrigation_api::irrigation_client::IrrigationApiTrait;
use crate::irrigation_api::models::schedule_entry::ScheduleEntry;
use crate::locale::{Clock, LocaleFormatter};
use crate::processors::{GenerationGuard, RefreshProcessor};
use chrono::{Datelike, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, error, trace};

/// A schedule entry placed on today's calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingOccurrence {
    pub at: NaiveDateTime,
    pub duration: f64,
    pub original_time: String,
    pub original_weekdays: String,
}

pub struct ScheduleProcessor<T>
where
    T: IrrigationApiTrait + Send + Sync + 'static,
{
    pub client: T,
    pub renderer: Arc<dyn Renderer>,
    pub formatter: Arc<dyn LocaleFormatter>,
    pub clock: Arc<dyn Clock>,
    generations: GenerationGuard,
}

impl<T: IrrigationApiTrait + Send + Sync + 'static> ScheduleProcessor<T> {
    pub fn new(
        client: T,
        renderer: Arc<dyn Renderer>,
        formatter: Arc<dyn LocaleFormatter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            renderer,
            formatter,
            clock,
            generations: GenerationGuard::default(),
        }
    }

    /// Entries that run today and have not started yet, earliest first.
    /// An entry starting exactly at `now` is still upcoming.
    pub fn get_upcoming(
        entries: &[ScheduleEntry],
        now: NaiveDateTime,
        formatter: &dyn LocaleFormatter,
    ) -> Vec<UpcomingOccurrence> {
        let today = formatter.weekday_abbreviation(now.weekday());

        let mut upcoming: Vec<UpcomingOccurrence> = entries
            .iter()
            .filter(|entry| entry.runs_on(today))
            .filter_map(|entry| {
                let Some(time) = entry.time_of_day() else {
                    trace!("Skipping schedule entry with unreadable time {:?}", entry.time);
                    return None;
                };
                let at = now.date().and_time(time);
                (at >= now).then(|| UpcomingOccurrence {
                    at,
                    duration: entry.duration,
                    original_time: entry.time.clone(),
                    original_weekdays: entry.weekdays_label(),
                })
            })
            .collect();

        upcoming.sort_by_key(|occurrence| occurrence.at);
        upcoming
    }

    pub fn build_panel(
        upcoming: &[UpcomingOccurrence],
        formatter: &dyn LocaleFormatter,
    ) -> SchedulePanel {
        if upcoming.is_empty() {
            return SchedulePanel::Empty;
        }

        let last = upcoming.len() - 1;
        SchedulePanel::Rows(
            upcoming
                .iter()
                .enumerate()
                .map(|(i, occurrence)| ScheduleRow {
                    time_label: formatter.format_time_of_day(occurrence.at.time()),
                    duration_label: format!("Duração: {} min", occurrence.duration),
                    weekdays_badge: occurrence.original_weekdays.clone(),
                    divider: i != last,
                })
                .collect(),
        )
    }
}

impl<T: IrrigationApiTrait + Send + Sync + 'static> RefreshProcessor for ScheduleProcessor<T> {
    async fn refresh(&self) {
        self.renderer.render_schedule(&SchedulePanel::Loading);

        let generation = self.generations.issue();
        let result = self.client.get_schedules().await;

        if !self.generations.commit(generation) {
            debug!("Dropping stale schedule response #{}", generation);
            return;
        }

        let panel = match result {
            Ok(entries) => {
                let now = self.clock.now();
                let upcoming = Self::get_upcoming(&entries, now, self.formatter.as_ref());
                debug!(
                    "{} of {} schedule entries still due today",
                    upcoming.len(),
                    entries.len()
                );
                Self::build_panel(&upcoming, self.formatter.as_ref())
            }
            Err(e) => {
                error!("Failed to fetch schedules: {:?}", e);
                SchedulePanel::Error
            }
        };
        self.renderer.render_schedule(&panel);
    }
}
