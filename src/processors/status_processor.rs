use crate::dashboard::Renderer;
use crate::dashboard::status_panel::StatusUpdate;
use crate::irrigation_api::irrigation_client::IrrigationApiTrait;
use crate::irrigation_api::models::status_snapshot::StatusSnapshot;
use crate::locale::{LocaleFormatter, TIMESTAMP_PLACEHOLDER};
use crate::processors::{GenerationGuard, RefreshProcessor};
use std::sync::Arc;
use tracing::{debug, error, trace};

pub struct StatusProcessor<T>
where
    T: IrrigationApiTrait + Send + Sync + 'static,
{
    pub client: T,
    pub renderer: Arc<dyn Renderer>,
    pub formatter: Arc<dyn LocaleFormatter>,
    generations: GenerationGuard,
}

impl<T: IrrigationApiTrait + Send + Sync + 'static> StatusProcessor<T> {
    pub fn new(
        client: T,
        renderer: Arc<dyn Renderer>,
        formatter: Arc<dyn LocaleFormatter>,
    ) -> Self {
        Self {
            client,
            renderer,
            formatter,
            generations: GenerationGuard::default(),
        }
    }

    pub fn build_update(snapshot: &StatusSnapshot, formatter: &dyn LocaleFormatter) -> StatusUpdate {
        let timestamp_line = formatter.format_timestamp(snapshot.timestamp.as_deref());
        if snapshot.watering {
            StatusUpdate::watering(snapshot.duration, timestamp_line)
        } else {
            StatusUpdate::waiting(timestamp_line)
        }
    }
}

impl<T: IrrigationApiTrait + Send + Sync + 'static> RefreshProcessor for StatusProcessor<T> {
    async fn refresh(&self) {
        let generation = self.generations.issue();
        let result = self.client.get_status().await;

        if !self.generations.commit(generation) {
            debug!("Dropping stale status response #{}", generation);
            return;
        }

        let update = match result {
            Ok(snapshot) => {
                trace!("{:?}", &snapshot);
                Self::build_update(&snapshot, self.formatter.as_ref())
            }
            Err(e) => {
                error!("Failed to fetch controller status: {:?}", e);
                StatusUpdate::error(TIMESTAMP_PLACEHOLDER)
            }
        };
        self.renderer.render_status(&update);
    }
}
