use crate::irrigation_api::irrigation_client::IrrigationApiTrait;
use crate::irrigation_api::models::schedule_entry::ScheduleEntry;
use crate::irrigation_api::models::status_snapshot::StatusSnapshot;
use anyhow::anyhow;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

type Scripted<T> = (Duration, Result<T, String>);

/// Replays scripted responses, each after its own delay. Once a script runs
/// out it answers "waiting" for status and an empty list for schedules.
#[derive(Default)]
pub struct FakeIrrigationClient {
    status: Mutex<VecDeque<Scripted<StatusSnapshot>>>,
    schedules: Mutex<VecDeque<Scripted<Vec<ScheduleEntry>>>>,
}

impl FakeIrrigationClient {
    pub fn push_status(&self, delay: Duration, result: Result<StatusSnapshot, String>) {
        self.status.lock().unwrap().push_back((delay, result));
    }

    pub fn push_schedules(&self, delay: Duration, result: Result<Vec<ScheduleEntry>, String>) {
        self.schedules.lock().unwrap().push_back((delay, result));
    }
}

impl IrrigationApiTrait for FakeIrrigationClient {
    async fn get_status(&self) -> anyhow::Result<StatusSnapshot> {
        let next = self.status.lock().unwrap().pop_front();
        let (delay, result) = next.unwrap_or_else(|| {
            (
                Duration::ZERO,
                Ok(StatusSnapshot {
                    watering: false,
                    duration: 0.0,
                    timestamp: None,
                }),
            )
        });
        tokio::time::sleep(delay).await;
        result.map_err(|e| anyhow!(e))
    }

    async fn get_schedules(&self) -> anyhow::Result<Vec<ScheduleEntry>> {
        let next = self.schedules.lock().unwrap().pop_front();
        let (delay, result) = next.unwrap_or_else(|| (Duration::ZERO, Ok(Vec::new())));
        tokio::time::sleep(delay).await;
        result.map_err(|e| anyhow!(e))
    }

    async fn login(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
