use crate::config::ControllerConfig;
use crate::irrigation_api::models::request::login_request::LoginRequest;
use crate::irrigation_api::models::schedule_entry::ScheduleEntry;
use crate::irrigation_api::models::status_snapshot::StatusSnapshot;
use anyhow::{Context, bail};
use reqwest::{Response, Url};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone)]
pub struct IrrigationClient {
    client: reqwest::Client,
    status_url: Url,
    schedules_url: Url,
    login_url: Url,
    credentials: Option<(String, String)>,
    needs_login: Arc<AtomicBool>,
}

impl IrrigationClient {
    pub fn new(config: &ControllerConfig, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let credentials = config.credentials();

        Ok(Self {
            client: builder.build()?,
            status_url: config.endpoint(&config.status_path)?,
            schedules_url: config.endpoint(&config.schedules_path)?,
            login_url: config.endpoint(&config.login_path)?,
            needs_login: Arc::new(AtomicBool::new(credentials.is_some())),
            credentials,
        })
    }

    /// The controller answers unauthenticated requests with a redirect to its
    /// login page, which `reqwest` follows.
    fn landed_on_login(&self, response: &Response) -> bool {
        response.url().path() == self.login_url.path()
    }

    async fn login_if_needed(&self) -> anyhow::Result<()> {
        if self.needs_login.load(Ordering::SeqCst) {
            self.login().await?;
        }
        Ok(())
    }
}

impl IrrigationApiTrait for IrrigationClient {
    async fn get_status(&self) -> anyhow::Result<StatusSnapshot> {
        let response = self.client.get(self.status_url.clone()).send().await?;

        let contents = response.text().await?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Unable to deserialize response. Body was: \"{}\"", contents))
    }

    async fn get_schedules(&self) -> anyhow::Result<Vec<ScheduleEntry>> {
        self.login_if_needed().await?;

        let response = self
            .client
            .get(self.schedules_url.clone())
            .send()
            .await?
            .error_for_status()?;

        if self.landed_on_login(&response) {
            if self.credentials.is_some() {
                self.needs_login.store(true, Ordering::SeqCst);
            }
            bail!("Session rejected by controller, redirected to {}", response.url());
        }

        let contents = response.text().await?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Unable to deserialize response. Body was: \"{}\"", contents))
    }

    async fn login(&self) -> anyhow::Result<()> {
        let Some((email, password)) = &self.credentials else {
            bail!("No controller credentials configured");
        };

        debug!("Logging in to {}", self.login_url);
        let response = self
            .client
            .post(self.login_url.clone())
            .form(&LoginRequest { email, password })
            .send()
            .await?
            .error_for_status()?;

        if self.landed_on_login(&response) {
            bail!("Controller rejected the login for {}", email);
        }

        self.needs_login.store(false, Ordering::SeqCst);
        info!("Logged in to controller as {}", email);
        Ok(())
    }
}

pub trait IrrigationApiTrait {
    fn get_status(
        &self,
    ) -> impl std::future::Future<Output = anyhow::Result<StatusSnapshot>> + Send;
    fn get_schedules(
        &self,
    ) -> impl std::future::Future<Output = anyhow::Result<Vec<ScheduleEntry>>> + Send;
    fn login(&self) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;
}

impl<T> IrrigationApiTrait for Arc<T>
where
    T: IrrigationApiTrait + Send + Sync,
{
    async fn get_status(&self) -> anyhow::Result<StatusSnapshot> {
        self.as_ref().get_status().await
    }

    async fn get_schedules(&self) -> anyhow::Result<Vec<ScheduleEntry>> {
        self.as_ref().get_schedules().await
    }

    async fn login(&self) -> anyhow::Result<()> {
        self.as_ref().login().await
    }
}
