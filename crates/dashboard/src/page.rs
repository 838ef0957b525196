//! Forecast page: table, banners and the actions that drive the client

use crate::client::{ClientError, ForecastClient};
use crate::form::{ForecastForm, SubmitMode};
use chrono::NaiveDate;
use storage::ForecastRecord;
use tracing::{error, warn};

/// Batch size requested by the "Generate New Forecast" button
pub const UI_GENERATE_COUNT: u32 = 7;

/// Dismissible status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Load,
    Generate,
    Add,
    Update,
    Delete,
}

impl Action {
    fn noun(self) -> &'static str {
        match self {
            Action::Load | Action::Generate => "weather forecasts",
            _ => "weather forecast",
        }
    }

    fn verb(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Action::Load => ("load", "loading", "loaded"),
            Action::Generate => ("generate", "generating", "generated"),
            Action::Add => ("add", "adding", "added"),
            Action::Update => ("update", "updating", "updated"),
            Action::Delete => ("delete", "deleting", "deleted"),
        }
    }

    fn succeeded(self) -> String {
        format!("Weather forecast {} successfully!", self.verb().2)
    }

    /// The server answered but refused
    fn failed(self) -> String {
        format!("Failed to {} {}. Please try again.", self.verb().0, self.noun())
    }

    /// The request never got a usable answer
    fn errored(self) -> String {
        format!("Error {} {}. Please try again.", self.verb().1, self.noun())
    }
}

/// State of the forecast page
pub struct ForecastPage {
    client: ForecastClient,
    forecasts: Vec<ForecastRecord>,
    loading: bool,
    submitting: bool,
    form: ForecastForm,
    banner: Option<Banner>,
}

impl ForecastPage {
    /// New page; shows as loading until the first `load`
    pub fn new(client: ForecastClient) -> Self {
        Self {
            client,
            forecasts: Vec::new(),
            loading: true,
            submitting: false,
            form: ForecastForm::new(),
            banner: None,
        }
    }

    pub fn forecasts(&self) -> &[ForecastRecord] {
        &self.forecasts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn form(&self) -> &ForecastForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ForecastForm {
        &mut self.form
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Open the add modal and clear any banner
    pub fn open_add(&mut self) {
        self.banner = None;
        self.form.open_add();
    }

    /// Open the edit modal for a row and clear any banner
    pub fn open_edit(&mut self, record: ForecastRecord) {
        self.banner = None;
        self.form.open_edit(record);
    }

    pub fn close_modal(&mut self) {
        self.form.close();
    }

    /// Refresh the table from the server
    pub async fn load(&mut self) {
        match self.client.list().await {
            Ok(forecasts) => self.forecasts = forecasts,
            Err(err) => self.report(Action::Load, &err),
        }
        self.loading = false;
    }

    /// Generate a batch on the server, then refresh the table
    pub async fn generate(&mut self, count: u32) {
        self.loading = true;
        match self.client.generate(count).await {
            Ok(_) => self.load().await,
            Err(err) => {
                self.report(Action::Generate, &err);
                self.loading = false;
            }
        }
    }

    /// Submit the modal form. Returns whether the server accepted it.
    ///
    /// Invalid input stays in the open form without a request.
    pub async fn submit(&mut self) -> bool {
        let Ok(submission) = self.form.submit() else {
            return false;
        };

        self.submitting = true;
        let (action, result) = match submission.mode {
            SubmitMode::Create => (Action::Add, self.client.create(&submission.record).await),
            SubmitMode::Update => (Action::Update, self.client.update(&submission.record).await),
        };
        self.submitting = false;

        match result {
            Ok(_) => {
                self.form.close();
                self.banner = Some(Banner::Success(action.succeeded()));
                self.load().await;
                true
            }
            Err(err) => {
                if let ClientError::Validation(errors) = &err {
                    self.form.set_errors(errors.clone());
                }
                self.report(action, &err);
                false
            }
        }
    }

    /// Delete the forecast for a date (after the user confirmed)
    pub async fn delete(&mut self, date: NaiveDate) -> bool {
        match self.client.delete(date).await {
            Ok(()) => {
                self.banner = Some(Banner::Success(Action::Delete.succeeded()));
                self.load().await;
                true
            }
            Err(err) => {
                self.report(Action::Delete, &err);
                false
            }
        }
    }

    fn report(&mut self, action: Action, err: &ClientError) {
        let message = match err {
            ClientError::Transport(e) => {
                error!("Error talking to {}: {}", self.client.endpoint(), e);
                action.errored()
            }
            other => {
                warn!("Request to {} refused: {}", self.client.endpoint(), other);
                action.failed()
            }
        };
        self.banner = Some(Banner::Error(message));
    }
}
