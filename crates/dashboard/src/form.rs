//! Add/edit modal form

use data_validator::{Field, ForecastInput, ValidationErrors};
use storage::{ForecastRecord, MAX_SUMMARY_LEN};

/// Which modal, if any, is showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    AddOpen,
    /// Editing the given record; its date is read-only
    EditOpen(ForecastRecord),
}

/// Request the form resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// POST
    Create,
    /// PUT
    Update,
}

/// A validated form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub mode: SubmitMode,
    pub record: ForecastRecord,
}

/// Modal form state: raw field values plus inline errors
#[derive(Debug, Clone, Default)]
pub struct ForecastForm {
    state: ModalState,
    input: ForecastInput,
    errors: ValidationErrors,
}

impl ForecastForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn input(&self) -> &ForecastInput {
        &self.input
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.state, ModalState::EditOpen(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit_mode() {
            "Edit Weather Forecast"
        } else {
            "Add New Weather Forecast"
        }
    }

    pub fn submit_label(&self, submitting: bool) -> &'static str {
        match (self.is_edit_mode(), submitting) {
            (true, true) => "Updating...",
            (true, false) => "Update Forecast",
            (false, true) => "Adding...",
            (false, false) => "Add Forecast",
        }
    }

    /// Character counter shown under the summary field
    pub fn summary_counter(&self) -> String {
        format!("{}/{} characters", self.input.summary.chars().count(), MAX_SUMMARY_LEN)
    }

    /// Open an empty form for a new forecast
    pub fn open_add(&mut self) {
        self.state = ModalState::AddOpen;
        self.input = ForecastInput::default();
        self.errors = ValidationErrors::new();
    }

    /// Open the form pre-filled from an existing forecast
    pub fn open_edit(&mut self, record: ForecastRecord) {
        self.input = ForecastInput::from(&record);
        self.errors = ValidationErrors::new();
        self.state = ModalState::EditOpen(record);
    }

    /// Close and reset the form
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
        self.input = ForecastInput::default();
        self.errors = ValidationErrors::new();
    }

    /// Change one field and clear its error.
    ///
    /// The date cannot change while editing, and the summary is capped.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Date if self.is_edit_mode() => return,
            Field::Date => self.input.date = value.to_string(),
            Field::TemperatureC => self.input.temperature_c = value.to_string(),
            Field::Summary => self.input.summary = value.chars().take(MAX_SUMMARY_LEN).collect(),
        }
        self.errors.clear(field);
    }

    /// Replace the inline errors, e.g. with those reported by the server
    pub fn set_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    /// Validate the fields; on failure the errors are kept for display
    pub fn submit(&mut self) -> Result<Submission, ValidationErrors> {
        let mode = match self.state {
            ModalState::Closed => return Err(ValidationErrors::new()),
            ModalState::AddOpen => SubmitMode::Create,
            ModalState::EditOpen(_) => SubmitMode::Update,
        };

        match data_validator::parse(&self.input) {
            Ok(record) => {
                self.errors = ValidationErrors::new();
                Ok(Submission { mode, record })
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
