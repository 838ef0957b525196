//! Forecast Dashboard
//!
//! Front-end state for the forecast table: the add/edit modal, inline
//! validation, status banners and the HTTP client that talks to one
//! forecast route. Rendering is left to whatever UI embeds it.

mod client;
mod form;
mod page;

pub use client::{ClientError, ForecastClient};
pub use form::{ForecastForm, ModalState, SubmitMode, Submission};
pub use page::{Banner, ForecastPage, UI_GENERATE_COUNT};
