use api::{AppState, ServerConfig};
use chrono::{Local, NaiveDate};
use dashboard::{Banner, ForecastClient, ForecastPage, UI_GENERATE_COUNT};
use data_validator::Field;
use std::sync::Arc;
use tokio::net::TcpListener;

// Serve the real router on an ephemeral port
async fn spawn_server(config: ServerConfig) -> (String, Arc<AppState>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let state = Arc::new(AppState::new(config));

    tokio::spawn(api::serve(listener, state.clone()));
    (base_url, state)
}

fn fill(page: &mut ForecastPage, date: &str, temperature: &str, summary: &str) {
    let form = page.form_mut();
    form.set_field(Field::Date, date);
    form.set_field(Field::TemperatureC, temperature);
    form.set_field(Field::Summary, summary);
}

fn success(message: &str) -> Option<Banner> {
    Some(Banner::Success(message.to_string()))
}

#[tokio::test]
async fn add_edit_delete_roundtrip() {
    let (base_url, state) = spawn_server(ServerConfig::default()).await;
    let mut page = ForecastPage::new(ForecastClient::new(&base_url, "weatherforecast"));

    page.load().await;
    assert!(!page.is_loading());
    assert!(page.forecasts().is_empty());

    page.open_add();
    fill(&mut page, "2024-01-01", "20", "Warm");
    assert!(page.submit().await);
    assert!(!page.form().is_open());
    assert_eq!(page.banner().cloned(), success("Weather forecast added successfully!"));
    assert_eq!(page.forecasts().len(), 1);
    assert_eq!(page.forecasts()[0].temperature_f(), 67);

    let existing = page.forecasts()[0].clone();
    page.open_edit(existing);
    assert!(page.banner().is_none());
    page.form_mut().set_field(Field::Summary, "Balmy");
    assert!(page.submit().await);
    assert_eq!(page.banner().cloned(), success("Weather forecast updated successfully!"));
    assert_eq!(page.forecasts().len(), 1);
    assert_eq!(page.forecasts()[0].summary, "Balmy");

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert!(page.delete(date).await);
    assert_eq!(page.banner().cloned(), success("Weather forecast deleted successfully!"));
    assert!(page.forecasts().is_empty());
    assert!(state.context.weather_forecasts.is_empty());
}

#[tokio::test]
async fn invalid_form_sends_nothing() {
    let (base_url, state) = spawn_server(ServerConfig::default()).await;
    let mut page = ForecastPage::new(ForecastClient::new(&base_url, "weatherforecast"));

    page.open_add();
    fill(&mut page, "2024-01-01", "not a number", " ");
    assert!(!page.submit().await);

    assert!(page.form().is_open());
    assert!(page.form().errors().contains(Field::TemperatureC));
    assert!(page.form().errors().contains(Field::Summary));
    assert!(page.banner().is_none());
    assert!(state.context.weather_forecasts.is_empty());
}

#[tokio::test]
async fn delete_missing_shows_failure() {
    let (base_url, _state) = spawn_server(ServerConfig::default()).await;
    let mut page = ForecastPage::new(ForecastClient::new(&base_url, "second"));

    let date = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
    assert!(!page.delete(date).await);
    assert_eq!(
        page.banner().cloned(),
        Some(Banner::Error(
            "Failed to delete weather forecast. Please try again.".to_string()
        ))
    );
}

#[tokio::test]
async fn duplicate_add_rejected_when_dates_unique() {
    let config = ServerConfig {
        unique_dates: true,
        ..Default::default()
    };
    let (base_url, state) = spawn_server(config).await;
    let mut page = ForecastPage::new(ForecastClient::new(&base_url, "weatherforecast"));

    for expected in [true, false] {
        page.open_add();
        fill(&mut page, "2024-01-01", "3", "Chilly");
        assert_eq!(page.submit().await, expected);
    }

    assert_eq!(
        page.banner().cloned(),
        Some(Banner::Error(
            "Failed to add weather forecast. Please try again.".to_string()
        ))
    );
    assert_eq!(state.context.weather_forecasts.len(), 1);
}

#[tokio::test]
async fn generate_refreshes_table() {
    let (base_url, state) = spawn_server(ServerConfig::default()).await;
    let mut page = ForecastPage::new(ForecastClient::new(&base_url, "second"));

    page.generate(UI_GENERATE_COUNT).await;
    assert!(!page.is_loading());
    assert_eq!(page.forecasts().len(), UI_GENERATE_COUNT as usize);

    let today = Local::now().date_naive();
    assert!(page.forecasts().iter().all(|f| f.date > today));

    assert_eq!(state.context.second_source_forecasts.len(), 7);
    assert!(state.context.weather_forecasts.is_empty());
}
