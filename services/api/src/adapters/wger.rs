//! services/api/src/adapters/wger.rs
//!
//! This module contains the adapter for the wger Workout Manager exercise catalog.
//! It implements the `ExerciseCatalogService` port from the `core` crate.

use std::time::Duration;

use async_trait::async_trait;
use fitness_tracker_core::domain::ExerciseFilter;
use fitness_tracker_core::ports::{ExerciseCatalogService, PortError, PortResult};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{error, info};

/// wger's numeric id for English.
const LANGUAGE_ENGLISH_ID: &str = "2";

/// One page of the catalog's paginated listing. Only `results` is consumed.
#[derive(Deserialize)]
struct ExercisePage {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `ExerciseCatalogService` port over wger's REST API.
#[derive(Clone)]
pub struct WgerCatalogAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WgerCatalogAdapter {
    /// Creates a new `WgerCatalogAdapter` targeting the exercise listing at `base_url`.
    pub fn new(base_url: String, api_key: Option<String>) -> PortResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fitness-tracker/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

//=========================================================================================
// `ExerciseCatalogService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ExerciseCatalogService for WgerCatalogAdapter {
    /// A failing catalog degrades to "no recommendations": upstream errors are
    /// logged and an empty list is returned. Only an unreadable success body
    /// is reported as an error.
    async fn fetch_exercises(&self, filter: &ExerciseFilter) -> PortResult<Vec<serde_json::Value>> {
        let mut request = self
            .client
            .get(&self.base_url)
            .query(&[("language", LANGUAGE_ENGLISH_ID)]);
        if let Some(category) = &filter.category {
            request = request.query(&[("category", category)]);
        }
        if let Some(equipment) = &filter.equipment {
            request = request.query(&[("equipment", equipment)]);
        }
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Token {}", key));
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching exercises: {}", e);
                return Ok(Vec::new());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Wger API error: {} - {}", status, body);
            return Ok(Vec::new());
        }

        let page = response
            .json::<ExercisePage>()
            .await
            .map_err(|e| PortError::Unexpected(format!("Invalid catalog response: {}", e)))?;
        info!("Successfully fetched {} exercises.", page.results.len());
        Ok(page.results)
    }

    async fn list_exercises(&self) -> PortResult<serde_json::Value> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("language", "en")])
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PortError::Unexpected(format!(
                "Catalog responded with {}",
                response.status()
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EXERCISE_PATH: &str = "/api/v2/exercise/";

    fn adapter(server: &MockServer, api_key: Option<&str>) -> WgerCatalogAdapter {
        WgerCatalogAdapter::new(
            format!("{}{}", server.uri(), EXERCISE_PATH),
            api_key.map(str::to_string),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_exercises_returns_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EXERCISE_PATH))
            .and(query_param("language", "2"))
            .and(query_param("category", "4"))
            .and(query_param("equipment", "7"))
            .and(header("Authorization", "Token secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "results": [
                    {"id": 1, "name": "Push-ups", "description": "Chest exercise"},
                    {"id": 2, "name": "Squats", "description": "Leg exercise"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filter = ExerciseFilter {
            category: Some("4".to_string()),
            equipment: Some("7".to_string()),
        };
        let exercises = adapter(&server, Some("secret"))
            .fetch_exercises(&filter)
            .await
            .unwrap();

        assert_eq!(exercises.len(), 2);
        assert_eq!(exercises[0]["name"], "Push-ups");
    }

    #[tokio::test]
    async fn fetch_exercises_degrades_to_empty_on_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EXERCISE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let exercises = adapter(&server, None)
            .fetch_exercises(&ExerciseFilter::default())
            .await
            .unwrap();

        assert!(exercises.is_empty());
    }

    #[tokio::test]
    async fn fetch_exercises_tolerates_missing_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EXERCISE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
            .mount(&server)
            .await;

        let exercises = adapter(&server, None)
            .fetch_exercises(&ExerciseFilter::default())
            .await
            .unwrap();

        assert!(exercises.is_empty());
    }

    #[tokio::test]
    async fn list_exercises_passes_the_page_through() {
        let server = MockServer::start().await;
        let page = json!({"count": 1, "next": null, "results": [{"id": 9}]});
        Mock::given(method("GET"))
            .and(path(EXERCISE_PATH))
            .and(query_param("language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .mount(&server)
            .await;

        let body = adapter(&server, None).list_exercises().await.unwrap();

        assert_eq!(body, page);
    }

    #[tokio::test]
    async fn list_exercises_reports_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EXERCISE_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = adapter(&server, None).list_exercises().await;

        assert!(matches!(result, Err(PortError::Unexpected(_))));
    }
}
