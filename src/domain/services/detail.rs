//! Convocatoria detail lookup
//!
//! The detail endpoint answers with one of three shapes depending on the
//! upstream API version; `normalize_detail` folds them into one record.

use serde_json::Value;

use crate::domain::models::{Convocatoria, ConvocatoriaDetail};
use crate::domain::services::api::PortalApi;
use crate::shared::errors::{ApiError, Result};
use crate::shared::logging;

/// Array-of-one, `{content: [..]}` or a bare object; anything else is `NotFound`
pub fn normalize_detail(payload: Value) -> Result<ConvocatoriaDetail> {
    let record = match payload {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(mut map) => match map.remove("content") {
            Some(Value::Array(items)) => items.into_iter().next(),
            Some(other) => {
                map.insert("content".to_string(), other);
                Some(Value::Object(map))
            }
            None => Some(Value::Object(map)),
        },
        _ => None,
    };

    match record {
        Some(Value::Object(map)) if !map.is_empty() => Ok(Convocatoria::from_map(map)),
        _ => Err(ApiError::NotFound),
    }
}

/// Fetch a record fresh from the API; never cached
pub async fn fetch_detail<A: PortalApi + ?Sized>(api: &A, id: &str) -> Result<ConvocatoriaDetail> {
    logging::log_detail_start(id);
    let outcome = api.fetch_detail(id).await.and_then(normalize_detail);
    match &outcome {
        Err(ApiError::NotFound) => logging::log_detail_not_found(id),
        Err(e) => logging::log_detail_error(id, &e.to_string()),
        Ok(_) => {}
    }
    outcome
}

/// What the detail modal shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailView {
    #[default]
    Closed,
    Loading,
    Loaded(ConvocatoriaDetail),
    NotFound,
    Failed(String),
}

impl DetailView {
    pub fn from_outcome(outcome: Result<ConvocatoriaDetail>) -> Self {
        match outcome {
            Ok(detail) => DetailView::Loaded(detail),
            Err(ApiError::NotFound) => DetailView::NotFound,
            Err(e) => DetailView::Failed(format!("Error al cargar los detalles: {}", e)),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DetailView::Closed)
    }

    pub fn title(&self) -> String {
        match self {
            DetailView::Closed => String::new(),
            DetailView::Loading => "Cargando detalles...".to_string(),
            DetailView::Loaded(detail) => detail.title_or("Detalle de Convocatoria"),
            DetailView::NotFound => "Detalles de la Convocatoria".to_string(),
            DetailView::Failed(_) => "Error".to_string(),
        }
    }
}

/// Detail modal state; responses for a record that is no longer requested are dropped
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailController {
    view: DetailView,
    generation: u64,
}

impl DetailController {
    /// Open the modal in loading state before the request resolves
    pub fn open(&mut self) -> u64 {
        self.generation += 1;
        self.view = DetailView::Loading;
        self.generation
    }

    pub fn finish(&mut self, generation: u64, outcome: Result<ConvocatoriaDetail>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.view = DetailView::from_outcome(outcome);
        true
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.view = DetailView::Closed;
    }

    pub async fn show<A: PortalApi + ?Sized>(&mut self, api: &A, id: &str) {
        let generation = self.open();
        let outcome = fetch_detail(api, id).await;
        self.finish(generation, outcome);
    }

    pub fn view(&self) -> &DetailView {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::testing::FakeApi;
    use serde_json::json;

    fn record() -> Value {
        json!({ "BDNS": "712345", "titulo": "Ayudas rurales" })
    }

    #[test]
    fn test_all_shapes_normalize_to_same_record() {
        let from_array = normalize_detail(json!([record()])).unwrap();
        let from_content = normalize_detail(json!({ "content": [record()] })).unwrap();
        let from_object = normalize_detail(record()).unwrap();

        assert_eq!(from_array, from_content);
        assert_eq!(from_content, from_object);
        assert_eq!(from_object.id().as_deref(), Some("712345"));
    }

    #[test]
    fn test_array_takes_first_element() {
        let detail = normalize_detail(json!([{ "BDNS": "1" }, { "BDNS": "2" }])).unwrap();
        assert_eq!(detail.bdns().as_deref(), Some("1"));
    }

    #[test]
    fn test_empty_shapes_are_not_found() {
        for payload in [
            json!([]),
            json!({}),
            json!({ "content": [] }),
            json!([{}]),
            json!(null),
            json!("texto"),
        ] {
            assert_eq!(normalize_detail(payload.clone()), Err(ApiError::NotFound), "{payload}");
        }
    }

    #[test]
    fn test_non_array_content_is_part_of_bare_object() {
        let detail = normalize_detail(json!({ "BDNS": "9", "content": "texto" })).unwrap();
        assert_eq!(detail.as_map().get("content"), Some(&json!("texto")));
    }

    #[test]
    fn test_not_found_differs_from_transport_error() {
        let not_found = DetailView::from_outcome(Err(ApiError::NotFound));
        let failed = DetailView::from_outcome(Err(ApiError::NetworkFailure("offline".into())));
        assert_eq!(not_found, DetailView::NotFound);
        assert!(matches!(failed, DetailView::Failed(_)));
        assert_ne!(not_found.title(), failed.title());
    }

    #[test]
    fn test_open_starts_in_loading_state() {
        let mut controller = DetailController::default();
        controller.open();
        assert_eq!(controller.view(), &DetailView::Loading);
        assert_eq!(controller.view().title(), "Cargando detalles...");
    }

    #[test]
    fn test_stale_detail_after_close_is_dropped() {
        let mut controller = DetailController::default();
        let generation = controller.open();
        controller.close();
        assert!(!controller.finish(generation, normalize_detail(record())));
        assert!(!controller.view().is_open());
    }

    #[tokio::test]
    async fn test_show_fetches_fresh_each_time() {
        let api = FakeApi::default()
            .with_detail(Ok(json!({ "content": [record()] })))
            .with_detail(Ok(json!([])));
        let mut controller = DetailController::default();

        controller.show(&api, "712345").await;
        assert_eq!(controller.view().title(), "Ayudas rurales");

        controller.show(&api, "712345").await;
        assert_eq!(controller.view(), &DetailView::NotFound);
        assert_eq!(api.detail_calls(), vec!["712345".to_string(), "712345".to_string()]);
    }
}
