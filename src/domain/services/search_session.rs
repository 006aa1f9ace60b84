//! Search flow: query capture, paging reuse and result view state
//!
//! A fresh search (page 0) captures the form; later pages reuse that capture
//! verbatim. Every request carries a generation number and only the response
//! of the latest generation is applied, so a reset or a newer search turns
//! older in-flight responses into no-ops.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::domain::models::{SearchQuery, SearchResultPage};
use crate::domain::services::api::PortalApi;
use crate::domain::services::pagination::{PageWindow, should_paginate};
use crate::shared::errors::{ApiError, Result};
use crate::shared::logging;

/// Request prepared by [`SearchSession::begin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub page: u32,
    pub params: Vec<(String, String)>,
}

/// Query captured by the last fresh search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    active_query: Option<SearchQuery>,
    generation: u64,
    page_size: u32,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchSession {
    pub fn new(page_size: u32) -> Self {
        Self {
            active_query: None,
            generation: 0,
            page_size,
        }
    }

    /// Page 0 captures `form`; any other page reuses the captured query and ignores `form`
    pub fn begin(&mut self, page: u32, form: &SearchQuery) -> SearchRequest {
        if page == 0 {
            self.active_query = Some(form.clone());
        }
        self.generation += 1;

        let query = self.active_query.clone().unwrap_or_default();
        SearchRequest {
            generation: self.generation,
            page,
            params: query.to_request_params(page, self.page_size),
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Forget the captured query and invalidate in-flight requests
    pub fn reset(&mut self) {
        self.active_query = None;
        self.generation += 1;
    }

    pub fn active_query(&self) -> Option<&SearchQuery> {
        self.active_query.as_ref()
    }
}

/// What the result area shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchView {
    /// Nothing searched yet, or the form was reset
    #[default]
    Hidden,
    Loading,
    Empty,
    Results {
        page: SearchResultPage,
        /// `None` when everything fits in one page
        window: Option<PageWindow>,
    },
    Failed(String),
}

impl SearchView {
    pub fn from_outcome(outcome: Result<SearchResultPage>) -> Self {
        match outcome {
            Ok(page) if page.is_empty() => SearchView::Empty,
            Ok(page) => {
                let window = if should_paginate(page.total_pages) {
                    PageWindow::compute(page.total_pages, page.page_index)
                } else {
                    None
                };
                if let Some(w) = &window {
                    logging::log_page_window(w.total_pages, w.current, w.start, w.end);
                }
                SearchView::Results { page, window }
            }
            Err(e) => SearchView::Failed(search_error_message(&e)),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, SearchView::Hidden)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchView::Loading)
    }

    pub fn info_line(&self) -> String {
        match self {
            SearchView::Hidden => String::new(),
            SearchView::Loading => "Buscando...".to_string(),
            SearchView::Empty => {
                "No se encontraron convocatorias con los criterios seleccionados.".to_string()
            }
            SearchView::Results { page, .. } => page.summary_line(),
            SearchView::Failed(_) => "Error al realizar la búsqueda.".to_string(),
        }
    }

    pub fn pagination(&self) -> Option<&PageWindow> {
        match self {
            SearchView::Results { window, .. } => window.as_ref(),
            _ => None,
        }
    }
}

fn search_error_message(error: &ApiError) -> String {
    format!("No se pudieron cargar los resultados: {}", error)
}

/// Search session plus the view it drives
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchController {
    session: SearchSession,
    view: SearchView,
}

impl SearchController {
    pub fn new(page_size: u32) -> Self {
        Self {
            session: SearchSession::new(page_size),
            view: SearchView::Hidden,
        }
    }

    /// Prepare the request for `page` and switch the view to loading
    pub fn start(&mut self, page: u32, form: &SearchQuery) -> SearchRequest {
        let request = self.session.begin(page, form);
        logging::log_search_start(request.generation, page, request.params.len());
        self.view = SearchView::Loading;
        request
    }

    /// Apply a response; returns `false` when it was superseded and ignored
    pub fn finish(&mut self, generation: u64, outcome: Result<SearchResultPage>) -> bool {
        if !self.session.is_current(generation) {
            logging::log_search_discarded(generation, self.session.generation());
            return false;
        }
        match &outcome {
            Ok(page) => logging::log_search_result(
                generation,
                page.items.len(),
                page.total_items,
                page.total_pages,
            ),
            Err(e) => logging::log_search_error(generation, &e.to_string()),
        }
        self.view = SearchView::from_outcome(outcome);
        true
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.view = SearchView::Hidden;
    }

    /// Run one search end to end against `api`
    pub async fn search<A: PortalApi + ?Sized>(&mut self, api: &A, page: u32, form: &SearchQuery) {
        let request = self.start(page, form);
        let outcome = api.search(&request.params).await;
        self.finish(request.generation, outcome);
    }

    pub fn view(&self) -> &SearchView {
        &self.view
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Convocatoria;
    use crate::domain::services::testing::FakeApi;

    fn query(pairs: &[(&str, &str)]) -> SearchQuery {
        SearchQuery::from_fields(pairs.iter().copied())
    }

    fn page_with(items: usize, total_pages: u32, page_index: u32) -> SearchResultPage {
        SearchResultPage {
            items: (0..items).map(|_| Convocatoria::default()).collect(),
            total_items: (items as u64) * total_pages as u64,
            page_size: 50,
            total_pages,
            page_index,
        }
    }

    fn param<'a>(request: &'a SearchRequest, key: &str) -> Option<&'a str> {
        request
            .params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_page_zero_captures_form() {
        let mut session = SearchSession::default();
        let request = session.begin(0, &query(&[("descripcion", "agua")]));
        assert_eq!(param(&request, "descripcion"), Some("agua"));
        assert_eq!(param(&request, "page"), Some("0"));
        assert_eq!(param(&request, "pageSize"), Some("50"));
    }

    #[test]
    fn test_later_pages_reuse_captured_query() {
        let mut session = SearchSession::default();
        session.begin(0, &query(&[("descripcion", "agua"), ("tipoAdministracion", "L")]));

        // form edited without resubmitting
        let edited = query(&[("descripcion", "energía")]);
        let request = session.begin(1, &edited);

        assert_eq!(param(&request, "descripcion"), Some("agua"));
        assert_eq!(param(&request, "tipoAdministracion"), Some("L"));
        assert_eq!(param(&request, "page"), Some("1"));
        assert_eq!(request.params.iter().filter(|(k, _)| k == "page").count(), 1);
    }

    #[test]
    fn test_paging_without_capture_sends_only_paging_keys() {
        let mut session = SearchSession::default();
        let request = session.begin(2, &query(&[("descripcion", "x")]));
        assert_eq!(request.params.len(), 2);
    }

    #[test]
    fn test_reset_clears_query() {
        let mut session = SearchSession::default();
        session.begin(0, &query(&[("descripcion", "agua")]));
        session.reset();
        assert!(session.active_query().is_none());
    }

    #[test]
    fn test_empty_result_shows_empty_state_without_pagination() {
        let mut controller = SearchController::default();
        let request = controller.start(0, &SearchQuery::default());
        assert!(controller.view().is_loading());
        assert_eq!(controller.view().info_line(), "Buscando...");

        controller.finish(request.generation, Ok(page_with(0, 0, 0)));
        assert_eq!(controller.view(), &SearchView::Empty);
        assert!(controller.view().pagination().is_none());
        assert_eq!(
            controller.view().info_line(),
            "No se encontraron convocatorias con los criterios seleccionados."
        );
    }

    #[test]
    fn test_null_content_shows_empty_state() {
        let outcome = serde_json::from_value::<SearchResultPage>(serde_json::json!({
            "content": null,
            "totalElements": 0,
            "totalPages": 0,
            "number": 0
        }))
        .map_err(ApiError::from);
        assert_eq!(SearchView::from_outcome(outcome), SearchView::Empty);
    }

    #[test]
    fn test_single_page_has_no_pagination() {
        let mut controller = SearchController::default();
        let request = controller.start(0, &SearchQuery::default());
        controller.finish(request.generation, Ok(page_with(3, 1, 0)));
        assert!(matches!(controller.view(), SearchView::Results { .. }));
        assert!(controller.view().pagination().is_none());
    }

    #[test]
    fn test_multi_page_builds_window() {
        let mut controller = SearchController::default();
        let request = controller.start(0, &SearchQuery::default());
        controller.finish(request.generation, Ok(page_with(50, 100, 50)));
        let window = controller.view().pagination().unwrap();
        assert_eq!(window.pages(), 48..=52);
    }

    #[test]
    fn test_failure_is_shown_not_thrown() {
        let mut controller = SearchController::default();
        let request = controller.start(0, &SearchQuery::default());
        controller.finish(request.generation, Err(ApiError::http(502, "Bad Gateway")));
        match controller.view() {
            SearchView::Failed(msg) => {
                assert_eq!(msg, "No se pudieron cargar los resultados: Error HTTP: 502 Bad Gateway")
            }
            other => panic!("unexpected view {:?}", other),
        }
        assert_eq!(controller.view().info_line(), "Error al realizar la búsqueda.");
    }

    #[test]
    fn test_response_after_reset_is_ignored() {
        let mut controller = SearchController::default();
        let request = controller.start(0, &query(&[("descripcion", "agua")]));
        controller.reset();
        assert!(!controller.finish(request.generation, Ok(page_with(5, 1, 0))));
        assert_eq!(controller.view(), &SearchView::Hidden);
    }

    #[test]
    fn test_superseded_response_is_ignored() {
        let mut controller = SearchController::default();
        let first = controller.start(0, &SearchQuery::default());
        let second = controller.start(1, &SearchQuery::default());

        assert!(controller.finish(second.generation, Ok(page_with(50, 10, 1))));
        assert!(!controller.finish(first.generation, Ok(page_with(50, 10, 0))));
        assert_eq!(controller.view().pagination().unwrap().current, 1);
    }

    #[tokio::test]
    async fn test_search_against_api() {
        let api = FakeApi::default().with_search(Ok(page_with(2, 3, 0)));
        let mut controller = SearchController::default();
        controller.search(&api, 0, &query(&[("descripcion", "becas")])).await;

        let sent = api.search_calls();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains(&("descripcion".to_string(), "becas".to_string())));
        assert_eq!(controller.view().pagination().unwrap().pages(), 0..=2);
    }
}
