use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::domain::models::SearchForm;
use crate::domain::services::{PortalApi, SearchController};
use crate::shared::hooks::use_portal_api;
use crate::shared::services::DefaultPortalApi;

/// Search form and result state
#[derive(Clone)]
pub struct SearchState {
    pub form: Signal<SearchForm>,
    pub controller: Signal<SearchController>,
    api: Rc<DefaultPortalApi>,
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.form == other.form
            && self.controller == other.controller
            && Rc::ptr_eq(&self.api, &other.api)
    }
}

impl SearchState {
    /// Request `page`; page 0 captures the current form
    pub fn go_to_page(&self, page: u32) {
        let mut controller = self.controller;
        let query = self.form.read().to_query();
        let request = controller.write().start(page, &query);
        let api = self.api.clone();

        spawn(async move {
            let outcome = api.search(&request.params).await;
            controller.write().finish(request.generation, outcome);
        });
    }

    /// Clear the form and hide results; in-flight responses are dropped
    pub fn reset(&self) {
        let mut form = self.form;
        let mut controller = self.controller;
        form.set(SearchForm::default());
        controller.write().reset();
    }
}

/// Hook to manage search state
pub fn use_search() -> SearchState {
    let api = use_portal_api();
    let form = use_signal(SearchForm::default);
    let controller = use_signal(|| SearchController::new(DEFAULT_PAGE_SIZE));

    SearchState {
        form,
        controller,
        api,
    }
}
