use std::rc::Rc;

use dioxus::prelude::*;

use crate::domain::services::{DetailController, fetch_detail};
use crate::shared::hooks::use_portal_api;
use crate::shared::services::DefaultPortalApi;

/// Detail modal state
#[derive(Clone)]
pub struct DetailState {
    pub controller: Signal<DetailController>,
    api: Rc<DefaultPortalApi>,
}

impl PartialEq for DetailState {
    fn eq(&self, other: &Self) -> bool {
        self.controller == other.controller && Rc::ptr_eq(&self.api, &other.api)
    }
}

impl DetailState {
    /// Open the modal in loading state and fetch the record
    pub fn open(&self, id: String) {
        let mut controller = self.controller;
        let generation = controller.write().open();
        let api = self.api.clone();

        spawn(async move {
            let outcome = fetch_detail(api.as_ref(), &id).await;
            controller.write().finish(generation, outcome);
        });
    }

    pub fn close(&self) {
        let mut controller = self.controller;
        controller.write().close();
    }
}

pub fn use_detail() -> DetailState {
    let api = use_portal_api();
    let controller = use_signal(DetailController::default);
    DetailState { controller, api }
}
