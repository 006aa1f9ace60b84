use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::THREAD_ID_STORAGE_KEY;
use crate::domain::services::{ChatController, load_or_create_session, stream_reply};
use crate::shared::hooks::use_portal_api;
use crate::shared::services::DefaultPortalApi;
use crate::shared::storage::default_store;

/// Chat panel state
#[derive(Clone)]
pub struct ChatState {
    pub input: Signal<String>,
    pub controller: Signal<ChatController>,
    api: Rc<DefaultPortalApi>,
}

impl PartialEq for ChatState {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input
            && self.controller == other.controller
            && Rc::ptr_eq(&self.api, &other.api)
    }
}

impl ChatState {
    /// Submit the current input and stream the reply into the transcript
    pub fn send(&self) {
        let mut input = self.input;
        let mut controller = self.controller;

        let text = input.read().clone();
        let request = match controller.write().submit(&text) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Chat submit rejected: {}", e);
                return;
            }
        };
        input.set(String::new());
        let api = self.api.clone();

        spawn(async move {
            stream_reply(api.as_ref(), &request, |event| controller.write().apply(event)).await;
        });
    }

    pub fn is_busy(&self) -> bool {
        self.controller.read().transcript().is_busy()
    }
}

/// Hook to manage the chat transcript; the thread id is loaded or created once per mount
pub fn use_chat() -> ChatState {
    let api = use_portal_api();
    let input = use_signal(String::new);
    let controller = use_signal(|| {
        let store = default_store();
        ChatController::new(load_or_create_session(store.as_ref(), THREAD_ID_STORAGE_KEY))
    });

    ChatState {
        input,
        controller,
        api,
    }
}
