//! Assistant chat widget

use dioxus::prelude::*;

use crate::domain::models::{ChatMessage, ChatRole};
use crate::shared::hooks::{ChatState, use_chat};

#[component]
pub fn ChatPanel() -> Element {
    let chat = use_chat();
    let controller = chat.controller;

    // Keep the newest message in view while the reply streams in
    use_effect(move || {
        let chat = controller.read();
        let transcript = chat.transcript();
        let _ = (transcript.messages().len(), transcript.accumulated().len());
        #[cfg(target_arch = "wasm32")]
        {
            let script = r#"
                setTimeout(() => {
                    const messages = document.querySelector('.c-chat__messages');
                    if (messages) {
                        messages.scrollTop = messages.scrollHeight;
                    }
                }, 50);
            "#;
            let _ = js_sys::eval(script);
        }
    });

    let messages = controller.read().transcript().messages().to_vec();

    rsx! {
        aside { class: "c-chat",
            header { class: "c-chat__header",
                h2 { class: "c-chat__title", "Asistente de subvenciones" }
            }
            ul { class: "c-chat__messages",
                if messages.is_empty() {
                    li { class: "c-chat__hint",
                        "Pregunta sobre convocatorias, plazos o requisitos."
                    }
                }
                for message in messages {
                    ChatMessageItem { key: "{message.id}", message }
                }
            }
            ChatInput { chat }
        }
    }
}

#[component]
fn ChatMessageItem(message: ChatMessage) -> Element {
    let modifier = message.role.css_modifier();

    rsx! {
        li { class: "c-chat-message c-chat-message--{modifier} animate-fade-in",
            div { class: "c-chat-bubble c-chat-bubble--{modifier}",
                {match message.role {
                    ChatRole::Loading => rsx! {
                        div { class: "c-chat-bubble__typing",
                            span {} span {} span {}
                        }
                    },
                    ChatRole::System => {
                        let html = message.html.clone().unwrap_or_default();
                        rsx! {
                            div {
                                class: "c-prose c-prose--sm",
                                dangerous_inner_html: "{html}"
                            }
                        }
                    }
                    ChatRole::User | ChatRole::Error => rsx! {
                        div { class: "u-whitespace-pre-wrap", {message.content.clone()} }
                    },
                }}
            }
        }
    }
}

#[component]
fn ChatInput(chat: ChatState) -> Element {
    let mut input = chat.input;
    let mut is_composing = use_signal(|| false);
    let busy = chat.is_busy();
    let has_content = !input.read().trim().is_empty();

    let key_chat = chat.clone();
    let submit_chat = chat.clone();

    // Enter sends, Shift+Enter inserts a newline
    let handle_keypress = move |evt: Event<KeyboardData>| {
        if evt.key() == Key::Enter
            && !evt.modifiers().contains(Modifiers::SHIFT)
            && !*is_composing.read()
        {
            evt.prevent_default();
            key_chat.send();
        }
    };

    rsx! {
        form {
            class: "c-chat__input",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                submit_chat.send();
            },
            textarea {
                id: "chat-input",
                class: "c-chat__textarea",
                value: "{input}",
                placeholder: if busy { "Procesando..." } else { "Escribe tu consulta..." },
                disabled: busy,
                rows: "2",
                oninput: move |evt| input.set(evt.value()),
                onkeypress: handle_keypress,
                oncompositionstart: move |_| is_composing.set(true),
                oncompositionend: move |_| is_composing.set(false),
            }
            button {
                class: "c-button c-button--primary c-chat__send",
                r#type: "submit",
                disabled: busy || !has_content,
                "Enviar"
            }
        }
    }
}
