use crate::{
    chat::ChatClient, config::RuntimeConfiguration, error::ChinoResult, store::StudentStore,
};
use maud::{DOCTYPE, Markup, html};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ChinoState {
    store: Arc<StudentStore>,
    chat: Arc<ChatClient>,
}

impl ChinoState {
    pub fn new(config: &RuntimeConfiguration) -> ChinoResult<Self> {
        let store = Arc::new(StudentStore::new(config.store_config().path.clone()));
        let chat = Arc::new(ChatClient::new(config.chat_config())?);

        Ok(Self { store, chat })
    }

    pub fn store(&self) -> &StudentStore {
        &self.store
    }

    pub fn chat(&self) -> &ChatClient {
        &self.chat
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Chino" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center text-white" {
                    (markup)
                }
            }
        }
    }
}
