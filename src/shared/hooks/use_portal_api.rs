use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::ClientConfig;
use crate::shared::services::DefaultPortalApi;

/// Shared handle to the HTTP client, provided once by `App`
#[derive(Clone)]
pub struct PortalClient(pub Rc<DefaultPortalApi>);

impl PortalClient {
    pub fn new(config: ClientConfig) -> Self {
        Self(Rc::new(DefaultPortalApi::new(config)))
    }
}

impl Default for PortalClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

pub fn use_portal_api() -> Rc<DefaultPortalApi> {
    use_context::<PortalClient>().0
}
