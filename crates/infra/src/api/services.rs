//! One-stop bundle of every domain wrapper over a shared client

use std::sync::Arc;

use chainverdict_domain::ClientConfig;

use super::admin::AdminApi;
use super::auth::AuthApi;
use super::chat::ChatApi;
use super::citizen::CitizenApi;
use super::client::RequestClient;
use super::errors::ApiError;
use super::lawyer::LawyerApi;
use crate::session::open_store;

/// All domain wrappers sharing one [`RequestClient`], and therefore one
/// session
pub struct ApiServices {
    pub auth: AuthApi,
    pub admin: AdminApi,
    pub citizen: CitizenApi,
    pub lawyer: LawyerApi,
    pub chat: ChatApi,
    client: Arc<RequestClient>,
}

impl ApiServices {
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self {
            auth: AuthApi::new(client.clone()),
            admin: AdminApi::new(client.clone()),
            citizen: CitizenApi::new(client.clone()),
            lawyer: LawyerApi::new(client.clone()),
            chat: ChatApi::new(client.clone()),
            client,
        }
    }

    /// Build the client and session store described by `config`
    ///
    /// Navigation on session expiry is only logged; use
    /// [`RequestClient::builder`] with a [`crate::session::ChannelNavigator`]
    /// to react to it.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the session store cannot be opened or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let store = open_store(&config.session)
            .map_err(|e| ApiError::Config(format!("Failed to open session store: {e}")))?;
        let client = RequestClient::builder().config(config.api.clone()).store(store).build()?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn client(&self) -> &Arc<RequestClient> {
        &self.client
    }
}
