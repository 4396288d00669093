pub mod v1;

use crate::model::{Post, UserProfile};
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// OAuth 1.0a secrets, as stored in the auth file
#[derive(Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token_key: String,
    pub access_token_secret: String,
}

impl Credentials {
    pub(crate) fn has_blank_field(&self) -> bool {
        [
            &self.consumer_key,
            &self.consumer_secret,
            &self.access_token_key,
            &self.access_token_secret,
        ]
        .iter()
        .any(|field| field.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("Authentication failed")]
    Authentication(#[source] anyhow::Error),
    #[error("No such user: {0}")]
    UserNotFound(String),
    #[error("Unable to fetch favorites page {page}")]
    PageFetch {
        page: u32,
        #[source]
        source: anyhow::Error,
    },
    #[error("Twitter API request failed")]
    Api(#[source] anyhow::Error),
}

#[async_trait]
pub trait TwitterClient {
    async fn get_profile_for_username(&self, username: &str) -> Result<UserProfile, TwitterError>;

    /// Requests one page of the user's favorites. Pages are zero-based.
    async fn get_favorites_page(
        &self,
        username: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Post>, TwitterError>;
}
