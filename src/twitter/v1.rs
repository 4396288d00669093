use crate::model::{Post, UserProfile};
use crate::twitter::{Credentials, TwitterClient, TwitterError};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::DateTime;
use egg_mode::raw::{self, ParamList};
use egg_mode::{KeyPair, Token};
use serde::Deserialize;

const FAVORITES_URL: &str = "https://api.twitter.com/1.1/favorites/list.json";

// "Wed Oct 10 20:19:24 +0000 2018"
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Twitter error code for a nonexistent user
const USER_NOT_FOUND: i32 = 50;

#[derive(Debug)]
pub struct TwitterClientV1 {
    token: Token,
}

impl TwitterClientV1 {
    /// Builds an access token from `creds` and verifies it against the API.
    pub async fn login(creds: &Credentials) -> Result<Self, TwitterError> {
        if creds.has_blank_field() {
            return Err(TwitterError::Authentication(anyhow!(
                "Credential fields must be non-empty"
            )));
        }
        let token = Token::Access {
            consumer: KeyPair::new(creds.consumer_key.clone(), creds.consumer_secret.clone()),
            access: KeyPair::new(
                creds.access_token_key.clone(),
                creds.access_token_secret.clone(),
            ),
        };
        let user = egg_mode::auth::verify_tokens(&token)
            .await
            .map_err(|e| TwitterError::Authentication(e.into()))?;
        log::info!("Logged in as {}", user.response.screen_name);
        Ok(Self { token })
    }
}

#[async_trait]
impl TwitterClient for TwitterClientV1 {
    async fn get_profile_for_username(
        &self,
        username: &str,
    ) -> Result<UserProfile, TwitterError> {
        let user = egg_mode::user::show(username.to_string(), &self.token)
            .await
            .map_err(|e| classify_user_error(e, username))?;
        Ok(UserProfile {
            id: user.response.id,
            favorites_count: user.response.favourites_count.max(0) as u32,
            screen_name: user.response.screen_name,
        })
    }

    async fn get_favorites_page(
        &self,
        username: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Post>, TwitterError> {
        // The v1.1 endpoint numbers pages from 1
        let params = ParamList::new()
            .add_param("screen_name", username.to_string())
            .add_param("count", page_size.to_string())
            .add_param("page", (page + 1).to_string())
            .add_param("tweet_mode", "extended");
        let req = raw::request_get(FAVORITES_URL, &self.token, Some(&params));
        let tweets = raw::response_json::<Vec<RawTweet>>(req)
            .await
            .map_err(|e| TwitterError::PageFetch {
                page,
                source: e.into(),
            })?
            .response;
        tweets
            .into_iter()
            .map(RawTweet::convert)
            .collect::<anyhow::Result<_>>()
            .map_err(|e| TwitterError::PageFetch { page, source: e })
    }
}

fn classify_user_error(err: egg_mode::error::Error, username: &str) -> TwitterError {
    use egg_mode::error::Error;
    let not_found = match &err {
        Error::TwitterError(_, errors) => errors.errors.iter().any(|c| c.code == USER_NOT_FOUND),
        Error::BadStatus(status) => status.as_u16() == 404,
        _ => false,
    };
    if not_found {
        TwitterError::UserNotFound(username.to_string())
    } else {
        TwitterError::Api(err.into())
    }
}

#[derive(Deserialize)]
struct RawTweet {
    id: u64,
    created_at: String,
    // Extended mode moves the text into `full_text`
    #[serde(default, alias = "full_text")]
    text: Option<String>,
}

impl RawTweet {
    fn convert(self) -> anyhow::Result<Post> {
        let timestamp = DateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)
            .context("Unexpected created_at format")?
            .timestamp();
        Ok(Post {
            id: self.id,
            timestamp,
            text: self.text,
        })
    }
}
