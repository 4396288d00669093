use crate::model::Post;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Post {0} has no text to parse")]
    MissingText(u64),
}

/// Returns every URL the tweet-text parser finds in `post`, in text order.
/// The matches are returned as-is, with no validation or normalization.
pub fn extract_urls(post: &Post) -> Result<Vec<String>, ExtractError> {
    let text = post
        .text
        .as_deref()
        .ok_or(ExtractError::MissingText(post.id))?;
    Ok(egg_mode_text::url_entities(text)
        .into_iter()
        .map(|entity| entity.substr(text).to_string())
        .collect())
}
