use crate::model::{FavoritesCollection, FavoritesPage};
use crate::twitter::{TwitterClient, TwitterError};

/// How many pages to request for a given favorites total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCountMode {
    /// `count / page_size + 1`, the historical default. Requests one trailing
    /// empty page whenever the total is an exact multiple of the page size,
    /// including a zero-favorite account.
    Legacy,
    /// `ceil(count / page_size)`, no trailing empty page
    Exact,
}

impl PageCountMode {
    pub fn page_count(self, favorites_count: u32, page_size: u32) -> u32 {
        match self {
            PageCountMode::Legacy => favorites_count / page_size + 1,
            PageCountMode::Exact => (favorites_count + page_size - 1) / page_size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Posts per page request, must be non-zero
    pub page_size: u32,
    pub mode: PageCountMode,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            mode: PageCountMode::Legacy,
        }
    }
}

/// Fetches every favorites page for `username`, in page order.
///
/// Pages are requested sequentially with no delay between requests, so a
/// large enough account can run into the API rate limit. Any page failure
/// aborts the whole collection with no partial result.
pub async fn collect_favorites(
    twitter: &dyn TwitterClient,
    username: &str,
    options: &CollectOptions,
) -> Result<FavoritesCollection, TwitterError> {
    let profile = twitter.get_profile_for_username(username).await?;
    let pages = options
        .mode
        .page_count(profile.favorites_count, options.page_size);
    log::debug!(
        "{} has {} favorites, fetching {} pages",
        username,
        profile.favorites_count,
        pages
    );
    let mut collection = Vec::with_capacity(pages as usize);
    for page in 0..pages {
        let posts = twitter
            .get_favorites_page(username, page, options.page_size)
            .await?;
        collection.push(FavoritesPage { index: page, posts });
    }
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Post, UserProfile};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeTwitter {
        favorites_count: u32,
        requested: Mutex<Vec<u32>>,
        fail_on: Option<u32>,
    }

    impl FakeTwitter {
        fn new(favorites_count: u32) -> Self {
            Self {
                favorites_count,
                requested: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TwitterClient for FakeTwitter {
        async fn get_profile_for_username(
            &self,
            username: &str,
        ) -> Result<UserProfile, TwitterError> {
            Ok(UserProfile {
                id: 1,
                screen_name: username.to_string(),
                favorites_count: self.favorites_count,
            })
        }

        async fn get_favorites_page(
            &self,
            _username: &str,
            page: u32,
            page_size: u32,
        ) -> Result<Vec<Post>, TwitterError> {
            self.requested.lock().unwrap().push(page);
            if self.fail_on == Some(page) {
                return Err(TwitterError::PageFetch {
                    page,
                    source: anyhow!("server error"),
                });
            }
            let start = page * page_size;
            let len = self.favorites_count.saturating_sub(start).min(page_size);
            Ok((start..start + len)
                .map(|i| Post {
                    id: u64::from(i),
                    timestamp: 0,
                    text: None,
                })
                .collect())
        }
    }

    #[test]
    fn page_count_formulas() {
        assert_eq!(PageCountMode::Legacy.page_count(40, 20), 3);
        assert_eq!(PageCountMode::Legacy.page_count(45, 20), 3);
        assert_eq!(PageCountMode::Legacy.page_count(0, 20), 1);
        assert_eq!(PageCountMode::Exact.page_count(40, 20), 2);
        assert_eq!(PageCountMode::Exact.page_count(45, 20), 3);
        assert_eq!(PageCountMode::Exact.page_count(0, 20), 0);
    }

    #[tokio::test]
    async fn legacy_mode_fetches_one_extra_page_on_exact_multiple() {
        let twitter = FakeTwitter::new(40);
        let collection = collect_favorites(&twitter, "someone", &CollectOptions::default())
            .await
            .unwrap();
        assert_eq!(twitter.requested(), vec![0, 1, 2]);
        assert_eq!(collection.len(), 3);
        assert!(collection[2].posts.is_empty());
    }

    #[tokio::test]
    async fn pages_ascend_without_gaps_and_keep_boundaries() {
        let twitter = FakeTwitter::new(45);
        let collection = collect_favorites(&twitter, "someone", &CollectOptions::default())
            .await
            .unwrap();
        assert_eq!(twitter.requested(), vec![0, 1, 2]);
        let sizes: Vec<usize> = collection.iter().map(|p| p.posts.len()).collect();
        assert_eq!(sizes, vec![20, 20, 5]);
        assert_eq!(collection[1].index, 1);
        // posts stay in request order across page boundaries
        assert_eq!(collection[1].posts[0].id, 20);
        assert_eq!(collection[2].posts[4].id, 44);
    }

    #[tokio::test]
    async fn empty_account_still_fetches_the_first_page() {
        let twitter = FakeTwitter::new(0);
        let collection = collect_favorites(&twitter, "someone", &CollectOptions::default())
            .await
            .unwrap();
        assert_eq!(twitter.requested(), vec![0]);
        assert_eq!(collection.len(), 1);
        assert!(collection[0].posts.is_empty());
    }

    #[tokio::test]
    async fn exact_mode_skips_the_trailing_empty_page() {
        let twitter = FakeTwitter::new(40);
        let options = CollectOptions {
            mode: PageCountMode::Exact,
            ..CollectOptions::default()
        };
        let collection = collect_favorites(&twitter, "someone", &options)
            .await
            .unwrap();
        assert_eq!(twitter.requested(), vec![0, 1]);
        assert_eq!(collection.len(), 2);

        let twitter = FakeTwitter::new(0);
        let collection = collect_favorites(&twitter, "someone", &options)
            .await
            .unwrap();
        assert!(twitter.requested().is_empty());
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn page_failure_aborts_the_collection() {
        let mut twitter = FakeTwitter::new(45);
        twitter.fail_on = Some(1);
        let err = collect_favorites(&twitter, "someone", &CollectOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TwitterError::PageFetch { page: 1, .. }));
        // nothing past the failing page was requested
        assert_eq!(twitter.requested(), vec![0, 1]);
    }
}
