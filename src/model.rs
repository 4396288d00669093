use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct Post {
    pub id: u64,
    pub timestamp: i64,
    /// Missing when the API omits the text field from a payload
    pub text: Option<String>,
}

/// One page-worth of favorites, as returned by a single request
#[derive(Deserialize, Serialize, Debug)]
pub struct FavoritesPage {
    pub index: u32,
    pub posts: Vec<Post>,
}

/// Fetched pages in request order, page boundaries kept as-is
pub type FavoritesCollection = Vec<FavoritesPage>;

#[derive(Deserialize, Serialize, Debug)]
pub struct UserProfile {
    pub id: u64,
    pub screen_name: String,
    pub favorites_count: u32,
}
