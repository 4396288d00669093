mod entities;
mod favorites;
mod model;
mod twitter;

use crate::entities::extract_urls;
use crate::favorites::{collect_favorites, CollectOptions, PageCountMode};
use crate::twitter::v1::TwitterClientV1;
use crate::twitter::Credentials;
use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tokio::fs;

#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// Path to the authentication details file
    #[clap(short, long, default_value = "./auth.json")]
    auth: PathBuf,
    /// Screen name of the user whose favorites to fetch
    #[clap(short, long)]
    user: String,
    /// Number of posts to request per page
    #[clap(long, default_value_t = 20)]
    page_size: u32,
    /// Use the exact page count instead of the historical one-extra-page formula
    #[clap(long)]
    exact_pages: bool,
    /// Print every URL found in the fetched posts
    #[clap(long)]
    urls: bool,
    /// Dump the fetched pages as JSON on stdout
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = main2().await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn main2() -> anyhow::Result<()> {
    env_logger::init();
    let args: Args = Args::parse();
    if args.page_size == 0 {
        bail!("Page size must be at least 1");
    }
    let auth = fs::read_to_string(&args.auth)
        .await
        .context("Unable to read auth file")?;
    let creds =
        serde_json::from_str::<Credentials>(&auth).context("Unable to deserialize auth file")?;
    let twitter = TwitterClientV1::login(&creds).await?;

    let options = CollectOptions {
        page_size: args.page_size,
        mode: if args.exact_pages {
            PageCountMode::Exact
        } else {
            PageCountMode::Legacy
        },
    };
    let collection = collect_favorites(&twitter, &args.user, &options).await?;
    let total: usize = collection.iter().map(|page| page.posts.len()).sum();
    log::info!(
        "Got {} favorites over {} pages for {}",
        total,
        collection.len(),
        args.user
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
    }
    if args.urls {
        for post in collection.iter().flat_map(|page| &page.posts) {
            for url in extract_urls(post)? {
                println!("{}", url);
            }
        }
    }
    Ok(())
}
