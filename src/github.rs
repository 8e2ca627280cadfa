//! GitHub API types and authenticated client
//!
//! Thin blocking wrapper over ureq for the handful of REST endpoints the
//! tool needs: repository listing, release lookup, and asset download.

use std::error::Error;
use std::io::Read;

use serde::Deserialize;

const API_BASE: &str = "https://api.github.com";

/// Page size used when listing repositories.
pub const REPOS_PER_PAGE: usize = 100;

/// Which repositories to enumerate for the authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    OwnedPublic,
}

/// A repository as returned by the listing endpoint
#[derive(Deserialize, Debug, Clone)]
pub struct Repository {
    pub name: String,
    pub owner: Option<RepoOwner>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RepoOwner {
    pub login: String,
}

/// GitHub release metadata
#[derive(Deserialize, Debug, Clone)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// GitHub release asset
#[derive(Deserialize, Debug, Clone)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
    pub browser_download_url: String,
}

/// Authenticated GitHub API client
pub struct GithubClient {
    agent: ureq::Agent,
    token: String,
}

impl GithubClient {
    pub fn new(token: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("relgrab/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent, token }
    }

    fn get(&self, url: &str) -> ureq::Request {
        self.agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
    }

    /// Fetch one page of the authenticated user's repositories.
    ///
    /// A page shorter than `REPOS_PER_PAGE` is the last one.
    pub fn list_repos(
        &self,
        visibility: Visibility,
        page: u32,
    ) -> Result<Vec<Repository>, Box<dyn Error>> {
        let mut req = self
            .get(&format!("{}/user/repos", API_BASE))
            .query("per_page", &REPOS_PER_PAGE.to_string())
            .query("page", &page.to_string());

        req = match visibility {
            Visibility::Private => req.query("visibility", "private"),
            Visibility::OwnedPublic => req
                .query("visibility", "public")
                .query("affiliation", "owner"),
        };

        let repos: Vec<Repository> = req.call()?.into_json()?;
        Ok(repos)
    }

    /// Fetch the latest release of a repository. 404 means no releases.
    pub fn latest_release(&self, owner: &str, repo: &str) -> Result<Release, Box<dyn Error>> {
        let url = format!("{}/repos/{}/{}/releases/latest", API_BASE, owner, repo);
        let release: Release = self.get(&url).call()?.into_json()?;
        Ok(release)
    }

    /// List all releases of a repository, newest first.
    pub fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>, Box<dyn Error>> {
        let url = format!("{}/repos/{}/{}/releases", API_BASE, owner, repo);
        let releases: Vec<Release> = self.get(&url).call()?.into_json()?;
        Ok(releases)
    }

    /// Open a content stream for a release asset.
    ///
    /// Uses the API asset endpoint so private-repo assets work; ureq follows
    /// the redirect to the storage backend.
    pub fn download_asset(
        &self,
        owner: &str,
        repo: &str,
        asset_id: u64,
    ) -> Result<Box<dyn Read + Send + Sync + 'static>, Box<dyn Error>> {
        let url = format!(
            "{}/repos/{}/{}/releases/assets/{}",
            API_BASE, owner, repo, asset_id
        );
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/octet-stream")
            .call()?;
        Ok(response.into_reader())
    }
}
