//! Candidate Finder
//!
//! Walks every repository reachable with the token, resolves one release per
//! repository, and picks the first asset whose name carries the platform
//! signature. At most one candidate per repository.

use std::error::Error;

use crate::github::{
    GithubClient, Release, ReleaseAsset, Repository, Visibility, REPOS_PER_PAGE,
};
use crate::logging::log_warning;
use crate::platform::Platform;

/// A downloadable release asset found during the repository scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    pub repo_owner: String,
    pub repo_name: String,
    pub asset_name: String,
    pub download_url: String,
    pub asset_id: u64,
}

/// Repository and release lookups the finder needs.
///
/// Implemented by `GithubClient`; tests provide stubs.
pub trait ReleaseSource {
    fn list_repos(
        &self,
        visibility: Visibility,
        page: u32,
    ) -> Result<Vec<Repository>, Box<dyn Error>>;

    fn latest_release(&self, owner: &str, repo: &str) -> Result<Release, Box<dyn Error>>;

    fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>, Box<dyn Error>>;
}

impl ReleaseSource for GithubClient {
    fn list_repos(
        &self,
        visibility: Visibility,
        page: u32,
    ) -> Result<Vec<Repository>, Box<dyn Error>> {
        GithubClient::list_repos(self, visibility, page)
    }

    fn latest_release(&self, owner: &str, repo: &str) -> Result<Release, Box<dyn Error>> {
        GithubClient::latest_release(self, owner, repo)
    }

    fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<Release>, Box<dyn Error>> {
        GithubClient::list_releases(self, owner, repo)
    }
}

/// Scan all matching repositories and collect platform-matching assets.
///
/// Only the repository listing itself can fail; per-repository release and
/// asset lookups are treated as "no candidate from this repository".
pub fn find_release_candidates(
    source: &impl ReleaseSource,
    pattern: &str,
    version: Option<&str>,
    platform: Platform,
    visibility: Visibility,
) -> Result<Vec<ReleaseCandidate>, Box<dyn Error>> {
    let pattern = pattern.to_lowercase();
    let mut candidates = Vec::new();

    let mut page = 1u32;
    loop {
        let repos = source
            .list_repos(visibility, page)
            .map_err(|e| format!("failed to list repositories (page {}): {}", page, e))?;

        for repo in &repos {
            if !repo_matches(&repo.name, &pattern) {
                continue;
            }
            let owner = match &repo.owner {
                Some(owner) => owner.login.clone(),
                None => {
                    log_warning(&format!(
                        "Skipping repository {}: no owner in API response",
                        repo.name
                    ));
                    continue;
                }
            };

            // No releases (404) or a transient lookup failure: skip the repo.
            let release = match resolve_release(source, &owner, &repo.name, version) {
                Some(release) => release,
                None => continue,
            };

            if let Some(asset) = pick_asset(&release.assets, platform) {
                candidates.push(ReleaseCandidate {
                    repo_owner: owner,
                    repo_name: repo.name.clone(),
                    asset_name: asset.name.clone(),
                    download_url: asset.browser_download_url.clone(),
                    asset_id: asset.id,
                });
            }
        }

        if repos.len() < REPOS_PER_PAGE {
            break;
        }
        page += 1;
    }

    Ok(candidates)
}

/// What to do with a finder result.
#[derive(Debug, PartialEq)]
pub enum Action<'a> {
    /// Nothing matched; report and write no file.
    NoMatch,
    /// Exactly one candidate; download it.
    Download(&'a ReleaseCandidate),
    /// Several candidates; print one line each, write no file.
    List(Vec<String>),
}

/// Decide what to do with the candidates the scan produced.
pub fn plan_action(candidates: &[ReleaseCandidate]) -> Action<'_> {
    match candidates {
        [] => Action::NoMatch,
        [one] => Action::Download(one),
        many => Action::List(many.iter().map(candidate_line).collect()),
    }
}

fn candidate_line(c: &ReleaseCandidate) -> String {
    format!("{}/{}: {}", c.repo_owner, c.repo_name, c.asset_name)
}

/// Pick the release to search for assets: latest by default, or the first
/// release whose tag contains the version pattern.
fn resolve_release(
    source: &impl ReleaseSource,
    owner: &str,
    repo: &str,
    version: Option<&str>,
) -> Option<Release> {
    match version {
        None => source.latest_release(owner, repo).ok(),
        Some(pattern) => {
            let releases = source.list_releases(owner, repo).ok()?;
            pick_release(releases, pattern)
        }
    }
}

fn pick_release(releases: Vec<Release>, pattern: &str) -> Option<Release> {
    let pattern = pattern.to_lowercase();
    releases
        .into_iter()
        .find(|r| r.tag_name.to_lowercase().contains(&pattern))
}

fn repo_matches(name: &str, pattern_lower: &str) -> bool {
    pattern_lower.is_empty() || name.to_lowercase().contains(pattern_lower)
}

/// First asset whose lowercased name contains both platform substrings.
fn pick_asset(assets: &[ReleaseAsset], platform: Platform) -> Option<&ReleaseAsset> {
    assets.iter().find(|a| {
        let name = a.name.to_lowercase();
        name.contains(platform.os) && name.contains(platform.arch)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::RepoOwner;
    use std::collections::HashMap;

    const LINUX_AMD64: Platform = Platform {
        os: "linux",
        arch: "amd64",
    };

    fn asset(id: u64, name: &str) -> ReleaseAsset {
        ReleaseAsset {
            id,
            name: name.to_string(),
            browser_download_url: format!("https://example.com/{}", name),
        }
    }

    fn repo(owner: Option<&str>, name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            owner: owner.map(|login| RepoOwner {
                login: login.to_string(),
            }),
        }
    }

    fn candidate(owner: &str, name: &str, asset_name: &str) -> ReleaseCandidate {
        ReleaseCandidate {
            repo_owner: owner.to_string(),
            repo_name: name.to_string(),
            asset_name: asset_name.to_string(),
            download_url: format!("https://example.com/{}", asset_name),
            asset_id: 1,
        }
    }

    /// Releases keyed by repo name; a missing key behaves like a repo
    /// without any release (the lookup fails).
    struct StubSource {
        repos: Vec<Repository>,
        releases: HashMap<String, Release>,
    }

    impl ReleaseSource for StubSource {
        fn list_repos(
            &self,
            _visibility: Visibility,
            page: u32,
        ) -> Result<Vec<Repository>, Box<dyn Error>> {
            if page == 1 {
                Ok(self.repos.clone())
            } else {
                Ok(Vec::new())
            }
        }

        fn latest_release(&self, _owner: &str, repo: &str) -> Result<Release, Box<dyn Error>> {
            self.releases
                .get(repo)
                .cloned()
                .ok_or_else(|| format!("404 Not Found: {}/releases/latest", repo).into())
        }

        fn list_releases(&self, _owner: &str, repo: &str) -> Result<Vec<Release>, Box<dyn Error>> {
            Ok(self.releases.get(repo).cloned().into_iter().collect())
        }
    }

    fn release_with(assets: Vec<ReleaseAsset>) -> Release {
        Release {
            tag_name: "v1.0.0".to_string(),
            assets,
        }
    }

    #[test]
    fn test_repo_pattern_is_case_insensitive_substring() {
        assert!(repo_matches("Tool-X", "tool-"));
        assert!(repo_matches("my-tool-kit", "tool-"));
        assert!(!repo_matches("other", "tool-"));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        assert!(repo_matches("anything", ""));
        assert!(repo_matches("", ""));
    }

    #[test]
    fn test_asset_needs_both_os_and_arch() {
        let assets = vec![
            asset(1, "tool-windows-amd64.exe"),
            asset(2, "tool-linux-arm64"),
            asset(3, "checksums.txt"),
            asset(4, "Tool-Linux-AMD64"),
        ];
        let picked = pick_asset(&assets, LINUX_AMD64).unwrap();
        assert_eq!(picked.id, 4);
    }

    #[test]
    fn test_first_qualifying_asset_wins() {
        let assets = vec![
            asset(1, "tool-linux-amd64.tar.gz"),
            asset(2, "tool-linux-amd64"),
        ];
        let picked = pick_asset(&assets, LINUX_AMD64).unwrap();
        assert_eq!(picked.id, 1);
    }

    #[test]
    fn test_no_qualifying_asset() {
        let assets = vec![asset(1, "tool-darwin-arm64"), asset(2, "README.md")];
        assert!(pick_asset(&assets, LINUX_AMD64).is_none());
        assert!(pick_asset(&[], LINUX_AMD64).is_none());
    }

    #[test]
    fn test_release_picked_by_tag_substring() {
        let releases: Vec<Release> = serde_json::from_str(
            r#"[
                {"tag_name": "v2.0.0", "assets": []},
                {"tag_name": "V1.4.2", "assets": []},
                {"tag_name": "v1.4.1", "assets": []}
            ]"#,
        )
        .unwrap();

        let picked = pick_release(releases.clone(), "1.4").unwrap();
        assert_eq!(picked.tag_name, "V1.4.2");
        assert!(pick_release(releases, "3.0").is_none());
    }

    #[test]
    fn test_repo_without_releases_is_skipped() {
        let mut releases = HashMap::new();
        releases.insert(
            "tool-a".to_string(),
            release_with(vec![asset(1, "tool-a-linux-amd64")]),
        );
        // "tool-b" has no entry, so its release lookup fails like a 404.
        let source = StubSource {
            repos: vec![repo(Some("me"), "tool-a"), repo(Some("me"), "tool-b")],
            releases,
        };

        let candidates =
            find_release_candidates(&source, "tool-", None, LINUX_AMD64, Visibility::Private)
                .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].repo_name, "tool-a");
    }

    #[test]
    fn test_scan_filters_and_preserves_repo_order() {
        let mut releases = HashMap::new();
        for name in ["tool-a", "other", "Tool-B"] {
            releases.insert(
                name.to_string(),
                release_with(vec![asset(1, &format!("{}-linux-amd64", name))]),
            );
        }
        let source = StubSource {
            repos: vec![
                repo(Some("me"), "tool-a"),
                repo(Some("me"), "other"),
                repo(Some("me"), "Tool-B"),
                repo(None, "tool-ownerless"),
            ],
            releases,
        };

        let candidates =
            find_release_candidates(&source, "tool-", None, LINUX_AMD64, Visibility::Private)
                .unwrap();

        let names: Vec<&str> = candidates.iter().map(|c| c.repo_name.as_str()).collect();
        assert_eq!(names, ["tool-a", "Tool-B"]);
    }

    #[test]
    fn test_zero_candidates_plan_no_download() {
        assert_eq!(plan_action(&[]), Action::NoMatch);
    }

    #[test]
    fn test_single_candidate_planned_for_download() {
        let candidates = vec![candidate("me", "tool-a", "tool-a-linux-amd64")];
        match plan_action(&candidates) {
            Action::Download(c) => assert_eq!(c, &candidates[0]),
            other => panic!("expected Download, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_candidates_listed_in_discovery_order() {
        let candidates = vec![
            candidate("me", "tool-a", "tool-a-linux-amd64"),
            candidate("you", "tool-b", "tool-b-linux-amd64"),
        ];
        assert_eq!(
            plan_action(&candidates),
            Action::List(vec![
                "me/tool-a: tool-a-linux-amd64".to_string(),
                "you/tool-b: tool-b-linux-amd64".to_string(),
            ])
        );
    }
}
