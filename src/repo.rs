use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// `[https://][www.]github.com/` is optional; owner and repo must be
/// non-empty and stop at `/`, `?`, `#` or the end of the input.
static REPO_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:https://)?(?:www\.)?github\.com/)?([^/?#\s]+?)/([^/?#\s]+?)(?:[/?#].*)?$")
        .expect("repo input pattern is valid")
});

/// The `(owner, repo)` pair a random issue is requested for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoIdentity {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid repo url")]
pub struct InvalidInput;

impl RepoIdentity {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoIdentity {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_repo_input(s)
    }
}

/// Extract `(owner, repo)` from whatever the user typed.
///
/// Accepted forms, after trimming surrounding whitespace:
/// - `owner/repo`
/// - `github.com/owner/repo`, optionally with `www.`
/// - `https://github.com/owner/repo`, optionally with `www.`
///
/// Anything after the repo segment is ignored as long as it starts with `/`,
/// `?` or `#`, so URLs copied from the browser (`.../issues?q=is%3Aopen`,
/// `.../tree/main`) resolve to their repository.
///
/// A host with only one path segment (`github.com/octocat`) is not read as
/// owner `github.com`.
pub fn parse_repo_input(input: &str) -> Result<RepoIdentity, InvalidInput> {
    let caps = REPO_INPUT.captures(input.trim()).ok_or(InvalidInput)?;
    let owner = &caps[1];
    if is_github_host(owner) {
        return Err(InvalidInput);
    }
    Ok(RepoIdentity::new(owner, &caps[2]))
}

fn is_github_host(segment: &str) -> bool {
    segment.eq_ignore_ascii_case("github.com") || segment.eq_ignore_ascii_case("www.github.com")
}
