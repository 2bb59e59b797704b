use std::path::Path;
use std::process::Command;

use crate::repo::RepoIdentity;

/// Detect `owner/repo` from the git remote of the directory at `path`, used
/// to prefill the input.
///
/// Tries the `origin` remote first, falls back to the first listed remote.
pub fn detect_repo(path: &Path) -> Option<RepoIdentity> {
    let url = remote_url(path, "origin").or_else(|| {
        let first = first_remote_name(path)?;
        remote_url(path, &first)
    })?;
    parse_remote_url(&url)
}

fn git_stdout(path: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn remote_url(path: &Path, remote: &str) -> Option<String> {
    let url = git_stdout(path, &["remote", "get-url", remote])?.trim().to_owned();
    if url.is_empty() { None } else { Some(url) }
}

fn first_remote_name(path: &Path) -> Option<String> {
    let out = git_stdout(path, &["remote"])?;
    let name = out.lines().next()?.trim().to_owned();
    if name.is_empty() { None } else { Some(name) }
}

/// Parse `owner/repo` from a github.com SSH or HTTPS remote URL.
///
/// Remotes on other hosts yield `None`: the backend only knows github.com.
fn parse_remote_url(url: &str) -> Option<RepoIdentity> {
    let slug = if let Some(rest) = url.strip_prefix("git@github.com:") {
        rest
    } else if let Some(rest) = url.strip_prefix("ssh://git@github.com/") {
        rest
    } else {
        let after_scheme = url.split_once("://")?.1;
        after_scheme
            .strip_prefix("github.com/")
            .or_else(|| after_scheme.strip_prefix("www.github.com/"))?
    };

    let slug = slug.trim_end_matches('/');
    let slug = slug.strip_suffix(".git").unwrap_or(slug);
    let (owner, repo) = slug.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some(RepoIdentity::new(owner, repo))
}
