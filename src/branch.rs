//! Parsing of `git branch -a` output into typed branch descriptors.
//!
//! A listing looks like:
//!
//! ```text
//! * develop
//!   feature/login
//! + hotfix
//!   remotes/origin/HEAD -> origin/develop
//!   remotes/origin/develop
//!   remotes/origin/feature/login
//! ```
//!
//! `*` marks the checked-out branch and `+` a branch checked out in another
//! worktree. Symbolic refs and the detached-HEAD placeholder are not branches
//! and are left out.

const REMOTES_PREFIX: &str = "remotes/";

/// One branch from a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDescriptor {
    /// Branch name without marker or remote prefix.
    pub name: String,
    /// Remote name for remote-tracking branches, `None` for local ones.
    pub remote: Option<String>,
    /// Whether this is the checked-out branch.
    pub is_current: bool,
}

impl BranchDescriptor {
    pub fn local(name: &str) -> Self {
        Self {
            name: name.to_string(),
            remote: None,
            is_current: false,
        }
    }

    pub fn remote(remote: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            remote: Some(remote.to_string()),
            is_current: false,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Whether this is a remote-tracking branch of `remote`.
    pub fn tracks(&self, remote: &str) -> bool {
        self.remote.as_deref() == Some(remote)
    }
}

/// Parses a full `git branch -a` listing, keeping the listing order.
pub fn parse_branch_listing(listing: &str) -> Vec<BranchDescriptor> {
    listing.lines().filter_map(parse_branch_line).collect()
}

/// Parses one listing line; `None` for blank lines and non-branch entries.
pub fn parse_branch_line(line: &str) -> Option<BranchDescriptor> {
    let line = line.trim();
    let (is_current, rest) = match line.strip_prefix('*') {
        Some(rest) => (true, rest),
        None => (false, line.strip_prefix('+').unwrap_or(line)),
    };
    let entry = rest.trim();

    if entry.is_empty() || entry.starts_with('(') || entry.contains(" -> ") {
        return None;
    }

    match entry.strip_prefix(REMOTES_PREFIX) {
        Some(qualified) => {
            let (remote, name) = qualified.split_once('/')?;
            let (remote, name) = (remote.trim(), name.trim());
            if remote.is_empty() || name.is_empty() {
                return None;
            }
            Some(BranchDescriptor {
                name: name.to_string(),
                remote: Some(remote.to_string()),
                is_current,
            })
        }
        None => Some(BranchDescriptor {
            name: entry.to_string(),
            remote: None,
            is_current,
        }),
    }
}
