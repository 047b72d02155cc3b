use std::fmt;
use std::str::FromStr;

use crate::error::FetchError;

/// A GitHub repository in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    repo: String,
}

impl RepoSlug {
    /// Parse `owner/repo`; `owner\repo` is accepted as well.
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let normalized = input.trim().replace('\\', "/");
        let mut parts = normalized.split('/');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(FetchError::InvalidRepo(input.to_string())),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// `update.json` attached to the latest release.
    pub fn manifest_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/releases/latest/download/update.json",
            self.owner, self.repo
        )
    }
}

impl FromStr for RepoSlug {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
