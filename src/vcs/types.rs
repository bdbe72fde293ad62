//! Common types for version control systems

use std::fmt;

/// Kind of version control system hosting a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsKind {
    /// Git (the only kind with working tag resolution)
    Git,
    /// Bazaar
    Bzr,
    /// Mercurial
    Hg,
}

impl VcsKind {
    /// Returns the command identifier of the VCS
    pub fn as_str(&self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Bzr => "bzr",
            VcsKind::Hg => "hg",
        }
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VcsKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git" => Ok(VcsKind::Git),
            "bzr" => Ok(VcsKind::Bzr),
            "hg" => Ok(VcsKind::Hg),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("git", Ok(VcsKind::Git))]
    #[case("bzr", Ok(VcsKind::Bzr))]
    #[case("hg", Ok(VcsKind::Hg))]
    #[case("svn", Err(()))]
    #[case("Git", Err(()))]
    fn from_str_returns_expected(#[case] input: &str, #[case] expected: Result<VcsKind, ()>) {
        assert_eq!(input.parse::<VcsKind>(), expected);
    }

    #[test]
    fn display_matches_command_identifier() {
        assert_eq!(VcsKind::Hg.to_string(), "hg");
    }
}
