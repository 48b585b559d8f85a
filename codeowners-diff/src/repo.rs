use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tracing::debug;

use crate::error::Error;

/// Pseudo-revision naming the uncommitted working tree. Distinct from any
/// commit: the rules file is read from disk rather than from git history.
pub const WORKTREE: &str = "WORKTREE";

/// Locations searched for the rules file, in resolution order.
pub const RULES_FILE_LOCATIONS: &[&str] =
    &[".github/CODEOWNERS", "CODEOWNERS", "docs/CODEOWNERS"];

/// The narrow repository interface the comparator needs. Implemented by
/// [`GitRepo`] for real repositories and by in-memory fakes in tests.
pub trait Repository {
    /// The rules-file text at a revision, or `None` when the revision has no
    /// rules file. An unresolvable revision is an error.
    fn rules_file(&self, rev: &str) -> Result<Option<String>, Error>;

    /// Repository-relative paths of every file tracked in the current
    /// working tree.
    fn tracked_files(&self) -> Result<Vec<String>, Error>;
}

/// A git repository driven through the `git` CLI. Every call is a one-shot
/// blocking subprocess; nothing is cached or retried.
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Use an explicit repository root.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Discover the repository containing the current directory.
    pub fn discover() -> Result<Self, Error> {
        let output = run_git(Path::new("."), &["rev-parse", "--show-toplevel"])?;
        let stdout = expect_success(&["rev-parse", "--show-toplevel"], output)?;
        Ok(Self::at(stdout.trim_end()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn verify_revision(&self, rev: &str) -> Result<(), Error> {
        let spec = format!("{rev}^{{commit}}");
        let output = run_git(&self.root, &["rev-parse", "--verify", "--quiet", &spec])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(Error::UnresolvableRevision(rev.to_string()))
        }
    }

    fn rules_file_in_worktree(&self) -> Result<Option<String>, Error> {
        for location in RULES_FILE_LOCATIONS {
            match fs::read_to_string(self.root.join(location)) {
                Ok(text) => return Ok(Some(text)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(None)
    }

    fn rules_file_at_revision(&self, rev: &str) -> Result<Option<String>, Error> {
        self.verify_revision(rev)?;
        for location in RULES_FILE_LOCATIONS {
            let spec = format!("{rev}:{location}");
            let output = run_git(&self.root, &["cat-file", "blob", &spec])?;
            if output.status.success() {
                debug!(%rev, %location, "loaded rules file");
                return Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()));
            }
        }
        Ok(None)
    }
}

impl Repository for GitRepo {
    fn rules_file(&self, rev: &str) -> Result<Option<String>, Error> {
        if rev == WORKTREE {
            self.rules_file_in_worktree()
        } else {
            self.rules_file_at_revision(rev)
        }
    }

    fn tracked_files(&self) -> Result<Vec<String>, Error> {
        let output = run_git(&self.root, &["ls-files"])?;
        let stdout = expect_success(&["ls-files"], output)?;
        Ok(stdout.lines().map(str::to_string).collect())
    }
}

fn run_git(dir: &Path, args: &[&str]) -> Result<Output, Error> {
    Ok(Command::new("git").args(args).current_dir(dir).output()?)
}

fn expect_success(args: &[&str], output: Output) -> Result<String, Error> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(Error::Git {
            command: format!("git {}", args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        })
    }
}
