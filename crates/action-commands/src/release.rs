use std::process::Command;

use tracing::info;

use crate::error::{Error, Result};

/// Cumulative tags for a release: `v1.2.3` -> `v1`, `v1.2`, `v1.2.3`.
pub fn release_tags(version: &str) -> Result<Vec<String>> {
    let Some(rest) = version.strip_prefix('v') else {
        return Err(Error::InvalidVersion(version.to_string()));
    };
    let parts: Vec<&str> = rest.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(Error::InvalidVersion(version.to_string()));
    }

    Ok((1..=parts.len())
        .map(|n| format!("v{}", parts[..n].join(".")))
        .collect())
}

/// Git invocations needed to publish `version`, in execution order.
pub fn release_commands(version: &str, remote: &str) -> Result<Vec<Vec<String>>> {
    let tags = release_tags(version)?;
    let message = format!("Release of {version}");

    let mut cmds: Vec<Vec<String>> = tags
        .iter()
        .map(|tag| {
            ["git", "tag", "-f", "-a", tag.as_str(), "-m", message.as_str()]
                .into_iter()
                .map(String::from)
                .collect()
        })
        .collect();

    let mut push: Vec<String> = ["git", "push", "-f", remote]
        .into_iter()
        .map(String::from)
        .collect();
    push.extend(tags);
    cmds.push(push);
    Ok(cmds)
}

#[derive(Debug, Clone)]
pub struct ReleaseRunner {
    pub remote: String,
    pub dry_run: bool,
}

impl Default for ReleaseRunner {
    fn default() -> Self {
        Self {
            remote: "origin".into(),
            dry_run: false,
        }
    }
}

impl ReleaseRunner {
    /// Tag and push `version`. Returns the tags that were (or would be) pushed.
    pub fn run(&self, version: &str) -> Result<Vec<String>> {
        let tags = release_tags(version)?;
        for argv in release_commands(version, &self.remote)? {
            let shown = argv.join(" ");
            if self.dry_run {
                info!("DRY-RUN: {shown}");
                continue;
            }
            info!("running {shown}");
            run_checked(&argv)?;
        }
        Ok(tags)
    }
}

fn run_checked(argv: &[String]) -> Result<()> {
    let Some((bin, args)) = argv.split_first() else {
        return Err(Error::msg("empty command"));
    };
    let status = Command::new(bin)
        .args(args)
        .status()
        .map_err(|e| Error::msg(format!("spawn failed for {bin}: {e}")))?;
    if !status.success() {
        return Err(Error::CommandFailed {
            command: argv.join(" "),
            code: status.code(),
        });
    }
    Ok(())
}
