use std::process::Command;

/// Runs a git subcommand and returns its trimmed stdout, if git is available.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_ref = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    let build_date =
        git(&["log", "-1", "--format=%cd", "--date=format:%Y-%m-%d %H:%M"]).unwrap_or_default();

    // A release build is a clean tree whose HEAD carries the package version tag.
    let version = env!("CARGO_PKG_VERSION");
    let dirty = git(&["status", "--porcelain"]).is_some_and(|s| !s.is_empty());
    let tagged = git(&["tag", "--points-at", "HEAD"]).is_some_and(|tags| {
        tags.lines()
            .any(|tag| tag == version || tag.strip_prefix('v') == Some(version))
    });

    println!("cargo:rustc-env=GRAFCTL_GIT_REF={}", git_ref);
    println!("cargo:rustc-env=GRAFCTL_BUILD_DATE={}", build_date);
    println!("cargo:rustc-env=GRAFCTL_IS_RELEASE={}", tagged && !dirty);
}
