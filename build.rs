use std::error::Error;
use std::process::Command;

pub fn main() -> Result<(), Box<dyn Error>> {
    // git show -s --format="%ad %h %an <%ae> (%s)"
    let git_hash = Command::new("git")
        .args(["show", "-s", "--format=%ad %h %an <%ae> (%s)"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| String::from("unknown"));
    println!("cargo:rustc-env=GIT_COMMITID={git_hash}");

    Ok(())
}
