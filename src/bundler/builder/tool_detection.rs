//! External tool detection and availability checking.

/// Every program the pipeline invokes, in first-use order.
pub const REQUIRED_TOOLS: [&str; 5] = ["cargo", "sips", "iconutil", "codesign", "create-dmg"];

/// Returns the tools from `tools` that cannot be found in `PATH`.
pub fn missing_tools<'a>(tools: &[&'a str]) -> Vec<&'a str> {
    tools
        .iter()
        .copied()
        .filter(|tool| match which::which(tool) {
            Ok(path) => {
                log::debug!("Found {} at: {}", tool, path.display());
                false
            }
            Err(e) => {
                log::debug!("{} not found in PATH: {}", tool, e);
                true
            }
        })
        .collect()
}
