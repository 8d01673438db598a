//! Logger setup for the viewer binary

use log::LevelFilter;

/// Crates whose log output is shown by default
pub const CRATES: &[&str] = &[
    "scattercrate_core",
    "scattercrate_io",
    "scattercrate_gpu",
    "scattercrate_visualization",
    "scattercrate_viewer",
];

/// `info` for debug builds, `warn` for release builds
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Filter string enabling `level` for each of `crates`
pub fn filter_string(crates: &[&str], level: LevelFilter) -> String {
    let level = level.as_str().to_ascii_lowercase();
    crates
        .iter()
        .map(|name| format!("{}={}", name, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize env_logger; `RUST_LOG` takes precedence over the defaults
pub fn init() {
    init_with_level(CRATES, default_level());
}

pub fn init_with_level(crates: &[&str], level: LevelFilter) {
    let filter = filter_string(crates, level);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_string() {
        assert_eq!(
            filter_string(&["scattercrate_io", "scattercrate_gpu"], LevelFilter::Debug),
            "scattercrate_io=debug,scattercrate_gpu=debug"
        );
        assert_eq!(filter_string(&[], LevelFilter::Info), "");
        assert_eq!(filter_string(&["scattercrate_viewer"], LevelFilter::Off), "scattercrate_viewer=off");
    }
}
