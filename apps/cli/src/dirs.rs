use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "session-costs";

/// Picks the data dir: command line first, then config, then the XDG-style default.
pub fn resolve_data_dir(
    cli_dir: Option<&Path>,
    config_dir: Option<&str>,
) -> Result<PathBuf, String> {
    if let Some(dir) = cli_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = config_dir.map(str::trim).filter(|dir| !dir.is_empty()) {
        return Ok(expand_home(dir, home_dir().ok().as_deref()));
    }
    Ok(home_dir()?
        .join(".local")
        .join("share")
        .join(DATA_DIR_NAME))
}

fn home_dir() -> Result<PathBuf, String> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|err| format!("resolve HOME: {}", err))
}

fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}
