use std::env;
use std::path::PathBuf;

fn fallback_dotenv_path(guide_home: Option<PathBuf>, config_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(home) = guide_home {
        return Some(home.join(".env"));
    }
    Some(config_dir?.join("guide/.env"))
}

/// Load `.env` from the working directory, falling back to `$GUIDE_HOME/.env`
/// or the per-user config directory.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let fallback = fallback_dotenv_path(
        env::var_os("GUIDE_HOME").map(PathBuf::from),
        dirs::config_dir(),
    );

    let Some(path) = fallback else {
        return;
    };
    if path.is_file() {
        let _ = dotenvy::from_path(&path);
    }
}
