use anyhow::Context;
use git_swift_core::constants::APP_NAME;
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "git-swift.log";

pub fn cache_dir() -> anyhow::Result<PathBuf> {
    #[cfg(unix)]
    {
        if let Ok(xdg_cache_home) = std::env::var("XDG_CACHE_HOME")
            && !xdg_cache_home.is_empty()
        {
            return Ok(PathBuf::from(xdg_cache_home).join(APP_NAME));
        }
        Ok(dirs::home_dir()
            .context("Unable to find home directory")?
            .join(".cache")
            .join(APP_NAME))
    }
    #[cfg(windows)]
    {
        Ok(dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME))
    }
}

pub fn default_log_file() -> anyhow::Result<PathBuf> {
    Ok(cache_dir()?.join(LOG_FILE_NAME))
}

pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<()> {
    if level == log::LevelFilter::Off {
        return Ok(());
    }
    let log_file = default_log_file()?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("git-swift logging initialised (level={level})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_dir_respects_xdg_override() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("custom-cache");

        unsafe { std::env::set_var("XDG_CACHE_HOME", &custom) };
        let result = cache_dir().unwrap();
        unsafe { std::env::remove_var("XDG_CACHE_HOME") };

        assert_eq!(result, custom.join(APP_NAME));
    }

    #[test]
    fn default_log_file_ends_with_log_filename() {
        let path = default_log_file().unwrap();
        assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
        assert!(path.parent().unwrap().ends_with(APP_NAME));
    }
}
