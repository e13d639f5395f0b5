// Cache path utilities.
// Maps composite keys onto filenames under the per-user cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/firstpr on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "firstpr").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the settings file (~/.config/firstpr/settings.json on Linux).
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "firstpr").map(|dirs| dirs.config_dir().join("settings.json"))
}

/// Filename for a composite key. Keys contain `/` and `|`, which are
/// replaced so each key stays a single path component.
pub fn key_file_name(key: &str) -> String {
    format!("{}.json", sanitize_key(key))
}

fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | '|' | ':' | '*' | '?' | '"' | '<' | '>' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_file_name() {
        assert_eq!(key_file_name("alice|acme/widgets"), "alice_acme_widgets.json");
        assert_eq!(key_file_name("alice|__self"), "alice___self.json");
    }

    #[test]
    fn test_distinct_simple_keys_stay_distinct() {
        assert_ne!(key_file_name("alice|acme"), key_file_name("alicia|acme"));
    }
}
