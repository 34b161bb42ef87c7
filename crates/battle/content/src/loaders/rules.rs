//! Battle rules loader.

use std::path::Path;

use battle_core::BattleRules;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle rules from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Load rules from a TOML file.
    ///
    /// Missing keys keep their defaults, so an empty file yields
    /// `BattleRules::default()`. The result is validated before it is
    /// returned.
    pub fn load(path: &Path) -> LoadResult<BattleRules> {
        let content = read_file(path)?;
        let rules: BattleRules = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        rules
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid rules in {}: {}", path.display(), e))?;

        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_rules(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_rules("max_rounds = 8\nseed = 42\n");
        let rules = RulesLoader::load(file.path()).unwrap();
        assert_eq!(rules.max_rounds, 8);
        assert_eq!(rules.seed, 42);
        assert_eq!(rules.board_size, BattleRules::DEFAULT_BOARD_SIZE);
        assert_eq!(
            rules.torpedo_splash_damage,
            BattleRules::DEFAULT_TORPEDO_SPLASH_DAMAGE
        );
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let file = write_rules("beam_range_dropoff = 1.5\n");
        let err = RulesLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("beam_range_dropoff"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let file = write_rules("max_rounds = \"many\"\n");
        assert!(RulesLoader::load(file.path()).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = RulesLoader::load(Path::new("/nonexistent/rules.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules.toml"));
    }
}
