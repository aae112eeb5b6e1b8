use crate::config::schema::{PatchTable, ValidationError};
use std::fmt;

/// The AbortError guard table, compiled into the binary.
pub const BUILTIN_TABLE: &str = include_str!("../../patches/abort-error.toml");

#[derive(Debug)]
pub enum ConfigError {
    Toml { source: toml_edit::de::Error },
    Validation { source: ValidationError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Toml { source } => write!(f, "failed to parse patch table TOML: {}", source),
            ConfigError::Validation { source } => write!(f, "invalid patch table: {}", source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Toml { source } => Some(source),
            ConfigError::Validation { source } => Some(source),
        }
    }
}

pub fn load_from_str(input: &str) -> Result<PatchTable, ConfigError> {
    let table: PatchTable =
        toml_edit::de::from_str(input).map_err(|source| ConfigError::Toml { source })?;
    table
        .validate()
        .map_err(|source| ConfigError::Validation { source })?;
    Ok(table)
}

/// Parse and validate the built-in table.
pub fn builtin() -> Result<PatchTable, ConfigError> {
    load_from_str(BUILTIN_TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let table = builtin().unwrap();
        assert_eq!(table.meta.name, "abort-error-guards");
        let files: Vec<&str> = table.groups.iter().map(|g| g.file.as_str()).collect();
        assert_eq!(
            files,
            vec!["kontrakkerja/page.tsx", "kasbon/page.tsx", "gajian/page.tsx"]
        );
        assert!(table.groups.iter().all(|g| g.patches.len() == 2));
        assert_eq!(table.patch_count(), 6);
    }

    #[test]
    fn test_builtin_multiline_search_keeps_indentation() {
        let table = builtin().unwrap();
        let search = &table.groups[0].patches[0].search;
        assert!(search.starts_with("(async () => {\n            if (!value) return;"));
        assert!(search.ends_with("\n        })();"));
    }

    #[test]
    fn test_builtin_replacements_guard_abort_error() {
        let table = builtin().unwrap();
        for group in &table.groups {
            for patch in &group.patches {
                assert!(
                    patch.replace.contains(r#"e?.name === "AbortError""#),
                    "{} {} does not guard AbortError",
                    group.file,
                    patch.id
                );
                assert!(!patch.search.contains("AbortError"));
            }
        }
    }

    #[test]
    fn test_load_from_str_parse_error() {
        let err = load_from_str("[[groups]\nfile = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn test_load_from_str_validation_error() {
        let input = r#"
[[groups]]
file = "a.tsx"

[[groups.patches]]
search = "x"
replace = "x"
"#;
        let err = load_from_str(input).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.to_string().starts_with("invalid patch table:"));
    }
}
