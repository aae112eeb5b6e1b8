use serde::Deserialize;
use std::fmt;

/// The ordered list of patch groups applied by one run.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct PatchTable {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub groups: Vec<PatchGroup>,
}

impl PatchTable {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.groups.is_empty() {
            issues.push(ValidationIssue::EmptyGroupList);
        }

        for group in &self.groups {
            if group.file.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    file: None,
                    patch_id: None,
                    field: "file",
                });
            }
            if group.patches.is_empty() {
                issues.push(ValidationIssue::EmptyPatchList {
                    file: group.file.clone(),
                });
            }

            for patch in &group.patches {
                if patch.search.is_empty() {
                    issues.push(ValidationIssue::MissingField {
                        file: Some(group.file.clone()),
                        patch_id: Some(patch.id.clone()),
                        field: "search",
                    });
                    continue;
                }
                if patch.search == patch.replace {
                    issues.push(ValidationIssue::InvalidCombo {
                        file: group.file.clone(),
                        patch_id: patch.id.clone(),
                        message: "search and replace are identical".to_string(),
                    });
                } else if patch.replace.contains(&patch.search) {
                    issues.push(ValidationIssue::InvalidCombo {
                        file: group.file.clone(),
                        patch_id: patch.id.clone(),
                        message: "replace text contains its own search text".to_string(),
                    });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Number of patches across all groups.
    pub fn patch_count(&self) -> usize {
        self.groups.iter().map(|g| g.patches.len()).sum()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One target file and the patches applied to it, in order.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PatchGroup {
    /// Path relative to the base directory given on the command line
    pub file: String,
    #[serde(default)]
    pub patches: Vec<Patch>,
}

/// One exact search-and-replace instruction.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Patch {
    #[serde(default)]
    pub id: String,
    pub search: String,
    pub replace: String,
}

impl Patch {
    pub fn new(
        id: impl Into<String>,
        search: impl Into<String>,
        replace: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            search: search.into(),
            replace: replace.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyGroupList,
    EmptyPatchList {
        file: String,
    },
    MissingField {
        file: Option<String>,
        patch_id: Option<String>,
        field: &'static str,
    },
    InvalidCombo {
        file: String,
        patch_id: String,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyGroupList => write!(f, "table defines no groups"),
            ValidationIssue::EmptyPatchList { file } => {
                write!(f, "group {} defines no patches", file)
            }
            ValidationIssue::MissingField {
                file,
                patch_id,
                field,
            } => match (file, patch_id) {
                (Some(file), Some(id)) => {
                    write!(f, "{} patch {:?} missing required field {}", file, id, field)
                }
                (Some(file), None) => write!(f, "{} missing required field {}", file, field),
                _ => write!(f, "group missing required field {}", field),
            },
            ValidationIssue::InvalidCombo {
                file,
                patch_id,
                message,
            } => write!(f, "{} patch {:?}: {}", file, patch_id, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(file: &str, patches: Vec<Patch>) -> PatchGroup {
        PatchGroup {
            file: file.to_string(),
            patches,
        }
    }

    #[test]
    fn test_validate_ok() {
        let table = PatchTable {
            meta: Metadata::default(),
            groups: vec![group("a.tsx", vec![Patch::new("p", "old", "new")])],
        };
        assert!(table.validate().is_ok());
        assert_eq!(table.patch_count(), 1);
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let table = PatchTable {
            meta: Metadata::default(),
            groups: vec![
                group("", vec![Patch::new("p", "old", "new")]),
                group("b.tsx", vec![]),
                group(
                    "c.tsx",
                    vec![
                        Patch::new("empty", "", "x"),
                        Patch::new("same", "x", "x"),
                        Patch::new("self", "abc", "try { abc }"),
                    ],
                ),
            ],
        };

        let err = table.validate().unwrap_err();
        assert_eq!(err.issues.len(), 5);
        assert!(matches!(
            err.issues[1],
            ValidationIssue::EmptyPatchList { .. }
        ));
        assert!(err.to_string().contains("replace text contains its own search text"));
    }

    #[test]
    fn test_validate_empty_table() {
        let err = PatchTable::default().validate().unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::EmptyGroupList]);
    }
}
