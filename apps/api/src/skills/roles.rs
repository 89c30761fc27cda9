//! Role Requirement Table: static mapping from role name to required skills.
//!
//! Lookups are case-insensitive on the trimmed role name. The table is built once
//! at startup (built-in defaults or a JSON file) and never mutated afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use crate::skills::SkillSet;

#[derive(Debug, Clone, Error, Serialize)]
#[error("Unknown role '{role}'")]
pub struct UnknownRoleError {
    pub role: String,
}

#[derive(Debug, Clone)]
struct RoleEntry {
    display_name: String,
    required: SkillSet,
}

/// Fixed, in-memory role → required-skill configuration.
#[derive(Debug, Clone)]
pub struct RoleTable {
    // keyed by normalized role name
    entries: BTreeMap<String, RoleEntry>,
}

const BUILTIN_ROLES: &[(&str, &[&str])] = &[
    (
        "Data Scientist",
        &["python", "sql", "statistics", "machine", "learning", "pandas", "visualization"],
    ),
    (
        "Frontend Developer",
        &["javascript", "typescript", "react", "html", "css", "accessibility", "testing"],
    ),
    (
        "Backend Developer",
        &["python", "java", "databases", "rest", "apis", "docker", "testing"],
    ),
    (
        "DevOps Engineer",
        &["linux", "docker", "kubernetes", "terraform", "aws", "monitoring", "scripting"],
    ),
    (
        "Machine Learning Engineer",
        &["python", "pytorch", "tensorflow", "deployment", "statistics", "docker", "mlops"],
    ),
    (
        "Product Manager",
        &["roadmap", "stakeholder", "analytics", "communication", "agile", "prioritization"],
    ),
];

impl Default for RoleTable {
    fn default() -> Self {
        Self::from_pairs(
            BUILTIN_ROLES
                .iter()
                .map(|(role, skills)| (role.to_string(), skills.iter().map(|s| s.to_string()))),
        )
    }
}

impl RoleTable {
    /// Builds a table from `(role, skills)` pairs. Skills are normalized the same
    /// way the tokenizer normalizes résumé tokens (trimmed, lower-cased).
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, S)>,
        S: IntoIterator<Item = String>,
    {
        let entries = pairs
            .into_iter()
            .filter(|(role, _)| !role.trim().is_empty())
            .map(|(role, skills)| {
                let required = skills
                    .into_iter()
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect();
                (
                    normalize_role(&role),
                    RoleEntry {
                        display_name: role.trim().to_string(),
                        required,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    /// Loads a table from a JSON object of the form `{"Role Name": ["skill", ...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read role table '{}'", path.display()))?;
        let parsed: BTreeMap<String, Vec<String>> = serde_json::from_str(&raw)
            .with_context(|| format!("Role table '{}' is not valid JSON", path.display()))?;
        Ok(Self::from_pairs(parsed))
    }

    /// Required skills for a configured role.
    pub fn requirements_for(&self, role: &str) -> Result<&SkillSet, UnknownRoleError> {
        self.entries
            .get(&normalize_role(role))
            .map(|e| &e.required)
            .ok_or_else(|| UnknownRoleError {
                role: role.trim().to_string(),
            })
    }

    /// Configured role names, as written in the configuration.
    pub fn roles(&self) -> Vec<String> {
        self.entries
            .values()
            .map(|e| e.display_name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_role(role: &str) -> String {
    role.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
