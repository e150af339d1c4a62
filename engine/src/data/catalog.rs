// Static team catalog. Read-only once loaded; sessions borrow teams from it.
use crate::error::{EngineError, EngineResult};
use serde::Deserialize;
use shared::models::{BaselineSemester, Team};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default = "default_version")]
    version: u32,
    teams: Vec<Team>,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone, Default)]
pub struct TeamCatalog {
    version: u32,
    // Keyed by lowercase slug.
    teams: BTreeMap<String, Team>,
}

impl TeamCatalog {
    pub fn new(version: u32) -> Self {
        TeamCatalog {
            version,
            teams: BTreeMap::new(),
        }
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> EngineResult<Self> {
        Self::from_json_str(include_str!("../../assets/catalog/teams.json"))
    }

    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = TeamCatalog::new(file.version);
        for team in file.teams {
            catalog.insert(team)?;
        }
        tracing::info!(version = catalog.version, teams = catalog.len(), "Loaded team catalog");
        Ok(catalog)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Validates and adds a team. A later team with the same slug replaces the earlier one.
    pub fn insert(&mut self, team: Team) -> EngineResult<()> {
        let team = Team::new(&team.slug, &team.name, team.logo, team.semesters);
        validate_team(&team)?;
        let slug = team.slug.clone();
        if self.teams.insert(slug.clone(), team).is_some() {
            tracing::warn!(team = %slug, "Duplicate team slug in catalog; keeping the last definition");
        }
        Ok(())
    }

    /// Case-insensitive lookup by slug.
    pub fn get(&self, slug: &str) -> EngineResult<&Team> {
        self.teams
            .get(&slug.trim().to_lowercase())
            .ok_or_else(|| EngineError::TeamNotFound(slug.to_string()))
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

fn validate_team(team: &Team) -> EngineResult<()> {
    if team.slug.trim().is_empty() {
        return Err(EngineError::CatalogFormatError("Team with empty slug".to_string()));
    }
    if team.name.trim().is_empty() {
        return Err(EngineError::CatalogFormatError(format!("Team '{}' has no name", team.slug)));
    }
    if team.semesters.is_empty() {
        return Err(EngineError::CatalogFormatError(format!(
            "Team '{}' has no baseline semesters",
            team.slug
        )));
    }
    for semester in &team.semesters {
        validate_semester(&team.slug, semester)?;
    }
    Ok(())
}

fn validate_semester(slug: &str, semester: &BaselineSemester) -> EngineResult<()> {
    let expected = semester.months();
    if semester.base.len() != expected.len() || !expected.iter().all(|m| semester.base.contains_key(m)) {
        let found: Vec<&str> = semester.base.keys().map(|m| m.code()).collect();
        return Err(EngineError::CatalogFormatError(format!(
            "Team '{}' semester {} must list exactly {:?}, found {:?}",
            slug,
            semester.id,
            expected.iter().map(|m| m.code()).collect::<Vec<_>>(),
            found
        )));
    }
    if let Some((month, value)) = semester.base.iter().find(|(_, v)| !v.is_finite() || **v < 0.0) {
        return Err(EngineError::CatalogFormatError(format!(
            "Team '{}' semester {} has invalid baseline {} for {}",
            slug, semester.id, value, month
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{HalfYear, Month, SemesterId};

    #[test]
    fn test_builtin_catalog() {
        let catalog = TeamCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 3);
        let slugs: Vec<&str> = catalog.teams().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["imbramil", "lunch", "snack"]);

        let lunch = catalog.get("lunch").unwrap();
        assert_eq!(lunch.name, "Equipe Lunch");
        assert_eq!(lunch.logo.as_deref(), Some("/logos/lunch.png"));
        let s1 = lunch.semester(SemesterId::new(2025, HalfYear::S1)).unwrap();
        assert_eq!(s1.stored(Month::Jan), 290.742);
        assert_eq!(s1.stored(Month::Jun), 318.971);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = TeamCatalog::builtin().unwrap();
        assert_eq!(catalog.get("SNACK").unwrap().slug, "snack");
        assert_eq!(catalog.get(" Imbramil ").unwrap().slug, "imbramil");
    }

    #[test]
    fn test_unknown_team() {
        let catalog = TeamCatalog::builtin().unwrap();
        let err = catalog.get("dinner").unwrap_err();
        assert!(matches!(err, EngineError::TeamNotFound(ref s) if s == "dinner"));
    }

    #[test]
    fn test_semesters_sorted_on_load() {
        let json = r#"{ "teams": [ { "slug": "T", "name": "Team", "semesters": [
            { "id": "2025S2", "base": { "jul": 1, "ago": 1, "set": 1, "out": 1, "nov": 1, "dez": 1 } },
            { "id": "2025", "base": { "jan": 2, "fev": 2, "mar": 2, "abr": 2, "mai": 2, "jun": 2 } }
        ] } ] }"#;
        let catalog = TeamCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.version(), 1);
        let team = catalog.get("t").unwrap();
        assert_eq!(team.semesters[0].id, SemesterId::new(2025, HalfYear::S1));
        assert_eq!(team.semesters[1].id, SemesterId::new(2025, HalfYear::S2));
        assert_eq!(team.logo, None);
    }

    #[test]
    fn test_rejects_semester_with_wrong_months() {
        let json = r#"{ "teams": [ { "slug": "t", "name": "Team", "semesters": [
            { "id": "2025-S1", "base": { "jan": 1, "fev": 1, "mar": 1, "abr": 1, "mai": 1, "jul": 1 } }
        ] } ] }"#;
        let err = TeamCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, EngineError::CatalogFormatError(_)));
        assert!(err.to_string().contains("2025-S1"));
    }

    #[test]
    fn test_rejects_negative_baseline() {
        let json = r#"{ "teams": [ { "slug": "t", "name": "Team", "semesters": [
            { "id": "2025-S1", "base": { "jan": 1, "fev": -1, "mar": 1, "abr": 1, "mai": 1, "jun": 1 } }
        ] } ] }"#;
        assert!(TeamCatalog::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_team_without_semesters() {
        let json = r#"{ "teams": [ { "slug": "t", "name": "Team", "semesters": [] } ] }"#;
        assert!(TeamCatalog::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_unknown_month_code() {
        let json = r#"{ "teams": [ { "slug": "t", "name": "Team", "semesters": [
            { "id": "2025-S1", "base": { "january": 1 } }
        ] } ] }"#;
        let err = TeamCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, EngineError::JsonError { .. }));
    }
}
