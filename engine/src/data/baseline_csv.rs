use crate::data::catalog::TeamCatalog;
use crate::error::{EngineError, EngineResult};
use anyhow::{anyhow, Result};
use csv::{ReaderBuilder, StringRecord};
use shared::models::{BaselineSemester, Month, SemesterId, Team};
use shared::utils::brazilian_format;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};

#[derive(Default)]
struct TeamRows {
    name: String,
    logo: Option<String>,
    semesters: BTreeMap<SemesterId, BTreeMap<Month, f64>>,
}

pub struct BaselineCsvLoader;

impl BaselineCsvLoader {
    // CSV Header: Equipe;Nome;Logo;Semestre;Mes;Base
    // Example Row: lunch;Equipe Lunch;/logos/lunch.png;2025-S1;jan;290,742
    // One row per team/semester/month. "Logo" may be absent or blank.
    pub fn load_catalog_from_csv(file_path: &str) -> EngineResult<TeamCatalog> {
        let file = File::open(file_path)?;
        let catalog = Self::load_catalog_from_reader(BufReader::new(file))?;
        tracing::info!(path = %file_path, teams = catalog.len(), "Imported baseline catalog from CSV");
        Ok(catalog)
    }

    pub fn load_catalog_from_reader<R: Read>(reader: R) -> EngineResult<TeamCatalog> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut teams: BTreeMap<String, TeamRows> = BTreeMap::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;
            Self::read_row(&record, &headers, line, &mut teams)
                .map_err(|e| EngineError::CatalogFormatError(e.to_string()))?;
        }

        let mut catalog = TeamCatalog::new(1);
        for (slug, rows) in teams {
            let semesters = rows
                .semesters
                .into_iter()
                .map(|(id, base)| BaselineSemester::new(id, base))
                .collect();
            catalog.insert(Team::new(&slug, &rows.name, rows.logo, semesters))?;
        }
        Ok(catalog)
    }

    fn read_row(
        record: &StringRecord,
        headers: &StringRecord,
        line: usize,
        teams: &mut BTreeMap<String, TeamRows>,
    ) -> Result<()> {
        let slug = Self::required(record, headers, "Equipe", line)?.to_lowercase();
        let name = Self::required(record, headers, "Nome", line)?;
        let logo = Self::get_field(record, headers, "Logo")
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        let semester_str = Self::required(record, headers, "Semestre", line)?;
        let month_str = Self::required(record, headers, "Mes", line)?;
        let base_str = Self::required(record, headers, "Base", line)?;

        let semester: SemesterId = semester_str
            .parse()
            .map_err(|e| anyhow!("Error parsing 'Semestre' at line {}: {}", line, e))?;
        let month: Month = month_str
            .parse()
            .map_err(|e| anyhow!("Error parsing 'Mes' at line {}: {}", line, e))?;
        if month.half() != semester.half {
            return Err(anyhow!(
                "Month '{}' does not belong to semester {} at line {}",
                month, semester, line
            ));
        }
        let base = brazilian_format::parse_decimal(base_str)
            .map_err(|e| anyhow!("Error parsing 'Base' at line {}: {}", line, e))?;

        let entry = teams.entry(slug).or_default();
        entry.name = name.to_string();
        if logo.is_some() {
            entry.logo = logo;
        }
        if entry.semesters.entry(semester).or_default().insert(month, base).is_some() {
            return Err(anyhow!("Duplicate baseline for {} {} at line {}", semester, month, line));
        }
        Ok(())
    }

    fn required<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str> {
        Self::get_field(record, headers, name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    // Field lookup by header name, so column order doesn't matter.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|pos| record.get(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::HalfYear;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    const VALID: &str = "\
Equipe;Nome;Logo;Semestre;Mes;Base
lunch;Equipe Lunch;/logos/lunch.png;2025-S1;jan;290,742
lunch;Equipe Lunch;/logos/lunch.png;2025-S1;fev;279,268
lunch;Equipe Lunch;/logos/lunch.png;2025-S1;mar;276,908
lunch;Equipe Lunch;/logos/lunch.png;2025-S1;abr;295,452
lunch;Equipe Lunch;/logos/lunch.png;2025-S1;mai;304,513
lunch;Equipe Lunch;/logos/lunch.png;2025-S1;jun;318,971
Snack;Equipe Snack;;2024S2;jul;1.180,5
Snack;Equipe Snack;;2024S2;ago;185
Snack;Equipe Snack;;2024S2;set;190
Snack;Equipe Snack;;2024S2;out;195
Snack;Equipe Snack;;2024S2;nov;200
Snack;Equipe Snack;;2024S2;dez;205";

    #[test]
    fn test_load_catalog_from_csv_valid_data() {
        let tmp_file = create_test_csv(VALID);
        let catalog = BaselineCsvLoader::load_catalog_from_csv(tmp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(catalog.len(), 2);

        let lunch = catalog.get("lunch").unwrap();
        assert_eq!(lunch.logo.as_deref(), Some("/logos/lunch.png"));
        let s1 = lunch.semester(SemesterId::new(2025, HalfYear::S1)).unwrap();
        assert_eq!(s1.stored(Month::Jan), 290.742);
        assert_eq!(s1.stored(Month::Jun), 318.971);

        let snack = catalog.get("snack").unwrap();
        assert_eq!(snack.name, "Equipe Snack");
        assert_eq!(snack.logo, None);
        let s2 = snack.semester(SemesterId::new(2024, HalfYear::S2)).unwrap();
        assert_eq!(s2.stored(Month::Jul), 1180.5);
    }

    #[test]
    fn test_load_catalog_header_only() {
        let tmp_file = create_test_csv("Equipe;Nome;Logo;Semestre;Mes;Base");
        let catalog = BaselineCsvLoader::load_catalog_from_csv(tmp_file.path().to_str().unwrap()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_catalog_missing_field() {
        let csv_content = "\
Equipe;Nome;Semestre;Mes
lunch;Equipe Lunch;2025-S1;jan";
        let err = BaselineCsvLoader::load_catalog_from_reader(csv_content.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Missing 'Base' field"));
    }

    #[test]
    fn test_load_catalog_invalid_number() {
        let csv_content = "\
Equipe;Nome;Logo;Semestre;Mes;Base
lunch;Equipe Lunch;;2025-S1;jan;n/a";
        let err = BaselineCsvLoader::load_catalog_from_reader(csv_content.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::CatalogFormatError(_)));
        assert!(err.to_string().contains("Error parsing 'Base' at line 2"));
    }

    #[test]
    fn test_load_catalog_month_outside_semester() {
        let csv_content = "\
Equipe;Nome;Logo;Semestre;Mes;Base
lunch;Equipe Lunch;;2025-S1;jul;10";
        let err = BaselineCsvLoader::load_catalog_from_reader(csv_content.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("does not belong to semester 2025-S1"));
    }

    #[test]
    fn test_load_catalog_incomplete_semester() {
        let csv_content = "\
Equipe;Nome;Logo;Semestre;Mes;Base
lunch;Equipe Lunch;;2025-S1;jan;10
lunch;Equipe Lunch;;2025-S1;fev;10";
        let err = BaselineCsvLoader::load_catalog_from_reader(csv_content.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::CatalogFormatError(_)));
    }

    #[test]
    fn test_load_catalog_duplicate_month() {
        let csv_content = "\
Equipe;Nome;Logo;Semestre;Mes;Base
lunch;Equipe Lunch;;2025-S1;jan;10
lunch;Equipe Lunch;;2025-S1;jan;11";
        let err = BaselineCsvLoader::load_catalog_from_reader(csv_content.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Duplicate baseline"));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = BaselineCsvLoader::load_catalog_from_csv("/no/such/baselines.csv").unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
    }
}
