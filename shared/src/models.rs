use anyhow::{anyhow, Error};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Calendar month, keyed by its Portuguese three-letter code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    Jan,
    Fev,
    Mar,
    Abr,
    Mai,
    Jun,
    Jul,
    Ago,
    Set,
    Out,
    Nov,
    Dez,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan, Month::Fev, Month::Mar, Month::Abr, Month::Mai, Month::Jun,
        Month::Jul, Month::Ago, Month::Set, Month::Out, Month::Nov, Month::Dez,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Month::Jan => "jan",
            Month::Fev => "fev",
            Month::Mar => "mar",
            Month::Abr => "abr",
            Month::Mai => "mai",
            Month::Jun => "jun",
            Month::Jul => "jul",
            Month::Ago => "ago",
            Month::Set => "set",
            Month::Out => "out",
            Month::Nov => "nov",
            Month::Dez => "dez",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Fev => "Fev",
            Month::Mar => "Mar",
            Month::Abr => "Abr",
            Month::Mai => "Mai",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Ago => "Ago",
            Month::Set => "Set",
            Month::Out => "Out",
            Month::Nov => "Nov",
            Month::Dez => "Dez",
        }
    }

    /// 1-based calendar number.
    pub fn number(&self) -> u32 {
        Self::ALL.iter().position(|m| m == self).map_or(1, |idx| idx as u32 + 1)
    }

    pub fn from_number(number: u32) -> Option<Month> {
        number.checked_sub(1).and_then(|idx| Self::ALL.get(idx as usize).copied())
    }

    pub fn half(&self) -> HalfYear {
        if self.number() <= 6 {
            HalfYear::S1
        } else {
            HalfYear::S2
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|m| m.code() == code)
            .copied()
            .ok_or_else(|| anyhow!("Unknown month code '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HalfYear {
    S1,
    S2,
}

impl HalfYear {
    pub fn months(&self) -> [Month; 6] {
        match self {
            HalfYear::S1 => [Month::Jan, Month::Fev, Month::Mar, Month::Abr, Month::Mai, Month::Jun],
            HalfYear::S2 => [Month::Jul, Month::Ago, Month::Set, Month::Out, Month::Nov, Month::Dez],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HalfYear::S1 => "Jan-Jun",
            HalfYear::S2 => "Jul-Dez",
        }
    }
}

impl fmt::Display for HalfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalfYear::S1 => f.write_str("S1"),
            HalfYear::S2 => f.write_str("S2"),
        }
    }
}

/// Year plus half-year. Orders by year, then half.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SemesterId {
    pub year: i32,
    pub half: HalfYear,
}

impl SemesterId {
    pub fn new(year: i32, half: HalfYear) -> Self {
        Self { year, half }
    }

    pub fn containing(date: NaiveDate) -> Self {
        let half = Month::from_number(date.month()).map_or(HalfYear::S1, |m| m.half());
        Self::new(date.year(), half)
    }

    pub fn months(&self) -> [Month; 6] {
        self.half.months()
    }

    /// e.g. "2025 Jan-Jun"
    pub fn label(&self) -> String {
        format!("{} {}", self.year, self.half.label())
    }
}

impl fmt::Display for SemesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.half)
    }
}

// Accepts "2025", "2025S2", "2025-S2" and the legacy "base2025S2" key spelling.
// A missing half-year means S1.
impl FromStr for SemesterId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let rest = trimmed.strip_prefix("base").unwrap_or(trimmed);
        let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits_end != 4 {
            return Err(anyhow!("Invalid semester id '{}': expected a 4-digit year", s));
        }
        let year: i32 = rest[..digits_end]
            .parse()
            .map_err(|e| anyhow!("Invalid year in semester id '{}': {}", s, e))?;

        let suffix = rest[digits_end..].trim_start_matches(['-', ' ']);
        let half = match suffix.to_uppercase().as_str() {
            "" | "S1" => HalfYear::S1,
            "S2" => HalfYear::S2,
            _ => return Err(anyhow!("Invalid half-year in semester id '{}'", s)),
        };
        Ok(Self::new(year, half))
    }
}

impl TryFrom<String> for SemesterId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SemesterId> for String {
    fn from(id: SemesterId) -> Self {
        id.to_string()
    }
}

/// Historical baseline for one semester, in the catalog's stored unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineSemester {
    pub id: SemesterId,
    pub base: BTreeMap<Month, f64>,
}

impl BaselineSemester {
    pub fn new(id: SemesterId, base: BTreeMap<Month, f64>) -> Self {
        Self { id, base }
    }

    pub fn months(&self) -> [Month; 6] {
        self.id.months()
    }

    pub fn label(&self) -> String {
        self.id.label()
    }

    /// Stored baseline for `month`; 0 when the month is absent.
    pub fn stored(&self, month: Month) -> f64 {
        self.base.get(&month).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub semesters: Vec<BaselineSemester>,
}

impl Team {
    pub fn new(slug: &str, name: &str, logo: Option<String>, semesters: Vec<BaselineSemester>) -> Self {
        Self {
            slug: slug.to_lowercase(),
            name: name.to_string(),
            logo,
            semesters: order_semesters(semesters),
        }
    }

    pub fn semester(&self, id: SemesterId) -> Option<&BaselineSemester> {
        self.semesters.iter().find(|s| s.id == id)
    }

    pub fn first_semester(&self) -> Option<&BaselineSemester> {
        self.semesters.first()
    }
}

/// Sorts ascending by year then half-year. A repeated id keeps the last entry given.
pub fn order_semesters(semesters: Vec<BaselineSemester>) -> Vec<BaselineSemester> {
    let mut by_id = BTreeMap::new();
    for semester in semesters {
        by_id.insert(semester.id, semester);
    }
    by_id.into_values().collect()
}

/// Unit the user enters quantities in. Internal values are always kilograms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    #[default]
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "t")]
    Tonne,
}

impl Unit {
    pub fn kg_per_unit(&self) -> f64 {
        match self {
            Unit::Kg => 1.0,
            Unit::Tonne => 1000.0,
        }
    }

    /// Fraction digits used when presenting a value in this unit.
    pub fn decimals(&self) -> usize {
        match self {
            Unit::Kg => 2,
            Unit::Tonne => 3,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Tonne => "t",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(Unit::Kg),
            "t" | "ton" => Ok(Unit::Tonne),
            _ => Err(anyhow!("Unknown unit '{}'", s)),
        }
    }
}

/// Whole semester or a single month within it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Total,
    Month(Month),
}

impl Period {
    pub fn month(&self) -> Option<Month> {
        match self {
            Period::Total => None,
            Period::Month(m) => Some(*m),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Total => f.write_str("total"),
            Period::Month(m) => write!(f, "{}", m),
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("total") {
            Ok(Period::Total)
        } else {
            s.parse::<Month>().map(Period::Month)
        }
    }
}

/// Outcome of comparing an actual quantity with its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrizeProgress {
    /// Extra quantity needed over the baseline to earn the whole pool.
    pub growth_target: f64,
    /// actual - baseline; negative when sales dropped.
    pub achieved_delta: f64,
    /// 0..=100
    pub progress_percent: f64,
    pub dynamic_prize: f64,
    /// Alias of `dynamic_prize`, kept for consumers that still read it.
    pub final_prize: f64,
}

impl PrizeProgress {
    pub fn reached_max(&self) -> bool {
        self.progress_percent >= 100.0
    }
}
