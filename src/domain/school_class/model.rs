//! Class (turma) domain entity

use chrono::{DateTime, Utc};

/// Accepted values for `shift`.
pub const SHIFTS: [&str; 3] = ["Manhã", "Tarde", "Noite"];

/// Canonical spelling of a shift, matched case-insensitively.
pub fn canonical_shift(value: &str) -> Option<&'static str> {
    let wanted = value.trim().to_lowercase();
    SHIFTS.iter().copied().find(|s| s.to_lowercase() == wanted)
}

/// A class of students for one academic year.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolClass {
    pub id: i64,
    pub name: String,
    /// e.g. `2024/2025`
    pub academic_year: String,
    pub course_id: Option<i64>,
    pub shift: Option<String>,
    pub room: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub academic_year: String,
    pub course_id: Option<i64>,
    pub shift: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassChanges {
    pub name: Option<String>,
    pub academic_year: Option<String>,
    pub course_id: Option<i64>,
    pub shift: Option<String>,
    pub room: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassFilter {
    pub search: Option<String>,
    pub academic_year: Option<String>,
    pub course_id: Option<i64>,
    pub shift: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_match_ignoring_case() {
        assert_eq!(canonical_shift("manhã"), Some("Manhã"));
        assert_eq!(canonical_shift(" NOITE "), Some("Noite"));
        assert_eq!(canonical_shift("Madrugada"), None);
    }
}
