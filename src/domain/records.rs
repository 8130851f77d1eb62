use crate::domain::csv::CsvRow;

/// Department used for staff rows with a blank or missing `department` column.
pub const DEFAULT_DEPARTMENT: &str = "Others";

/// Trim a raw department cell, falling back to [`DEFAULT_DEPARTMENT`].
pub fn normalize_department(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_DEPARTMENT.to_string(),
    }
}

/// A staff member from `staff.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    pub name: String,
    pub designation: Option<String>,
    pub qualification: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    /// Trimmed, never blank.
    pub department: String,
    pub row: CsvRow,
}

impl From<CsvRow> for Staff {
    fn from(row: CsvRow) -> Self {
        Self {
            name: row.get_owned("name").unwrap_or_default(),
            designation: row.get_owned("designation"),
            qualification: row.get_owned("qualification"),
            email: row.get_owned("email"),
            phone: row.get_owned("phone"),
            photo: row.get_owned("photo"),
            department: normalize_department(row.get("department")),
            row,
        }
    }
}

/// A campus facility from `facilities.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub row: CsvRow,
}

impl From<CsvRow> for Facility {
    fn from(row: CsvRow) -> Self {
        Self {
            name: row.get_owned("name").unwrap_or_default(),
            description: row.get_owned("description"),
            image: row.get_owned("image"),
            row,
        }
    }
}

/// A workshop or industrial visit from `workshops.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workshop {
    pub title: String,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub row: CsvRow,
}

impl From<CsvRow> for Workshop {
    fn from(row: CsvRow) -> Self {
        Self {
            title: row
                .get_owned("title")
                .or_else(|| row.get_owned("name"))
                .unwrap_or_default(),
            date: row.get_owned("date"),
            venue: row.get_owned("venue"),
            description: row.get_owned("description"),
            image: row.get_owned("image"),
            row,
        }
    }
}

/// A tied-up company from `companies.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub row: CsvRow,
}

impl From<CsvRow> for Company {
    fn from(row: CsvRow) -> Self {
        Self {
            name: row.get_owned("name").unwrap_or_default(),
            logo: row.get_owned("logo"),
            website: row.get_owned("website"),
            description: row.get_owned("description"),
            row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::CsvField;

    fn row(fields: &[(&str, &str)]) -> CsvRow {
        CsvRow::new(
            0,
            fields
                .iter()
                .map(|(name, value)| CsvField::new(*name, *value))
                .collect(),
        )
    }

    #[test]
    fn test_staff_department_is_trimmed() {
        let staff = Staff::from(row(&[("name", "B"), ("department", " cse ")]));
        assert_eq!(staff.department, "cse");
    }

    #[test]
    fn test_staff_department_defaults_to_others() {
        let blank = Staff::from(row(&[("name", "C"), ("department", "")]));
        let missing = Staff::from(row(&[("name", "D")]));
        assert_eq!(blank.department, DEFAULT_DEPARTMENT);
        assert_eq!(missing.department, DEFAULT_DEPARTMENT);
    }

    #[test]
    fn test_blank_optional_columns_are_none() {
        let staff = Staff::from(row(&[("name", "A"), ("email", "  ")]));
        assert_eq!(staff.email, None);
        assert_eq!(staff.designation, None);
    }

    #[test]
    fn test_workshop_title_falls_back_to_name() {
        let workshop = Workshop::from(row(&[("name", "IoT Bootcamp"), ("date", "2024-03-01")]));
        assert_eq!(workshop.title, "IoT Bootcamp");
        assert_eq!(workshop.date.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_records_keep_source_row() {
        let company = Company::from(row(&[("name", "Infosys"), ("city", "Mysuru")]));
        assert_eq!(company.row.get("city"), Some("Mysuru"));
    }
}
