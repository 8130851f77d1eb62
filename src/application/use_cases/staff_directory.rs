use crate::domain::department::DepartmentIndex;
use crate::domain::records::Staff;

/// Group staff by department, keeping first-appearance order.
pub fn group_by_department(staff: impl IntoIterator<Item = Staff>) -> DepartmentIndex {
    staff.into_iter().collect()
}

/// Staff whose department matches `department`, ignoring case.
/// File order is preserved.
pub fn filter_department(staff: impl IntoIterator<Item = Staff>, department: &str) -> Vec<Staff> {
    let wanted = department.to_lowercase();
    staff
        .into_iter()
        .filter(|member| member.department.to_lowercase() == wanted)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::{CsvField, CsvRow};
    use crate::domain::records::DEFAULT_DEPARTMENT;

    fn staff(index: usize, name: &str, department: Option<&str>) -> Staff {
        let mut fields = vec![CsvField::new("name", name)];
        if let Some(department) = department {
            fields.push(CsvField::new("department", department));
        }
        Staff::from(CsvRow::new(index, fields))
    }

    fn sample() -> Vec<Staff> {
        vec![
            staff(0, "A", Some("CSE")),
            staff(1, "B", Some(" cse ")),
            staff(2, "C", Some("")),
        ]
    }

    fn names(staff: &[Staff]) -> Vec<&str> {
        staff.iter().map(|s| s.name.as_str()).collect()
    }

    fn group_names(index: &DepartmentIndex) -> Vec<&str> {
        index.groups().iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_group_by_department_scenario() {
        let index = group_by_department(sample());

        assert_eq!(group_names(&index), vec!["CSE", "Others"]);
        assert_eq!(names(&index.groups()[0].staff), vec!["A", "B"]);
        assert_eq!(names(&index.groups()[1].staff), vec!["C"]);
        assert_eq!(index.staff_count(), 3);
    }

    #[test]
    fn test_missing_department_goes_to_others() {
        let index = group_by_department(vec![staff(0, "D", None)]);
        assert_eq!(group_names(&index), vec![DEFAULT_DEPARTMENT]);
    }

    #[test]
    fn test_department_order_follows_first_appearance() {
        let index = group_by_department(vec![
            staff(0, "A", Some("ECE")),
            staff(1, "B", Some("CSE")),
            staff(2, "C", Some("ece")),
            staff(3, "D", Some("Mech")),
        ]);

        assert_eq!(group_names(&index), vec!["ECE", "CSE", "Mech"]);
        assert_eq!(names(&index.groups()[0].staff), vec!["A", "C"]);
    }

    #[test]
    fn test_empty_staff_gives_empty_index() {
        let index = group_by_department(Vec::new());
        assert!(index.is_empty());
    }

    #[test]
    fn test_filter_department_any_case() {
        for query in ["CSE", "cse", "Cse", "cSe"] {
            let matched = filter_department(sample(), query);
            assert_eq!(names(&matched), vec!["A", "B"], "query {:?}", query);
        }
    }

    #[test]
    fn test_filter_department_no_match() {
        assert!(filter_department(sample(), "ECE").is_empty());
    }

    #[test]
    fn test_filter_department_query_is_not_trimmed() {
        assert!(filter_department(sample(), " cse ").is_empty());
        assert!(filter_department(sample(), "CSE ").is_empty());
    }

    #[test]
    fn test_filter_department_others_matches_blank_rows() {
        let matched = filter_department(sample(), "others");
        assert_eq!(names(&matched), vec!["C"]);
    }
}
