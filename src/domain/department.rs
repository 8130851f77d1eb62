use crate::domain::records::Staff;

/// Staff belonging to one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentGroup {
    /// Spelling of the first row seen for this department.
    pub name: String,
    pub staff: Vec<Staff>,
}

/// Departments in order of first appearance.
///
/// Names compare case-insensitively, so "CSE" and "cse" share a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentIndex {
    groups: Vec<DepartmentGroup>,
}

impl DepartmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `staff` to its department, creating the group on first sight.
    pub fn push(&mut self, staff: Staff) {
        let key = staff.department.to_lowercase();
        match self
            .groups
            .iter_mut()
            .find(|group| group.name.to_lowercase() == key)
        {
            Some(group) => group.staff.push(staff),
            None => self.groups.push(DepartmentGroup {
                name: staff.department.clone(),
                staff: vec![staff],
            }),
        }
    }

    pub fn groups(&self) -> &[DepartmentGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn staff_count(&self) -> usize {
        self.groups.iter().map(|group| group.staff.len()).sum()
    }
}

impl FromIterator<Staff> for DepartmentIndex {
    fn from_iter<I: IntoIterator<Item = Staff>>(iter: I) -> Self {
        let mut index = DepartmentIndex::new();
        for staff in iter {
            index.push(staff);
        }
        index
    }
}
