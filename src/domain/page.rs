use std::sync::Arc;

use crate::domain::college::CollegeProfile;
use crate::domain::department::DepartmentIndex;
use crate::domain::records::{Company, Facility, Staff, Workshop};

/// Payload handed to the renderer, one variant per template.
#[derive(Debug, Clone)]
pub enum Page {
    Home {
        college: Arc<CollegeProfile>,
        /// Path of the QR image relative to `/static`.
        qr_file: String,
    },
    CollegeInfo {
        college: Arc<CollegeProfile>,
        staff_count: usize,
        facilities: Vec<Facility>,
        workshops: Vec<Workshop>,
        video_embed: String,
        tied_companies: Vec<Company>,
    },
    StaffIndex {
        departments: DepartmentIndex,
    },
    StaffDepartment {
        department: String,
        staff: Vec<Staff>,
    },
    Facilities {
        facilities: Vec<Facility>,
    },
    Companies {
        companies: Vec<Company>,
    },
    Workshops {
        workshops: Vec<Workshop>,
    },
    Gallery,
}

impl Page {
    pub fn template_name(&self) -> &'static str {
        match self {
            Page::Home { .. } => "index.html",
            Page::CollegeInfo { .. } => "college_info.html",
            Page::StaffIndex { .. } => "staff.html",
            Page::StaffDepartment { .. } => "staff_department.html",
            Page::Facilities { .. } => "facilities.html",
            Page::Companies { .. } => "companies.html",
            Page::Workshops { .. } => "workshops.html",
            Page::Gallery => "gallery.html",
        }
    }

    pub fn title(&self) -> String {
        match self {
            Page::Home { college, .. } => college.name.clone(),
            Page::CollegeInfo { college, .. } => format!("About {}", college.name),
            Page::StaffIndex { .. } => "Staff Directory".to_string(),
            Page::StaffDepartment { department, .. } => format!("{} Staff", department),
            Page::Facilities { .. } => "Facilities".to_string(),
            Page::Companies { .. } => "Tied-up Companies".to_string(),
            Page::Workshops { .. } => "Workshops".to_string(),
            Page::Gallery => "Gallery".to_string(),
        }
    }
}
