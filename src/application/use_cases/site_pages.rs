use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use super::staff_directory::{filter_department, group_by_department};
use crate::domain::college::CollegeProfile;
use crate::domain::csv::CsvRow;
use crate::domain::error::{AppError, Result};
use crate::domain::page::Page;
use crate::domain::records::{Company, Facility, Staff, Workshop};
use crate::infrastructure::config::SiteConfig;
use crate::infrastructure::csv::CsvLoader;
use crate::infrastructure::qr::QrGenerator;

pub const STAFF_FILE: &str = "staff.csv";
pub const FACILITIES_FILE: &str = "facilities.csv";
pub const WORKSHOPS_FILE: &str = "workshops.csv";
pub const COMPANIES_FILE: &str = "companies.csv";

/// Gathers the data behind each page of the site.
///
/// Every call reads the CSV files afresh; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct SitePagesUseCase {
    college: Arc<CollegeProfile>,
    loader: CsvLoader,
    qr: QrGenerator,
    data_dir: PathBuf,
    qr_static_path: String,
    video_embed: String,
}

impl SitePagesUseCase {
    pub fn new(
        college: Arc<CollegeProfile>,
        data_dir: PathBuf,
        qr: QrGenerator,
        qr_static_path: String,
        video_embed: String,
    ) -> Self {
        Self {
            college,
            loader: CsvLoader::new(),
            qr,
            data_dir,
            qr_static_path,
            video_embed,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            Arc::new(config.college.clone()),
            config.paths.data_dir.clone(),
            QrGenerator::new(config.qr_path()).with_module_size(config.qr.module_size),
            config.qr_static_path(),
            config.media.video_embed.clone(),
        )
    }

    pub fn home(&self, info_url: &str) -> Page {
        self.qr.ensure(info_url).warn_on_failure();
        info!(page = "home", info_url, "rendering page");
        Page::Home {
            college: Arc::clone(&self.college),
            qr_file: self.qr_static_path.clone(),
        }
    }

    pub fn college_info(&self, info_url: &str) -> Result<Page> {
        self.qr.ensure(info_url).warn_on_failure();
        let staff: Vec<Staff> = self.load(STAFF_FILE)?;
        let facilities: Vec<Facility> = self.load(FACILITIES_FILE)?;
        let workshops: Vec<Workshop> = self.load(WORKSHOPS_FILE)?;
        let tied_companies: Vec<Company> = self.load(COMPANIES_FILE)?;

        info!(
            page = "college_info",
            staff = staff.len(),
            facilities = facilities.len(),
            workshops = workshops.len(),
            companies = tied_companies.len(),
            "rendering page"
        );
        Ok(Page::CollegeInfo {
            college: Arc::clone(&self.college),
            staff_count: staff.len(),
            facilities,
            workshops,
            video_embed: self.video_embed.clone(),
            tied_companies,
        })
    }

    pub fn staff_index(&self) -> Result<Page> {
        let departments = group_by_department(self.load::<Staff>(STAFF_FILE)?);
        info!(
            page = "staff",
            departments = departments.len(),
            staff = departments.staff_count(),
            "rendering page"
        );
        Ok(Page::StaffIndex { departments })
    }

    /// Staff of one department; an unknown department is `NotFound`.
    pub fn staff_department(&self, department: &str) -> Result<Page> {
        let staff = filter_department(self.load::<Staff>(STAFF_FILE)?, department);
        let Some(first) = staff.first() else {
            info!(page = "staff_department", department, "department not found");
            return Err(AppError::NotFound(format!("department {}", department)));
        };

        info!(page = "staff_department", department, staff = staff.len(), "rendering page");
        Ok(Page::StaffDepartment {
            department: first.department.clone(),
            staff,
        })
    }

    pub fn facilities(&self) -> Result<Page> {
        let facilities: Vec<Facility> = self.load(FACILITIES_FILE)?;
        info!(page = "facilities", facilities = facilities.len(), "rendering page");
        Ok(Page::Facilities { facilities })
    }

    pub fn companies(&self) -> Result<Page> {
        let companies: Vec<Company> = self.load(COMPANIES_FILE)?;
        info!(page = "companies", companies = companies.len(), "rendering page");
        Ok(Page::Companies { companies })
    }

    pub fn workshops(&self) -> Result<Page> {
        let workshops: Vec<Workshop> = self.load(WORKSHOPS_FILE)?;
        info!(page = "workshops", workshops = workshops.len(), "rendering page");
        Ok(Page::Workshops { workshops })
    }

    pub fn gallery(&self) -> Page {
        Page::Gallery
    }

    fn load<T: From<CsvRow>>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(file);
        self.loader.load_as(&path).map_err(|err| {
            error!(path = %path.display(), error = %err, "Failed to load data file");
            err
        })
    }
}
