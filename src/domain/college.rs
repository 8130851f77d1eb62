use serde::{Deserialize, Serialize};

pub const DEFAULT_VIDEO_EMBED: &str = "https://www.youtube.com/embed/YmKzB9fmOXM";

/// Descriptive data about the institution.
///
/// Loaded once from configuration and shared behind an `Arc`; nothing in the
/// crate mutates it after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollegeProfile {
    pub name: String,
    pub address: String,
    pub pincode: String,
    pub naac_grade: String,
    pub phone: String,
    pub email: String,
    pub established: String,
    pub vision: String,
    pub affiliation: String,
    pub cet_code: String,
    pub accreditation: String,
}

impl Default for CollegeProfile {
    fn default() -> Self {
        Self {
            name: "Cauvery Institute of Technology, Mandya".to_string(),
            address: "Siddaiahnakoppalu Gate, Sundahalli, Mandya".to_string(),
            pincode: "571402".to_string(),
            naac_grade: "B++".to_string(),
            phone: "+91-9448589780".to_string(),
            email: "citmandya@gmail.com".to_string(),
            established: "2014".to_string(),
            vision: "To provide best technical education, training and research opportunities \
                     to inculcate good personality, discipline and ethical values to pursue \
                     Excellence, Empowering people and partnering in community development."
                .to_string(),
            affiliation: "Visvesvaraya Technological University (VTU), Belagavi".to_string(),
            cet_code: "E227".to_string(),
            accreditation: "AICTE Approved, NAAC Accredited, ISO 9001:2015".to_string(),
        }
    }
}

impl CollegeProfile {
    /// Label/value pairs in display order, skipping blank entries.
    pub fn facts(&self) -> Vec<(&'static str, &str)> {
        [
            ("Address", self.address.as_str()),
            ("Pincode", self.pincode.as_str()),
            ("NAAC grade", self.naac_grade.as_str()),
            ("Phone", self.phone.as_str()),
            ("Email", self.email.as_str()),
            ("Established", self.established.as_str()),
            ("Affiliation", self.affiliation.as_str()),
            ("CET code", self.cet_code.as_str()),
            ("Accreditation", self.accreditation.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facts_skip_blank_values() {
        let profile = CollegeProfile {
            cet_code: "  ".to_string(),
            ..CollegeProfile::default()
        };
        let labels: Vec<_> = profile.facts().into_iter().map(|(label, _)| label).collect();
        assert!(labels.contains(&"Pincode"));
        assert!(!labels.contains(&"CET code"));
    }
}
