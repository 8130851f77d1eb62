use std::fmt::Write as _;

use super::{encode_path_segment, escape_html, PageRenderer};
use crate::domain::college::CollegeProfile;
use crate::domain::department::DepartmentIndex;
use crate::domain::error::{AppError, Result};
use crate::domain::page::Page;
use crate::domain::records::{Company, Facility, Staff, Workshop};

const NAV_LINKS: [(&str, &str); 7] = [
    ("/", "Home"),
    ("/college", "About"),
    ("/staff", "Staff"),
    ("/facilities", "Facilities"),
    ("/companies", "Companies"),
    ("/workshops", "Workshops"),
    ("/gallery", "Gallery"),
];

/// Built-in renderer producing complete HTML documents.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    /// Optional stylesheet under `/static`.
    stylesheet: Option<String>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stylesheet(mut self, path: impl Into<String>) -> Self {
        self.stylesheet = Some(path.into());
        self
    }

    fn layout(&self, page: &Page, body: &str) -> String {
        let stylesheet = self
            .stylesheet
            .as_deref()
            .map(|href| {
                format!(
                    r#"<link rel="stylesheet" href="/static/{}">"#,
                    escape_html(href)
                )
            })
            .unwrap_or_default();
        let nav = NAV_LINKS
            .iter()
            .map(|(href, label)| format!(r#"<a href="{}">{}</a>"#, href, label))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{stylesheet}
</head>
<body data-template="{template}">
<nav>{nav}</nav>
<main>
{body}
</main>
</body>
</html>
"#,
            title = escape_html(&page.title()),
            stylesheet = stylesheet,
            template = page.template_name(),
            nav = nav,
            body = body,
        )
    }
}

impl PageRenderer for HtmlRenderer {
    fn render(&self, page: &Page) -> Result<String> {
        let body = match page {
            Page::Home { college, qr_file } => home(college, qr_file),
            Page::CollegeInfo {
                college,
                staff_count,
                facilities,
                workshops,
                video_embed,
                tied_companies,
            } => college_info(
                college,
                *staff_count,
                facilities,
                workshops,
                video_embed,
                tied_companies,
            ),
            Page::StaffIndex { departments } => staff_index(departments),
            Page::StaffDepartment { department, staff } => staff_department(department, staff),
            Page::Facilities { facilities } => {
                facility_list(facilities).and_then(|list| section("Facilities", &list))
            }
            Page::Companies { companies } => {
                company_list(companies).and_then(|list| section("Tied-up Companies", &list))
            }
            Page::Workshops { workshops } => {
                workshop_list(workshops).and_then(|list| section("Workshops", &list))
            }
            Page::Gallery => gallery(),
        }
        .map_err(|e| {
            AppError::RenderError(format!("{}: {}", page.template_name(), e))
        })?;

        Ok(self.layout(page, &body))
    }
}

type Fragment = std::result::Result<String, std::fmt::Error>;

fn section(heading: &str, content: &str) -> Fragment {
    let mut out = String::new();
    writeln!(out, "<h1>{}</h1>", escape_html(heading))?;
    out.push_str(content);
    Ok(out)
}

fn home(college: &CollegeProfile, qr_file: &str) -> Fragment {
    let mut out = String::new();
    writeln!(out, "<h1>{}</h1>", escape_html(&college.name))?;
    writeln!(out, "<p class=\"address\">{}</p>", escape_html(&college.address))?;
    writeln!(
        out,
        r#"<figure class="qr"><img src="/static/{}" alt="QR code linking to the college page"><figcaption>Scan to open <a href="/college">the college page</a></figcaption></figure>"#,
        escape_html(qr_file)
    )?;
    out.push_str(&profile_facts(college)?);
    Ok(out)
}

fn profile_facts(college: &CollegeProfile) -> Fragment {
    let mut out = String::from("<dl class=\"facts\">\n");
    for (label, value) in college.facts() {
        writeln!(out, "<dt>{}</dt><dd>{}</dd>", label, escape_html(value))?;
    }
    out.push_str("</dl>\n");
    Ok(out)
}

fn college_info(
    college: &CollegeProfile,
    staff_count: usize,
    facilities: &[Facility],
    workshops: &[Workshop],
    video_embed: &str,
    tied_companies: &[Company],
) -> Fragment {
    let mut out = String::new();
    writeln!(out, "<h1>{}</h1>", escape_html(&college.name))?;
    writeln!(out, "<p class=\"vision\">{}</p>", escape_html(&college.vision))?;
    out.push_str(&profile_facts(college)?);
    writeln!(
        out,
        r#"<p class="staff-count">Teaching staff: <a href="/staff">{}</a></p>"#,
        staff_count
    )?;
    writeln!(
        out,
        r#"<div class="video"><iframe src="{}" title="College video" allowfullscreen></iframe></div>"#,
        escape_html(video_embed)
    )?;
    writeln!(out, "<h2>Facilities</h2>")?;
    out.push_str(&facility_list(facilities)?);
    writeln!(out, "<h2>Workshops</h2>")?;
    out.push_str(&workshop_list(workshops)?);
    writeln!(out, "<h2>Tied-up Companies</h2>")?;
    out.push_str(&company_list(tied_companies)?);
    Ok(out)
}

fn staff_index(departments: &DepartmentIndex) -> Fragment {
    let mut out = String::from("<h1>Staff Directory</h1>\n");
    if departments.is_empty() {
        out.push_str("<p class=\"empty\">No staff listed yet.</p>\n");
        return Ok(out);
    }
    for group in departments.groups() {
        writeln!(
            out,
            r#"<section class="department"><h2><a href="/staff/department/{}">{}</a> <small>({})</small></h2>"#,
            escape_html(&encode_path_segment(&group.name)),
            escape_html(&group.name),
            group.staff.len()
        )?;
        out.push_str(&staff_list(&group.staff)?);
        out.push_str("</section>\n");
    }
    Ok(out)
}

fn staff_department(department: &str, staff: &[Staff]) -> Fragment {
    let mut out = String::new();
    writeln!(out, "<h1>{} Department</h1>", escape_html(department))?;
    out.push_str(&staff_list(staff)?);
    out.push_str("<p><a href=\"/staff\">All departments</a></p>\n");
    Ok(out)
}

fn staff_list(staff: &[Staff]) -> Fragment {
    let mut out = String::from("<ul class=\"staff\">\n");
    for member in staff {
        out.push_str("<li>");
        if let Some(photo) = &member.photo {
            write!(
                out,
                r#"<img src="/static/{}" alt="{}"> "#,
                escape_html(photo),
                escape_html(&member.name)
            )?;
        }
        write!(out, "<strong>{}</strong>", escape_html(&member.name))?;
        for detail in [&member.designation, &member.qualification]
            .into_iter()
            .flatten()
        {
            write!(out, ", {}", escape_html(detail))?;
        }
        if let Some(email) = &member.email {
            write!(
                out,
                r#" <a href="mailto:{0}">{0}</a>"#,
                escape_html(email)
            )?;
        }
        if let Some(phone) = &member.phone {
            write!(out, " <span class=\"phone\">{}</span>", escape_html(phone))?;
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
    Ok(out)
}

fn facility_list(facilities: &[Facility]) -> Fragment {
    if facilities.is_empty() {
        return Ok("<p class=\"empty\">No facilities listed yet.</p>\n".to_string());
    }
    let mut out = String::from("<ul class=\"facilities\">\n");
    for facility in facilities {
        out.push_str("<li>");
        if let Some(image) = &facility.image {
            write!(
                out,
                r#"<img src="/static/{}" alt="{}"> "#,
                escape_html(image),
                escape_html(&facility.name)
            )?;
        }
        write!(out, "<strong>{}</strong>", escape_html(&facility.name))?;
        if let Some(description) = &facility.description {
            write!(out, " <p>{}</p>", escape_html(description))?;
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
    Ok(out)
}

fn workshop_list(workshops: &[Workshop]) -> Fragment {
    if workshops.is_empty() {
        return Ok("<p class=\"empty\">No workshops listed yet.</p>\n".to_string());
    }
    let mut out = String::from("<ul class=\"workshops\">\n");
    for workshop in workshops {
        write!(out, "<li><strong>{}</strong>", escape_html(&workshop.title))?;
        if let Some(date) = &workshop.date {
            write!(out, " <time>{}</time>", escape_html(date))?;
        }
        if let Some(venue) = &workshop.venue {
            write!(out, " at {}", escape_html(venue))?;
        }
        if let Some(description) = &workshop.description {
            write!(out, " <p>{}</p>", escape_html(description))?;
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
    Ok(out)
}

fn company_list(companies: &[Company]) -> Fragment {
    if companies.is_empty() {
        return Ok("<p class=\"empty\">No companies listed yet.</p>\n".to_string());
    }
    let mut out = String::from("<ul class=\"companies\">\n");
    for company in companies {
        out.push_str("<li>");
        if let Some(logo) = &company.logo {
            write!(
                out,
                r#"<img src="/static/{}" alt="{} logo"> "#,
                escape_html(logo),
                escape_html(&company.name)
            )?;
        }
        match &company.website {
            Some(website) => write!(
                out,
                r#"<a href="{}" rel="noopener">{}</a>"#,
                escape_html(website),
                escape_html(&company.name)
            )?,
            None => write!(out, "<strong>{}</strong>", escape_html(&company.name))?,
        }
        if let Some(description) = &company.description {
            write!(out, " <p>{}</p>", escape_html(description))?;
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
    Ok(out)
}

fn gallery() -> Fragment {
    Ok(String::from(
        "<h1>Gallery</h1>\n<p>Cultural activities and campus events.</p>\n\
         <div class=\"gallery\"></div>\n",
    ))
}
