//! Static page content.
//!
//! Everything the page displays is read-only data deserialised from
//! `content/portfolio.json`, embedded at compile time. Loading also checks the
//! anchor contract: every section id exists exactly once and every menu item
//! points at one of them.

use std::fmt;

use serde::Deserialize;

use super::filter::FilterLabel;

const PORTFOLIO_JSON: &str = include_str!("../../content/portfolio.json");

/// Page sections, in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    About,
    Experience,
    Projects,
    Contact,
}

impl SectionId {
    pub fn all() -> &'static [SectionId] {
        &[
            SectionId::Home,
            SectionId::About,
            SectionId::Experience,
            SectionId::Projects,
            SectionId::Contact,
        ]
    }

    /// The element id navigation links target (without `#`).
    pub fn anchor(&self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Experience => "experience",
            SectionId::Projects => "projects",
            SectionId::Contact => "contact",
        }
    }

    /// Resolve an anchor id or `#`-prefixed href.
    pub fn from_anchor(anchor: &str) -> Option<SectionId> {
        let id = anchor.strip_prefix('#').unwrap_or(anchor);
        SectionId::all().iter().copied().find(|s| s.anchor() == id)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub href: String,
}

impl MenuItem {
    pub fn target(&self) -> Option<SectionId> {
        SectionId::from_anchor(&self.href)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Owner {
    pub name: String,
    pub greeting: String,
    pub role: String,
    pub tagline: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct About {
    pub intro: String,
    pub paragraphs: Vec<String>,
    pub highlights: Vec<Highlight>,
}

/// One timeline entry. Authored newest first.
#[derive(Clone, Debug, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub category: String,
    pub demo_link: String,
    pub github_link: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub title: String,
    pub brand: String,
    pub owner: Owner,
    pub sections: Vec<String>,
    pub menu: Vec<MenuItem>,
    pub about: About,
    pub skills: Vec<String>,
    pub experiences: Vec<Experience>,
    pub filters: Vec<FilterLabel>,
    pub projects: Vec<Project>,
    pub contact: ContactDetails,
    pub socials: Vec<SocialLink>,
    #[serde(default)]
    pub footer_links: Vec<String>,
}

#[derive(Debug)]
pub enum ContentError {
    Parse(serde_json::Error),
    UnknownAnchor(String),
    DuplicateSection(String),
    MissingSection(&'static str),
    UnknownCategory { project: String, category: String },
    MissingAllFilter,
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Parse(e) => write!(f, "content is not valid JSON: {e}"),
            ContentError::UnknownAnchor(a) => write!(f, "no section with anchor {a:?}"),
            ContentError::DuplicateSection(a) => write!(f, "section {a:?} appears more than once"),
            ContentError::MissingSection(a) => write!(f, "section {a:?} is missing"),
            ContentError::UnknownCategory { project, category } => write!(
                f,
                "project {project:?} has category {category:?} which has no filter"
            ),
            ContentError::MissingAllFilter => write!(f, "filters must include \"All\""),
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        ContentError::Parse(e)
    }
}

impl Portfolio {
    /// Load the embedded content.
    pub fn load() -> Result<Portfolio, ContentError> {
        Portfolio::from_json(PORTFOLIO_JSON)
    }

    pub fn from_json(json: &str) -> Result<Portfolio, ContentError> {
        let portfolio: Portfolio = serde_json::from_str(json)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    fn validate(&self) -> Result<(), ContentError> {
        let mut seen: Vec<SectionId> = Vec::new();
        for anchor in &self.sections {
            let id = SectionId::from_anchor(anchor)
                .ok_or_else(|| ContentError::UnknownAnchor(anchor.clone()))?;
            if seen.contains(&id) {
                return Err(ContentError::DuplicateSection(anchor.clone()));
            }
            seen.push(id);
        }
        if let Some(missing) = SectionId::all().iter().find(|s| !seen.contains(s)) {
            return Err(ContentError::MissingSection(missing.anchor()));
        }

        if let Some(item) = self.menu.iter().find(|m| m.target().is_none()) {
            return Err(ContentError::UnknownAnchor(item.href.clone()));
        }

        if !self.filters.contains(&FilterLabel::All) {
            return Err(ContentError::MissingAllFilter);
        }
        for project in &self.projects {
            let label = FilterLabel::Category(project.category.clone());
            if !self.filters.contains(&label) {
                return Err(ContentError::UnknownCategory {
                    project: project.title.clone(),
                    category: project.category.clone(),
                });
            }
        }
        Ok(())
    }
}
