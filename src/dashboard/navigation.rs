/*!
 * Request-scoped navigation state.
 *
 * The page flag and the selected section travel in the query string of
 * every request; the server keeps no per-user state.
 */

use serde::Deserialize;
use url::form_urlencoded;

/// Top-level page: the welcome screen, then the dashboard
///
/// `Welcome -> Main` is one-way; no view links back to `Welcome`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Welcome,
    Main,
}

/// Sidebar menu entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Progress,
    Register,
    LogInternship,
    Opportunities,
    Feedback,
    Report,
}

impl Section {
    /// Menu order
    pub const ALL: [Section; 6] = [
        Section::Progress,
        Section::Register,
        Section::LogInternship,
        Section::Opportunities,
        Section::Feedback,
        Section::Report,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Progress => "progress",
            Section::Register => "register",
            Section::LogInternship => "log-internship",
            Section::Opportunities => "opportunities",
            Section::Feedback => "feedback",
            Section::Report => "report",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Progress => "Your Progress",
            Section::Register => "Register",
            Section::LogInternship => "Log Internship",
            Section::Opportunities => "Opportunities",
            Section::Feedback => "Feedback",
            Section::Report => "Generate Report",
        }
    }
}

/// Navigation context decoded from the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardContext {
    #[serde(default)]
    pub page: Page,
    #[serde(default)]
    pub section: Section,
    /// Email used to personalise the dashboard
    #[serde(default)]
    pub email: Option<String>,
}

impl DashboardContext {
    /// Context for the main page
    pub fn main(section: Section, email: Option<&str>) -> Self {
        Self {
            page: Page::Main,
            section,
            email: email.map(str::to_string),
        }
    }

    /// Personalising email, if a non-blank one was given
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Same context pointed at another section
    pub fn with_section(&self, section: Section) -> Self {
        Self {
            page: Page::Main,
            section,
            email: self.email.clone(),
        }
    }

    /// Link reproducing this context
    pub fn href(&self) -> String {
        if self.page == Page::Welcome {
            return "/".to_string();
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("page", "main")
            .append_pair("section", self.section.slug());
        if let Some(email) = self.email() {
            query.append_pair("email", email);
        }
        format!("/?{}", query.finish())
    }
}
