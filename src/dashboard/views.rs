/*!
 * HTML rendering for the dashboard.
 *
 * Plain string templates; every user-supplied value passes through
 * `escape_html` before it is written into markup.
 */

use std::fmt::Write as _;

use super::navigation::{DashboardContext, Section};
use crate::chart::ChartImage;
use crate::database::{Metrics, StudentProgress, StudentRecord};
use crate::progress::ProgressSummary;

pub const APP_TITLE: &str = "Ky'ra: Your Internship Journey Mentor";

/// Message shown above the section body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    fn class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "success",
            Notice::Info(_) => "info",
            Notice::Warning(_) => "warning",
            Notice::Error(_) => "error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Info(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

/// Shared chrome of every main page
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub ctx: &'a DashboardContext,
    pub metrics: Metrics,
    /// Name of the personalised student, if the email resolved
    pub greeting: Option<&'a str>,
    pub notices: &'a [Notice],
}

/// Escape text for HTML element and attribute content
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; }
nav { width: 240px; padding: 1rem; background: #f0f2f6; min-height: 100vh; }
main { flex: 1; padding: 1rem 2rem; }
.metrics { display: flex; gap: 2rem; }
.metric strong { display: block; font-size: 1.8rem; }
.notice { padding: .6rem 1rem; border-radius: 4px; margin: .5rem 0; }
.success { background: #d4edda; } .info { background: #d1ecf1; }
.warning { background: #fff3cd; } .error { background: #f8d7da; }
button, input, textarea, select { width: 100%; box-sizing: border-box; margin: .25rem 0; }
progress { width: 100%; }
@media (max-width: 600px) { body { flex-direction: column; } nav { width: auto; min-height: 0; } .metric strong { font-size: 14px; } }
"#;

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>Ky'ra Internship Dashboard</title><style>{}</style></head>\
         <body>{}</body></html>",
        STYLE, body
    )
}

/// Landing page with the single way forward
pub fn welcome_page() -> String {
    let start = DashboardContext::main(Section::Progress, None).href();
    document(&format!(
        r#"<main>
<h1>{title}</h1>
<h2>Welcome to Ky'ra!</h2>
<p>Ky'ra is your personal mentor to guide you through your internship journey. Here's how to get started:</p>
<ul>
<li><strong>Register</strong>: Create your profile to track your progress.</li>
<li><strong>Log Internships</strong>: Add details about your internships and impact.</li>
<li><strong>View Progress</strong>: See your journey with charts, badges, and metrics.</li>
<li><strong>Give Feedback</strong>: Share your experience to help us improve.</li>
</ul>
<a href="{start}"><button type="button">Get Started</button></a>
</main>"#,
        title = escape_html(APP_TITLE),
        start = escape_html(&start),
    ))
}

/// Main dashboard: sidebar, metrics panel, notices and the section body
pub fn main_page(frame: &Frame<'_>, body: &str) -> String {
    let ctx = frame.ctx;
    let mut html = String::new();

    html.push_str("<nav><h3>Navigate</h3><ul>");
    for section in Section::ALL {
        let marker = if section == ctx.section { " aria-current=\"page\"" } else { "" };
        let _ = write!(
            html,
            "<li><a href=\"{}\"{}>{}</a></li>",
            escape_html(&ctx.with_section(section).href()),
            marker,
            section.label()
        );
    }
    html.push_str("</ul>");

    let _ = write!(
        html,
        r#"<form method="get" action="/"><input type="hidden" name="page" value="main"><input type="hidden" name="section" value="{}"><label>Enter your email to personalize<input type="email" name="email" value="{}"></label><button type="submit">Personalize</button></form>"#,
        ctx.section.slug(),
        escape_html(ctx.email().unwrap_or_default()),
    );
    if let Some(name) = frame.greeting {
        let _ = write!(
            html,
            "<div class=\"notice success\">Hi {}! Welcome back! Here's how you're progressing today.</div>",
            escape_html(name)
        );
    }
    html.push_str("</nav><main>");

    let _ = write!(html, "<h1>{}</h1>", escape_html(APP_TITLE));
    let _ = write!(
        html,
        "<section class=\"metrics\">\
         <div class=\"metric\">Internships Completed<strong>{}</strong></div>\
         <div class=\"metric\">MSMEs Supported<strong>{}</strong></div>\
         <div class=\"metric\">Certifications Issued<strong>{}</strong></div></section>",
        frame.metrics.total_internships,
        frame.metrics.total_msmes,
        frame.metrics.students_with_internships
    );

    for notice in frame.notices {
        let _ = write!(
            html,
            "<div class=\"notice {}\">{}</div>",
            notice.class(),
            escape_html(notice.message())
        );
    }

    html.push_str(body);
    html.push_str("</main>");
    document(&html)
}

/// Hidden field carrying the personalising email through form posts
fn viewer_field(ctx: &DashboardContext) -> String {
    format!(
        "<input type=\"hidden\" name=\"viewer\" value=\"{}\">",
        escape_html(ctx.email().unwrap_or_default())
    )
}

pub fn progress_section(
    student: Option<&StudentProgress>,
    summary: Option<&ProgressSummary>,
    chart: Option<&ChartImage>,
) -> String {
    let mut html = String::from("<h2>Your Progress</h2>");

    let (Some(_), Some(summary)) = (student, summary) else {
        html.push_str("<div class=\"notice info\">No internships logged yet. Log your first internship to see your progress!</div>");
        return html;
    };
    if summary.internship_count == 0 {
        html.push_str("<div class=\"notice info\">No internships logged yet. Log your first internship to see your progress!</div>");
        return html;
    }

    let _ = write!(
        html,
        "<progress value=\"{}\" max=\"100\"></progress><p>Internship Completion: {}%</p>",
        summary.percent, summary.percent
    );
    for badge in &summary.badges {
        let _ = write!(html, "<div class=\"notice success\">{}</div>", escape_html(&badge.to_string()));
    }

    if let Some(chart) = chart {
        let _ = write!(
            html,
            "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption><ul class=\"legend\">",
            chart.to_data_uri(),
            escape_html(&chart.title),
            escape_html(&chart.title)
        );
        for entry in &chart.legend {
            let _ = write!(
                html,
                "<li><span style=\"color:{}\">&#9632;</span> {}</li>",
                entry.hex(),
                escape_html(&entry.company)
            );
        }
        html.push_str("</ul></figure>");
    }

    html.push_str("<p>Keep going! You're one step closer to completing your internship journey.</p>");
    html
}

pub fn register_section(ctx: &DashboardContext) -> String {
    format!(
        r#"<h2>Register</h2>
<form method="post" action="/register">{viewer}
<label>Full Name<input type="text" name="name"></label>
<label>Email<input type="email" name="email"></label>
<button type="submit">Register</button>
</form>"#,
        viewer = viewer_field(ctx)
    )
}

pub fn log_internship_section(ctx: &DashboardContext) -> String {
    format!(
        r#"<h2>Log Internship</h2>
<form method="post" action="/internships">{viewer}
<label>Student Email<input type="email" name="email" value="{email}"></label>
<label>Company Name<input type="text" name="company"></label>
<label>Duration (e.g., 3 months)<input type="text" name="duration"></label>
<label>Feedback<textarea name="feedback"></textarea></label>
<label>MSMEs Digitalized<input type="number" name="msme_digitalized" min="0" value="0"></label>
<button type="submit">Submit Internship</button>
</form>"#,
        viewer = viewer_field(ctx),
        email = escape_html(ctx.email().unwrap_or_default()),
    )
}

pub fn opportunities_section() -> String {
    r#"<h2>Opportunities</h2>
<p>Explore new internship opportunities and grow your skills!</p>
<div class="notice info">Coming soon: Personalized internship recommendations based on your progress.</div>
<p>You're doing amazing! Keep exploring new possibilities.</p>"#
        .to_string()
}

pub fn feedback_section(ctx: &DashboardContext, student: Option<&StudentRecord>) -> String {
    let mut html = String::from("<h2>Share Your Feedback</h2>");

    if student.is_some() {
        let _ = write!(
            html,
            r#"<form method="post" action="/feedback">{viewer}
<label>How was your experience today?<input type="range" name="rating" min="1" max="5" value="3"></label>
<label>Comments<textarea name="comments"></textarea></label>
<button type="submit">Submit Feedback</button>
</form>"#,
            viewer = viewer_field(ctx)
        );
    } else {
        html.push_str("<div class=\"notice warning\">Please enter your email in the sidebar to provide feedback.</div>");
    }

    html.push_str(
        "<h3>What Others Say</h3>\
         <blockquote>Ky'ra made tracking my internships so easy and motivating! - Sarah K.</blockquote>\
         <p>Keep shining! Your feedback helps us grow.</p>",
    );
    html
}

/// Report section; the download link only appears when there is data
pub fn report_section(row_count: usize) -> String {
    let mut html = String::from("<h2>Generate Internship Report</h2>");
    if row_count == 0 {
        html.push_str("<div class=\"notice info\">No internship data available to generate a report.</div>");
        return html;
    }

    let _ = write!(
        html,
        "<p>{} internship record(s) ready.</p>\
         <a href=\"/report.pdf\" download=\"{}\"><button type=\"button\">Download Report</button></a>\
         <p>Great work! Download your report to share your achievements.</p>",
        row_count,
        crate::report::REPORT_FILENAME
    );
    html
}
