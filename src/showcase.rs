//! Presentation rules the portfolio applies to the repository feed.

use chrono::{DateTime, Utc};
use colored::*;

use crate::models::ProjectSummary;

const PORTFOLIO_DESCRIPTION: &str =
    "My personal portfolio website showcasing my projects and skills.";

/// Shown for every failure to load the feed, whatever the cause.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load projects. Please try again.";
pub const EMPTY_HEADING: &str = "No Projects Found";
pub const EMPTY_MESSAGE: &str = "Projects will appear here once added to GitHub.";

/// Drop forks and order by most recent update.
pub fn select(projects: Vec<ProjectSummary>) -> Vec<ProjectSummary> {
    let mut selected: Vec<ProjectSummary> = projects.into_iter().filter(|p| !p.fork).collect();
    selected.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    selected
}

/// Homepage link, when it is an absolute http(s) URL.
pub fn deployment_url(project: &ProjectSummary) -> Option<&str> {
    project
        .homepage
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
}

pub fn display_name(name: &str) -> String {
    name.replace('-', " ")
}

/// Upstream description, or one synthesized from the name and language.
pub fn display_description(project: &ProjectSummary) -> String {
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        return description.to_string();
    }

    if project.name == "Portfolio" {
        return PORTFOLIO_DESCRIPTION.to_string();
    }

    let clean_name = project.name.replace(['-', '_'], " ");
    if deployment_url(project).is_some() {
        format!("{} - Live project available.", clean_name)
    } else {
        format!(
            "{} - Built with {}.",
            clean_name,
            project.language.as_deref().unwrap_or("code")
        )
    }
}

/// e.g. `Jan 5, 2024`
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

/// Multi-line terminal card for one project.
pub fn render_card(project: &ProjectSummary) -> String {
    let mut card = String::new();

    card.push_str(&format!("{}", display_name(&project.name).bold().green()));
    if let Some(language) = &project.language {
        card.push_str(&format!(" [{}]", language.cyan()));
    }
    card.push('\n');

    card.push_str(&format!("  {}\n", display_description(project)));
    card.push_str(&format!(
        "  ★ {}  ⑂ {}  {}\n",
        project.stargazers_count,
        project.forks_count,
        format_date(&project.updated_at).dimmed()
    ));
    card.push_str(&format!("  {}\n", project.html_url.blue().underline()));
    if let Some(url) = deployment_url(project) {
        card.push_str(&format!("  live: {}\n", url.blue().underline()));
    }

    card
}

pub fn render_load_failure() -> String {
    format!("{}", LOAD_FAILED_MESSAGE.red())
}

pub fn render_empty() -> String {
    format!("{}\n{}", EMPTY_HEADING.bold(), EMPTY_MESSAGE.yellow())
}
