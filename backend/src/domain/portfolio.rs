//! Portfolio read model shown on the dashboard and on public profiles.
//!
//! Records come from the profile store as-is; this module only shapes them:
//! ordering, featured-project selection and frequency counts.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Featured projects shown in the portfolio header.
pub const FEATURED_PROJECT_LIMIT: usize = 3;
/// Skills shown in the skills cloud.
pub const TOP_SKILL_LIMIT: usize = 8;
/// Bucket for achievements without a category.
pub const UNCATEGORISED: &str = "other";

/// Public part of a student profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    #[schema(example = "ana.lopez")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// University name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    /// Career name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career: Option<String>,
}

/// Project listed on a portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Award, certificate or other milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_on: Option<NaiveDate>,
}

/// A label and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyCount {
    #[schema(example = "Rust")]
    pub name: String,
    #[schema(example = 3)]
    pub count: usize,
}

/// Everything a portfolio page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub profile: PublicProfile,
    pub featured_projects: Vec<Project>,
    pub projects: Vec<Project>,
    pub top_skills: Vec<FrequencyCount>,
    pub achievements: Vec<Achievement>,
    pub achievement_categories: Vec<FrequencyCount>,
}

impl Portfolio {
    /// Shape raw records into the read model.
    pub fn assemble(
        profile: PublicProfile,
        mut projects: Vec<Project>,
        mut achievements: Vec<Achievement>,
    ) -> Self {
        projects.sort_by(newest_project_first);
        achievements.sort_by(newest_achievement_first);
        Self {
            featured_projects: featured_projects(&projects, FEATURED_PROJECT_LIMIT),
            top_skills: top_skills(&projects, TOP_SKILL_LIMIT),
            achievement_categories: achievement_categories(&achievements),
            profile,
            projects,
            achievements,
        }
    }
}

fn newest_project_first(left: &Project, right: &Project) -> Ordering {
    right
        .created_at
        .cmp(&left.created_at)
        .then_with(|| compare_case_insensitive(&left.title, &right.title))
        .then_with(|| left.id.cmp(&right.id))
}

fn newest_achievement_first(left: &Achievement, right: &Achievement) -> Ordering {
    // `None` sorts before `Some`, so reversing puts undated entries last.
    right
        .achieved_on
        .cmp(&left.achieved_on)
        .then_with(|| compare_case_insensitive(&left.title, &right.title))
        .then_with(|| left.id.cmp(&right.id))
}

fn compare_case_insensitive(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Pick up to `limit` projects to highlight.
///
/// Flagged projects come first, then the rest; newest first within each
/// group, ties broken by title (case-insensitive) then id.
pub fn featured_projects(projects: &[Project], limit: usize) -> Vec<Project> {
    let mut ranked: Vec<&Project> = projects.iter().collect();
    ranked.sort_by(|left, right| {
        right
            .featured
            .cmp(&left.featured)
            .then_with(|| newest_project_first(left, right))
    });
    ranked.into_iter().take(limit).cloned().collect()
}

/// Count technologies across projects.
///
/// Names are trimmed and compared case-insensitively, blank entries are
/// skipped and each project contributes at most once per technology. The
/// first spelling seen is the one displayed.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use prisma_backend::domain::{top_skills, Project};
///
/// let project = |id: &str, tech: &[&str]| Project {
///     id: id.to_owned(),
///     title: id.to_owned(),
///     description: None,
///     technologies: tech.iter().map(|t| (*t).to_owned()).collect(),
///     featured: false,
///     repository_url: None,
///     demo_url: None,
///     created_at: Utc::now(),
/// };
/// let skills = top_skills(&[project("a", &["Rust", "SQL"]), project("b", &["rust"])], 8);
/// assert_eq!(skills[0].name, "Rust");
/// assert_eq!(skills[0].count, 2);
/// ```
pub fn top_skills(projects: &[Project], limit: usize) -> Vec<FrequencyCount> {
    let mut counter = FrequencyCounter::default();
    for project in projects {
        let mut seen = Vec::new();
        for technology in &project.technologies {
            let name = technology.trim();
            if name.is_empty() {
                continue;
            }
            let key = name.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            counter.add(name, key.clone());
            seen.push(key);
        }
    }
    let mut counts = counter.into_ranked();
    counts.truncate(limit);
    counts
}

/// Count achievements per category, uncategorised ones under `"other"`.
pub fn achievement_categories(achievements: &[Achievement]) -> Vec<FrequencyCount> {
    let mut counter = FrequencyCounter::default();
    for achievement in achievements {
        let name = achievement
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(UNCATEGORISED);
        counter.add(name, name.to_lowercase());
    }
    counter.into_ranked()
}

#[derive(Default)]
struct FrequencyCounter {
    entries: Vec<FrequencyCount>,
    index: HashMap<String, usize>,
}

impl FrequencyCounter {
    fn add(&mut self, display: &str, key: String) {
        if let Some(entry) = self
            .index
            .get(&key)
            .and_then(|position| self.entries.get_mut(*position))
        {
            entry.count += 1;
            return;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(FrequencyCount {
            name: display.to_owned(),
            count: 1,
        });
    }

    fn into_ranked(self) -> Vec<FrequencyCount> {
        let mut entries = self.entries;
        entries.sort_by(|left, right| {
            right
                .count
                .cmp(&left.count)
                .then_with(|| compare_case_insensitive(&left.name, &right.name))
        });
        entries
    }
}
