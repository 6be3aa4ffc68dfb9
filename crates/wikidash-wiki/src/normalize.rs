//! Merging of the per-slot API payloads into one [`NormalizedArticle`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::Serialize;

use crate::types::{CorePage, LinkEntry, PageviewItem, Revision};

/// A link to or from the article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub title: String,
}

/// Views for one day; `date_code` is `YYYYMMDD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyViews {
    pub date_code: String,
    pub views: u64,
}

/// Everything the dashboard shows about one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedArticle {
    pub title: String,
    pub page_id: i64,
    pub length_bytes: u64,
    /// Plain-text extract, possibly still carrying wiki markup fragments.
    pub raw_summary: String,
    pub last_edit: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub page_url: Option<String>,
    pub links: Vec<PageLink>,
    pub backlinks: Vec<PageLink>,
    pub created_at: Option<DateTime<Utc>>,
    pub creation_author: Option<String>,
    pub last_editor: Option<String>,
    pub unique_editor_count: usize,
    pub language_count: usize,
    pub daily_views: Vec<DailyViews>,
    pub total_views: u64,
    pub average_daily_views: u64,
}

/// Payloads of the five non-core slots after failure degradation.
#[derive(Debug, Default)]
pub struct ArticleSlots {
    pub links: Vec<LinkEntry>,
    pub backlinks: Vec<LinkEntry>,
    /// Oldest first.
    pub revisions: Vec<Revision>,
    /// One entry per interlanguage link.
    pub langlinks: Vec<IgnoredAny>,
    pub pageviews: Vec<PageviewItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewStats {
    pub total: u64,
    pub average: u64,
}

/// Parses an RFC 3339 timestamp such as `"2001-11-27T21:25:56Z"`.
///
/// Returns `None` if the string does not parse.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Sum and rounded mean of the daily counts. An empty slice gives zeros.
#[must_use]
pub fn view_stats(days: &[DailyViews]) -> ViewStats {
    let total: u64 = days.iter().map(|d| d.views).sum();
    let count = days.len() as u64;
    let average = if count == 0 {
        0
    } else {
        // round half up
        (total + count / 2) / count
    };
    ViewStats { total, average }
}

/// Number of distinct (case-sensitive) user names across `revisions`.
/// Revisions with a suppressed user are not counted.
#[must_use]
pub fn count_unique_editors(revisions: &[Revision]) -> usize {
    revisions
        .iter()
        .filter_map(|r| r.user.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Converts raw pageview items into [`DailyViews`]; a missing count is 0.
#[must_use]
pub fn daily_views(items: Vec<PageviewItem>) -> Vec<DailyViews> {
    items
        .into_iter()
        .map(|item| {
            let date_code = item
                .timestamp
                .get(..8)
                .unwrap_or(&item.timestamp)
                .to_string();
            DailyViews {
                date_code,
                views: item.views.unwrap_or(0),
            }
        })
        .collect()
}

fn non_empty_user(revision: Option<&Revision>) -> Option<String> {
    revision
        .and_then(|r| r.user.as_deref())
        .filter(|u| !u.is_empty())
        .map(ToOwned::to_owned)
}

fn page_links(entries: Vec<LinkEntry>) -> Vec<PageLink> {
    entries
        .into_iter()
        .map(|e| PageLink { title: e.title })
        .collect()
}

/// Builds the article record from the core page object and the degraded
/// slot payloads. `canonical_title` is used when the page object carries no
/// title of its own.
#[must_use]
pub fn normalize_article(
    canonical_title: &str,
    page_id: i64,
    page: CorePage,
    slots: ArticleSlots,
) -> NormalizedArticle {
    let first = slots.revisions.first();
    let last = slots.revisions.last();
    let created_at = first
        .and_then(|r| r.timestamp.as_deref())
        .and_then(parse_timestamp);
    let creation_author = non_empty_user(first);
    let last_editor = non_empty_user(last);
    let unique_editor_count = count_unique_editors(&slots.revisions);

    let daily_views = daily_views(slots.pageviews);
    let stats = view_stats(&daily_views);

    NormalizedArticle {
        title: page.title.unwrap_or_else(|| canonical_title.to_string()),
        page_id,
        length_bytes: page.length.unwrap_or(0),
        raw_summary: page.extract.unwrap_or_default(),
        last_edit: page.touched.as_deref().and_then(parse_timestamp),
        image_url: page.thumbnail.map(|t| t.source),
        page_url: page.fullurl,
        links: page_links(slots.links),
        backlinks: page_links(slots.backlinks),
        created_at,
        creation_author,
        last_editor,
        unique_editor_count,
        language_count: slots.langlinks.len(),
        daily_views,
        total_views: stats.total,
        average_daily_views: stats.average,
    }
}
