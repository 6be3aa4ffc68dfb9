//! `article` command: fetch one article and print a report or its JSON.

use anyhow::Context;
use chrono::{DateTime, Utc};
use wikidash_core::AppConfig;
use wikidash_wiki::{render_summary, ErrorKind, NormalizedArticle, WikiClient};

use crate::render::format_blocks;

/// Fetches `title` and prints it.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the article cannot be
/// resolved or its core data is unavailable, or JSON encoding fails.
pub(crate) async fn run_article(config: &AppConfig, title: &str, json: bool) -> anyhow::Result<()> {
    let client = WikiClient::from_app_config(config)?;

    let article = match client.fetch_wiki_data(title).await {
        Ok(article) => article,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            anyhow::bail!("no Wikipedia article found for '{title}' ({e})");
        }
        Err(e) => return Err(e).with_context(|| format!("failed to fetch '{title}'")),
    };

    tracing::info!(title = %article.title, page_id = article.page_id, "fetched article");

    if json {
        println!("{}", serde_json::to_string_pretty(&article)?);
    } else {
        print!("{}", format_report(&article));
    }
    Ok(())
}

fn fmt_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "\u{2014}".to_string(),
        |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

fn fmt_name(name: Option<&str>) -> &str {
    name.unwrap_or("\u{2014}")
}

/// Plain-text report: statistics table followed by the rendered summary.
pub(crate) fn format_report(article: &NormalizedArticle) -> String {
    let rows = [
        ("TITLE", article.title.clone()),
        ("PAGE ID", article.page_id.to_string()),
        ("LENGTH", format!("{} bytes", article.length_bytes)),
        ("URL", fmt_name(article.page_url.as_deref()).to_string()),
        ("CREATED", fmt_time(article.created_at)),
        ("CREATED BY", fmt_name(article.creation_author.as_deref()).to_string()),
        ("LAST EDIT", fmt_time(article.last_edit)),
        ("LAST EDITOR", fmt_name(article.last_editor.as_deref()).to_string()),
        ("EDITORS", article.unique_editor_count.to_string()),
        ("LANGUAGES", article.language_count.to_string()),
        ("LINKS", article.links.len().to_string()),
        ("BACKLINKS", article.backlinks.len().to_string()),
        ("TOTAL VIEWS", article.total_views.to_string()),
        ("AVG VIEWS/DAY", article.average_daily_views.to_string()),
    ];
    let mut out: String = rows
        .iter()
        .map(|(label, value)| format!("{label:<15}{value}\n"))
        .collect();

    let blocks = render_summary(&article.raw_summary);
    if !blocks.is_empty() {
        out.push('\n');
        out.push_str(&format_blocks(&blocks));
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use wikidash_wiki::{DailyViews, PageLink};

    use super::*;

    fn article() -> NormalizedArticle {
        NormalizedArticle {
            title: "Albert Einstein".to_string(),
            page_id: 736,
            length_bytes: 250_000,
            raw_summary: "Albert Einstein was a physicist.\n== Life ==".to_string(),
            last_edit: None,
            image_url: None,
            page_url: None,
            links: vec![PageLink {
                title: "Physics".to_string(),
            }],
            backlinks: vec![],
            created_at: Some(Utc.with_ymd_and_hms(2001, 11, 27, 21, 25, 0).unwrap()),
            creation_author: Some("alice".to_string()),
            last_editor: None,
            unique_editor_count: 3,
            language_count: 200,
            daily_views: vec![DailyViews {
                date_code: "20250105".to_string(),
                views: 30,
            }],
            total_views: 30,
            average_daily_views: 30,
        }
    }

    #[test]
    fn report_lists_statistics_and_summary() {
        let report = format_report(&article());
        assert!(report.contains("TITLE          Albert Einstein\n"));
        assert!(report.contains("CREATED        2001-11-27 21:25 UTC\n"));
        assert!(report.contains("LAST EDITOR    \u{2014}\n"));
        assert!(report.contains("LANGUAGES      200\n"));
        assert!(report.contains("LINKS          1\n"));
        assert!(report.contains("BACKLINKS      0\n"));
        assert!(report.ends_with("Albert Einstein was a physicist.\n\n## Life\n"));
    }
}
