//! Export services for the fix table.
//!
//! Two artifacts, intentionally asymmetric in scope:
//! - the CSV always covers the complete in-memory collection, ignoring the
//!   active category filter;
//! - the paginated report covers exactly the filtered view.
//!
//! The report is written through a temp file and renamed into place, so a
//! failure mid-write never leaves a partial artifact behind.

use crate::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use fixwatch_types::{CategoryFilter, FixRecord};
use std::path::{Path, PathBuf};

pub const CSV_HEADERS: [&str; 8] = [
    "ID",
    "Timestamp",
    "Status",
    "File",
    "Line",
    "Bug Type",
    "Description",
    "Commit Message",
];

/// Rows of table content per report page.
const PAGE_ROWS: usize = 40;
const PAGE_WIDTH: usize = 100;

pub fn csv_file_name(now: DateTime<Utc>) -> String {
    format!("fixwatch_fixes_{}.csv", file_stamp(now))
}

pub fn report_file_name(now: DateTime<Utc>) -> String {
    format!("fixwatch_report_{}.txt", file_stamp(now))
}

pub fn results_file_name(run_id: &str) -> String {
    format!("results_{}.json", run_id)
}

fn file_stamp(now: DateTime<Utc>) -> String {
    // ISO-8601, with separators the filesystem tolerates.
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
        .replace(':', "-")
}

/// Write the complete fix collection as CSV. Quoting and double-quote
/// escaping of the free-text columns follow standard CSV rules.
pub fn write_fixes_csv(path: &Path, fixes: &[FixRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(CSV_HEADERS)?;

    for fix in fixes {
        wtr.write_record([
            fix.id.as_str(),
            fix.timestamp.as_str(),
            fix.status.as_str(),
            fix.file.as_str(),
            &fix.line.to_string(),
            fix.bug_type.as_str(),
            fix.description.as_str(),
            fix.commit_message.as_str(),
        ])?;
    }

    wtr.flush().map_err(crate::Error::Io)?;
    Ok(())
}

/// Render the filtered fix view as fixed-height pages, each with its own
/// title/header block. Pure; no IO.
pub fn render_report_pages(
    fixes: &[FixRecord],
    filter: CategoryFilter,
    generated_at: DateTime<Utc>,
) -> Vec<String> {
    let rows: Vec<String> = filter.apply(fixes).iter().map(|f| report_row(f)).collect();

    let page_count = rows.len().div_ceil(PAGE_ROWS).max(1);
    let mut pages = Vec::with_capacity(page_count);

    for page_index in 0..page_count {
        let mut page = String::new();
        page.push_str("Vulnerability Report\n");
        page.push_str(&format!(
            "Generated on {}  |  Filter: {}  |  Page {} of {}\n",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            filter.label(),
            page_index + 1,
            page_count
        ));
        page.push_str(&"=".repeat(PAGE_WIDTH));
        page.push('\n');
        page.push_str(&format!(
            "{:<12} {:<34} {:<13} {:<30} {:<8}\n",
            "STATUS", "FILE", "TYPE", "ACTION", "TIME"
        ));
        page.push_str(&"-".repeat(PAGE_WIDTH));
        page.push('\n');

        let chunk = rows
            .iter()
            .skip(page_index * PAGE_ROWS)
            .take(PAGE_ROWS)
            .cloned()
            .collect::<Vec<_>>();
        if chunk.is_empty() {
            page.push_str("No issues match the selected filter.\n");
        } else {
            for row in chunk {
                page.push_str(&row);
                page.push('\n');
            }
        }

        pages.push(page);
    }

    pages
}

fn report_row(fix: &FixRecord) -> String {
    let location = format!("{}:{}", fix.file, fix.line);
    format!(
        "{:<12} {:<34} {:<13} {:<30} {:<8}",
        fix.status.as_str(),
        clip(&location, 34),
        fix.bug_type.as_str(),
        clip(&fix.commit_message, 30),
        clip(&fix.timestamp, 8),
    )
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Write the paginated report. Cancel-on-error: the temp file is removed
/// on failure and the destination only ever appears complete.
pub async fn write_report(
    path: &Path,
    fixes: &[FixRecord],
    filter: CategoryFilter,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let pages = render_report_pages(fixes, filter, generated_at);
    let document = pages.join("\u{000C}\n");

    let tmp = tmp_path(path);
    if let Err(err) = tokio::fs::write(&tmp, document.as_bytes()).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    if let Err(err) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    Ok(())
}

/// Persist the gateway's complete results document, pretty-printed.
pub async fn write_results(path: &Path, document: &serde_json::Value) -> Result<()> {
    let body = serde_json::to_string_pretty(document)
        .map_err(|e| crate::Error::InvalidOperation(format!("results not serializable: {}", e)))?;
    tokio::fs::write(path, body.as_bytes()).await?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut full = path.as_os_str().to_os_string();
    full.push(".tmp");
    PathBuf::from(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixwatch_types::{BugCategory, FixStatus, Severity};

    fn fix(id: &str, category: BugCategory, description: &str, commit: &str) -> FixRecord {
        FixRecord {
            id: id.to_string(),
            file: "src/app.py".to_string(),
            line: 42,
            bug_type: category,
            description: description.to_string(),
            commit_message: commit.to_string(),
            status: FixStatus::Fixed,
            timestamp: "2026-01-05T10:00:01".to_string(),
            severity: Severity::Medium,
        }
    }

    #[test]
    fn csv_round_trips_with_quoted_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixes.csv");
        let fixes = vec![
            fix(
                "r1_fix_0",
                BugCategory::Syntax,
                "uses \"quotes\", commas, and\nnewlines",
                "Fix \"quoted\" call",
            ),
            fix("r1_fix_1", BugCategory::Security, "plain", "Harden input"),
        ];

        write_fixes_csv(&path, &fixes).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADERS.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][6], "uses \"quotes\", commas, and\nnewlines");
        assert_eq!(&rows[0][7], "Fix \"quoted\" call");
        assert_eq!(&rows[1][2], "FIXED");
    }

    #[test]
    fn report_paginates_at_fixed_height() {
        let fixes: Vec<FixRecord> = (0..95)
            .map(|i| fix(&format!("f{}", i), BugCategory::Linting, "d", "m"))
            .collect();
        let pages = render_report_pages(&fixes, CategoryFilter::All, Utc::now());
        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("Page 1 of 3"));
        assert!(pages[2].contains("Page 3 of 3"));
    }

    #[test]
    fn report_honors_filter() {
        let fixes = vec![
            fix("a", BugCategory::Syntax, "d", "m"),
            fix("b", BugCategory::Security, "d", "m"),
        ];
        let pages = render_report_pages(
            &fixes,
            CategoryFilter::Category(BugCategory::Security),
            Utc::now(),
        );
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("SECURITY"));
        assert!(!pages[0].contains("SYNTAX"));
    }

    #[test]
    fn empty_filter_result_still_renders_one_page() {
        let fixes = vec![fix("a", BugCategory::Syntax, "d", "m")];
        let pages = render_report_pages(
            &fixes,
            CategoryFilter::Category(BugCategory::Deprecation),
            Utc::now(),
        );
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("No issues match the selected filter."));
    }

    #[tokio::test]
    async fn report_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let fixes = vec![fix("a", BugCategory::Syntax, "d", "m")];

        write_report(&path, &fixes, CategoryFilter::All, Utc::now())
            .await
            .unwrap();

        assert!(path.exists());
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn file_names_carry_iso_stamp() {
        let stamp = chrono::DateTime::parse_from_rfc3339("2026-01-05T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(csv_file_name(stamp), "fixwatch_fixes_2026-01-05T10-00-00Z.csv");
        assert_eq!(
            report_file_name(stamp),
            "fixwatch_report_2026-01-05T10-00-00Z.txt"
        );
        assert_eq!(results_file_name("run-1"), "results_run-1.json");
    }
}
