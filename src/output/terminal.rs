// Colored terminal output for trend reports.

use colored::Colorize;

use crate::pipeline::trending::TrendReport;
use crate::trends::scoring::TrendingTerm;
use crate::trends::traits::PageError;

/// Widest term shown before truncation.
const TERM_WIDTH: usize = 32;

/// Print run statistics and the error summary.
pub fn display_summary(report: &TrendReport) {
    println!(
        "Processed {} pages ({} target postings, {} control postings)",
        report.pages_ingested, report.target_docs, report.control_docs
    );
    display_page_errors(&report.errors);
}

/// Print the number of page errors, then each one dimmed.
pub fn display_page_errors(errors: &[PageError]) {
    let header = format!("**** {} errors occurred during processing ****", errors.len());
    if errors.is_empty() {
        println!("\n{}", header.dimmed());
        return;
    }

    println!("\n{}", header.yellow());
    for err in errors {
        println!("  {}", err.to_string().dimmed());
    }
}

/// Print the top `limit` trending terms as a ranked table.
pub fn display_trending_terms(terms: &[TrendingTerm], limit: usize) {
    println!("\n{}", "=== Trending Terms ===".bold());

    if terms.is_empty() {
        println!("No target postings matched. Try a longer --days window or another --location.");
        return;
    }

    let shown = limit.min(terms.len());
    println!("Displaying the top {shown} trending terms\n");

    println!(
        "  {:>4}  {:<width$}  {:>10}",
        "Rank".dimmed(),
        "Term".dimmed(),
        "Score".dimmed(),
        width = TERM_WIDTH,
    );
    println!("  {}", "-".repeat(TERM_WIDTH + 18).dimmed());

    for (i, term) in terms.iter().take(shown).enumerate() {
        let label = super::truncate_chars(&term.term, TERM_WIDTH - 3);
        let score = format!("{:>10.4}", term.score);
        let colored_score = if term.score > 0.0 {
            score.bright_green()
        } else {
            score.dimmed()
        };

        println!(
            "  {:>4}. {:<width$} {}",
            i + 1,
            label,
            colored_score,
            width = TERM_WIDTH,
        );
    }
}
