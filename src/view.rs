//! Plain-text rendering of page view models for the terminal.

use colored::Colorize;

use crate::fetch::FetchState;
use crate::models::{Activity, CourseRecord, UserProfile};
use crate::pages::checklist::RequirementRow;
use crate::pages::credits::{EachCreditsView, TotalCreditsView};
use crate::pages::home::HomeView;
use crate::pages::score_management::{LectureRow, RowButton};
use crate::pages::summary::SummaryView;
use crate::pages::RowAction;
use crate::paging::PageView;
use crate::progress::{CreditProgress, RequirementStatus};
use crate::router::{NavItem, header_links};
use crate::session::Session;

const BAR_WIDTH: usize = 30;

pub fn progress_bar(percentage: f64, width: usize) -> String {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn header(session: &Session) -> String {
    let links: Vec<String> = header_links(session)
        .into_iter()
        .map(|item| match item {
            NavItem::Link { label, route } => format!("{} ({})", label, route.path()),
            NavItem::Logout => "Logout".to_string(),
        })
        .collect();
    let who = match (session.is_logged_in, &session.user_id) {
        (true, Some(id)) => format!("  [{}]", id),
        _ => String::new(),
    };
    format!("{}{}\n{}\n", "JOLUV".magenta().bold(), who, links.join(" | "))
}

/// Shared loading and error handling; `render` draws the ready state.
pub fn fetch_state<T>(state: &FetchState<T>, render: impl FnOnce(&T) -> String) -> String {
    match state {
        FetchState::Idle => String::new(),
        FetchState::Loading => "Loading...\n".to_string(),
        FetchState::Failed(msg) => format!("{}\n", msg.red()),
        FetchState::Ready(data) => render(data),
    }
}

pub fn total_credits(view: &TotalCreditsView) -> String {
    let p: &CreditProgress = &view.progress;
    format!(
        "Graduation credits ({})\n  {} / {} credits\n  {} {} completed\n",
        view.major_name,
        p.completed.to_string().magenta().bold(),
        p.total,
        progress_bar(p.percentage(), BAR_WIDTH),
        p.display_percentage(),
    )
}

pub fn each_credits(view: &EachCreditsView) -> String {
    format!(
        "Major credits: {}    General credits: {}\n",
        view.major_credits.to_string().magenta(),
        view.general_credits.to_string().magenta()
    )
}

pub fn home(view: &HomeView) -> String {
    let mut out = String::new();
    out.push_str("Your roadmap to a successful graduation.\n\n");
    for card in &view.cards {
        out.push_str(&format!("  * {:<18} {}\n", card.title, card.route.path()));
    }
    match &view.credits {
        Some((total, each)) => {
            out.push_str("\nMy progress\n");
            out.push_str(&fetch_state(total, total_credits));
            out.push_str(&fetch_state(each, each_credits));
        }
        None => out.push_str("\nLog in to see your credit progress.\n"),
    }
    out
}

fn status_badge(status: RequirementStatus) -> String {
    let label = status.label();
    match status {
        RequirementStatus::Complete => label.green().to_string(),
        RequirementStatus::InProgress => label.yellow().to_string(),
        RequirementStatus::NotStarted => label.dimmed().to_string(),
    }
}

pub fn requirement_rows(rows: &[RequirementRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = match (row.is_expandable(), row.expanded) {
            (true, true) => "v",
            (true, false) => ">",
            (false, _) => " ",
        };
        out.push_str(&format!(
            "{} {:<24} {} {:>9}  {}\n",
            marker,
            row.title,
            progress_bar(row.percentage, 20),
            row.progress,
            status_badge(row.status)
        ));
        if let Some(message) = &row.message {
            out.push_str(&format!("    {}\n", message.dimmed()));
        }
        if row.expanded {
            for course in &row.details {
                out.push_str(&format!("    - {} ({})\n", course.name, course.grade));
            }
        }
    }
    if rows.is_empty() {
        out.push_str("No requirements to show.\n");
    }
    out
}

fn pager<T>(page: &PageView<T>) -> String {
    if page.page_count <= 1 {
        return String::new();
    }
    let buttons: Vec<String> = page
        .group
        .clone()
        .map(|n| {
            if n == page.page {
                format!("[{}]", n)
            } else {
                n.to_string()
            }
        })
        .collect();
    let prev = if *page.group.start() > 1 { "< " } else { "" };
    let next = if *page.group.end() < page.page_count { " >" } else { "" };
    format!("{}{}{}  (page {} of {})\n", prev, buttons.join(" "), next, page.page, page.page_count)
}

pub fn course_table(page: &PageView<CourseRecord>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:<24} {:>6} {:<12} {:>4} {:<8} {:<5}\n",
        "ID", "Name", "Credit", "Category", "Year", "Term", "Grade"
    ));
    for c in &page.items {
        out.push_str(&format!(
            "{:<10} {:<24} {:>6} {:<12} {:>4} {:<8} {:<5}\n",
            c.lecture_id,
            c.name,
            c.credit,
            c.category,
            c.grade,
            c.semester,
            c.received_grade.as_deref().unwrap_or("-")
        ));
    }
    if page.items.is_empty() {
        out.push_str("No courses yet.\n");
    }
    out.push_str(&pager(page));
    out
}

fn button_label(button: RowButton) -> String {
    match button {
        RowButton::Add => "Add".green().to_string(),
        RowButton::Added => "Added".dimmed().to_string(),
        RowButton::Pending(RowAction::Adding) => "Adding...".yellow().to_string(),
        RowButton::Pending(RowAction::Removing) => "Removing...".yellow().to_string(),
        RowButton::Pending(RowAction::Updating) => "Updating...".yellow().to_string(),
    }
}

pub fn lecture_table(page: &PageView<LectureRow>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} results\n", page.total_items));
    for row in &page.items {
        let l = &row.lecture;
        out.push_str(&format!(
            "{:<10} {:<24} {:>2}cr {:<12} Y{} {:<8} {:<14} {}\n",
            l.lecture_id,
            l.name,
            l.credit,
            l.category,
            l.grade,
            l.semester,
            l.professor.as_deref().unwrap_or(""),
            button_label(row.button)
        ));
    }
    out.push_str(&pager(page));
    out
}

pub fn summary(view: &SummaryView) -> String {
    let mut out = String::new();
    for s in &view.semesters {
        out.push_str(&format!(
            "Year {} {:<10} {:>2} courses  {:>3} credits earned  GPA {}\n",
            s.year,
            s.semester,
            s.tally.courses,
            s.tally.earned,
            format_gpa(s.tally.gpa())
        ));
    }
    out.push_str(&format!(
        "Overall: {} of {} credits earned, GPA {}\n",
        view.overall.earned,
        view.overall.attempted,
        format_gpa(view.overall.gpa()).bold()
    ));
    if !view.by_category.is_empty() {
        out.push_str("Earned credits by category:\n");
        for (category, credits) in &view.by_category {
            out.push_str(&format!("  {:<16} {:>3}\n", category, credits));
        }
    }
    out
}

fn format_gpa(gpa: Option<f64>) -> String {
    gpa.map(|g| format!("{:.2}", g)).unwrap_or_else(|| "-".to_string())
}

pub fn profile(p: &UserProfile) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", p.name.bold(), p.student_id));
    out.push_str(&format!("{}\n", p.major));
    if let Some(track) = &p.track {
        out.push_str(&format!("Track: {}\n", track.magenta()));
    }
    out.push_str(&format!(
        "English score: {}  GPA: {} (major {})  Internship: {}\n",
        p.english_score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
        format_gpa(p.gpa_total),
        format_gpa(p.gpa_major),
        if p.internship_flag { "yes" } else { "no" }
    ));
    out
}

pub fn activities(list: &[Activity]) -> String {
    let mut out = String::new();
    for a in list {
        out.push_str(&format!(
            "[{}] {} - {} ({})\n",
            a.category.cyan(),
            a.title,
            a.detail.as_deref().unwrap_or(""),
            a.year
        ));
        out.push_str(&format!("      id: {}\n", a.id.dimmed()));
    }
    if list.is_empty() {
        out.push_str("No activities recorded.\n");
    }
    out
}
