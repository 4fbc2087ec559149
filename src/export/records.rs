//! Export record builders for the admin and staff views.

use super::ExportRecord;
use crate::{
    core::{Report, Repository, StaffDirectory, UNKNOWN},
    entities::{ContactStatus, StaffId},
};
use chrono::NaiveDate;

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Whole roster with owner names.
#[must_use]
pub fn students_export(
    repository: &Repository,
    directory: &dyn StaffDirectory,
) -> Vec<ExportRecord> {
    repository
        .students()
        .iter()
        .map(|student| {
            let assigned = student
                .assigned_staff
                .map_or_else(|| "Unassigned".to_string(), |id| directory.name_of(id));
            ExportRecord::new()
                .with("Student Name", &student.name)
                .with("Phone", &student.phone)
                .with("EAMCET Rank", student.rank)
                .with("Category", &student.category)
                .with("Status", student.status)
                .with("Assigned Staff", assigned)
                .with("Upload Date", student.upload_date)
                .with("Special Student", yes_no(student.is_special))
        })
        .collect()
}

/// One staff member's caseload, optionally without pending students and
/// with the latest feedback per student.
#[must_use]
pub fn staff_students_export(
    repository: &Repository,
    staff_id: StaffId,
    include_pending: bool,
    include_feedback: bool,
) -> Vec<ExportRecord> {
    repository
        .students_by_staff(staff_id)
        .into_iter()
        .filter(|s| include_pending || s.status != ContactStatus::Pending)
        .map(|student| {
            let latest = include_feedback
                .then(|| repository.latest_feedback_for(student.id))
                .flatten();
            ExportRecord::new()
                .with("Student Name", &student.name)
                .with("Phone", &student.phone)
                .with("EAMCET Rank", student.rank)
                .with("Category", &student.category)
                .with("Status", student.status)
                .with("Special Student", yes_no(student.is_special))
                .with(
                    "Last Feedback",
                    latest.map_or("No feedback", |f| f.remarks.as_str()),
                )
                .with(
                    "Last Updated",
                    latest.map_or_else(
                        || "Never".to_string(),
                        |f| f.timestamp.format("%Y-%m-%d").to_string(),
                    ),
                )
                .with("Assigned Date", student.upload_date)
        })
        .collect()
}

/// Feedback recorded by one staff member, joined with student details.
#[must_use]
pub fn staff_feedback_export(repository: &Repository, staff_id: StaffId) -> Vec<ExportRecord> {
    repository
        .feedback_by_staff(staff_id)
        .into_iter()
        .map(|feedback| {
            let student = repository.student(feedback.student_id);
            ExportRecord::new()
                .with("Student Name", student.map_or(UNKNOWN, |s| s.name.as_str()))
                .with(
                    "Student Rank",
                    student.map_or_else(|| "N/A".to_string(), |s| s.rank.to_string()),
                )
                .with("Student Category", student.map_or("N/A", |s| s.category.as_str()))
                .with("Feedback Status", feedback.status)
                .with("Remarks", &feedback.remarks)
                .with("Date", feedback.timestamp.format("%Y-%m-%d"))
                .with("Time", feedback.timestamp.format("%H:%M:%S"))
        })
        .collect()
}

/// Flattened live report: a summary row, one row per staff member, then the
/// recent feedback rows.
#[must_use]
pub fn live_report_export(
    report: &Report,
    repository: &Repository,
    directory: &dyn StaffDirectory,
    generated_by: &str,
    date: NaiveDate,
) -> Vec<ExportRecord> {
    let stats = &report.statistics;
    let mut rows = vec![
        ExportRecord::new()
            .with("Report Type", "EAMCET Student Management Report")
            .with("Generated Date", date)
            .with("Generated By", generated_by)
            .with("Total Students", stats.total_students)
            .with("Assigned Students", stats.assigned_students)
            .with("Pending Students", stats.pending_students)
            .with("Completed Students", stats.completed_students)
            .with("Active Staff", stats.active_staff)
            .with("Completion Rate", format!("{:.1}%", stats.completion_rate))
            .with("Assignment Rate", format!("{:.1}%", stats.assignment_rate)),
    ];

    rows.extend(report.staff_performance.iter().map(|line| {
        ExportRecord::new()
            .with("Report Type", "Staff Performance")
            .with("Staff Name", &line.staff_name)
            .with("Students Assigned", line.assigned_count)
            .with("Completed", line.completed_count)
            .with("Pending", line.pending_count)
            .with("Completion Rate", format!("{}%", line.completion_rate))
            .with("Feedback Entries", line.feedback_count)
    }));

    rows.extend(report.feedback.iter().map(|feedback| {
        let student = repository
            .student(feedback.student_id)
            .map_or(UNKNOWN, |s| s.name.as_str());
        ExportRecord::new()
            .with("Report Type", "Recent Feedback")
            .with("Student Name", student)
            .with("Staff Name", directory.name_of(feedback.staff_id))
            .with("Status", feedback.status)
            .with("Remarks", &feedback.remarks)
            .with("Date", feedback.timestamp.format("%Y-%m-%d"))
            .with("Time", feedback.timestamp.format("%H:%M:%S"))
    }));

    rows
}
