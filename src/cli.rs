//! Command line interface - the admin and staff actions as subcommands.
//!
//! Every command loads the repository, performs one action through the core
//! types and prints a short outcome. Informational no-ops (nothing to assign,
//! nothing to export) are printed, not treated as failures.

use crate::{
    config::{AppConfig, DirectorySource},
    core::{
        AssignmentEngine, LocalStaffDirectory, PerformanceAggregator, ReportGenerator, Repository,
        StaffDirectory, StudentFilter, UserDirectory,
    },
    entities::{ContactStatus, Staff, StaffId, StudentId, StudentUpdate},
    errors::Result,
    export::{self, Backup},
    roster,
    storage::JsonFileStore,
};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use tracing::info;

/// Student outreach tracker
#[derive(Debug, Parser)]
#[command(name = "outreach")]
#[command(
    about = "Assign students to outreach staff and report on contact progress",
    long_about = None
)]
pub struct Cli {
    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Available actions
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import students from a CSV roster
    Upload {
        /// CSV file with name, phone, rank and category columns
        #[arg(long)]
        file: PathBuf,
    },
    /// Add a staff member, replacing any with the same id
    AddStaff {
        /// Staff id
        #[arg(long)]
        id: StaffId,
        /// Display name
        #[arg(long)]
        name: String,
        /// Store the staff member as inactive
        #[arg(long)]
        inactive: bool,
    },
    /// Change a student's details
    Edit {
        /// Student id
        #[arg(long)]
        student: StudentId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
        /// New rank
        #[arg(long)]
        rank: Option<u32>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New contact status
        #[arg(long)]
        status: Option<ContactStatus>,
    },
    /// Remove a student from the roster
    Delete {
        /// Student id
        #[arg(long)]
        student: StudentId,
    },
    /// List students matching a name, phone or rank fragment
    Search {
        /// Text to look for; empty lists everyone
        #[arg(default_value = "")]
        query: String,
        /// Only this category
        #[arg(long)]
        category: Option<String>,
        /// Only this status
        #[arg(long)]
        status: Option<ContactStatus>,
        /// Only students owned by this staff member
        #[arg(long)]
        staff: Option<StaffId>,
        /// Only special students
        #[arg(long)]
        special: bool,
    },
    /// Show dashboard statistics and the current top performers
    Stats,
    /// Spread unassigned students over active staff, round robin
    AutoAssign,
    /// Route unassigned special students to top performers
    AssignSpecial {
        /// Give them all to this staff member instead of the top two
        #[arg(long)]
        to: Option<StaffId>,
    },
    /// Assign one student to one staff member
    Assign {
        /// Student id
        #[arg(long)]
        student: StudentId,
        /// Staff id
        #[arg(long)]
        staff: StaffId,
    },
    /// Flip a student's special flag
    ToggleSpecial {
        /// Student id
        #[arg(long)]
        student: StudentId,
    },
    /// Record a contact outcome
    Feedback {
        /// Student id
        #[arg(long)]
        student: StudentId,
        /// Staff id
        #[arg(long)]
        staff: StaffId,
        /// Contact outcome
        #[arg(long)]
        status: ContactStatus,
        /// Defaults to the stock remarks for the status
        #[arg(long)]
        remarks: Option<String>,
    },
    /// Move all pending students of a staff member to a status
    BulkUpdate {
        /// Staff id
        #[arg(long)]
        staff: StaffId,
        /// Contact outcome
        #[arg(long)]
        status: ContactStatus,
    },
    /// Print the full report as JSON
    Report,
    /// Print one staff member's report as JSON
    StaffReport {
        /// Staff id
        #[arg(long)]
        staff: StaffId,
    },
    /// Write a CSV export into the export directory
    Export {
        /// Which export to write
        #[arg(value_enum)]
        kind: ExportKind,
        /// Staff member for the staff-scoped exports
        #[arg(long)]
        staff: Option<StaffId>,
        /// Leave pending students out of `my-students`
        #[arg(long)]
        exclude_pending: bool,
        /// Leave the latest feedback out of `my-students`
        #[arg(long)]
        no_feedback: bool,
    },
    /// Write a full JSON backup into the export directory
    Backup,
    /// Replace all data with a JSON backup
    Restore {
        /// Backup JSON file
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete all students, staff and feedback
    Reset {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// CSV exports offered by [`Command::Export`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Whole roster
    Students,
    /// One staff member's students
    MyStudents,
    /// One staff member's feedback
    MyFeedback,
    /// Live report
    Report,
}

/// Runs one command against the configured data directory.
///
/// # Errors
/// Returns an error for invalid input (blank remarks, bad backup file) or
/// when an export cannot be written.
pub fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    let store = JsonFileStore::new(&config.storage.data_dir);
    let users = store.load_users();
    let mut repository = Repository::load(store);
    let directory: Box<dyn StaffDirectory> = match config.directory.source {
        DirectorySource::Local => Box::new(LocalStaffDirectory::from_repository(&repository)),
        DirectorySource::Users => Box::new(UserDirectory::new(users)),
    };
    let directory = directory.as_ref();
    let today = Local::now().date_naive();

    match cli.command {
        Command::Upload { file } => upload(&mut repository, &file)?,
        Command::AddStaff { id, name, inactive } => {
            let staff = Staff {
                is_active: !inactive,
                ..Staff::new(id, name)
            };
            println!("Staff member {} ({}) saved.", staff.name, staff.id);
            repository.add_staff(staff);
        }
        Command::Edit {
            student,
            name,
            phone,
            rank,
            category,
            status,
        } => {
            let update = StudentUpdate {
                name,
                phone,
                rank,
                category,
                status,
                ..StudentUpdate::default()
            };
            if repository.update_student(student, &update) {
                println!("Student {student} updated.");
            } else {
                println!("Student {student} not found.");
            }
        }
        Command::Delete { student } => {
            if repository.delete_student(student) {
                println!("Student {student} deleted.");
            } else {
                println!("Student {student} not found.");
            }
        }
        Command::Search {
            query,
            category,
            status,
            staff,
            special,
        } => {
            let filter = StudentFilter {
                category,
                status,
                staff_id: staff,
                is_special: special.then_some(true),
            };
            print_students(&repository, directory, &query, &filter);
        }
        Command::Stats => {
            let aggregator = PerformanceAggregator::new(&repository, directory);
            let stats = aggregator.statistics();
            println!(
                "Students: {} total, {} assigned ({:.1}%), {} completed ({:.1}%), {} pending",
                stats.total_students,
                stats.assigned_students,
                stats.assignment_rate,
                stats.completed_students,
                stats.completion_rate,
                stats.pending_students
            );
            println!(
                "Active staff: {}, special students: {}",
                stats.active_staff, stats.special_students
            );
            for (rank, ranked) in aggregator.top_performing_staff().iter().enumerate() {
                println!(
                    "{}. {} - {}/{} completed ({:.1}%)",
                    rank + 1,
                    ranked.staff.name,
                    ranked.completed_count,
                    ranked.assigned_count,
                    ranked.completion_rate * 100.0
                );
            }
        }
        Command::AutoAssign => {
            let count =
                AssignmentEngine::new(&mut repository, directory).auto_assign_students();
            println!("{count} students assigned automatically to staff.");
        }
        Command::AssignSpecial { to: Some(staff_id) } => {
            let count =
                AssignmentEngine::new(&mut repository, directory).assign_special_to(staff_id);
            println!(
                "{count} special students assigned to {}.",
                directory.name_of(staff_id)
            );
        }
        Command::AssignSpecial { to: None } => {
            let outcome =
                AssignmentEngine::new(&mut repository, directory).assign_special_students();
            println!("{}", outcome.message());
        }
        Command::Assign { student, staff } => {
            let mut engine = AssignmentEngine::new(&mut repository, directory);
            if engine.assign_student_to_staff(student, staff) {
                println!("Student {student} assigned to {}.", directory.name_of(staff));
            } else {
                println!("Student {student} or staff {staff} not found; nothing changed.");
            }
        }
        Command::ToggleSpecial { student } => match repository.toggle_special(student) {
            Some(true) => println!("Student marked as special."),
            Some(false) => println!("Special status removed from student."),
            None => println!("Student {student} not found."),
        },
        Command::Feedback {
            student,
            staff,
            status,
            remarks,
        } => {
            let remarks = remarks.unwrap_or_else(|| status.default_remarks().to_string());
            let id = repository.add_feedback(student, staff, status, &remarks)?;
            println!("Feedback {id} submitted.");
        }
        Command::BulkUpdate { staff, status } => {
            let count = repository.bulk_update_pending(staff, status);
            println!("{count} students updated to {status}.");
        }
        Command::Report => {
            let report = ReportGenerator::new(&repository, directory).generate_report();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::StaffReport { staff } => {
            let report = ReportGenerator::new(&repository, directory).generate_staff_report(staff);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Export {
            kind,
            staff,
            exclude_pending,
            no_feedback,
        } => {
            let (records, filename) = match (kind, staff) {
                (ExportKind::Students, _) => (
                    export::students_export(&repository, directory),
                    "eamcet_students_export.csv".to_string(),
                ),
                (ExportKind::MyStudents, Some(staff_id)) => (
                    export::staff_students_export(
                        &repository,
                        staff_id,
                        !exclude_pending,
                        !no_feedback,
                    ),
                    export::dated_filename(&format!("my_students_{staff_id}"), today, "csv"),
                ),
                (ExportKind::MyFeedback, Some(staff_id)) => (
                    export::staff_feedback_export(&repository, staff_id),
                    export::dated_filename(&format!("feedback_{staff_id}"), today, "csv"),
                ),
                (ExportKind::Report, _) => {
                    let report = ReportGenerator::new(&repository, directory).generate_report();
                    (
                        export::live_report_export(&report, &repository, directory, "Admin", today),
                        export::dated_filename("eamcet_live_report", today, "csv"),
                    )
                }
                (ExportKind::MyStudents | ExportKind::MyFeedback, None) => {
                    println!("--staff is required for staff-scoped exports.");
                    return Ok(());
                }
            };
            match export::write_csv(&config.export.dir, &filename, &records)? {
                Some(path) => println!("Exported {} rows to {}.", records.len(), path.display()),
                None => println!("Nothing to export."),
            }
        }
        Command::Backup => {
            let json = Backup::capture(&repository).to_json()?;
            std::fs::create_dir_all(&config.export.dir)?;
            let path = config
                .export
                .dir
                .join(export::dated_filename("eamcet_backup", today, "json"));
            std::fs::write(&path, json)?;
            println!("Backup written to {}.", path.display());
        }
        Command::Restore { file } => {
            let json = std::fs::read_to_string(&file)?;
            Backup::restore(&mut repository, &json)?;
            println!("Data imported from {}.", file.display());
        }
        Command::Reset { yes } => {
            if yes {
                repository.clear_all();
                println!("All data has been reset.");
            } else {
                println!("Refusing to reset without --yes.");
            }
        }
    }

    info!("Command finished");
    Ok(())
}

fn upload(repository: &mut Repository, file: &Path) -> Result<()> {
    let rows = roster::read_csv(File::open(file)?)?;
    let students = roster::validate_rows(&rows);
    if students.is_empty() {
        println!("No valid student data found. Please check your file format.");
        return Ok(());
    }
    let skipped = rows.len() - students.len();
    let count = repository.add_students(students);
    println!("{count} students uploaded successfully ({skipped} rows skipped).");
    Ok(())
}

fn print_students(
    repository: &Repository,
    directory: &dyn StaffDirectory,
    query: &str,
    filter: &StudentFilter,
) {
    let matches = repository.search_students(query, filter);
    for student in &matches {
        let owner = student
            .assigned_staff
            .map_or_else(|| "Unassigned".to_string(), |id| directory.name_of(id));
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}{}",
            student.id,
            student.name,
            student.phone,
            student.rank,
            student.category,
            student.status,
            owner,
            if student.is_special { "\t*" } else { "" }
        );
    }
    println!("{} students found.", matches.len());
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::{ExportConfig, StorageConfig};
    use crate::storage::{Persistence, Snapshot};
    use crate::test_utils::seeded_snapshot;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            storage: StorageConfig {
                data_dir: dir.join("data"),
            },
            export: ExportConfig {
                dir: dir.join("exports"),
            },
            ..AppConfig::default()
        }
    }

    fn run_args(args: &[&str], config: &AppConfig) -> Result<()> {
        let argv = std::iter::once("outreach").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        run(cli, config)
    }

    #[test]
    fn test_auto_assign_persists_to_data_dir() -> Result<()> {
        let dir = tempdir()?;
        let config = config_in(dir.path());
        JsonFileStore::new(&config.storage.data_dir).save(&seeded_snapshot())?;

        run_args(&["auto-assign"], &config)?;

        let stored = JsonFileStore::new(&config.storage.data_dir).load();
        assert!(stored.students.iter().all(|s| s.assigned_staff.is_some()));
        Ok(())
    }

    #[test]
    fn test_feedback_command_parses_status() -> Result<()> {
        let dir = tempdir()?;
        let config = config_in(dir.path());
        JsonFileStore::new(&config.storage.data_dir).save(&seeded_snapshot())?;

        run_args(
            &["feedback", "--student", "5", "--staff", "2", "--status", "call-back"],
            &config,
        )?;

        let stored = JsonFileStore::new(&config.storage.data_dir).load();
        let vikram = stored.students.iter().find(|s| s.id == 5).unwrap();
        assert_eq!(vikram.status, ContactStatus::CallBack);
        assert_eq!(stored.feedback.len(), 5);
        Ok(())
    }

    #[test]
    fn test_unknown_status_is_rejected_by_parser() {
        let result = Cli::try_parse_from([
            "outreach", "feedback", "--student", "1", "--staff", "2", "--status", "maybe",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_and_reset() -> Result<()> {
        let dir = tempdir()?;
        let config = config_in(dir.path());
        let seeded = seeded_snapshot();
        JsonFileStore::new(&config.storage.data_dir).save(&seeded)?;

        run_args(&["export", "students"], &config)?;
        assert!(config.export.dir.join("eamcet_students_export.csv").exists());

        run_args(&["reset"], &config)?;
        assert_eq!(JsonFileStore::new(&config.storage.data_dir).load(), seeded);

        run_args(&["reset", "--yes"], &config)?;
        assert_eq!(JsonFileStore::new(&config.storage.data_dir).load(), Snapshot::default());
        Ok(())
    }

    #[test]
    fn test_upload_imports_valid_rows() -> Result<()> {
        let dir = tempdir()?;
        let config = config_in(dir.path());
        let roster = dir.path().join("roster.csv");
        std::fs::write(
            &roster,
            "Student Name,Phone,EAMCET Rank,Category\n\
             Asha Rao,9876543299,4200,BC-B\n\
             Kiran Das,9876543298,5100,OC\n\
             Missing Phone,,6000,OC\n",
        )?;

        run_args(&["upload", "--file", roster.to_str().unwrap()], &config)?;

        let stored = JsonFileStore::new(&config.storage.data_dir).load();
        let names: Vec<_> = stored.students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Asha Rao", "Kiran Das"]);
        assert_eq!(stored.students[0].id, 1);
        assert_eq!(stored.students[1].rank, 5100);
        assert!(stored.students.iter().all(|s| s.assigned_staff.is_none()));
        Ok(())
    }

    #[test]
    fn test_add_staff_then_auto_assign_uploaded_students() -> Result<()> {
        let dir = tempdir()?;
        let config = config_in(dir.path());
        let roster = dir.path().join("roster.csv");
        std::fs::write(&roster, "name,phone,rank,category\nA,1,10,OC\nB,2,20,OC\n")?;

        run_args(&["upload", "--file", roster.to_str().unwrap()], &config)?;
        run_args(&["add-staff", "--id", "7", "--name", "Meena Iyer"], &config)?;
        run_args(&["add-staff", "--id", "8", "--name", "Old Hand", "--inactive"], &config)?;
        run_args(&["auto-assign"], &config)?;

        let stored = JsonFileStore::new(&config.storage.data_dir).load();
        assert_eq!(stored.staff.len(), 2);
        assert!(!stored.staff[1].is_active);
        assert!(stored.students.iter().all(|s| s.assigned_staff == Some(7)));
        Ok(())
    }

    #[test]
    fn test_edit_and_delete_students() -> Result<()> {
        let dir = tempdir()?;
        let config = config_in(dir.path());
        JsonFileStore::new(&config.storage.data_dir).save(&seeded_snapshot())?;

        run_args(
            &["edit", "--student", "5", "--phone", "9000000001", "--status", "interested"],
            &config,
        )?;
        run_args(&["delete", "--student", "4"], &config)?;
        run_args(&["search", "vikram", "--category", "OC"], &config)?;

        let stored = JsonFileStore::new(&config.storage.data_dir).load();
        let vikram = stored.students.iter().find(|s| s.id == 5).unwrap();
        assert_eq!(vikram.phone, "9000000001");
        assert_eq!(vikram.status, ContactStatus::Interested);
        assert_eq!(vikram.name, "Vikram Singh");
        assert!(stored.students.iter().all(|s| s.id != 4));
        Ok(())
    }
}
