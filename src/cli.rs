use clap::{Args, Parser, Subcommand};

use crate::grade::Grade;
use crate::models::Track;

#[derive(Parser, Debug, Clone)]
#[command(name = "joluv")]
#[command(version)]
#[command(about = "Course history, credits and graduation progress for KNU students", long_about = None)]
pub struct Cli {
    /// Backend origin, overriding JOLUV_API_BASE
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render the page at a path, e.g. `/checklist`
    Open(OpenArgs),
    /// Log in and keep the session for later commands
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long, env = "JOLUV_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        student_id: Option<String>,
        #[arg(long)]
        major: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Check the stored session against the backend
    Whoami,
    /// Course history and lecture search
    #[command(subcommand)]
    Courses(CoursesCommand),
    /// Graduation requirement checklist
    Checklist {
        #[arg(long, default_value = "multiMajor")]
        track: Track,
        /// Show the courses counted toward each requirement
        #[arg(long)]
        expand: bool,
    },
    /// Credits and GPA per semester
    Summary,
    /// Career and extracurricular records
    #[command(subcommand)]
    Activity(ActivityCommand),
    /// Student profile
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Args, Debug, Clone)]
pub struct OpenArgs {
    pub path: String,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value = "multiMajor")]
    pub track: Track,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// School year of the lecture (1-4)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub grade: Option<u8>,
    #[arg(long)]
    pub semester: Option<String>,
    #[arg(long)]
    pub keyword: Option<String>,
    /// Search the curriculum standard list instead of the open lecture list
    #[arg(long)]
    pub standard: bool,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CoursesCommand {
    /// Courses already taken
    Mine {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Search(SearchArgs),
    Add {
        lecture_id: String,
        /// Received letter grade (A+, A0, ..., F, P, NP)
        #[arg(long)]
        grade: Option<Grade>,
    },
    Remove {
        lecture_id: String,
    },
    /// Change the received grade of a taken course
    Grade {
        lecture_id: String,
        grade: Grade,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ActivityArgs {
    /// e.g. competition, internship
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub detail: Option<String>,
    #[arg(long)]
    pub year: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ActivityCommand {
    List,
    Add(ActivityArgs),
    Edit {
        id: String,
        #[command(flatten)]
        fields: ActivityArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        major: Option<String>,
        #[arg(long)]
        track: Option<String>,
        #[arg(long)]
        english_score: Option<u32>,
        #[arg(long)]
        internship: Option<bool>,
    },
}
