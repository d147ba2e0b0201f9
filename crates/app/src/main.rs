use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use api::ApiClient;
use clinic_core::model::{
    ChapterNumber, Credentials, Gender, Patient, PatientDraft, PatientId, Registration,
};
use clinic_core::progress::Grain;
use services::{Clock, ReportService, WordProgress, WordProgressService};

#[derive(Parser)]
#[command(
    name = "clinic",
    about = "Speech therapy clinic workstation: patients, chapters, and practice progress",
    version
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and print session tokens
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },

    /// Register a clinician account (the SLMC id doubles as the username)
    Register {
        first_name: String,
        last_name: String,
        slmc_id: String,
        password: String,
    },

    /// Manage patients
    #[command(subcommand)]
    Patients(PatientsCommand),

    /// Browse the phoneme curriculum
    #[command(subcommand)]
    Chapters(ChaptersCommand),

    /// Aggregated practice progress for one word
    Progress {
        patient: PatientId,
        chapter: ChapterNumber,
        word: String,

        /// Bucket trials by week or by month
        #[arg(long, default_value_t = Grain::Weekly)]
        grain: Grain,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Render a patient's Markdown progress report
    Report { patient: PatientId },
}

#[derive(Subcommand)]
enum PatientsCommand {
    /// List every patient
    List,

    /// Search patients by name or clinic code
    Search { query: String },

    /// Show one patient with their progress statistics
    Show { id: PatientId },

    /// Register a new patient; the first visit is dated today
    Create {
        full_name: String,
        id: PatientId,
        gender: Gender,
    },

    /// Update a patient's details, keeping their original first visit
    Update {
        id: PatientId,
        full_name: String,
        gender: Gender,
    },

    /// Remove a patient and their practice history
    Delete { id: PatientId },
}

#[derive(Subcommand)]
enum ChaptersCommand {
    /// List every chapter of the curriculum
    List,

    /// Practice words of one chapter
    Words { number: ChapterNumber },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = ApiClient::from_env().context("invalid backend configuration")?;
    tracing::debug!(base_url = %client.config().base_url, "clinic backend configured");

    match cli.command {
        Command::Login { username, password } => login(&client, username, password).await,
        Command::Register {
            first_name,
            last_name,
            slmc_id,
            password,
        } => register(&client, first_name, last_name, slmc_id, password).await,
        Command::Patients(command) => patients(&client, command).await,
        Command::Chapters(command) => chapters(&client, command).await,
        Command::Progress {
            patient,
            chapter,
            word,
            grain,
            format,
        } => progress(&client, &patient, chapter, &word, grain, format).await,
        Command::Report { patient } => report(&client, &patient).await,
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn login(client: &ApiClient, username: String, password: String) -> Result<()> {
    let tokens = client
        .login(&Credentials { username, password })
        .await
        .context("login failed")?;
    let profile = client
        .clone()
        .with_token(&tokens.access)
        .profile()
        .await
        .context("could not fetch the clinician profile")?;

    println!("Welcome, {}", profile.display_name());
    println!();
    println!("access:  {}", tokens.access);
    println!("refresh: {}", tokens.refresh);
    println!();
    println!("Export CLINIC_API_TOKEN with the access token for authenticated commands.");
    Ok(())
}

async fn register(
    client: &ApiClient,
    first_name: String,
    last_name: String,
    slmc_id: String,
    password: String,
) -> Result<()> {
    let registration = Registration::new(first_name, last_name, slmc_id, password.clone(), password);
    let profile = client
        .register(&registration)
        .await
        .context("registration failed")?;
    println!(
        "Registered {} (username {})",
        profile.display_name(),
        profile.username
    );
    Ok(())
}

async fn patients(client: &ApiClient, command: PatientsCommand) -> Result<()> {
    match command {
        PatientsCommand::List => {
            for patient in client.patients().await.context("could not list patients")? {
                print_patient_row(&patient);
            }
        }
        PatientsCommand::Search { query } => {
            let matches = client
                .search_patients(&query)
                .await
                .context("patient search failed")?;
            if matches.is_empty() {
                println!("No patients match {query:?}");
            }
            for patient in matches {
                print_patient_row(&patient);
            }
        }
        PatientsCommand::Show { id } => {
            let patient = client.patient(&id).await.context("could not fetch patient")?;
            let summary = client
                .patient_summary(&id)
                .await
                .context("could not fetch patient summary")?;
            println!("{} ({})", patient.full_name, patient.patient_id);
            println!("  gender:       {}", patient.gender);
            println!("  first visit:  {}", patient.first_clinic_date);
            println!("  sessions:     {}", summary.statistics.total_sessions);
            println!("  avg accuracy: {}%", summary.statistics.average_accuracy);
            println!(
                "  phonemes:     {} mastered, {} in progress",
                summary.statistics.completed_phonemes, summary.statistics.in_progress_phonemes
            );
        }
        PatientsCommand::Create {
            full_name,
            id,
            gender,
        } => {
            let draft = PatientDraft {
                full_name,
                patient_id: id,
                gender,
                first_clinic_date: Some(Clock::default_clock().today()),
            };
            let patient = client
                .create_patient(&draft)
                .await
                .context("could not create patient")?;
            println!("Created {} ({})", patient.full_name, patient.patient_id);
        }
        PatientsCommand::Update {
            id,
            full_name,
            gender,
        } => {
            let draft = PatientDraft {
                full_name,
                patient_id: id.clone(),
                gender,
                first_clinic_date: None,
            };
            let patient = client
                .update_patient(&id, &draft)
                .await
                .context("could not update patient")?;
            println!("Updated {} ({})", patient.full_name, patient.patient_id);
        }
        PatientsCommand::Delete { id } => {
            client
                .delete_patient(&id)
                .await
                .context("could not delete patient")?;
            println!("Deleted {id}");
        }
    }
    Ok(())
}

fn print_patient_row(patient: &Patient) {
    println!(
        "{}  {}  {}  first visit {}",
        patient.patient_id, patient.full_name, patient.gender, patient.first_clinic_date
    );
}

async fn chapters(client: &ApiClient, command: ChaptersCommand) -> Result<()> {
    match command {
        ChaptersCommand::List => {
            for chapter in client.chapters().await.context("could not list chapters")? {
                println!("chapter {}  {}", chapter.id, chapter.phoneme);
            }
        }
        ChaptersCommand::Words { number } => {
            let words = client
                .chapter_word_list(number)
                .await
                .context("could not fetch chapter words")?;
            println!("chapter {number}  {}", words.phoneme);
            for word in &words.words {
                println!("  {word}");
            }
        }
    }
    Ok(())
}

async fn progress(
    client: &ApiClient,
    patient: &PatientId,
    chapter: ChapterNumber,
    word: &str,
    grain: Grain,
    format: OutputFormat,
) -> Result<()> {
    let service = WordProgressService::new(Arc::new(client.clone()));
    let progress = service
        .load(patient, chapter, word, grain)
        .await
        .context("could not load word progress")?
        .context("progress load was superseded")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&progress)?),
        OutputFormat::Table => print_progress_table(&progress),
    }
    Ok(())
}

fn print_progress_table(progress: &WordProgress) {
    println!(
        "{} - chapter {} ({}, {} buckets)",
        progress.word.to_uppercase(),
        progress.chapter,
        progress.phoneme,
        progress.grain
    );

    if progress.is_empty() {
        println!();
        println!("No progress data available");
    } else {
        println!();
        println!(
            "{:<18} {:>8} {:>7} {:>6} {:>6}",
            "Period", "Average", "Trials", "Best", "Worst"
        );
        for point in &progress.points {
            println!(
                "{:<18} {:>7}% {:>7} {:>5}% {:>5}%",
                point.label, point.accuracy, point.trials, point.best, point.worst
            );
        }

        if let Some(summary) = &progress.summary {
            println!();
            println!(
                "{} trials, average {}%, best {}%, worst {}%, improvement {}",
                summary.total_trials,
                summary.average_accuracy,
                summary.best_score,
                summary.worst_score,
                format_improvement(summary.improvement)
            );
        }
    }

    println!();
    if let Some(previous) = progress.previous_word() {
        println!("previous word: {previous}");
    }
    if let Some(next) = progress.next_word() {
        println!("next word: {next}");
    }
}

fn format_improvement(improvement: i64) -> String {
    if improvement > 0 {
        format!("+{improvement}%")
    } else {
        format!("{improvement}%")
    }
}

async fn report(client: &ApiClient, patient: &PatientId) -> Result<()> {
    let service = ReportService::new(Clock::default_clock(), Arc::new(client.clone()));
    let report = service
        .render(patient)
        .await
        .context("could not render the progress report")?;
    print!("{report}");
    Ok(())
}
