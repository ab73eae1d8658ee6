// cli/src/cli/handlers.rs

// One handler per command. Each takes the backend and the session it needs
// explicitly, prints its result and returns failures to the dispatcher.

use std::io::BufReader;

use anyhow::{anyhow, Result};
use colored::Colorize;
use log::info;

use lifetrack_lib::voice::{self, capture_transcript};
use lifetrack_lib::{views, HealthBackend, ReaderCapture, Session, SessionStore};
use models::{NewUser, PublicUser, RecordId};

use crate::cli::commands::{DoctorCommand, RecordCommand, RegisterArgs, TreatmentCommand, VoiceCommand};
use crate::cli::display;
use crate::cli::forms;
use crate::cli::interactive::{self, ReviewChoice};

fn print_heading(title: &str) {
    println!("{}", title.cyan().bold());
}

fn print_success(message: &str) {
    println!("{}", message.green());
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("  {}", line);
    }
}

/// Asks before a destructive call unless `--yes` was given.
fn confirmed(yes: bool, question: &str) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let answer = interactive::confirm(question)?;
    if !answer {
        println!("Cancelled.");
    }
    Ok(answer)
}

pub async fn ping<B: HealthBackend + ?Sized>(backend: &B) -> Result<()> {
    let status = backend.health_check().await?;
    print_success(&format!("Backend is {}", status.status));
    if let Some(message) = status.message {
        println!("  {}", message);
    }
    Ok(())
}

pub async fn register<B: HealthBackend + ?Sized>(backend: &B, args: RegisterArgs) -> Result<()> {
    let form = NewUser {
        name: args.name,
        age: args.age,
        gender: args.gender,
        contact_number: args.contact_number,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    form.validate()?;
    backend.register(&form).await?;
    info!("Registered {}", form.email);
    print_success("Registration successful! Please log in.");
    Ok(())
}

pub async fn login<B, S>(backend: &B, session: &mut Session<S>, email: &str, password: &str) -> Result<()>
where
    B: HealthBackend + ?Sized,
    S: SessionStore,
{
    let user = views::login(backend, email, password).await?;
    let name = user.name.clone();
    session.login(user)?;
    print_success(&format!("Welcome back, {}!", name));
    Ok(())
}

pub fn logout<S: SessionStore>(session: &mut Session<S>) -> Result<()> {
    session.logout()?;
    print_success("Logged out.");
    Ok(())
}

pub fn whoami<S: SessionStore>(session: &Session<S>) {
    match session.current() {
        Some(user) => println!("{}", display::format_user(user)),
        None => println!("Not logged in."),
    }
}

pub async fn home<B: HealthBackend + ?Sized>(backend: &B, user: &PublicUser) -> Result<()> {
    let (summary, doctors) = views::home_summary_with_doctors(backend, user.user_id).await?;
    print_heading(&format!("Welcome, {}", user.name));
    print_lines(&display::summary_lines(&summary));
    if summary.recent_records.is_empty() {
        println!("\nNo health records yet.");
        return Ok(());
    }
    println!();
    print_heading("Recent records");
    for record in &summary.recent_records {
        println!("  {}", display::format_record(record, &doctors));
    }
    Ok(())
}

pub async fn dashboard<B: HealthBackend + ?Sized>(backend: &B) -> Result<()> {
    let counts = views::system_counts(backend).await?;
    print_heading("LifeTrack dashboard");
    print_lines(&display::count_lines(&counts));
    Ok(())
}

pub async fn doctors<B: HealthBackend + ?Sized>(backend: &B, user: &PublicUser, command: DoctorCommand) -> Result<()> {
    match command {
        DoctorCommand::List => {
            let doctors = backend.fetch_doctors().await?;
            print_heading(&format!("Doctors ({})", doctors.len()));
            for doctor in &doctors {
                println!("  {}", display::format_doctor(doctor));
            }
        }
        DoctorCommand::Visited => {
            let doctors = views::doctors_visited_by_user(backend, user.user_id).await?;
            if doctors.is_empty() {
                println!("You have not visited any doctors yet.");
            }
            for doctor in &doctors {
                println!("  {}", display::format_doctor(doctor));
            }
        }
        DoctorCommand::Add(fields) => {
            let doctor = forms::new_doctor(&fields)?;
            let ack = backend.add_doctor(&doctor).await?;
            print_success(&format!("Doctor {} added{}", doctor.name, id_suffix(ack.doctor_id)));
        }
        DoctorCommand::Update { id, fields } => {
            let doctors = backend.fetch_doctors().await?;
            let existing = doctors
                .iter()
                .find(|doctor| doctor.doctor_id == id)
                .ok_or_else(|| anyhow!("Doctor #{} not found", id))?;
            backend.update_doctor(id, &forms::updated_doctor(existing, &fields)).await?;
            print_success(&format!("Doctor #{} updated", id));
        }
        DoctorCommand::Delete { id, yes } => {
            let question = format!(
                "Delete doctor #{}? The backend may also remove health records and treatments linked to this doctor.",
                id
            );
            if confirmed(yes, &question)? {
                backend.delete_doctor(id).await?;
                print_success(&format!("Doctor #{} deleted", id));
            }
        }
    }
    Ok(())
}

pub async fn records<B: HealthBackend + ?Sized>(backend: &B, user: &PublicUser, command: RecordCommand) -> Result<()> {
    match command {
        RecordCommand::List => {
            let (records, doctors) = views::user_records_with_doctors(backend, user.user_id).await?;
            print_heading(&format!("Health records ({})", records.len()));
            for record in &records {
                println!("  {}", display::format_record(record, &doctors));
            }
        }
        RecordCommand::Add(fields) => {
            let record = forms::new_health_record(&fields, user.user_id)?;
            let ack = backend.add_health_record(&record).await?;
            print_success(&format!("Health record added{}", id_suffix(ack.record_id)));
        }
        RecordCommand::Update { id, fields } => {
            let records = views::user_health_records(backend, user.user_id).await?;
            let existing = records
                .iter()
                .find(|record| record.record_id == id)
                .ok_or_else(|| anyhow!("Health record #{} not found", id))?;
            backend.update_health_record(id, &forms::updated_health_record(existing, &fields)?).await?;
            print_success(&format!("Health record #{} updated", id));
        }
        RecordCommand::Delete { id, yes } => {
            ensure_own_record(backend, user, id).await?;
            if confirmed(yes, &format!("Delete health record #{}?", id))? {
                backend.delete_health_record(id).await?;
                print_success(&format!("Health record #{} deleted", id));
            }
        }
    }
    Ok(())
}

pub async fn treatments<B: HealthBackend + ?Sized>(
    backend: &B,
    user: &PublicUser,
    command: TreatmentCommand,
) -> Result<()> {
    match command {
        TreatmentCommand::List => {
            let treatments = views::user_treatments(backend, user.user_id).await?;
            print_heading(&format!("Treatments ({})", treatments.len()));
            for treatment in &treatments {
                println!("  {}", display::format_treatment(treatment));
            }
        }
        TreatmentCommand::History => {
            let history = views::user_treatment_history(backend, user.user_id).await?;
            print_heading("Treatment history");
            if history.is_empty() {
                println!("  No treatments recorded.");
            }
            for entry in &history {
                println!("  {}", display::format_history_entry(entry));
            }
        }
        TreatmentCommand::Add(fields) => {
            let treatment = forms::new_treatment(&fields)?;
            ensure_own_record(backend, user, treatment.record_id).await?;
            let ack = backend.add_treatment(&treatment).await?;
            print_success(&format!("Treatment added{}", id_suffix(ack.treatment_id)));
        }
        TreatmentCommand::Update { id, fields } => {
            let treatments = views::user_treatments(backend, user.user_id).await?;
            let existing = treatments
                .iter()
                .find(|treatment| treatment.treatment_id == id)
                .ok_or_else(|| anyhow!("Treatment #{} not found", id))?;
            let updated = forms::updated_treatment(existing, &fields)?;
            if updated.record_id != existing.record_id {
                ensure_own_record(backend, user, updated.record_id).await?;
            }
            backend.update_treatment(id, &updated).await?;
            print_success(&format!("Treatment #{} updated", id));
        }
        TreatmentCommand::Delete { id, yes } => {
            let treatments = views::user_treatments(backend, user.user_id).await?;
            if !treatments.iter().any(|treatment| treatment.treatment_id == id) {
                return Err(anyhow!("Treatment #{} not found", id));
            }
            if confirmed(yes, &format!("Delete treatment #{}?", id))? {
                backend.delete_treatment(id).await?;
                print_success(&format!("Treatment #{} deleted", id));
            }
        }
    }
    Ok(())
}

async fn ensure_own_record<B: HealthBackend + ?Sized>(backend: &B, user: &PublicUser, record_id: RecordId) -> Result<()> {
    let records = views::user_health_records(backend, user.user_id).await?;
    if records.iter().any(|record| record.record_id == record_id) {
        Ok(())
    } else {
        Err(anyhow!("Health record #{} not found", record_id))
    }
}

pub async fn insights<B: HealthBackend + ?Sized>(backend: &B, user: &PublicUser) -> Result<()> {
    println!("Analyzing your health data...");
    let response = backend.health_insights(user.user_id).await?;
    if !response.success {
        let message = response.message.unwrap_or_else(|| "Failed to fetch health insights".to_string());
        return Err(anyhow!(message));
    }
    print_heading("Health insights");
    print_lines(&display::insight_lines(&response.insights));
    Ok(())
}

/// The transcript from `--text`, or dictated on stdin until a blank line.
async fn transcript(text: Option<String>) -> Result<String> {
    if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
        return Ok(text);
    }
    println!("Dictate now. Finish with an empty line.");
    let mut capture = ReaderCapture::new(BufReader::new(std::io::stdin()));
    Ok(capture_transcript(&mut capture).await?)
}

pub async fn dictate<B: HealthBackend + ?Sized>(backend: &B, user: &PublicUser, command: VoiceCommand) -> Result<()> {
    match command {
        VoiceCommand::Record { text, yes } => {
            let text = transcript(text).await?;
            let mut draft = voice::parse_record_draft(backend, &text, user.user_id).await?;
            loop {
                print_heading("Parsed record");
                print_lines(&display::record_draft_lines(&draft));
                let choice = if yes { ReviewChoice::Save } else { interactive::review()? };
                match choice {
                    ReviewChoice::Save => break,
                    ReviewChoice::Edit => draft = interactive::edit_record_draft(&draft)?,
                    ReviewChoice::Discard => {
                        println!("Discarded.");
                        return Ok(());
                    }
                }
            }
            let saved = voice::save_record_draft(backend, &draft, user.user_id).await?;
            print_success(&format!("Health record saved{}", id_suffix(saved.record.record_id)));
            if let Some(treatment) = saved.treatment {
                print_success(&format!("Treatment saved{}", id_suffix(treatment.treatment_id)));
            }
        }
        VoiceCommand::Doctor { text, yes } => {
            let text = transcript(text).await?;
            let mut draft = voice::parse_doctor_draft(backend, &text, user.user_id).await?;
            loop {
                print_heading("Parsed doctor");
                print_lines(&display::doctor_draft_lines(&draft));
                let choice = if yes { ReviewChoice::Save } else { interactive::review()? };
                match choice {
                    ReviewChoice::Save => break,
                    ReviewChoice::Edit => draft = interactive::edit_doctor_draft(&draft)?,
                    ReviewChoice::Discard => {
                        println!("Discarded.");
                        return Ok(());
                    }
                }
            }
            let ack = voice::save_doctor_draft(backend, &draft).await?;
            print_success(&format!("Doctor saved{}", id_suffix(ack.doctor_id)));
        }
    }
    Ok(())
}

fn id_suffix(id: Option<i64>) -> String {
    id.map(|id| format!(" (#{})", id)).unwrap_or_default()
}
