// cli/src/cli/interactive.rs

// Prompts that need a line editor: confirmations, draft review and the
// assistant chat loop.

use std::thread;

use anyhow::{anyhow, Result};
use colored::Colorize;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use lifetrack_lib::{Generation, HealthBackend, PhrError};
use models::{DoctorDraft, PublicUser, RecordDraft, UserId, CHAT_APOLOGY, CHAT_SUGGESTIONS};

use crate::cli::forms::is_confirmation;

const EXIT_WORDS: &[&str] = &["exit", "quit", "bye"];

/// Reads one line. Ctrl-C and Ctrl-D read as an empty answer.
fn read_line(editor: &mut DefaultEditor, prompt: &str, initial: &str) -> Result<Option<String>> {
    match editor.readline_with_initial(prompt, (initial, "")) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn confirm(question: &str) -> Result<bool> {
    let mut editor = DefaultEditor::new()?;
    let answer = read_line(&mut editor, &format!("{} [y/N] ", question), "")?;
    Ok(answer.as_deref().is_some_and(is_confirmation))
}

/// What to do with a parsed voice draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    Save,
    Edit,
    Discard,
}

pub fn parse_review_choice(answer: &str) -> ReviewChoice {
    match answer.trim().to_ascii_lowercase().as_str() {
        "s" | "save" | "y" | "yes" => ReviewChoice::Save,
        "e" | "edit" => ReviewChoice::Edit,
        _ => ReviewChoice::Discard,
    }
}

pub fn review() -> Result<ReviewChoice> {
    let mut editor = DefaultEditor::new()?;
    let answer = read_line(&mut editor, "[s]ave, [e]dit or [d]iscard? ", "")?;
    Ok(answer.as_deref().map_or(ReviewChoice::Discard, parse_review_choice))
}

/// Prompts for a field with its current value pre-filled. A cleared line
/// unsets the field.
fn edit_field(editor: &mut DefaultEditor, label: &str, current: &Option<String>) -> Result<Option<String>> {
    let line = read_line(editor, &format!("{:<12} ", format!("{}:", label)), current.as_deref().unwrap_or(""))?;
    Ok(match line {
        Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Some(_) => None,
        None => current.clone(),
    })
}

pub fn edit_record_draft(draft: &RecordDraft) -> Result<RecordDraft> {
    let mut editor = DefaultEditor::new()?;
    let mut edited = draft.clone();
    edited.diagnosis = edit_field(&mut editor, "Diagnosis", &draft.diagnosis)?;

    let doctor_id = draft.doctor_id.map(|id| id.to_string());
    edited.doctor_id = match edit_field(&mut editor, "Doctor id", &doctor_id)? {
        Some(raw) => match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                println!("{}", format!("'{}' is not a doctor id, keeping {:?}", raw, draft.doctor_id).yellow());
                draft.doctor_id
            }
        },
        None => None,
    };

    edited.date = edit_field(&mut editor, "Date", &draft.date)?;
    edited.medication = edit_field(&mut editor, "Medication", &draft.medication)?;
    edited.dosage = edit_field(&mut editor, "Dosage", &draft.dosage)?;
    edited.follow_up_date = edit_field(&mut editor, "Follow-up", &draft.follow_up_date)?;
    Ok(edited)
}

pub fn edit_doctor_draft(draft: &DoctorDraft) -> Result<DoctorDraft> {
    let mut editor = DefaultEditor::new()?;
    let mut edited = draft.clone();
    edited.name = edit_field(&mut editor, "Name", &draft.name)?;
    edited.specialization = edit_field(&mut editor, "Specialty", &draft.specialization)?;
    let phone = draft.phone.clone().or_else(|| draft.contact_number.clone());
    edited.phone = edit_field(&mut editor, "Phone", &phone)?;
    edited.contact_number = None;
    edited.email = edit_field(&mut editor, "Email", &draft.email)?;
    Ok(edited)
}

fn is_exit(line: &str) -> bool {
    EXIT_WORDS.contains(&line.trim().to_ascii_lowercase().as_str())
}

/// What the chat prints for one answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTurn {
    Reply(String),
    Apology,
}

/// Reads questions on its own thread so the patient can keep typing while
/// an answer is in flight. Stops at an exit word, Ctrl-C or Ctrl-D.
fn read_questions(questions: UnboundedSender<String>) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if is_exit(message) {
            return Ok(());
        }
        let _ = editor.add_history_entry(message);
        if questions.send(message.to_string()).is_err() {
            return Ok(());
        }
    }
}

/// Sends every question to the assistant as it arrives. Questions may
/// overlap on the wire; an answer is shown only while its question is the
/// newest one asked, so a slow reply never lands after a newer one.
/// Returns once the questions end and the pending answers have settled.
pub async fn converse<B, F>(backend: &B, user_id: UserId, mut questions: UnboundedReceiver<String>, mut show: F)
where
    B: HealthBackend + ?Sized,
    F: FnMut(ChatTurn),
{
    let generation = Generation::new();
    let mut pending = FuturesUnordered::new();
    let mut asking = true;

    loop {
        tokio::select! {
            question = questions.recv(), if asking => match question {
                Some(message) => {
                    pending.push(generation.load_latest(async move { backend.chat(user_id, &message).await }));
                }
                None => asking = false,
            },
            Some(answer) = pending.next(), if !pending.is_empty() => match answer {
                Ok(reply) => {
                    if reply.fallback == Some(true) {
                        debug!("Assistant answered without the model");
                    }
                    show(ChatTurn::Reply(reply.response));
                }
                Err(PhrError::Stale) => debug!("Dropped the answer to a superseded question"),
                Err(e) => {
                    warn!("Chat request failed: {}", e);
                    show(ChatTurn::Apology);
                }
            },
            else => break,
        }
    }
}

fn print_turn(turn: ChatTurn) {
    let text = match turn {
        ChatTurn::Reply(response) => response,
        ChatTurn::Apology => CHAT_APOLOGY.to_string(),
    };
    println!("{} {}\n", "assistant>".green().bold(), text);
}

/// Chat with the health assistant until the patient leaves. Failed turns
/// print an apology and the conversation goes on.
pub async fn run_chat<B>(backend: &B, user: &PublicUser) -> Result<()>
where
    B: HealthBackend + ?Sized,
{
    println!("{}", format!("Hello {}, ask me about your health records.", user.name).cyan().bold());
    println!("Try one of these:");
    for suggestion in CHAT_SUGGESTIONS {
        println!("  * {}", suggestion);
    }
    println!("Type 'exit' to leave.\n");

    let (questions, received) = mpsc::unbounded_channel();
    let reader = thread::spawn(move || read_questions(questions));
    converse(backend, user.user_id, received, print_turn).await;
    reader.join().map_err(|_| anyhow!("Chat input thread panicked"))??;

    println!("Goodbye!");
    Ok(())
}
