//! One-shot execution of a single command line.
//!
//! [`apply_line`] is the interpreter shared with the REPL: it resolves a
//! submitted line against the command registry, re-checks the command's
//! constraints on the finished line (what autocomplete merely discourages,
//! execution rejects), and applies the result to the record book.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::error::{JobdexError, Result as LibResult};
use crate::model::{ApplicationStatus, Contact, JobApplication};
use crate::parse::{self, ResolvedArgs};
use crate::schema::{slots, CommandRegistry, CommandSpec, Constraint};
use crate::storage::RecordBook;

/// Options for the run command
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// The command line to execute, e.g. `add n/Alice p/555123 e/a@b.c`.
    pub line: String,
    /// Record file
    pub data: PathBuf,
    /// Skip confirmation prompts
    pub assume_yes: bool,
}

/// What applying one line did.
#[derive(Debug, Clone, Default)]
pub struct LineOutcome {
    pub message: String,
    pub mutated: bool,
    pub quit: bool,
}

impl LineOutcome {
    fn info(message: String) -> Self {
        Self {
            message,
            ..Self::default()
        }
    }

    fn changed(message: String) -> Self {
        Self {
            message,
            mutated: true,
            quit: false,
        }
    }
}

/// Execute the run command
pub fn execute_run(options: RunOptions, registry: &CommandRegistry) -> Result<()> {
    let mut book = RecordBook::load(&options.data)?;
    let outcome = apply_line(&mut book, registry, &options.line, options.assume_yes)?;
    if !outcome.message.is_empty() {
        println!("{} {}", style("✓").green(), outcome.message);
    }
    if outcome.mutated {
        book.save(&options.data)?;
    }
    Ok(())
}

/// Apply one submitted line to the book.
pub fn apply_line(
    book: &mut RecordBook,
    registry: &CommandRegistry,
    text: &str,
    assume_yes: bool,
) -> LibResult<LineOutcome> {
    // A submitted line is complete; the trailing space closes the last
    // token so a lone word is read as a command word, not a fragment.
    let line = parse::tokenize(&format!("{text} "));
    let Some(word) = line.word.as_deref() else {
        return Ok(LineOutcome::default());
    };
    let spec = registry.get(word).ok_or_else(|| {
        JobdexError::Execution(format!("unknown command '{word}', try 'help'"))
    })?;

    let resolved = parse::resolve(&line, spec);
    if let Some(arg) = resolved.unknown.first() {
        return Err(JobdexError::Parse(format!(
            "'{word}' does not take the prefix {}",
            arg.prefix
        )));
    }
    if let Some(stray) = line.stray.first() {
        return Err(JobdexError::Parse(format!(
            "unexpected token '{stray}' in '{word}' command"
        )));
    }
    check_constraints(spec, &resolved)?;

    match word {
        "add" => add_contact(book, &resolved),
        "edit" => edit_contact(book, &resolved),
        "delete" => delete_contact(book, &resolved),
        "find" => find_contacts(book, &resolved),
        "list" => list_contacts(book, &resolved),
        "apply" => add_application(book, &resolved),
        "advance" => advance_application(book, &resolved),
        "apps" => list_applications(book, &resolved),
        "clear" => clear_book(book, assume_yes),
        "help" => Ok(LineOutcome::info(render_help(registry))),
        "exit" => Ok(LineOutcome {
            message: "Bye.".to_string(),
            mutated: false,
            quit: true,
        }),
        other => Err(JobdexError::Execution(format!(
            "command '{other}' is declared but not implemented"
        ))),
    }
}

/// Re-check the command's suggestion rules against the finished line.
/// Autocomplete can only steer; a pasted or hand-typed line still has to
/// obey the same rules.
fn check_constraints(spec: &CommandSpec, resolved: &ResolvedArgs) -> LibResult<()> {
    for constraint in spec.constraints() {
        match constraint {
            Constraint::OnceEach { ids } => {
                for id in ids {
                    if resolved.all(*id).len() > 1 {
                        return Err(JobdexError::Execution(format!(
                            "{} may be given at most once",
                            prefix_of(spec, *id)
                        )));
                    }
                }
            }
            Constraint::OneAmong { ids } => {
                let used: Vec<&str> = ids
                    .iter()
                    .filter(|id| resolved.has(**id))
                    .map(|id| prefix_of(spec, *id))
                    .collect();
                if used.len() > 1 {
                    return Err(JobdexError::Execution(format!(
                        "only one of {} may be used",
                        used.join(", ")
                    )));
                }
            }
            Constraint::Requires {
                prerequisite,
                dependents,
            } => {
                if !resolved.has(*prerequisite)
                    && dependents.iter().any(|d| resolved.has(*d))
                {
                    return Err(JobdexError::Execution(format!(
                        "{} is required first",
                        prefix_of(spec, *prerequisite)
                    )));
                }
            }
        }
    }
    Ok(())
}

fn prefix_of(spec: &CommandSpec, id: crate::schema::ArgId) -> &str {
    spec.slot(id).map(|s| s.prefix.as_str()).unwrap_or("?")
}

fn required<'a>(
    resolved: &'a ResolvedArgs,
    id: crate::schema::ArgId,
    prefix: &str,
) -> LibResult<&'a str> {
    resolved
        .single(id)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| JobdexError::Parse(format!("missing required {prefix}")))
}

fn add_contact(book: &mut RecordBook, resolved: &ResolvedArgs) -> LibResult<LineOutcome> {
    let name = required(resolved, slots::NAME, "n/")?;
    let phone = required(resolved, slots::PHONE, "p/")?;
    let email = required(resolved, slots::EMAIL, "e/")?;

    let mut contact = Contact::new(name, phone, email)?;
    if let Some(address) = resolved.single(slots::ADDRESS) {
        contact = contact.with_address(address);
    }
    for tag in resolved.all(slots::TAG) {
        if !tag.is_empty() {
            contact = contact.with_tag(tag);
        }
    }

    let summary = format!("Added contact {}: {}", book.contacts.len() + 1, contact.name);
    book.add_contact(contact);
    Ok(LineOutcome::changed(summary))
}

fn edit_contact(book: &mut RecordBook, resolved: &ResolvedArgs) -> LibResult<LineOutcome> {
    let index = parse_index(required(resolved, slots::INDEX, "i/")?)?;
    if resolved.present.len() < 2 {
        return Err(JobdexError::Parse(
            "edit needs at least one field to change".to_string(),
        ));
    }

    let contact = book.contact_mut(index)?;
    if let Some(name) = resolved.single(slots::NAME) {
        contact.set_name(name)?;
    }
    if let Some(phone) = resolved.single(slots::PHONE) {
        contact.set_phone(phone)?;
    }
    if let Some(email) = resolved.single(slots::EMAIL) {
        contact.set_email(email)?;
    }
    if let Some(address) = resolved.single(slots::ADDRESS) {
        contact.address = Some(address.to_string());
    }
    let tags = resolved.all(slots::TAG);
    if !tags.is_empty() {
        // Typed tags replace the whole set.
        contact.tags = tags.iter().filter(|t| !t.is_empty()).cloned().collect();
    }

    Ok(LineOutcome::changed(format!(
        "Updated contact {}: {}",
        index, contact.name
    )))
}

fn delete_contact(book: &mut RecordBook, resolved: &ResolvedArgs) -> LibResult<LineOutcome> {
    let index = parse_index(required(resolved, slots::INDEX, "i/")?)?;
    let contact = book.remove_contact(index)?;
    Ok(LineOutcome::changed(format!(
        "Deleted contact {}: {}",
        index, contact.name
    )))
}

fn find_contacts(book: &RecordBook, resolved: &ResolvedArgs) -> LibResult<LineOutcome> {
    let matches: Vec<(usize, &Contact)> = if let Some(keyword) = resolved.single(slots::KEYWORD)
    {
        book.contacts
            .iter()
            .enumerate()
            .filter(|(_, c)| c.matches_keyword(keyword))
            .map(|(i, c)| (i + 1, c))
            .collect()
    } else if let Some(tag) = resolved.single(slots::TAG) {
        book.contacts
            .iter()
            .enumerate()
            .filter(|(_, c)| c.has_tag(tag))
            .map(|(i, c)| (i + 1, c))
            .collect()
    } else {
        return Err(JobdexError::Parse(
            "find needs k/KEYWORD or t/TAG".to_string(),
        ));
    };

    Ok(LineOutcome::info(render_contacts(&matches)))
}

fn list_contacts(book: &RecordBook, resolved: &ResolvedArgs) -> LibResult<LineOutcome> {
    let rows: Vec<(usize, &Contact)> = book
        .contacts
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            resolved
                .single(slots::TAG)
                .map(|tag| c.has_tag(tag))
                .unwrap_or(true)
        })
        .map(|(i, c)| (i + 1, c))
        .collect();
    Ok(LineOutcome::info(render_contacts(&rows)))
}

fn add_application(book: &mut RecordBook, resolved: &ResolvedArgs) -> LibResult<LineOutcome> {
    let index = parse_index(required(resolved, slots::INDEX, "i/")?)?;
    let company = required(resolved, slots::COMPANY, "c/")?;
    let role = required(resolved, slots::ROLE, "r/")?;

    let contact_id = book.contact(index)?.id;
    let mut application = JobApplication::new(contact_id, company, role)?;
    if let Some(status) = resolved.single(slots::STATUS) {
        application = application.with_status(status.parse::<ApplicationStatus>()?);
    }
    if let Some(deadline) = resolved.single(slots::DEADLINE) {
        application = application.with_deadline(JobApplication::parse_deadline(deadline)?);
    }

    let summary = format!(
        "Recorded application {}: {} at {} ({})",
        book.applications.len() + 1,
        application.role,
        application.company,
        application.status
    );
    book.add_application(application);
    Ok(LineOutcome::changed(summary))
}

fn advance_application(book: &mut RecordBook, resolved: &ResolvedArgs) -> LibResult<LineOutcome> {
    let index = parse_index(required(resolved, slots::INDEX, "i/")?)?;
    let status = required(resolved, slots::STATUS, "s/")?.parse::<ApplicationStatus>()?;
    let application = book.application_mut(index)?;
    application.advance(status)?;
    Ok(LineOutcome::changed(format!(
        "Application {} is now {}",
        index, application.status
    )))
}

fn list_applications(book: &RecordBook, resolved: &ResolvedArgs) -> LibResult<LineOutcome> {
    let status_filter = resolved
        .single(slots::STATUS)
        .map(str::parse::<ApplicationStatus>)
        .transpose()?;
    let company_filter = resolved.single(slots::COMPANY);

    let mut lines = Vec::new();
    for (i, application) in book.applications.iter().enumerate() {
        if let Some(status) = status_filter {
            if application.status != status {
                continue;
            }
        }
        if let Some(company) = company_filter {
            if !application
                .company
                .to_lowercase()
                .contains(&company.to_lowercase())
            {
                continue;
            }
        }
        let who = book
            .contact_by_id(application.contact)
            .map(|c| c.name.as_str())
            .unwrap_or("(unlinked)");
        let deadline = application
            .deadline
            .map(|d| format!(", due {d}"))
            .unwrap_or_default();
        lines.push(format!(
            "{}. {} at {} — {} [{}{}]",
            i + 1,
            application.role,
            application.company,
            who,
            application.status,
            deadline
        ));
    }

    if lines.is_empty() {
        return Ok(LineOutcome::info("No applications found.".to_string()));
    }
    Ok(LineOutcome::info(lines.join("\n")))
}

fn clear_book(book: &mut RecordBook, assume_yes: bool) -> LibResult<LineOutcome> {
    if book.is_empty() {
        return Ok(LineOutcome::info("Nothing to clear.".to_string()));
    }
    if !assume_yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Delete every contact and application?")
            .default(false)
            .interact()
            .map_err(|e| JobdexError::Execution(format!("confirmation failed: {e}")))?;
        if !confirmed {
            return Ok(LineOutcome::info("Aborted.".to_string()));
        }
    }
    book.clear();
    Ok(LineOutcome::changed("All records deleted.".to_string()))
}

fn render_help(registry: &CommandRegistry) -> String {
    let mut lines = Vec::new();
    for spec in registry.iter() {
        let slots: Vec<String> = spec
            .slots()
            .iter()
            .map(|s| format!("{}{}", s.prefix, s.label.to_uppercase().replace(' ', "_")))
            .collect();
        if slots.is_empty() {
            lines.push(format!("{:10} {}", spec.word(), spec.description()));
        } else {
            lines.push(format!(
                "{:10} {} — {}",
                spec.word(),
                spec.description(),
                slots.join(" ")
            ));
        }
    }
    lines.join("\n")
}

fn render_contacts(rows: &[(usize, &Contact)]) -> String {
    if rows.is_empty() {
        return "No contacts found.".to_string();
    }
    rows.iter()
        .map(|(i, c)| {
            let tags = if c.tags.is_empty() {
                String::new()
            } else {
                format!(
                    " [{}]",
                    c.tags.iter().cloned().collect::<Vec<_>>().join(", ")
                )
            };
            let address = c
                .address
                .as_deref()
                .map(|a| format!(" — {a}"))
                .unwrap_or_default();
            format!("{i}. {} ({}, {}){address}{tags}", c.name, c.phone, c.email)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_index(value: &str) -> LibResult<usize> {
    value.trim().parse::<usize>().map_err(|_| {
        JobdexError::Parse(format!("'{value}' is not a positive index"))
    })
}
