use std::fs;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use drg_cli::config::Settings;
use drg_cli::logging::redact_value;
use drg_core::{
    RuleDraft, SubmissionError, SubmissionForm, clear_records, create_rule, find_record, login,
    logout, provision_doctor, require_admin, require_user, reset_with_demo_data, set_rule_active,
    submit, update_max_cost, update_user, visible_records,
};
use drg_extract::{Extraction, review};
use drg_model::{DrgRule, RecordStatus, User};
use drg_report::{export_csv, submissions_by_doctor, summarize};
use drg_store::{FileStore, RecordStore, RuleStore, SessionStore, UserStore};

use crate::cli::{
    Command, DemoArgs, ExtractArgs, NoteArgs, RecordsArgs, RecordsCommand, ReportArgs,
    RulesCommand, StatusArg, SubmitArgs, UsersCommand,
};
use crate::summary::{
    print_extraction, print_record_detail, print_records, print_rejection, print_report,
    print_rules, print_stored, print_users,
};

/// Process exit status for a rejected request.
const REJECTED: i32 = 1;

pub fn run(command: Command, store: &mut FileStore, settings: &Settings) -> Result<i32> {
    match command {
        Command::Login { username } => {
            let user = login(store, &username)?;
            println!("Logged in as {} ({}).", user.username, user.role.label());
            Ok(0)
        }
        Command::Logout => {
            logout(store)?;
            println!("Logged out.");
            Ok(0)
        }
        Command::Whoami => run_whoami(store),
        Command::Rules(command) => run_rules(command, store),
        Command::Users(command) => run_users(command, store),
        Command::Submit(args) => run_submit(args, store, settings),
        Command::Extract(args) => run_extract(&args, store, settings),
        Command::Records(args) => run_records(&args, store),
        Command::Report(args) => run_report(&args, store),
        Command::Export { path } => {
            require_admin(store)?;
            let records = store.list_records()?;
            export_csv(&records, &path)?;
            println!("Exported {} records to {}.", records.len(), path.display());
            Ok(0)
        }
        Command::Demo(args) => run_demo(&args, store),
        Command::Clear { yes } => {
            require_admin(store)?;
            if !yes {
                eprintln!("Refusing to delete all records without --yes.");
                return Ok(REJECTED);
            }
            clear_records(store)?;
            println!("All records deleted.");
            Ok(0)
        }
    }
}

fn run_whoami(store: &FileStore) -> Result<i32> {
    match store.current_user()? {
        Some(user) => {
            println!("{} ({}) - {}", user.username, user.role.label(), user.clinic_name);
            Ok(0)
        }
        None => {
            println!("Not logged in.");
            Ok(REJECTED)
        }
    }
}

fn find_rule(store: &FileStore, rule_id: &str) -> Result<DrgRule> {
    store
        .list_rules()?
        .into_iter()
        .find(|rule| rule.id == rule_id)
        .ok_or_else(|| anyhow!("no rule with id {rule_id}; run `drg rules list`"))
}

fn run_rules(command: RulesCommand, store: &mut FileStore) -> Result<i32> {
    match command {
        RulesCommand::List { all } => {
            let user = require_user(store)?;
            let mut rules = store.list_rules()?;
            if !(all && user.is_admin()) {
                rules.retain(|rule| rule.is_active);
            }
            print_rules(&rules);
        }
        RulesCommand::Add { file } => {
            require_admin(store)?;
            let text = fs::read_to_string(&file)
                .with_context(|| format!("read rule draft {}", file.display()))?;
            let draft: RuleDraft = toml::from_str(&text)
                .with_context(|| format!("parse rule draft {}", file.display()))?;
            let rule = create_rule(store, &draft)?;
            println!("Created rule {} ({}).", rule.id, rule.drg_code);
            print_rules(std::slice::from_ref(&rule));
        }
        RulesCommand::SetCost { rule_id, max_cost } => {
            require_admin(store)?;
            let rule = update_max_cost(store, &rule_id, max_cost)?;
            println!("{} now capped at {}.", rule.drg_code, rule.max_cost);
        }
        RulesCommand::Activate { rule_id } => {
            require_admin(store)?;
            let rule = set_rule_active(store, &rule_id, true)?;
            println!("{} is active.", rule.drg_code);
        }
        RulesCommand::Deactivate { rule_id } => {
            require_admin(store)?;
            let rule = set_rule_active(store, &rule_id, false)?;
            println!("{} is inactive.", rule.drg_code);
        }
    }
    Ok(0)
}

fn run_users(command: UsersCommand, store: &mut FileStore) -> Result<i32> {
    require_admin(store)?;
    match command {
        UsersCommand::List => print_users(&store.list_users()?),
        UsersCommand::Add { username, clinic } => {
            let user = provision_doctor(store, &username, &clinic)?;
            println!("Created doctor {} ({}).", user.username, user.id);
        }
        UsersCommand::Update {
            user_id,
            username,
            clinic,
        } => {
            let existing = store
                .list_users()?
                .into_iter()
                .find(|user| user.id == user_id)
                .ok_or_else(|| anyhow!("no user with id {user_id}"))?;
            let user = update_user(
                store,
                User {
                    username: username.unwrap_or_else(|| existing.username.clone()),
                    clinic_name: clinic.unwrap_or_else(|| existing.clinic_name.clone()),
                    ..existing
                },
            )?;
            println!("Updated {} ({}).", user.username, user.clinic_name);
        }
    }
    Ok(0)
}

fn read_note(args: &NoteArgs) -> Result<Option<String>> {
    if let Some(note) = &args.note {
        return Ok(Some(note.clone()));
    }
    match &args.note_file {
        Some(path) => fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("read note {}", path.display())),
        None => Ok(None),
    }
}

fn run_extraction(settings: &Settings, note: &str, rule: &DrgRule) -> Result<Option<Extraction>> {
    let extractor = settings.extractor.build()?;
    trace!(note = %redact_value(note), "extracting from note");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let extraction = runtime
        .block_on(extractor.extract(note, rule))
        .with_context(|| format!("{} extraction failed", extractor.name()))?;
    debug!(
        extractor = extractor.name(),
        found = extraction.as_ref().map_or(0, |e| e.metrics.len()),
        "extraction finished"
    );
    Ok(extraction)
}

fn run_extract(args: &ExtractArgs, store: &FileStore, settings: &Settings) -> Result<i32> {
    require_user(store)?;
    let rule = find_rule(store, &args.rule)?;
    let Some(note) = read_note(&args.note)? else {
        bail!("provide --note or --note-file");
    };
    match run_extraction(settings, &note, &rule)? {
        Some(extraction) => {
            let feedback = review(&rule, &extraction);
            print_extraction(&rule, &extraction, &feedback);
            Ok(if feedback.success { 0 } else { REJECTED })
        }
        None => {
            println!("No metric values or cost found in the note.");
            Ok(REJECTED)
        }
    }
}

fn build_form(args: SubmitArgs) -> SubmissionForm {
    let mut form = SubmissionForm::new(args.date.unwrap_or_else(|| Local::now().date_naive()));
    form.patient_name = args.patient_name;
    form.patient_id = args.patient_id;
    form.age = args.age;
    form.gender = args.gender;
    form.ethnicity = args.ethnicity;
    form.contact_number = args.contact;
    form.allergy_history = args.allergies;
    form.past_medical_history = args.history;
    form.metrics = args.metrics.into_iter().collect();
    form.total_cost = args.cost;
    form
}

fn run_submit(args: SubmitArgs, store: &mut FileStore, settings: &Settings) -> Result<i32> {
    let user = require_user(store)?;
    let rule = find_rule(store, &args.rule)?;
    let note = read_note(&args.note)?;
    let mut form = build_form(args);

    if let Some(note) = note {
        match run_extraction(settings, &note, &rule)? {
            Some(extraction) => {
                form.apply_extraction(&extraction);
                eprintln!("Pre-filled from note: {}", review(&rule, &extraction).message);
            }
            None => eprintln!("Nothing found in the note; using the values given."),
        }
    }

    debug!(
        patient = %redact_value(&form.patient_name),
        patient_id = %redact_value(&form.patient_id),
        rule_id = %rule.id,
        "submitting record"
    );
    match submit(store, &user, &rule, &form) {
        Ok(record) => {
            print_stored(&record);
            Ok(0)
        }
        Err(SubmissionError::RuleViolation { messages }) => {
            print_rejection(&messages);
            Ok(REJECTED)
        }
        Err(SubmissionError::Store(error)) => Err(error.into()),
        Err(error) => {
            eprintln!("Submission rejected: {error}");
            Ok(REJECTED)
        }
    }
}

fn run_records(args: &RecordsArgs, store: &FileStore) -> Result<i32> {
    let user = require_user(store)?;
    if let Some(RecordsCommand::Show { record_id }) = &args.command {
        let record = find_record(store, &user, record_id)?;
        let rule = store
            .list_rules()?
            .into_iter()
            .find(|rule| rule.id == record.disease_id);
        if rule.is_none() {
            debug!(rule_id = %record.disease_id, "record refers to a rule that no longer exists");
        }
        print_record_detail(&record, rule.as_ref());
        return Ok(0);
    }
    let status = args.status.map(|status| match status {
        StatusArg::Compliant => RecordStatus::Compliant,
        StatusArg::Flagged => RecordStatus::Flagged,
    });
    print_records(&visible_records(store, &user, status)?);
    Ok(0)
}

fn run_report(args: &ReportArgs, store: &FileStore) -> Result<i32> {
    require_admin(store)?;
    let records = store.list_records()?;
    let summary = summarize(&records);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&summary, &submissions_by_doctor(&records));
    }
    Ok(0)
}

fn run_demo(args: &DemoArgs, store: &mut FileStore) -> Result<i32> {
    require_admin(store)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let records = reset_with_demo_data(store, args.count, &mut rng)?;
    let flagged = records.iter().filter(|record| !record.is_compliant()).count();
    info!(count = records.len(), flagged, "replaced records with demo data");
    println!(
        "Generated {} synthetic records ({} flagged). Previous records were replaced.",
        records.len(),
        flagged
    );
    Ok(0)
}
