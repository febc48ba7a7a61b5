//! What each command prints.
//!
//! Commands build one serializable report plus a [`HumanOutput`]. With
//! `--json` the report goes out inside a versioned envelope on stdout;
//! otherwise the human rendering is printed, unless `--quiet`.

use serde::Serialize;

use crate::error::{exit_codes, Error, Result};

pub const SCHEMA_VERSION: &str = "habit.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Details,
    Warnings,
    NextSteps,
}

impl Section {
    const ORDER: [Section; 3] = [Section::Details, Section::Warnings, Section::NextSteps];

    fn title(self) -> &'static str {
        match self {
            Section::Details => "Details",
            Section::Warnings => "Warnings",
            Section::NextSteps => "Next steps",
        }
    }
}

/// Plain-text rendering of a command result
#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    body: Vec<String>,
    summary: Vec<(String, String)>,
    notes: Vec<(Section, String)>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: Vec::new(),
            summary: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// A line printed right under the header (checklists, charts)
    pub fn push_line(&mut self, value: impl Into<String>) {
        self.body.push(value.into());
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.notes.push((Section::Details, value.into()));
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.notes.push((Section::Warnings, value.into()));
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.notes.push((Section::NextSteps, value.into()));
    }

    fn notes(&self, section: Section) -> Vec<String> {
        self.notes
            .iter()
            .filter(|(kind, _)| *kind == section)
            .map(|(_, note)| note.clone())
            .collect()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    next_steps: Vec<String>,
}

impl<T: Serialize> Envelope<'_, T> {
    fn print(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        return Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data: Some(data),
            error: None,
            warnings: human.map(|h| h.notes(Section::Warnings)).unwrap_or_default(),
            next_steps: human.map(|h| h.notes(Section::NextSteps)).unwrap_or_default(),
        }
        .print();
    }

    if let (false, Some(human)) = (options.quiet, human) {
        println!("{}", format_human(human));
    }
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);

    if json {
        return Envelope::<()> {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            data: None,
            error: Some(ErrorBody {
                message: err.to_string(),
                code: err.exit_code(),
                kind: error_kind(err),
                details: err.details(),
            }),
            warnings: Vec::new(),
            next_steps,
        }
        .print();
    }

    eprintln!("error: {err}");
    if let Some(hint) = next_steps.first() {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

/// Header, body, then one titled block per non-empty section
pub fn format_human(output: &HumanOutput) -> String {
    let mut blocks = vec![output.header.clone()];

    if !output.body.is_empty() {
        blocks.push(output.body.join("\n"));
    }

    if !output.summary.is_empty() {
        let items = output.summary.iter().map(|(key, value)| {
            if value.is_empty() {
                key.clone()
            } else {
                format!("{key}: {value}")
            }
        });
        blocks.push(titled_list("Summary", items));
    }

    for section in Section::ORDER {
        let notes = output.notes(section);
        if !notes.is_empty() {
            blocks.push(titled_list(section.title(), notes));
        }
    }

    blocks.join("\n\n")
}

/// First positional argument, for naming the command in error output
/// before clap has parsed anything.
pub fn infer_command_name_from_args() -> String {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--data-dir" {
            args.next();
            continue;
        }
        if !arg.starts_with('-') {
            return arg;
        }
    }
    "habit".to_string()
}

fn titled_list(title: &str, items: impl IntoIterator<Item = String>) -> String {
    let mut block = format!("{title}:");
    for item in items {
        block.push_str("\n- ");
        block.push_str(&item);
    }
    block
}

fn error_kind(err: &Error) -> &'static str {
    if err.exit_code() == exit_codes::USER_ERROR {
        "user_error"
    } else {
        "operation_failed"
    }
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::DataDirNotFound(_) => vec![
            "habit init".to_string(),
            "habit --data-dir <path> today".to_string(),
        ],
        Error::DataDirUnusable { .. } => vec!["choose another --data-dir".to_string()],
        Error::HabitNotFound(name) => vec![format!("add '{name}' to habits.txt, then retry")],
        Error::InvalidConfig(_) => vec!["fix habit.toml then retry".to_string()],
        _ => Vec::new(),
    }
}
