use std::path::Path;

use crate::error::LoadError;
use crate::layout::normalize::parse_progress;
use crate::model::{CategoryColumn, ColumnKind, DataView, MeasureColumn};

/// Semantic role of a CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Category,
    Task,
    Start,
    End,
    PlannedStart,
    PlannedEnd,
    Milestone,
    Progress,
}

impl Role {
    /// Positional order of the category columns handed to the layout engine.
    const POSITIONAL: [Role; 7] = [
        Role::Category,
        Role::Task,
        Role::Start,
        Role::End,
        Role::PlannedStart,
        Role::PlannedEnd,
        Role::Milestone,
    ];

    fn placeholder_name(self) -> &'static str {
        match self {
            Role::Category => "Category",
            Role::Task => "Task",
            Role::Start => "Start",
            Role::End => "End",
            Role::PlannedStart => "Planned start",
            Role::PlannedEnd => "Planned end",
            Role::Milestone => "Milestone",
            Role::Progress => "Progress",
        }
    }

    fn kind(self) -> ColumnKind {
        match self {
            Role::Category | Role::Task => ColumnKind::Label,
            _ => ColumnKind::Date,
        }
    }
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons > commas && semicolons >= tabs {
        b';'
    } else if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_role(normalized: &str) -> Option<Role> {
    match normalized {
        "category" | "phase" | "group" | "stage" | "section" | "workstream" => Some(Role::Category),

        "task" | "name" | "tasklabel" | "taskname" | "label" | "title" | "activity" => {
            Some(Role::Task)
        }

        "start" | "startdate" | "actualstart" | "from" | "begin" | "begindate" => Some(Role::Start),

        "end" | "enddate" | "actualend" | "to" | "finish" | "finishdate" | "due" | "duedate" => {
            Some(Role::End)
        }

        "plannedstart" | "plannedstartdate" | "planstart" | "baselinestart" => {
            Some(Role::PlannedStart)
        }

        "plannedend" | "plannedenddate" | "plannedfinish" | "planend" | "baselineend"
        | "baselinefinish" => Some(Role::PlannedEnd),

        "milestone" | "milestonedate" | "deadline" => Some(Role::Milestone),

        "progress" | "percentcomplete" | "%complete" | "complete" | "pct" => Some(Role::Progress),

        _ => None,
    }
}

/// Load a CSV file into a positional [`DataView`].
pub fn load_csv(path: &Path) -> Result<DataView, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let view = parse_csv(&content)?;
    tracing::info!(
        path = %path.display(),
        rows = view.row_count(),
        "loaded CSV"
    );
    Ok(view)
}

/// Parse CSV text into a positional [`DataView`].
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column headers
/// flexibly (e.g. "Task Name", "Planned Start", "% Complete"). Absent optional
/// roles become empty columns so every later column keeps its position; the
/// category column is the only one left out entirely when missing.
pub fn parse_csv(content: &str) -> Result<DataView, LoadError> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();

    // First header claiming a role wins.
    let mut columns: Vec<(Role, usize, String)> = Vec::new();
    for (position, header) in headers.iter().enumerate() {
        if let Some(role) = header_to_role(&normalize_header(header)) {
            if !columns.iter().any(|(r, _, _)| *r == role) {
                columns.push((role, position, header.to_string()));
            }
        }
    }
    let find = |role: Role| columns.iter().find(|(r, _, _)| *r == role);

    let missing: Vec<&str> = [Role::Task, Role::Start, Role::End]
        .into_iter()
        .filter(|role| find(*role).is_none())
        .map(Role::placeholder_name)
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            missing: missing.join(", "),
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(line = i + 2, error = %e, "skipping CSV row"),
        }
    }
    if records.is_empty() {
        return Err(LoadError::NoRows);
    }

    let cells = |position: usize| -> Vec<String> {
        records
            .iter()
            .map(|record| record.get(position).unwrap_or("").to_string())
            .collect()
    };

    let mut categories = Vec::new();
    for role in Role::POSITIONAL {
        match find(role) {
            Some((_, position, header)) => {
                categories.push(CategoryColumn::new(header.clone(), role.kind(), cells(*position)));
            }
            None if role == Role::Category => {}
            None => {
                tracing::debug!(
                    column = role.placeholder_name(),
                    "adding empty placeholder column"
                );
                categories.push(CategoryColumn::new(
                    role.placeholder_name(),
                    role.kind(),
                    Vec::<String>::new(),
                ));
            }
        }
    }

    let progress = match find(Role::Progress) {
        Some((_, position, header)) => MeasureColumn::new(
            header.clone(),
            cells(*position).iter().map(|c| parse_progress(c)).collect(),
        ),
        None => MeasureColumn::new(Role::Progress.placeholder_name(), vec![None; records.len()]),
    };

    Ok(DataView {
        categories,
        values: vec![progress],
    })
}
