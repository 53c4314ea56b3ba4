use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::draft::{DraftSession, DraftStatus};
use crate::models::champion::Champion;
use crate::models::draft_format::{ActionKind, Side};
use crate::models::recommendation::Recommendation;

pub struct Reply {
    messages: Vec<String>,
}

impl Reply {
    pub fn new() -> Self {
        Reply {
            messages: Vec::new(),
        }
    }

    pub fn add(&mut self, msg: String) {
        self.messages.push(msg);
    }

    pub fn add_boxed(&mut self, msg: String) {
        let width = msg.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let rule = "-".repeat(width);
        self.messages.push(format!("{}\n{}\n{}", rule, msg, rule));
    }
}

impl Display for Reply {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.messages.join("\n"))
    }
}

pub fn status_text(session: &DraftSession, status: &DraftStatus) -> String {
    let format_key = match session.format_key() {
        Some(key) => key,
        None => return "No format loaded, use `formats` and `format <key>`".to_string(),
    };

    let progress = format!(
        "Draft {} [{}] turn {}/{}",
        session.id(),
        format_key,
        (status.cursor + 1).min(status.total),
        status.total
    );

    match (status.current_action, status.target_slot) {
        (None, _) => format!("{}: draft complete", progress),
        (Some(action), None) => format!("{}: {} has no free slot left", progress, action),
        (Some(action), Some(slot)) => format!(
            "{}: {} into slot {} ({})",
            progress,
            action,
            slot.index + 1,
            if status.is_our_turn { "our turn" } else { "their turn" }
        ),
    }
}

fn row_text(row: &[Option<Champion>]) -> String {
    row.iter()
        .map(|slot| match slot {
            Some(champion) => champion.name.clone(),
            None => "-".to_string(),
        })
        .join(", ")
}

pub fn board_text(session: &DraftSession) -> String {
    let board = session.state().board();
    [Side::Blue, Side::Red]
        .iter()
        .flat_map(|side| {
            [ActionKind::Ban, ActionKind::Pick].into_iter().map(move |kind| {
                let marker = if *side == session.state().our_side() { "*" } else { " " };
                format!(
                    "{}{:<5} {:<5}: {}",
                    marker,
                    side.to_string(),
                    format!("{}s", kind),
                    row_text(board.row(kind, *side))
                )
            })
        })
        .join("\n")
}

pub fn timeline_text(session: &DraftSession) -> String {
    let format = match session.format() {
        Some(format) => format,
        None => return "No format loaded".to_string(),
    };
    let cursor = session.state().cursor();
    let turns = session
        .timeline()
        .iter()
        .enumerate()
        .map(|(idx, action)| {
            let marker = if idx == cursor { ">" } else { " " };
            format!("{}{:>3} {}", marker, idx + 1, action)
        })
        .join("\n");

    match &format.description {
        Some(description) => format!("{}: {}\n{}", format.name, description, turns),
        None => format!("{}\n{}", format.name, turns),
    }
}

pub fn recommendations_text(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "No suggestions".to_string();
    }
    recs.iter()
        .enumerate()
        .map(|(idx, rec)| format!("{:<2} {:16} [{:>2}] {}", idx + 1, rec.name, rec.score, rec.reason))
        .join("\n")
}
