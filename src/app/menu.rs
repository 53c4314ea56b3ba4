use crate::models::draft_format::{Format, Side};

use super::AppConfig;

const APP_NAME: &str = "Champ Draft";

const LABEL_FORMAT: &str = "Format";
const LABEL_SIDE: &str = "Side";
const LABEL_START: &str = "Start";
const LABEL_EXIT: &str = "Exit";

/// Puts `current` first so the scroll item starts on it.
fn ordered_values(values: Vec<String>, current: &str) -> Vec<String> {
    let (mut first, rest): (Vec<String>, Vec<String>) =
        values.into_iter().partition(|value| value == current);
    first.extend(rest);
    first
}

/// Asks for the format and side to start with. None when the user exits.
pub fn choose(available: &[(String, Format)], config: &AppConfig) -> Option<(String, Side)> {
    let format_keys = ordered_values(
        available.iter().map(|(key, _)| key.clone()).collect(),
        &config.format_key,
    );
    let sides = ordered_values(
        vec![Side::Blue.to_string(), Side::Red.to_string()],
        &config.our_side.to_string(),
    );
    let rule = "-".repeat(APP_NAME.len());

    let mut items = vec![
        terminal_menu::label(rule.as_str()),
        terminal_menu::label(APP_NAME),
        terminal_menu::label(rule.as_str()),
    ];
    if !format_keys.is_empty() {
        items.push(terminal_menu::scroll(LABEL_FORMAT, format_keys));
    }
    items.push(terminal_menu::scroll(LABEL_SIDE, sides));
    items.push(terminal_menu::button(LABEL_START));
    items.push(terminal_menu::back_button(LABEL_EXIT));

    let start_menu = terminal_menu::menu(items);
    terminal_menu::run(&start_menu);

    let selection = terminal_menu::mut_menu(&start_menu);
    if selection.selected_item_name() != LABEL_START {
        return None;
    }

    let format_key = if available.is_empty() {
        config.format_key.clone()
    } else {
        selection.selection_value(LABEL_FORMAT).to_string()
    };
    let side = selection
        .selection_value(LABEL_SIDE)
        .parse::<Side>()
        .unwrap_or(config.our_side);

    Some((format_key, side))
}
