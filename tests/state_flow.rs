use std::fs;

use turkeybowl_terminal::error::AdminError;
use turkeybowl_terminal::forms::FieldInput;
use turkeybowl_terminal::model::HistoryKind;
use turkeybowl_terminal::seed::default_data;
use turkeybowl_terminal::selection::MoveDirection;
use turkeybowl_terminal::state::{
    AppState, ConfirmAction, Effect, Modal, Prompt, PromptKind, Screen,
};
use turkeybowl_terminal::store::DataKind;
use turkeybowl_terminal::transfer;

fn type_keyword(state: &mut AppState, keyword: &str) -> bool {
    keyword.chars().map(|c| state.feed_unlock(c)).last().unwrap_or(false)
}

fn set_prompt(state: &mut AppState, text: &str) {
    match &mut state.modal {
        Some(Modal::Prompt(prompt)) => prompt.input = text.to_string(),
        other => panic!("expected a prompt, got {other:?}"),
    }
}

fn admin_state() -> AppState {
    let mut state = AppState::new(default_data(), "gobble");
    assert!(type_keyword(&mut state, "gobble"));
    set_prompt(&mut state, "drumstick");
    assert_eq!(state.submit_modal().unwrap(), Effect::None);
    assert!(state.admin_mode);
    state
}

fn fill_text(state: &mut AppState, label: &str, value: &str) {
    let Some(Modal::Form(form)) = &mut state.modal else {
        panic!("expected a form");
    };
    let field = form
        .fields
        .iter_mut()
        .find(|f| f.label == label)
        .expect("field exists");
    field.input = FieldInput::Text(value.to_string());
}

#[test]
fn keyword_opens_password_prompt() {
    let mut state = AppState::new(default_data(), "gobble");
    assert!(!type_keyword(&mut state, "gobbl"));
    assert!(state.modal.is_none());
    assert!(state.feed_unlock('E'));
    assert!(matches!(&state.modal, Some(Modal::Prompt(p)) if p.masked()));
}

#[test]
fn wrong_password_stays_locked() {
    let mut state = AppState::new(default_data(), "gobble");
    type_keyword(&mut state, "gobble");
    set_prompt(&mut state, "stuffing");

    assert_eq!(state.submit_modal().unwrap_err(), AdminError::WrongPassword);
    assert!(!state.admin_mode);
    assert!(state.modal.is_none());
    assert_eq!(state.last_log(), Some("[WARN] Incorrect password!"));
}

#[test]
fn admin_actions_need_admin_mode() {
    let mut state = AppState::new(default_data(), "gobble");
    state.set_screen(Screen::Roster);
    state.open_add().unwrap();
    state.request_delete();
    assert!(state.modal.is_none());
}

#[test]
fn new_team_through_the_editor() {
    let mut state = admin_state();
    state.set_screen(Screen::Teams);
    state.open_add().unwrap();

    let Some(Modal::TeamEditor(editor)) = &mut state.modal else {
        panic!("expected the team editor");
    };
    editor.name = "Cranberry Crew".to_string();
    editor.editing_name = false;
    editor.cycle_captain();
    editor.toggle_mark();
    editor.move_marked(MoveDirection::ToSelected);

    assert_eq!(state.submit_modal().unwrap(), Effect::Persist(vec![DataKind::Teams]));
    assert!(state.modal.is_none());
    let team = state.data.teams.last().unwrap();
    assert_eq!(team.name, "Cranberry Crew");
    assert_eq!(team.players, vec![1, 2]);
}

#[test]
fn invalid_form_stays_open() {
    let mut state = admin_state();
    state.set_screen(Screen::Roster);
    state.open_add().unwrap();

    assert_eq!(
        state.submit_modal().unwrap_err(),
        AdminError::Required("Name and position are required!")
    );
    assert!(matches!(state.modal, Some(Modal::Form(_))));

    fill_text(&mut state, "Name", "Riley Park");
    assert_eq!(state.submit_modal().unwrap(), Effect::Persist(vec![DataKind::Players]));
    assert_eq!(state.data.players.len(), 13);
    assert_eq!(state.last_log(), Some("[INFO] Player 13 added"));
}

#[test]
fn delete_player_goes_through_confirmation() {
    let mut state = admin_state();
    state.set_screen(Screen::Roster);
    state.request_delete();
    assert_eq!(
        state.modal.as_ref().map(|m| matches!(m, Modal::Confirm(ConfirmAction::DeletePlayer(1)))),
        Some(true)
    );

    assert_eq!(
        state.submit_modal().unwrap(),
        Effect::Persist(vec![DataKind::Players, DataKind::Teams])
    );
    assert!(state.data.player(1).is_none());
    assert_eq!(state.data.team(1).unwrap().captain_id, 2);
}

#[test]
fn selection_is_clamped_after_deletes() {
    let mut state = admin_state();
    state.set_screen(Screen::History);
    state.cycle_history_section();
    assert_eq!(state.history_section, HistoryKind::Awards);
    for _ in 0..20 {
        state.select_next();
    }
    assert_eq!(state.selected, 14);

    state.request_delete();
    state.submit_modal().unwrap();
    assert_eq!(state.data.history.awards.len(), 14);
    assert_eq!(state.selected, 13);
}

#[test]
fn member_removal_hands_over_captaincy() {
    let mut state = admin_state();
    state.set_screen(Screen::Teams);
    state.request_member_removal();
    assert_eq!(state.submit_modal().unwrap(), Effect::Persist(vec![DataKind::Teams]));
    assert_eq!(state.data.team(1).unwrap().captain_id, 2);
}

#[test]
fn import_replaces_data_after_confirm() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    let mut other = default_data();
    other.settings.event_location = "Community Center".to_string();
    fs::write(&path, transfer::export_json(&other, chrono::Utc::now()).unwrap()).unwrap();

    let mut state = admin_state();
    state.open_modal(Modal::Prompt(Prompt::new(PromptKind::ImportPath)));
    set_prompt(&mut state, path.to_str().unwrap());
    assert_eq!(state.submit_modal().unwrap(), Effect::None);
    assert!(matches!(state.modal, Some(Modal::Confirm(ConfirmAction::Import(_)))));

    let effect = state.submit_modal().unwrap();
    assert_eq!(effect, Effect::Persist(DataKind::ALL.to_vec()));
    assert_eq!(state.data.settings.event_location, "Community Center");
}

#[test]
fn reset_asks_caller_to_reload() {
    let mut state = admin_state();
    state.open_modal(Modal::Confirm(ConfirmAction::Reset));
    assert_eq!(state.submit_modal().unwrap(), Effect::Reset);
    assert_eq!(state.last_log(), Some("[INFO] Data reset to defaults!"));
}

#[test]
fn exit_admin_closes_everything() {
    let mut state = admin_state();
    state.set_screen(Screen::Roster);
    state.open_edit().unwrap();
    assert!(state.modal.is_some());
    state.exit_admin();
    assert!(!state.admin_mode);
    assert!(state.modal.is_none());
}
