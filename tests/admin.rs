use turkeybowl_terminal::admin::{
    self, AwardDraft, ChampionshipDraft, PlayerDraft, RecordDraft, TeamDraft,
};
use turkeybowl_terminal::error::AdminError;
use turkeybowl_terminal::model::{HistoryKind, Position};
use turkeybowl_terminal::seed::{MVP_AWARD, default_data};
use turkeybowl_terminal::transfer;

#[test]
fn add_player_fills_in_defaults() {
    let mut data = default_data();
    let draft = PlayerDraft::parse("Casey Jordan", "", "te", "", "").unwrap();
    let id = admin::add_player(&mut data, draft).unwrap();

    assert_eq!(id, 13);
    let player = data.player(id).unwrap();
    assert_eq!(player.nickname, "Casey");
    assert_eq!(player.position, Position::Te);
    assert_eq!(player.bio, "TE player for the Turkey Bowl.");
    assert_eq!(player.years_played, 1);
    assert_eq!(player.photo_path, "images/players/player13.jpg");
    assert!(player.current_year);
}

#[test]
fn player_form_errors_are_reported() {
    assert_eq!(
        PlayerDraft::parse("  ", "x", "QB", "", "1").unwrap_err(),
        AdminError::Required("Name and position are required!")
    );
    assert_eq!(
        PlayerDraft::parse("Sam", "", "XX", "", "1").unwrap_err(),
        AdminError::InvalidPosition("XX".to_string())
    );
    assert_eq!(
        PlayerDraft::parse("Sam", "", "QB", "", "many").unwrap_err(),
        AdminError::InvalidNumber("many".to_string())
    );

    let mut data = default_data();
    let draft = PlayerDraft::parse("J", "", "QB", "", "0").unwrap();
    let err = admin::add_player(&mut data, draft).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Name must be at least 2 characters long; Years played must be at least 1"
    );
    assert_eq!(data.players.len(), 12);
}

#[test]
fn deleting_a_captain_hands_over_the_team() {
    let mut data = default_data();
    admin::delete_player(&mut data, 5).unwrap();

    assert!(data.player(5).is_none());
    let turkeys = data.team(2).unwrap();
    assert_eq!(turkeys.players, vec![8, 9, 10, 11, 12]);
    assert_eq!(turkeys.captain_id, 8);

    assert_eq!(
        admin::delete_player(&mut data, 5).unwrap_err(),
        AdminError::UnknownPlayer(5)
    );
}

#[test]
fn teams_left_empty_are_dropped() {
    let mut data = default_data();
    let solo = admin::add_team(&mut data, TeamDraft::parse("Solo Act", Some(12), "12")).unwrap();
    assert_eq!(data.teams.len(), 3);

    admin::remove_player_from_all_teams(&mut data, 12);
    assert!(data.team(solo).is_none());
    assert_eq!(data.teams.len(), 2);
    assert!(data.teams.iter().all(|t| !t.players.contains(&12)));
}

#[test]
fn team_rosters_always_include_the_captain() {
    let mut data = default_data();
    let id = admin::add_team(&mut data, TeamDraft::parse("Pilgrims", Some(4), "2,3")).unwrap();
    assert_eq!(data.team(id).unwrap().players, vec![2, 3, 4]);

    admin::update_roster(&mut data, id, TeamDraft::parse("", Some(9), "2")).unwrap();
    let team = data.team(id).unwrap();
    assert_eq!(team.players, vec![2, 9]);
    assert_eq!(team.captain_id, 9);
}

#[test]
fn team_validation_messages() {
    let mut data = default_data();
    assert_eq!(
        admin::add_team(&mut data, TeamDraft::parse("", Some(1), "1")).unwrap_err(),
        AdminError::Required("Team name and captain are required!")
    );
    assert_eq!(
        admin::add_team(&mut data, TeamDraft::parse("Birds", Some(1), "")).unwrap_err(),
        AdminError::Required("Please select at least one player for the team!")
    );
    assert_eq!(
        admin::add_team(&mut data, TeamDraft::parse("Birds", Some(99), "1")).unwrap_err(),
        AdminError::UnknownPlayer(99)
    );
    assert_eq!(
        admin::add_team(&mut data, TeamDraft::parse("B", Some(1), "1")).unwrap_err(),
        AdminError::Invalid(vec!["Team name must be at least 2 characters long".to_string()])
    );
    assert_eq!(data.teams.len(), 2);
}

#[test]
fn removing_members_keeps_a_captain() {
    let mut data = default_data();
    admin::remove_from_team(&mut data, 1, 1).unwrap();
    let team = data.team(1).unwrap();
    assert_eq!(team.captain_id, 2);
    assert!(!team.players.contains(&1));

    let id = admin::add_team(&mut data, TeamDraft::parse("Lone", Some(1), "1")).unwrap();
    assert!(matches!(
        admin::remove_from_team(&mut data, id, 1),
        Err(AdminError::Invalid(_))
    ));
    assert_eq!(
        admin::remove_from_team(&mut data, id, 7).unwrap_err(),
        AdminError::UnknownPlayer(7)
    );
}

#[test]
fn history_entries_are_prepended() {
    let mut data = default_data();

    let draft = ChampionshipDraft::parse("2025", "The Turkeys", "").unwrap();
    let id = admin::add_championship(&mut data, draft).unwrap();
    assert_eq!(id, 6);
    let newest = &data.history.championships[0];
    assert_eq!(newest.year, 2025);
    assert_eq!(newest.score, None);

    let draft = AwardDraft::parse("2025", MVP_AWARD, Some(9), "").unwrap();
    let id = admin::add_award(&mut data, draft).unwrap();
    let award = &data.history.awards[0];
    assert_eq!(award.id, id);
    assert_eq!(award.player_name, "Player 9");
    assert_eq!(award.team_name.as_deref(), Some("The Turkeys"));

    let draft = RecordDraft::parse("2025", "Longest run", "80 yds", "Player 2").unwrap();
    assert_eq!(admin::add_record(&mut data, draft), Ok(1));
    assert_eq!(data.history.records[0].record_value, "80 yds");
}

#[test]
fn history_edits_and_deletes() {
    let mut data = default_data();
    let draft = ChampionshipDraft::parse("2019", "The Gobblers", "7-3").unwrap();
    admin::update_championship(&mut data, 1, draft).unwrap();
    assert_eq!(data.history.championships[0].year, 2019);

    admin::update_award(&mut data, 1, "2024", MVP_AWARD, "Player 3", "Three scores").unwrap();
    let award = data.history.awards.iter().find(|a| a.id == 1).unwrap();
    assert_eq!(award.player_name, "Player 3");
    assert_eq!(award.description.as_deref(), Some("Three scores"));

    admin::delete_history_item(&mut data, HistoryKind::Awards, 1).unwrap();
    assert_eq!(data.history.awards.len(), 14);
    assert_eq!(
        admin::delete_history_item(&mut data, HistoryKind::Records, 1).unwrap_err(),
        AdminError::UnknownHistoryItem {
            kind: HistoryKind::Records,
            id: 1
        }
    );
}

#[test]
fn history_form_errors() {
    assert_eq!(
        ChampionshipDraft::parse("", "The Gobblers", "").unwrap_err(),
        AdminError::Required("Year and team are required!")
    );
    assert_eq!(
        AwardDraft::parse("2024", MVP_AWARD, None, "").unwrap_err(),
        AdminError::Required("Year and player are required!")
    );
    assert_eq!(
        RecordDraft::parse("2024", "Sacks", " ", "Player 4").unwrap_err(),
        AdminError::Required("All fields are required!")
    );
}

#[test]
fn adding_past_the_largest_id_is_an_error() {
    let mut data = default_data();
    let raw = r#"{"players":[{"id":4294967295,"name":"Max Out","position":"QB"}],
        "teams":[{"id":4294967295,"name":"Full House","captainId":4294967295,"year":2025,"players":[4294967295]}],
        "history":{"championships":[{"id":4294967295,"year":2024,"teamName":"Full House"}],
        "awards":[],"records":[{"id":4294967295,"year":2024,"recordName":"Sacks","recordValue":"9","playerName":"Max Out"}]}}"#;
    transfer::import_str(raw, &mut data).unwrap();

    let draft = PlayerDraft::parse("New Guy", "", "QB", "", "").unwrap();
    assert_eq!(
        admin::add_player(&mut data, draft).unwrap_err(),
        AdminError::IdsExhausted("player")
    );
    assert_eq!(data.players.len(), 1);

    let team = TeamDraft::parse("Overflow", Some(u32::MAX), "4294967295");
    assert_eq!(
        admin::add_team(&mut data, team).unwrap_err(),
        AdminError::IdsExhausted("team")
    );

    let draft = ChampionshipDraft::parse("2025", "Full House", "").unwrap();
    assert_eq!(
        admin::add_championship(&mut data, draft).unwrap_err(),
        AdminError::IdsExhausted("championship")
    );
    let draft = RecordDraft::parse("2025", "Longest run", "80 yds", "Max Out").unwrap();
    assert_eq!(
        admin::add_record(&mut data, draft).unwrap_err(),
        AdminError::IdsExhausted("record")
    );

    // Awards still have room, so the next one is 1.
    let draft = AwardDraft::parse("2025", MVP_AWARD, Some(u32::MAX), "").unwrap();
    assert_eq!(admin::add_award(&mut data, draft), Ok(1));
    assert_eq!(data.history.awards[0].team_name.as_deref(), Some("Full House"));
}

#[test]
fn password_check() {
    let data = default_data();
    assert!(admin::check_password(&data.settings, "drumstick").is_ok());
    assert_eq!(
        admin::check_password(&data.settings, "Drumstick"),
        Err(AdminError::WrongPassword)
    );
}
