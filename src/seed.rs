//! Built-in data used when the store has nothing saved yet.

use crate::model::{
    Award, Championship, EventSettings, History, Player, PlayerId, Position, Team, TeamRecord,
    TournamentData,
};

pub const MVP_AWARD: &str = "Most Valuable Player";
pub const OFFENSIVE_AWARD: &str = "Offensive Player of the Year";
pub const DEFENSIVE_AWARD: &str = "Defensive Player of the Year";

pub const AWARD_NAMES: [&str; 3] = [MVP_AWARD, OFFENSIVE_AWARD, DEFENSIVE_AWARD];

pub fn default_data() -> TournamentData {
    TournamentData {
        players: default_players(),
        teams: default_teams(),
        history: default_history(),
        settings: default_settings(),
    }
}

pub fn default_settings() -> EventSettings {
    EventSettings {
        event_date: "2025-11-27T09:00:00".to_string(),
        event_location: "Riverside Park, Field 2".to_string(),
        registration_deadline: "2025-11-20T23:59:00".to_string(),
        current_year: 2025,
        admin_password: "drumstick".to_string(),
    }
}

pub fn default_players() -> Vec<Player> {
    use Position::*;

    let seeds: [(Position, u32, &str); 12] = [
        (Qb, 5, "Veteran quarterback with great arm strength and field vision."),
        (Rb, 3, "Speedy running back with excellent agility and acceleration."),
        (Wr, 4, "Reliable wide receiver with sure hands and route running."),
        (De, 2, "Defensive end with incredible pass rush abilities."),
        (Lb, 6, "Middle linebacker and team captain with strong leadership."),
        (Cb, 3, "Cornerback with exceptional coverage skills and ball hawk instincts."),
        (Wr, 2, "Deep threat receiver known for making spectacular catches."),
        (Rb, 4, "Power running back who excels in short yardage situations."),
        (S, 3, "Free safety with range and ball skills to change the game."),
        (Qb, 1, "Mobile quarterback who can beat you with arm or legs."),
        (Wr, 2, "Slot receiver with excellent hands and route running precision."),
        (Lb, 3, "Outside linebacker with speed to cover and strength to rush."),
    ];

    seeds
        .iter()
        .enumerate()
        .map(|(idx, (position, years_played, bio))| {
            let id = idx as PlayerId + 1;
            Player {
                id,
                name: format!("Player {id}"),
                nickname: format!("P{id}"),
                position: *position,
                bio: (*bio).to_string(),
                photo_path: format!("images/players/player{id}.jpg"),
                years_played: *years_played,
                current_year: true,
            }
        })
        .collect()
}

pub fn default_teams() -> Vec<Team> {
    vec![
        Team {
            id: 1,
            name: "The Gobblers".to_string(),
            captain_id: 1,
            logo_path: "images/teams/the-gobblers-logo.png".to_string(),
            year: 2025,
            players: vec![1, 2, 3, 4, 6, 7],
            record: TeamRecord::default(),
        },
        Team {
            id: 2,
            name: "The Turkeys".to_string(),
            captain_id: 5,
            logo_path: "images/teams/the-turkeys-logo.png".to_string(),
            year: 2025,
            players: vec![5, 8, 9, 10, 11, 12],
            record: TeamRecord::default(),
        },
    ]
}

pub fn default_history() -> History {
    let championships = [
        (2024, "The Gobblers", "28-21"),
        (2023, "The Turkeys", "35-14"),
        (2022, "The Gobblers", "21-17"),
        (2021, "The Turkeys", "24-20"),
        (2020, "The Gobblers", "17-10"),
    ]
    .into_iter()
    .enumerate()
    .map(|(idx, (year, team, score))| Championship {
        id: idx as u32 + 1,
        year,
        team_name: team.to_string(),
        score: Some(score.to_string()),
    })
    .collect();

    // Winners per award, newest year first; teams alternate starting with the Gobblers.
    let winners: [(&str, [u32; 5]); 3] = [
        (MVP_AWARD, [2, 5, 1, 4, 7]),
        (OFFENSIVE_AWARD, [3, 1, 8, 10, 11]),
        (DEFENSIVE_AWARD, [6, 12, 9, 5, 4]),
    ];
    let mut awards = Vec::with_capacity(15);
    for (award_idx, (award_name, players)) in winners.iter().enumerate() {
        for (year_idx, player) in players.iter().enumerate() {
            let team = if (award_idx + year_idx) % 2 == 0 {
                "The Gobblers"
            } else {
                "The Turkeys"
            };
            awards.push(Award {
                id: awards.len() as u32 + 1,
                year: 2024 - year_idx as i32,
                award_name: (*award_name).to_string(),
                player_name: format!("Player {player}"),
                team_name: Some(team.to_string()),
                description: None,
            });
        }
    }

    History {
        championships,
        awards,
        records: Vec::new(),
    }
}
