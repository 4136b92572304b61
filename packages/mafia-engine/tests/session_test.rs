use mafia_engine::{
    error::{GameError, QuotaViolation},
    models::{clock::SubPhase, journal::JournalKind, role::RoleKind},
    services::win::GameResult,
    utils::test_setup::{five_player_session, four_player_session, AutoConfirm},
    Confirm, GameSession, Notify, Phase,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingHost {
    answer: bool,
    asked: Vec<(String, String)>,
    notes: Vec<(String, String)>,
}

impl Confirm for RecordingHost {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.asked.push((title.to_string(), message.to_string()));
        self.answer
    }
}

impl Notify for RecordingHost {
    fn notify(&mut self, title: &str, message: &str) {
        self.notes.push((title.to_string(), message.to_string()));
    }
}

#[test]
fn test_first_night_scenario() {
    let mut session = four_player_session().unwrap();
    let mut host = RecordingHost::default();

    assert_eq!(session.begin_night().unwrap(), 1);
    session.advance_night_subphase().unwrap();
    session.cast_night_vote(RoleKind::Mafia, "alice").unwrap();
    assert_eq!(session.ledger().doctor_save(), None);

    let night = session.resolve_night(&mut host).unwrap();
    assert_eq!(night.message, "alice eliminated with 1 of 1 votes");
    assert_eq!(night.eliminated.map(|p| p.name).as_deref(), Some("alice"));
    assert_eq!(session.roster().players_left(), 2);
    assert_eq!(session.roster().mafias_left(), 1);
    assert_eq!(night.result, GameResult::InProgress);
    assert_eq!(
        host.notes,
        vec![(
            "Night 1".to_string(),
            "Night 1 results:\nAlice was eliminated.".to_string()
        )]
    );
    assert_eq!(session.journal().entries_by_kind(JournalKind::Night).len(), 1);
}

#[test]
fn test_nights_and_days_alternate() {
    let mut session = five_player_session().unwrap();
    let mut host = RecordingHost::default();

    assert!(matches!(session.begin_day(), Err(GameError::PhaseOrder(_))));
    session.begin_night().unwrap();
    assert!(matches!(session.begin_night(), Err(GameError::PhaseOrder(_))));
    assert!(matches!(session.resolve_day(&mut host), Err(GameError::PhaseOrder(_))));
    session.resolve_night(&mut host).unwrap();

    assert!(matches!(session.begin_night(), Err(GameError::PhaseOrder(_))));
    assert_eq!(session.begin_day().unwrap(), 1);
    session.resolve_day(&mut host).unwrap();
    assert_eq!(session.begin_night().unwrap(), 2);
    assert_eq!(session.clock().day_number(), 2);
}

#[test]
fn test_sub_phase_gates() {
    let mut session = five_player_session().unwrap();
    session.begin_night().unwrap();

    assert!(matches!(
        session.cast_night_vote(RoleKind::Mafia, "alice"),
        Err(GameError::SubPhase(_))
    ));
    assert_eq!(session.advance_subphase().unwrap(), SubPhase::Decision);
    assert!(matches!(session.advance_subphase(), Err(GameError::SubPhase(_))));
    assert!(matches!(
        session.record_dialogue("dave", "too late"),
        Err(GameError::SubPhase(_))
    ));
}

#[test]
fn test_night_vote_rules() {
    let mut session = five_player_session().unwrap();
    session.begin_night().unwrap();
    session.advance_subphase().unwrap();

    assert!(matches!(
        session.cast_night_vote(RoleKind::Sheriff, "alice"),
        Err(GameError::IneligibleRole { role: RoleKind::Sheriff, .. })
    ));
    assert!(matches!(
        session.cast_night_vote(RoleKind::Mafia, "dave"),
        Err(GameError::IneligibleRole { .. })
    ));
    assert!(matches!(
        session.cast_night_vote(RoleKind::Mafia, "zed"),
        Err(GameError::UnknownPlayer(_))
    ));

    session.cast_night_vote(RoleKind::Mafia, "alice").unwrap();
    session.cast_night_vote(RoleKind::Mafia, "Bob").unwrap();
    assert_eq!(session.ledger().total_votes(), 1);
    assert_eq!(session.ledger().votes().get("bob"), Some(&1));
}

#[test]
fn test_doctor_save_spares_the_only_target() {
    let mut session = five_player_session().unwrap();
    let mut host = RecordingHost::default();
    session.begin_night().unwrap();
    session.advance_subphase().unwrap();
    session.cast_night_vote(RoleKind::Mafia, "carol").unwrap();
    session.protect("Carol").unwrap();

    let night = session.resolve_night(&mut host).unwrap();
    assert!(night.eliminated.is_none());
    assert_eq!(night.message, "No elimination (doctor saved Carol)");
    assert_eq!(night.day_message, "Night 1 results:\nNo one was eliminated.");
    assert_eq!(session.roster().players().len(), 5);
}

#[test]
fn test_day_vote_replaces_per_voter_and_can_end_the_game() {
    let mut session = five_player_session().unwrap();
    let mut host = RecordingHost::default();
    session.begin_night().unwrap();
    session.resolve_night(&mut host).unwrap();
    session.begin_day().unwrap();

    assert!(matches!(
        session.cast_day_vote("alice", "dave"),
        Err(GameError::SubPhase(_))
    ));
    session.record_dialogue("alice", "dave never speaks").unwrap();
    session.advance_subphase().unwrap();
    session.cast_day_vote("alice", "bob").unwrap();
    session.cast_day_vote("alice", "dave").unwrap();
    session.cast_day_vote("carol", "dave").unwrap();
    assert_eq!(session.ledger().votes().get("bob"), None);
    assert!(matches!(
        session.cast_day_vote("zed", "dave"),
        Err(GameError::UnknownPlayer(_))
    ));

    let day = session.resolve_day(&mut host).unwrap();
    assert_eq!(day.message, "dave eliminated with 2 of 2 votes");
    assert_eq!(day.result, GameResult::TownWin);
    assert_eq!(session.result(), GameResult::TownWin);
    assert_eq!(host.notes.last().map(|n| n.0.as_str()), Some("Game Over"));
    assert!(matches!(session.begin_night(), Err(GameError::GameOver(_))));
}

#[test]
fn test_lock_asks_before_committing() {
    let mut session = GameSession::new();
    session.assign(1, "dave", RoleKind::Mafia).unwrap();
    session.assign(2, "carol", RoleKind::Sheriff).unwrap();
    session.assign(3, "erin", RoleKind::Doctor).unwrap();
    session.assign(4, "alice", RoleKind::Villager).unwrap();

    let mut host = RecordingHost::default();
    assert_eq!(session.lock_roster(&mut host), Ok(false));
    assert!(!session.roster().is_locked());
    assert_eq!(host.asked[0].0, "Proceed");

    assert_eq!(session.lock_roster(&mut AutoConfirm), Ok(true));
    assert_eq!(
        session.assign(4, "alice", RoleKind::Villager),
        Err(GameError::Locked)
    );
    assert_eq!(session.lock_roster(&mut AutoConfirm), Err(GameError::Locked));
}

#[test]
fn test_reset_restores_everything() {
    let mut session = five_player_session().unwrap();
    let mut host = RecordingHost {
        answer: true,
        ..Default::default()
    };
    session.begin_night().unwrap();

    assert!(session.reset(&mut host));
    assert_eq!(host.asked[0].1, "Are you sure you want to reset all values?");
    assert_eq!(
        host.notes,
        vec![(
            "Reset".to_string(),
            "All values have been reset successfully!".to_string()
        )]
    );
    assert_eq!(session.active_phase(), None);
    assert!(!session.roster().is_locked());
    assert_eq!(session.clock().night_number(), 1);
    assert!(session.journal().entries.is_empty());
}

#[test]
fn test_protect_and_investigate_need_their_roles() {
    let mut session = five_player_session().unwrap();
    let mut host = RecordingHost::default();
    session.begin_night().unwrap();
    session.advance_subphase().unwrap();
    session.cast_night_vote(RoleKind::Mafia, "erin").unwrap();
    session.resolve_night(&mut host).unwrap();
    session.begin_day().unwrap();
    session.resolve_day(&mut host).unwrap();
    session.begin_night().unwrap();

    assert!(matches!(
        session.protect("alice"),
        Err(GameError::IneligibleRole { role: RoleKind::Doctor, .. })
    ));
    assert_eq!(session.investigate("nobody").unwrap(), "Player not found");
    assert_eq!(session.active_phase(), Some(Phase::Night));
}

#[test]
fn test_next_speaker_walks_the_order() {
    let session = five_player_session().unwrap();
    assert_eq!(session.next_speaker("alice"), Some("bob"));
    assert_eq!(session.next_speaker("erin"), None);
    assert_eq!(session.next_speaker("zed"), None);
}

#[test]
fn test_random_roles_then_lock() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = GameSession::new();
    session.set_player_count(8).unwrap();
    session.set_mafia_count(3).unwrap();
    session.fill_random_roles(&mut rng).unwrap();

    assert!(session.roster().missing_seats().is_empty());
    assert_eq!(session.roster().mafias().len(), 3);
    assert_eq!(session.lock_roster(&mut AutoConfirm), Ok(true));
    assert_eq!(
        session.fill_random_roles(&mut rng),
        Err(GameError::Locked)
    );
}

#[test]
fn test_snapshot_serializes() {
    let mut session = five_player_session().unwrap();
    session.begin_night().unwrap();
    let json = session.snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["active_phase"], "Night");
    assert_eq!(value["result"], "InProgress");
    assert_eq!(value["clock"]["night_number"], 1);
    assert_eq!(value["roster"]["players"].as_array().map(Vec::len), Some(5));
}

fn seat_five(session: &mut GameSession, mafias: usize) {
    session.set_player_count(5).unwrap();
    session.set_mafia_count(mafias).unwrap();
    let dave = if mafias == 2 {
        RoleKind::Mafia
    } else {
        RoleKind::Villager
    };
    session.assign(2, "bob", RoleKind::Mafia).unwrap();
    session.assign(3, "carol", RoleKind::Sheriff).unwrap();
    session.assign(5, "erin", RoleKind::Doctor).unwrap();
    session.assign(4, "dave", dave).unwrap();
    session.assign(1, "alice", RoleKind::Villager).unwrap();
}

#[test]
fn test_lock_rechecks_role_counts_after_quota_change() {
    let mut session = GameSession::new();
    let mut host = RecordingHost {
        answer: true,
        ..Default::default()
    };
    seat_five(&mut session, 2);
    session.set_mafia_count(1).unwrap();

    assert_eq!(
        session.lock_roster(&mut host),
        Err(GameError::RoleAssignment {
            violations: vec![QuotaViolation::TooManyMafias { max: 1 }]
        })
    );
    assert!(host.asked.is_empty());
    assert!(!session.roster().is_locked());

    session.set_mafia_count(2).unwrap();
    assert_eq!(session.lock_roster(&mut host), Ok(true));
}

#[test]
fn test_lock_rejects_quota_raised_over_a_full_table() {
    let mut session = GameSession::new();
    seat_five(&mut session, 1);
    session.set_mafia_count(2).unwrap();

    assert_eq!(
        session.lock_roster(&mut AutoConfirm),
        Err(GameError::RoleAssignment {
            violations: vec![QuotaViolation::InsufficientSlots]
        })
    );
    assert!(!session.roster().is_locked());
}

#[test]
fn test_only_mafia_speak_at_night() {
    let mut session = five_player_session().unwrap();
    session.begin_night().unwrap();

    assert_eq!(
        session.record_dialogue("alice", "I am the sheriff, trust me"),
        Err(GameError::IneligibleRole {
            role: RoleKind::Villager,
            action: "speak at night".to_string(),
        })
    );
    assert!(matches!(
        session.record_dialogue("carol", "psst"),
        Err(GameError::IneligibleRole { role: RoleKind::Sheriff, .. })
    ));
    session.record_dialogue("dave", "bob first").unwrap();
    assert_eq!(session.ledger().dialogues().len(), 1);

    let prompt = session
        .render_prompt(mafia_engine::PromptPhase::Night, "dave")
        .unwrap();
    assert!(!prompt.contains("trust me"));

    session.advance_subphase().unwrap();
    assert_eq!(session.ledger().dialogues().len(), 1);
}

#[test]
fn test_one_investigation_per_night() {
    let mut session = five_player_session().unwrap();
    let mut host = RecordingHost::default();
    session.begin_night().unwrap();

    assert_eq!(session.investigate("zed").unwrap(), "Player not found");
    assert_eq!(session.investigate("dave").unwrap(), "Dave is a Mafia");
    assert!(matches!(
        session.investigate("bob"),
        Err(GameError::IneligibleRole { role: RoleKind::Sheriff, .. })
    ));
    let checks = session
        .journal()
        .entries
        .iter()
        .filter(|e| e.kind == JournalKind::Investigation)
        .count();
    assert_eq!(checks, 1);

    session.resolve_night(&mut host).unwrap();
    session.begin_day().unwrap();
    session.resolve_day(&mut host).unwrap();
    session.begin_night().unwrap();
    assert_eq!(session.investigate("bob").unwrap(), "Bob is not a Mafia");
}
