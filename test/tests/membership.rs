use bodysync_shared::{Mode, ModelName};
use bodysync_test::TestSession;

fn session_of_three() -> TestSession {
    let mut session = TestSession::new();
    session.host("host");
    session.join("ana");
    session.join("bo");
    session.exchange();
    session
}

#[test]
fn rosters_agree_after_joins() {
    let session = session_of_three();

    for index in 0..session.len() {
        let roster = session.peer(index).state().roster();
        assert_eq!(roster.len(), 3, "peer {} has an incomplete roster", index);
        assert!(roster.is_host(&session.identity(0)));
    }
    assert!(session.log(0).joins.len() == 2);
}

#[test]
fn leaving_guest_is_removed_everywhere() {
    let mut session = session_of_three();

    session.peer_mut(2).leave();
    session.exchange();

    assert!(!session.peer(2).is_connected());
    for index in 0..2 {
        let roster = session.peer(index).state().roster();
        assert_eq!(roster.len(), 2);
        assert!(!roster.contains(&session.identity(2)));
        assert_eq!(session.log(index).leaves, vec![session.identity(2)]);
    }
}

#[test]
fn first_remaining_peer_takes_over_when_host_leaves() {
    let mut session = session_of_three();

    session.peer_mut(0).leave();
    session.exchange();

    assert!(session.peer(1).is_host());
    assert!(!session.peer(2).is_host());
    assert!(session
        .peer(2)
        .state()
        .roster()
        .is_host(&session.identity(1)));
}

#[test]
fn new_host_runs_the_quiz() {
    let mut session = session_of_three();
    session.peer_mut(0).leave();
    session.exchange();

    let now = session.now();
    session.peer_mut(1).select_mode(Mode::Doctor, now);
    session.exchange();

    assert_eq!(session.log(2).last_question(), Some(&(0, "Head".to_string())));

    let now = session.now();
    assert_eq!(session.peer_mut(2).click_part("Head", now), Ok(true));
    session.exchange();
    assert_eq!(session.score_of(1, 2), Some(1));
    assert_eq!(session.score_of(2, 2), Some(1));
}

#[test]
fn hub_disconnect_is_reported_as_connection_loss() {
    let mut session = session_of_three();
    let bo = session.identity(2);

    session.hub().disconnect(&bo);
    session.exchange();

    assert_eq!(session.log(2).connection_losses, 1);
    assert!(!session.peer(2).is_connected());
    assert!(!session.peer(0).state().roster().contains(&bo));

    // a disconnected peer keeps working locally
    session
        .peer_mut(2)
        .switch_model(ModelName::Organs)
        .unwrap();
    assert_eq!(session.peer(2).active_model(), ModelName::Organs);
    assert_eq!(session.peer(0).active_model(), ModelName::Body);
}

#[test]
fn leaderboard_is_pushed_on_roster_changes() {
    let mut session = session_of_three();
    let before = session.log(1).leaderboards.len();

    session.peer_mut(2).leave();
    session.exchange();

    assert_eq!(session.log(1).leaderboards.len(), before + 1);
    assert_eq!(session.log(1).last_leaderboard().map(<[_]>::len), Some(2));
}

#[test]
fn score_of_participant_before_join_is_processed_is_none() {
    let mut session = session_of_three();
    let late = session.join("u42");
    let u42 = session.identity(late);

    assert_eq!(session.peer(0).state().roster().score(&u42), None);

    session.exchange();

    assert_eq!(session.peer(0).state().roster().score(&u42), Some(0));
    assert_eq!(session.peer(late).state().roster().len(), 4);
}
