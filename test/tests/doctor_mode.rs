use bodysync_shared::{Mode, ModelName};
use bodysync_test::{assert_mode_everywhere, assert_score_everywhere, TestSession};

fn doctor_session() -> TestSession {
    let mut session = TestSession::new();
    session.host("host");
    session.join("ana");
    session.join("bo");
    session.exchange();

    let now = session.now();
    session.peer_mut(0).select_mode(Mode::Doctor, now);
    session.exchange();
    session
}

fn current_part(session: &TestSession, index: usize) -> String {
    session
        .log(index)
        .last_question()
        .map(|(_, part)| part.clone())
        .expect("peer should have been asked a question")
}

#[test]
fn host_starting_doctor_poses_first_question_everywhere() {
    let session = doctor_session();

    assert_mode_everywhere!(session, Mode::Doctor);
    for index in 0..session.len() {
        assert_eq!(
            session.log(index).last_question(),
            Some(&(0, "Head".to_string())),
            "peer {} shows the wrong question",
            index
        );
    }
}

#[test]
fn first_correct_answer_scores_once() {
    let mut session = doctor_session();
    let now = session.now();

    assert_eq!(session.peer_mut(1).click_part("Head", now), Ok(true));
    assert_eq!(session.peer_mut(2).click_part("Head", now), Ok(true));
    session.exchange();

    assert_score_everywhere!(session, 1, 1);
    assert_score_everywhere!(session, 2, 0);
}

#[test]
fn wrong_answer_is_only_local_feedback() {
    let mut session = doctor_session();
    let now = session.now();

    assert_eq!(session.peer_mut(1).click_part("Knee", now), Ok(false));
    session.exchange();

    assert_eq!(
        session.log(1).answer_checks,
        vec![("Knee".to_string(), false)]
    );
    assert_score_everywhere!(session, 1, 0);
}

#[test]
fn next_question_follows_after_delay() {
    let mut session = doctor_session();
    let now = session.now();
    let delay = session.config().question_delay;

    session.peer_mut(1).click_part("Head", now).unwrap();
    session.exchange();
    assert_eq!(current_part(&session, 2), "Head");

    session.tick(delay);

    for index in 0..session.len() {
        assert_eq!(session.log(index).last_question(), Some(&(1, "Neck".to_string())));
    }
}

#[test]
fn stale_answer_is_ignored_after_advance() {
    let mut session = doctor_session();
    let now = session.now();
    let delay = session.config().question_delay;

    // ana wins question 0, host moves on to question 1
    session.peer_mut(1).click_part("Head", now).unwrap();
    session.pump(0);
    session.advance(delay);
    session.pump(0);
    assert_eq!(session.peer(0).state().quiz().cursor(), 1);

    // bo has not seen question 1 yet and answers question 0
    let now = session.now();
    assert_eq!(session.peer_mut(2).click_part("Head", now), Ok(true));
    session.exchange();

    assert_score_everywhere!(session, 1, 1);
    assert_score_everywhere!(session, 2, 0);
    assert!(!session.peer(0).state().quiz().is_locked());
}

#[test]
fn quiz_runs_to_game_over() {
    let mut session = doctor_session();
    let delay = session.config().question_delay;
    let parts = session
        .peer(0)
        .state()
        .catalog()
        .parts(session.peer(0).active_model())
        .len();

    for _ in 0..parts {
        let part = current_part(&session, 1);
        let now = session.now();
        assert_eq!(session.peer_mut(1).click_part(&part, now), Ok(true));
        session.exchange();
        session.tick(delay);
    }

    for index in 0..session.len() {
        assert_eq!(session.log(index).game_overs, vec![parts]);
    }
    assert_score_everywhere!(session, 1, parts as u32);
}

#[test]
fn host_answer_is_arbitrated_locally() {
    let mut session = doctor_session();
    let now = session.now();

    assert_eq!(session.peer_mut(0).click_part("Head", now), Ok(true));
    session.exchange();

    assert_score_everywhere!(session, 0, 1);
}

#[test]
fn guest_selecting_doctor_lets_host_start_quiz() {
    let mut session = TestSession::new();
    session.host("host");
    session.join("ana");
    session.join("bo");
    session.exchange();

    let now = session.now();
    session.peer_mut(1).select_mode(Mode::Doctor, now);
    session.exchange();

    assert_mode_everywhere!(session, Mode::Doctor);
    for index in 0..session.len() {
        assert_eq!(session.log(index).last_question(), Some(&(0, "Head".to_string())));
    }
}

#[test]
fn restarting_doctor_resets_scores_and_cursor() {
    let mut session = doctor_session();
    let now = session.now();
    let delay = session.config().question_delay;
    session.peer_mut(1).click_part("Head", now).unwrap();
    session.exchange();
    session.tick(delay);

    let now = session.now();
    session.peer_mut(0).select_mode(Mode::Doctor, now);
    session.exchange();

    assert_score_everywhere!(session, 1, 0);
    for index in 0..session.len() {
        assert_eq!(session.log(index).last_question(), Some(&(0, "Head".to_string())));
    }
}

#[test]
fn clicking_outside_doctor_is_rejected() {
    let mut session = TestSession::new();
    session.host("host");
    let now = session.now();

    assert!(session.peer_mut(0).click_part("Head", now).is_err());
}

#[test]
fn redisplaying_model_keeps_question_answered() {
    let mut session = doctor_session();
    let now = session.now();
    let delay = session.config().question_delay;

    session.peer_mut(1).click_part("Head", now).unwrap();
    session.exchange();
    assert!(session.peer(0).state().quiz().is_locked());

    session.peer_mut(0).switch_model(ModelName::Body).unwrap();
    session.exchange();

    assert_eq!(session.peer_mut(2).click_part("Head", now), Ok(true));
    session.exchange();

    assert_score_everywhere!(session, 1, 1);
    assert_score_everywhere!(session, 2, 0);

    session.tick(delay);
    for index in 0..session.len() {
        assert_eq!(session.log(index).last_question(), Some(&(1, "Neck".to_string())));
    }
}

#[test]
fn switching_model_moves_answered_question_without_reopening_it() {
    let mut session = doctor_session();
    let now = session.now();
    let delay = session.config().question_delay;

    session.peer_mut(1).click_part("Head", now).unwrap();
    session.exchange();

    session.peer_mut(0).switch_model(ModelName::Organs).unwrap();
    session.exchange();

    let organ = current_part(&session, 2);
    assert!(session.peer(2).state().catalog().contains(ModelName::Organs, &organ));
    assert_eq!(session.peer_mut(2).click_part(&organ, now), Ok(true));
    session.exchange();

    assert_score_everywhere!(session, 1, 1);
    assert_score_everywhere!(session, 2, 0);

    session.tick(delay);
    for index in 0..session.len() {
        assert_eq!(session.log(index).last_question(), Some(&(1, "Heart".to_string())));
    }
}

#[test]
fn host_question_replaces_local_advance_of_hostless_peer() {
    let mut session = TestSession::new();
    let ana = session.join("ana");
    session.exchange();

    // alone and hostless, ana runs the quiz herself and wins question 0
    let now = session.now();
    session.peer_mut(ana).select_mode(Mode::Doctor, now);
    assert_eq!(session.peer_mut(ana).click_part("Head", now), Ok(true));
    assert_eq!(session.peer(ana).state().quiz().cursor(), 0);

    let host = session.host("host");
    session.exchange();
    let now = session.now();
    session.peer_mut(host).select_mode(Mode::Doctor, now);
    session.exchange();
    assert!(!session.peer(ana).state().is_authority());

    let delay = session.config().question_delay;
    session.tick(delay);

    assert_eq!(session.peer(ana).state().quiz().cursor(), 0);
    assert_eq!(session.log(ana).last_question(), Some(&(0, "Head".to_string())));
    assert_eq!(session.peer(ana).state().pending_timers(), 0);
}
