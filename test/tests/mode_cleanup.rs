use std::time::Duration;

use bodysync_peer::PeerError;
use bodysync_shared::{Mode, ModelName, PaintColor};
use bodysync_test::{assert_mode_everywhere, TestSession};

fn session_of_three() -> TestSession {
    let mut session = TestSession::new();
    session.host("host");
    session.join("ana");
    session.join("bo");
    session.exchange();
    session
}

#[test]
fn leaving_doctor_cancels_pending_next_question() {
    let mut session = session_of_three();
    let now = session.now();
    session.peer_mut(0).select_mode(Mode::Doctor, now);
    session.exchange();

    session.peer_mut(1).click_part("Head", now).unwrap();
    session.exchange();
    assert_eq!(session.peer(0).state().pending_timers(), 1);

    let now = session.now();
    session.peer_mut(0).select_mode(Mode::Paint, now);
    session.exchange();
    let asked: Vec<usize> = (0..session.len())
        .map(|index| session.log(index).questions.len())
        .collect();

    session.tick(Duration::from_secs(30));

    assert_mode_everywhere!(session, Mode::Paint);
    for index in 0..session.len() {
        assert_eq!(session.log(index).questions.len(), asked[index]);
        assert!(session.log(index).game_overs.is_empty());
        assert_eq!(session.log(index).quiz_modal_closes, 1);
        assert_eq!(session.log(index).camera_restores, 1);
    }
    assert_eq!(session.peer(0).state().pending_timers(), 0);
}

#[test]
fn tour_walks_parts_then_stops() {
    let mut session = session_of_three();
    let interval = session.config().tour_step_interval;
    let now = session.now();

    session.peer_mut(0).select_mode(Mode::Tour, now);
    session.exchange();
    for _ in 0..20 {
        session.tick(interval);
    }

    let parts = session.peer(0).state().catalog().parts(ModelName::Body).to_vec();
    for index in 0..session.len() {
        let steps = &session.log(index).tour_steps;
        assert_eq!(steps.len(), parts.len());
        assert_eq!(steps[0], (0, "Head".to_string()));
        assert_eq!(steps.last().map(|(_, part)| part), parts.last());
    }
}

#[test]
fn leaving_tour_stops_the_walk() {
    let mut session = session_of_three();
    let interval = session.config().tour_step_interval;
    let now = session.now();

    session.peer_mut(0).select_mode(Mode::Tour, now);
    session.exchange();
    session.tick(interval);

    let now = session.now();
    session.peer_mut(0).select_mode(Mode::Paint, now);
    session.tick(interval);
    session.tick(interval);

    for index in 0..session.len() {
        assert_eq!(session.log(index).tour_steps.len(), 2);
        assert_eq!(session.log(index).camera_restores, 1);
    }
}

#[test]
fn guest_cannot_switch_model_during_tour() {
    let mut session = session_of_three();
    let now = session.now();
    session.peer_mut(0).select_mode(Mode::Tour, now);
    session.exchange();

    assert!(!session.peer(1).can_change_model());
    assert_eq!(
        session.peer_mut(1).switch_model(ModelName::Organs),
        Err(PeerError::ModelSwitchDenied { mode: Mode::Tour })
    );
    assert_eq!(session.peer(1).active_model(), ModelName::Body);
}

#[test]
fn host_switches_model_for_everyone_during_tour() {
    let mut session = session_of_three();
    let now = session.now();
    session.peer_mut(0).select_mode(Mode::Tour, now);
    session.exchange();

    session.peer_mut(0).switch_model(ModelName::Organs).unwrap();
    session.exchange();

    for index in 0..session.len() {
        assert_eq!(session.peer(index).active_model(), ModelName::Organs);
    }
}

#[test]
fn model_switch_mid_quiz_reposes_same_index() {
    let mut session = session_of_three();
    let now = session.now();
    session.peer_mut(0).select_mode(Mode::Doctor, now);
    session.exchange();

    session.peer_mut(0).switch_model(ModelName::Organs).unwrap();
    session.exchange();

    for index in 0..session.len() {
        assert_eq!(
            session.log(index).last_question(),
            Some(&(0, "Brain".to_string()))
        );
    }

    let now = session.now();
    assert_eq!(session.peer_mut(1).click_part("Brain", now), Ok(true));
    session.exchange();
    assert_eq!(session.score_of(0, 1), Some(1));
}

#[test]
fn remote_paint_notice_is_dismissed_after_duration() {
    let mut session = session_of_three();
    let duration = session.config().paint_notice_duration;
    let red = PaintColor::parse("#ff0000").unwrap();

    session.peer_mut(0).paint("Head", red).unwrap();
    session.exchange();

    let (notice, painter, part) = session.log(1).paint_notices[0].clone();
    assert_eq!(session.log(1).paint_notices.len(), 1);
    assert_eq!(painter.identity, session.identity(0));
    assert_eq!(part, "Head");
    assert!(session.log(1).notice_dismissals.is_empty());

    session.tick(duration);

    assert_eq!(session.log(1).notice_dismissals, vec![notice]);
    // no notice for one's own paint
    assert!(session.log(0).paint_notices.is_empty());
}
