use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kaiwa::controls::{command_for, Command};
use kaiwa::runtime::{FixedTicker, QuizEvent, Runner, TestEventSource};
use kaiwa::score::RoundOutcome;
use kaiwa::{QuestionRecord, QuizSession, QuizSettings, QuizState, Topic};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Headless integration using the internal runtime + QuizSession without a TTY.

fn topic() -> Topic {
    let questions = (0..6)
        .map(|i| QuestionRecord::new(format!("q{i}"), format!("prompt {i}"), format!("answer {i}")))
        .collect();
    Topic::new("headless", "Headless", questions)
}

fn key(c: char) -> QuizEvent {
    QuizEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn label_of(index: usize) -> char {
    (b'a' + index as u8) as char
}

/// Drive the session the way the binary does, until it finishes or `max_steps` runs out.
fn drive<F>(session: &mut QuizSession, runner: &mut Runner<TestEventSource, FixedTicker>, max_steps: u32, mut on_key: F)
where
    F: FnMut(&QuizSession),
{
    for _ in 0..max_steps {
        match runner.step() {
            QuizEvent::Tick => {
                session.tick();
            }
            QuizEvent::Resize => {}
            QuizEvent::Key(key) => {
                match command_for(key, session.state()) {
                    Some(Command::Choose(idx)) => {
                        session.choose(idx);
                    }
                    Some(Command::Advance) => {
                        if session.advance() && session.state() == QuizState::Playing {
                            runner.rearm();
                        }
                    }
                    Some(Command::Replay) | Some(Command::Quit) => break,
                    None => {}
                }
                on_key(session);
            }
        }
        if session.state() == QuizState::Finished {
            break;
        }
    }
}

#[test]
fn headless_answer_flow_finishes_perfect() {
    let mut rng = StdRng::seed_from_u64(8);
    let settings = QuizSettings {
        rounds: 3,
        ..QuizSettings::default()
    };
    let mut session = QuizSession::start(&topic(), settings, &mut rng).unwrap();

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_secs(5)));

    // Queue the right letter for every round up front; rounds are fixed at start.
    for round in session.rounds() {
        let position = round.correct_position().unwrap();
        tx.send(key(label_of(position))).unwrap();
        tx.send(QuizEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
            .unwrap();
    }

    drive(&mut session, &mut runner, 50, |_| {});

    let result = session.final_score().expect("session should finish");
    assert_eq!(result.score, 3);
    assert!(result.perfect);
}

#[test]
fn headless_timeouts_finish_with_zero() {
    let mut rng = StdRng::seed_from_u64(8);
    let settings = QuizSettings {
        rounds: 2,
        countdown_secs: 2,
        options_per_round: 4,
    };
    let mut session = QuizSession::start(&topic(), settings, &mut rng).unwrap();

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_millis(5)));

    // Let each round time out, then press Enter to move on.
    for _ in 0..200u32 {
        match runner.step() {
            QuizEvent::Tick => {
                if session.tick() == Some(RoundOutcome::TimedOut) {
                    tx.send(QuizEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
                        .unwrap();
                }
            }
            QuizEvent::Key(key) => {
                if command_for(key, session.state()) == Some(Command::Advance) {
                    session.advance();
                    runner.rearm();
                }
            }
            QuizEvent::Resize => {}
        }
        if session.state() == QuizState::Finished {
            break;
        }
    }

    let result = session.final_score().expect("timed session should finish");
    assert_eq!(result.score, 0);
    assert!(!result.perfect);
    assert_eq!(session.outcome(0), Some(RoundOutcome::TimedOut));
    assert_eq!(session.outcome(1), Some(RoundOutcome::TimedOut));
}

#[test]
fn headless_keys_during_result_do_not_rescore() {
    let mut rng = StdRng::seed_from_u64(21);
    let settings = QuizSettings {
        rounds: 2,
        ..QuizSettings::default()
    };
    let mut session = QuizSession::start(&topic(), settings, &mut rng).unwrap();
    let position = session.rounds()[0].correct_position().unwrap();

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(TestEventSource::new(rx), FixedTicker::new(Duration::from_secs(5)));

    tx.send(key(label_of(position))).unwrap();
    for c in ['a', 'b', 'c', 'd'] {
        tx.send(key(c)).unwrap();
    }

    let mut scores = Vec::new();
    drive(&mut session, &mut runner, 5, |s| scores.push(s.score()));

    assert_eq!(scores, vec![1, 1, 1, 1, 1]);
    assert_eq!(session.state(), QuizState::Result);
    assert_eq!(session.current_index(), 0);
}
