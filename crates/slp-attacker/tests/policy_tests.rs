use slp_attacker::model::AttackerModel;
use slp_attacker::oracle::SourceSet;
use slp_attacker::policy::PursuitPolicy;
use slp_attacker::state::Attacker;
use slp_attacker::topology::Topology;
use slp_trace::{NodeId, TraceEvent};

fn event(message_type: &str, observer: u32, sender: u32, seq: u64) -> TraceEvent {
    TraceEvent {
        time: 0.0,
        message_type: message_type.to_string(),
        observer_node: NodeId(observer),
        sender_node: NodeId(sender),
        sequence_number: seq,
    }
}

/// Decide, and record the event as applied when it is accepted.
fn decide_and_commit(
    policy: &mut PursuitPolicy,
    attacker: &Attacker,
    event: &TraceEvent,
) -> Option<NodeId> {
    let decision = policy.decide(attacker.state(), event);
    if decision.is_some() {
        policy.commit(event);
    }
    decision
}

fn attacker_at(model: AttackerModel, start: u32, sources: &SourceSet) -> Attacker {
    Attacker::new(model, NodeId(start), &Topology::grid(5), sources).unwrap()
}

#[test]
fn test_ignores_events_observed_elsewhere() {
    let sources = SourceSet::new([NodeId(24)]);
    for model in AttackerModel::ALL {
        let attacker = attacker_at(model, 3, &sources);
        let policy = model.policy();
        assert_eq!(policy.decide(attacker.state(), &event("Normal", 4, 7, 1)), None);
    }
}

#[test]
fn test_memoryless_follows_any_sender_at_position() {
    let sources = SourceSet::new([NodeId(24)]);
    let attacker = attacker_at(AttackerModel::Memoryless, 3, &sources);
    let policy = PursuitPolicy::Memoryless;
    assert_eq!(
        policy.decide(attacker.state(), &event("Normal", 3, 7, 1)),
        Some(NodeId(7))
    );
    // Same message again: still accepted, memoryless keeps no history.
    assert_eq!(
        policy.decide(attacker.state(), &event("Normal", 3, 7, 1)),
        Some(NodeId(7))
    );
}

#[test]
fn test_oscillation_guard_first_move_is_unrestricted() {
    let sources = SourceSet::new([NodeId(24)]);
    let attacker = attacker_at(AttackerModel::OscillationGuarded, 3, &sources);
    assert_eq!(attacker.previous_position(), None);
    let policy = PursuitPolicy::OscillationGuarded;
    assert_eq!(
        policy.decide(attacker.state(), &event("Normal", 3, 3, 1)),
        Some(NodeId(3))
    );
}

#[test]
fn test_oscillation_guard_refuses_previous_position() {
    let sources = SourceSet::new([NodeId(24)]);
    let mut attacker = attacker_at(AttackerModel::OscillationGuarded, 1, &sources);
    attacker.observe(&event("Normal", 1, 2, 1), &sources).unwrap();
    assert_eq!(attacker.position(), NodeId(2));
    assert_eq!(attacker.previous_position(), Some(NodeId(1)));

    let policy = PursuitPolicy::OscillationGuarded;
    assert_eq!(policy.decide(attacker.state(), &event("Normal", 2, 1, 2)), None);
    assert_eq!(
        policy.decide(attacker.state(), &event("Normal", 2, 6, 2)),
        Some(NodeId(6))
    );
}

#[test]
fn test_seqno_guard_rejects_stale_sequence_numbers() {
    let sources = SourceSet::new([NodeId(24)]);
    let attacker = attacker_at(AttackerModel::SeqNoGuarded, 3, &sources);
    let mut policy = PursuitPolicy::seq_no_guarded();

    assert_eq!(
        decide_and_commit(&mut policy, &attacker, &event("Normal", 3, 7, 5)),
        Some(NodeId(7))
    );
    assert_eq!(policy.last_sequence_number("Normal"), Some(5));
    assert_eq!(decide_and_commit(&mut policy, &attacker, &event("Normal", 3, 7, 3)), None);
    assert_eq!(decide_and_commit(&mut policy, &attacker, &event("Normal", 3, 7, 5)), None);
    assert_eq!(policy.last_sequence_number("Normal"), Some(5));
}

#[test]
fn test_seqno_guard_accepts_increasing_sequence_numbers() {
    let sources = SourceSet::new([NodeId(24)]);
    let attacker = attacker_at(AttackerModel::SeqNoGuarded, 3, &sources);
    let mut policy = PursuitPolicy::seq_no_guarded();

    assert!(decide_and_commit(&mut policy, &attacker, &event("Normal", 3, 7, 5)).is_some());
    assert!(decide_and_commit(&mut policy, &attacker, &event("Normal", 3, 7, 7)).is_some());
    assert_eq!(policy.last_sequence_number("Normal"), Some(7));
}

#[test]
fn test_seqno_guard_tracks_message_types_independently() {
    let sources = SourceSet::new([NodeId(24)]);
    let attacker = attacker_at(AttackerModel::SeqNoGuarded, 3, &sources);
    let mut policy = PursuitPolicy::seq_no_guarded();

    assert!(decide_and_commit(&mut policy, &attacker, &event("Normal", 3, 7, 50)).is_some());
    assert!(decide_and_commit(&mut policy, &attacker, &event("Fake", 3, 8, 1)).is_some());
    assert!(decide_and_commit(&mut policy, &attacker, &event("Fake", 3, 8, 1)).is_none());
    assert_eq!(policy.last_sequence_number("Normal"), Some(50));
    assert_eq!(policy.last_sequence_number("Fake"), Some(1));
}

#[test]
fn test_rejected_event_leaves_seqno_memory_untouched() {
    let sources = SourceSet::new([NodeId(24)]);
    let attacker = attacker_at(AttackerModel::SeqNoGuarded, 3, &sources);
    let policy = PursuitPolicy::seq_no_guarded();

    // Observed elsewhere: no decision, nothing recorded.
    assert!(policy.decide(attacker.state(), &event("Normal", 9, 7, 5)).is_none());
    assert_eq!(policy.last_sequence_number("Normal"), None);
}

#[test]
fn test_accepted_decision_is_not_remembered_until_committed() {
    let sources = SourceSet::new([NodeId(24)]);
    let attacker = attacker_at(AttackerModel::SeqNoGuarded, 3, &sources);
    let mut policy = PursuitPolicy::seq_no_guarded();
    let fresh = event("Normal", 3, 7, 5);

    assert_eq!(policy.decide(attacker.state(), &fresh), Some(NodeId(7)));
    assert_eq!(policy.last_sequence_number("Normal"), None);
    // Still fresh: deciding twice without applying the move accepts again.
    assert_eq!(policy.decide(attacker.state(), &fresh), Some(NodeId(7)));

    policy.commit(&fresh);
    assert_eq!(policy.last_sequence_number("Normal"), Some(5));
    assert_eq!(policy.decide(attacker.state(), &fresh), None);
}

#[test]
fn test_commit_is_a_no_op_without_memory() {
    let mut policy = PursuitPolicy::OscillationGuarded;
    policy.commit(&event("Normal", 3, 7, 5));
    assert_eq!(policy, PursuitPolicy::OscillationGuarded);
    assert_eq!(policy.last_sequence_number("Normal"), None);
}

#[test]
fn test_captured_attacker_never_decides_to_move() {
    let sources = SourceSet::new([NodeId(3)]);
    for model in AttackerModel::ALL {
        let attacker = attacker_at(model, 3, &sources);
        assert!(attacker.found_source());
        let policy = model.policy();
        for seq in 0..5 {
            assert_eq!(policy.decide(attacker.state(), &event("Normal", 3, 7, seq)), None);
        }
    }
}

#[test]
fn test_policy_reports_its_model() {
    for model in AttackerModel::ALL {
        assert_eq!(model.policy().model(), model);
    }
}
