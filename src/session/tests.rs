//! Tests for session actions and their text rendering.

use super::*;
use crate::test_support::ScriptedGenerator;
use tempfile::TempDir;

fn session(generator: ScriptedGenerator) -> Session {
    Session::new(Box::new(generator), &Config::default(), EventLog::disabled())
}

fn planned(entries: &str) -> Session {
    let mut s = session(ScriptedGenerator::new().reply(entries));
    s.decompose("goal").unwrap();
    s
}

#[test]
fn test_decompose_action_renders_plan() {
    let mut s = session(ScriptedGenerator::new().reply("- Research topic\n- Draft outline\n"));

    let text = s.perform(Action::Decompose {
        query: "Write an essay".to_string(),
    });

    assert_eq!(text, "Research topic\nDraft outline");
}

#[test]
fn test_decompose_failure_renders_error_and_keeps_plan() {
    let mut s = session(
        ScriptedGenerator::new()
            .reply("keep")
            .fail("model unavailable"),
    );
    s.decompose("first").unwrap();

    let text = s.perform(Action::Decompose {
        query: "second".to_string(),
    });

    assert_eq!(text, "Error generating subtasks: model unavailable");
    assert_eq!(s.plan(), ["keep".to_string()]);
}

#[test]
fn test_modify_uses_one_based_positions() {
    let mut s = planned("a\nb\nc");

    let text = s.perform(Action::Modify {
        position: 1,
        text: "A".to_string(),
    });

    assert_eq!(text, "A\nb\nc");
}

#[test]
fn test_modify_invalid_position_renders_error() {
    let mut s = planned("a\nb");

    let text = s.perform(Action::Modify {
        position: 3,
        text: "x".to_string(),
    });

    assert_eq!(text, "Invalid task index: 3 (plan has 2 subtask(s))");
    assert_eq!(s.plan(), ["a".to_string(), "b".to_string()]);
}

#[test]
fn test_position_zero_is_invalid() {
    let mut s = planned("a");

    assert_eq!(
        s.modify(0, "x").unwrap_err(),
        EditError::Index(IndexError { position: 0, len: 1 })
    );
    assert_eq!(
        s.delete(0).unwrap_err(),
        IndexError { position: 0, len: 1 }
    );
    assert_eq!(s.plan(), ["a".to_string()]);
}

#[test]
fn test_empty_text_is_rejected_without_touching_plan() {
    let mut s = planned("a\nb");

    for text in ["", "   ", "\t\n"] {
        assert_eq!(
            s.perform(Action::Add {
                text: text.to_string()
            }),
            "Subtask text cannot be empty."
        );
        assert_eq!(
            s.perform(Action::Modify {
                position: 1,
                text: text.to_string()
            }),
            "Subtask text cannot be empty."
        );
    }

    assert_eq!(s.add("").unwrap_err(), EditError::EmptyText);
    assert_eq!(s.modify(1, " ").unwrap_err(), EditError::EmptyText);
    assert_eq!(s.plan(), ["a".to_string(), "b".to_string()]);
    assert_eq!(s.perform(Action::Show), "a\nb");
}

#[test]
fn test_add_and_delete_actions() {
    let mut s = planned("a\nb");

    assert_eq!(
        s.perform(Action::Add {
            text: "c".to_string()
        }),
        "a\nb\nc"
    );
    assert_eq!(s.perform(Action::Delete { position: 2 }), "a\nc");
    assert_eq!(
        s.perform(Action::Delete { position: 9 }),
        "Invalid task index: 9 (plan has 2 subtask(s))"
    );
    assert_eq!(s.perform(Action::Show), "a\nc");
}

#[test]
fn test_edits_work_without_a_generator() {
    let mut s = Session::from_config(&Config::default(), EventLog::disabled());

    s.add("manual step").unwrap();

    assert_eq!(s.perform(Action::Show), "manual step");
    assert_eq!(
        s.perform(Action::Decompose {
            query: "x".to_string()
        }),
        "Error generating subtasks: no generator configured (set `generator.command` in planloop.yaml)"
    );
    assert_eq!(s.plan(), ["manual step".to_string()]);
}

#[test]
fn test_solve_all_action_substitutes_failures() {
    let mut s = session(
        ScriptedGenerator::new()
            .reply("one\ntwo\nthree")
            .reply("did one")
            .fail("internal fault")
            .reply("did three"),
    );
    s.decompose("goal").unwrap();

    let text = s.perform(Action::SolveAll);

    assert_eq!(
        text,
        "Task: one\nSolution: did one\n\n\
         Task: two\nSolution: Error solving the task: internal fault\n\n\
         Task: three\nSolution: did three"
    );
}

#[test]
fn test_reflect_all_runs_a_fresh_solve_pass() {
    let generator = ScriptedGenerator::new()
        .reply("a\nb")
        .reply("it was a success")
        .reply("it failed");
    let mut s = session(generator);
    s.decompose("goal").unwrap();

    let text = s.perform(Action::ReflectAll);

    assert_eq!(
        text,
        "Reflection on result: The solution seems adequate.\n\n\
         Reflection on result: The solution seems inadequate."
    );
}

#[test]
fn test_solve_all_on_empty_plan() {
    let mut s = session(ScriptedGenerator::new());
    assert_eq!(s.perform(Action::SolveAll), "");
    assert_eq!(s.perform(Action::ReflectAll), "");
}

#[test]
fn test_sessions_are_independent() {
    let mut first = planned("a\nb");
    let second = planned("x");

    first.add("c").unwrap();

    assert_eq!(second.plan(), ["x".to_string()]);
}

#[test]
fn test_actions_are_journaled() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("events.ndjson");
    let generator = ScriptedGenerator::new().reply("a\nb").reply("success");
    let mut s = Session::new(
        Box::new(generator),
        &Config::default(),
        EventLog::new(Some(path.clone())),
    );

    s.decompose("goal").unwrap();
    s.add("c").unwrap();
    s.add("  ").unwrap_err();
    s.delete(7).unwrap_err();
    s.modify(1, "A").unwrap();
    s.delete(2).unwrap();
    s.solve_all();

    let events: Vec<Event> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let actions: Vec<EventAction> = events.iter().map(|e| e.action).collect();

    assert_eq!(
        actions,
        vec![
            EventAction::Decompose,
            EventAction::Add,
            EventAction::Add,
            EventAction::Delete,
            EventAction::Modify,
            EventAction::Delete,
            EventAction::Solve,
        ]
    );
    assert_eq!(events[0].details["subtasks"], 2);
    assert_eq!(events[2].details["ok"], false);
    assert_eq!(events[2].details["error"], "Subtask text cannot be empty.");
    assert_eq!(events[3].details["ok"], false);
    assert_eq!(events[3].details["position"], 7);
    // Second subtask's solve call finds the script exhausted.
    assert_eq!(events[6].details["failed"], 1);
}
