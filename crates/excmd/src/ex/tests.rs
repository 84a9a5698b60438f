use super::{CompletionStep, Ex, ExOptions, HistoryStep, Session};
use crate::commands::ExError;
use crate::host::{Candidate, HistoryKind, MessageLevel};
use crate::test_utils::FakeHost;

fn ex() -> Ex {
    Ex::new(ExOptions::default())
}

fn host_with_history(kind: HistoryKind, entries: &[&str]) -> FakeHost {
    let mut host = FakeHost::default();
    host.history
        .insert(kind, entries.iter().map(|entry| entry.to_string()).collect());
    host
}

#[test]
fn run_string_runs_chained_commands() {
    let mut host = FakeHost::default();
    ex().run_string("set images|set js=off", &mut host)
        .expect("run ok");
    assert_eq!(
        host.settings_applied,
        vec![
            ("images".to_string(), None),
            ("js".to_string(), Some("off".to_string()))
        ]
    );
}

#[test]
fn unknown_command_stops_the_line_and_is_reported() {
    let mut host = FakeHost::default();
    let err = ex()
        .run_string("set a|frobnicate now|quit", &mut host)
        .unwrap_err();
    assert_eq!(
        err,
        ExError::UnknownCommand {
            token: "frobnicate".to_string()
        }
    );
    assert_eq!(host.settings_applied.len(), 1);
    assert!(!host.quit);
    assert_eq!(host.errors(), vec!["Unknown command: frobnicate"]);
}

#[test]
fn handler_failure_stops_the_line() {
    let mut host = FakeHost::default();
    host.load_error = Some("cannot load".to_string());
    let err = ex().run_string("open foo|quit", &mut host).unwrap_err();
    assert_eq!(err, ExError::failure("cannot load"));
    assert!(!host.quit);
    assert_eq!(host.errors(), vec!["cannot load"]);
}

#[test]
fn empty_line_is_not_an_error() {
    let mut host = FakeHost::default();
    ex().run_string("", &mut host).expect("run ok");
    ex().run_string(" : ", &mut host).expect("run ok");
    assert!(host.messages.is_empty());
}

#[test]
fn percent_expands_to_current_uri() {
    let mut host = FakeHost::default();
    host.uri = Some("http://example.org/".to_string());
    ex().run_string("tabopen %", &mut host).expect("run ok");
    assert_eq!(host.loaded[0].0, "http://example.org/");
}

#[test]
fn submit_records_command_history_and_runs() {
    let mut host = FakeHost::with_input(":quit");
    let mut ex = ex();
    ex.submit(&mut host).expect("submit ok");
    assert!(host.quit);
    assert_eq!(host.normal_mode_entered, 1);
    assert_eq!(
        host.history_added,
        vec![(HistoryKind::Command, "quit".to_string())]
    );
}

#[test]
fn submit_search_uses_direction_of_sigil() {
    let mut host = FakeHost::with_input("?needle");
    ex().submit(&mut host).expect("submit ok");
    assert_eq!(host.searches, vec![("needle".to_string(), false, false)]);
    assert_eq!(
        host.history_added,
        vec![(HistoryKind::Search, "needle".to_string())]
    );
}

#[test]
fn input_changed_searches_incrementally() {
    let mut host = FakeHost::with_input("/ne");
    let mut ex = ex();
    ex.input_changed(&mut host);
    host.input = ":ne".to_string();
    ex.input_changed(&mut host);
    assert_eq!(host.searches, vec![("ne".to_string(), true, true)]);
}

#[test]
fn cancel_clears_input_and_session() {
    let mut host = FakeHost::with_input(":se");
    let mut ex = ex();
    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    ex.cancel(&mut host);
    assert!(matches!(ex.session(), Session::Idle));
    assert_eq!(host.input, "");
}

#[test]
fn completes_command_names_and_restores_count() {
    let mut host = FakeHost::with_input(":5o");
    let mut ex = ex();
    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    assert_eq!(host.input, ":5open");
    let session = ex.completion().expect("session");
    assert_eq!(session.candidates(), &[Candidate::new("open")]);
}

#[test]
fn empty_command_completes_every_name() {
    let mut host = FakeHost::with_input(":");
    let mut ex = ex();
    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    let count = ex.completion().expect("session").candidates().len();
    assert_eq!(count, ex.registry().commands().len());
    assert_eq!(host.input, ":bma");
}

#[test]
fn completion_cycles_without_refetching() {
    let mut host = host_with_history(HistoryKind::Url, &["a.org", "b.org", "c.org"]);
    host.input = ":open ".to_string();
    let mut ex = ex();

    ex.complete(CompletionStep::Next, &mut host).expect("start");
    assert_eq!(host.input, ":open a.org");
    ex.complete(CompletionStep::Next, &mut host).expect("next");
    assert_eq!(host.input, ":open b.org");
    ex.complete(CompletionStep::Next, &mut host).expect("next");
    ex.complete(CompletionStep::Next, &mut host).expect("wrap");
    assert_eq!(host.input, ":open a.org");
    ex.complete(CompletionStep::Prev, &mut host).expect("wrap back");
    assert_eq!(host.input, ":open c.org");
    assert_eq!(host.history_fetches.get(), 1);
}

#[test]
fn completion_stops_at_ends_without_wrap() {
    let mut host = host_with_history(HistoryKind::Url, &["a.org", "b.org"]);
    host.input = ":o ".to_string();
    let mut ex = Ex::new(ExOptions {
        wrap_completion: false,
    });
    ex.complete(CompletionStep::Prev, &mut host).expect("start at end");
    assert_eq!(host.input, ":o b.org");
    ex.complete(CompletionStep::Next, &mut host).expect("stay");
    assert_eq!(host.input, ":o b.org");
}

#[test]
fn edited_input_restarts_completion() {
    let mut host = host_with_history(HistoryKind::Url, &["a.org", "ab.org", "b.org"]);
    host.input = ":open ".to_string();
    let mut ex = ex();
    ex.complete(CompletionStep::Next, &mut host).expect("start");
    host.input = ":open ab".to_string();
    ex.complete(CompletionStep::Next, &mut host).expect("restart");
    assert_eq!(host.history_fetches.get(), 2);
    assert_eq!(host.input, ":open ab.org");
}

#[test]
fn open_with_bang_completes_bookmarks_by_tag() {
    let mut host = FakeHost::with_input(":open !news");
    host.bookmarks.push((
        "http://lwn.net".to_string(),
        None,
        "news linux".to_string(),
    ));
    host.bookmarks
        .push(("http://example.org".to_string(), None, "misc".to_string()));
    let mut ex = ex();
    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    assert_eq!(host.input, ":open http://lwn.net");
}

#[test]
fn set_and_bookmark_tags_are_sorted() {
    let mut host = FakeHost::with_input(":set ");
    host.setting_names = vec!["scrollstep".to_string(), "incsearch".to_string()];
    let mut ex = ex();
    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    assert_eq!(host.input, ":set incsearch");

    host.input = ":bma ".to_string();
    host.tags = vec!["rust".to_string(), "news".to_string()];
    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    assert_eq!(host.input, ":bma news");
}

#[test]
fn search_completion_uses_search_history() {
    let mut host = host_with_history(HistoryKind::Search, &["zeta", "alpha"]);
    host.input = "?".to_string();
    let mut ex = ex();
    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    assert_eq!(host.input, "?alpha");
}

#[test]
fn commands_without_argument_source_have_no_completion() {
    let mut host = FakeHost::with_input(":quit ");
    let err = ex()
        .complete(CompletionStep::Next, &mut host)
        .unwrap_err();
    assert_eq!(err, ExError::NoCompletionContext);
    assert_eq!(host.input, ":quit ");

    host.input = "plain".to_string();
    let err = ex()
        .complete(CompletionStep::Next, &mut host)
        .unwrap_err();
    assert!(!err.is_reportable());
}

#[test]
fn select_writes_prefix_and_candidate() {
    let mut host = FakeHost::with_input(":3tab");
    let mut ex = ex();
    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    ex.select("tabopen", &mut host).expect("select");
    assert_eq!(host.input, ":3tabopen");
    assert_eq!(ex.completion().expect("session").current(), ":3tabopen");
}

#[test]
fn history_walks_older_and_back_to_query() {
    let mut host = host_with_history(HistoryKind::Command, &["open b", "open a"]);
    host.input = ":open".to_string();
    let mut ex = ex();

    ex.step_history(HistoryStep::Older, &mut host).expect("older");
    assert_eq!(host.input, ":open b");
    ex.step_history(HistoryStep::Older, &mut host).expect("older");
    assert_eq!(host.input, ":open a");
    ex.step_history(HistoryStep::Older, &mut host).expect("boundary");
    assert_eq!(host.input, ":open a");
    ex.step_history(HistoryStep::Newer, &mut host).expect("newer");
    ex.step_history(HistoryStep::Newer, &mut host).expect("newer");
    assert_eq!(host.input, ":open");
    assert_eq!(host.history_fetches.get(), 1);
}

#[test]
fn history_divergence_starts_a_new_session() {
    let mut host = host_with_history(HistoryKind::Command, &["abc one", "abc two", "xyz"]);
    host.input = ":abc".to_string();
    let mut ex = ex();

    ex.step_history(HistoryStep::Older, &mut host).expect("older");
    assert_eq!(host.input, ":abc one");
    host.input = ":abc t".to_string();
    ex.step_history(HistoryStep::Older, &mut host).expect("fresh");
    assert_eq!(host.history_fetches.get(), 2);
    assert_eq!(host.input, ":abc two");
}

#[test]
fn history_needs_the_sigil_first() {
    let mut host = host_with_history(HistoryKind::Command, &["abc one", "abc two"]);
    host.input = " :ab".to_string();
    let mut ex = ex();
    assert_eq!(
        ex.step_history(HistoryStep::Older, &mut host),
        Err(ExError::NoHistoryContext)
    );
    assert_eq!(host.input, " :ab");
    assert_eq!(host.history_fetches.get(), 0);

    host.input = ":ab".to_string();
    ex.step_history(HistoryStep::Older, &mut host).expect("older");
    ex.step_history(HistoryStep::Older, &mut host).expect("older");
    assert_eq!(host.input, ":abc two");
    assert_eq!(host.history_fetches.get(), 1);
}

#[test]
fn history_without_matches_or_sigil_fails_quietly() {
    let mut host = host_with_history(HistoryKind::Search, &["foo"]);
    host.input = "/bar".to_string();
    let mut ex = ex();
    assert_eq!(
        ex.step_history(HistoryStep::Older, &mut host),
        Err(ExError::NoHistoryContext)
    );
    host.input = "text".to_string();
    assert_eq!(
        ex.step_history(HistoryStep::Older, &mut host),
        Err(ExError::NoHistoryContext)
    );
    assert_eq!(host.input, "text");
    assert!(host
        .messages
        .iter()
        .all(|(level, _)| *level != MessageLevel::Error));
}

#[test]
fn sessions_exclude_each_other() {
    let mut host = host_with_history(HistoryKind::Command, &["set images"]);
    host.setting_names = vec!["images".to_string()];
    host.input = ":se".to_string();
    let mut ex = ex();

    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    assert!(matches!(ex.session(), Session::Completion(_)));
    ex.step_history(HistoryStep::Older, &mut host).expect("history");
    assert!(matches!(ex.session(), Session::History(_)));
    ex.complete(CompletionStep::Next, &mut host).expect("completion");
    assert!(matches!(ex.session(), Session::Completion(_)));
}

#[test]
fn leave_ends_completion_only() {
    let mut host = host_with_history(HistoryKind::Command, &["quit"]);
    host.input = ":".to_string();
    let mut ex = ex();
    ex.step_history(HistoryStep::Older, &mut host).expect("history");
    ex.leave();
    assert!(matches!(ex.session(), Session::History(_)));
}
