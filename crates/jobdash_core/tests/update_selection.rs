mod common;

use common::{init_logging, job};
use jobdash_core::{update, AppState, Msg, Selection};

fn state_with_jobs(urls: &[(&str, &str)]) -> AppState {
    let jobs = urls.iter().map(|(url, company)| job(url, company)).collect();
    let (state, _) = update(AppState::new(), Msg::JobsFetched(jobs));
    state
}

fn select(state: AppState, urls: &[&str]) -> AppState {
    urls.iter().fold(state, |state, url| {
        let (state, _) = update(
            state,
            Msg::JobToggled {
                job_url: (*url).to_owned(),
            },
        );
        state
    })
}

#[test]
fn selection_survives_background_refresh() {
    init_logging();
    let state = state_with_jobs(&[("a", "Acme"), ("b", "Acme")]);
    let state = select(state, &["a", "b"]);

    // Refresh brings a new record; the selection must stay exactly {a, b}.
    let refreshed = vec![job("a", "Acme"), job("b", "Acme"), job("c", "Globex")];
    let (state, effects) = update(state, Msg::JobsFetched(refreshed));

    assert!(effects.is_empty());
    let view = state.view();
    let selected: Vec<&str> = view
        .jobs
        .rows
        .iter()
        .filter(|row| row.selected)
        .map(|row| row.job.job_url.as_str())
        .collect();
    assert_eq!(selected, vec!["a", "b"]);
    assert_eq!(view.jobs.selected_count, 2);
}

#[test]
fn selection_keys_are_identities_not_positions() {
    init_logging();
    let state = state_with_jobs(&[("a", "Acme"), ("b", "Globex")]);
    let state = select(state, &["b"]);

    // Reordered refresh: the same url stays selected wherever it lands.
    let (state, _) = update(
        state,
        Msg::JobsFetched(vec![job("b", "Globex"), job("a", "Acme")]),
    );
    let view = state.view();
    assert!(view.jobs.rows[0].selected);
    assert!(!view.jobs.rows[1].selected);
}

#[test]
fn vanished_keys_stay_selected_but_inert() {
    init_logging();
    let state = state_with_jobs(&[("a", "Acme"), ("b", "Acme")]);
    let state = select(state, &["a", "b"]);

    let (state, _) = update(state, Msg::JobsFetched(vec![job("a", "Acme")]));
    let view = state.view();
    // "b" is no longer a row but has not been pruned from the selection.
    assert_eq!(view.jobs.selected_count, 2);
    assert_eq!(view.jobs.rows.len(), 1);
    assert!(view.jobs.rows[0].selected);
}

#[test]
fn toggle_all_clears_only_on_exact_equality() {
    init_logging();
    let state = state_with_jobs(&[("a", "Acme"), ("b", "Acme"), ("c", "Globex")]);

    // First toggle-all selects every candidate.
    let (state, _) = update(state, Msg::JobsToggledAll);
    assert_eq!(state.view().jobs.selected_count, 3);
    assert!(state.view().jobs.all_selected);

    // Deselect one: toggle-all now replaces instead of clearing.
    let (state, _) = update(
        state,
        Msg::JobToggled {
            job_url: "b".to_owned(),
        },
    );
    let (state, _) = update(state, Msg::JobsToggledAll);
    assert_eq!(state.view().jobs.selected_count, 3);

    // Exact equality again: toggle-all empties the selection.
    let (state, _) = update(state, Msg::JobsToggledAll);
    assert_eq!(state.view().jobs.selected_count, 0);
}

#[test]
fn select_all_under_filter_replaces_and_never_auto_expands() {
    init_logging();
    let state = state_with_jobs(&[("a", "Acme"), ("b", "Globex"), ("c", "Globex")]);
    let state = select(state, &["a"]);

    // Narrow to Globex; select-all operates on the filtered candidates and
    // replaces the prior selection entirely (not a union).
    let (state, _) = update(
        state,
        Msg::CompanyFilterToggled {
            company: "Globex".to_owned(),
        },
    );
    let (state, _) = update(state, Msg::JobsToggledAll);
    let view = state.view();
    assert_eq!(view.jobs.selected_count, 2);
    assert!(!view.jobs.rows.iter().any(|row| row.job.job_url == "a" && row.selected));

    // Widening the filter must not grow the selection.
    let (state, _) = update(state, Msg::CompanyFilterCleared);
    assert_eq!(state.view().jobs.selected_count, 2);
}

#[test]
fn toggle_all_on_empty_candidates_is_equivalent_to_clear() {
    init_logging();
    let mut selection = Selection::new();
    selection.toggle("x");
    selection.toggle_all(Vec::<String>::new());
    assert!(selection.is_empty());

    // Empty against empty stays empty.
    selection.toggle_all(Vec::<String>::new());
    assert!(selection.is_empty());
}
