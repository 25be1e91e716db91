mod common;

use std::collections::BTreeSet;

use common::{init_logging, job, tracked};
use jobdash_core::{
    company_facets, filter_jobs_by_company, filter_tracked_by_status, selection_markdown, update,
    AppState, Msg, Selection, TrackStatus,
};

#[test]
fn company_filter_is_or_semantics_and_order_preserving() {
    init_logging();
    let jobs = vec![
        job("a", "Globex"),
        job("b", "Acme"),
        job("c", "Globex"),
        job("d", "Initech"),
    ];
    let filter: BTreeSet<String> = ["Globex", "Acme"].iter().map(|s| (*s).to_owned()).collect();

    let urls: Vec<&str> = filter_jobs_by_company(&jobs, &filter)
        .iter()
        .map(|job| job.job_url.as_str())
        .collect();
    assert_eq!(urls, vec!["a", "b", "c"]);
}

#[test]
fn empty_company_filter_means_no_filter() {
    init_logging();
    let jobs = vec![job("a", "Acme"), job("b", "Globex")];
    assert_eq!(filter_jobs_by_company(&jobs, &BTreeSet::new()).len(), 2);
}

#[test]
fn facets_count_rows_and_mark_active_entries() {
    init_logging();
    let jobs = vec![job("a", "Globex"), job("b", "Acme"), job("c", "Globex")];
    let filter: BTreeSet<String> = std::iter::once("Globex".to_owned()).collect();

    let facets = company_facets(&jobs, &filter);
    assert_eq!(facets.len(), 2);
    assert_eq!(facets[0].name, "Acme");
    assert_eq!(facets[0].count, 1);
    assert!(!facets[0].selected);
    assert_eq!(facets[1].name, "Globex");
    assert_eq!(facets[1].count, 2);
    assert!(facets[1].selected);
}

#[test]
fn facets_skip_nameless_companies() {
    init_logging();
    let jobs = vec![job("a", ""), job("b", "Acme")];
    let facets = company_facets(&jobs, &BTreeSet::new());
    assert_eq!(facets.len(), 1);
    assert_eq!(facets[0].name, "Acme");
}

#[test]
fn status_filter_none_shows_everything() {
    init_logging();
    let rows = vec![
        tracked("1", TrackStatus::Applied),
        tracked("2", TrackStatus::PendingApply),
        tracked("3", TrackStatus::Applied),
    ];
    assert_eq!(filter_tracked_by_status(&rows, None).len(), 3);

    let applied = filter_tracked_by_status(&rows, Some(TrackStatus::Applied));
    let ids: Vec<&str> = applied.iter().map(|job| job.job_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn status_filter_changes_all_selected_but_not_the_selection() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::TrackedJobsFetched(vec![
            tracked("1", TrackStatus::Applied),
            tracked("2", TrackStatus::PendingApply),
        ]),
    );
    let (state, _) = update(
        state,
        Msg::TrackedToggled {
            job_id: "1".to_owned(),
        },
    );
    assert!(!state.view().tracked.all_selected);

    let (state, _) = update(
        state,
        Msg::StatusFilterChanged {
            filter: Some(TrackStatus::Applied),
        },
    );
    let view = state.view();
    assert_eq!(view.tracked.rows.len(), 1);
    assert_eq!(view.tracked.total, 2);
    assert_eq!(view.tracked.selected_count, 1);
    assert!(view.tracked.all_selected);
}

#[test]
fn markdown_renders_selected_jobs_in_source_order() {
    init_logging();
    let mut first = job("https://example.com/a", "Acme");
    first.work_address = "12 Main St".to_owned();
    first.recruiter.name = "Pat".to_owned();
    first.recruiter.title = "Recruiter".to_owned();
    first.recruiter.status = "online".to_owned();
    let jobs = vec![
        first,
        job("https://example.com/b", "Globex"),
        job("https://example.com/c", "Initech"),
    ];

    let mut selection = Selection::new();
    selection.toggle("https://example.com/c");
    selection.toggle("https://example.com/a");

    let text = selection_markdown(&jobs, &selection);
    let a = text.find("https://example.com/a").unwrap();
    let c = text.find("https://example.com/c").unwrap();
    assert!(a < c);
    assert!(!text.contains("https://example.com/b"));
    assert!(text.contains("### Engineer at Acme | Acme"));
    assert!(text.contains("12 Main St"));
    assert!(text.contains("**Recruiter**: Pat · Recruiter (online)"));
}

#[test]
fn markdown_of_empty_selection_is_empty() {
    init_logging();
    let jobs = vec![job("a", "Acme")];
    assert!(selection_markdown(&jobs, &Selection::new()).is_empty());
}

#[test]
fn all_selected_requires_exact_cover() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::JobsFetched(vec![job("a", "Acme"), job("b", "Acme")]),
    );

    // Selecting both rows plus one stale key: counts match nothing else.
    let state = ["a", "b", "gone"].iter().fold(state, |state, url| {
        update(
            state,
            Msg::JobToggled {
                job_url: (*url).to_owned(),
            },
        )
        .0
    });
    let view = state.view();
    assert_eq!(view.jobs.selected_count, 3);
    assert!(!view.jobs.all_selected);
}

#[test]
fn fixed_columns_are_marked_and_always_visible() {
    init_logging();
    let view = AppState::new().view();
    for col in &view.jobs.columns {
        if col.fixed {
            assert!(col.visible);
        }
    }
    let fixed: usize = view.jobs.columns.iter().filter(|col| col.fixed).count();
    assert_eq!(fixed, 2);
}
