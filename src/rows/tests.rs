use super::*;
use serde_json::json;

fn submissions(value: Value) -> Vec<RawSubmission> {
    serde_json::from_value(value).unwrap()
}

fn rows_from(value: Value) -> Rows {
    let mut rows = Rows::flatten(submissions(value));
    rows.sort_descending();
    rows
}

#[test]
fn submission_without_tasks_gives_one_placeholder_row() {
    let rows = Rows::flatten(submissions(json!([
        { "grp_main/date_jour": "2024-01-03", "grp_main/rep_taches": [] },
        { "grp_main/date_jour": "2024-01-04" },
    ])));

    assert_eq!(rows.len(), 2);
    for row in rows.iter() {
        assert_eq!(row.task, TaskFields::default());
    }
}

#[test]
fn one_row_per_task_sharing_submission_fields() {
    let rows = Rows::flatten(submissions(json!([{
        "grp_main/date_jour": "2024-01-02",
        "grp_main/bureau": "A",
        "grp_main/agent": "Awa",
        "_id": 12,
        "grp_main/rep_taches": [
            { "grp_main/rep_taches/tache": "T1", "grp_main/rep_taches/resultat": "en_cours" },
            { "grp_main/rep_taches/tache": "T2" },
            {},
        ]
    }])));

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.submission == rows[0].submission));
    assert_eq!(rows[0].submission.id, Some(json!(12)));
    assert_eq!(rows[0].task.tache, Some(json!("T1")));
    assert_eq!(rows[0].task.resultat, Some(json!("en_cours")));
    assert_eq!(rows[1].task.tache, Some(json!("T2")));
    assert_eq!(rows[1].task.resultat, None);
    assert_eq!(rows[2].task, TaskFields::default());
}

#[test]
fn row_count_is_sum_of_max_one_and_task_count() {
    let input = json!([
        { "grp_main/rep_taches": [{}, {}, {}] },
        { "grp_main/rep_taches": [] },
        { "grp_main/rep_taches": null },
        { "grp_main/rep_taches": [{}] },
        {},
    ]);
    let expected: usize = submissions(input.clone())
        .iter()
        .map(|s| s.tasks.len().max(1))
        .sum();

    assert_eq!(expected, 7);
    assert_eq!(Rows::flatten(submissions(input)).len(), expected);
}

#[test]
fn empty_input_gives_no_rows() {
    assert!(Rows::flatten(Vec::new()).is_empty());
}

#[test]
fn newest_date_first() {
    let rows = rows_from(json!([
        {
            "grp_main/date_jour": "2024-01-02",
            "grp_main/bureau": "A",
            "grp_main/rep_taches": [{ "grp_main/rep_taches/tache": "T1" }]
        },
        {
            "grp_main/date_jour": "2024-01-03",
            "grp_main/bureau": "B",
            "grp_main/rep_taches": []
        },
    ]));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].submission.date, Some(json!("2024-01-03")));
    assert_eq!(rows[0].submission.bureau, Some(json!("B")));
    assert_eq!(rows[0].task.tache, None);
    assert_eq!(rows[1].submission.date, Some(json!("2024-01-02")));
    assert_eq!(rows[1].submission.bureau, Some(json!("A")));
    assert_eq!(rows[1].task.tache, Some(json!("T1")));
}

#[test]
fn missing_bureau_sorts_below_present_bureau_on_same_date() {
    let rows = rows_from(json!([
        { "grp_main/date_jour": "2024-01-02", "_id": 1 },
        { "grp_main/date_jour": "2024-01-02", "grp_main/bureau": "A", "_id": 2 },
    ]));

    assert_eq!(rows[0].submission.id, Some(json!(2)));
    assert_eq!(rows[1].submission.id, Some(json!(1)));
    // the null itself survives sorting
    assert_eq!(rows[1].submission.bureau, None);
}

#[test]
fn agent_breaks_ties_on_date_and_bureau() {
    let rows = rows_from(json!([
        { "grp_main/date_jour": "2024-01-02", "grp_main/bureau": "A", "grp_main/agent": "Binta" },
        { "grp_main/date_jour": "2024-01-02", "grp_main/bureau": "A", "grp_main/agent": "Moussa" },
        { "grp_main/date_jour": "2024-01-02", "grp_main/bureau": "B", "grp_main/agent": "Awa" },
    ]));

    let agents: Vec<_> = rows.iter().map(|r| r.submission.agent.clone()).collect();
    assert_eq!(
        agents,
        vec![Some(json!("Awa")), Some(json!("Moussa")), Some(json!("Binta"))]
    );
}

#[test]
fn equal_keys_keep_emission_order() {
    let rows = rows_from(json!([
        {
            "grp_main/date_jour": "2024-01-02",
            "grp_main/rep_taches": [
                { "grp_main/rep_taches/tache": "first" },
                { "grp_main/rep_taches/tache": "second" },
            ]
        },
        { "grp_main/date_jour": "2024-01-05" },
        {
            "grp_main/date_jour": "2024-01-02",
            "grp_main/rep_taches": [{ "grp_main/rep_taches/tache": "third" }]
        },
    ]));

    let tasks: Vec<_> = rows.iter().map(|r| r.task.tache.clone()).collect();
    assert_eq!(
        tasks,
        vec![
            None,
            Some(json!("first")),
            Some(json!("second")),
            Some(json!("third")),
        ]
    );
}

#[test]
fn adjacent_rows_are_non_increasing() {
    let rows = rows_from(json!([
        { "grp_main/date_jour": "2023-12-31", "grp_main/bureau": "Z" },
        { "grp_main/bureau": "A" },
        { "grp_main/date_jour": "2024-02-01", "grp_main/agent": "Awa" },
        { "grp_main/date_jour": "2024-02-01", "grp_main/bureau": "C", "grp_main/agent": null },
        { "grp_main/date_jour": "2024-01-15", "grp_main/bureau": "C", "grp_main/agent": "Ibou" },
    ]));

    for pair in rows.windows(2) {
        assert!(pair[0].sort_key() >= pair[1].sort_key());
    }
}

#[test]
fn non_string_key_compares_by_json_text() {
    let row = OutputRow::new(
        SubmissionFields {
            date: Some(json!(20240102)),
            ..Default::default()
        },
        TaskFields::default(),
    );
    assert_eq!(row.sort_key().0, "20240102");
    assert_eq!(row.sort_key().1, "");
}

#[test]
fn empty_like_values_sort_as_empty_key() {
    for empty in [json!(0), json!(0.0), json!(false), json!(""), json!([]), json!({})] {
        let row = OutputRow::new(
            SubmissionFields {
                bureau: Some(empty.clone()),
                ..Default::default()
            },
            TaskFields::default(),
        );
        assert_eq!(row.sort_key().1, "", "{}", empty);
        // the value itself is emitted untouched
        assert_eq!(row.submission.bureau, Some(empty));
    }
}

#[test]
fn zero_bureau_ties_with_missing_bureau() {
    let rows = rows_from(json!([
        { "grp_main/date_jour": "2024-01-02", "grp_main/bureau": 0, "_id": 1 },
        { "grp_main/date_jour": "2024-01-02", "grp_main/bureau": "A", "_id": 2 },
        { "grp_main/date_jour": "2024-01-02", "_id": 3 },
    ]));

    let ids: Vec<_> = rows.iter().map(|r| r.submission.id.clone()).collect();
    assert_eq!(ids, vec![Some(json!(2)), Some(json!(1)), Some(json!(3))]);
}

#[test]
fn serializes_flat_keys_in_order() {
    let rows = Rows::flatten(submissions(json!([{
        "grp_main/date_jour": "2024-01-02",
        "grp_main/rep_taches": [{ "grp_main/rep_taches/tache": "T1" }]
    }])));

    let text = serde_json::to_string(&rows).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"[{"date":"2024-01-02","bureau":null,"agent_id":null,"agent":null,"#,
            r#""submission_time":null,"_id":null,"_uuid":null,"_status":null,"#,
            r#""tache":"T1","lien_activite":null,"code_activite":null,"resultat":null,"#,
            r#""commentaire":null,"task_timestamp":null}]"#
        )
    );
}
