use kadrs::error::Result;
use kadrs::{
    BooleanColumn, Column, Float64Column, Frame, Int64Column, Mutations, StringColumn, Table,
};

fn people_frame() -> Frame {
    let mut table = Table::new();
    table
        .add_column(
            "name",
            Column::String(StringColumn::new(vec![
                "Alice".to_string(),
                "Bob".to_string(),
                "Charlie".to_string(),
                "Dave".to_string(),
            ])),
        )
        .unwrap();
    table
        .add_column(
            "team",
            Column::String(StringColumn::new(vec![
                "red".to_string(),
                "blue".to_string(),
                "red".to_string(),
                "blue".to_string(),
            ])),
        )
        .unwrap();
    table
        .add_column(
            "score",
            Column::Float64(Float64Column::new(vec![3.0, 1.0, 4.0, 2.0])),
        )
        .unwrap();
    Frame::new(table)
}

#[test]
fn test_select_and_drop() -> Result<()> {
    let frame = people_frame();

    let selected = frame.select(&["name", "score"])?;
    assert_eq!(selected.column_names(), &["name", "score"]);

    let dropped = frame.drop(&["score"])?;
    assert_eq!(dropped.column_names(), &["name", "team"]);
    // The source frame is untouched
    assert_eq!(frame.column_names(), &["name", "team", "score"]);
    Ok(())
}

#[test]
fn test_select_retains_grouping_columns() -> Result<()> {
    let frame = people_frame().group_by(&["team"])?;
    let selected = frame.select(&["score"])?;
    assert_eq!(selected.column_names(), &["team", "score"]);
    assert_eq!(selected.groups(), &["team"]);
    Ok(())
}

#[test]
fn test_drop_grouping_column_is_rejected() {
    let frame = people_frame().group_by(&["team"]).unwrap();
    assert!(frame.drop(&["team"]).is_err());
}

#[test]
fn test_rename_and_set_names() -> Result<()> {
    let frame = people_frame();

    let renamed = frame.rename(&[("score", "points")])?;
    assert_eq!(renamed.column_names(), &["name", "team", "points"]);

    let reset = frame.set_names(&["a", "b", "c"])?;
    assert_eq!(reset.column_names(), &["a", "b", "c"]);

    assert!(frame.set_names(&["too", "few"]).is_err());
    Ok(())
}

#[test]
fn test_filter_keeps_matching_rows_in_order() -> Result<()> {
    let frame = people_frame();
    let filtered = frame.filter(|t| {
        Ok(t.f64_values("score")?
            .into_iter()
            .map(|v| v.map_or(false, |x| x > 1.5))
            .collect())
    })?;

    assert_eq!(filtered.row_count(), 3);
    assert_eq!(
        filtered.table().str_values("name")?,
        vec![
            Some("Alice".to_string()),
            Some("Charlie".to_string()),
            Some("Dave".to_string())
        ]
    );
    Ok(())
}

#[test]
fn test_filter_mask_length_is_checked() {
    let frame = people_frame();
    let err = frame.filter(|_t| Ok(vec![true]));
    assert!(err.is_err());
}

#[test]
fn test_sort_respects_grouping() -> Result<()> {
    let frame = people_frame().group_by(&["team"])?;
    let sorted = frame.sort(&["score"])?;

    // Groups come first (blue before red), scores ascend within each
    assert_eq!(
        sorted.table().str_values("team")?,
        vec![
            Some("blue".to_string()),
            Some("blue".to_string()),
            Some("red".to_string()),
            Some("red".to_string())
        ]
    );
    assert_eq!(
        sorted.table().f64_values("score")?,
        vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]
    );
    assert_eq!(sorted.groups(), &["team"]);
    Ok(())
}

#[test]
fn test_sort_by_descending() -> Result<()> {
    let frame = people_frame();
    let sorted = frame.sort_by(&["score"], &[false])?;
    assert_eq!(
        sorted.table().f64_values("score")?,
        vec![Some(4.0), Some(3.0), Some(2.0), Some(1.0)]
    );
    Ok(())
}

#[test]
fn test_head_tail_slice() -> Result<()> {
    let frame = people_frame();

    assert_eq!(frame.head(2)?.row_count(), 2);
    assert_eq!(frame.tail(1)?.row_count(), 1);

    let sliced = frame.slice(&[2, 0])?;
    assert_eq!(
        sliced.table().str_values("name")?,
        vec![Some("Charlie".to_string()), Some("Alice".to_string())]
    );

    assert!(frame.slice(&[10]).is_err());
    Ok(())
}

#[test]
fn test_sample_n() -> Result<()> {
    let frame = people_frame();

    let sampled = frame.sample_n_seeded(2, false, 13)?;
    assert_eq!(sampled.row_count(), 2);

    // Oversampling without replacement caps at the row count
    let all = frame.sample_n_seeded(100, false, 13)?;
    assert_eq!(all.row_count(), 4);

    let with_replacement = frame.sample_n_seeded(10, true, 13)?;
    assert_eq!(with_replacement.row_count(), 10);
    Ok(())
}

#[test]
fn test_pipe_chains_whole_transformations() -> Result<()> {
    let result = people_frame()
        .pipe(|f| f.filter(|t| {
            Ok(t.f64_values("score")?
                .into_iter()
                .map(|v| v.map_or(false, |x| x > 1.0))
                .collect())
        }))?
        .pipe(|f| f.sort(&["score"]))?;

    assert_eq!(result.row_count(), 3);
    assert_eq!(
        result.table().f64_values("score")?,
        vec![Some(2.0), Some(3.0), Some(4.0)]
    );
    Ok(())
}

#[test]
fn test_group_carry_and_clear() -> Result<()> {
    let frame = people_frame().group_by(&["team"])?;

    // Carried through filter, sort, head and mutate-style operations
    let filtered = frame.filter(|t| Ok(vec![true; t.row_count()]))?;
    assert_eq!(filtered.groups(), &["team"]);
    assert_eq!(frame.head(2)?.groups(), &["team"]);

    // Cleared by ungroup and gather
    assert!(frame.ungroup().groups().is_empty());
    let gathered = frame.gather("key", "value", &["name", "team"])?;
    assert!(gathered.groups().is_empty());
    Ok(())
}

#[test]
fn test_failed_call_leaves_frame_usable() -> Result<()> {
    let frame = people_frame().group_by(&["team"])?;
    assert!(frame.drop(&["team"]).is_err());

    // The original frame still works after the failure
    assert_eq!(frame.row_count(), 4);
    assert_eq!(frame.groups(), &["team"]);
    let sorted = frame.sort(&["score"])?;
    assert_eq!(sorted.row_count(), 4);
    Ok(())
}

#[test]
fn test_boolean_mutate_and_filter() -> Result<()> {
    let frame = people_frame();
    let flag_high = Mutations::new().with("high", |t: &Table| {
        let values = t.f64_values("score")?;
        Ok(Column::Boolean(BooleanColumn::new(
            values
                .into_iter()
                .map(|v| v.map_or(false, |x| x > 2.5))
                .collect(),
        )))
    });

    let flagged = frame.mutate(&flag_high)?;
    match flagged.table().column("high")? {
        Column::Boolean(col) => assert_eq!(col.count_true(), 2),
        _ => panic!("expected a boolean column"),
    }

    let kept = flagged.filter(|t| {
        Ok(t.bool_values("high")?
            .into_iter()
            .map(|v| v.unwrap_or(false))
            .collect())
    })?;
    assert_eq!(kept.row_count(), 2);
    Ok(())
}

#[test]
fn test_display_shows_group_banner() {
    let frame = people_frame().group_by(&["team"]).unwrap();
    let text = format!("{}", frame);
    assert!(text.contains("With groups"));
    assert!(text.contains("team"));

    let mut long = Table::new();
    long.add_column(
        "n",
        Column::Int64(Int64Column::new((0..25).collect::<Vec<i64>>())),
    )
    .unwrap();
    let text = format!("{}", Frame::new(long));
    assert!(text.contains("more rows"));
}
