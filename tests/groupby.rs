use colframe::{
    Column, DataTable, FrameError, GroupKey, Table, Value, aggregate_groups, count_groups, groupby,
    sum_groups,
};
use pretty_assertions::assert_eq;
use test_log::test;

fn table(columns: Vec<Column>) -> DataTable {
    DataTable::new(columns).unwrap()
}

fn sales() -> DataTable {
    table(vec![
        Column::new("region", ["north", "south", "north", "east", "south"]),
        Column::new("rep", ["ann", "bo", "cy", "di", "ed"]),
        Column::new("units", [3, 1, 4, 1, 5]),
        Column::new("price", [2.5, 1.0, 2.0, 3.0, 1.5]),
    ])
}

#[test]
fn groupby_single_column() {
    let data = table(vec![Column::new("x", [1, 2, 2]), Column::new("y", [6, 7, 8])]);
    let groups = groupby(&data, "x").unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, GroupKey::Single(Value::Int64(1)));
    assert_eq!(groups[0].1, table(vec![Column::new("x", [1]), Column::new("y", [6])]));
    assert_eq!(groups[1].0, GroupKey::Single(Value::Int64(2)));
    assert_eq!(
        groups[1].1,
        table(vec![Column::new("x", [2, 2]), Column::new("y", [7, 8])])
    );
}

#[test]
fn sums_skip_text_columns() {
    let groups = groupby(&sales(), "region").unwrap();
    let sums = sum_groups(&groups, "region").unwrap();

    let regions: Vec<String> = sums.labels.iter().map(ToString::to_string).collect();
    assert_eq!(
        regions,
        vec!["Sums(region=north)", "Sums(region=south)", "Sums(region=east)"]
    );
    assert_eq!(
        sums.table,
        table(vec![
            Column::new("units", [7, 6, 1]),
            Column::new("price", [4.5, 2.5, 3.0]),
        ])
    );
    for skipped in &sums.skipped {
        assert_eq!(skipped, &vec!["region".to_string(), "rep".to_string()]);
    }
}

#[test]
fn counts_keep_every_column() {
    let groups = groupby(&sales(), "region").unwrap();
    let counts = count_groups(&groups, "region").unwrap();

    assert_eq!(counts.table.column_names(), vec!["region", "rep", "units", "price"]);
    assert_eq!(
        counts.table.column("rep").unwrap(),
        &[2, 2, 1].map(Value::Int64)
    );
}

#[test]
fn custom_reducer() {
    let max = |values: &[Value]| {
        values
            .iter()
            .map(|value| match value {
                Value::Int64(i) => Ok(*i),
                other => Err(FrameError::IncompatibleAggregation {
                    reason: format!("no maximum for {other}"),
                }),
            })
            .try_fold(i64::MIN, |acc, value| value.map(|value| acc.max(value)))
            .map(Value::Int64)
    };

    let groups = groupby(&sales(), ["region"]).unwrap();
    let maxima = aggregate_groups(&groups, ["region"], max, "Maxima").unwrap();

    assert_eq!(maxima.labels[0].name(), "Maxima");
    assert_eq!(maxima.table, table(vec![Column::new("units", [4, 5, 1])]));
}

#[test]
fn grouping_preserves_every_row_once() {
    let data = sales();
    let groups = groupby(&data, ["region", "units"]).unwrap();

    let total: usize = groups.iter().map(|(_, group)| group.row_count()).sum();
    assert_eq!(total, data.row_count());
    assert_eq!(groups.len(), 5);
}
