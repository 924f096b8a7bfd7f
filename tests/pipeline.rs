//! End-to-end scenarios over the filter → selection → report → export
//! pipeline, using an in-memory dataset shaped like the production sheet.

use ahu_compare::{
    assemble, duct_series, to_csv, ColumnMap, Dataset, ReportItem, SelectionSet, SlotChoices,
    Value, CIRCLE_POINTS, MISSING,
};

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn headers() -> Vec<String> {
    [
        "Year",
        "Quarter",
        "Region",
        "Brand name",
        "Unit name",
        "Recovery type",
        "Unit size",
        "Type",
        "Material",
        "Wheel diameter [mm]",
        "Distance between lamels [mm]",
        "Sens. efficiency at nominal balanced airflows_RRG [%]",
        "Sens. efficiency at opt balanced airflows (ErP)_RRG [%]",
        "Sens. efficiency at nominal balanced airflows_PCR/HEX [%]",
        "Sens. efficiency at opt balanced airflows (ErP)_PCR/HEX [%]",
        "Duct connection Diameter [mm]",
        "Minimum airflow [CMH]",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Rows A and B share the whole key tuple except recovery type:
/// A is a plate exchanger with a circular duct, B is a rotary wheel.
/// Row C has a brand whose unit name is missing, so its chain dies.
fn dataset() -> Dataset {
    let row_a = vec![
        num(2025.0),
        num(1.0),
        text("EU"),
        text("X"),
        text("U1"),
        text("HEX"),
        text("S1"),
        Value::Empty,
        text("Alu"),
        Value::Empty,
        num(2.5),
        Value::Empty,
        Value::Empty,
        num(80.0),
        num(82.0),
        num(100.0),
        num(500.0),
    ];
    let row_b = vec![
        num(2025.0),
        num(1.0),
        text("EU"),
        text("X"),
        text("U1"),
        text("RRG"),
        text("S1"),
        text("T1"),
        Value::Empty,
        num(900.0),
        Value::Empty,
        num(85.0),
        num(87.0),
        Value::Empty,
        Value::Empty,
        Value::Empty,
        num(500.0),
    ];
    let row_c = vec![
        num(2025.0),
        num(1.0),
        text("EU"),
        text("Z"),
        Value::Empty,
        text("HEX"),
        text("S9"),
        Value::Empty,
        text("Alu"),
        Value::Empty,
        Value::Empty,
        Value::Empty,
        Value::Empty,
        num(70.0),
        num(71.0),
        Value::Empty,
        num(900.0),
    ];
    Dataset::from_rows(headers(), vec![row_a, row_b, row_c])
}

fn slot(recovery: &str) -> SlotChoices {
    let mut c = SlotChoices::default();
    c.brand = Some(text("X"));
    c.recovery = Some(text(recovery));
    c
}

fn section_titles(items: &[ReportItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|i| match i {
            ReportItem::Section { title } => Some(title.clone()),
            _ => None,
        })
        .collect()
}

fn row_columns(items: &[ReportItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|i| match i {
            ReportItem::Row { column, .. } => Some(column.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn disagreeing_recoveries_keep_both_recovery_sections() {
    let ds = dataset();
    let map = ColumnMap::resolve(&ds);
    let sel = SelectionSet::build(&ds, &map, &[slot("HEX"), slot("RRG")]);
    assert!(!sel.all_empty());

    let items = assemble(&ds, &map, &sel);
    let titles = section_titles(&items);
    assert!(titles.contains(&"Rotary wheel".to_string()));
    assert!(titles.contains(&"PCR/HEX recovery exchanger".to_string()));
}

#[test]
fn circular_duct_renders_a_radius_fifty_circle() {
    let ds = dataset();
    let map = ColumnMap::resolve(&ds);
    let sel = SelectionSet::build(&ds, &map, &[slot("HEX"), slot("RRG")]);

    let series = duct_series(&ds, &map, &sel);
    assert_eq!(series.len(), 1, "only the HEX unit has a duct diameter");
    assert_eq!(series[0].slot, 0);
    assert_eq!(series[0].points.len(), CIRCLE_POINTS);
    for &(x, y) in &series[0].points {
        let r = ((x - 50.0).powi(2) + (y - 50.0).powi(2)).sqrt();
        assert!((r - 50.0).abs() < 1e-9);
    }
}

#[test]
fn mixed_export_carries_both_efficiency_families() {
    let ds = dataset();
    let map = ColumnMap::resolve(&ds);
    let sel = SelectionSet::build(&ds, &map, &[slot("HEX"), slot("RRG")]);
    let csv = to_csv(&ds, &map, &sel);

    // Rotary-side columns and exchanger-side columns both export; the slot
    // a column does not apply to holds that unit's (empty) cell.
    assert!(csv.lines().any(|l| l == "Wheel diameter [mm],,900"));
    assert!(csv
        .lines()
        .any(|l| l == "Sens. efficiency at nominal balanced airflows_RRG [%],,85"));
    assert!(csv
        .lines()
        .any(|l| l == "Sens. efficiency at nominal balanced airflows_PCR/HEX [%],80,"));
    // Identity columns stay structural, never data rows.
    assert!(!csv.lines().any(|l| l.starts_with("Type,")));
    assert!(!csv.lines().any(|l| l.starts_with("Material,")));
}

#[test]
fn all_hex_suppresses_the_rotary_side_everywhere() {
    let ds = dataset();
    let map = ColumnMap::resolve(&ds);
    let sel = SelectionSet::build(&ds, &map, &[slot("HEX"), slot("HEX")]);

    let items = assemble(&ds, &map, &sel);
    assert!(!section_titles(&items).contains(&"Rotary wheel".to_string()));
    let rows = row_columns(&items);
    assert!(!rows.contains(&"Wheel diameter [mm]".to_string()));
    assert!(!rows.iter().any(|c| c.contains("_RRG [%]")));

    let csv = to_csv(&ds, &map, &sel);
    assert!(!csv.contains("Rotary wheel"));
    assert!(!csv.lines().any(|l| l.starts_with("Type,")));
    assert!(!csv.lines().any(|l| l.contains("_RRG [%]")));
}

#[test]
fn dead_end_chain_yields_sentinels_without_panicking() {
    let ds = dataset();
    let map = ColumnMap::resolve(&ds);
    let mut dead = SlotChoices::default();
    // Brand Z has no unit name anywhere: the chain bottoms out there.
    dead.brand = Some(text("Z"));
    let sel = SelectionSet::build(&ds, &map, &[slot("HEX"), dead]);

    assert!(sel.slots()[1].row.is_none());
    assert!(!sel.all_empty());

    let items = assemble(&ds, &map, &sel);
    for item in &items {
        if let ReportItem::Row { values, .. } = item {
            assert_eq!(values.len(), 2);
            assert_eq!(values[1], MISSING);
        }
    }
    assert!(sel.cell_text(&ds, 1, Some(0)).is_none());

    let csv = to_csv(&ds, &map, &sel);
    assert!(csv.lines().any(|l| l == "Minimum airflow [CMH],500,-"));
}

#[test]
fn export_header_reproduces_the_selected_labels() {
    let ds = dataset();
    let map = ColumnMap::resolve(&ds);
    let sel = SelectionSet::build(&ds, &map, &[slot("HEX"), slot("RRG")]);
    let csv = to_csv(&ds, &map, &sel);

    let header: Vec<&str> = csv.lines().next().unwrap().split(',').collect();
    assert_eq!(header[0], "Parameter");
    assert_eq!(header[1], sel.label(0));
    assert_eq!(header[2], sel.label(1));
    assert_eq!(header[1], "X - U1 - S1");
}

#[test]
fn table_and_export_agree_cell_for_cell() {
    let ds = dataset();
    let map = ColumnMap::resolve(&ds);
    for recoveries in [["HEX", "RRG"], ["HEX", "HEX"], ["RRG", "RRG"]] {
        let sel = SelectionSet::build(&ds, &map, &[slot(recoveries[0]), slot(recoveries[1])]);
        let csv = to_csv(&ds, &map, &sel);
        for item in assemble(&ds, &map, &sel) {
            if let ReportItem::Row { column, values } = item {
                let found = csv.lines().any(|l| {
                    let cells: Vec<&str> = l.split(',').collect();
                    cells.first() == Some(&column.as_str())
                        && cells.get(1) == Some(&values[0].as_str())
                        && cells.get(2) == Some(&values[1].as_str())
                });
                assert!(found, "table row {:?} missing from export", column);
            }
        }
    }
}
