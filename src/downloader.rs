use crate::columns::ColumnMap;
use crate::dataset::Dataset;
use crate::report::{assemble, ReportItem};
use crate::selection::SelectionSet;

/// File name offered for the CSV download.
pub const EXPORT_FILE_NAME: &str = "technical_data_comparison.csv";

/// Export the comparison as CSV text.
///
/// Replays the report assembler's item stream so the file mirrors the
/// on-screen table cell for cell: section headers become a blank line plus
/// a title row, chart events are skipped, data rows carry one value per
/// slot. The leading header row labels each slot `brand - unit - size`.
///
/// # Arguments
/// * `dataset` - The loaded datasheet table
/// * `map` - Session column resolution
/// * `selection` - The slots of the current render
///
/// # Returns
/// * `String` - The CSV content, UTF-8, comma-separated, no index column
pub fn to_csv(dataset: &Dataset, map: &ColumnMap, selection: &SelectionSet) -> String {
    let n = selection.len();
    let mut grid: Vec<Vec<String>> = Vec::new();

    let mut header = vec!["Parameter".to_string()];
    header.extend((0..n).map(|slot| selection.label(slot)));
    grid.push(header);

    let mut first = true;
    for item in assemble(dataset, map, selection) {
        match item {
            ReportItem::Section { title } => {
                if !first {
                    grid.push(vec![String::new(); n + 1]);
                }
                let mut row = vec![title];
                row.extend(std::iter::repeat(String::new()).take(n));
                grid.push(row);
            }
            ReportItem::Row { column, values } => {
                let mut row = vec![column];
                row.extend(values);
                grid.push(row);
            }
            ReportItem::Chart { .. } => continue,
        }
        first = false;
    }

    let mut csv_content = String::new();
    for row in grid {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                csv_content.push(',');
            }
            csv_content.push_str(&escape_field(cell));
        }
        csv_content.push('\n');
    }
    csv_content
}

/// Quote a field when it contains a comma, quote or newline; embedded
/// quotes are doubled.
fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnMap;
    use crate::dataset::Value;
    use crate::filter::SlotChoices;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn sample() -> Dataset {
        Dataset::from_rows(
            vec![
                "Year".into(),
                "Brand name".into(),
                "Unit name".into(),
                "Unit size".into(),
                "Airflow, max".into(),
                "Eurovent Certificate".into(),
            ],
            vec![
                vec![
                    num(2025.0),
                    text("X"),
                    text("U1"),
                    text("S1"),
                    num(4200.0),
                    text("Yes"),
                ],
                vec![
                    num(2025.0),
                    text("Y"),
                    text("U2"),
                    text("S2"),
                    num(5100.0),
                    text("No"),
                ],
            ],
        )
    }

    fn selection(ds: &Dataset) -> (ColumnMap, SelectionSet) {
        let map = ColumnMap::resolve(ds);
        let mut first = SlotChoices::default();
        first.brand = Some(text("X"));
        let mut second = SlotChoices::default();
        second.brand = Some(text("Y"));
        let sel = SelectionSet::build(ds, &map, &[first, second]);
        (map, sel)
    }

    #[test]
    fn header_row_carries_slot_labels() {
        let ds = sample();
        let (map, sel) = selection(&ds);
        let csv = to_csv(&ds, &map, &sel);
        let first_line = csv.lines().next().unwrap();
        assert_eq!(first_line, "Parameter,X - U1 - S1,Y - U2 - S2");
    }

    #[test]
    fn sections_are_preceded_by_a_blank_line_except_the_first() {
        let ds = sample();
        let (map, sel) = selection(&ds);
        let csv = to_csv(&ds, &map, &sel);
        let lines: Vec<&str> = csv.lines().collect();
        // Header, then the lead section with no blank line before it.
        assert_eq!(lines[1], "General data,,");
        let cert = lines
            .iter()
            .position(|l| l.starts_with("Certification data"))
            .unwrap();
        assert_eq!(lines[cert - 1], ",,");
    }

    #[test]
    fn every_report_row_appears_in_the_export() {
        let ds = sample();
        let (map, sel) = selection(&ds);
        let csv = to_csv(&ds, &map, &sel);
        for item in assemble(&ds, &map, &sel) {
            if let ReportItem::Row { column, values } = item {
                let mut cells = vec![escape_field(&column)];
                cells.extend(values.iter().map(|v| escape_field(v)));
                let line = cells.join(",");
                assert!(csv.lines().any(|l| l == line), "missing row for {}", column);
            }
        }
        // The comma-bearing header is quoted.
        assert!(csv.lines().any(|l| l.starts_with("\"Airflow, max\"")));
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
