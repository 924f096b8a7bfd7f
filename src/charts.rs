use crate::columns::{ColumnMap, CoordFamily, Field};
use crate::dataset::{Dataset, Value};
use crate::filter::{narrow, EXCHANGER_RECOVERIES, ROTARY_RECOVERY};
use crate::selection::SelectionSet;

/// Fixed qualitative palette; slot `i` always draws in
/// `PALETTE[i % PALETTE.len()]`, in every chart and in the table font.
pub const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// The palette color assigned to a slot, as a CSS hex string.
pub fn slot_color(slot: usize) -> &'static str {
    PALETTE[slot % PALETTE.len()]
}

/// Category names of the heater capacity chart, by range index.
pub const RANGE_NAMES: [&str; 3] = ["Range 1", "Range 2", "Range 3"];

/// Number of synthesized points on a circular duct outline.
pub const CIRCLE_POINTS: usize = 100;

/// A connected polyline for one slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub slot: usize,
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// One point of the unit-area scatter.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaPoint {
    pub slot: usize,
    pub label: String,
    /// Category axis entry: `{brand} - Size {size}`.
    pub category: String,
    /// Cross-section area, the value axis.
    pub area: f64,
    /// Size rendered as point text.
    pub size_text: String,
}

/// One grouped bar of the heater capacity chart.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaterBar {
    pub slot: usize,
    pub label: String,
    /// 0-based index into [`RANGE_NAMES`].
    pub range: usize,
    pub value: f64,
}

/// Cross-section outlines for the supply-filter or supply-fan family.
///
/// A slot contributes only when every one of the family's five coordinate
/// pairs is resolved and carries numbers; points are emitted in pair-index
/// order so the polyline closes the authored outline.
pub fn geometry_series(
    dataset: &Dataset,
    map: &ColumnMap,
    selection: &SelectionSet,
    family: CoordFamily,
) -> Vec<Series> {
    let pairs = map.family_pairs(family);
    let mut series = Vec::new();

    for (slot, state) in selection.slots().iter().enumerate() {
        let Some(row) = state.row else { continue };
        let points: Vec<(f64, f64)> = pairs
            .iter()
            .filter_map(|pair| {
                let (x, y) = (*pair)?;
                Some((
                    dataset.value(row, x).as_number()?,
                    dataset.value(row, y).as_number()?,
                ))
            })
            .collect();
        if points.len() == pairs.len() {
            series.push(Series {
                slot,
                label: selection.chart_label(slot),
                points,
            });
        }
    }

    series
}

/// Duct-connection outlines: rectangular when any duct coordinate is
/// present and non-zero (each individually complete pair contributes, a
/// partial outline is allowed), otherwise a circle synthesized from a
/// positive diameter, centered at (r, r).
pub fn duct_series(dataset: &Dataset, map: &ColumnMap, selection: &SelectionSet) -> Vec<Series> {
    let pairs = map.family_pairs(CoordFamily::Duct);
    let diameter_col = map.get(Field::DuctDiameter);
    let mut series = Vec::new();

    for (slot, state) in selection.slots().iter().enumerate() {
        let Some(row) = state.row else { continue };

        let is_rect = pairs.iter().flatten().any(|&(x, y)| {
            [x, y]
                .iter()
                .any(|&c| matches!(dataset.value(row, c).as_number(), Some(v) if v != 0.0))
        });

        let points: Vec<(f64, f64)> = if is_rect {
            pairs
                .iter()
                .filter_map(|pair| {
                    let (x, y) = (*pair)?;
                    Some((
                        dataset.value(row, x).as_number()?,
                        dataset.value(row, y).as_number()?,
                    ))
                })
                .collect()
        } else {
            let diameter = diameter_col
                .and_then(|c| dataset.value(row, c).as_number())
                .filter(|&d| d > 0.0);
            match diameter {
                Some(d) => circle_points(d / 2.0),
                None => continue,
            }
        };

        if !points.is_empty() {
            series.push(Series {
                slot,
                label: selection.chart_label(slot),
                points,
            });
        }
    }

    series
}

fn circle_points(radius: f64) -> Vec<(f64, f64)> {
    (0..CIRCLE_POINTS)
        .map(|i| {
            let t = 2.0 * std::f64::consts::PI * i as f64 / (CIRCLE_POINTS - 1) as f64;
            (radius + radius * t.cos(), radius + radius * t.sin())
        })
        .collect()
}

/// Unit-area scatter: the dataset is re-queried by each slot's recorded
/// key tuple, because several rows can share the tuple at the chart's
/// finer grain (one point per unit size).
pub fn area_points(dataset: &Dataset, map: &ColumnMap, selection: &SelectionSet) -> Vec<AreaPoint> {
    let Some(area_col) = map.get(Field::AreaSupplyFilter) else {
        return Vec::new();
    };
    let Some(size_col) = map.get(Field::Size) else {
        return Vec::new();
    };

    let mut points = Vec::new();
    for (slot, state) in selection.slots().iter().enumerate() {
        let rows = requery_slot(dataset, map, &state.choices);
        let brand = state
            .choices
            .brand
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_default();
        for row in rows {
            let (Some(area), size) = (
                dataset.value(row, area_col).as_number(),
                dataset.value(row, size_col),
            ) else {
                continue;
            };
            if size.is_missing() {
                continue;
            }
            points.push(AreaPoint {
                slot,
                label: selection.area_label(slot),
                category: format!("{} - Size {}", brand, size),
                area,
                size_text: size.to_string(),
            });
        }
    }
    points
}

fn requery_slot(
    dataset: &Dataset,
    map: &ColumnMap,
    choices: &crate::filter::SlotChoices,
) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..dataset.row_count()).collect();
    let keys: [(Field, &Option<Value>); 6] = [
        (Field::Year, &choices.year),
        (Field::Quarter, &choices.quarter),
        (Field::Region, &choices.region),
        (Field::Brand, &choices.brand),
        (Field::UnitName, &choices.unit),
        (Field::Recovery, &choices.recovery),
    ];
    for (field, choice) in keys {
        if let (Some(col), Some(value)) = (map.get(field), choice.as_ref()) {
            rows = narrow(dataset, &rows, col, value);
        }
    }

    let recovery = choices.recovery.as_ref().and_then(Value::as_str);
    let sub = match recovery {
        Some(ROTARY_RECOVERY) => Some((Field::RotaryType, &choices.rotary_type)),
        Some(code) if EXCHANGER_RECOVERIES.contains(&code) => {
            Some((Field::Material, &choices.material))
        }
        _ => None,
    };
    if let Some((field, choice)) = sub {
        if let (Some(col), Some(value)) = (map.get(field), choice.as_ref()) {
            rows = narrow(dataset, &rows, col, value);
        }
    }
    rows
}

/// Heater capacity bars: a slot contributes only when all three capacity
/// ranges hold numbers.
pub fn heater_bars(dataset: &Dataset, map: &ColumnMap, selection: &SelectionSet) -> Vec<HeaterBar> {
    let ranges = [
        Field::CapacityRange1,
        Field::CapacityRange2,
        Field::CapacityRange3,
    ];
    let mut bars = Vec::new();

    for (slot, state) in selection.slots().iter().enumerate() {
        let Some(row) = state.row else { continue };
        let values: Vec<f64> = ranges
            .iter()
            .filter_map(|&f| map.get(f))
            .filter_map(|col| dataset.value(row, col).as_number())
            .collect();
        if values.len() != ranges.len() {
            continue;
        }
        for (range, value) in values.into_iter().enumerate() {
            bars.push(HeaterBar {
                slot,
                label: selection.chart_label(slot),
                range,
                value,
            });
        }
    }

    bars
}

#[cfg(feature = "web")]
pub use render::render_chart;

#[cfg(feature = "web")]
mod render {
    use super::*;
    use crate::report::ChartKind;
    use plotters::prelude::*;
    use std::error::Error;

    const CHART_WIDTH: u32 = 760;
    const GEOMETRY_HEIGHT: u32 = 640;
    const BAR_HEIGHT: u32 = 480;

    fn slot_rgb(slot: usize) -> RGBColor {
        const RGB: [(u8, u8, u8); 10] = [
            (0x63, 0x6E, 0xFA),
            (0xEF, 0x55, 0x3B),
            (0x00, 0xCC, 0x96),
            (0xAB, 0x63, 0xFA),
            (0xFF, 0xA1, 0x5A),
            (0x19, 0xD3, 0xF3),
            (0xFF, 0x66, 0x92),
            (0xB6, 0xE8, 0x80),
            (0xFF, 0x97, 0xFF),
            (0xFE, 0xCB, 0x52),
        ];
        let (r, g, b) = RGB[slot % RGB.len()];
        RGBColor(r, g, b)
    }

    /// Render one of the five charts as PNG bytes, or `None` when the
    /// current selection yields no data for it.
    pub fn render_chart(
        kind: ChartKind,
        dataset: &Dataset,
        map: &ColumnMap,
        selection: &SelectionSet,
    ) -> Result<Option<Vec<u8>>, Box<dyn Error>> {
        match kind {
            ChartKind::SupplyFilterSection => {
                let series = geometry_series(dataset, map, selection, CoordFamily::SupplyFilter);
                render_lines(
                    &series,
                    "Internal Cross Section area (Supply Filter)",
                    true,
                )
            }
            ChartKind::SupplyFanSection => {
                let series = geometry_series(dataset, map, selection, CoordFamily::SupplyFan);
                render_lines(&series, "Internal Cross Section area (Supply Fan)", true)
            }
            ChartKind::DuctConnection => {
                let series = duct_series(dataset, map, selection);
                render_lines(&series, "Supply Duct connection, mm", false)
            }
            ChartKind::UnitArea => {
                let points = area_points(dataset, map, selection);
                render_area_scatter(&points)
            }
            ChartKind::HeaterCapacity => {
                let bars = heater_bars(dataset, map, selection);
                render_heater_bars(&bars)
            }
        }
    }

    /// Connected outlines, one colored line per slot, 1:1-ish axes in mm.
    fn render_lines(
        series: &[Series],
        title: &str,
        markers: bool,
    ) -> Result<Option<Vec<u8>>, Box<dyn Error>> {
        if series.is_empty() {
            return Ok(None);
        }

        let all: Vec<(f64, f64)> = series.iter().flat_map(|s| s.points.iter().copied()).collect();
        let (x_range, y_range) = padded_ranges(&all);

        let tmp = tempfile::Builder::new().suffix(".png").tempfile()?;
        {
            let root = BitMapBackend::new(tmp.path(), (CHART_WIDTH, GEOMETRY_HEIGHT))
                .into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 24).into_font())
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(50)
                .build_cartesian_2d(x_range, y_range)?;

            chart
                .configure_mesh()
                .x_desc("Width (mm)")
                .y_desc("Height (mm)")
                .draw()?;

            for s in series {
                let color = slot_rgb(s.slot);
                chart
                    .draw_series(LineSeries::new(
                        s.points.iter().copied(),
                        color.stroke_width(2),
                    ))?
                    .label(s.label.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                    });
                if markers {
                    chart.draw_series(
                        s.points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                    )?;
                }
            }

            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.85))
                .border_style(&BLACK)
                .draw()?;
            root.present()?;
        }

        Ok(Some(std::fs::read(tmp.path())?))
    }

    /// Area vs. brand/size categories, one colored point group per slot,
    /// with the unit size annotated above each point.
    fn render_area_scatter(points: &[AreaPoint]) -> Result<Option<Vec<u8>>, Box<dyn Error>> {
        if points.is_empty() {
            return Ok(None);
        }

        // Category axis in first-appearance order.
        let mut categories: Vec<String> = Vec::new();
        for p in points {
            if !categories.contains(&p.category) {
                categories.push(p.category.clone());
            }
        }
        let cat_index =
            |cat: &str| categories.iter().position(|c| c == cat).unwrap_or(0) as f64;

        let min_x = points.iter().map(|p| p.area).fold(f64::INFINITY, f64::min);
        let max_x = points
            .iter()
            .map(|p| p.area)
            .fold(f64::NEG_INFINITY, f64::max);
        let pad = ((max_x - min_x) * 0.1).max(0.1);
        let x_range = (min_x - pad)..(max_x + pad);
        let y_range = -0.5..(categories.len() as f64 - 0.5);

        let tmp = tempfile::Builder::new().suffix(".png").tempfile()?;
        {
            let root =
                BitMapBackend::new(tmp.path(), (CHART_WIDTH, BAR_HEIGHT)).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(
                    "Unit Cross Section Area (Supply Filter) vs. Unit Size",
                    ("sans-serif", 20).into_font(),
                )
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(170)
                .build_cartesian_2d(x_range, y_range)?;

            let names = categories.clone();
            chart
                .configure_mesh()
                .x_desc("Unit Cross Section Area (m²)")
                .y_desc("Brand and Unit Size")
                .y_labels(categories.len())
                .y_label_formatter(&move |y: &f64| {
                    let i = y.round();
                    if i >= 0.0 && (y - i).abs() < 0.01 {
                        names.get(i as usize).cloned().unwrap_or_default()
                    } else {
                        String::new()
                    }
                })
                .draw()?;

            let mut seen_slots: Vec<usize> = Vec::new();
            for p in points {
                let color = slot_rgb(p.slot);
                let y = cat_index(&p.category);
                let anno = chart.draw_series(std::iter::once(Circle::new(
                    (p.area, y),
                    5,
                    color.filled(),
                )))?;
                if !seen_slots.contains(&p.slot) {
                    seen_slots.push(p.slot);
                    anno.label(p.label.clone()).legend(move |(x, y)| {
                        Circle::new((x + 9, y), 5, color.filled())
                    });
                }
                chart.draw_series(std::iter::once(Text::new(
                    p.size_text.clone(),
                    (p.area, y + 0.12),
                    ("sans-serif", 14).into_font(),
                )))?;
            }

            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.85))
                .border_style(&BLACK)
                .draw()?;
            root.present()?;
        }

        Ok(Some(std::fs::read(tmp.path())?))
    }

    /// Grouped bars: three capacity ranges on the x axis, one bar per slot
    /// in each group.
    fn render_heater_bars(bars: &[HeaterBar]) -> Result<Option<Vec<u8>>, Box<dyn Error>> {
        if bars.is_empty() {
            return Ok(None);
        }

        let mut slots: Vec<usize> = Vec::new();
        for b in bars {
            if !slots.contains(&b.slot) {
                slots.push(b.slot);
            }
        }
        let group_width = 0.8 / slots.len() as f64;
        let max_y = bars.iter().map(|b| b.value).fold(0.0, f64::max);

        let tmp = tempfile::Builder::new().suffix(".png").tempfile()?;
        {
            let root =
                BitMapBackend::new(tmp.path(), (CHART_WIDTH, BAR_HEIGHT)).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption("Electrical Heater Capacity (kW)", ("sans-serif", 22).into_font())
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(50)
                .build_cartesian_2d(-0.5f64..2.5f64, 0.0..(max_y * 1.1).max(1.0))?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(3)
                .x_label_formatter(&|x: &f64| {
                    let i = x.round();
                    if i >= 0.0 && (x - i).abs() < 0.01 {
                        RANGE_NAMES
                            .get(i as usize)
                            .map(|s| s.to_string())
                            .unwrap_or_default()
                    } else {
                        String::new()
                    }
                })
                .y_desc("Capacity (kW)")
                .draw()?;

            let mut labelled: Vec<usize> = Vec::new();
            for b in bars {
                let color = slot_rgb(b.slot);
                let pos = slots.iter().position(|&s| s == b.slot).unwrap_or(0) as f64;
                let center =
                    b.range as f64 + (pos + 0.5 - slots.len() as f64 / 2.0) * group_width;
                let half = group_width * 0.45;
                let anno = chart.draw_series(std::iter::once(Rectangle::new(
                    [(center - half, 0.0), (center + half, b.value)],
                    color.filled(),
                )))?;
                if !labelled.contains(&b.slot) {
                    labelled.push(b.slot);
                    anno.label(b.label.clone()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                    });
                }
            }

            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.85))
                .border_style(&BLACK)
                .draw()?;
            root.present()?;
        }

        Ok(Some(std::fs::read(tmp.path())?))
    }

    fn padded_ranges(points: &[(f64, f64)]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let pad_x = ((max_x - min_x) * 0.05).max(1.0);
        let pad_y = ((max_y - min_y) * 0.05).max(1.0);
        ((min_x - pad_x)..(max_x + pad_x), (min_y - pad_y)..(max_y + pad_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SlotChoices;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn coord_headers() -> Vec<String> {
        let mut headers = vec![
            "Year".to_string(),
            "Brand name".to_string(),
            "Unit name".to_string(),
            "Recovery type".to_string(),
            "Unit size".to_string(),
            "Duct connection Diameter [mm]".to_string(),
        ];
        for i in 1..=15 {
            headers.push(format!("x{}", i));
            headers.push(format!("y{}", i));
        }
        headers
    }

    /// One row with a full supply-filter outline, no fan outline, and a
    /// circular duct; one row with a partial rectangular duct.
    fn coord_dataset() -> Dataset {
        let headers = coord_headers();
        let mut circular = vec![
            num(2025.0),
            text("X"),
            text("U1"),
            text("HEX"),
            text("S1"),
            num(100.0),
        ];
        // Pairs 1-5 complete, 6-15 missing.
        for i in 1..=15 {
            if i <= 5 {
                circular.push(num(i as f64));
                circular.push(num(i as f64 * 10.0));
            } else {
                circular.push(Value::Empty);
                circular.push(Value::Empty);
            }
        }

        let mut partial_rect = vec![
            num(2025.0),
            text("Y"),
            text("U2"),
            text("HEX"),
            text("S1"),
            num(400.0),
        ];
        // Only duct pairs 11 and 12 present: rectangular wins over the
        // diameter even though the outline is partial.
        for i in 1..=15 {
            if i == 11 || i == 12 {
                partial_rect.push(num(i as f64));
                partial_rect.push(num(i as f64 + 1.0));
            } else {
                partial_rect.push(Value::Empty);
                partial_rect.push(Value::Empty);
            }
        }

        Dataset::from_rows(headers, vec![circular, partial_rect])
    }

    fn two_slots(ds: &Dataset) -> (ColumnMap, SelectionSet) {
        let map = ColumnMap::resolve(ds);
        let mut first = SlotChoices::default();
        first.brand = Some(text("X"));
        let mut second = SlotChoices::default();
        second.brand = Some(text("Y"));
        let sel = SelectionSet::build(ds, &map, &[first, second]);
        (map, sel)
    }

    #[test]
    fn geometry_needs_every_pair_of_the_family() {
        let ds = coord_dataset();
        let (map, sel) = two_slots(&ds);
        let filter = geometry_series(&ds, &map, &sel, CoordFamily::SupplyFilter);
        assert_eq!(filter.len(), 1);
        assert_eq!(filter[0].slot, 0);
        assert_eq!(filter[0].points.len(), 5);
        assert_eq!(filter[0].points[2], (3.0, 30.0));
        // No slot has the fan family complete.
        assert!(geometry_series(&ds, &map, &sel, CoordFamily::SupplyFan).is_empty());
    }

    #[test]
    fn duct_prefers_rect_and_falls_back_to_circle() {
        let ds = coord_dataset();
        let (map, sel) = two_slots(&ds);
        let series = duct_series(&ds, &map, &sel);
        assert_eq!(series.len(), 2);

        // Slot 1 (circular): 100 points on a radius-50 circle centered (50, 50).
        let circle = series.iter().find(|s| s.slot == 0).unwrap();
        assert_eq!(circle.points.len(), CIRCLE_POINTS);
        assert_eq!(circle.points[0], (100.0, 50.0));
        for &(x, y) in &circle.points {
            let r = ((x - 50.0).powi(2) + (y - 50.0).powi(2)).sqrt();
            assert!((r - 50.0).abs() < 1e-9);
        }
        // First and last point coincide: the outline closes.
        let first = circle.points[0];
        let last = circle.points[CIRCLE_POINTS - 1];
        assert!((first.0 - last.0).abs() < 1e-9 && (first.1 - last.1).abs() < 1e-9);

        // Slot 2 (rectangular, partial): only the two present pairs.
        let rect = series.iter().find(|s| s.slot == 1).unwrap();
        assert_eq!(rect.points, vec![(11.0, 12.0), (12.0, 13.0)]);
    }

    #[test]
    fn heater_bars_need_all_three_ranges() {
        let ds = Dataset::from_rows(
            vec![
                "Year".into(),
                "Brand name".into(),
                "Capacity range1 [kW]".into(),
                "Capacity range2 [kW]".into(),
                "Capacity range3 [kW]".into(),
            ],
            vec![
                vec![num(2025.0), text("X"), num(5.0), num(10.0), num(15.0)],
                vec![num(2025.0), text("Y"), num(6.0), Value::Empty, num(18.0)],
            ],
        );
        let (map, sel) = two_slots(&ds);
        let bars = heater_bars(&ds, &map, &sel);
        assert_eq!(bars.len(), 3);
        assert!(bars.iter().all(|b| b.slot == 0));
        assert_eq!(
            bars.iter().map(|b| b.value).collect::<Vec<_>>(),
            vec![5.0, 10.0, 15.0]
        );
    }

    #[test]
    fn area_scatter_requeries_all_rows_of_the_key_tuple() {
        // Two sizes under the same brand/unit/recovery tuple.
        let ds = Dataset::from_rows(
            vec![
                "Year".into(),
                "Brand name".into(),
                "Unit name".into(),
                "Recovery type".into(),
                "Unit size".into(),
                "Unit cross section area (Supply Filter) [m2]".into(),
            ],
            vec![
                vec![num(2025.0), text("X"), text("U1"), text("HEX"), text("S1"), num(0.9)],
                vec![num(2025.0), text("X"), text("U1"), text("HEX"), text("S2"), num(1.4)],
                vec![num(2025.0), text("Y"), text("U2"), text("HEX"), text("S1"), num(1.1)],
            ],
        );
        let (map, sel) = two_slots(&ds);
        let points = area_points(&ds, &map, &sel);
        // Slot 1 selected size S1 but both sizes of its tuple plot.
        let slot0: Vec<&AreaPoint> = points.iter().filter(|p| p.slot == 0).collect();
        assert_eq!(slot0.len(), 2);
        assert_eq!(slot0[0].category, "X - Size S1");
        assert_eq!(slot0[1].category, "X - Size S2");
        assert_eq!(slot0[1].area, 1.4);
        let slot1: Vec<&AreaPoint> = points.iter().filter(|p| p.slot == 1).collect();
        assert_eq!(slot1.len(), 1);
        assert_eq!(slot1[0].size_text, "S1");
    }

    #[test]
    fn palette_cycles_by_slot_index() {
        assert_eq!(slot_color(0), "#636EFA");
        assert_eq!(slot_color(1), "#EF553B");
        assert_eq!(slot_color(10), "#636EFA");
    }
}
