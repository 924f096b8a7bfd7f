use crate::columns::{ColumnMap, Field, LEAD_SECTION, SECTIONS};
use crate::dataset::Dataset;
use crate::selection::SelectionSet;
use serde::Serialize;
use std::collections::HashSet;

/// Columns that identify or decorate a unit rather than compare it, plus
/// the helpers consumed exclusively by charts. Never shown as table rows
/// (capacity note, base-frame height and cabling reappear through their
/// anchor injections).
const BASE_EXCLUDED: [Field; 14] = [
    Field::Brand,
    Field::BrandLogo,
    Field::UnitPhoto,
    Field::Year,
    Field::Quarter,
    Field::Region,
    Field::UnitName,
    Field::Recovery,
    Field::Size,
    Field::RotaryType,
    Field::Material,
    Field::CapacityNote,
    Field::BaseFrameHeight,
    Field::Cabling,
];

/// The five derived charts, keyed for the chart endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    SupplyFilterSection,
    SupplyFanSection,
    DuctConnection,
    UnitArea,
    HeaterCapacity,
}

impl ChartKind {
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "supply_filter_section" => Some(ChartKind::SupplyFilterSection),
            "supply_fan_section" => Some(ChartKind::SupplyFanSection),
            "duct_connection" => Some(ChartKind::DuctConnection),
            "unit_area" => Some(ChartKind::UnitArea),
            "heater_capacity" => Some(ChartKind::HeaterCapacity),
            _ => None,
        }
    }
}

/// One event of the assembled report stream. The table renderer and the
/// CSV exporter both consume this; the exporter treats charts as no-ops.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportItem {
    Section { title: String },
    Row { column: String, values: Vec<String> },
    Chart { kind: ChartKind },
}

/// Columns and section titles removed from the current render.
#[derive(Clone, Debug, Default)]
pub struct Exclusions {
    pub columns: HashSet<usize>,
    pub sections: HashSet<&'static str>,
}

impl Exclusions {
    /// Compute the exclusion set for one render.
    ///
    /// The base set is structural. On top of it, an aggregate over every
    /// slot's recovery type drops whichever recovery section cannot apply:
    /// all-HEX drops the rotary wheel section together with its type and
    /// RRG efficiency columns, all-RRG symmetrically drops the exchanger
    /// section with the material and PCR/HEX efficiency columns.
    pub fn compute(map: &ColumnMap, selection: &SelectionSet) -> Self {
        let mut columns: HashSet<usize> = BASE_EXCLUDED
            .iter()
            .filter_map(|&field| map.get(field))
            .collect();
        columns.extend(map.coord_columns());
        if let Some(area) = map.get(Field::AreaSupplyFilter) {
            columns.insert(area);
        }

        let mut sections: HashSet<&'static str> = HashSet::new();

        if selection.all_recovery_is("HEX") {
            for field in [
                Field::WheelDiameter,
                Field::LamelDistance,
                Field::RotaryType,
                Field::SensEffNominalRotary,
                Field::SensEffOptRotary,
            ] {
                if let Some(col) = map.get(field) {
                    columns.insert(col);
                }
            }
            sections.insert("Rotary wheel");
        }

        if selection.all_recovery_is("RRG") {
            for field in [
                Field::Material,
                Field::SensEffNominalExchanger,
                Field::SensEffOptExchanger,
            ] {
                if let Some(col) = map.get(field) {
                    columns.insert(col);
                }
            }
            sections.insert("PCR/HEX recovery exchanger");
        }

        Exclusions { columns, sections }
    }
}

/// Walk the dataset's columns once, in physical order, and emit the report
/// stream: section headers at their trigger columns (first appearance only,
/// unless aggregate-excluded), a row per visible column, and the five chart
/// events at their anchors.
///
/// Anchor behavior:
/// - the `Execution` column never becomes a row; it injects the unit-size
///   quantity row and the unit-area scatter, and the quantity column is
///   suppressed at its own physical position;
/// - the heating-elements row is followed by the three capacity-range rows,
///   the capacity note and the heater chart;
/// - the base-frame position injects the cabling row, the only place either
///   of those columns surfaces.
pub fn assemble(dataset: &Dataset, map: &ColumnMap, selection: &SelectionSet) -> Vec<ReportItem> {
    let exclusions = Exclusions::compute(map, selection);
    let mut emitted: HashSet<&'static str> = HashSet::new();
    let mut items = vec![ReportItem::Section {
        title: LEAD_SECTION.to_string(),
    }];

    let push_row = |items: &mut Vec<ReportItem>, col: usize| {
        items.push(ReportItem::Row {
            column: dataset.columns()[col].clone(),
            values: (0..selection.len())
                .map(|slot| selection.display_value(dataset, slot, Some(col)))
                .collect(),
        });
    };

    for col in 0..dataset.columns().len() {
        if map.is(col, Field::Execution) {
            if let Some(quantity) = map.get(Field::UnitSizeQuantity) {
                if !exclusions.columns.contains(&quantity) {
                    push_row(&mut items, quantity);
                }
            }
            items.push(ReportItem::Chart {
                kind: ChartKind::UnitArea,
            });
            continue;
        }

        if let Some(title) = section_triggered_at(map, col) {
            if !emitted.contains(title) && !exclusions.sections.contains(title) {
                items.push(ReportItem::Section {
                    title: title.to_string(),
                });
                emitted.insert(title);
            }
        }

        if !exclusions.columns.contains(&col) && !map.is(col, Field::UnitSizeQuantity) {
            push_row(&mut items, col);
        }

        if map.is(col, Field::InternalHeightSupplyFilter) {
            items.push(ReportItem::Chart {
                kind: ChartKind::SupplyFilterSection,
            });
        } else if map.is(col, Field::AreaSupplyFan) {
            items.push(ReportItem::Chart {
                kind: ChartKind::SupplyFanSection,
            });
        } else if map.is(col, Field::DuctHeight) {
            items.push(ReportItem::Chart {
                kind: ChartKind::DuctConnection,
            });
        } else if map.is(col, Field::HeatingElementsType) {
            for field in [
                Field::CapacityRange1,
                Field::CapacityRange2,
                Field::CapacityRange3,
                Field::CapacityNote,
            ] {
                if let Some(injected) = map.get(field) {
                    push_row(&mut items, injected);
                }
            }
            items.push(ReportItem::Chart {
                kind: ChartKind::HeaterCapacity,
            });
        } else if map.is(col, Field::BaseFrameHeight) {
            if let Some(cabling) = map.get(Field::Cabling) {
                push_row(&mut items, cabling);
            }
        }
    }

    items
}

fn section_triggered_at(map: &ColumnMap, col: usize) -> Option<&'static str> {
    SECTIONS
        .iter()
        .find(|&&(field, _)| map.is(col, field))
        .map(|&(_, title)| title)
}
