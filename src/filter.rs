use crate::columns::{ColumnMap, Field};
use crate::dataset::{Dataset, Value};
use serde::{Deserialize, Serialize};

/// Recovery-type code that unlocks the rotary-wheel "Type" step.
pub const ROTARY_RECOVERY: &str = "RRG";

/// Recovery-type codes that unlock the exchanger "Material" step.
pub const EXCHANGER_RECOVERIES: [&str; 2] = ["HEX", "PCR"];

/// The seven unconditional filter steps, in chain order:
/// (field, request key, dropdown label).
pub const FIXED_STEPS: [(Field, &str, &str); 7] = [
    (Field::Year, "year", "Year"),
    (Field::Quarter, "quarter", "Quarter"),
    (Field::Region, "region", "Region"),
    (Field::Brand, "brand", "Select Brand"),
    (Field::UnitName, "unit", "Unit name"),
    (Field::Recovery, "recovery", "Recovery type"),
    (Field::Size, "size", "Unit size"),
];

/// Distinct, non-missing values of `col` within `rows`, ascending.
///
/// The list is duplicate-free and bit-identical across runs for the same
/// input; it is exactly the option list the matching dropdown shows.
pub fn candidates(dataset: &Dataset, rows: &[usize], col: usize) -> Vec<Value> {
    let mut values: Vec<Value> = rows
        .iter()
        .map(|&r| dataset.value(r, col))
        .filter(|v| !v.is_missing())
        .cloned()
        .collect();
    values.sort();
    values.dedup();
    values
}

/// The subset of `rows` whose cell in `col` equals `value`.
///
/// Missing cells never match, so narrowing can only shrink the row set.
pub fn narrow(dataset: &Dataset, rows: &[usize], col: usize, value: &Value) -> Vec<usize> {
    rows.iter()
        .copied()
        .filter(|&r| {
            let cell = dataset.value(r, col);
            !cell.is_missing() && cell == value
        })
        .collect()
}

/// One comparison slot's dropdown choices, as sent by the client.
///
/// Any subset may be present; missing or stale entries fall back to the
/// first candidate of their step during chain evaluation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotChoices {
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub quarter: Option<Value>,
    #[serde(default)]
    pub region: Option<Value>,
    #[serde(default)]
    pub brand: Option<Value>,
    #[serde(default)]
    pub unit: Option<Value>,
    #[serde(default)]
    pub recovery: Option<Value>,
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(rename = "type", default)]
    pub rotary_type: Option<Value>,
    #[serde(default)]
    pub material: Option<Value>,
}

impl SlotChoices {
    pub fn get(&self, key: &str) -> Option<&Value> {
        match key {
            "year" => self.year.as_ref(),
            "quarter" => self.quarter.as_ref(),
            "region" => self.region.as_ref(),
            "brand" => self.brand.as_ref(),
            "unit" => self.unit.as_ref(),
            "recovery" => self.recovery.as_ref(),
            "size" => self.size.as_ref(),
            "type" => self.rotary_type.as_ref(),
            "material" => self.material.as_ref(),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: Value) {
        let slot = match key {
            "year" => &mut self.year,
            "quarter" => &mut self.quarter,
            "region" => &mut self.region,
            "brand" => &mut self.brand,
            "unit" => &mut self.unit,
            "recovery" => &mut self.recovery,
            "size" => &mut self.size,
            "type" => &mut self.rotary_type,
            "material" => &mut self.material,
            _ => return,
        };
        *slot = Some(value);
    }
}

/// One offered dropdown: its option list and the selection in effect.
#[derive(Clone, Debug, Serialize)]
pub struct StepState {
    pub key: &'static str,
    pub label: &'static str,
    pub options: Vec<Value>,
    pub selected: Value,
}

/// Outcome of running one slot's filter chain.
#[derive(Clone, Debug)]
pub struct ChainState {
    /// The steps actually offered, in chain order.
    pub steps: Vec<StepState>,
    /// Rows surviving every applied step; empty when the chain bottomed out.
    pub rows: Vec<usize>,
    /// The choices in effect after fallback defaults were applied.
    pub effective: SlotChoices,
}

impl ChainState {
    /// The slot's result row. The full key tuple is unique in the dataset,
    /// so a completed chain keeps at most one row.
    pub fn result_row(&self) -> Option<usize> {
        self.rows.first().copied()
    }
}

/// Run the cascading chain for one slot.
///
/// Each fixed step narrows the surviving rows by the chosen value of its
/// column; a step whose column is unresolved is skipped entirely. A choice
/// that is absent or no longer among the step's candidates falls back to
/// the first candidate, mirroring a dropdown that always holds a valid
/// selection. An empty candidate list ends the chain with an empty row set
/// and no further steps.
///
/// After `Unit size`, the recovery code picked at step six decides the
/// conditional eighth step: the rotary code offers "Type", the exchanger
/// codes offer "Material", anything else offers nothing.
pub fn evaluate_chain(dataset: &Dataset, map: &ColumnMap, choices: &SlotChoices) -> ChainState {
    let mut rows: Vec<usize> = (0..dataset.row_count()).collect();
    let mut steps = Vec::new();
    let mut effective = SlotChoices::default();

    for (field, key, label) in FIXED_STEPS {
        let Some(col) = map.get(field) else {
            continue;
        };
        let options = candidates(dataset, &rows, col);
        if options.is_empty() {
            rows.clear();
            return ChainState {
                steps,
                rows,
                effective,
            };
        }
        let selected = pick(choices.get(key), &options);
        rows = narrow(dataset, &rows, col, &selected);
        effective.set(key, selected.clone());
        steps.push(StepState {
            key,
            label,
            options,
            selected,
        });
    }

    let recovery = effective
        .recovery
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_owned);
    let conditional = match recovery.as_deref() {
        Some(ROTARY_RECOVERY) => Some((Field::RotaryType, "type", "Rotary wheel type")),
        Some(code) if EXCHANGER_RECOVERIES.contains(&code) => {
            Some((Field::Material, "material", "PCR/HEX lamels material"))
        }
        _ => None,
    };

    if let Some((field, key, label)) = conditional {
        if let Some(col) = map.get(field) {
            let options = candidates(dataset, &rows, col);
            // No candidates here is not a dead end: the step is just not
            // offered and the size-narrowed rows stand.
            if !options.is_empty() {
                let selected = pick(choices.get(key), &options);
                rows = narrow(dataset, &rows, col, &selected);
                effective.set(key, selected.clone());
                steps.push(StepState {
                    key,
                    label,
                    options,
                    selected,
                });
            }
        }
    }

    ChainState {
        steps,
        rows,
        effective,
    }
}

fn pick(chosen: Option<&Value>, options: &[Value]) -> Value {
    match chosen {
        Some(v) if options.contains(v) => v.clone(),
        _ => options[0].clone(),
    }
}
