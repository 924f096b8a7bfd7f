use crate::columns::ColumnMap;
use crate::dataset::{Dataset, Value};
use crate::filter::{evaluate_chain, SlotChoices};

/// Fewest units a comparison can hold.
pub const MIN_UNITS: usize = 2;

/// Most units a comparison can hold.
pub const MAX_UNITS: usize = 10;

/// Placeholder shown (and exported) when a slot has no result row or the
/// requested column is absent.
pub const MISSING: &str = "-";

/// One resolved comparison slot: the effective choices that produced it and
/// its result row, if the chain completed.
#[derive(Clone, Debug)]
pub struct Slot {
    pub choices: SlotChoices,
    pub row: Option<usize>,
}

/// The N independently filtered slots of one render.
#[derive(Clone, Debug)]
pub struct SelectionSet {
    slots: Vec<Slot>,
}

/// Clamp a request to the supported slot count: at most [`MAX_UNITS`],
/// padded with default choices up to [`MIN_UNITS`].
pub fn clamp_requests(requested: &[SlotChoices]) -> Vec<SlotChoices> {
    let mut slots: Vec<SlotChoices> = requested.iter().take(MAX_UNITS).cloned().collect();
    while slots.len() < MIN_UNITS {
        slots.push(SlotChoices::default());
    }
    slots
}

impl SelectionSet {
    /// Evaluate every requested slot's chain against the dataset.
    pub fn build(dataset: &Dataset, map: &ColumnMap, requested: &[SlotChoices]) -> Self {
        let slots = clamp_requests(requested)
            .into_iter()
            .map(|choices| {
                let chain = evaluate_chain(dataset, map, &choices);
                Slot {
                    row: chain.result_row(),
                    choices: chain.effective,
                }
            })
            .collect();
        SelectionSet { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Whether every slot's chain bottomed out. The report and export are
    /// replaced by a warning in that case.
    pub fn all_empty(&self) -> bool {
        self.slots.iter().all(|s| s.row.is_none())
    }

    /// The display string for one slot and column: the cell rendered via
    /// `Display`, or [`MISSING`] when the slot has no row or the column is
    /// absent. Table and CSV both go through here, so they agree
    /// cell-for-cell.
    pub fn display_value(&self, dataset: &Dataset, slot: usize, col: Option<usize>) -> String {
        match (self.slots[slot].row, col) {
            (Some(row), Some(col)) => dataset.value(row, col).to_string(),
            _ => MISSING.to_string(),
        }
    }

    /// The raw cell text for one slot and column, for asset file names.
    /// Empty and whitespace-only cells yield `None`.
    pub fn cell_text(&self, dataset: &Dataset, slot: usize, col: Option<usize>) -> Option<String> {
        let (row, col) = (self.slots[slot].row?, col?);
        let text = dataset.value(row, col).to_string();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Column-header label for a slot: `brand - unit - size`.
    pub fn label(&self, slot: usize) -> String {
        let c = &self.slots[slot].choices;
        format!(
            "{} - {} - {}",
            choice_text(&c.brand),
            choice_text(&c.unit),
            choice_text(&c.size)
        )
    }

    /// Chart series label for the geometry and heater charts.
    pub fn chart_label(&self, slot: usize) -> String {
        let c = &self.slots[slot].choices;
        format!(
            "Unit {}: {} - {}",
            slot + 1,
            choice_text(&c.brand),
            choice_text(&c.size)
        )
    }

    /// Chart series label for the unit-area scatter.
    pub fn area_label(&self, slot: usize) -> String {
        format!(
            "Unit {}: {}",
            slot + 1,
            choice_text(&self.slots[slot].choices.brand)
        )
    }

    /// Whether every slot's effective recovery type equals `code`.
    pub fn all_recovery_is(&self, code: &str) -> bool {
        self.slots
            .iter()
            .all(|s| s.choices.recovery.as_ref().and_then(Value::as_str) == Some(code))
    }
}

fn choice_text(choice: &Option<Value>) -> String {
    match choice {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    }
}
