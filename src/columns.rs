use crate::dataset::Dataset;
use std::collections::HashMap;

/// Logical columns of the datasheet.
///
/// Header spelling drifts between dataset revisions, so every logical field
/// carries an ordered list of accepted physical spellings; the first one
/// present in the loaded table wins for the whole session. A field that
/// resolves to nothing silently disables every dependent dropdown, report
/// row and chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Quarter,
    Region,
    Brand,
    UnitName,
    Recovery,
    Size,
    BrandLogo,
    UnitPhoto,
    RotaryType,
    Material,
    UnitSizeQuantity,
    Execution,
    InternalHeightSupplyFilter,
    InternalWidthSupplyFilter,
    AreaSupplyFilter,
    AreaSupplyFan,
    DuctHeight,
    DuctWidth,
    DuctDiameter,
    CapacityRange1,
    CapacityRange2,
    CapacityRange3,
    CapacityNote,
    HeatingElementsType,
    SensEffNominalRotary,
    SensEffOptRotary,
    SensEffNominalExchanger,
    SensEffOptExchanger,
    WheelDiameter,
    LamelDistance,
    BaseFrameHeight,
    Cabling,
    EuroventCertificate,
    EuroventModelBox,
    Supply,
    InsulationMaterial,
    MinimumAirflow,
    MotorType,
    WaterHeaterMinRows,
    WaterCoolerMinRows,
    DxhMinRows,
    FilterTypeSupply,
    FilterTypeExhaust,
    SilencerCasing,
}

impl Field {
    /// Accepted header spellings, most recent revision first.
    pub fn aliases(self) -> &'static [&'static str] {
        use Field::*;
        match self {
            Year => &["Year"],
            Quarter => &["Quarter"],
            Region => &["Region"],
            Brand => &["Brand name", "Brand"],
            UnitName => &["Unit name", "Unit Name"],
            Recovery => &["Recovery type", "Recovery Type", "Recovery_type"],
            Size => &["Unit size", "Unit Size"],
            BrandLogo => &["Brand logo", "Brand Logo"],
            UnitPhoto => &["Unit photo", "Unit Photo", "Unit Photo Name"],
            RotaryType => &["Type"],
            Material => &["Material"],
            UnitSizeQuantity => &["Unit size quantity", "Unit Size quantity"],
            Execution => &["Execution"],
            InternalHeightSupplyFilter => &[
                "Internal Height (Supply Filter) [mm]",
                "Internal Height (Supply Filter)",
                "Internal Height Supply Filter",
            ],
            InternalWidthSupplyFilter => &["Internal Width (Supply Filter) [mm]"],
            AreaSupplyFilter => &["Unit cross section area (Supply Filter) [m2]"],
            AreaSupplyFan => &[
                "Unit cross section area (Supply Fan) [m2]",
                "Unit cross section area (Supply Fan)",
                "Unit cross section area Supply Fan",
            ],
            DuctHeight => &[
                "Duct connection Height [mm]",
                "Duct connection Height",
                "Duct Connection Height",
            ],
            DuctWidth => &["Duct connection Width [mm]", "Duct connection Width"],
            DuctDiameter => &[
                "Duct connection Diameter [mm]",
                "Duct connection Diameter",
                "Duct Connection Diameter",
            ],
            CapacityRange1 => &["Capacity range1 [kW]", "Capacity range1", "Capacity Range1"],
            CapacityRange2 => &["Capacity range2 [kW]", "Capacity range2", "Capacity Range2"],
            CapacityRange3 => &["Capacity range3 [kW]", "Capacity range3", "Capacity Range3"],
            CapacityNote => &["Capacity Note"],
            HeatingElementsType => &[
                "Heating elements type",
                "Heating Elements Type",
                "Heating_elements_type",
            ],
            SensEffNominalRotary => &[
                "Sens. efficiency at nominal balanced airflows_RRG [%]",
                "Sens. efficiency at nominal balanced airflows [%]",
            ],
            SensEffOptRotary => &[
                "Sens. efficiency at opt balanced airflows (ErP)_RRG [%]",
                "Sens. efficiency at opt balanced airflows (ErP) [%]",
            ],
            SensEffNominalExchanger => &[
                "Sens. efficiency at nominal balanced airflows_PCR/HEX [%]",
                "Sens. efficiency at nominal balanced airflows [%].1",
            ],
            SensEffOptExchanger => &[
                "Sens. efficiency at opt balanced airflows (ErP)_PCR/HEX [%]",
                "Sens. efficiency at opt balanced airflows (ErP) [%].1",
            ],
            WheelDiameter => &["Wheel diameter [mm]"],
            LamelDistance => &["Distance between lamels [mm]"],
            BaseFrameHeight => &[
                "Base frame/Feets height [mm]",
                "Base frame/Feets height  [mm]",
            ],
            Cabling => &["Cabling"],
            EuroventCertificate => &["Eurovent Certificate"],
            EuroventModelBox => &["Eurovent Model Box"],
            Supply => &["Supply"],
            InsulationMaterial => &["Insulation material"],
            MinimumAirflow => &["Minimum airflow [CMH]"],
            MotorType => &["Motor type"],
            WaterHeaterMinRows => &["Water heater_min rows"],
            WaterCoolerMinRows => &["Water cooler_min rows"],
            DxhMinRows => &["DXH_min rows"],
            FilterTypeSupply => &["Filter type_Supply"],
            FilterTypeExhaust => &["Filter type_Exhaust"],
            SilencerCasing => &["Silencer casing"],
        }
    }

    pub const ALL: &'static [Field] = {
        use Field::*;
        &[
            Year,
            Quarter,
            Region,
            Brand,
            UnitName,
            Recovery,
            Size,
            BrandLogo,
            UnitPhoto,
            RotaryType,
            Material,
            UnitSizeQuantity,
            Execution,
            InternalHeightSupplyFilter,
            InternalWidthSupplyFilter,
            AreaSupplyFilter,
            AreaSupplyFan,
            DuctHeight,
            DuctWidth,
            DuctDiameter,
            CapacityRange1,
            CapacityRange2,
            CapacityRange3,
            CapacityNote,
            HeatingElementsType,
            SensEffNominalRotary,
            SensEffOptRotary,
            SensEffNominalExchanger,
            SensEffOptExchanger,
            WheelDiameter,
            LamelDistance,
            BaseFrameHeight,
            Cabling,
            EuroventCertificate,
            EuroventModelBox,
            Supply,
            InsulationMaterial,
            MinimumAirflow,
            MotorType,
            WaterHeaterMinRows,
            WaterCoolerMinRows,
            DxhMinRows,
            FilterTypeSupply,
            FilterTypeExhaust,
            SilencerCasing,
        ]
    };
}

/// Report sections, in registry order: the first physical appearance of the
/// trigger column starts the section. A section whose trigger is unresolved
/// never appears.
pub const SECTIONS: &[(Field, &str)] = &[
    (Field::EuroventCertificate, "Certification data"),
    (Field::Supply, "Available configurations"),
    (Field::InsulationMaterial, "Casing"),
    (Field::BaseFrameHeight, "Construction details"),
    (Field::MinimumAirflow, "Airflows"),
    (Field::InternalWidthSupplyFilter, "Overall dimensions"),
    (Field::RotaryType, "Rotary wheel"),
    (Field::SensEffNominalExchanger, "PCR/HEX recovery exchanger"),
    (Field::MotorType, "Fan section data"),
    (Field::HeatingElementsType, "Electrical heater"),
    (Field::WaterHeaterMinRows, "Water heater"),
    (Field::WaterCoolerMinRows, "Water cooler"),
    (Field::DxhMinRows, "DX/DXH cooler"),
    (Field::FilterTypeSupply, "Supply Filter"),
    (Field::FilterTypeExhaust, "Exhaust Filter"),
    (Field::SilencerCasing, "Silencer data"),
];

/// Title shown above the table before any trigger column has been reached.
pub const LEAD_SECTION: &str = "General data";

/// Number of coordinate pairs carried by the dataset (x1/y1 .. x15/y15).
pub const COORD_PAIRS: usize = 15;

/// The three geometry families drawn from the coordinate pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordFamily {
    /// Pairs 1-5: internal cross section at the supply filter.
    SupplyFilter,
    /// Pairs 6-10: internal cross section at the supply fan.
    SupplyFan,
    /// Pairs 11-15: supply duct connection outline.
    Duct,
}

impl CoordFamily {
    /// 1-based pair indices belonging to this family.
    pub fn pair_indices(self) -> std::ops::RangeInclusive<usize> {
        match self {
            CoordFamily::SupplyFilter => 1..=5,
            CoordFamily::SupplyFan => 6..=10,
            CoordFamily::Duct => 11..=15,
        }
    }
}

/// Session-wide resolution of logical fields to physical column indices.
///
/// Resolved once per loaded dataset; every component queries it instead of
/// touching header strings directly.
#[derive(Clone, Debug)]
pub struct ColumnMap {
    fields: HashMap<Field, usize>,
    coords: Vec<Option<(usize, usize)>>,
}

impl ColumnMap {
    /// Resolve every logical field and coordinate pair against the loaded
    /// column headers. First alias match wins; no match means the field
    /// stays unresolved for the session.
    pub fn resolve(dataset: &Dataset) -> Self {
        let mut fields = HashMap::new();
        for &field in Field::ALL {
            if let Some(index) = field
                .aliases()
                .iter()
                .find_map(|name| dataset.column_index(name))
            {
                fields.insert(field, index);
            }
        }

        let mut coords = Vec::with_capacity(COORD_PAIRS);
        for i in 1..=COORD_PAIRS {
            let x = dataset
                .column_index(&format!("x{}", i))
                .or_else(|| dataset.column_index(&format!("X{}", i)));
            let y = dataset
                .column_index(&format!("y{}", i))
                .or_else(|| dataset.column_index(&format!("Y{}", i)));
            coords.push(match (x, y) {
                (Some(x), Some(y)) => Some((x, y)),
                _ => None,
            });
        }

        ColumnMap { fields, coords }
    }

    /// Physical column index of a logical field, if resolved.
    pub fn get(&self, field: Field) -> Option<usize> {
        self.fields.get(&field).copied()
    }

    /// Whether this physical column is the resolved home of `field`.
    pub fn is(&self, index: usize, field: Field) -> bool {
        self.get(field) == Some(index)
    }

    /// The (x, y) column indices of a 1-based coordinate pair. A pair is
    /// only usable when both halves resolved.
    pub fn coord_pair(&self, pair: usize) -> Option<(usize, usize)> {
        self.coords.get(pair - 1).copied().flatten()
    }

    /// The five (x, y) pairs of a geometry family, in pair order.
    pub fn family_pairs(&self, family: CoordFamily) -> Vec<Option<(usize, usize)>> {
        family.pair_indices().map(|i| self.coord_pair(i)).collect()
    }

    /// All resolved coordinate column indices, both halves of every pair.
    pub fn coord_columns(&self) -> Vec<usize> {
        self.coords
            .iter()
            .flatten()
            .flat_map(|&(x, y)| [x, y])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Dataset {
        Dataset::from_rows(names.iter().map(|s| s.to_string()).collect(), vec![])
    }

    #[test]
    fn first_present_alias_wins() {
        let ds = headers(&["Brand", "Brand name", "Unit Name"]);
        let map = ColumnMap::resolve(&ds);
        // "Brand name" is listed before "Brand", so it wins even though
        // "Brand" comes first physically.
        assert_eq!(map.get(Field::Brand), Some(1));
        assert_eq!(map.get(Field::UnitName), Some(2));
        assert_eq!(map.get(Field::Recovery), None);
    }

    #[test]
    fn coordinate_pairs_accept_case_variants() {
        let ds = headers(&["x1", "Y1", "X2", "y2", "x3"]);
        let map = ColumnMap::resolve(&ds);
        assert_eq!(map.coord_pair(1), Some((0, 1)));
        assert_eq!(map.coord_pair(2), Some((2, 3)));
        // y3 missing: the pair is unusable.
        assert_eq!(map.coord_pair(3), None);
        assert_eq!(map.coord_columns(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn family_pairs_follow_fixed_ranges() {
        let ds = headers(&["x6", "y6", "x11", "y11"]);
        let map = ColumnMap::resolve(&ds);
        let fan = map.family_pairs(CoordFamily::SupplyFan);
        assert_eq!(fan[0], Some((0, 1)));
        assert!(fan[1..].iter().all(Option::is_none));
        let duct = map.family_pairs(CoordFamily::Duct);
        assert_eq!(duct[0], Some((2, 3)));
    }

    #[test]
    fn section_registry_has_unique_titles() {
        let mut titles: Vec<&str> = SECTIONS.iter().map(|&(_, t)| t).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), SECTIONS.len());
    }

    #[test]
    fn sample_dataset_fixture_is_fully_keyed() {
        let ds = headers(&[
            "Year",
            "Quarter",
            "Region",
            "Brand name",
            "Unit name",
            "Recovery type",
            "Unit size",
        ]);
        let map = ColumnMap::resolve(&ds);
        for field in [
            Field::Year,
            Field::Quarter,
            Field::Region,
            Field::Brand,
            Field::UnitName,
            Field::Recovery,
            Field::Size,
        ] {
            assert!(map.get(field).is_some(), "{:?} should resolve", field);
        }
    }
}
