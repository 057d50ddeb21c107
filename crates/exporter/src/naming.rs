//! Output file naming.
//!
//! Files are named after the field's parameter category so a directory of
//! exports is readable at a glance:
//!
//! ```text
//! Temperature - discipline0 category0 messageIndex3.png
//! ```
//!
//! Category names come from a [`ParameterTable`] keyed by
//! `(discipline, category)`. The built-in table follows WMO GRIB2 Code
//! Table 4.1 and can be extended or overridden from YAML.

use crate::error::ExportResult;
use grid_common::FieldMetadata;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Name used when a `(discipline, category)` pair is not in the table.
pub const UNKNOWN_PARAMETER: &str = "Unknown";

/// Produces the output file name of a field.
pub trait FileNamer: Send + Sync {
    /// File name (not a path) for the `index`-th field of a batch.
    fn file_name(&self, index: usize, metadata: &FieldMetadata) -> String;
}

impl<F> FileNamer for F
where
    F: Fn(usize, &FieldMetadata) -> String + Send + Sync,
{
    fn file_name(&self, index: usize, metadata: &FieldMetadata) -> String {
        self(index, metadata)
    }
}

/// `(discipline, category)` -> human-readable category name.
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    names: HashMap<(u8, u8), String>,
}

#[derive(Debug, Deserialize)]
struct ParameterFile {
    #[serde(default)]
    parameters: Vec<ParameterEntry>,
}

#[derive(Debug, Deserialize)]
struct ParameterEntry {
    discipline: u8,
    category: u8,
    name: String,
}

const WMO_CATEGORIES: &[(u8, u8, &str)] = &[
    // Discipline 0: meteorological products
    (0, 0, "Temperature"),
    (0, 1, "Moisture"),
    (0, 2, "Momentum"),
    (0, 3, "Mass"),
    (0, 4, "Short-wave radiation"),
    (0, 5, "Long-wave radiation"),
    (0, 6, "Cloud"),
    (0, 7, "Thermodynamic stability indices"),
    (0, 8, "Kinematic stability indices"),
    (0, 9, "Temperature probabilities"),
    (0, 10, "Moisture probabilities"),
    (0, 11, "Momentum probabilities"),
    (0, 12, "Mass probabilities"),
    (0, 13, "Aerosols"),
    (0, 14, "Trace gases"),
    (0, 15, "Radar"),
    (0, 16, "Forecast radar imagery"),
    (0, 17, "Electrodynamics"),
    (0, 18, "Nuclear-radiology"),
    (0, 19, "Physical atmospheric properties"),
    (0, 20, "Atmospheric chemical constituents"),
    (0, 21, "Thermodynamic properties"),
    (0, 190, "CCITT IA5 string"),
    (0, 191, "Miscellaneous"),
    // Discipline 1: hydrological products
    (1, 0, "Hydrology basic products"),
    (1, 1, "Hydrology probabilities"),
    (1, 2, "Inland water and sediment properties"),
    // Discipline 2: land surface products
    (2, 0, "Vegetation-biomass"),
    (2, 1, "Agricultural-aquacultural special products"),
    (2, 2, "Transportation-related products"),
    (2, 3, "Soil products"),
    (2, 4, "Fire weather products"),
    (2, 5, "Land surface products"),
    // Discipline 3: satellite remote sensing products
    (3, 0, "Image format products"),
    (3, 1, "Quantitative products"),
    (3, 2, "Cloud properties"),
    (3, 3, "Flight rules conditions"),
    (3, 4, "Volcanic ash"),
    (3, 5, "Sea-surface temperature"),
    (3, 6, "Solar radiation"),
    // Discipline 4: space weather products
    (4, 0, "Space weather temperature"),
    (4, 1, "Space weather momentum"),
    (4, 2, "Charged particle mass and number"),
    (4, 3, "Electric and magnetic fields"),
    (4, 4, "Energetic particles"),
    (4, 5, "Space weather waves"),
    (4, 6, "Solar electromagnetic emissions"),
    (4, 7, "Terrestrial electromagnetic emissions"),
    (4, 8, "Imaging"),
    (4, 9, "Ion-neutral coupling"),
    // Discipline 10: oceanographic products
    (10, 0, "Waves"),
    (10, 1, "Currents"),
    (10, 2, "Ice"),
    (10, 3, "Surface properties"),
    (10, 4, "Sub-surface properties"),
    (10, 191, "Miscellaneous"),
];

impl ParameterTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-filled with WMO Code Table 4.1 category names.
    pub fn wmo() -> Self {
        let names = WMO_CATEGORIES
            .iter()
            .map(|&(d, c, name)| ((d, c), name.to_string()))
            .collect();
        Self { names }
    }

    /// Add or replace a category name.
    pub fn insert(&mut self, discipline: u8, category: u8, name: impl Into<String>) {
        self.names.insert((discipline, category), name.into());
    }

    /// Look up a category name, falling back to [`UNKNOWN_PARAMETER`].
    pub fn lookup(&self, discipline: u8, category: u8) -> &str {
        self.names
            .get(&(discipline, category))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_PARAMETER)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Merge entries from a YAML document:
    ///
    /// ```yaml
    /// parameters:
    ///   - { discipline: 0, category: 0, name: Air temperature }
    /// ```
    pub fn merge_yaml(&mut self, yaml: &str) -> ExportResult<usize> {
        let file: ParameterFile = serde_yaml::from_str(yaml)?;
        let count = file.parameters.len();
        for entry in file.parameters {
            self.insert(entry.discipline, entry.category, entry.name);
        }
        Ok(count)
    }

    /// Merge entries from a YAML file.
    pub fn merge_yaml_file(&mut self, path: impl AsRef<Path>) -> ExportResult<usize> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| crate::error::ExportError::io(path, e))?;
        self.merge_yaml(&contents)
    }
}

/// Replace characters that would change the directory a file lands in or
/// are not portable in file names.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// `"<ParameterName> - discipline<D> category<C> messageIndex<I>.png"`
#[derive(Debug, Clone)]
pub struct DefaultFileNamer {
    table: ParameterTable,
}

impl DefaultFileNamer {
    pub fn new(table: ParameterTable) -> Self {
        Self { table }
    }
}

impl Default for DefaultFileNamer {
    fn default() -> Self {
        Self::new(ParameterTable::wmo())
    }
}

impl FileNamer for DefaultFileNamer {
    fn file_name(&self, index: usize, metadata: &FieldMetadata) -> String {
        let name = self.table.lookup(metadata.discipline, metadata.category);
        sanitize_file_name(&format!(
            "{} - discipline{} category{} messageIndex{}.png",
            name, metadata.discipline, metadata.category, index
        ))
    }
}
