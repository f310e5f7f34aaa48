/// One of the four index-aligned columns of the sensor status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorTable {
    Name,
    Location,
    Temperature,
    Humidity,
}

impl SensorTable {
    /// Walk order. Later tables are matched to records by row position,
    /// so `Name` always comes first.
    pub const ALL: [SensorTable; 4] = [
        SensorTable::Name,
        SensorTable::Location,
        SensorTable::Temperature,
        SensorTable::Humidity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorTable::Name => "name",
            SensorTable::Location => "location",
            SensorTable::Temperature => "temperature",
            SensorTable::Humidity => "humidity",
        }
    }
}

/// Correlated readings of one physical sensor, rebuilt on every scrape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorRecord {
    pub name: String,
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
}

impl SensorRecord {
    pub fn named(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }
}

/// Assigns the Kth value to the Kth record. Values past the last record are
/// dropped and records past the last value keep what they had.
///
/// Returns the number of dropped values.
pub fn assign_by_position<T>(
    records: &mut [SensorRecord],
    values: Vec<T>,
    mut set: impl FnMut(&mut SensorRecord, T),
) -> usize {
    let discarded = values.len().saturating_sub(records.len());
    for (record, value) in records.iter_mut().zip(values) {
        set(record, value);
    }
    discarded
}
