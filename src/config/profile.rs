use serde::{Deserialize, Serialize};

use crate::collector::SensorTable;
use crate::snmp::{WalkError, parse_oid};

/// Root OIDs of the four sensor columns. Defaults to the EMS status table of
/// the APC PowerNet-MIB.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub name_oid: String,
    pub location_oid: String,
    pub temperature_oid: String,
    pub humidity_oid: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "apc-ems-sensors".to_string(),
            name_oid: "1.3.6.1.4.1.318.1.1.10.4.2.3.1.3".to_string(),
            location_oid: "1.3.6.1.4.1.318.1.1.10.4.2.3.1.4".to_string(),
            temperature_oid: "1.3.6.1.4.1.318.1.1.10.4.2.3.1.5".to_string(),
            humidity_oid: "1.3.6.1.4.1.318.1.1.10.4.2.3.1.6".to_string(),
        }
    }
}

impl Profile {
    pub fn oid(&self, table: SensorTable) -> &str {
        match table {
            SensorTable::Name => &self.name_oid,
            SensorTable::Location => &self.location_oid,
            SensorTable::Temperature => &self.temperature_oid,
            SensorTable::Humidity => &self.humidity_oid,
        }
    }

    /// Checks that every table OID parses.
    pub fn validate(&self) -> Result<(), WalkError> {
        for table in SensorTable::ALL {
            parse_oid(self.oid(table))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        let profile = Profile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.oid(SensorTable::Name), "1.3.6.1.4.1.318.1.1.10.4.2.3.1.3");
        assert_eq!(profile.oid(SensorTable::Humidity), "1.3.6.1.4.1.318.1.1.10.4.2.3.1.6");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let profile: Profile = serde_yml::from_str("temperature_oid: \"1.3.6.1.4.1.9999.1\"\n").unwrap();
        assert_eq!(profile.temperature_oid, "1.3.6.1.4.1.9999.1");
        assert_eq!(profile.name_oid, Profile::default().name_oid);
    }

    #[test]
    fn invalid_oid_fails_validation() {
        let profile = Profile {
            location_oid: "1.3.x".to_string(),
            ..Profile::default()
        };
        assert!(profile.validate().is_err());
    }
}
