//! Service record domain model
//!
//! Identifies the managed unit and where its definition is expected to live.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Suffix appended to the service name to form the unit name
pub const UNIT_SUFFIX: &str = ".service";

/// The single service this process controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    /// Unit name without the `.service` suffix (e.g. "nginx")
    name: String,

    /// Directory holding the unit definition (e.g. "/lib/systemd/system/")
    unit_directory: PathBuf,
}

impl ServiceRecord {
    /// Creates a record, rejecting an empty name or directory
    pub fn new(
        name: impl Into<String>,
        unit_directory: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let unit_directory = unit_directory.into();

        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }

        if unit_directory.to_string_lossy().trim().is_empty() {
            return Err(ConfigError::EmptyUnitDirectory);
        }

        Ok(Self {
            name,
            unit_directory,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_directory(&self) -> &Path {
        &self.unit_directory
    }

    /// Name passed to the supervisor, e.g. `nginx.service`
    pub fn unit_name(&self) -> String {
        format!("{}{}", self.name, UNIT_SUFFIX)
    }

    /// Full path of the unit definition file
    pub fn unit_file_path(&self) -> PathBuf {
        self.unit_directory.join(self.unit_name())
    }

    /// Whether the unit definition file exists
    pub fn is_installed(&self) -> bool {
        self.unit_file_path().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_name_and_path() {
        let record = ServiceRecord::new("nginx", "/lib/systemd/system/").unwrap();
        assert_eq!(record.unit_name(), "nginx.service");
        assert_eq!(
            record.unit_file_path(),
            PathBuf::from("/lib/systemd/system/nginx.service")
        );
    }

    #[test]
    fn test_directory_without_trailing_slash() {
        let record = ServiceRecord::new("nginx", "/lib/systemd/system").unwrap();
        assert_eq!(
            record.unit_file_path(),
            PathBuf::from("/lib/systemd/system/nginx.service")
        );
    }

    #[test]
    fn test_rejects_empty_fields() {
        assert!(matches!(
            ServiceRecord::new("", "/lib/systemd/system/"),
            Err(ConfigError::EmptyName)
        ));
        assert!(matches!(
            ServiceRecord::new("   ", "/lib/systemd/system/"),
            Err(ConfigError::EmptyName)
        ));
        assert!(matches!(
            ServiceRecord::new("nginx", ""),
            Err(ConfigError::EmptyUnitDirectory)
        ));
        assert!(matches!(
            ServiceRecord::new("nginx", "   "),
            Err(ConfigError::EmptyUnitDirectory)
        ));
    }

    #[test]
    fn test_is_installed() {
        let dir = tempfile::tempdir().unwrap();
        let record = ServiceRecord::new("demo", dir.path()).unwrap();
        assert!(!record.is_installed());

        std::fs::write(dir.path().join("demo.service"), "[Unit]\n").unwrap();
        assert!(record.is_installed());
    }
}
