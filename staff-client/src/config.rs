//! Client configuration

use shared::{Department, Employee, Entity, MedicalStaff, Position};

/// Development defaults used when no environment override is supplied
pub const DEFAULT_EMPLOYEES_URL: &str = "http://localhost:3001/api/jpa/employees";
pub const DEFAULT_MEDICAL_STAFF_URL: &str = "http://192.168.1.67:3001/api/jpa/medical-staff";
pub const DEFAULT_DEPARTMENTS_URL: &str = "http://192.168.1.67:3001/api/jpa/departments";
pub const DEFAULT_POSITIONS_URL: &str = "http://192.168.1.67:3001/api/jpa/positions";

/// Client configuration for connecting to the staff API
///
/// Each entity group has its own base URL so the groups can live on
/// different hosts.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the employee resource (e.g. "http://localhost:3001/api/jpa/employees")
    pub employees_url: String,

    /// Base URL of the medical staff resource
    pub medical_staff_url: String,

    /// Base URL of the department resource
    pub departments_url: String,

    /// Base URL of the position resource
    pub positions_url: String,

    /// Request timeout in seconds; `None` keeps the transport default
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Derive every resource URL from one API prefix (e.g. "http://host:3001/api/jpa")
    pub fn new(api_base: impl AsRef<str>) -> Self {
        let base = api_base.as_ref().trim_end_matches('/');
        Self {
            employees_url: format!("{}/{}", base, Employee::RESOURCE),
            medical_staff_url: format!("{}/{}", base, MedicalStaff::RESOURCE),
            departments_url: format!("{}/{}", base, Department::RESOURCE),
            positions_url: format!("{}/{}", base, Position::RESOURCE),
            timeout: None,
        }
    }

    /// Load from the environment.
    ///
    /// `STAFF_API_BASE` moves all groups at once; the per-group variables
    /// override it.
    pub fn from_env() -> Self {
        let mut config = match std::env::var("STAFF_API_BASE") {
            Ok(base) if !base.trim().is_empty() => Self::new(base),
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("EMPLOYEE_API_BASE") {
            config.employees_url = url;
        }
        if let Ok(url) = std::env::var("MEDICAL_STAFF_API_BASE") {
            config.medical_staff_url = url;
        }
        if let Ok(url) = std::env::var("DEPARTMENT_API_BASE") {
            config.departments_url = url;
        }
        if let Ok(url) = std::env::var("POSITION_API_BASE") {
            config.positions_url = url;
        }
        config.timeout = std::env::var("STAFF_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok());

        config
    }

    /// Set the employee base URL
    pub fn with_employees_url(mut self, url: impl Into<String>) -> Self {
        self.employees_url = url.into();
        self
    }

    /// Set the medical staff base URL
    pub fn with_medical_staff_url(mut self, url: impl Into<String>) -> Self {
        self.medical_staff_url = url.into();
        self
    }

    /// Set the department base URL
    pub fn with_departments_url(mut self, url: impl Into<String>) -> Self {
        self.departments_url = url.into();
        self
    }

    /// Set the position base URL
    pub fn with_positions_url(mut self, url: impl Into<String>) -> Self {
        self.positions_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Base URL for a resource path segment (`employees`, `medical-staff`, ...)
    pub fn url_for(&self, resource: &str) -> Option<&str> {
        let url = match resource {
            r if r == Employee::RESOURCE => &self.employees_url,
            r if r == MedicalStaff::RESOURCE => &self.medical_staff_url,
            r if r == Department::RESOURCE => &self.departments_url,
            r if r == Position::RESOURCE => &self.positions_url,
            _ => return None,
        };
        Some(url.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            employees_url: DEFAULT_EMPLOYEES_URL.to_string(),
            medical_staff_url: DEFAULT_MEDICAL_STAFF_URL.to_string(),
            departments_url: DEFAULT_DEPARTMENTS_URL.to_string(),
            positions_url: DEFAULT_POSITIONS_URL.to_string(),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_resource_urls() {
        let config = ClientConfig::new("http://api.local:8080/api/jpa/");
        assert_eq!(config.employees_url, "http://api.local:8080/api/jpa/employees");
        assert_eq!(config.medical_staff_url, "http://api.local:8080/api/jpa/medical-staff");
        assert_eq!(config.departments_url, "http://api.local:8080/api/jpa/departments");
        assert_eq!(config.positions_url, "http://api.local:8080/api/jpa/positions");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_default_uses_development_hosts() {
        let config = ClientConfig::default();
        assert_eq!(config.employees_url, DEFAULT_EMPLOYEES_URL);
        assert_eq!(config.positions_url, DEFAULT_POSITIONS_URL);
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let config = ClientConfig::default().with_departments_url("http://x/departments/");
        assert_eq!(config.url_for("departments"), Some("http://x/departments"));
        assert_eq!(config.url_for("wards"), None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::default()
            .with_employees_url("http://a/employees")
            .with_timeout(5);
        assert_eq!(config.employees_url, "http://a/employees");
        assert_eq!(config.timeout, Some(5));
    }
}
