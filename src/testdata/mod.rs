//! Typed test-case store
//!
//! Scenario inputs live in a JSON document grouped into named sheets. Each
//! case carries an expected status, optional pre-condition data, optional
//! per-case data and an ordered step list. Data lookups merge the two data
//! blocks field-wise, with per-case values winning.

use crate::page::RegistrationData;
use crate::{Error, Result};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Expected outcome recorded for a case
///
/// Serializes lowercase; the capitalized spellings from the original sheets
/// are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[serde(alias = "Passed")]
    Passed,
    #[serde(alias = "Failed")]
    Failed,
    #[serde(alias = "Blocked")]
    Blocked,
}

/// Credential and profile fields a case may supply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl CaseData {
    /// Field-wise merge, values from `overlay` winning over `self`
    pub fn merged_with(&self, overlay: &CaseData) -> CaseData {
        CaseData {
            username: overlay.username.clone().or_else(|| self.username.clone()),
            password: overlay.password.clone().or_else(|| self.password.clone()),
            email: overlay.email.clone().or_else(|| self.email.clone()),
            full_name: overlay.full_name.clone().or_else(|| self.full_name.clone()),
        }
    }
}

/// One scenario row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub test_status: TestStatus,
    #[serde(default)]
    pub pre_condition: Option<CaseData>,
    #[serde(default)]
    pub test_data: Option<CaseData>,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl TestCase {
    /// Data the case should run with: pre-condition overlaid by per-case data
    pub fn effective_data(&self) -> CaseData {
        match (&self.pre_condition, &self.test_data) {
            (Some(pre), Some(data)) => pre.merged_with(data),
            (Some(pre), None) => pre.clone(),
            (None, Some(data)) => data.clone(),
            (None, None) => CaseData::default(),
        }
    }
}

/// A named group of cases
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// The whole store: sheet name to sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseStore {
    #[serde(flatten)]
    pub sheets: HashMap<String, Sheet>,
}

impl std::str::FromStr for CaseStore {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let store: CaseStore = serde_json::from_str(raw)?;
        debug!(sheets = store.sheets.len(), "case store parsed");
        Ok(store)
    }
}

impl CaseStore {
    /// Load a store from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::data_store(format!("cannot read {}: {e}", path.display()))
        })?;
        raw.parse()
    }

    /// Cases in a sheet carrying the given status
    pub fn cases_by_status(&self, sheet: &str, status: TestStatus) -> Vec<&TestCase> {
        self.sheets
            .get(sheet)
            .map(|s| {
                s.test_cases
                    .iter()
                    .filter(|c| c.test_status == status)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find a case by id across every sheet, returning the sheet name too
    pub fn case_by_id(&self, id: &str) -> Result<(&str, &TestCase)> {
        for (name, sheet) in &self.sheets {
            if let Some(case) = sheet.test_cases.iter().find(|c| c.id == id) {
                return Ok((name.as_str(), case));
            }
        }
        Err(Error::data_store(format!("no test case with id '{id}'")))
    }
}

/// Fresh, unique registration input for a new-account scenario
///
/// Usernames embed a timestamp plus a random suffix so repeated runs against
/// the same backend never collide.
pub fn random_registration() -> RegistrationData {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix: u32 = rand::thread_rng().gen_range(100..1000);

    RegistrationData {
        username: format!("test_user_{timestamp}{suffix}"),
        password: "Test@123456".to_string(),
        confirm_password: "Test@123456".to_string(),
        full_name: format!("Nguyễn Văn Test {suffix}"),
        email: format!("test{timestamp}{suffix}@example.com"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const SAMPLE: &str = r#"{
        "login": {
            "test_cases": [
                {
                    "id": "DN_01",
                    "test_status": "passed",
                    "pre_condition": { "username": "Hảo", "password": "123456" },
                    "steps": ["Mở trang đăng nhập", "Nhập tài khoản", "Nhấn Đăng nhập"]
                },
                {
                    "id": "DN_02",
                    "test_status": "failed",
                    "pre_condition": { "username": "Hảo", "password": "123456" },
                    "test_data": { "password": "sai_mat_khau" },
                    "steps": ["Nhập sai mật khẩu"]
                }
            ]
        },
        "register": {
            "test_cases": [
                {
                    "id": "DK_01",
                    "test_status": "blocked",
                    "test_data": { "email": "test@example.com" }
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_sheets_and_cases() {
        let store = CaseStore::from_str(SAMPLE).unwrap();

        assert_eq!(store.sheets.len(), 2);
        assert_eq!(store.sheets["login"].test_cases.len(), 2);
        assert_eq!(store.sheets["login"].test_cases[0].steps.len(), 3);
    }

    #[test]
    fn test_capitalized_status_spellings_are_accepted() {
        let store = CaseStore::from_str(
            r#"{
                "login": {
                    "test_cases": [
                        { "id": "TC_DN_01", "test_status": "Passed" },
                        { "id": "TC_DN_02", "test_status": "Failed" },
                        { "id": "TC_DN_03", "test_status": "Blocked" }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(store.cases_by_status("login", TestStatus::Passed).len(), 1);
        assert_eq!(store.cases_by_status("login", TestStatus::Failed).len(), 1);
        assert_eq!(store.cases_by_status("login", TestStatus::Blocked).len(), 1);

        // Output stays lowercase
        let json = serde_json::to_string(&TestStatus::Passed).unwrap();
        assert_eq!(json, "\"passed\"");
    }

    #[test]
    fn test_cases_by_status_filters() {
        let store = CaseStore::from_str(SAMPLE).unwrap();

        let passed = store.cases_by_status("login", TestStatus::Passed);
        assert_eq!(passed.len(), 1);
        assert_eq!(passed[0].id, "DN_01");

        assert!(store.cases_by_status("login", TestStatus::Blocked).is_empty());
        assert!(store.cases_by_status("missing", TestStatus::Passed).is_empty());
    }

    #[test]
    fn test_case_by_id_spans_sheets() {
        let store = CaseStore::from_str(SAMPLE).unwrap();

        let (sheet, case) = store.case_by_id("DK_01").unwrap();
        assert_eq!(sheet, "register");
        assert_eq!(case.test_status, TestStatus::Blocked);

        assert!(store.case_by_id("DN_99").is_err());
    }

    #[test]
    fn test_effective_data_overlays_pre_condition() {
        let store = CaseStore::from_str(SAMPLE).unwrap();
        let (_, case) = store.case_by_id("DN_02").unwrap();

        let data = case.effective_data();
        assert_eq!(data.username.as_deref(), Some("Hảo"));
        assert_eq!(data.password.as_deref(), Some("sai_mat_khau"));
    }

    #[test]
    fn test_random_registration_shape() {
        let data = random_registration();

        assert!(data.username.starts_with("test_user_"));
        assert_eq!(data.password, data.confirm_password);
        assert!(data.full_name.starts_with("Nguyễn Văn Test"));
        assert!(data.email.starts_with("test"));
        assert!(data.email.ends_with("@example.com"));
    }
}
