//! Company entity model.

use serde::{Deserialize, Serialize};

use quarry_core::CompanyId;

/// Subscription state of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompanyStatus {
    /// Paying and enabled.
    Active,
    /// Disabled by the platform.
    Suspended,
    /// Evaluation period.
    Trial,
}

/// A tenant boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique company identifier.
    pub id: CompanyId,
    /// Company name in Arabic.
    pub name: String,
    /// Company name in English.
    #[serde(default)]
    pub name_en: Option<String>,
    /// City of registration.
    #[serde(default)]
    pub city: Option<String>,
    /// Country of registration.
    #[serde(default)]
    pub country: Option<String>,
    /// Subscription state.
    #[serde(default)]
    pub status: Option<CompanyStatus>,
}

impl Company {
    /// Localized display name. `"en"` picks the English name when present.
    pub fn display_name(&self, locale: &str) -> &str {
        match (locale, self.name_en.as_deref()) {
            ("en", Some(name)) if !name.trim().is_empty() => name,
            _ => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_locale() {
        let company: Company = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "name": "محاجر الشمال",
            "name_en": "Northern Quarries",
            "city": "Riyadh",
            "status": "TRIAL",
            "max_users": 5
        }))
        .unwrap();
        assert_eq!(company.display_name("en"), "Northern Quarries");
        assert_eq!(company.display_name("ar"), "محاجر الشمال");
        assert_eq!(company.status, Some(CompanyStatus::Trial));
    }
}
