use serde::{Deserialize, Serialize};

/// A flagged person in the directory. Read-only fixture data: loaded once,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlaggedPerson {
    pub name: String,
    pub title: String,
    pub flags: u32,
    pub flaggers: u32,
    /// External profile link, if one was submitted with the flag.
    #[serde(default)]
    pub profile_url: Option<String>,
}

/// A flagged company in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlaggedCompany {
    pub name: String,
    pub industry: String,
    pub flags: u32,
    pub flaggers: u32,
    #[serde(default)]
    pub profile_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_deserializes_without_profile_url() {
        let person: FlaggedPerson = serde_json::from_str(
            r#"{"name": "Jane Roe", "title": "CTO at Acme", "flags": 12, "flaggers": 9}"#,
        )
        .unwrap();
        assert_eq!(person.name, "Jane Roe");
        assert_eq!(person.flags, 12);
        assert!(person.profile_url.is_none());
    }

    #[test]
    fn company_roundtrip() {
        let company = FlaggedCompany {
            name: "Acme Corp".into(),
            industry: "Logistics".into(),
            flags: 3,
            flaggers: 2,
            profile_url: Some("https://example.com/acme".into()),
        };
        let json = serde_json::to_string(&company).unwrap();
        let recovered: FlaggedCompany = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, company);
    }
}
