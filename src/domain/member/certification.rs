//! Certification grants, validity matching, and display names.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, Timestamp};

/// Identifier of a certification type (e.g. `rso`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificationType(String);

impl CertificationType {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name, falling back to the identifier itself.
    pub fn display_name(&self) -> &str {
        CertificationCatalog::display_name(&self.0)
    }
}

impl fmt::Display for CertificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CertificationType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An administrative grant of a certification to a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub member_id: MemberId,
    pub certification_type: CertificationType,
    pub earned_date: Timestamp,
    pub expires_at: Option<Timestamp>,
}

impl Certification {
    /// A grant is valid iff it never expires or expires strictly after `now`.
    pub fn is_valid_at(&self, now: &Timestamp) -> bool {
        match &self.expires_at {
            None => true,
            Some(expires_at) => expires_at.is_after(now),
        }
    }
}

/// Resolves a member's grants into the set of currently valid types.
pub struct CertificationMatcher;

impl CertificationMatcher {
    /// Drops expired grants and collapses renewals of the same type.
    pub fn valid_ids<'a, I>(certifications: I, now: &Timestamp) -> BTreeSet<CertificationType>
    where
        I: IntoIterator<Item = &'a Certification>,
    {
        certifications
            .into_iter()
            .filter(|cert| cert.is_valid_at(now))
            .map(|cert| cert.certification_type.clone())
            .collect()
    }

    /// Required types not present in `held`, preserving requirement order.
    pub fn missing(
        required: &[CertificationType],
        held: &BTreeSet<CertificationType>,
    ) -> Vec<CertificationType> {
        required
            .iter()
            .filter(|cert| !held.contains(*cert))
            .cloned()
            .collect()
    }
}

static DISPLAY_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("rso", "Range Safety Officer"),
        ("chief_rso", "Chief Range Safety Officer"),
        ("nra_basic_pistol", "NRA Basic Pistol"),
        ("nra_instructor", "NRA Certified Instructor"),
        ("cpr_first_aid", "CPR / First Aid"),
        ("hunter_education", "Hunter Education"),
        ("action_pistol_safety", "Action Pistol Safety Briefing"),
        ("youth_coach", "Youth Program Coach"),
        ("shotgun_instructor", "Shotgun Instructor"),
    ])
});

/// Static mapping from certification-type identifier to display name.
pub struct CertificationCatalog;

impl CertificationCatalog {
    /// Returns the display name, or the identifier for unknown types.
    pub fn display_name(id: &str) -> &str {
        DISPLAY_NAMES.get(id).copied().unwrap_or(id)
    }

    /// Returns true if the identifier is a known certification type.
    pub fn is_known(id: &str) -> bool {
        DISPLAY_NAMES.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(kind: &str, expires_at: Option<Timestamp>) -> Certification {
        Certification {
            member_id: MemberId::new(),
            certification_type: CertificationType::new(kind),
            earned_date: Timestamp::now().minus_days(400),
            expires_at,
        }
    }

    #[test]
    fn never_expiring_grant_is_valid() {
        assert!(grant("rso", None).is_valid_at(&Timestamp::now()));
    }

    #[test]
    fn grant_expiring_exactly_now_is_invalid() {
        let now = Timestamp::now();
        assert!(!grant("rso", Some(now)).is_valid_at(&now));
        assert!(grant("rso", Some(now.plus_secs(1))).is_valid_at(&now));
    }

    #[test]
    fn valid_ids_filters_expired_grants() {
        let now = Timestamp::now();
        let certs = vec![
            grant("rso", Some(now.minus_days(1))),
            grant("cpr_first_aid", Some(now.add_days(30))),
            grant("nra_basic_pistol", None),
        ];

        let valid = CertificationMatcher::valid_ids(&certs, &now);

        assert_eq!(valid.len(), 2);
        assert!(valid.contains(&CertificationType::new("cpr_first_aid")));
        assert!(valid.contains(&CertificationType::new("nra_basic_pistol")));
        assert!(!valid.contains(&CertificationType::new("rso")));
    }

    #[test]
    fn renewed_grant_keeps_type_valid() {
        let now = Timestamp::now();
        let certs = vec![
            grant("rso", Some(now.minus_days(365))),
            grant("rso", Some(now.add_days(365))),
        ];

        let valid = CertificationMatcher::valid_ids(&certs, &now);
        assert_eq!(valid.into_iter().collect::<Vec<_>>(), vec![CertificationType::new("rso")]);
    }

    #[test]
    fn missing_preserves_requirement_order() {
        let required = vec![
            CertificationType::new("rso"),
            CertificationType::new("cpr_first_aid"),
            CertificationType::new("chief_rso"),
        ];
        let held = BTreeSet::from([CertificationType::new("cpr_first_aid")]);

        let missing = CertificationMatcher::missing(&required, &held);
        assert_eq!(
            missing,
            vec![CertificationType::new("rso"), CertificationType::new("chief_rso")]
        );
    }

    #[test]
    fn catalog_falls_back_to_identifier() {
        assert_eq!(CertificationCatalog::display_name("rso"), "Range Safety Officer");
        assert_eq!(CertificationCatalog::display_name("underwater_basket"), "underwater_basket");
        assert!(CertificationCatalog::is_known("chief_rso"));
        assert!(!CertificationCatalog::is_known("underwater_basket"));
    }

    #[test]
    fn certification_type_display_name_uses_catalog() {
        assert_eq!(CertificationType::new("cpr_first_aid").display_name(), "CPR / First Aid");
    }
}
