//! Graduation requirement settings - per-user credit targets.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::UserId;
use crate::Time;

/// Per-user graduation requirement settings.
///
/// Holds the credit targets the progress engine measures against, the
/// prior-earned offsets entered manually (transfer credit and the like), and
/// the major plan in effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraduationRequirement {
    /// Owning user
    pub user_id: UserId,

    /// Target total credits to graduate, at least 1
    pub total_credits: u32,

    /// Target credits for the primary major track
    pub primary_major_credits: u32,

    /// Core sub-minimum within the primary major
    pub primary_major_required_min: u32,

    /// Target credits for the general-education track
    pub general_credits: u32,

    /// Credits earned outside the system, added as constant offsets
    pub earned: EarnedCredits,

    /// Major plan in effect; carries the secondary/minor targets when active
    pub major: MajorPlan,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

/// Credits earned prior to or outside the system.
///
/// Added uniformly to the corresponding computed track totals whether or not
/// a plan exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarnedCredits {
    /// Offset on the grand total
    #[serde(default)]
    pub total: u32,

    /// Offset on the primary major track
    #[serde(default)]
    pub primary_major: u32,

    /// Offset on the primary major's core sub-minimum
    #[serde(default)]
    pub primary_major_required: u32,

    /// Offset on the general-education track
    #[serde(default)]
    pub general: u32,
}

/// The major plan in effect.
///
/// Secondary-major and minor targets exist only on the variant that uses
/// them, so "double major implies secondary targets present" holds at the
/// type level rather than as a runtime check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "major_type", rename_all = "snake_case")]
pub enum MajorPlan {
    /// Single major
    Single,

    /// Double major with a secondary department
    Double {
        /// Target credits for the secondary major track
        secondary_major_credits: u32,
        /// Core sub-minimum within the secondary major
        secondary_major_required_min: u32,
        /// Prior-earned offset on the secondary major track
        #[serde(default)]
        earned_secondary_major_credits: u32,
        /// Prior-earned offset on the secondary major's core sub-minimum
        #[serde(default)]
        earned_secondary_major_required_credits: u32,
    },

    /// Minor in a secondary department
    Minor {
        /// Target credits for the minor track
        minor_credits: u32,
        /// Core sub-minimum within the minor
        minor_required_min: u32,
        /// Floor on primary-major credits that must still hold while
        /// pursuing the minor
        minor_primary_major_min: Option<u32>,
        /// Prior-earned offset on the minor track
        #[serde(default)]
        earned_minor_credits: u32,
        /// Prior-earned offset on the minor's core sub-minimum
        #[serde(default)]
        earned_minor_required_credits: u32,
    },
}

/// Discriminant of [`MajorPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MajorType {
    /// Single major
    Single,
    /// Double major
    Double,
    /// Major plus minor
    Minor,
}

impl MajorPlan {
    /// The discriminant of this plan.
    pub fn major_type(&self) -> MajorType {
        match self {
            MajorPlan::Single => MajorType::Single,
            MajorPlan::Double { .. } => MajorType::Double,
            MajorPlan::Minor { .. } => MajorType::Minor,
        }
    }
}

impl GraduationRequirement {
    /// Baseline requirement created when a user has no settings yet.
    pub fn baseline(user_id: UserId) -> Self {
        let now = chrono::Utc::now();
        Self {
            user_id,
            total_credits: 120,
            primary_major_credits: 63,
            primary_major_required_min: 24,
            general_credits: 30,
            earned: EarnedCredits::default(),
            major: MajorPlan::Single,
            created_at: now,
            updated_at: now,
        }
    }

    /// The discriminant of the major plan in effect.
    pub fn major_type(&self) -> MajorType {
        self.major.major_type()
    }

    /// Check document invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_credits == 0 {
            return Err(ValidationError::ZeroTotalCredits);
        }
        Ok(())
    }
}

/// Partial-update payload for a requirement upsert.
///
/// Every field is optional; omitted fields keep their current value. When
/// `major_type` switches the plan to a different variant, the new variant is
/// built from the fields provided in the same payload, with absent targets
/// defaulting to zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequirementUpdate {
    /// New major type, switching the plan variant when it differs
    pub major_type: Option<MajorType>,
    /// Target total credits
    pub total_credits: Option<u32>,
    /// Target primary major credits
    pub primary_major_credits: Option<u32>,
    /// Primary major core sub-minimum
    pub primary_major_required_min: Option<u32>,
    /// Target general-education credits
    pub general_credits: Option<u32>,
    /// Target secondary major credits (double)
    pub secondary_major_credits: Option<u32>,
    /// Secondary major core sub-minimum (double)
    pub secondary_major_required_min: Option<u32>,
    /// Target minor credits (minor)
    pub minor_credits: Option<u32>,
    /// Minor core sub-minimum (minor)
    pub minor_required_min: Option<u32>,
    /// Primary-major floor while pursuing a minor
    pub minor_primary_major_min: Option<u32>,
    /// Prior-earned offset on the grand total
    pub earned_total_credits: Option<u32>,
    /// Prior-earned offset on the primary major
    pub earned_primary_major_credits: Option<u32>,
    /// Prior-earned offset on general education
    pub earned_general_credits: Option<u32>,
    /// Prior-earned offset on the primary major core sub-minimum
    pub earned_primary_major_required_credits: Option<u32>,
    /// Prior-earned offset on the secondary major (double)
    pub earned_secondary_major_credits: Option<u32>,
    /// Prior-earned offset on the secondary major core sub-minimum (double)
    pub earned_secondary_major_required_credits: Option<u32>,
    /// Prior-earned offset on the minor (minor)
    pub earned_minor_credits: Option<u32>,
    /// Prior-earned offset on the minor core sub-minimum (minor)
    pub earned_minor_required_credits: Option<u32>,
}

impl RequirementUpdate {
    /// Merge this update into `base`, validate, and return the new document.
    pub fn apply(
        &self,
        base: &GraduationRequirement,
    ) -> Result<GraduationRequirement, ValidationError> {
        let mut req = base.clone();

        if let Some(v) = self.total_credits {
            req.total_credits = v;
        }
        if let Some(v) = self.primary_major_credits {
            req.primary_major_credits = v;
        }
        if let Some(v) = self.primary_major_required_min {
            req.primary_major_required_min = v;
        }
        if let Some(v) = self.general_credits {
            req.general_credits = v;
        }
        if let Some(v) = self.earned_total_credits {
            req.earned.total = v;
        }
        if let Some(v) = self.earned_primary_major_credits {
            req.earned.primary_major = v;
        }
        if let Some(v) = self.earned_primary_major_required_credits {
            req.earned.primary_major_required = v;
        }
        if let Some(v) = self.earned_general_credits {
            req.earned.general = v;
        }

        req.major = self.merged_major(&base.major);
        req.validate()?;
        req.updated_at = chrono::Utc::now();
        Ok(req)
    }

    fn merged_major(&self, base: &MajorPlan) -> MajorPlan {
        let target = self.major_type.unwrap_or(base.major_type());
        match target {
            MajorType::Single => MajorPlan::Single,
            MajorType::Double => {
                // Start from the existing variant when the type is unchanged,
                // otherwise from zeroed targets.
                let (mut credits, mut required_min, mut earned, mut earned_required) =
                    match *base {
                        MajorPlan::Double {
                            secondary_major_credits,
                            secondary_major_required_min,
                            earned_secondary_major_credits,
                            earned_secondary_major_required_credits,
                        } => (
                            secondary_major_credits,
                            secondary_major_required_min,
                            earned_secondary_major_credits,
                            earned_secondary_major_required_credits,
                        ),
                        _ => (0, 0, 0, 0),
                    };
                if let Some(v) = self.secondary_major_credits {
                    credits = v;
                }
                if let Some(v) = self.secondary_major_required_min {
                    required_min = v;
                }
                if let Some(v) = self.earned_secondary_major_credits {
                    earned = v;
                }
                if let Some(v) = self.earned_secondary_major_required_credits {
                    earned_required = v;
                }
                MajorPlan::Double {
                    secondary_major_credits: credits,
                    secondary_major_required_min: required_min,
                    earned_secondary_major_credits: earned,
                    earned_secondary_major_required_credits: earned_required,
                }
            }
            MajorType::Minor => {
                let (mut credits, mut required_min, mut floor, mut earned, mut earned_required) =
                    match *base {
                        MajorPlan::Minor {
                            minor_credits,
                            minor_required_min,
                            minor_primary_major_min,
                            earned_minor_credits,
                            earned_minor_required_credits,
                        } => (
                            minor_credits,
                            minor_required_min,
                            minor_primary_major_min,
                            earned_minor_credits,
                            earned_minor_required_credits,
                        ),
                        _ => (0, 0, None, 0, 0),
                    };
                if let Some(v) = self.minor_credits {
                    credits = v;
                }
                if let Some(v) = self.minor_required_min {
                    required_min = v;
                }
                if let Some(v) = self.minor_primary_major_min {
                    floor = Some(v);
                }
                if let Some(v) = self.earned_minor_credits {
                    earned = v;
                }
                if let Some(v) = self.earned_minor_required_credits {
                    earned_required = v;
                }
                MajorPlan::Minor {
                    minor_credits: credits,
                    minor_required_min: required_min,
                    minor_primary_major_min: floor,
                    earned_minor_credits: earned,
                    earned_minor_required_credits: earned_required,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_values() {
        let req = GraduationRequirement::baseline(UserId::new());
        assert_eq!(req.total_credits, 120);
        assert_eq!(req.primary_major_credits, 63);
        assert_eq!(req.primary_major_required_min, 24);
        assert_eq!(req.general_credits, 30);
        assert_eq!(req.earned.total, 0);
        assert_eq!(req.earned.primary_major, 0);
        assert!(matches!(req.major, MajorPlan::Single));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_apply_keeps_omitted_fields() {
        let base = GraduationRequirement::baseline(UserId::new());
        let update = RequirementUpdate {
            general_credits: Some(36),
            ..Default::default()
        };

        let merged = update.apply(&base).unwrap();
        assert_eq!(merged.general_credits, 36);
        assert_eq!(merged.total_credits, 120);
        assert_eq!(merged.primary_major_credits, 63);
        assert!(matches!(merged.major, MajorPlan::Single));
    }

    #[test]
    fn test_apply_switches_to_double() {
        let base = GraduationRequirement::baseline(UserId::new());
        let update = RequirementUpdate {
            major_type: Some(MajorType::Double),
            secondary_major_credits: Some(42),
            ..Default::default()
        };

        let merged = update.apply(&base).unwrap();
        match merged.major {
            MajorPlan::Double {
                secondary_major_credits,
                secondary_major_required_min,
                earned_secondary_major_credits,
                ..
            } => {
                assert_eq!(secondary_major_credits, 42);
                assert_eq!(secondary_major_required_min, 0);
                assert_eq!(earned_secondary_major_credits, 0);
            }
            other => panic!("expected double major, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_updates_existing_variant_fields() {
        let mut base = GraduationRequirement::baseline(UserId::new());
        base.major = MajorPlan::Minor {
            minor_credits: 21,
            minor_required_min: 9,
            minor_primary_major_min: Some(42),
            earned_minor_credits: 0,
            earned_minor_required_credits: 0,
        };
        let update = RequirementUpdate {
            earned_minor_credits: Some(6),
            ..Default::default()
        };

        let merged = update.apply(&base).unwrap();
        match merged.major {
            MajorPlan::Minor {
                minor_credits,
                minor_primary_major_min,
                earned_minor_credits,
                ..
            } => {
                assert_eq!(minor_credits, 21);
                assert_eq!(minor_primary_major_min, Some(42));
                assert_eq!(earned_minor_credits, 6);
            }
            other => panic!("expected minor plan, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_rejects_zero_total() {
        let base = GraduationRequirement::baseline(UserId::new());
        let update = RequirementUpdate {
            total_credits: Some(0),
            ..Default::default()
        };

        assert!(matches!(
            update.apply(&base),
            Err(ValidationError::ZeroTotalCredits)
        ));
    }

    #[test]
    fn test_major_plan_wire_tag() {
        let plan = MajorPlan::Double {
            secondary_major_credits: 36,
            secondary_major_required_min: 12,
            earned_secondary_major_credits: 0,
            earned_secondary_major_required_credits: 0,
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["major_type"], "double");
        assert_eq!(json["secondary_major_credits"], 36);

        let single: MajorPlan = serde_json::from_str("{\"major_type\":\"single\"}").unwrap();
        assert!(matches!(single, MajorPlan::Single));
    }
}
