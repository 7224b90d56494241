//! Donation goal sub-entity of the account aggregate.

use serde::{Deserialize, Serialize};
use shared::CompletionRecord;

use crate::domain::errors::DomainError;

/// The six fixed donation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonationCategory {
    #[serde(rename = "사회 복지")]
    SocialWelfare,
    #[serde(rename = "교육 문화")]
    EducationCulture,
    #[serde(rename = "환경 동물 보호")]
    EnvironmentAnimal,
    #[serde(rename = "의료 건강")]
    MedicalHealth,
    #[serde(rename = "국제 구호")]
    InternationalRelief,
    #[serde(rename = "공익 인권")]
    PublicInterestRights,
}

impl DonationCategory {
    pub const ALL: [DonationCategory; 6] = [
        DonationCategory::SocialWelfare,
        DonationCategory::EducationCulture,
        DonationCategory::EnvironmentAnimal,
        DonationCategory::MedicalHealth,
        DonationCategory::InternationalRelief,
        DonationCategory::PublicInterestRights,
    ];

    /// Display name, identical to the wire and storage form.
    pub fn label(&self) -> &'static str {
        match self {
            DonationCategory::SocialWelfare => "사회 복지",
            DonationCategory::EducationCulture => "교육 문화",
            DonationCategory::EnvironmentAnimal => "환경 동물 보호",
            DonationCategory::MedicalHealth => "의료 건강",
            DonationCategory::InternationalRelief => "국제 구호",
            DonationCategory::PublicInterestRights => "공익 인권",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| DomainError::InvalidCategory(s.to_string()))
    }
}

/// Goal state for one account. `category == None` means no goal is active,
/// in which case target and current are both zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonationGoal {
    pub category: Option<DonationCategory>,
    pub target_amount: f64,
    pub current_amount: f64,
    /// Lifetime sum of completed donations; never decreases.
    pub total_amount: f64,
    /// Append-only record of completed goals.
    pub history: Vec<CompletionRecord>,
}

impl DonationGoal {
    /// Wire form of the category: the label, or "none".
    pub fn category_label(&self) -> String {
        match self.category {
            Some(c) => c.label().to_string(),
            None => "none".to_string(),
        }
    }
}
