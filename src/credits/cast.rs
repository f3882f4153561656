use serde::{Deserialize, Serialize};

use super::id_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub character: String,
    /// Billing position; 0 is top billing.
    #[serde(rename = "order")]
    pub billing_order: i64,
    #[serde(default, alias = "profile_path", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Top-billed slots shown as the main cast.
pub const MAIN_CAST_SIZE: usize = 5;
/// Supporting cast covers positions `MAIN_CAST_SIZE..SUPPORTING_CAST_END`.
pub const SUPPORTING_CAST_END: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CastGroups {
    pub main: Vec<CastMember>,
    pub supporting: Vec<CastMember>,
    pub other: Vec<CastMember>,
}

impl CastGroups {
    pub fn len(&self) -> usize {
        self.main.len() + self.supporting.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only the first `max` members in billing order, filling the main
    /// tier first. Tiers past the cap come back empty.
    pub fn limited(&self, max: usize) -> CastGroups {
        let mut remaining = max;
        let mut take = |tier: &[CastMember]| {
            let n = tier.len().min(remaining);
            remaining -= n;
            tier[..n].to_vec()
        };
        CastGroups {
            main: take(&self.main),
            supporting: take(&self.supporting),
            other: take(&self.other),
        }
    }
}

/// Split cast into main, supporting and remaining tiers by billing order.
///
/// The sort is stable, so members sharing a billing position keep input order.
pub fn group_cast_by_importance(cast: &[CastMember]) -> CastGroups {
    let mut sorted = cast.to_vec();
    sorted.sort_by_key(|member| member.billing_order);

    let other = sorted.split_off(SUPPORTING_CAST_END.min(sorted.len()));
    let supporting = sorted.split_off(MAIN_CAST_SIZE.min(sorted.len()));
    CastGroups {
        main: sorted,
        supporting,
        other,
    }
}
