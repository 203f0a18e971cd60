//! Line item kinds.

use serde::{Deserialize, Serialize};

/// What a line item purchases.
///
/// Serialized as a lowercase string. Kinds this crate does not know about are
/// preserved verbatim in [`ItemKind::Other`] so carts written by newer front
/// ends survive a reload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    /// Time-limited promotion of a business listing.
    Boost,
    /// Recurring listing subscription plan.
    Subscription,
    /// Any other purchasable kind.
    Other(String),
}

impl ItemKind {
    /// The wire name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Boost => "boost",
            Self::Subscription => "subscription",
            Self::Other(kind) => kind,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<String> for ItemKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "boost" => Self::Boost,
            "subscription" => Self::Subscription,
            _ => Self::Other(s),
        }
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Other(kind) => kind,
            known => known.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_parse() {
        assert_eq!("boost".parse::<ItemKind>().unwrap(), ItemKind::Boost);
        assert_eq!(
            "subscription".parse::<ItemKind>().unwrap(),
            ItemKind::Subscription
        );
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let kind: ItemKind = serde_json::from_str("\"gift_voucher\"").unwrap();
        assert_eq!(kind, ItemKind::Other("gift_voucher".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"gift_voucher\"");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ItemKind::Subscription).unwrap(),
            "\"subscription\""
        );
        assert_eq!(ItemKind::Boost.to_string(), "boost");
    }
}
