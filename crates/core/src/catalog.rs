//! Preset line items sold by the directory.
//!
//! Listing boosts have a fixed price and run for a week. Subscriptions run
//! for a month at the price of the chosen plan.

use rust_decimal::Decimal;

use crate::cart::NewLineItem;
use crate::types::{BusinessId, ItemKind, PlanId};

/// Price of a listing boost, in rand.
pub const BOOST_PRICE: Decimal = Decimal::from_parts(99, 0, 0, false, 0);

pub const BOOST_DURATION: &str = "7 days";

pub const SUBSCRIPTION_DURATION: &str = "30 days";

/// A boost for a business listing.
#[must_use]
pub fn boost(business_id: BusinessId, business_name: &str) -> NewLineItem {
    NewLineItem::new(
        business_id,
        ItemKind::Boost,
        format!("Boost for {business_name}"),
        BOOST_PRICE,
    )
    .with_duration(BOOST_DURATION)
}

/// A month of a subscription plan.
#[must_use]
pub fn subscription(plan_id: PlanId, plan_name: &str, price: Decimal) -> NewLineItem {
    NewLineItem::new(
        plan_id,
        ItemKind::Subscription,
        format!("{plan_name} Subscription"),
        price,
    )
    .with_duration(SUBSCRIPTION_DURATION)
}

/// A listing subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionPlan {
    pub code: &'static str,
    pub name: &'static str,
    /// Monthly price in whole rand.
    pub monthly_rand: u32,
    pub features: &'static [&'static str],
}

impl SubscriptionPlan {
    /// Every plan on offer, cheapest first.
    pub const ALL: &'static [Self] = &[
        Self {
            code: "free",
            name: "Free",
            monthly_rand: 0,
            features: &["Basic listing", "1 photo", "Contact information"],
        },
        Self {
            code: "starter",
            name: "Starter",
            monthly_rand: 199,
            features: &[
                "5 photos",
                "Website link",
                "Social media links",
                "Basic analytics",
            ],
        },
        Self {
            code: "professional",
            name: "Professional",
            monthly_rand: 499,
            features: &[
                "10 photos",
                "SEO optimization",
                "Featured placement",
                "Advanced analytics",
            ],
        },
        Self {
            code: "premium",
            name: "Premium",
            monthly_rand: 999,
            features: &[
                "20 photos",
                "Video showcase",
                "Priority support",
                "Detailed reports",
                "Monthly boost credit",
            ],
        },
        Self {
            code: "enterprise",
            name: "Enterprise",
            monthly_rand: 1599,
            features: &[
                "Unlimited photos",
                "Video showcase",
                "Dedicated support",
                "Custom analytics",
                "API access",
            ],
        },
    ];

    /// Look up a plan by code (case-insensitive).
    #[must_use]
    pub fn find(code: &str) -> Option<&'static Self> {
        Self::ALL
            .iter()
            .find(|plan| plan.code.eq_ignore_ascii_case(code))
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        Decimal::from(self.monthly_rand)
    }

    /// This plan as a cart line.
    #[must_use]
    pub fn line_item(&self) -> NewLineItem {
        subscription(PlanId::new(self.code), self.name, self.price())
    }
}
