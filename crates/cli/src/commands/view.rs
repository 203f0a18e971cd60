//! Read-only commands: cart summary and plan list.

use std::fmt::Write as _;

use capebiz_client::FileStorage;
use capebiz_core::catalog::SubscriptionPlan;
use capebiz_core::{CartStorage, CartStore, Price, VAT_RATE};
use rust_decimal::Decimal;

use super::CommandError;

/// Print the cart.
#[allow(clippy::print_stdout)]
pub fn show(storage: FileStorage) -> Result<(), CommandError> {
    let cart = CartStore::load(storage)?;
    print!("{}", render_cart(&cart));
    Ok(())
}

/// Print the subscription plans on offer.
#[allow(clippy::print_stdout)]
pub fn plans() {
    print!("{}", render_plans());
}

/// Cart lines followed by subtotal, VAT and total.
pub fn render_cart<S: CartStorage>(cart: &CartStore<S>) -> String {
    if cart.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Cart ({} items)", cart.item_count());

    for (index, line) in cart.items().iter().enumerate() {
        let _ = write!(
            out,
            "  [{index}] {} - {} each x {} = {}",
            line.name,
            line.price(),
            line.quantity,
            Price::zar(line.line_total()),
        );
        if let Some(duration) = &line.duration {
            let _ = write!(out, " (Duration: {duration})");
        }
        out.push('\n');
    }

    let totals = cart.totals();
    let vat_percent = (VAT_RATE * Decimal::ONE_HUNDRED).normalize();
    let _ = writeln!(out, "Subtotal: {}", totals.subtotal);
    let _ = writeln!(out, "VAT ({vat_percent}%): {}", totals.tax);
    let _ = writeln!(out, "Total: {}", totals.grand_total);
    out
}

/// One line per plan with its monthly price and features.
pub fn render_plans() -> String {
    let mut out = String::new();
    for plan in SubscriptionPlan::ALL {
        let _ = writeln!(
            out,
            "{:<14}{:>10}/month  {}",
            plan.code,
            Price::zar(plan.price()).display(),
            plan.features.join(", ")
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use capebiz_core::{ItemKind, MemoryStorage};

    use super::*;

    #[test]
    fn test_render_empty_cart() {
        let cart = CartStore::load(MemoryStorage::new()).unwrap();
        assert_eq!(render_cart(&cart), "Your cart is empty\n");
    }

    #[test]
    fn test_render_cart_lines_and_totals() {
        let mut cart = CartStore::load(MemoryStorage::new()).unwrap();
        cart.add_item(
            "42",
            ItemKind::Boost,
            "Boost for Joe's Plumbing",
            Decimal::from(99),
            Some("7 days".to_string()),
        )
        .unwrap();
        cart.add_item("42", ItemKind::Boost, "Boost for Joe's Plumbing", Decimal::from(99), None)
            .unwrap();

        let rendered = render_cart(&cart);
        assert!(rendered.starts_with("Cart (2 items)\n"));
        assert!(rendered.contains(
            "  [0] Boost for Joe's Plumbing - R99.00 each x 2 = R198.00 (Duration: 7 days)\n"
        ));
        assert!(rendered.contains("Subtotal: R198.00\n"));
        assert!(rendered.contains("VAT (15%): R29.70\n"));
        assert!(rendered.contains("Total: R227.70\n"));
    }

    #[test]
    fn test_render_plans_lists_every_plan() {
        let rendered = render_plans();
        assert_eq!(rendered.lines().count(), SubscriptionPlan::ALL.len());
        assert!(rendered.contains("enterprise"));
        assert!(rendered.contains("R1599.00/month"));
    }
}
