//! Cart editing commands.
//!
//! # Usage
//!
//! ```bash
//! # Boost a listing for a week
//! capebiz boost --business-id 42 --business-name "Joe's Plumbing"
//!
//! # Add a month of the starter plan
//! capebiz subscribe starter
//!
//! # Change the quantity of the first line
//! capebiz update 0 3
//!
//! # Remove the second line
//! capebiz remove 1
//! ```

use capebiz_client::FileStorage;
use capebiz_core::catalog::{self, SubscriptionPlan};
use capebiz_core::{BusinessId, ItemKind, NewLineItem};
use rust_decimal::Decimal;

use super::{CommandError, open_cart};

/// Add one unit of an arbitrary item.
pub fn add(
    storage: FileStorage,
    id: &str,
    kind: &str,
    name: &str,
    price: Decimal,
    duration: Option<String>,
) -> Result<(), CommandError> {
    let mut cart = open_cart(storage)?;
    cart.add_item(id, ItemKind::from(kind.to_owned()), name, price, duration)?;
    Ok(())
}

/// Add a listing boost.
pub fn boost(
    storage: FileStorage,
    business_id: &str,
    business_name: &str,
) -> Result<(), CommandError> {
    add_line(
        storage,
        catalog::boost(BusinessId::new(business_id), business_name),
    )
}

/// Add a month of a subscription plan from the catalog.
pub fn subscribe(storage: FileStorage, plan_code: &str) -> Result<(), CommandError> {
    let plan = SubscriptionPlan::find(plan_code)
        .ok_or_else(|| CommandError::UnknownPlan(plan_code.to_owned()))?;
    add_line(storage, plan.line_item())
}

fn add_line(storage: FileStorage, item: NewLineItem) -> Result<(), CommandError> {
    let mut cart = open_cart(storage)?;
    cart.add_line(item)?;
    Ok(())
}

/// Remove the line at `index`. Out-of-range indices are ignored.
pub fn remove(storage: FileStorage, index: usize) -> Result<(), CommandError> {
    let mut cart = open_cart(storage)?;
    if cart.remove_item(index)?.is_none() {
        tracing::debug!(index, "No cart line at index");
    }
    Ok(())
}

/// Set the quantity of the line at `index`. Zero and out-of-range indices are
/// ignored.
pub fn update(storage: FileStorage, index: usize, quantity: u32) -> Result<(), CommandError> {
    let mut cart = open_cart(storage)?;
    if !cart.update_quantity(index, quantity)? {
        tracing::debug!(index, quantity, "Quantity update ignored");
    }
    Ok(())
}

/// Add one to the quantity of the line at `index`.
pub fn increment(storage: FileStorage, index: usize) -> Result<(), CommandError> {
    let mut cart = open_cart(storage)?;
    if let Some(quantity) = cart.get(index).map(|line| line.quantity.saturating_add(1)) {
        cart.update_quantity(index, quantity)?;
    }
    Ok(())
}

/// Take one off the quantity of the line at `index`, removing the line when
/// its last unit goes.
pub fn decrement(storage: FileStorage, index: usize) -> Result<(), CommandError> {
    let mut cart = open_cart(storage)?;
    match cart.get(index).map(|line| line.quantity) {
        Some(1) => {
            cart.remove_item(index)?;
        }
        Some(quantity) => {
            cart.update_quantity(index, quantity - 1)?;
        }
        None => {}
    }
    Ok(())
}

/// Empty the cart.
pub fn clear(storage: FileStorage) -> Result<(), CommandError> {
    let mut cart = open_cart(storage)?;
    cart.clear_cart()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use capebiz_core::CartStore;

    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("capebiz-cli-{}", uuid::Uuid::new_v4()))
            .join("storage.json")
    }

    fn reload(path: &PathBuf) -> CartStore<FileStorage> {
        CartStore::load(FileStorage::new(path)).unwrap()
    }

    #[test]
    fn test_decrement_removes_last_unit() {
        let path = temp_path();
        boost(FileStorage::new(&path), "42", "Joe's Plumbing").unwrap();
        boost(FileStorage::new(&path), "42", "Joe's Plumbing").unwrap();

        decrement(FileStorage::new(&path), 0).unwrap();
        assert_eq!(reload(&path).items()[0].quantity, 1);

        decrement(FileStorage::new(&path), 0).unwrap();
        assert!(reload(&path).is_empty());

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_subscribe_uses_catalog_price() {
        let path = temp_path();
        subscribe(FileStorage::new(&path), "premium").unwrap();
        increment(FileStorage::new(&path), 0).unwrap();

        let cart = reload(&path);
        assert_eq!(cart.items()[0].name, "Premium Subscription");
        assert_eq!(cart.total(), Decimal::from(1998));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_unknown_plan() {
        let path = temp_path();
        let result = subscribe(FileStorage::new(&path), "platinum");
        assert!(matches!(result, Err(CommandError::UnknownPlan(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_add_with_custom_kind() {
        let path = temp_path();
        add(
            FileStorage::new(&path),
            "v1",
            "voucher",
            "Gift voucher",
            Decimal::new(2500, 2),
            None,
        )
        .unwrap();

        let cart = reload(&path);
        assert_eq!(cart.items()[0].kind, ItemKind::Other("voucher".to_string()));
        assert_eq!(cart.total(), Decimal::from(25));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
