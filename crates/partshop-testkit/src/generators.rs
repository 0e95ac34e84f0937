//! Proptest generators for property-based testing.

use proptest::prelude::*;

use partshop_core::{ItemKind, StockItem};

/// Generate a stock code in the shop's usual shape.
pub fn stock_code() -> impl Strategy<Value = String> {
    "[A-Z]{2,3}[0-9]{3}".prop_map(String::from)
}

/// Generate a valid brand.
///
/// Brands may contain the table's delimiter and quote characters as well as
/// non-ASCII letters, but never control characters.
pub fn brand() -> impl Strategy<Value = String> {
    "[A-Za-zÀ-ÿ][A-Za-z0-9À-ÿ ,.&'\"-]{0,19}".prop_map(String::from)
}

/// Generate a quantity within the stock ceiling.
pub fn quantity() -> impl Strategy<Value = u32> {
    0u32..=StockItem::MAX_QUANTITY
}

/// Generate a valid price: a whole number of cents.
pub fn price() -> impl Strategy<Value = f64> {
    (1u32..=10_000_000u32).prop_map(|cents| f64::from(cents) / 100.0)
}

/// Generate an item kind.
pub fn item_kind() -> impl Strategy<Value = ItemKind> {
    prop_oneof![Just(ItemKind::Generic), Just(ItemKind::NavigationSystem)]
}

/// Generate a navigation system.
pub fn nav_item() -> impl Strategy<Value = StockItem> {
    (stock_code(), quantity(), price(), brand()).prop_map(|(code, quantity, price, brand)| {
        StockItem::navigation_system(code, quantity, price, brand)
            .expect("generated fields are valid")
    })
}

/// Parameters for generating an item.
#[derive(Debug, Clone)]
pub struct ItemParams {
    pub kind: ItemKind,
    pub stock_code: String,
    pub quantity: u32,
    pub price: f64,
    pub brand: String,
}

impl Arbitrary for ItemParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (item_kind(), stock_code(), quantity(), price(), brand())
            .prop_map(|(kind, stock_code, quantity, price, brand)| ItemParams {
                kind,
                stock_code,
                quantity,
                price,
                brand,
            })
            .boxed()
    }
}

/// Build an item from parameters.
pub fn item_from_params(params: &ItemParams) -> StockItem {
    StockItem::from_parts(
        params.kind,
        params.stock_code.as_str(),
        params.quantity,
        params.price,
        &params.brand,
    )
    .expect("generated parameters are valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use partshop_core::validate_brand;

    proptest! {
        #[test]
        fn test_generated_brands_are_valid(brand in brand()) {
            prop_assert!(validate_brand(&brand).is_ok());
        }

        #[test]
        fn test_item_from_params_keeps_fields(params: ItemParams) {
            let item = item_from_params(&params);

            prop_assert_eq!(item.kind(), params.kind);
            prop_assert_eq!(item.stock_code().as_str(), params.stock_code.as_str());
            prop_assert_eq!(item.quantity(), params.quantity);
            prop_assert_eq!(item.price(), params.price);
            match params.kind {
                ItemKind::Generic => prop_assert_eq!(item.brand(), None),
                ItemKind::NavigationSystem => {
                    prop_assert_eq!(item.brand(), Some(params.brand.as_str()))
                }
            }
        }

        #[test]
        fn test_nav_items_carry_a_brand(item in nav_item()) {
            prop_assert_eq!(item.kind(), ItemKind::NavigationSystem);
            prop_assert!(item.brand().is_some());
        }
    }
}
