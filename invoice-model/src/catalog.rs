//! Static product catalog for the test organisation.
//!
//! Product dropdown labels embed the unit price as a human-readable suffix
//! ("Ice Cream - Rs 1200.00"). The price is held explicitly in this map and
//! never re-derived by parsing the label text.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Product labels available in the Shihara.inc test organisation.
pub const ICE_CREAM: &str = "Ice Cream - Rs 1200.00";
pub const CAKE: &str = "Cake - Rs 875.74";

/// Customer available in the test organisation.
pub const CUSTOMER_SHIHARA: &str = "Shihara Wickramasinghe (LKR)";

static BUILTIN_PRODUCTS: Lazy<HashMap<&'static str, Decimal>> = Lazy::new(|| {
    HashMap::from([
        (ICE_CREAM, Decimal::new(120000, 2)),
        (CAKE, Decimal::new(87574, 2)),
    ])
});

/// Mapping from product dropdown label to unit price.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: HashMap<String, Decimal>,
}

impl ProductCatalog {
    /// Catalog of the products seeded in the test organisation.
    pub fn builtin() -> Self {
        Self {
            products: BUILTIN_PRODUCTS
                .iter()
                .map(|(label, price)| (label.to_string(), *price))
                .collect(),
        }
    }

    /// Build a catalog from explicit label/price pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        Self {
            products: pairs
                .into_iter()
                .map(|(label, price)| (label.into(), price))
                .collect(),
        }
    }

    /// Unit price for a product label, if the catalog knows it.
    pub fn unit_price(&self, label: &str) -> Option<Decimal> {
        self.products.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.products.contains_key(label)
    }

    /// All known product labels, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
