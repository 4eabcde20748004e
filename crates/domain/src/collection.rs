//! Declared schema of the catalog collections.

use std::fmt;

/// One of the typed collections served under `/api/v1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Category,
    Customer,
    Product,
}

impl CollectionKind {
    /// Every declared collection, in route registration order.
    pub const ALL: [Self; 3] = [Self::Category, Self::Customer, Self::Product];

    /// Key of the collection in the persisted file.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Customer => "customers",
            Self::Product => "products",
        }
    }

    /// Path segment used in routes (`/api/v1/{segment}/…`).
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Customer => "customer",
            Self::Product => "product",
        }
    }

    /// Human-readable singular label, used in error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Customer => "Customer",
            Self::Product => "Product",
        }
    }

    /// Name of the lookup action (`findCategory`, …).
    #[must_use]
    pub fn find_action(self) -> &'static str {
        match self {
            Self::Category => "findCategory",
            Self::Customer => "findCustomer",
            Self::Product => "findProduct",
        }
    }

    /// Primary-key field shared by the collection's records.
    #[must_use]
    pub fn primary_key(self) -> &'static str {
        match self {
            Self::Category => "idCategory",
            Self::Customer => "idCustomer",
            Self::Product => "idProduct",
        }
    }

    /// Fields copied by a whitelist (PUT) update.
    #[must_use]
    pub fn replace_fields(self) -> &'static [&'static str] {
        match self {
            Self::Category => &["nameCategory", "descriptionCategory"],
            Self::Customer => &[
                "nameCustomer",
                "emailCustomer",
                "phoneCustomer",
                "addressCustomer",
            ],
            Self::Product => &[
                "nameProduct",
                "descriptionProduct",
                "priceProduct",
                "stockProduct",
                "idCategory",
            ],
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
