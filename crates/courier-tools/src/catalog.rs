// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-selling products of the shop.

use serde::Serialize;

/// A product entry as exposed to the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub sku: &'static str,
}

const TOP_PRODUCTS: [Product; 3] = [
    Product {
        id: 1,
        title: "Knitted Romper 'Marshmallow'",
        description: "Cozy knitted romper for infants, perfect for cool weather. Made from soft wool, does not irritate the skin.",
        sku: "ZZ1234",
    },
    Product {
        id: 2,
        title: "Summer Dress 'Sunbeam'",
        description: "Bright summer dress for girls with a floral and butterfly print. The light and airy material provides comfort in hot weather.",
        sku: "SL4567",
    },
    Product {
        id: 3,
        title: "Jacket 'Little Explorer'",
        description: "Waterproof and windproof jacket for active outdoor walks. Features bright reflective elements for safety in the dark.",
        sku: "EX8901",
    },
];

/// The three best sellers, highest first.
pub fn top_products() -> &'static [Product] {
    &TOP_PRODUCTS
}
