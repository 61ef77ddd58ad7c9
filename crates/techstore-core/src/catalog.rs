//! Product catalog.
//!
//! The catalog is built once at startup and is read-only afterwards. Products
//! keep their declaration order; every query returns matches in that order.

use serde::{Serialize, Serializer};

/// One product record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub image: String,
    /// Ordered specification pairs, rendered as a JSON object.
    #[serde(serialize_with = "specs_as_map")]
    pub specs: Vec<(String, String)>,
}

fn specs_as_map<S: Serializer>(specs: &[(String, String)], s: S) -> Result<S::Ok, S::Error> {
    s.collect_map(specs.iter().map(|(k, v)| (k, v)))
}

/// Filters accepted by `GET /api/products`.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring over name or description.
    pub search: Option<String>,
}

impl ProductQuery {
    fn matches(&self, p: &Product) -> bool {
        if let Some(cat) = self.category.as_deref() {
            if p.category != cat {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref() {
            let needle = needle.to_lowercase();
            if !p.name.to_lowercase().contains(&needle)
                && !p.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Immutable ordered product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The TechStore assortment shipped with the service.
    pub fn builtin() -> Self {
        let products = BUILTIN
            .iter()
            .map(|(id, name, price, category, description, image, specs)| Product {
                id: *id,
                name: (*name).to_string(),
                price: *price,
                category: (*category).to_string(),
                description: (*description).to_string(),
                image: (*image).to_string(),
                specs: specs
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            })
            .collect();
        Self { products }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn filter(&self, q: &ProductQuery) -> Vec<&Product> {
        self.products.iter().filter(|p| q.matches(p)).collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for p in &self.products {
            if !out.contains(&p.category.as_str()) {
                out.push(&p.category);
            }
        }
        out
    }
}

type Row = (
    u32,
    &'static str,
    f64,
    &'static str,
    &'static str,
    &'static str,
    &'static [(&'static str, &'static str)],
);

const BUILTIN: &[Row] = &[
    (
        1,
        "ProBook X1 Laptop",
        1299.99,
        "laptops",
        "14-inch ultralight laptop with all-day battery and a bright 2.8K display.",
        "/images/probook-x1.jpg",
        &[("CPU", "8-core 3.2GHz"), ("RAM", "16GB"), ("Storage", "512GB SSD"), ("Display", "14\" 2.8K")],
    ),
    (
        2,
        "AeroBook 16 Creator",
        2199.00,
        "laptops",
        "16-inch creator laptop with dedicated graphics for editing and rendering.",
        "/images/aerobook-16.jpg",
        &[("CPU", "12-core 3.6GHz"), ("RAM", "32GB"), ("GPU", "8GB dedicated"), ("Storage", "1TB SSD")],
    ),
    (
        3,
        "Pixelon 8 Smartphone",
        799.00,
        "phones",
        "Flagship phone with a triple camera system and 120Hz OLED screen.",
        "/images/pixelon-8.jpg",
        &[("Display", "6.4\" OLED 120Hz"), ("Storage", "256GB"), ("Camera", "50MP triple")],
    ),
    (
        4,
        "Nova Mini Phone",
        449.50,
        "phones",
        "Compact phone that fits in one hand without giving up battery life.",
        "/images/nova-mini.jpg",
        &[("Display", "5.8\" OLED"), ("Storage", "128GB"), ("Battery", "3600mAh")],
    ),
    (
        5,
        "QuietWave Headphones",
        299.99,
        "audio",
        "Over-ear wireless headphones with adaptive noise cancelling.",
        "/images/quietwave.jpg",
        &[("Battery", "30h"), ("Connectivity", "Bluetooth 5.3"), ("Weight", "250g")],
    ),
    (
        6,
        "BassPod Earbuds",
        129.00,
        "audio",
        "True wireless earbuds with a pocketable charging case.",
        "/images/basspod.jpg",
        &[("Battery", "8h + 24h case"), ("Water resistance", "IPX4")],
    ),
    (
        7,
        "SlateTab 11",
        599.00,
        "tablets",
        "11-inch tablet for notes, drawing and streaming, stylus ready.",
        "/images/slatetab-11.jpg",
        &[("Display", "11\" LCD 120Hz"), ("Storage", "128GB"), ("Stylus", "Supported")],
    ),
    (
        8,
        "MechType K2 Keyboard",
        149.99,
        "accessories",
        "Hot-swappable mechanical keyboard with per-key RGB lighting.",
        "/images/mechtype-k2.jpg",
        &[("Switches", "Tactile brown"), ("Layout", "75%"), ("Connectivity", "USB-C / Bluetooth")],
    ),
    (
        9,
        "Glide Pro Mouse",
        79.00,
        "accessories",
        "Ergonomic wireless mouse with a silent scroll wheel.",
        "/images/glide-pro.jpg",
        &[("DPI", "4000"), ("Battery", "70 days")],
    ),
    (
        10,
        "UltraView 27 Monitor",
        379.00,
        "accessories",
        "27-inch 4K IPS monitor with USB-C power delivery.",
        "/images/ultraview-27.jpg",
        &[("Resolution", "3840x2160"), ("Panel", "IPS"), ("Ports", "USB-C 65W, HDMI, DP")],
    ),
];
