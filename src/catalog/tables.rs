//! Table data behind the catalog.

use super::{Category, CityInfo, ProductInfo, Region, Segment, ShipMode, SubCategoryInfo};

macro_rules! city {
    ($name:expr, $state:expr, $region:ident) => {
        CityInfo {
            name: $name,
            state: $state,
            region: Region::$region,
        }
    };
}

macro_rules! product {
    ($name:expr, $price:expr) => {
        ProductInfo {
            name: $name,
            base_price: $price,
        }
    };
}

/// All 40 cities, grouped by region.
pub static CITIES: [CityInfo; 40] = [
    // East
    city!("New York", "New York", East),
    city!("Boston", "Massachusetts", East),
    city!("Philadelphia", "Pennsylvania", East),
    city!("Washington", "District of Columbia", East),
    city!("Miami", "Florida", East),
    city!("Atlanta", "Georgia", East),
    city!("Charlotte", "North Carolina", East),
    city!("Baltimore", "Maryland", East),
    city!("Richmond", "Virginia", East),
    city!("Jacksonville", "Florida", East),
    // West
    city!("Los Angeles", "California", West),
    city!("San Francisco", "California", West),
    city!("Seattle", "Washington", West),
    city!("Denver", "Colorado", West),
    city!("Phoenix", "Arizona", West),
    city!("Portland", "Oregon", West),
    city!("Las Vegas", "Nevada", West),
    city!("San Diego", "California", West),
    city!("Salt Lake City", "Utah", West),
    city!("Sacramento", "California", West),
    // Central
    city!("Chicago", "Illinois", Central),
    city!("Houston", "Texas", Central),
    city!("Dallas", "Texas", Central),
    city!("Minneapolis", "Minnesota", Central),
    city!("St. Louis", "Missouri", Central),
    city!("Kansas City", "Missouri", Central),
    city!("Milwaukee", "Wisconsin", Central),
    city!("Indianapolis", "Indiana", Central),
    city!("Columbus", "Ohio", Central),
    city!("Detroit", "Michigan", Central),
    // South
    city!("Nashville", "Tennessee", South),
    city!("New Orleans", "Louisiana", South),
    city!("Memphis", "Tennessee", South),
    city!("Louisville", "Kentucky", South),
    city!("Birmingham", "Alabama", South),
    city!("San Antonio", "Texas", South),
    city!("Austin", "Texas", South),
    city!("Raleigh", "North Carolina", South),
    city!("Tampa", "Florida", South),
    city!("Orlando", "Florida", South),
];

/// Sub-categories with their products, grouped by category.
pub static SUB_CATEGORIES: [SubCategoryInfo; 12] = [
    SubCategoryInfo {
        name: "Phones",
        category: Category::Technology,
        products: &[
            product!("iPhone 15 Pro", 999.0),
            product!("Samsung Galaxy S24", 849.0),
            product!("Google Pixel 8", 699.0),
            product!("OnePlus 12", 599.0),
        ],
    },
    SubCategoryInfo {
        name: "Laptops",
        category: Category::Technology,
        products: &[
            product!("MacBook Air M3", 1199.0),
            product!("Dell XPS 15", 1399.0),
            product!("ThinkPad X1 Carbon", 1249.0),
            product!("HP Spectre x360", 1099.0),
        ],
    },
    SubCategoryInfo {
        name: "Accessories",
        category: Category::Technology,
        products: &[
            product!("AirPods Pro", 249.0),
            product!("Logitech MX Master", 99.0),
            product!("USB-C Hub 10-in-1", 49.0),
            product!("Webcam HD 1080p", 79.0),
        ],
    },
    SubCategoryInfo {
        name: "Monitors",
        category: Category::Technology,
        products: &[
            product!("Dell UltraSharp 27\"", 449.0),
            product!("LG 4K 32\"", 399.0),
            product!("Samsung Curved 34\"", 549.0),
            product!("ASUS ProArt 27\"", 629.0),
        ],
    },
    SubCategoryInfo {
        name: "Chairs",
        category: Category::Furniture,
        products: &[
            product!("Ergonomic Mesh Chair", 349.0),
            product!("Executive Leather Chair", 499.0),
            product!("Standing Desk Stool", 199.0),
            product!("Task Chair Standard", 149.0),
        ],
    },
    SubCategoryInfo {
        name: "Tables",
        category: Category::Furniture,
        products: &[
            product!("Standing Desk Electric", 599.0),
            product!("Conference Table 8ft", 899.0),
            product!("Corner Desk L-Shape", 399.0),
            product!("Compact Writing Desk", 249.0),
        ],
    },
    SubCategoryInfo {
        name: "Bookcases",
        category: Category::Furniture,
        products: &[
            product!("5-Shelf Bookcase Oak", 179.0),
            product!("Metal Storage Shelf", 129.0),
            product!("Glass Display Case", 299.0),
            product!("Floating Wall Shelf Set", 89.0),
        ],
    },
    SubCategoryInfo {
        name: "Furnishings",
        category: Category::Furniture,
        products: &[
            product!("Desk Lamp LED", 59.0),
            product!("Filing Cabinet 3-Drawer", 189.0),
            product!("Whiteboard 48x36", 129.0),
            product!("Desk Organizer Set", 39.0),
        ],
    },
    SubCategoryInfo {
        name: "Paper",
        category: Category::OfficeSupplies,
        products: &[
            product!("Copy Paper 5000 Sheets", 45.0),
            product!("Legal Pads 12-Pack", 24.0),
            product!("Sticky Notes Bulk Pack", 18.0),
            product!("Cardstock 250 Sheets", 29.0),
        ],
    },
    SubCategoryInfo {
        name: "Binders",
        category: Category::OfficeSupplies,
        products: &[
            product!("3-Ring Binder Set", 22.0),
            product!("Report Covers 25-Pack", 15.0),
            product!("Expanding File Folder", 12.0),
            product!("Presentation Binder", 19.0),
        ],
    },
    SubCategoryInfo {
        name: "Art Supplies",
        category: Category::OfficeSupplies,
        products: &[
            product!("Marker Set 24-Color", 28.0),
            product!("Highlighter 12-Pack", 14.0),
            product!("Pen Set Professional", 35.0),
            product!("Pencil Set Mechanical", 16.0),
        ],
    },
    SubCategoryInfo {
        name: "Storage",
        category: Category::OfficeSupplies,
        products: &[
            product!("Storage Boxes 12-Pack", 32.0),
            product!("Drawer Organizer", 24.0),
            product!("Label Maker Pro", 49.0),
            product!("Tape Dispenser Heavy", 18.0),
        ],
    },
];

pub static SEGMENT_WEIGHTS: [(Segment, f64); 3] = [
    (Segment::Consumer, 0.50),
    (Segment::Corporate, 0.30),
    (Segment::HomeOffice, 0.20),
];

pub static SHIP_MODE_WEIGHTS: [(ShipMode, f64); 4] = [
    (ShipMode::StandardClass, 0.55),
    (ShipMode::SecondClass, 0.20),
    (ShipMode::FirstClass, 0.15),
    (ShipMode::SameDay, 0.10),
];

/// Units per order, skewed toward small baskets.
pub static QUANTITY_WEIGHTS: [(u32, f64); 14] = [
    (1, 0.25),
    (2, 0.20),
    (3, 0.15),
    (4, 0.12),
    (5, 0.08),
    (6, 0.06),
    (7, 0.04),
    (8, 0.03),
    (9, 0.02),
    (10, 0.015),
    (11, 0.015),
    (12, 0.01),
    (13, 0.005),
    (14, 0.005),
];

/// Discount levels and how often each is applied. All levels are within [0, 0.40].
pub static DISCOUNT_LEVELS: [(f64, f64); 8] = [
    (0.00, 0.35),
    (0.05, 0.15),
    (0.10, 0.15),
    (0.15, 0.10),
    (0.20, 0.10),
    (0.25, 0.07),
    (0.30, 0.05),
    (0.40, 0.03),
];

pub static FIRST_NAMES: [&str; 24] = [
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa",
];

pub static LAST_NAMES: [&str; 24] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
];
