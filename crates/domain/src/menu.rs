//! Static menu catalog and category filtering.

use std::str::FromStr;

use common::ItemId;
use serde::Serialize;
use thiserror::Error;

use crate::cart::NewCartItem;
use crate::money::Money;

/// A dish category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Pizza,
    Seafood,
    Salads,
    Burgers,
    Pasta,
    Mexican,
}

impl Category {
    /// Every category in menu order.
    pub const ALL: [Category; 6] = [
        Category::Pizza,
        Category::Seafood,
        Category::Salads,
        Category::Burgers,
        Category::Pasta,
        Category::Mexican,
    ];

    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pizza => "Pizza",
            Category::Seafood => "Seafood",
            Category::Salads => "Salads",
            Category::Burgers => "Burgers",
            Category::Pasta => "Pasta",
            Category::Mexican => "Mexican",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The category name did not match any category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Which dishes to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuFilter {
    #[default]
    All,
    Category(Category),
}

impl MenuFilter {
    /// Returns the dishes of `items` that pass this filter.
    pub fn apply<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        items
            .iter()
            .filter(|item| match self {
                MenuFilter::All => true,
                MenuFilter::Category(category) => item.category == *category,
            })
            .collect()
    }
}

impl FromStr for MenuFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(MenuFilter::All);
        }
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .map(MenuFilter::Category)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Money,
    pub image: &'static str,
    pub category: Category,
}

impl MenuItem {
    /// Returns the cart offer for one unit of this dish.
    pub fn to_cart_item(&self) -> NewCartItem {
        NewCartItem::new(self.id, self.name, self.price, self.image)
    }
}

static CATALOG: [MenuItem; 6] = [
    MenuItem {
        id: "1",
        name: "Margherita Pizza",
        description: "Fresh mozzarella, tomato sauce, and basil on a crispy crust",
        price: Money::from_cents(1699),
        image: "https://images.unsplash.com/photo-1618160702438-9b02ab6515c9?w=400&h=300&fit=crop",
        category: Category::Pizza,
    },
    MenuItem {
        id: "2",
        name: "Grilled Salmon",
        description: "Atlantic salmon with lemon herb butter and seasonal vegetables",
        price: Money::from_cents(2499),
        image: "https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07?w=400&h=300&fit=crop",
        category: Category::Seafood,
    },
    MenuItem {
        id: "3",
        name: "Caesar Salad",
        description: "Crisp romaine lettuce, parmesan cheese, croutons, and caesar dressing",
        price: Money::from_cents(1299),
        image: "https://images.unsplash.com/photo-1500673922987-e212871fec22?w=400&h=300&fit=crop",
        category: Category::Salads,
    },
    MenuItem {
        id: "4",
        name: "Beef Burger",
        description: "Angus beef patty with lettuce, tomato, cheese, and fries",
        price: Money::from_cents(1899),
        image: "https://images.unsplash.com/photo-1535268647677-300dbf3d78d1?w=400&h=300&fit=crop",
        category: Category::Burgers,
    },
    MenuItem {
        id: "5",
        name: "Chicken Alfredo",
        description: "Grilled chicken breast over fettuccine with creamy alfredo sauce",
        price: Money::from_cents(1999),
        image: "https://images.unsplash.com/photo-1618160702438-9b02ab6515c9?w=400&h=300&fit=crop",
        category: Category::Pasta,
    },
    MenuItem {
        id: "6",
        name: "Fish Tacos",
        description: "Grilled white fish with cabbage slaw and chipotle mayo",
        price: Money::from_cents(1599),
        image: "https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07?w=400&h=300&fit=crop",
        category: Category::Mexican,
    },
];

/// Returns every dish on the menu.
pub fn catalog() -> &'static [MenuItem] {
    &CATALOG
}

/// Looks up a dish by id.
pub fn find(id: &ItemId) -> Option<&'static MenuItem> {
    CATALOG.iter().find(|item| item.id == id.as_str())
}
