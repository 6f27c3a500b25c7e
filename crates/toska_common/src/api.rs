//! API wire types shared by the daemon and the CLI client

use crate::menu::MenuItem;
use serde::{Deserialize, Serialize};

/// Menu item as exposed by the JSON endpoints (no surrogate id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemBody {
    pub name: String,
    pub price: i64,
    pub description: String,
}

impl From<MenuItem> for MenuItemBody {
    fn from(item: MenuItem) -> Self {
        Self {
            name: item.name,
            price: item.price,
            description: item.description,
        }
    }
}

/// Body for POST /v1/menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub price: i64,
    pub description: String,
}

/// Response for GET /v1/health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub menu_items: usize,
    pub model_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_item_body_drops_id() {
        let item = MenuItem {
            id: 7,
            name: "Tiramisu".to_string(),
            price: 70,
            description: "House dessert".to_string(),
        };
        let body = MenuItemBody::from(item);
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["name"], "Tiramisu");
        assert_eq!(json["price"], 70);
    }
}
