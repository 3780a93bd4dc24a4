//! Response shapes. Summaries are the entities themselves (scalar fields only);
//! detail views add `restaurant_pizzas`. An entity embedded inside an association
//! is always a summary, so expansion stops after one hop.

use crate::model::{Pizza, Restaurant, RestaurantPizza};
use serde::Serialize;

/// One association, optionally with its pizza and restaurant embedded as summaries.
#[derive(Serialize, Debug)]
pub struct AssociationView<'a> {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pizza: Option<&'a Pizza>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<&'a Restaurant>,
}

impl<'a> AssociationView<'a> {
    pub fn flat(rp: &RestaurantPizza) -> Self {
        AssociationView {
            id: rp.id,
            price: rp.price,
            pizza_id: rp.pizza_id,
            restaurant_id: rp.restaurant_id,
            pizza: None,
            restaurant: None,
        }
    }

    pub fn expanded(rp: &RestaurantPizza, pizza: &'a Pizza, restaurant: &'a Restaurant) -> Self {
        AssociationView {
            pizza: Some(pizza),
            restaurant: Some(restaurant),
            ..Self::flat(rp)
        }
    }
}

#[derive(Serialize, Debug)]
pub struct RestaurantDetail<'a> {
    #[serde(flatten)]
    pub restaurant: &'a Restaurant,
    pub restaurant_pizzas: Vec<AssociationView<'a>>,
}

#[derive(Serialize, Debug)]
pub struct PizzaDetail<'a> {
    #[serde(flatten)]
    pub pizza: &'a Pizza,
    pub restaurant_pizzas: Vec<AssociationView<'a>>,
}

/// Body of a successful POST /restaurant_pizzas.
#[derive(Serialize, Debug)]
pub struct CreatedRestaurantPizza<'a> {
    pub id: i32,
    pub pizza: PizzaDetail<'a>,
    pub pizza_id: i32,
    pub price: i32,
    pub restaurant: RestaurantDetail<'a>,
    pub restaurant_id: i32,
}

/// Restaurant with each association expanded to carry its pizza and the restaurant itself.
pub fn restaurant_full<'a>(
    restaurant: &'a Restaurant,
    entries: &'a [(RestaurantPizza, Pizza)],
) -> RestaurantDetail<'a> {
    RestaurantDetail {
        restaurant,
        restaurant_pizzas: entries
            .iter()
            .map(|(rp, pizza)| AssociationView::expanded(rp, pizza, restaurant))
            .collect(),
    }
}

/// Restaurant with its associations as bare scalar records.
pub fn restaurant_with_links<'a>(
    restaurant: &'a Restaurant,
    associations: &[RestaurantPizza],
) -> RestaurantDetail<'a> {
    RestaurantDetail {
        restaurant,
        restaurant_pizzas: associations.iter().map(AssociationView::flat).collect(),
    }
}

pub fn pizza_full<'a>(pizza: &'a Pizza, associations: &[RestaurantPizza]) -> PizzaDetail<'a> {
    PizzaDetail {
        pizza,
        restaurant_pizzas: associations.iter().map(AssociationView::flat).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn restaurant() -> Restaurant {
        Restaurant {
            id: 1,
            name: "Karen's Pizza Shack".into(),
            address: "address1".into(),
        }
    }

    fn pizza() -> Pizza {
        Pizza {
            id: 2,
            name: "Emma".into(),
            ingredients: "Dough, Tomato Sauce, Cheese".into(),
        }
    }

    fn link() -> RestaurantPizza {
        RestaurantPizza {
            id: 3,
            price: 10,
            pizza_id: 2,
            restaurant_id: 1,
        }
    }

    #[test]
    fn summary_has_no_associations_key() {
        let v = serde_json::to_value(restaurant()).unwrap();
        assert_eq!(v, json!({"id": 1, "name": "Karen's Pizza Shack", "address": "address1"}));
        let v = serde_json::to_value(pizza()).unwrap();
        assert!(v.get("restaurant_pizzas").is_none());
    }

    #[test]
    fn full_restaurant_nests_exactly_one_hop() {
        let r = restaurant();
        let entries = vec![(link(), pizza())];
        let v = serde_json::to_value(restaurant_full(&r, &entries)).unwrap();

        let nested = &v["restaurant_pizzas"][0];
        assert_eq!(nested["price"], 10);
        assert_eq!(nested["pizza"], serde_json::to_value(pizza()).unwrap());
        assert_eq!(nested["restaurant"], serde_json::to_value(&r).unwrap());
        assert!(nested["restaurant"].get("restaurant_pizzas").is_none());
        assert!(nested["pizza"].get("restaurant_pizzas").is_none());
    }

    #[test]
    fn links_are_flat() {
        let p = pizza();
        let v = serde_json::to_value(pizza_full(&p, &[link()])).unwrap();
        assert_eq!(
            v["restaurant_pizzas"],
            json!([{"id": 3, "price": 10, "pizza_id": 2, "restaurant_id": 1}])
        );
        let r = restaurant();
        let v = serde_json::to_value(restaurant_with_links(&r, &[])).unwrap();
        assert_eq!(v["restaurant_pizzas"], Value::Array(vec![]));
    }
}
