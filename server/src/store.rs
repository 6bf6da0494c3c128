//! Ordered in-memory item storage.
//!
//! # Design
//! Items live in a `Vec` so iteration order is insertion order. Ids come from
//! a counter that only ever grows; it is never derived from the collection
//! length, so an id freed by a delete is not handed out again.
//!
//! The store itself is not synchronized. The server keeps exactly one behind a
//! `RwLock` and performs each mutation under the write lock.

use chrono::Utc;

use crate::model::{Item, ItemFilter, ItemPatch, NewItem};

#[derive(Debug)]
pub struct ItemStore {
    items: Vec<Item>,
    next_id: u64,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Store pre-filled with the three demo products. The next id is 4.
    pub fn with_demo_items() -> Self {
        let items: Vec<Item> = [
            (1, "Producto 1", 100.0, "electronics"),
            (2, "Producto 2", 200.0, "clothing"),
            (3, "Producto 3", 150.0, "books"),
        ]
        .into_iter()
        .map(|(id, name, price, category)| Item {
            id,
            name: name.to_string(),
            price,
            category: category.to_string(),
            created_at: None,
            updated_at: None,
        })
        .collect();
        let next_id = items.len() as u64 + 1;
        Self { items, next_id }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items matching `filter`, in insertion order.
    pub fn list(&self, filter: &ItemFilter) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn insert(&mut self, input: NewItem) -> Item {
        let item = Item {
            id: self.next_id,
            name: input.name,
            price: input.price,
            category: input.category,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        self.next_id += 1;
        self.items.push(item.clone());
        item
    }

    /// Applies the provided fields and stamps `updated_at`. Returns `None`
    /// when no item has this id.
    pub fn update(&mut self, id: u64, patch: ItemPatch) -> Option<Item> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        item.updated_at = Some(Utc::now());
        Some(item.clone())
    }

    pub fn remove(&mut self, id: u64) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}
