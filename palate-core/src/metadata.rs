//! Dish metadata keyed by the same ids as the vector index.

use crate::error::{CoreError, CoreResult};
use crate::vector::DishId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attributes of a single dish. Created at index-build time and immutable
/// afterwards; the only way to change a record is a full rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishRecord {
    pub id: DishId,
    pub name: String,
    pub spicy_level: u8,
    pub main_ingredients: String,
    pub image_url: String,
}

impl DishRecord {
    /// Checks the invariants a record must satisfy before entering the store.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::InvalidArgument(format!(
                "dish {} has an empty name",
                self.id
            )));
        }
        if self.spicy_level > 5 {
            return Err(CoreError::InvalidArgument(format!(
                "dish {} has spicy_level {} outside 0..=5",
                self.id, self.spicy_level
            )));
        }
        Ok(())
    }
}

/// Read-only mapping from dish id to its record.
#[derive(Debug, Default)]
pub struct MetadataStore {
    records: HashMap<DishId, DishRecord>,
}

impl MetadataStore {
    /// Builds a store from a flat list of records, keying each by its id.
    /// Records must already be validated; a duplicate id keeps the later
    /// record, matching the source file order.
    pub fn from_records(records: Vec<DishRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id, record))
            .collect();
        MetadataStore { records }
    }

    pub fn get(&self, id: DishId) -> Option<&DishRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: DishId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: DishId, spicy_level: u8) -> DishRecord {
        DishRecord {
            id,
            name: format!("dish_{}", id),
            spicy_level,
            main_ingredients: "rice, gochujang".to_string(),
            image_url: format!("https://img.example/{}.jpg", id),
        }
    }

    #[test]
    fn test_from_records_keys_by_id() {
        let store = MetadataStore::from_records(vec![record(1, 2), record(9, 4)]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(9).unwrap().spicy_level, 4);
        assert!(store.get(5).is_none());
    }

    #[test]
    fn test_duplicate_id_keeps_later_record() {
        let mut second = record(1, 0);
        second.name = "replacement".to_string();
        let store = MetadataStore::from_records(vec![record(1, 2), second]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().name, "replacement");
    }

    #[test]
    fn test_validate_rejects_out_of_range_spice() {
        assert!(record(1, 5).validate().is_ok());
        assert!(record(1, 6).validate().is_err());
    }

    #[test]
    fn test_record_json_round_trip() {
        let original = record(42, 3);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: DishRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
