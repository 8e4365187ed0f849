//! In-memory relationship tracking.

use std::collections::HashMap;

use parking_lot::RwLock;

use dipl_core::{CountryId, RelationshipState};
use dipl_scenario::{Relationship, RelationshipContext, ScenarioError};

use crate::ports::RelationshipProvider;

/// Relationships keyed by unordered country pair.
#[derive(Debug, Default)]
pub struct RelationshipBook {
    pairs: RwLock<HashMap<(CountryId, CountryId), Relationship>>,
}

fn pair_key(a: &CountryId, b: &CountryId) -> (CountryId, CountryId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

impl RelationshipBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or replace the relationship between `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`ScenarioError::InvalidInput`] for a self-relationship or a strength
    /// above 100.
    pub fn upsert(
        &self,
        a: CountryId,
        b: CountryId,
        state: RelationshipState,
        strength: u8,
    ) -> Result<(), ScenarioError> {
        if a == b {
            return Err(ScenarioError::InvalidInput {
                reason: format!("country {a} cannot have a relationship with itself"),
            });
        }
        if strength > 100 {
            return Err(ScenarioError::InvalidInput {
                reason: format!("relationship strength {strength} exceeds 100"),
            });
        }
        let key = pair_key(&a, &b);
        self.pairs.write().insert(
            key,
            Relationship {
                country_a: a,
                country_b: b,
                state,
                strength,
            },
        );
        Ok(())
    }

    /// Load a batch of relationships, e.g. from a fixture file.
    pub fn extend(
        &self,
        relationships: impl IntoIterator<Item = Relationship>,
    ) -> Result<(), ScenarioError> {
        for r in relationships {
            self.upsert(r.country_a, r.country_b, r.state, r.strength)?;
        }
        Ok(())
    }
}

impl RelationshipProvider for RelationshipBook {
    fn relationship(&self, a: &CountryId, b: &CountryId) -> Option<RelationshipContext> {
        self.pairs.read().get(&pair_key(a, b)).map(Relationship::context)
    }

    fn relationships_of(&self, country: &CountryId) -> Vec<Relationship> {
        let mut found: Vec<Relationship> = self
            .pairs
            .read()
            .values()
            .filter(|r| r.country_a == *country || r.country_b == *country)
            .cloned()
            .collect();
        found.sort_by(|x, y| (&x.country_a, &x.country_b).cmp(&(&y.country_a, &y.country_b)));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CountryId {
        CountryId::new(s).unwrap()
    }

    #[test]
    fn test_lookup_is_order_insensitive() {
        let book = RelationshipBook::new();
        book.upsert(id("urcea"), id("caphiria"), RelationshipState::Tense, 30)
            .unwrap();
        let forward = book.relationship(&id("urcea"), &id("caphiria")).unwrap();
        let backward = book.relationship(&id("caphiria"), &id("urcea")).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.strength, 30);
        assert!(book.relationship(&id("urcea"), &id("burania")).is_none());
    }

    #[test]
    fn test_upsert_replaces() {
        let book = RelationshipBook::new();
        book.upsert(id("a"), id("b"), RelationshipState::Tense, 30).unwrap();
        book.upsert(id("b"), id("a"), RelationshipState::Allied, 90).unwrap();
        assert_eq!(book.relationships_of(&id("a")).len(), 1);
        assert_eq!(
            book.relationship(&id("a"), &id("b")).unwrap().state,
            RelationshipState::Allied
        );
    }

    #[test]
    fn test_invalid_relationships_rejected() {
        let book = RelationshipBook::new();
        assert!(book.upsert(id("a"), id("a"), RelationshipState::Allied, 90).is_err());
        assert!(book.upsert(id("a"), id("b"), RelationshipState::Allied, 101).is_err());
    }

    #[test]
    fn test_relationships_of() {
        let book = RelationshipBook::new();
        book.upsert(id("a"), id("b"), RelationshipState::Neutral, 50).unwrap();
        book.upsert(id("a"), id("c"), RelationshipState::Neutral, 50).unwrap();
        book.upsert(id("b"), id("c"), RelationshipState::Neutral, 50).unwrap();
        assert_eq!(book.relationships_of(&id("a")).len(), 2);
        assert_eq!(book.relationships_of(&id("d")).len(), 0);
    }
}
