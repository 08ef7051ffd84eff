//! Compact ring representation of polygon boundaries.
//!
//! A [`RingSet`] serializes as `{"rings":[[[x,y],...],...]}`, one ring per
//! polygon exterior. Interior rings (holes) are never part of a ring set.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapetabError};

/// One closed boundary as `[x, y]` vertex pairs.
pub type Ring = Vec<[f64; 2]>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RingSet {
    pub rings: Vec<Ring>,
}

impl RingSet {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Total vertex count across all rings
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// Serialize to whitespace-free JSON.
    ///
    /// The text never contains a space or a single quote.
    pub fn to_compact_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)
            .map_err(|e| ShapetabError::Serialization(e.to_string()))?;
        Ok(json.replace(' ', "").replace('\'', "\""))
    }

    /// Parse text previously produced by [`RingSet::to_compact_json`].
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ShapetabError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]
    }

    #[test]
    fn test_compact_json_layout() {
        let rings = RingSet::new(vec![square()]);
        let json = rings.to_compact_json().unwrap();

        assert_eq!(json, r#"{"rings":[[[0.0,0.0],[0.0,1.0],[1.0,1.0],[1.0,0.0],[0.0,0.0]]]}"#);
        assert!(!json.contains(' '));
        assert!(!json.contains('\''));
    }

    #[test]
    fn test_parse_back() {
        let rings = RingSet::new(vec![square(), square()]);
        let json = rings.to_compact_json().unwrap();
        let parsed = RingSet::from_json(&json).unwrap();

        assert_eq!(parsed, rings);
        assert_eq!(parsed.vertex_count(), 10);
    }

    #[test]
    fn test_empty_set() {
        let rings = RingSet::default();
        assert!(rings.is_empty());
        assert_eq!(rings.to_compact_json().unwrap(), r#"{"rings":[]}"#);
    }
}
