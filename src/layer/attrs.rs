use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DataError;

/// Feature properties as they arrive from the geometry source.
pub type Properties = Map<String, Value>;

/// The three hierarchical levels a point is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Region,
    Branch,
    Zone,
}

impl LayerKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            LayerKind::Region => "region",
            LayerKind::Branch => "branch",
            LayerKind::Zone => "zone",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.to_str()) }
}

/// One canonical attribute and the two property keys it may arrive under.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Alias {
    canonical: &'static str,
    legacy: &'static str,
    localized: &'static str,
}

impl Alias {
    const fn new(canonical: &'static str, localized: &'static str) -> Self {
        Self { canonical, legacy: canonical, localized }
    }

    /// Look the attribute up, preferring the localized key.
    /// Null and empty values count as absent.
    pub(crate) fn lookup(&self, props: &Properties) -> Result<Option<String>, DataError> {
        for key in [self.localized, self.legacy] {
            if let Some(value) = props.get(key) {
                if let Some(text) = self.render(value)? { return Ok(Some(text)) }
            }
        }
        Ok(None)
    }

    pub(crate) fn require(&self, props: &Properties, layer: LayerKind) -> Result<String, DataError> {
        self.lookup(props)?
            .ok_or(DataError::MissingAttribute { layer, attribute: self.canonical })
    }

    fn render(&self, value: &Value) -> Result<Option<String>, DataError> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => Ok(Some(s.trim().to_string())),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(DataError::InvalidAttribute {
                attribute: self.canonical,
                reason: format!("expected a string or number, found {other}"),
            }),
        }
    }
}

pub(crate) const ZONE_ID: Alias = Alias::new("zone_id", "zona_azonosito");
pub(crate) const ZONE_NAME: Alias = Alias::new("zone_name", "zona_nev");
pub(crate) const REGION_ID: Alias = Alias::new("region_id", "regio_azonosito");
pub(crate) const REGION_NAME: Alias = Alias::new("region_name", "regio_nev");
pub(crate) const BRANCH_ID: Alias = Alias::new("branch_id", "fiok_azonosito");
pub(crate) const BRANCH_NAME: Alias = Alias::new("branch_name", "fiok_nev");
pub(crate) const CREATED_BY: Alias = Alias::new("created_by", "letrehozta");
pub(crate) const STATUS: Alias = Alias::new("status", "statusz");
pub(crate) const BASIS_ID: Alias = Alias::new("basis_id", "bazis_azonosito");

/// Attribute payload of one layer's records, normalized from raw properties.
pub trait Attributes: Sized + Send + Sync {
    const KIND: LayerKind;

    fn from_properties(props: &Properties) -> Result<Self, DataError>;

    /// Identifier of the record within its layer.
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionAttrs {
    pub region_id: String,
    pub region_name: String,
}

impl Attributes for RegionAttrs {
    const KIND: LayerKind = LayerKind::Region;

    fn from_properties(props: &Properties) -> Result<Self, DataError> {
        Ok(Self {
            region_id: REGION_ID.require(props, Self::KIND)?,
            region_name: REGION_NAME.require(props, Self::KIND)?,
        })
    }

    fn id(&self) -> &str { &self.region_id }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchAttrs {
    pub branch_id: String,
    pub branch_name: String,
    pub region_id: String,
}

impl Attributes for BranchAttrs {
    const KIND: LayerKind = LayerKind::Branch;

    fn from_properties(props: &Properties) -> Result<Self, DataError> {
        Ok(Self {
            branch_id: BRANCH_ID.require(props, Self::KIND)?,
            branch_name: BRANCH_NAME.require(props, Self::KIND)?,
            region_id: REGION_ID.require(props, Self::KIND)?,
        })
    }

    fn id(&self) -> &str { &self.branch_id }
}

/// Technical zone attributes. `region_name` is only set by older zone files
/// that carried their region inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneAttrs {
    pub zone_id: String,
    pub zone_name: String,
    pub region_name: Option<String>,
    pub created_by: Option<String>,
    pub status: Option<String>,
    pub basis_id: Option<String>,
}

impl Attributes for ZoneAttrs {
    const KIND: LayerKind = LayerKind::Zone;

    fn from_properties(props: &Properties) -> Result<Self, DataError> {
        Ok(Self {
            zone_id: ZONE_ID.require(props, Self::KIND)?,
            zone_name: ZONE_NAME.require(props, Self::KIND)?,
            region_name: REGION_NAME.lookup(props)?,
            created_by: CREATED_BY.lookup(props)?,
            status: STATUS.lookup(props)?,
            basis_id: BASIS_ID.lookup(props)?,
        })
    }

    fn id(&self) -> &str { &self.zone_id }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn props(value: Value) -> Properties {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn localized_key_wins_over_legacy() {
        let p = props(json!({ "zone_id": "Z-1", "zona_azonosito": "Z-9", "zone_name": "Debrecen" }));
        let attrs = ZoneAttrs::from_properties(&p).unwrap();
        assert_eq!(attrs.zone_id, "Z-9");
        assert_eq!(attrs.zone_name, "Debrecen");
    }

    #[test]
    fn legacy_key_used_when_localized_is_null_or_blank() {
        let p = props(json!({
            "zona_azonosito": null, "zone_id": "Z-1",
            "zona_nev": "  ", "zone_name": "Debrecen",
        }));
        let attrs = ZoneAttrs::from_properties(&p).unwrap();
        assert_eq!(attrs.zone_id, "Z-1");
        assert_eq!(attrs.zone_name, "Debrecen");
    }

    #[test]
    fn numeric_ids_are_rendered() {
        let p = props(json!({ "region_id": 7, "regio_nev": "Tiszántúl" }));
        let attrs = RegionAttrs::from_properties(&p).unwrap();
        assert_eq!(attrs.region_id, "7");
        assert_eq!(attrs.region_name, "Tiszántúl");
    }

    #[test]
    fn missing_required_attribute() {
        let p = props(json!({ "zone_name": "Debrecen" }));
        match ZoneAttrs::from_properties(&p) {
            Err(DataError::MissingAttribute { layer, attribute }) => {
                assert_eq!(layer, LayerKind::Zone);
                assert_eq!(attribute, "zone_id");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn optional_zone_fields() {
        let p = props(json!({
            "zone_id": "Z-1", "zone_name": "A",
            "regio_nev": "Tiszántúl", "statusz": "active", "basis_id": "B-3",
        }));
        let attrs = ZoneAttrs::from_properties(&p).unwrap();
        assert_eq!(attrs.region_name.as_deref(), Some("Tiszántúl"));
        assert_eq!(attrs.status.as_deref(), Some("active"));
        assert_eq!(attrs.basis_id.as_deref(), Some("B-3"));
        assert_eq!(attrs.created_by, None);
    }

    #[test]
    fn structured_values_are_rejected() {
        let p = props(json!({ "branch_id": ["x"], "branch_name": "N", "region_id": "R" }));
        assert!(matches!(
            BranchAttrs::from_properties(&p),
            Err(DataError::InvalidAttribute { attribute: "branch_id", .. })
        ));
    }
}
