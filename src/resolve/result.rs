use std::fmt;

use serde::Serialize;

use crate::geom::LatLng;
use crate::layer::{BranchAttrs, RegionAttrs, ZoneAttrs};

/// How the zone was assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Inside,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Method::Inside => "inside", Method::Nearest => "nearest" })
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Confidence::High => "high", Confidence::Low => "low" })
    }
}

/// Either a matched value or an explicit "not detected" marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Detection<T> {
    Detected(T),
    NotDetected,
}

impl<T> Detection<T> {
    #[inline] pub fn is_detected(&self) -> bool { matches!(self, Detection::Detected(_)) }

    #[inline]
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Detection::Detected(value) => Some(value),
            Detection::NotDetected => None,
        }
    }
}

impl<T> From<Option<T>> for Detection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Detection::NotDetected, Detection::Detected)
    }
}

/// Where a region label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSource {
    /// A region polygon contains the point.
    Containment,
    /// No region polygon matched; the label is copied from the zone record.
    ZoneAttribute,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionMatch {
    /// Absent when the label was taken from the zone record.
    pub region_id: Option<String>,
    pub region_name: String,
    pub source: RegionSource,
}

impl RegionMatch {
    pub(crate) fn contained(attrs: &RegionAttrs) -> Self {
        Self {
            region_id: Some(attrs.region_id.clone()),
            region_name: attrs.region_name.clone(),
            source: RegionSource::Containment,
        }
    }

    pub(crate) fn from_zone(region_name: &str) -> Self {
        Self { region_id: None, region_name: region_name.to_string(), source: RegionSource::ZoneAttribute }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchMatch {
    pub branch_id: String,
    pub branch_name: String,
    pub region_id: String,
}

impl From<&BranchAttrs> for BranchMatch {
    fn from(attrs: &BranchAttrs) -> Self {
        Self {
            branch_id: attrs.branch_id.clone(),
            branch_name: attrs.branch_name.clone(),
            region_id: attrs.region_id.clone(),
        }
    }
}

/// Zone sub-result. `distance_km` is set exactly when `method` is
/// [`Method::Nearest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneMatch {
    pub zone_id: String,
    pub zone_name: String,
    pub basis_id: Option<String>,
    pub region_name: Option<String>,
    pub created_by: Option<String>,
    pub status: Option<String>,
    pub method: Method,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl ZoneMatch {
    pub(crate) fn inside(attrs: &ZoneAttrs) -> Self {
        Self::with_method(attrs, Method::Inside, Confidence::High, None)
    }

    pub(crate) fn nearest(attrs: &ZoneAttrs, distance_km: f64) -> Self {
        Self::with_method(attrs, Method::Nearest, Confidence::Low, Some(distance_km))
    }

    fn with_method(attrs: &ZoneAttrs, method: Method, confidence: Confidence, distance_km: Option<f64>) -> Self {
        Self {
            zone_id: attrs.zone_id.clone(),
            zone_name: attrs.zone_name.clone(),
            basis_id: attrs.basis_id.clone(),
            region_name: attrs.region_name.clone(),
            created_by: attrs.created_by.clone(),
            status: attrs.status.clone(),
            method,
            confidence,
            distance_km,
        }
    }
}

/// Region, branch and zone assignment for one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    pub point: LatLng,
    pub region: Detection<RegionMatch>,
    pub branch: Detection<BranchMatch>,
    pub zone: ZoneMatch,
}
