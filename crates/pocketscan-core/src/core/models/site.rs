use super::residue::NearbyResidue;
use nalgebra::Point3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Discretized exposure of a site center, derived from its nearest-atom distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceAccessibility {
    Buried,
    PartiallyBuried,
    Accessible,
    Exposed,
}

impl SurfaceAccessibility {
    pub const ALL: [SurfaceAccessibility; 4] = [
        SurfaceAccessibility::Buried,
        SurfaceAccessibility::PartiallyBuried,
        SurfaceAccessibility::Accessible,
        SurfaceAccessibility::Exposed,
    ];

    /// Maps a nearest atom-to-center distance onto its tier.
    ///
    /// `d < 2.0` is buried, `d < 4.0` partially buried, `d < 6.0` accessible, anything
    /// else (including NaN) exposed.
    pub fn from_distance(distance: f64) -> Self {
        if distance < 2.0 {
            SurfaceAccessibility::Buried
        } else if distance < 4.0 {
            SurfaceAccessibility::PartiallyBuried
        } else if distance < 6.0 {
            SurfaceAccessibility::Accessible
        } else {
            SurfaceAccessibility::Exposed
        }
    }

    pub fn value(self) -> f64 {
        match self {
            SurfaceAccessibility::Buried => 0.1,
            SurfaceAccessibility::PartiallyBuried => 0.3,
            SurfaceAccessibility::Accessible => 0.6,
            SurfaceAccessibility::Exposed => 0.9,
        }
    }

    pub fn from_value(value: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| (tier.value() - value).abs() < 1e-9)
    }
}

impl Serialize for SurfaceAccessibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for SurfaceAccessibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_value(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid surface accessibility {value}, expected one of 0.1, 0.3, 0.6, 0.9"
            ))
        })
    }
}

/// A scored candidate binding pocket.
///
/// Sites are produced once by the scorer and never mutated afterwards; ranking only
/// reorders and filters them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingSite {
    /// 1-based, in cluster-discovery order among retained clusters.
    pub site_id: usize,
    #[serde(with = "point_xyz")]
    pub center: Point3<f64>,
    pub volume: f64,
    pub druggability_score: f64,
    pub hydrophobicity: f64,
    /// Sorted by non-decreasing distance to `center`.
    pub nearby_residues: Vec<NearbyResidue>,
    pub cavity_points: usize,
    pub surface_accessibility: SurfaceAccessibility,
}

impl BindingSite {
    pub fn residue_count(&self) -> usize {
        self.nearby_residues.len()
    }
}

/// Serde adapter writing a point as an `{x, y, z}` object.
pub(crate) mod point_xyz {
    use nalgebra::Point3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        x: f64,
        y: f64,
        z: f64,
    }

    pub fn serialize<S: Serializer>(point: &Point3<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz {
            x: point.x,
            y: point.y,
            z: point.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Point3<f64>, D::Error> {
        let Xyz { x, y, z } = Xyz::deserialize(deserializer)?;
        Ok(Point3::new(x, y, z))
    }
}
