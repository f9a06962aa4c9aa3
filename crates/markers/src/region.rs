use foundation::geo::LatLng;

/// Picks the marker icon and describes the region in its popup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RegionCategory {
    City,
    Remote,
    Island,
}

impl RegionCategory {
    pub fn label(self) -> &'static str {
        match self {
            RegionCategory::City => "City",
            RegionCategory::Remote => "Remote",
            RegionCategory::Island => "Island",
        }
    }
}

/// One named exploration target. Immutable, defined at startup.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub coords: LatLng,
    /// Preferred zoom when flying to this region.
    pub zoom: f64,
    pub category: RegionCategory,
}

/// The fixed exploration set: major cities plus the remote and island
/// communities worth their own camera target.
pub const ALASKA_REGIONS: [Region; 8] = [
    Region {
        name: "Anchorage",
        coords: LatLng::new(61.2181, -149.9003),
        zoom: 10.0,
        category: RegionCategory::City,
    },
    Region {
        name: "Fairbanks",
        coords: LatLng::new(64.8378, -147.7164),
        zoom: 10.0,
        category: RegionCategory::City,
    },
    Region {
        name: "Juneau",
        coords: LatLng::new(58.3019, -134.4197),
        zoom: 10.0,
        category: RegionCategory::City,
    },
    Region {
        name: "Sitka",
        coords: LatLng::new(57.0531, -135.33),
        zoom: 10.0,
        category: RegionCategory::City,
    },
    Region {
        name: "Ketchikan",
        coords: LatLng::new(55.3422, -131.6461),
        zoom: 10.0,
        category: RegionCategory::City,
    },
    Region {
        name: "Nome",
        coords: LatLng::new(64.5011, -165.4064),
        zoom: 9.0,
        category: RegionCategory::Remote,
    },
    Region {
        name: "Barrow (Utqiagvik)",
        coords: LatLng::new(71.2906, -156.7886),
        zoom: 9.0,
        category: RegionCategory::Remote,
    },
    Region {
        name: "Kodiak",
        coords: LatLng::new(57.79, -152.4044),
        zoom: 9.0,
        category: RegionCategory::Island,
    },
];

pub fn region_by_name(name: &str) -> Option<&'static Region> {
    ALASKA_REGIONS.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::{ALASKA_REGIONS, RegionCategory, region_by_name};

    #[test]
    fn region_set_is_the_fixed_eight() {
        assert_eq!(ALASKA_REGIONS.len(), 8);
        let cities = ALASKA_REGIONS
            .iter()
            .filter(|r| r.category == RegionCategory::City)
            .count();
        assert_eq!(cities, 5);
    }

    #[test]
    fn remote_regions_use_a_wider_preferred_zoom() {
        for region in ALASKA_REGIONS {
            let expected = match region.category {
                RegionCategory::City => 10.0,
                RegionCategory::Remote | RegionCategory::Island => 9.0,
            };
            assert_eq!(region.zoom, expected, "{}", region.name);
        }
    }

    #[test]
    fn lookup_by_name() {
        let nome = region_by_name("Nome").expect("known region");
        assert_eq!(nome.category, RegionCategory::Remote);
        assert!(region_by_name("Atlantis").is_none());
    }
}
