//! Closed lookup tables between app-facing enums and MapKit constants.
//!
//! Every enum here is finite on purpose: a string outside the table is a
//! [`ConfigError::InvalidValue`], never a silent default. Each variant records
//! where the SDK constant lives (`mapkit.<namespace>.<member>`) and the raw
//! value MapKit reports back, so both directions go through the same table.

#[cfg(test)]
#[path = "convert_test.rs"]
mod convert_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DISPLAY_PRIORITY_HIGH, DISPLAY_PRIORITY_LOW, DISPLAY_PRIORITY_REQUIRED};
use crate::error::ConfigError;

/// Reference to an SDK enum constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SdkConstant {
    /// Path below the `mapkit` global, e.g. `["Map", "MapTypes"]`.
    pub namespace: &'static [&'static str],
    /// Member name within the namespace, e.g. `"Standard"`.
    pub member: &'static str,
    /// Value the SDK stores for the constant, e.g. `"standard"`.
    pub raw: &'static str,
}

macro_rules! sdk_enum {
    (
        $(#[$meta:meta])*
        $name:ident, kind = $kind:literal, namespace = [$($ns:literal),+] {
            $($variant:ident => ($label:literal, $member:literal, $raw:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Every member of the table, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            const NAMESPACE: &'static [&'static str] = &[$($ns),+];

            /// App-facing name.
            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// The SDK constant for this value.
            #[must_use]
            pub fn to_sdk(self) -> SdkConstant {
                match self {
                    $(Self::$variant => SdkConstant { namespace: Self::NAMESPACE, member: $member, raw: $raw }),+
                }
            }

            /// Reverse lookup from the raw value the SDK reports.
            ///
            /// # Errors
            ///
            /// Returns [`ConfigError::InvalidValue`] for values outside the table.
            pub fn from_sdk(raw: &str) -> Result<Self, ConfigError> {
                match raw {
                    $($raw => Ok(Self::$variant),)+
                    other => Err(ConfigError::invalid($kind, other)),
                }
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err(ConfigError::invalid($kind, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

sdk_enum! {
    /// Base map style.
    MapType, kind = "map type", namespace = ["Map", "MapTypes"] {
        Standard => ("Standard", "Standard", "standard"),
        MutedStandard => ("MutedStandard", "MutedStandard", "mutedStandard"),
        Hybrid => ("Hybrid", "Hybrid", "hybrid"),
        Satellite => ("Satellite", "Satellite", "satellite"),
    }
}

sdk_enum! {
    /// Visibility policy for map controls and marker labels.
    FeatureVisibility, kind = "feature visibility", namespace = ["FeatureVisibility"] {
        Adaptive => ("Adaptive", "Adaptive", "adaptive"),
        Visible => ("Visible", "Visible", "visible"),
        Hidden => ("Hidden", "Hidden", "hidden"),
    }
}

sdk_enum! {
    /// Unit system for the scale and distances.
    Distances, kind = "distances", namespace = ["Map", "Distances"] {
        Adaptive => ("Adaptive", "Adaptive", "adaptive"),
        Metric => ("Metric", "Metric", "metric"),
        Imperial => ("Imperial", "Imperial", "imperial"),
    }
}

sdk_enum! {
    /// Shape used when resolving annotation collisions.
    CollisionMode, kind = "collision mode", namespace = ["Annotation", "CollisionMode"] {
        Rectangle => ("Rectangle", "Rectangle", "rectangle"),
        Circle => ("Circle", "Circle", "circle"),
        None => ("None", "None", "none"),
    }
}

sdk_enum! {
    /// Point-of-interest categories usable in include/exclude filters.
    PoiCategory, kind = "point of interest category", namespace = ["PointOfInterestCategory"] {
        Airport => ("Airport", "Airport", "Airport"),
        AmusementPark => ("AmusementPark", "AmusementPark", "AmusementPark"),
        Aquarium => ("Aquarium", "Aquarium", "Aquarium"),
        Atm => ("ATM", "ATM", "ATM"),
        Bakery => ("Bakery", "Bakery", "Bakery"),
        Bank => ("Bank", "Bank", "Bank"),
        Beach => ("Beach", "Beach", "Beach"),
        Brewery => ("Brewery", "Brewery", "Brewery"),
        Cafe => ("Cafe", "Cafe", "Cafe"),
        Campground => ("Campground", "Campground", "Campground"),
        CarRental => ("CarRental", "CarRental", "CarRental"),
        EvCharger => ("EVCharger", "EVCharger", "EVCharger"),
        FireStation => ("FireStation", "FireStation", "FireStation"),
        FitnessCenter => ("FitnessCenter", "FitnessCenter", "FitnessCenter"),
        FoodMarket => ("FoodMarket", "FoodMarket", "FoodMarket"),
        GasStation => ("GasStation", "GasStation", "GasStation"),
        Hospital => ("Hospital", "Hospital", "Hospital"),
        Hotel => ("Hotel", "Hotel", "Hotel"),
        Laundry => ("Laundry", "Laundry", "Laundry"),
        Library => ("Library", "Library", "Library"),
        Marina => ("Marina", "Marina", "Marina"),
        MovieTheater => ("MovieTheater", "MovieTheater", "MovieTheater"),
        Museum => ("Museum", "Museum", "Museum"),
        NationalPark => ("NationalPark", "NationalPark", "NationalPark"),
        Nightlife => ("Nightlife", "Nightlife", "Nightlife"),
        Park => ("Park", "Park", "Park"),
        Parking => ("Parking", "Parking", "Parking"),
        Pharmacy => ("Pharmacy", "Pharmacy", "Pharmacy"),
        Police => ("Police", "Police", "Police"),
        PostOffice => ("PostOffice", "PostOffice", "PostOffice"),
        PublicTransport => ("PublicTransport", "PublicTransport", "PublicTransport"),
        Restaurant => ("Restaurant", "Restaurant", "Restaurant"),
        Restroom => ("Restroom", "Restroom", "Restroom"),
        School => ("School", "School", "School"),
        Stadium => ("Stadium", "Stadium", "Stadium"),
        Store => ("Store", "Store", "Store"),
        Theater => ("Theater", "Theater", "Theater"),
        University => ("University", "University", "University"),
        Winery => ("Winery", "Winery", "Winery"),
        Zoo => ("Zoo", "Zoo", "Zoo"),
    }
}

/// Annotation display priority: one of MapKit's named levels or a raw number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPriority {
    Low,
    High,
    Required,
    #[serde(untagged)]
    Value(f64),
}

impl DisplayPriority {
    /// Numeric priority as MapKit stores it.
    #[must_use]
    pub fn as_number(self) -> f64 {
        match self {
            Self::Low => DISPLAY_PRIORITY_LOW,
            Self::High => DISPLAY_PRIORITY_HIGH,
            Self::Required => DISPLAY_PRIORITY_REQUIRED,
            Self::Value(v) => v,
        }
    }
}

impl FromStr for DisplayPriority {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            "required" => Ok(Self::Required),
            other => match other.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Self::Value(v)),
                _ => Err(ConfigError::invalid("display priority", other)),
            },
        }
    }
}

/// Overlay line cap style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for LineCap {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            other => Err(ConfigError::invalid("line cap", other)),
        }
    }
}

/// Convert a list of category names into table entries, failing on the first unknown one.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] naming the first unrecognized category.
pub fn parse_poi_categories<S: AsRef<str>>(names: &[S]) -> Result<Vec<PoiCategory>, ConfigError> {
    names.iter().map(|n| n.as_ref().parse()).collect()
}
