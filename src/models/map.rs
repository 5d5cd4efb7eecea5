// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Map view of an itinerary: one pin per located activity.

use super::ActivityRecord;
use geo::{BoundingRect, MultiPoint, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Initial zoom level for a city-sized itinerary.
pub const DEFAULT_ZOOM: u8 = 12;

/// Text shown instead of a map when there is nothing to pin.
pub const NO_LOCATIONS_MESSAGE: &str = "No locations available";

/// A single map marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapPin {
    pub title: String,
    pub lat: f64,
    pub long: f64,
    pub description: String,
}

impl MapPin {
    /// Pin for a record, or `None` for the `(0, 0)` "unknown location" sentinel.
    pub fn from_record(record: &ActivityRecord) -> Option<Self> {
        record.has_location().then(|| Self {
            title: record.activity.clone(),
            lat: record.latitude,
            long: record.longitude,
            description: record.description.clone(),
        })
    }

    /// Position as a geo point (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.long, self.lat)
    }
}

/// Bounding box over all pins, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// What the map pane should render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapView {
    Locations {
        /// `[lat, long]`
        center: [f64; 2],
        zoom: u8,
        bounds: Option<MapBounds>,
        pins: Vec<MapPin>,
    },
    NoLocations {
        message: String,
    },
}

impl MapView {
    /// Build the map view for a list of activities.
    pub fn from_records(records: &[ActivityRecord]) -> Self {
        let pins = pins_for(records);

        let Some(first) = pins.first() else {
            return MapView::NoLocations {
                message: NO_LOCATIONS_MESSAGE.to_string(),
            };
        };

        let center = [first.lat, first.long];
        let bounds = MultiPoint::new(pins.iter().map(MapPin::point).collect())
            .bounding_rect()
            .map(|rect| MapBounds {
                south: rect.min().y,
                west: rect.min().x,
                north: rect.max().y,
                east: rect.max().x,
            });

        MapView::Locations {
            center,
            zoom: DEFAULT_ZOOM,
            bounds,
            pins,
        }
    }

    pub fn pins(&self) -> &[MapPin] {
        match self {
            MapView::Locations { pins, .. } => pins,
            MapView::NoLocations { .. } => &[],
        }
    }
}

/// Pins for every record with a known location, in list order.
pub fn pins_for(records: &[ActivityRecord]) -> Vec<MapPin> {
    records.iter().filter_map(MapPin::from_record).collect()
}

/// Export pins as a GeoJSON `FeatureCollection` of `Point` features.
pub fn to_feature_collection(pins: &[MapPin]) -> FeatureCollection {
    let features = pins
        .iter()
        .map(|pin| {
            let mut properties = JsonObject::new();
            properties.insert("title".to_string(), pin.title.clone().into());
            properties.insert("description".to_string(), pin.description.clone().into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&pin.point()))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
