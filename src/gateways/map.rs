// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map view model.
//!
//! The frontend draws whatever this holds: the current view (center and
//! zoom) and the marker layer, which is exported as GeoJSON.

use crate::gateways::MapGateway;
use crate::models::Coordinates;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::Serialize;

/// A workout marker with its popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coords: Coordinates,
    pub popup_content: String,
    pub popup_class: String,
}

/// In-memory map state.
#[derive(Debug, Clone, Serialize)]
pub struct MapCanvas {
    initial_center: Coordinates,
    center: Coordinates,
    zoom: u8,
    /// Whether the last view change was animated
    animated: bool,
    markers: Vec<Marker>,
}

impl MapCanvas {
    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn last_move_animated(&self) -> bool {
        self.animated
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Marker layer as a GeoJSON FeatureCollection.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .markers
            .iter()
            .map(|marker| {
                let point: geo::Point<f64> = marker.coords.into();
                let mut properties = JsonObject::new();
                properties.insert("popup".to_string(), marker.popup_content.clone().into());
                properties.insert("className".to_string(), marker.popup_class.clone().into());

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(geojson::Value::from(&point))),
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
}

impl MapGateway for MapCanvas {
    fn initialize(center: Coordinates, zoom: u8) -> Self {
        tracing::info!(%center, zoom, "Map initialized");
        Self {
            initial_center: center,
            center,
            zoom,
            animated: false,
            markers: Vec::new(),
        }
    }

    fn place_marker(&mut self, coords: Coordinates, popup_content: &str, popup_class: &str) {
        self.markers.push(Marker {
            coords,
            popup_content: popup_content.to_string(),
            popup_class: popup_class.to_string(),
        });
    }

    fn pan_to(&mut self, coords: Coordinates, animate: bool) {
        self.center = coords;
        self.animated = animate;
    }

    fn reload(&mut self) {
        self.markers.clear();
        self.center = self.initial_center;
        self.animated = false;
    }
}
