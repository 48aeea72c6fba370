#[cfg(test)]
#[path = "../../../tests/unit/models/problem/costs_test.rs"]
mod costs_test;

use crate::models::common::{Distance, Duration, Location};
use std::sync::Arc;
use trsp_heuristics::prelude::GenericResult;

/// Provides the way to get routing information between locations.
pub trait TransportCost {
    /// Returns travel duration between locations.
    fn duration(&self, from: Location, to: Location) -> Duration;

    /// Returns travel distance between locations.
    fn distance(&self, from: Location, to: Location) -> Distance;

    /// Returns amount of known locations.
    fn size(&self) -> usize;
}

/// Creates transport costs from row-major square matrices of durations and distances.
pub fn create_matrix_transport_cost(
    durations: Vec<Duration>,
    distances: Vec<Distance>,
) -> GenericResult<Arc<dyn TransportCost + Send + Sync>> {
    if durations.is_empty() {
        return Err("no matrix data found".into());
    }

    if durations.len() != distances.len() {
        return Err("distance and duration collections have different length".into());
    }

    let size = (durations.len() as f64).sqrt().round() as usize;
    if size * size != durations.len() {
        return Err(format!("matrix is not square: {} items", durations.len()).into());
    }

    if durations.iter().chain(distances.iter()).any(|value| *value < 0. || !value.is_finite()) {
        return Err("matrix contains negative or non finite values".into());
    }

    Ok(Arc::new(MatrixTransportCost { durations, distances, size }))
}

/// Creates transport costs from planar coordinates using euclidean distance. Travel duration is
/// equal to distance.
pub fn create_euclidean_transport_cost(coordinates: &[(f64, f64)]) -> GenericResult<Arc<dyn TransportCost + Send + Sync>> {
    let distances = coordinates
        .iter()
        .flat_map(|&(x1, y1)| coordinates.iter().map(move |&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()))
        .collect::<Vec<_>>();

    create_matrix_transport_cost(distances.clone(), distances)
}

/// A time agnostic matrix routing costs.
struct MatrixTransportCost {
    durations: Vec<Duration>,
    distances: Vec<Distance>,
    size: usize,
}

impl TransportCost for MatrixTransportCost {
    fn duration(&self, from: Location, to: Location) -> Duration {
        self.durations[from * self.size + to]
    }

    fn distance(&self, from: Location, to: Location) -> Distance {
        self.distances[from * self.size + to]
    }

    fn size(&self) -> usize {
        self.size
    }
}
