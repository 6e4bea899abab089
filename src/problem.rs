//! Cities, the great-circle distance model and the shared problem instance.

use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// The bundled European city dataset.
pub const EUROPE_JSON: &str = include_str!("../data/europe.json");

/// A named geographic point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    /// Create a new city.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        City {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Great-circle distance to another city in kilometres.
    pub fn distance_to(&self, other: &City) -> f64 {
        distance(self.lat, self.lon, other.lat, other.lon)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.lat, self.lon)
    }
}

/// Spherical law of cosines distance between two points given in degrees.
///
/// The arc is expressed in nautical-mile degrees (`60 * 1.1515` statute miles
/// per degree) and then converted to kilometres.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let theta = lon1 - lon2;
    let cos_arc = lat1.to_radians().sin() * lat2.to_radians().sin()
        + lat1.to_radians().cos() * lat2.to_radians().cos() * theta.to_radians().cos();
    // Rounding can push the cosine just past 1.0 for identical points.
    let arc = cos_arc.clamp(-1.0, 1.0).acos().to_degrees();
    arc * 60.0 * 1.1515 * 1.609344
}

/// Record layout of the city dataset: `{"city": "Name,Country", "ll": "lat,lon"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityRecord {
    pub city: String,
    pub ll: String,
}

impl CityRecord {
    /// Convert the raw record into a city, rejecting malformed fields.
    pub fn to_city(&self, index: usize) -> Result<City> {
        let malformed = |reason: String| Error::Dataset { index, reason };

        let name = self.city.split(',').next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(malformed(format!("empty city name in {:?}", self.city)));
        }

        let mut parts = self.ll.split(',');
        let (lat, lon) = match (parts.next(), parts.next()) {
            (Some(lat), Some(lon)) => (lat.trim(), lon.trim()),
            _ => return Err(malformed(format!("expected \"lat,lon\", got {:?}", self.ll))),
        };
        let lat = lat
            .parse::<f64>()
            .map_err(|e| malformed(format!("latitude {:?}: {}", lat, e)))?;
        let lon = lon
            .parse::<f64>()
            .map_err(|e| malformed(format!("longitude {:?}: {}", lon, e)))?;
        if !lat.is_finite() || !lon.is_finite() {
            return Err(malformed(format!("non-finite coordinates {:?}", self.ll)));
        }

        Ok(City::new(name, lat, lon))
    }
}

/// Parse a JSON dataset, optionally shuffle it, and keep the first `limit` cities.
///
/// Every record is validated; a single malformed one fails the whole load.
pub fn parse_cities(
    json: &str,
    limit: usize,
    shuffle: Option<&mut dyn RngCore>,
) -> Result<Vec<City>> {
    let records: Vec<CityRecord> = serde_json::from_str(json)?;
    let mut cities = records
        .iter()
        .enumerate()
        .map(|(i, record)| record.to_city(i))
        .collect::<Result<Vec<_>>>()?;

    if let Some(rng) = shuffle {
        cities.shuffle(rng);
    }
    cities.truncate(limit);

    Ok(cities)
}

/// Load a dataset file, see [`parse_cities`].
pub fn load_cities<P: AsRef<Path>>(
    path: P,
    limit: usize,
    shuffle: Option<&mut dyn RngCore>,
) -> Result<Vec<City>> {
    let json = fs::read_to_string(path)?;
    parse_cities(&json, limit, shuffle)
}

/// The immutable city list shared by every worker, with its distance matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub cities: Vec<City>,
    pub distance_matrix: Vec<Vec<f64>>,
}

impl Problem {
    /// Create a problem from a non-empty list of cities. City 0 is the depot.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(Error::EmptyProblem);
        }
        let distance_matrix = Self::compute_distance_matrix(&cities);

        Ok(Problem {
            cities,
            distance_matrix,
        })
    }

    /// Distance between two city indices.
    pub fn get_distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    /// Number of cities, depot included.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Get a city by index.
    pub fn city(&self, index: usize) -> &City {
        &self.cities[index]
    }

    fn compute_distance_matrix(cities: &[City]) -> Vec<Vec<f64>> {
        let n = cities.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    matrix[i][j] = cities[i].distance_to(&cities[j]);
                }
            }
        }

        matrix
    }
}
