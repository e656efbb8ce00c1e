//! Great-circle distance and proximity ranking.
//!
//! Every query is a linear scan: each candidate costs one haversine
//! evaluation, so a query is O(candidates) plus O(k log k) to rank the k
//! hits. A grid or R-tree index would cut the scan but is not needed for
//! correctness.

use std::str::FromStr;

use crate::{Error, Result, profile::{Coordinate, ProfileView}};

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Search radius used when the caller does not give one, in meters.
pub const DEFAULT_RADIUS_M: f64 = 10_000.0;

// ─── Distance ────────────────────────────────────────────────────────────────

/// Haversine distance between two points, in meters.
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
  let lat1 = a.latitude.to_radians();
  let lat2 = b.latitude.to_radians();
  let dlat = lat2 - lat1;
  let dlon = (b.longitude - a.longitude).to_radians();

  let h = (dlat / 2.0).sin().powi(2)
    + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
  // Clamp guards against h creeping past 1.0 through rounding for
  // near-antipodal points.
  let c = 2.0 * h.sqrt().min(1.0).asin();
  EARTH_RADIUS_M * c
}

/// Round a distance to the nearest whole meter.
pub fn round_meters(distance_m: f64) -> u64 { distance_m.round() as u64 }

// ─── Radius ──────────────────────────────────────────────────────────────────

/// A validated search radius: positive and finite, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radius(f64);

impl Radius {
  pub fn new(meters: f64) -> Result<Self> {
    if meters.is_finite() && meters > 0.0 {
      Ok(Self(meters))
    } else {
      Err(Error::validation(
        "radius",
        format!("must be a positive finite number of meters, got {meters}"),
      ))
    }
  }

  /// Parse an optional query parameter, defaulting to
  /// [`DEFAULT_RADIUS_M`] when absent.
  pub fn from_param(raw: Option<&str>) -> Result<Self> {
    match raw {
      None => Ok(Self::default()),
      Some(s) => s.parse(),
    }
  }

  pub fn meters(self) -> f64 { self.0 }
}

impl Default for Radius {
  fn default() -> Self { Self(DEFAULT_RADIUS_M) }
}

impl FromStr for Radius {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let meters: f64 = s.trim().parse().map_err(|_| {
      Error::validation("radius", format!("not a number: {s:?}"))
    })?;
    Self::new(meters)
  }
}

// ─── Ranking ─────────────────────────────────────────────────────────────────

/// Anything that may sit at a point on the map.
pub trait Located {
  fn coordinate(&self) -> Option<Coordinate>;
}

impl Located for ProfileView {
  fn coordinate(&self) -> Option<Coordinate> { self.profile.coordinate }
}

/// A candidate that fell inside the search radius.
#[derive(Debug, Clone)]
pub struct Nearby<T> {
  pub item:       T,
  pub coordinate: Coordinate,
  /// Distance from the query origin, rounded to whole meters.
  pub distance_m: u64,
}

/// A located candidate from the unranked map listing.
#[derive(Debug, Clone)]
pub struct Placed<T> {
  pub item:       T,
  pub coordinate: Coordinate,
}

/// Candidates within `radius` of `origin`, nearest first.
///
/// Candidates without a coordinate are dropped before any distance is
/// computed. Inclusion compares the exact distance (`<= radius`); ties keep
/// their input order.
pub fn find_nearby<T, I>(origin: Coordinate, radius: Radius, candidates: I) -> Vec<Nearby<T>>
where
  T: Located,
  I: IntoIterator<Item = T>,
{
  let mut hits: Vec<(f64, Coordinate, T)> = candidates
    .into_iter()
    .filter_map(|item| item.coordinate().map(|c| (c, item)))
    .filter_map(|(coordinate, item)| {
      let distance = haversine_m(origin, coordinate);
      (distance <= radius.meters()).then_some((distance, coordinate, item))
    })
    .collect();

  hits.sort_by(|a, b| a.0.total_cmp(&b.0));

  hits
    .into_iter()
    .map(|(distance, coordinate, item)| Nearby {
      item,
      coordinate,
      distance_m: round_meters(distance),
    })
    .collect()
}

/// Every candidate that has a coordinate, in input order.
pub fn full_listing<T, I>(candidates: I) -> Vec<Placed<T>>
where
  T: Located,
  I: IntoIterator<Item = T>,
{
  candidates
    .into_iter()
    .filter_map(|item| item.coordinate().map(|coordinate| Placed { item, coordinate }))
    .collect()
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  #[derive(Debug, Clone, PartialEq)]
  struct Pin(&'static str, Option<Coordinate>);

  impl Located for Pin {
    fn coordinate(&self) -> Option<Coordinate> { self.1 }
  }

  fn at(lat: f64, lon: f64) -> Option<Coordinate> { Some(Coordinate { latitude: lat, longitude: lon }) }

  const ORIGIN: Coordinate = Coordinate { latitude: 0.0, longitude: 0.0 };

  #[test]
  fn one_degree_of_longitude_at_the_equator() {
    let d = haversine_m(ORIGIN, Coordinate { latitude: 0.0, longitude: 1.0 });
    assert!((d - 111_195.0).abs() < 1.0, "got {d}");
  }

  #[test]
  fn antipodes_are_half_the_circumference() {
    let d = haversine_m(ORIGIN, Coordinate { latitude: 0.0, longitude: 180.0 });
    assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1e-6);
  }

  #[test]
  fn ten_kilometres_east_is_inside_default_radius() {
    // 0.0899° of longitude at the equator is ~9,996 m.
    let pins = vec![Pin("east", at(0.0, 0.0899))];
    let hits = find_nearby(ORIGIN, Radius::default(), pins.clone());
    assert_eq!(hits.len(), 1);
    assert!((hits[0].distance_m as i64 - 9_996).abs() <= 50, "got {}", hits[0].distance_m);

    let hits = find_nearby(ORIGIN, Radius::new(9_000.0).unwrap(), pins);
    assert!(hits.is_empty());
  }

  #[test]
  fn ranks_nearest_first_and_skips_unlocated() {
    let pins = vec![
      Pin("far", at(0.0, 0.05)),
      Pin("nowhere", None),
      Pin("near", at(0.0, 0.01)),
      Pin("out", at(1.0, 1.0)),
    ];
    let names: Vec<_> = find_nearby(ORIGIN, Radius::default(), pins)
      .into_iter()
      .map(|n| n.item.0)
      .collect();
    assert_eq!(names, vec!["near", "far"]);
  }

  #[test]
  fn full_listing_keeps_order_and_drops_unlocated() {
    let pins = vec![
      Pin("b", at(50.0, 50.0)),
      Pin("none", None),
      Pin("a", at(0.0, 0.0)),
    ];
    let names: Vec<_> = full_listing(pins).into_iter().map(|p| p.item.0).collect();
    assert_eq!(names, vec!["b", "a"]);
  }

  #[test]
  fn radius_validation() {
    assert_eq!(Radius::from_param(None).unwrap().meters(), DEFAULT_RADIUS_M);
    assert_eq!(Radius::from_param(Some("2500")).unwrap().meters(), 2_500.0);
    for bad in ["0", "-5", "NaN", "inf", "ten"] {
      let err = Radius::from_param(Some(bad)).unwrap_err();
      assert_eq!(err.field(), Some("radius"), "{bad}");
    }
  }

  fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0)
      .prop_map(|(latitude, longitude)| Coordinate { latitude, longitude })
  }

  proptest! {
    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
      let ab = haversine_m(a, b);
      let ba = haversine_m(b, a);
      prop_assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn distance_to_self_is_zero(a in coordinate()) {
      prop_assert_eq!(haversine_m(a, a), 0.0);
    }

    #[test]
    fn nearby_is_exactly_the_points_in_range_sorted(
      origin in coordinate(),
      points in prop::collection::vec(coordinate(), 0..40),
      radius in 1.0f64..5_000_000.0,
    ) {
      let pins: Vec<Pin> = points.iter().map(|c| Pin("p", Some(*c))).collect();
      let hits = find_nearby(origin, Radius::new(radius).unwrap(), pins);

      let expected = points.iter().filter(|c| haversine_m(origin, **c) <= radius).count();
      prop_assert_eq!(hits.len(), expected);
      prop_assert!(hits.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));
    }
  }
}
