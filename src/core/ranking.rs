use crate::core::distance::distance_km;
use crate::models::{Coordinate, RepairShop, SortCriterion};

/// Rank repair shops relative to an origin point
///
/// `Distance` orders nearest-first by great-circle distance from `origin`;
/// `Rating` orders highest-first, with unrated shops treated as rating 0.
/// The sort is stable, so shops with equal keys keep their input order.
///
/// Distance is always recomputed from raw coordinates rather than trusting
/// any ordering or precomputed distance the upstream source provided, and the
/// `distance_km` field is populated on every returned shop. The input slice
/// is left untouched.
///
/// Shops with NaN coordinates sort after all finite distances (total_cmp
/// order); callers are expected to pre-validate coordinates.
pub fn rank(origin: Coordinate, shops: &[RepairShop], criterion: SortCriterion) -> Vec<RepairShop> {
    let mut ranked: Vec<RepairShop> = shops
        .iter()
        .cloned()
        .map(|mut shop| {
            shop.distance_km = Some(distance_km(origin, shop.location));
            shop
        })
        .collect();

    match criterion {
        SortCriterion::Distance => {
            ranked.sort_by(|a, b| {
                a.distance_km
                    .unwrap_or(f64::NAN)
                    .total_cmp(&b.distance_km.unwrap_or(f64::NAN))
            });
        }
        SortCriterion::Rating => {
            ranked.sort_by(|a, b| b.rating_or_default().total_cmp(&a.rating_or_default()));
        }
    }

    ranked
}
