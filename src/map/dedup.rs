use crate::error::{Error, Result};
use crate::events::models::EventRecord;
use crate::map::models::{DisplayPoint, GroupingPolicy, LatLng, LocationKey};
use std::collections::BTreeMap;

/// Collapses events sharing a coordinate into one display point each.
///
/// Points come out in lexicographic `(lat, lng)` string order, which is the
/// order markers get stacked in. A record whose coordinate does not parse
/// to a finite number fails the whole batch.
pub fn group_by_location(
    records: &[EventRecord],
    policy: GroupingPolicy,
) -> Result<Vec<DisplayPoint>> {
    let mut occurrences: BTreeMap<LocationKey, usize> = BTreeMap::new();
    for record in records {
        let key = LocationKey::new(
            policy.apply(record.lat().unwrap_or_default()),
            policy.apply(record.lng().unwrap_or_default()),
        );
        *occurrences.entry(key).or_insert(0) += 1;
    }
    occurrences
        .into_iter()
        .map(|(key, occurrences)| {
            Ok(DisplayPoint {
                position: parse_key(&key)?,
                occurrences,
            })
        })
        .collect()
}

fn parse_key(key: &LocationKey) -> Result<LatLng> {
    let invalid = || Error::InvalidCoordinate {
        lat: key.lat.clone(),
        lng: key.lng.clone(),
    };
    let lat = key.lat.parse::<f64>().map_err(|_| invalid())?;
    let lng = key.lng.parse::<f64>().map_err(|_| invalid())?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(invalid());
    }
    Ok(LatLng { lat, lng })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lat: &str, lng: &str) -> EventRecord {
        EventRecord::from_iter([("lat", lat), ("lng", lng)])
    }

    #[test]
    fn duplicates_are_counted_in_key_order() {
        let records = vec![
            record("3.0", "4.0"),
            record("1.0", "2.0"),
            record("1.0", "2.0"),
        ];

        let points = group_by_location(&records, GroupingPolicy::Exact).unwrap();

        assert_eq!(
            points,
            vec![
                DisplayPoint {
                    position: LatLng { lat: 1.0, lng: 2.0 },
                    occurrences: 2,
                },
                DisplayPoint {
                    position: LatLng { lat: 3.0, lng: 4.0 },
                    occurrences: 1,
                },
            ]
        );
    }

    #[test]
    fn occurrences_add_up_to_record_count() {
        let records = vec![
            record("-36.84", "174.76"),
            record("-41.28", "174.77"),
            record("-36.84", "174.76"),
            record("-43.53", "172.63"),
            record("-41.28", "174.77"),
            record("-36.84", "174.76"),
        ];

        let points = group_by_location(&records, GroupingPolicy::Exact).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(
            points.iter().map(|p| p.occurrences).sum::<usize>(),
            records.len()
        );
        assert_eq!(points[0].occurrences, 3);
    }

    #[test]
    fn differently_formatted_numbers_are_not_merged() {
        let records = vec![record("1.0", "2.0"), record("1.00", "2.0")];

        let points = group_by_location(&records, GroupingPolicy::Exact).unwrap();

        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.occurrences == 1));
    }

    #[test]
    fn truncation_merges_nearby_venues() {
        let records = vec![record("-36.8421", "174.7612"), record("-36.8499", "174.7655")];

        let policy = GroupingPolicy::Truncated { decimals: 2 };
        let points = group_by_location(&records, policy).unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].occurrences, 2);
        assert_eq!(
            points[0].position,
            LatLng {
                lat: -36.84,
                lng: 174.76
            }
        );
    }

    #[test]
    fn empty_batch_yields_no_points() {
        let points = group_by_location(&[], GroupingPolicy::Exact).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn non_numeric_coordinate_fails_the_batch() {
        let records = vec![record("1.0", "2.0"), record("north", "2.0")];

        let error = group_by_location(&records, GroupingPolicy::Exact).unwrap_err();

        assert!(matches!(
            error,
            Error::InvalidCoordinate { ref lat, .. } if lat == "north"
        ));
    }

    #[test]
    fn missing_coordinate_fails_the_batch() {
        let records = vec![EventRecord::from_iter([("name", "Gig")])];

        let error = group_by_location(&records, GroupingPolicy::Exact).unwrap_err();

        assert!(matches!(error, Error::InvalidCoordinate { .. }));
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        let records = vec![record("NaN", "2.0")];

        assert!(group_by_location(&records, GroupingPolicy::Exact).is_err());
    }
}
