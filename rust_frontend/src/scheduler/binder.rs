//! Groups a day's reservations under the bath they belong to.

use chrono::NaiveDate;
use log::warn;

use crate::models::{Bath, Reservation};

/// One bath and the reservations that start on the displayed date, in the
/// order the API returned them.
#[derive(Debug, Clone)]
pub struct BoundBath<'a> {
    pub bath: &'a Bath,
    pub reservations: Vec<&'a Reservation>,
}

impl BoundBath<'_> {
    pub fn has_reservations(&self) -> bool {
        !self.reservations.is_empty()
    }
}

/// Bind every bath to its reservations on `date`.
///
/// Baths without reservations are kept. Reservations for other baths or
/// other start dates are left out, and reservations whose end is not after
/// their start are skipped with a warning.
pub fn bind_reservations<'a>(
    baths: &'a [Bath],
    reservations: &'a [Reservation],
    date: NaiveDate,
) -> Vec<BoundBath<'a>> {
    baths
        .iter()
        .map(|bath| BoundBath {
            bath,
            reservations: reservations
                .iter()
                .filter(|r| r.bath_id == bath.bath_id && r.start_date() == date)
                .filter(|r| {
                    if r.is_valid_interval() {
                        true
                    } else {
                        warn!(
                            "Skipping reservation {} on bath {}: end {} is not after start {}",
                            r.reservation_id, r.bath_id, r.end, r.start
                        );
                        false
                    }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bath, day, reservation};

    #[test]
    fn test_bind_keeps_api_order_and_empty_baths() {
        let baths = vec![bath(1), bath(2)];
        let reservations = vec![
            reservation(3, 1, "2024-06-01 15:00", "2024-06-01 16:00"),
            reservation(4, 1, "2024-06-01 10:00", "2024-06-01 11:00"),
            reservation(5, 1, "2024-06-02 10:00", "2024-06-02 11:00"),
        ];
        let bound = bind_reservations(&baths, &reservations, day(2024, 6, 1));

        assert_eq!(bound.len(), 2);
        let ids: Vec<_> = bound[0].reservations.iter().map(|r| r.reservation_id.0).collect();
        assert_eq!(ids, vec![3, 4]);
        assert!(!bound[1].has_reservations());
    }

    #[test]
    fn test_bind_ignores_other_baths() {
        let baths = vec![bath(1)];
        let reservations = vec![reservation(1, 7, "2024-06-01 10:00", "2024-06-01 11:00")];
        let bound = bind_reservations(&baths, &reservations, day(2024, 6, 1));
        assert!(!bound[0].has_reservations());
    }

    #[test]
    fn test_bind_skips_inverted_interval() {
        let baths = vec![bath(1)];
        let reservations = vec![reservation(1, 1, "2024-06-01 12:00", "2024-06-01 11:00")];
        let bound = bind_reservations(&baths, &reservations, day(2024, 6, 1));
        assert!(bound[0].reservations.is_empty());
    }
}
