//! Departure ordering and spacing.
//!
//! Turns unordered candidates into the final board: parse each departure
//! time, sort by elapsed time with trip id as tiebreak, and compute the
//! gap to the preceding departure.

use tracing::warn;

use crate::domain::{RouteId, ServiceDayTime, TripId};

use super::assembler::DepartureCandidate;

/// An ordered departure on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub route_id: RouteId,
    pub route_short_name: String,
    pub trip_id: TripId,
    pub headsign: Option<String>,
    pub time_of_day: ServiceDayTime,
    /// Whole seconds since the previous departure; `None` for the first.
    pub spacing_seconds: Option<i64>,
}

/// Order candidates into the final departure sequence.
///
/// A candidate whose time does not parse is dropped with a warning;
/// partial results beat failing the whole board. Ties on the departure
/// time are broken by trip id, because the order candidates arrive in
/// carries no meaning. Spacing is a plain difference of elapsed times,
/// so a departure at "24:10:00" follows "23:50:00" by 1200 seconds and
/// is never wrapped back around midnight.
pub fn sequence(candidates: Vec<DepartureCandidate>) -> Vec<Departure> {
    let mut parsed: Vec<(ServiceDayTime, DepartureCandidate)> =
        Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match ServiceDayTime::parse(&candidate.departure_time) {
            Ok(time) => parsed.push((time, candidate)),
            Err(err) => warn!(
                trip_id = %candidate.trip_id,
                departure_time = %candidate.departure_time,
                %err,
                "unparsable departure time, dropping"
            ),
        }
    }

    parsed.sort_by(|(time_a, cand_a), (time_b, cand_b)| {
        time_a
            .cmp(time_b)
            .then_with(|| cand_a.trip_id.cmp(&cand_b.trip_id))
    });

    let mut departures = Vec::with_capacity(parsed.len());
    let mut previous: Option<ServiceDayTime> = None;
    for (time, candidate) in parsed {
        departures.push(Departure {
            route_id: candidate.route_id,
            route_short_name: candidate.route_short_name,
            trip_id: candidate.trip_id,
            headsign: candidate.headsign,
            time_of_day: time,
            spacing_seconds: previous.map(|prev| time.seconds_since(prev)),
        });
        previous = Some(time);
    }
    departures
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(trip: &str, time: &str) -> DepartureCandidate {
        DepartureCandidate {
            route_id: RouteId::new("r60"),
            route_short_name: "60".into(),
            trip_id: TripId::new(trip),
            headsign: Some("Downtown".into()),
            departure_time: time.into(),
        }
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(sequence(Vec::new()).is_empty());
    }

    #[test]
    fn single_departure_has_no_spacing() {
        let departures = sequence(vec![candidate("t1", "08:30:00")]);

        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].spacing_seconds, None);
        assert_eq!(departures[0].time_of_day.to_string(), "08:30:00");
    }

    #[test]
    fn sorts_and_spaces() {
        let departures = sequence(vec![
            candidate("t3", "09:00:00"),
            candidate("t1", "08:30:00"),
            candidate("t2", "08:45:00"),
        ]);

        let trips: Vec<_> = departures.iter().map(|d| d.trip_id.as_str()).collect();
        assert_eq!(trips, vec!["t1", "t2", "t3"]);

        let spacings: Vec<_> = departures.iter().map(|d| d.spacing_seconds).collect();
        assert_eq!(spacings, vec![None, Some(900), Some(900)]);
    }

    #[test]
    fn ties_broken_by_trip_id() {
        let departures = sequence(vec![
            candidate("t2", "08:30:00"),
            candidate("t1", "08:30:00"),
            candidate("t3", "08:30:00"),
        ]);

        let trips: Vec<_> = departures.iter().map(|d| d.trip_id.as_str()).collect();
        assert_eq!(trips, vec!["t1", "t2", "t3"]);
        assert_eq!(departures[1].spacing_seconds, Some(0));
        assert_eq!(departures[2].spacing_seconds, Some(0));
    }

    #[test]
    fn past_midnight_spacing_not_wrapped() {
        let departures = sequence(vec![
            candidate("t2", "24:10:00"),
            candidate("t1", "23:50:00"),
        ]);

        assert_eq!(departures[0].trip_id.as_str(), "t1");
        assert_eq!(departures[1].trip_id.as_str(), "t2");
        assert_eq!(departures[1].spacing_seconds, Some(1200));
        // Presentation keeps the elapsed form
        assert_eq!(departures[1].time_of_day.to_string(), "24:10:00");
    }

    #[test]
    fn malformed_time_drops_only_that_candidate() {
        let departures = sequence(vec![
            candidate("t1", "08:30:00"),
            candidate("t2", "not a time"),
            candidate("t3", "08:45:00"),
        ]);

        let trips: Vec<_> = departures.iter().map(|d| d.trip_id.as_str()).collect();
        assert_eq!(trips, vec!["t1", "t3"]);
        // Spacing is computed over the surviving departures
        assert_eq!(departures[1].spacing_seconds, Some(900));
    }

    #[test]
    fn carries_route_and_headsign_through() {
        let mut cand = candidate("t1", "08:30:00");
        cand.headsign = None;
        let departures = sequence(vec![cand]);

        assert_eq!(departures[0].route_short_name, "60");
        assert_eq!(departures[0].headsign, None);
    }
}
