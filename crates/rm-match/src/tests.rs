//! Unit tests for rm-match.
//!
//! Coordinates are around Gandhinagar / Ahmedabad; the driver route used in
//! most tests runs (23.20, 72.60) → (23.00, 72.40), about 30 km.

#[cfg(test)]
mod helpers {
    use chrono::{DateTime, Utc};

    use rm_core::{Coordinate, DriverId, Location, RideId, RideRoute, RideStatus};

    pub const ROUTE_START: Coordinate = Coordinate::new(23.20, 72.60);
    pub const ROUTE_END:   Coordinate = Coordinate::new(23.00, 72.40);
    /// 30 % and 70 % of the way along ROUTE_START → ROUTE_END.
    pub const AT_30: Coordinate = Coordinate::new(23.14, 72.54);
    pub const AT_70: Coordinate = Coordinate::new(23.06, 72.46);

    /// `secs` seconds after a fixed epoch.
    pub fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    pub fn ride(
        id:          u64,
        origin:      (&str, Coordinate),
        destination: (&str, Coordinate),
        created:     i64,
    ) -> RideRoute {
        let mut r = RideRoute::new(
            DriverId(id),
            format!("driver {id}"),
            Location::new(origin.0, origin.1),
            Location::new(destination.0, destination.1),
            3,
        );
        r.id = RideId(id);
        r.created_at = at(created);
        r
    }

    /// A ride along the standard route.
    pub fn route_ride(id: u64, created: i64) -> RideRoute {
        ride(id, ("Gandhinagar", ROUTE_START), ("Ahmedabad", ROUTE_END), created)
    }

    pub fn with_status(mut r: RideRoute, status: RideStatus) -> RideRoute {
        r.status = status;
        r
    }

    pub fn with_seats(mut r: RideRoute, seats: u32) -> RideRoute {
        r.available_seats = seats;
        r
    }

    pub fn ids(rides: &[RideRoute]) -> Vec<u64> {
        rides.iter().map(|r| r.id.0).collect()
    }
}

// ── Filtering ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod filter {
    use rm_core::{Coordinate, RideStatus};

    use super::helpers::*;
    use crate::{CandidateFilter, SearchRequest, TextFilter};

    #[test]
    fn blank_terms_are_ignored() {
        assert!(TextFilter::new(None, None).is_empty());
        assert!(TextFilter::new(Some("   "), Some("")).is_empty());
        assert!(!TextFilter::new(Some("x"), None).is_empty());
        assert!(!SearchRequest::new(1).origin_text("  ").has_text());
    }

    #[test]
    fn terms_are_trimmed_and_case_insensitive() {
        let r = ride(1, ("Sector 11 Market", Coordinate::UNSET), ("AHMEDABAD Airport", Coordinate::UNSET), 0);
        assert!(TextFilter::new(Some("  sector 11 "), None).matches(&r));
        assert!(TextFilter::new(None, Some("ahmedabad")).matches(&r));
        assert!(TextFilter::new(Some("market"), Some("airport")).matches(&r));
        assert!(!TextFilter::new(Some("market"), Some("station")).matches(&r));
        assert!(!TextFilter::new(Some("airport"), None).matches(&r));
    }

    #[test]
    fn metacharacters_match_literally() {
        let paren = ride(1, ("Sector (11) Market", Coordinate::UNSET), ("x", Coordinate::UNSET), 0);
        let plain = ride(2, ("Sector 11 Market", Coordinate::UNSET), ("x", Coordinate::UNSET), 0);
        let dotted = ride(3, ("A.B Road", Coordinate::UNSET), ("x", Coordinate::UNSET), 0);
        let wildcard_bait = ride(4, ("aXb Road", Coordinate::UNSET), ("x", Coordinate::UNSET), 0);

        let f = TextFilter::new(Some("Sector (11)"), None);
        assert!(f.matches(&paren));
        assert!(!f.matches(&plain));

        let f = TextFilter::new(Some("a.b"), None);
        assert!(f.matches(&dotted));
        assert!(!f.matches(&wildcard_bait));

        for term in ["a.b*c", "[", "(unclosed", "\\", "^$", "+?{2}"] {
            let f = TextFilter::new(Some(term), None);
            assert!(!f.matches(&plain), "{term:?} matched");
        }
    }

    #[test]
    fn eligibility_checks_seats_and_status() {
        let candidates = vec![
            route_ride(1, 0),
            with_seats(route_ride(2, 0), 1),
            with_status(route_ride(3, 0), RideStatus::Cancelled),
            with_status(route_ride(4, 0), RideStatus::Completed),
            with_seats(route_ride(5, 0), 2),
        ];
        let filter = CandidateFilter::for_request(&SearchRequest::new(2));
        let ids: Vec<u64> = filter.eligible(&candidates).iter().map(|r| r.id.0).collect();
        assert_eq!(ids, [1, 5]);
    }
}

// ── Route matcher ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod matcher {
    use rm_core::{Coordinate, MatchConfig};

    use super::helpers::*;
    use crate::{EXACT_SCORE_BASE, MatchMode, MatchType, PassengerTrip, ROUTE_SCORE_BASE, RouteMatcher};

    fn trip(origin: Coordinate, destination: Coordinate) -> PassengerTrip {
        PassengerTrip { origin, destination }
    }

    #[test]
    fn constructors() {
        let cfg = MatchConfig::default();
        let strict = RouteMatcher::strict(&cfg, None);
        assert_eq!(strict.mode, MatchMode::Strict);
        assert_eq!(strict.exact_distance_km, 5.0);
        assert_eq!(strict.route_deviation_km, 5.0);
        assert_eq!(RouteMatcher::default(), strict);

        assert_eq!(RouteMatcher::strict(&cfg, Some(2.0)).exact_distance_km, 2.0);
        assert_eq!(RouteMatcher::strict(&cfg, Some(2.0)).route_deviation_km, 5.0);
        assert_eq!(RouteMatcher::lenient(&cfg, None).exact_distance_km, 50.0);
        assert_eq!(RouteMatcher::lenient(&cfg, Some(7.0)).exact_distance_km, 7.0);
    }

    #[test]
    fn exact_match_scenario() {
        let r = ride(
            1,
            ("Gandhinagar", Coordinate::new(23.2156, 72.6369)),
            ("Ahmedabad", Coordinate::new(23.0, 72.5)),
            0,
        );
        let t = trip(Coordinate::new(23.2160, 72.6370), Coordinate::new(23.0005, 72.5003));
        let m = RouteMatcher::default().evaluate(&r, &t);
        assert_eq!(m.match_type, MatchType::Exact);
        assert!(m.origin_distance_km < 0.1, "got {}", m.origin_distance_km);
        assert!(m.destination_distance_km < 0.1, "got {}", m.destination_distance_km);
        assert!(m.score > 999.8 && m.score <= EXACT_SCORE_BASE, "got {}", m.score);
    }

    #[test]
    fn route_match_in_travel_direction() {
        let r = route_ride(1, 0);
        let m = RouteMatcher::default().evaluate(&r, &trip(AT_30, AT_70));
        assert_eq!(m.match_type, MatchType::Route);
        assert!(m.origin_distance_km < 0.5 && m.destination_distance_km < 0.5);
        assert!(m.score > 499.0 && m.score <= ROUTE_SCORE_BASE, "got {}", m.score);
    }

    #[test]
    fn wrong_direction_is_rejected() {
        let r = route_ride(1, 0);
        let m = RouteMatcher::default().evaluate(&r, &trip(AT_70, AT_30));
        assert_eq!(m.match_type, MatchType::NoMatch);
        assert!(!m.match_type.is_match());
    }

    #[test]
    fn far_from_route_is_rejected() {
        let r = route_ride(1, 0);
        // ~8 km off the line, beside the 30 % point.
        let off = Coordinate::new(23.19, 72.48);
        let m = RouteMatcher::default().evaluate(&r, &trip(off, AT_70));
        assert_eq!(m.match_type, MatchType::NoMatch);
    }

    #[test]
    fn ride_without_coordinates_never_matches_strictly() {
        let r = ride(1, ("Gandhinagar", Coordinate::UNSET), ("Ahmedabad", ROUTE_END), 0);
        let m = RouteMatcher::default().evaluate(&r, &trip(ROUTE_START, ROUTE_END));
        assert_eq!(m.match_type, MatchType::NoMatch);
        assert_eq!(RouteMatcher::default().endpoint_distances(&r, &trip(ROUTE_START, ROUTE_END)), None);
    }

    #[test]
    fn narrowed_exact_threshold_falls_back_to_route() {
        let r = route_ride(1, 0);
        let near_start = Coordinate::new(23.2004, 72.6002);
        let near_end = Coordinate::new(23.0004, 72.4002);
        let t = trip(near_start, near_end);

        assert_eq!(RouteMatcher::default().evaluate(&r, &t).match_type, MatchType::Exact);

        let narrow = RouteMatcher::strict(&MatchConfig::default(), Some(0.01));
        let m = narrow.evaluate(&r, &t);
        assert_eq!(m.match_type, MatchType::Route);
        assert!(m.score > 499.0, "got {}", m.score);
    }

    #[test]
    fn score_bands_never_overlap() {
        let cfg = MatchConfig::default();
        let worst_exact = EXACT_SCORE_BASE - 2.0 * cfg.exact_distance_km;
        let best_route = ROUTE_SCORE_BASE;
        assert!(worst_exact > best_route);
    }

    #[test]
    fn lenient_keeps_either_endpoint_and_coordinate_less_rides() {
        let lenient = RouteMatcher::lenient(&MatchConfig::default(), None);
        let t = trip(ROUTE_START, Coordinate::new(19.07, 72.87)); // drop in Mumbai

        let on_route = route_ride(1, 0);
        let m = lenient.evaluate(&on_route, &t);
        assert_eq!(m.match_type, MatchType::Text);
        assert_eq!(m.origin_distance_km, 0.0);
        assert!(m.destination_distance_km > 300.0);

        let bare = ride(2, ("Gandhinagar", Coordinate::UNSET), ("Ahmedabad", Coordinate::UNSET), 0);
        let m = lenient.evaluate(&bare, &t);
        assert_eq!(m.match_type, MatchType::Text);
        assert_eq!(m.score, f64::NEG_INFINITY);
        assert_eq!((m.origin_distance_km, m.destination_distance_km), (0.0, 0.0));

        let far = trip(Coordinate::new(21.17, 72.83), Coordinate::new(19.07, 72.87));
        assert_eq!(lenient.evaluate(&route_ride(3, 0), &far).match_type, MatchType::NoMatch);
    }

    #[test]
    fn match_type_labels() {
        assert_eq!(MatchType::Exact.to_string(), "exact");
        assert_eq!(MatchType::Route.to_string(), "route");
        assert_eq!(MatchType::NoMatch.to_string(), "none");
    }
}

// ── Orchestrated search ───────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use rm_core::{Coordinate, MatchConfig, RideRoute, RideStatus};

    use super::helpers::*;
    use crate::{MatchType, SearchOrchestrator, SearchRequest, Strategy, search};

    fn run(candidates: &[RideRoute], req: &SearchRequest) -> Vec<u64> {
        ids(&SearchOrchestrator::default().search(candidates, req))
    }

    #[test]
    fn strategy_selection() {
        assert_eq!(Strategy::select(true, true, 3), Strategy::Lenient);
        assert_eq!(Strategy::select(true, true, 0), Strategy::Strict);
        assert_eq!(Strategy::select(true, false, 5), Strategy::Strict);
        assert_eq!(Strategy::select(false, true, 5), Strategy::Unranked);
        assert_eq!(Strategy::select(false, false, 0), Strategy::Unranked);
    }

    #[test]
    fn empty_candidates_yield_empty_results() {
        let reqs = [
            SearchRequest::new(1),
            SearchRequest::new(1).origin_text("Sector"),
            SearchRequest::new(1).origin_coord(AT_30).destination_coord(AT_70),
            SearchRequest::new(1).origin_text("Sector").origin_coord(AT_30).destination_coord(AT_70),
        ];
        for req in &reqs {
            assert!(run(&[], req).is_empty());
        }
    }

    #[test]
    fn scenario_a_exact_match() {
        let candidates = vec![ride(
            1,
            ("Gandhinagar", Coordinate::new(23.2156, 72.6369)),
            ("Ahmedabad", Coordinate::new(23.0, 72.5)),
            0,
        )];
        let req = SearchRequest::new(1)
            .origin_coord(Coordinate::new(23.2160, 72.6370))
            .destination_coord(Coordinate::new(23.0005, 72.5003));

        let ranked = SearchOrchestrator::default().search_ranked(&candidates, &req);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].match_type, MatchType::Exact);
        assert!(ranked[0].score > 999.8);
    }

    #[test]
    fn scenario_b_and_c_direction() {
        let candidates = vec![route_ride(1, 0)];
        let forward = SearchRequest::new(1).origin_coord(AT_30).destination_coord(AT_70);
        let backward = SearchRequest::new(1).origin_coord(AT_70).destination_coord(AT_30);
        assert_eq!(run(&candidates, &forward), [1]);
        assert!(run(&candidates, &backward).is_empty());
    }

    #[test]
    fn scenario_d_text_match_without_coordinates() {
        let candidates = vec![ride(
            1,
            ("Sector 11 Market", Coordinate::UNSET),
            ("Infocity", Coordinate::UNSET),
            0,
        )];
        // Passenger coordinates in Mumbai: irrelevant for a coordinate-less ride.
        let req = SearchRequest::new(1)
            .origin_text("Sector 11")
            .origin_coord(Coordinate::new(19.07, 72.87))
            .destination_coord(Coordinate::new(19.10, 72.90));

        let ranked = SearchOrchestrator::default().search_ranked(&candidates, &req);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].match_type, MatchType::Text);
        assert_eq!(ranked[0].origin_distance_km, 0.0);
        assert_eq!(ranked[0].destination_distance_km, 0.0);
    }

    #[test]
    fn scenario_e_no_coordinates_no_text() {
        let candidates = vec![
            route_ride(1, 10),
            with_seats(route_ride(2, 50), 0),
            ride(3, ("Infocity", Coordinate::UNSET), ("Airport", Coordinate::UNSET), 30),
            with_status(route_ride(4, 40), RideStatus::Cancelled),
            route_ride(5, 20),
        ];
        let ranked = SearchOrchestrator::default().search_ranked(&candidates, &SearchRequest::new(1));
        assert!(ranked.iter().all(|m| m.match_type == MatchType::Unranked));
        let ids: Vec<u64> = ranked.iter().map(|m| m.ride.id.0).collect();
        assert_eq!(ids, [3, 5, 1]);
    }

    #[test]
    fn exact_outranks_route_regardless_of_age() {
        // Exact ride: both endpoints ~3.3 km from the passenger's.  Older.
        let exact = ride(
            1,
            ("Kudasan", Coordinate::new(23.17, 72.54)),
            ("Vejalpur", Coordinate::new(23.03, 72.46)),
            0,
        );
        // Route ride: passenger sits exactly on its line.  Newer.
        let route = route_ride(2, 1_000);
        let candidates = vec![route, exact];
        let req = SearchRequest::new(1).origin_coord(AT_30).destination_coord(AT_70);

        let ranked = SearchOrchestrator::default().search_ranked(&candidates, &req);
        let kinds: Vec<MatchType> = ranked.iter().map(|m| m.match_type).collect();
        assert_eq!(kinds, [MatchType::Exact, MatchType::Route]);
        assert_eq!(ranked[0].ride.id.0, 1);
    }

    #[test]
    fn seat_and_status_precondition_holds_in_every_mode() {
        let candidates = vec![
            with_seats(route_ride(1, 0), 1),
            with_status(route_ride(2, 0), RideStatus::Completed),
            with_status(route_ride(3, 0), RideStatus::Cancelled),
            route_ride(4, 0),
        ];
        let reqs = [
            SearchRequest::new(2),
            SearchRequest::new(2).origin_text("Gandhinagar"),
            SearchRequest::new(2).origin_coord(AT_30).destination_coord(AT_70),
            SearchRequest::new(2).origin_text("Gandhi").origin_coord(AT_30).destination_coord(AT_70),
        ];
        for req in &reqs {
            assert_eq!(run(&candidates, req), [4], "{req:?}");
        }
    }

    #[test]
    fn literal_text_search_without_coordinates() {
        let candidates = vec![
            ride(1, ("Sector (11) Market", Coordinate::UNSET), ("Airport", Coordinate::UNSET), 0),
            ride(2, ("Sector 11 Market", Coordinate::UNSET), ("Airport", Coordinate::UNSET), 5),
            ride(3, ("sector (11) bus stand", Coordinate::UNSET), ("AIRPORT T2", Coordinate::UNSET), 10),
        ];
        let req = SearchRequest::new(1).origin_text("Sector (11)").destination_text("airport");
        assert_eq!(run(&candidates, &req), [3, 1]);

        let req = SearchRequest::new(1).origin_text("a.b*c");
        assert!(run(&candidates, &req).is_empty());
    }

    fn lenient_candidates() -> Vec<RideRoute> {
        vec![
            ride(1, ("Gandhinagar Sector 1", Coordinate::new(23.22, 72.65)), ("Ahmedabad", Coordinate::new(23.02, 72.57)), 0),
            ride(2, ("Gandhinagar Infocity", Coordinate::new(23.19, 72.63)), ("Vadodara", Coordinate::new(22.30, 73.18)), 0),
            ride(3, ("Gandhinagar Road, Surat", Coordinate::new(21.17, 72.83)), ("Mumbai", Coordinate::new(19.07, 72.87)), 0),
            ride(4, ("Gandhinagar Bus Stand", Coordinate::UNSET), ("Ahmedabad", Coordinate::UNSET), 0),
            ride(5, ("Ahmedabad", Coordinate::new(23.02, 72.57)), ("Gandhinagar", Coordinate::new(23.22, 72.65)), 0),
        ]
    }

    fn lenient_request() -> SearchRequest {
        SearchRequest::new(1)
            .origin_text("gandhinagar")
            .origin_coord(Coordinate::new(23.2156, 72.6369))
            .destination_coord(Coordinate::new(23.0225, 72.5714))
    }

    #[test]
    fn lenient_orders_by_total_distance_coordinate_less_last() {
        let candidates = lenient_candidates();
        let ranked = SearchOrchestrator::default().search_ranked(&candidates, &lenient_request());
        let ids: Vec<u64> = ranked.iter().map(|m| m.ride.id.0).collect();
        assert_eq!(ids, [1, 2, 4]);
        assert!(ranked.iter().all(|m| m.match_type == MatchType::Text));
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn lenient_zero_override_keeps_only_coordinate_less() {
        let req = lenient_request().max_distance_km(0.0);
        assert_eq!(run(&lenient_candidates(), &req), [4]);

        let req = lenient_request().max_distance_km(-5.0);
        assert_eq!(run(&lenient_candidates(), &req), [4]);
    }

    #[test]
    fn unmatched_text_falls_back_to_strict_geometry() {
        let candidates = vec![route_ride(1, 0), route_ride(2, 5)];
        let req = SearchRequest::new(1)
            .origin_text("Nowhere")
            .origin_coord(AT_30)
            .destination_coord(AT_70);
        assert_eq!(run(&candidates, &req), [2, 1]);
    }

    #[test]
    fn strict_excludes_coordinate_less_rides() {
        let candidates = vec![
            ride(1, ("Gandhinagar", Coordinate::UNSET), ("Ahmedabad", Coordinate::UNSET), 0),
            route_ride(2, 0),
        ];
        let req = SearchRequest::new(1).origin_coord(AT_30).destination_coord(AT_70);
        assert_eq!(run(&candidates, &req), [2]);
    }

    #[test]
    fn partial_or_sentinel_passenger_coordinates_skip_geometry() {
        let candidates = vec![route_ride(1, 0), route_ride(2, 5)];
        let only_origin = SearchRequest::new(1).origin_coord(AT_70);
        let sentinel = SearchRequest::new(1).origin_coord(Coordinate::UNSET).destination_coord(AT_30);
        assert_eq!(run(&candidates, &only_origin), [2, 1]);
        assert_eq!(run(&candidates, &sentinel), [2, 1]);
    }

    #[test]
    fn ties_break_by_age_then_input_order() {
        let candidates = vec![route_ride(1, 0), route_ride(2, 0), route_ride(3, 7), route_ride(4, 0)];
        let strict = SearchRequest::new(1).origin_coord(AT_30).destination_coord(AT_70);
        assert_eq!(run(&candidates, &strict), [3, 1, 2, 4]);
        assert_eq!(run(&candidates, &SearchRequest::new(1)), [3, 1, 2, 4]);
    }

    #[test]
    fn search_is_idempotent_and_leaves_input_untouched() {
        let candidates = lenient_candidates();
        let before = candidates.clone();
        let orchestrator = SearchOrchestrator::default();
        for req in [lenient_request(), SearchRequest::new(1), SearchRequest::new(1).origin_coord(AT_30).destination_coord(AT_70)] {
            let first = orchestrator.search(&candidates, &req);
            let second = orchestrator.search(&candidates, &req);
            assert_eq!(first, second);
        }
        assert_eq!(candidates, before);
    }

    #[test]
    fn custom_config_is_honoured() {
        let cfg = MatchConfig { lenient_distance_km: 1.0, ..MatchConfig::default() };
        let results = SearchOrchestrator::new(cfg).search(&lenient_candidates(), &lenient_request());
        // Ride 1's origin is ~1.4 km away and its destination ~0.2 km: still kept.
        // Ride 2's origin is ~2.9 km away: dropped.
        assert_eq!(ids(&results), [1, 4]);
    }

    #[test]
    fn free_function_matches_orchestrator() {
        let candidates = lenient_candidates();
        let via_fn = search(
            &candidates,
            Some("gandhinagar"),
            None,
            1,
            Some(Coordinate::new(23.2156, 72.6369)),
            Some(Coordinate::new(23.0225, 72.5714)),
            None,
        );
        assert_eq!(via_fn, SearchOrchestrator::default().search(&candidates, &lenient_request()));
    }
}
