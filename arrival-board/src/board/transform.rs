//! The per-cycle board transform.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::input::{BoardRules, BusFetch, CycleInput, DockFetch, TrainFetch};
use super::record::DisplayRecord;
use super::state::{BikeDock, BoardState, BusKey, BusStop, TrainStop};
use crate::divvy::{BikeCounts, DockReport};
use crate::domain::Eta;

impl BoardState {
    /// Fold one cycle of fetch results into the state and produce the
    /// records to display, in train, bus, bicycle order.
    pub fn apply(mut self, input: CycleInput, rules: &BoardRules) -> (Self, Vec<DisplayRecord>) {
        let now = input.now;

        for fetch in input.trains {
            self.merge_trains(fetch, now);
        }
        for fetch in input.buses {
            self.merge_buses(fetch, now);
        }
        if let DockFetch::Fresh(reports) = input.docks {
            self.merge_docks(reports, now);
        }

        self.remove_unconfigured(rules);

        let mut records = Vec::with_capacity(
            self.train_stop_count() + self.buses.len() + self.bicycles.len(),
        );
        let mut emptied = Vec::new();

        for (station, stops) in &self.trains {
            for (destination, stop) in stops {
                let etas = shown_etas(&stop.etas, stop.updated_at, now, rules.max_stale);
                if etas.is_empty() && rules.do_not_persist.contains(destination) {
                    emptied.push((station.clone(), destination.clone()));
                }
                records.push(DisplayRecord::train(station, &stop.route, destination, &etas));
            }
        }

        for stop in self.buses.values() {
            let etas = shown_etas(&stop.etas, stop.updated_at, now, rules.max_stale);
            records.push(DisplayRecord::bus(
                &stop.stop_name,
                &stop.route,
                &stop.destination,
                &etas,
            ));
        }

        for dock in self.bicycles.values() {
            let counts = shown_counts(dock, now, rules.max_stale);
            records.push(DisplayRecord::bicycle(&dock.info, counts));
        }

        for (station, destination) in emptied {
            debug!(station = %station, destination = %destination, "Dropping empty destination");
            if let Some(stops) = self.trains.get_mut(&station) {
                stops.remove(&destination);
                if stops.is_empty() {
                    self.trains.remove(&station);
                }
            }
        }

        (self, records)
    }

    fn merge_trains(&mut self, fetch: TrainFetch, now: NaiveDateTime) {
        let Some(arrivals) = fetch.arrivals else {
            return;
        };

        for stop in self.trains.values_mut().flat_map(|stops| stops.values_mut()) {
            if stop.stop_id == fetch.stop_id {
                stop.etas.clear();
                stop.updated_at = Some(now);
            }
        }

        for arrival in arrivals {
            let stop = self
                .trains
                .entry(arrival.station_name.clone())
                .or_default()
                .entry(arrival.destination.clone())
                .or_insert_with(|| TrainStop::new(&arrival));
            if stop.updated_at != Some(now) {
                stop.etas.clear();
                stop.updated_at = Some(now);
            }
            stop.route = arrival.route;
            stop.stop_id = arrival.stop_id;
            stop.etas.push(arrival.eta);
        }
    }

    fn merge_buses(&mut self, fetch: BusFetch, now: NaiveDateTime) {
        let Some(predictions) = fetch.predictions else {
            return;
        };
        let key = BusKey::new(fetch.stop_id, fetch.route);

        if let Some(stop) = self.buses.get_mut(&key) {
            stop.etas.clear();
            stop.updated_at = Some(now);
        }

        for prediction in predictions {
            let stop = self
                .buses
                .entry(key.clone())
                .or_insert_with(|| BusStop::new(&prediction));
            if stop.etas.is_empty() {
                stop.destination = prediction.destination;
                stop.stop_name = prediction.stop_name;
            }
            stop.updated_at = Some(now);
            stop.etas.push(prediction.eta);
        }
    }

    fn merge_docks(&mut self, reports: Vec<DockReport>, now: NaiveDateTime) {
        for report in reports {
            let dock = BikeDock {
                info: report.info,
                counts: report.counts,
                updated_at: Some(now),
            };
            self.bicycles.insert(dock.info.station_id.clone(), dock);
        }
    }

    /// Drop entries for stops, routes and docks that are no longer configured.
    fn remove_unconfigured(&mut self, rules: &BoardRules) {
        for (station, stops) in self.trains.iter_mut() {
            stops.retain(|destination, stop| {
                let keep = rules.train_stop_ids.contains(&stop.stop_id);
                if !keep {
                    info!(station = %station, destination = %destination, stop_id = %stop.stop_id, "Removing unconfigured train stop");
                }
                keep
            });
        }
        self.trains.retain(|_, stops| !stops.is_empty());

        self.buses.retain(|key, _| {
            let keep = rules
                .bus_stops
                .iter()
                .any(|(stop_id, route)| *stop_id == key.stop_id && *route == key.route);
            if !keep {
                info!(stop_id = %key.stop_id, route = %key.route, "Removing unconfigured bus stop");
            }
            keep
        });

        self.bicycles.retain(|station_id, _| {
            let keep = rules.dock_ids.contains(station_id);
            if !keep {
                info!(station_id = %station_id, "Removing unconfigured dock");
            }
            keep
        });
    }
}

/// Estimates to display: fresh ones as-is, last-known ones aged by the time
/// since they were fetched, nothing once they pass `max_stale`.
fn shown_etas(
    etas: &[Eta],
    updated_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
    max_stale: chrono::Duration,
) -> Vec<Eta> {
    match updated_at {
        Some(at) if at == now => etas.to_vec(),
        Some(at) if now - at <= max_stale => {
            let elapsed = (now - at).num_minutes();
            etas.iter().filter_map(|eta| eta.aged(elapsed)).collect()
        }
        _ => Vec::new(),
    }
}

fn shown_counts(
    dock: &BikeDock,
    now: NaiveDateTime,
    max_stale: chrono::Duration,
) -> Option<BikeCounts> {
    match dock.updated_at {
        Some(at) if now - at <= max_stale => dock.counts,
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::board::record::{ItemKind, NO_ARRIVALS, NO_DOCK_STATUS};
    use crate::cta::{BusPrediction, TrainArrival};
    use crate::divvy::DockInfo;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn live(minutes: u32) -> Eta {
        Eta::Minutes {
            minutes,
            scheduled: false,
        }
    }

    fn arrival(stop_id: &str, station: &str, route: &str, destination: &str, eta: Eta) -> TrainArrival {
        TrainArrival {
            station_name: station.into(),
            stop_id: stop_id.into(),
            route: route.into(),
            destination: destination.into(),
            eta,
        }
    }

    fn prediction(stop_id: &str, route: &str, destination: &str, eta: Eta) -> BusPrediction {
        BusPrediction {
            stop_id: stop_id.into(),
            stop_name: "Chicago & Milwaukee".into(),
            route: route.into(),
            destination: destination.into(),
            eta,
        }
    }

    fn dock_report(id: &str, ebikes: u32, classic: u32) -> DockReport {
        DockReport {
            info: DockInfo {
                station_id: id.into(),
                name: "Clark St & Lake St".into(),
                station_type: "classic".into(),
                capacity: Some(27),
                distance_miles: Some(0.25),
            },
            counts: Some(BikeCounts { ebikes, classic }),
        }
    }

    fn rules() -> BoardRules {
        BoardRules {
            train_stop_ids: vec!["30074".into(), "30075".into()],
            bus_stops: vec![("1066".into(), "66".into())],
            dock_ids: vec!["a3a3".into()],
            do_not_persist: vec!["54th/Cermak".into()],
            max_stale: Duration::minutes(5),
        }
    }

    fn train_input(now: NaiveDateTime, stop_id: &str, arrivals: Option<Vec<TrainArrival>>) -> CycleInput {
        CycleInput {
            trains: vec![TrainFetch {
                stop_id: stop_id.into(),
                arrivals,
            }],
            ..CycleInput::empty(now)
        }
    }

    #[test]
    fn fresh_trains_grouped_by_station_and_destination() {
        let input = train_input(at(8, 0), "30074", Some(vec![
            arrival("30074", "Clark/Lake", "Brn", "Kimball", live(4)),
            arrival("30074", "Clark/Lake", "Brn", "Kimball", Eta::Due { scheduled: false }),
            arrival("30074", "Clark/Lake", "P", "Linden", live(9)),
        ]));

        let (state, records) = BoardState::new().apply(input, &rules());

        assert_eq!(state.train_stop_count(), 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_2, "Brown Line to Kimball");
        assert_eq!(records[0].line_3, "4min $, Due $");
        assert_eq!(records[1].line_2, "Purple Line to Linden");
        assert_eq!(records[1].line_3, "9min $");
    }

    #[test]
    fn fresh_data_replaces_previous_etas() {
        let rules = rules();
        let first = train_input(at(8, 0), "30074", Some(vec![
            arrival("30074", "Clark/Lake", "Brn", "Kimball", live(4)),
            arrival("30074", "Clark/Lake", "Brn", "Kimball", live(12)),
        ]));
        let (state, _) = BoardState::new().apply(first, &rules);

        let second = train_input(at(8, 1), "30074", Some(vec![arrival(
            "30074",
            "Clark/Lake",
            "Brn",
            "Kimball",
            live(3),
        )]));
        let (state, records) = state.apply(second, &rules);

        assert_eq!(records[0].line_3, "3min $");
        assert_eq!(state.trains["Clark/Lake"]["Kimball"].etas, vec![live(3)]);
    }

    #[test]
    fn remembered_station_with_no_arrivals_shows_placeholder() {
        let rules = rules();
        let first = train_input(at(8, 0), "30074", Some(vec![arrival(
            "30074",
            "Clark/Lake",
            "Brn",
            "Kimball",
            live(4),
        )]));
        let (state, _) = BoardState::new().apply(first, &rules);

        let (state, records) = state.apply(train_input(at(8, 1), "30074", Some(vec![])), &rules);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line_3, NO_ARRIVALS);
        assert!(state.trains["Clark/Lake"].contains_key("Kimball"));
    }

    #[test]
    fn failed_fetch_ages_last_known_etas() {
        let rules = rules();
        let first = train_input(at(8, 0), "30074", Some(vec![
            arrival("30074", "Clark/Lake", "Brn", "Kimball", Eta::Due { scheduled: false }),
            arrival("30074", "Clark/Lake", "Brn", "Kimball", live(2)),
            arrival("30074", "Clark/Lake", "Brn", "Kimball", live(10)),
        ]));
        let (state, _) = BoardState::new().apply(first, &rules);

        let (state, records) = state.apply(train_input(at(8, 2), "30074", None), &rules);
        assert_eq!(records[0].line_3, "Due $, 8min $");

        let (_, records) = state.apply(train_input(at(8, 6), "30074", None), &rules);
        assert_eq!(records[0].line_3, NO_ARRIVALS);
    }

    #[test]
    fn unconfigured_train_stops_removed() {
        let input = train_input(at(8, 0), "30074", Some(vec![arrival(
            "30074",
            "Clark/Lake",
            "Brn",
            "Kimball",
            live(4),
        )]));
        let (state, _) = BoardState::new().apply(input, &rules());

        let narrowed = BoardRules {
            train_stop_ids: vec!["30075".into()],
            ..rules()
        };
        let (state, records) = state.apply(CycleInput::empty(at(8, 1)), &narrowed);

        assert!(state.trains.is_empty());
        assert!(records.is_empty());
    }

    #[test]
    fn do_not_persist_destination_dropped_when_empty() {
        let rules = rules();
        let input = train_input(at(8, 0), "30075", Some(vec![arrival(
            "30075",
            "Clark/Lake",
            "Pink",
            "54th/Cermak",
            live(6),
        )]));
        let (state, records) = BoardState::new().apply(input, &rules);
        assert_eq!(records[0].line_3, "6min $");
        assert_eq!(state.train_stop_count(), 1);

        let (state, records) = state.apply(train_input(at(8, 1), "30075", Some(vec![])), &rules);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line_3, NO_ARRIVALS);
        assert!(state.trains.is_empty());
    }

    #[test]
    fn buses_keyed_by_stop_and_route() {
        let rules = BoardRules {
            bus_stops: vec![("1066".into(), "66".into()), ("1066".into(), "9".into())],
            ..rules()
        };
        let input = CycleInput {
            buses: vec![
                BusFetch {
                    stop_id: "1066".into(),
                    route: "66".into(),
                    predictions: Some(vec![
                        prediction("1066", "66", "Austin", Eta::Due { scheduled: false }),
                        prediction("1066", "66", "Austin", live(8)),
                    ]),
                },
                BusFetch {
                    stop_id: "1066".into(),
                    route: "9".into(),
                    predictions: Some(vec![prediction("1066", "9", "Irving Park", Eta::Delayed)]),
                },
            ],
            ..CycleInput::empty(at(8, 0))
        };

        let (state, records) = BoardState::new().apply(input, &rules);

        assert_eq!(state.buses.len(), 2);
        assert_eq!(records[0].kind, ItemKind::Bus);
        assert_eq!(records[0].line_2, "66 to Austin");
        assert_eq!(records[0].line_3, "Due $, 8min $");
        assert_eq!(records[1].line_2, "9 to Irving Park");
        assert_eq!(records[1].line_3, "Dlyed %");
    }

    #[test]
    fn failed_bus_fetch_ages_last_known_etas() {
        let rules = rules();
        let bus_input = |now, predictions| CycleInput {
            buses: vec![BusFetch {
                stop_id: "1066".into(),
                route: "66".into(),
                predictions,
            }],
            ..CycleInput::empty(now)
        };
        let first = bus_input(at(8, 0), Some(vec![
            prediction("1066", "66", "Austin", Eta::Due { scheduled: false }),
            prediction("1066", "66", "Austin", live(3)),
            prediction("1066", "66", "Austin", live(8)),
            prediction("1066", "66", "Austin", Eta::Delayed),
        ]));
        let (state, _) = BoardState::new().apply(first, &rules);

        let (state, records) = state.apply(bus_input(at(8, 3), None), &rules);
        assert_eq!(records[0].line_2, "66 to Austin");
        assert_eq!(records[0].line_3, "Due $, 5min $, Dlyed %");

        let (state, records) = state.apply(bus_input(at(8, 6), None), &rules);
        assert_eq!(records[0].line_1, "Chicago & Milwaukee");
        assert_eq!(records[0].line_3, NO_ARRIVALS);
        assert_eq!(state.buses.len(), 1);
    }

    #[test]
    fn unconfigured_bus_route_removed() {
        let input = CycleInput {
            buses: vec![BusFetch {
                stop_id: "1066".into(),
                route: "9".into(),
                predictions: Some(vec![prediction("1066", "9", "Irving Park", live(3))]),
            }],
            ..CycleInput::empty(at(8, 0))
        };

        let (state, records) = BoardState::new().apply(input, &rules());

        assert!(state.buses.is_empty());
        assert!(records.is_empty());
    }

    #[test]
    fn docks_kept_through_failed_status() {
        let rules = rules();
        let input = CycleInput {
            docks: DockFetch::Fresh(vec![dock_report("a3a3", 3, 6)]),
            ..CycleInput::empty(at(8, 0))
        };
        let (state, records) = BoardState::new().apply(input, &rules);
        assert_eq!(records[0].kind, ItemKind::Bicycle);
        assert_eq!(records[0].line_1, "Clark St & Lake St");
        assert_eq!(records[0].line_3, "3 ebikes, 6 classic");

        let failed = CycleInput {
            docks: DockFetch::Failed,
            ..CycleInput::empty(at(8, 3))
        };
        let (state, records) = state.apply(failed, &rules);
        assert_eq!(records[0].line_3, "3 ebikes, 6 classic");

        let later = CycleInput {
            docks: DockFetch::Failed,
            ..CycleInput::empty(at(8, 10))
        };
        let (_, records) = state.apply(later, &rules);
        assert_eq!(records[0].line_3, NO_DOCK_STATUS);
    }

    #[test]
    fn records_ordered_trains_buses_bicycles() {
        let input = CycleInput {
            now: at(8, 0),
            trains: vec![TrainFetch {
                stop_id: "30074".into(),
                arrivals: Some(vec![arrival("30074", "Clark/Lake", "Brn", "Kimball", live(4))]),
            }],
            buses: vec![BusFetch {
                stop_id: "1066".into(),
                route: "66".into(),
                predictions: Some(vec![prediction("1066", "66", "Austin", live(8))]),
            }],
            docks: DockFetch::Fresh(vec![dock_report("a3a3", 1, 2)]),
        };

        let (_, records) = BoardState::new().apply(input, &rules());
        let kinds: Vec<ItemKind> = records.iter().map(|r| r.kind).collect();

        assert_eq!(kinds, vec![ItemKind::Train, ItemKind::Bus, ItemKind::Bicycle]);
    }

    #[test]
    fn empty_cycle_on_empty_state() {
        let (state, records) = BoardState::new().apply(CycleInput::empty(at(8, 0)), &rules());
        assert_eq!(state, BoardState::new());
        assert!(records.is_empty());
    }
}
