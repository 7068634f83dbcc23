//! Three-line display records.

use std::fmt;

use crate::divvy::{BikeCounts, DockInfo};
use crate::domain::{Eta, train_line_name};

/// Line 3 when a stop has nothing to show.
pub const NO_ARRIVALS: &str = "No arrivals found :(";

/// Line 3 for a dock whose status is unknown.
pub const NO_DOCK_STATUS: &str = "No status reported :(";

/// At most this many estimates fit on line 3.
pub const MAX_ETAS: usize = 3;

/// Which icon accompanies a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Train,
    Bus,
    Bicycle,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ItemKind::Train => "train",
            ItemKind::Bus => "bus",
            ItemKind::Bicycle => "bicycle",
        })
    }
}

/// One slot on a page: a bold heading and two detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub line_1: String,
    pub line_2: String,
    pub line_3: String,
    pub kind: ItemKind,
}

impl DisplayRecord {
    /// `Clark/Lake` / `Brown Line to Kimball` / `4min $, Due $`
    pub fn train(station: &str, route: &str, destination: &str, etas: &[Eta]) -> Self {
        Self {
            line_1: station.to_string(),
            line_2: format!("{} Line to {}", train_line_name(route), destination),
            line_3: eta_line(etas),
            kind: ItemKind::Train,
        }
    }

    /// `Chicago & Milwaukee` / `66 to Austin` / `Due $, 8min $`
    pub fn bus(stop_name: &str, route: &str, destination: &str, etas: &[Eta]) -> Self {
        Self {
            line_1: stop_name.to_string(),
            line_2: format!("{route} to {destination}"),
            line_3: eta_line(etas),
            kind: ItemKind::Bus,
        }
    }

    /// `Clark St & Lake St` / `Type: classic | Distance: 0.02mi` / `3 ebikes, 9 classic`
    pub fn bicycle(info: &DockInfo, counts: Option<BikeCounts>) -> Self {
        let line_2 = match (info.station_type.is_empty(), info.distance_miles) {
            (false, Some(d)) => format!("Type: {} | Distance: {d:.2}mi", info.station_type),
            (false, None) => format!("Type: {}", info.station_type),
            (true, Some(d)) => format!("Distance: {d:.2}mi"),
            (true, None) => String::new(),
        };
        let line_3 = match counts {
            Some(c) => join_items(&[
                format!("{} ebikes", c.ebikes),
                format!("{} classic", c.classic),
            ]),
            None => NO_DOCK_STATUS.to_string(),
        };

        Self {
            line_1: drop_avenue(&info.name),
            line_2,
            line_3,
            kind: ItemKind::Bicycle,
        }
    }
}

/// The first [`MAX_ETAS`] estimates, or [`NO_ARRIVALS`].
pub fn eta_line(etas: &[Eta]) -> String {
    if etas.is_empty() {
        return NO_ARRIVALS.to_string();
    }
    let items: Vec<String> = etas.iter().map(Eta::to_string).collect();
    join_items(&items)
}

/// Join at most [`MAX_ETAS`] items with `", "`.
pub fn join_items(items: &[String]) -> String {
    items
        .iter()
        .take(MAX_ETAS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn drop_avenue(name: &str) -> String {
    name.split_whitespace()
        .filter(|word| *word != "Ave")
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(minutes: u32) -> Eta {
        Eta::Minutes {
            minutes,
            scheduled: false,
        }
    }

    fn dock(station_type: &str, distance_miles: Option<f64>) -> DockInfo {
        DockInfo {
            station_id: "1".into(),
            name: "Kedzie Ave & Milwaukee Ave".into(),
            station_type: station_type.into(),
            capacity: Some(15),
            distance_miles,
        }
    }

    #[test]
    fn train_record() {
        let record = DisplayRecord::train(
            "Clark/Lake",
            "Brn",
            "Kimball",
            &[live(4), Eta::Due { scheduled: false }],
        );

        assert_eq!(record.line_1, "Clark/Lake");
        assert_eq!(record.line_2, "Brown Line to Kimball");
        assert_eq!(record.line_3, "4min $, Due $");
        assert_eq!(record.kind, ItemKind::Train);
    }

    #[test]
    fn only_three_etas_shown() {
        let record = DisplayRecord::bus("Chicago & Milwaukee", "66", "Austin", &[
            live(1),
            live(9),
            live(17),
            live(25),
        ]);
        assert_eq!(record.line_2, "66 to Austin");
        assert_eq!(record.line_3, "1min $, 9min $, 17min $");
    }

    #[test]
    fn empty_etas_show_no_arrivals() {
        let record = DisplayRecord::train("Clark/Lake", "Pink", "54th/Cermak", &[]);
        assert_eq!(record.line_3, NO_ARRIVALS);
    }

    #[test]
    fn bicycle_record() {
        let record = DisplayRecord::bicycle(
            &dock("classic", Some(0.4567)),
            Some(BikeCounts {
                ebikes: 3,
                classic: 6,
            }),
        );

        assert_eq!(record.line_1, "Kedzie & Milwaukee");
        assert_eq!(record.line_2, "Type: classic | Distance: 0.46mi");
        assert_eq!(record.line_3, "3 ebikes, 6 classic");
        assert_eq!(record.kind, ItemKind::Bicycle);
    }

    #[test]
    fn bicycle_line_2_variants() {
        assert_eq!(DisplayRecord::bicycle(&dock("classic", None), None).line_2, "Type: classic");
        assert_eq!(
            DisplayRecord::bicycle(&dock("", Some(1.0)), None).line_2,
            "Distance: 1.00mi"
        );
        assert_eq!(DisplayRecord::bicycle(&dock("", None), None).line_2, "");
        assert_eq!(DisplayRecord::bicycle(&dock("", None), None).line_3, NO_DOCK_STATUS);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ItemKind::Train.to_string(), "train");
        assert_eq!(ItemKind::Bus.to_string(), "bus");
        assert_eq!(ItemKind::Bicycle.to_string(), "bicycle");
    }
}
