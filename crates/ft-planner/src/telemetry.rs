//! Raw corridor telemetry as the traffic feed delivers it, and its
//! normalisation into [`RouteDescriptor`]s.
//!
//! Every feed field is optional.  Normalisation fills the gaps:
//!
//! | Field               | Fallback                                   |
//! |---------------------|--------------------------------------------|
//! | segment avg speed   | typical speed, then 0                      |
//! | segment typ speed   | average speed                              |
//! | segment length      | 0                                          |
//! | route id            | the caller's fallback name                 |
//! | route name          | known-corridor table, feed name, fallback  |
//! | route length        | sum of segment lengths                     |
//! | times / delay       | 0                                          |
//! | completeness        | 100                                        |
//! | passable            | true                                       |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PlannerError, PlannerResult, RouteDescriptor, RouteSegment};

/// Corridors the city monitors, with display names and the districts they
/// serve.  Feed names are overridden by these.
pub const KNOWN_CORRIDORS: &[KnownCorridor] = &[
    KnownCorridor {
        id:   "82724",
        name: "Audi Forum → Hauptbahnhof",
        area: "Innerstadt spine & rail hub",
    },
    KnownCorridor {
        id:   "82725",
        name: "Klinikum → Nordbahnhof",
        area: "Medical district ↔ northern districts",
    },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KnownCorridor {
    pub id:   &'static str,
    pub name: &'static str,
    pub area: &'static str,
}

pub fn known_corridor(id: &str) -> Option<&'static KnownCorridor> {
    KNOWN_CORRIDORS.iter().find(|c| c.id == id)
}

// ── Raw records ───────────────────────────────────────────────────────────────

/// Feed identifiers arrive as either numbers or strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{n}"),
            RawId::Text(s)   => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    #[serde(default)]
    pub segment_id:     Option<RawId>,
    #[serde(default)]
    pub segment_id_str: Option<String>,
    #[serde(default)]
    pub average_speed:  Option<f64>,
    #[serde(default)]
    pub typical_speed:  Option<f64>,
    #[serde(default)]
    pub segment_length: Option<f64>,
    #[serde(default)]
    pub confidence:     Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRoute {
    #[serde(default)]
    pub route_id:            Option<RawId>,
    #[serde(default)]
    pub route_name:          Option<String>,
    #[serde(default)]
    pub route_length:        Option<f64>,
    #[serde(default)]
    pub travel_time:         Option<f64>,
    #[serde(default)]
    pub typical_travel_time: Option<f64>,
    #[serde(default)]
    pub delay_time:          Option<f64>,
    #[serde(default)]
    pub passable:            Option<bool>,
    #[serde(default)]
    pub completeness:        Option<f64>,
    #[serde(default)]
    pub route_confidence:    Option<f64>,
    #[serde(default)]
    pub detailed_segments:   Vec<RawSegment>,
}

// ── Normalisation ─────────────────────────────────────────────────────────────

impl RawSegment {
    /// `index` names the segment when the feed gives it no id.
    pub(crate) fn into_segment(self, route_id: &str, index: usize) -> RouteSegment {
        let average = self.average_speed.or(self.typical_speed).unwrap_or(0.0);
        let typical = self.typical_speed.unwrap_or(average);
        let length = self.segment_length.unwrap_or(0.0);

        let avg_time = if average > 0.0 { length / (average / 3.6) } else { 0.0 };
        let typ_time = if typical > 0.0 { length / (typical / 3.6) } else { avg_time };

        let id = match (self.segment_id, self.segment_id_str) {
            (Some(i), _)    => i.to_string(),
            (None, Some(s)) => s,
            (None, None)    => format!("{route_id}-{index}"),
        };

        RouteSegment {
            id,
            average_speed_kmh: average,
            typical_speed_kmh: typical,
            delay_s:           (avg_time - typ_time).max(0.0),
            length_m:          length,
            confidence:        self.confidence.unwrap_or(0.0),
        }
    }
}

impl RawRoute {
    /// Reject negative or non-finite quantities, then fill every missing
    /// field.  `fallback_name` identifies a route that carries no id.
    pub fn normalize(self, fallback_name: &str) -> PlannerResult<RouteDescriptor> {
        self.check(fallback_name)?;
        Ok(self.into_descriptor(fallback_name))
    }

    fn check(&self, fallback_name: &str) -> PlannerResult<()> {
        let route = self.route_id.as_ref().map_or_else(|| fallback_name.to_owned(), RawId::to_string);
        let fail = |reason: String| PlannerError::Telemetry { route: route.clone(), reason };

        let fields = [
            ("routeLength", self.route_length),
            ("travelTime", self.travel_time),
            ("typicalTravelTime", self.typical_travel_time),
            ("delayTime", self.delay_time),
            ("completeness", self.completeness),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(fail(format!("{name} = {v}")));
                }
            }
        }
        for (i, s) in self.detailed_segments.iter().enumerate() {
            for (name, value) in [
                ("averageSpeed", s.average_speed),
                ("typicalSpeed", s.typical_speed),
                ("segmentLength", s.segment_length),
            ] {
                if let Some(v) = value {
                    if !(v.is_finite() && v >= 0.0) {
                        return Err(fail(format!("segment {i}: {name} = {v}")));
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn into_descriptor(self, fallback_name: &str) -> RouteDescriptor {
        let id = self.route_id.map_or_else(|| fallback_name.to_owned(), |i| i.to_string());
        let segments: Vec<RouteSegment> = self
            .detailed_segments
            .into_iter()
            .enumerate()
            .map(|(i, s)| s.into_segment(&id, i))
            .collect();
        let known = known_corridor(&id);

        RouteDescriptor {
            name:                  known
                .map(|k| k.name.to_owned())
                .or(self.route_name)
                .unwrap_or_else(|| fallback_name.to_owned()),
            length_m:              Some(
                self.route_length
                    .unwrap_or_else(|| segments.iter().map(|s| s.length_m).sum()),
            ),
            travel_time_s:         self.travel_time.unwrap_or(0.0),
            typical_travel_time_s: self.typical_travel_time.unwrap_or(0.0),
            delay_s:               self.delay_time.unwrap_or(0.0),
            completeness:          Some(self.completeness.unwrap_or(100.0)),
            passable:              self.passable.unwrap_or(true),
            confidence:            self.route_confidence.unwrap_or(0.0),
            area:                  known.map(|k| k.area.to_owned()),
            segments,
            id,
        }
    }
}

/// Normalise a feed batch.  Route `i` without an id is called `route-{i}`.
pub fn normalize_routes(raw: Vec<RawRoute>) -> PlannerResult<Vec<RouteDescriptor>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| r.normalize(&format!("route-{i}")))
        .collect()
}
