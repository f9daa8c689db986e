//! Reference corridor readings used when no live feed is available.

use crate::telemetry::{RawId, RawRoute, RawSegment};
use crate::RouteDescriptor;

/// `(segment id, avg km/h, typical km/h, length m, confidence)`
type SegmentRow = (&'static str, f64, f64, f64, f64);

const AUDI_FORUM_SEGMENTS: [SegmentRow; 5] = [
    ("1172384166320373761", 10.0, 12.0, 120.0, 100.0),
    ("1172384166321520640", 42.0, 52.0, 260.0, 100.0),
    ("1172384166321586176", 38.0, 48.0, 410.0, 100.0),
    ("1172384166688129024", 22.0, 34.0, 530.0, 100.0),
    ("1172384166285115392", 18.0, 28.0, 620.0, 95.0),
];

const KLINIKUM_SEGMENTS: [SegmentRow; 5] = [
    ("2172384166320373761", 20.0, 28.0, 220.0, 100.0),
    ("2172384166321520640", 34.0, 44.0, 340.0, 99.0),
    ("2172384166321586176", 26.0, 38.0, 480.0, 95.0),
    ("2172384166688129024", 18.0, 32.0, 620.0, 92.0),
    ("2172384166285115392", 24.0, 36.0, 520.0, 90.0),
];

/// Last recorded readings for the two monitored corridors.
pub fn sample_raw_routes() -> Vec<RawRoute> {
    vec![
        raw_route(82724, "Audi Forum → Hauptbahnhof", [5763.0, 965.0, 841.0, 365.0, 98.0], &AUDI_FORUM_SEGMENTS),
        raw_route(82725, "Klinikum → Nordbahnhof", [4310.0, 712.0, 598.0, 244.0, 97.0], &KLINIKUM_SEGMENTS),
    ]
}

/// [`sample_raw_routes`], normalised.
pub fn sample_corridors() -> Vec<RouteDescriptor> {
    sample_raw_routes()
        .into_iter()
        .map(|r| {
            let name = r.route_name.clone().unwrap_or_default();
            r.into_descriptor(&name)
        })
        .collect()
}

/// `figures` = length m, travel s, typical s, delay s, completeness %.
fn raw_route(id: u64, name: &str, figures: [f64; 5], segments: &[SegmentRow]) -> RawRoute {
    let [length, travel, typical, delay, completeness] = figures;
    RawRoute {
        route_id:            Some(RawId::Number(id)),
        route_name:          Some(name.to_owned()),
        route_length:        Some(length),
        travel_time:         Some(travel),
        typical_travel_time: Some(typical),
        delay_time:          Some(delay),
        passable:            Some(true),
        completeness:        Some(completeness),
        route_confidence:    Some(100.0),
        detailed_segments:   segments
            .iter()
            .map(|&(sid, avg, typ, len, conf)| RawSegment {
                segment_id:     Some(RawId::Text(sid.to_owned())),
                segment_id_str: None,
                average_speed:  Some(avg),
                typical_speed:  Some(typ),
                segment_length: Some(len),
                confidence:     Some(conf),
            })
            .collect(),
    }
}
