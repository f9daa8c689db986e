//! Unit tests for ft-planner.

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A 1.5 km corridor whose only severity signal is `delay / typical = ratio`.
fn corridor(name: &str, ratio: f64) -> RouteDescriptor {
    RouteDescriptor {
        id:                    name.to_owned(),
        name:                  name.to_owned(),
        length_m:              None,
        travel_time_s:         600.0 * (1.0 + ratio),
        typical_travel_time_s: 600.0,
        delay_s:               600.0 * ratio,
        completeness:          None,
        passable:              true,
        confidence:            100.0,
        area:                  None,
        segments:              Vec::new(),
    }
}

fn segment(avg: f64, typ: f64, len: f64) -> RouteSegment {
    RawSegment {
        average_speed:  Some(avg),
        typical_speed:  Some(typ),
        segment_length: Some(len),
        ..Default::default()
    }
    .into_segment("t", 0)
}

fn corridors(ratios: &[f64]) -> Vec<RouteDescriptor> {
    ratios.iter().enumerate().map(|(i, &r)| corridor(&format!("c{i}"), r)).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Severity ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod severity {
    use super::*;

    #[test]
    fn delay_ratio_alone() {
        assert!(close(severity_score(&corridor("a", 0.5)), 0.225));
    }

    #[test]
    fn zero_typical_time_contributes_nothing() {
        let mut r = corridor("a", 0.5);
        r.typical_travel_time_s = 0.0;
        assert_eq!(severity_score(&r), 0.0);
    }

    #[test]
    fn score_clamped_to_one() {
        assert_eq!(severity_score(&corridor("a", 5.0)), 1.0);
    }

    #[test]
    fn completeness_penalty() {
        let mut r = corridor("a", 0.0);
        assert_eq!(severity_score(&r), 0.0);
        r.completeness = Some(50.0);
        assert!(close(severity_score(&r), 0.05));
    }

    #[test]
    fn segment_terms() {
        // 200 m at 20 instead of 40 km/h: 18 s late, speed penalty 0.5.
        let mut r = corridor("a", 0.0);
        r.segments.push(segment(20.0, 40.0, 200.0));
        assert!(close(r.mean_segment_delay_s(), 18.0));
        assert!(close(r.mean_speed_penalty(), 0.5));
        assert!(close(severity_score(&r), 0.25 * 18.0 / 60.0 + 0.2 * 0.5));
    }

    #[test]
    fn speed_penalty_fallbacks() {
        let seg = |avg, typ| RouteSegment {
            id:                "s".into(),
            average_speed_kmh: avg,
            typical_speed_kmh: typ,
            delay_s:           0.0,
            length_m:          100.0,
            confidence:        0.0,
        };
        assert_eq!(seg(0.0, 40.0).speed_penalty(), 0.0);
        assert_eq!(seg(30.0, 0.0).speed_penalty(), 0.0);
        assert_eq!(seg(0.0, 0.0).speed_penalty(), 0.0);
        assert_eq!(seg(50.0, 40.0).speed_penalty(), 0.0);
        assert!(close(seg(30.0, 40.0).speed_penalty(), 0.25));
    }

    #[test]
    fn tier_thresholds_are_exclusive() {
        assert_eq!(SeverityTier::classify(0.35), SeverityTier::Support);
        assert_eq!(SeverityTier::classify(0.351), SeverityTier::Medium);
        assert_eq!(SeverityTier::classify(0.6), SeverityTier::Medium);
        assert_eq!(SeverityTier::classify(0.601), SeverityTier::High);
    }

    #[test]
    fn higher_score_never_lowers_tier_or_floor() {
        let mut last = SeverityTier::classify(0.0);
        for i in 1..=1000 {
            let tier = SeverityTier::classify(i as f64 / 1000.0);
            assert!(tier >= last);
            assert!(tier.min_vehicles() >= last.min_vehicles());
            assert!(tier.min_share() >= last.min_share());
            last = tier;
        }
    }

    #[test]
    fn tier_bounds_for_default_fleet() {
        assert_eq!(SeverityTier::High.max_vehicles(120), 34);
        assert_eq!(SeverityTier::Medium.max_vehicles(120), 24);
        assert_eq!(SeverityTier::Support.max_vehicles(120), 17);
        assert_eq!(SeverityTier::High.to_string(), "High");
    }
}

// ── Allocation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod allocation {
    use super::*;

    fn demands(routes: &[RouteDescriptor]) -> Vec<CorridorDemand> {
        routes
            .iter()
            .map(|r| {
                let score = severity_score(r);
                CorridorDemand { score, tier: SeverityTier::classify(score), length_km: r.effective_length_km() }
            })
            .collect()
    }

    #[test]
    fn mixed_tiers_reconcile_exactly() {
        let routes = corridors(&[1.6, 1.2, 0.9, 0.5, 0.3, 0.1, 0.05]);
        let a = allocate(&demands(&routes), 120);
        assert_eq!(a.vehicles, vec![25, 22, 19, 16, 14, 12, 12]);
        assert_eq!(a.total(), 120);
        assert!(a.is_exact());
        assert_eq!(a.passes, 0);
    }

    #[test]
    fn tier_minimums_block_removal() {
        // Ten High corridors need 140 vehicles at their floor.
        let routes = corridors(&[1.5; 10]);
        let a = allocate(&demands(&routes), 120);
        assert!(a.vehicles.iter().all(|&v| v == 14));
        assert_eq!(a.residual, -20);
        assert_eq!(a.passes, 60);
    }

    #[test]
    fn additions_stop_after_bounded_passes() {
        let routes = corridors(&[0.5, 0.1]);
        let a = allocate(&demands(&routes), 120);
        assert_eq!(a.passes, 12);
        assert_eq!(a.total() as i64 + a.residual, 120);
        assert_eq!(a.vehicles, vec![23, 23]);
    }

    #[test]
    fn additions_follow_severity_order() {
        // Clipped to 17 + 24, then twelve additions alternate starting
        // with the higher score.
        let c = [
            CorridorDemand { score: 0.2, tier: SeverityTier::Support, length_km: 1.5 },
            CorridorDemand { score: 0.5, tier: SeverityTier::Medium, length_km: 1.5 },
        ];
        let a = allocate(&c, 120);
        assert_eq!(a.vehicles, vec![17 + 6, 24 + 6]);
        // Small fleet: Support capped at 6, Medium floored at 9, and the
        // same twelve additions leave 15 vehicles unplaced.
        let b = allocate(&c, 42);
        assert_eq!(b.vehicles, vec![6 + 6, 9 + 6]);
        assert_eq!(b.residual, 15);
    }

    #[test]
    fn empty_input() {
        let a = allocate(&[], 120);
        assert!(a.vehicles.is_empty());
        assert!(a.is_exact());
    }

    #[test]
    fn default_and_floor_length() {
        let mut r = corridor("a", 0.0);
        assert_eq!(r.effective_length_km(), 1.5);
        r.length_m = Some(100.0);
        assert_eq!(r.effective_length_km(), 0.4);
        r.length_m = Some(5763.0);
        assert!(close(r.effective_length_km(), 5.763));
    }
}

// ── Plan ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod plan {
    use super::*;

    #[test]
    fn empty_input_yields_zero_plan() {
        let plan = build_plan(&[]);
        assert_eq!(plan.recommended_fleet_size, 120);
        assert_eq!(plan.service_reliability, 0.0);
        assert_eq!(plan.energy_per_ride_kwh, 0.0);
        assert_eq!(plan.grid_stress_index, 0.0);
        assert_eq!(plan.reward_score, 0.0);
        assert!(plan.hotspots.is_empty());
        assert!(plan.charging_plan.is_empty());
        assert_eq!(plan.demand_timeline.len(), 24);
        for (h, p) in plan.demand_timeline.iter().enumerate() {
            assert_eq!(p.hour, h as u32);
            assert_eq!((p.demand, p.supply), (0.0, 0.0));
        }
    }

    #[test]
    fn zero_severity_city_doubles_base_demand() {
        let plan = build_plan(&corridors(&[0.0, 0.0]));
        assert!(plan.hotspots.iter().all(|h| h.severity == SeverityTier::Support));
        assert_eq!(plan.demand_timeline[7].demand, 126.0);
        assert_eq!(plan.demand_timeline[0].demand, 72.0);
        assert_eq!(plan.demand_timeline[12].demand, 108.0);
    }

    #[test]
    fn heavier_delay_gets_more_vehicles() {
        // Same segment profile, delay ratios 0.5 and 0.1.
        let mut routes = corridors(&[0.5, 0.1]);
        for r in &mut routes {
            r.segments.push(segment(20.0, 40.0, 200.0));
        }
        let plan = build_plan(&routes);
        assert!(plan.hotspots[0].severity >= SeverityTier::Medium);
        assert_eq!(plan.hotspots[1].severity, SeverityTier::Support);
        assert!(plan.hotspots[0].recommended_avs > plan.hotspots[1].recommended_avs);
    }

    #[test]
    fn hotspots_sum_to_fleet_or_report_residual() {
        let inputs = [
            corridors(&[1.6, 1.2, 0.9, 0.5, 0.3, 0.1, 0.05]),
            corridors(&[2.0, 0.9, 0.9, 0.5, 0.5, 0.2, 0.2, 0.1]),
            corridors(&[0.5, 0.1]),
            corridors(&[1.5; 10]),
            corridors(&[0.1; 30]),
        ];
        for routes in &inputs {
            let plan = build_plan(routes);
            assert_eq!(plan.hotspots.len(), routes.len());
            assert_eq!(plan.allocated_vehicles() as i64 + plan.residual, 120);
        }
        assert_eq!(build_plan(&inputs[0]).residual, 0);
        assert_eq!(build_plan(&inputs[1]).residual, 0);
    }

    #[test]
    fn sample_corridor_plan() {
        let plan = build_plan(&sample_corridors());
        let tiers: Vec<_> = plan.hotspots.iter().map(|h| h.severity).collect();
        assert_eq!(tiers, vec![SeverityTier::Support, SeverityTier::Medium]);
        let avs: Vec<_> = plan.hotspots.iter().map(|h| h.recommended_avs).collect();
        assert_eq!(avs, vec![23, 30]);
        assert_eq!(plan.residual, 67);

        assert_eq!(plan.service_reliability, 84.8);
        assert_eq!(plan.energy_per_ride_kwh, 8.15);
        assert_eq!(plan.grid_stress_index, 48.6);
        assert_eq!(plan.reward_score, 48.9);

        let first = &plan.hotspots[0];
        assert_eq!(first.corridor, "Audi Forum → Hauptbahnhof");
        assert_eq!(first.coverage_window, "Off peak flex");
        assert_eq!(first.efficiency_boost_pct, 22);
        assert_eq!(first.time_saved_min, 1);
        assert_eq!(first.co2_saved_kg_per_week, 79.5);
        assert_eq!(
            first.notes,
            "Cut delay ~22% (~1 min/day). CO₂ ↓ 79.5 kg/week. Fleet staging: 23 AVs (~19% of the active pool)."
        );
        assert_eq!(plan.hotspots[1].coverage_window, "07:00 to 09:00");
    }

    #[test]
    fn timeline_follows_hour_multipliers() {
        let plan = build_plan(&sample_corridors());
        assert_eq!(plan.demand_timeline.len(), 24);
        let at = |h: usize| plan.demand_timeline[h];
        assert_eq!((at(7).demand, at(7).supply), (84.4, 89.1));
        assert_eq!((at(17).demand, at(17).supply), (90.4, 95.4));
        assert_eq!((at(12).demand, at(12).supply), (72.3, 76.3));
        assert_eq!((at(0).demand, at(0).supply), (48.2, 50.9));
        assert_eq!(at(0), at(23));
        assert_eq!(hour_multiplier(6), 1.4);
        assert_eq!(hour_multiplier(10), 0.8);
    }

    #[test]
    fn charging_schedule_is_fixed() {
        let plan = build_plan(&corridors(&[0.3]));
        let windows: Vec<_> = plan.charging_plan.iter().map(|c| c.window.as_str()).collect();
        assert_eq!(windows, vec!["22:00 to 05:00", "11:30 to 13:30", "01:00 to 04:00"]);
        assert_eq!(plan.charging_plan, charging_schedule());
        assert_eq!(build_plan(&sample_corridors()).charging_plan, plan.charging_plan);
    }

    #[test]
    fn kpi_clamps() {
        // Every corridor at score 1: reliability floor, stress 75.
        let plan = build_plan(&corridors(&[3.0, 3.0, 3.0]));
        assert_eq!(plan.service_reliability, 65.0);
        assert_eq!(plan.energy_per_ride_kwh, 6.5);
        assert_eq!(plan.grid_stress_index, 75.0);
        assert_eq!(plan.reward_score, 65.0 - 45.0 - 20.0);
    }

    #[test]
    fn custom_fleet_target() {
        let planner = Planner::new(PlannerConfig { fleet_target: 60 }).unwrap();
        let plan = planner.build_plan(&corridors(&[1.6, 1.2, 0.9, 0.5, 0.3]));
        assert_eq!(plan.recommended_fleet_size, 60);
        assert_eq!(plan.allocated_vehicles() as i64 + plan.residual, 60);
    }

    #[test]
    fn zero_fleet_rejected() {
        let err = Planner::new(PlannerConfig { fleet_target: 0 }).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
    }

    #[test]
    fn wire_shape() {
        let plan = build_plan(&sample_corridors());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["recommendedFleetSize"], 120);
        assert_eq!(json["serviceReliability"], 84.8);
        assert_eq!(json["hotspots"][1]["severity"], "Medium");
        assert_eq!(json["hotspots"][0]["recommendedAvs"], 23);
        assert_eq!(json["hotspots"][0]["co2SavedKgPerWeek"], 79.5);
        assert_eq!(json["chargingPlan"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["demandTimeline"][7]["hour"], 7);
        assert!(json.get("residual").is_none());

        let back: OrchestrationPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back.hotspots, plan.hotspots);
        assert_eq!(back.residual, 0);
    }
}

// ── Telemetry ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod telemetry {
    use super::*;

    #[test]
    fn segment_delay_against_typical_speed() {
        let s = segment(10.0, 12.0, 120.0);
        assert!(close(s.delay_s, 7.2));
        assert_eq!(s.id, "t-0");
    }

    #[test]
    fn faster_than_typical_has_no_delay() {
        assert_eq!(segment(50.0, 40.0, 500.0).delay_s, 0.0);
    }

    #[test]
    fn missing_speeds_fall_back() {
        let only_avg = RawSegment { average_speed: Some(30.0), segment_length: Some(100.0), ..Default::default() }
            .into_segment("r", 1);
        assert_eq!((only_avg.average_speed_kmh, only_avg.typical_speed_kmh), (30.0, 30.0));
        assert_eq!(only_avg.delay_s, 0.0);

        let only_typ = RawSegment { typical_speed: Some(40.0), ..Default::default() }.into_segment("r", 2);
        assert_eq!((only_typ.average_speed_kmh, only_typ.typical_speed_kmh), (40.0, 40.0));

        let none = RawSegment::default().into_segment("r", 3);
        assert_eq!((none.average_speed_kmh, none.typical_speed_kmh, none.length_m), (0.0, 0.0, 0.0));
        assert_eq!(none.delay_s, 0.0);
        assert_eq!(none.id, "r-3");
    }

    #[test]
    fn segment_id_precedence() {
        let both = RawSegment {
            segment_id:     Some(RawId::Number(42)),
            segment_id_str: Some("s42".into()),
            ..Default::default()
        };
        assert_eq!(both.into_segment("r", 0).id, "42");
        let text = RawSegment { segment_id_str: Some("s7".into()), ..Default::default() };
        assert_eq!(text.into_segment("r", 0).id, "s7");
    }

    #[test]
    fn route_defaults() {
        let raw = RawRoute {
            detailed_segments: vec![
                RawSegment { segment_length: Some(300.0), ..Default::default() },
                RawSegment { segment_length: Some(450.0), ..Default::default() },
            ],
            ..Default::default()
        };
        let r = raw.normalize("Ring").unwrap();
        assert_eq!(r.id, "Ring");
        assert_eq!(r.name, "Ring");
        assert_eq!(r.length_m, Some(750.0));
        assert_eq!(r.completeness, Some(100.0));
        assert!(r.passable);
        assert_eq!((r.travel_time_s, r.typical_travel_time_s, r.delay_s), (0.0, 0.0, 0.0));
        assert_eq!(r.area, None);
        assert_eq!(r.segments[1].id, "Ring-1");
    }

    #[test]
    fn known_corridor_overrides_name() {
        let raw = RawRoute {
            route_id: Some(RawId::Text("82725".into())),
            route_name: Some("feed name".into()),
            ..Default::default()
        };
        let r = raw.normalize("fallback").unwrap();
        assert_eq!(r.name, "Klinikum → Nordbahnhof");
        assert_eq!(r.area.as_deref(), Some("Medical district ↔ northern districts"));

        let other = RawRoute { route_id: Some(RawId::Number(1)), route_name: Some("Ring".into()), ..Default::default() };
        assert_eq!(other.normalize("fallback").unwrap().name, "Ring");
    }

    #[test]
    fn negative_values_rejected() {
        let bad = RawRoute { route_length: Some(-5.0), ..Default::default() };
        let err = normalize_routes(vec![RawRoute::default(), bad]).unwrap_err();
        assert_eq!(
            err,
            PlannerError::Telemetry { route: "route-1".into(), reason: "routeLength = -5".into() }
        );

        let nan = RawRoute {
            route_id: Some(RawId::Number(9)),
            detailed_segments: vec![RawSegment { average_speed: Some(f64::NAN), ..Default::default() }],
            ..Default::default()
        };
        assert!(matches!(nan.normalize("x"), Err(PlannerError::Telemetry { route, .. }) if route == "9"));
    }

    #[test]
    fn parses_feed_json() {
        let json = r#"[
            {"routeId": 82724, "routeName": "x", "delayTime": 30, "typicalTravelTime": 300,
             "detailedSegments": [{"segmentId": "a", "averageSpeed": 20, "typicalSpeed": 40, "segmentLength": 200}]},
            {"routeId": "ring-east", "passable": false, "completeness": 80}
        ]"#;
        let raw: Vec<RawRoute> = serde_json::from_str(json).unwrap();
        let routes = normalize_routes(raw).unwrap();
        assert_eq!(routes[0].name, "Audi Forum → Hauptbahnhof");
        assert_eq!(routes[0].length_m, Some(200.0));
        assert!(close(routes[0].segments[0].delay_s, 18.0));
        assert_eq!(routes[1].id, "ring-east");
        assert!(!routes[1].passable);
        assert_eq!(routes[1].completeness, Some(80.0));
    }

    #[test]
    fn sample_corridors_are_normalised() {
        let routes = sample_corridors();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].id, "82724");
        assert_eq!(routes[0].length_m, Some(5763.0));
        assert_eq!(routes[0].segments.len(), 5);
        assert_eq!(routes[0].segments[0].id, "1172384166320373761");
        assert!(close(routes[0].segments[0].delay_s, 7.2));
        assert_eq!(routes[1].name, "Klinikum → Nordbahnhof");
        assert_eq!(routes[1].area.as_deref(), Some("Medical district ↔ northern districts"));
        assert_eq!(routes[1].completeness, Some(97.0));
    }
}
