//! mobile_node — one mobile sender, one fixed receiver, one radio link.
//!
//! Node 0 wanders a 500 m square under random-waypoint mobility and runs a
//! voice-like source and a bulk source.  Both feed a single bounded link to
//! node 1, a fixed access point.  The bulk source offers more than the link
//! can carry, so part of it shows up as queue overflow.

mod link;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use wn_core::{NodeId, NodeRng, SimRng, SimTime, Vec3, WnError, WnResult};
use wn_mobility::{Boundary, MobilityEngine, MobilityStats, RandomWaypointConfig};
use wn_output::{CsvWriter, TraceRecorder};
use wn_traffic::{
    ConstantRate, ContextValue, LatencyTracker, NoopObserver, PacketContext, PacketRecord,
    TrafficConfig, TrafficManager, TrafficStatistics,
};

use link::{RadioLink, link_forwarder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64   = 42;
const SIM_SECS:      u64   = 120;
const SAMPLE_SECS:   u64   = 1;
const SENDER:        NodeId = NodeId(0);
const ACCESS_POINT:  NodeId = NodeId(1);
const LINK_QUEUE:    usize = 16;
const LINK_RATE_BPS: f64   = 2_000_000.0;
const OUTPUT_DIR:    &str  = "output/mobile_node";

// ── Summary ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct LatencySummary {
    packets: u64,
    mean_s:  Option<f64>,
    min_s:   Option<f64>,
    max_s:   Option<f64>,
}

#[derive(Serialize)]
struct Summary<'a> {
    sender:   &'a TrafficStatistics,
    receiver: &'a TrafficStatistics,
    mobility: &'a MobilityStats,
    latency:  LatencySummary,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn destination(packet: &PacketRecord) -> WnResult<NodeId> {
    match packet.context.get("dst") {
        Some(&ContextValue::Node(node)) => Ok(node),
        _ => Err(WnError::Config(format!("packet {} carries no destination", packet.id))),
    }
}

fn peer_position(peers: &BTreeMap<NodeId, Vec3>, node: NodeId) -> WnResult<Vec3> {
    peers.get(&node).copied().ok_or(WnError::NodeNotFound(node))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // 1. Placement.
    let mut placement = SimRng::new(SEED).child(SENDER.0 as u64);
    let start = Vec3::new(placement.gen_range(-250.0..250.0), placement.gen_range(-250.0..250.0), 1.5);
    let peers = BTreeMap::from([(ACCESS_POINT, Vec3::new(0.0, 0.0, 10.0))]);

    // 2. Mobility.
    let mobility = RandomWaypointConfig {
        speed_min:      0.5,
        speed_max:      2.0,
        pause_duration: 5.0,
        boundary:       Boundary::Rectangle { center_x: 0.0, center_y: 0.0, width: 500.0, height: 500.0 },
    };
    let mut engine = MobilityEngine::new(SENDER, mobility, start, 0.0, NodeRng::new(SEED, SENDER))?;
    info!(node = %SENDER, start = %start, "mobile node placed");

    // 3. Traffic.
    let link = Rc::new(RefCell::new(RadioLink::new(LINK_QUEUE, LINK_RATE_BPS)));
    let mut sender = TrafficManager::new(
        TrafficConfig {
            node:             SENDER,
            data_abstraction: true,
            base_context:     PacketContext::new().with("dst", ACCESS_POINT),
        },
        link_forwarder(Rc::clone(&link)),
        NoopObserver,
    );
    // 160 B every 20 ms.
    sender.add_source(ConstantRate::new(20_000.0, 160), PacketContext::new().with("app", "voice"), None);
    // 1500 B every 2 ms for 10 s: 6 Mbit/s offered to a 2 Mbit/s link.
    sender.add_source(
        ConstantRate::new(2_000.0, 1_500).with_limit(5_000),
        PacketContext::new().with("app", "bulk"),
        None,
    );

    let mut receiver = TrafficManager::new(
        TrafficConfig { node: ACCESS_POINT, ..Default::default() },
        |_p: PacketRecord| false,
        LatencyTracker::new(),
    );

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut recorder = TraceRecorder::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);

    // 5. Event loop.
    let end = SimTime::from_secs(SIM_SECS);
    let sample_step = SimTime::from_secs(SAMPLE_SECS).as_nanos();
    let mut next_traffic = SimTime::ZERO;
    let mut next_sample = SimTime::ZERO;

    let t0 = Instant::now();
    loop {
        let now = next_traffic.min(next_sample).min(link.borrow().next_delivery());
        if now >= end {
            break;
        }

        if now == next_sample {
            recorder.sample(&mut engine, now.as_secs_f64());
            next_sample = now.offset(sample_step);
        }
        if now == next_traffic {
            next_traffic = sender.run(now);
        }

        let delivered = link.borrow_mut().deliver(now);
        if let Some(packet) = delivered {
            if destination(&packet)? == ACCESS_POINT {
                receiver.receive_packet(&packet, now);
            }
        }

        let head_dst = link.borrow().head().map(destination).transpose()?;
        if let Some(dst) = head_dst {
            if link.borrow().is_idle() {
                let distance = engine.position_at(now)?.distance(peer_position(&peers, dst)?);
                link.borrow_mut().start_next(now, distance)?;
            }
        }
    }
    let elapsed = t0.elapsed();

    recorder.record_statistics(&sender.statistics());
    recorder.finish();
    if let Some(e) = recorder.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  mobility_trace.csv : {} rows", recorder.trace_rows());
    println!("  traffic_stats.csv  : {} rows", recorder.stats_rows());
    println!();

    let sent = sender.statistics();
    let received = receiver.statistics();
    let latency = receiver.observer();
    let summary = Summary {
        sender:   &sent,
        receiver: &received,
        mobility: engine.stats(),
        latency:  LatencySummary {
            packets: latency.count(),
            mean_s:  latency.mean(),
            min_s:   latency.min(),
            max_s:   latency.max(),
        },
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
