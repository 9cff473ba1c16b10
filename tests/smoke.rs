use glam::Vec3;
use holosnap_core::{Ray, Tick};
use holosnap_input::{ClickEvent, ClickHandler};
use holosnap_physics::Scene;
use holosnap_ruler::Ruler;
use holosnap_snap::{SnapMode, Step, TriangleSnapper};
use holosnap_testkit::{instance_at, unit_quad, EventRecord, JsonlSink};

#[test]
fn deterministic_event_stream_can_be_written() {
    let path = std::env::temp_dir().join(format!("holosnap_smoke_{}.jsonl", std::process::id()));
    let mut sink = JsonlSink::create(&path).expect("can create temp log");
    let tick = Tick::ZERO.advance(1);
    let record = EventRecord {
        tick,
        kind: "SmokeTest",
        payload: "ok",
    };
    sink.write(&record).expect("can write event");
    sink.flush().expect("can flush");
    assert_eq!(sink.written(), 1);

    let contents = std::fs::read_to_string(&path).expect("log exists");
    assert_eq!(contents.trim(), r#"{"tick":1,"kind":"SmokeTest","payload":"ok"}"#);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn quad_corners_can_be_measured() {
    let scene = Scene::new([instance_at("quad", unit_quad(), Vec3::new(0.0, 0.0, -2.0))]);
    let mut snapper = TriangleSnapper::default();
    snapper.set_mode(SnapMode::Vertex);
    snapper.set_step(Step::new(2));
    let mut ruler = Ruler::new();

    for (i, (x, y)) in [(-0.4, -0.4), (0.4, -0.4)].into_iter().enumerate() {
        let ray = Ray::new(Vec3::new(x, y, 0.0), Vec3::NEG_Z).unwrap();
        snapper.query(&ray, &scene);
        ruler.on_click(&ClickEvent {
            tick: Tick(i as u64),
            point: snapper.sample(),
        });
    }

    let segment = ruler.segment().expect("two corners captured");
    assert_eq!(segment.start, Vec3::new(-0.5, -0.5, -2.0));
    assert_eq!(segment.end, Vec3::new(0.5, -0.5, -2.0));
    assert_eq!(segment.label(), "1.000");
    assert_eq!(ruler.last_capture(), Some(Tick(1)));
}
