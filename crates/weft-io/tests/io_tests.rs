//! Integration tests for weft-io.

use glam::Vec3;
use weft_io::contract::{load_config, ColliderTrack, SimulationInput};
use weft_io::export::{AnimationData, JsonFrameExporter};
use weft_io::validator::validate_input;
use weft_mesh::generators::{grid_top_row, quad_grid};
use weft_mesh::{TriangleMesh, VertexGroup};
use weft_solver::{ColliderSource, FrameDriver, MeshSink, SolverConfig};
use weft_types::WeftError;

fn make_valid_input() -> SimulationInput {
    let mut mesh = quad_grid(4, 4, 1.0, 1.0);
    mesh.add_group(VertexGroup::uniform("pin", grid_top_row(4)));
    mesh.add_group(VertexGroup::uniform("attach", grid_top_row(4)));
    SimulationInput {
        mesh,
        pin_group: "pin".into(),
        attach_group: Some("attach".into()),
        config: SolverConfig::default(),
        collider: ColliderTrack::Static {
            center: [0.0, 0.0, -5.0],
        },
        frame_count: 3,
    }
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn simulation_input_round_trip() {
    let input = make_valid_input();
    let json = input.to_json_string().unwrap();
    let recovered = SimulationInput::from_json_str(&json).unwrap();
    assert_eq!(recovered.mesh.vertex_count(), 25);
    assert_eq!(recovered.mesh.groups.len(), 2);
    assert_eq!(recovered.attach_group.as_deref(), Some("attach"));
    assert_eq!(recovered.config, input.config);
    assert_eq!(recovered.collider, input.collider);
}

#[test]
fn scene_json_defaults() {
    let json = r#"{
        "mesh": {
            "pos_x": [0.0, 1.0, 0.0],
            "pos_y": [0.0, 0.0, 1.0],
            "pos_z": [0.0, 0.0, 0.0],
            "indices": [0, 1, 2],
            "groups": [{ "name": "pin", "members": [[0, 1.0]] }]
        },
        "pin_group": "pin",
        "collider": { "kind": "linear", "start": [0.0, 0.0, -2.0], "velocity": [0.0, 0.0, 1.0] },
        "frame_count": 10
    }"#;
    let input = SimulationInput::from_json_str(json).unwrap();
    assert!(input.attach_group.is_none());
    assert_eq!(input.config, SolverConfig::default());
    assert!(matches!(input.collider, ColliderTrack::Linear { .. }));
    assert!(validate_input(&input).is_ok());
}

#[test]
fn malformed_scene_is_serialization_error() {
    let err = SimulationInput::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, WeftError::Serialization(_)));
}

#[test]
fn load_scene_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    std::fs::write(&path, make_valid_input().to_json_string().unwrap()).unwrap();

    let input = SimulationInput::load(&path).unwrap();
    assert_eq!(input.frame_count, 3);

    let missing = SimulationInput::load(dir.path().join("missing.json"));
    assert!(matches!(missing, Err(WeftError::Io(_))));
}

#[test]
fn load_config_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solver.toml");
    std::fs::write(&path, "substeps = 5\nexecution = \"parallel\"\n").unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.substeps, 5);
    assert!(config.execution.is_parallel());
    assert_eq!(config.solver_iterations, 4);

    std::fs::write(&path, "substeps = \"five\"").unwrap();
    assert!(matches!(load_config(&path), Err(WeftError::Serialization(_))));
}

// ─── Collider Track Tests ─────────────────────────────────────

#[test]
fn static_track_never_moves() {
    let track = ColliderTrack::Static {
        center: [1.0, 2.0, 3.0],
    };
    assert_eq!(track.center_at(0.0), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(track.center_at(10.0), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn linear_track_is_timed_per_substep() {
    let config = SolverConfig {
        frame_time: 0.1,
        substeps: 4,
        ..Default::default()
    };
    let track = ColliderTrack::Linear {
        start: [0.0, 0.0, 0.0],
        velocity: [2.0, 0.0, 0.0],
    };
    let mut source = track.schedule(&config);

    assert!((source.time(2, 1) - 0.225).abs() < 1e-6);
    assert_eq!(source.collider_center(0, 0), Vec3::ZERO);
    assert!((source.collider_center(0, 2).x - 0.1).abs() < 1e-6);
    assert!((source.collider_center(3, 0).x - 0.6).abs() < 1e-6);
}

#[test]
fn initialize_from_scene() {
    let mut input = make_valid_input();
    input.config.long_range_attachment = true;
    let state = input.initialize().unwrap();
    assert_eq!(state.vertex_count(), 25);
    assert_eq!(state.attachment_count(), 5);
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn valid_input_passes() {
    assert!(validate_input(&make_valid_input()).is_ok());
}

#[test]
fn missing_pin_group_rejected() {
    let mut input = make_valid_input();
    input.pin_group = "hem".into();
    let err = validate_input(&input).unwrap_err();
    assert!(matches!(err, WeftError::MissingVertexGroup(name) if name == "hem"));
}

#[test]
fn attachment_group_checked_only_with_lra() {
    let mut input = make_valid_input();
    input.attach_group = Some("nowhere".into());
    assert!(validate_input(&input).is_ok());

    input.config.long_range_attachment = true;
    assert!(matches!(
        validate_input(&input),
        Err(WeftError::MissingVertexGroup(_))
    ));

    input.attach_group = None;
    assert!(matches!(validate_input(&input), Err(WeftError::InvalidConfig(_))));
}

#[test]
fn zero_frames_rejected() {
    let mut input = make_valid_input();
    input.frame_count = 0;
    assert!(matches!(validate_input(&input), Err(WeftError::InvalidConfig(_))));
}

#[test]
fn bad_config_rejected() {
    let mut input = make_valid_input();
    input.config.solver_iterations = 0;
    assert!(matches!(validate_input(&input), Err(WeftError::InvalidConfig(_))));
}

#[test]
fn empty_mesh_rejected() {
    let mut input = make_valid_input();
    input.mesh = TriangleMesh::default();
    input.mesh.add_group(VertexGroup::new("pin"));
    assert!(matches!(validate_input(&input), Err(WeftError::InvalidMesh(_))));
}

#[test]
fn out_of_range_index_rejected() {
    let mut input = make_valid_input();
    input.mesh.indices[0] = 999;
    assert!(matches!(validate_input(&input), Err(WeftError::InvalidMesh(_))));
}

#[test]
fn non_finite_collider_rejected() {
    let mut input = make_valid_input();
    input.collider = ColliderTrack::Linear {
        start: [0.0, 0.0, 0.0],
        velocity: [f32::INFINITY, 0.0, 0.0],
    };
    assert!(matches!(validate_input(&input), Err(WeftError::InvalidConfig(_))));
}

// ─── Export Tests ─────────────────────────────────────────────

#[test]
fn exporter_writes_frames() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frames.json");
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let mut exporter = JsonFrameExporter::new(&path, &mesh);

    let positions = mesh.positions();
    exporter.publish(0, &positions).unwrap();
    exporter.publish(1, &positions).unwrap();
    assert_eq!(exporter.frame_count(), 2);
    exporter.finalize().unwrap();
    assert_eq!(exporter.frame_count(), 0);

    let data = AnimationData::load(&path).unwrap();
    assert_eq!(data.vertex_count, 9);
    assert_eq!(data.triangle_count, 8);
    assert_eq!(data.indices, mesh.indices);
    assert_eq!(data.frames.len(), 2);
    assert_eq!(data.frames[1].frame, 1);
    assert_eq!(data.frames[0].positions.len(), 27);
    assert_eq!(&data.frames[0].positions[..3], &[-0.5, 0.5, 0.0]);
}

#[test]
fn exporter_rejects_wrong_vertex_count() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let mut exporter = JsonFrameExporter::new("unused.json", &mesh);
    let result = exporter.publish(0, &[Vec3::ZERO; 4]);
    assert!(matches!(result, Err(WeftError::InvalidMesh(_))));
    assert_eq!(exporter.frame_count(), 0);
}

#[test]
fn scene_runs_through_driver_into_exporter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    let input = make_valid_input();
    validate_input(&input).unwrap();

    let mut state = input.initialize().unwrap();
    let mut source = input.collider_source();
    let mut exporter = JsonFrameExporter::new(&path, &input.mesh);
    FrameDriver::new()
        .run(&mut state, &mut source, &mut exporter, input.frame_count)
        .unwrap();
    exporter.finalize().unwrap();

    let data = AnimationData::load(&path).unwrap();
    assert_eq!(data.frames.len(), 3);
    let last = &data.frames[2].positions;
    // Bottom-left vertex (index 20) has fallen; pinned vertex 0 has not.
    assert!(last[20 * 3 + 2] < 0.0);
    assert_eq!(last[2], 0.0);
}

// ─── Demo Files ───────────────────────────────────────────────

#[test]
fn demo_scene_is_valid() {
    let input = SimulationInput::from_json_str(include_str!("../../../demos/swinging_sheet.json")).unwrap();
    validate_input(&input).unwrap();
    assert_eq!(input.mesh.vertex_count(), 121);
    assert!(input.config.long_range_attachment);
}

#[test]
fn demo_config_matches_defaults() {
    let config: SolverConfig = toml::from_str(include_str!("../../../demos/solver.toml")).unwrap();
    assert_eq!(config, SolverConfig::default());
}
