// Host-side tests for ray construction and marker / environment picking.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod scene {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod commands {
        include!("../src/core/commands.rs");
    }
    pub mod drawlist {
        include!("../src/core/drawlist.rs");
    }
    pub mod effects {
        include!("../src/core/effects.rs");
    }
    pub mod entry {
        include!("../src/core/entry.rs");
    }
    pub mod lighting {
        include!("../src/core/lighting.rs");
    }
    pub mod loading {
        include!("../src/core/loading.rs");
    }
    pub mod markers {
        include!("../src/core/markers.rs");
    }
    pub mod models {
        include!("../src/core/models.rs");
    }
    pub mod movement {
        include!("../src/core/movement.rs");
    }
    pub mod panels {
        include!("../src/core/panels.rs");
    }
    pub mod picking {
        include!("../src/core/picking.rs");
    }
    pub mod session {
        include!("../src/core/session.rs");
    }
    pub mod shapes {
        include!("../src/core/shapes.rs");
    }
}

use constants::*;
use glam::{Mat4, Vec2, Vec3};
use scene::camera::{pixel_to_ndc, FirstPersonCamera, Ray};
use scene::markers::{create_markers, default_specs, MarkerPart};
use scene::picking::*;
use scene::session::logo_transform;
use scene::shapes::{self, MeshData};

fn camera_at(position: Vec3, yaw: f32) -> FirstPersonCamera {
    FirstPersonCamera {
        position,
        yaw,
        pitch: 0.0,
    }
}

#[test]
fn ray_sphere_hits_and_misses() {
    let hit = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!((hit.unwrap() - 3.0).abs() < 1e-5);
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
    // Sphere behind the origin
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
}

#[test]
fn ray_sphere_from_inside_reports_exit() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::ZERO, 2.0).unwrap();
    assert!((t - 2.0).abs() < 1e-5);
}

#[test]
fn ray_aabb_slab_entry() {
    let min = Vec3::new(-1.0, -1.0, 4.0);
    let max = Vec3::new(1.0, 1.0, 6.0);
    let t = ray_aabb(Vec3::ZERO, Vec3::Z, min, max).unwrap();
    assert!((t - 4.0).abs() < 1e-5);
    assert!(ray_aabb(Vec3::ZERO, Vec3::Y, min, max).is_none());
    assert!(ray_aabb(Vec3::ZERO, Vec3::NEG_Z, min, max).is_none());
}

#[test]
fn ray_triangle_hits_front_faces_only() {
    let (a, b, c) = (
        Vec3::new(-1.0, -1.0, -5.0),
        Vec3::new(1.0, -1.0, -5.0),
        Vec3::new(0.0, 1.0, -5.0),
    );
    // Counter-clockwise seen from the origin
    let t = ray_triangle(Vec3::ZERO, Vec3::NEG_Z, a, b, c).unwrap();
    assert!((t - 5.0).abs() < 1e-5);
    assert!(ray_triangle(Vec3::ZERO, Vec3::NEG_Z, a, c, b).is_none());
    assert!(ray_triangle(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_Z, a, b, c).is_none());
    assert!(ray_triangle(Vec3::ZERO, Vec3::Z, a, b, c).is_none());
}

#[test]
fn ground_hit_only_when_looking_down_inside_extent() {
    let down = Ray {
        origin: Vec3::new(0.0, 2.0, 0.0),
        dir: Vec3::new(0.0, -1.0, -1.0).normalize(),
    };
    let t = ray_ground(&down, 75.0).unwrap();
    assert!(down.at(t).y.abs() < 1e-5);
    assert!(ray_ground(&down, 1.0).is_none());
    let level = Ray {
        origin: Vec3::new(0.0, 2.0, 0.0),
        dir: Vec3::NEG_Z,
    };
    assert!(ray_ground(&level, 75.0).is_none());
}

#[test]
fn pick_mesh_bakes_transform() {
    let mesh = PickMesh::new(
        &shapes::cuboid(Vec3::splat(2.0)),
        Mat4::from_translation(Vec3::new(0.0, 10.0, 0.0)),
    )
    .unwrap();
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(
        mesh.bounds(),
        (Vec3::new(-1.0, 9.0, -1.0), Vec3::new(1.0, 11.0, 1.0))
    );
    let ray = Ray {
        origin: Vec3::new(0.3, 10.2, 10.0),
        dir: Vec3::NEG_Z,
    };
    assert!((mesh.intersect(&ray).unwrap() - 9.0).abs() < 1e-5);
    assert!(PickMesh::new(&MeshData::default(), Mat4::IDENTITY).is_none());
}

#[test]
fn inside_a_mesh_its_walls_are_not_hit() {
    let room = PickMesh::new(
        &shapes::cuboid(Vec3::new(12.0, 6.0, 12.0)),
        Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0)),
    )
    .unwrap();
    let origin = Vec3::new(0.0, 1.8, 3.0);
    for dir in [Vec3::Y, Vec3::NEG_Z, Vec3::X, Vec3::new(0.3, 0.8, 0.5).normalize()] {
        assert_eq!(room.intersect(&Ray { origin, dir }), None, "{dir}");
    }
}
#[test]
fn centre_ray_follows_view_direction() {
    let cam = camera_at(Vec3::new(1.0, 2.0, 3.0), 0.7);
    let ray = cam.ray_from_ndc(Vec2::ZERO, 16.0 / 9.0);
    assert!((ray.origin - cam.position).length() < 1e-5);
    assert!((ray.dir - cam.view_dir()).length() < 1e-2);
}

#[test]
fn pixel_to_ndc_corners() {
    assert_eq!(pixel_to_ndc(0.0, 0.0, 200.0, 100.0), Vec2::new(-1.0, 1.0));
    assert_eq!(pixel_to_ndc(200.0, 100.0, 200.0, 100.0), Vec2::new(1.0, -1.0));
    assert_eq!(pixel_to_ndc(100.0, 50.0, 200.0, 100.0), Vec2::ZERO);
    assert_eq!(pixel_to_ndc(10.0, 10.0, 0.0, 100.0), Vec2::ZERO);
}

#[test]
fn pick_marker_returns_marker_under_crosshair() {
    let markers = create_markers(&default_specs());
    let cam = camera_at(Vec3::new(0.0, 3.0, 20.0), 0.0);
    let id = pick_marker(Vec2::ZERO, &cam, 1.0, &markers).unwrap();
    assert_eq!(markers.get(id).unwrap().panel_id, "merch-panel");
}

#[test]
fn pick_marker_off_centre() {
    let markers = create_markers(&default_specs());
    let cam = camera_at(Vec3::new(0.0, 3.0, 20.0), 0.0);
    let aspect = 1.0;
    // "Home" sits at (8, 3, 8): 8 right and 12 ahead of the camera
    let half_fov = (CAMERA_FOV_Y_DEG.to_radians() * 0.5).tan();
    let ndc = Vec2::new((8.0 / 12.0) / (half_fov * aspect), 0.0);
    let id = pick_marker(ndc, &cam, aspect, &markers).unwrap();
    assert_eq!(markers.get(id).unwrap().name, "Home");
}

#[test]
fn pick_marker_misses_when_looking_away() {
    let markers = create_markers(&default_specs());
    let cam = camera_at(Vec3::new(0.0, 3.0, 20.0), std::f32::consts::PI);
    assert_eq!(pick_marker(Vec2::ZERO, &cam, 1.0, &markers), None);
}

#[test]
fn every_hit_shape_resolves_to_its_marker() {
    let markers = create_markers(&default_specs());
    let mut count = 0;
    for (shape, _) in markers.world_hit_shapes() {
        let owner = markers.owner_of(shape).unwrap();
        assert!(markers
            .get(owner)
            .unwrap()
            .shapes
            .iter()
            .any(|s| s.id == shape));
        count += 1;
    }
    assert_eq!(count, markers.len() * 3);
}

#[test]
fn crystal_above_marker_is_pickable() {
    let markers = create_markers(&default_specs());
    let merch = markers.by_name("Ritual Merch").unwrap();
    let crystal = merch.crystal_position();
    let cam = camera_at(Vec3::new(crystal.x, crystal.y, crystal.z + 8.0), 0.0);
    let id = pick_marker(Vec2::ZERO, &cam, 1.0, &markers).unwrap();
    assert_eq!(id, merch.id);
}

fn boxed(size: Vec3, centre: Vec3) -> Option<PickMesh> {
    PickMesh::new(&shapes::cuboid(size), Mat4::from_translation(centre))
}

#[test]
fn markers_take_priority_over_environment() {
    let markers = create_markers(&default_specs());
    let env = EnvironmentTargets {
        main_model: boxed(Vec3::new(10.0, 6.0, 10.0), Vec3::new(0.0, 2.5, 0.0)),
        ..Default::default()
    };
    let cam = camera_at(Vec3::new(0.0, 3.0, 20.0), 0.0);
    assert!(matches!(
        pick(Vec2::ZERO, &cam, 1.0, &markers, &env),
        Some(PickTarget::Marker(_))
    ));
    let no_markers = create_markers(&[]);
    assert_eq!(
        pick(Vec2::ZERO, &cam, 1.0, &no_markers, &env),
        Some(PickTarget::MainModel)
    );
    let away = camera_at(Vec3::new(0.0, 3.0, 20.0), std::f32::consts::PI);
    assert_eq!(pick(Vec2::ZERO, &away, 1.0, &no_markers, &env), None);
}

#[test]
fn nearer_environment_target_wins() {
    let markers = create_markers(&[]);
    let env = EnvironmentTargets {
        main_model: boxed(Vec3::new(10.0, 4.0, 10.0), Vec3::new(0.0, 10.0, -25.0)),
        logo: PickMesh::new(&shapes::cuboid(Vec3::ONE), logo_transform()),
        ..Default::default()
    };
    // Level with the logo at y = 10, well above the markers
    let cam = camera_at(Vec3::new(0.3, 10.2, 20.0), 0.0);
    assert_eq!(pick(Vec2::ZERO, &cam, 1.0, &markers, &env), Some(PickTarget::Logo));
}

#[test]
fn ground_hides_what_is_below_it() {
    let markers = create_markers(&[]);
    let sunk = boxed(Vec3::splat(10.0), Vec3::ZERO);
    let mut cam = camera_at(Vec3::new(0.5, 2.0, 20.0), 0.0);
    cam.pitch = -0.3;
    let open = EnvironmentTargets {
        main_model: sunk.clone(),
        ground_half_extent: 0.0,
        ..Default::default()
    };
    assert_eq!(
        pick(Vec2::ZERO, &cam, 1.0, &markers, &open),
        Some(PickTarget::MainModel)
    );
    let grounded = EnvironmentTargets {
        main_model: sunk,
        ..Default::default()
    };
    assert_eq!(pick(Vec2::ZERO, &cam, 1.0, &markers, &grounded), None);
}

#[test]
fn standing_inside_the_main_model_only_the_logo_is_clickable() {
    let markers = create_markers(&[]);
    let env = EnvironmentTargets {
        main_model: boxed(Vec3::new(12.0, 6.0, 12.0), Vec3::new(0.0, 3.0, 0.0)),
        logo: PickMesh::new(&shapes::cuboid(Vec3::ONE), logo_transform()),
        ..Default::default()
    };
    let eye = Vec3::new(0.0, 1.8, 3.0);
    let to_logo = LOGO_POSITION - eye;
    let mut cam = camera_at(eye, 0.0);
    cam.pitch = to_logo.y.atan2(-to_logo.z);
    assert_eq!(pick(Vec2::ZERO, &cam, 1.0, &markers, &env), Some(PickTarget::Logo));

    // Sky behind and above
    let mut sky = camera_at(eye, std::f32::consts::PI);
    sky.pitch = 1.0;
    assert_eq!(pick(Vec2::ZERO, &sky, 1.0, &markers, &env), None);
    // Straight at a wall from inside
    let wall = camera_at(eye, std::f32::consts::FRAC_PI_2);
    assert_eq!(pick(Vec2::new(0.0, 0.5), &wall, 1.0, &markers, &env), None);
}

#[test]
fn ring_hit_volume_is_a_flat_box() {
    let markers = create_markers(&default_specs());
    let home = markers.by_name("Home").unwrap();
    let ring = home
        .shapes
        .iter()
        .find(|s| s.part == MarkerPart::Ring)
        .map(|s| s.local)
        .unwrap();
    let Bounds::Aabb { min, max } = ring else {
        unreachable!()
    };
    assert!((max.y - RING_TUBE).abs() < 1e-6);
    assert!((max.x - (RING_RADIUS + RING_TUBE)).abs() < 1e-6);
    assert_eq!(min, -max);
}

#[test]
fn hint_names_the_marker() {
    assert_eq!(hint_text("Workshop"), "Click to view Workshop");
}
