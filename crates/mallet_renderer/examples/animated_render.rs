//! Render a short clip of a mallet playing two bars.
//!
//! Usage: `animated_render [OUT_DIR] [FRAMES] [CONFIG_JSON]`

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use mallet_math::{AnimatedValue, Key, KeyframeCurve, Mat4, Pose, Vec2, Vec3};
use mallet_motion::{MalletPath, Onset, StrikeEvent};
use mallet_renderer::{
    AxisBox, Camera, Color, Cylinder, Disk, Framebuffer, Group, Material, MaterialLibrary,
    RenderConfig, Renderer, Scene, Sphere, Surface, Texture, Transform,
};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 270;
const FPS: f32 = 24.0;

/// Bar centers, indexed by target.
const BARS: [Vec3; 2] = [Vec3::new(-0.6, 0.0, 0.3), Vec3::new(0.6, 0.0, 0.3)];

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "frames".into()));
    let frames: u32 = match args.next() {
        Some(n) => n.parse().context("frame count must be an integer")?,
        None => 96,
    };
    let config = match args.next() {
        Some(path) => RenderConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => RenderConfig {
            light_direction: Vec3::new(0.3, 1.0, -0.4),
            ..RenderConfig::default()
        },
    };

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let scene = build_scene()?;
    let camera = Camera::new(Vec3::new(0.0, 2.2, -4.5), Vec3::new(0.0, 0.2, 0.0), Vec3::Y)
        .with_fov(35.0)
        .with_aspect(WIDTH as f32 / HEIGHT as f32);
    let renderer = Renderer::new(config)?;
    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);

    for frame in 0..frames {
        let time = frame as f32 / FPS;
        let stats = renderer.render(&scene, &camera, &mut framebuffer, time);
        let path = out_dir.join(format!("frame_{frame:04}.png"));
        framebuffer
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("frame {frame} -> {} ({:?})", path.display(), stats.elapsed);
    }

    Ok(())
}

fn build_scene() -> Result<Scene> {
    let mut materials = MaterialLibrary::new();
    let floor = materials.add(Material::new(
        Texture::Checker {
            even: Color::splat(0.8),
            odd: Color::splat(0.3),
            scale: 2.0,
        },
        0.2,
    ));
    let wood = materials.add(Material::new(Texture::Procedural(grain), 0.05));
    let handle = materials.add(Material::diffuse(Color::new(0.7, 0.6, 0.45)));
    let head = materials.add(Material::glossy(Color::new(0.8, 0.1, 0.1), 0.3));
    let chrome = materials.add(Material::glossy(Color::splat(0.9), 0.8));

    let mut root = Group::new().with(Surface::new(
        Disk::horizontal(Vec3::new(0.0, -0.3, 0.0), 6.0)?,
        floor,
    ));

    for center in BARS {
        root.add(Surface::new(
            AxisBox::from_center(center, Vec3::new(0.22, 0.05, 0.75))?,
            wood,
        ));
    }

    // A bauble bobbing behind the bars on a keyframed height
    let bob = KeyframeCurve::new(vec![
        Key::linear(0.0, Vec3::new(0.0, 0.4, 1.6)),
        Key::linear(2.0, Vec3::new(0.0, 1.2, 1.6)),
        Key::linear(4.0, Vec3::new(0.0, 0.4, 1.6)),
    ])?;
    root.add(Surface::new(Sphere::new(AnimatedValue::keyframes(bob), 0.35)?, chrome));

    let mallet = Group::new()
        .with(Surface::new(Cylinder::new(0.03, 1.1)?, handle))
        .with(Surface::new(Sphere::new(Vec3::new(0.0, 1.1, 0.0), 0.1)?, head));
    root.add(Transform::new(mallet_motion()?, mallet));

    Ok(Scene::new(root, materials)?)
}

fn mallet_motion() -> Result<AnimatedValue<Mat4>> {
    let onsets = [
        Onset::new(0.5, 0, 100),
        Onset::new(1.25, 1, 90),
        Onset::new(2.0, 0, 110),
        Onset::new(2.5, 1, 80),
        Onset::new(3.5, 0, 100),
    ];
    let events = StrikeEvent::from_onsets(&onsets, 0.5);

    let mut strike = BTreeMap::new();
    let mut rest = BTreeMap::new();
    for (target, bar) in BARS.iter().enumerate() {
        // Base sits in front of the bar; the handle swings about X
        let base = Vec3::new(bar.x, 0.15, bar.z - 1.1);
        let swing = |degrees: f32| Pose::from_euler(base, Vec3::new(degrees.to_radians(), 0.0, 0.0));
        strike.insert(target as u8, swing(85.0));
        rest.insert(target as u8, swing(40.0));
    }

    Ok(MalletPath::new(events, strike, rest)?.into_animated())
}

fn grain(uv: Vec2) -> Color {
    let ring = (uv.x * 40.0 + (uv.y * 3.0).sin() * 2.0).sin() * 0.5 + 0.5;
    Color::new(0.55, 0.35, 0.2).lerp(Color::new(0.7, 0.5, 0.3), ring)
}
