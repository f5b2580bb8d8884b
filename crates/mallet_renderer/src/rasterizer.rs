//! Parallel frame rendering on a fixed thread pool.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, tile_seed, BucketResult};
use crate::{Camera, Framebuffer, RenderConfig, RenderResult, Scene};

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Number of tiles rendered
    pub tiles: usize,
    /// Camera rays traced (excluding shadow and reflection rays)
    pub samples: u64,
    /// Wall time of the whole frame
    pub elapsed: Duration,
}

/// Renders frames by farming tiles out to a worker pool.
///
/// The pool is built once and reused for every frame, so an animation is a
/// loop of `render` calls with increasing sample times.
pub struct Renderer {
    config: RenderConfig,
    pool: rayon::ThreadPool,
}

impl Renderer {
    /// Validate the config and spin up the worker pool.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;

        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("mallet-tile-{i}"));
        if let Some(threads) = config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        log::info!(
            "Renderer ready: {} threads, {}px tiles, {}x{} samples per pixel",
            pool.current_num_threads(),
            config.tile_size,
            config.samples_per_side,
            config.samples_per_side
        );

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `scene` at `sample_time` into `framebuffer`.
    ///
    /// Every tile runs to completion on one worker with its own seeded
    /// generator; the call returns once all tiles are written.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        framebuffer: &mut Framebuffer,
        sample_time: f32,
    ) -> RenderStats {
        let start = Instant::now();
        let config = &self.config;
        let (width, height) = (framebuffer.width, framebuffer.height);
        let buckets = generate_buckets(width, height, config.tile_size);

        log::debug!(
            "Rendering {}x{} at t={:.3} in {} tiles",
            width,
            height,
            sample_time,
            buckets.len()
        );

        let results: Vec<BucketResult> = self.pool.install(|| {
            buckets
                .par_iter()
                .map(|bucket| {
                    let mut rng = StdRng::seed_from_u64(tile_seed(config.seed, bucket));
                    let pixels = render_bucket(
                        bucket,
                        scene,
                        camera,
                        width,
                        height,
                        sample_time,
                        config,
                        &mut rng,
                    );
                    BucketResult::new(*bucket, pixels)
                })
                .collect()
        });

        for result in &results {
            framebuffer.write_bucket(result);
        }

        let per_pixel = u64::from(config.samples_per_side).pow(2);
        let stats = RenderStats {
            tiles: results.len(),
            samples: u64::from(width) * u64::from(height) * per_pixel,
            elapsed: start.elapsed(),
        };

        log::info!(
            "Rendered frame t={:.3}: {} tiles, {} samples in {:?}",
            sample_time,
            stats.tiles,
            stats.samples,
            stats.elapsed
        );

        stats
    }
}
