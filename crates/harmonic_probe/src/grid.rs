//! Pixel-grid driver: maps an image canvas onto the domain and estimates
//! the harmonic solution per pixel.

use rayon::prelude::*;

use wos2d::{
    estimate_laplace_dirichlet, splitmix64, BoundaryDirichlet, Domain, Rng, Vec2, WalkBudget,
    WalkObserver,
};

use crate::raster::{ImageBuffer, RasterError};

/// Estimation parameters for one render pass.
#[derive(Copy, Clone, Debug)]
pub struct RenderParams {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Independent walks averaged per pixel.
    pub num_paths: u32,
    /// Walk termination tolerance.
    pub epsilon: f32,
    /// Hard cap on steps per walk.
    pub max_steps: u32,
    /// Base seed; per-pixel generators are derived from it.
    pub seed: u64,
}

/// Map pixel `(column, row)` to its domain-space sample point.
///
/// The canvas is normalized to [0,1]×[0,1] with the row axis flipped: image
/// row 0 (top) lands near domain y = 1.
#[inline]
pub fn sample_point(column: usize, row: usize, width: usize, height: usize) -> Vec2 {
    let sx = (column as f32 + 0.5) / width as f32;
    let sy = 1.0 - (row as f32 + 0.5) / height as f32;
    Vec2::new(sx, sy)
}

/// Generator for one pixel, independent of every other pixel's.
///
/// Derived purely from the base seed and the pixel index, so the rendered
/// image is identical for a given seed no matter how rayon schedules pixels.
#[inline]
fn pixel_rng(seed: u64, pixel_index: usize) -> Rng {
    Rng::seed_from(splitmix64(
        seed ^ (pixel_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
    ))
}

/// Render the harmonic solution over the full canvas.
///
/// Pixels are distributed across the rayon pool; each runs its `num_paths`
/// walks sequentially on its own generator, and the ordered collect keeps the
/// buffer row-major. Observer events fire from worker threads, so `observer`
/// must tolerate concurrent calls (the atomic `StatsObserver` does).
pub fn render<D, G, O>(
    domain: &D,
    g: &G,
    params: RenderParams,
    observer: &O,
) -> Result<ImageBuffer, RasterError>
where
    D: Domain,
    G: BoundaryDirichlet,
    O: WalkObserver,
{
    let budget = WalkBudget::new(params.epsilon, params.max_steps);
    let width = params.width;
    let height = params.height;

    let cells: Vec<f32> = (0..width * height)
        .into_par_iter()
        .map(|index| {
            let row = index / width;
            let column = index % width;
            let mut rng = pixel_rng(params.seed, index);
            let query = sample_point(column, row, width, height);
            estimate_laplace_dirichlet(
                domain,
                g,
                budget,
                params.num_paths,
                &mut rng,
                query,
                observer,
            )
        })
        .collect();

    ImageBuffer::from_vec(width, height, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wos2d::{BoundaryDirichletFn, NoopObserver, UnitSquare};

    #[test]
    fn pixel_mapping_matches_contract() {
        // 4×4 canvas: column 0 maps to sx = 0.125, row 0 (top) to sy = 0.875.
        let p = sample_point(0, 0, 4, 4);
        assert!((p.x - 0.125).abs() < 1e-6);
        assert!((p.y - 0.875).abs() < 1e-6);

        let p = sample_point(3, 3, 4, 4);
        assert!((p.x - 0.875).abs() < 1e-6);
        assert!((p.y - 0.125).abs() < 1e-6);

        // Center of a 2×2 canvas straddles the domain center.
        let p = sample_point(0, 1, 2, 2);
        assert!((p.x - 0.25).abs() < 1e-6);
        assert!((p.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn render_is_deterministic_for_a_seed() {
        let domain = UnitSquare;
        let g = BoundaryDirichletFn::new(|p: Vec2| p.x * p.x - p.y * p.y);
        let params = RenderParams {
            width: 8,
            height: 8,
            num_paths: 4,
            epsilon: 1e-2,
            max_steps: 64,
            seed: 31,
        };
        let a = render(&domain, &g, params, &NoopObserver).expect("render");
        let b = render(&domain, &g, params, &NoopObserver).expect("render");
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn render_reproduces_the_saddle_coarsely() {
        let domain = UnitSquare;
        let g = BoundaryDirichletFn::new(|p: Vec2| p.x * p.x - p.y * p.y);
        let params = RenderParams {
            width: 4,
            height: 4,
            num_paths: 2_000,
            epsilon: 1e-3,
            max_steps: 128,
            seed: 7,
        };
        let image = render(&domain, &g, params, &NoopObserver).expect("render");
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 4);
        for row in 0..4 {
            for column in 0..4 {
                let p = sample_point(column, row, 4, 4);
                let exact = p.x * p.x - p.y * p.y;
                let got = image.get(column, row);
                assert!(
                    (got - exact).abs() < 0.1,
                    "pixel ({column},{row}): got {got}, want ≈{exact}"
                );
            }
        }
    }
}
