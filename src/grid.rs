use glam::Vec2;

use crate::math::{in_out_quad, lerp, out_sine};
use crate::types::DotInstance;

/// Grid distance (in cells) a ripple spreads from the dot under the pointer
pub const CLUSTER_RADIUS: f32 = 1.75;
/// Pointer must be this close (logical px) to a dot centre to start a ripple
pub const HIT_RADIUS: f32 = 20.0;
pub const COVERAGE_FACTOR: f32 = 0.75;
pub const WRAPPER_OPACITY: f32 = 0.8;
pub const REST_OPACITY: f32 = 0.4;
pub const SETTLED_OPACITY: f32 = 0.25;
pub const RISE_SECONDS: f32 = 0.2;
pub const FALL_SECONDS: f32 = 0.4;

const MIN_BASE_WIDTH: f32 = 320.0;
const MIN_BASE_HEIGHT: f32 = 480.0;
const MIN_DOTS: f32 = 144.0;
const MIN_COLUMNS: u32 = 14;
const MIN_ROWS: u32 = 16;

/// Dots per square pixel for the given base width
fn density(base_width: f32) -> f32 {
    if base_width < 640.0 {
        0.003
    } else if base_width < 1024.0 {
        0.00105
    } else if base_width < 1600.0 {
        0.00102
    } else {
        0.0003
    }
}

/// Layout of the backdrop grid, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    pub columns: u32,
    pub rows: u32,
    pub gap: f32,
    pub dot_size: f32,
    pub width: f32,
    pub height: f32,
}

impl GridSettings {
    pub fn compute(viewport_width: f32, viewport_height: f32) -> Self {
        let base_width = viewport_width.max(MIN_BASE_WIDTH);
        let base_height = viewport_height.max(MIN_BASE_HEIGHT);

        let effective_width = base_width * COVERAGE_FACTOR;
        let effective_height = base_height * COVERAGE_FACTOR;
        let total_dots =
            (effective_width * effective_height * density(base_width)).round().max(MIN_DOTS);
        let aspect = effective_width / effective_height;

        let columns = ((total_dots * aspect).sqrt().round() as u32).max(MIN_COLUMNS);
        let rows = ((total_dots / columns as f32).round() as u32).max(MIN_ROWS);

        let mut cell = effective_width / columns as f32;
        let mut gap_raw = cell * 0.45;
        let mut dot_raw = cell * 0.09;

        let grid_height = rows as f32 * cell;
        if grid_height < effective_height {
            let scale = effective_height / grid_height;
            cell *= scale;
            gap_raw *= scale;
            dot_raw *= scale;
        }

        let gap = gap_raw.round().clamp(4.0, 28.0);
        let dot_size = dot_raw.round().clamp(3.0, 12.0);

        let width_with_gaps = columns as f32 * cell + gap * (columns - 1) as f32;
        let height_with_gaps = rows as f32 * cell + gap * (rows - 1) as f32;

        Self {
            columns,
            rows,
            gap,
            dot_size,
            width: width_with_gaps.round().max(effective_width.round()),
            height: height_with_gaps.round().max(effective_height.round()),
        }
    }

    pub fn dot_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Column and row of a dot index
    pub fn cell_of(&self, index: usize) -> (i64, i64) {
        let columns = self.columns as usize;
        ((index % columns) as i64, (index / columns) as i64)
    }

    fn track_width(&self) -> f32 {
        (self.width - self.gap * (self.columns - 1) as f32) / self.columns as f32
    }

    fn track_height(&self) -> f32 {
        (self.height - self.gap * (self.rows - 1) as f32) / self.rows as f32
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self::compute(1280.0, 720.0)
    }
}

/// Animated properties of one dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotPose {
    pub scale: f32,
    pub translate_y: f32,
    pub opacity: f32,
}

impl DotPose {
    pub const REST: DotPose = DotPose {
        scale: 1.0,
        translate_y: 0.0,
        opacity: REST_OPACITY,
    };

    pub const SETTLED: DotPose = DotPose {
        scale: 1.0,
        translate_y: 0.0,
        opacity: SETTLED_OPACITY,
    };

    fn peak(strength: f32) -> Self {
        Self {
            scale: 1.1 + 0.05 * strength,
            translate_y: 0.5 * strength,
            opacity: 1.0,
        }
    }

    fn mix(from: DotPose, to: DotPose, t: f32) -> Self {
        Self {
            scale: lerp(from.scale, to.scale, t),
            translate_y: lerp(from.translate_y, to.translate_y, t),
            opacity: lerp(from.opacity, to.opacity, t),
        }
    }
}

/// Two-stage tween: rise to the peak, then fall back to the settled pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    from: DotPose,
    peak: DotPose,
    elapsed: f32,
}

impl Ripple {
    pub fn new(from: DotPose, strength: f32) -> Self {
        Self {
            from,
            peak: DotPose::peak(strength),
            elapsed: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= RISE_SECONDS + FALL_SECONDS
    }

    pub fn pose(&self) -> DotPose {
        if self.is_finished() {
            return DotPose::SETTLED;
        }
        if self.elapsed < RISE_SECONDS {
            DotPose::mix(self.from, self.peak, out_sine(self.elapsed / RISE_SECONDS))
        } else {
            let t = (self.elapsed - RISE_SECONDS) / FALL_SECONDS;
            DotPose::mix(self.peak, DotPose::SETTLED, in_out_quad(t))
        }
    }

    fn advance(&mut self, delta: f32) {
        self.elapsed += delta;
    }
}

#[derive(Debug, Clone, Copy)]
struct Dot {
    pose: DotPose,
    ripple: Option<Ripple>,
}

impl Dot {
    const AT_REST: Dot = Dot {
        pose: DotPose::REST,
        ripple: None,
    };
}

/// The "water drop" dot backdrop: a centred grid of dots that ripple
/// around the pointer.
#[derive(Debug, Clone)]
pub struct DotGrid {
    viewport: Vec2,
    settings: GridSettings,
    dots: Vec<Dot>,
}

impl DotGrid {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let settings = GridSettings::compute(viewport_width, viewport_height);
        Self {
            viewport: Vec2::new(viewport_width, viewport_height),
            settings,
            dots: vec![Dot::AT_REST; settings.dot_count()],
        }
    }

    /// Re-layout for a new viewport. All dots return to rest.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        *self = Self::new(viewport_width, viewport_height);
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Centre of a dot's grid cell in viewport coordinates, before animation
    pub fn dot_center(&self, index: usize) -> Vec2 {
        let s = &self.settings;
        let (column, row) = s.cell_of(index);
        let origin = (self.viewport - Vec2::new(s.width, s.height)) * 0.5;
        let track_w = s.track_width();
        let track_h = s.track_height();
        origin
            + Vec2::new(
                column as f32 * (track_w + s.gap) + track_w * 0.5,
                row as f32 * (track_h + s.gap) + track_h * 0.5,
            )
    }

    /// Index and distance of the dot centre closest to `point`
    pub fn nearest_dot(&self, point: Vec2) -> Option<(usize, f32)> {
        (0..self.dots.len())
            .map(|index| (index, self.dot_center(index).distance(point)))
            .fold(None, |best, (index, dist)| match best {
                Some((_, best_dist)) if best_dist <= dist => best,
                _ => Some((index, dist)),
            })
    }

    /// Dots within the cluster radius of `index`, with their ripple strength
    pub fn cluster(&self, index: usize) -> Vec<(usize, f32)> {
        let s = &self.settings;
        let (cx, cy) = s.cell_of(index);
        let reach = CLUSTER_RADIUS.floor() as i64;
        let mut cluster = Vec::new();

        for y in (cy - reach).max(0)..=(cy + reach).min(s.rows as i64 - 1) {
            for x in (cx - reach).max(0)..=(cx + reach).min(s.columns as i64 - 1) {
                let dist = (((x - cx).pow(2) + (y - cy).pow(2)) as f32).sqrt();
                if dist <= CLUSTER_RADIUS {
                    let strength = 1.0 - dist / (CLUSTER_RADIUS + 0.5);
                    cluster.push(((y * s.columns as i64 + x) as usize, strength));
                }
            }
        }
        cluster
    }

    /// Pointer or touch moved to `point` (logical px). Returns the number of dots set rippling.
    pub fn pointer_moved(&mut self, point: Vec2) -> usize {
        let Some((closest, dist)) = self.nearest_dot(point) else {
            return 0;
        };
        if dist > HIT_RADIUS {
            return 0;
        }

        let cluster = self.cluster(closest);
        for &(index, strength) in &cluster {
            let dot = &mut self.dots[index];
            dot.ripple = Some(Ripple::new(dot.pose, strength));
        }
        cluster.len()
    }

    /// Step every running ripple by `delta` seconds
    pub fn advance(&mut self, delta: f32) {
        for dot in &mut self.dots {
            if let Some(ripple) = dot.ripple.as_mut() {
                ripple.advance(delta);
                dot.pose = ripple.pose();
                if ripple.is_finished() {
                    dot.pose = DotPose::SETTLED;
                    dot.ripple = None;
                }
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.dots.iter().any(|dot| dot.ripple.is_some())
    }

    pub fn pose(&self, index: usize) -> Option<DotPose> {
        self.dots.get(index).map(|dot| dot.pose)
    }

    /// GPU instances in physical pixels
    pub fn instances(&self, scale_factor: f32) -> Vec<DotInstance> {
        let radius = self.settings.dot_size * 0.5;
        self.dots
            .iter()
            .enumerate()
            .map(|(index, dot)| {
                let center = self.dot_center(index) + Vec2::new(0.0, dot.pose.translate_y);
                DotInstance {
                    center: (center * scale_factor).to_array(),
                    radius: radius * dot.pose.scale * scale_factor,
                    opacity: dot.pose.opacity * WRAPPER_OPACITY,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_desktop() {
        let s = GridSettings::compute(1280.0, 720.0);
        assert_eq!((s.columns, s.rows), (31, 17));
        assert_eq!((s.gap, s.dot_size), (14.0, 3.0));
        assert_eq!((s.width, s.height), (1405.0, 764.0));
    }

    #[test]
    fn test_layout_phone() {
        let s = GridSettings::compute(375.0, 667.0);
        assert_eq!((s.columns, s.rows), (15, 28));
        assert_eq!((s.gap, s.dot_size), (8.0, 3.0));
        assert_eq!((s.width, s.height), (393.0, 741.0));
    }

    #[test]
    fn test_layout_tiny_viewport_uses_minimums() {
        let s = GridSettings::compute(100.0, 100.0);
        assert!(s.columns >= 14);
        assert!(s.rows >= 16);
        assert_eq!(s, GridSettings::compute(320.0, 480.0));
    }

    #[test]
    fn test_grid_is_centred() {
        let grid = DotGrid::new(1280.0, 720.0);
        let first = grid.dot_center(0);
        let last = grid.dot_center(grid.len() - 1);
        let mid = (first + last) * 0.5;
        assert!((mid - Vec2::new(640.0, 360.0)).length() < 1e-3);
    }

    #[test]
    fn test_cluster_of_interior_dot() {
        let grid = DotGrid::new(1280.0, 720.0);
        let columns = grid.settings().columns as usize;
        let center = 5 * columns + 5;
        let cluster = grid.cluster(center);
        // 3x3 block: diagonal distance sqrt(2) is inside 1.75, distance 2 is not
        assert_eq!(cluster.len(), 9);
        let own = cluster.iter().find(|(i, _)| *i == center).unwrap();
        assert_eq!(own.1, 1.0);
    }

    #[test]
    fn test_cluster_clipped_at_corner() {
        let grid = DotGrid::new(1280.0, 720.0);
        assert_eq!(grid.cluster(0).len(), 4);
    }

    #[test]
    fn test_ripple_peaks_then_settles() {
        let mut ripple = Ripple::new(DotPose::REST, 1.0);
        ripple.advance(RISE_SECONDS);
        let peak = ripple.pose();
        assert!((peak.scale - 1.15).abs() < 1e-5);
        assert!((peak.opacity - 1.0).abs() < 1e-5);

        ripple.advance(FALL_SECONDS);
        assert!(ripple.is_finished());
        assert_eq!(ripple.pose(), DotPose::SETTLED);
    }
}
