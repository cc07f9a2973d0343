//! Top-down fog of war

use glam::{Vec2, Vec3};
use hookfall_core::Color;
use tracing::trace;

use super::FanMesh;

/// Lit cells must be at least this bright for an entity to show
const DEFAULT_THRESHOLD: f32 = 0.1;

/// World-space grid of fog colors, black where nothing has been seen
#[derive(Debug, Clone)]
pub struct FogGrid {
    /// World XZ of the grid's minimum corner
    origin: Vec2,
    cell_size: f32,
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl FogGrid {
    /// Grid covering `width * height` cells starting at `origin` on the XZ plane
    pub fn new(origin: Vec2, cell_size: f32, width: usize, height: usize) -> Self {
        Self {
            origin,
            cell_size: cell_size.max(f32::EPSILON),
            width,
            height,
            cells: vec![Color::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fog everything again
    pub fn clear(&mut self) {
        self.cells.fill(Color::BLACK);
    }

    /// Index of the cell under a world position
    pub fn cell_index(&self, position: Vec3) -> Option<usize> {
        let local = (Vec2::new(position.x, position.z) - self.origin) / self.cell_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (col, row) = (local.x as usize, local.y as usize);
        (col < self.width && row < self.height).then_some(row * self.width + col)
    }

    fn cell_centre(&self, col: usize, row: usize) -> Vec2 {
        self.origin + (Vec2::new(col as f32, row as f32) + 0.5) * self.cell_size
    }

    /// Light every cell whose centre falls inside `fan` placed at `fan_origin`
    pub fn reveal(&mut self, fan: &FanMesh, fan_origin: Vec3) {
        let reach = fan.reach() + self.cell_size;
        let centre = Vec2::new(fan_origin.x, fan_origin.z);
        let mut lit = 0usize;

        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.cell_centre(col, row);
                if cell.distance(centre) > reach {
                    continue;
                }
                let local = Vec3::new(cell.x - centre.x, 0.0, cell.y - centre.y);
                if fan.contains(local) {
                    self.cells[row * self.width + col] = Color::WHITE;
                    lit += 1;
                }
            }
        }
        trace!(lit, "fog revealed");
    }

    /// Fog color at a world position, black outside the grid
    pub fn sample(&self, position: Vec3) -> Color {
        self.cell_index(position)
            .map_or(Color::BLACK, |index| self.cells[index])
    }

    /// Whether the fog at `position` is at least `threshold` bright
    pub fn is_visible(&self, position: Vec3, threshold: f32) -> bool {
        self.sample(position).grayscale() >= threshold
    }
}

/// Visibility gate for entities drawn under the fog
#[derive(Debug, Clone)]
pub struct FogOfWar {
    pub grid: Option<FogGrid>,
    pub threshold: f32,
}

impl Default for FogOfWar {
    fn default() -> Self {
        Self {
            grid: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FogOfWar {
    pub fn new(grid: FogGrid) -> Self {
        Self {
            grid: Some(grid),
            ..Default::default()
        }
    }

    /// Everything is visible until a grid is attached
    pub fn is_visible(&self, position: Vec3) -> bool {
        self.grid
            .as_ref()
            .map_or(true, |grid| grid.is_visible(position, self.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::{FanConfig, VisibilityFan};
    use hookfall_core::OpenGround;

    fn grid() -> FogGrid {
        FogGrid::new(Vec2::new(-20.0, -20.0), 1.0, 40, 40)
    }

    #[test]
    fn starts_fogged() {
        let grid = grid();
        assert_eq!(grid.sample(Vec3::ZERO), Color::BLACK);
        assert!(!grid.is_visible(Vec3::ZERO, DEFAULT_THRESHOLD));
    }

    #[test]
    fn outside_grid_is_black() {
        let grid = grid();
        assert_eq!(grid.cell_index(Vec3::new(-25.0, 0.0, 0.0)), None);
        assert_eq!(grid.cell_index(Vec3::new(0.0, 0.0, 20.5)), None);
        assert_eq!(grid.sample(Vec3::new(100.0, 0.0, 0.0)), Color::BLACK);
    }

    #[test]
    fn reveal_lights_cells_in_range() {
        let mut grid = grid();
        let origin = Vec3::new(2.0, 1.0, 3.0);
        let fan = VisibilityFan::build(origin, Vec3::NEG_Z, &FanConfig::default(), &OpenGround::default());
        grid.reveal(&fan, origin);

        assert!(grid.is_visible(origin, DEFAULT_THRESHOLD));
        assert!(grid.is_visible(Vec3::new(7.0, 0.0, 3.0), DEFAULT_THRESHOLD));
        assert!(!grid.is_visible(Vec3::new(15.0, 0.0, 3.0), DEFAULT_THRESHOLD));

        grid.clear();
        assert!(!grid.is_visible(origin, DEFAULT_THRESHOLD));
    }

    #[test]
    fn no_grid_means_visible() {
        let fog = FogOfWar::default();
        assert!(fog.is_visible(Vec3::new(1000.0, 0.0, 1000.0)));

        let fog = FogOfWar::new(grid());
        assert!(!fog.is_visible(Vec3::ZERO));
    }
}
