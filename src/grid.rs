use crate::error::GridError;
use crate::geometry::Point;

/// Width and height of a tile in world units
pub const TILE_SIZE: f32 = 32.0;

/// Tile codes as stored in level data: 0=void, 1=wall, 2=floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Void = 0,
    Wall = 1,
    Floor = 2,
}

impl Tile {
    pub fn from_code(code: u8) -> Result<Tile, GridError> {
        match code {
            0 => Ok(Tile::Void),
            1 => Ok(Tile::Wall),
            2 => Ok(Tile::Floor),
            other => Err(GridError::UnknownCode(other)),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Only floor is traversable and lets light through
    pub fn is_floor(self) -> bool {
        self == Tile::Floor
    }

    fn from_char(ch: char) -> Option<Tile> {
        match ch {
            '#' | '■' => Some(Tile::Wall),
            '.' | '□' => Some(Tile::Floor),
            ' ' => Some(Tile::Void),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Tile::Void => ' ',
            Tile::Wall => '#',
            Tile::Floor => '.',
        }
    }
}

/// Static tile map of a loaded level.
/// Tiles are addressed by (u, v) = (column, row).
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid where every tile is `fill`
    pub fn filled(width: i32, height: i32, fill: Tile) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        TileGrid {
            width,
            height,
            tiles: vec![fill; (width * height) as usize],
        }
    }

    /// Create a grid from a flat row-major array of tile codes
    pub fn from_codes(width: i32, height: i32, codes: &[u8]) -> Result<Self, GridError> {
        let width = width.max(0);
        let height = height.max(0);
        let expected = (width * height) as usize;
        if codes.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: codes.len(),
            });
        }

        let tiles = codes
            .iter()
            .map(|&code| Tile::from_code(code))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TileGrid {
            width,
            height,
            tiles,
        })
    }

    /// Parse an ASCII layout: `#` wall, `.` floor, space void.
    /// Empty leading and trailing lines are ignored. A line of spaces is a row
    /// of void tiles, so `to_ascii` output always parses back to the same grid.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .skip_while(|line| line.is_empty())
            .collect();
        let end = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map(|i| i + 1)
            .unwrap_or(0);

        Self::from_rows(&lines[..end])
    }

    /// Build a grid from one string per row, every row the same width
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        if rows.is_empty() {
            return Err(GridError::Empty);
        }

        let width = rows[0].as_ref().chars().count();
        let mut tiles = Vec::with_capacity(width * rows.len());

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let actual = line.chars().count();
            if actual != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    actual,
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(GridError::UnknownTile { row, col, ch })?;
                tiles.push(tile);
            }
        }

        Ok(TileGrid {
            width: width as i32,
            height: rows.len() as i32,
            tiles,
        })
    }

    /// Render back to the ASCII layout accepted by `from_ascii`
    pub fn to_ascii(&self) -> String {
        let mut result = String::new();
        for v in 0..self.height {
            for u in 0..self.width {
                result.push(self.tile_at(u, v).to_char());
            }
            result.push('\n');
        }
        result
    }

    pub fn in_bounds(&self, u: i32, v: i32) -> bool {
        u >= 0 && u < self.width && v >= 0 && v < self.height
    }

    /// Tile at (u, v). Anything outside the grid reads as wall.
    pub fn tile_at(&self, u: i32, v: i32) -> Tile {
        if !self.in_bounds(u, v) {
            return Tile::Wall;
        }
        self.tiles[self.get_id(u, v)]
    }

    /// Set tile at (u, v); ignored outside the grid
    pub fn set_tile(&mut self, u: i32, v: i32, tile: Tile) {
        if self.in_bounds(u, v) {
            let id = self.get_id(u, v);
            self.tiles[id] = tile;
        }
    }

    pub fn is_floor(&self, u: i32, v: i32) -> bool {
        self.tile_at(u, v).is_floor()
    }

    /// Anything that is not floor blocks light and movement
    pub fn is_wall_at_uv(&self, u: i32, v: i32) -> bool {
        !self.is_floor(u, v)
    }

    pub fn is_wall_at_xy(&self, x: f32, y: f32) -> bool {
        let (u, v) = world_to_tile(Point::new(x, y));
        self.is_wall_at_uv(u, v)
    }

    /// Convert (u, v) to a flat index. Caller checks bounds.
    pub fn get_id(&self, u: i32, v: i32) -> usize {
        (u + v * self.width) as usize
    }

    /// Convert a flat index back to (u, v)
    pub fn get_coords(&self, id: usize) -> (i32, i32) {
        let id = id as i32;
        (id % self.width, id / self.width)
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_floor()).count()
    }

    /// World-space size of the whole map
    pub fn world_size(&self) -> (f32, f32) {
        (self.width as f32 * TILE_SIZE, self.height as f32 * TILE_SIZE)
    }
}

/// Tile containing a world point
pub fn world_to_tile(p: Point) -> (i32, i32) {
    ((p.x / TILE_SIZE).floor() as i32, (p.y / TILE_SIZE).floor() as i32)
}

/// Center of tile (u, v) in world coordinates
pub fn tile_center(u: i32, v: i32) -> Point {
    Point::new(
        u as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        v as f32 * TILE_SIZE + TILE_SIZE / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let grid = TileGrid::filled(3, 3, Tile::Floor);
        assert_eq!(grid.tile_at(-1, 0), Tile::Wall);
        assert_eq!(grid.tile_at(3, 0), Tile::Wall);
        assert_eq!(grid.tile_at(0, -1), Tile::Wall);
        assert_eq!(grid.tile_at(0, 3), Tile::Wall);
        assert!(grid.is_wall_at_xy(-0.5, 10.0));
        assert!(!grid.is_wall_at_xy(0.5, 10.0));
    }

    #[test]
    fn test_void_blocks_like_wall() {
        let grid = TileGrid::from_codes(3, 1, &[0, 2, 1]).unwrap();
        assert!(grid.is_wall_at_uv(0, 0));
        assert!(!grid.is_wall_at_uv(1, 0));
        assert!(grid.is_wall_at_uv(2, 0));
    }

    #[test]
    fn test_from_codes_rejects_bad_input() {
        assert!(matches!(
            TileGrid::from_codes(2, 2, &[2, 2, 2]),
            Err(GridError::SizeMismatch { expected: 4, actual: 3 })
        ));
        assert!(matches!(
            TileGrid::from_codes(1, 1, &[7]),
            Err(GridError::UnknownCode(7))
        ));
    }

    #[test]
    fn test_ascii_round_trip() {
        let text = "###\n#.#\n# #\n";
        let grid = TileGrid::from_ascii(text).unwrap();
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 3);
        assert_eq!(grid.tile_at(1, 1), Tile::Floor);
        assert_eq!(grid.tile_at(1, 2), Tile::Void);
        assert_eq!(grid.to_ascii(), text);
        assert_eq!(grid.floor_count(), 1);
    }

    #[test]
    fn test_void_rows_survive_round_trip() {
        let mut grid = TileGrid::filled(3, 3, Tile::Void);
        grid.set_tile(1, 1, Tile::Floor);
        grid.set_tile(1, 2, Tile::Wall);
        let text = grid.to_ascii();
        assert!(text.starts_with("   \n"));

        let parsed = TileGrid::from_ascii(&text).unwrap();
        assert_eq!(parsed, grid);

        let crlf = TileGrid::from_ascii("   \r\n . \r\n # \r\n").unwrap();
        assert_eq!(crlf, grid);
    }

    #[test]
    fn test_from_codes_clamps_negative_size() {
        let grid = TileGrid::from_codes(-2, 3, &[]).unwrap();
        assert_eq!(grid.width, 0);
        assert_eq!(grid.height, 3);
        assert!(!grid.in_bounds(0, 0));
        assert_eq!(grid.tile_at(0, 0), Tile::Wall);
        assert_eq!(grid.floor_count(), 0);
    }

    #[test]
    fn test_ascii_errors() {
        assert!(matches!(TileGrid::from_ascii("\n\n"), Err(GridError::Empty)));
        assert!(matches!(
            TileGrid::from_ascii("###\n##\n"),
            Err(GridError::Ragged { row: 1, expected: 3, actual: 2 })
        ));
        assert!(matches!(
            TileGrid::from_ascii("#x#"),
            Err(GridError::UnknownTile { row: 0, col: 1, ch: 'x' })
        ));
    }

    #[test]
    fn test_world_tile_conversion() {
        assert_eq!(world_to_tile(Point::new(33.0, 95.0)), (1, 2));
        assert_eq!(world_to_tile(Point::new(-1.0, 0.0)), (-1, 0));
        assert_eq!(tile_center(1, 2), Point::new(48.0, 80.0));
    }
}
