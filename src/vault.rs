use std::{collections::BTreeMap, fmt::Display};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Key(char),
    Door(char),
}

impl TryFrom<char> for Tile {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '#' => Ok(Self::Wall),
            // Entrances are floor, their positions are kept by the map.
            '.' | '@' => Ok(Self::Floor),
            c if c.is_ascii_lowercase() => Ok(Self::Key(c)),
            c if c.is_ascii_uppercase() => Ok(Self::Door(c)),
            other => Err(other),
        }
    }
}

impl Tile {
    pub fn can_pass(&self) -> bool {
        *self != Tile::Wall
    }

    pub fn key_of_door(&self) -> Option<char> {
        if let Self::Door(c) = self {
            Some(c.to_ascii_lowercase())
        } else {
            None
        }
    }

    fn to_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Key(c) | Tile::Door(c) => c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];

        &ALL_DIRECTIONS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn c(&self) -> usize {
        self.c
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::North if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::East => Some(Self::new(self.r, self.c + 1)),
            Direction::South => Some(Self::new(self.r + 1, self.c)),
            Direction::West if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

/// Rectangular vault with its entrances and the positions of every key.
#[derive(Debug, Clone)]
pub struct VaultMap {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: usize,
    entrances: Vec<Position>,
    keys: BTreeMap<char, Position>,
}

impl Display for VaultMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.row_n {
            let row_str = (0..self.col_n)
                .map(|c| {
                    let pos = Position::new(r, c);
                    if self.entrances.contains(&pos) {
                        '@'
                    } else {
                        self.tiles[r * self.col_n + c].to_char()
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row_str)?;
        }

        Ok(())
    }
}

impl VaultMap {
    pub fn try_from_lines<'a, I: Iterator<Item = &'a str>>(iter: I) -> Result<Self, Error> {
        let mut builder = VaultMapBuilder::new();
        for line in iter {
            builder.add_row(line)?;
        }

        builder.build()
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    /// Entrances in row-major order.
    pub fn entrances(&self) -> &[Position] {
        &self.entrances
    }

    /// Keys in letter order.
    pub fn keys(&self) -> &BTreeMap<char, Position> {
        &self.keys
    }

    pub fn tile(&self, pos: &Position) -> Option<&Tile> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get(ind))
    }

    pub fn can_pass(&self, pos: &Position) -> bool {
        self.tile(pos).is_some_and(|tile| tile.can_pass())
    }

    /// Turn the only entrance and its open 3x3 surroundings into four walled-off entrances.
    ///
    /// ```text
    /// ...     @#@
    /// .@.  => ###
    /// ...     @#@
    /// ```
    pub fn split_entrance(&mut self) -> Result<(), Error> {
        let &[center] = &self.entrances[..] else {
            return Err(Error::WrongEntranceCount(self.entrances.len()));
        };
        if center.r() == 0 || center.c() == 0 {
            return Err(Error::CannotSplitEntrance(center));
        }

        let (top, left) = (center.r() - 1, center.c() - 1);
        let surroundings_are_floor = (top..(top + 3))
            .flat_map(|r| (left..(left + 3)).map(move |c| Position::new(r, c)))
            .all(|pos| self.tile(&pos).is_some_and(|tile| *tile == Tile::Floor));
        if !surroundings_are_floor {
            return Err(Error::CannotSplitEntrance(center));
        }

        for pos in std::iter::once(center).chain(
            Direction::all_dirs()
                .iter()
                .flat_map(|dir| center.neighbor(*dir)),
        ) {
            if let Some(tile_mut) = self.tile_mut(&pos) {
                *tile_mut = Tile::Wall;
            }
        }
        self.entrances = vec![
            Position::new(top, left),
            Position::new(top, left + 2),
            Position::new(top + 2, left),
            Position::new(top + 2, left + 2),
        ];

        Ok(())
    }

    fn tile_mut(&mut self, pos: &Position) -> Option<&mut Tile> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get_mut(ind))
    }

    pub(crate) fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if pos.r < self.row_n && pos.c < self.col_n {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct VaultMapBuilder {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: Option<usize>,
    entrances: Vec<Position>,
    keys: BTreeMap<char, Position>,
}

impl Default for VaultMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultMapBuilder {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            row_n: 0,
            col_n: None,
            entrances: Vec::new(),
            keys: BTreeMap::new(),
        }
    }

    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let this_col_n = text.chars().count();
        let col_n = *self.col_n.get_or_insert(this_col_n);
        if col_n != this_col_n {
            return Err(Error::InconsistentRow(self.row_n, col_n, this_col_n));
        }

        for (ind, c) in text.chars().enumerate() {
            let pos = Position::new(self.row_n, ind);
            let tile = Tile::try_from(c).map_err(|c| Error::InvalidCharForMap(c, pos))?;
            match tile {
                Tile::Key(k) => {
                    if let Some(last_pos) = self.keys.insert(k, pos) {
                        return Err(Error::DuplicateKey(k, last_pos, pos));
                    }
                }
                Tile::Floor if c == '@' => self.entrances.push(pos),
                _ => (),
            }
            self.tiles.push(tile);
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<VaultMap, Error> {
        if self.row_n == 0 || self.col_n == Some(0) {
            return Err(Error::EmptyMap);
        }

        match self.entrances.len() {
            1 | crate::COLLECTOR_N => (),
            n => return Err(Error::WrongEntranceCount(n)),
        }

        Ok(VaultMap {
            tiles: self.tiles,
            row_n: self.row_n,
            col_n: self.col_n.unwrap_or(0),
            entrances: self.entrances,
            keys: self.keys,
        })
    }
}
