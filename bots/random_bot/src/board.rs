use gtp::{column_letter, Color, IllegalMove, Vertex};

/// Which points are occupied, and by whom.
///
/// There are no captures, a stone stays where it was placed until the board is cleared.
#[derive(Clone, Debug)]
pub struct Board {
    size: u8,
    /// Row-major, starting at the top left.
    points: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: u8) -> Self {
        Self {
            size,
            points: vec![None; usize::from(size) * usize::from(size)],
        }
    }

    pub fn clear(&mut self) {
        self.points.fill(None);
    }

    fn index(&self, vertex: Vertex) -> usize {
        usize::from(vertex.y) * usize::from(self.size) + usize::from(vertex.x)
    }

    pub fn get(&self, vertex: Vertex) -> Option<Color> {
        self.points[self.index(vertex)]
    }

    pub fn place(&mut self, color: Color, vertex: Vertex) -> Result<(), IllegalMove> {
        if !vertex.is_on_board(self.size) {
            return Err(IllegalMove::Other(format!(
                "({}, {}) is not on the board",
                vertex.x, vertex.y
            )));
        }
        let idx = self.index(vertex);
        if self.points[idx].is_some() {
            return Err(IllegalMove::Occupied { vertex });
        }
        self.points[idx] = Some(color);
        Ok(())
    }

    pub fn empty_points(&self) -> Vec<Vertex> {
        let mut empty = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let vertex = Vertex { x, y };
                if self.get(vertex).is_none() {
                    empty.push(vertex);
                }
            }
        }
        empty
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for x in 0..self.size {
            write!(f, " {}", column_letter(x))?;
        }
        for y in 0..self.size {
            write!(f, "\n{:>3}", self.size - y)?;
            for x in 0..self.size {
                let symbol = match self.get(Vertex { x, y }) {
                    None => '.',
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                };
                write!(f, " {}", symbol)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_and_clear() {
        let mut board = Board::new(3);
        assert_eq!(board.empty_points().len(), 9);
        board.place(Color::Black, Vertex::new(1, 1)).unwrap();
        assert_eq!(board.get(Vertex::new(1, 1)), Some(Color::Black));
        assert_eq!(
            board.place(Color::White, Vertex::new(1, 1)),
            Err(IllegalMove::Occupied {
                vertex: Vertex::new(1, 1)
            })
        );
        assert!(board.place(Color::White, Vertex::new(3, 0)).is_err());
        assert_eq!(board.empty_points().len(), 8);
        board.clear();
        assert_eq!(board.empty_points().len(), 9);
    }

    #[test]
    fn render() {
        let mut board = Board::new(3);
        board.place(Color::Black, Vertex::new(0, 2)).unwrap();
        board.place(Color::White, Vertex::new(2, 0)).unwrap();
        assert_eq!(
            board.to_string(),
            "    A B C\n  3 . . O\n  2 . . .\n  1 X . ."
        );
    }
}
