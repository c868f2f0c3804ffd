// THEORY:
// The `PointSetBatch` is the input container of the whole engine: N independent point
// sets, each stored with the same fixed capacity M. It is the bridge between raw
// caller data (nested rows, flat `[set][point][x|y]` buffers, text files) and the
// kernels, which assume every row is well formed.
//
// Key architectural principles:
// 1.  **Rectangular Storage**: Points live in one flat, row-major `Vec<Point>`. Row
//     `s` occupies `s * M .. (s + 1) * M`. There is no per-row "valid count"; every
//     row conceptually holds exactly M points.
// 2.  **Validation at the Door**: This is the only place errors are raised for
//     malformed input. Empty batches, empty rows, ragged rows and non-finite
//     coordinates are rejected here, so the hull and calipers kernels never have to
//     consider them.
// 3.  **Immutability**: Once built, a batch is never mutated. The kernels borrow it
//     (host) or take a bulk copy of it (device).

use crate::core_modules::error::{GeometryError, Result};
use crate::core_modules::point::point::Point;

/// N point sets of fixed capacity M, indexed `[set][point]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSetBatch {
    /// Number of point sets (rows).
    sets: usize,
    /// Points per set (M).
    capacity: usize,
    /// Row-major point storage, `sets * capacity` long.
    points: Vec<Point>,
}

impl PointSetBatch {
    /// Builds a batch from one `Vec<Point>` per set. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Point>>) -> Result<Self> {
        let first = rows.first().ok_or(GeometryError::EmptyBatch)?;
        let capacity = first.len();
        if capacity == 0 {
            return Err(GeometryError::EmptyPointSet);
        }

        let mut points = Vec::with_capacity(rows.len() * capacity);
        for (set, row) in rows.iter().enumerate() {
            if row.len() != capacity {
                return Err(GeometryError::RaggedBatch {
                    set,
                    expected: capacity,
                    found: row.len(),
                });
            }
            points.extend_from_slice(row);
        }

        Self::validated(rows.len(), capacity, points)
    }

    /// Builds a batch from a flat `[set][point][x|y]` coordinate buffer.
    pub fn from_flat(data: &[f64], sets: usize, capacity: usize) -> Result<Self> {
        if sets == 0 {
            return Err(GeometryError::EmptyBatch);
        }
        if capacity == 0 {
            return Err(GeometryError::EmptyPointSet);
        }
        if data.len() != sets * capacity * 2 {
            return Err(GeometryError::ShapeMismatch {
                len: data.len(),
                sets,
                capacity,
            });
        }

        let points = data
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
            .collect();
        Self::validated(sets, capacity, points)
    }

    /// Parses whitespace separated `x y` lines; blank lines separate point sets.
    ///
    /// Sets shorter than the longest one are padded by repeating their first point.
    /// A repeated point never changes the hull, so the padding is invisible in the
    /// results apart from the batch capacity.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() {
                if !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                }
                continue;
            }

            let mut fields = line.split_whitespace();
            let mut coordinate = |name: &str| -> Result<f64> {
                let field = fields.next().ok_or_else(|| GeometryError::Parse {
                    line: line_no + 1,
                    reason: format!("missing {name} coordinate"),
                })?;
                field.parse::<f64>().map_err(|e| GeometryError::Parse {
                    line: line_no + 1,
                    reason: format!("bad {name} coordinate '{field}': {e}"),
                })
            };
            let x = coordinate("x")?;
            let y = coordinate("y")?;
            current.push(Point::new(x, y));
        }
        if !current.is_empty() {
            rows.push(current);
        }

        let capacity = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            let pad = row[0];
            row.resize(capacity, pad);
        }
        Self::from_rows(rows)
    }

    fn validated(sets: usize, capacity: usize, points: Vec<Point>) -> Result<Self> {
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate {
                set: bad / capacity,
                point: bad % capacity,
            });
        }
        Ok(Self {
            sets,
            capacity,
            points,
        })
    }

    pub fn sets(&self) -> usize {
        self.sets
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All M points of one set, in their original order.
    pub fn row(&self, set: usize) -> Result<&[Point]> {
        if set >= self.sets {
            return Err(GeometryError::SetOutOfRange {
                set,
                sets: self.sets,
            });
        }
        let start = set * self.capacity;
        Ok(&self.points[start..start + self.capacity])
    }

    /// One point, or `None` when either index is out of range.
    pub fn point(&self, set: usize, index: usize) -> Option<Point> {
        self.row(set).ok()?.get(index).copied()
    }

    /// Iterates over every row in batch order.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Point> {
        self.points.chunks_exact(self.capacity)
    }

    /// The flat row-major storage, used for bulk copies.
    pub fn as_points(&self) -> &[Point] {
        &self.points
    }

    /// Appends the rows of `other` after the rows of `self`.
    pub fn concat(&self, other: &PointSetBatch) -> Result<Self> {
        if other.capacity != self.capacity {
            return Err(GeometryError::RaggedBatch {
                set: self.sets,
                expected: self.capacity,
                found: other.capacity,
            });
        }
        let mut points = Vec::with_capacity(self.points.len() + other.points.len());
        points.extend_from_slice(&self.points);
        points.extend_from_slice(&other.points);
        Ok(Self {
            sets: self.sets + other.sets,
            capacity: self.capacity,
            points,
        })
    }
}
