// THEORY:
// The `Point` module is the most fundamental unit of the geometry engine. It is a
// "dumb" data container for a single 2-D coordinate pair plus the handful of vector
// operations every higher layer needs (difference, dot and cross products).
//
// Key architectural principles:
// 1.  **Plain Data**: A `Point` is `Copy` and immutable once it has been stored in a
//     batch. Points are always referred to by their original index inside their set;
//     nothing in the engine ever reorders them.
// 2.  **No Policy**: Orientation decisions (which side of an edge a point lies on)
//     live in the `orientation` module. This file only knows arithmetic.

pub mod point {
    pub type Coordinate = f64;

    /// A single 2-D point in a point set.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Point {
        /// The horizontal coordinate.
        pub x: Coordinate,
        /// The vertical coordinate (y grows upwards).
        pub y: Coordinate,
    }

    impl Point {
        pub const fn new(x: Coordinate, y: Coordinate) -> Self {
            Self { x, y }
        }

        /// Component-wise difference `self - other`, i.e. the vector from `other` to `self`.
        pub fn sub(&self, other: &Point) -> Point {
            Point::new(self.x - other.x, self.y - other.y)
        }

        /// The z component of the 2-D cross product `self × other`.
        pub fn cross(&self, other: &Point) -> Coordinate {
            self.x * other.y - self.y * other.x
        }

        pub fn dot(&self, other: &Point) -> Coordinate {
            self.x * other.x + self.y * other.y
        }

        pub fn is_finite(&self) -> bool {
            self.x.is_finite() && self.y.is_finite()
        }

        /// Direction of the vector, in radians, as given by `atan2(y, x)`.
        pub fn angle(&self) -> Coordinate {
            self.y.atan2(self.x)
        }
    }

    impl From<(Coordinate, Coordinate)> for Point {
        fn from((x, y): (Coordinate, Coordinate)) -> Self {
            Point::new(x, y)
        }
    }

    impl From<[Coordinate; 2]> for Point {
        fn from([x, y]: [Coordinate; 2]) -> Self {
            Point::new(x, y)
        }
    }
}
