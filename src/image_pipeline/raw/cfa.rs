use std::fmt;

/// Color channel of a sensor site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("red"),
            Self::Green => f.write_str("green"),
            Self::Blue => f.write_str("blue"),
        }
    }
}

use Channel::*;

/// 2x2 Bayer color filter layout, named by its top-left 2x2 tile read row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BayerPattern {
    #[default]
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl BayerPattern {
    const fn tile(self) -> [Channel; 4] {
        match self {
            Self::Rggb => [Red, Green, Green, Blue],
            Self::Bggr => [Blue, Green, Green, Red],
            Self::Grbg => [Green, Red, Blue, Green],
            Self::Gbrg => [Green, Blue, Red, Green],
        }
    }

    /// Color of site `(row, col)`. Depends only on row and column parity.
    #[inline(always)]
    pub fn color_at(self, row: usize, col: usize) -> Channel {
        self.tile()[((row & 1) << 1) | (col & 1)]
    }

    #[inline(always)]
    pub fn is_red(self, row: usize, col: usize) -> bool {
        self.color_at(row, col) == Red
    }

    #[inline(always)]
    pub fn is_green(self, row: usize, col: usize) -> bool {
        self.color_at(row, col) == Green
    }

    #[inline(always)]
    pub fn is_blue(self, row: usize, col: usize) -> bool {
        self.color_at(row, col) == Blue
    }
}

impl fmt::Display for BayerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rggb => "RGGB",
            Self::Bggr => "BGGR",
            Self::Grbg => "GRBG",
            Self::Gbrg => "GBRG",
        };
        f.write_str(name)
    }
}
