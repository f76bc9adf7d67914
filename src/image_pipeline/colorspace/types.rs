//! Colorspace conversion types

/// Linear RGB to CIE XYZ matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

/// Linear sRGB primaries to XYZ under D65.
pub const SRGB_D65_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// D65 reference white, `Y = 1`.
pub const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

impl ColorMatrix {
    /// sRGB to XYZ scaled so that RGB white maps to `X = Y = Z`.
    pub fn srgb_d65() -> Self {
        Self(SRGB_D65_TO_XYZ).normalized_to_white(D65_WHITE)
    }

    /// Divide each output row by the matching white point component.
    pub fn normalized_to_white(self, white: [f64; 3]) -> Self {
        let mut m = self.0;
        for (row, w) in m.iter_mut().zip(white) {
            for c in row.iter_mut() {
                *c /= w;
            }
        }
        Self(m)
    }

    #[inline(always)]
    pub fn apply(&self, r: f64, g: f64, b: f64) -> [f64; 3] {
        let m = &self.0;
        [
            m[0][0] * r + m[0][1] * g + m[0][2] * b,
            m[1][0] * r + m[1][1] * g + m[1][2] * b,
            m[2][0] * r + m[2][1] * g + m[2][2] * b,
        ]
    }
}

/// Fixed-point Lab planes: `L*` scaled by 300, `a*` and `b*` by 32.
#[derive(Debug, Clone)]
pub struct LabImageData {
    pub width: usize,
    pub height: usize,
    pub l: Vec<i16>,
    pub a: Vec<i16>,
    pub b: Vec<i16>,
}

impl LabImageData {
    pub fn new(width: usize, height: usize) -> Self {
        let npix = width * height;
        Self {
            width,
            height,
            l: vec![0; npix],
            a: vec![0; npix],
            b: vec![0; npix],
        }
    }

    pub fn pixel(&self, row: usize, col: usize) -> (i16, i16, i16) {
        let idx = row * self.width + col;
        (self.l[idx], self.a[idx], self.b[idx])
    }
}

/// YIQ planes at 1000x scale.
#[derive(Debug, Clone)]
pub struct YiqImageData {
    pub width: usize,
    pub height: usize,
    pub y: Vec<i32>,
    pub i: Vec<i32>,
    pub q: Vec<i32>,
}

impl YiqImageData {
    pub fn new(width: usize, height: usize) -> Self {
        let npix = width * height;
        Self {
            width,
            height,
            y: vec![0; npix],
            i: vec![0; npix],
            q: vec![0; npix],
        }
    }
}
