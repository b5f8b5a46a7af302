use std::fmt;

pub const N_XYZ_COORDINATES: usize = 3;

/// Three-axis measurement as delivered by the sensor hardware.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct XYZ([f32; N_XYZ_COORDINATES]);

impl XYZ {
    pub fn new(data: [f32; N_XYZ_COORDINATES]) -> Self {
        Self(data)
    }

    pub fn inner(&self) -> [f32; N_XYZ_COORDINATES] {
        self.0
    }

    pub fn x(&self) -> f32 {
        self.0[0]
    }

    pub fn y(&self) -> f32 {
        self.0[1]
    }

    pub fn z(&self) -> f32 {
        self.0[2]
    }
}

impl From<[f32; N_XYZ_COORDINATES]> for XYZ {
    fn from(value: [f32; N_XYZ_COORDINATES]) -> Self {
        Self(value)
    }
}

impl From<XYZ> for Vec<f32> {
    fn from(value: XYZ) -> Self {
        value.inner().to_vec()
    }
}

impl TryFrom<&[f32]> for XYZ {
    type Error = &'static str;

    fn try_from(value: &[f32]) -> Result<Self, Self::Error> {
        if value.len() < N_XYZ_COORDINATES {
            return Err("Can't convert to XYZ");
        }
        Ok(Self([value[0], value[1], value[2]]))
    }
}

impl TryFrom<Vec<f32>> for XYZ {
    type Error = &'static str;

    fn try_from(value: Vec<f32>) -> Result<Self, Self::Error> {
        XYZ::try_from(value.as_slice())
    }
}

/// Renders the coordinates comma separated. Whole values keep their trailing `.0`.
impl fmt::Display for XYZ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?},{:?},{:?}", self.0[0], self.0[1], self.0[2])
    }
}
