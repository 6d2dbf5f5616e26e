// This file is part of Nitrogen.
//
// Nitrogen is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Nitrogen is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Nitrogen.  If not, see <http://www.gnu.org/licenses/>.
mod cartesian;
mod graticule;

pub use crate::{
    cartesian::{Cartesian, CartesianOrigin},
    graticule::{Graticule, GraticuleOrigin},
};

/// Origin at the center of the Earth.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct GeoCenter;
impl GraticuleOrigin for GeoCenter {
    fn origin_marker() -> &'static str {
        "@geocenter"
    }
}
impl CartesianOrigin for GeoCenter {
    fn origin_name() -> &'static str {
        "geocenter"
    }
}

/// Origin on the surface of the Earth's reference ellipsoid.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct GeoSurface;
impl GraticuleOrigin for GeoSurface {
    fn origin_marker() -> &'static str {
        "@surface"
    }
}

/// A vector relative to some other point, rather than an absolute position.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Target;
impl GraticuleOrigin for Target {
    fn origin_marker() -> &'static str {
        "@target"
    }
}
impl CartesianOrigin for Target {
    fn origin_name() -> &'static str {
        "target"
    }
}
