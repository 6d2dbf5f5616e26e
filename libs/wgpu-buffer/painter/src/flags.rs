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
use bitflags::bitflags;

bitflags! {
    /// Per-draw-call flags the painter attaches to whatever it hands the
    /// renderer; a backend is free to ignore flags it has no shader path
    /// for, though `HIDE_BELOW_HORIZON` should always be honored since it
    /// affects correctness, not just appearance.
    #[derive(Default)]
    pub struct PainterFlags: u32 {
        const ADD                 = 1 << 0;
        const HIDE_BELOW_HORIZON  = 1 << 1;
        const PLANET_SHADER       = 1 << 2;
        const RING_SHADER         = 1 << 3;
        const IS_MOON             = 1 << 4;
        const ATMOSPHERE_SHADER   = 1 << 5;
    }
}
