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
//! 64-bit object identifiers, wire-compatible with existing catalog files:
//! high bit set means "catalog id" (a 4-byte tag in the high word, masked
//! clear of that bit, plus a 32-bit index in the low word); high bit clear
//! means the remaining 63 bits are a Gaia source id taken verbatim.
const CATALOG_BIT: u32 = 0x8000_0000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Oid {
    Catalog { tag: [u8; 4], index: u32 },
    Gaia { id: u64 },
}

impl Oid {
    pub fn catalog(tag: [u8; 4], index: u32) -> Self {
        Oid::Catalog { tag, index }
    }

    pub fn gaia(id: u64) -> Self {
        Oid::Gaia { id }
    }

    pub fn is_gaia(&self) -> bool {
        matches!(self, Oid::Gaia { .. })
    }

    pub fn to_bits(self) -> u64 {
        match self {
            Oid::Catalog { tag, index } => {
                let tag_bits = u32::from_le_bytes(tag) | CATALOG_BIT;
                ((tag_bits as u64) << 32) | index as u64
            }
            Oid::Gaia { id } => id & !((CATALOG_BIT as u64) << 32),
        }
    }

    pub fn from_bits(bits: u64) -> Self {
        let high = (bits >> 32) as u32;
        if high & CATALOG_BIT != 0 {
            let tag = (high & !CATALOG_BIT).to_le_bytes();
            let index = bits as u32;
            Oid::Catalog { tag, index }
        } else {
            Oid::Gaia { id: bits }
        }
    }

    pub fn catalog_tag(&self) -> [u8; 4] {
        match self {
            Oid::Catalog { tag, .. } => *tag,
            Oid::Gaia { .. } => *b"GAIA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_round_trips_and_sets_high_bit() {
        let oid = Oid::catalog(*b"HD\0\0", 8890);
        let bits = oid.to_bits();
        assert_ne!(bits & 0x8000_0000_0000_0000, 0);
        let back = Oid::from_bits(bits);
        assert_eq!(back.catalog_tag(), *b"HD\0\0");
        assert!(!back.is_gaia());
    }

    #[test]
    fn gaia_ids_round_trip() {
        let oid = Oid::gaia(0x1234_5678_9abc);
        let bits = oid.to_bits();
        assert_eq!(bits & 0x8000_0000_0000_0000, 0);
        let back = Oid::from_bits(bits);
        assert!(back.is_gaia());
        assert_eq!(back, oid);
    }
}
