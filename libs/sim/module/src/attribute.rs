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
//! The reflective attribute table modules expose. A module's fields are not
//! reached into directly by other modules or by the host; every cross-module
//! read/write goes through `Module::get_attribute`/`set_attribute`, named and
//! typed by this table.
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeKind {
    F64,
    Bool,
    Text,
    Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    F64(f64),
    Bool(bool),
    Text(String),
    Vec3([f64; 3]),
}

impl AttributeValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::F64(_) => AttributeKind::F64,
            AttributeValue::Bool(_) => AttributeKind::Bool,
            AttributeValue::Text(_) => AttributeKind::Text,
            AttributeValue::Vec3(_) => AttributeKind::Vec3,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttributeValue::F64(v) => write!(f, "{v}"),
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::Text(v) => write!(f, "{v}"),
            AttributeValue::Vec3([x, y, z]) => write!(f, "({x}, {y}, {z})"),
        }
    }
}

/// A single row of a module's attribute table: a name, its semantic type,
/// and whether it accepts writes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub writable: bool,
}

impl Attribute {
    pub const fn read_only(name: &'static str, kind: AttributeKind) -> Self {
        Self {
            name,
            kind,
            writable: false,
        }
    }

    pub const fn read_write(name: &'static str, kind: AttributeKind) -> Self {
        Self {
            name,
            kind,
            writable: true,
        }
    }
}
