//! Field-selection bitmasks.
//!
//! A projection over a table or view with at most 64 fields can be carried
//! around as a single integer: bit `2^index` stands for the field declared
//! at `index`. Entities past the ceiling are simply ineligible and callers
//! fall back to full-field projection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::DataEntity;
use crate::error::{Result, SchemaError};

/// Hard ceiling on the number of fields a bitmask can address.
pub const MAX_MASK_FIELDS: usize = 64;

/// An integer encoding of a subset of a data entity's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMask(u64);

impl FieldMask {
    /// The empty selection.
    pub const NONE: Self = Self(0);

    /// Returns the raw flag value.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Reconstructs a mask from a raw flag value.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the "all fields" sentinel for the given entity: the bitwise
    /// OR of every field bit.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::TooManyFields`] when the entity has more than
    /// [`MAX_MASK_FIELDS`] fields.
    pub fn all(entity: &dyn DataEntity) -> Result<Self> {
        let count = eligible_field_count(entity)?;
        if count == MAX_MASK_FIELDS {
            return Ok(Self(u64::MAX));
        }
        Ok(Self((1_u64 << count) - 1))
    }

    /// Encodes a set of field indexes as a mask.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::TooManyFields`] past the ceiling, or
    /// [`SchemaError::FieldIndexOutOfRange`] for an index the entity does
    /// not have.
    pub fn encode(entity: &dyn DataEntity, indexes: &[usize]) -> Result<Self> {
        let count = eligible_field_count(entity)?;
        let mut bits = 0_u64;
        for &index in indexes {
            if index >= count {
                return Err(SchemaError::FieldIndexOutOfRange {
                    entity: entity.qualified_name().to_string(),
                    index,
                });
            }
            bits |= 1_u64 << index;
        }
        Ok(Self(bits))
    }

    /// Decodes the mask into the ordered list of selected field indexes.
    ///
    /// The "all fields" sentinel short-circuits to the full list without
    /// testing individual bits; zero decodes to the empty list.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::TooManyFields`] past the ceiling, or
    /// [`SchemaError::FieldIndexOutOfRange`] when a set bit lies beyond the
    /// entity's field count.
    pub fn decode(self, entity: &dyn DataEntity) -> Result<Vec<usize>> {
        let count = eligible_field_count(entity)?;
        if self == Self::all(entity)? {
            return Ok((0..count).collect());
        }
        if self.0 == 0 {
            return Ok(Vec::new());
        }
        let highest = MAX_MASK_FIELDS - self.0.leading_zeros() as usize;
        if highest > count {
            return Err(SchemaError::FieldIndexOutOfRange {
                entity: entity.qualified_name().to_string(),
                index: highest - 1,
            });
        }
        Ok((0..count).filter(|&i| self.0 & (1_u64 << i) != 0).collect())
    }

    /// Returns whether the field at `index` is selected.
    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        index < MAX_MASK_FIELDS && self.0 & (1_u64 << index) != 0
    }

    /// Returns the union of two masks.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

fn eligible_field_count(entity: &dyn DataEntity) -> Result<usize> {
    let count = entity.field_count();
    if count > MAX_MASK_FIELDS {
        return Err(SchemaError::TooManyFields {
            entity: entity.qualified_name().to_string(),
            count,
            max: MAX_MASK_FIELDS,
        });
    }
    Ok(count)
}
